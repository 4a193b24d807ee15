//! Persisted key-value storage.
//!
//! Stores keep their whole record set under one string key, JSON-encoded.
//! Event and calendar stores share a backend but never touch each other's keys.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::AgendaResult;

pub const EVENTS_KEY: &str = "events";
pub const CALENDARS_KEY: &str = "calendars";
pub const SELECTED_DATE_KEY: &str = "selectedDate";
/// Reserved for a remote backend's auth token. Nothing in the core reads it.
pub const TOKEN_KEY: &str = "token";

/// String keys to JSON-encoded string values.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> AgendaResult<Option<String>>;

    async fn set(&self, key: &str, value: &str) -> AgendaResult<()>;

    async fn remove(&self, key: &str) -> AgendaResult<()>;
}

/// Read and decode a JSON value. `Ok(None)` when the key is absent.
pub async fn load_json<T, S>(kv: &S, key: &str) -> AgendaResult<Option<T>>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    match kv.get(key).await? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

/// Encode and write a JSON value.
pub async fn save_json<T, S>(kv: &S, key: &str, value: &T) -> AgendaResult<()>
where
    T: Serialize + ?Sized,
    S: KeyValueStore + ?Sized,
{
    let raw = serde_json::to_string(value)?;
    kv.set(key, &raw).await
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::atomic::{AtomicBool, Ordering};

    use async_trait::async_trait;

    use super::{KeyValueStore, MemoryStore};
    use crate::error::{AgendaError, AgendaResult};

    /// Memory backend whose writes can be made to fail.
    #[derive(Default)]
    pub struct FlakyStore {
        pub inner: MemoryStore,
        fail_writes: AtomicBool,
        fail_reads: AtomicBool,
    }

    impl FlakyStore {
        pub fn fail_writes(&self, fail: bool) {
            self.fail_writes.store(fail, Ordering::SeqCst);
        }

        pub fn fail_reads(&self, fail: bool) {
            self.fail_reads.store(fail, Ordering::SeqCst);
        }
    }

    #[async_trait]
    impl KeyValueStore for FlakyStore {
        async fn get(&self, key: &str) -> AgendaResult<Option<String>> {
            if self.fail_reads.load(Ordering::SeqCst) {
                return Err(AgendaError::Io(std::io::Error::other("read refused")));
            }
            self.inner.get(key).await
        }

        async fn set(&self, key: &str, value: &str) -> AgendaResult<()> {
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(AgendaError::Io(std::io::Error::other("disk full")));
            }
            self.inner.set(key, value).await
        }

        async fn remove(&self, key: &str) -> AgendaResult<()> {
            self.inner.remove(key).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[tokio::test]
    async fn test_json_helpers() {
        let kv = MemoryStore::new();
        assert_eq!(load_json::<Vec<String>, _>(&kv, "missing").await.unwrap(), None);

        let mut value = BTreeMap::new();
        value.insert("a".to_string(), 1);
        save_json(&kv, "map", &value).await.unwrap();
        assert_eq!(kv.get("map").await.unwrap().as_deref(), Some(r#"{"a":1}"#));
        assert_eq!(load_json(&kv, "map").await.unwrap(), Some(value));
    }

    #[tokio::test]
    async fn test_load_json_reports_malformed_value() {
        let kv = MemoryStore::new();
        kv.set("events", "[{").await.unwrap();
        let result = load_json::<Vec<String>, _>(&kv, "events").await;
        assert!(matches!(result, Err(crate::AgendaError::Serialization(_))));
    }
}

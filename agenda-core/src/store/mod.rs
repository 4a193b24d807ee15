//! In-memory record sets mirrored to a key-value backend.
//!
//! Each store holds its set behind an async mutex that stays locked across
//! the backend write, so overlapping mutations on one store run strictly in
//! order. A mutation builds the next set, persists it, and only then
//! replaces the in-memory set.

mod calendars;
mod events;

pub use calendars::CalendarStore;
pub use events::EventStore;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{AgendaError, AgendaResult};
use crate::kv::{KeyValueStore, load_json, save_json};

/// What update/delete/toggle do when no record has the given id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingIdPolicy {
    /// Leave the set unchanged and report success.
    #[default]
    Ignore,
    /// Fail with `AgendaError::NotFound`.
    Strict,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StoreOptions {
    pub missing_id: MissingIdPolicy,
    /// Apply creation-time validation to event updates as well.
    pub validate_updates: bool,
}

impl StoreOptions {
    fn missing(&self, kind: &str, id: &str) -> AgendaResult<()> {
        match self.missing_id {
            MissingIdPolicy::Ignore => {
                tracing::debug!(kind, id, "no record with this id, nothing to do");
                Ok(())
            }
            MissingIdPolicy::Strict => Err(AgendaError::NotFound(format!("{kind} '{id}'"))),
        }
    }
}

/// Read a persisted record set. Any failure yields an empty set.
async fn load_records<T, S>(kv: &S, key: &str) -> Vec<T>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    match load_json::<Vec<T>, S>(kv, key).await {
        Ok(Some(records)) => records,
        Ok(None) => Vec::new(),
        Err(e) => {
            tracing::warn!(key, error = %e, "failed to load stored records, starting empty");
            Vec::new()
        }
    }
}

async fn persist_records<T, S>(kv: &S, key: &str, records: &[T]) -> AgendaResult<()>
where
    T: Serialize,
    S: KeyValueStore + ?Sized,
{
    save_json(kv, key, records).await.map_err(|e| {
        tracing::error!(key, error = %e, "failed to persist records");
        e.into_persistence()
    })
}

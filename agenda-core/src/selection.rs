//! Last-viewed day, kept under the `selectedDate` key.

use chrono::NaiveDate;

use crate::error::AgendaResult;
use crate::kv::{KeyValueStore, SELECTED_DATE_KEY, load_json, save_json};
use crate::query::parse_day_key;

/// The persisted selected day, if any. Unreadable values are logged and ignored.
pub async fn load_selected_date<S: KeyValueStore + ?Sized>(kv: &S) -> Option<NaiveDate> {
    let raw: String = match load_json(kv, SELECTED_DATE_KEY).await {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            tracing::warn!(error = %e, "failed to read selected date");
            return None;
        }
    };

    match parse_day_key(&raw) {
        Ok(day) => Some(day),
        Err(e) => {
            tracing::warn!(value = %raw, error = %e, "ignoring malformed selected date");
            None
        }
    }
}

pub async fn save_selected_date<S: KeyValueStore + ?Sized>(
    kv: &S,
    day: NaiveDate,
) -> AgendaResult<()> {
    save_json(kv, SELECTED_DATE_KEY, &day.format("%Y-%m-%d").to_string())
        .await
        .map_err(|e| e.into_persistence())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::MemoryStore;

    #[tokio::test]
    async fn test_selected_date_round_trip() {
        let kv = MemoryStore::new();
        assert_eq!(load_selected_date(&kv).await, None);

        let day = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
        save_selected_date(&kv, day).await.unwrap();
        assert_eq!(kv.get(SELECTED_DATE_KEY).await.unwrap().as_deref(), Some("\"2024-03-04\""));
        assert_eq!(load_selected_date(&kv).await, Some(day));
    }

    #[tokio::test]
    async fn test_malformed_selected_date_is_ignored() {
        let kv = MemoryStore::new();
        kv.set(SELECTED_DATE_KEY, "\"yesterday\"").await.unwrap();
        assert_eq!(load_selected_date(&kv).await, None);

        kv.set(SELECTED_DATE_KEY, "2024-03-04").await.unwrap();
        assert_eq!(load_selected_date(&kv).await, None);
    }
}

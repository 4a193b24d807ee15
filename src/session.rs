//! The stores for one process.

use std::path::PathBuf;
use std::sync::Arc;

use agenda_core::config::AgendaConfig;
use agenda_core::kv::FileStore;
use agenda_core::{CalendarStore, EventStore};

/// Owns the single event store and calendar store for this run.
pub struct Session {
    pub kv: Arc<FileStore>,
    pub events: EventStore<FileStore>,
    pub calendars: CalendarStore<FileStore>,
}

impl Session {
    pub async fn open(config: AgendaConfig, data_dir: Option<PathBuf>) -> Self {
        let dir = data_dir.unwrap_or_else(|| config.data_path());
        tracing::debug!(dir = %dir.display(), "opening agenda data");

        let kv = Arc::new(FileStore::new(dir));
        let options = config.store_options();
        let events = EventStore::open(kv.clone(), options).await;
        let calendars = CalendarStore::open(kv.clone(), options).await;

        Session {
            kv,
            events,
            calendars,
        }
    }
}

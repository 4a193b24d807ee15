//! Domain core for agenda.
//!
//! - `event` / `calendar`: the two record types
//! - `store`: event and calendar stores mirrored to a key-value backend
//! - `kv`: the key-value backends (files on disk, or memory)
//! - `query`: day keys, week windows and the derived day/week/month views
//! - `selection`: the persisted last-viewed day

pub mod calendar;
pub mod config;
pub mod error;
pub mod event;
pub mod kv;
pub mod query;
pub mod selection;
pub mod store;

pub use calendar::Calendar;
pub use error::{AgendaError, AgendaResult};
pub use event::{Event, NewEvent};
pub use store::{CalendarStore, EventStore, MissingIdPolicy, StoreOptions};

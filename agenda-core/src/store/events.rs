//! Event store.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use chrono::NaiveDate;
use tokio::sync::Mutex;

use super::{StoreOptions, load_records, persist_records};
use crate::error::AgendaResult;
use crate::event::{Event, NewEvent, generate_id};
use crate::kv::{EVENTS_KEY, KeyValueStore};
use crate::query;

pub struct EventStore<S: KeyValueStore + ?Sized> {
    kv: Arc<S>,
    events: Mutex<Vec<Event>>,
    options: StoreOptions,
}

impl<S: KeyValueStore + ?Sized> EventStore<S> {
    /// Load the persisted events. A missing or unreadable list starts empty.
    pub async fn open(kv: Arc<S>, options: StoreOptions) -> Self {
        let events = load_records(kv.as_ref(), EVENTS_KEY).await;
        tracing::debug!(count = events.len(), "loaded events");

        EventStore {
            kv,
            events: Mutex::new(events),
            options,
        }
    }

    /// Snapshot of the current set, in insertion order.
    pub async fn events(&self) -> Vec<Event> {
        self.events.lock().await.clone()
    }

    /// Validate `input`, assign an id and day key, and append it.
    pub async fn add_event(&self, input: NewEvent) -> AgendaResult<Event> {
        let mut events = self.events.lock().await;

        let mut id = generate_id();
        while events.iter().any(|e| e.id == id) {
            id = generate_id();
        }
        let event = input.into_event(id)?;

        let mut next = events.clone();
        next.push(event.clone());
        persist_records(self.kv.as_ref(), EVENTS_KEY, &next).await?;
        *events = next;

        tracing::debug!(id = %event.id, date = %event.date, "added event");
        Ok(event)
    }

    /// Replace the event with `id`. The stored record keeps `id` whatever
    /// `record.id` says.
    pub async fn update_event(&self, id: &str, record: Event) -> AgendaResult<()> {
        self.edit_event(id, move |event| {
            *event = record;
            Ok(())
        })
        .await
        .map(|_| ())
    }

    /// Apply `change` to the event with `id` and persist the result.
    ///
    /// Returns the stored record, or `None` when no event has `id` and the
    /// missing-id policy ignores it. An error from `change` leaves the set
    /// untouched.
    pub async fn edit_event<F>(&self, id: &str, change: F) -> AgendaResult<Option<Event>>
    where
        F: FnOnce(&mut Event) -> AgendaResult<()> + Send,
    {
        let mut events = self.events.lock().await;
        let Some(pos) = events.iter().position(|e| e.id == id) else {
            return self.options.missing("event", id).map(|()| None);
        };

        let mut next = events.clone();
        change(&mut next[pos])?;
        next[pos].id = id.to_string();
        if self.options.validate_updates {
            next[pos].validate()?;
        }
        let updated = next[pos].clone();

        persist_records(self.kv.as_ref(), EVENTS_KEY, &next).await?;
        *events = next;

        tracing::debug!(id, "updated event");
        Ok(Some(updated))
    }

    pub async fn delete_event(&self, id: &str) -> AgendaResult<()> {
        let mut events = self.events.lock().await;
        if !events.iter().any(|e| e.id == id) {
            return self.options.missing("event", id);
        }

        let next: Vec<Event> = events.iter().filter(|e| e.id != id).cloned().collect();
        persist_records(self.kv.as_ref(), EVENTS_KEY, &next).await?;
        *events = next;

        tracing::debug!(id, "deleted event");
        Ok(())
    }

    /// Events listed under `day`, in insertion order.
    pub async fn events_for_day(&self, day: NaiveDate) -> Vec<Event> {
        let events = self.events.lock().await;
        query::events_on_day(&events, day).into_iter().cloned().collect()
    }

    /// Events whose day falls in `[start, start + 7 days)`.
    pub async fn events_for_week(&self, start: NaiveDate) -> Vec<Event> {
        let events = self.events.lock().await;
        query::events_in_week(&events, start).into_iter().cloned().collect()
    }

    /// The Sunday-anchored week containing `day`, grouped and time-sorted.
    pub async fn week_view(
        &self,
        day: NaiveDate,
    ) -> AgendaResult<BTreeMap<NaiveDate, Vec<Event>>> {
        let window = query::week_window(day)?;
        let events = self.events.lock().await;
        Ok(query::events_in_window(&events, &window)
            .into_iter()
            .map(|(day, on_day)| (day, on_day.into_iter().cloned().collect::<Vec<_>>()))
            .collect())
    }

    pub async fn marked_days(&self) -> BTreeSet<NaiveDate> {
        query::marked_day_keys(&self.events.lock().await)
    }
}

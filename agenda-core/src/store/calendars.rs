//! Calendar store.

use std::sync::Arc;

use tokio::sync::Mutex;

use super::{StoreOptions, load_records, persist_records};
use crate::calendar::Calendar;
use crate::error::AgendaResult;
use crate::kv::{CALENDARS_KEY, KeyValueStore};

pub struct CalendarStore<S: KeyValueStore + ?Sized> {
    kv: Arc<S>,
    calendars: Mutex<Vec<Calendar>>,
    options: StoreOptions,
}

impl<S: KeyValueStore + ?Sized> CalendarStore<S> {
    /// Load the persisted calendars.
    ///
    /// Every loaded calendar comes back visible: the stored `isChecked`
    /// flag is not honoured on load.
    pub async fn open(kv: Arc<S>, options: StoreOptions) -> Self {
        let mut calendars: Vec<Calendar> = load_records(kv.as_ref(), CALENDARS_KEY).await;
        for calendar in &mut calendars {
            calendar.is_checked = true;
        }
        tracing::debug!(count = calendars.len(), "loaded calendars");

        CalendarStore {
            kv,
            calendars: Mutex::new(calendars),
            options,
        }
    }

    pub async fn calendars(&self) -> Vec<Calendar> {
        self.calendars.lock().await.clone()
    }

    /// Create a visible calendar named `name`.
    pub async fn add_calendar(&self, name: &str) -> AgendaResult<Calendar> {
        let mut calendar = Calendar::new(name)?;

        let mut calendars = self.calendars.lock().await;
        while calendars.iter().any(|c| c.id == calendar.id) {
            calendar = Calendar::new(name)?;
        }

        let mut next = calendars.clone();
        next.push(calendar.clone());
        persist_records(self.kv.as_ref(), CALENDARS_KEY, &next).await?;
        *calendars = next;

        tracing::debug!(id = %calendar.id, name = %calendar.name, "added calendar");
        Ok(calendar)
    }

    /// Replace the calendar with `id`, keeping the id.
    pub async fn update_calendar(&self, id: &str, mut record: Calendar) -> AgendaResult<()> {
        record.id = id.to_string();

        self.mutate(id, move |calendar| *calendar = record)
            .await
            .map(|_| ())
    }

    /// Give the calendar with `id` a new name, keeping its visibility.
    pub async fn rename_calendar(&self, id: &str, name: &str) -> AgendaResult<Option<Calendar>> {
        let name = Calendar::check_name(name)?;
        self.mutate(id, move |calendar| calendar.name = name).await
    }

    /// Flip the visibility flag of the calendar with `id`.
    pub async fn toggle_visibility(&self, id: &str) -> AgendaResult<Option<Calendar>> {
        self.mutate(id, |calendar| calendar.is_checked = !calendar.is_checked)
            .await
    }

    pub async fn delete_calendar(&self, id: &str) -> AgendaResult<()> {
        let mut calendars = self.calendars.lock().await;
        if !calendars.iter().any(|c| c.id == id) {
            return self.options.missing("calendar", id);
        }

        let next: Vec<Calendar> = calendars.iter().filter(|c| c.id != id).cloned().collect();
        persist_records(self.kv.as_ref(), CALENDARS_KEY, &next).await?;
        *calendars = next;

        tracing::debug!(id, "deleted calendar");
        Ok(())
    }

    async fn mutate<F>(&self, id: &str, change: F) -> AgendaResult<Option<Calendar>>
    where
        F: FnOnce(&mut Calendar) + Send,
    {
        let mut calendars = self.calendars.lock().await;
        let Some(pos) = calendars.iter().position(|c| c.id == id) else {
            return self.options.missing("calendar", id).map(|()| None);
        };

        let mut next = calendars.clone();
        change(&mut next[pos]);
        let updated = next[pos].clone();
        persist_records(self.kv.as_ref(), CALENDARS_KEY, &next).await?;
        *calendars = next;

        tracing::debug!(id, "updated calendar");
        Ok(Some(updated))
    }
}

//! End-to-end scenarios against the on-disk backend.

use std::collections::HashSet;
use std::sync::Arc;

use agenda_core::kv::{CALENDARS_KEY, EVENTS_KEY, FileStore, KeyValueStore};
use agenda_core::query::{parse_day_key, week_window};
use agenda_core::selection::{load_selected_date, save_selected_date};
use agenda_core::{AgendaError, Calendar, CalendarStore, Event, EventStore, NewEvent, StoreOptions};
use chrono::{DateTime, NaiveDate, Utc};

fn ts(s: &str) -> DateTime<Utc> {
    s.parse().unwrap()
}

fn day(s: &str) -> NaiveDate {
    parse_day_key(s).unwrap()
}

fn new_event(title: &str, date: &str, start: &str, end: &str) -> NewEvent {
    NewEvent {
        title: title.to_string(),
        date: date.to_string(),
        start_time: ts(start),
        end_time: ts(end),
        location: Some("Room 4".to_string()),
        description: None,
    }
}

#[tokio::test]
async fn standup_is_listed_on_its_day() {
    let dir = tempfile::TempDir::new().unwrap();
    let kv = Arc::new(FileStore::new(dir.path()));
    let events = EventStore::open(kv, StoreOptions::default()).await;

    let added = events
        .add_event(new_event(
            "Standup",
            "2024-03-04",
            "2024-03-04T09:00:00Z",
            "2024-03-04T09:15:00Z",
        ))
        .await
        .unwrap();

    let found = events.events_for_day(day("2024-03-04")).await;
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, added.id);
    assert_eq!(found[0].title, "Standup");
    assert_eq!(found[0].date, day("2024-03-04"));
}

#[test]
fn week_window_of_a_monday() {
    let window: Vec<String> = week_window(day("2024-03-04"))
        .unwrap()
        .iter()
        .map(|d| d.format("%Y-%m-%d").to_string())
        .collect();
    assert_eq!(
        window,
        vec![
            "2024-03-03",
            "2024-03-04",
            "2024-03-05",
            "2024-03-06",
            "2024-03-07",
            "2024-03-08",
            "2024-03-09",
        ]
    );
}

#[tokio::test]
async fn hidden_calendar_comes_back_visible() {
    let dir = tempfile::TempDir::new().unwrap();
    let kv = Arc::new(FileStore::new(dir.path()));
    kv.set(CALENDARS_KEY, r#"[{"id":"1","name":"Work","isChecked":false}]"#)
        .await
        .unwrap();

    let calendars = CalendarStore::open(kv, StoreOptions::default()).await;
    assert_eq!(
        calendars.calendars().await,
        vec![Calendar {
            id: "1".to_string(),
            name: "Work".to_string(),
            is_checked: true,
        }]
    );
}

#[tokio::test]
async fn sets_survive_a_restart() {
    let dir = tempfile::TempDir::new().unwrap();

    let (saved_events, saved_calendars) = {
        let kv = Arc::new(FileStore::new(dir.path()));
        let events = EventStore::open(kv.clone(), StoreOptions::default()).await;
        let calendars = CalendarStore::open(kv.clone(), StoreOptions::default()).await;

        for (title, date) in [("A", "2024-03-04"), ("B", "2024-03-05"), ("C", "2024-03-05")] {
            let start = format!("{date}T10:00:00Z");
            let end = format!("{date}T11:00:00Z");
            events.add_event(new_event(title, date, &start, &end)).await.unwrap();
        }
        calendars.add_calendar("Work").await.unwrap();
        calendars.add_calendar("Home").await.unwrap();
        save_selected_date(kv.as_ref(), day("2024-03-05")).await.unwrap();

        (events.events().await, calendars.calendars().await)
    };

    let kv = Arc::new(FileStore::new(dir.path()));
    let events = EventStore::open(kv.clone(), StoreOptions::default()).await;
    let calendars = CalendarStore::open(kv.clone(), StoreOptions::default()).await;

    let as_set = |list: Vec<Event>| {
        list.into_iter()
            .map(|e| serde_json::to_string(&e).unwrap())
            .collect::<HashSet<_>>()
    };
    assert_eq!(as_set(events.events().await), as_set(saved_events));
    assert_eq!(calendars.calendars().await, saved_calendars);
    assert_eq!(load_selected_date(kv.as_ref()).await, Some(day("2024-03-05")));
    assert!(kv.get(EVENTS_KEY).await.unwrap().is_some());
}

#[tokio::test]
async fn invalid_event_leaves_disk_untouched() {
    let dir = tempfile::TempDir::new().unwrap();
    let kv = Arc::new(FileStore::new(dir.path()));
    let events = EventStore::open(kv.clone(), StoreOptions::default()).await;

    let result = events
        .add_event(new_event(
            "Backwards",
            "2024-03-04",
            "2024-03-04T10:00:00Z",
            "2024-03-04T10:00:00Z",
        ))
        .await;

    assert!(matches!(result, Err(AgendaError::Validation(_))));
    assert!(events.events().await.is_empty());
    assert_eq!(kv.get(EVENTS_KEY).await.unwrap(), None);
}

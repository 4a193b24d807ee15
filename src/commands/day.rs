use anyhow::Result;
use chrono::NaiveDate;
use owo_colors::OwoColorize;

use crate::render::{Render, day_heading};
use crate::session::Session;

pub async fn run(session: &Session, day: NaiveDate) -> Result<()> {
    let mut events = session.events.events_for_day(day).await;
    events.sort_by(|a, b| a.start_time.cmp(&b.start_time));

    println!("{}", day_heading(day).bold());
    if events.is_empty() {
        println!("  {}", "No events".dimmed());
        return Ok(());
    }

    for event in &events {
        println!("  {}", event.render());
        if let Some(description) = &event.description {
            println!("    {}", description.dimmed());
        }
    }
    Ok(())
}

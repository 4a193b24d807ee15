use agenda_core::query::{calendar_marks, week_window};
use agenda_core::selection::{load_selected_date, save_selected_date};
use anyhow::Result;
use chrono::{Local, NaiveDate};
use owo_colors::OwoColorize;

use crate::render::{Render, day_heading, dot};
use crate::session::Session;

/// Show the week containing `day`, or the last viewed week when no day is given.
pub async fn run(session: &Session, day: Option<NaiveDate>) -> Result<()> {
    let day = match day {
        Some(day) => day,
        None => load_selected_date(session.kv.as_ref())
            .await
            .unwrap_or_else(|| Local::now().date_naive()),
    };

    let window = week_window(day)?;
    let marks = calendar_marks(&session.events.events().await, &window);

    let strip: Vec<String> = window
        .iter()
        .map(|d| {
            let label = d.format("%a %-d").to_string();
            match marks.get(d).and_then(|m| m.color_index) {
                Some(index) => format!("{} {}", label, dot(index)),
                None => format!("{}  ", label),
            }
        })
        .collect();
    println!("{}", strip.join("  "));

    for (date, events) in session.events.week_view(day).await? {
        println!();
        println!("{}", day_heading(date).bold());
        if events.is_empty() {
            println!("  {}", "-".dimmed());
        }
        for event in &events {
            println!("  {}", event.render());
        }
    }

    save_selected_date(session.kv.as_ref(), day).await?;
    Ok(())
}

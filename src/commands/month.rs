use agenda_core::query::{calendar_marks, month_grid};
use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use owo_colors::OwoColorize;

use crate::render::{Render, grid_cell};
use crate::session::Session;

/// Show a month grid with event days marked, then the selected day's events.
pub async fn run(session: &Session, year: i32, month: u32, selected: Option<NaiveDate>) -> Result<()> {
    let grid = month_grid(year, month)?;
    let selected = selected.filter(|d| d.year() == year && d.month() == month);
    let selected_days: Vec<NaiveDate> = selected.into_iter().collect();

    let events = session.events.events().await;
    let marks = calendar_marks(&events, &selected_days);

    if let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) {
        println!("{}", first.format("%B %Y").to_string().bold());
    }
    println!("{}", " Su  Mo  Tu  We  Th  Fr  Sa".dimmed());
    for row in &grid {
        let line: String = row
            .iter()
            .map(|cell| match cell {
                Some(day) => grid_cell(*day, marks.get(day)),
                None => "    ".to_string(),
            })
            .collect();
        println!("{}", line.trim_end());
    }

    let Some(day) = selected else {
        return Ok(());
    };

    println!();
    println!("{}", format!("Events on {}", day.format("%Y-%m-%d")).bold());
    let on_day = session.events.events_for_day(day).await;
    if on_day.is_empty() {
        println!("  {}", "No events".dimmed());
    }
    for event in &on_day {
        println!("  {}", event.render());
    }
    Ok(())
}

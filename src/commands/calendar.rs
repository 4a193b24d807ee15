use anyhow::{Context, Result};
use owo_colors::OwoColorize;

use crate::render::Render;
use crate::session::Session;

pub async fn add(session: &Session, name: &str) -> Result<()> {
    let calendar = session.calendars.add_calendar(name).await?;
    println!("{} {}", "Created".green(), calendar.render());
    Ok(())
}

pub async fn rename(session: &Session, id: &str, name: &str) -> Result<()> {
    match session.calendars.rename_calendar(id, name).await? {
        Some(calendar) => println!("{} {}", "Renamed".yellow(), calendar.render()),
        None => println!("{}", format!("No calendar '{id}', nothing to rename").dimmed()),
    }
    Ok(())
}

pub async fn delete(session: &Session, id: &str) -> Result<()> {
    session.calendars.delete_calendar(id).await?;
    println!("{} {}", "Deleted".red(), id);
    Ok(())
}

/// Loading forces every calendar visible, so this reports the in-session state.
pub async fn toggle(session: &Session, id: &str) -> Result<()> {
    match session.calendars.toggle_visibility(id).await? {
        Some(calendar) => println!("{}", calendar.render()),
        None => println!("{}", format!("No calendar '{id}', nothing to toggle").dimmed()),
    }
    Ok(())
}

pub async fn list(session: &Session, json: bool) -> Result<()> {
    let calendars = session.calendars.calendars().await;

    if json {
        let out = serde_json::to_string_pretty(&calendars).context("Failed to encode calendars")?;
        println!("{out}");
        return Ok(());
    }

    if calendars.is_empty() {
        println!("{}", "No calendars".dimmed());
        return Ok(());
    }
    for calendar in &calendars {
        println!("{}", calendar.render());
    }
    Ok(())
}

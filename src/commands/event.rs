use agenda_core::{AgendaError, NewEvent};
use agenda_core::query::parse_day_key;
use anyhow::{Context, Result};
use owo_colors::OwoColorize;

use crate::parse::{parse_datetime, parse_end};
use crate::render::Render;
use crate::session::Session;

pub struct EventFields {
    pub title: Option<String>,
    pub date: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
}

pub async fn add(session: &Session, title: String, fields: EventFields) -> Result<()> {
    let start = fields
        .start
        .ok_or_else(|| anyhow::anyhow!("--start is required"))?;
    let end = fields.end.ok_or_else(|| anyhow::anyhow!("--end is required"))?;
    let start_time = parse_datetime(&start)?;
    let end_time = parse_end(&end)?
        .resolve(start_time)
        .context("End time is out of range")?;

    // Without --date the event is listed under the local day of its start
    let date = match fields.date {
        Some(date) => date,
        None => start_time
            .with_timezone(&chrono::Local)
            .format("%Y-%m-%d")
            .to_string(),
    };

    let event = session
        .events
        .add_event(NewEvent {
            title,
            date,
            start_time,
            end_time,
            location: fields.location,
            description: fields.description,
        })
        .await?;

    println!("{} {}", "Created".green(), event.render());
    println!("  {}", event.id.dimmed());
    Ok(())
}

pub async fn update(session: &Session, id: &str, fields: EventFields) -> Result<()> {
    let date = fields.date.as_deref().map(parse_day_key).transpose()?;
    let start = fields.start.as_deref().map(parse_datetime).transpose()?;
    let end = fields.end.as_deref().map(parse_end).transpose()?;
    let EventFields {
        title,
        location,
        description,
        ..
    } = fields;

    let updated = session
        .events
        .edit_event(id, move |event| {
            if let Some(title) = title {
                event.title = title;
            }
            if let Some(date) = date {
                event.date = date;
            }
            if let Some(start) = start {
                event.start_time = start;
            }
            // A duration is measured from the start as it stands after this edit
            if let Some(end) = end {
                event.end_time = end
                    .resolve(event.start_time)
                    .ok_or_else(|| AgendaError::Validation("End time is out of range".into()))?;
            }
            if let Some(location) = location {
                event.location = Some(location).filter(|l| !l.is_empty());
            }
            if let Some(description) = description {
                event.description = Some(description).filter(|d| !d.is_empty());
            }
            Ok(())
        })
        .await?;

    match updated {
        Some(event) => println!("{} {}", "Updated".yellow(), event.render()),
        None => println!("{}", format!("No event '{id}', nothing to update").dimmed()),
    }
    Ok(())
}

pub async fn delete(session: &Session, id: &str) -> Result<()> {
    session.events.delete_event(id).await?;
    println!("{} {}", "Deleted".red(), id);
    Ok(())
}

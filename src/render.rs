//! Terminal rendering for agenda types.
//!
//! Extension traits that add colored output to agenda-core types using
//! owo_colors.

use agenda_core::query::{DayMark, time_block};
use agenda_core::{Calendar, Event};
use chrono::{Local, NaiveDate};
use owo_colors::OwoColorize;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for Event {
    fn render(&self) -> String {
        let block = time_block(self, &Local);
        let start = self.start_time.with_timezone(&Local).format("%H:%M");
        let end = self.end_time.with_timezone(&Local).format("%H:%M");

        let mut line = format!(
            "{} {}-{} {} {}",
            dot(self.color_index()),
            start,
            end,
            self.title.bold(),
            format!("({})", format_minutes(block.duration_minutes)).dimmed()
        );
        if let Some(location) = &self.location {
            line.push_str(&format!(" @ {}", location));
        }
        line
    }
}

impl Render for Calendar {
    fn render(&self) -> String {
        let check = if self.is_checked { "[x]" } else { "[ ]" };
        format!("{} {} {}", check, self.name, self.id.dimmed())
    }
}

/// A marker dot in the event's palette colour.
pub fn dot(color_index: usize) -> String {
    match color_index {
        0 => "●".blue().to_string(),
        1 => "●".green().to_string(),
        2 => "●".yellow().to_string(),
        _ => "●".red().to_string(),
    }
}

/// Day heading, e.g. "Monday, Mar 4".
pub fn day_heading(day: NaiveDate) -> String {
    day.format("%A, %b %-d").to_string()
}

/// One month-grid cell, two characters wide plus padding.
pub fn grid_cell(day: NaiveDate, mark: Option<&DayMark>) -> String {
    let number = day.format("%e").to_string();
    let Some(mark) = mark else {
        return format!(" {} ", number);
    };

    let number = if mark.selected {
        number.reversed().to_string()
    } else {
        number
    };
    match mark.color_index {
        Some(index) if mark.marked => format!(" {}{}", number, dot_small(index)),
        _ => format!(" {} ", number),
    }
}

fn dot_small(color_index: usize) -> String {
    match color_index {
        0 => "·".blue().to_string(),
        1 => "·".green().to_string(),
        2 => "·".yellow().to_string(),
        _ => "·".red().to_string(),
    }
}

/// "15m", "1h", "1h30m"
pub fn format_minutes(minutes: u32) -> String {
    match (minutes / 60, minutes % 60) {
        (0, m) => format!("{m}m"),
        (h, 0) => format!("{h}h"),
        (h, m) => format!("{h}h{m}m"),
    }
}

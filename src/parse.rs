//! Parsing of command-line date and time arguments.

use agenda_core::query::parse_day_key;
use anyhow::{Context, Result};
use chrono::{DateTime, Datelike, Duration, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Expand common abbreviations that fuzzydate doesn't handle.
fn expand_abbreviations(input: &str) -> String {
    let abbrevs = [
        ("mon", "monday"),
        ("tue", "tuesday"),
        ("tues", "tuesday"),
        ("wed", "wednesday"),
        ("thu", "thursday"),
        ("thur", "thursday"),
        ("thurs", "thursday"),
        ("fri", "friday"),
        ("sat", "saturday"),
        ("sun", "sunday"),
        ("jan", "january"),
        ("feb", "february"),
        ("mar", "march"),
        ("apr", "april"),
        ("jun", "june"),
        ("jul", "july"),
        ("aug", "august"),
        ("sep", "september"),
        ("sept", "september"),
        ("oct", "october"),
        ("nov", "november"),
        ("dec", "december"),
    ];

    input
        .to_lowercase()
        .split_whitespace()
        .map(|word| {
            abbrevs
                .iter()
                .find(|(abbr, _)| *abbr == word)
                .map(|(_, full)| (*full).to_string())
                .unwrap_or_else(|| word.to_string())
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn parse_fuzzy(input: &str) -> Result<NaiveDateTime> {
    fuzzydate::parse(&expand_abbreviations(input))
        .map_err(|_| anyhow::anyhow!("Could not parse date/time: \"{}\"", input))
}

/// Parse a point in time.
///
/// RFC 3339 timestamps are taken as-is. Anything else ("tomorrow 3pm",
/// "fri 9:30") is read as a local wall-clock time.
pub fn parse_datetime(input: &str) -> Result<DateTime<Utc>> {
    parse_datetime_in(input, &Local)
}

pub fn parse_datetime_in<Tz: TimeZone>(input: &str, tz: &Tz) -> Result<DateTime<Utc>> {
    let input = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.with_timezone(&Utc));
    }

    let naive = parse_fuzzy(input)?;
    let local = tz
        .from_local_datetime(&naive)
        .earliest()
        .with_context(|| format!("\"{input}\" does not exist in the local time zone"))?;
    Ok(local.with_timezone(&Utc))
}

/// End of an event: a point in time, or a length measured from the start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndSpec {
    At(DateTime<Utc>),
    After(Duration),
}

impl EndSpec {
    pub fn resolve(&self, start: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            EndSpec::At(end) => Some(*end),
            EndSpec::After(length) => start.checked_add_signed(*length),
        }
    }
}

/// Parse an end input: a duration first (humantime), then a date/time.
pub fn parse_end(input: &str) -> Result<EndSpec> {
    parse_end_in(input, &Local)
}

pub fn parse_end_in<Tz: TimeZone>(input: &str, tz: &Tz) -> Result<EndSpec> {
    let input = input.trim();

    if let Ok(std_dur) = humantime::parse_duration(input) {
        let length = Duration::from_std(std_dur).context("Duration too large")?;
        return Ok(EndSpec::After(length));
    }

    let cleaned = input
        .strip_prefix("until ")
        .or_else(|| input.strip_prefix("to "))
        .unwrap_or(input);

    parse_datetime_in(cleaned, tz).map(EndSpec::At)
}

/// Parse a day argument, defaulting to today.
///
/// Accepts `YYYY-MM-DD`, an RFC 3339 timestamp, or a phrase like "tomorrow".
pub fn parse_day_or_today(input: Option<&str>) -> Result<NaiveDate> {
    let Some(raw) = input else {
        return Ok(Local::now().date_naive());
    };

    match parse_day_key(raw) {
        Ok(day) => Ok(day),
        Err(e) => parse_fuzzy(raw).map(|dt| dt.date()).map_err(|_| e.into()),
    }
}

/// Parse `YYYY-MM` into (year, month).
pub fn parse_month(input: &str) -> Result<(i32, u32)> {
    let first = NaiveDate::parse_from_str(&format!("{}-01", input.trim()), "%Y-%m-%d")
        .with_context(|| format!("Invalid month \"{input}\". Expected YYYY-MM"))?;
    Ok((first.year(), first.month()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Timelike};

    #[test]
    fn test_parse_rfc3339() {
        let dt = parse_datetime("2024-03-04T09:00:00+01:00").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 3, 4, 8, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_natural_language_in_zone() {
        let tz = FixedOffset::west_opt(5 * 3600).unwrap();
        let dt = parse_datetime_in("march 20 3pm", &tz).unwrap().with_timezone(&tz);
        assert_eq!((dt.month(), dt.day()), (3, 20));
        assert_eq!((dt.hour(), dt.minute()), (15, 0));

        assert!(parse_datetime("sat 3pm").is_ok());
    }

    #[test]
    fn test_parse_datetime_rejects_garbage() {
        assert!(parse_datetime("not a date at all xyz").is_err());
    }

    #[test]
    fn test_expand_abbreviations() {
        assert_eq!(expand_abbreviations("sat 3pm"), "saturday 3pm");
        assert_eq!(expand_abbreviations("Sept 5"), "september 5");
        assert_eq!(expand_abbreviations("tomorrow 6pm"), "tomorrow 6pm");
    }

    #[test]
    fn test_parse_end_duration() {
        let start = Utc.with_ymd_and_hms(2024, 3, 4, 9, 0, 0).unwrap();

        let end = parse_end("45m").unwrap();
        assert_eq!(end, EndSpec::After(Duration::minutes(45)));
        assert_eq!(end.resolve(start), Some(start + Duration::minutes(45)));

        let end = parse_end("1h 30m").unwrap();
        assert_eq!(end.resolve(start), Some(start + Duration::minutes(90)));
    }

    #[test]
    fn test_parse_end_point_in_time() {
        let start = Utc.with_ymd_and_hms(2024, 3, 4, 9, 0, 0).unwrap();
        let end = parse_end("2024-03-04T09:15:00Z").unwrap();
        assert_eq!(
            end.resolve(start),
            Some(Utc.with_ymd_and_hms(2024, 3, 4, 9, 15, 0).unwrap())
        );

        let tz = FixedOffset::east_opt(0).unwrap();
        let end = parse_end_in("until march 20 3pm", &tz).unwrap();
        assert!(matches!(end, EndSpec::At(_)));
    }

    #[test]
    fn test_end_past_max_date_does_not_resolve() {
        let end = EndSpec::After(Duration::days(1));
        assert_eq!(end.resolve(DateTime::<Utc>::MAX_UTC), None);
    }

    #[test]
    fn test_parse_day() {
        assert_eq!(
            parse_day_or_today(Some("2024-03-04")).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 4).unwrap()
        );

        let day = parse_day_or_today(Some("march 20")).unwrap();
        assert_eq!((day.month(), day.day()), (3, 20));

        assert!(parse_day_or_today(Some("not a date at all xyz")).is_err());
    }

    #[test]
    fn test_parse_month() {
        assert_eq!(parse_month("2024-03").unwrap(), (2024, 3));
        assert!(parse_month("2024-13").is_err());
        assert!(parse_month("March").is_err());
    }
}

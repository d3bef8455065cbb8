use chrono::{Local, NaiveDate, NaiveDateTime, TimeZone};
use regex::Regex;
use std::sync::OnceLock;

/// The textual literal shapes that get rewritten into numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralShape {
    /// `YYYY-MM-DD`, becomes epoch milliseconds at local midnight.
    Date,
    /// `YYYY-MM-DD HH:MM:SS`, becomes epoch milliseconds in local time.
    DateTime,
    /// `HH:MM:SS`, becomes seconds since midnight.
    TimeOfDay,
}

fn date_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("valid date pattern"))
}

fn date_time_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2} [0-9]{2}:[0-9]{2}:[0-9]{2}$")
            .expect("valid date-time pattern")
    })
}

fn time_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[0-9]{2}:[0-9]{2}:[0-9]{2}$").expect("valid time pattern")
    })
}

impl LiteralShape {
    /// Classifies `raw` by full-string match. Anything else is left alone.
    pub fn detect(raw: &str) -> Option<Self> {
        if date_pattern().is_match(raw) {
            Some(LiteralShape::Date)
        } else if date_time_pattern().is_match(raw) {
            Some(LiteralShape::DateTime)
        } else if time_pattern().is_match(raw) {
            Some(LiteralShape::TimeOfDay)
        } else {
            None
        }
    }

    pub fn describe(self) -> &'static str {
        match self {
            LiteralShape::Date => "date",
            LiteralShape::DateTime => "date-time",
            LiteralShape::TimeOfDay => "time of day",
        }
    }

    /// Numeric form of `raw`, or `None` when it matches the shape but is not a real value.
    pub fn normalize(self, raw: &str) -> Option<i64> {
        match self {
            LiteralShape::Date => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
                .and_then(local_epoch_millis),
            LiteralShape::DateTime => NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
                .ok()
                .and_then(local_epoch_millis),
            LiteralShape::TimeOfDay => {
                let mut parts = raw.split(':').map(str::parse::<i64>);
                match (parts.next(), parts.next(), parts.next()) {
                    (Some(Ok(h)), Some(Ok(m)), Some(Ok(s))) => Some(h * 3600 + m * 60 + s),
                    _ => None,
                }
            }
        }
    }
}

/// Local wall-clock time to epoch milliseconds. Ambiguous times take the earlier instant.
fn local_epoch_millis(naive: NaiveDateTime) -> Option<i64> {
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|instant| instant.timestamp_millis())
}

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};

/// Milliseconds since the Unix epoch for the given instant
pub fn epoch_millis(dt: DateTime<Utc>) -> i64 {
    dt.timestamp_millis()
}

/// Generate a record identifier from the current wall-clock time.
///
/// Two calls within the same millisecond return the same value.
pub fn generate_id() -> i64 {
    epoch_millis(Utc::now())
}

/// Format an instant as `YYYY-MM-DDTHH:MM:SS.mmmZ`
pub fn iso_timestamp(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Format the calendar date (UTC) of an instant as `YYYY-MM-DD`
pub fn iso_date(dt: DateTime<Utc>) -> String {
    format_date(dt.date_naive())
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Today's date in UTC as `YYYY-MM-DD`
pub fn today() -> String {
    iso_date(Utc::now())
}

/// Check that a string has the `YYYY-MM-DD` shape.
///
/// Only the shape is checked; `2024-02-31` is accepted.
pub fn is_iso_date(value: &str) -> bool {
    let bytes = value.as_bytes();

    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

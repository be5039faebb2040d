use tracing::warn;

use super::{Columns, DATE_COLUMN, DELIMITER, ID_COLUMN, NOTES_COLUMN, QUOTE, TIMESTAMP_COLUMN};
use crate::models::GameRecord;
use crate::utils::time::generate_id;

/// Decode a document with the default column labels
pub fn decode(document: &str) -> Vec<GameRecord> {
    decode_with(document, &Columns::default())
}

/// Decode a document into records, in document order.
///
/// Malformed rows never abort the decode: missing trailing values are read as
/// empty strings and an unusable `id` is replaced with a generated one.
pub fn decode_with(document: &str, columns: &Columns) -> Vec<GameRecord> {
    let document = document.trim();
    if document.is_empty() {
        return Vec::new();
    }

    let lines: Vec<&str> = document
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect();

    let Some((header_line, rows)) = lines.split_first() else {
        return Vec::new();
    };

    let headers: Vec<&str> = header_line.split(DELIMITER).collect();

    rows.iter()
        .map(|row| decode_row(&headers, &split_fields(row), columns))
        .collect()
}

/// Configured flag/result labels that the document header does not contain.
///
/// An empty document has no header and is missing nothing.
pub fn missing_columns<'a>(document: &str, columns: &'a Columns) -> Vec<&'a str> {
    let Some(header_line) = document.trim().split('\n').next() else {
        return Vec::new();
    };
    let header_line = header_line.strip_suffix('\r').unwrap_or(header_line);
    if header_line.is_empty() {
        return Vec::new();
    }

    let headers: Vec<&str> = header_line.split(DELIMITER).collect();

    [columns.flag.as_str(), columns.result.as_str()]
        .into_iter()
        .filter(|label| !headers.contains(label))
        .collect()
}

fn decode_row(headers: &[&str], values: &[&str], columns: &Columns) -> GameRecord {
    let mut record = GameRecord::default();

    for (index, header) in headers.iter().enumerate() {
        let value = values.get(index).copied().unwrap_or("");

        match *header {
            ID_COLUMN => record.id = decode_id(value),
            DATE_COLUMN => record.date = value.to_string(),
            NOTES_COLUMN => record.notes = unquote(value),
            TIMESTAMP_COLUMN => record.timestamp = value.to_string(),
            h if h == columns.flag => record.mercy_banned = value == "true",
            h if h == columns.result => record.won = value == "true",
            other => {
                record.extra.insert(other.to_string(), value.to_string());
            }
        }
    }

    if !headers.contains(&ID_COLUMN) {
        record.id = generate_id();
    }

    record
}

/// Split a row on the delimiter, ignoring delimiters inside a quoted value.
///
/// Quote characters are kept in the returned slices.
fn split_fields(row: &str) -> Vec<&str> {
    let mut fields = Vec::new();
    let mut in_quotes = false;
    let mut start = 0;

    for (index, ch) in row.char_indices() {
        if ch == QUOTE {
            in_quotes = !in_quotes;
        } else if ch == DELIMITER && !in_quotes {
            fields.push(&row[start..index]);
            start = index + ch.len_utf8();
        }
    }
    fields.push(&row[start..]);

    fields
}

/// Strip one enclosing pair of quotes, then collapse doubled quotes
fn unquote(value: &str) -> String {
    let inner = value
        .strip_prefix(QUOTE)
        .and_then(|v| v.strip_suffix(QUOTE))
        .unwrap_or(value);

    inner.replace("\"\"", "\"")
}

fn decode_id(value: &str) -> i64 {
    match parse_leading_int(value) {
        Some(id) if id != 0 => id,
        _ => {
            let id = generate_id();
            warn!("Replacing unusable record id {:?} with {}", value, id);
            id
        }
    }
}

/// Parse the integer prefix of a string: optional sign followed by digits.
///
/// Trailing garbage is ignored, so `"12abc"` parses as `12`.
fn parse_leading_int(value: &str) -> Option<i64> {
    let value = value.trim_start();
    let unsigned = value.trim_start_matches(['+', '-']);
    let sign_len = value.len() - unsigned.len();
    if sign_len > 1 {
        return None;
    }

    let digits_len = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    if digits_len == 0 {
        return None;
    }

    value[..sign_len + digits_len].parse().ok()
}

use super::{Columns, DELIMITER, QUOTE};
use crate::models::GameRecord;

/// Encode records with the default column labels
pub fn encode(records: &[GameRecord]) -> String {
    encode_with(records, &Columns::default())
}

/// Encode records into a document: a header line plus one line per record.
///
/// An empty collection encodes to the empty string, without a header.
pub fn encode_with(records: &[GameRecord], columns: &Columns) -> String {
    if records.is_empty() {
        return String::new();
    }

    let delimiter = DELIMITER.to_string();

    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(columns.header().join(delimiter.as_str()));
    lines.extend(records.iter().map(|record| encode_row(record).join(delimiter.as_str())));

    lines.join("\n")
}

fn encode_row(record: &GameRecord) -> [String; 6] {
    [
        encode_id(record.id),
        record.date.clone(),
        encode_bool(record.mercy_banned).to_string(),
        encode_bool(record.won).to_string(),
        quote(&record.notes),
        record.timestamp.clone(),
    ]
}

fn encode_id(id: i64) -> String {
    if id == 0 { String::new() } else { id.to_string() }
}

fn encode_bool(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

fn quote(value: &str) -> String {
    let escaped = value.replace(QUOTE, "\"\"");
    format!("{QUOTE}{escaped}{QUOTE}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_empty_is_empty_document() {
        assert_eq!(encode(&[]), "");
    }

    #[test]
    fn test_encode_two_records() {
        let records = vec![
            GameRecord::new(1, "2024-01-01", true, true, "", "t1"),
            GameRecord::new(2, "2024-01-02", false, false, "lost badly", "t2"),
        ];

        let document = encode(&records);
        let lines: Vec<&str> = document.split('\n').collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "id,date,mercyBanned,won,notes,timestamp");
        assert_eq!(lines[1], "1,2024-01-01,true,true,\"\",t1");
        assert_eq!(lines[2], "2,2024-01-02,false,false,\"lost badly\",t2");
        assert!(!document.ends_with('\n'));
    }

    #[test]
    fn test_encode_doubles_quotes_in_notes() {
        let records = vec![GameRecord::new(9, "2024-01-01", false, false, "He said \"go\"", "t")];
        let document = encode(&records);

        assert!(document.ends_with(",\"He said \"\"go\"\"\",t"));
    }

    #[test]
    fn test_encode_zero_id_and_empty_fields_as_empty() {
        let records = vec![GameRecord::default()];
        let document = encode(&records);

        assert_eq!(document.lines().nth(1), Some(",,false,false,\"\","));
    }

    #[test]
    fn test_encode_is_deterministic() {
        let records = vec![GameRecord::new(5, "2024-05-05", true, false, "x", "t")];
        assert_eq!(encode(&records), encode(&records.clone()));
    }
}

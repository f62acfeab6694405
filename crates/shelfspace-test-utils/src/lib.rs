//! Testing utilities for the shelfspace workspace
//!
//! Shared fixtures and a minimal reader for the comma-only CSV format.

#![allow(missing_docs)]

use shelfspace_export::{Record, Scalar};

/// Fixed sample: three fixtures, one with a comma in `createdBy`
pub fn fixture_records() -> Vec<Record> {
    vec![
        fixture_record(0, "User 0"),
        fixture_record(1, "User 1, Store Ops"),
        fixture_record(2, "User 2"),
    ]
}

pub fn fixture_record(i: i64, created_by: &str) -> Record {
    Record::new()
        .with("fixtureBarcode", format!("FB{}", 1000 + i))
        .with("fixtureKey", format!("FK{}", 2000 + i))
        .with("fixtureCount", i + 1)
        .with("linearMeters", 1.5 + i as f64)
        .with("isCurrent", i % 2 == 0)
        .with("createdBy", created_by)
}

/// Build a text-only record from pairs
pub fn text_record(pairs: &[(&str, &str)]) -> Record {
    pairs.iter().map(|(k, v)| (*k, *v)).collect()
}

/// Stringified values of a record, in field order
pub fn stringified(record: &Record) -> Vec<String> {
    record.iter().map(|(_, v)| Scalar::to_cell(v)).collect()
}

/// Split one comma-only CSV line into cells
///
/// A cell that starts with `"` runs to the next `"` followed by a comma or end
/// of line; its surrounding quotes are stripped. Cells containing quotes or
/// newlines are out of scope for this format.
pub fn split_line(line: &str) -> Vec<String> {
    let mut cells = Vec::new();
    let mut rest = line;
    loop {
        if let Some(quoted) = rest.strip_prefix('"') {
            let end = quoted.find("\",").unwrap_or(quoted.len().saturating_sub(1));
            cells.push(quoted[..end].to_string());
            rest = &quoted[end..];
            rest = rest.strip_prefix('"').unwrap_or(rest);
        } else {
            let end = rest.find(',').unwrap_or(rest.len());
            cells.push(rest[..end].to_string());
            rest = &rest[end..];
        }
        match rest.strip_prefix(',') {
            Some(next) => rest = next,
            None => return cells,
        }
    }
}

/// Parse a comma-only CSV payload into header and rows
pub fn parse_payload(text: &str) -> (Vec<String>, Vec<Vec<String>>) {
    let mut lines = text.split('\n');
    let header = lines.next().map(split_line).unwrap_or_default();
    let rows = lines.map(split_line).collect();
    (header, rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_plain_and_quoted() {
        assert_eq!(split_line("a,b,c"), vec!["a", "b", "c"]);
        assert_eq!(split_line("\"a, b\",c"), vec!["a, b", "c"]);
        assert_eq!(split_line("x,\"y, z\""), vec!["x", "y, z"]);
        assert_eq!(split_line("a,,b"), vec!["a", "", "b"]);
        assert_eq!(split_line(""), vec![""]);
    }

    #[test]
    fn parse_header_and_rows() {
        let (header, rows) = parse_payload("k,v\n1,\"2, 3\"");
        assert_eq!(header, vec!["k", "v"]);
        assert_eq!(rows, vec![vec!["1", "2, 3"]]);
    }
}

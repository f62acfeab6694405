//! Delimited-text encoding
//!
//! Two escaping rules are available:
//! - [`EscapePolicy::CommaOnly`]: a cell is wrapped in double quotes if and
//!   only if it contains a comma. Embedded quotes and newlines are written
//!   as-is. This is the byte-exact format downstream consumers already read.
//! - [`EscapePolicy::Rfc4180`]: full quoting via the `csv` writer (embedded
//!   quotes doubled, cells with quotes or line breaks wrapped).
//!
//! In comma-only mode the header line is the plain comma-join of the field
//! names, never quoted. In both cases lines are joined with `\n` and there is
//! no trailing newline.

use std::borrow::Cow;

use serde::Deserialize;

use crate::error::{ExportError, ExportResult};
use crate::schema::RecordSet;

/// Field separator
pub const DELIMITER: char = ',';

/// Line separator
pub const LINE_SEPARATOR: char = '\n';

/// Cell escaping rule
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EscapePolicy {
    /// Quote only cells containing a comma
    #[default]
    CommaOnly,
    /// RFC 4180 quoting
    Rfc4180,
}

/// Encode a record set as delimited text
///
/// Deterministic: identical input always yields identical output.
///
/// # Errors
/// Returns `Encoding` if the RFC 4180 writer fails
pub fn encode(set: &RecordSet<'_>, policy: EscapePolicy) -> ExportResult<String> {
    let text = match policy {
        EscapePolicy::CommaOnly => encode_comma_only(set),
        EscapePolicy::Rfc4180 => encode_rfc4180(set)?,
    };
    tracing::debug!(
        "Encoded {} rows x {} columns ({:?}, {} bytes)",
        set.len(),
        set.schema().len(),
        policy,
        text.len()
    );
    Ok(text)
}

/// Wrap a cell in quotes iff it contains the delimiter
#[inline]
#[must_use]
pub fn escape_comma_only(cell: &str) -> Cow<'_, str> {
    if cell.contains(DELIMITER) {
        Cow::Owned(format!("\"{cell}\""))
    } else {
        Cow::Borrowed(cell)
    }
}

fn join_line<'c>(cells: impl Iterator<Item = Cow<'c, str>>) -> String {
    let mut line = String::new();
    for (i, cell) in cells.enumerate() {
        if i > 0 {
            line.push(DELIMITER);
        }
        line.push_str(&cell);
    }
    line
}

fn encode_comma_only(set: &RecordSet<'_>) -> String {
    let mut lines = Vec::with_capacity(set.len() + 1);
    lines.push(join_line(
        set.schema().fields().iter().map(|f| Cow::Borrowed(f.as_str())),
    ));
    for row in set.rows() {
        lines.push(join_line(row.iter().map(|cell| escape_comma_only(cell))));
    }
    lines.join(&LINE_SEPARATOR.to_string())
}

fn encode_rfc4180(set: &RecordSet<'_>) -> ExportResult<String> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b',')
        .terminator(csv::Terminator::Any(b'\n'))
        .quote_style(csv::QuoteStyle::Necessary)
        .from_writer(Vec::new());

    writer
        .write_record(set.schema().fields())
        .map_err(|e| ExportError::Encoding(e.to_string()))?;
    for row in set.rows() {
        writer
            .write_record(&row)
            .map_err(|e| ExportError::Encoding(e.to_string()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Encoding(e.to_string()))?;
    let mut text = String::from_utf8(bytes).map_err(|e| ExportError::Encoding(e.to_string()))?;
    if text.ends_with(LINE_SEPARATOR) {
        text.pop();
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Record;
    use crate::schema::SchemaPolicy;
    use pretty_assertions::assert_eq;

    fn encode_with(records: &[Record], policy: EscapePolicy) -> String {
        let set = RecordSet::new(records, SchemaPolicy::Reject).unwrap();
        encode(&set, policy).unwrap()
    }

    #[test]
    fn comma_cells_are_quoted() {
        assert_eq!(escape_comma_only("Alpha, Beta"), "\"Alpha, Beta\"");
        assert_eq!(escape_comma_only("Alpha Beta"), "Alpha Beta");
    }

    #[test]
    fn quotes_and_newlines_pass_through_in_comma_only() {
        assert_eq!(escape_comma_only("12\" shelf"), "12\" shelf");
        assert_eq!(escape_comma_only("line\nbreak"), "line\nbreak");
    }

    #[test]
    fn header_then_rows_without_trailing_newline() {
        let records = vec![
            Record::new().with("store", "Store A").with("zones", 12),
            Record::new().with("store", "Store B").with("zones", 9),
        ];
        assert_eq!(
            encode_with(&records, EscapePolicy::CommaOnly),
            "store,zones\nStore A,12\nStore B,9"
        );
    }

    #[test]
    fn single_record_has_two_lines() {
        let records = vec![Record::new().with("zone", "Zone 1")];
        assert_eq!(encode_with(&records, EscapePolicy::CommaOnly), "zone\nZone 1");
    }

    #[test]
    fn mixed_scalars_stringify() {
        let records = vec![Record::new()
            .with("isCurrent", true)
            .with("linearMeters", 4.0)
            .with("createdBy", "User 1 (Jan 3, 2024)")];
        assert_eq!(
            encode_with(&records, EscapePolicy::CommaOnly),
            "isCurrent,linearMeters,createdBy\ntrue,4,\"User 1 (Jan 3, 2024)\""
        );
    }

    #[test]
    fn comma_only_header_is_not_quoted() {
        let records = vec![Record::new().with("Store, Name", "A").with("zone", "Z1")];
        let text = encode_with(&records, EscapePolicy::CommaOnly);
        assert_eq!(text.split('\n').next().unwrap(), ["Store, Name", "zone"].join(","));
        assert_eq!(text, "Store, Name,zone\nA,Z1");
    }

    #[test]
    fn rfc4180_doubles_quotes_and_wraps_newlines() {
        let records = vec![Record::new()
            .with("name", "12\" shelf")
            .with("note", "two\nlines")
            .with("plain", "ok")];
        assert_eq!(
            encode_with(&records, EscapePolicy::Rfc4180),
            "name,note,plain\n\"12\"\" shelf\",\"two\nlines\",ok"
        );
    }

    #[test]
    fn policies_agree_on_ordinary_data() {
        let records = vec![
            Record::new().with("store", "Store C").with("risk", "Low, monitor"),
            Record::new().with("store", "Store D").with("risk", "High"),
        ];
        assert_eq!(
            encode_with(&records, EscapePolicy::CommaOnly),
            encode_with(&records, EscapePolicy::Rfc4180)
        );
    }
}

//! Output format selection

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::Deserialize;

use crate::error::ExportError;

/// MIME type advertised to the host for every payload this crate produces
pub const CSV_MIME_TYPE: &str = "text/csv;charset=utf-8;";

/// Requested output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    /// Comma-separated text, `.csv`
    Csv,
    /// Spreadsheet, `.xlsx`
    Excel,
}

impl ExportFormat {
    /// All formats, in menu order
    pub const ALL: [Self; 2] = [Self::Csv, Self::Excel];

    /// File extension without the dot
    #[inline]
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Excel => "xlsx",
        }
    }

    /// Discriminator as accepted by [`FromStr`]
    #[inline]
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Excel => "excel",
        }
    }

    /// Append this format's extension to a base filename
    #[must_use]
    pub fn filename(self, base: &str) -> String {
        format!("{base}.{}", self.extension())
    }
}

impl Display for ExportFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "csv" => Ok(Self::Csv),
            "excel" => Ok(Self::Excel),
            _ => Err(ExportError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// How the Excel format is produced
///
/// No spreadsheet container is generated yet. `CsvPlaceholder` writes the CSV
/// payload under an `.xlsx` name; `Reject` refuses Excel requests instead.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExcelMode {
    /// CSV bytes, `.xlsx` filename
    #[default]
    CsvPlaceholder,
    /// Excel requests fail with `UnsupportedFormat`
    Reject,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_formats() {
        assert_eq!("csv".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert_eq!("excel".parse::<ExportFormat>().unwrap(), ExportFormat::Excel);
    }

    #[test]
    fn discriminator_must_match_exactly() {
        for raw in ["CSV", "Excel", " excel ", "csv\n", "xlsx"] {
            let err = raw.parse::<ExportFormat>().unwrap_err();
            assert!(matches!(err, ExportError::UnsupportedFormat(ref s) if s == raw));
        }
    }

    #[test]
    fn unknown_format_is_an_error() {
        let err = "pdf".parse::<ExportFormat>().unwrap_err();
        assert!(matches!(err, ExportError::UnsupportedFormat(ref s) if s == "pdf"));
        assert!("".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn filenames_get_extension() {
        assert_eq!(
            ExportFormat::Csv.filename("Report_2023-01-01"),
            "Report_2023-01-01.csv"
        );
        assert_eq!(
            ExportFormat::Excel.filename("Report_2023-01-01"),
            "Report_2023-01-01.xlsx"
        );
    }

    #[test]
    fn name_round_trips_through_parse() {
        for format in ExportFormat::ALL {
            assert_eq!(format.name().parse::<ExportFormat>().unwrap(), format);
        }
    }
}

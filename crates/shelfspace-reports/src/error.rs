//! Error types for the report catalogue

use chrono::NaiveDate;
use shelfspace_export::RecordError;

/// Report lookup errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReportError {
    /// No report with this name
    #[error("unknown report: '{0}'")]
    UnknownReport(String),
}

/// Invalid filter combinations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FilterError {
    /// Range ends before it starts
    #[error("date range is reversed: {from} > {to}")]
    ReversedRange { from: NaiveDate, to: NaiveDate },

    /// Report takes a single date, a range was given (or vice versa)
    #[error("{report} does not accept a {given}")]
    WrongDateScope {
        report: &'static str,
        given: &'static str,
    },
}

/// Data provider errors
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// Filters rejected before fetching
    #[error("invalid filters: {0}")]
    Filter(#[from] FilterError),

    /// Row could not be turned into a record
    #[error("record conversion failed: {0}")]
    Record(#[from] RecordError),

    /// Backend-specific failure
    #[error("source unavailable: {0}")]
    Unavailable(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_report_display() {
        let err = ReportError::UnknownReport("sales".to_string());
        assert_eq!(err.to_string(), "unknown report: 'sales'");
    }

    #[test]
    fn filter_error_converts() {
        let from = NaiveDate::from_ymd_opt(2023, 5, 2).unwrap();
        let to = NaiveDate::from_ymd_opt(2023, 5, 1).unwrap();
        let err: SourceError = FilterError::ReversedRange { from, to }.into();
        assert_eq!(
            err.to_string(),
            "invalid filters: date range is reversed: 2023-05-02 > 2023-05-01"
        );
    }
}

//! Error types for the export layer
//!
//! Every failure is local and synchronous: it is detected inside the export
//! call and returned to the caller. Nothing is retried or deferred.

use std::path::PathBuf;

/// Errors from a host save mechanism
#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    /// Host cannot accept files at all (missing directory, no file access)
    #[error("save target unavailable: {0}")]
    Unavailable(String),

    /// Host refused this particular artifact
    #[error("save rejected: {0}")]
    Rejected(String),

    /// IO error while writing
    #[error("io error writing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SaveError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Main export error type
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// Zero records: no header can be derived
    #[error("cannot export an empty record set")]
    EmptyRecordSet,

    /// A record's field set differs from the header
    #[error("record {row} does not match the header: missing {missing:?}, unexpected {unexpected:?}")]
    InconsistentSchema {
        /// Zero-based index of the offending record
        row: usize,
        /// Header fields absent from the record
        missing: Vec<String>,
        /// Record fields absent from the header
        unexpected: Vec<String>,
    },

    /// Format discriminator not recognized, or refused by configuration
    #[error("unsupported export format: '{0}'")]
    UnsupportedFormat(String),

    /// Base filename empty or containing path separators
    #[error("invalid base filename: '{0}'")]
    InvalidFilename(String),

    /// Host save mechanism failed
    #[error("failed to save {filename}: {source}")]
    HostSaveFailure {
        filename: String,
        #[source]
        source: SaveError,
    },

    /// Encoder failure
    #[error("encoding failed: {0}")]
    Encoding(String),
}

/// Fieldless discriminant of [`ExportError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    EmptyRecordSet,
    InconsistentSchema,
    UnsupportedFormat,
    InvalidFilename,
    HostSaveFailure,
    Encoding,
}

impl ExportError {
    /// Kind of failure, for callers that present errors
    #[inline]
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyRecordSet => ErrorKind::EmptyRecordSet,
            Self::InconsistentSchema { .. } => ErrorKind::InconsistentSchema,
            Self::UnsupportedFormat(_) => ErrorKind::UnsupportedFormat,
            Self::InvalidFilename(_) => ErrorKind::InvalidFilename,
            Self::HostSaveFailure { .. } => ErrorKind::HostSaveFailure,
            Self::Encoding(_) => ErrorKind::Encoding,
        }
    }

    /// Whether the host save mechanism was reached
    ///
    /// All other kinds are raised before any save is attempted.
    #[inline]
    #[must_use]
    pub fn reached_host(&self) -> bool {
        matches!(self, Self::HostSaveFailure { .. })
    }

    /// Create host save failure for filename
    pub fn host_save_failure(filename: impl Into<String>, source: SaveError) -> Self {
        Self::HostSaveFailure {
            filename: filename.into(),
            source,
        }
    }
}

/// Result type alias for export operations
pub type ExportResult<T> = Result<T, ExportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_record_set_display() {
        assert_eq!(
            ExportError::EmptyRecordSet.to_string(),
            "cannot export an empty record set"
        );
    }

    #[test]
    fn unsupported_format_display() {
        let err = ExportError::UnsupportedFormat("pdf".to_string());
        assert_eq!(err.to_string(), "unsupported export format: 'pdf'");
        assert_eq!(err.kind(), ErrorKind::UnsupportedFormat);
    }

    #[test]
    fn host_failure_keeps_source() {
        let err = ExportError::host_save_failure(
            "Report.csv",
            SaveError::Unavailable("no such directory".to_string()),
        );
        assert!(err.reached_host());
        assert!(err.to_string().contains("Report.csv"));
        let source = std::error::Error::source(&err).map(ToString::to_string);
        assert_eq!(
            source.as_deref(),
            Some("save target unavailable: no such directory")
        );
    }

    #[test]
    fn inconsistent_schema_display() {
        let err = ExportError::InconsistentSchema {
            row: 2,
            missing: vec!["zone".to_string()],
            unexpected: vec![],
        };
        assert!(err.to_string().starts_with("record 2 does not match"));
        assert!(!err.reached_host());
    }
}

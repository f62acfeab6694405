//! Shelfspace Export
//!
//! Serializes uniformly-shaped records to delimited text and hands the result
//! to a host save mechanism.
//!
//! # Core Concepts
//!
//! - [`Record`]: ordered field-name → [`Scalar`] map, one table row
//! - [`RecordSet`]: validated, non-empty slice of records sharing a [`Schema`]
//! - [`Artifact`]: rendered payload with MIME type and filename
//! - [`SaveTarget`]: host facility that persists artifacts
//! - [`TabularExporter`]: validates, encodes, names and saves
//!
//! # Example
//!
//! ```rust
//! use shelfspace_export::{MemoryTarget, Record, TabularExporter};
//!
//! let records = vec![
//!     Record::new().with("store", "Store A").with("zones", 12),
//!     Record::new().with("store", "Store B").with("zones", 9),
//! ];
//!
//! let target = MemoryTarget::new();
//! let exporter = TabularExporter::new(&target);
//! exporter.export_csv(&records, "MeasurementFrequencyReport_2023-06-01")?;
//!
//! let saved = target.saved();
//! assert_eq!(saved[0].filename(), "MeasurementFrequencyReport_2023-06-01.csv");
//! assert_eq!(saved[0].text(), Some("store,zones\nStore A,12\nStore B,9"));
//! # Ok::<(), shelfspace_export::ExportError>(())
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

// Core modules
mod artifact;
mod config;
mod encode;
mod error;
mod exporter;
mod format;
mod hash;
mod record;
mod schema;
mod target;
mod value;

// Re-exports
pub use artifact::Artifact;
pub use config::{ConfigError, ExportConfig};
pub use encode::{encode, escape_comma_only, EscapePolicy, DELIMITER, LINE_SEPARATOR};
pub use error::{ErrorKind, ExportError, ExportResult, SaveError};
pub use exporter::{validate_base_filename, ExportRequest, TabularExporter};
pub use format::{ExcelMode, ExportFormat, CSV_MIME_TYPE};
pub use hash::ContentHash;
pub use record::{Record, RecordError};
pub use schema::{RecordSet, Schema, SchemaPolicy};
pub use target::{DirectoryTarget, MemoryTarget, SaveReceipt, SaveTarget};
pub use value::Scalar;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

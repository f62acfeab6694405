//! Shelfspace Reports
//!
//! The space-planning dashboard's report pages as data: which columns each
//! report exports, which filters it takes, where its rows come from, and how
//! coverage and risk are banded.
//!
//! ```rust
//! use chrono::NaiveDate;
//! use shelfspace_export::{ExportFormat, MemoryTarget, TabularExporter};
//! use shelfspace_reports::{export_report, FixtureSource, ReportFilters, ReportKind};
//!
//! let today = NaiveDate::from_ymd_opt(2023, 6, 1).unwrap();
//! let target = MemoryTarget::new();
//! let exporter = TabularExporter::new(&target);
//!
//! export_report(
//!     &exporter,
//!     &FixtureSource::new(42, today),
//!     ReportKind::MeasurementFrequency,
//!     &ReportFilters::new(),
//!     ExportFormat::Excel,
//!     today,
//! )?;
//!
//! assert_eq!(target.saved()[0].filename(), "MeasurementFrequencyReport_2023-06-01.xlsx");
//! # Ok::<(), shelfspace_reports::ReportExportError>(())
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod band;
mod error;
mod export;
mod filters;
mod kind;
mod rows;
mod source;

pub use band::{CoverageBand, RiskLevel};
pub use error::{FilterError, ReportError, SourceError};
pub use export::{export_report, ReportExportError};
pub use filters::{DateRange, ReportFilters};
pub use kind::{DateScope, ReportKind};
pub use rows::{
    to_records, HistoricalRow, MeasurementFrequencyRow, PointInTimeRow, ReportRow, RiskRow,
};
pub use source::{risk_register, FixtureSource, ReportSource};

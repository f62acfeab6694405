//! Export button: fetch a report and hand it to the exporter

use chrono::NaiveDate;
use shelfspace_export::{ExportError, ExportFormat, SaveReceipt, SaveTarget, TabularExporter};
use tracing::info;

use crate::error::SourceError;
use crate::filters::ReportFilters;
use crate::kind::ReportKind;
use crate::source::ReportSource;

/// Failure of a report export
#[derive(Debug, thiserror::Error)]
pub enum ReportExportError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Export(#[from] ExportError),
}

/// Fetch `kind` from `source` and export it under `<prefix>_<date>`
///
/// The filename date is the filters' snapshot date or range end, else
/// `today`. Records are checked against the report's declared schema.
///
/// # Errors
/// Source failures, or any [`ExportError`]
pub fn export_report<S, R>(
    exporter: &TabularExporter<S>,
    source: &R,
    kind: ReportKind,
    filters: &ReportFilters,
    format: ExportFormat,
    today: NaiveDate,
) -> Result<SaveReceipt, ReportExportError>
where
    S: SaveTarget,
    R: ReportSource + ?Sized,
{
    let records = source.fetch(kind, filters)?;
    let base = kind.base_filename(filters.report_date().unwrap_or(today));
    info!("Exporting {} ({} rows) as {}", kind.title(), records.len(), format);
    let receipt = exporter.export_with_schema(format, kind.schema(), &records, &base)?;
    Ok(receipt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::FixtureSource;
    use shelfspace_export::{ErrorKind, MemoryTarget};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 6, 1).unwrap()
    }

    #[test]
    fn exports_risk_report() {
        let target = MemoryTarget::new();
        let exporter = TabularExporter::new(&target);
        let source = FixtureSource::new(0, today());

        export_report(
            &exporter,
            &source,
            ReportKind::Risk,
            &ReportFilters::new(),
            ExportFormat::Csv,
            today(),
        )
        .unwrap();

        let saved = target.take();
        assert_eq!(saved[0].filename(), "RiskReport_2023-06-01.csv");
        let text = saved[0].text().unwrap();
        assert!(text.starts_with("storeName,zone,lastMeasured,"));
        assert_eq!(text.lines().count(), 7);
    }

    #[test]
    fn empty_selection_is_an_export_error() {
        let target = MemoryTarget::new();
        let exporter = TabularExporter::new(&target);
        let source = FixtureSource::new(0, today());
        let filters = ReportFilters::new().with_store("store-z");

        let err = export_report(
            &exporter,
            &source,
            ReportKind::Risk,
            &filters,
            ExportFormat::Csv,
            today(),
        )
        .unwrap_err();

        match err {
            ReportExportError::Export(e) => assert_eq!(e.kind(), ErrorKind::EmptyRecordSet),
            other => panic!("unexpected error: {other}"),
        }
        assert!(target.is_empty());
    }
}

//! The tabular exporter
//!
//! Turns a slice of records into an [`Artifact`] and hands it to a
//! [`SaveTarget`]. All validation happens before the target is touched, so
//! only `HostSaveFailure` can follow a save attempt.

use crate::artifact::Artifact;
use crate::config::ExportConfig;
use crate::encode::encode;
use crate::error::{ExportError, ExportResult};
use crate::format::{ExcelMode, ExportFormat, CSV_MIME_TYPE};
use crate::record::Record;
use crate::schema::{RecordSet, Schema};
use crate::target::{SaveReceipt, SaveTarget};

/// One export call's inputs
#[derive(Debug, Clone)]
pub struct ExportRequest<'a> {
    /// Rows to export, all sharing one schema
    pub records: &'a [Record],
    /// Filename without extension
    pub base_filename: String,
    /// Output format
    pub format: ExportFormat,
}

impl<'a> ExportRequest<'a> {
    /// Create a request
    #[must_use]
    pub fn new(
        records: &'a [Record],
        base_filename: impl Into<String>,
        format: ExportFormat,
    ) -> Self {
        Self {
            records,
            base_filename: base_filename.into(),
            format,
        }
    }
}

/// Serializes record sets and saves them through a host target
///
/// Holds no per-call state: concurrent calls are independent as long as the
/// target itself tolerates concurrent saves.
#[derive(Debug)]
pub struct TabularExporter<S> {
    config: ExportConfig,
    target: S,
}

impl<S: SaveTarget> TabularExporter<S> {
    /// Create an exporter with default configuration
    #[inline]
    #[must_use]
    pub fn new(target: S) -> Self {
        Self::with_config(ExportConfig::default(), target)
    }

    /// Create an exporter with explicit configuration
    #[inline]
    #[must_use]
    pub fn with_config(config: ExportConfig, target: S) -> Self {
        Self { config, target }
    }

    /// Active configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// The save target
    #[inline]
    #[must_use]
    pub fn target(&self) -> &S {
        &self.target
    }

    /// Export as CSV to `<base>.csv`
    ///
    /// # Errors
    /// See [`ExportError`]; nothing is saved unless the error is `HostSaveFailure`
    pub fn export_csv(&self, records: &[Record], base: &str) -> ExportResult<SaveReceipt> {
        self.export_format(ExportFormat::Csv, records, base)
    }

    /// Export as Excel to `<base>.xlsx`
    ///
    /// # Errors
    /// See [`ExportError`]; nothing is saved unless the error is `HostSaveFailure`
    pub fn export_excel(&self, records: &[Record], base: &str) -> ExportResult<SaveReceipt> {
        self.export_format(ExportFormat::Excel, records, base)
    }

    /// Export a request, routing on its format
    ///
    /// # Errors
    /// See [`ExportError`]; nothing is saved unless the error is `HostSaveFailure`
    pub fn export(&self, request: &ExportRequest<'_>) -> ExportResult<SaveReceipt> {
        self.export_format(request.format, request.records, &request.base_filename)
    }

    /// Export with a textual format discriminator (`"csv"` or `"excel"`)
    ///
    /// # Errors
    /// `UnsupportedFormat` for any other discriminator, otherwise as [`Self::export`]
    pub fn export_named(
        &self,
        format: &str,
        records: &[Record],
        base: &str,
    ) -> ExportResult<SaveReceipt> {
        let format: ExportFormat = format.parse()?;
        self.export_format(format, records, base)
    }

    /// Export against a declared schema instead of the first record's fields
    ///
    /// # Errors
    /// See [`ExportError`]; nothing is saved unless the error is `HostSaveFailure`
    pub fn export_with_schema(
        &self,
        format: ExportFormat,
        schema: Schema,
        records: &[Record],
        base: &str,
    ) -> ExportResult<SaveReceipt> {
        let set = RecordSet::with_schema(schema, records, self.config.schema_policy)?;
        let artifact = self.render_set(format, &set, base)?;
        self.save(&artifact)
    }

    /// Render without saving
    ///
    /// # Errors
    /// Any [`ExportError`] except `HostSaveFailure`
    pub fn render(
        &self,
        format: ExportFormat,
        records: &[Record],
        base: &str,
    ) -> ExportResult<Artifact> {
        let set = RecordSet::new(records, self.config.schema_policy)?;
        self.render_set(format, &set, base)
    }

    fn export_format(
        &self,
        format: ExportFormat,
        records: &[Record],
        base: &str,
    ) -> ExportResult<SaveReceipt> {
        let artifact = self.render(format, records, base)?;
        self.save(&artifact)
    }

    fn render_set(
        &self,
        format: ExportFormat,
        set: &RecordSet<'_>,
        base: &str,
    ) -> ExportResult<Artifact> {
        validate_base_filename(base)?;
        if format == ExportFormat::Excel {
            match self.config.excel {
                ExcelMode::Reject => {
                    return Err(ExportError::UnsupportedFormat(format.name().to_string()))
                }
                ExcelMode::CsvPlaceholder => {
                    tracing::warn!("Excel export of {} writes CSV content under .xlsx", base);
                }
            }
        }

        let text = encode(set, self.config.escape)?;
        Ok(Artifact::from_text(format.filename(base), CSV_MIME_TYPE, text))
    }

    fn save(&self, artifact: &Artifact) -> ExportResult<SaveReceipt> {
        match self.target.save(artifact) {
            Ok(receipt) => {
                tracing::info!(
                    "Exported {} ({} bytes, digest {}) to {}",
                    artifact.filename(),
                    receipt.bytes,
                    artifact.digest().short(),
                    receipt.location
                );
                Ok(receipt)
            }
            Err(e) => {
                tracing::warn!("Save of {} failed: {}", artifact.filename(), e);
                Err(ExportError::host_save_failure(artifact.filename(), e))
            }
        }
    }
}

/// Check a caller-supplied base filename
///
/// # Errors
/// `InvalidFilename` if empty, blank, `.`/`..`, or containing a path separator or NUL
pub fn validate_base_filename(base: &str) -> ExportResult<()> {
    let bad = base.trim().is_empty()
        || base == "."
        || base == ".."
        || base.contains(['/', '\\', '\0']);
    if bad {
        Err(ExportError::InvalidFilename(base.to_string()))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::EscapePolicy;
    use crate::error::{ErrorKind, SaveError};
    use crate::schema::SchemaPolicy;
    use crate::target::{MemoryTarget, MockSaveTarget};
    use pretty_assertions::assert_eq;

    fn records() -> Vec<Record> {
        vec![
            Record::new()
                .with("storeName", "Store A")
                .with("zone", "Zone 3")
                .with("riskReason", "Not measured, 45 days"),
            Record::new()
                .with("storeName", "Store B")
                .with("zone", "Zone 1")
                .with("riskReason", "Inconsistent pattern"),
        ]
    }

    fn never_saves() -> MockSaveTarget {
        let mut target = MockSaveTarget::new();
        target.expect_save().never();
        target
    }

    #[test]
    fn csv_export_saves_expected_artifact() {
        let target = MemoryTarget::new();
        let exporter = TabularExporter::new(&target);
        let receipt = exporter.export_csv(&records(), "RiskReport_2023-06-01").unwrap();

        let saved = target.saved();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].filename(), "RiskReport_2023-06-01.csv");
        assert_eq!(saved[0].mime_type(), "text/csv;charset=utf-8;");
        assert_eq!(
            saved[0].text().unwrap(),
            "storeName,zone,riskReason\n\
             Store A,Zone 3,\"Not measured, 45 days\"\n\
             Store B,Zone 1,Inconsistent pattern"
        );
        assert_eq!(receipt.digest, *saved[0].digest());
    }

    #[test]
    fn excel_placeholder_matches_csv_bytes() {
        let target = MemoryTarget::new();
        let exporter = TabularExporter::new(&target);
        exporter.export_csv(&records(), "Report").unwrap();
        exporter.export_excel(&records(), "Report").unwrap();

        let saved = target.saved();
        assert_eq!(saved[1].filename(), "Report.xlsx");
        assert_eq!(saved[0].payload(), saved[1].payload());
    }

    #[test]
    fn excel_reject_mode_saves_nothing() {
        let config = ExportConfig::new().with_excel(ExcelMode::Reject);
        let exporter = TabularExporter::with_config(config, never_saves());
        let err = exporter.export_excel(&records(), "Report").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedFormat);
    }

    #[test]
    fn empty_records_never_reach_target() {
        let exporter = TabularExporter::new(never_saves());
        let err = exporter.export_csv(&[], "Report").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EmptyRecordSet);
    }

    #[test]
    fn unknown_format_never_reaches_target() {
        let exporter = TabularExporter::new(never_saves());
        let err = exporter.export_named("pdf", &records(), "Report").unwrap_err();
        assert!(matches!(err, ExportError::UnsupportedFormat(ref f) if f == "pdf"));
    }

    #[test]
    fn inconsistent_schema_never_reaches_target() {
        let mut rows = records();
        rows.push(Record::new().with("storeName", "Store C"));
        let exporter = TabularExporter::new(never_saves());
        let err = exporter.export_csv(&rows, "Report").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InconsistentSchema);
    }

    #[test]
    fn invalid_filenames_never_reach_target() {
        let exporter = TabularExporter::new(never_saves());
        for base in ["", "  ", "..", "../escape", "dir/file", "a\\b", "nul\0"] {
            let err = exporter.export_csv(&records(), base).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidFilename, "base {base:?}");
        }
    }

    #[test]
    fn host_failure_is_surfaced() {
        let mut target = MockSaveTarget::new();
        target
            .expect_save()
            .times(1)
            .returning(|_| Err(SaveError::Unavailable("no document".to_string())));
        let exporter = TabularExporter::new(target);

        let err = exporter.export_csv(&records(), "Report").unwrap_err();
        assert!(err.reached_host());
        assert!(matches!(
            err,
            ExportError::HostSaveFailure { ref filename, .. } if filename == "Report.csv"
        ));
    }

    #[test]
    fn request_dispatch_routes_by_format() {
        let mut target = MockSaveTarget::new();
        target
            .expect_save()
            .withf(|a: &Artifact| a.filename() == "Report_2023-01-01.xlsx")
            .times(1)
            .returning(|a| Ok(SaveReceipt::for_artifact(a, "mock")));
        let exporter = TabularExporter::new(target);

        let rows = records();
        let request = ExportRequest::new(&rows, "Report_2023-01-01", ExportFormat::Excel);
        let receipt = exporter.export(&request).unwrap();
        assert_eq!(receipt.location, "mock");
    }

    #[test]
    fn render_is_idempotent() {
        let exporter = TabularExporter::new(MemoryTarget::new());
        let a = exporter.render(ExportFormat::Csv, &records(), "Report").unwrap();
        let b = exporter.render(ExportFormat::Csv, &records(), "Report").unwrap();
        assert_eq!(a, b);
        assert!(exporter.target().is_empty());
    }

    #[test]
    fn declared_schema_orders_columns() {
        let target = MemoryTarget::new();
        let exporter = TabularExporter::with_config(
            ExportConfig::new().with_schema_policy(SchemaPolicy::PadMissing),
            &target,
        );
        let schema = Schema::new(["zone", "storeName", "riskReason", "recommendedAction"]);
        exporter
            .export_with_schema(ExportFormat::Csv, schema, &records()[..1], "Report")
            .unwrap();
        assert_eq!(
            target.saved()[0].text().unwrap(),
            "zone,storeName,riskReason,recommendedAction\n\
             Zone 3,Store A,\"Not measured, 45 days\","
        );
    }

    #[test]
    fn rfc4180_config_is_applied() {
        let target = MemoryTarget::new();
        let exporter =
            TabularExporter::with_config(ExportConfig::new().with_escape(EscapePolicy::Rfc4180), &target);
        let rows = vec![Record::new().with("name", "12\" bay")];
        exporter.export_csv(&rows, "Report").unwrap();
        assert_eq!(target.saved()[0].text().unwrap(), "name\n\"12\"\" bay\"");
    }
}

//! Typed report rows
//!
//! Field order and serde names match [`ReportKind::fields`], so a row
//! serializes straight into a [`Record`] with the export column order.

use serde::Serialize;
use shelfspace_export::{Record, RecordError};

use crate::band::{CoverageBand, RiskLevel};
use crate::kind::ReportKind;

/// A row of one report
pub trait ReportRow: Serialize {
    /// Report this row belongs to
    const KIND: ReportKind;

    /// Convert into an export record
    ///
    /// # Errors
    /// `RecordError` if a field does not serialize to a scalar
    fn to_record(&self) -> Result<Record, RecordError> {
        Record::from_serialize(self)
    }
}

/// Convert a batch of rows
///
/// Records come out in `R::KIND`'s column order.
///
/// # Errors
/// The first conversion failure
pub fn to_records<R: ReportRow>(rows: &[R]) -> Result<Vec<Record>, RecordError> {
    let records: Vec<Record> = rows.iter().map(ReportRow::to_record).collect::<Result<_, _>>()?;
    if let Some(first) = records.first() {
        debug_assert!(
            first.field_names().eq(R::KIND.fields().iter().copied()),
            "{} row fields out of column order",
            R::KIND
        );
    }
    Ok(records)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PointInTimeRow {
    pub fixture_barcode: String,
    pub fixture_key: String,
    pub fixture_count: u32,
    pub item: String,
    pub group: String,
    pub department: String,
    #[serde(rename = "class")]
    pub class_name: String,
    pub subclass: String,
    pub brand: String,
    pub color: String,
    pub shade: String,
    pub style: String,
    pub vpn: String,
    pub linear_meters: f64,
    pub zone: String,
    pub name: String,
    pub component_length: f64,
    pub component_height: f64,
    pub fixture_linear_meter: f64,
    pub created_by: String,
}

impl ReportRow for PointInTimeRow {
    const KIND: ReportKind = ReportKind::PointInTime;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalRow {
    pub fixture_barcode: String,
    pub fixture_key: String,
    pub zone: String,
    pub store: String,
    pub is_current: bool,
    pub last_measured: String,
    pub created_by: String,
    pub linear_meters: f64,
    pub department: String,
    pub brand: String,
}

impl ReportRow for HistoricalRow {
    const KIND: ReportKind = ReportKind::Historical;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeasurementFrequencyRow {
    pub store_name: String,
    pub total_zones: u32,
    pub total_fixture_keys: u32,
    pub zones_measured_last15_days: u32,
    pub percentage_fixtures_measured_last30_days: f64,
    pub percentage_zones_measured_last30_days: f64,
    pub average_refresh_in_month: f64,
}

impl MeasurementFrequencyRow {
    /// Band of the share of fixtures measured in the last 30 days
    #[must_use]
    pub fn fixture_coverage(&self) -> CoverageBand {
        CoverageBand::from_percentage(self.percentage_fixtures_measured_last30_days)
    }

    /// Band of the share of zones measured in the last 30 days
    #[must_use]
    pub fn zone_coverage(&self) -> CoverageBand {
        CoverageBand::from_percentage(self.percentage_zones_measured_last30_days)
    }
}

impl ReportRow for MeasurementFrequencyRow {
    const KIND: ReportKind = ReportKind::MeasurementFrequency;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskRow {
    pub store_name: String,
    pub zone: String,
    pub last_measured: String,
    pub days_since_last_measurement: u32,
    pub risk_level: RiskLevel,
    pub risk_reason: String,
    pub recommended_action: String,
}

impl ReportRow for RiskRow {
    const KIND: ReportKind = ReportKind::Risk;
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn names(record: &Record) -> Vec<&str> {
        record.field_names().collect()
    }

    fn point_in_time() -> PointInTimeRow {
        PointInTimeRow {
            fixture_barcode: "FB1000".into(),
            fixture_key: "FK2000".into(),
            fixture_count: 3,
            item: "Item 0".into(),
            group: "Group 1".into(),
            department: "Dept 1".into(),
            class_name: "Class 1".into(),
            subclass: "Subclass 1".into(),
            brand: "Brand 1".into(),
            color: "Red".into(),
            shade: "Light".into(),
            style: "Style 0".into(),
            vpn: "VPN10000".into(),
            linear_meters: 2.5,
            zone: "Zone 1".into(),
            name: "Fixture Name 0".into(),
            component_length: 1.25,
            component_height: 2.0,
            fixture_linear_meter: 7.5,
            created_by: "User 0 (2023-05-01)".into(),
        }
    }

    #[test]
    fn point_in_time_field_order() {
        let record = point_in_time().to_record().unwrap();
        assert_eq!(names(&record), ReportKind::PointInTime.fields());
        assert_eq!(record.get("class").unwrap().to_cell(), "Class 1");
    }

    #[test]
    fn historical_field_order() {
        let row = HistoricalRow {
            fixture_barcode: "FB1000".into(),
            fixture_key: "FK2000".into(),
            zone: "Zone 1".into(),
            store: "Store A".into(),
            is_current: true,
            last_measured: "2023-05-01".into(),
            created_by: "User 0 (2023-04-01)".into(),
            linear_meters: 3.0,
            department: "Dept 1".into(),
            brand: "Brand 1".into(),
        };
        let record = row.to_record().unwrap();
        assert_eq!(names(&record), ReportKind::Historical.fields());
        assert_eq!(record.get("isCurrent").unwrap().to_cell(), "true");
    }

    #[test]
    fn frequency_field_order() {
        let row = MeasurementFrequencyRow {
            store_name: "Store A".into(),
            total_zones: 12,
            total_fixture_keys: 80,
            zones_measured_last15_days: 7,
            percentage_fixtures_measured_last30_days: 64.5,
            percentage_zones_measured_last30_days: 81.0,
            average_refresh_in_month: 2.5,
        };
        let record = row.to_record().unwrap();
        assert_eq!(names(&record), ReportKind::MeasurementFrequency.fields());
        assert_eq!(row.fixture_coverage(), CoverageBand::Fair);
        assert_eq!(row.zone_coverage(), CoverageBand::Good);
    }

    #[test]
    fn risk_level_serializes_as_text() {
        let row = RiskRow {
            store_name: "Store A".into(),
            zone: "Zone 3".into(),
            last_measured: "2023-04-15".into(),
            days_since_last_measurement: 45,
            risk_level: RiskLevel::High,
            risk_reason: "Not measured in over 45 days".into(),
            recommended_action: "Schedule immediate measurement".into(),
        };
        let record = row.to_record().unwrap();
        assert_eq!(names(&record), ReportKind::Risk.fields());
        assert_eq!(record.get("riskLevel").unwrap().to_cell(), "High");
    }

    #[test]
    fn batch_conversion() {
        let records = to_records(&[point_in_time(), point_in_time()]).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0], records[1]);
    }

    #[derive(Serialize)]
    struct Misordered {
        zone: String,
        store_name: String,
    }

    impl ReportRow for Misordered {
        const KIND: ReportKind = ReportKind::Risk;
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "out of column order")]
    fn rows_out_of_column_order_are_caught() {
        let row = Misordered {
            zone: "Zone 1".into(),
            store_name: "Store A".into(),
        };
        let _ = to_records(&[row]);
    }
}

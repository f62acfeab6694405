//! Report data providers
//!
//! [`ReportSource`] is the seam between the export path and wherever report
//! rows come from. [`FixtureSource`] generates deterministic sample data
//! shaped like the dashboard's measurement feeds.

use chrono::{Duration, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use shelfspace_export::Record;
use tracing::debug;

use crate::band::{CoverageBand, RiskLevel};
use crate::error::SourceError;
use crate::filters::ReportFilters;
use crate::kind::ReportKind;
use crate::rows::{
    to_records, HistoricalRow, MeasurementFrequencyRow, PointInTimeRow, RiskRow,
};

/// Provider of report rows
pub trait ReportSource {
    /// Fetch the rows of `kind` matching `filters`, in export column order
    ///
    /// # Errors
    /// `Filter` for filters the report does not accept, or a provider failure
    fn fetch(&self, kind: ReportKind, filters: &ReportFilters) -> Result<Vec<Record>, SourceError>;
}

impl<T: ReportSource + ?Sized> ReportSource for &T {
    fn fetch(&self, kind: ReportKind, filters: &ReportFilters) -> Result<Vec<Record>, SourceError> {
        (**self).fetch(kind, filters)
    }
}

const COLORS: [&str; 5] = ["Red", "Blue", "Green", "Yellow", "Black"];
const SHADES: [&str; 3] = ["Light", "Medium", "Dark"];

/// Seeded sample data
#[derive(Debug, Clone)]
pub struct FixtureSource {
    seed: u64,
    rows: Option<usize>,
    anchor: NaiveDate,
}

impl FixtureSource {
    /// Fixture rows for pages with a per-fixture layout
    pub const DEFAULT_FIXTURE_ROWS: usize = 20;
    /// Store rows for the measurement frequency page
    pub const DEFAULT_STORE_ROWS: usize = 10;

    /// Source dated relative to `anchor` when the filters pin no date
    #[must_use]
    pub fn new(seed: u64, anchor: NaiveDate) -> Self {
        Self {
            seed,
            rows: None,
            anchor,
        }
    }

    /// Override the number of generated rows
    #[must_use]
    pub fn with_rows(mut self, rows: usize) -> Self {
        self.rows = Some(rows);
        self
    }

    #[inline]
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    fn rng(&self, kind: ReportKind) -> StdRng {
        StdRng::seed_from_u64(self.seed.wrapping_add(kind as u64))
    }

    fn point_in_time(&self, date: NaiveDate) -> Vec<PointInTimeRow> {
        let mut rng = self.rng(ReportKind::PointInTime);
        (0..self.rows.unwrap_or(Self::DEFAULT_FIXTURE_ROWS))
            .map(|i| {
                let created = date - Duration::days(rng.random_range(0..7));
                PointInTimeRow {
                    fixture_barcode: format!("FB{}", 1000 + i),
                    fixture_key: format!("FK{}", 2000 + i),
                    fixture_count: rng.random_range(1..=10),
                    item: format!("Item {i}"),
                    group: format!("Group {}", i / 5 + 1),
                    department: format!("Dept {}", i / 10 + 1),
                    class_name: format!("Class {}", i / 7 + 1),
                    subclass: format!("Subclass {}", i / 3 + 1),
                    brand: format!("Brand {}", i / 4 + 1),
                    color: COLORS[i % COLORS.len()].to_string(),
                    shade: SHADES[i % SHADES.len()].to_string(),
                    style: format!("Style {}", i % 10),
                    vpn: format!("VPN{}", 10000 + i),
                    linear_meters: round_to(rng.random::<f64>() * 5.0 + 1.0, 2),
                    zone: format!("Zone {}", i / 4 + 1),
                    name: format!("Fixture Name {i}"),
                    component_length: round_to(rng.random::<f64>() * 2.0 + 0.5, 2),
                    component_height: round_to(rng.random::<f64>() * 3.0 + 1.0, 2),
                    fixture_linear_meter: round_to(rng.random::<f64>() * 10.0 + 2.0, 2),
                    created_by: format!("User {} ({})", i % 5, iso(created)),
                }
            })
            .collect()
    }

    fn historical(&self, end: NaiveDate) -> Vec<HistoricalRow> {
        let mut rng = self.rng(ReportKind::Historical);
        (0..self.rows.unwrap_or(Self::DEFAULT_FIXTURE_ROWS))
            .map(|i| {
                let measured = end - Duration::days(rng.random_range(0..30));
                let created = end - Duration::days(rng.random_range(30..90));
                HistoricalRow {
                    fixture_barcode: format!("FB{}", 1000 + i),
                    fixture_key: format!("FK{}", 2000 + i),
                    zone: format!("Zone {}", i / 4 + 1),
                    store: store_name(i % 4),
                    is_current: rng.random::<f64>() > 0.3,
                    last_measured: iso(measured),
                    created_by: format!("User {} ({})", i % 5, iso(created)),
                    linear_meters: round_to(rng.random::<f64>() * 5.0 + 1.0, 2),
                    department: format!("Dept {}", i / 10 + 1),
                    brand: format!("Brand {}", i / 4 + 1),
                }
            })
            .collect()
    }

    fn measurement_frequency(&self) -> Vec<MeasurementFrequencyRow> {
        let mut rng = self.rng(ReportKind::MeasurementFrequency);
        (0..self.rows.unwrap_or(Self::DEFAULT_STORE_ROWS))
            .map(|i| MeasurementFrequencyRow {
                store_name: store_name(i),
                total_zones: rng.random_range(10..30),
                total_fixture_keys: rng.random_range(50..150),
                zones_measured_last15_days: rng.random_range(5..20),
                percentage_fixtures_measured_last30_days: round_to(rng.random::<f64>() * 100.0, 1),
                percentage_zones_measured_last30_days: round_to(rng.random::<f64>() * 100.0, 1),
                average_refresh_in_month: round_to(rng.random::<f64>() * 5.0 + 1.0, 1),
            })
            .collect()
    }
}

impl ReportSource for FixtureSource {
    fn fetch(&self, kind: ReportKind, filters: &ReportFilters) -> Result<Vec<Record>, SourceError> {
        filters.validate_for(kind)?;
        if let Some(concept) = filters.concept_label() {
            debug!("No concept column in {}; ignoring filter {}", kind, concept);
        }
        let store = filters.store_label();
        let keep_store = |name: &str| store.as_deref().map_or(true, |s| s == name);

        let records = match kind {
            ReportKind::PointInTime => {
                if store.is_some() {
                    debug!("No store column in {}; ignoring store filter", kind);
                }
                let date = filters.date.unwrap_or(self.anchor);
                to_records(&self.point_in_time(date))?
            }
            ReportKind::Historical => {
                let end = filters.date_range.map_or(self.anchor, |r| r.to());
                let rows: Vec<_> = self
                    .historical(end)
                    .into_iter()
                    .filter(|row| keep_store(&row.store))
                    .filter(|row| {
                        filters.date_range.map_or(true, |r| {
                            NaiveDate::parse_from_str(&row.last_measured, "%Y-%m-%d")
                                .is_ok_and(|d| r.contains(d))
                        })
                    })
                    .collect();
                to_records(&rows)?
            }
            ReportKind::MeasurementFrequency => {
                let rows: Vec<_> = self
                    .measurement_frequency()
                    .into_iter()
                    .filter(|row| keep_store(&row.store_name))
                    .collect();
                let poor = rows
                    .iter()
                    .filter(|row| row.zone_coverage() == CoverageBand::Poor)
                    .count();
                debug!("{} of {} stores below zone coverage target", poor, rows.len());
                to_records(&rows)?
            }
            ReportKind::Risk => {
                let rows: Vec<_> = risk_register()
                    .into_iter()
                    .filter(|row| keep_store(&row.store_name))
                    .collect();
                to_records(&rows)?
            }
        };

        debug!("Fetched {} rows for {}", records.len(), kind);
        Ok(records)
    }
}

/// Zones currently flagged by the risk register
#[must_use]
pub fn risk_register() -> Vec<RiskRow> {
    const ENTRIES: [(&str, &str, &str, u32, &str, &str); 6] = [
        ("Store A", "Zone 3", "2023-04-15", 45, "Not measured in over 45 days", "Schedule immediate measurement"),
        ("Store B", "Zone 1", "2023-05-10", 20, "Inconsistent measurement pattern", "Review measurement schedule"),
        ("Store C", "Zone 2", "2023-05-25", 5, "Recent measurement but historical gaps", "Monitor for consistency"),
        ("Store A", "Zone 5", "2023-04-20", 40, "Not measured in over 40 days", "Schedule immediate measurement"),
        ("Store D", "Zone 4", "2023-05-05", 25, "Below average measurement frequency", "Include in next measurement cycle"),
        ("Store B", "Zone 3", "2023-05-20", 10, "Recent measurement but product category outliers", "Review product category assignments"),
    ];

    ENTRIES
        .iter()
        .map(|&(store, zone, last, days, reason, action)| RiskRow {
            store_name: store.to_string(),
            zone: zone.to_string(),
            last_measured: last.to_string(),
            days_since_last_measurement: days,
            risk_level: RiskLevel::from_days_since(days),
            risk_reason: reason.to_string(),
            recommended_action: action.to_string(),
        })
        .collect()
}

/// `Store A`, `Store B`, ... for index 0, 1, ...
fn store_name(index: usize) -> String {
    let letter = u8::try_from(index % 26).map_or('?', |n| char::from(b'A' + n));
    format!("Store {letter}")
}

fn iso(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn round_to(value: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    (value * scale).round() / scale
}

//! Report catalogue
//!
//! Each [`ReportKind`] fixes its column schema, the date filter it takes and
//! the filename prefix of its exports.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use chrono::NaiveDate;
use shelfspace_export::Schema;

use crate::error::ReportError;

/// Which date filter a report accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateScope {
    /// A single snapshot date
    Single,
    /// A from/to range
    Range,
    /// No date filter
    None,
}

/// The dashboard's reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportKind {
    /// Fixture measurements at one date
    PointInTime,
    /// Fixture measurement history over a range
    Historical,
    /// Per-store measurement coverage over a range
    MeasurementFrequency,
    /// Zones at risk of stale measurements
    Risk,
}

const POINT_IN_TIME_FIELDS: &[&str] = &[
    "fixtureBarcode",
    "fixtureKey",
    "fixtureCount",
    "item",
    "group",
    "department",
    "class",
    "subclass",
    "brand",
    "color",
    "shade",
    "style",
    "vpn",
    "linearMeters",
    "zone",
    "name",
    "componentLength",
    "componentHeight",
    "fixtureLinearMeter",
    "createdBy",
];

const HISTORICAL_FIELDS: &[&str] = &[
    "fixtureBarcode",
    "fixtureKey",
    "zone",
    "store",
    "isCurrent",
    "lastMeasured",
    "createdBy",
    "linearMeters",
    "department",
    "brand",
];

const MEASUREMENT_FREQUENCY_FIELDS: &[&str] = &[
    "storeName",
    "totalZones",
    "totalFixtureKeys",
    "zonesMeasuredLast15Days",
    "percentageFixturesMeasuredLast30Days",
    "percentageZonesMeasuredLast30Days",
    "averageRefreshInMonth",
];

const RISK_FIELDS: &[&str] = &[
    "storeName",
    "zone",
    "lastMeasured",
    "daysSinceLastMeasurement",
    "riskLevel",
    "riskReason",
    "recommendedAction",
];

impl ReportKind {
    /// All reports, in sidebar order
    pub const ALL: [Self; 4] = [
        Self::PointInTime,
        Self::Historical,
        Self::MeasurementFrequency,
        Self::Risk,
    ];

    /// Command-line name
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::PointInTime => "point-in-time",
            Self::Historical => "historical",
            Self::MeasurementFrequency => "measurement-frequency",
            Self::Risk => "risk",
        }
    }

    /// Human-readable title
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::PointInTime => "Point-in-Time Report",
            Self::Historical => "Historical Report",
            Self::MeasurementFrequency => "Measurement Frequency Report",
            Self::Risk => "Risk Report",
        }
    }

    /// Prefix of export filenames
    #[must_use]
    pub const fn filename_prefix(self) -> &'static str {
        match self {
            Self::PointInTime => "PointInTimeReport",
            Self::Historical => "HistoricalReport",
            Self::MeasurementFrequency => "MeasurementFrequencyReport",
            Self::Risk => "RiskReport",
        }
    }

    /// Accepted date filter
    #[must_use]
    pub const fn date_scope(self) -> DateScope {
        match self {
            Self::PointInTime => DateScope::Single,
            Self::Historical | Self::MeasurementFrequency => DateScope::Range,
            Self::Risk => DateScope::None,
        }
    }

    /// Column names in export order
    #[must_use]
    pub const fn fields(self) -> &'static [&'static str] {
        match self {
            Self::PointInTime => POINT_IN_TIME_FIELDS,
            Self::Historical => HISTORICAL_FIELDS,
            Self::MeasurementFrequency => MEASUREMENT_FREQUENCY_FIELDS,
            Self::Risk => RISK_FIELDS,
        }
    }

    /// Declared export schema
    #[must_use]
    pub fn schema(self) -> Schema {
        Schema::new(self.fields().iter().copied())
    }

    /// Base filename for an export dated `date`: `<prefix>_<YYYY-MM-DD>`
    #[must_use]
    pub fn base_filename(self, date: NaiveDate) -> String {
        format!("{}_{}", self.filename_prefix(), date.format("%Y-%m-%d"))
    }
}

impl Display for ReportKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for ReportKind {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.slug() == wanted)
            .ok_or_else(|| ReportError::UnknownReport(s.to_string()))
    }
}

//! Coverage and risk classification

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

/// Band for a coverage percentage, worst first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CoverageBand {
    Poor,
    Fair,
    Good,
}

impl CoverageBand {
    /// Lower bound of the good band
    pub const GOOD_FROM: f64 = 80.0;
    /// Lower bound of the fair band
    pub const FAIR_FROM: f64 = 50.0;

    /// Band for `percentage`; NaN is poor
    #[must_use]
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= Self::GOOD_FROM {
            Self::Good
        } else if percentage >= Self::FAIR_FROM {
            Self::Fair
        } else {
            Self::Poor
        }
    }
}

impl Display for CoverageBand {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Poor => "poor",
            Self::Fair => "fair",
            Self::Good => "good",
        })
    }
}

/// Staleness risk of a zone
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Days without measurement at which a zone becomes high risk
    pub const HIGH_FROM_DAYS: u32 = 30;
    /// Days without measurement at which a zone becomes medium risk
    pub const MEDIUM_FROM_DAYS: u32 = 15;

    #[must_use]
    pub const fn from_days_since(days: u32) -> Self {
        if days >= Self::HIGH_FROM_DAYS {
            Self::High
        } else if days >= Self::MEDIUM_FROM_DAYS {
            Self::Medium
        } else {
            Self::Low
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

impl Display for RiskLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//! Exporter configuration
//!
//! Defaults reproduce the established file format exactly. Every knob is a
//! deliberate, opt-in deviation.
//!
//! ```toml
//! escape = "rfc4180"
//! schema-policy = "pad-missing"
//! excel = "reject"
//! ```

use serde::Deserialize;

use crate::encode::EscapePolicy;
use crate::format::ExcelMode;
use crate::schema::SchemaPolicy;

/// Errors loading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML syntax or unknown value
    #[error("invalid export config: {0}")]
    InvalidToml(#[from] toml::de::Error),
}

/// Exporter configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct ExportConfig {
    /// Cell escaping rule
    pub escape: EscapePolicy,
    /// Handling of records whose fields differ from the header
    pub schema_policy: SchemaPolicy,
    /// How Excel requests are served
    pub excel: ExcelMode,
}

impl ExportConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With escaping rule
    #[inline]
    #[must_use]
    pub fn with_escape(mut self, escape: EscapePolicy) -> Self {
        self.escape = escape;
        self
    }

    /// With schema policy
    #[inline]
    #[must_use]
    pub fn with_schema_policy(mut self, policy: SchemaPolicy) -> Self {
        self.schema_policy = policy;
        self
    }

    /// With Excel mode
    #[inline]
    #[must_use]
    pub fn with_excel(mut self, excel: ExcelMode) -> Self {
        self.excel = excel;
        self
    }

    /// Parse from TOML; missing keys take their defaults
    ///
    /// # Errors
    /// Returns error on invalid TOML, unknown keys or unknown values
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml)?)
    }
}

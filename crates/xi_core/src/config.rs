//! # Risk Configuration
//!
//! Lookup tables behind the age and injury risk coefficients.
//! The cost-formula weights are fixed constants in [`crate::cost`] and are not
//! part of this configuration.
//!
//! ```rust
//! use xi_core::config::RiskConfig;
//!
//! let config = RiskConfig::default();
//! assert_eq!(config.age.under_20, 1.5);
//! ```

use crate::error::{LineupError, Result};
use crate::models::Severity;
use serde::{Deserialize, Serialize};

/// Risk coefficient tables
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RiskConfig {
    #[serde(default)]
    pub age: AgeRiskConfig,
    #[serde(default)]
    pub injury: InjuryRiskConfig,
}

impl RiskConfig {
    /// Parses a JSON document; omitted sections and fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| LineupError::malformed(format!("invalid risk config: {}", e)))
    }
}

/// Age bands (inclusive bounds)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgeRiskConfig {
    /// age < 20 (default: 1.5)
    pub under_20: f64,
    /// 20..=25 (default: 1.2)
    pub from_20_to_25: f64,
    /// 26..=30 (default: 1.0)
    pub from_26_to_30: f64,
    /// 31..=35 (default: 1.3)
    pub from_31_to_35: f64,
    /// age > 35 (default: 1.7)
    pub over_35: f64,
}

impl Default for AgeRiskConfig {
    fn default() -> Self {
        Self {
            under_20: 1.5,
            from_20_to_25: 1.2,
            from_26_to_30: 1.0,
            from_31_to_35: 1.3,
            over_35: 1.7,
        }
    }
}

/// Injury history weighting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InjuryRiskConfig {
    /// (default: 1.0)
    pub mild_weight: f64,
    /// (default: 2.0)
    pub moderate_weight: f64,
    /// (default: 3.0)
    pub severe_weight: f64,
    /// Added per recurrent injury (default: 2.0)
    pub recurrence_weight: f64,
    /// Average recovery days are divided by this (default: 10.0)
    pub recovery_divisor: f64,
}

impl InjuryRiskConfig {
    pub fn severity_weight(&self, severity: Severity) -> f64 {
        match severity {
            Severity::Mild => self.mild_weight,
            Severity::Moderate => self.moderate_weight,
            Severity::Severe => self.severe_weight,
        }
    }
}

impl Default for InjuryRiskConfig {
    fn default() -> Self {
        Self {
            mild_weight: 1.0,
            moderate_weight: 2.0,
            severe_weight: 3.0,
            recurrence_weight: 2.0,
            recovery_divisor: 10.0,
        }
    }
}

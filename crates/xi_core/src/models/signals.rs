//! Per-player inputs to the cost formula
//!
//! Every signal is optional per player; a missing value reads as 0.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Resolved signals for one player
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PlayerSignals {
    /// Performance score in [0, 10]
    pub performance: f64,
    /// Accumulated minutes played (fatigue)
    pub minutes_played: u32,
    /// Injury-history risk coefficient
    pub injury_risk: f64,
    /// Age risk coefficient
    pub age_risk: f64,
}

/// Signal sources keyed by player name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SignalTable {
    #[serde(default)]
    pub performance: HashMap<String, f64>,
    #[serde(default)]
    pub minutes_played: HashMap<String, u32>,
    #[serde(default)]
    pub injury_risk: HashMap<String, f64>,
    #[serde(default)]
    pub age_risk: HashMap<String, f64>,
}

impl SignalTable {
    pub fn new(
        performance: HashMap<String, f64>,
        minutes_played: HashMap<String, u32>,
        injury_risk: HashMap<String, f64>,
        age_risk: HashMap<String, f64>,
    ) -> Self {
        Self {
            performance,
            minutes_played,
            injury_risk,
            age_risk,
        }
    }

    /// Signals for `name`, defaulting each absent value to 0
    pub fn signals_for(&self, name: &str) -> PlayerSignals {
        PlayerSignals {
            performance: self.performance.get(name).copied().unwrap_or(0.0),
            minutes_played: self.minutes_played.get(name).copied().unwrap_or(0),
            injury_risk: self.injury_risk.get(name).copied().unwrap_or(0.0),
            age_risk: self.age_risk.get(name).copied().unwrap_or(0.0),
        }
    }
}

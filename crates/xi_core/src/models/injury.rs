// 부상 기록 - 회복 기간은 시작일과 종료일을 모두 포함
use crate::error::LineupError;
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Injury records keyed by player name
pub type InjuryHistory = HashMap<String, Vec<InjuryRecord>>;

/// Injury severity category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    Mild,
    Moderate,
    Severe,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Mild => "Mild",
            Severity::Moderate => "Moderate",
            Severity::Severe => "Severe",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = LineupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Mild" => Ok(Severity::Mild),
            "Moderate" => Ok(Severity::Moderate),
            "Severe" => Ok(Severity::Severe),
            other => Err(LineupError::malformed(format!("unknown injury severity: {}", other))),
        }
    }
}

/// A single injury suffered by one player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InjuryRecord {
    /// Onset date
    pub date: NaiveDate,
    pub injury_type: String,
    /// Recovery duration in days
    pub recovery_days: u32,
    pub severity: Severity,
    /// Minutes played before the injury
    pub minutes_played: u32,
    pub recurrent: bool,
}

impl InjuryRecord {
    /// Last day of the recovery window (onset + recovery days).
    ///
    /// `None` when the window runs past the last representable date.
    pub fn recovery_end(&self) -> Option<NaiveDate> {
        self.date.checked_add_days(Days::new(u64::from(self.recovery_days)))
    }

    /// True if `date` falls in `[onset, onset + recovery_days]`. A window
    /// without a representable end never closes.
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.date <= date && self.recovery_end().map_or(true, |end| date <= end)
    }
}

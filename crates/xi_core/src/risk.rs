//! Age and injury-history risk coefficients
//!
//! Both feed the cost formula as penalties. Injury risk:
//!
//! ```text
//! (injuries * sum(severity weights)) + (recurrent * recurrence_weight) + (avg recovery days / 10)
//! ```
//!
//! rounded to two decimals.

use crate::config::{AgeRiskConfig, InjuryRiskConfig};
use crate::models::{InjuryHistory, InjuryRecord, Roster};
use std::collections::HashMap;

pub fn age_risk(age: u32, config: &AgeRiskConfig) -> f64 {
    match age {
        0..=19 => config.under_20,
        20..=25 => config.from_20_to_25,
        26..=30 => config.from_26_to_30,
        31..=35 => config.from_31_to_35,
        _ => config.over_35,
    }
}

pub fn injury_risk(injuries: &[InjuryRecord], config: &InjuryRiskConfig) -> f64 {
    if injuries.is_empty() {
        return 0.0;
    }

    let count = injuries.len() as f64;
    let severity_total: f64 = injuries
        .iter()
        .map(|i| config.severity_weight(i.severity))
        .sum();
    let recurrent = injuries.iter().filter(|i| i.recurrent).count() as f64;
    let avg_recovery =
        injuries.iter().map(|i| f64::from(i.recovery_days)).sum::<f64>() / count;

    let risk = count * severity_total
        + recurrent * config.recurrence_weight
        + avg_recovery / config.recovery_divisor;
    (risk * 100.0).round() / 100.0
}

/// Age risk for every roster player
pub fn age_risks(roster: &Roster, config: &AgeRiskConfig) -> HashMap<String, f64> {
    roster
        .iter()
        .map(|p| (p.name.clone(), age_risk(p.age, config)))
        .collect()
}

/// Injury risk for every player with an injury history entry
pub fn injury_risks(history: &InjuryHistory, config: &InjuryRiskConfig) -> HashMap<String, f64> {
    history
        .iter()
        .map(|(name, injuries)| (name.clone(), injury_risk(injuries, config)))
        .collect()
}

//! Availability filtering
//!
//! A player is unavailable on a date if any of their injury windows contains it.
//! Players with no injury data are available.

use crate::models::{InjuryHistory, InjuryRecord, Player, Roster};
use chrono::NaiveDate;
use tracing::debug;

/// True when none of `injuries` covers `date`
pub fn is_available(injuries: &[InjuryRecord], date: NaiveDate) -> bool {
    !injuries.iter().any(|injury| injury.covers(date))
}

/// Players available on `date`, in roster order.
pub fn available_players<'a>(
    roster: &'a Roster,
    injuries: &InjuryHistory,
    date: NaiveDate,
) -> Vec<&'a Player> {
    let available: Vec<&Player> = roster
        .iter()
        .filter(|player| {
            injuries
                .get(&player.name)
                .map_or(true, |records| is_available(records, date))
        })
        .collect();

    debug!(
        date = %date,
        total = roster.len(),
        available = available.len(),
        "availability filter applied"
    );
    available
}

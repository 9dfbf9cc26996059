//! Player x slot cost matrix construction
//!
//! Lower cost is better. Performance dominates; minutes played, injury risk and
//! age risk are penalties:
//!
//! ```text
//! cost = 0.5 * (10 - performance) + 0.2 * minutes + 0.2 * injury_risk + 0.1 * age_risk
//! ```
//!
//! Pairings where the slot is not among the player's positions are `Ineligible`.

use super::matrix::{CostEntry, CostMatrix};
use crate::error::{LineupError, Result};
use crate::models::{Formation, Player, PlayerSignals, SignalTable};
use crate::solver::BipartiteMatching;
use tracing::debug;

pub const PERFORMANCE_WEIGHT: f64 = 0.5;
pub const MINUTES_WEIGHT: f64 = 0.2;
pub const INJURY_RISK_WEIGHT: f64 = 0.2;
pub const AGE_RISK_WEIGHT: f64 = 0.1;

/// Upper bound of the performance scale
pub const MAX_PERFORMANCE: f64 = 10.0;

/// Cost of fielding a player with these signals in any slot they can play
pub fn pairing_cost(signals: &PlayerSignals) -> f64 {
    (MAX_PERFORMANCE - signals.performance) * PERFORMANCE_WEIGHT
        + f64::from(signals.minutes_played) * MINUTES_WEIGHT
        + signals.injury_risk * INJURY_RISK_WEIGHT
        + signals.age_risk * AGE_RISK_WEIGHT
}

/// Cost matrix plus the row and column mappings needed to translate solver
/// output back to players and slots.
#[derive(Debug, Clone)]
pub struct CostTable<'a> {
    pub matrix: CostMatrix,
    /// Row index -> player
    pub players: Vec<&'a Player>,
    /// Column index -> slot label
    pub slots: Vec<String>,
}

impl<'a> CostTable<'a> {
    pub fn player(&self, row: usize) -> Option<&'a Player> {
        self.players.get(row).copied()
    }

    pub fn slot(&self, col: usize) -> Option<&str> {
        self.slots.get(col).map(String::as_str)
    }
}

/// Fails with `UnfillableSlot` if the slots cannot all be filled by distinct
/// available players.
///
/// The per-slot check runs first so that a slot nobody can play is reported by
/// name even when other slots are also short.
pub fn check_feasibility(players: &[&Player], formation: &Formation) -> Result<()> {
    for slot in formation.slots() {
        if !players.iter().any(|p| p.can_play(slot)) {
            return Err(LineupError::UnfillableSlot(slot.clone()));
        }
    }

    let slots = formation.slots();
    let matching =
        BipartiteMatching::maximum(players.len(), slots.len(), |r, c| players[r].can_play(&slots[c]));
    match matching.first_unmatched_col() {
        Some(col) => Err(LineupError::UnfillableSlot(slots[col].clone())),
        None => Ok(()),
    }
}

fn validate_signals(name: &str, signals: &PlayerSignals) -> Result<()> {
    if !signals.performance.is_finite()
        || !(0.0..=MAX_PERFORMANCE).contains(&signals.performance)
    {
        return Err(LineupError::malformed(format!(
            "performance for {} must be within [0, {}], got {}",
            name, MAX_PERFORMANCE, signals.performance
        )));
    }
    for (label, value) in [("injury risk", signals.injury_risk), ("age risk", signals.age_risk)] {
        if !value.is_finite() || value < 0.0 {
            return Err(LineupError::malformed(format!(
                "{} for {} must be a non-negative number, got {}",
                label, name, value
            )));
        }
    }
    Ok(())
}

/// Builds the cost table for `players` (matrix rows, in the given order) against
/// the formation slots (matrix columns).
pub fn build_cost_matrix<'a>(
    players: &[&'a Player],
    formation: &Formation,
    signals: &SignalTable,
) -> Result<CostTable<'a>> {
    check_feasibility(players, formation)?;

    let mut costs = Vec::with_capacity(players.len());
    for player in players {
        let player_signals = signals.signals_for(&player.name);
        validate_signals(&player.name, &player_signals)?;
        costs.push(pairing_cost(&player_signals));
    }

    let slots = formation.slots();
    let matrix = CostMatrix::from_fn(players.len(), slots.len(), |r, c| {
        if players[r].can_play(&slots[c]) {
            CostEntry::Finite(costs[r])
        } else {
            CostEntry::Ineligible
        }
    });

    debug!(rows = matrix.rows(), cols = matrix.cols(), "cost matrix built");

    Ok(CostTable {
        matrix,
        players: players.to_vec(),
        slots: slots.to_vec(),
    })
}

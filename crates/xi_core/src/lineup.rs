//! Lineup assembly and the end-to-end generation pipeline
//!
//! availability -> cost matrix -> Hungarian assignment -> (slot, player) pairs

use crate::availability::available_players;
use crate::cost::{build_cost_matrix, CostTable};
use crate::error::{LineupError, Result, SolverError};
use crate::models::{Formation, InjuryHistory, Roster, SignalTable};
use crate::solver::{solve, Assignment};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info, warn};

/// One filled slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineupEntry {
    pub slot: String,
    pub player: String,
}

/// Selected starting lineup in formation order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lineup {
    pub entries: Vec<LineupEntry>,
    /// Sum of the costs of the selected pairings
    pub total_cost: f64,
}

impl Lineup {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn player_for(&self, slot: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.slot == slot)
            .map(|e| e.player.as_str())
    }

    pub fn contains_player(&self, name: &str) -> bool {
        self.entries.iter().any(|e| e.player == name)
    }

    /// `(slot, player)` pairs
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|e| (e.slot.as_str(), e.player.as_str()))
    }
}

impl fmt::Display for Lineup {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for entry in &self.entries {
            writeln!(f, "{}: {}", entry.slot, entry.player)?;
        }
        Ok(())
    }
}

/// Translates solver pairs into a lineup ordered by slot.
///
/// Pairs on ineligible entries are dropped; the builder's feasibility check
/// keeps them from being selected in the first place.
pub fn assemble_lineup(assignment: &Assignment, table: &CostTable<'_>) -> Lineup {
    let mut pairs: Vec<(usize, usize)> = assignment
        .pairs()
        .iter()
        .copied()
        .filter(|&(row, col)| {
            let eligible = table.matrix.get(row, col).is_finite();
            if !eligible {
                warn!(row, col, "dropping ineligible pairing from assignment");
            }
            eligible
        })
        .collect();
    pairs.sort_by_key(|&(_, col)| col);

    let entries = pairs
        .iter()
        .filter_map(|&(row, col)| {
            Some(LineupEntry {
                slot: table.slot(col)?.to_string(),
                player: table.player(row)?.name.clone(),
            })
        })
        .collect();

    Lineup {
        entries,
        total_cost: table.matrix.total_cost(&pairs),
    }
}

fn solver_error(err: SolverError, table: &CostTable<'_>) -> LineupError {
    match err {
        SolverError::Infeasible { column } => LineupError::UnfillableSlot(
            table
                .slot(column)
                .map_or_else(|| format!("column {}", column), str::to_string),
        ),
        SolverError::InvariantViolation(detail) => LineupError::AlgorithmInvariantViolation(detail),
    }
}

/// Picks the minimum-cost lineup for `formation` from the players available on
/// `date`.
pub fn generate_lineup(
    roster: &Roster,
    injuries: &InjuryHistory,
    date: NaiveDate,
    signals: &SignalTable,
    formation: &Formation,
) -> Result<Lineup> {
    let available = available_players(roster, injuries, date);
    let table = build_cost_matrix(&available, formation, signals)?;

    let assignment = solve(&table.matrix).map_err(|e| solver_error(e, &table))?;
    debug!(pairs = assignment.len(), "assignment extracted");

    let lineup = assemble_lineup(&assignment, &table);
    if lineup.len() != formation.len() {
        return Err(LineupError::AlgorithmInvariantViolation(format!(
            "lineup has {} entries for {} slots",
            lineup.len(),
            formation.len()
        )));
    }

    info!(
        date = %date,
        players = lineup.len(),
        total_cost = lineup.total_cost,
        "lineup generated"
    );
    Ok(lineup)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cost::{CostEntry, CostMatrix};
    use crate::models::{InjuryRecord, Player, Severity, FORMATION_433};
    use std::collections::HashMap;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn squad() -> Roster {
        Roster::new(vec![
            Player::new("ter Stegen", 1, 32, &["Goalkeeper"]),
            Player::new("Peña", 13, 25, &["Goalkeeper"]),
            Player::new("Araujo", 4, 25, &["Centre-back", "Right-back"]),
            Player::new("Cubarsí", 2, 18, &["Centre-back"]),
            Player::new("Iñigo Martínez", 5, 33, &["Centre-back", "Left-back"]),
            Player::new("Koundé", 23, 26, &["Right-back", "Centre-back"]),
            Player::new("Balde", 3, 21, &["Left-back", "Left-winger"]),
            Player::new("Casadó", 17, 21, &["Pivot", "Midfielder"]),
            Player::new("De Jong", 21, 27, &["Pivot", "Midfielder"]),
            Player::new("Olmo", 20, 26, &["Attacking-midfielder", "Left-winger"]),
            Player::new("Pedri", 8, 22, &["Midfielder", "Attacking-midfielder"]),
            Player::new("Lewandowski", 9, 36, &["Striker"]),
            Player::new("Yamal", 19, 17, &["Right-winger", "Left-winger"]),
            Player::new("Raphinha", 11, 27, &["Left-winger", "Right-winger", "Striker"]),
            Player::new("Ferran", 7, 24, &["Striker", "Left-winger"]),
        ])
        .unwrap()
    }

    fn signals() -> SignalTable {
        let performance: HashMap<String, f64> = [
            ("ter Stegen", 8.0),
            ("Peña", 6.5),
            ("Araujo", 7.5),
            ("Cubarsí", 8.0),
            ("Iñigo Martínez", 7.0),
            ("Koundé", 8.2),
            ("Balde", 7.4),
            ("Casadó", 7.8),
            ("De Jong", 7.1),
            ("Olmo", 8.1),
            ("Pedri", 8.7),
            ("Lewandowski", 8.9),
            ("Yamal", 9.2),
            ("Raphinha", 8.8),
            ("Ferran", 7.0),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
        SignalTable {
            performance,
            ..SignalTable::default()
        }
    }

    #[test]
    fn test_full_433_lineup() {
        let roster = squad();
        let lineup = generate_lineup(
            &roster,
            &InjuryHistory::new(),
            ymd(2024, 12, 1),
            &signals(),
            &Formation::default(),
        )
        .unwrap();

        assert_eq!(lineup.len(), 11);
        let slots: Vec<&str> = lineup.pairs().map(|(s, _)| s).collect();
        assert_eq!(slots, FORMATION_433.to_vec());

        // Cost does not depend on the slot, so only forced placements are checked.
        assert_eq!(lineup.player_for("Goalkeeper"), Some("ter Stegen"));
        assert_eq!(lineup.player_for("Striker"), Some("Lewandowski"));
        assert_eq!(lineup.player_for("Left-back"), Some("Balde"));
        assert_eq!(lineup.player_for("Pivot"), Some("Casadó"));
        assert_eq!(lineup.player_for("Attacking-midfielder"), Some("Olmo"));
        assert_eq!(lineup.player_for("Midfielder"), Some("Pedri"));
        assert!(lineup.contains_player("Yamal"));
        assert!(lineup.contains_player("Raphinha"));
        for benched in ["Peña", "Ferran", "Iñigo Martínez", "De Jong"] {
            assert!(!lineup.contains_player(benched), "{} should be benched", benched);
        }
        // 0.5 * (110 - 90.6)
        assert!((lineup.total_cost - 9.7).abs() < 1e-9);

        for (slot, player) in lineup.pairs() {
            assert!(roster.get(player).unwrap().can_play(slot));
        }
    }

    #[test]
    fn test_injured_player_is_replaced() {
        let roster = squad();
        let mut injuries = InjuryHistory::new();
        injuries.insert(
            "ter Stegen".to_string(),
            vec![InjuryRecord {
                date: ymd(2024, 9, 23),
                injury_type: "Patellar tendon rupture".to_string(),
                recovery_days: 214,
                severity: Severity::Severe,
                minutes_played: 1800,
                recurrent: false,
            }],
        );

        let lineup = generate_lineup(
            &roster,
            &injuries,
            ymd(2024, 12, 1),
            &signals(),
            &Formation::default(),
        )
        .unwrap();
        assert_eq!(lineup.player_for("Goalkeeper"), Some("Peña"));
    }

    #[test]
    fn test_injury_leaving_slot_empty_is_unfillable() {
        let roster = Roster::new(vec![
            Player::new("Keeper", 1, 30, &["Goalkeeper"]),
            Player::new("Nine", 9, 28, &["Striker"]),
        ])
        .unwrap();
        let mut injuries = InjuryHistory::new();
        injuries.insert(
            "Nine".to_string(),
            vec![InjuryRecord {
                date: ymd(2024, 1, 1),
                injury_type: "Knock".to_string(),
                recovery_days: 3,
                severity: Severity::Mild,
                minutes_played: 10,
                recurrent: true,
            }],
        );

        let formation = Formation::new(["Goalkeeper", "Striker"]);
        let result = generate_lineup(
            &roster,
            &injuries,
            ymd(2024, 1, 4),
            &SignalTable::default(),
            &formation,
        );
        assert_eq!(result.unwrap_err(), LineupError::UnfillableSlot("Striker".to_string()));

        let lineup = generate_lineup(
            &roster,
            &injuries,
            ymd(2024, 1, 5),
            &SignalTable::default(),
            &formation,
        )
        .unwrap();
        assert_eq!(lineup.player_for("Striker"), Some("Nine"));
    }

    #[test]
    fn test_assembler_drops_ineligible_pairs_and_orders_by_slot() {
        let a = Player::new("A", 1, 20, &["Goalkeeper"]);
        let b = Player::new("B", 2, 20, &["Striker"]);
        let table = CostTable {
            matrix: CostMatrix::from_rows(vec![
                vec![CostEntry::Finite(1.0), CostEntry::Ineligible],
                vec![CostEntry::Ineligible, CostEntry::Finite(2.0)],
            ])
            .unwrap(),
            players: vec![&a, &b],
            slots: vec!["Goalkeeper".to_string(), "Striker".to_string()],
        };

        let assignment = solve(&table.matrix).unwrap();
        let lineup = assemble_lineup(&assignment, &table);
        assert_eq!(lineup.to_string(), "Goalkeeper: A\nStriker: B\n");
        assert_eq!(lineup.total_cost, 3.0);
    }

    #[test]
    fn test_solver_errors_map_to_lineup_errors() {
        let a = Player::new("A", 1, 20, &["Goalkeeper"]);
        let table = CostTable {
            matrix: CostMatrix::from_fn(1, 1, |_, _| CostEntry::Finite(0.0)),
            players: vec![&a],
            slots: vec!["Goalkeeper".to_string()],
        };

        assert_eq!(
            solver_error(SolverError::Infeasible { column: 0 }, &table),
            LineupError::UnfillableSlot("Goalkeeper".to_string())
        );
        let err = solver_error(SolverError::InvariantViolation("boom".to_string()), &table);
        assert_eq!(err, LineupError::AlgorithmInvariantViolation("boom".to_string()));
        assert!(!err.is_input_error());
    }
}

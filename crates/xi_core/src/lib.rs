//! # xi_core - Starting XI Selection Engine
//!
//! Picks a starting lineup by solving a minimum-cost bipartite assignment
//! between available players and formation slots.
//!
//! ## Pipeline
//! - `availability`: drops players injured on the reference date
//! - `cost`: player x slot cost matrix, ineligible pairs tagged
//! - `solver`: Hungarian algorithm with Konig minimum cover and augmenting-path
//!   extraction
//! - `lineup`: maps the assignment back to (slot, player) pairs
//!
//! ## Supporting modules
//! - `risk`: age and injury-history risk coefficients
//! - `minutes`: minutes-played ledger threaded through matches
//! - `config`: risk coefficient tables

// Loop style - index loops mirror the matrix notation
#![allow(clippy::needless_range_loop)]

pub mod availability;
pub mod config;
pub mod cost;
pub mod error;
pub mod lineup;
pub mod minutes;
pub mod models;
pub mod risk;
pub mod solver;

pub use availability::available_players;
pub use config::RiskConfig;
pub use cost::{build_cost_matrix, CostEntry, CostMatrix, CostTable};
pub use error::{LineupError, Result, SolverError};
pub use lineup::{assemble_lineup, generate_lineup, Lineup, LineupEntry};
pub use minutes::{MatchReport, MinutesLedger, Substitution};
pub use models::{
    Formation, InjuryHistory, InjuryRecord, Player, PlayerSignals, PositionGroup, Roster,
    Severity, SignalTable, FORMATION_433,
};
pub use solver::{solve, Assignment};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

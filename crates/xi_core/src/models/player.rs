//! Player roster types and primary-position classification

use crate::error::{LineupError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A squad member who can be picked for a formation slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Unique within a roster
    pub name: String,
    /// Jersey number
    pub number: u32,
    pub age: u32,
    /// Eligible slot labels; the first one is the primary position
    pub positions: Vec<String>,
}

impl Player {
    pub fn new(name: impl Into<String>, number: u32, age: u32, positions: &[&str]) -> Self {
        Self {
            name: name.into(),
            number,
            age,
            positions: positions.iter().map(|p| p.to_string()).collect(),
        }
    }

    /// Whether this player is qualified for the given slot label
    pub fn can_play(&self, slot: &str) -> bool {
        self.positions.iter().any(|p| p == slot)
    }

    pub fn primary_position(&self) -> Option<&str> {
        self.positions.first().map(String::as_str)
    }

    pub fn position_group(&self) -> Option<PositionGroup> {
        self.primary_position().and_then(PositionGroup::from_label)
    }
}

/// Squad line a player belongs to, derived from the primary position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PositionGroup {
    Forwards,
    Midfielders,
    Defenders,
    Goalkeepers,
}

impl PositionGroup {
    /// Display order used by [`Roster::group_by_position`]
    pub const ALL: [PositionGroup; 4] = [
        PositionGroup::Forwards,
        PositionGroup::Midfielders,
        PositionGroup::Defenders,
        PositionGroup::Goalkeepers,
    ];

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Left-winger" | "Right-winger" | "Striker" => Some(PositionGroup::Forwards),
            "Midfielder" | "Attacking-midfielder" | "Pivot" => Some(PositionGroup::Midfielders),
            "Centre-back" | "Right-back" | "Left-back" => Some(PositionGroup::Defenders),
            "Goalkeeper" => Some(PositionGroup::Goalkeepers),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PositionGroup::Forwards => "Forwards",
            PositionGroup::Midfielders => "Midfielders",
            PositionGroup::Defenders => "Defenders",
            PositionGroup::Goalkeepers => "Goalkeepers",
        }
    }
}

/// Ordered set of players with unique names.
///
/// Enumeration order is the order players were supplied in and is kept by every
/// downstream stage (availability, matrix rows).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Roster {
    players: Vec<Player>,
}

impl Roster {
    /// Builds a roster, rejecting duplicate names, duplicate jersey numbers and
    /// players without positions.
    pub fn new(players: Vec<Player>) -> Result<Self> {
        let mut seen = HashSet::new();
        let mut numbers = HashSet::new();
        for player in &players {
            if player.name.trim().is_empty() {
                return Err(LineupError::malformed("player with empty name"));
            }
            if !seen.insert(player.name.as_str()) {
                return Err(LineupError::malformed(format!(
                    "duplicate player name: {}",
                    player.name
                )));
            }
            if !numbers.insert(player.number) {
                return Err(LineupError::malformed(format!(
                    "duplicate jersey number {} for {}",
                    player.number, player.name
                )));
            }
            if player.positions.is_empty() {
                return Err(LineupError::malformed(format!(
                    "player {} has no eligible positions",
                    player.name
                )));
            }
        }
        Ok(Self { players })
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.name == name)
    }

    pub fn by_number(&self, number: u32) -> Option<&Player> {
        self.players.iter().find(|p| p.number == number)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.players.iter()
    }

    /// Groups players by primary position in Forwards, Midfielders, Defenders,
    /// Goalkeepers order. Players whose primary label is unknown are left out.
    pub fn group_by_position(&self) -> Vec<(PositionGroup, Vec<&Player>)> {
        PositionGroup::ALL
            .iter()
            .map(|group| {
                let members = self
                    .players
                    .iter()
                    .filter(|p| p.position_group() == Some(*group))
                    .collect();
                (*group, members)
            })
            .collect()
    }
}

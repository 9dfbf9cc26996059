//! Minutes-played ledger
//!
//! The ledger is a plain value: recording a match returns a new ledger and
//! leaves the old one untouched.

use crate::error::{LineupError, Result};
use crate::lineup::Lineup;
use crate::models::Roster;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Regulation length of one half
pub const HALF_LENGTH: u32 = 45;

/// One substitution, by jersey number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Substitution {
    /// Player leaving the pitch
    pub off: u32,
    /// Player coming on in the vacated slot
    pub on: u32,
    pub minute: u32,
}

/// What happened in one played match
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchReport {
    pub first_half_added: u32,
    pub second_half_added: u32,
    /// In chronological order
    #[serde(default)]
    pub substitutions: Vec<Substitution>,
}

struct OnPitch {
    slot: String,
    player: String,
    entered: u32,
}

impl MatchReport {
    /// Regulation time plus added time, rejecting added time that overflows.
    pub fn match_length(&self) -> Result<u32> {
        (2 * HALF_LENGTH)
            .checked_add(self.first_half_added)
            .and_then(|m| m.checked_add(self.second_half_added))
            .ok_or_else(|| {
                LineupError::malformed(format!(
                    "added time of {} + {} minutes is out of range",
                    self.first_half_added, self.second_half_added
                ))
            })
    }

    /// Minutes each participating player spent on the pitch.
    pub fn minutes_played(
        &self,
        lineup: &Lineup,
        roster: &Roster,
    ) -> Result<BTreeMap<String, u32>> {
        let length = self.match_length()?;
        let mut pitch = Vec::with_capacity(lineup.len());
        for (slot, player) in lineup.pairs() {
            if roster.get(player).is_none() {
                return Err(LineupError::malformed(format!(
                    "lineup player {} is not in the roster",
                    player
                )));
            }
            pitch.push(OnPitch {
                slot: slot.to_string(),
                player: player.to_string(),
                entered: 0,
            });
        }

        let mut played: BTreeMap<String, u32> = BTreeMap::new();
        let mut substituted_off: HashSet<String> = HashSet::new();
        let mut last_minute = 0;

        for sub in &self.substitutions {
            if sub.minute > length {
                return Err(LineupError::malformed(format!(
                    "substitution minute {} is past the end of a {}-minute match",
                    sub.minute, length
                )));
            }
            if sub.minute < last_minute {
                return Err(LineupError::malformed(format!(
                    "substitution at minute {} comes after one at minute {}",
                    sub.minute, last_minute
                )));
            }

            let idx = pitch
                .iter()
                .position(|p| roster.get(&p.player).map(|pl| pl.number) == Some(sub.off))
                .ok_or_else(|| {
                    LineupError::malformed(format!("player number {} is not on the pitch", sub.off))
                })?;

            let incoming = roster.by_number(sub.on).ok_or_else(|| {
                LineupError::malformed(format!("player number {} is not in the roster", sub.on))
            })?;
            if pitch.iter().any(|p| p.player == incoming.name)
                || substituted_off.contains(&incoming.name)
            {
                return Err(LineupError::malformed(format!(
                    "{} has already played in this match",
                    incoming.name
                )));
            }
            if !incoming.can_play(&pitch[idx].slot) {
                return Err(LineupError::malformed(format!(
                    "{} cannot play in the position {}",
                    incoming.name, pitch[idx].slot
                )));
            }

            let slot = pitch[idx].slot.clone();
            let leaving = std::mem::replace(
                &mut pitch[idx],
                OnPitch {
                    slot,
                    player: incoming.name.clone(),
                    entered: sub.minute,
                },
            );
            *played.entry(leaving.player.clone()).or_insert(0) += sub.minute - leaving.entered;
            substituted_off.insert(leaving.player);
            last_minute = sub.minute;
        }

        for p in pitch {
            *played.entry(p.player).or_insert(0) += length - p.entered;
        }
        Ok(played)
    }
}

/// Cumulative minutes per player.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinutesLedger {
    minutes: BTreeMap<String, u32>,
}

impl MinutesLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> u32 {
        self.minutes.get(name).copied().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.minutes.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.minutes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.minutes.is_empty()
    }

    /// Minutes keyed by player, as consumed by [`SignalTable`](crate::models::SignalTable)
    pub fn to_signal_map(&self) -> HashMap<String, u32> {
        self.minutes.clone().into_iter().collect()
    }

    /// Returns a ledger with this match's minutes added.
    pub fn record_match(
        &self,
        lineup: &Lineup,
        roster: &Roster,
        report: &MatchReport,
    ) -> Result<MinutesLedger> {
        let played = report.minutes_played(lineup, roster)?;

        let mut next = self.clone();
        for (player, minutes) in played {
            let total = next.minutes.entry(player).or_insert(0);
            *total = total.checked_add(minutes).ok_or_else(|| {
                LineupError::malformed(format!(
                    "cumulative minutes overflow after adding {}",
                    minutes
                ))
            })?;
        }
        Ok(next)
    }
}

impl FromIterator<(String, u32)> for MinutesLedger {
    fn from_iter<I: IntoIterator<Item = (String, u32)>>(iter: I) -> Self {
        Self {
            minutes: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lineup::LineupEntry;
    use crate::models::Player;

    fn roster() -> Roster {
        Roster::new(vec![
            Player::new("Keeper", 1, 30, &["Goalkeeper"]),
            Player::new("Nine", 9, 28, &["Striker"]),
            Player::new("Sub Nine", 19, 21, &["Striker", "Right-winger"]),
            Player::new("Winger", 11, 24, &["Left-winger"]),
            Player::new("Backup Keeper", 13, 25, &["Goalkeeper"]),
        ])
        .unwrap()
    }

    fn sub(off: u32, on: u32, minute: u32) -> Substitution {
        Substitution { off, on, minute }
    }

    fn lineup() -> Lineup {
        Lineup {
            entries: vec![
                LineupEntry {
                    slot: "Goalkeeper".to_string(),
                    player: "Keeper".to_string(),
                },
                LineupEntry {
                    slot: "Striker".to_string(),
                    player: "Nine".to_string(),
                },
            ],
            total_cost: 0.0,
        }
    }

    #[test]
    fn test_full_match_without_substitutions() {
        let report = MatchReport {
            first_half_added: 2,
            second_half_added: 5,
            substitutions: Vec::new(),
        };
        let ledger: MinutesLedger = [("Keeper".to_string(), 900)].into_iter().collect();

        let next = ledger.record_match(&lineup(), &roster(), &report).unwrap();
        assert_eq!(next.get("Keeper"), 997);
        assert_eq!(next.get("Nine"), 97);
        // previous ledger is untouched
        assert_eq!(ledger.get("Keeper"), 900);
        assert_eq!(ledger.get("Nine"), 0);
    }

    #[test]
    fn test_substitution_splits_minutes() {
        let report = MatchReport {
            first_half_added: 0,
            second_half_added: 4,
            substitutions: vec![sub(9, 19, 70)],
        };

        let played = report.minutes_played(&lineup(), &roster()).unwrap();
        assert_eq!(played["Keeper"], 94);
        assert_eq!(played["Nine"], 70);
        assert_eq!(played["Sub Nine"], 24);
    }

    #[test]
    fn test_substituted_player_cannot_return() {
        let report = MatchReport {
            substitutions: vec![sub(1, 13, 30), sub(13, 1, 60)],
            ..MatchReport::default()
        };
        let result = report.minutes_played(&lineup(), &roster());
        assert!(matches!(result, Err(LineupError::MalformedInput(_))));
    }

    #[test]
    fn test_invalid_substitutions_are_malformed() {
        let roster = roster();
        let cases = [
            sub(11, 19, 10), // not on the pitch
            sub(9, 42, 10),  // unknown number
            sub(9, 11, 10),  // cannot play striker
            sub(9, 1, 10),   // already on the pitch
            sub(9, 19, 91),  // past full time
        ];
        for case in cases {
            let report = MatchReport {
                substitutions: vec![case],
                ..MatchReport::default()
            };
            let result = report.minutes_played(&lineup(), &roster);
            assert!(
                matches!(result, Err(LineupError::MalformedInput(_))),
                "{:?} should be rejected",
                case
            );
        }
    }

    #[test]
    fn test_overflowing_minutes_are_malformed() {
        let report = MatchReport {
            first_half_added: u32::MAX,
            ..MatchReport::default()
        };
        assert!(matches!(report.match_length(), Err(LineupError::MalformedInput(_))));
        assert!(matches!(
            report.minutes_played(&lineup(), &roster()),
            Err(LineupError::MalformedInput(_))
        ));

        let ledger: MinutesLedger = [("Keeper".to_string(), u32::MAX - 10)].into_iter().collect();
        let result = ledger.record_match(&lineup(), &roster(), &MatchReport::default());
        assert!(matches!(result, Err(LineupError::MalformedInput(_))));
    }

    #[test]
    fn test_out_of_order_substitutions_are_malformed() {
        let report = MatchReport {
            substitutions: vec![sub(9, 19, 60), sub(1, 13, 20)],
            ..MatchReport::default()
        };
        assert!(report.minutes_played(&lineup(), &roster()).is_err());
    }
}

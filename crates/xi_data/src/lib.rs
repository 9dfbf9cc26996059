//! # xi_data
//!
//! Reads and writes the flat-text files behind lineup generation:
//! roster, injury history, performance scores, played minutes and the
//! saved-lineups log.
//!
//! Parse failures carry an [`xi_core::LineupError::MalformedInput`] naming
//! the offending line, wrapped with the file path.

pub mod injuries;
pub mod lineups;
pub mod players;
pub mod signals;

pub use injuries::{append_injury, load_injury_history, parse_injury_history};
pub use lineups::{next_lineup_number, read_lineups, save_lineup};
pub use players::{load_players, parse_players};
pub use signals::{load_minutes, load_performance, write_minutes};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use xi_core::risk::{age_risks, injury_risks};
use xi_core::{
    generate_lineup, Formation, InjuryHistory, Lineup, MatchReport, MinutesLedger, RiskConfig,
    Roster, SignalTable,
};

/// Locations of the data files
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPaths {
    pub players: PathBuf,
    pub injury_history: PathBuf,
    pub player_performance: PathBuf,
    pub played_minutes: PathBuf,
    pub lineups: PathBuf,
}

impl DataPaths {
    /// Conventional file names inside `dir`
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            players: dir.join("players.txt"),
            injury_history: dir.join("injury_history.txt"),
            player_performance: dir.join("player_performance.txt"),
            played_minutes: dir.join("played_minutes.txt"),
            lineups: dir.join("lineups.txt"),
        }
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read data paths: {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse data paths: {}", path.display()))
    }
}

/// Everything read from disk for one lineup generation
#[derive(Debug, Clone)]
pub struct LoadedData {
    pub roster: Roster,
    pub injuries: InjuryHistory,
    pub performance: HashMap<String, f64>,
    pub minutes: MinutesLedger,
}

impl LoadedData {
    /// Cost-formula signals, with risks derived from ages and injury history
    pub fn signals(&self, config: &RiskConfig) -> SignalTable {
        SignalTable::new(
            self.performance.clone(),
            self.minutes.to_signal_map(),
            injury_risks(&self.injuries, &config.injury),
            age_risks(&self.roster, &config.age),
        )
    }
}

pub fn load_inputs(paths: &DataPaths) -> Result<LoadedData> {
    Ok(LoadedData {
        roster: load_players(&paths.players)?,
        injuries: load_injury_history(&paths.injury_history)?,
        performance: load_performance(&paths.player_performance)?,
        minutes: load_minutes(&paths.played_minutes)?,
    })
}

/// Generates the lineup for `date` and appends it to the lineups file.
///
/// Returns the saved lineup number with the lineup.
pub fn generate_and_save(
    paths: &DataPaths,
    date: NaiveDate,
    formation: &Formation,
    config: &RiskConfig,
) -> Result<(usize, Lineup)> {
    let data = load_inputs(paths)?;
    let signals = data.signals(config);
    let lineup = generate_lineup(&data.roster, &data.injuries, date, &signals, formation)
        .with_context(|| format!("Failed to generate lineup for {}", date))?;

    let number = next_lineup_number(&paths.lineups)?;
    save_lineup(&paths.lineups, &lineup, number)?;
    Ok((number, lineup))
}

/// Adds a played match to the minutes file and returns the updated ledger.
pub fn record_match(
    paths: &DataPaths,
    lineup: &Lineup,
    report: &MatchReport,
) -> Result<MinutesLedger> {
    let roster = load_players(&paths.players)?;
    let ledger = load_minutes(&paths.played_minutes)?;
    let updated = ledger
        .record_match(lineup, &roster, report)
        .context("Failed to record match minutes")?;
    write_minutes(&paths.played_minutes, &updated)?;
    info!("Recorded {}-minute match", report.match_length()?);
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use xi_core::{LineupError, Substitution};

    fn write_fixture(dir: &Path) -> DataPaths {
        let paths = DataPaths::in_dir(dir);
        fs::write(
            &paths.players,
            "\
Marc-André ter Stegen, 1, 32, [Goalkeeper]
Iñaki Peña, 13, 25, [Goalkeeper]
Robert Lewandowski, 9, 36, [Striker]
Ferran Torres, 7, 24, [Striker, Left-winger]
",
        )
        .unwrap();
        fs::write(
            &paths.injury_history,
            "\
# Player: Marc-André ter Stegen
# Injury History (Last 5 Years)
2024-09-23, Patellar Tendon Rupture, 214, Severe, 1800, No

# Player: Robert Lewandowski
No recorded injuries
",
        )
        .unwrap();
        fs::write(
            &paths.player_performance,
            "Marc-André ter Stegen, 8.0\nIñaki Peña, 6.5\nRobert Lewandowski, 8.9\nFerran Torres, 7.0\n",
        )
        .unwrap();
        fs::write(&paths.played_minutes, "Robert Lewandowski, 900\n").unwrap();
        paths
    }

    fn formation() -> Formation {
        Formation::new(["Goalkeeper", "Striker"])
    }

    #[test]
    fn test_load_inputs_derives_signals() {
        let dir = tempfile::tempdir().unwrap();
        let paths = write_fixture(dir.path());

        let data = load_inputs(&paths).unwrap();
        assert_eq!(data.roster.len(), 4);
        assert_eq!(data.minutes.get("Robert Lewandowski"), 900);

        let signals = data.signals(&RiskConfig::default());
        let lewandowski = signals.signals_for("Robert Lewandowski");
        assert_eq!(lewandowski.age_risk, 1.7);
        assert_eq!(lewandowski.injury_risk, 0.0);
        assert_eq!(lewandowski.minutes_played, 900);
        // 1 * 3 + 0 + 214 / 10
        assert_eq!(signals.signals_for("Marc-André ter Stegen").injury_risk, 24.4);
    }

    #[test]
    fn test_generate_save_and_record_match() {
        let dir = tempfile::tempdir().unwrap();
        let paths = write_fixture(dir.path());

        // ter Stegen is still recovering on this date
        let date = NaiveDate::from_ymd_opt(2024, 12, 1).unwrap();
        let (number, lineup) =
            generate_and_save(&paths, date, &formation(), &RiskConfig::default()).unwrap();
        assert_eq!(number, 1);
        assert_eq!(lineup.player_for("Goalkeeper"), Some("Iñaki Peña"));
        // 900 minutes of fatigue outweigh Lewandowski's form
        assert_eq!(lineup.player_for("Striker"), Some("Ferran Torres"));

        let saved = read_lineups(&paths.lineups).unwrap();
        assert_eq!(saved.len(), 1);
        assert!(saved[0].starts_with("Lineup 1:\nGoalkeeper: Iñaki Peña"));

        let report = MatchReport {
            first_half_added: 1,
            second_half_added: 3,
            substitutions: vec![Substitution {
                off: 7,
                on: 9,
                minute: 60,
            }],
        };
        let ledger = record_match(&paths, &lineup, &report).unwrap();
        assert_eq!(ledger.get("Iñaki Peña"), 94);
        assert_eq!(ledger.get("Ferran Torres"), 60);
        assert_eq!(ledger.get("Robert Lewandowski"), 934);
        assert_eq!(load_minutes(&paths.played_minutes).unwrap(), ledger);
    }

    #[test]
    fn test_unfillable_slot_surfaces_through_context() {
        let dir = tempfile::tempdir().unwrap();
        let paths = write_fixture(dir.path());
        let date = NaiveDate::from_ymd_opt(2024, 12, 1).unwrap();

        let err = generate_and_save(
            &paths,
            date,
            &Formation::new(["Goalkeeper", "Pivot"]),
            &RiskConfig::default(),
        )
        .unwrap_err();
        assert_eq!(
            err.downcast_ref::<LineupError>(),
            Some(&LineupError::UnfillableSlot("Pivot".to_string()))
        );
        assert!(!paths.lineups.exists());
    }

    #[test]
    fn test_data_paths_from_json() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("paths.json");
        let paths = DataPaths::in_dir("data");
        fs::write(&config, serde_json::to_string(&paths).unwrap()).unwrap();

        assert_eq!(DataPaths::from_json_file(&config).unwrap(), paths);
    }
}

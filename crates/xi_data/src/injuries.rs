//! Injury history file
//!
//! ```text
//! # Player: Marc-André ter Stegen
//! # Injury History (Last 5 Years)
//! 2024-09-23, Patellar Tendon Rupture, 214, Severe, 1800, No
//!
//! # Player: Lamine Yamal
//! No recorded injuries
//! ```

use anyhow::{Context, Result};
use chrono::NaiveDate;
use log::{debug, info};
use std::fs;
use std::path::Path;
use xi_core::{InjuryHistory, InjuryRecord, LineupError, Severity};

const PLAYER_HEADER: &str = "# Player:";
const HISTORY_HEADER: &str = "# Injury History (Last 5 Years)";
const NO_INJURIES: &str = "No recorded injuries";
const DATE_FORMAT: &str = "%Y-%m-%d";

fn malformed(line_no: usize, message: impl std::fmt::Display) -> anyhow::Error {
    LineupError::malformed(format!("line {}: {}", line_no, message)).into()
}

fn parse_record(line: &str, line_no: usize) -> Result<InjuryRecord> {
    let fields: Vec<&str> = line.splitn(6, ',').map(str::trim).collect();
    if fields.len() != 6 {
        return Err(malformed(
            line_no,
            "expected 'date, type, recovery days, severity, minutes, Yes|No'",
        ));
    }

    let date = NaiveDate::parse_from_str(fields[0], DATE_FORMAT)
        .map_err(|_| malformed(line_no, format!("invalid date '{}'", fields[0])))?;
    let recovery_days = fields[2]
        .parse::<u32>()
        .map_err(|_| malformed(line_no, format!("invalid recovery days '{}'", fields[2])))?;
    let severity = fields[3]
        .parse::<Severity>()
        .map_err(|e| malformed(line_no, e))?;
    let minutes_played = fields[4]
        .parse::<u32>()
        .map_err(|_| malformed(line_no, format!("invalid minutes '{}'", fields[4])))?;
    let recurrent = match fields[5] {
        "Yes" => true,
        "No" => false,
        other => {
            return Err(malformed(
                line_no,
                format!("recurrent must be Yes or No, got '{}'", other),
            ))
        }
    };

    let record = InjuryRecord {
        date,
        injury_type: fields[1].to_string(),
        recovery_days,
        severity,
        minutes_played,
        recurrent,
    };
    if record.recovery_end().is_none() {
        return Err(malformed(
            line_no,
            format!("recovery of {} days runs past the calendar", recovery_days),
        ));
    }
    Ok(record)
}

/// Parses injury history content.
///
/// Every `# Player:` section creates an entry, so a player with
/// `No recorded injuries` maps to an empty list.
pub fn parse_injury_history(content: &str) -> Result<InjuryHistory> {
    let mut history = InjuryHistory::new();
    let mut current: Option<String> = None;

    for (idx, raw) in content.lines().enumerate() {
        let line = raw.trim();
        let line_no = idx + 1;
        if line.is_empty() || line.starts_with("//") {
            continue;
        }

        if let Some(name) = line.strip_prefix(PLAYER_HEADER) {
            let name = name.trim();
            if name.is_empty() {
                return Err(malformed(line_no, "player header without a name"));
            }
            history.entry(name.to_string()).or_default();
            current = Some(name.to_string());
            continue;
        }
        if line.starts_with('#') || line == NO_INJURIES {
            continue;
        }

        let player = current
            .as_ref()
            .ok_or_else(|| malformed(line_no, "injury record before any player header"))?;
        let record = parse_record(line, line_no)?;
        history.entry(player.clone()).or_default().push(record);
    }

    Ok(history)
}

pub fn load_injury_history(path: &Path) -> Result<InjuryHistory> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read injury history: {}", path.display()))?;
    let history = parse_injury_history(&content)
        .with_context(|| format!("Failed to parse injury history: {}", path.display()))?;
    info!(
        "Loaded injury history for {} players from {}",
        history.len(),
        path.display()
    );
    Ok(history)
}

/// Renders one record in the file's line format.
pub fn format_record(record: &InjuryRecord) -> String {
    format!(
        "{}, {}, {}, {}, {}, {}",
        record.date.format(DATE_FORMAT),
        record.injury_type,
        record.recovery_days,
        record.severity,
        record.minutes_played,
        if record.recurrent { "Yes" } else { "No" }
    )
}

/// Inserts `record` into `content` under `player`'s section.
///
/// The record goes directly below the history header (newest first). A
/// `No recorded injuries` placeholder is replaced. Unknown players get a
/// new section at the end.
pub fn insert_record(content: &str, player: &str, record: &InjuryRecord) -> Result<String> {
    if record.injury_type.trim().is_empty() || record.injury_type.contains(',') {
        return Err(LineupError::malformed(format!(
            "injury type '{}' must be non-empty and contain no commas",
            record.injury_type
        ))
        .into());
    }

    let formatted = format_record(record);
    let mut lines: Vec<String> = content.lines().map(str::to_string).collect();
    let header = format!("{} {}", PLAYER_HEADER, player);

    match lines.iter().position(|l| l.trim() == header) {
        Some(at) => {
            let mut insert_at = at + 1;
            if lines.get(insert_at).map(|l| l.trim()) == Some(HISTORY_HEADER) {
                insert_at += 1;
            }
            if lines.get(insert_at).map(|l| l.trim()) == Some(NO_INJURIES) {
                lines[insert_at] = formatted;
            } else {
                lines.insert(insert_at, formatted);
            }
        }
        None => {
            debug!("No injury section for {}, appending one", player);
            if lines.last().map_or(false, |l| !l.trim().is_empty()) {
                lines.push(String::new());
            }
            lines.push(header);
            lines.push(HISTORY_HEADER.to_string());
            lines.push(formatted);
        }
    }

    let mut out = lines.join("\n");
    out.push('\n');
    Ok(out)
}

/// Records a new injury for `player` in the history file.
///
/// A missing file is created.
pub fn append_injury(path: &Path, player: &str, record: &InjuryRecord) -> Result<()> {
    let content = if path.exists() {
        fs::read_to_string(path)
            .with_context(|| format!("Failed to read injury history: {}", path.display()))?
    } else {
        String::new()
    };
    let updated = insert_record(&content, player, record)?;
    fs::write(path, updated)
        .with_context(|| format!("Failed to write injury history: {}", path.display()))?;
    info!("Recorded {} injury for {}", record.severity, player);
    Ok(())
}

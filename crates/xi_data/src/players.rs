//! Roster file reader
//!
//! One player per line:
//!
//! ```text
//! Marc-André ter Stegen, 1, 32, [Goalkeeper]
//! Jules Koundé, 23, 26, [Right-back, Centre-back]
//! ```
//!
//! Empty lines and lines starting with `#` or `//` are skipped.

use anyhow::{Context, Result};
use log::info;
use std::fs;
use std::path::Path;
use xi_core::{LineupError, Player, Roster};

fn parse_number<T: std::str::FromStr>(raw: &str, what: &str, line_no: usize) -> Result<T> {
    raw.trim().parse::<T>().map_err(|_| {
        LineupError::malformed(format!("line {}: invalid {} '{}'", line_no, what, raw.trim()))
            .into()
    })
}

fn parse_player(line: &str, line_no: usize) -> Result<Player> {
    let parts: Vec<&str> = line.splitn(4, ',').collect();
    if parts.len() != 4 {
        return Err(LineupError::malformed(format!(
            "line {}: expected 'name, number, age, [positions]'",
            line_no
        ))
        .into());
    }

    let positions = parts[3].trim();
    let inner = positions
        .strip_prefix('[')
        .and_then(|p| p.strip_suffix(']'))
        .ok_or_else(|| {
            LineupError::malformed(format!(
                "line {}: positions must be a bracketed list, got '{}'",
                line_no, positions
            ))
        })?;

    Ok(Player {
        name: parts[0].trim().to_string(),
        number: parse_number(parts[1], "jersey number", line_no)?,
        age: parse_number(parts[2], "age", line_no)?,
        positions: inner
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect(),
    })
}

/// Parses roster file content.
pub fn parse_players(content: &str) -> Result<Roster> {
    let mut players = Vec::new();
    for (idx, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with("//") {
            continue;
        }
        players.push(parse_player(line, idx + 1)?);
    }
    Ok(Roster::new(players)?)
}

pub fn load_players(path: &Path) -> Result<Roster> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read players file: {}", path.display()))?;
    let roster = parse_players(&content)
        .with_context(|| format!("Failed to parse players file: {}", path.display()))?;
    info!("Loaded {} players from {}", roster.len(), path.display());
    Ok(roster)
}

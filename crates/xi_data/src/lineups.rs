//! Saved lineups, appended one block per generated lineup
//!
//! ```text
//! Lineup 1:
//! Goalkeeper: Marc-André ter Stegen
//! Striker: Robert Lewandowski
//!
//! ```

use anyhow::{Context, Result};
use log::{info, warn};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;
use xi_core::Lineup;

/// Saved lineup blocks in file order. A missing file reads as empty.
pub fn read_lineups(path: &Path) -> Result<Vec<String>> {
    if !path.exists() {
        warn!("No saved lineups at {}", path.display());
        return Ok(Vec::new());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read lineups file: {}", path.display()))?;
    Ok(split_blocks(&content))
}

fn split_blocks(content: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for line in content.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                blocks.push(current.join("\n"));
                current.clear();
            }
        } else {
            current.push(line.trim_end());
        }
    }
    if !current.is_empty() {
        blocks.push(current.join("\n"));
    }
    blocks
}

/// Number the next saved lineup gets
pub fn next_lineup_number(path: &Path) -> Result<usize> {
    Ok(read_lineups(path)?.len() + 1)
}

/// Appends `lineup` as block `Lineup {number}:`.
pub fn save_lineup(path: &Path, lineup: &Lineup, number: usize) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open lineups file: {}", path.display()))?;
    write!(file, "Lineup {}:\n{}\n", number, lineup)
        .with_context(|| format!("Failed to write lineups file: {}", path.display()))?;
    info!("Saved lineup {} to {}", number, path.display());
    Ok(())
}

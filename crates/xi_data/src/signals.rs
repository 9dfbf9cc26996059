//! Performance and played-minutes files
//!
//! Both are two-column `name, value` files. Blank lines and `//` comments
//! are skipped.

use anyhow::{Context, Result};
use log::info;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use xi_core::{LineupError, MinutesLedger};

/// Blanks `//` comment lines; csv skips empty lines, so line numbers still
/// match the file.
fn strip_comments(content: &str) -> String {
    content
        .lines()
        .map(|line| if line.trim_start().starts_with("//") { "" } else { line })
        .collect::<Vec<_>>()
        .join("\n")
}

fn parse_pairs<T: FromStr>(content: &str, what: &str) -> Result<HashMap<String, T>> {
    let content = strip_comments(content);
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut values = HashMap::new();
    for (idx, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("Failed to read {} record", what))?;
        let line = record.position().map_or(idx as u64 + 1, |p| p.line());

        if record.len() != 2 || record[0].is_empty() {
            return Err(LineupError::malformed(format!(
                "line {}: expected 'name, {}'",
                line, what
            ))
            .into());
        }
        let value = record[1].parse::<T>().map_err(|_| {
            LineupError::malformed(format!("line {}: invalid {} '{}'", line, what, &record[1]))
        })?;
        values.insert(record[0].to_string(), value);
    }
    Ok(values)
}

/// Parses `name, score` lines.
pub fn parse_performance(content: &str) -> Result<HashMap<String, f64>> {
    parse_pairs(content, "performance")
}

/// Parses `name, minutes` lines.
pub fn parse_minutes(content: &str) -> Result<MinutesLedger> {
    Ok(parse_pairs::<u32>(content, "minutes")?.into_iter().collect())
}

pub fn load_performance(path: &Path) -> Result<HashMap<String, f64>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read performance file: {}", path.display()))?;
    let scores = parse_performance(&content)
        .with_context(|| format!("Failed to parse performance file: {}", path.display()))?;
    info!("Loaded {} performance scores", scores.len());
    Ok(scores)
}

pub fn load_minutes(path: &Path) -> Result<MinutesLedger> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read minutes file: {}", path.display()))?;
    let ledger = parse_minutes(&content)
        .with_context(|| format!("Failed to parse minutes file: {}", path.display()))?;
    info!("Loaded played minutes for {} players", ledger.len());
    Ok(ledger)
}

/// Rewrites the minutes file from `ledger`, one `name,minutes` line each.
pub fn write_minutes(path: &Path, ledger: &MinutesLedger) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("Failed to create minutes file: {}", path.display()))?;
    for (name, minutes) in ledger.iter() {
        writer.write_record([name, minutes.to_string().as_str()])?;
    }
    writer
        .flush()
        .with_context(|| format!("Failed to write minutes file: {}", path.display()))?;
    info!("Saved played minutes for {} players", ledger.len());
    Ok(())
}

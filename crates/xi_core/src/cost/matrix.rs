use crate::error::{LineupError, Result};
use serde::{Deserialize, Serialize};

/// One cell of a cost matrix.
///
/// Forbidden pairings carry the `Ineligible` tag instead of a float infinity so
/// that reduction arithmetic never touches them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum CostEntry {
    Finite(f64),
    Ineligible,
}

impl CostEntry {
    pub fn finite(self) -> Option<f64> {
        match self {
            CostEntry::Finite(v) => Some(v),
            CostEntry::Ineligible => None,
        }
    }

    pub fn is_finite(self) -> bool {
        matches!(self, CostEntry::Finite(_))
    }

    pub fn is_ineligible(self) -> bool {
        matches!(self, CostEntry::Ineligible)
    }

    /// Exact zero; only finite entries can be zero
    pub fn is_zero(self) -> bool {
        matches!(self, CostEntry::Finite(v) if v == 0.0)
    }
}

/// Rectangular row-major cost matrix (rows = players, columns = slots).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostMatrix {
    rows: usize,
    cols: usize,
    entries: Vec<CostEntry>,
}

impl CostMatrix {
    /// Builds a matrix cell by cell. `f` must not return NaN or infinite values.
    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> CostEntry) -> Self {
        let mut entries = Vec::with_capacity(rows * cols);
        for r in 0..rows {
            for c in 0..cols {
                entries.push(f(r, c));
            }
        }
        Self { rows, cols, entries }
    }

    /// Builds a matrix from nested rows, checking shape and finiteness.
    pub fn from_rows(rows: Vec<Vec<CostEntry>>) -> Result<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        let row_count = rows.len();
        let mut entries = Vec::with_capacity(row_count * cols);

        for (r, row) in rows.into_iter().enumerate() {
            if row.len() != cols {
                return Err(LineupError::malformed(format!(
                    "cost matrix row {} has {} entries, expected {}",
                    r,
                    row.len(),
                    cols
                )));
            }
            for (c, entry) in row.into_iter().enumerate() {
                if let CostEntry::Finite(v) = entry {
                    if !v.is_finite() {
                        return Err(LineupError::malformed(format!(
                            "cost matrix entry ({}, {}) is not a finite number: {}",
                            r, c, v
                        )));
                    }
                }
                entries.push(entry);
            }
        }

        Ok(Self {
            rows: row_count,
            cols,
            entries,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> CostEntry {
        self.entries[row * self.cols + col]
    }

    pub fn row(&self, row: usize) -> &[CostEntry] {
        &self.entries[row * self.cols..(row + 1) * self.cols]
    }

    pub fn column_has_finite(&self, col: usize) -> bool {
        (0..self.rows).any(|r| self.get(r, col).is_finite())
    }

    /// Sum of the finite costs of `(row, col)` pairs; ineligible pairs add nothing.
    pub fn total_cost(&self, pairs: &[(usize, usize)]) -> f64 {
        pairs.iter().filter_map(|&(r, c)| self.get(r, c).finite()).sum()
    }
}

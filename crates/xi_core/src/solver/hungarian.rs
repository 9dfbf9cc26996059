//! Hungarian (Kuhn-Munkres) minimum-cost assignment
//!
//! Works on a copy of the cost matrix padded to square with zero-cost dummy
//! columns, so every real row takes part in the reduction exactly once. The
//! dummy columns absorb the rows left out of a rectangular assignment.
//!
//! ```text
//! Reducing -> Covering -> Extracting -> Done
//!             Covering -> Adjusting  -> Covering
//! ```
//!
//! Covering derives the minimum line cover from a maximum matching over the
//! zero entries (Konig's theorem); extraction is an augmenting-path matching
//! over the same zeros. `Ineligible` entries are never zero and are never
//! touched by reduction or adjustment.

use super::matching::{BipartiteMatching, LineCover};
use crate::cost::{CostEntry, CostMatrix};
use crate::error::SolverError;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Optimal assignment of every column to a distinct row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    /// `(row, col)` pairs in ascending column order
    pairs: Vec<(usize, usize)>,
    total_cost: f64,
}

impl Assignment {
    pub fn pairs(&self) -> &[(usize, usize)] {
        &self.pairs
    }

    /// Sum of the original costs of the selected pairs
    pub fn total_cost(&self) -> f64 {
        self.total_cost
    }

    pub fn row_for_column(&self, col: usize) -> Option<usize> {
        self.pairs.iter().find(|(_, c)| *c == col).map(|(r, _)| *r)
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Solver state machine
#[derive(Debug, Clone, PartialEq)]
enum Phase {
    Reducing,
    Covering,
    Adjusting(LineCover),
    Extracting,
    Done(Vec<(usize, usize)>),
}

/// Solves the assignment problem for `matrix`.
///
/// Every column is matched to a distinct row and the total finite cost is
/// minimal. Rows beyond the column count stay unused.
pub fn solve(matrix: &CostMatrix) -> Result<Assignment, SolverError> {
    HungarianSolver::new(matrix)?.run()
}

struct HungarianSolver<'m> {
    original: &'m CostMatrix,
    /// Square working matrix of order `n`, row-major
    work: Vec<CostEntry>,
    n: usize,
    adjustments: usize,
    max_adjustments: usize,
}

impl<'m> HungarianSolver<'m> {
    fn new(original: &'m CostMatrix) -> Result<Self, SolverError> {
        let (rows, cols) = (original.rows(), original.cols());

        let finite = BipartiteMatching::maximum(rows, cols, |r, c| original.get(r, c).is_finite());
        if let Some(column) = finite.first_unmatched_col() {
            return Err(SolverError::Infeasible { column });
        }

        // Feasibility implies rows >= cols.
        let n = rows;
        let mut work = Vec::with_capacity(n * n);
        for r in 0..n {
            for c in 0..n {
                work.push(if c < cols {
                    original.get(r, c)
                } else {
                    CostEntry::Finite(0.0)
                });
            }
        }

        Ok(Self {
            original,
            work,
            n,
            adjustments: 0,
            // Each adjustment grows the alternating tree or the matching.
            max_adjustments: (n + 1) * (n + 1),
        })
    }

    fn at(&self, row: usize, col: usize) -> CostEntry {
        self.work[row * self.n + col]
    }

    fn is_zero(&self, row: usize, col: usize) -> bool {
        self.at(row, col).is_zero()
    }

    fn shift(&mut self, row: usize, col: usize, delta: f64) {
        if let CostEntry::Finite(v) = &mut self.work[row * self.n + col] {
            *v += delta;
        }
    }

    fn run(mut self) -> Result<Assignment, SolverError> {
        let mut phase = Phase::Reducing;
        loop {
            phase = match phase {
                Phase::Reducing => {
                    self.reduce_rows();
                    self.reduce_columns();
                    Phase::Covering
                }
                Phase::Covering => {
                    let cover = self.minimum_cover();
                    trace!(lines = cover.len(), order = self.n, "zero cover");
                    if cover.len() == self.n {
                        Phase::Extracting
                    } else {
                        Phase::Adjusting(cover)
                    }
                }
                Phase::Adjusting(cover) => {
                    self.adjust(&cover)?;
                    Phase::Covering
                }
                Phase::Extracting => Phase::Done(self.extract()?),
                Phase::Done(pairs) => {
                    let total_cost = self.original.total_cost(&pairs);
                    debug!(
                        rows = self.original.rows(),
                        cols = self.original.cols(),
                        adjustments = self.adjustments,
                        total_cost,
                        "assignment solved"
                    );
                    return Ok(Assignment { pairs, total_cost });
                }
            };
        }
    }

    fn reduce_rows(&mut self) {
        for r in 0..self.n {
            let min = (0..self.n).filter_map(|c| self.at(r, c).finite()).reduce(f64::min);
            if let Some(min) = min {
                for c in 0..self.n {
                    self.shift(r, c, -min);
                }
            }
        }
    }

    fn reduce_columns(&mut self) {
        for c in 0..self.n {
            let min = (0..self.n).filter_map(|r| self.at(r, c).finite()).reduce(f64::min);
            if let Some(min) = min {
                for r in 0..self.n {
                    self.shift(r, c, -min);
                }
            }
        }
    }

    fn minimum_cover(&self) -> LineCover {
        let zero = |r: usize, c: usize| self.is_zero(r, c);
        BipartiteMatching::maximum(self.n, self.n, zero).min_vertex_cover(zero)
    }

    fn adjust(&mut self, cover: &LineCover) -> Result<(), SolverError> {
        self.adjustments += 1;
        if self.adjustments > self.max_adjustments {
            return Err(SolverError::InvariantViolation(format!(
                "no optimal zero set after {} adjustments on a {}x{} matrix",
                self.max_adjustments, self.n, self.n
            )));
        }

        let mut min_uncovered: Option<f64> = None;
        for r in (0..self.n).filter(|&r| !cover.row_covered(r)) {
            for c in (0..self.n).filter(|&c| !cover.col_covered(c)) {
                if let Some(v) = self.at(r, c).finite() {
                    min_uncovered = Some(min_uncovered.map_or(v, |m| m.min(v)));
                }
            }
        }

        let delta = match min_uncovered {
            Some(v) if v > 0.0 => v,
            Some(v) => {
                return Err(SolverError::InvariantViolation(format!(
                    "uncovered entry {} is not positive; the zero cover is incomplete",
                    v
                )))
            }
            None => {
                return Err(SolverError::InvariantViolation(
                    "cover is not optimal but no finite entry is uncovered".to_string(),
                ))
            }
        };

        for r in 0..self.n {
            for c in 0..self.n {
                match (cover.row_covered(r), cover.col_covered(c)) {
                    (false, false) => self.shift(r, c, -delta),
                    (true, true) => self.shift(r, c, delta),
                    _ => {}
                }
            }
        }
        Ok(())
    }

    /// Complete zero matching restricted to the real columns.
    fn extract(&self) -> Result<Vec<(usize, usize)>, SolverError> {
        let matching = BipartiteMatching::maximum(self.n, self.n, |r, c| self.is_zero(r, c));

        let mut pairs = Vec::with_capacity(self.original.cols());
        for col in 0..self.original.cols() {
            let row = matching.row_of_col(col).ok_or_else(|| {
                SolverError::InvariantViolation(format!(
                    "optimal cover found but column {} has no zero to extract",
                    col
                ))
            })?;
            if self.original.get(row, col).is_ineligible() {
                return Err(SolverError::InvariantViolation(format!(
                    "extraction selected ineligible pair ({}, {})",
                    row, col
                )));
            }
            pairs.push((row, col));
        }
        Ok(pairs)
    }
}

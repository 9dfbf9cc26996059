use thiserror::Error;

/// Errors that abort a lineup-generation call.
///
/// None of these are recovered internally: there is no partial lineup.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LineupError {
    /// No available, eligible player for a required slot.
    #[error("No players available for position: {0}")]
    UnfillableSlot(String),

    /// Upstream data is missing a required attribute or has the wrong shape.
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// The solver declared optimality but could not extract a complete matching.
    #[error("Assignment invariant violated: {0}")]
    AlgorithmInvariantViolation(String),
}

impl LineupError {
    pub fn malformed(detail: impl Into<String>) -> Self {
        LineupError::MalformedInput(detail.into())
    }

    /// True for errors caused by the input data rather than a solver defect.
    pub fn is_input_error(&self) -> bool {
        match self {
            LineupError::UnfillableSlot(_) => true,
            LineupError::MalformedInput(_) => true,
            LineupError::AlgorithmInvariantViolation(_) => false,
        }
    }
}

/// Errors reported by the assignment solver, in matrix-index terms.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    /// No complete finite matching exists; `column` is the first column left unmatched.
    #[error("No feasible assignment: column {column} cannot be matched")]
    Infeasible { column: usize },

    #[error("{0}")]
    InvariantViolation(String),
}

pub type Result<T> = std::result::Result<T, LineupError>;

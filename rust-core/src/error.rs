//! Error taxonomy for R-vector construction.
//!
//! None of these errors is recoverable inside the crate; they are reported to
//! the caller together with the numbers that tripped the check.

use thiserror::Error;

use crate::interfaces::Grid;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RVectorError {
    /// Input rejected before any search work starts (singular lattice, empty grid axis, ...).
    #[error("ill-formed input: {0}")]
    IllFormedInput(String),

    /// The degeneracy of a point reached the neighbor cap, so the true
    /// degeneracy may lie beyond the search.
    #[error(
        "degeneracy {degeneracy} of {context} reached the neighbor cap {n_nearest} \
         (grid {grid:?}, atol {atol:e}, max_cell {max_cell}); increase the search parameters"
    )]
    Configuration {
        context: String,
        degeneracy: usize,
        n_nearest: usize,
        grid: Grid,
        atol: f64,
        max_cell: usize,
    },

    /// Degeneracy-derived weights do not add up to the grid volume.
    #[error(
        "weight sum {sum} of {context} does not match grid volume {expected} \
         (grid {grid:?}, rtol {rtol:e})"
    )]
    InvariantViolation {
        context: String,
        sum: f64,
        expected: f64,
        grid: Grid,
        rtol: f64,
    },
}

impl RVectorError {
    pub(crate) fn ill_formed(message: impl Into<String>) -> Self {
        RVectorError::IllFormedInput(message.into())
    }
}

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, RVectorError>;

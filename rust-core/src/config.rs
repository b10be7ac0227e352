// Constants and search parameters

use serde::{Deserialize, Serialize};

use crate::error::{RVectorError, Result};

// Tolerances
pub const BASE_VECTOR_TOLERANCE: f64 = 1e-10; // For validation of lattice base matrices
pub const DEFAULT_ATOL: f64 = 1e-5; // Absolute tolerance when comparing replica distances (length units)
pub const WEIGHT_SUM_RTOL: f64 = 1e-8; // Relative tolerance of the weight-sum check

// Search extents
pub const DEFAULT_MAX_CELL: usize = 3; // Supercell shells searched beyond the home grid
pub const DEFAULT_N_NEAREST: usize = 8; // Neighbor cap; reaching it is a configuration error

/// Parameters shared by the Wigner-Seitz and MDRS searches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchParams {
    /// Absolute distance tolerance used to detect ties.
    pub atol: f64,
    /// Number of supercell shells searched on each side of the home grid.
    pub max_cell: usize,
    /// Number of nearest translations inspected per point.
    pub n_nearest: usize,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            atol: DEFAULT_ATOL,
            max_cell: DEFAULT_MAX_CELL,
            n_nearest: DEFAULT_N_NEAREST,
        }
    }
}

impl SearchParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_atol(mut self, atol: f64) -> Self {
        self.atol = atol;
        self
    }

    pub fn with_max_cell(mut self, max_cell: usize) -> Self {
        self.max_cell = max_cell;
        self
    }

    pub fn with_n_nearest(mut self, n_nearest: usize) -> Self {
        self.n_nearest = n_nearest;
        self
    }

    /// Reject parameter combinations under which no search can succeed.
    pub fn validate(&self) -> Result<()> {
        if !self.atol.is_finite() || self.atol <= 0.0 {
            return Err(RVectorError::ill_formed(format!(
                "tolerance must be positive and finite, got {}",
                self.atol
            )));
        }
        if self.max_cell == 0 {
            return Err(RVectorError::ill_formed(
                "max_cell must be at least 1 to search beyond the home grid",
            ));
        }
        if self.n_nearest == 0 {
            return Err(RVectorError::ill_formed("neighbor cap must be at least 1"));
        }
        Ok(())
    }
}

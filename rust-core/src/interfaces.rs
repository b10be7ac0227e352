// Definitions that are used throughout all modules

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Integer lattice translation in fractional coordinates.
pub type TranslationPoint = Vector3<i32>;

/// Number of reciprocal-space samples along each axis.
pub type Grid = [usize; 3];

// Enumeration to track the coordinate frame of a real-space vector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Space {
    Fractional,
    Cartesian,
}

/// Product of the grid dimensions, i.e. the expected sum of R-vector weights.
pub fn grid_volume(grid: Grid) -> usize {
    grid.iter().product()
}

// Weight-consistency checks

use crate::config::WEIGHT_SUM_RTOL;
use crate::error::{RVectorError, Result};
use crate::interfaces::{grid_volume, Grid};
use crate::rvectors::wigner_seitz::RVectorSet;

/// Sum of inverse degeneracies.
pub fn weight_sum(degeneracies: &[usize]) -> f64 {
    degeneracies.iter().map(|&d| 1.0 / d as f64).sum()
}

/// Verify that the weights of `rvectors` add up to the grid volume.
pub fn check_weights(rvectors: &RVectorSet) -> Result<()> {
    check_weight_sum(
        weight_sum(rvectors.degeneracies()),
        rvectors.grid(),
        "Wigner-Seitz R-vectors",
    )
}

pub(crate) fn check_weight_sum(sum: f64, grid: Grid, context: &str) -> Result<()> {
    let expected = grid_volume(grid) as f64;
    if (sum - expected).abs() > WEIGHT_SUM_RTOL * expected {
        return Err(RVectorError::InvariantViolation {
            context: context.to_string(),
            sum,
            expected,
            grid,
            rtol: WEIGHT_SUM_RTOL,
        });
    }
    Ok(())
}

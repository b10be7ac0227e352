// Supercell generation: replicas of an integer point set over integer cell ranges

use std::collections::HashSet;
use std::ops::RangeInclusive;

use crate::error::{RVectorError, Result};
use crate::interfaces::{Grid, TranslationPoint};

/// Per-axis range of cell indices, in units of the corresponding stride.
pub type CellRanges = [RangeInclusive<i32>; 3];

/// Replicate `points` over the Cartesian product of `ranges`.
///
/// Every point `p + (i*stride_x, j*stride_y, k*stride_z)` is returned together
/// with the applied translation, in the same order. Cells are visited with the
/// last axis varying fastest and, inside each cell, in the order of `points`.
/// No deduplication is performed. Coordinates that do not fit in `i32` are
/// reported as ill-formed input.
pub fn make_supercell(
    points: &[TranslationPoint],
    ranges: &CellRanges,
    stride: [i32; 3],
) -> Result<(Vec<TranslationPoint>, Vec<TranslationPoint>)> {
    let n_cells: usize = ranges.iter().map(|r| r.clone().count()).product();
    let mut supercell = Vec::with_capacity(n_cells * points.len());
    let mut translations = Vec::with_capacity(n_cells * points.len());

    for i in ranges[0].clone() {
        for j in ranges[1].clone() {
            for k in ranges[2].clone() {
                let translation = checked_translation([i, j, k], stride).ok_or_else(|| {
                    RVectorError::ill_formed(format!(
                        "supercell translation ({i}, {j}, {k}) x {stride:?} overflows i32"
                    ))
                })?;
                for point in points {
                    let shifted = checked_sum(point, &translation).ok_or_else(|| {
                        RVectorError::ill_formed(format!(
                            "point {:?} shifted by {:?} overflows i32",
                            point.as_slice(),
                            translation.as_slice()
                        ))
                    })?;
                    supercell.push(shifted);
                    translations.push(translation);
                }
            }
        }
    }

    Ok((supercell, translations))
}

fn checked_translation(cell: [i32; 3], stride: [i32; 3]) -> Option<TranslationPoint> {
    Some(TranslationPoint::new(
        cell[0].checked_mul(stride[0])?,
        cell[1].checked_mul(stride[1])?,
        cell[2].checked_mul(stride[2])?,
    ))
}

fn checked_sum(a: &TranslationPoint, b: &TranslationPoint) -> Option<TranslationPoint> {
    Some(TranslationPoint::new(
        a.x.checked_add(b.x)?,
        a.y.checked_add(b.y)?,
        a.z.checked_add(b.z)?,
    ))
}

/// Symmetric cell range `-max_cell..=max_cell` on every axis.
pub fn search_ranges(max_cell: usize) -> Result<CellRanges> {
    let m = i32::try_from(max_cell)
        .map_err(|_| RVectorError::ill_formed(format!("max_cell too large: {max_cell}")))?;
    Ok([-m..=m, -m..=m, -m..=m])
}

/// One lattice point per grid sample: `[0, grid)` on every axis.
pub fn home_points(stride: [i32; 3]) -> Result<Vec<TranslationPoint>> {
    let ranges = [0..=stride[0] - 1, 0..=stride[1] - 1, 0..=stride[2] - 1];
    Ok(make_supercell(&[TranslationPoint::zeros()], &ranges, [1, 1, 1])?.0)
}

/// Check the grid and convert it to integer strides.
pub fn grid_stride(grid: Grid) -> Result<[i32; 3]> {
    let mut stride = [0_i32; 3];
    for (axis, (&n, s)) in grid.iter().zip(stride.iter_mut()).enumerate() {
        if n == 0 {
            return Err(RVectorError::ill_formed(format!(
                "grid dimension {axis} must be positive, got grid {grid:?}"
            )));
        }
        *s = i32::try_from(n).map_err(|_| {
            RVectorError::ill_formed(format!("grid dimension {axis} too large: {n}"))
        })?;
    }
    Ok(stride)
}

/// Sort into canonical order: ascending by x, then y, then z (z varies fastest).
pub fn sort_points(points: &mut [TranslationPoint]) {
    points.sort_by_key(|p| (p.x, p.y, p.z));
}

/// Drop repeated points, keeping the first occurrence of each.
pub fn unique_points(points: &[TranslationPoint]) -> Vec<TranslationPoint> {
    let mut seen = HashSet::with_capacity(points.len());
    points.iter().filter(|p| seen.insert(**p)).copied().collect()
}

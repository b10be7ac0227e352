// Minimal-distance replica selection (MDRS)
//
// For every ordered pair of localized functions (m, n) and every R-vector,
// the coarse translation R is refined into the supercell translations T for
// which the separation `center[n] + R + T - center[m]` lies in the
// Wigner-Seitz cell of the origin.

use std::sync::Arc;

use log::{debug, info, warn};
use nalgebra::{Matrix3, Vector3};
use serde::{Deserialize, Serialize};

use crate::config::SearchParams;
use crate::error::{RVectorError, Result};
use crate::interfaces::{Grid, TranslationPoint};
use crate::lattice::supercell::{grid_stride, make_supercell, search_ranges};
use crate::rvectors::spatial_index::{Neighbor, TranslationSearch};
use crate::rvectors::wigner_seitz::{build_ws_rvectors, within, RVectorSet};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Refined translations for every `(m, n, r)` cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefinedTranslationSet {
    rvectors: Arc<RVectorSet>,
    centers: Vec<Vector3<f64>>,
    /// Flattened `(m, n, r)` table, r fastest.
    translations: Vec<Vec<TranslationPoint>>,
}

impl RefinedTranslationSet {
    /// The coarse R-vector set this refinement was derived from.
    pub fn rvectors(&self) -> &Arc<RVectorSet> {
        &self.rvectors
    }

    /// Function centers in fractional coordinates.
    pub fn centers(&self) -> &[Vector3<f64>] {
        &self.centers
    }

    pub fn n_wann(&self) -> usize {
        self.centers.len()
    }

    pub fn n_rvecs(&self) -> usize {
        self.rvectors.n_rvecs()
    }

    pub fn grid(&self) -> Grid {
        self.rvectors.grid()
    }

    /// Translations T accepted for the pair `(m, n)` at R-vector `r`.
    ///
    /// # Panics
    /// Panics if an index is out of range.
    pub fn translations(&self, m: usize, n: usize, r: usize) -> &[TranslationPoint] {
        &self.translations[self.cell_index(m, n, r)]
    }

    /// Number of translations accepted for `(m, n, r)`.
    pub fn degeneracy(&self, m: usize, n: usize, r: usize) -> usize {
        self.translations(m, n, r).len()
    }

    /// Weight of each translation in cell `(m, n, r)`: 1/(N_R · N_T).
    pub fn weight(&self, m: usize, n: usize, r: usize) -> f64 {
        let n_r = self.rvectors.degeneracies()[r];
        1.0 / (n_r * self.degeneracy(m, n, r)) as f64
    }

    pub fn max_degeneracy(&self) -> usize {
        self.translations.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Iterate over `((m, n, r), translations)` for every cell.
    pub fn cells(
        &self,
    ) -> impl Iterator<Item = ((usize, usize, usize), &[TranslationPoint])> + '_ {
        let (n_wann, n_rvecs) = (self.n_wann(), self.n_rvecs());
        self.translations
            .iter()
            .enumerate()
            .map(move |(i, t)| (cell_position(i, n_wann, n_rvecs), t.as_slice()))
    }

    fn cell_index(&self, m: usize, n: usize, r: usize) -> usize {
        let n_wann = self.n_wann();
        let n_rvecs = self.n_rvecs();
        assert!(
            m < n_wann && n < n_wann && r < n_rvecs,
            "cell ({m}, {n}, {r}) out of range for {n_wann} functions and {n_rvecs} R-vectors"
        );
        (m * n_wann + n) * n_rvecs + r
    }
}

fn cell_position(index: usize, n_wann: usize, n_rvecs: usize) -> (usize, usize, usize) {
    let r = index % n_rvecs;
    let pair = index / n_rvecs;
    (pair / n_wann, pair % n_wann, r)
}

/// Wigner-Seitz R-vectors plus their MDRS refinement for the given centers
/// (fractional coordinates, one per localized function).
pub fn build_mdrs_rvectors(
    lattice: &Matrix3<f64>,
    grid: Grid,
    centers: &[Vector3<f64>],
    params: &SearchParams,
) -> Result<(Arc<RVectorSet>, RefinedTranslationSet)> {
    validate_centers(centers)?;
    let rvectors = Arc::new(build_ws_rvectors(lattice, grid, params)?);
    let refined = refine_mdrs(Arc::clone(&rvectors), centers, params)?;
    Ok((rvectors, refined))
}

/// Refine an existing R-vector set for the given centers.
pub fn refine_mdrs(
    rvectors: Arc<RVectorSet>,
    centers: &[Vector3<f64>],
    params: &SearchParams,
) -> Result<RefinedTranslationSet> {
    params.validate()?;
    validate_centers(centers)?;
    warn_far_centers(centers, params.max_cell);

    let basis = rvectors.lattice();
    let grid = rvectors.grid();
    let stride = grid_stride(grid)?;

    // One extra shell so that centers drifting out of the home cell are still covered
    let (superlattice, _) = make_supercell(
        &[TranslationPoint::zeros()],
        &search_ranges(params.max_cell.saturating_add(1))?,
        stride,
    )?;
    let search = TranslationSearch::new(basis, superlattice)?;

    let n_wann = centers.len();
    let n_rvecs = rvectors.n_rvecs();
    let n_cells = n_wann * n_wann * n_rvecs;
    debug!(
        "MDRS search: {} functions, {} R-vectors, {} translations per cell",
        n_wann,
        n_rvecs,
        search.len()
    );

    let refine = |index: usize| -> Result<Vec<TranslationPoint>> {
        let (m, n, r) = cell_position(index, n_wann, n_rvecs);
        let rvector = rvectors.vectors()[r];
        let displacement = centers[n] + rvector.cast::<f64>() - centers[m];
        let accepted = refine_cell(
            &search,
            &basis.frac_to_cart(&displacement),
            params.n_nearest,
            params.atol,
        );
        if accepted.len() >= params.n_nearest {
            return Err(RVectorError::Configuration {
                context: format!("MDRS cell (m={m}, n={n}, R={:?})", rvector.as_slice()),
                degeneracy: accepted.len(),
                n_nearest: params.n_nearest,
                grid,
                atol: params.atol,
                max_cell: params.max_cell,
            });
        }
        Ok(accepted)
    };

    #[cfg(feature = "parallel")]
    let translations = (0..n_cells)
        .into_par_iter()
        .map(refine)
        .collect::<Result<Vec<_>>>()?;
    #[cfg(not(feature = "parallel"))]
    let translations = (0..n_cells).map(refine).collect::<Result<Vec<_>>>()?;

    let refined = RefinedTranslationSet {
        rvectors,
        centers: centers.to_vec(),
        translations,
    };
    info!(
        "Refined {} MDRS cells (max degeneracy {})",
        n_cells,
        refined.max_degeneracy()
    );
    Ok(refined)
}

// Supercell translations T for which `displacement + T` is closest to the origin
fn refine_cell(
    search: &TranslationSearch,
    displacement: &Vector3<f64>,
    n_nearest: usize,
    atol: f64,
) -> Vec<TranslationPoint> {
    search
        .translations()
        .iter()
        .zip(search.cartesian())
        .filter(|(_, point)| {
            let neighbors = search.knn(&(*point + displacement), n_nearest);
            origin_within_nearest(&neighbors, search.origin(), atol)
        })
        .map(|(translation, _)| *translation)
        .collect()
}

/// Accept when the origin is the nearest translation, or when it appears
/// anywhere in `neighbors` at the nearest distance.
///
/// Unlike the Wigner-Seitz rule, the origin must be among the returned
/// neighbors; its distance is not recomputed directly.
pub(crate) fn origin_within_nearest(neighbors: &[Neighbor], origin: usize, atol: f64) -> bool {
    let Some(nearest) = neighbors.first() else {
        return false;
    };
    if nearest.index == origin {
        return true;
    }
    neighbors
        .iter()
        .find(|nb| nb.index == origin)
        .is_some_and(|nb| within(nb.distance, nearest.distance, atol))
}

fn validate_centers(centers: &[Vector3<f64>]) -> Result<()> {
    if centers.is_empty() {
        return Err(RVectorError::ill_formed("at least one function center is required"));
    }
    if let Some(i) = centers.iter().position(|c| c.iter().any(|x| !x.is_finite())) {
        return Err(RVectorError::ill_formed(format!(
            "center {i} has non-finite coordinates {:?}",
            centers[i].as_slice()
        )));
    }
    Ok(())
}

/// Indices of centers with a fractional coordinate more than `max_cell`
/// cells outside the home cell `[0, 1]`.
pub(crate) fn far_centers(centers: &[Vector3<f64>], max_cell: usize) -> Vec<usize> {
    let reach = max_cell as f64;
    centers
        .iter()
        .enumerate()
        .filter(|(_, center)| center.iter().any(|&x| !(-reach..=1.0 + reach).contains(&x)))
        .map(|(i, _)| i)
        .collect()
}

// Such centers push separations toward the search boundary
fn warn_far_centers(centers: &[Vector3<f64>], max_cell: usize) {
    for i in far_centers(centers, max_cell) {
        warn!(
            "Center {} at fractional {:?} lies more than {} cells outside the home cell",
            i,
            centers[i].as_slice(),
            max_cell
        );
    }
}

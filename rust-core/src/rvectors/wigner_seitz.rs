// Wigner-Seitz R-vectors
//
// The home grid is replicated over a block of supercells; every replica that
// falls in the Wigner-Seitz cell of the supercell centred at the origin
// becomes an R-vector, weighted by the number of supercell translations it is
// equally close to.

use log::{debug, info};
use nalgebra::{Matrix3, Vector3};
use serde::{Deserialize, Serialize};

use crate::config::SearchParams;
use crate::error::{RVectorError, Result};
use crate::interfaces::{Grid, TranslationPoint};
use crate::lattice::base_matrix::BaseMatrix;
use crate::lattice::supercell::{
    grid_stride, home_points, make_supercell, search_ranges, sort_points, unique_points,
};
use crate::rvectors::spatial_index::{Neighbor, TranslationSearch};
use crate::rvectors::weights::{check_weights, weight_sum};

/// R-vectors of a grid and their degeneracies.
///
/// Vectors are distinct and kept in canonical order (ascending x, then y,
/// then z). The inverse degeneracies always sum to the grid volume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RVectorSet {
    lattice: BaseMatrix,
    grid: Grid,
    vectors: Vec<TranslationPoint>,
    degeneracies: Vec<usize>,
}

impl RVectorSet {
    /// Assemble a set from precomputed vectors; the weight sum is checked.
    pub fn new(
        lattice: BaseMatrix,
        grid: Grid,
        vectors: Vec<TranslationPoint>,
        degeneracies: Vec<usize>,
    ) -> Result<Self> {
        grid_stride(grid)?;
        if vectors.len() != degeneracies.len() {
            return Err(RVectorError::ill_formed(format!(
                "{} R-vectors but {} degeneracies",
                vectors.len(),
                degeneracies.len()
            )));
        }
        if let Some(i) = degeneracies.iter().position(|&d| d == 0) {
            return Err(RVectorError::ill_formed(format!(
                "R-vector {:?} has zero degeneracy",
                vectors[i].as_slice()
            )));
        }

        let rvectors = RVectorSet {
            lattice,
            grid,
            vectors,
            degeneracies,
        };
        check_weights(&rvectors)?;
        Ok(rvectors)
    }

    pub fn lattice(&self) -> &BaseMatrix {
        &self.lattice
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn n_rvecs(&self) -> usize {
        self.vectors.len()
    }

    pub fn vectors(&self) -> &[TranslationPoint] {
        &self.vectors
    }

    pub fn degeneracies(&self) -> &[usize] {
        &self.degeneracies
    }

    /// Summation weights, 1/degeneracy.
    pub fn weights(&self) -> Vec<f64> {
        self.degeneracies.iter().map(|&d| 1.0 / d as f64).collect()
    }

    pub fn weight_sum(&self) -> f64 {
        weight_sum(&self.degeneracies)
    }

    /// R-vectors in length units.
    pub fn cartesian(&self) -> Vec<Vector3<f64>> {
        self.vectors
            .iter()
            .map(|r| self.lattice.translation_to_cart(r))
            .collect()
    }

    pub fn index_of(&self, rvector: &TranslationPoint) -> Option<usize> {
        self.vectors.iter().position(|r| r == rvector)
    }

    pub fn origin_index(&self) -> Option<usize> {
        self.index_of(&TranslationPoint::zeros())
    }

    pub fn max_degeneracy(&self) -> usize {
        self.degeneracies.iter().copied().max().unwrap_or(0)
    }

    /// Iterate over `(R, degeneracy)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&TranslationPoint, usize)> + '_ {
        self.vectors.iter().zip(self.degeneracies.iter().copied())
    }
}

/// Wigner-Seitz R-vectors for `lattice` (columns are basis vectors) sampled on `grid`.
pub fn build_ws_rvectors(
    lattice: &Matrix3<f64>,
    grid: Grid,
    params: &SearchParams,
) -> Result<RVectorSet> {
    params.validate()?;
    let basis = BaseMatrix::from_matrix(*lattice)?;
    let stride = grid_stride(grid)?;

    // 1) Home points and a block of supercells around them
    let home = home_points(stride)?;
    let (mut superlattice, translations) =
        make_supercell(&home, &search_ranges(params.max_cell)?, stride)?;
    sort_points(&mut superlattice);

    // 2) Index the distinct supercell translations
    let search = TranslationSearch::new(&basis, unique_points(&translations))?;
    debug!(
        "Wigner-Seitz search: {} home points, {} superlattice points, {} translations",
        home.len(),
        superlattice.len(),
        search.len()
    );

    // 3) Keep the replicas closest to the origin translation
    let mut vectors = Vec::new();
    let mut degeneracies = Vec::new();
    for point in &superlattice {
        let point_cart = basis.translation_to_cart(point);
        let neighbors = search.knn(&point_cart, params.n_nearest);
        let Some(degeneracy) =
            ws_degeneracy(&point_cart, &neighbors, search.origin(), params.atol)
        else {
            continue;
        };
        if degeneracy >= params.n_nearest {
            return Err(RVectorError::Configuration {
                context: format!("R-vector {:?}", point.as_slice()),
                degeneracy,
                n_nearest: params.n_nearest,
                grid,
                atol: params.atol,
                max_cell: params.max_cell,
            });
        }
        vectors.push(*point);
        degeneracies.push(degeneracy);
    }

    let rvectors = RVectorSet::new(basis, grid, vectors, degeneracies)?;
    info!(
        "Found {} Wigner-Seitz R-vectors for grid {:?} (max degeneracy {}, atol {:e}, max_cell {})",
        rvectors.n_rvecs(),
        grid,
        rvectors.max_degeneracy(),
        params.atol,
        params.max_cell
    );
    Ok(rvectors)
}

/// Degeneracy of a superlattice point, or `None` when it lies outside the
/// Wigner-Seitz cell of the origin translation.
///
/// A point whose nearest translation is not the origin is still accepted if
/// its distance to the origin matches the nearest distance.
pub(crate) fn ws_degeneracy(
    point_cart: &Vector3<f64>,
    neighbors: &[Neighbor],
    origin: usize,
    atol: f64,
) -> Option<usize> {
    let nearest = neighbors.first()?;
    if nearest.index != origin && !within(point_cart.norm(), nearest.distance, atol) {
        return None;
    }
    Some(
        neighbors
            .iter()
            .filter(|nb| within(nb.distance, nearest.distance, atol))
            .count(),
    )
}

pub(crate) fn within(a: f64, b: f64, atol: f64) -> bool {
    (a - b).abs() <= atol
}

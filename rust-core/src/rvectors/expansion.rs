// Flattening of MDRS cells into a single set of R + T vectors

use std::collections::HashMap;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::interfaces::{Grid, TranslationPoint};
use crate::lattice::base_matrix::BaseMatrix;
use crate::lattice::supercell::sort_points;
use crate::rvectors::mdrs::RefinedTranslationSet;
use crate::rvectors::weights::check_weight_sum;

/// Distinct `R + T` vectors of a refinement with per-pair weights.
///
/// `weight(m, n, k)` sums 1/(N_R · N_T) over every `(r, T)` of the pair
/// `(m, n)` that lands on vector `k`. For each pair the weights add up to
/// the grid volume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpandedRVectors {
    lattice: BaseMatrix,
    grid: Grid,
    n_wann: usize,
    vectors: Vec<TranslationPoint>,
    /// Flattened `(m, n, k)` table, k fastest.
    weights: Vec<f64>,
}

impl ExpandedRVectors {
    pub fn lattice(&self) -> &BaseMatrix {
        &self.lattice
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn n_wann(&self) -> usize {
        self.n_wann
    }

    pub fn n_rvecs(&self) -> usize {
        self.vectors.len()
    }

    pub fn vectors(&self) -> &[TranslationPoint] {
        &self.vectors
    }

    pub fn weight(&self, m: usize, n: usize, k: usize) -> f64 {
        self.pair_weights(m, n)[k]
    }

    /// Weights of every expanded vector for the pair `(m, n)`.
    pub fn pair_weights(&self, m: usize, n: usize) -> &[f64] {
        let start = (m * self.n_wann + n) * self.vectors.len();
        &self.weights[start..start + self.vectors.len()]
    }

    pub fn index_of(&self, vector: &TranslationPoint) -> Option<usize> {
        self.vectors.iter().position(|v| v == vector)
    }
}

impl RefinedTranslationSet {
    /// Collect every `R + T` into one canonical set of vectors.
    pub fn expand(&self) -> Result<ExpandedRVectors> {
        let rvectors = self.rvectors();

        let mut vectors: Vec<TranslationPoint> = self
            .cells()
            .flat_map(|((_, _, r), translations)| {
                let rvector = rvectors.vectors()[r];
                translations.iter().map(move |t| rvector + t)
            })
            .collect();
        sort_points(&mut vectors);
        vectors.dedup();

        let lookup: HashMap<TranslationPoint, usize> =
            vectors.iter().enumerate().map(|(k, v)| (*v, k)).collect();

        let n_wann = self.n_wann();
        let n_expanded = vectors.len();
        let mut weights = vec![0.0; n_wann * n_wann * n_expanded];
        for ((m, n, r), translations) in self.cells() {
            let rvector = rvectors.vectors()[r];
            let weight = self.weight(m, n, r);
            let offset = (m * n_wann + n) * n_expanded;
            for t in translations {
                weights[offset + lookup[&(rvector + t)]] += weight;
            }
        }

        for m in 0..n_wann {
            for n in 0..n_wann {
                let offset = (m * n_wann + n) * n_expanded;
                let sum: f64 = weights[offset..offset + n_expanded].iter().sum();
                check_weight_sum(sum, self.grid(), &format!("expanded MDRS pair ({m}, {n})"))?;
            }
        }

        debug!(
            "Expanded {} R-vectors into {} MDRS vectors",
            rvectors.n_rvecs(),
            n_expanded
        );
        Ok(ExpandedRVectors {
            lattice: rvectors.lattice().clone(),
            grid: self.grid(),
            n_wann,
            vectors,
            weights,
        })
    }
}

// Static k-nearest-neighbor search over lattice translations

use std::fmt;
use std::num::NonZeroUsize;

use kiddo::{ImmutableKdTree, SquaredEuclidean};
use log::debug;
use nalgebra::Vector3;

use crate::error::{RVectorError, Result};
use crate::interfaces::TranslationPoint;
use crate::lattice::base_matrix::BaseMatrix;

// Relative widening of the k-th radius so that ties at the cutoff are all collected
const RADIUS_SLACK: f64 = 1e-9;

/// One hit of a nearest-neighbor query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    /// Insertion index of the candidate point.
    pub index: usize,
    /// Euclidean distance to the query point.
    pub distance: f64,
}

/// k-d tree over a fixed set of Cartesian points.
///
/// Queries return hits sorted by ascending distance; equal distances are
/// ordered by insertion index, so results do not depend on tree shape.
pub struct SpatialIndex {
    points: Vec<Vector3<f64>>,
    tree: Option<ImmutableKdTree<f64, 3>>,
}

impl fmt::Debug for SpatialIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpatialIndex")
            .field("len", &self.points.len())
            .finish()
    }
}

impl SpatialIndex {
    pub fn new(points: Vec<Vector3<f64>>) -> Self {
        let tree = if points.is_empty() {
            None
        } else {
            let entries: Vec<[f64; 3]> = points.iter().map(|p| [p.x, p.y, p.z]).collect();
            Some(ImmutableKdTree::new_from_slice(&entries))
        };
        SpatialIndex { points, tree }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Vector3<f64>] {
        &self.points
    }

    /// The `k` candidates closest to `query`; `k` is clamped to the candidate count.
    pub fn knn(&self, query: &Vector3<f64>, k: usize) -> Vec<Neighbor> {
        let k = k.min(self.points.len());
        let (Some(tree), Some(max_qty)) = (&self.tree, NonZeroUsize::new(k)) else {
            return Vec::new();
        };
        let entry = [query.x, query.y, query.z];

        // The tree orders ties arbitrarily: take the k-th distance, collect
        // everything inside it, then order by (distance, index) ourselves
        let kth = tree
            .nearest_n::<SquaredEuclidean>(&entry, max_qty)
            .iter()
            .map(|nb| nb.distance)
            .fold(0.0_f64, f64::max);
        let radius = kth + RADIUS_SLACK * kth.max(1.0);

        let mut hits: Vec<(f64, usize)> = tree
            .within_unsorted::<SquaredEuclidean>(&entry, radius)
            .into_iter()
            .map(|nb| {
                let index = nb.item as usize;
                ((self.points[index] - query).norm_squared(), index)
            })
            .collect();
        hits.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        hits.truncate(k);

        hits.into_iter()
            .map(|(d2, index)| Neighbor {
                index,
                distance: d2.sqrt(),
            })
            .collect()
    }

    /// Closest candidate, if any.
    pub fn nearest(&self, query: &Vector3<f64>) -> Option<Neighbor> {
        self.knn(query, 1).into_iter().next()
    }
}

/// Lattice translations together with their Cartesian index.
///
/// Both the Wigner-Seitz assigner and the MDRS refiner classify points by
/// the translation they are closest to; this bundles the integer
/// translations, the index over their Cartesian images and the position of
/// the zero translation.
#[derive(Debug)]
pub struct TranslationSearch {
    translations: Vec<TranslationPoint>,
    index: SpatialIndex,
    origin: usize,
}

impl TranslationSearch {
    pub fn new(basis: &BaseMatrix, translations: Vec<TranslationPoint>) -> Result<Self> {
        let origin = translations
            .iter()
            .position(|t| *t == TranslationPoint::zeros())
            .ok_or_else(|| {
                RVectorError::ill_formed("translation set does not contain the origin")
            })?;

        let cartesian = translations
            .iter()
            .map(|t| basis.translation_to_cart(t))
            .collect();
        let index = SpatialIndex::new(cartesian);
        debug!(
            "Built translation index over {} points (origin at {})",
            index.len(),
            origin
        );

        Ok(TranslationSearch {
            translations,
            index,
            origin,
        })
    }

    pub fn translations(&self) -> &[TranslationPoint] {
        &self.translations
    }

    /// Cartesian images of the translations, in the same order.
    pub fn cartesian(&self) -> &[Vector3<f64>] {
        self.index.points()
    }

    /// Index of the zero translation.
    pub fn origin(&self) -> usize {
        self.origin
    }

    pub fn len(&self) -> usize {
        self.translations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.translations.is_empty()
    }

    pub fn knn(&self, query: &Vector3<f64>, k: usize) -> Vec<Neighbor> {
        self.index.knn(query, k)
    }
}

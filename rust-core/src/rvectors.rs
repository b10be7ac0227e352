//! R-vector construction for Wannier interpolation.
//!
//! - [`build_ws_rvectors`] assigns the replicas of the home grid to the
//!   Wigner-Seitz cell of the supercell and weights them by degeneracy.
//! - [`build_mdrs_rvectors`] / [`refine_mdrs`] refine every R-vector per pair
//!   of localized functions, taking their centers into account.
//! - [`RefinedTranslationSet::expand`] flattens a refinement into one set of
//!   `R + T` vectors.

// ======================== MODULE DECLARATIONS ========================
pub mod expansion;
pub mod mdrs;
pub mod spatial_index;
pub mod weights;
pub mod wigner_seitz;


// ======================== RE-EXPORTED PUBLIC API (curated) ========================
pub use expansion::ExpandedRVectors;
pub use mdrs::{build_mdrs_rvectors, refine_mdrs, RefinedTranslationSet};
pub use spatial_index::{Neighbor, SpatialIndex, TranslationSearch};
pub use weights::{check_weights, weight_sum};
pub use wigner_seitz::{build_ws_rvectors, RVectorSet};

//! Real-space R-vectors for Wannier interpolation
//!
//! Given a lattice and the reciprocal-space grid a quantity was sampled on,
//! this library finds the lattice translations needed to Fourier-interpolate
//! that quantity to arbitrary k-points: the Wigner-Seitz R-vectors with their
//! degeneracy weights, and their minimal-distance replica (MDRS) refinement
//! for pairs of localized functions.
//!
//! ```
//! use nalgebra::Matrix3;
//! use wannier_rvectors::{build_ws_rvectors, SearchParams};
//!
//! let lattice = Matrix3::from_diagonal_element(1.0);
//! let rvectors = build_ws_rvectors(&lattice, [3, 3, 3], &SearchParams::default()).unwrap();
//! assert_eq!(rvectors.n_rvecs(), 27);
//! ```

pub mod config;
pub mod error;
pub mod interfaces;
pub mod lattice;
pub mod rvectors;

pub use config::SearchParams;
pub use error::{RVectorError, Result};
pub use interfaces::{grid_volume, Grid, Space, TranslationPoint};
pub use lattice::BaseMatrix;
pub use rvectors::{
    build_mdrs_rvectors, build_ws_rvectors, refine_mdrs, ExpandedRVectors, RVectorSet,
    RefinedTranslationSet,
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

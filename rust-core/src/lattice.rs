//! Lattice module: validated lattice bases, standard constructors and supercell generation.
//!
//! Quick reference
//! - Types: [`BaseMatrix`]
//! - Construction: [`simple_cubic_lattice`], [`orthorhombic_lattice`], [`face_centered_cubic_lattice`],
//!   [`body_centered_cubic_lattice`], [`hexagonal_lattice`], [`triclinic_lattice`]
//! - Supercells: [`make_supercell`], [`home_points`], [`search_ranges`], [`sort_points`], [`unique_points`]

// ======================== MODULE DECLARATIONS ========================
pub mod base_matrix;
pub mod lattice_construction;
pub mod supercell;

// Test modules
mod _tests_base_matrix;
mod _tests_supercell;

// ======================== RE-EXPORTED PUBLIC API (curated) ========================
#[doc(inline)]
pub use base_matrix::BaseMatrix;

pub use lattice_construction::{
    body_centered_cubic_lattice, face_centered_cubic_lattice, hexagonal_lattice,
    orthorhombic_lattice, simple_cubic_lattice, triclinic_lattice,
};

pub use supercell::{
    grid_stride, home_points, make_supercell, search_ranges, sort_points, unique_points,
    CellRanges,
};

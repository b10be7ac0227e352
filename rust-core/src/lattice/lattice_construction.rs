use nalgebra::{Matrix3, Vector3};

use crate::error::Result;
use crate::lattice::base_matrix::BaseMatrix;

/// Standard lattice construction utilities for common 3D lattices

/// Create a simple cubic lattice with given lattice parameter
pub fn simple_cubic_lattice(a: f64) -> Result<BaseMatrix> {
    BaseMatrix::from_matrix(Matrix3::from_diagonal_element(a))
}

/// Create an orthorhombic lattice with given lattice parameters
pub fn orthorhombic_lattice(a: f64, b: f64, c: f64) -> Result<BaseMatrix> {
    BaseMatrix::from_matrix(Matrix3::new(a, 0.0, 0.0, 0.0, b, 0.0, 0.0, 0.0, c))
}

/// Create a face-centered cubic lattice (primitive cell) with conventional parameter a
pub fn face_centered_cubic_lattice(a: f64) -> Result<BaseMatrix> {
    let h = a / 2.0;
    BaseMatrix::from_base_vectors(
        Vector3::new(0.0, h, h),
        Vector3::new(h, 0.0, h),
        Vector3::new(h, h, 0.0),
    )
}

/// Create a body-centered cubic lattice (primitive cell) with conventional parameter a
pub fn body_centered_cubic_lattice(a: f64) -> Result<BaseMatrix> {
    let h = a / 2.0;
    BaseMatrix::from_base_vectors(
        Vector3::new(-h, h, h),
        Vector3::new(h, -h, h),
        Vector3::new(h, h, -h),
    )
}

/// Create a hexagonal lattice; a₁ and a₂ enclose 120°
pub fn hexagonal_lattice(a: f64, c: f64) -> Result<BaseMatrix> {
    BaseMatrix::from_base_vectors(
        Vector3::new(a, 0.0, 0.0),
        Vector3::new(-a / 2.0, a * 3.0_f64.sqrt() / 2.0, 0.0),
        Vector3::new(0.0, 0.0, c),
    )
}

/// Create a triclinic lattice from lengths and angles (radians)
pub fn triclinic_lattice(
    a: f64,
    b: f64,
    c: f64,
    alpha: f64,
    beta: f64,
    gamma: f64,
) -> Result<BaseMatrix> {
    let cx = c * beta.cos();
    let cy = c * (alpha.cos() - beta.cos() * gamma.cos()) / gamma.sin();
    // cz² may go slightly negative for impossible angle triples; the determinant check rejects those
    let cz = (c * c - cx * cx - cy * cy).max(0.0).sqrt();

    BaseMatrix::from_base_vectors(
        Vector3::new(a, 0.0, 0.0),
        Vector3::new(b * gamma.cos(), b * gamma.sin(), 0.0),
        Vector3::new(cx, cy, cz),
    )
}

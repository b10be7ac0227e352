use nalgebra::{Matrix3, Vector3};
use serde::{Deserialize, Serialize};

use crate::config::BASE_VECTOR_TOLERANCE;
use crate::error::{RVectorError, Result};
use crate::interfaces::{Space, TranslationPoint};

/// Validated real-space lattice. Columns are the basis vectors in length units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseMatrix {
    base_matrix: Matrix3<f64>,
    inverse: Matrix3<f64>,
}

impl BaseMatrix {
    pub fn from_base_vectors(
        base_1: Vector3<f64>,
        base_2: Vector3<f64>,
        base_3: Vector3<f64>,
    ) -> Result<Self> {
        Self::from_matrix(Matrix3::from_columns(&[base_1, base_2, base_3]))
    }

    pub fn from_matrix(matrix: Matrix3<f64>) -> Result<Self> {
        if matrix.iter().any(|x| !x.is_finite()) {
            return Err(RVectorError::ill_formed(format!(
                "lattice contains non-finite entries: {:?}",
                matrix.as_slice()
            )));
        }

        // Linearly non-dependent (also catches zero vectors)
        let determinant = matrix.determinant();
        if determinant.abs() < BASE_VECTOR_TOLERANCE {
            return Err(RVectorError::ill_formed(format!(
                "lattice is not invertible: determinant {determinant:e} below {BASE_VECTOR_TOLERANCE:e}"
            )));
        }

        let inverse = matrix.try_inverse().ok_or_else(|| {
            RVectorError::ill_formed(format!(
                "lattice is not invertible: determinant {determinant:e}"
            ))
        })?;

        Ok(BaseMatrix {
            base_matrix: matrix,
            inverse,
        })
    }

    pub fn base_matrix(&self) -> &Matrix3<f64> {
        &self.base_matrix
    }

    pub fn determinant(&self) -> f64 {
        self.base_matrix.determinant()
    }

    pub fn inverse(&self) -> &Matrix3<f64> {
        &self.inverse
    }

    /// Metric tensor G = A^T * A.
    pub fn metric(&self) -> Matrix3<f64> {
        self.base_matrix.transpose() * self.base_matrix
    }

    pub fn base_vectors(&self) -> [Vector3<f64>; 3] {
        [
            self.base_matrix.column(0).into(),
            self.base_matrix.column(1).into(),
            self.base_matrix.column(2).into(),
        ]
    }

    /// Convert fractional (u,v,w) coords → cartesian.
    pub fn frac_to_cart(&self, v_frac: &Vector3<f64>) -> Vector3<f64> {
        self.base_matrix * v_frac
    }

    /// Convert cartesian coords → fractional (u,v,w).
    pub fn cart_to_frac(&self, v_cart: &Vector3<f64>) -> Vector3<f64> {
        self.inverse * v_cart
    }

    /// Cartesian position of an integer lattice translation.
    pub fn translation_to_cart(&self, translation: &TranslationPoint) -> Vector3<f64> {
        self.base_matrix * translation.cast::<f64>()
    }

    /// Express a vector given in `space` in fractional coordinates.
    pub fn to_fractional(&self, v: &Vector3<f64>, space: Space) -> Vector3<f64> {
        match space {
            Space::Fractional => *v,
            Space::Cartesian => self.cart_to_frac(v),
        }
    }
}

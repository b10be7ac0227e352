#[cfg(test)]
mod _tests_base_matrix {
    use super::super::base_matrix::BaseMatrix;
    use super::super::lattice_construction::*;
    use crate::error::RVectorError;
    use crate::interfaces::{Space, TranslationPoint};
    use approx::assert_relative_eq;
    use nalgebra::{Matrix3, Vector3};
    use std::f64::consts::PI;

    const TOL: f64 = 1e-10;

    #[test]
    fn test_from_matrix_rejects_singular_lattice() {
        let singular = Matrix3::new(1.0, 2.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0);
        let result = BaseMatrix::from_matrix(singular);
        assert!(matches!(result, Err(RVectorError::IllFormedInput(_))));
    }

    #[test]
    fn test_from_matrix_rejects_non_finite_entries() {
        let mut lattice = Matrix3::identity();
        lattice[(1, 2)] = f64::NAN;
        assert!(matches!(
            BaseMatrix::from_matrix(lattice),
            Err(RVectorError::IllFormedInput(_))
        ));
    }

    #[test]
    fn test_frac_cart_roundtrip_hexagonal() {
        let basis = hexagonal_lattice(2.5, 4.0).unwrap();
        let frac = Vector3::new(0.25, -0.5, 1.5);
        let cart = basis.frac_to_cart(&frac);
        let back = basis.cart_to_frac(&cart);
        assert_relative_eq!(back, frac, epsilon = TOL);
        assert_relative_eq!(
            basis.to_fractional(&cart, Space::Cartesian),
            frac,
            epsilon = TOL
        );
        assert_eq!(basis.to_fractional(&frac, Space::Fractional), frac);
    }

    #[test]
    fn test_translation_to_cart_uses_columns() {
        let basis = orthorhombic_lattice(1.0, 2.0, 3.0).unwrap();
        let cart = basis.translation_to_cart(&TranslationPoint::new(1, -1, 2));
        assert_relative_eq!(cart, Vector3::new(1.0, -2.0, 6.0), epsilon = TOL);
    }

    #[test]
    fn test_constructor_volumes() {
        let a = 2.0;
        assert_relative_eq!(simple_cubic_lattice(a).unwrap().determinant(), 8.0, epsilon = TOL);
        assert_relative_eq!(
            face_centered_cubic_lattice(a).unwrap().determinant().abs(),
            a.powi(3) / 4.0,
            epsilon = TOL
        );
        assert_relative_eq!(
            body_centered_cubic_lattice(a).unwrap().determinant().abs(),
            a.powi(3) / 2.0,
            epsilon = TOL
        );
        assert_relative_eq!(
            hexagonal_lattice(1.0, 1.6).unwrap().determinant(),
            1.6 * 3.0_f64.sqrt() / 2.0,
            epsilon = TOL
        );
    }

    #[test]
    fn test_triclinic_metric_matches_parameters() {
        let (alpha, beta, gamma) = (80.0 * PI / 180.0, 85.0 * PI / 180.0, 95.0 * PI / 180.0);
        let basis = triclinic_lattice(1.0, 1.2, 1.4, alpha, beta, gamma).unwrap();
        let metric = basis.metric();

        assert_relative_eq!(metric[(0, 0)], 1.0, epsilon = TOL);
        assert_relative_eq!(metric[(1, 1)], 1.44, epsilon = TOL);
        assert_relative_eq!(metric[(2, 2)], 1.96, epsilon = TOL);
        assert_relative_eq!(metric[(1, 2)], 1.2 * 1.4 * alpha.cos(), epsilon = TOL);
        assert_relative_eq!(metric[(0, 2)], 1.4 * beta.cos(), epsilon = TOL);
        assert_relative_eq!(metric[(0, 1)], 1.2 * gamma.cos(), epsilon = TOL);
    }
}

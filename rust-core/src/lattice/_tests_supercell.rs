#[cfg(test)]
mod _tests_supercell {
    use super::super::supercell::*;
    use crate::error::RVectorError;
    use crate::interfaces::TranslationPoint;

    fn tp(x: i32, y: i32, z: i32) -> TranslationPoint {
        TranslationPoint::new(x, y, z)
    }

    #[test]
    fn test_make_supercell_order_last_axis_fastest() {
        let points = [tp(0, 0, 0), tp(1, 0, 0)];
        let ranges = [0..=1, 0..=0, -1..=1];
        let (supercell, translations) = make_supercell(&points, &ranges, [2, 3, 4]).unwrap();

        assert_eq!(supercell.len(), 2 * 1 * 3 * 2);
        assert_eq!(translations.len(), supercell.len());

        let expected_translations = [
            tp(0, 0, -4),
            tp(0, 0, -4),
            tp(0, 0, 0),
            tp(0, 0, 0),
            tp(0, 0, 4),
            tp(0, 0, 4),
            tp(2, 0, -4),
            tp(2, 0, -4),
            tp(2, 0, 0),
            tp(2, 0, 0),
            tp(2, 0, 4),
            tp(2, 0, 4),
        ];
        assert_eq!(translations, expected_translations);
        assert_eq!(supercell[0], tp(0, 0, -4));
        assert_eq!(supercell[1], tp(1, 0, -4));
        assert_eq!(supercell[11], tp(3, 0, 4));
    }

    #[test]
    fn test_make_supercell_keeps_duplicates() {
        let points = [tp(0, 0, 0), tp(0, 0, 0)];
        let (supercell, translations) = make_supercell(&points, &search_ranges(1).unwrap(), [1, 1, 1]).unwrap();
        assert_eq!(supercell.len(), 54);
        assert_eq!(unique_points(&translations).len(), 27);
    }

    #[test]
    fn test_home_points_cover_grid() {
        let home = home_points([2, 3, 1]).unwrap();
        assert_eq!(home.len(), 6);
        assert_eq!(home.first(), Some(&tp(0, 0, 0)));
        assert_eq!(home.last(), Some(&tp(1, 2, 0)));
    }

    #[test]
    fn test_sort_points_is_lexicographic() {
        let mut points = vec![tp(1, 0, 0), tp(0, 1, -1), tp(0, 0, 5), tp(0, 1, -2), tp(-1, 9, 9)];
        sort_points(&mut points);
        assert_eq!(
            points,
            vec![tp(-1, 9, 9), tp(0, 0, 5), tp(0, 1, -2), tp(0, 1, -1), tp(1, 0, 0)]
        );
    }

    #[test]
    fn test_unique_points_keeps_first_occurrence() {
        let points = [tp(2, 0, 0), tp(0, 0, 0), tp(2, 0, 0), tp(-2, 0, 0), tp(0, 0, 0)];
        assert_eq!(unique_points(&points), vec![tp(2, 0, 0), tp(0, 0, 0), tp(-2, 0, 0)]);
    }

    #[test]
    fn test_grid_stride_rejects_zero_dimension() {
        assert_eq!(grid_stride([4, 4, 2]).unwrap(), [4, 4, 2]);
        assert!(matches!(
            grid_stride([4, 0, 2]),
            Err(RVectorError::IllFormedInput(_))
        ));
    }

    #[test]
    fn test_search_ranges_reject_oversized_max_cell() {
        assert_eq!(search_ranges(2).unwrap(), [-2..=2, -2..=2, -2..=2]);
        let too_large = i32::MAX as usize + 1;
        assert!(matches!(
            search_ranges(too_large),
            Err(RVectorError::IllFormedInput(_))
        ));
    }

    #[test]
    fn test_make_supercell_reports_overflow() {
        let ranges = [0..=2, 0..=0, 0..=0];
        assert!(matches!(
            make_supercell(&[tp(0, 0, 0)], &ranges, [i32::MAX / 2 + 1, 1, 1]),
            Err(RVectorError::IllFormedInput(_))
        ));

        // The translation fits but the shifted point does not
        let ranges = [1..=1, 0..=0, 0..=0];
        assert!(matches!(
            make_supercell(&[tp(i32::MAX, 0, 0)], &ranges, [1, 1, 1]),
            Err(RVectorError::IllFormedInput(_))
        ));
    }
}

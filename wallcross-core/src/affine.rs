use crate::exponent::ExponentVector;
use crate::linear_system::LinearSystem;

/// Affine dimension of a point set: the rank of `p[i] - p[0]` for `i >= 1`.
/// Zero for empty and single-point sets.
pub fn affine_dimension(points: &[ExponentVector]) -> usize {
    let Some((base, rest)) = points.split_first() else {
        return 0;
    };
    if rest.is_empty() {
        return 0;
    }
    let differences: Vec<Vec<i64>> = rest
        .iter()
        .map(|p| {
            p.entries()
                .iter()
                .zip(base.entries())
                .map(|(&a, &b)| a as i64 - b as i64)
                .collect()
        })
        .collect();
    LinearSystem::from_integer_rows(&differences).rank()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(rows: &[[i64; 7]]) -> Vec<ExponentVector> {
        rows.iter()
            .map(|r| ExponentVector::new(r, 7, 3).unwrap())
            .collect()
    }

    #[test]
    fn trivial_sets_have_dimension_zero() {
        assert_eq!(affine_dimension(&[]), 0);
        assert_eq!(affine_dimension(&pts(&[[3, 0, 0, 0, 0, 0, 0]])), 0);
        assert_eq!(
            affine_dimension(&pts(&[[3, 0, 0, 0, 0, 0, 0], [3, 0, 0, 0, 0, 0, 0]])),
            0
        );
    }

    #[test]
    fn simplex_vertices_are_independent() {
        let vertices = pts(&[
            [3, 0, 0, 0, 0, 0, 0],
            [0, 3, 0, 0, 0, 0, 0],
            [0, 0, 3, 0, 0, 0, 0],
            [0, 0, 0, 3, 0, 0, 0],
            [0, 0, 0, 0, 3, 0, 0],
        ]);
        assert_eq!(affine_dimension(&vertices), 4);
    }

    #[test]
    fn barycentric_point_adds_nothing() {
        let points = pts(&[
            [3, 0, 0, 0, 0, 0, 0],
            [0, 3, 0, 0, 0, 0, 0],
            [0, 0, 3, 0, 0, 0, 0],
            [1, 1, 1, 0, 0, 0, 0],
        ]);
        assert_eq!(affine_dimension(&points), 2);
    }
}

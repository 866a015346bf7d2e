//! Scalar root selection helpers for intersection math.
//!
//! Intersection routines reduce to "smallest strictly positive parameter"
//! questions, either over the two roots of a quadratic or over the two
//! endpoints of a slab interval. Both selections live here.

/// Pick the least strictly positive value out of two.
///
/// Returns the smaller value if it is positive, otherwise the larger one
/// if it is positive, otherwise `None`. Used both for quadratic root
/// selection and for box slab-interval selection.
pub fn least_positive_from_two(a: f32, b: f32) -> Option<f32> {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };

    if lo > 0.0 {
        return Some(lo);
    }

    if hi > 0.0 {
        return Some(hi);
    }

    None
}

/// Solve `a*t^2 + b*t + c = 0` and return the least strictly positive root.
///
/// A negative discriminant means no real roots, hence `None`. Callers must
/// guard the degenerate `a == 0` case themselves: the root formula divides
/// by `a`, and a zero coefficient yields non-finite values rather than an
/// error.
pub fn least_positive_root_of_square_equation(a: f32, b: f32, c: f32) -> Option<f32> {
    let d = b * b - 4.0 * a * c;
    if d < 0.0 {
        return None;
    }

    let sd = d.sqrt();
    let x1 = (-b + sd) / (2.0 * a);
    let x2 = (-b - sd) / (2.0 * a);

    least_positive_from_two(x1, x2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_least_positive_picks_smaller_positive() {
        assert_relative_eq!(least_positive_from_two(3.0, 2.0).unwrap(), 2.0);
        assert_relative_eq!(least_positive_from_two(2.0, 3.0).unwrap(), 2.0);
    }

    #[test]
    fn test_least_positive_falls_back_to_larger() {
        assert_relative_eq!(least_positive_from_two(-1.0, 4.0).unwrap(), 4.0);
    }

    #[test]
    fn test_least_positive_rejects_non_positive() {
        assert!(least_positive_from_two(-2.0, -1.0).is_none());
        assert!(least_positive_from_two(0.0, 0.0).is_none());
        // Zero is not strictly positive; the other endpoint still counts.
        assert_relative_eq!(least_positive_from_two(0.0, 5.0).unwrap(), 5.0);
    }

    #[test]
    fn test_quadratic_both_roots_positive() {
        // (t - 2)(t - 5) = t^2 - 7t + 10
        let t = least_positive_root_of_square_equation(1.0, -7.0, 10.0).unwrap();
        assert_relative_eq!(t, 2.0, epsilon = 1e-6);
    }

    #[test]
    fn test_quadratic_one_root_positive() {
        // (t + 2)(t - 5) = t^2 - 3t - 10
        let t = least_positive_root_of_square_equation(1.0, -3.0, -10.0).unwrap();
        assert_relative_eq!(t, 5.0, epsilon = 1e-6);
    }

    #[test]
    fn test_quadratic_no_real_roots() {
        assert!(least_positive_root_of_square_equation(1.0, 0.0, 1.0).is_none());
    }

    #[test]
    fn test_quadratic_both_roots_negative() {
        // (t + 2)(t + 5) = t^2 + 7t + 10
        assert!(least_positive_root_of_square_equation(1.0, 7.0, 10.0).is_none());
    }

    #[test]
    fn test_quadratic_degenerate_leading_coefficient() {
        // a == 0 is a documented caller contract: the division by a
        // produces non-finite roots instead of an error or a linear solve.
        let t = least_positive_root_of_square_equation(0.0, 0.0, -1.0);
        assert!(t.map_or(true, |v| !v.is_finite()));
    }
}

// Copyright 2026 the Flatshadow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Common mathematical operations

use arrayvec::ArrayVec;

/// Relative magnitude below which a leading coefficient counts as zero.
///
/// The leading coefficient is compared against the largest of the remaining
/// coefficients, so the threshold is independent of the coordinate scale.
pub const COEFF_EPSILON: f64 = 1e-12;

/// Relative magnitude below which a discriminant counts as zero.
pub const DISCRIMINANT_EPSILON: f64 = 1e-12;

/// Real cube root with the sign tracked explicitly.
///
/// The cube root of a negative value is the negation of the cube root of its
/// magnitude, so no complex intermediate is ever formed.
#[inline]
pub fn real_cbrt(x: f64) -> f64 {
    x.abs().cbrt().copysign(x)
}

/// Find the root of a linear equation.
///
/// Return the value of t for which c t + d = 0. When `c` is zero the
/// equation is either inconsistent or satisfied by every t; both cases yield
/// `None`, as neither gives a usable parameter.
#[inline]
pub fn solve_linear(c: f64, d: f64) -> Option<f64> {
    if c == 0.0 {
        return None;
    }
    let root = -d / c;
    root.is_finite().then_some(root)
}

/// Find real roots of a quadratic equation.
///
/// Return values of t for which b t² + c t + d = 0, in ascending order.
///
/// The degree is detected here: if `b` is negligible next to `c` and `d`,
/// the equation is solved as linear. A discriminant that is zero within
/// [`DISCRIMINANT_EPSILON`] yields a single (double) root.
pub fn solve_quadratic(b: f64, c: f64, d: f64) -> ArrayVec<f64, 2> {
    let mut result = ArrayVec::new();
    let scale = c.abs().max(d.abs());
    if b.abs() <= COEFF_EPSILON * scale {
        result.extend(solve_linear(c, d));
        return result;
    }
    let c2 = c * c;
    let bd4 = 4.0 * b * d;
    let disc = c2 - bd4;
    if disc.abs() <= DISCRIMINANT_EPSILON * c2.max(bd4.abs()) {
        result.push(-0.5 * c / b);
        return result;
    }
    if disc < 0.0 {
        return result;
    }
    // See https://math.stackexchange.com/questions/866331
    let q = -0.5 * (c + disc.sqrt().copysign(c));
    let root1 = q / b;
    let root2 = d / q;
    if root1 <= root2 {
        result.push(root1);
        result.push(root2);
    } else {
        result.push(root2);
        result.push(root1);
    }
    result.retain(|t| t.is_finite());
    result
}

/// Find real roots of a cubic equation.
///
/// Return values of t for which a t³ + b t² + c t + d = 0, in ascending
/// order and not restricted to any domain.
///
/// The caller does not need to classify the degree: a negligible `a` falls
/// back to [`solve_quadratic`], which in turn falls back to the linear case.
///
/// The cubic is normalized to monic form and depressed (t = x − b/3a). The
/// sign of the discriminant Δ = (q/2)² + (p/3)³ selects the method:
///
/// - Δ > 0: one real root, from Cardano's formula using [`real_cbrt`].
/// - Δ ≈ 0: a double root and a simple root (or one triple root).
/// - Δ < 0: three distinct real roots, from the trigonometric form, which
///   stays in real arithmetic where Cardano's formula would need the square
///   root of a negative number.
///
/// A root that still comes out non-finite is dropped with a warning rather
/// than returned.
pub fn solve_cubic(a: f64, b: f64, c: f64, d: f64) -> ArrayVec<f64, 3> {
    let mut result = ArrayVec::new();
    let scale = b.abs().max(c.abs()).max(d.abs());
    if a.abs() <= COEFF_EPSILON * scale {
        result.extend(solve_quadratic(b, c, d));
        return result;
    }
    let (b, c, d) = (b / a, c / a, d / a);
    let shift = b * (1.0 / 3.0);
    let p = c - b * shift;
    let q = (2.0 / 27.0) * b * b * b - c * shift + d;
    let half_q = 0.5 * q;
    let third_p = p * (1.0 / 3.0);
    let q_term = half_q * half_q;
    let p_term = third_p * third_p * third_p;
    let disc = q_term + p_term;

    if disc.abs() <= DISCRIMINANT_EPSILON * q_term.max(p_term.abs()) {
        let u = real_cbrt(-half_q);
        result.push(2.0 * u - shift);
        if u != 0.0 {
            result.push(-u - shift);
        }
    } else if disc > 0.0 {
        let sq = disc.sqrt();
        let u = real_cbrt(-half_q + sq);
        let v = real_cbrt(-half_q - sq);
        result.push(u + v - shift);
    } else {
        // disc < 0 implies p < 0.
        let m = 2.0 * (-third_p).sqrt();
        let arg = ((3.0 * q) / (2.0 * p) * (-3.0 / p).sqrt()).clamp(-1.0, 1.0);
        let theta = arg.acos() * (1.0 / 3.0);
        const TWO_THIRDS_PI: f64 = 2.0 * core::f64::consts::FRAC_PI_3;
        for k in [0.0, 1.0, 2.0] {
            result.push(m * (theta - TWO_THIRDS_PI * k).cos() - shift);
        }
    }

    let before = result.len();
    result.retain(|t| t.is_finite());
    if result.len() != before {
        log::warn!(
            "monic cubic t³ + {b}t² + {c}t + {d}: dropped {} non-finite root(s)",
            before - result.len()
        );
    }
    result.sort_by(f64::total_cmp);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verify<const N: usize>(roots: ArrayVec<f64, N>, expected: &[f64]) {
        assert_eq!(expected.len(), roots.len(), "got {roots:?}, wanted {expected:?}");
        let epsilon = 1e-9;
        for (root, want) in roots.iter().zip(expected) {
            assert!(
                (root - want).abs() < epsilon,
                "got {roots:?}, wanted {expected:?}"
            );
        }
    }

    #[test]
    fn test_solve_cubic() {
        verify(solve_cubic(1.0, -6.0, 11.0, -6.0), &[1.0, 2.0, 3.0]);
        verify(solve_cubic(1.0, 0.0, 0.0, -5.0), &[5.0_f64.cbrt()]);
        verify(solve_cubic(1.0, 0.0, -1.0, -5.0), &[1.90416085913492]);
        verify(solve_cubic(1.0, 0.0, -1.0, 0.0), &[-1.0, 0.0, 1.0]);
        verify(solve_cubic(1.0, 0.0, -3.0, -2.0), &[-1.0, 2.0]);
        verify(solve_cubic(1.0, 0.0, -3.0, 2.0), &[-2.0, 1.0]);
        verify(solve_cubic(1.0, 3.0, 3.0, 1.0), &[-1.0]);
        // Leading coefficient scaled away from one.
        verify(solve_cubic(-2.0, 12.0, -22.0, 12.0), &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn cubic_degrades_to_lower_degree() {
        verify(solve_cubic(0.0, 1.0, 0.0, -4.0), &[-2.0, 2.0]);
        verify(solve_cubic(0.0, 0.0, 2.0, -1.0), &[0.5]);
        verify(solve_cubic(0.0, 0.0, 0.0, 3.0), &[]);
        verify(solve_cubic(0.0, 0.0, 0.0, 0.0), &[]);
        verify(solve_cubic(1e-20, 1.0, 0.0, -4.0), &[-2.0, 2.0]);
    }

    #[test]
    fn three_real_roots_stay_finite() {
        // Roots spread over several orders of magnitude.
        let (r0, r1, r2) = (-0.25, 0.001, 40.0);
        let b = -(r0 + r1 + r2);
        let c = r0 * r1 + r0 * r2 + r1 * r2;
        let d = -(r0 * r1 * r2);
        let roots = solve_cubic(1.0, b, c, d);
        assert_eq!(roots.len(), 3);
        for (root, want) in roots.iter().zip([r0, r1, r2]) {
            assert!((root - want).abs() < 1e-9, "{roots:?}");
        }
    }

    #[test]
    fn non_finite_roots_are_dropped() {
        // Intermediate products overflow to infinity.
        for (a, b, c, d) in [
            (1e-300, 1e300, 1e300, 1e300),
            (1e300, 1e300, 1e300, 1e300),
            (1.0, f64::MAX, f64::MAX, f64::MAX),
            (f64::MIN_POSITIVE, 1e300, -1e300, 1e300),
        ] {
            let roots = solve_cubic(a, b, c, d);
            assert!(roots.iter().all(|t| t.is_finite()), "{roots:?}");
        }
        // These turn into NaN on the way.
        verify(solve_cubic(1.0, f64::NAN, 1.0, 1.0), &[]);
        verify(solve_cubic(1.0, f64::INFINITY, 0.0, 0.0), &[]);
        verify(solve_quadratic(1e300, 1e300, 1e300), &[]);
    }

    #[test]
    fn test_solve_quadratic() {
        verify(
            solve_quadratic(1.0, 0.0, -5.0),
            &[-(5.0_f64.sqrt()), 5.0_f64.sqrt()],
        );
        verify(solve_quadratic(1.0, 0.0, 5.0), &[]);
        verify(solve_quadratic(0.0, 1.0, 5.0), &[-5.0]);
        verify(solve_quadratic(1.0, 2.0, 1.0), &[-1.0]);
        verify(solve_quadratic(2.0, -3.0, 0.0), &[0.0, 1.5]);
        verify(solve_quadratic(0.0, 0.0, 0.0), &[]);
    }

    #[test]
    fn test_solve_linear() {
        assert_eq!(solve_linear(2.0, -1.0), Some(0.5));
        assert_eq!(solve_linear(0.0, 1.0), None);
        assert_eq!(solve_linear(0.0, 0.0), None);
    }

    #[test]
    fn cube_root_tracks_sign() {
        assert_eq!(real_cbrt(-27.0), -3.0);
        assert_eq!(real_cbrt(8.0), 2.0);
        assert_eq!(real_cbrt(0.0), 0.0);
    }
}

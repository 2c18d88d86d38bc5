// Copyright 2026 the Flatshadow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cubic Bézier segments.

use core::ops::{Add, Range};

use arrayvec::ArrayVec;

use crate::common::solve_quadratic;
use crate::{Line, ParamCurve, ParamCurveArea, ParamCurveExtrema, Point, Vec2, MAX_EXTREMA};

/// Parameters closer than this to each other, or to either endpoint, are
/// considered the same parameter.
pub const T_EPSILON: f64 = 1e-9;

/// Below this size relative to the curve's coefficients, the tangent
/// equation vanishes identically: the curve is a line parallel to the
/// direction.
const PARALLEL_EPSILON: f64 = 1e-9;

/// Upper bound on the number of line pieces a single cubic flattens to.
const MAX_FLATTEN_PIECES: usize = 1 << 12;

/// A single cubic Bézier segment.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CubicBez {
    /// The start point.
    pub p0: Point,
    /// The control point leaving the start.
    pub p1: Point,
    /// The control point arriving at the end.
    pub p2: Point,
    /// The end point.
    pub p3: Point,
}

/// The monomial (power basis) form of a cubic Bézier.
///
/// P(t) = a t³ + b t² + c t + p0, component-wise.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CubicCoeffs {
    /// The cubic coefficient.
    pub a: Vec2,
    /// The quadratic coefficient.
    pub b: Vec2,
    /// The linear coefficient.
    pub c: Vec2,
    /// The constant term, which is the start point.
    pub p0: Point,
}

impl CubicCoeffs {
    /// Evaluate the polynomial at `t`.
    #[inline]
    pub fn eval(&self, t: f64) -> Point {
        self.p0 + ((self.a * t + self.b) * t + self.c) * t
    }

    /// Evaluate the derivative 3a t² + 2b t + c at `t`.
    #[inline]
    pub fn deriv_eval(&self, t: f64) -> Vec2 {
        (self.a * (3.0 * t) + self.b * 2.0) * t + self.c
    }
}

impl CubicBez {
    /// Create a new cubic Bézier segment.
    #[inline]
    pub fn new<P: Into<Point>>(p0: P, p1: P, p2: P, p3: P) -> CubicBez {
        CubicBez {
            p0: p0.into(),
            p1: p1.into(),
            p2: p2.into(),
            p3: p3.into(),
        }
    }

    /// A cubic tracing the given line, with the control points placed on
    /// the endpoints.
    #[inline]
    pub fn from_line(line: Line) -> CubicBez {
        CubicBez::new(line.p0, line.p0, line.p1, line.p1)
    }

    /// Convert to the monomial form P(t) = a t³ + b t² + c t + p0.
    ///
    /// With control points P0..P3: c = 3(P1 − P0), b = 3(P2 − P1) − c and
    /// a = P3 − P0 − c − b.
    pub fn parameterize(&self) -> CubicCoeffs {
        let c = 3.0 * (self.p1 - self.p0);
        let b = 3.0 * (self.p2 - self.p1) - c;
        let a = (self.p3 - self.p0) - c - b;
        CubicCoeffs { a, b, c, p0: self.p0 }
    }

    /// Parameters at which the tangent of the curve is parallel to `direction`.
    ///
    /// These are the points where the projection of the curve onto the
    /// perpendicular of `direction` changes monotonicity. Since the
    /// derivative is quadratic there are at most two. Only parameters
    /// strictly inside (0, 1) are reported, in increasing order, with
    /// near-duplicates (within [`T_EPSILON`]) merged. A zero or non-finite
    /// direction has no crossings.
    pub fn tangent_crossings(&self, direction: Vec2) -> ArrayVec<f64, 2> {
        let mut result = ArrayVec::new();
        if !direction.is_finite() || direction == Vec2::ZERO {
            return result;
        }
        let CubicCoeffs { a, b, c, .. } = self.parameterize();
        // Divide by the larger component; the roots are the same either way.
        let (qa, qb, qc) = if direction.x.abs() >= direction.y.abs() {
            let slope = direction.y / direction.x;
            (
                3.0 * (a.y - a.x * slope),
                2.0 * (b.y - b.x * slope),
                c.y - c.x * slope,
            )
        } else {
            let slope = direction.x / direction.y;
            (
                3.0 * (a.x - a.y * slope),
                2.0 * (b.x - b.y * slope),
                c.x - c.y * slope,
            )
        };
        let magnitude = a.hypot() + b.hypot() + c.hypot();
        if qa.abs().max(qb.abs()).max(qc.abs()) <= PARALLEL_EPSILON * magnitude {
            return result;
        }
        for t in solve_quadratic(qa, qb, qc) {
            if t <= T_EPSILON || t >= 1.0 - T_EPSILON {
                continue;
            }
            if result.last().is_some_and(|&last: &f64| t - last <= T_EPSILON) {
                continue;
            }
            result.push(t);
        }
        result
    }

    /// Is the segment a single point, within `epsilon`?
    pub fn is_degenerate(&self, epsilon: f64) -> bool {
        let eps2 = epsilon * epsilon;
        self.p0.distance_squared(self.p1) <= eps2
            && self.p0.distance_squared(self.p2) <= eps2
            && self.p0.distance_squared(self.p3) <= eps2
    }

    /// Is this cubic [finite]?
    ///
    /// [finite]: f64::is_finite
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.p0.is_finite() && self.p1.is_finite() && self.p2.is_finite() && self.p3.is_finite()
    }

    /// Number of line pieces needed to stay within `tolerance` of the curve
    /// when subdividing uniformly in `t`.
    ///
    /// This is Wang's formula: the deviation of the chord is bounded by
    /// 3/4 of the largest second difference of the control polygon divided
    /// by the square of the piece count.
    pub fn flatten_count(&self, tolerance: f64) -> usize {
        let dd0 = (self.p0.to_vec2() - 2.0 * self.p1.to_vec2() + self.p2.to_vec2()).hypot();
        let dd1 = (self.p1.to_vec2() - 2.0 * self.p2.to_vec2() + self.p3.to_vec2()).hypot();
        let n = (0.75 * dd0.max(dd1) / tolerance).sqrt().ceil();
        if n.is_nan() || n < 1.0 {
            1
        } else {
            n.min(MAX_FLATTEN_PIECES as f64) as usize
        }
    }
}

impl ParamCurve for CubicBez {
    #[inline]
    fn eval(&self, t: f64) -> Point {
        let mt = 1.0 - t;
        let v = self.p0.to_vec2() * (mt * mt * mt)
            + (self.p1.to_vec2() * (mt * mt * 3.0)
                + (self.p2.to_vec2() * (mt * 3.0) + self.p3.to_vec2() * t) * t)
                * t;
        v.to_point()
    }

    fn subsegment(&self, range: Range<f64>) -> CubicBez {
        let (t0, t1) = (range.start, range.end);
        let coeffs = self.parameterize();
        let p0 = coeffs.eval(t0);
        let p3 = coeffs.eval(t1);
        let scale = (t1 - t0) * (1.0 / 3.0);
        let p1 = p0 + scale * coeffs.deriv_eval(t0);
        let p2 = p3 - scale * coeffs.deriv_eval(t1);
        CubicBez { p0, p1, p2, p3 }
    }

    /// Split using de Casteljau's construction.
    fn split_at(&self, t: f64) -> Option<(CubicBez, CubicBez)> {
        if !(t > 0.0 && t < 1.0) {
            return None;
        }
        let p01 = self.p0.lerp(self.p1, t);
        let p12 = self.p1.lerp(self.p2, t);
        let p23 = self.p2.lerp(self.p3, t);
        let p012 = p01.lerp(p12, t);
        let p123 = p12.lerp(p23, t);
        let pm = p012.lerp(p123, t);
        Some((
            CubicBez::new(self.p0, p01, p012, pm),
            CubicBez::new(pm, p123, p23, self.p3),
        ))
    }

    #[inline]
    fn reverse(&self) -> CubicBez {
        CubicBez::new(self.p3, self.p2, self.p1, self.p0)
    }

    #[inline]
    fn start(&self) -> Point {
        self.p0
    }

    #[inline]
    fn end(&self) -> Point {
        self.p3
    }
}

impl ParamCurveArea for CubicBez {
    #[inline]
    fn signed_area(&self) -> f64 {
        (self.p0.x * (6.0 * self.p1.y + 3.0 * self.p2.y + self.p3.y)
            + 3.0
                * (self.p1.x * (-2.0 * self.p0.y + self.p2.y + self.p3.y)
                    - self.p2.x * (self.p0.y + self.p1.y - 2.0 * self.p3.y))
            - self.p3.x * (self.p0.y + 3.0 * self.p1.y + 6.0 * self.p2.y))
            * (1.0 / 20.0)
    }
}

impl ParamCurveExtrema for CubicBez {
    fn extrema(&self) -> ArrayVec<f64, MAX_EXTREMA> {
        fn one_coord(result: &mut ArrayVec<f64, MAX_EXTREMA>, a: f64, b: f64, c: f64) {
            for t in solve_quadratic(3.0 * a, 2.0 * b, c) {
                if t > 0.0 && t < 1.0 {
                    result.push(t);
                }
            }
        }
        let mut result = ArrayVec::new();
        let CubicCoeffs { a, b, c, .. } = self.parameterize();
        one_coord(&mut result, a.x, b.x, c.x);
        one_coord(&mut result, a.y, b.y, c.y);
        result.sort_by(f64::total_cmp);
        result
    }
}

/// Translate a cubic.
impl Add<Vec2> for CubicBez {
    type Output = CubicBez;

    #[inline]
    fn add(self, v: Vec2) -> CubicBez {
        CubicBez::new(self.p0 + v, self.p1 + v, self.p2 + v, self.p3 + v)
    }
}

// Copyright 2026 the Flatshadow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bézier paths (lines and cubics).

use core::iter::FromIterator;
use core::ops::Add;

use arrayvec::ArrayVec;

use crate::{CubicBez, Line, ParamCurve, ParamCurveArea, ParamCurveExtrema, Point, Rect, Vec2};

/// A Bézier path made of lines and cubics, possibly with multiple subpaths.
///
/// A valid path has `MoveTo` at the beginning of each subpath. Drawing
/// elements after a `ClosePath` continue from the start of the closed
/// subpath.
#[derive(Clone, Default, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BezPath(Vec<PathEl>);

/// The element of a Bézier path.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PathEl {
    /// Move directly to the point without drawing anything, starting a new
    /// subpath.
    MoveTo(Point),
    /// Draw a line from the current location to the point.
    LineTo(Point),
    /// Draw a cubic Bézier using the current location as the first control
    /// point.
    CurveTo(Point, Point, Point),
    /// Close off the path.
    ClosePath,
}

/// A segment of a Bézier path: one edge of an outline.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PathSeg {
    /// A line segment.
    Line(Line),
    /// A cubic Bézier segment.
    Cubic(CubicBez),
}

impl BezPath {
    /// Create a new path.
    pub fn new() -> BezPath {
        BezPath::default()
    }

    /// Create a path from a vector of path elements.
    pub fn from_vec(v: Vec<PathEl>) -> BezPath {
        BezPath(v)
    }

    /// Push a generic path element onto the path.
    pub fn push(&mut self, el: PathEl) {
        self.0.push(el);
    }

    /// Push a "move to" element onto the path.
    pub fn move_to<P: Into<Point>>(&mut self, p: P) {
        self.push(PathEl::MoveTo(p.into()));
    }

    /// Push a "line to" element onto the path.
    pub fn line_to<P: Into<Point>>(&mut self, p: P) {
        self.push(PathEl::LineTo(p.into()));
    }

    /// Push a "curve to" element onto the path.
    pub fn curve_to<P: Into<Point>>(&mut self, p1: P, p2: P, p3: P) {
        self.push(PathEl::CurveTo(p1.into(), p2.into(), p3.into()));
    }

    /// Push a "close path" element onto the path.
    pub fn close_path(&mut self) {
        self.push(PathEl::ClosePath);
    }

    /// Get the path elements.
    pub fn elements(&self) -> &[PathEl] {
        &self.0
    }

    /// Iterate over the path segments.
    ///
    /// The iterator borrows the path and can be restarted by calling this
    /// method again.
    pub fn segments(&self) -> Segments<'_> {
        Segments {
            elements: self.0.iter(),
            start: Point::ZERO,
            last: Point::ZERO,
        }
    }

    /// Returns `true` if the path contains no segments.
    pub fn is_empty(&self) -> bool {
        !self
            .0
            .iter()
            .any(|el| matches!(*el, PathEl::LineTo(..) | PathEl::CurveTo(..)))
    }

    /// Returns `true` if every coordinate in the path is finite.
    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|el| match *el {
            PathEl::MoveTo(p) | PathEl::LineTo(p) => p.is_finite(),
            PathEl::CurveTo(p1, p2, p3) => p1.is_finite() && p2.is_finite() && p3.is_finite(),
            PathEl::ClosePath => true,
        })
    }

    /// A copy of the path with every open subpath closed.
    ///
    /// Subpaths without any drawing element are dropped.
    #[must_use]
    pub fn closed(&self) -> BezPath {
        let mut result = BezPath::new();
        let mut pending: Option<Point> = None;
        let mut open = false;
        for &el in &self.0 {
            match el {
                PathEl::MoveTo(p) => {
                    if open {
                        result.close_path();
                        open = false;
                    }
                    pending = Some(p);
                }
                PathEl::LineTo(_) | PathEl::CurveTo(..) => {
                    if let Some(p) = pending.take() {
                        result.move_to(p);
                    }
                    result.push(el);
                    open = true;
                }
                PathEl::ClosePath => {
                    if open {
                        result.close_path();
                        open = false;
                    }
                }
            }
        }
        if open {
            result.close_path();
        }
        result
    }

    /// The path translated by `offset`.
    #[must_use]
    pub fn translated(&self, offset: Vec2) -> BezPath {
        self.0.iter().map(|&el| el + offset).collect()
    }

    /// Signed area of the path, summed over its subpaths.
    ///
    /// Open subpaths are treated as if closed by a straight line. The sign
    /// is positive for counter-clockwise subpaths in y-up coordinates.
    pub fn area(&self) -> f64 {
        self.closed().segments().map(|seg| seg.signed_area()).sum()
    }

    /// The smallest rectangle enclosing the path, or `None` for a path with
    /// no segments.
    pub fn bounding_box(&self) -> Option<Rect> {
        self.segments()
            .map(|seg| seg.bounding_box())
            .reduce(|acc, bbox| acc.union(bbox))
    }

    /// Approximate the path with lines.
    ///
    /// The callback receives only `MoveTo`, `LineTo` and `ClosePath`
    /// elements. Each cubic is subdivided uniformly into enough pieces to
    /// stay within `tolerance` of the curve.
    pub fn flatten(&self, tolerance: f64, mut callback: impl FnMut(PathEl)) {
        let mut start = Point::ZERO;
        let mut last = Point::ZERO;
        for &el in &self.0 {
            match el {
                PathEl::MoveTo(p) => {
                    callback(el);
                    start = p;
                    last = p;
                }
                PathEl::LineTo(p) => {
                    callback(el);
                    last = p;
                }
                PathEl::CurveTo(p1, p2, p3) => {
                    let cubic = CubicBez::new(last, p1, p2, p3);
                    let n = cubic.flatten_count(tolerance);
                    let step = (n as f64).recip();
                    for i in 1..n {
                        callback(PathEl::LineTo(cubic.eval(i as f64 * step)));
                    }
                    callback(PathEl::LineTo(p3));
                    last = p3;
                }
                PathEl::ClosePath => {
                    callback(el);
                    last = start;
                }
            }
        }
    }

    /// Split the path into one path per subpath.
    pub fn subpaths(&self) -> Vec<BezPath> {
        let mut result: Vec<BezPath> = Vec::new();
        for &el in &self.0 {
            if matches!(el, PathEl::MoveTo(_)) || result.is_empty() {
                result.push(BezPath::new());
            }
            if let Some(current) = result.last_mut() {
                current.push(el);
            }
        }
        result.retain(|path| !path.is_empty());
        result
    }
}

impl FromIterator<PathEl> for BezPath {
    fn from_iter<T: IntoIterator<Item = PathEl>>(iter: T) -> Self {
        let el_vec: Vec<_> = iter.into_iter().collect();
        BezPath::from_vec(el_vec)
    }
}

impl<'a> IntoIterator for &'a BezPath {
    type Item = PathEl;
    type IntoIter = core::iter::Cloned<core::slice::Iter<'a, PathEl>>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements().iter().cloned()
    }
}

impl Extend<PathEl> for BezPath {
    fn extend<I: IntoIterator<Item = PathEl>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

/// Translate a path element.
impl Add<Vec2> for PathEl {
    type Output = PathEl;

    #[inline]
    fn add(self, v: Vec2) -> PathEl {
        match self {
            PathEl::MoveTo(p) => PathEl::MoveTo(p + v),
            PathEl::LineTo(p) => PathEl::LineTo(p + v),
            PathEl::CurveTo(p1, p2, p3) => PathEl::CurveTo(p1 + v, p2 + v, p3 + v),
            PathEl::ClosePath => PathEl::ClosePath,
        }
    }
}

/// An iterator over the segments of a [`BezPath`].
#[derive(Clone, Debug)]
pub struct Segments<'a> {
    elements: core::slice::Iter<'a, PathEl>,
    start: Point,
    last: Point,
}

impl Iterator for Segments<'_> {
    type Item = PathSeg;

    fn next(&mut self) -> Option<PathSeg> {
        for el in &mut self.elements {
            let (ret, last) = match *el {
                PathEl::MoveTo(p) => {
                    self.start = p;
                    self.last = p;
                    continue;
                }
                PathEl::LineTo(p) => (PathSeg::Line(Line::new(self.last, p)), p),
                PathEl::CurveTo(p1, p2, p3) => {
                    (PathSeg::Cubic(CubicBez::new(self.last, p1, p2, p3)), p3)
                }
                PathEl::ClosePath => {
                    if self.last != self.start {
                        (PathSeg::Line(Line::new(self.last, self.start)), self.start)
                    } else {
                        continue;
                    }
                }
            };

            self.last = last;
            return Some(ret);
        }
        None
    }
}

impl PathSeg {
    /// The start point of the segment.
    #[inline]
    pub fn start(&self) -> Point {
        match self {
            PathSeg::Line(line) => line.p0,
            PathSeg::Cubic(cubic) => cubic.p0,
        }
    }

    /// The end point of the segment.
    #[inline]
    pub fn end(&self) -> Point {
        match self {
            PathSeg::Line(line) => line.p1,
            PathSeg::Cubic(cubic) => cubic.p3,
        }
    }

    /// The segment as a cubic.
    ///
    /// Lines become cubics with the control points on the endpoints.
    #[inline]
    pub fn to_cubic(&self) -> CubicBez {
        match *self {
            PathSeg::Line(line) => CubicBez::from_line(line),
            PathSeg::Cubic(cubic) => cubic,
        }
    }

    /// Returns `true` if every coordinate of the segment is finite.
    pub fn is_finite(&self) -> bool {
        match self {
            PathSeg::Line(line) => line.is_finite(),
            PathSeg::Cubic(cubic) => cubic.is_finite(),
        }
    }

    /// Is the segment a single point, within `epsilon`?
    pub fn is_degenerate(&self, epsilon: f64) -> bool {
        self.to_cubic().is_degenerate(epsilon)
    }

    /// Parameters strictly inside (0, 1) where the tangent is parallel to
    /// `direction`. Lines have none.
    pub fn tangent_crossings(&self, direction: Vec2) -> ArrayVec<f64, 2> {
        match self {
            PathSeg::Line(_) => ArrayVec::new(),
            PathSeg::Cubic(cubic) => cubic.tangent_crossings(direction),
        }
    }

    /// Split the segment at parameter `t`, strictly inside (0, 1).
    pub fn split_at(&self, t: f64) -> Option<(PathSeg, PathSeg)> {
        match self {
            PathSeg::Line(line) => line
                .split_at(t)
                .map(|(a, b)| (PathSeg::Line(a), PathSeg::Line(b))),
            PathSeg::Cubic(cubic) => cubic
                .split_at(t)
                .map(|(a, b)| (PathSeg::Cubic(a), PathSeg::Cubic(b))),
        }
    }

    /// The segment traversed from end to start.
    #[must_use]
    pub fn reverse(&self) -> PathSeg {
        match self {
            PathSeg::Line(line) => PathSeg::Line(line.reverse()),
            PathSeg::Cubic(cubic) => PathSeg::Cubic(cubic.reverse()),
        }
    }

    /// The path element that draws this segment from its start point.
    #[inline]
    pub fn as_path_el(&self) -> PathEl {
        match self {
            PathSeg::Line(line) => PathEl::LineTo(line.p1),
            PathSeg::Cubic(c) => PathEl::CurveTo(c.p1, c.p2, c.p3),
        }
    }

    /// The signed area under the segment.
    pub fn signed_area(&self) -> f64 {
        match self {
            PathSeg::Line(line) => line.signed_area(),
            PathSeg::Cubic(cubic) => cubic.signed_area(),
        }
    }

    /// The smallest rectangle enclosing the segment.
    pub fn bounding_box(&self) -> Rect {
        match self {
            PathSeg::Line(line) => line.bounding_box(),
            PathSeg::Cubic(cubic) => cubic.bounding_box(),
        }
    }
}

impl From<Line> for PathSeg {
    fn from(line: Line) -> PathSeg {
        PathSeg::Line(line)
    }
}

impl From<CubicBez> for PathSeg {
    fn from(cubic: CubicBez) -> PathSeg {
        PathSeg::Cubic(cubic)
    }
}

/// Translate a segment.
impl Add<Vec2> for PathSeg {
    type Output = PathSeg;

    #[inline]
    fn add(self, v: Vec2) -> PathSeg {
        match self {
            PathSeg::Line(line) => PathSeg::Line(line + v),
            PathSeg::Cubic(cubic) => PathSeg::Cubic(cubic + v),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{BezPath, CubicBez, Line, ParamCurve, PathEl, PathSeg, Point, Rect, Vec2};

    fn unit_square() -> BezPath {
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.line_to((1.0, 0.0));
        path.line_to((1.0, 1.0));
        path.line_to((0.0, 1.0));
        path.close_path();
        path
    }

    #[test]
    fn segments_include_closing_edge() {
        let path = unit_square();
        let segs: Vec<_> = path.segments().collect();
        assert_eq!(segs.len(), 4);
        assert_eq!(segs[3], PathSeg::Line(Line::new((0.0, 1.0), (0.0, 0.0))));
        for pair in segs.windows(2) {
            assert_eq!(pair[0].end(), pair[1].start());
        }
        // Restartable.
        assert_eq!(path.segments().count(), 4);
    }

    #[test]
    fn explicit_close_adds_no_extra_edge() {
        let mut path = unit_square();
        path = path.elements()[..4].iter().copied().collect();
        path.line_to((0.0, 0.0));
        path.close_path();
        assert_eq!(path.segments().count(), 4);
    }

    #[test]
    fn area_and_bbox() {
        let path = unit_square();
        assert_eq!(path.area(), 1.0);
        assert_eq!(path.bounding_box(), Some(Rect::new(0.0, 0.0, 1.0, 1.0)));
        assert_eq!(BezPath::new().bounding_box(), None);
        let moved = path.translated(Vec2::new(2.0, -1.0));
        assert_eq!(moved.bounding_box(), Some(Rect::new(2.0, -1.0, 3.0, 0.0)));
        assert_eq!(moved.area(), 1.0);
    }

    #[test]
    fn closed_closes_open_subpaths() {
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.line_to((2.0, 0.0));
        path.line_to((2.0, 2.0));
        path.move_to((5.0, 5.0));
        path.move_to((10.0, 0.0));
        path.line_to((12.0, 0.0));
        path.line_to((12.0, 2.0));
        path.close_path();
        let closed = path.closed();
        let closes = closed
            .elements()
            .iter()
            .filter(|el| matches!(el, PathEl::ClosePath))
            .count();
        assert_eq!(closes, 2);
        assert_eq!(closed.segments().count(), 6);
        assert_eq!(closed.subpaths().len(), 2);
        assert_eq!(closed.area(), 4.0);
    }

    #[test]
    fn flatten_stays_near_curve() {
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.curve_to((0.0, 10.0), (10.0, 10.0), (10.0, 0.0));
        path.close_path();
        let cubic = CubicBez::new((0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0));
        let mut points = Vec::new();
        let mut closes = 0;
        path.flatten(0.01, |el| match el {
            PathEl::MoveTo(p) | PathEl::LineTo(p) => points.push(p),
            PathEl::ClosePath => closes += 1,
            PathEl::CurveTo(..) => panic!("flatten emitted a curve"),
        });
        assert_eq!(closes, 1);
        assert!(points.len() > 10);
        assert_eq!(*points.last().unwrap(), Point::new(10.0, 0.0));
        // Chord midpoints stay within tolerance of the curve's parameter samples.
        let n = points.len() - 1;
        for (i, pair) in points.windows(2).enumerate() {
            let mid = pair[0].midpoint(pair[1]);
            let t = (i as f64 + 0.5) / n as f64;
            assert!(mid.distance(cubic.eval(t)) < 0.01);
        }
    }

    #[test]
    fn finite_check() {
        let mut path = unit_square();
        assert!(path.is_finite());
        path.line_to((f64::INFINITY, 0.0));
        assert!(!path.is_finite());
    }
}

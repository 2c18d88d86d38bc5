// Copyright 2026 the Flatshadow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Boolean operations on compound shapes.
//!
//! The shadow engine only needs union and intersection, and takes them
//! through the [`PathBoolean`] trait so that callers can plug in their own
//! clipping kernel. [`GeoBoolean`] implements the trait on top of the
//! polygon boolean operations of the [`geo`] crate.

use core::borrow::Borrow;

use geo::orient::Direction as Winding;
use geo::{
    Area, BooleanOps, BoundingRect, Contains, InteriorPoint, LineString, MultiPolygon, Orient,
    Polygon,
};

use crate::{BezPath, CompoundShape, FillRule, PathEl};

/// Union and intersection of compound shapes.
///
/// Implementations must not mutate their inputs and must return shapes that
/// are valid inputs to further calls.
pub trait PathBoolean {
    /// The region covered by `a` or `b`.
    fn union(&self, a: &CompoundShape, b: &CompoundShape) -> CompoundShape;

    /// The region covered by both `a` and `b`.
    fn intersect(&self, a: &CompoundShape, b: &CompoundShape) -> CompoundShape;
}

impl<T: PathBoolean + ?Sized> PathBoolean for &T {
    fn union(&self, a: &CompoundShape, b: &CompoundShape) -> CompoundShape {
        (**self).union(a, b)
    }

    fn intersect(&self, a: &CompoundShape, b: &CompoundShape) -> CompoundShape {
        (**self).intersect(a, b)
    }
}

/// Boolean operations through [`geo::BooleanOps`].
///
/// Curves are flattened to polylines within `tolerance` before clipping, so
/// results are made of lines only. Results use [`FillRule::NonZero`], with
/// exteriors counter-clockwise and holes clockwise (in y-up coordinates),
/// one path per polygon.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoBoolean {
    /// Maximum distance between a curve and its flattened polyline.
    pub tolerance: f64,
}

/// Default flattening tolerance of [`GeoBoolean`].
pub const DEFAULT_TOLERANCE: f64 = 1e-3;

/// Rings with an area below this fraction of their squared extent are
/// dropped.
const SLIVER_EPSILON: f64 = 1e-12;

impl Default for GeoBoolean {
    fn default() -> Self {
        GeoBoolean::new(DEFAULT_TOLERANCE)
    }
}

impl GeoBoolean {
    /// Create an adapter with the given flattening tolerance.
    pub fn new(tolerance: f64) -> GeoBoolean {
        GeoBoolean { tolerance }
    }

    /// Convert a shape to polygons, resolving its fill rule.
    pub fn to_multi_polygon(&self, shape: &CompoundShape) -> MultiPolygon<f64> {
        let polygons: Vec<Polygon<f64>> = shape
            .paths()
            .iter()
            .flat_map(|path| self.rings(path))
            .map(|ring| Polygon::new(ring, vec![]))
            .collect();
        match polygons.len() {
            0 => MultiPolygon::new(vec![]),
            1 => MultiPolygon::new(polygons).orient(Winding::Default),
            _ => match shape.fill_rule() {
                FillRule::EvenOdd => even_odd(polygons),
                FillRule::NonZero => non_zero(polygons),
            },
        }
    }

    /// Flatten each subpath of `path` into a closed ring, dropping rings
    /// that enclose nothing.
    fn rings(&self, path: &BezPath) -> Vec<LineString<f64>> {
        let mut rings = Vec::new();
        let mut current: Vec<(f64, f64)> = Vec::new();
        path.closed().flatten(self.tolerance, |el| match el {
            PathEl::MoveTo(p) => {
                finish_ring(&mut rings, core::mem::take(&mut current));
                current.push((p.x, p.y));
            }
            PathEl::LineTo(p) => {
                if current.last() != Some(&(p.x, p.y)) {
                    current.push((p.x, p.y));
                }
            }
            PathEl::ClosePath => finish_ring(&mut rings, core::mem::take(&mut current)),
            PathEl::CurveTo(..) => {}
        });
        finish_ring(&mut rings, current);
        rings
    }
}

fn finish_ring(rings: &mut Vec<LineString<f64>>, mut points: Vec<(f64, f64)>) {
    if points.len() > 1 && points.first() == points.last() {
        points.pop();
    }
    if points.len() < 3 {
        return;
    }
    let mut ring = LineString::from(points);
    ring.close();
    let area = Polygon::new(ring.clone(), vec![]).unsigned_area();
    let extent = ring
        .bounding_rect()
        .map_or(0.0, |rect| rect.width() + rect.height());
    if area <= SLIVER_EPSILON * extent * extent {
        log::trace!("dropped a sliver ring of area {area}");
        return;
    }
    rings.push(ring);
}

fn even_odd(polygons: Vec<Polygon<f64>>) -> MultiPolygon<f64> {
    let mut iter = polygons.into_iter();
    let Some(first) = iter.next() else {
        return MultiPolygon::new(vec![]);
    };
    iter.fold(MultiPolygon::new(vec![first]), |acc, polygon| {
        acc.xor(&polygon)
    })
}

/// Resolve the non-zero rule for rings that nest without crossing.
///
/// Rings are visited from the largest to the smallest. The winding number
/// just inside a ring is the sum of the orientations of the larger rings
/// containing it plus its own; a ring adds area where that number leaves
/// zero and cuts a hole where it returns to zero. Crossing rings are
/// resolved as if they did not contain each other.
fn non_zero(polygons: Vec<Polygon<f64>>) -> MultiPolygon<f64> {
    let mut keyed: Vec<(f64, Polygon<f64>)> = polygons
        .into_iter()
        .map(|polygon| (polygon.signed_area(), polygon))
        .collect();
    keyed.sort_by(|a, b| b.0.abs().total_cmp(&a.0.abs()));
    let mut acc = MultiPolygon::new(vec![]);
    for (i, (area, polygon)) in keyed.iter().enumerate() {
        let winding = if *area > 0.0 { 1 } else { -1 };
        let outside: i32 = match polygon.interior_point() {
            Some(point) => keyed[..i]
                .iter()
                .filter(|(_, larger)| larger.contains(&point))
                .map(|(larger_area, _)| if *larger_area > 0.0 { 1 } else { -1 })
                .sum(),
            None => 0,
        };
        let inside = outside + winding;
        if outside == 0 && inside != 0 {
            acc = if acc.0.is_empty() {
                MultiPolygon::new(vec![polygon.clone()])
            } else {
                acc.union(polygon)
            };
        } else if outside != 0 && inside == 0 && !acc.0.is_empty() {
            acc = acc.difference(polygon);
        }
    }
    acc.orient(Winding::Default)
}

/// Convert polygons back to line-only paths, one path per polygon.
fn from_multi_polygon(polygons: MultiPolygon<f64>) -> CompoundShape {
    let paths = polygons
        .orient(Winding::Default)
        .into_iter()
        .map(|polygon| {
            let mut path = BezPath::new();
            for ring in core::iter::once(polygon.exterior()).chain(polygon.interiors()) {
                push_ring(&mut path, ring);
            }
            path
        })
        .filter(|path| !path.is_empty())
        .collect();
    CompoundShape::from_paths(paths, FillRule::NonZero)
}

fn push_ring(path: &mut BezPath, ring: &LineString<f64>) {
    let mut coords = ring.0.as_slice();
    if ring.is_closed() && coords.len() > 1 {
        coords = &coords[..coords.len() - 1];
    }
    let [first, rest @ ..] = coords else {
        return;
    };
    if rest.len() < 2 {
        return;
    }
    path.move_to((first.x, first.y));
    for c in rest {
        path.line_to((c.x, c.y));
    }
    path.close_path();
}

impl PathBoolean for GeoBoolean {
    fn union(&self, a: &CompoundShape, b: &CompoundShape) -> CompoundShape {
        let a = self.to_multi_polygon(a);
        let b = self.to_multi_polygon(b);
        if a.0.is_empty() {
            return from_multi_polygon(b);
        }
        if b.0.is_empty() {
            return from_multi_polygon(a);
        }
        from_multi_polygon(a.union(&b))
    }

    fn intersect(&self, a: &CompoundShape, b: &CompoundShape) -> CompoundShape {
        let a = self.to_multi_polygon(a);
        let b = self.to_multi_polygon(b);
        if a.0.is_empty() || b.0.is_empty() {
            return CompoundShape::new();
        }
        from_multi_polygon(a.intersection(&b))
    }
}

/// Combine paths into one normalized shape.
///
/// Open subpaths are closed, paths without segments are dropped, and the
/// rest are unioned left to right.
pub fn combine<P: Borrow<BezPath>>(
    paths: impl IntoIterator<Item = P>,
    ctx: &impl PathBoolean,
) -> CompoundShape {
    let mut result = CompoundShape::new();
    for path in paths {
        let closed = path.borrow().closed();
        if closed.is_empty() {
            log::trace!("skipping an empty path");
            continue;
        }
        result = ctx.union(&result, &CompoundShape::from(closed));
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Rect, Vec2};

    fn square(x0: f64, y0: f64, size: f64) -> BezPath {
        Rect::new(x0, y0, x0 + size, y0 + size).to_path()
    }

    fn close_to(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn union_and_intersection_of_squares() {
        let ctx = GeoBoolean::default();
        let a = CompoundShape::from(square(0.0, 0.0, 1.0));
        let b = CompoundShape::from(square(0.5, 0.5, 1.0));
        let union = ctx.union(&a, &b);
        assert_eq!(union.paths().len(), 1);
        assert!(close_to(union.area(), 1.75), "{}", union.area());
        let both = ctx.intersect(&a, &b);
        assert!(close_to(both.area(), 0.25), "{}", both.area());
        assert_eq!(both.fill_rule(), FillRule::NonZero);
    }

    #[test]
    fn disjoint_union_keeps_both() {
        let ctx = GeoBoolean::default();
        let a = CompoundShape::from(square(0.0, 0.0, 1.0));
        let b = CompoundShape::from(square(3.0, 0.0, 1.0));
        let union = ctx.union(&a, &b);
        assert_eq!(union.paths().len(), 2);
        assert!(close_to(union.area(), 2.0));
        assert!(ctx.intersect(&a, &b).is_empty());
    }

    #[test]
    fn empty_operands() {
        let ctx = GeoBoolean::default();
        let a = CompoundShape::from(square(0.0, 0.0, 2.0));
        let empty = CompoundShape::new();
        assert!(close_to(ctx.union(&a, &empty).area(), 4.0));
        assert!(close_to(ctx.union(&empty, &a).area(), 4.0));
        assert!(ctx.intersect(&a, &empty).is_empty());
        assert!(ctx.union(&empty, &empty).is_empty());
    }

    #[test]
    fn clockwise_input_comes_out_counter_clockwise() {
        let ctx = GeoBoolean::default();
        let mut cw = BezPath::new();
        cw.move_to((0.0, 0.0));
        cw.line_to((0.0, 1.0));
        cw.line_to((1.0, 1.0));
        cw.line_to((1.0, 0.0));
        cw.close_path();
        assert!(cw.area() < 0.0);
        let result = ctx.union(&CompoundShape::from(cw), &CompoundShape::new());
        assert!(close_to(result.area(), 1.0));
    }

    #[test]
    fn fill_rules() {
        let ctx = GeoBoolean::default();
        let outer = square(0.0, 0.0, 2.0);
        let inner = square(0.5, 0.5, 1.0);
        // Both counter-clockwise: non-zero fills the inner square too.
        let same = CompoundShape::from_paths(vec![outer.clone(), inner.clone()], FillRule::NonZero);
        assert!(close_to(ctx.to_multi_polygon(&same).unsigned_area(), 4.0));
        let eo = CompoundShape::from_paths(vec![outer.clone(), inner.clone()], FillRule::EvenOdd);
        assert!(close_to(ctx.to_multi_polygon(&eo).unsigned_area(), 3.0));
        // A clockwise inner ring is a hole under non-zero.
        let mut hole = BezPath::new();
        hole.move_to((0.5, 0.5));
        hole.line_to((0.5, 1.5));
        hole.line_to((1.5, 1.5));
        hole.line_to((1.5, 0.5));
        hole.close_path();
        let holed = CompoundShape::from_paths(vec![outer, hole], FillRule::NonZero);
        let result = ctx.union(&holed, &CompoundShape::new());
        assert!(close_to(result.area(), 3.0));
        assert_eq!(result.paths().len(), 1);
        assert_eq!(result.paths()[0].subpaths().len(), 2);
    }

    #[test]
    fn island_inside_hole_survives() {
        let ctx = GeoBoolean::default();
        let outer = square(0.0, 0.0, 4.0);
        let hole: BezPath = {
            let mut hole = BezPath::new();
            hole.move_to((1.0, 1.0));
            hole.line_to((1.0, 3.0));
            hole.line_to((3.0, 3.0));
            hole.line_to((3.0, 1.0));
            hole.close_path();
            hole
        };
        let island = square(1.5, 1.5, 1.0);
        let shape = CompoundShape::from_paths(vec![island, hole, outer], FillRule::NonZero);
        let result = ctx.union(&shape, &CompoundShape::new());
        assert!(close_to(result.area(), 13.0), "{}", result.area());
        assert_eq!(result.paths().len(), 2);
    }

    #[test]
    fn opposite_winding_apart_is_filled() {
        let ctx = GeoBoolean::default();
        let mut path = square(0.0, 0.0, 2.0);
        path.move_to((5.0, 0.0));
        path.line_to((5.0, 1.0));
        path.line_to((6.0, 1.0));
        path.line_to((6.0, 0.0));
        path.close_path();
        assert!(close_to(path.area(), 3.0));
        let shape = CompoundShape::from_paths(vec![path.clone()], FillRule::NonZero);
        let result = ctx.union(&shape, &CompoundShape::new());
        assert!(close_to(result.area(), 5.0), "{}", result.area());
        assert_eq!(result.paths().len(), 2);
        let combined = combine([&path], &ctx);
        assert!(close_to(combined.area(), 5.0), "{}", combined.area());
    }

    #[test]
    fn curves_are_flattened() {
        let ctx = GeoBoolean::new(1e-4);
        let mut lens = BezPath::new();
        lens.move_to((0.0, 0.0));
        lens.curve_to((0.0, 1.0), (1.0, 1.0), (1.0, 0.0));
        lens.close_path();
        let result = ctx.union(&CompoundShape::from(lens.clone()), &CompoundShape::new());
        assert!((result.area() - lens.area().abs()).abs() < 1e-3);
    }

    #[test]
    fn combine_closes_and_merges() {
        let ctx = GeoBoolean::default();
        let mut open = BezPath::new();
        open.move_to((0.0, 0.0));
        open.line_to((2.0, 0.0));
        open.line_to((2.0, 2.0));
        let other = square(0.0, 0.0, 1.0).translated(Vec2::new(5.0, 5.0));
        let empty = BezPath::new();
        let combined = combine([&open, &empty, &other], &ctx);
        assert_eq!(combined.paths().len(), 2);
        assert!(close_to(combined.area(), 3.0));
    }
}

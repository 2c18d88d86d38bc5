// Copyright 2026 the Flatshadow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A rectangle.

use crate::{BezPath, Point};

/// A rectangle, used both for bounding boxes and for the container a shadow
/// is clipped against.
#[derive(Clone, Copy, Default, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    /// The minimum x coordinate (left edge in y-down space).
    pub x0: f64,
    /// The minimum y coordinate (top edge in y-down space).
    pub y0: f64,
    /// The maximum x coordinate (right edge in y-down space).
    pub x1: f64,
    /// The maximum y coordinate (bottom edge in y-down space).
    pub y1: f64,
}

impl Rect {
    /// A new rectangle from minimum and maximum coordinates.
    #[inline]
    pub const fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Rect {
        Rect { x0, y0, x1, y1 }
    }

    /// A new rectangle from two points.
    ///
    /// The result will have non-negative width and height.
    #[inline]
    pub fn from_points(p0: impl Into<Point>, p1: impl Into<Point>) -> Rect {
        let p0 = p0.into();
        let p1 = p1.into();
        Rect::new(p0.x, p0.y, p1.x, p1.y).abs()
    }

    /// The width of the rectangle.
    #[inline]
    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    /// The height of the rectangle.
    #[inline]
    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }

    /// The area of the rectangle.
    #[inline]
    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Take absolute value of width and height.
    #[inline]
    pub fn abs(&self) -> Rect {
        let Rect { x0, y0, x1, y1 } = *self;
        Rect::new(x0.min(x1), y0.min(y1), x0.max(x1), y0.max(y1))
    }

    /// The smallest rectangle enclosing two rectangles.
    #[inline]
    pub fn union(&self, other: Rect) -> Rect {
        Rect::new(
            self.x0.min(other.x0),
            self.y0.min(other.y0),
            self.x1.max(other.x1),
            self.y1.max(other.y1),
        )
    }

    /// Compute the union with one point.
    #[inline]
    pub fn union_pt(&self, pt: Point) -> Rect {
        Rect::new(
            self.x0.min(pt.x),
            self.y0.min(pt.y),
            self.x1.max(pt.x),
            self.y1.max(pt.y),
        )
    }

    /// The rectangle as a closed path, counter-clockwise in y-up space.
    pub fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        path.move_to((self.x0, self.y0));
        path.line_to((self.x1, self.y0));
        path.line_to((self.x1, self.y1));
        path.line_to((self.x0, self.y1));
        path.close_path();
        path
    }
}

// Copyright 2026 the Flatshadow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shapes made of one or more paths.

use crate::{BezPath, Rect};

/// How overlapping subpaths decide what is inside.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FillRule {
    /// A point is inside when the winding number around it is non-zero.
    #[default]
    NonZero,
    /// A point is inside when a ray from it crosses the outline an odd
    /// number of times.
    EvenOdd,
}

/// An ordered collection of paths filled together under one rule.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CompoundShape {
    paths: Vec<BezPath>,
    fill_rule: FillRule,
}

impl CompoundShape {
    /// An empty shape with the non-zero fill rule.
    pub fn new() -> CompoundShape {
        CompoundShape::default()
    }

    /// Create a shape from paths and a fill rule.
    pub fn from_paths(paths: Vec<BezPath>, fill_rule: FillRule) -> CompoundShape {
        CompoundShape { paths, fill_rule }
    }

    /// The paths, in order.
    pub fn paths(&self) -> &[BezPath] {
        &self.paths
    }

    /// Consume the shape, returning its paths.
    pub fn into_paths(self) -> Vec<BezPath> {
        self.paths
    }

    /// The fill rule.
    pub fn fill_rule(&self) -> FillRule {
        self.fill_rule
    }

    /// Returns `true` if no path has any segment.
    pub fn is_empty(&self) -> bool {
        self.paths.iter().all(BezPath::is_empty)
    }

    /// Returns `true` if every coordinate is finite.
    pub fn is_finite(&self) -> bool {
        self.paths.iter().all(BezPath::is_finite)
    }

    /// Sum of the signed areas of all paths.
    ///
    /// For the normalized output of a boolean operation (exteriors
    /// counter-clockwise, holes clockwise) this is the filled area.
    pub fn area(&self) -> f64 {
        self.paths.iter().map(BezPath::area).sum()
    }

    /// The smallest rectangle enclosing every path.
    pub fn bounding_box(&self) -> Option<Rect> {
        self.paths
            .iter()
            .filter_map(BezPath::bounding_box)
            .reduce(|acc, bbox| acc.union(bbox))
    }
}

impl From<BezPath> for CompoundShape {
    fn from(path: BezPath) -> CompoundShape {
        CompoundShape::from_paths(vec![path], FillRule::NonZero)
    }
}

impl FromIterator<BezPath> for CompoundShape {
    fn from_iter<T: IntoIterator<Item = BezPath>>(iter: T) -> Self {
        CompoundShape::from_paths(iter.into_iter().collect(), FillRule::NonZero)
    }
}

/// The input to the shadow engine: a single path or a compound shape.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Shape {
    /// One path, filled with the non-zero rule.
    Single(BezPath),
    /// Several paths filled together.
    Compound(CompoundShape),
}

impl Shape {
    /// The shape's paths, in order.
    pub fn paths(&self) -> &[BezPath] {
        match self {
            Shape::Single(path) => core::slice::from_ref(path),
            Shape::Compound(compound) => compound.paths(),
        }
    }

    /// The fill rule.
    pub fn fill_rule(&self) -> FillRule {
        match self {
            Shape::Single(_) => FillRule::NonZero,
            Shape::Compound(compound) => compound.fill_rule(),
        }
    }

    /// Returns `true` if every coordinate is finite.
    pub fn is_finite(&self) -> bool {
        self.paths().iter().all(BezPath::is_finite)
    }

    /// The shape as a compound shape.
    pub fn to_compound(&self) -> CompoundShape {
        match self {
            Shape::Single(path) => CompoundShape::from(path.clone()),
            Shape::Compound(compound) => compound.clone(),
        }
    }
}

impl From<BezPath> for Shape {
    fn from(path: BezPath) -> Shape {
        Shape::Single(path)
    }
}

impl From<CompoundShape> for Shape {
    fn from(compound: CompoundShape) -> Shape {
        Shape::Compound(compound)
    }
}

// Copyright 2026 the Flatshadow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Assembly of flat shadows.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::face::build_faces;
use crate::{BezPath, CompoundShape, Direction, PathBoolean, PathSeg, ShadowError, Shape, Vec2};

/// Options for casting a flat shadow.
///
/// ```
/// use flatshadow::{Direction, FlatShadow, GeoBoolean, Rect, Shape};
///
/// let square = Shape::from(Rect::new(0.0, 0.0, 1.0, 1.0).to_path());
/// let shadow = FlatShadow::new(Direction::from_degrees(0.0, 2.0))
///     .shadow_of(&square, &GeoBoolean::default())
///     .unwrap();
/// assert!((shadow.area() - 3.0).abs() < 1e-6);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlatShadow {
    /// Angle and length of the projection.
    pub direction: Direction,
    /// Also cover the source shape itself. On by default; turn it off when
    /// the source is drawn on top of its shadow anyway.
    pub include_source: bool,
    /// Clip the result to this shape.
    pub container: Option<CompoundShape>,
}

impl FlatShadow {
    /// A shadow cast along `direction`, covering the source and unclipped.
    pub fn new(direction: Direction) -> FlatShadow {
        FlatShadow {
            direction,
            include_source: true,
            container: None,
        }
    }

    /// Builder-style method to choose whether the source shape is part of
    /// the result.
    ///
    /// The faces only sweep the boundary, so without the source the
    /// interior of a long outline can remain a hole in the silhouette.
    #[must_use]
    pub fn with_source(mut self, include_source: bool) -> FlatShadow {
        self.include_source = include_source;
        self
    }

    /// Builder-style method to clip the result to `container`.
    #[must_use]
    pub fn with_container(mut self, container: CompoundShape) -> FlatShadow {
        self.container = Some(container);
        self
    }

    /// Compute the silhouette swept by `shape` along the direction.
    ///
    /// Every edge of every path is decomposed into faces, the faces of a
    /// path are unioned in order, and then the per-path regions are unioned
    /// in order, followed by the source itself unless it was left out. Paths
    /// that produce no faces are skipped, so an empty or fully degenerate
    /// shape yields an empty silhouette.
    ///
    /// # Errors
    ///
    /// Fails when the direction is not finite or has zero distance, or when
    /// the shape (or container) has a non-finite coordinate.
    pub fn shadow_of(
        &self,
        shape: &Shape,
        ctx: &impl PathBoolean,
    ) -> Result<CompoundShape, ShadowError> {
        let offset = self.direction.offset()?;
        let container_finite = self
            .container
            .as_ref()
            .map_or(true, CompoundShape::is_finite);
        if !shape.is_finite() || !container_finite {
            return Err(ShadowError::NonFiniteCoordinate);
        }
        log::debug!(
            "casting shadow of {} path(s) along {offset:?}",
            shape.paths().len()
        );

        let mut silhouette = CompoundShape::new();
        for (i, path) in shape.paths().iter().enumerate() {
            let region = path_shadow(path, offset, ctx);
            if region.is_empty() {
                log::debug!("path {i} casts no shadow");
                continue;
            }
            silhouette = ctx.union(&silhouette, &region);
        }
        if self.include_source {
            silhouette = ctx.union(&silhouette, &shape.to_compound());
        }
        if let Some(container) = &self.container {
            silhouette = ctx.intersect(&silhouette, container);
        }
        Ok(silhouette)
    }
}

/// Compute the flat shadow of `shape` along `direction`, merged with the
/// shape itself.
///
/// Shorthand for [`FlatShadow::new`] followed by [`FlatShadow::shadow_of`].
pub fn shadow_of(
    shape: &Shape,
    direction: Direction,
    ctx: &impl PathBoolean,
) -> Result<CompoundShape, ShadowError> {
    FlatShadow::new(direction).shadow_of(shape, ctx)
}

/// The faces of every edge of `path`, in edge order.
fn path_faces(path: &BezPath, offset: Vec2) -> Vec<BezPath> {
    let segments: Vec<PathSeg> = path.segments().collect();
    #[cfg(feature = "parallel")]
    let per_edge: Vec<_> = segments
        .par_iter()
        .map(|&seg| build_faces(seg, offset))
        .collect();
    #[cfg(not(feature = "parallel"))]
    let per_edge: Vec<_> = segments
        .iter()
        .map(|&seg| build_faces(seg, offset))
        .collect();
    let faces: Vec<BezPath> = per_edge.into_iter().flatten().collect();
    log::trace!("{} edge(s) gave {} face(s)", segments.len(), faces.len());
    faces
}

fn path_shadow(path: &BezPath, offset: Vec2, ctx: &impl PathBoolean) -> CompoundShape {
    path_faces(path, offset)
        .into_iter()
        .fold(CompoundShape::new(), |acc, face| {
            ctx.union(&acc, &CompoundShape::from(face))
        })
}

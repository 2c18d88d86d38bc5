// Copyright 2026 the Flatshadow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Extrusion faces of single path segments.
//!
//! Translating an edge along the shadow direction sweeps a region. When the
//! edge is monotonic with respect to the direction (its projection onto the
//! perpendicular never turns back), that region is bounded by a simple loop:
//! the edge, the end connector, the translated edge in reverse, and the start
//! connector. A cubic edge turns back at most twice, at its tangent
//! crossings, so it splits into at most three such faces.

use smallvec::SmallVec;

use crate::{BezPath, PathSeg, Vec2};

/// Pieces whose control points all lie within this distance of the start
/// point are dropped.
pub const DEGENERATE_EPSILON: f64 = 1e-9;

/// Split a segment at its tangent crossings with `direction`.
///
/// The pieces are in order along the segment and each is monotonic with
/// respect to `direction`. Zero-length pieces are omitted, so a segment
/// that is a single point yields no pieces.
pub fn monotonic_pieces(seg: PathSeg, direction: Vec2) -> SmallVec<[PathSeg; 3]> {
    let mut pieces = SmallVec::new();
    let mut rest = seg;
    let mut consumed = 0.0;
    for t in seg.tangent_crossings(direction) {
        // Rescale into the parameter space of what remains after earlier splits.
        let local = (t - consumed) / (1.0 - consumed);
        if let Some((head, tail)) = rest.split_at(local) {
            pieces.push(head);
            rest = tail;
            consumed = t;
        }
    }
    pieces.push(rest);
    let before = pieces.len();
    pieces.retain(|piece: &mut PathSeg| !piece.is_degenerate(DEGENERATE_EPSILON));
    if pieces.len() != before {
        log::trace!("dropped {} zero-length piece(s) of {seg:?}", before - pieces.len());
    }
    pieces
}

/// The closed loop swept by translating `piece` by `offset`.
///
/// Starts at the piece's start point, follows the piece, connects to the
/// translated end, follows the translated piece backwards and closes.
pub fn extrusion_face(piece: PathSeg, offset: Vec2) -> BezPath {
    let mut face = BezPath::new();
    face.move_to(piece.start());
    face.push(piece.as_path_el());
    face.line_to(piece.end() + offset);
    face.push((piece.reverse() + offset).as_path_el());
    face.close_path();
    face
}

/// Decompose a segment into simple faces covering the region it sweeps when
/// translated by `offset`.
///
/// A line yields one parallelogram. A cubic yields one face per monotonic
/// piece, so up to three. A degenerate segment yields none, and so does a
/// zero or non-finite offset, which sweeps nothing.
pub fn build_faces(seg: PathSeg, offset: Vec2) -> SmallVec<[BezPath; 3]> {
    if offset == Vec2::ZERO || !offset.is_finite() {
        log::warn!("no faces for offset {offset:?}");
        return SmallVec::new();
    }
    monotonic_pieces(seg, offset)
        .into_iter()
        .map(|piece| extrusion_face(piece, offset))
        .collect()
}

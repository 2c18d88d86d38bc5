// Copyright 2026 the Flatshadow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Flat directional shadows for Bézier outlines.
//!
//! A flat shadow (or "long shadow") is the region an outline sweeps when it
//! is translated along a fixed direction. This crate computes that region
//! for outlines made of lines and cubic Béziers: every edge is split where
//! its tangent is parallel to the direction, each piece is extruded into a
//! simple face, and the faces are merged through a boolean union.
//!
//! The union itself is provided by the caller through the [`PathBoolean`]
//! trait. [`GeoBoolean`] implements it with the [`geo`] crate.
//!
//! ```
//! use flatshadow::{BezPath, Direction, FlatShadow, GeoBoolean, Shape};
//!
//! let glyph = BezPath::from_svg("M0 0L10 0L10 10L0 10Z").unwrap();
//! let shadow = FlatShadow::new(Direction::from_degrees(-45.0, 20.0))
//!     .shadow_of(&Shape::from(glyph), &GeoBoolean::default())
//!     .unwrap();
//! let bbox = shadow.bounding_box().unwrap();
//! assert!((bbox.x1 - (10.0 + 20.0 * 0.5_f64.sqrt())).abs() < 1e-6);
//! ```
//!
//! The lower level pieces are public too: the polynomial solvers in
//! [`common`], [`CubicBez::tangent_crossings`], [`CubicBez::split_at`]
//! (through [`ParamCurve`]) and [`build_faces`].
//!
//! # Features
//!
//! - `serde` derives serialization for the value types.
//! - `parallel` builds the faces of a path's edges on the `rayon` thread
//!   pool. The faces are collected in edge order, so results are identical
//!   to the serial build.
//!
//! Diagnostics go through the [`log`] facade; no logger is installed.

// LINEBENDER LINT SET - lib.rs - v1
// See https://linebender.org/wiki/canonical-lints/
// These lints aren't included in Cargo.toml because they
// shouldn't apply to examples and tests
#![warn(unused_crate_dependencies)]
#![warn(clippy::print_stdout, clippy::print_stderr)]
// END LINEBENDER LINT SET
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![allow(
    clippy::unreadable_literal,
    clippy::many_single_char_names,
    clippy::excessive_precision,
    clippy::bool_to_int_with_if,
    reason = "curve math reads best with the textbook names and constants"
)]

mod bezpath;
mod boolean;
pub mod common;
mod cubicbez;
mod direction;
mod error;
pub mod face;
mod line;
mod param_curve;
mod point;
mod rect;
mod shadow;
mod shape;
mod svg;
mod vec2;

pub use crate::bezpath::*;
pub use crate::boolean::*;
pub use crate::cubicbez::*;
pub use crate::direction::*;
pub use crate::error::*;
pub use crate::face::{build_faces, monotonic_pieces};
pub use crate::line::*;
pub use crate::param_curve::*;
pub use crate::point::*;
pub use crate::rect::*;
pub use crate::shadow::*;
pub use crate::shape::*;
pub use crate::vec2::*;

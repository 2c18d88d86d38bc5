// Copyright 2026 the Flatshadow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types.

use core::fmt::{self, Display, Formatter};

/// An error rejecting the arguments of a shadow computation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShadowError {
    /// The shadow distance is zero, so the shadow has no extent.
    ZeroDistance,
    /// The direction's angle or distance is NaN or infinite.
    NonFiniteDirection,
    /// A coordinate of the input shape is NaN or infinite.
    NonFiniteCoordinate,
}

impl Display for ShadowError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ShadowError::ZeroDistance => write!(f, "shadow distance is zero"),
            ShadowError::NonFiniteDirection => write!(f, "shadow direction is not finite"),
            ShadowError::NonFiniteCoordinate => write!(f, "shape has a non-finite coordinate"),
        }
    }
}

impl std::error::Error for ShadowError {}

/// An error which can be returned when parsing SVG path data.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SvgParseError {
    /// A number was expected.
    Wrong,
    /// The input string ended while still expecting input.
    UnexpectedEof,
    /// Encountered an unknown command letter.
    UnknownCommand(char),
}

impl Display for SvgParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            SvgParseError::Wrong => write!(f, "Unable to parse a number"),
            SvgParseError::UnexpectedEof => write!(f, "Unexpected EOF"),
            SvgParseError::UnknownCommand(letter) => write!(f, "Unknown command, \"{letter}\""),
        }
    }
}

impl std::error::Error for SvgParseError {}

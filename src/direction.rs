// Copyright 2026 the Flatshadow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The direction and length of a cast shadow.

use crate::{ShadowError, Vec2};

/// Angle and distance of a shadow's projection.
///
/// The angle is stored in radians, measured counter-clockwise from the
/// positive x axis in y-up coordinates. In y-down coordinates (as in SVG) the
/// same angle turns clockwise.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Direction {
    /// Angle in radians.
    pub angle: f64,
    /// Length of the projection.
    pub distance: f64,
}

impl Direction {
    /// Create a direction from an angle in radians.
    #[inline]
    pub fn from_radians(angle: f64, distance: f64) -> Direction {
        Direction { angle, distance }
    }

    /// Create a direction from an angle in degrees.
    ///
    /// ```
    /// use flatshadow::Direction;
    /// let d = Direction::from_degrees(135.0, 1.0);
    /// let offset = d.offset().unwrap();
    /// assert!((offset.x + 0.5_f64.sqrt()).abs() < 1e-12);
    /// assert!((offset.y - 0.5_f64.sqrt()).abs() < 1e-12);
    /// ```
    #[inline]
    pub fn from_degrees(angle: f64, distance: f64) -> Direction {
        Direction::from_radians(angle.to_radians(), distance)
    }

    /// Create a direction from a displacement vector.
    pub fn from_offset(offset: Vec2) -> Direction {
        Direction {
            angle: offset.y.atan2(offset.x),
            distance: offset.hypot(),
        }
    }

    /// The displacement (distance · cos θ, distance · sin θ).
    ///
    /// Fails when the angle or distance is not finite, or the distance is
    /// zero.
    pub fn offset(&self) -> Result<Vec2, ShadowError> {
        if !self.angle.is_finite() || !self.distance.is_finite() {
            return Err(ShadowError::NonFiniteDirection);
        }
        if self.distance == 0.0 {
            return Err(ShadowError::ZeroDistance);
        }
        let (sin, cos) = self.angle.sin_cos();
        Ok(Vec2::new(self.distance * cos, self.distance * sin))
    }
}

#[cfg(test)]
mod tests {
    use crate::{Direction, ShadowError, Vec2};

    #[test]
    fn offset_components() {
        let right = Direction::from_degrees(0.0, 2.0).offset().unwrap();
        assert_eq!(right, Vec2::new(2.0, 0.0));
        let up = Direction::from_radians(core::f64::consts::FRAC_PI_2, 3.0)
            .offset()
            .unwrap();
        assert!(up.x.abs() < 1e-12);
        assert!((up.y - 3.0).abs() < 1e-12);
    }

    #[test]
    fn offset_round_trip() {
        let v = Vec2::new(-3.0, 4.0);
        let back = Direction::from_offset(v).offset().unwrap();
        assert!((back - v).hypot() < 1e-12);
    }

    #[test]
    fn invalid_directions() {
        assert_eq!(
            Direction::from_degrees(45.0, 0.0).offset(),
            Err(ShadowError::ZeroDistance)
        );
        assert_eq!(
            Direction::from_degrees(f64::NAN, 1.0).offset(),
            Err(ShadowError::NonFiniteDirection)
        );
        assert_eq!(
            Direction::from_radians(0.0, f64::INFINITY).offset(),
            Err(ShadowError::NonFiniteDirection)
        );
    }
}

//! Placing symbol-local offsets on the canvas
//!
//! Joint symbols are drawn in a frame centered on the joint origin. A node's
//! rotation turns that frame, then its position translates it.
//!
//! Angles are degrees on a Y-down canvas, so a positive angle is clockwise on
//! screen: at 90° the local +x axis points down, at 270° it points up.

use super::types::Point;

/// Turn by a fixed angle about a pivot point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationTransform {
    pub angle_degrees: f64,
    pub center: Point,
    cos: f64,
    sin: f64,
}

impl RotationTransform {
    pub fn new(angle_degrees: f64, center: Point) -> Self {
        let (sin, cos) = angle_degrees.to_radians().sin_cos();
        Self {
            angle_degrees,
            center,
            cos,
            sin,
        }
    }

    /// True when the angle is a whole number of turns
    pub fn is_identity(&self) -> bool {
        normalize_degrees(self.angle_degrees) == 0.0
    }

    /// `center + R(θ) · (point - center)`
    pub fn transform_point(&self, point: Point) -> Point {
        if self.is_identity() {
            return point;
        }
        self.center + self.rotate(point - self.center)
    }

    /// World position of an offset expressed relative to `center`
    pub fn place_offset(&self, offset: Point) -> Point {
        self.center + self.rotate(offset)
    }

    fn rotate(&self, v: Point) -> Point {
        Point::new(
            v.x * self.cos - v.y * self.sin,
            v.x * self.sin + v.y * self.cos,
        )
    }
}

/// Angle in degrees folded into `[0, 360)`
pub fn normalize_degrees(angle: f64) -> f64 {
    let folded = angle.rem_euclid(360.0);
    // rem_euclid rounds tiny negative inputs up to 360.0
    if folded >= 360.0 {
        0.0
    } else {
        folded
    }
}

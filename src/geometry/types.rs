//! Points and bounding boxes in diagram coordinates

use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

/// A 2D point in diagram (world) coordinates, Y pointing down
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance to another point
    pub fn distance_squared(&self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Midpoint of the segment between two points
    pub fn midpoint(&self, other: Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Axis-aligned extent of a drawing, origin at the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn zero() -> Self {
        Self::default()
    }

    /// Tightest box around `points`, `None` when there are none
    pub fn from_points(points: impl IntoIterator<Item = Point>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        let (min, max) = points.fold((first, first), |(min, max), p| {
            (
                Point::new(min.x.min(p.x), min.y.min(p.y)),
                Point::new(max.x.max(p.x), max.y.max(p.y)),
            )
        });
        let size = max - min;
        Some(Self::new(min.x, min.y, size.x, size.y))
    }

    /// Same box with `margin` added on all four sides
    pub fn inflate(&self, margin: f64) -> BoundingBox {
        let grow = 2.0 * margin;
        BoundingBox::new(
            self.x - margin,
            self.y - margin,
            self.width + grow,
            self.height + grow,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_distance_squared() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert_eq!(a.distance_squared(b), 25.0);
        assert_eq!(b.distance_squared(a), 25.0);
    }

    #[test]
    fn test_point_arithmetic() {
        let p = Point::new(1.0, 2.0) + Point::new(10.0, 20.0);
        assert_eq!(p, Point::new(11.0, 22.0));
        assert_eq!(p - Point::new(1.0, 2.0), Point::new(10.0, 20.0));
        assert_eq!(
            Point::new(0.0, 0.0).midpoint(Point::new(10.0, -4.0)),
            Point::new(5.0, -2.0)
        );
    }

    #[test]
    fn test_from_points() {
        assert_eq!(BoundingBox::from_points(Vec::new()), None);
        assert_eq!(
            BoundingBox::from_points([Point::new(3.0, 4.0)]),
            Some(BoundingBox::new(3.0, 4.0, 0.0, 0.0))
        );

        let bb = BoundingBox::from_points(vec![
            Point::new(10.0, 5.0),
            Point::new(-10.0, 25.0),
            Point::new(0.0, 0.0),
        ])
        .unwrap();
        assert_eq!(bb, BoundingBox::new(-10.0, 0.0, 20.0, 25.0));
    }

    #[test]
    fn test_inflate() {
        let bb = BoundingBox::new(0.0, 0.0, 10.0, 10.0).inflate(5.0);
        assert_eq!(bb, BoundingBox::new(-5.0, -5.0, 20.0, 20.0));
    }
}

//! Rectangle shape.

use super::ShapeGeometry;
use kurbo::{BezPath, Point, Rect, RoundedRect, Shape as KurboShape};
use serde::{Deserialize, Serialize};

/// A rectangle with optional rounded corners.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub width: f64,
    pub height: f64,
    /// Corner radius (0 = sharp corners).
    #[serde(default)]
    pub corner_radius: f64,
}

impl Rectangle {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            corner_radius: 0.0,
        }
    }

    pub fn with_corner_radius(mut self, radius: f64) -> Self {
        self.corner_radius = radius;
        self
    }
}

impl ShapeGeometry for Rectangle {
    fn bounds(&self, position: Point) -> Rect {
        Rect::new(
            position.x,
            position.y,
            position.x + self.width,
            position.y + self.height,
        )
    }

    fn contains(&self, position: Point, point: Point, tolerance: f64) -> bool {
        self.bounds(position)
            .inflate(tolerance, tolerance)
            .contains(point)
    }

    fn to_path(&self, position: Point) -> BezPath {
        let rect = self.bounds(position);
        if self.corner_radius > 0.0 {
            RoundedRect::from_rect(rect, self.corner_radius).to_path(0.1)
        } else {
            rect.to_path(0.1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds() {
        let rect = Rectangle::new(100.0, 80.0);
        let bounds = rect.bounds(Point::new(50.0, 50.0));
        assert!((bounds.x0 - 50.0).abs() < f64::EPSILON);
        assert!((bounds.y0 - 50.0).abs() < f64::EPSILON);
        assert!((bounds.x1 - 150.0).abs() < f64::EPSILON);
        assert!((bounds.y1 - 130.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_hit_test() {
        let rect = Rectangle::new(100.0, 100.0);
        assert!(rect.contains(Point::ZERO, Point::new(50.0, 50.0), 0.0));
        assert!(!rect.contains(Point::ZERO, Point::new(150.0, 50.0), 0.0));
        assert!(rect.contains(Point::ZERO, Point::new(105.0, 50.0), 10.0)); // Within tolerance
    }

    #[test]
    fn test_rounded_path_stays_in_bounds() {
        let rect = Rectangle::new(100.0, 80.0).with_corner_radius(10.0);
        let path_bounds = rect.to_path(Point::new(50.0, 50.0)).bounding_box();
        assert!((path_bounds.width() - 100.0).abs() < 1e-6);
        assert!((path_bounds.height() - 80.0).abs() < 1e-6);
    }
}

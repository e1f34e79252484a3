//! Circle shape.

use super::ShapeGeometry;
use kurbo::{BezPath, Circle as KurboCircle, Point, Rect, Shape as KurboShape};
use serde::{Deserialize, Serialize};

/// A circle anchored at its centre.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub radius: f64,
}

impl Circle {
    pub fn new(radius: f64) -> Self {
        Self { radius }
    }
}

impl ShapeGeometry for Circle {
    fn bounds(&self, position: Point) -> Rect {
        Rect::new(
            position.x - self.radius,
            position.y - self.radius,
            position.x + self.radius,
            position.y + self.radius,
        )
    }

    fn contains(&self, position: Point, point: Point, tolerance: f64) -> bool {
        position.distance(point) <= self.radius + tolerance
    }

    fn to_path(&self, position: Point) -> BezPath {
        KurboCircle::new(position, self.radius).to_path(0.1)
    }
}

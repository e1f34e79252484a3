//! Star polygon shape.

use super::{ShapeGeometry, point_to_polygon_edge_dist, polygon_contains};
use kurbo::{BezPath, Point, Rect};
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, PI};

/// A star polygon anchored at its centre.
///
/// Vertices alternate between the outer and inner radius, starting with an
/// outer vertex pointing straight up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Star {
    /// Number of outer points.
    pub points: u32,
    pub inner_radius: f64,
    pub outer_radius: f64,
}

impl Star {
    pub fn new(points: u32, inner_radius: f64, outer_radius: f64) -> Self {
        Self {
            points: points.max(2),
            inner_radius,
            outer_radius,
        }
    }

    /// Polygon vertices around `center`.
    pub fn vertices(&self, center: Point) -> Vec<Point> {
        let count = self.points * 2;
        (0..count)
            .map(|i| {
                let radius = if i % 2 == 0 {
                    self.outer_radius
                } else {
                    self.inner_radius
                };
                let angle = -FRAC_PI_2 + PI * i as f64 / self.points as f64;
                Point::new(
                    center.x + angle.cos() * radius,
                    center.y + angle.sin() * radius,
                )
            })
            .collect()
    }

    /// Scale both radii by `factor`.
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            points: self.points,
            inner_radius: self.inner_radius * factor,
            outer_radius: self.outer_radius * factor,
        }
    }
}

impl ShapeGeometry for Star {
    fn bounds(&self, position: Point) -> Rect {
        let vertices = self.vertices(position);
        let mut bounds = Rect::from_points(vertices[0], vertices[0]);
        for v in &vertices[1..] {
            bounds = bounds.union_pt(*v);
        }
        bounds
    }

    fn contains(&self, position: Point, point: Point, tolerance: f64) -> bool {
        let vertices = self.vertices(position);
        polygon_contains(&vertices, point) || point_to_polygon_edge_dist(point, &vertices) <= tolerance
    }

    fn to_path(&self, position: Point) -> BezPath {
        let vertices = self.vertices(position);
        let mut path = BezPath::new();
        path.move_to(vertices[0]);
        for v in &vertices[1..] {
            path.line_to(*v);
        }
        path.close_path();
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_count_and_tip() {
        let star = Star::new(5, 20.0, 40.0);
        let vertices = star.vertices(Point::new(400.0, 90.0));
        assert_eq!(vertices.len(), 10);
        // First vertex is the top tip
        assert!((vertices[0].x - 400.0).abs() < 1e-9);
        assert!((vertices[0].y - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_hit_test() {
        let star = Star::new(5, 20.0, 40.0);
        let center = Point::new(0.0, 0.0);
        assert!(star.contains(center, center, 0.0));
        // Near a tip
        assert!(star.contains(center, Point::new(0.0, -38.0), 0.0));
        // Between two tips, outside the inner radius
        assert!(!star.contains(center, Point::new(0.0, 35.0), 0.0));
    }

    #[test]
    fn test_bounds_top_is_outer_radius() {
        let bounds = Star::new(6, 40.0, 70.0).bounds(Point::new(300.0, 150.0));
        assert!((bounds.y0 - 80.0).abs() < 1e-9);
        assert!((bounds.y1 - 220.0).abs() < 1e-9);
    }
}

//! Selection and transform handle system.

use crate::events::ShapeRef;
use crate::shapes::{ShapeDescriptor, ShapeKind, ShapePatch};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Handle size in screen pixels.
pub const HANDLE_SIZE: f64 = 8.0;
/// Handle hit tolerance in screen pixels.
pub const HANDLE_HIT_TOLERANCE: f64 = 10.0;
/// Distance from the top edge to the rotation handle (in scene units).
pub const ROTATE_HANDLE_OFFSET: f64 = 25.0;
/// Smallest width/height a corner drag can shrink a shape to.
pub const MIN_EXTENT: f64 = 4.0;

/// Type of selection handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandleKind {
    /// Corner handle (resize about the centre).
    Corner(Corner),
    /// Rotation handle (positioned above the shape).
    Rotate,
}

/// Corner positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// A selection handle with its position and type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Handle {
    /// Position in scene coordinates.
    pub position: Point,
    pub kind: HandleKind,
}

impl Handle {
    pub fn new(position: Point, kind: HandleKind) -> Self {
        Self { position, kind }
    }

    /// Check if a point (in scene coordinates) hits this handle.
    /// `tolerance` should already be divided by the viewport scale.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let dx = point.x - self.position.x;
        let dy = point.y - self.position.y;
        dx * dx + dy * dy <= tolerance * tolerance
    }
}

/// Get the transform handles for a shape.
///
/// Text only gets the rotation handle; everything else gets four corners
/// plus rotation. Handles follow the shape's rotation.
pub fn get_handles(shape: &ShapeDescriptor) -> Vec<Handle> {
    let bounds = shape.bounds();
    let rotation = shape.rotation.to_radians();
    match shape.kind {
        ShapeKind::Text(_) => rotate_only_handle(bounds, rotation),
        _ => corner_and_rotate_handles(bounds, rotation),
    }
}

fn rotate_about_center(bounds: Rect, rotation: f64, dx: f64, dy: f64) -> Point {
    let center = bounds.center();
    let (sin_r, cos_r) = rotation.sin_cos();
    Point::new(
        center.x + dx * cos_r - dy * sin_r,
        center.y + dx * sin_r + dy * cos_r,
    )
}

fn corner_and_rotate_handles(bounds: Rect, rotation: f64) -> Vec<Handle> {
    let half_w = bounds.width() / 2.0;
    let half_h = bounds.height() / 2.0;
    let at = |dx, dy| rotate_about_center(bounds, rotation, dx, dy);
    vec![
        Handle::new(at(-half_w, -half_h), HandleKind::Corner(Corner::TopLeft)),
        Handle::new(at(half_w, -half_h), HandleKind::Corner(Corner::TopRight)),
        Handle::new(at(-half_w, half_h), HandleKind::Corner(Corner::BottomLeft)),
        Handle::new(at(half_w, half_h), HandleKind::Corner(Corner::BottomRight)),
        Handle::new(at(0.0, -half_h - ROTATE_HANDLE_OFFSET), HandleKind::Rotate),
    ]
}

fn rotate_only_handle(bounds: Rect, rotation: f64) -> Vec<Handle> {
    let half_h = bounds.height() / 2.0;
    vec![Handle::new(
        rotate_about_center(bounds, rotation, 0.0, -half_h - ROTATE_HANDLE_OFFSET),
        HandleKind::Rotate,
    )]
}

/// Find which handle (if any) is hit at the given point.
pub fn hit_test_handles(shape: &ShapeDescriptor, point: Point, tolerance: f64) -> Option<HandleKind> {
    get_handles(shape)
        .into_iter()
        .find(|handle| handle.hit_test(point, tolerance))
        .map(|handle| handle.kind)
}

/// State of an active press on a shape: a move or a handle drag.
#[derive(Debug, Clone)]
pub struct ManipulationState {
    pub target: ShapeRef,
    /// The handle being dragged (None = moving the whole shape).
    pub handle: Option<HandleKind>,
    pub start_point: Point,
    pub current_point: Point,
    /// Shape as it was when the press started.
    pub original: ShapeDescriptor,
}

impl ManipulationState {
    pub fn new(target: ShapeRef, handle: Option<HandleKind>, start_point: Point, original: ShapeDescriptor) -> Self {
        Self {
            target,
            handle,
            start_point,
            current_point: start_point,
            original,
        }
    }

    /// Patch that takes the original shape to its manipulated state.
    pub fn patch(&self) -> ShapePatch {
        apply_manipulation(&self.original, self.handle, self.start_point, self.current_point)
    }
}

/// Compute the update produced by dragging `handle` from `start` to `current`.
///
/// With no handle the shape is translated. Corner handles resize about the
/// bounds centre, the rotation handle points the shape's top at the cursor.
pub fn apply_manipulation(
    shape: &ShapeDescriptor,
    handle: Option<HandleKind>,
    start: Point,
    current: Point,
) -> ShapePatch {
    match handle {
        None => ShapePatch::position(shape.position + (current - start)),
        Some(HandleKind::Rotate) => ShapePatch::rotation(rotation_towards(shape.center(), current)),
        Some(HandleKind::Corner(_)) => corner_resize(shape, current),
    }
}

/// Rotation in degrees that points a shape's top edge from `center` at `cursor`.
pub fn rotation_towards(center: Point, cursor: Point) -> f64 {
    let dx = cursor.x - center.x;
    let dy = cursor.y - center.y;
    // Offset so 0° is up
    dy.atan2(dx).to_degrees() + 90.0
}

fn corner_resize(shape: &ShapeDescriptor, cursor: Point) -> ShapePatch {
    let bounds = shape.bounds();
    let center = bounds.center();
    // Work in the shape's unrotated frame; the centre is a fixed point.
    let local = shape.rotation_transform().inverse() * cursor;
    let half_w = (local.x - center.x).abs().max(MIN_EXTENT / 2.0);
    let half_h = (local.y - center.y).abs().max(MIN_EXTENT / 2.0);

    match &shape.kind {
        ShapeKind::Rect(rect) => {
            let mut rect = rect.clone();
            rect.width = half_w * 2.0;
            rect.height = half_h * 2.0;
            rect.corner_radius = rect.corner_radius.min(half_w).min(half_h);
            ShapePatch::position(Point::new(center.x - half_w, center.y - half_h))
                .with_kind(ShapeKind::Rect(rect))
        }
        ShapeKind::Circle(circle) => {
            let mut circle = circle.clone();
            circle.radius = half_w.max(half_h);
            ShapePatch::default().with_kind(ShapeKind::Circle(circle))
        }
        ShapeKind::Star(star) => {
            let factor = (half_w / (bounds.width() / 2.0)).max(half_h / (bounds.height() / 2.0));
            if !factor.is_finite() {
                return ShapePatch::default();
            }
            let position = center + (shape.position - center) * factor;
            ShapePatch::position(position).with_kind(ShapeKind::Star(star.scaled(factor)))
        }
        ShapeKind::Text(_) => ShapePatch::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rectangle_handles() {
        let rect = ShapeDescriptor::rect("r1", Point::new(50.0, 50.0), 100.0, 80.0);
        let handles = get_handles(&rect);
        // 4 corner handles + 1 rotation handle
        assert_eq!(handles.len(), 5);
        assert_eq!(handles[0].position, Point::new(50.0, 50.0));
        assert_eq!(handles[3].position, Point::new(150.0, 130.0));
        assert_eq!(handles[4].position, Point::new(100.0, 25.0));
    }

    #[test]
    fn test_text_has_rotate_handle_only() {
        let text = ShapeDescriptor::text("t1", Point::new(50.0, 50.0), "Hello", 32.0);
        let handles = get_handles(&text);
        assert_eq!(handles.len(), 1);
        assert_eq!(handles[0].kind, HandleKind::Rotate);
    }

    #[test]
    fn test_handles_follow_rotation() {
        let rect = ShapeDescriptor::rect("r1", Point::new(0.0, 0.0), 100.0, 100.0).with_rotation(90.0);
        let handles = get_handles(&rect);
        let rotate = handles[4].position;
        // Top-centre rotated 90° about (50, 50) ends up on the right side.
        assert!((rotate.x - 125.0).abs() < 1e-9);
        assert!((rotate.y - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_handle_hit_test() {
        let rect = ShapeDescriptor::rect("r1", Point::new(50.0, 50.0), 100.0, 80.0);
        assert_eq!(
            hit_test_handles(&rect, Point::new(152.0, 131.0), HANDLE_HIT_TOLERANCE),
            Some(HandleKind::Corner(Corner::BottomRight))
        );
        assert_eq!(hit_test_handles(&rect, Point::new(100.0, 90.0), HANDLE_HIT_TOLERANCE), None);
    }

    #[test]
    fn test_move_manipulation() {
        let circle = ShapeDescriptor::circle("c1", Point::new(250.0, 90.0), 40.0);
        let patch = apply_manipulation(&circle, None, Point::new(250.0, 90.0), Point::new(260.0, 100.0));
        assert_eq!(patch.position, Some(Point::new(260.0, 100.0)));
    }

    #[test]
    fn test_corner_resize_rect_about_center() {
        let rect = ShapeDescriptor::rect("r1", Point::new(50.0, 50.0), 100.0, 80.0);
        let handle = Some(HandleKind::Corner(Corner::BottomRight));
        let patch = apply_manipulation(&rect, handle, Point::new(150.0, 130.0), Point::new(170.0, 140.0));
        let mut resized = rect.clone();
        assert!(resized.apply(&patch));
        assert_eq!(resized.center(), rect.center());
        assert!((resized.bounds().width() - 140.0).abs() < 1e-9);
        assert!((resized.bounds().height() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_corner_resize_circle_keeps_center() {
        let circle = ShapeDescriptor::circle("c1", Point::new(250.0, 90.0), 40.0);
        let handle = Some(HandleKind::Corner(Corner::TopLeft));
        let patch = apply_manipulation(&circle, handle, Point::new(210.0, 50.0), Point::new(190.0, 60.0));
        assert_eq!(patch.position, None);
        match patch.kind {
            Some(ShapeKind::Circle(c)) => assert!((c.radius - 60.0).abs() < 1e-9),
            other => panic!("unexpected kind {other:?}"),
        }
    }

    #[test]
    fn test_corner_resize_star_scales_about_bounds_center() {
        let star = ShapeDescriptor::star("s1", Point::new(400.0, 90.0), 5, 20.0, 40.0);
        let bounds = star.bounds();
        let handle = Some(HandleKind::Corner(Corner::BottomRight));
        let cursor = bounds.center() + (Point::new(bounds.x1, bounds.y1) - bounds.center()) * 2.0;
        let patch = apply_manipulation(&star, handle, Point::new(bounds.x1, bounds.y1), cursor);
        let mut resized = star.clone();
        resized.apply(&patch);
        let center = resized.center();
        assert!((center.x - bounds.center().x).abs() < 1e-9);
        assert!((center.y - bounds.center().y).abs() < 1e-9);
        assert!((resized.bounds().width() - bounds.width() * 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_rotation_handle_angle() {
        let rect = ShapeDescriptor::rect("r1", Point::new(0.0, 0.0), 100.0, 100.0);
        // Straight up is 0°, to the right is 90°.
        assert!(rotation_towards(rect.center(), Point::new(50.0, -10.0)).abs() < 1e-9);
        let patch = apply_manipulation(
            &rect,
            Some(HandleKind::Rotate),
            Point::new(50.0, -25.0),
            Point::new(200.0, 50.0),
        );
        assert!((patch.rotation.unwrap() - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_text_corner_is_noop() {
        let text = ShapeDescriptor::text("t1", Point::ZERO, "Hello", 16.0);
        let patch = apply_manipulation(
            &text,
            Some(HandleKind::Corner(Corner::TopLeft)),
            Point::ZERO,
            Point::new(10.0, 10.0),
        );
        assert!(patch.is_empty());
    }
}

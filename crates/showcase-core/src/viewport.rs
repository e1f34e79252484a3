//! Viewport scaling for responsive display.
//!
//! The viewport maps scene coordinates (the fixed logical canvas size) to
//! display pixels. Shape coordinates never change when the viewport does.

use kurbo::{Affine, Point, Size};
use serde::{Deserialize, Serialize};

/// Smallest display scale a canvas is shrunk to.
pub const MIN_SCALE: f64 = 0.25;
/// Largest display scale accepted by [`Viewport::set_scale`].
pub const MAX_SCALE: f64 = 8.0;
/// Horizontal padding of an example container.
pub const CONTAINER_PADDING: f64 = 32.0;
/// Extra width reserved around a canvas inside its container.
pub const CANVAS_MARGIN: f64 = 20.0;

/// Uniform display scale over a fixed logical canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Logical canvas size in scene units.
    pub base: Size,
    scale: f64,
}

impl Viewport {
    /// Create a viewport at 100% scale.
    pub fn new(base: Size) -> Self {
        Self { base, scale: 1.0 }
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Set the display scale, clamped to `MIN_SCALE..=MAX_SCALE`.
    /// Non-finite values are ignored. Returns the applied scale.
    pub fn set_scale(&mut self, scale: f64) -> f64 {
        if scale.is_finite() {
            self.scale = scale.clamp(MIN_SCALE, MAX_SCALE);
        }
        self.scale
    }

    /// Display size in whole pixels.
    pub fn display_size(&self) -> (u32, u32) {
        scaled_pixels(self.base, self.scale)
    }

    /// Scene to display transform.
    pub fn transform(&self) -> Affine {
        Affine::scale(self.scale)
    }

    /// Convert a display point to scene coordinates.
    pub fn screen_to_scene(&self, screen_point: Point) -> Point {
        Point::new(screen_point.x / self.scale, screen_point.y / self.scale)
    }

    /// Convert a scene point to display coordinates.
    pub fn scene_to_screen(&self, scene_point: Point) -> Point {
        self.transform() * scene_point
    }

    /// Scale that fits a canvas of `base_width` into a container of
    /// `container_width`, never enlarging and never below `MIN_SCALE`.
    pub fn fit_scale(container_width: f64, base_width: f64) -> f64 {
        let available = container_width - CONTAINER_PADDING;
        (available / (base_width + CANVAS_MARGIN)).clamp(MIN_SCALE, 1.0)
    }
}

/// Pixel dimensions of `base` at `scale`, rounded and at least 1×1.
pub fn scaled_pixels(base: Size, scale: f64) -> (u32, u32) {
    let width = (base.width * scale).round().max(1.0) as u32;
    let height = (base.height * scale).round().max(1.0) as u32;
    (width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_scale() {
        // Wide container: never enlarge
        assert!((Viewport::fit_scale(2000.0, 600.0) - 1.0).abs() < f64::EPSILON);
        // Exactly enough room
        assert!((Viewport::fit_scale(652.0, 600.0) - 1.0).abs() < f64::EPSILON);
        // Half size
        assert!((Viewport::fit_scale(342.0, 600.0) - 0.5).abs() < f64::EPSILON);
        // Floor
        assert!((Viewport::fit_scale(10.0, 600.0) - MIN_SCALE).abs() < f64::EPSILON);
    }

    #[test]
    fn test_screen_scene_roundtrip() {
        let mut viewport = Viewport::new(Size::new(600.0, 300.0));
        viewport.set_scale(0.5);
        let scene = viewport.screen_to_scene(Point::new(100.0, 50.0));
        assert_eq!(scene, Point::new(200.0, 100.0));
        assert_eq!(viewport.scene_to_screen(scene), Point::new(100.0, 50.0));
        assert_eq!(viewport.display_size(), (300, 150));
    }

    #[test]
    fn test_set_scale_clamps() {
        let mut viewport = Viewport::new(Size::new(600.0, 200.0));
        assert!((viewport.set_scale(0.1) - MIN_SCALE).abs() < f64::EPSILON);
        assert!((viewport.set_scale(f64::NAN) - MIN_SCALE).abs() < f64::EPSILON);
        assert_eq!(viewport.display_size(), (150, 50));
    }

    #[test]
    fn test_scaled_pixels_print() {
        assert_eq!(scaled_pixels(Size::new(600.0, 300.0), 3.0), (1800, 900));
    }
}

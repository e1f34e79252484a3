//! Shape descriptors for showcase scenes.
//!
//! A [`ShapeDescriptor`] is plain data: kind-specific geometry plus the
//! paint properties shared by every kind. Behavior (hover, drag, selection)
//! lives in the adapter and the scene controllers, never on the shape.

mod circle;
mod rectangle;
mod star;
mod text;

pub use circle::Circle;
pub use rectangle::Rectangle;
pub use star::Star;
pub use text::{FontStyle, Text};

use crate::color::ShapeColor;
use kurbo::{Affine, BezPath, Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Geometry shared by every shape kind.
///
/// `position` is the shape's anchor: top-left for rectangles and text,
/// centre for circles and stars. All methods work in the unrotated frame.
pub(crate) trait ShapeGeometry {
    /// Bounding box in scene coordinates.
    fn bounds(&self, position: Point) -> Rect;

    /// Check if a point hits the shape.
    fn contains(&self, position: Point, point: Point, tolerance: f64) -> bool;

    /// Outline used for filling and shadows.
    fn to_path(&self, position: Point) -> BezPath;
}

/// Kind-specific geometry of a shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ShapeKind {
    Rect(Rectangle),
    Circle(Circle),
    Star(Star),
    Text(Text),
}

impl ShapeKind {
    fn geometry(&self) -> &dyn ShapeGeometry {
        match self {
            ShapeKind::Rect(s) => s,
            ShapeKind::Circle(s) => s,
            ShapeKind::Star(s) => s,
            ShapeKind::Text(s) => s,
        }
    }

    /// Short kind name used in logs and layer listings.
    pub fn name(&self) -> &'static str {
        match self {
            ShapeKind::Rect(_) => "rect",
            ShapeKind::Circle(_) => "circle",
            ShapeKind::Star(_) => "star",
            ShapeKind::Text(_) => "text",
        }
    }

    /// Whether two kinds are the same variant (geometry may differ).
    pub fn same_variant(&self, other: &ShapeKind) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

/// Drop shadow painted beneath a shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Shadow {
    /// Blur radius in scene units.
    pub blur: f64,
    pub color: ShapeColor,
    #[serde(default)]
    pub offset: Vec2,
}

impl Shadow {
    /// Default shadow tint.
    pub const DEFAULT_COLOR: ShapeColor = ShapeColor::new(0, 0, 0, 77);

    /// Create a shadow with the default tint and no offset.
    pub fn new(blur: f64) -> Self {
        Self {
            blur,
            color: Self::DEFAULT_COLOR,
            offset: Vec2::ZERO,
        }
    }

    pub fn with_color(mut self, color: ShapeColor) -> Self {
        self.color = color;
        self
    }
}

/// Plain-data description of one drawable primitive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeDescriptor {
    /// Identifier, unique within a scene.
    pub id: String,
    pub kind: ShapeKind,
    /// Anchor position: top-left for rectangles and text, centre for circles and stars.
    pub position: Point,
    /// Rotation in degrees around the bounds centre.
    #[serde(default)]
    pub rotation: f64,
    pub fill: ShapeColor,
    #[serde(default)]
    pub shadow: Option<Shadow>,
    /// Paint rank; higher paints later.
    #[serde(default)]
    pub z_order: i32,
    #[serde(default = "default_true")]
    pub selectable: bool,
    #[serde(default)]
    pub draggable: bool,
}

fn default_true() -> bool {
    true
}

impl ShapeDescriptor {
    /// Create a descriptor with a black fill and default flags.
    pub fn new(id: impl Into<String>, kind: ShapeKind, position: Point) -> Self {
        Self {
            id: id.into(),
            kind,
            position,
            rotation: 0.0,
            fill: ShapeColor::black(),
            shadow: None,
            z_order: 0,
            selectable: true,
            draggable: false,
        }
    }

    /// Rectangle anchored at its top-left corner.
    pub fn rect(id: impl Into<String>, top_left: Point, width: f64, height: f64) -> Self {
        Self::new(id, ShapeKind::Rect(Rectangle::new(width, height)), top_left)
    }

    /// Circle anchored at its centre.
    pub fn circle(id: impl Into<String>, center: Point, radius: f64) -> Self {
        Self::new(id, ShapeKind::Circle(Circle::new(radius)), center)
    }

    /// Star anchored at its centre.
    pub fn star(
        id: impl Into<String>,
        center: Point,
        points: u32,
        inner_radius: f64,
        outer_radius: f64,
    ) -> Self {
        Self::new(
            id,
            ShapeKind::Star(Star::new(points, inner_radius, outer_radius)),
            center,
        )
    }

    /// Text anchored at the top-left of its layout box.
    pub fn text(id: impl Into<String>, top_left: Point, content: impl Into<String>, font_size: f64) -> Self {
        Self::new(
            id,
            ShapeKind::Text(Text::new(content).with_font_size(font_size)),
            top_left,
        )
    }

    pub fn with_fill(mut self, fill: ShapeColor) -> Self {
        self.fill = fill;
        self
    }

    pub fn with_shadow(mut self, shadow: Shadow) -> Self {
        self.shadow = Some(shadow);
        self
    }

    pub fn with_z_order(mut self, z_order: i32) -> Self {
        self.z_order = z_order;
        self
    }

    pub fn with_rotation(mut self, degrees: f64) -> Self {
        self.rotation = degrees;
        self
    }

    pub fn selectable(mut self, selectable: bool) -> Self {
        self.selectable = selectable;
        self
    }

    pub fn draggable(mut self, draggable: bool) -> Self {
        self.draggable = draggable;
        self
    }

    /// Unrotated bounding box.
    pub fn bounds(&self) -> Rect {
        self.kind.geometry().bounds(self.position)
    }

    /// Centre of the unrotated bounds (the rotation pivot).
    pub fn center(&self) -> Point {
        self.bounds().center()
    }

    /// Transform from the unrotated frame to scene coordinates.
    pub fn rotation_transform(&self) -> Affine {
        if self.rotation == 0.0 {
            Affine::IDENTITY
        } else {
            Affine::rotate_about(self.rotation.to_radians(), self.center())
        }
    }

    /// Check if a scene-space point hits this shape, honoring rotation.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let local = self.rotation_transform().inverse() * point;
        self.kind.geometry().contains(self.position, local, tolerance)
    }

    /// Outline in scene coordinates, rotation applied.
    pub fn to_path(&self) -> BezPath {
        let mut path = self.kind.geometry().to_path(self.position);
        if self.rotation != 0.0 {
            path.apply_affine(self.rotation_transform());
        }
        path
    }

    /// Text content, for text shapes.
    pub fn text_content(&self) -> Option<&str> {
        match &self.kind {
            ShapeKind::Text(text) => Some(text.content()),
            _ => None,
        }
    }

    /// Apply a partial update. Returns true if anything changed.
    ///
    /// Text on a non-text shape and kind replacements of a different variant
    /// are ignored.
    pub fn apply(&mut self, patch: &ShapePatch) -> bool {
        let mut changed = false;
        if let Some(position) = patch.position {
            changed |= self.position != position;
            self.position = position;
        }
        if let Some(fill) = patch.fill {
            changed |= self.fill != fill;
            self.fill = fill;
        }
        if let Some(rotation) = patch.rotation {
            changed |= self.rotation != rotation;
            self.rotation = rotation;
        }
        if let Some(kind) = &patch.kind {
            if self.kind.same_variant(kind) {
                changed |= self.kind != *kind;
                self.kind = kind.clone();
            } else {
                log::debug!(
                    "Ignoring {} geometry for {} shape {}",
                    kind.name(),
                    self.kind.name(),
                    self.id
                );
            }
        }
        if let Some(content) = &patch.text {
            match &mut self.kind {
                ShapeKind::Text(text) => {
                    changed |= text.content() != content;
                    text.set_content(content.clone());
                }
                _ => log::debug!("Ignoring text update for {} shape {}", self.kind.name(), self.id),
            }
        }
        changed
    }
}

/// Partial update of a shape's mutable fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShapePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Point>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<ShapeColor>,
    /// Rotation in degrees.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Replacement geometry of the same kind (resizing).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ShapeKind>,
}

impl ShapePatch {
    pub fn position(position: Point) -> Self {
        Self {
            position: Some(position),
            ..Self::default()
        }
    }

    pub fn fill(fill: ShapeColor) -> Self {
        Self {
            fill: Some(fill),
            ..Self::default()
        }
    }

    pub fn rotation(degrees: f64) -> Self {
        Self {
            rotation: Some(degrees),
            ..Self::default()
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        Self {
            text: Some(content.into()),
            ..Self::default()
        }
    }

    pub fn with_kind(mut self, kind: ShapeKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn with_position(mut self, position: Point) -> Self {
        self.position = Some(position);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.position.is_none()
            && self.fill.is_none()
            && self.rotation.is_none()
            && self.text.is_none()
            && self.kind.is_none()
    }
}

/// Distance from a point to a line segment (a→b).
pub fn point_to_segment_dist(point: Point, a: Point, b: Point) -> f64 {
    let seg = Vec2::new(b.x - a.x, b.y - a.y);
    let pv = Vec2::new(point.x - a.x, point.y - a.y);
    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        return pv.hypot();
    }
    let t = (pv.dot(seg) / len_sq).clamp(0.0, 1.0);
    let proj = Point::new(a.x + t * seg.x, a.y + t * seg.y);
    ((point.x - proj.x).powi(2) + (point.y - proj.y).powi(2)).sqrt()
}

/// Minimum distance from a point to a closed polygon's edges.
pub fn point_to_polygon_edge_dist(point: Point, vertices: &[Point]) -> f64 {
    if vertices.is_empty() {
        return f64::INFINITY;
    }
    let n = vertices.len();
    (0..n)
        .map(|i| point_to_segment_dist(point, vertices[i], vertices[(i + 1) % n]))
        .fold(f64::INFINITY, f64::min)
}

/// Even-odd point-in-polygon test.
pub fn polygon_contains(vertices: &[Point], point: Point) -> bool {
    let n = vertices.len();
    let mut inside = false;
    let mut j = n.wrapping_sub(1);
    for i in 0..n {
        let (a, b) = (vertices[i], vertices[j]);
        if (a.y > point.y) != (b.y > point.y)
            && point.x < (b.x - a.x) * (point.y - a.y) / (b.y - a.y) + a.x
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

//! Text shape.

use super::ShapeGeometry;
use kurbo::{BezPath, Point, Rect, Shape as KurboShape};
use serde::{Deserialize, Serialize};

/// Font style options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
}

/// A single- or multi-line text run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Text {
    content: String,
    /// Font size in pixels.
    pub font_size: f64,
    /// Font family name; empty means the platform sans-serif.
    #[serde(default)]
    pub font_family: String,
    #[serde(default)]
    pub font_style: FontStyle,
}

impl Text {
    /// Default font size.
    pub const DEFAULT_FONT_SIZE: f64 = 16.0;

    /// Line height as a multiple of the font size.
    pub const LINE_HEIGHT: f64 = 1.2;

    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            font_size: Self::DEFAULT_FONT_SIZE,
            font_family: String::new(),
            font_style: FontStyle::Normal,
        }
    }

    pub fn with_font_size(mut self, size: f64) -> Self {
        self.font_size = size;
        self
    }

    pub fn with_font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = family.into();
        self
    }

    pub fn with_font_style(mut self, style: FontStyle) -> Self {
        self.font_style = style;
        self
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn set_content(&mut self, content: String) {
        self.content = content;
    }

    /// Approximate width based on character count and font size.
    /// The renderer's shaped width depends on the installed fonts.
    fn approximate_width(&self) -> f64 {
        let max_line_len = self
            .content
            .lines()
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0);
        let char_width_factor = match self.font_style {
            FontStyle::Normal => 0.55,
            FontStyle::Italic => 0.52,
        };
        max_line_len as f64 * self.font_size * char_width_factor
    }

    /// Approximate height based on font size and number of lines.
    fn approximate_height(&self) -> f64 {
        let line_count = self.content.lines().count().max(1);
        let line_count = if self.content.ends_with('\n') {
            line_count + 1
        } else {
            line_count
        };
        line_count as f64 * self.font_size * Self::LINE_HEIGHT
    }
}

impl ShapeGeometry for Text {
    fn bounds(&self, position: Point) -> Rect {
        Rect::new(
            position.x,
            position.y,
            position.x + self.approximate_width().max(20.0),
            position.y + self.approximate_height(),
        )
    }

    fn contains(&self, position: Point, point: Point, tolerance: f64) -> bool {
        self.bounds(position).inflate(tolerance, tolerance).contains(point)
    }

    fn to_path(&self, position: Point) -> BezPath {
        // Text has no outline; the layout box stands in for selection.
        self.bounds(position).to_path(0.1)
    }
}

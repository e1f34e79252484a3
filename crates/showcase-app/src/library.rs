//! Library profiles and the example catalogue.
//!
//! Each profile reproduces one graphics library's page: which examples it
//! shows and how its interactions feel (rotation timing, selection look,
//! editable text).

use kurbo::Size;
use peniko::Color;
use serde::{Deserialize, Serialize};
use showcase_core::animation::TweenProfile;
use showcase_render::{PrimaryTrigger, SelectionAffordance};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// One of the seven interactive examples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExampleKind {
    BasicShapes,
    Dragging,
    Rotation,
    Text,
    Transform,
    Layers,
    Export,
}

impl ExampleKind {
    pub fn all() -> &'static [ExampleKind] {
        &[
            ExampleKind::BasicShapes,
            ExampleKind::Dragging,
            ExampleKind::Rotation,
            ExampleKind::Text,
            ExampleKind::Transform,
            ExampleKind::Layers,
            ExampleKind::Export,
        ]
    }

    /// 1-based position on a page.
    pub fn number(self) -> usize {
        match self {
            ExampleKind::BasicShapes => 1,
            ExampleKind::Dragging => 2,
            ExampleKind::Rotation => 3,
            ExampleKind::Text => 4,
            ExampleKind::Transform => 5,
            ExampleKind::Layers => 6,
            ExampleKind::Export => 7,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ExampleKind::BasicShapes => "Basic Shapes",
            ExampleKind::Dragging => "Draggable Elements",
            ExampleKind::Rotation => "Rotation & Animation",
            ExampleKind::Text => "Text Rendering",
            ExampleKind::Transform => "Transform with Handles (Rotate & Resize)",
            ExampleKind::Layers => "Layer Management (Reordering)",
            ExampleKind::Export => "Export Canvas (Multiple Sizes)",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ExampleKind::BasicShapes => "Rectangle, circle, and star with different colors and properties",
            ExampleKind::Dragging => "Drag the circle to move it around the canvas",
            ExampleKind::Rotation => "Click the star to rotate it",
            ExampleKind::Text => "Text rendering with various styling options",
            ExampleKind::Transform => "Click on a shape to select it, then use the handles to rotate and resize",
            ExampleKind::Layers => "Select a shape and control its stacking order",
            ExampleKind::Export => "Export the canvas at different resolutions for preview and print",
        }
    }

    /// Name used in file names and scripts.
    pub fn slug(self) -> &'static str {
        match self {
            ExampleKind::BasicShapes => "basic-shapes",
            ExampleKind::Dragging => "dragging",
            ExampleKind::Rotation => "rotation",
            ExampleKind::Text => "text",
            ExampleKind::Transform => "transform",
            ExampleKind::Layers => "layers",
            ExampleKind::Export => "export",
        }
    }

    /// Logical canvas size.
    pub fn canvas_size(self) -> (u32, u32) {
        match self {
            ExampleKind::Text => (600, 200),
            _ => (600, 300),
        }
    }

    pub fn base_size(self) -> Size {
        let (width, height) = self.canvas_size();
        Size::new(f64::from(width), f64::from(height))
    }

    /// Key of the canvas element this example draws on.
    pub fn canvas_key(self) -> String {
        format!("canvas-{}", self.number())
    }
}

impl fmt::Display for ExampleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for ExampleKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        ExampleKind::all()
            .iter()
            .copied()
            .find(|kind| kind.slug() == s || kind.number().to_string() == s)
            .ok_or_else(|| format!("unknown example: {s}"))
    }
}

/// A graphics library page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LibraryProfile {
    Konva,
    Fabric,
    Paper,
}

impl LibraryProfile {
    pub fn all() -> &'static [LibraryProfile] {
        &[LibraryProfile::Konva, LibraryProfile::Fabric, LibraryProfile::Paper]
    }

    pub fn name(self) -> &'static str {
        match self {
            LibraryProfile::Konva => "konva",
            LibraryProfile::Fabric => "fabric",
            LibraryProfile::Paper => "paper",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            LibraryProfile::Konva => "Konva (react-konva)",
            LibraryProfile::Fabric => "Fabric.js",
            LibraryProfile::Paper => "Paper.js",
        }
    }

    pub fn tagline(self) -> &'static str {
        match self {
            LibraryProfile::Konva => "Canvas-based 2D graphics library with React integration",
            LibraryProfile::Fabric => "Powerful canvas library with interactive object model",
            LibraryProfile::Paper => "Vector graphics scripting framework",
        }
    }

    /// Examples shown on this library's page, in page order.
    pub fn examples(self) -> &'static [ExampleKind] {
        match self {
            LibraryProfile::Konva => &ExampleKind::all()[..4],
            LibraryProfile::Fabric | LibraryProfile::Paper => ExampleKind::all(),
        }
    }

    pub fn greeting(self) -> &'static str {
        match self {
            LibraryProfile::Konva => "Hello from Konva!",
            LibraryProfile::Fabric => "Hello from Fabric.js!",
            LibraryProfile::Paper => "Hello from Paper.js!",
        }
    }

    /// Timing of the click-to-rotate animation.
    pub fn rotation_tween(self) -> TweenProfile {
        match self {
            LibraryProfile::Konva => TweenProfile::INSTANT,
            LibraryProfile::Fabric => TweenProfile::new(20, Duration::from_millis(300)),
            LibraryProfile::Paper => TweenProfile::per_frame(10, Duration::from_millis(16)),
        }
    }

    pub fn affordance(self) -> SelectionAffordance {
        match self {
            LibraryProfile::Konva | LibraryProfile::Fabric => SelectionAffordance::Handles,
            LibraryProfile::Paper => SelectionAffordance::Outline,
        }
    }

    pub fn selection_color(self) -> Color {
        match self {
            LibraryProfile::Paper => Color::from_rgba8(0x00, 0x66, 0xcc, 255),
            LibraryProfile::Konva | LibraryProfile::Fabric => Color::from_rgba8(59, 130, 246, 255),
        }
    }

    /// Konva reacts to clicks; the others act as soon as the button goes down.
    pub fn primary_trigger(self) -> PrimaryTrigger {
        match self {
            LibraryProfile::Konva => PrimaryTrigger::Release,
            LibraryProfile::Fabric | LibraryProfile::Paper => PrimaryTrigger::Press,
        }
    }

    /// Whether the text example exposes editable fields.
    pub fn text_editable(self) -> bool {
        !matches!(self, LibraryProfile::Konva)
    }
}

impl fmt::Display for LibraryProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LibraryProfile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "konva" | "react-konva" => Ok(LibraryProfile::Konva),
            "fabric" | "fabric.js" | "fabricjs" => Ok(LibraryProfile::Fabric),
            "paper" | "paper.js" | "paperjs" => Ok(LibraryProfile::Paper),
            other => Err(format!("unknown library: {other}")),
        }
    }
}

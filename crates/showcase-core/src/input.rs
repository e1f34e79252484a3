//! Pointer input delivered to adapters.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Distance in display pixels a press must travel before it counts as a drag.
pub const DRAG_THRESHOLD: f64 = 3.0;

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MouseButton {
    #[default]
    Left,
    Right,
    Middle,
}

/// Pointer event in display (surface pixel) coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerEvent {
    Down {
        position: Point,
        #[serde(default)]
        button: MouseButton,
    },
    Up {
        position: Point,
        #[serde(default)]
        button: MouseButton,
    },
    Move {
        position: Point,
    },
    /// Pointer left the surface.
    Leave,
}

impl PointerEvent {
    pub fn down(x: f64, y: f64) -> Self {
        PointerEvent::Down {
            position: Point::new(x, y),
            button: MouseButton::Left,
        }
    }

    pub fn up(x: f64, y: f64) -> Self {
        PointerEvent::Up {
            position: Point::new(x, y),
            button: MouseButton::Left,
        }
    }

    pub fn moved(x: f64, y: f64) -> Self {
        PointerEvent::Move {
            position: Point::new(x, y),
        }
    }

    pub fn position(&self) -> Option<Point> {
        match self {
            PointerEvent::Down { position, .. }
            | PointerEvent::Up { position, .. }
            | PointerEvent::Move { position } => Some(*position),
            PointerEvent::Leave => None,
        }
    }

    /// Only the primary button drives interactions.
    pub fn is_primary(&self) -> bool {
        match self {
            PointerEvent::Down { button, .. } | PointerEvent::Up { button, .. } => {
                *button == MouseButton::Left
            }
            PointerEvent::Move { .. } | PointerEvent::Leave => true,
        }
    }
}

/// An in-progress press, tracked between `Down` and `Up`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PressState {
    /// Press location in scene coordinates.
    pub start: Point,
    /// Latest pointer location in scene coordinates.
    pub current: Point,
    /// Whether the threshold was crossed.
    pub dragging: bool,
}

impl PressState {
    pub fn new(start: Point) -> Self {
        Self {
            start,
            current: start,
            dragging: false,
        }
    }

    /// Record a pointer move; returns true once the press has become a drag.
    /// `threshold` is in the same units as the positions.
    pub fn update(&mut self, position: Point, threshold: f64) -> bool {
        self.current = position;
        if !self.dragging && self.start.distance(position) >= threshold {
            self.dragging = true;
        }
        self.dragging
    }
}

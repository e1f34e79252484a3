//! Normalized events surfaced by canvas adapters.

use crate::shapes::ShapePatch;
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque reference to a shape registered with one adapter.
///
/// References are never reused by an adapter, so a reference kept across a
/// scene reset no longer resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ShapeRef(u64);

impl ShapeRef {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ShapeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "shape#{}", self.0)
    }
}

/// Event emitted by an adapter in response to input or commands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdapterEvent {
    /// Pointer entered or left a shape.
    Hover { shape: ShapeRef, entering: bool },
    /// A draggable shape moved to a new anchor position.
    DragMove { shape: ShapeRef, position: Point },
    /// Press and release without dragging; `None` is the empty area.
    Click(Option<ShapeRef>),
    /// Press on a shape (click-to-act trigger).
    PrimaryAction(ShapeRef),
    /// The selection affordance moved to another shape or was hidden.
    SelectionChanged(Option<ShapeRef>),
    /// A transform handle changed a shape's geometry.
    Transformed { shape: ShapeRef, patch: ShapePatch },
}

impl AdapterEvent {
    /// The shape this event concerns, if any.
    pub fn shape(&self) -> Option<ShapeRef> {
        match self {
            AdapterEvent::Hover { shape, .. }
            | AdapterEvent::DragMove { shape, .. }
            | AdapterEvent::PrimaryAction(shape)
            | AdapterEvent::Transformed { shape, .. } => Some(*shape),
            AdapterEvent::Click(shape) | AdapterEvent::SelectionChanged(shape) => *shape,
        }
    }
}

//! Canvas adapter abstraction.
//!
//! A [`CanvasAdapter`] is the single boundary between scene controllers and a
//! drawing backend. The adapter value itself is the handle: it owns one bound
//! [`Surface`] from `open` until `close` (or drop).

use crate::export::{ExportError, RasterImage};
use crate::surface::Surface;
use kurbo::Size;
use peniko::Color;
use showcase_core::events::{AdapterEvent, ShapeRef};
use showcase_core::input::PointerEvent;
use showcase_core::layers::ReorderDirection;
use showcase_core::shapes::{ShapeDescriptor, ShapePatch};
use thiserror::Error;

/// Adapter errors.
#[derive(Debug, Error)]
pub enum AdapterError {
    /// The surface is missing, detached or already in use. Retry on the next mount.
    #[error("Drawing surface unavailable: {0}")]
    SurfaceUnavailable(String),
    /// The handle was closed.
    #[error("Adapter handle is closed")]
    InvalidHandle,
    /// The reference does not name a shape on this adapter.
    #[error("Unknown shape reference: {0}")]
    UnknownShape(ShapeRef),
    #[error("Raster export failed: {0}")]
    Export(#[from] ExportError),
}

/// Result type for adapter operations.
pub type AdapterResult<T> = Result<T, AdapterError>;

/// How the selected shape is highlighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionAffordance {
    /// Bounds outline with corner resize handles and a rotate handle.
    #[default]
    Handles,
    /// Dashed highlight outline only.
    Outline,
}

/// When a press on a shape reports [`AdapterEvent::PrimaryAction`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrimaryTrigger {
    /// As soon as the button goes down.
    #[default]
    Press,
    /// On release, when the press stayed a click.
    Release,
}

/// Options for opening an adapter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdapterOptions {
    /// Logical canvas width in scene units.
    pub width: u32,
    /// Logical canvas height in scene units.
    pub height: u32,
    pub background: Color,
    pub affordance: SelectionAffordance,
    pub selection_color: Color,
    pub primary_trigger: PrimaryTrigger,
}

impl AdapterOptions {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            background: Color::WHITE,
            affordance: SelectionAffordance::Handles,
            selection_color: Color::from_rgba8(59, 130, 246, 255), // Blue
            primary_trigger: PrimaryTrigger::Press,
        }
    }

    pub fn with_background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    pub fn with_affordance(mut self, affordance: SelectionAffordance) -> Self {
        self.affordance = affordance;
        self
    }

    pub fn with_selection_color(mut self, color: Color) -> Self {
        self.selection_color = color;
        self
    }

    pub fn with_primary_trigger(mut self, trigger: PrimaryTrigger) -> Self {
        self.primary_trigger = trigger;
        self
    }

    pub fn base_size(&self) -> Size {
        Size::new(f64::from(self.width), f64::from(self.height))
    }
}

/// Uniform contract every drawing backend implements.
///
/// Every operation on a closed adapter fails with
/// [`AdapterError::InvalidHandle`]; every operation naming a reference the
/// adapter does not know fails with [`AdapterError::UnknownShape`].
pub trait CanvasAdapter {
    /// Bind to a surface. `None`, a detached surface, or a surface already
    /// bound to a live adapter yields [`AdapterError::SurfaceUnavailable`].
    fn open(surface: Option<&Surface>, options: AdapterOptions) -> AdapterResult<Self>
    where
        Self: Sized;

    /// Register a shape, placed in paint order by its `z_order`.
    fn add_shape(&mut self, shape: &ShapeDescriptor) -> AdapterResult<ShapeRef>;

    /// Apply a partial update and schedule a repaint.
    fn update_shape(&mut self, shape: ShapeRef, patch: &ShapePatch) -> AdapterResult<()>;

    /// The adapter's current copy of a shape.
    fn shape(&self, shape: ShapeRef) -> AdapterResult<&ShapeDescriptor>;

    /// Show or hide the selection affordance. Queues
    /// [`AdapterEvent::SelectionChanged`] when the selection changes.
    fn set_selection(&mut self, shape: Option<ShapeRef>) -> AdapterResult<()>;

    fn selection(&self) -> AdapterResult<Option<ShapeRef>>;

    /// Change a shape's paint rank. Returns false at a boundary.
    fn reorder(&mut self, shape: ShapeRef, direction: ReorderDirection) -> AdapterResult<bool>;

    /// Shape references back to front.
    fn paint_order(&self) -> AdapterResult<Vec<ShapeRef>>;

    /// Rasterize the scene at `scale` times the base size, without the
    /// selection affordance and regardless of the viewport scale.
    fn export_raster(&mut self, scale: f64) -> AdapterResult<RasterImage>;

    /// The display raster at the current viewport scale.
    fn frame(&mut self) -> AdapterResult<RasterImage>;

    /// Set the uniform viewport scale. Shape coordinates are unchanged.
    fn rescale(&mut self, scale: f64) -> AdapterResult<()>;

    /// Feed one pointer event in display coordinates.
    fn handle_pointer(&mut self, event: &PointerEvent) -> AdapterResult<()>;

    /// Take the queued events.
    fn drain_events(&mut self) -> AdapterResult<Vec<AdapterEvent>>;

    /// Release the surface and drop all shapes and listeners. Idempotent.
    fn close(&mut self);

    fn is_open(&self) -> bool;
}

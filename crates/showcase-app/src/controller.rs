//! Per-example scene controller.
//!
//! A [`SceneController`] owns one example's [`SceneState`] and the adapter
//! drawing it. Pointer input goes to the adapter; the events it queues are
//! drained right away and turned into state updates and adapter commands.
//! Adapter failures never reach the caller: they are logged and absorbed.

use crate::config::{ConfigError, ShowcaseConfig};
use crate::download::{Download, ExportKind};
use crate::library::{ExampleKind, LibraryProfile};
use crate::seeds::{self, DRAG_CIRCLE, DRAG_LABEL, DRAG_LABEL_OFFSET, HOVER_RECT, SPIN_STAR, TEXT_FIELDS};
use showcase_core::animation::{ROTATION_STEP_DEGREES, Spinner};
use showcase_core::color::ShapeColor;
use showcase_core::events::{AdapterEvent, ShapeRef};
use showcase_core::input::PointerEvent;
use showcase_core::layers::ReorderDirection;
use showcase_core::scene::SceneState;
use showcase_core::shapes::ShapePatch;
use showcase_render::{AdapterError, AdapterOptions, AdapterResult, CanvasAdapter, RasterImage, Surface};
use std::collections::BTreeMap;
use std::time::Duration;

/// Settings shared by every controller on a page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControllerSettings {
    pub background: ShapeColor,
    pub preview_scale: f64,
    pub print_scale: f64,
    /// Viewport scale applied right after mounting.
    pub display_scale: f64,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            background: ShapeColor::white(),
            preview_scale: 1.0,
            print_scale: 3.0,
            display_scale: 1.0,
        }
    }
}

impl ControllerSettings {
    pub fn from_config(config: &ShowcaseConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            background: config.background_color()?,
            preview_scale: config.preview_scale,
            print_scale: config.print_scale,
            display_scale: 1.0,
        })
    }

    pub fn export_scale(&self, kind: ExportKind) -> f64 {
        match kind {
            ExportKind::Preview => self.preview_scale,
            ExportKind::Print => self.print_scale,
        }
    }
}

/// Hover-recolor state of the basic shapes example.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HoverState {
    #[default]
    Idle,
    Hovered,
}

/// Log an adapter failure and turn it into a no-op.
fn absorb<T>(example: ExampleKind, op: &str, result: AdapterResult<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(AdapterError::UnknownShape(shape)) => {
            log::debug!("{example}: {op} ignored stale {shape}");
            None
        }
        Err(AdapterError::InvalidHandle) => {
            log::error!("{example}: {op} on a closed adapter");
            debug_assert!(false, "{op} on a closed adapter");
            None
        }
        Err(AdapterError::SurfaceUnavailable(reason)) => {
            log::warn!("{example}: {op} skipped, surface unavailable: {reason}");
            None
        }
        Err(err @ AdapterError::Export(_)) => {
            log::error!("{example}: {op} failed: {err}");
            None
        }
    }
}

/// Controller for one example canvas.
pub struct SceneController<A: CanvasAdapter> {
    example: ExampleKind,
    profile: LibraryProfile,
    settings: ControllerSettings,
    adapter: A,
    scene: SceneState,
    /// Shape id to adapter reference.
    refs: BTreeMap<String, ShapeRef>,
    hover: HoverState,
    spinner: Option<Spinner>,
    closed: bool,
}

impl<A: CanvasAdapter> SceneController<A> {
    /// Open an adapter on `surface` and seed it with the example's shapes.
    pub fn mount(
        example: ExampleKind,
        profile: LibraryProfile,
        surface: Option<&Surface>,
        settings: &ControllerSettings,
    ) -> AdapterResult<Self> {
        let (width, height) = example.canvas_size();
        let options = AdapterOptions::new(width, height)
            .with_background(settings.background.into())
            .with_affordance(profile.affordance())
            .with_selection_color(profile.selection_color())
            .with_primary_trigger(profile.primary_trigger());
        let mut adapter = A::open(surface, options)?;

        let shapes = seeds::seed_shapes(example, profile);
        let mut scene = SceneState::new();
        let mut refs = BTreeMap::new();
        for shape in shapes {
            let shape_ref = adapter.add_shape(&shape)?;
            refs.insert(shape.id.clone(), shape_ref);
            if let Err(err) = scene.insert(shape) {
                log::error!("{example}: bad seed: {err}");
            }
        }
        if example == ExampleKind::Text {
            scene.live_text_fields = seeds::text_field_defaults(profile)
                .into_iter()
                .map(|(name, value)| (name.to_string(), value))
                .collect();
        }
        if (settings.display_scale - 1.0).abs() > f64::EPSILON {
            adapter.rescale(settings.display_scale)?;
        }

        let spinner = (example == ExampleKind::Rotation).then(|| Spinner::new(0.0, profile.rotation_tween()));
        log::debug!("Mounted {example} on the {profile} page ({} shapes)", refs.len());

        Ok(Self {
            example,
            profile,
            settings: *settings,
            adapter,
            scene,
            refs,
            hover: HoverState::Idle,
            spinner,
            closed: false,
        })
    }

    pub fn example(&self) -> ExampleKind {
        self.example
    }

    pub fn profile(&self) -> LibraryProfile {
        self.profile
    }

    pub fn scene(&self) -> &SceneState {
        &self.scene
    }

    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    pub fn hover_state(&self) -> HoverState {
        self.hover
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn shape_ref(&self, id: &str) -> Option<ShapeRef> {
        self.refs.get(id).copied()
    }

    fn shape_id(&self, shape_ref: ShapeRef) -> Option<String> {
        self.refs
            .iter()
            .find(|(_, r)| **r == shape_ref)
            .map(|(id, _)| id.clone())
    }

    /// Forward a pointer event and process whatever the adapter reports.
    pub fn handle_pointer(&mut self, event: &PointerEvent) {
        if self.closed {
            return;
        }
        let result = self.adapter.handle_pointer(event);
        if absorb(self.example, "pointer", result).is_some() {
            self.pump();
        }
    }

    /// Drain adapter events until the queue stays empty. Handling one event
    /// may queue more (a click selects, selecting reports the change).
    fn pump(&mut self) {
        loop {
            let result = self.adapter.drain_events();
            let events = absorb(self.example, "drain", result).unwrap_or_default();
            if events.is_empty() {
                break;
            }
            for event in events {
                self.on_event(event);
            }
        }
    }

    fn on_event(&mut self, event: AdapterEvent) {
        let example = self.example;
        let id = event.shape().and_then(|r| self.shape_id(r));
        match event {
            AdapterEvent::Hover { entering, .. } => {
                if example == ExampleKind::BasicShapes && id.as_deref() == Some(HOVER_RECT) {
                    self.set_hovered(entering);
                }
            }
            AdapterEvent::DragMove { position, .. } => {
                let Some(id) = id else { return };
                self.scene.update(&id, &ShapePatch::position(position));
                if example == ExampleKind::Dragging && id == DRAG_CIRCLE {
                    self.apply(DRAG_LABEL, &ShapePatch::position(position + DRAG_LABEL_OFFSET));
                }
            }
            AdapterEvent::PrimaryAction(_) => {
                if example == ExampleKind::Rotation && id.as_deref() == Some(SPIN_STAR) {
                    self.rotate();
                }
            }
            AdapterEvent::Click(target) => {
                if Self::selects_on_click(example) {
                    let result = self.adapter.set_selection(target);
                    absorb(example, "select", result);
                }
            }
            AdapterEvent::SelectionChanged(_) => match id {
                Some(id) => {
                    self.scene.select(&id);
                }
                None => self.scene.clear_selection(),
            },
            AdapterEvent::Transformed { patch, .. } => {
                if let Some(id) = id {
                    self.scene.update(&id, &patch);
                }
            }
        }
    }

    fn selects_on_click(example: ExampleKind) -> bool {
        matches!(example, ExampleKind::Transform | ExampleKind::Layers)
    }

    fn set_hovered(&mut self, hovered: bool) {
        let (state, fill) = if hovered {
            (HoverState::Hovered, seeds::RECT_HOVER_FILL)
        } else {
            (HoverState::Idle, seeds::RECT_FILL)
        };
        if self.hover == state {
            return;
        }
        self.hover = state;
        self.apply(HOVER_RECT, &ShapePatch::fill(fill));
    }

    /// Update a shape in both the scene and the adapter.
    fn apply(&mut self, id: &str, patch: &ShapePatch) {
        self.scene.update(id, patch);
        let Some(shape_ref) = self.shape_ref(id) else {
            return;
        };
        let result = self.adapter.update_shape(shape_ref, patch);
        absorb(self.example, "update", result);
    }

    fn rotate(&mut self) {
        let Some(spinner) = self.spinner.as_mut() else {
            return;
        };
        if let Some(angle) = spinner.request(ROTATION_STEP_DEGREES) {
            self.apply(SPIN_STAR, &ShapePatch::rotation(angle));
        }
    }

    /// Advance the rotation animation.
    pub fn tick(&mut self, dt: Duration) {
        if self.closed {
            return;
        }
        let Some(angle) = self.spinner.as_mut().and_then(|s| s.tick(dt)) else {
            return;
        };
        self.apply(SPIN_STAR, &ShapePatch::rotation(angle));
    }

    pub fn is_animating(&self) -> bool {
        self.spinner.as_ref().is_some_and(Spinner::is_animating)
    }

    /// Angle all rotation requests add up to.
    pub fn rotation(&self) -> Option<f64> {
        self.spinner.as_ref().map(Spinner::logical)
    }

    pub fn rotation_label(&self) -> Option<String> {
        self.rotation().map(|angle| format!("Current rotation: {angle:.0}°"))
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.scene.selected_id()
    }

    pub fn selection_label(&self) -> String {
        match self.scene.selected() {
            Some(shape) => format!("Selected: {} ({})", shape.id, shape.kind.name()),
            None => "Click on a shape to select it".to_string(),
        }
    }

    /// Whether the layer buttons are enabled.
    pub fn reorder_enabled(&self) -> bool {
        self.example == ExampleKind::Layers && !self.closed && self.scene.selected_id().is_some()
    }

    /// Reorder the selected shape. Returns false if the buttons are disabled
    /// or the shape is already at that boundary.
    pub fn reorder(&mut self, direction: ReorderDirection) -> bool {
        if !self.reorder_enabled() {
            return false;
        }
        let Some(id) = self.scene.selected_id().map(str::to_string) else {
            return false;
        };
        let Some(shape_ref) = self.shape_ref(&id) else {
            return false;
        };
        let result = self.adapter.reorder(shape_ref, direction);
        let moved = absorb(self.example, "reorder", result).unwrap_or(false);
        if moved {
            self.scene.reorder(&id, direction);
            log::debug!("{}: moved {id} {direction}", self.example);
        }
        moved
    }

    /// Shape ids back to front, as the layer list shows them.
    pub fn paint_order(&self) -> Vec<&str> {
        self.scene.paint_order()
    }

    pub fn text_field(&self, name: &str) -> Option<&str> {
        self.scene.live_text_fields.get(name).map(String::as_str)
    }

    /// Type into a text field. Returns false if the field is unknown or not
    /// editable on this page.
    pub fn set_text_field(&mut self, name: &str, value: &str) -> bool {
        if self.example != ExampleKind::Text || !self.profile.text_editable() || self.closed {
            return false;
        }
        let Some((_, shape_id)) = TEXT_FIELDS.iter().find(|(field, _)| *field == name) else {
            return false;
        };
        self.scene.live_text_fields.insert(name.to_string(), value.to_string());
        self.apply(shape_id, &ShapePatch::text(value));
        true
    }

    /// Rasterize the scene for download.
    pub fn export(&mut self, kind: ExportKind) -> Option<Download> {
        if self.closed {
            return None;
        }
        let result = self.adapter.export_raster(self.settings.export_scale(kind));
        let image = absorb(self.example, "export", result)?;
        log::info!("{}: exported {} at {}x{}", self.example, kind, image.width, image.height);
        Some(Download {
            file_name: kind.file_name().to_string(),
            width: image.width,
            height: image.height,
            bytes: image.png,
        })
    }

    /// Current display raster, selection included.
    pub fn snapshot(&mut self) -> Option<RasterImage> {
        if self.closed {
            return None;
        }
        let result = self.adapter.frame();
        absorb(self.example, "snapshot", result)
    }

    pub fn rescale(&mut self, scale: f64) {
        if self.closed {
            return;
        }
        self.settings.display_scale = scale;
        let result = self.adapter.rescale(scale);
        absorb(self.example, "rescale", result);
    }

    /// Release the surface. Safe to call more than once.
    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        self.adapter.close();
        log::debug!("Closed {} on the {} page", self.example, self.profile);
    }
}

impl<A: CanvasAdapter> Drop for SceneController<A> {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;
    use showcase_render::SkiaAdapter;

    fn mount(example: ExampleKind, profile: LibraryProfile) -> (Surface, SceneController<SkiaAdapter>) {
        let surface = Surface::new();
        let controller = SceneController::mount(example, profile, Some(&surface), &ControllerSettings::default()).unwrap();
        (surface, controller)
    }

    fn click(controller: &mut SceneController<SkiaAdapter>, x: f64, y: f64) {
        controller.handle_pointer(&PointerEvent::down(x, y));
        controller.handle_pointer(&PointerEvent::up(x, y));
    }

    #[test]
    fn test_hover_recolors_rect() {
        let (_surface, mut controller) = mount(ExampleKind::BasicShapes, LibraryProfile::Konva);
        controller.handle_pointer(&PointerEvent::moved(100.0, 90.0));
        assert_eq!(controller.hover_state(), HoverState::Hovered);
        assert_eq!(controller.scene().get(HOVER_RECT).unwrap().fill, seeds::RECT_HOVER_FILL);
        let rect = controller.shape_ref(HOVER_RECT).unwrap();
        assert_eq!(controller.adapter().shape(rect).unwrap().fill, seeds::RECT_HOVER_FILL);

        controller.handle_pointer(&PointerEvent::moved(580.0, 280.0));
        assert_eq!(controller.hover_state(), HoverState::Idle);
        assert_eq!(controller.scene().get(HOVER_RECT).unwrap().fill, seeds::RECT_FILL);
    }

    #[test]
    fn test_hover_on_other_shapes_is_ignored() {
        let (_surface, mut controller) = mount(ExampleKind::BasicShapes, LibraryProfile::Fabric);
        controller.handle_pointer(&PointerEvent::moved(250.0, 90.0));
        assert_eq!(controller.hover_state(), HoverState::Idle);
    }

    #[test]
    fn test_drag_moves_label_with_circle() {
        let (_surface, mut controller) = mount(ExampleKind::Dragging, LibraryProfile::Fabric);
        controller.handle_pointer(&PointerEvent::down(100.0, 200.0));
        controller.handle_pointer(&PointerEvent::moved(200.0, 180.0));
        controller.handle_pointer(&PointerEvent::up(200.0, 180.0));

        assert_eq!(controller.scene().get(DRAG_CIRCLE).unwrap().position, Point::new(200.0, 180.0));
        assert_eq!(controller.scene().get(DRAG_LABEL).unwrap().position, Point::new(170.0, 120.0));
        let circle = controller.shape_ref(DRAG_CIRCLE).unwrap();
        assert_eq!(controller.adapter().shape(circle).unwrap().position, Point::new(200.0, 180.0));
    }

    #[test]
    fn test_instant_rotation() {
        let (_surface, mut controller) = mount(ExampleKind::Rotation, LibraryProfile::Konva);
        click(&mut controller, 300.0, 150.0);
        assert_eq!(controller.rotation_label().as_deref(), Some("Current rotation: 45°"));
        assert!(!controller.is_animating());
        assert!((controller.scene().get(SPIN_STAR).unwrap().rotation - 45.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_tweened_rotation_lands_exactly() {
        let (_surface, mut controller) = mount(ExampleKind::Rotation, LibraryProfile::Fabric);
        click(&mut controller, 300.0, 150.0);
        assert!(controller.is_animating());
        assert_eq!(controller.rotation(), Some(45.0));
        for _ in 0..40 {
            controller.tick(Duration::from_millis(15));
        }
        assert!(!controller.is_animating());
        assert_eq!(controller.scene().get(SPIN_STAR).unwrap().rotation, 45.0);
    }

    #[test]
    fn test_click_selects_and_empty_click_clears() {
        let (_surface, mut controller) = mount(ExampleKind::Layers, LibraryProfile::Fabric);
        assert!(!controller.reorder_enabled());
        click(&mut controller, 250.0, 90.0);
        assert_eq!(controller.selected_id(), Some("circle1"));
        assert!(controller.reorder_enabled());

        click(&mut controller, 560.0, 280.0);
        assert_eq!(controller.selected_id(), None);
        assert!(!controller.reorder_enabled());
        assert!(!controller.reorder(ReorderDirection::Front));
    }

    #[test]
    fn test_reorder_mirrors_adapter() {
        let (_surface, mut controller) = mount(ExampleKind::Layers, LibraryProfile::Paper);
        click(&mut controller, 100.0, 90.0);
        assert!(controller.reorder(ReorderDirection::Front));
        assert_eq!(controller.paint_order(), vec!["circle1", "star1", "rect1"]);
        assert!(!controller.reorder(ReorderDirection::Front));

        let ids: Vec<String> = controller
            .adapter()
            .paint_order()
            .unwrap()
            .into_iter()
            .map(|r| controller.shape_id(r).unwrap())
            .collect();
        assert_eq!(ids, vec!["circle1", "star1", "rect1"]);
    }

    #[test]
    fn test_text_fields() {
        let (_surface, mut controller) = mount(ExampleKind::Text, LibraryProfile::Fabric);
        assert_eq!(controller.text_field("first"), Some("Hello from Fabric.js!"));
        assert!(controller.set_text_field("second", ""));
        assert_eq!(controller.scene().get("text2").unwrap().text_content(), Some(""));
        assert!(!controller.set_text_field("third", "x"));

        let (_surface, mut konva) = mount(ExampleKind::Text, LibraryProfile::Konva);
        assert!(!konva.set_text_field("first", "changed"));
        assert_eq!(konva.text_field("first"), Some("Hello from Konva!"));
    }

    #[test]
    fn test_export_sizes() {
        let (_surface, mut controller) = mount(ExampleKind::Export, LibraryProfile::Fabric);
        let preview = controller.export(ExportKind::Preview).unwrap();
        assert_eq!((preview.width, preview.height), (600, 300));
        assert_eq!(preview.file_name, "canvas-preview.png");
        let print = controller.export(ExportKind::Print).unwrap();
        assert_eq!((print.width, print.height), (1800, 900));
    }

    #[test]
    fn test_close_releases_surface_once() {
        let (surface, mut controller) = mount(ExampleKind::BasicShapes, LibraryProfile::Konva);
        assert!(surface.is_bound());
        controller.close();
        controller.close();
        assert!(!surface.is_bound());
        // Closed controllers ignore input instead of tripping the handle check.
        controller.handle_pointer(&PointerEvent::moved(100.0, 90.0));
        assert!(controller.export(ExportKind::Preview).is_none());
    }
}

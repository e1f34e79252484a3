//! Software canvas adapter built on tiny-skia.

use crate::adapter::{AdapterError, AdapterOptions, AdapterResult, CanvasAdapter, PrimaryTrigger, SelectionAffordance};
use crate::export::{RasterImage, encode_png};
use crate::raster::{self, FrameSpec};
use crate::surface::{Surface, SurfaceBinding};
use kurbo::Point;
use showcase_core::color::ShapeColor;
use showcase_core::events::{AdapterEvent, ShapeRef};
use showcase_core::input::{DRAG_THRESHOLD, PointerEvent, PressState};
use showcase_core::layers::{self, ReorderDirection};
use showcase_core::selection::{HANDLE_HIT_TOLERANCE, HandleKind, ManipulationState, hit_test_handles};
use showcase_core::shapes::{ShapeDescriptor, ShapePatch};
use showcase_core::viewport::{Viewport, scaled_pixels};
use tiny_skia::Pixmap;

/// Hit tolerance for shape picking, in screen pixels.
const PICK_TOLERANCE: f64 = 0.0;

#[derive(Debug)]
struct Entry {
    shape_ref: ShapeRef,
    shape: ShapeDescriptor,
}

/// A press in progress.
#[derive(Debug)]
struct Press {
    state: PressState,
    /// Shape under the pointer when pressed (`None` = empty area).
    target: Option<ShapeRef>,
    /// Set when the press moves or transforms its target.
    manipulation: Option<ManipulationState>,
}

/// Everything an open adapter owns.
#[derive(Debug)]
struct OpenState {
    binding: SurfaceBinding,
    options: AdapterOptions,
    viewport: Viewport,
    /// Back to front.
    entries: Vec<Entry>,
    next_ref: u64,
    selected: Option<ShapeRef>,
    hovered: Option<ShapeRef>,
    press: Option<Press>,
    events: Vec<AdapterEvent>,
    /// Cached display raster; `None` when dirty.
    frame: Option<Pixmap>,
}

impl OpenState {
    fn index_of(&self, shape_ref: ShapeRef) -> AdapterResult<usize> {
        self.entries
            .iter()
            .position(|e| e.shape_ref == shape_ref)
            .ok_or(AdapterError::UnknownShape(shape_ref))
    }

    fn entry(&self, shape_ref: ShapeRef) -> AdapterResult<&Entry> {
        let index = self.index_of(shape_ref)?;
        Ok(&self.entries[index])
    }

    fn invalidate(&mut self) {
        self.frame = None;
    }

    /// Topmost selectable shape under a scene point.
    fn pick(&self, point: Point) -> Option<ShapeRef> {
        let tolerance = PICK_TOLERANCE / self.viewport.scale();
        self.entries
            .iter()
            .rev()
            .find(|e| e.shape.selectable && e.shape.hit_test(point, tolerance))
            .map(|e| e.shape_ref)
    }

    /// Transform handle of the selected shape under a scene point.
    fn pick_handle(&self, point: Point) -> Option<(ShapeRef, HandleKind)> {
        if self.options.affordance != SelectionAffordance::Handles {
            return None;
        }
        let selected = self.selected?;
        let entry = self.entry(selected).ok()?;
        let tolerance = HANDLE_HIT_TOLERANCE / self.viewport.scale();
        hit_test_handles(&entry.shape, point, tolerance).map(|kind| (selected, kind))
    }

    fn set_hovered(&mut self, hovered: Option<ShapeRef>) {
        if self.hovered == hovered {
            return;
        }
        if let Some(previous) = self.hovered.take() {
            self.events.push(AdapterEvent::Hover {
                shape: previous,
                entering: false,
            });
        }
        if let Some(current) = hovered {
            self.events.push(AdapterEvent::Hover {
                shape: current,
                entering: true,
            });
        }
        self.hovered = hovered;
    }

    fn pointer_down(&mut self, point: Point) {
        let handle_hit = self
            .pick_handle(point)
            .and_then(|(shape_ref, handle)| Some((shape_ref, handle, self.entry(shape_ref).ok()?.shape.clone())));
        if let Some((shape_ref, handle, original)) = handle_hit {
            self.press = Some(Press {
                state: PressState::new(point),
                target: Some(shape_ref),
                manipulation: Some(ManipulationState::new(shape_ref, Some(handle), point, original)),
            });
            return;
        }

        let target = self.pick(point);
        let manipulation = target.and_then(|shape_ref| {
            let entry = self.entry(shape_ref).ok()?;
            entry
                .shape
                .draggable
                .then(|| ManipulationState::new(shape_ref, None, point, entry.shape.clone()))
        });
        if let Some(shape_ref) = target
            .filter(|_| self.options.primary_trigger == PrimaryTrigger::Press)
        {
            self.events.push(AdapterEvent::PrimaryAction(shape_ref));
        }
        self.press = Some(Press {
            state: PressState::new(point),
            target,
            manipulation,
        });
    }

    fn pointer_move(&mut self, point: Point) {
        let threshold = DRAG_THRESHOLD / self.viewport.scale();
        let Some(press) = self.press.as_mut() else {
            let hovered = self.pick(point);
            self.set_hovered(hovered);
            return;
        };
        if !press.state.update(point, threshold) {
            return;
        }
        let Some(manipulation) = press.manipulation.as_mut() else {
            return;
        };
        manipulation.current_point = point;
        let patch = manipulation.patch();
        let shape_ref = manipulation.target;
        let handle = manipulation.handle;

        let Ok(index) = self.index_of(shape_ref) else {
            return;
        };
        if !self.entries[index].shape.apply(&patch) {
            return;
        }
        self.invalidate();
        let event = match handle {
            None => AdapterEvent::DragMove {
                shape: shape_ref,
                position: self.entries[index].shape.position,
            },
            Some(_) => AdapterEvent::Transformed {
                shape: shape_ref,
                patch,
            },
        };
        self.events.push(event);
    }

    fn pointer_up(&mut self, point: Point) {
        let Some(press) = self.press.take() else {
            return;
        };
        let on_handle = press.manipulation.as_ref().is_some_and(|m| m.handle.is_some());
        if !press.state.dragging && !on_handle {
            if let Some(shape_ref) = press
                .target
                .filter(|_| self.options.primary_trigger == PrimaryTrigger::Release)
            {
                self.events.push(AdapterEvent::PrimaryAction(shape_ref));
            }
            self.events.push(AdapterEvent::Click(press.target));
        }
        let hovered = self.pick(point);
        self.set_hovered(hovered);
    }

    fn render(&self, scale: f64, with_selection: bool) -> AdapterResult<Pixmap> {
        let (width, height) = scaled_pixels(self.options.base_size(), scale);
        let selection = if with_selection {
            self.selected
                .and_then(|r| self.entry(r).ok())
                .map(|e| (&e.shape, self.options.affordance, ShapeColor::from(self.options.selection_color)))
        } else {
            None
        };
        let frame = FrameSpec {
            width,
            height,
            scale,
            background: ShapeColor::from(self.options.background),
            selection,
        };
        Ok(raster::render(self.entries.iter().map(|e| &e.shape), &frame)?)
    }
}

/// Canvas adapter that rasterizes in software.
///
/// The adapter is the handle: dropping it closes it.
#[derive(Debug)]
pub struct SkiaAdapter {
    state: Option<OpenState>,
}

impl SkiaAdapter {
    fn state(&self) -> AdapterResult<&OpenState> {
        self.state.as_ref().ok_or(AdapterError::InvalidHandle)
    }

    fn state_mut(&mut self) -> AdapterResult<&mut OpenState> {
        self.state.as_mut().ok_or(AdapterError::InvalidHandle)
    }

    /// Current viewport scale.
    pub fn viewport_scale(&self) -> AdapterResult<f64> {
        Ok(self.state()?.viewport.scale())
    }

    /// The display pixmap, repainted if anything changed since the last call.
    pub fn pixmap(&mut self) -> AdapterResult<&Pixmap> {
        let state = self.state_mut()?;
        if state.frame.is_none() {
            let pixmap = state.render(state.viewport.scale(), true)?;
            state.frame = Some(pixmap);
        }
        state.frame.as_ref().ok_or(AdapterError::InvalidHandle)
    }
}

impl CanvasAdapter for SkiaAdapter {
    fn open(surface: Option<&Surface>, options: AdapterOptions) -> AdapterResult<Self> {
        let surface = surface.ok_or_else(|| AdapterError::SurfaceUnavailable("no surface".to_string()))?;
        let binding = surface
            .bind()
            .map_err(|reason| AdapterError::SurfaceUnavailable(reason.to_string()))?;
        log::debug!(
            "Opened {}x{} adapter on surface {}",
            options.width,
            options.height,
            binding.surface_id()
        );
        Ok(Self {
            state: Some(OpenState {
                binding,
                options,
                viewport: Viewport::new(options.base_size()),
                entries: Vec::new(),
                next_ref: 1,
                selected: None,
                hovered: None,
                press: None,
                events: Vec::new(),
                frame: None,
            }),
        })
    }

    fn add_shape(&mut self, shape: &ShapeDescriptor) -> AdapterResult<ShapeRef> {
        let state = self.state_mut()?;
        let shape_ref = ShapeRef::new(state.next_ref);
        state.next_ref += 1;
        let index = layers::insertion_index(&state.entries, shape.z_order, |e| e.shape.z_order);
        state.entries.insert(
            index,
            Entry {
                shape_ref,
                shape: shape.clone(),
            },
        );
        state.invalidate();
        Ok(shape_ref)
    }

    fn update_shape(&mut self, shape: ShapeRef, patch: &ShapePatch) -> AdapterResult<()> {
        let state = self.state_mut()?;
        let index = state.index_of(shape)?;
        if state.entries[index].shape.apply(patch) {
            state.invalidate();
        }
        Ok(())
    }

    fn shape(&self, shape: ShapeRef) -> AdapterResult<&ShapeDescriptor> {
        Ok(&self.state()?.entry(shape)?.shape)
    }

    fn set_selection(&mut self, shape: Option<ShapeRef>) -> AdapterResult<()> {
        let state = self.state_mut()?;
        if let Some(shape_ref) = shape {
            state.index_of(shape_ref)?;
        }
        if state.selected != shape {
            state.selected = shape;
            state.events.push(AdapterEvent::SelectionChanged(shape));
            state.invalidate();
        }
        Ok(())
    }

    fn selection(&self) -> AdapterResult<Option<ShapeRef>> {
        Ok(self.state()?.selected)
    }

    fn reorder(&mut self, shape: ShapeRef, direction: ReorderDirection) -> AdapterResult<bool> {
        let state = self.state_mut()?;
        let index = state.index_of(shape)?;
        if layers::reorder(&mut state.entries, index, direction).is_none() {
            return Ok(false);
        }
        for (rank, entry) in state.entries.iter_mut().enumerate() {
            entry.shape.z_order = rank as i32;
        }
        state.invalidate();
        Ok(true)
    }

    fn paint_order(&self) -> AdapterResult<Vec<ShapeRef>> {
        Ok(self.state()?.entries.iter().map(|e| e.shape_ref).collect())
    }

    fn export_raster(&mut self, scale: f64) -> AdapterResult<RasterImage> {
        let state = self.state()?;
        let pixmap = state.render(scale, false)?;
        log::debug!("Exported {}x{} raster", pixmap.width(), pixmap.height());
        Ok(encode_png(&pixmap)?)
    }

    fn frame(&mut self) -> AdapterResult<RasterImage> {
        Ok(encode_png(self.pixmap()?)?)
    }

    fn rescale(&mut self, scale: f64) -> AdapterResult<()> {
        let state = self.state_mut()?;
        let previous = state.viewport.scale();
        if (state.viewport.set_scale(scale) - previous).abs() > f64::EPSILON {
            state.invalidate();
        }
        Ok(())
    }

    fn handle_pointer(&mut self, event: &PointerEvent) -> AdapterResult<()> {
        let state = self.state_mut()?;
        if !event.is_primary() {
            return Ok(());
        }
        let Some(position) = event.position() else {
            // Leave
            state.press = None;
            state.set_hovered(None);
            return Ok(());
        };
        let point = state.viewport.screen_to_scene(position);
        match event {
            PointerEvent::Down { .. } => state.pointer_down(point),
            PointerEvent::Move { .. } => state.pointer_move(point),
            PointerEvent::Up { .. } => state.pointer_up(point),
            PointerEvent::Leave => {}
        }
        Ok(())
    }

    fn drain_events(&mut self) -> AdapterResult<Vec<AdapterEvent>> {
        Ok(std::mem::take(&mut self.state_mut()?.events))
    }

    fn close(&mut self) {
        if let Some(state) = self.state.take() {
            log::debug!("Closed adapter on surface {}", state.binding.surface_id());
        }
    }

    fn is_open(&self) -> bool {
        self.state.is_some()
    }
}

impl Drop for SkiaAdapter {
    fn drop(&mut self) {
        self.close();
    }
}

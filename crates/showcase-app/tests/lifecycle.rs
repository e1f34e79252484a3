//! Surface acquisition and release across mount/unmount cycles.

use showcase_app::{LibraryProfile, Page, ShowcaseConfig, SurfaceHost};
use showcase_core::events::{AdapterEvent, ShapeRef};
use showcase_core::input::PointerEvent;
use showcase_core::layers::ReorderDirection;
use showcase_core::shapes::{ShapeDescriptor, ShapePatch};
use showcase_render::{AdapterOptions, AdapterResult, CanvasAdapter, RasterImage, SkiaAdapter, Surface};
use std::cell::Cell;

thread_local! {
    static OPENED: Cell<usize> = const { Cell::new(0) };
    static CLOSED: Cell<usize> = const { Cell::new(0) };
}

/// Counts how often a live handle is opened and closed.
struct CountingAdapter {
    inner: SkiaAdapter,
}

impl CanvasAdapter for CountingAdapter {
    fn open(surface: Option<&Surface>, options: AdapterOptions) -> AdapterResult<Self> {
        let inner = SkiaAdapter::open(surface, options)?;
        OPENED.with(|n| n.set(n.get() + 1));
        Ok(Self { inner })
    }

    fn add_shape(&mut self, shape: &ShapeDescriptor) -> AdapterResult<ShapeRef> {
        self.inner.add_shape(shape)
    }

    fn update_shape(&mut self, shape: ShapeRef, patch: &ShapePatch) -> AdapterResult<()> {
        self.inner.update_shape(shape, patch)
    }

    fn shape(&self, shape: ShapeRef) -> AdapterResult<&ShapeDescriptor> {
        self.inner.shape(shape)
    }

    fn set_selection(&mut self, shape: Option<ShapeRef>) -> AdapterResult<()> {
        self.inner.set_selection(shape)
    }

    fn selection(&self) -> AdapterResult<Option<ShapeRef>> {
        self.inner.selection()
    }

    fn reorder(&mut self, shape: ShapeRef, direction: ReorderDirection) -> AdapterResult<bool> {
        self.inner.reorder(shape, direction)
    }

    fn paint_order(&self) -> AdapterResult<Vec<ShapeRef>> {
        self.inner.paint_order()
    }

    fn export_raster(&mut self, scale: f64) -> AdapterResult<RasterImage> {
        self.inner.export_raster(scale)
    }

    fn frame(&mut self) -> AdapterResult<RasterImage> {
        self.inner.frame()
    }

    fn rescale(&mut self, scale: f64) -> AdapterResult<()> {
        self.inner.rescale(scale)
    }

    fn handle_pointer(&mut self, event: &PointerEvent) -> AdapterResult<()> {
        self.inner.handle_pointer(event)
    }

    fn drain_events(&mut self) -> AdapterResult<Vec<AdapterEvent>> {
        self.inner.drain_events()
    }

    fn close(&mut self) {
        if self.inner.is_open() {
            CLOSED.with(|n| n.set(n.get() + 1));
        }
        self.inner.close();
    }

    fn is_open(&self) -> bool {
        self.inner.is_open()
    }
}

fn counts() -> (usize, usize) {
    (OPENED.with(Cell::get), CLOSED.with(Cell::get))
}

#[test]
fn test_unmount_closes_each_handle_once() {
    let host = SurfaceHost::for_profile(LibraryProfile::Fabric);
    let mut page: Page<CountingAdapter> = Page::mount(LibraryProfile::Fabric, &host, &ShowcaseConfig::default()).unwrap();
    assert_eq!(counts(), (7, 0));

    page.unmount();
    assert_eq!(counts(), (7, 7));
    drop(page);
    assert_eq!(counts(), (7, 7));
}

#[test]
fn test_drop_closes_each_handle_once() {
    let host = SurfaceHost::for_profile(LibraryProfile::Konva);
    {
        let page: Page<CountingAdapter> = Page::mount(LibraryProfile::Konva, &host, &ShowcaseConfig::default()).unwrap();
        assert_eq!(page.mounted().len(), 4);
    }
    assert_eq!(counts(), (4, 4));
    assert!(!host.get("canvas-1").unwrap().is_bound());
}

#[test]
fn test_remount_cycles_stay_paired() {
    let host = SurfaceHost::for_profile(LibraryProfile::Paper);
    for _ in 0..3 {
        let mut page: Page<CountingAdapter> =
            Page::mount(LibraryProfile::Paper, &host, &ShowcaseConfig::default()).unwrap();
        assert!(page.pending().is_empty());
        page.unmount();
    }
    assert_eq!(counts(), (21, 21));
}

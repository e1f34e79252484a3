//! End-to-end flows through library pages.

use kurbo::Point;
use showcase_app::{ExampleKind, ExportKind, LibraryProfile, Page, ShowcaseConfig, SurfaceHost};
use showcase_core::input::PointerEvent;
use showcase_core::layers::ReorderDirection;
use std::time::Duration;

fn mount(profile: LibraryProfile) -> (SurfaceHost, Page) {
    let host = SurfaceHost::for_profile(profile);
    let page = Page::mount(profile, &host, &ShowcaseConfig::default()).unwrap();
    (host, page)
}

fn click(page: &mut Page, example: ExampleKind, x: f64, y: f64) {
    let controller = page.controller_mut(example).unwrap();
    controller.handle_pointer(&PointerEvent::down(x, y));
    controller.handle_pointer(&PointerEvent::up(x, y));
}

#[test]
fn test_konva_page_mounts_four_examples() {
    let (host, page) = mount(LibraryProfile::Konva);
    assert_eq!(
        page.mounted(),
        vec![
            ExampleKind::BasicShapes,
            ExampleKind::Dragging,
            ExampleKind::Rotation,
            ExampleKind::Text
        ]
    );
    for key in ["canvas-1", "canvas-2", "canvas-3", "canvas-4"] {
        assert!(host.get(key).unwrap().is_bound(), "{key}");
    }
}

#[test]
fn test_rotation_requests_accumulate_exactly() {
    for profile in LibraryProfile::all() {
        let (_host, mut page) = mount(*profile);
        click(&mut page, ExampleKind::Rotation, 300.0, 150.0);
        page.tick(Duration::from_millis(5));
        // Second request arrives mid-animation on tweened profiles.
        click(&mut page, ExampleKind::Rotation, 300.0, 150.0);
        for _ in 0..100 {
            page.tick(Duration::from_millis(16));
        }

        let controller = page.controller(ExampleKind::Rotation).unwrap();
        assert!(!controller.is_animating(), "{profile}");
        assert_eq!(controller.rotation(), Some(90.0), "{profile}");
        assert_eq!(controller.scene().get("spin-star").unwrap().rotation, 90.0, "{profile}");
        assert_eq!(controller.rotation_label().as_deref(), Some("Current rotation: 90°"));
    }
}

#[test]
fn test_layers_select_reorder_and_deselect() {
    let (_host, mut page) = mount(LibraryProfile::Fabric);

    click(&mut page, ExampleKind::Layers, 100.0, 90.0);
    let layers = page.controller_mut(ExampleKind::Layers).unwrap();
    assert_eq!(layers.selected_id(), Some("rect1"));
    assert!(layers.reorder(ReorderDirection::Up));
    assert_eq!(layers.paint_order(), vec!["circle1", "rect1", "star1"]);
    assert!(layers.reorder(ReorderDirection::Back));
    assert_eq!(layers.paint_order(), vec!["rect1", "circle1", "star1"]);
    assert!(!layers.reorder(ReorderDirection::Down));

    click(&mut page, ExampleKind::Layers, 560.0, 280.0);
    let layers = page.controller_mut(ExampleKind::Layers).unwrap();
    assert_eq!(layers.selected_id(), None);
    assert!(!layers.reorder_enabled());
    assert_eq!(layers.selection_label(), "Click on a shape to select it");
}

#[test]
fn test_transform_drag_then_read_back() {
    let (_host, mut page) = mount(LibraryProfile::Paper);
    let controller = page.controller_mut(ExampleKind::Transform).unwrap();
    controller.handle_pointer(&PointerEvent::down(250.0, 90.0));
    controller.handle_pointer(&PointerEvent::moved(262.5, 101.25));
    controller.handle_pointer(&PointerEvent::moved(300.0, 120.0));
    controller.handle_pointer(&PointerEvent::up(300.0, 120.0));

    assert_eq!(controller.scene().get("circle1").unwrap().position, Point::new(300.0, 120.0));
    // A drag is not a click, so nothing got selected.
    assert_eq!(controller.selected_id(), None);
}

#[test]
fn test_resize_rescales_every_canvas() {
    let (_host, mut page) = mount(LibraryProfile::Fabric);
    let scale = page.resize(342.0);
    assert!((scale - 0.5).abs() < 1e-9);
    let frame = page.controller_mut(ExampleKind::Text).unwrap().snapshot().unwrap();
    assert_eq!((frame.width, frame.height), (300, 100));

    // Narrow containers stop at a quarter.
    assert!((page.resize(10.0) - 0.25).abs() < f64::EPSILON);

    // Exports ignore the display scale.
    let print = page.export(ExportKind::Print).unwrap();
    assert_eq!((print.width, print.height), (1800, 900));
}

#[test]
fn test_export_missing_on_konva() {
    let (_host, mut page) = mount(LibraryProfile::Konva);
    assert!(page.export(ExportKind::Preview).is_none());
}

#[test]
fn test_pending_surface_is_retried() {
    let profile = LibraryProfile::Paper;
    let host = SurfaceHost::for_profile(profile);
    host.get("canvas-6").unwrap().detach();

    let mut page: Page = Page::mount(profile, &host, &ShowcaseConfig::default()).unwrap();
    assert_eq!(page.pending(), &[ExampleKind::Layers]);
    assert!(page.controller(ExampleKind::Layers).is_none());
    assert_eq!(page.retry_pending(&host), 0);

    host.get("canvas-6").unwrap().attach();
    assert_eq!(page.retry_pending(&host), 1);
    assert!(page.pending().is_empty());
    assert!(page.controller(ExampleKind::Layers).is_some());
}

#[test]
fn test_missing_canvas_elements_stay_pending() {
    let mut host = SurfaceHost::new();
    let mut page: Page = Page::mount(LibraryProfile::Konva, &host, &ShowcaseConfig::default()).unwrap();
    assert_eq!(page.pending().len(), 4);

    host.insert(ExampleKind::Dragging.canvas_key());
    assert_eq!(page.retry_pending(&host), 1);
    assert_eq!(page.mounted(), vec![ExampleKind::Dragging]);
}

#[test]
fn test_unmount_releases_all_surfaces() {
    let (host, mut page) = mount(LibraryProfile::Paper);
    page.unmount();
    page.unmount();
    for example in LibraryProfile::Paper.examples() {
        assert!(!host.surface_for(*example).unwrap().is_bound(), "{example}");
    }
    assert!(page.mounted().is_empty());

    // The same elements can be mounted again.
    let again: Page = Page::mount(LibraryProfile::Paper, &host, &ShowcaseConfig::default()).unwrap();
    assert_eq!(again.mounted().len(), 7);
}

//! Static seed shapes for each example.

use crate::library::{ExampleKind, LibraryProfile};
use kurbo::{Point, Vec2};
use showcase_core::color::ShapeColor;
use showcase_core::shapes::{FontStyle, Rectangle, Shadow, ShapeDescriptor, ShapeKind, Text};

pub const RECT_FILL: ShapeColor = ShapeColor::rgb(0x42, 0x99, 0xe1);
pub const RECT_HOVER_FILL: ShapeColor = ShapeColor::rgb(0x2b, 0x6c, 0xb0);
pub const LABEL_FILL: ShapeColor = ShapeColor::rgb(0x2d, 0x37, 0x48);

pub const HOVER_RECT: &str = "rect1";
pub const DRAG_CIRCLE: &str = "drag-circle";
pub const DRAG_LABEL: &str = "drag-label";
pub const SPIN_STAR: &str = "spin-star";
pub const FIRST_TEXT: &str = "text1";
pub const SECOND_TEXT: &str = "text2";

/// Offset of the drag label from the circle centre.
pub const DRAG_LABEL_OFFSET: Vec2 = Vec2::new(-30.0, -60.0);

pub const SECOND_TEXT_DEFAULT: &str = "Styled and positioned text";

/// Live text fields of the text example and the shapes they feed.
pub const TEXT_FIELDS: [(&str, &str); 2] = [("first", FIRST_TEXT), ("second", SECOND_TEXT)];

/// Seed shapes of `example` on `profile`'s page, back to front.
pub fn seed_shapes(example: ExampleKind, profile: LibraryProfile) -> Vec<ShapeDescriptor> {
    match example {
        ExampleKind::BasicShapes => basic_shapes(),
        ExampleKind::Dragging => dragging(),
        ExampleKind::Rotation => vec![
            ShapeDescriptor::star(SPIN_STAR, Point::new(300.0, 150.0), 6, 40.0, 70.0)
                .with_fill(ShapeColor::rgb(0xed, 0x89, 0x36))
                .with_shadow(Shadow::new(10.0)),
        ],
        ExampleKind::Text => text(profile),
        ExampleKind::Transform | ExampleKind::Layers => plain_trio().into_iter().map(|s| s.draggable(true)).collect(),
        ExampleKind::Export => plain_trio(),
    }
}

/// Initial values of the live text fields.
pub fn text_field_defaults(profile: LibraryProfile) -> [(&'static str, String); 2] {
    [
        ("first", profile.greeting().to_string()),
        ("second", SECOND_TEXT_DEFAULT.to_string()),
    ]
}

fn basic_shapes() -> Vec<ShapeDescriptor> {
    vec![
        ShapeDescriptor::new(
            HOVER_RECT,
            ShapeKind::Rect(Rectangle::new(100.0, 80.0).with_corner_radius(10.0)),
            Point::new(50.0, 50.0),
        )
        .with_fill(RECT_FILL)
        .with_shadow(Shadow::new(5.0))
        .with_z_order(0),
        ShapeDescriptor::circle("circle1", Point::new(250.0, 90.0), 40.0)
            .with_fill(ShapeColor::rgb(0x48, 0xbb, 0x78))
            .with_shadow(Shadow::new(5.0))
            .with_z_order(1),
        ShapeDescriptor::star("star1", Point::new(400.0, 90.0), 5, 20.0, 40.0)
            .with_fill(ShapeColor::rgb(0xf6, 0xad, 0x55))
            .with_shadow(Shadow::new(5.0))
            .with_z_order(2),
    ]
}

fn dragging() -> Vec<ShapeDescriptor> {
    let center = Point::new(100.0, 200.0);
    vec![
        ShapeDescriptor::circle(DRAG_CIRCLE, center, 50.0)
            .with_fill(ShapeColor::rgb(0x9f, 0x7a, 0xea))
            .with_shadow(Shadow::new(10.0))
            .draggable(true)
            .with_z_order(0),
        ShapeDescriptor::text(DRAG_LABEL, center + DRAG_LABEL_OFFSET, "Drag me!", 16.0)
            .with_fill(LABEL_FILL)
            .selectable(false)
            .with_z_order(1),
    ]
}

fn text(profile: LibraryProfile) -> Vec<ShapeDescriptor> {
    let [(_, first), (_, second)] = text_field_defaults(profile);
    vec![
        ShapeDescriptor::new(
            FIRST_TEXT,
            ShapeKind::Text(Text::new(first).with_font_size(32.0).with_font_family("Arial")),
            Point::new(50.0, 50.0),
        )
        .with_fill(LABEL_FILL)
        .selectable(false),
        ShapeDescriptor::new(
            SECOND_TEXT,
            ShapeKind::Text(Text::new(second).with_font_size(18.0).with_font_style(FontStyle::Italic)),
            Point::new(50.0, 100.0),
        )
        .with_fill(RECT_FILL)
        .selectable(false)
        .with_z_order(1),
    ]
}

/// Rect, circle and star without shadows.
fn plain_trio() -> Vec<ShapeDescriptor> {
    vec![
        ShapeDescriptor::rect("rect1", Point::new(50.0, 50.0), 100.0, 80.0)
            .with_fill(RECT_FILL)
            .with_z_order(0),
        ShapeDescriptor::circle("circle1", Point::new(250.0, 90.0), 40.0)
            .with_fill(ShapeColor::rgb(0x48, 0xbb, 0x78))
            .with_z_order(1),
        ShapeDescriptor::star("star1", Point::new(400.0, 90.0), 5, 20.0, 40.0)
            .with_fill(ShapeColor::rgb(0xf6, 0xad, 0x55))
            .with_z_order(2),
    ]
}

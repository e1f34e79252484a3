//! Scene rasterization onto tiny-skia pixmaps.

use crate::adapter::SelectionAffordance;
use crate::export::{ExportError, new_pixmap};
use crate::text;
use kurbo::{Affine, BezPath, PathEl, Point, Shape as KurboShape};
use showcase_core::color::ShapeColor;
use showcase_core::selection::{HANDLE_SIZE, HandleKind, get_handles};
use showcase_core::shapes::{Shadow, ShapeDescriptor, ShapeKind};
use tiny_skia::{
    FillRule, Paint, PathBuilder, Pixmap, PixmapPaint, Stroke, StrokeDash, Transform,
};

/// Everything needed to paint one frame.
pub(crate) struct FrameSpec<'a> {
    pub width: u32,
    pub height: u32,
    /// Device pixels per scene unit.
    pub scale: f64,
    pub background: ShapeColor,
    /// Selection affordance to draw on top, if any.
    pub selection: Option<(&'a ShapeDescriptor, SelectionAffordance, ShapeColor)>,
}

/// Paint `shapes` (back to front) into a new pixmap.
pub(crate) fn render<'a>(
    shapes: impl IntoIterator<Item = &'a ShapeDescriptor>,
    frame: &FrameSpec<'_>,
) -> Result<Pixmap, ExportError> {
    let mut pixmap = new_pixmap(frame.width, frame.height)?;
    pixmap.fill(skia_color(frame.background));

    for shape in shapes {
        if let Some(shadow) = &shape.shadow {
            paint_shadow(&mut pixmap, shape, shadow, frame.scale);
        }
        paint_shape(&mut pixmap, shape, shape.fill, to_skia_transform(Affine::scale(frame.scale)));
    }

    if let Some((shape, affordance, color)) = frame.selection {
        match affordance {
            SelectionAffordance::Handles => paint_handles(&mut pixmap, shape, color, frame.scale),
            SelectionAffordance::Outline => paint_outline(&mut pixmap, shape, color, frame.scale),
        }
    }

    Ok(pixmap)
}

pub(crate) fn skia_color(color: ShapeColor) -> tiny_skia::Color {
    tiny_skia::Color::from_rgba8(color.r, color.g, color.b, color.a)
}

fn solid_paint(color: ShapeColor) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(color.r, color.g, color.b, color.a);
    paint.anti_alias = true;
    paint
}

/// Convert a kurbo affine to a tiny-skia transform.
pub(crate) fn to_skia_transform(affine: Affine) -> Transform {
    let [a, b, c, d, e, f] = affine.as_coeffs();
    Transform::from_row(a as f32, b as f32, c as f32, d as f32, e as f32, f as f32)
}

/// Convert a kurbo path to a tiny-skia path. Returns `None` for empty paths.
pub(crate) fn to_skia_path(path: &BezPath) -> Option<tiny_skia::Path> {
    let mut builder = PathBuilder::new();
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => builder.move_to(p.x as f32, p.y as f32),
            PathEl::LineTo(p) => builder.line_to(p.x as f32, p.y as f32),
            PathEl::QuadTo(p1, p2) => builder.quad_to(p1.x as f32, p1.y as f32, p2.x as f32, p2.y as f32),
            PathEl::CurveTo(p1, p2, p3) => builder.cubic_to(
                p1.x as f32,
                p1.y as f32,
                p2.x as f32,
                p2.y as f32,
                p3.x as f32,
                p3.y as f32,
            ),
            PathEl::ClosePath => builder.close(),
        }
    }
    builder.finish()
}

/// Paint one shape in `color`. `base` maps scene units to device pixels.
fn paint_shape(pixmap: &mut Pixmap, shape: &ShapeDescriptor, color: ShapeColor, base: Transform) {
    match &shape.kind {
        ShapeKind::Text(text) => {
            let scale = base.sx.hypot(base.ky).max(f32::EPSILON);
            let Some(raster) = text::rasterize(text, color, scale) else {
                return;
            };
            let placement = Affine::translate(shape.position.to_vec2())
                * Affine::scale(1.0 / f64::from(scale))
                * Affine::translate((-f64::from(raster.padding), -f64::from(raster.padding)));
            let transform = base.pre_concat(to_skia_transform(shape.rotation_transform() * placement));
            pixmap.draw_pixmap(
                0,
                0,
                raster.pixmap.as_ref(),
                &PixmapPaint {
                    quality: tiny_skia::FilterQuality::Bilinear,
                    ..PixmapPaint::default()
                },
                transform,
                None,
            );
        }
        _ => {
            let Some(path) = to_skia_path(&shape.to_path()) else {
                return;
            };
            pixmap.fill_path(&path, &solid_paint(color), FillRule::EvenOdd, base, None);
        }
    }
}

/// Box radius whose three passes approximate a gaussian of `sigma`.
pub(crate) fn box_radius(sigma: f64) -> usize {
    if sigma <= 0.0 {
        return 0;
    }
    // Three boxes of width w have variance 3 * (w² - 1) / 12 = σ²
    let width = (4.0 * sigma * sigma + 1.0).sqrt();
    ((width - 1.0) / 2.0).round() as usize
}

/// Paint a blurred silhouette of `shape` in the shadow colour.
fn paint_shadow(pixmap: &mut Pixmap, shape: &ShapeDescriptor, shadow: &Shadow, scale: f64) {
    // Canvas shadow blur is twice the gaussian sigma.
    let radius = box_radius(shadow.blur * scale / 2.0);
    let margin = (radius * 3 + 2) as f64;

    let bounds = shape.to_path().bounding_box();
    let offset = shadow.offset * scale;
    let x0 = (bounds.x0 * scale + offset.x - margin).floor();
    let y0 = (bounds.y0 * scale + offset.y - margin).floor();
    let x1 = (bounds.x1 * scale + offset.x + margin).ceil();
    let y1 = (bounds.y1 * scale + offset.y + margin).ceil();
    if x1 <= x0 || y1 <= y0 {
        return;
    }
    let Some(mut layer) = Pixmap::new((x1 - x0) as u32, (y1 - y0) as u32) else {
        return;
    };

    let to_layer = Affine::translate((offset.x - x0, offset.y - y0)) * Affine::scale(scale);
    paint_shape(&mut layer, shape, shadow.color, to_skia_transform(to_layer));
    box_blur(&mut layer, radius);

    pixmap.draw_pixmap(
        x0 as i32,
        y0 as i32,
        layer.as_ref(),
        &PixmapPaint::default(),
        Transform::identity(),
        None,
    );
}

/// Three-pass separable box blur over premultiplied RGBA.
pub(crate) fn box_blur(pixmap: &mut Pixmap, radius: usize) {
    if radius == 0 {
        return;
    }
    let width = pixmap.width() as usize;
    let height = pixmap.height() as usize;
    let data = pixmap.data_mut();
    let mut scratch = vec![0u8; data.len()];
    for _ in 0..3 {
        blur_pass(data, &mut scratch, width, height, radius, true);
        blur_pass(&scratch, data, width, height, radius, false);
    }
}

/// One box pass from `src` into `dst`, horizontal or vertical.
/// Pixels outside the image count as transparent.
fn blur_pass(src: &[u8], dst: &mut [u8], width: usize, height: usize, radius: usize, horizontal: bool) {
    let (lines, len) = if horizontal { (height, width) } else { (width, height) };
    let index = |line: usize, i: usize| -> usize {
        if horizontal {
            (line * width + i) * 4
        } else {
            (i * width + line) * 4
        }
    };
    let window = (radius * 2 + 1) as u32;

    for line in 0..lines {
        let mut sums = [0u32; 4];
        for i in 0..=radius.min(len - 1) {
            let at = index(line, i);
            for c in 0..4 {
                sums[c] += u32::from(src[at + c]);
            }
        }
        for i in 0..len {
            let at = index(line, i);
            for c in 0..4 {
                dst[at + c] = (sums[c] / window) as u8;
            }
            if i + radius + 1 < len {
                let incoming = index(line, i + radius + 1);
                for c in 0..4 {
                    sums[c] += u32::from(src[incoming + c]);
                }
            }
            if i >= radius {
                let outgoing = index(line, i - radius);
                for c in 0..4 {
                    sums[c] -= u32::from(src[outgoing + c]);
                }
            }
        }
    }
}

/// Outline of the shape's bounds with rotation applied, in scene units.
fn rotated_bounds_path(shape: &ShapeDescriptor) -> BezPath {
    let mut path = shape.bounds().to_path(0.1);
    path.apply_affine(shape.rotation_transform());
    path
}

/// Transform handles: bounds outline, corner squares and a rotate knob.
/// Sizes are divided by `scale` to keep a constant screen size.
fn paint_handles(pixmap: &mut Pixmap, shape: &ShapeDescriptor, color: ShapeColor, scale: f64) {
    let transform = to_skia_transform(Affine::scale(scale));
    let paint = solid_paint(color);
    let white = solid_paint(ShapeColor::white());
    let stroke = Stroke {
        width: (1.0 / scale) as f32,
        ..Stroke::default()
    };

    if let Some(outline) = to_skia_path(&rotated_bounds_path(shape)) {
        pixmap.stroke_path(&outline, &paint, &stroke, transform, None);
    }

    let half = HANDLE_SIZE / 2.0 / scale;
    let center = shape.center();
    for handle in get_handles(shape) {
        let path = match handle.kind {
            HandleKind::Corner(_) => {
                let mut square = kurbo::Rect::from_center_size(handle.position, (half * 2.0, half * 2.0)).to_path(0.1);
                square.apply_affine(Affine::rotate_about(shape.rotation.to_radians(), handle.position));
                square
            }
            HandleKind::Rotate => {
                // Stem from the top edge to the knob
                let top = shape.rotation_transform() * Point::new(center.x, shape.bounds().y0);
                let mut stem = BezPath::new();
                stem.move_to(top);
                stem.line_to(handle.position);
                if let Some(stem) = to_skia_path(&stem) {
                    pixmap.stroke_path(&stem, &paint, &stroke, transform, None);
                }
                kurbo::Circle::new(handle.position, half).to_path(0.1)
            }
        };
        if let Some(path) = to_skia_path(&path) {
            pixmap.fill_path(&path, &white, FillRule::Winding, transform, None);
            pixmap.stroke_path(&path, &paint, &stroke, transform, None);
        }
    }
}

/// Dashed highlight outline around the rotated bounds.
fn paint_outline(pixmap: &mut Pixmap, shape: &ShapeDescriptor, color: ShapeColor, scale: f64) {
    let Some(outline) = to_skia_path(&rotated_bounds_path(shape)) else {
        return;
    };
    // Constant on screen at any scale.
    let unit = (1.0 / scale) as f32;
    let stroke = Stroke {
        width: 2.0 * unit,
        dash: StrokeDash::new(vec![4.0 * unit, 4.0 * unit], 0.0),
        ..Stroke::default()
    };
    pixmap.stroke_path(
        &outline,
        &solid_paint(color),
        &stroke,
        to_skia_transform(Affine::scale(scale)),
        None,
    );
}

//! Text shaping and rasterization with cosmic-text.

use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping, Style, SwashCache};
use log::info;
use showcase_core::color::ShapeColor;
use showcase_core::shapes::{FontStyle, Text};
use std::sync::{Mutex, OnceLock};
use tiny_skia::{Paint, Pixmap, Rect, Transform};

/// Font system and glyph cache shared by every adapter in the process.
struct TextContext {
    font_system: FontSystem,
    swash_cache: SwashCache,
}

static TEXT_CONTEXT: OnceLock<Mutex<TextContext>> = OnceLock::new();

fn text_context() -> &'static Mutex<TextContext> {
    TEXT_CONTEXT.get_or_init(|| {
        info!("Initializing FontSystem");
        Mutex::new(TextContext {
            font_system: FontSystem::new(),
            swash_cache: SwashCache::new(),
        })
    })
}

/// Text rasterized into its own pixmap.
pub(crate) struct TextRaster {
    pub pixmap: Pixmap,
    /// Offset of the pixmap origin from the text's top-left, in raster pixels.
    pub padding: f32,
}

/// Shape and rasterize `text` at `scale` device pixels per scene unit.
///
/// Returns `None` for empty text or when nothing was laid out.
pub(crate) fn rasterize(text: &Text, color: ShapeColor, scale: f32) -> Option<TextRaster> {
    if text.content().is_empty() {
        return None;
    }

    let mut context = text_context().lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let TextContext {
        font_system,
        swash_cache,
    } = &mut *context;

    let font_size = text.font_size as f32 * scale;
    let line_height = font_size * Text::LINE_HEIGHT as f32;
    let metrics = Metrics::new(font_size, line_height);

    let mut buffer = Buffer::new(font_system, metrics);
    let mut buffer = buffer.borrow_with(font_system);

    let family = if text.font_family.is_empty() {
        Family::SansSerif
    } else {
        Family::Name(&text.font_family)
    };
    let style = match text.font_style {
        FontStyle::Normal => Style::Normal,
        FontStyle::Italic => Style::Italic,
    };
    let attrs = Attrs::new().family(family).style(style);

    buffer.set_size(None, None);
    buffer.set_text(text.content(), &attrs, Shaping::Advanced, None);
    buffer.shape_until_scroll(true);

    let mut width: f32 = 0.0;
    let mut height: f32 = 0.0;
    for run in buffer.layout_runs() {
        width = width.max(run.line_w);
        height = height.max(run.line_top + run.line_height);
    }
    if width <= 0.0 || height <= 0.0 {
        return None;
    }

    // Room for italic overhang and antialiasing
    let padding = (font_size * 0.25).ceil();
    let pixmap_width = (width + padding * 2.0).ceil() as u32;
    let pixmap_height = (height + padding * 2.0).ceil() as u32;
    let mut pixmap = Pixmap::new(pixmap_width, pixmap_height)?;

    let text_color = cosmic_text::Color::rgba(color.r, color.g, color.b, color.a);
    let mut paint = Paint::default();
    buffer.draw(swash_cache, text_color, |x, y, w, h, glyph_color| {
        let Some(rect) = Rect::from_xywh(x as f32 + padding, y as f32 + padding, w as f32, h as f32) else {
            return;
        };
        paint.set_color_rgba8(glyph_color.r(), glyph_color.g(), glyph_color.b(), glyph_color.a());
        pixmap.fill_rect(rect, &paint, Transform::identity(), None);
    });

    Some(TextRaster { pixmap, padding })
}

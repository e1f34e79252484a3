//! PNG export of rendered pixmaps.

use thiserror::Error;
use tiny_skia::Pixmap;

/// Export errors.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Invalid raster size {width}x{height}")]
    InvalidSize { width: u32, height: u32 },
    #[error("PNG encoding failed: {0}")]
    Encode(#[from] png::EncodingError),
}

/// An encoded raster image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    pub width: u32,
    pub height: u32,
    /// PNG bytes (RGBA8).
    pub png: Vec<u8>,
}

/// Allocate a pixmap, mapping zero or oversized dimensions to an error.
pub(crate) fn new_pixmap(width: u32, height: u32) -> Result<Pixmap, ExportError> {
    Pixmap::new(width, height).ok_or(ExportError::InvalidSize { width, height })
}

/// Encode a pixmap as PNG with straight (non-premultiplied) alpha.
pub fn encode_png(pixmap: &Pixmap) -> Result<RasterImage, ExportError> {
    let (width, height) = (pixmap.width(), pixmap.height());
    let mut rgba = Vec::with_capacity(pixmap.data().len());
    for pixel in pixmap.pixels() {
        let color = pixel.demultiply();
        rgba.extend_from_slice(&[color.red(), color.green(), color.blue(), color.alpha()]);
    }

    let mut png_data = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut png_data, width, height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(&rgba)?;
    }

    Ok(RasterImage {
        width,
        height,
        png: png_data,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_png_signature() {
        let mut pixmap = new_pixmap(4, 3).unwrap();
        pixmap.fill(tiny_skia::Color::from_rgba8(66, 153, 225, 255));
        let image = encode_png(&pixmap).unwrap();
        assert_eq!((image.width, image.height), (4, 3));
        assert_eq!(&image.png[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn test_zero_size_rejected() {
        assert!(matches!(
            new_pixmap(0, 10),
            Err(ExportError::InvalidSize { width: 0, height: 10 })
        ));
    }
}

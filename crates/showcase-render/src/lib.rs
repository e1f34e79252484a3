//! Showcase Render Library
//!
//! Canvas adapter abstraction and its software implementation.
//! The default implementation rasterizes with tiny-skia and shapes text
//! with cosmic-text.

mod adapter;
mod export;
mod raster;
mod skia_adapter;
mod surface;
mod text;

pub use adapter::{AdapterError, AdapterOptions, AdapterResult, CanvasAdapter, PrimaryTrigger, SelectionAffordance};
pub use export::{ExportError, RasterImage, encode_png};
pub use skia_adapter::SkiaAdapter;
pub use surface::Surface;

//! Rendering of photos and marks.
//!
//! ## Module Structure
//!
//! - [`draw`] - Per-variant mark drawing onto a tiny-skia pixmap
//! - [`surface`] - [`surface::DrawingSurface`], the native-resolution backing store
//! - [`live`] - [`LiveCanvas`], redraws the open session when it changes
//! - [`export`] - Offscreen compositing and JPEG export
//! - [`raster`] - Conversions between `image` buffers and pixmaps

pub mod draw;
pub mod export;
pub mod live;
pub mod raster;
pub mod surface;

#[cfg(test)]
mod tests;

pub use export::{export_composite, write_export};
pub use live::LiveCanvas;

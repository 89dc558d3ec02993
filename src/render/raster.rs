//! Conversions between `image` buffers (straight alpha) and tiny-skia pixmaps
//! (premultiplied alpha).

use image::{Rgba, RgbaImage};
use tiny_skia::{ColorU8, Pixmap};

use crate::error::{AnnotateError, Result};

/// Allocate a transparent pixmap, failing for zero or absurd sizes.
pub fn new_pixmap(width: u32, height: u32) -> Result<Pixmap> {
    Pixmap::new(width, height).ok_or(AnnotateError::SurfaceAllocation { width, height })
}

pub fn rgba_to_pixmap(image: &RgbaImage) -> Result<Pixmap> {
    let mut pixmap = new_pixmap(image.width(), image.height())?;
    for (dst, src) in pixmap.pixels_mut().iter_mut().zip(image.pixels()) {
        let [r, g, b, a] = src.0;
        *dst = ColorU8::from_rgba(r, g, b, a).premultiply();
    }
    Ok(pixmap)
}

pub fn pixmap_to_rgba(pixmap: &Pixmap) -> RgbaImage {
    let mut image = RgbaImage::new(pixmap.width(), pixmap.height());
    for (dst, src) in image.pixels_mut().zip(pixmap.pixels()) {
        let color = src.demultiply();
        *dst = Rgba([color.red(), color.green(), color.blue(), color.alpha()]);
    }
    image
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opaque_pixels_survive_conversion() {
        let mut image = RgbaImage::new(3, 2);
        image.put_pixel(0, 0, Rgba([10, 20, 30, 255]));
        image.put_pixel(2, 1, Rgba([200, 100, 50, 255]));

        let pixmap = rgba_to_pixmap(&image).unwrap();
        assert_eq!((pixmap.width(), pixmap.height()), (3, 2));
        assert_eq!(pixmap_to_rgba(&pixmap), image);
    }

    #[test]
    fn test_zero_size_surface_is_rejected() {
        assert!(matches!(
            new_pixmap(0, 10),
            Err(AnnotateError::SurfaceAllocation { width: 0, height: 10 })
        ));
    }
}

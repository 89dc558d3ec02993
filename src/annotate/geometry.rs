//! Mapping between display space and canonical drawing space.
//!
//! Display space is the window's logical pixel grid with a top-left origin (what
//! `Window::cursor_position` and touch positions report). Canonical space is the source
//! photo's native pixel grid. Marks are always stored in canonical space so they stay
//! valid regardless of window size, zoom, or device pixel ratio.

use bevy::math::{Rect, UVec2, Vec2};

/// On-screen placement of the drawing surface plus its canonical resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceLayout {
    /// Bounding box of the surface on screen, in display pixels
    pub display: Rect,
    /// Native size of the source photo, fixed at image-load time
    pub canonical: UVec2,
}

impl SurfaceLayout {
    pub fn new(display: Rect, canonical: UVec2) -> Self {
        Self { display, canonical }
    }

    /// False until both the on-screen box and the canonical size are non-zero.
    pub fn is_laid_out(&self) -> bool {
        self.display.width() > 0.0
            && self.display.height() > 0.0
            && self.canonical.x > 0
            && self.canonical.y > 0
    }

    /// Per-axis canonical-pixels-per-display-pixel factors.
    pub fn scale(&self) -> Option<Vec2> {
        if !self.is_laid_out() {
            return None;
        }
        Some(Vec2::new(
            self.canonical.x as f32 / self.display.width(),
            self.canonical.y as f32 / self.display.height(),
        ))
    }

    /// Convert a display-space point into canonical space.
    ///
    /// Returns `None` while the surface has no size yet.
    pub fn to_canonical(&self, display_point: Vec2) -> Option<Vec2> {
        let scale = self.scale()?;
        Some((display_point - self.display.min) * scale)
    }

    pub fn contains(&self, display_point: Vec2) -> bool {
        self.display.contains(display_point)
    }
}

/// Largest rect with the photo's aspect ratio that fits inside `available`, centred.
pub fn fit_into(available: Rect, canonical: UVec2) -> Option<Rect> {
    if available.width() <= 0.0 || available.height() <= 0.0 || canonical.x == 0 || canonical.y == 0
    {
        return None;
    }

    let image_size = canonical.as_vec2();
    let scale = (available.width() / image_size.x).min(available.height() / image_size.y);
    Some(Rect::from_center_size(available.center(), image_size * scale))
}

/// One raw input sample, before normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum PointerSample {
    Mouse(Vec2),
    /// Every active touch point, in the order the platform reported them
    Touch(Vec<Vec2>),
}

impl PointerSample {
    /// The point that drives a gesture: the cursor, or the first touch.
    pub fn primary(&self) -> Option<Vec2> {
        match self {
            PointerSample::Mouse(pos) => Some(*pos),
            PointerSample::Touch(points) => points.first().copied(),
        }
    }

    /// Primary point mapped into canonical space.
    pub fn to_canonical(&self, layout: &SurfaceLayout) -> Option<Vec2> {
        layout.to_canonical(self.primary()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout_at_scale(factor: f32) -> SurfaceLayout {
        let canonical = UVec2::new(800, 600);
        let offset = Vec2::new(40.0, 24.0);
        let size = canonical.as_vec2() * factor;
        SurfaceLayout::new(Rect::from_corners(offset, offset + size), canonical)
    }

    #[test]
    fn test_scale_is_per_axis() {
        let layout = SurfaceLayout::new(
            Rect::new(0.0, 0.0, 400.0, 200.0),
            UVec2::new(800, 600),
        );
        assert_eq!(layout.scale(), Some(Vec2::new(2.0, 3.0)));
    }

    #[test]
    fn test_offset_is_subtracted_before_scaling() {
        let layout = SurfaceLayout::new(
            Rect::new(100.0, 50.0, 500.0, 350.0),
            UVec2::new(800, 600),
        );
        assert_eq!(layout.to_canonical(Vec2::new(100.0, 50.0)), Some(Vec2::ZERO));
        assert_eq!(
            layout.to_canonical(Vec2::new(300.0, 200.0)),
            Some(Vec2::new(400.0, 300.0))
        );
    }

    #[test]
    fn test_canonical_point_is_invariant_across_display_scales() {
        let canonical_point = Vec2::new(300.0, 200.0);
        for factor in [0.5, 1.0, 2.0] {
            let layout = layout_at_scale(factor);
            let display_point = layout.display.min + canonical_point * factor;
            let mapped = layout.to_canonical(display_point).unwrap();
            assert!(
                (mapped - canonical_point).length() < 1e-3,
                "scale {} mapped {:?}",
                factor,
                mapped
            );
        }
    }

    #[test]
    fn test_zero_size_surface_has_no_transform() {
        let layout = SurfaceLayout::new(Rect::new(10.0, 10.0, 10.0, 10.0), UVec2::new(800, 600));
        assert!(!layout.is_laid_out());
        assert_eq!(layout.to_canonical(Vec2::new(10.0, 10.0)), None);

        let unloaded = SurfaceLayout::new(Rect::new(0.0, 0.0, 100.0, 100.0), UVec2::ZERO);
        assert_eq!(unloaded.scale(), None);
    }

    #[test]
    fn test_touch_uses_first_point() {
        let sample = PointerSample::Touch(vec![Vec2::new(5.0, 6.0), Vec2::new(90.0, 90.0)]);
        assert_eq!(sample.primary(), Some(Vec2::new(5.0, 6.0)));
        assert_eq!(PointerSample::Touch(vec![]).primary(), None);
    }

    #[test]
    fn test_mouse_and_touch_normalize_identically() {
        let layout = layout_at_scale(0.5);
        let pos = Vec2::new(140.0, 74.0);
        let mouse = PointerSample::Mouse(pos).to_canonical(&layout);
        let touch = PointerSample::Touch(vec![pos]).to_canonical(&layout);
        assert_eq!(mouse, touch);
        assert_eq!(mouse, Some(Vec2::new(200.0, 100.0)));
    }

    #[test]
    fn test_fit_into_keeps_aspect_and_centres() {
        let available = Rect::new(0.0, 0.0, 1000.0, 1000.0);
        let fitted = fit_into(available, UVec2::new(800, 400)).unwrap();
        assert_eq!(fitted.width(), 1000.0);
        assert_eq!(fitted.height(), 500.0);
        assert_eq!(fitted.center(), Vec2::new(500.0, 500.0));
    }

    #[test]
    fn test_fit_into_rejects_empty_area() {
        assert!(fit_into(Rect::new(0.0, 0.0, 0.0, 100.0), UVec2::new(10, 10)).is_none());
        assert!(fit_into(Rect::new(0.0, 0.0, 100.0, 100.0), UVec2::new(0, 10)).is_none());
    }
}

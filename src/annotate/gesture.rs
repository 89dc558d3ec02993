//! Press-drag-release state machine that builds one mark per gesture.
//!
//! The update rule is chosen by the variant of the in-progress mark, not by the
//! currently selected tool, so switching tools mid-gesture cannot reshape it.

use bevy::log::debug;
use bevy::math::Vec2;

use super::marks::{AnnotationMark, HexColor, MarkTool};

#[derive(Debug, Clone, Default, PartialEq)]
enum GestureState {
    #[default]
    Idle,
    Active {
        /// Where the press happened; never persisted
        anchor: Vec2,
        mark: AnnotationMark,
    },
}

/// Outcome of releasing the pointer.
#[derive(Debug, Clone, PartialEq)]
pub enum GestureEnd {
    /// Finished mark, ready to append to the committed list
    Finished(AnnotationMark),
    /// Freehand path with fewer than two points, dropped
    Degenerate,
    /// Release without a matching press
    NotActive,
}

#[derive(Debug, Clone, Default)]
pub struct GestureBuilder {
    state: GestureState,
}

impl GestureBuilder {
    /// Start a gesture at `start` (canonical space).
    ///
    /// A press that arrives while a gesture is already active restarts it.
    pub fn begin(&mut self, tool: MarkTool, color: HexColor, start: Vec2) {
        if self.is_active() {
            debug!("Gesture restarted before release; previous mark discarded");
        }
        self.state = GestureState::Active {
            anchor: start,
            mark: AnnotationMark::seed(tool, start, color),
        };
    }

    /// Apply a pointer move. Returns false when no gesture is active.
    pub fn update(&mut self, current: Vec2) -> bool {
        let GestureState::Active { anchor, mark } = &mut self.state else {
            return false;
        };
        let anchor = *anchor;

        match mark {
            AnnotationMark::Ellipse { center, radii, .. } => {
                *center = (anchor + current) / 2.0;
                *radii = (current - anchor).abs() / 2.0;
            }
            AnnotationMark::Rectangle { corner1, corner2, .. }
            | AnnotationMark::HighlightBlock { corner1, corner2, .. } => {
                *corner1 = anchor;
                *corner2 = current;
            }
            AnnotationMark::FreehandPath { points, .. } => {
                points.push(current);
            }
        }
        true
    }

    /// Release the pointer, yielding the finished mark.
    pub fn finish(&mut self) -> GestureEnd {
        match std::mem::take(&mut self.state) {
            GestureState::Idle => GestureEnd::NotActive,
            GestureState::Active { mark, .. } if mark.is_degenerate() => GestureEnd::Degenerate,
            GestureState::Active { mark, .. } => GestureEnd::Finished(mark),
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, GestureState::Active { .. })
    }

    pub fn in_progress(&self) -> Option<&AnnotationMark> {
        match &self.state {
            GestureState::Idle => None,
            GestureState::Active { mark, .. } => Some(mark),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn red() -> HexColor {
        HexColor::new("#FF3B30")
    }

    #[test]
    fn test_ellipse_spans_anchor_to_pointer() {
        let mut gesture = GestureBuilder::default();
        gesture.begin(MarkTool::Ellipse, red(), Vec2::new(100.0, 100.0));
        gesture.update(Vec2::new(300.0, 200.0));

        assert_eq!(
            gesture.finish(),
            GestureEnd::Finished(AnnotationMark::Ellipse {
                center: Vec2::new(200.0, 150.0),
                radii: Vec2::new(100.0, 50.0),
                color: Some(red()),
            })
        );
    }

    #[test]
    fn test_ellipse_radii_are_positive_when_dragging_up_left() {
        let mut gesture = GestureBuilder::default();
        gesture.begin(MarkTool::Ellipse, red(), Vec2::new(300.0, 200.0));
        gesture.update(Vec2::new(100.0, 100.0));

        let Some(AnnotationMark::Ellipse { center, radii, .. }) = gesture.in_progress() else {
            panic!("expected an in-progress ellipse");
        };
        assert_eq!(*center, Vec2::new(200.0, 150.0));
        assert_eq!(*radii, Vec2::new(100.0, 50.0));
    }

    #[test]
    fn test_rectangle_keeps_anchor_and_tracks_pointer() {
        let mut gesture = GestureBuilder::default();
        gesture.begin(MarkTool::Rectangle, red(), Vec2::new(10.0, 10.0));
        gesture.update(Vec2::new(50.0, 40.0));
        gesture.update(Vec2::new(60.0, 5.0));

        assert_eq!(
            gesture.finish(),
            GestureEnd::Finished(AnnotationMark::Rectangle {
                corner1: Vec2::new(10.0, 10.0),
                corner2: Vec2::new(60.0, 5.0),
                color: Some(red()),
            })
        );
    }

    #[test]
    fn test_highlight_uses_rectangle_rule() {
        let mut gesture = GestureBuilder::default();
        gesture.begin(MarkTool::HighlightBlock, red(), Vec2::new(1.0, 2.0));
        gesture.update(Vec2::new(3.0, 4.0));

        assert!(matches!(
            gesture.finish(),
            GestureEnd::Finished(AnnotationMark::HighlightBlock { corner1, corner2, .. })
                if corner1 == Vec2::new(1.0, 2.0) && corner2 == Vec2::new(3.0, 4.0)
        ));
    }

    #[test]
    fn test_freehand_records_raw_points_in_order() {
        let mut gesture = GestureBuilder::default();
        gesture.begin(MarkTool::FreehandPath, red(), Vec2::new(0.0, 0.0));
        gesture.update(Vec2::new(1.0, 1.0));
        gesture.update(Vec2::new(1.0, 1.0));
        gesture.update(Vec2::new(2.0, 0.0));

        let GestureEnd::Finished(AnnotationMark::FreehandPath { points, .. }) = gesture.finish()
        else {
            panic!("expected a finished path");
        };
        assert_eq!(
            points,
            vec![
                Vec2::new(0.0, 0.0),
                Vec2::new(1.0, 1.0),
                Vec2::new(1.0, 1.0),
                Vec2::new(2.0, 0.0),
            ]
        );
    }

    #[test]
    fn test_single_point_path_is_degenerate() {
        let mut gesture = GestureBuilder::default();
        gesture.begin(MarkTool::FreehandPath, red(), Vec2::new(5.0, 5.0));
        assert_eq!(gesture.finish(), GestureEnd::Degenerate);
        assert!(!gesture.is_active());
    }

    #[test]
    fn test_move_and_release_while_idle_are_ignored() {
        let mut gesture = GestureBuilder::default();
        assert!(!gesture.update(Vec2::new(1.0, 1.0)));
        assert_eq!(gesture.finish(), GestureEnd::NotActive);
        assert!(gesture.in_progress().is_none());
    }

    #[test]
    fn test_finish_returns_to_idle() {
        let mut gesture = GestureBuilder::default();
        gesture.begin(MarkTool::Rectangle, red(), Vec2::ZERO);
        assert!(gesture.is_active());
        gesture.finish();
        assert!(!gesture.is_active());
        assert_eq!(gesture.finish(), GestureEnd::NotActive);
    }
}

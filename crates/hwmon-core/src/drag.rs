//! Drag tracking for the overlay window.
//!
//! Records where a drag started, proposes snapped positions while the
//! pointer moves, and reports when the snap target settled on release
//! differs from the previous release.

use crate::snap::{self, Monitor, SnapTarget};
use crate::{Point, Rect};

/// Default movement, in pixels, below which a press/release is a click.
pub const CLICK_THRESHOLD: i32 = 3;

/// State of the current (or last) drag gesture.
#[derive(Debug, Clone, Default)]
pub struct DragState {
    offset: Point,
    start: Point,
    monitors: Vec<Monitor>,
    target: SnapTarget,
    last_released: SnapTarget,
    snap_px: i32,
}

impl DragState {
    pub fn new(snap_px: i32) -> Self {
        Self {
            snap_px,
            ..Default::default()
        }
    }

    /// Starts a drag. The monitor cache is replaced on every drag start
    /// so displays attached since the last drag are picked up.
    pub fn begin(&mut self, cursor: Point, window_pos: Point, monitors: Vec<Monitor>) {
        self.offset = Point::new(cursor.x - window_pos.x, cursor.y - window_pos.y);
        self.start = window_pos;
        self.monitors = monitors;
    }

    /// Returns the position the window should move to for this cursor.
    pub fn motion(&mut self, cursor: Point, width: i32, height: i32) -> Point {
        let x = cursor.x - self.offset.x;
        let y = cursor.y - self.offset.y;

        match snap::pick_monitor(&self.monitors, cursor) {
            Some(monitor) => {
                let snapped = snap::apply_snap(x, y, width, height, &monitor.work, self.snap_px);
                self.target = snapped.target;
                snapped.origin()
            }
            None => {
                self.target = SnapTarget::None;
                Point::new(x, y)
            }
        }
    }

    /// Ends a drag and re-evaluates the snap of `frame` where it sits.
    ///
    /// Returns the new target when it differs from the target of the
    /// previous release.
    pub fn release(&mut self, cursor: Point, frame: Rect) -> Option<SnapTarget> {
        let target = match snap::pick_monitor(&self.monitors, cursor) {
            Some(monitor) => {
                snap::apply_snap(
                    frame.x,
                    frame.y,
                    frame.width,
                    frame.height,
                    &monitor.work,
                    self.snap_px,
                )
                .target
            }
            None => SnapTarget::None,
        };

        self.target = target;
        if target == self.last_released {
            return None;
        }
        self.last_released = target;
        Some(target)
    }

    /// Returns true if the window moved less than `threshold` pixels on
    /// both axes since the drag began.
    pub fn was_click(&self, window_pos: Point, threshold: i32) -> bool {
        (window_pos.x - self.start.x).abs() < threshold
            && (window_pos.y - self.start.y).abs() < threshold
    }

    /// Snap target as of the latest motion or release.
    pub fn target(&self) -> SnapTarget {
        self.target
    }

    /// Sets the target without a drag, e.g. after initial placement.
    pub fn settle(&mut self, target: SnapTarget) {
        self.target = target;
        self.last_released = target;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one_monitor() -> Vec<Monitor> {
        vec![Monitor::new(
            Rect::new(0, 0, 1920, 1080),
            Rect::new(0, 0, 1920, 1040),
        )]
    }

    #[test]
    fn motion_keeps_grab_offset() {
        // Arrange — grab the window 30 px right and 10 px below its origin.
        let mut drag = DragState::new(16);
        drag.begin(Point::new(530, 410), Point::new(500, 400), one_monitor());

        // Act
        let pos = drag.motion(Point::new(830, 510), 200, 150);

        // Assert
        assert_eq!(pos, Point::new(800, 500));
        assert_eq!(drag.target(), SnapTarget::None);
    }

    #[test]
    fn motion_snaps_near_edges() {
        let mut drag = DragState::new(16);
        drag.begin(Point::new(530, 410), Point::new(500, 400), one_monitor());

        let pos = drag.motion(Point::new(1755, 15), 200, 150);

        assert_eq!(pos, Point::new(1720, 0));
        assert_eq!(drag.target(), SnapTarget::TopRight);
    }

    #[test]
    fn motion_without_monitors_moves_freely() {
        let mut drag = DragState::new(16);
        drag.begin(Point::new(5, 5), Point::new(0, 0), Vec::new());

        let pos = drag.motion(Point::new(8, 9), 200, 150);

        assert_eq!(pos, Point::new(3, 4));
        assert_eq!(drag.target(), SnapTarget::None);
    }

    #[test]
    fn release_reports_change_once() {
        // Arrange
        let mut drag = DragState::new(16);
        drag.begin(Point::new(10, 10), Point::new(0, 0), one_monitor());
        let frame = Rect::new(0, 0, 200, 150);

        // Act
        let first = drag.release(Point::new(10, 10), frame);
        let second = drag.release(Point::new(10, 10), frame);

        // Assert
        assert_eq!(first, Some(SnapTarget::TopLeft));
        assert_eq!(second, None);
        assert_eq!(drag.target(), SnapTarget::TopLeft);
    }

    #[test]
    fn release_without_monitor_reports_none_target() {
        // Arrange — settle at a corner, then release with no monitors known.
        let mut drag = DragState::new(16);
        drag.settle(SnapTarget::TopRight);
        drag.begin(Point::new(10, 10), Point::new(0, 0), Vec::new());

        // Act
        let changed = drag.release(Point::new(10, 10), Rect::new(0, 0, 200, 150));

        // Assert
        assert_eq!(changed, Some(SnapTarget::None));
    }

    #[test]
    fn release_evaluates_current_frame_not_cursor() {
        let mut drag = DragState::new(16);
        drag.begin(Point::new(900, 500), Point::new(800, 450), one_monitor());

        // The cursor is mid-screen but the frame sits on the bottom edge.
        let changed = drag.release(Point::new(900, 500), Rect::new(800, 890, 200, 150));

        assert_eq!(changed, Some(SnapTarget::Bottom));
    }

    #[test]
    fn small_moves_count_as_click() {
        let mut drag = DragState::new(16);
        drag.begin(Point::new(10, 10), Point::new(100, 100), one_monitor());

        assert!(drag.was_click(Point::new(102, 98), CLICK_THRESHOLD));
        assert!(!drag.was_click(Point::new(103, 100), CLICK_THRESHOLD));
        assert!(!drag.was_click(Point::new(100, 96), CLICK_THRESHOLD));
    }
}

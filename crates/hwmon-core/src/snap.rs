//! Edge-snap geometry for the overlay window.
//!
//! Pure functions over `Rect`/`Point`, so the magnetized-edge behavior
//! can be tested without creating any window.
//!
//! A dragged window snaps independently on each axis: horizontally to
//! the nearer of the left/right work-area edges, vertically to the
//! nearer of top/bottom, each only within `snap_px`. When both axes
//! snap the result is a corner.

use serde::Serialize;

use crate::{Point, Rect};

/// Default snap distance in pixels.
pub const SNAP_PX: i32 = 16;

/// The screen edge or corner the window is magnetized to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SnapTarget {
    #[default]
    None,
    Left,
    Right,
    Top,
    Bottom,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl SnapTarget {
    /// True for targets along the top edge, where the strip lives.
    pub fn is_top(self) -> bool {
        matches!(self, Self::Top | Self::TopLeft | Self::TopRight)
    }

    fn combine(horizontal: Option<Self>, vertical: Option<Self>) -> Self {
        match (horizontal, vertical) {
            (Some(Self::Left), Some(Self::Top)) => Self::TopLeft,
            (Some(Self::Right), Some(Self::Top)) => Self::TopRight,
            (Some(Self::Left), Some(Self::Bottom)) => Self::BottomLeft,
            (Some(_), Some(_)) => Self::BottomRight,
            (Some(h), None) => h,
            (None, Some(v)) => v,
            (None, None) => Self::None,
        }
    }
}

impl std::fmt::Display for SnapTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::None => "none",
            Self::Left => "left",
            Self::Right => "right",
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::TopLeft => "topleft",
            Self::TopRight => "topright",
            Self::BottomLeft => "bottomleft",
            Self::BottomRight => "bottomright",
        };
        f.write_str(name)
    }
}

/// A display: its full bounds and its work area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Monitor {
    /// Full monitor bounds, used to decide which monitor the cursor is on.
    pub monitor: Rect,
    /// Monitor bounds minus the taskbar and docked toolbars. Snapping
    /// happens against these edges.
    pub work: Rect,
}

impl Monitor {
    pub fn new(monitor: Rect, work: Rect) -> Self {
        Self { monitor, work }
    }
}

/// Returns `monitors`, or a single screen-sized monitor at the origin
/// when the list is empty.
///
/// Enumeration can fail or come back empty (e.g. during a display
/// change); snapping then works against the whole screen.
pub fn or_screen(monitors: Vec<Monitor>, width: i32, height: i32) -> Vec<Monitor> {
    if !monitors.is_empty() {
        return monitors;
    }
    let screen = Rect::new(0, 0, width, height);
    vec![Monitor::new(screen, screen)]
}

/// Result of snapping a proposed window position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snap {
    pub x: i32,
    pub y: i32,
    pub target: SnapTarget,
}

impl Snap {
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Picks the monitor a cursor belongs to.
///
/// Monitors containing the cursor are preferred. If none contains it
/// (the cursor sits in a gap between monitors of different sizes),
/// every monitor is a candidate. The nearest candidate wins; on equal
/// distance the earlier monitor wins.
pub fn pick_monitor(monitors: &[Monitor], cursor: Point) -> Option<&Monitor> {
    let contained: Vec<&Monitor> = monitors
        .iter()
        .filter(|m| m.monitor.contains_point(cursor))
        .collect();

    let candidates: Vec<&Monitor> = if contained.is_empty() {
        monitors.iter().collect()
    } else {
        contained
    };

    let mut best: Option<(&Monitor, i64)> = None;
    for monitor in candidates {
        let dist = monitor.monitor.distance_sq(cursor);
        match best {
            Some((_, best_dist)) if dist >= best_dist => {}
            _ => best = Some((monitor, dist)),
        }
    }
    best.map(|(m, _)| m)
}

/// Snaps a window of size `w`×`h` at `(x, y)` to the edges of `work`.
///
/// On each axis the nearer edge wins, left over right and top over
/// bottom on a tie, and only when within `snap_px`.
pub fn apply_snap(x: i32, y: i32, w: i32, h: i32, work: &Rect, snap_px: i32) -> Snap {
    let dl = (x - work.x).abs();
    let dr = ((x + w) - work.right()).abs();
    let dt = (y - work.y).abs();
    let db = ((y + h) - work.bottom()).abs();

    let (mut sx, mut sy) = (x, y);

    let horizontal = if dl <= snap_px && dl <= dr {
        sx = work.x;
        Some(SnapTarget::Left)
    } else if dr <= snap_px {
        sx = work.right() - w;
        Some(SnapTarget::Right)
    } else {
        None
    };

    let vertical = if dt <= snap_px && dt <= db {
        sy = work.y;
        Some(SnapTarget::Top)
    } else if db <= snap_px {
        sy = work.bottom() - h;
        Some(SnapTarget::Bottom)
    } else {
        None
    };

    Snap {
        x: sx,
        y: sy,
        target: SnapTarget::combine(horizontal, vertical),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn or_screen_keeps_enumerated_monitors() {
        let monitors = side_by_side();

        let result = or_screen(monitors.clone(), 800, 600);

        assert_eq!(result, monitors);
    }

    #[test]
    fn or_screen_falls_back_to_whole_screen() {
        // Act
        let result = or_screen(Vec::new(), 1920, 1080);

        // Assert
        let screen = Rect::new(0, 0, 1920, 1080);
        assert_eq!(result, vec![Monitor::new(screen, screen)]);
        let snapped = apply_snap(1900, 5, 220, 115, &result[0].work, SNAP_PX);
        assert_eq!(snapped.target, SnapTarget::TopRight);
    }

    #[test]
    fn monitor_serializes_both_rects() {
        let monitor = side_by_side()[0];

        let text = toml::to_string(&monitor).unwrap();

        assert!(text.contains("[monitor]"));
        assert!(text.contains("[work]"));
        assert!(text.contains("height = 1040"));
    }

    // ── Monitor layouts used across tests ────────────────────────

    /// Two 1920x1080 monitors side by side, taskbar at the bottom
    /// of the primary.
    ///
    /// ```text
    /// [Primary 0..1920, work height 1040] [Secondary 1920..3840]
    /// ```
    fn side_by_side() -> Vec<Monitor> {
        vec![
            Monitor::new(Rect::new(0, 0, 1920, 1080), Rect::new(0, 0, 1920, 1040)),
            Monitor::new(
                Rect::new(1920, 0, 1920, 1080),
                Rect::new(1920, 0, 1920, 1080),
            ),
        ]
    }

    /// A 1920x1080 primary with a smaller 1280x720 monitor to its
    /// right, aligned at the top. The area below the small monitor
    /// belongs to no display.
    ///
    /// ```text
    /// [Primary 1920x1080][Small 1280x720]
    ///                    [   (gap)      ]
    /// ```
    fn mixed_sizes() -> Vec<Monitor> {
        vec![
            Monitor::new(Rect::new(0, 0, 1920, 1080), Rect::new(0, 0, 1920, 1080)),
            Monitor::new(Rect::new(1920, 0, 1280, 720), Rect::new(1920, 0, 1280, 720)),
        ]
    }

    fn work() -> Rect {
        Rect::new(0, 0, 1920, 1040)
    }

    // ── pick_monitor ─────────────────────────────────────────────

    #[test]
    fn no_monitors_picks_nothing() {
        assert_eq!(pick_monitor(&[], Point::new(10, 10)), None);
    }

    #[test]
    fn picks_monitor_containing_cursor() {
        let mons = side_by_side();
        let picked = pick_monitor(&mons, Point::new(2500, 400));
        assert_eq!(picked, Some(&mons[1]));
    }

    #[test]
    fn shared_edge_prefers_first_monitor() {
        // Arrange
        let mons = side_by_side();

        // Act — x = 1920 is inside both (inclusive edges), both at distance 0.
        let picked = pick_monitor(&mons, Point::new(1920, 500));

        // Assert
        assert_eq!(picked, Some(&mons[0]));
    }

    #[test]
    fn cursor_in_gap_picks_nearest_monitor() {
        // Arrange
        let mons = mixed_sizes();

        // Act — below the small monitor: 60 px from it, 80 px from primary.
        let picked = pick_monitor(&mons, Point::new(2000, 780));

        // Assert
        assert_eq!(picked, Some(&mons[1]));
    }

    #[test]
    fn cursor_far_outside_picks_nearest_monitor() {
        let mons = mixed_sizes();
        let picked = pick_monitor(&mons, Point::new(-500, 500));
        assert_eq!(picked, Some(&mons[0]));
    }

    // ── apply_snap ───────────────────────────────────────────────

    #[test]
    fn far_from_edges_does_not_snap() {
        let snap = apply_snap(500, 400, 200, 150, &work(), SNAP_PX);
        assert_eq!(
            snap,
            Snap {
                x: 500,
                y: 400,
                target: SnapTarget::None
            }
        );
    }

    #[test]
    fn near_left_snaps_left() {
        let snap = apply_snap(12, 400, 200, 150, &work(), SNAP_PX);
        assert_eq!((snap.x, snap.y, snap.target), (0, 400, SnapTarget::Left));
    }

    #[test]
    fn near_right_aligns_right_edge() {
        // Arrange — right edge at 1910, 10 px from the work-area edge.
        let (x, w) = (1710, 200);

        // Act
        let snap = apply_snap(x, 400, w, 150, &work(), SNAP_PX);

        // Assert
        assert_eq!((snap.x, snap.target), (1720, SnapTarget::Right));
    }

    #[test]
    fn near_bottom_uses_work_area_not_monitor() {
        // Bottom edge at 1030, work area ends at 1040 (taskbar below).
        let snap = apply_snap(500, 880, 200, 150, &work(), SNAP_PX);
        assert_eq!((snap.y, snap.target), (890, SnapTarget::Bottom));
    }

    #[test]
    fn exactly_at_threshold_snaps() {
        let snap = apply_snap(16, 400, 200, 150, &work(), SNAP_PX);
        assert_eq!(snap.target, SnapTarget::Left);
    }

    #[test]
    fn one_past_threshold_does_not_snap() {
        let snap = apply_snap(17, 400, 200, 150, &work(), SNAP_PX);
        assert_eq!(snap.target, SnapTarget::None);
    }

    #[test]
    fn negative_offset_snaps_back_onto_screen() {
        let snap = apply_snap(-10, -5, 200, 150, &work(), SNAP_PX);
        assert_eq!((snap.x, snap.y, snap.target), (0, 0, SnapTarget::TopLeft));
    }

    #[test]
    fn corners_combine_both_axes() {
        let w = work();
        assert_eq!(
            apply_snap(1715, 3, 200, 150, &w, SNAP_PX).target,
            SnapTarget::TopRight
        );
        assert_eq!(
            apply_snap(4, 885, 200, 150, &w, SNAP_PX).target,
            SnapTarget::BottomLeft
        );
        assert_eq!(
            apply_snap(1715, 885, 200, 150, &w, SNAP_PX).target,
            SnapTarget::BottomRight
        );
    }

    #[test]
    fn window_wider_than_snap_band_on_both_sides_prefers_left() {
        // A window nearly as wide as the work area is within snap
        // distance of both edges; the tie goes to the left.
        let snap = apply_snap(5, 400, 1910, 150, &work(), SNAP_PX);
        assert_eq!((snap.x, snap.target), (0, SnapTarget::Left));
    }

    #[test]
    fn closer_right_edge_beats_left_when_both_in_range() {
        // dl = 8, dr = 2 → right wins.
        let snap = apply_snap(8, 400, 1910, 150, &work(), SNAP_PX);
        assert_eq!((snap.x, snap.target), (10, SnapTarget::Right));
    }

    #[test]
    fn snap_on_secondary_monitor_uses_its_origin() {
        let mons = side_by_side();
        let snap = apply_snap(1925, 925, 200, 150, &mons[1].work, SNAP_PX);
        assert_eq!(
            (snap.x, snap.y, snap.target),
            (1920, 930, SnapTarget::BottomLeft)
        );
    }

    #[test]
    fn top_targets() {
        assert!(SnapTarget::Top.is_top());
        assert!(SnapTarget::TopLeft.is_top());
        assert!(SnapTarget::TopRight.is_top());
        assert!(!SnapTarget::Bottom.is_top());
        assert!(!SnapTarget::Left.is_top());
        assert!(!SnapTarget::None.is_top());
    }
}

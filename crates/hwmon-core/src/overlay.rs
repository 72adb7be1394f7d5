//! Pointer-driven controller for the overlay window.
//!
//! The platform layer translates mouse messages into [`Input`]s and
//! executes the [`Command`]s that come back. No OS types appear here, so
//! the whole drag/snap/minimize flow is testable anywhere.

use crate::config::{Anchor, ComponentKind};
use crate::drag::DragState;
use crate::layout::Layout;
use crate::snap::{self, Monitor, SnapTarget};
use crate::strip::Strip;
use crate::{Point, Rect};

#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    /// Left button pressed. `monitors` is a fresh enumeration.
    PointerDown { cursor: Point, monitors: Vec<Monitor> },
    PointerMove { cursor: Point },
    /// Left button released.
    PointerUp { cursor: Point },
    /// The gesture ended without a left-button release, e.g. mouse
    /// capture was taken by a menu.
    Cancel { cursor: Point },
    /// Right button released.
    ContextMenu { cursor: Point },
    /// "Exit" chosen from the context menu.
    MenuExit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Move the window without resizing.
    Move(Point),
    /// Move and resize the window.
    SetFrame(Rect),
    /// Show the context menu at this screen point.
    ShowMenu(Point),
    /// Repaint the overlay contents.
    Redraw,
    /// Close the overlay and leave the message loop.
    Exit,
}

pub struct Overlay {
    frame: Rect,
    layout: Layout,
    drag: DragState,
    strip: Strip,
    dragging: bool,
    snap_px: i32,
    click_threshold: i32,
}

impl Overlay {
    pub fn new(layout: Layout, snap_px: i32, click_threshold: i32) -> Self {
        let frame = Rect::new(0, 0, layout.width(), layout.height());
        Self {
            frame,
            layout,
            drag: DragState::new(snap_px),
            strip: Strip::default(),
            dragging: false,
            snap_px,
            click_threshold,
        }
    }

    /// Places the overlay in the `anchor` corner of the primary work area
    /// and settles the snap target there.
    ///
    /// The primary monitor is the one containing the origin; failing
    /// that, the first one listed. Returns the new frame.
    pub fn place(&mut self, monitors: &[Monitor], anchor: Anchor) -> Rect {
        let Some(primary) = monitors
            .iter()
            .find(|m| m.monitor.contains_point(Point::default()))
            .or_else(|| monitors.first())
        else {
            return self.frame;
        };

        let work = primary.work;
        let (w, h) = (self.frame.width, self.frame.height);
        let x = match anchor {
            Anchor::TopLeft | Anchor::BottomLeft => work.x,
            Anchor::TopRight | Anchor::BottomRight => work.right() - w,
        };
        let y = match anchor {
            Anchor::TopLeft | Anchor::TopRight => work.y,
            Anchor::BottomLeft | Anchor::BottomRight => work.bottom() - h,
        };

        let snapped = snap::apply_snap(x, y, w, h, &work, self.snap_px);
        self.drag.settle(snapped.target);
        self.frame = self.frame.moved_to(snapped.origin());
        self.frame
    }

    pub fn frame(&self) -> Rect {
        self.frame
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn is_minimized(&self) -> bool {
        self.strip.is_minimized()
    }

    pub fn target(&self) -> SnapTarget {
        self.drag.target()
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn handle(&mut self, input: Input) -> Vec<Command> {
        match input {
            Input::PointerDown { cursor, monitors } => {
                self.drag.begin(cursor, self.frame.origin(), monitors);
                self.dragging = true;
                Vec::new()
            }
            Input::PointerMove { cursor } => {
                if !self.dragging {
                    return Vec::new();
                }
                let pos = self
                    .drag
                    .motion(cursor, self.frame.width, self.frame.height);
                if pos == self.frame.origin() {
                    return Vec::new();
                }
                self.frame = self.frame.moved_to(pos);
                vec![Command::Move(pos)]
            }
            Input::PointerUp { cursor } => self.pointer_up(cursor),
            Input::Cancel { cursor } => {
                let mut commands = Vec::new();
                if self.end_drag(cursor, &mut commands) {
                    crate::log_debug!("Drag cancelled");
                }
                commands
            }
            Input::ContextMenu { cursor } => vec![Command::ShowMenu(cursor)],
            Input::MenuExit => vec![Command::Exit],
        }
    }

    /// Settles the snap target where the window sits. Returns false when
    /// no drag was in progress.
    fn end_drag(&mut self, cursor: Point, commands: &mut Vec<Command>) -> bool {
        if !self.dragging {
            return false;
        }
        self.dragging = false;

        if let Some(target) = self.drag.release(cursor, self.frame) {
            crate::log_debug!("Snap target changed to {target}");
            if !target.is_top() && self.strip.is_minimized() {
                self.restore(commands);
            }
        }
        true
    }

    fn pointer_up(&mut self, cursor: Point) -> Vec<Command> {
        let mut commands = Vec::new();
        if !self.end_drag(cursor, &mut commands) {
            return commands;
        }

        if !self.drag.was_click(self.frame.origin(), self.click_threshold) {
            return commands;
        }

        let local = Point::new(cursor.x - self.frame.x, cursor.y - self.frame.y);
        let on_time = self.layout.hit_test(local, self.strip.is_minimized())
            == Some(ComponentKind::Time);

        if on_time && self.drag.target().is_top() {
            self.toggle(&mut commands);
        } else if self.strip.is_minimized() {
            self.restore(&mut commands);
        }
        commands
    }

    fn toggle(&mut self, commands: &mut Vec<Command>) {
        if self.strip.is_minimized() {
            self.restore(commands);
            return;
        }
        let Some(strip_height) = self.layout.strip_height() else {
            return;
        };
        self.frame = self.strip.minimize(self.frame, strip_height);
        crate::log_debug!("Minimized to strip");
        commands.push(Command::SetFrame(self.frame));
        commands.push(Command::Redraw);
    }

    fn restore(&mut self, commands: &mut Vec<Command>) {
        self.frame = self.strip.restore(self.frame);
        crate::log_debug!("Restored from strip");
        commands.push(Command::SetFrame(self.frame));
        commands.push(Command::Redraw);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::RowMetrics;

    const METRICS: RowMetrics = RowMetrics {
        line_height: 19,
        time_line_height: 17,
        graph_height: 20,
    };

    fn monitors() -> Vec<Monitor> {
        vec![Monitor::new(
            Rect::new(0, 0, 1920, 1080),
            Rect::new(0, 0, 1920, 1040),
        )]
    }

    /// CPU + GPU + time: 115 px tall, time row at local y 89..114.
    fn placed_overlay() -> Overlay {
        let layout = Layout::new(
            &[ComponentKind::Cpu, ComponentKind::Gpu, ComponentKind::Time],
            220,
            METRICS,
        );
        let mut overlay = Overlay::new(layout, 16, 3);
        overlay.place(&monitors(), Anchor::TopRight);
        overlay
    }

    fn click(overlay: &mut Overlay, at: Point) -> Vec<Command> {
        overlay.handle(Input::PointerDown {
            cursor: at,
            monitors: monitors(),
        });
        overlay.handle(Input::PointerUp { cursor: at })
    }

    fn drag_without_release(overlay: &mut Overlay, from: Point, to: Point) -> Vec<Command> {
        overlay.handle(Input::PointerDown {
            cursor: from,
            monitors: monitors(),
        });
        overlay.handle(Input::PointerMove { cursor: to })
    }

    fn drag(overlay: &mut Overlay, from: Point, to: Point) -> Vec<Command> {
        let mut commands = drag_without_release(overlay, from, to);
        commands.extend(overlay.handle(Input::PointerUp { cursor: to }));
        commands
    }

    #[test]
    fn place_anchors_top_right_and_settles_target() {
        // Act
        let overlay = placed_overlay();

        // Assert
        assert_eq!(overlay.frame(), Rect::new(1700, 0, 220, 115));
        assert_eq!(overlay.target(), SnapTarget::TopRight);
    }

    #[test]
    fn place_bottom_left_uses_work_area() {
        // Arrange
        let layout = Layout::new(&[ComponentKind::Time], 220, METRICS);
        let mut overlay = Overlay::new(layout, 16, 3);

        // Act
        let frame = overlay.place(&monitors(), Anchor::BottomLeft);

        // Assert
        assert_eq!(frame, Rect::new(0, 1040 - 27, 220, 27));
        assert_eq!(overlay.target(), SnapTarget::BottomLeft);
    }

    #[test]
    fn place_without_monitors_keeps_frame() {
        let layout = Layout::new(&[ComponentKind::Time], 220, METRICS);
        let mut overlay = Overlay::new(layout, 16, 3);

        let frame = overlay.place(&[], Anchor::TopRight);

        assert_eq!(frame, Rect::new(0, 0, 220, 27));
    }

    #[test]
    fn drag_moves_with_snapping() {
        // Arrange
        let mut overlay = placed_overlay();

        // Act
        let commands = drag(&mut overlay, Point::new(1800, 50), Point::new(900, 500));

        // Assert
        assert_eq!(commands, vec![Command::Move(Point::new(800, 450))]);
        assert_eq!(overlay.target(), SnapTarget::None);
        assert!(!overlay.is_dragging());
    }

    #[test]
    fn move_without_press_is_ignored() {
        let mut overlay = placed_overlay();

        let commands = overlay.handle(Input::PointerMove {
            cursor: Point::new(10, 10),
        });

        assert!(commands.is_empty());
    }

    #[test]
    fn cancel_ends_drag_so_later_moves_are_ignored() {
        // Arrange
        let mut overlay = placed_overlay();
        drag_without_release(&mut overlay, Point::new(1800, 50), Point::new(900, 500));

        // Act
        let commands = overlay.handle(Input::Cancel {
            cursor: Point::new(900, 500),
        });
        let later = overlay.handle(Input::PointerMove {
            cursor: Point::new(400, 300),
        });

        // Assert
        assert!(commands.is_empty());
        assert!(later.is_empty());
        assert!(!overlay.is_dragging());
        assert_eq!(overlay.frame(), Rect::new(800, 450, 220, 115));
        assert_eq!(overlay.target(), SnapTarget::None);
    }

    #[test]
    fn cancel_on_time_row_is_not_a_click() {
        // Arrange
        let mut overlay = placed_overlay();
        let time_row = Point::new(1800, 100);
        overlay.handle(Input::PointerDown {
            cursor: time_row,
            monitors: monitors(),
        });

        // Act
        let commands = overlay.handle(Input::Cancel { cursor: time_row });

        // Assert
        assert!(commands.is_empty());
        assert!(!overlay.is_minimized());
    }

    #[test]
    fn cancel_without_drag_does_nothing() {
        let mut overlay = placed_overlay();

        let commands = overlay.handle(Input::Cancel {
            cursor: Point::new(10, 10),
        });

        assert!(commands.is_empty());
        assert_eq!(overlay.frame(), Rect::new(1700, 0, 220, 115));
    }

    #[test]
    fn click_on_time_row_at_top_minimizes() {
        // Arrange
        let mut overlay = placed_overlay();

        // Act
        let commands = click(&mut overlay, Point::new(1800, 100));

        // Assert
        assert!(overlay.is_minimized());
        assert_eq!(
            commands,
            vec![
                Command::SetFrame(Rect::new(1700, 0, 220, 27)),
                Command::Redraw
            ]
        );
    }

    #[test]
    fn click_on_strip_restores() {
        // Arrange
        let mut overlay = placed_overlay();
        click(&mut overlay, Point::new(1800, 100));

        // Act
        let commands = click(&mut overlay, Point::new(1800, 10));

        // Assert
        assert!(!overlay.is_minimized());
        assert_eq!(commands[0], Command::SetFrame(Rect::new(1700, 0, 220, 115)));
    }

    #[test]
    fn click_on_graph_does_not_minimize() {
        let mut overlay = placed_overlay();

        let commands = click(&mut overlay, Point::new(1800, 20));

        assert!(commands.is_empty());
        assert!(!overlay.is_minimized());
    }

    #[test]
    fn click_on_time_row_away_from_top_does_nothing() {
        // Arrange
        let mut overlay = placed_overlay();
        drag(&mut overlay, Point::new(1800, 50), Point::new(900, 500));
        let time_row = Point::new(900, 450 + 100);

        // Act
        let commands = click(&mut overlay, time_row);

        // Assert
        assert!(commands.is_empty());
        assert!(!overlay.is_minimized());
    }

    #[test]
    fn dragging_strip_off_the_top_restores() {
        // Arrange
        let mut overlay = placed_overlay();
        click(&mut overlay, Point::new(1800, 10 + 89));

        // Act
        let commands = drag(&mut overlay, Point::new(1800, 10), Point::new(900, 500));

        // Assert
        assert!(!overlay.is_minimized());
        assert_eq!(
            commands,
            vec![
                Command::Move(Point::new(800, 490)),
                Command::SetFrame(Rect::new(800, 490, 220, 115)),
                Command::Redraw,
            ]
        );
    }

    #[test]
    fn dragging_strip_along_the_top_stays_minimized() {
        // Arrange
        let mut overlay = placed_overlay();
        click(&mut overlay, Point::new(1800, 99));

        // Act
        drag(&mut overlay, Point::new(1800, 10), Point::new(900, 12));

        // Assert
        assert!(overlay.is_minimized());
        assert_eq!(overlay.target(), SnapTarget::Top);
        assert_eq!(overlay.frame(), Rect::new(800, 0, 220, 27));
    }

    #[test]
    fn without_time_row_click_never_minimizes() {
        // Arrange
        let layout = Layout::new(&[ComponentKind::Cpu], 220, METRICS);
        let mut overlay = Overlay::new(layout, 16, 3);
        overlay.place(&monitors(), Anchor::TopRight);

        // Act
        let commands = click(&mut overlay, Point::new(1800, 10));

        // Assert
        assert!(commands.is_empty());
        assert!(!overlay.is_minimized());
    }

    #[test]
    fn context_menu_and_exit() {
        let mut overlay = placed_overlay();

        assert_eq!(
            overlay.handle(Input::ContextMenu {
                cursor: Point::new(5, 6)
            }),
            vec![Command::ShowMenu(Point::new(5, 6))]
        );
        assert_eq!(overlay.handle(Input::MenuExit), vec![Command::Exit]);
    }
}

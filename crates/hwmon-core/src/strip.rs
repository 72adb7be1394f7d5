//! Minimize-to-strip toggle.
//!
//! The overlay is either restored (all components visible) or
//! minimized to a strip holding only the time row. Minimizing keeps
//! the width and position and remembers the full height for restore.

use crate::Rect;

#[derive(Debug, Clone, Default)]
pub struct Strip {
    minimized: bool,
    restore_size: Option<(i32, i32)>,
}

impl Strip {
    pub fn is_minimized(&self) -> bool {
        self.minimized
    }

    /// Collapses `frame` to `strip_height`, remembering its size.
    pub fn minimize(&mut self, frame: Rect, strip_height: i32) -> Rect {
        self.restore_size = Some((frame.width, frame.height));
        self.minimized = true;
        frame.resized(frame.width, strip_height.max(1))
    }

    /// Expands `frame` back to the remembered size at its current
    /// position. Without a remembered size the frame is unchanged.
    pub fn restore(&mut self, frame: Rect) -> Rect {
        self.minimized = false;
        match self.restore_size {
            Some((w, h)) => frame.resized(w, h),
            None => frame,
        }
    }
}

//! Vertical stacking of component rows inside the overlay border.

use crate::config::{ComponentKind, Config};
use crate::{Point, Rect};

/// Border thickness around the whole overlay.
pub const BORDER: i32 = 1;
/// Horizontal inset of labels and graphs.
pub const PAD_X: i32 = 10;
/// Space under each graph.
pub const GRAPH_PAD_BOTTOM: i32 = 5;
/// Space above and below single-line rows.
pub const ROW_PAD_Y: i32 = 2;
/// Space above and below the time text.
pub const TIME_PAD_Y: i32 = 4;

/// Line heights derived from font sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowMetrics {
    pub line_height: i32,
    pub time_line_height: i32,
    pub graph_height: i32,
}

impl RowMetrics {
    pub fn from_config(config: &Config) -> Self {
        Self {
            line_height: config.style.font_size + 4,
            time_line_height: config.style.time_font_size + 4,
            graph_height: config.style.graph_height,
        }
    }
}

/// A component's slot in overlay-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Row {
    /// Position of the component in display order.
    pub index: usize,
    pub kind: ComponentKind,
    pub bounds: Rect,
}

#[derive(Debug, Clone)]
pub struct Layout {
    width: i32,
    metrics: RowMetrics,
    rows: Vec<Row>,
    strip_row: Option<Row>,
}

impl Layout {
    pub fn new(kinds: &[ComponentKind], width: i32, metrics: RowMetrics) -> Self {
        let inner = (width - 2 * BORDER).max(0);
        let mut y = BORDER;
        let mut rows = Vec::with_capacity(kinds.len());
        for (index, &kind) in kinds.iter().enumerate() {
            let height = row_height(kind, &metrics);
            rows.push(Row {
                index,
                kind,
                bounds: Rect::new(BORDER, y, inner, height),
            });
            y += height;
        }

        let strip_row = kinds
            .iter()
            .position(|k| *k == ComponentKind::Time)
            .map(|index| Row {
                index,
                kind: ComponentKind::Time,
                bounds: Rect::new(BORDER, BORDER, inner, row_height(ComponentKind::Time, &metrics)),
            });

        Self {
            width,
            metrics,
            rows,
            strip_row,
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    /// Full overlay height with every row visible.
    pub fn height(&self) -> i32 {
        let content: i32 = self.rows.iter().map(|r| r.bounds.height).sum();
        content + 2 * BORDER
    }

    /// Height of the minimized strip: the time row plus border.
    /// `None` when there is no time row to keep.
    pub fn strip_height(&self) -> Option<i32> {
        self.strip_row.map(|r| r.bounds.height + 2 * BORDER)
    }

    /// Rows visible in the given state, top to bottom.
    pub fn rows(&self, minimized: bool) -> Vec<Row> {
        if minimized {
            return self.strip_row.into_iter().collect();
        }
        self.rows.clone()
    }

    /// The component under a point in overlay-local coordinates.
    pub fn hit_test(&self, local: Point, minimized: bool) -> Option<ComponentKind> {
        self.rows(minimized)
            .into_iter()
            .find(|r| r.bounds.contains_point(local))
            .map(|r| r.kind)
    }

    /// Label line of a load/temp row.
    pub fn label_rect(&self, row: &Row) -> Rect {
        Rect::new(
            row.bounds.x + PAD_X,
            row.bounds.y,
            (row.bounds.width - 2 * PAD_X).max(0),
            self.metrics.line_height,
        )
    }

    /// Graph area of a load/temp row.
    pub fn graph_rect(&self, row: &Row) -> Rect {
        Rect::new(
            row.bounds.x + PAD_X,
            row.bounds.y + self.metrics.line_height,
            (row.bounds.width - 2 * PAD_X).max(0),
            self.metrics.graph_height,
        )
    }

    /// Text area of a single-line row (network, time).
    pub fn text_rect(&self, row: &Row) -> Rect {
        let pad = match row.kind {
            ComponentKind::Time => TIME_PAD_Y,
            _ => ROW_PAD_Y,
        };
        Rect::new(
            row.bounds.x + PAD_X,
            row.bounds.y + pad,
            (row.bounds.width - 2 * PAD_X).max(0),
            (row.bounds.height - 2 * pad).max(0),
        )
    }
}

fn row_height(kind: ComponentKind, m: &RowMetrics) -> i32 {
    match kind {
        ComponentKind::Cpu | ComponentKind::Gpu => {
            m.line_height + m.graph_height + GRAPH_PAD_BOTTOM
        }
        ComponentKind::Network => m.line_height + 2 * ROW_PAD_Y,
        ComponentKind::Time => m.time_line_height + 2 * TIME_PAD_Y,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics() -> RowMetrics {
        RowMetrics {
            line_height: 19,
            time_line_height: 17,
            graph_height: 20,
        }
    }

    fn default_layout() -> Layout {
        Layout::new(
            &[ComponentKind::Cpu, ComponentKind::Gpu, ComponentKind::Time],
            220,
            metrics(),
        )
    }

    #[test]
    fn rows_stack_inside_border() {
        // Act
        let layout = default_layout();
        let rows = layout.rows(false);

        // Assert
        assert_eq!(rows[0].bounds, Rect::new(1, 1, 218, 44));
        assert_eq!(rows[1].bounds, Rect::new(1, 45, 218, 44));
        assert_eq!(rows[2].bounds, Rect::new(1, 89, 218, 25));
        assert_eq!(layout.height(), 44 + 44 + 25 + 2);
    }

    #[test]
    fn strip_keeps_only_time_row_at_top() {
        // Act
        let layout = default_layout();
        let rows = layout.rows(true);

        // Assert
        assert_eq!(layout.strip_height(), Some(27));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].kind, ComponentKind::Time);
        assert_eq!(rows[0].index, 2);
        assert_eq!(rows[0].bounds.y, 1);
    }

    #[test]
    fn no_time_row_means_no_strip() {
        let layout = Layout::new(&[ComponentKind::Cpu], 220, metrics());

        assert_eq!(layout.strip_height(), None);
        assert!(layout.rows(true).is_empty());
    }

    #[test]
    fn hit_test_finds_rows() {
        // Arrange
        let layout = default_layout();

        // Assert
        assert_eq!(layout.hit_test(Point::new(5, 10), false), Some(ComponentKind::Cpu));
        assert_eq!(layout.hit_test(Point::new(5, 60), false), Some(ComponentKind::Gpu));
        assert_eq!(layout.hit_test(Point::new(5, 100), false), Some(ComponentKind::Time));
        assert_eq!(layout.hit_test(Point::new(5, 10), true), Some(ComponentKind::Time));
        assert_eq!(layout.hit_test(Point::new(5, 200), false), None);
    }

    #[test]
    fn graph_sits_under_label_line() {
        // Arrange
        let layout = default_layout();
        let row = layout.rows(false)[1];

        // Act
        let graph = layout.graph_rect(&row);

        // Assert
        assert_eq!(graph, Rect::new(11, 64, 198, 20));
    }

    #[test]
    fn metrics_follow_font_sizes() {
        let m = RowMetrics::from_config(&Config::default());

        assert_eq!(m, RowMetrics {
            line_height: 19,
            time_line_height: 17,
            graph_height: 20,
        });
    }
}

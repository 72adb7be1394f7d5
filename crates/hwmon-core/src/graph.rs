//! Line-graph geometry for component histories.

use crate::color::Color;

/// A point in graph-local coordinates (origin top-left, y grows down).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotPoint {
    pub x: f64,
    pub y: f64,
}

/// Maps `values` into a `width` x `height` box.
///
/// The vertical scale tops out at the larger of the history maximum and
/// `max_value`, so small readings don't fill the graph. Returns an empty
/// vector when there are fewer than two values or the box is empty.
pub fn plot(values: &[f64], width: i32, height: i32, max_value: f64) -> Vec<PlotPoint> {
    let n = values.len();
    if n < 2 || width <= 0 || height <= 0 {
        return Vec::new();
    }
    let w = f64::from(width);
    let h = f64::from(height);
    let scale = values.iter().copied().fold(max_value, f64::max);
    if scale <= 0.0 {
        return Vec::new();
    }
    let step = w / (n - 1) as f64;

    values
        .iter()
        .enumerate()
        .map(|(i, v)| PlotPoint {
            x: i as f64 * step,
            y: (1.0 - v / scale) * h,
        })
        .collect()
}

/// Y coordinate of the horizontal guide line.
pub fn center_line(height: i32) -> i32 {
    height / 2
}

/// The graph color, or `warn` once the latest temperature exceeds
/// `threshold`.
pub fn line_color(latest: Option<f64>, threshold: f64, normal: Color, warn: Color) -> Color {
    match latest {
        Some(t) if t > threshold => warn,
        _ => normal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fewer_than_two_points_draws_nothing() {
        assert!(plot(&[], 100, 20, 100.0).is_empty());
        assert!(plot(&[50.0], 100, 20, 100.0).is_empty());
    }

    #[test]
    fn empty_box_draws_nothing() {
        assert!(plot(&[1.0, 2.0], 0, 20, 100.0).is_empty());
        assert!(plot(&[1.0, 2.0], 100, 0, 100.0).is_empty());
    }

    #[test]
    fn points_span_width_and_scale_to_max_value() {
        // Act
        let points = plot(&[0.0, 50.0, 100.0], 200, 20, 100.0);

        // Assert
        assert_eq!(
            points,
            vec![
                PlotPoint { x: 0.0, y: 20.0 },
                PlotPoint { x: 100.0, y: 10.0 },
                PlotPoint { x: 200.0, y: 0.0 },
            ]
        );
    }

    #[test]
    fn history_above_max_value_rescales() {
        // Act
        let points = plot(&[0.0, 200.0], 10, 20, 100.0);

        // Assert
        assert_eq!(points[1].y, 0.0);
        assert_eq!(points[0].y, 20.0);
    }

    #[test]
    fn center_line_is_half_height() {
        assert_eq!(center_line(20), 10);
        assert_eq!(center_line(21), 10);
    }

    #[test]
    fn warn_color_above_threshold() {
        // Arrange
        let normal = Color::rgb(0, 0, 255);
        let warn = Color::rgb(255, 0, 0);

        // Assert
        assert_eq!(line_color(Some(85.0), 80.0, normal, warn), warn);
        assert_eq!(line_color(Some(80.0), 80.0, normal, warn), normal);
        assert_eq!(line_color(None, 80.0, normal, warn), normal);
    }
}

use hwmon_core::component::{LoadTemp, PLACEHOLDER};
use hwmon_core::config::ComponentKind;
use hwmon_core::format::UNAVAILABLE;
use hwmon_core::graph;
use hwmon_core::layout::{Layout, Row};
use hwmon_core::{Color, Rect};

use super::Theme;
use crate::overlay::text::{self, Align, DrawCtx};

const LINE_THICKNESS: i32 = 2;
const COLUMN_GAP: i32 = 6;
/// Widest usage label, used to reserve the right-hand column.
const USAGE_SAMPLE: &str = "100.0%";

/// CPU/GPU row: "CPU:" on the left, temperature and usage on the right,
/// temperature graph underneath.
pub fn draw(ctx: &mut DrawCtx, layout: &Layout, row: &Row, c: &LoadTemp, theme: &Theme) {
    let accent = match c.kind() {
        ComponentKind::Gpu => theme.palette.gpu,
        _ => theme.palette.cpu,
    };

    let label = layout.label_rect(row);
    ctx.use_font(ctx.font);
    text::draw_text(ctx, label, c.label(), accent, Align::Left);

    let value_color = |s: &str| {
        if s == UNAVAILABLE || s == PLACEHOLDER {
            theme.palette.dim
        } else {
            accent
        }
    };

    let usage_w = text::measure_text(ctx.dc, USAGE_SAMPLE);
    text::draw_text(ctx, label, c.usage_text(), value_color(c.usage_text()), Align::Right);
    let temp_area = Rect::new(label.x, label.y, label.width - usage_w - COLUMN_GAP, label.height);
    text::draw_text(ctx, temp_area, c.temp_text(), value_color(c.temp_text()), Align::Right);

    draw_graph(ctx, layout.graph_rect(row), c, accent, theme);
}

fn draw_graph(ctx: &mut DrawCtx, area: Rect, c: &LoadTemp, accent: Color, theme: &Theme) {
    text::fill_rect(ctx, area, theme.palette.graph_background);

    let center = Rect::new(area.x, area.y + graph::center_line(area.height), area.width, 1);
    text::fill_rect(ctx, center, theme.palette.center_line);

    let values: Vec<f64> = c.history().iter().collect();
    let points = graph::plot(&values, area.width, area.height, theme.style.max_value);
    let color = graph::line_color(
        c.latest_temp(),
        theme.style.temp_threshold,
        accent,
        theme.palette.warn,
    );
    text::polyline(ctx, area, &points, color, LINE_THICKNESS);
}

use hwmon_core::component::Clock;
use hwmon_core::layout::{Layout, Row};

use super::Theme;
use crate::overlay::text::{self, Align, DrawCtx};

/// Centered clock on its own background band.
pub fn draw(ctx: &mut DrawCtx, layout: &Layout, row: &Row, c: &Clock, theme: &Theme) {
    text::fill_rect(ctx, row.bounds, theme.palette.time_background);
    ctx.use_font(ctx.time_font);
    text::draw_text(
        ctx,
        layout.text_rect(row),
        c.text(),
        theme.palette.text,
        Align::Center,
    );
}

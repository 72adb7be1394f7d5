use hwmon_core::component::Network;
use hwmon_core::layout::{Layout, Row};

use super::Theme;
use crate::overlay::text::{self, Align, DrawCtx};

/// "↓ 1.2 MB" on the left, "↑ 40 KB" on the right.
pub fn draw(ctx: &mut DrawCtx, layout: &Layout, row: &Row, c: &Network, theme: &Theme) {
    let area = layout.text_rect(row);
    ctx.use_font(ctx.font);
    text::draw_text(ctx, area, c.down_text(), theme.palette.down, Align::Left);
    text::draw_text(ctx, area, c.up_text(), theme.palette.up, Align::Right);
}

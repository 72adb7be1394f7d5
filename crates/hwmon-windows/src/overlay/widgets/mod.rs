//! Per-component row renderers.

mod load_temp;
mod network;
mod time;

use hwmon_core::Palette;
use hwmon_core::component::{Component, Components};
use hwmon_core::config::StyleConfig;
use hwmon_core::layout::Layout;

use super::text::DrawCtx;

/// Colors and style values shared by all rows.
pub struct Theme<'a> {
    pub palette: &'a Palette,
    pub style: &'a StyleConfig,
}

/// Draws every visible row in display order.
pub fn draw_rows(
    ctx: &mut DrawCtx,
    layout: &Layout,
    minimized: bool,
    components: &Components,
    theme: &Theme,
) {
    for row in layout.rows(minimized) {
        match components.get(row.index) {
            Some(Component::LoadTemp(c)) => load_temp::draw(ctx, layout, &row, c, theme),
            Some(Component::Network(c)) => network::draw(ctx, layout, &row, c, theme),
            Some(Component::Time(c)) => time::draw(ctx, layout, &row, c, theme),
            None => {}
        }
    }
}

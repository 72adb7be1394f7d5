//! Low-level text and shape drawing into the overlay's DIB.

use hwmon_core::graph::PlotPoint;
use hwmon_core::{Color, Rect};
use windows::Win32::Foundation::{COLORREF, SIZE};
use windows::Win32::Graphics::Gdi::{
    GetTextExtentPoint32W, HDC, HFONT, SelectObject, SetTextColor, TextOutW,
};

/// Bundles the GDI DC, pixel buffer, and fonts needed by all draw
/// helpers, keeping argument lists short.
pub struct DrawCtx<'a> {
    pub dc: HDC,
    pub buf: &'a mut [u32],
    pub w: i32,
    pub h: i32,
    pub font: HFONT,
    pub time_font: HFONT,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
    Center,
}

impl DrawCtx<'_> {
    pub fn use_font(&mut self, font: HFONT) {
        // SAFETY: both fonts outlive the context.
        unsafe {
            SelectObject(self.dc, font.into());
        }
    }
}

/// Draws `text` inside `area`, vertically centered, and returns its width.
pub fn draw_text(ctx: &mut DrawCtx, area: Rect, text: &str, color: Color, align: Align) -> i32 {
    if text.is_empty() {
        return 0;
    }
    let wide: Vec<u16> = text.encode_utf16().collect();
    let size = extent(ctx.dc, &wide);

    let x = match align {
        Align::Left => area.x,
        Align::Right => area.right() - size.cx,
        Align::Center => area.x + (area.width - size.cx) / 2,
    };
    let y = area.y + (area.height - size.cy) / 2;

    // SAFETY: `dc` has the DIB selected; GDI clips to the bitmap.
    unsafe {
        let _ = SetTextColor(ctx.dc, COLORREF(color.colorref()));
        let _ = TextOutW(ctx.dc, x, y, &wide);
    }
    size.cx
}

/// Measures text width in pixels with the selected font.
pub fn measure_text(dc: HDC, text: &str) -> i32 {
    let wide: Vec<u16> = text.encode_utf16().collect();
    extent(dc, &wide).cx
}

fn extent(dc: HDC, wide: &[u16]) -> SIZE {
    let mut size = SIZE::default();
    // SAFETY: `size` is valid for writes.
    unsafe {
        let _ = GetTextExtentPoint32W(dc, wide, &mut size);
    }
    size
}

/// Fills a rectangle, clipped to the buffer.
pub fn fill_rect(ctx: &mut DrawCtx, r: Rect, color: Color) {
    let px = color.pixel();
    let x0 = r.x.max(0);
    let y0 = r.y.max(0);
    let x1 = r.right().min(ctx.w);
    let y1 = r.bottom().min(ctx.h);
    if x0 >= x1 || y0 >= y1 {
        return;
    }
    for y in y0..y1 {
        let row = (y * ctx.w) as usize;
        ctx.buf[row + x0 as usize..row + x1 as usize].fill(px);
    }
}

/// Draws a 1-pixel frame just inside the buffer edges.
pub fn stroke_border(ctx: &mut DrawCtx, color: Color) {
    let (w, h) = (ctx.w, ctx.h);
    fill_rect(ctx, Rect::new(0, 0, w, 1), color);
    fill_rect(ctx, Rect::new(0, h - 1, w, 1), color);
    fill_rect(ctx, Rect::new(0, 0, 1, h), color);
    fill_rect(ctx, Rect::new(w - 1, 0, 1, h), color);
}

/// Draws connected segments through `points`, offset by the origin of
/// `area` and clipped to it.
pub fn polyline(ctx: &mut DrawCtx, area: Rect, points: &[PlotPoint], color: Color, thickness: i32) {
    let px = color.pixel();
    for pair in points.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let dx = b.x - a.x;
        let dy = b.y - a.y;
        let steps = dx.abs().max(dy.abs()).ceil().max(1.0) as i32;
        for i in 0..=steps {
            let t = f64::from(i) / f64::from(steps);
            let x = area.x + (a.x + dx * t).round() as i32;
            let y = area.y + (a.y + dy * t).round() as i32;
            plot(ctx, area, x, y, thickness, px);
        }
    }
}

fn plot(ctx: &mut DrawCtx, clip: Rect, x: i32, y: i32, thickness: i32, px: u32) {
    let half = thickness / 2;
    for py in (y - half)..(y - half + thickness) {
        for pxx in (x - half)..(x - half + thickness) {
            if pxx < clip.x || pxx >= clip.right() || py < clip.y || py >= clip.bottom() {
                continue;
            }
            if pxx < 0 || pxx >= ctx.w || py < 0 || py >= ctx.h {
                continue;
            }
            ctx.buf[(py * ctx.w + pxx) as usize] = px;
        }
    }
}

/// GDI text output leaves alpha at zero; the overlay is fully opaque,
/// so every pixel gets alpha 0xFF before presenting.
pub fn make_opaque(buf: &mut [u32]) {
    for p in buf.iter_mut() {
        *p |= 0xFF00_0000;
    }
}

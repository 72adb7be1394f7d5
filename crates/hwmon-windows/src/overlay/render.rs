//! DIB-based rendering for the overlay.
//!
//! Sets up the 32-bit BGRA bitmap and fonts, fills the background,
//! delegates row drawing, then presents with `UpdateLayeredWindow`.

use std::mem;

use hwmon_core::Rect;
use hwmon_core::component::Components;
use hwmon_core::layout::Layout;
use windows::Win32::Foundation::{COLORREF, HWND, POINT, SIZE};
use windows::Win32::Graphics::Gdi::{
    BI_RGB, BITMAPINFO, BITMAPINFOHEADER, BLENDFUNCTION, CreateCompatibleDC, CreateDIBSection,
    CreateFontW, DIB_RGB_COLORS, DeleteDC, DeleteObject, FONT_CHARSET, FONT_CLIP_PRECISION,
    FONT_OUTPUT_PRECISION, FONT_QUALITY, GdiFlush, GetDC, HDC, HFONT, ReleaseDC, SelectObject,
    SetBkMode, TRANSPARENT,
};
use windows::Win32::UI::WindowsAndMessaging::{ULW_ALPHA, UpdateLayeredWindow};
use windows::core::PCWSTR;

use super::text::{self, DrawCtx};
use super::widgets::{self, Theme};

/// ClearType quality; the background is opaque so subpixel text is safe.
const CLEARTYPE_QUALITY: u32 = 5;

/// Renders the overlay at `frame` and applies it to the layered window.
pub fn render_overlay(
    hwnd: HWND,
    frame: Rect,
    layout: &Layout,
    minimized: bool,
    components: &Components,
    theme: &Theme,
) {
    let (w, h) = (frame.width, frame.height);
    if w <= 0 || h <= 0 {
        return;
    }

    unsafe {
        let screen_dc = GetDC(None);
        let mem_dc = CreateCompatibleDC(Some(screen_dc));

        let bmi = BITMAPINFO {
            bmiHeader: BITMAPINFOHEADER {
                biSize: mem::size_of::<BITMAPINFOHEADER>() as u32,
                biWidth: w,
                biHeight: -h, // top-down
                biPlanes: 1,
                biBitCount: 32,
                biCompression: BI_RGB.0,
                ..Default::default()
            },
            ..Default::default()
        };

        let mut bits = std::ptr::null_mut();
        let Ok(bmp) = CreateDIBSection(Some(mem_dc), &bmi, DIB_RGB_COLORS, &mut bits, None, 0)
        else {
            let _ = DeleteDC(mem_dc);
            let _ = ReleaseDC(None, screen_dc);
            return;
        };
        if bits.is_null() {
            let _ = DeleteObject(bmp.into());
            let _ = DeleteDC(mem_dc);
            let _ = ReleaseDC(None, screen_dc);
            return;
        }

        let old_bmp = SelectObject(mem_dc, bmp.into());

        // SAFETY: `bits` is non-null and points to `w * h` pixels
        // allocated by CreateDIBSection.
        let buf = std::slice::from_raw_parts_mut(bits as *mut u32, (w * h) as usize);
        buf.fill(theme.palette.background.pixel());

        let font = create_font(&theme.style.font, theme.style.font_size);
        let time_font = create_font(&theme.style.font, theme.style.time_font_size);
        let old_font = SelectObject(mem_dc, font.into());
        let _ = SetBkMode(mem_dc, TRANSPARENT);

        let mut ctx = DrawCtx {
            dc: mem_dc,
            buf,
            w,
            h,
            font,
            time_font,
        };

        widgets::draw_rows(&mut ctx, layout, minimized, components, theme);
        // Pending TextOutW calls must land before the buffer is touched again.
        let _ = GdiFlush();
        text::stroke_border(&mut ctx, theme.palette.border);
        text::make_opaque(ctx.buf);

        apply_layered(hwnd, screen_dc, mem_dc, frame);

        SelectObject(mem_dc, old_font);
        let _ = DeleteObject(font.into());
        let _ = DeleteObject(time_font.into());
        SelectObject(mem_dc, old_bmp);
        let _ = DeleteObject(bmp.into());
        let _ = DeleteDC(mem_dc);
        let _ = ReleaseDC(None, screen_dc);
    }
}

fn create_font(face: &str, height: i32) -> HFONT {
    let face: Vec<u16> = face.encode_utf16().chain(std::iter::once(0)).collect();
    // SAFETY: `face` is NUL-terminated and outlives the call.
    unsafe {
        CreateFontW(
            height,
            0,
            0,
            0,
            400,
            0,
            0,
            0,
            FONT_CHARSET(0),
            FONT_OUTPUT_PRECISION(0),
            FONT_CLIP_PRECISION(0),
            FONT_QUALITY(CLEARTYPE_QUALITY as u8),
            0,
            PCWSTR(face.as_ptr()),
        )
    }
}

/// Calls `UpdateLayeredWindow` to move, resize, and repaint in one step.
unsafe fn apply_layered(hwnd: HWND, screen_dc: HDC, mem_dc: HDC, frame: Rect) {
    let blend = BLENDFUNCTION {
        BlendOp: 0,               // AC_SRC_OVER
        SourceConstantAlpha: 255, // fully opaque
        AlphaFormat: 1,           // AC_SRC_ALPHA
        ..Default::default()
    };
    unsafe {
        let _ = UpdateLayeredWindow(
            hwnd,
            Some(screen_dc),
            Some(&POINT {
                x: frame.x,
                y: frame.y,
            }),
            Some(&SIZE {
                cx: frame.width,
                cy: frame.height,
            }),
            Some(mem_dc),
            Some(&POINT::default()),
            COLORREF(0),
            Some(&blend),
            ULW_ALPHA,
        );
    }
}

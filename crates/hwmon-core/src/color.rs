use crate::config::ColorConfig;

/// RGB color parsed from a hex string.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses a hex color string like "#4a9eff" or "4a9eff".
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        Some(Self {
            r: u8::from_str_radix(&hex[0..2], 16).ok()?,
            g: u8::from_str_radix(&hex[2..4], 16).ok()?,
            b: u8::from_str_radix(&hex[4..6], 16).ok()?,
        })
    }

    /// Fully-opaque BGRA pixel value for a 32-bit DIB.
    pub fn pixel(self) -> u32 {
        0xFF00_0000 | (u32::from(self.r) << 16) | (u32::from(self.g) << 8) | u32::from(self.b)
    }

    /// `COLORREF` layout (0x00BBGGRR) used by GDI text output.
    pub fn colorref(self) -> u32 {
        u32::from(self.r) | (u32::from(self.g) << 8) | (u32::from(self.b) << 16)
    }
}

/// The configured color scheme, parsed once.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub background: Color,
    pub border: Color,
    pub text: Color,
    pub dim: Color,
    pub graph_background: Color,
    pub center_line: Color,
    pub cpu: Color,
    pub gpu: Color,
    pub warn: Color,
    pub down: Color,
    pub up: Color,
    pub time_background: Color,
}

impl Palette {
    /// Parses every entry, falling back to the default scheme for
    /// entries that don't parse.
    pub fn from_config(colors: &ColorConfig) -> Self {
        let d = ColorConfig::default();
        let pick = |value: &str, default: &str| {
            Color::from_hex(value)
                .or_else(|| Color::from_hex(default))
                .unwrap_or(Color::rgb(0, 0, 0))
        };
        Self {
            background: pick(&colors.background, &d.background),
            border: pick(&colors.border, &d.border),
            text: pick(&colors.text, &d.text),
            dim: pick(&colors.dim, &d.dim),
            graph_background: pick(&colors.graph_background, &d.graph_background),
            center_line: pick(&colors.center_line, &d.center_line),
            cpu: pick(&colors.cpu, &d.cpu),
            gpu: pick(&colors.gpu, &d.gpu),
            warn: pick(&colors.warn, &d.warn),
            down: pick(&colors.down, &d.down),
            up: pick(&colors.up, &d.up),
            time_background: pick(&colors.time_background, &d.time_background),
        }
    }
}

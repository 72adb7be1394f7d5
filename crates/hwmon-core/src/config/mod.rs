mod loader;
pub mod template;

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::log::LogConfig;

pub use loader::{CONFIG_DIR_ENV, config_dir, config_path, load, try_load};

/// Top-level configuration for hwmon.
///
/// Loaded from `~/.config/hwmon/config.toml`. Missing sections
/// fall back to defaults thanks to `#[serde(default)]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Overlay window behavior.
    pub window: WindowConfig,
    /// Fonts, thresholds, and graph scaling.
    pub style: StyleConfig,
    /// Color scheme.
    pub colors: ColorConfig,
    /// Components stacked top to bottom.
    pub components: Vec<ComponentConfig>,
    /// File logging.
    pub logging: LogConfig,
}

/// Overlay window settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Overlay width in pixels.
    pub width: i32,
    /// Sensor polling interval in milliseconds.
    pub refresh_ms: u64,
    /// Number of polls averaged into one displayed value.
    pub sample_window: usize,
    /// Number of points kept in each graph.
    pub history_len: usize,
    /// Distance in pixels at which a dragged window snaps to an edge.
    pub snap_px: i32,
    /// Movement in pixels below which a press/release counts as a click.
    pub click_threshold: i32,
    /// Corner of the primary work area the overlay starts in.
    pub anchor: Anchor,
}

/// Initial placement corner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Anchor {
    TopLeft,
    #[default]
    TopRight,
    BottomLeft,
    BottomRight,
}

/// Fonts and graph settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    /// Font family name.
    pub font: String,
    /// Font height in pixels for component labels.
    pub font_size: i32,
    /// Font height in pixels for the time row.
    pub time_font_size: i32,
    /// Graph height in pixels.
    pub graph_height: i32,
    /// Temperature in °C above which graphs switch to the warning color.
    pub temp_threshold: f64,
    /// Minimum top of the graph scale.
    pub max_value: f64,
    /// strftime-like format for the time row.
    pub time_format: String,
}

/// Color scheme. All values are hex strings like `"#1e1e1e"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    pub background: String,
    pub border: String,
    pub text: String,
    pub dim: String,
    pub graph_background: String,
    pub center_line: String,
    pub cpu: String,
    pub gpu: String,
    pub warn: String,
    pub down: String,
    pub up: String,
    pub time_background: String,
}

/// The kinds of component the overlay can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentKind {
    Cpu,
    Gpu,
    Network,
    Time,
}

/// Configuration for a single component.
///
/// Set `enabled = false` to hide a component without removing its entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ComponentConfig {
    /// CPU temperature graph with usage.
    Cpu {
        #[serde(default = "default_true")]
        enabled: bool,
    },
    /// GPU temperature graph with usage.
    Gpu {
        #[serde(default = "default_true")]
        enabled: bool,
    },
    /// Network download/upload throughput.
    Network {
        #[serde(default = "default_true")]
        enabled: bool,
    },
    /// Local time. Stays visible when the overlay is minimized.
    Time {
        #[serde(default = "default_true")]
        enabled: bool,
    },
}

fn default_true() -> bool {
    true
}

impl ComponentConfig {
    pub fn kind(&self) -> ComponentKind {
        match self {
            Self::Cpu { .. } => ComponentKind::Cpu,
            Self::Gpu { .. } => ComponentKind::Gpu,
            Self::Network { .. } => ComponentKind::Network,
            Self::Time { .. } => ComponentKind::Time,
        }
    }

    pub fn enabled(&self) -> bool {
        match self {
            Self::Cpu { enabled }
            | Self::Gpu { enabled }
            | Self::Network { enabled }
            | Self::Time { enabled } => *enabled,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            style: StyleConfig::default(),
            colors: ColorConfig::default(),
            components: default_components(),
            logging: LogConfig::default(),
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 220,
            refresh_ms: 250,
            sample_window: 4,
            history_len: 60,
            snap_px: crate::snap::SNAP_PX,
            click_threshold: crate::drag::CLICK_THRESHOLD,
            anchor: Anchor::default(),
        }
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            font: "Segoe UI".into(),
            font_size: 15,
            time_font_size: 13,
            graph_height: 20,
            temp_threshold: 80.0,
            max_value: 100.0,
            time_format: "%H:%M:%S".into(),
        }
    }
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            background: "#1e1e1e".into(),
            border: "#3c3c3c".into(),
            text: "#e0e0e0".into(),
            dim: "#888888".into(),
            graph_background: "#2a2a2a".into(),
            center_line: "#3a3a3a".into(),
            cpu: "#4a9eff".into(),
            gpu: "#4aff9e".into(),
            warn: "#ff4444".into(),
            down: "#8b5cf6".into(),
            up: "#eab308".into(),
            time_background: "#2a2a2a".into(),
        }
    }
}

/// CPU, GPU, and time are shown; network is listed but off.
pub fn default_components() -> Vec<ComponentConfig> {
    vec![
        ComponentConfig::Cpu { enabled: true },
        ComponentConfig::Gpu { enabled: true },
        ComponentConfig::Network { enabled: false },
        ComponentConfig::Time { enabled: true },
    ]
}

impl Config {
    /// Clamps values to safe ranges and replaces unparseable colors
    /// with their defaults.
    pub fn validate(&mut self) {
        let w = &mut self.window;
        w.width = w.width.clamp(80, 2000);
        w.refresh_ms = w.refresh_ms.clamp(50, 60_000);
        w.sample_window = w.sample_window.clamp(1, 100);
        w.history_len = w.history_len.clamp(2, 1000);
        w.snap_px = w.snap_px.clamp(0, 200);
        w.click_threshold = w.click_threshold.clamp(1, 50);

        let s = &mut self.style;
        s.font_size = s.font_size.clamp(6, 96);
        s.time_font_size = s.time_font_size.clamp(6, 96);
        s.graph_height = s.graph_height.clamp(4, 400);
        s.temp_threshold = s.temp_threshold.clamp(0.0, 200.0);
        if s.max_value.is_nan() || s.max_value <= 0.0 {
            s.max_value = StyleConfig::default().max_value;
        }

        self.colors.fix_invalid();
    }

    /// Enabled components in display order.
    pub fn enabled_components(&self) -> Vec<ComponentKind> {
        self.components
            .iter()
            .filter(|c| c.enabled())
            .map(ComponentConfig::kind)
            .collect()
    }

    /// Returns true if an enabled component of `kind` is configured.
    pub fn has_component(&self, kind: ComponentKind) -> bool {
        self.components
            .iter()
            .any(|c| c.enabled() && c.kind() == kind)
    }
}

impl ColorConfig {
    fn fix_invalid(&mut self) {
        let defaults = Self::default();
        let pairs = [
            (&mut self.background, defaults.background),
            (&mut self.border, defaults.border),
            (&mut self.text, defaults.text),
            (&mut self.dim, defaults.dim),
            (&mut self.graph_background, defaults.graph_background),
            (&mut self.center_line, defaults.center_line),
            (&mut self.cpu, defaults.cpu),
            (&mut self.gpu, defaults.gpu),
            (&mut self.warn, defaults.warn),
            (&mut self.down, defaults.down),
            (&mut self.up, defaults.up),
            (&mut self.time_background, defaults.time_background),
        ];
        for (value, default) in pairs {
            if Color::from_hex(value).is_none() {
                crate::log_warn!("Invalid color {value:?}, using {default}");
                *value = default;
            }
        }
    }
}

#[cfg(test)]
mod tests;

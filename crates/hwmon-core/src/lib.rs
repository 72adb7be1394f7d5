pub mod color;
pub mod component;
pub mod config;
pub mod drag;
pub mod error;
pub mod format;
pub mod graph;
pub mod layout;
pub mod log;
pub mod overlay;
pub mod pid;
pub mod rect;
pub mod sample;
pub mod sensors;
pub mod snap;
pub mod strip;

pub use color::{Color, Palette};
pub use config::Config;
pub use error::{HwResult, SensorError};
pub use rect::{Point, Rect};
pub use sensors::{Metrics, NetMetrics, TemperatureSource};
pub use snap::{Monitor, SnapTarget};

#![cfg(windows)]

/// AMD Display Library bindings.
pub mod adl;

/// Overlay application: timer, mouse handling, context menu.
pub mod app;

/// Ctrl+C handling for the foreground overlay.
pub mod ctrl_c;

/// Monitor enumeration.
pub mod monitor;

/// Network throughput backend.
pub mod network;

/// NVIDIA NVAPI bindings.
pub mod nvapi;

/// Layered overlay window and its GDI rendering.
pub mod overlay;

/// Performance Data Helper query wrapper.
pub mod pdh;

/// Process utilities (alive check, running instance).
pub mod process;

/// CPU and GPU sensor backend.
pub mod sensors;

/// DPI awareness and local time.
pub mod system;

pub use monitor::{enumerate_monitors, monitors_or_screen};
pub use network::NetworkBackend;
pub use sensors::SensorBackend;

//! Platform-agnostic reduction of raw sensor readings.
//!
//! The Windows backends collect raw counter values and vendor readings;
//! everything that turns those into a single number lives here.

use std::collections::HashSet;

use serde::Serialize;

/// Thermal zones report Kelvin; readings above this are converted.
const KELVIN_CUTOFF: f64 = 200.0;
const KELVIN_OFFSET: f64 = 273.15;

const GPU_ENGINE_MARKERS: [&str; 4] = ["engtype_3d", "engtype_compute", "engtype_copy", "_total"];
const NET_EXCLUDED_MARKERS: [&str; 2] = ["loopback", "_total"];

/// One sample of CPU and GPU readings. `None` means unavailable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Metrics {
    pub cpu_temp: Option<f64>,
    pub cpu_usage: Option<f64>,
    pub gpu_temp: Option<f64>,
    pub gpu_usage: Option<f64>,
}

/// One sample of network throughput in bytes per second.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct NetMetrics {
    pub net_in: Option<f64>,
    pub net_out: Option<f64>,
}

/// A counter instance value paired with its lowercased instance name.
pub type NamedReading = (String, Option<f64>);

/// Converts a raw temperature to °C, treating large values as Kelvin.
pub fn to_celsius(raw: f64) -> f64 {
    if raw > KELVIN_CUTOFF {
        raw - KELVIN_OFFSET
    } else {
        raw
    }
}

/// Arithmetic mean, `None` for an empty slice.
pub fn average(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

fn clamp_percent(value: f64) -> f64 {
    value.clamp(0.0, 100.0)
}

/// Clamps a utilization reading to `[0, 100]`.
pub fn clamp_usage(raw: Option<f64>) -> Option<f64> {
    raw.map(clamp_percent)
}

/// CPU temperature from thermal-zone instances.
///
/// Missing and zero readings are dropped. A zone whose name mentions
/// "cpu" wins outright; otherwise all zones are averaged.
pub fn cpu_temperature(zones: &[NamedReading]) -> Option<f64> {
    let temps: Vec<(&str, f64)> = zones
        .iter()
        .filter_map(|(name, value)| match value {
            Some(v) if *v != 0.0 => Some((name.as_str(), to_celsius(*v))),
            _ => None,
        })
        .collect();

    if let Some((_, t)) = temps.iter().find(|(name, _)| name.contains("cpu")) {
        return Some(*t);
    }
    let values: Vec<f64> = temps.iter().map(|(_, t)| *t).collect();
    average(&values)
}

/// Averages counter-reported GPU adapter temperatures.
pub fn counter_gpu_temperature(readings: &[Option<f64>]) -> Option<f64> {
    let temps: Vec<f64> = readings.iter().flatten().map(|v| to_celsius(*v)).collect();
    average(&temps)
}

/// Sums GPU engine utilization across the engines that matter.
///
/// The first read that finds matching engines (3D, compute, copy, or a
/// total) locks in their instance names; later reads sum only those so
/// engines appearing mid-run don't inflate the figure.
#[derive(Debug, Default)]
pub struct GpuEngineFilter {
    names: HashSet<String>,
}

impl GpuEngineFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn usage(&mut self, engines: &[NamedReading]) -> Option<f64> {
        let mut values = Vec::new();
        if self.names.is_empty() {
            for (name, value) in engines {
                let Some(v) = value else {
                    continue;
                };
                if GPU_ENGINE_MARKERS.iter().any(|m| name.contains(m)) {
                    values.push(*v);
                    self.names.insert(name.clone());
                }
            }
        } else {
            values.extend(
                engines
                    .iter()
                    .filter(|(name, _)| self.names.contains(name))
                    .filter_map(|(_, value)| *value),
            );
        }
        if values.is_empty() {
            return None;
        }
        Some(clamp_percent(values.iter().sum()))
    }

    pub fn tracked(&self) -> usize {
        self.names.len()
    }
}

/// Total bytes/sec across interfaces, skipping loopback and aggregates.
pub fn network_total(interfaces: &[NamedReading]) -> Option<f64> {
    let mut total = 0.0;
    let mut count = 0;
    for (name, value) in interfaces {
        let Some(v) = value else {
            continue;
        };
        if NET_EXCLUDED_MARKERS.iter().any(|m| name.contains(m)) {
            continue;
        }
        total += v;
        count += 1;
    }
    (count > 0).then_some(total)
}

/// A source of GPU temperature readings.
pub trait TemperatureSource {
    /// Short name for logs, e.g. "NVAPI".
    fn name(&self) -> &'static str;

    /// Current temperature in °C, or `None` if this source has nothing.
    fn temperature(&mut self) -> Option<f64>;
}

/// Ordered list of temperature sources; the first that answers wins.
#[derive(Default)]
pub struct FallbackChain {
    sources: Vec<Box<dyn TemperatureSource>>,
    last: Option<&'static str>,
}

impl FallbackChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, source: Box<dyn TemperatureSource>) {
        self.sources.push(source);
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Names of the configured sources in priority order.
    pub fn names(&self) -> Vec<&'static str> {
        self.sources.iter().map(|s| s.name()).collect()
    }

    pub fn read(&mut self) -> Option<f64> {
        for source in &mut self.sources {
            if let Some(t) = source.temperature() {
                if self.last != Some(source.name()) {
                    crate::log_debug!("GPU temperature source: {}", source.name());
                    self.last = Some(source.name());
                }
                return Some(t);
            }
        }
        None
    }
}

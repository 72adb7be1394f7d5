//! CPU and GPU readings from PDH counters and vendor libraries.

use std::rc::Rc;
use std::time::Duration;

use hwmon_core::sensors::{self, FallbackChain, GpuEngineFilter, Metrics, TemperatureSource};
use hwmon_core::{HwResult, log_debug, log_info, log_warn};

use crate::adl::Adl;
use crate::nvapi::Nvapi;
use crate::pdh::PdhQuery;

const CPU_TEMP: &str = "cpu_temp";
const CPU_USAGE: &str = "cpu_usage";
const GPU_TEMP: &str = "gpu_temp";
const GPU_USAGE: &str = "gpu_usage";

const COUNTERS: [(&str, &str); 4] = [
    (CPU_TEMP, r"\Thermal Zone Information(*)\Temperature"),
    (CPU_USAGE, r"\Processor(_Total)\% Processor Time"),
    (GPU_TEMP, r"\GPU Adapter(*)\Temperature"),
    (GPU_USAGE, r"\GPU Engine(*)\Utilization Percentage"),
];

const PRIME_WAIT: Duration = Duration::from_millis(200);

/// Polls CPU and GPU temperature and utilization.
pub struct SensorBackend {
    query: Rc<PdhQuery>,
    gpu_engines: GpuEngineFilter,
    gpu_temp: FallbackChain,
    adl: Option<Rc<Adl>>,
}

impl SensorBackend {
    /// Opens the counter query and loads whichever vendor libraries are
    /// present. Only a failure to open the query is an error.
    pub fn new() -> HwResult<Self> {
        let mut query = PdhQuery::open()?;
        for (key, path) in COUNTERS {
            query.add_counter(key, path);
        }
        let query = Rc::new(query);

        let mut gpu_temp = FallbackChain::new();
        match Nvapi::load() {
            Ok(nvapi) => gpu_temp.push(Box::new(nvapi)),
            Err(e) => log_warn!("Failed to initialize NVAPI: {e}"),
        }

        let adl = match Adl::load() {
            Ok(adl) => {
                let adl = Rc::new(adl);
                gpu_temp.push(Box::new(AdlTemperature(Rc::clone(&adl))));
                Some(adl)
            }
            Err(e) => {
                log_warn!("Failed to initialize ADL: {e}");
                None
            }
        };

        if query.has_counter(GPU_TEMP) {
            gpu_temp.push(Box::new(CounterTemperature(Rc::clone(&query))));
        }
        log_info!("GPU temperature sources: {:?}", gpu_temp.names());

        query.prime(PRIME_WAIT);

        Ok(Self {
            query,
            gpu_engines: GpuEngineFilter::new(),
            gpu_temp,
            adl,
        })
    }

    /// Collects one round of readings.
    pub fn sample(&mut self) -> Metrics {
        if !self.query.collect() {
            log_debug!("PdhCollectQueryData failed");
        }
        Metrics {
            cpu_temp: sensors::cpu_temperature(&self.query.named(CPU_TEMP)),
            cpu_usage: sensors::clamp_usage(self.query.value(CPU_USAGE)),
            gpu_temp: self.gpu_temp.read(),
            gpu_usage: self.gpu_usage(),
        }
    }

    /// GPU temperature sources in the order they are tried.
    pub fn gpu_sources(&self) -> Vec<&'static str> {
        self.gpu_temp.names()
    }

    /// Engine counters first; ADL activity when they report nothing.
    fn gpu_usage(&mut self) -> Option<f64> {
        self.gpu_engines
            .usage(&self.query.named(GPU_USAGE))
            .or_else(|| {
                let adl = self.adl.as_ref()?;
                sensors::clamp_usage(sensors::average(&adl.activity()))
            })
    }
}

/// ADL as a temperature source, sharing the session used for activity.
struct AdlTemperature(Rc<Adl>);

impl TemperatureSource for AdlTemperature {
    fn name(&self) -> &'static str {
        "ADL"
    }

    fn temperature(&mut self) -> Option<f64> {
        sensors::average(&self.0.temperatures())
    }
}

/// `\GPU Adapter(*)\Temperature`, read from the shared query.
struct CounterTemperature(Rc<PdhQuery>);

impl TemperatureSource for CounterTemperature {
    fn name(&self) -> &'static str {
        "PDH"
    }

    fn temperature(&mut self) -> Option<f64> {
        sensors::counter_gpu_temperature(&self.0.array(GPU_TEMP))
    }
}

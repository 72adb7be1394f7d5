//! NVIDIA GPU temperatures through NVAPI.
//!
//! `nvapi64.dll` exports a single `nvapi_QueryInterface` entry point;
//! every other function is looked up by numeric id.

use std::ffi::c_void;

use hwmon_core::sensors::{self, TemperatureSource};
use hwmon_core::SensorError;
use windows::Win32::Foundation::{FreeLibrary, HMODULE};
use windows::Win32::System::LibraryLoader::{GetProcAddress, LoadLibraryW};
use windows::core::{s, w};

const VENDOR: &str = "NVAPI";

const ID_INITIALIZE: u32 = 0x0150_E828;
const ID_ENUM_PHYSICAL_GPUS: u32 = 0xE5AC_921F;
const ID_GET_THERMAL_SETTINGS: u32 = 0xE364_0A56;

const MAX_PHYSICAL_GPUS: usize = 64;
const MAX_THERMAL_SENSORS: usize = 3;
const THERMAL_TARGET_ALL: i32 = 0;
const NVAPI_OK: i32 = 0;

type QueryInterfaceFn = unsafe extern "C" fn(u32) -> *mut c_void;
type InitializeFn = unsafe extern "C" fn() -> i32;
type EnumGpusFn = unsafe extern "C" fn(*mut [*mut c_void; MAX_PHYSICAL_GPUS], *mut u32) -> i32;
type ThermalFn = unsafe extern "C" fn(*mut c_void, i32, *mut ThermalSettings) -> i32;

#[repr(C)]
#[derive(Debug, Default, Clone, Copy)]
struct ThermalSensor {
    controller: i32,
    default_min_temp: u32,
    default_max_temp: u32,
    current_temp: u32,
    target: i32,
}

#[repr(C)]
#[derive(Debug, Default)]
struct ThermalSettings {
    version: u32,
    count: u32,
    sensor: [ThermalSensor; MAX_THERMAL_SENSORS],
}

impl ThermalSettings {
    fn versioned() -> Self {
        Self {
            version: std::mem::size_of::<Self>() as u32 | (1 << 16),
            ..Default::default()
        }
    }
}

/// A loaded and initialized NVAPI with its physical GPU handles.
pub struct Nvapi {
    module: HMODULE,
    get_thermal: ThermalFn,
    gpus: Vec<*mut c_void>,
}

impl Nvapi {
    pub fn load() -> Result<Self, SensorError> {
        // SAFETY: loading a system library by name.
        let module = unsafe { LoadLibraryW(w!("nvapi64.dll")) }
            .map_err(|e| SensorError::vendor(VENDOR, format!("nvapi64.dll: {e}")))?;

        match Self::init(module) {
            Ok(nvapi) => Ok(nvapi),
            Err(e) => {
                // SAFETY: `module` was loaded above and nothing borrowed from it survives.
                unsafe {
                    let _ = FreeLibrary(module);
                }
                Err(e)
            }
        }
    }

    fn init(module: HMODULE) -> Result<Self, SensorError> {
        // SAFETY: looking up an export of a loaded module.
        let query = unsafe { GetProcAddress(module, s!("nvapi_QueryInterface")) }
            .ok_or_else(|| SensorError::vendor(VENDOR, "nvapi_QueryInterface not exported"))?;
        // SAFETY: the export has this signature.
        let query: QueryInterfaceFn = unsafe { std::mem::transmute(query) };

        let initialize = lookup(query, ID_INITIALIZE)?;
        let enum_gpus = lookup(query, ID_ENUM_PHYSICAL_GPUS)?;
        let get_thermal = lookup(query, ID_GET_THERMAL_SETTINGS)?;

        // SAFETY: the ids above map to functions with these signatures.
        let (initialize, enum_gpus, get_thermal): (InitializeFn, EnumGpusFn, ThermalFn) = unsafe {
            (
                std::mem::transmute(initialize),
                std::mem::transmute(enum_gpus),
                std::mem::transmute(get_thermal),
            )
        };

        // SAFETY: NvAPI_Initialize takes no arguments.
        let status = unsafe { initialize() };
        if status != NVAPI_OK {
            return Err(SensorError::vendor(
                VENDOR,
                format!("initialize returned {status}"),
            ));
        }

        let mut handles = [std::ptr::null_mut(); MAX_PHYSICAL_GPUS];
        let mut count = 0u32;
        // SAFETY: both out-pointers are valid for writes.
        let status = unsafe { enum_gpus(&mut handles, &mut count) };
        if status != NVAPI_OK {
            return Err(SensorError::vendor(
                VENDOR,
                format!("GPU enumeration returned {status}"),
            ));
        }

        let gpus = handles[..(count as usize).min(MAX_PHYSICAL_GPUS)].to_vec();
        hwmon_core::log_info!("NVAPI found {} GPU(s)", gpus.len());

        Ok(Self {
            module,
            get_thermal,
            gpus,
        })
    }

    /// Current temperature of the first sensor of every GPU that reports one.
    pub fn temperatures(&self) -> Vec<f64> {
        self.gpus
            .iter()
            .filter_map(|&gpu| {
                let mut settings = ThermalSettings::versioned();
                // SAFETY: `gpu` came from enumeration; `settings` is versioned.
                let status = unsafe { (self.get_thermal)(gpu, THERMAL_TARGET_ALL, &mut settings) };
                (status == NVAPI_OK && settings.count > 0)
                    .then(|| f64::from(settings.sensor[0].current_temp))
            })
            .collect()
    }
}

fn lookup(query: QueryInterfaceFn, id: u32) -> Result<*mut c_void, SensorError> {
    // SAFETY: nvapi_QueryInterface accepts any id and returns null when unknown.
    let ptr = unsafe { query(id) };
    if ptr.is_null() {
        return Err(SensorError::vendor(
            VENDOR,
            format!("function 0x{id:08X} not available"),
        ));
    }
    Ok(ptr)
}

impl TemperatureSource for Nvapi {
    fn name(&self) -> &'static str {
        VENDOR
    }

    fn temperature(&mut self) -> Option<f64> {
        sensors::average(&self.temperatures())
    }
}

impl Drop for Nvapi {
    fn drop(&mut self) {
        // SAFETY: the GPU handles are not used after this point.
        unsafe {
            let _ = FreeLibrary(self.module);
        }
    }
}

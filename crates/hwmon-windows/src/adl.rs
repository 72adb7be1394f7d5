//! AMD GPU temperature and activity through the AMD Display Library.

use std::ffi::c_void;

use hwmon_core::SensorError;
use windows::Win32::Foundation::{FreeLibrary, HMODULE};
use windows::Win32::System::Com::CoTaskMemAlloc;
use windows::Win32::System::LibraryLoader::{GetProcAddress, LoadLibraryW};
use windows::core::{PCSTR, s, w};

const VENDOR: &str = "ADL";

const ADL_OK: i32 = 0;
const ADL_MAX_PATH: usize = 256;
const THERMAL_CONTROLLER_GPU: i32 = 0;

/// Readings outside this range (°C, exclusive) are sensor garbage.
const MIN_TEMP: f64 = 0.0;
const MAX_TEMP: f64 = 150.0;

type AllocCallback = unsafe extern "system" fn(i32) -> *mut c_void;
type CreateFn = unsafe extern "C" fn(AllocCallback, i32) -> i32;
type DestroyFn = unsafe extern "C" fn() -> i32;
type AdapterCountFn = unsafe extern "C" fn(*mut i32) -> i32;
type AdapterInfoFn = unsafe extern "C" fn(*mut AdapterInfo, i32) -> i32;
type AdapterActiveFn = unsafe extern "C" fn(i32, *mut i32) -> i32;
type TemperatureFn = unsafe extern "C" fn(i32, i32, *mut Temperature) -> i32;
type ActivityFn = unsafe extern "C" fn(i32, *mut Activity) -> i32;

#[repr(C)]
#[derive(Clone, Copy)]
struct AdapterInfo {
    size: i32,
    adapter_index: i32,
    udid: [u8; ADL_MAX_PATH],
    bus_number: i32,
    device_number: i32,
    function_number: i32,
    vendor_id: i32,
    adapter_name: [u8; ADL_MAX_PATH],
    display_name: [u8; ADL_MAX_PATH],
    present: i32,
    exist: i32,
    driver_path: [u8; ADL_MAX_PATH],
    driver_path_ext: [u8; ADL_MAX_PATH],
    pnp_string: [u8; ADL_MAX_PATH],
    os_display_index: i32,
}

impl AdapterInfo {
    fn zeroed() -> Self {
        // SAFETY: every field is a plain integer or byte array.
        unsafe { std::mem::zeroed() }
    }
}

/// Temperature in millidegrees Celsius.
#[repr(C)]
#[derive(Debug, Default)]
struct Temperature {
    size: i32,
    temperature: i32,
}

#[repr(C)]
#[derive(Debug, Default)]
struct Activity {
    size: i32,
    engine_clock: i32,
    memory_clock: i32,
    vddc: i32,
    activity_percent: i32,
    current_performance_level: i32,
    current_bus_speed: i32,
    current_bus_lanes: i32,
    maximum_bus_lanes: i32,
    reserved: i32,
}

/// ADL allocates its result buffers through this callback.
unsafe extern "system" fn adl_alloc(size: i32) -> *mut c_void {
    // SAFETY: CoTaskMemAlloc accepts any size and returns null on failure.
    unsafe { CoTaskMemAlloc(size.max(0) as usize) }
}

/// ADL entry points resolved from the loaded module.
#[derive(Clone, Copy)]
struct Api {
    create: CreateFn,
    destroy: DestroyFn,
    adapter_count: AdapterCountFn,
    adapter_info: AdapterInfoFn,
    adapter_active: AdapterActiveFn,
    temperature: TemperatureFn,
    activity: ActivityFn,
}

impl Api {
    fn resolve(module: HMODULE) -> Result<Self, SensorError> {
        // SAFETY: each export is transmuted to its documented signature.
        unsafe {
            Ok(Self {
                create: std::mem::transmute(export(module, s!("ADL_Main_Control_Create"))?),
                destroy: std::mem::transmute(export(module, s!("ADL_Main_Control_Destroy"))?),
                adapter_count: std::mem::transmute(export(
                    module,
                    s!("ADL_Adapter_NumberOfAdapters_Get"),
                )?),
                adapter_info: std::mem::transmute(export(
                    module,
                    s!("ADL_Adapter_AdapterInfo_Get"),
                )?),
                adapter_active: std::mem::transmute(export(module, s!("ADL_Adapter_Active_Get"))?),
                temperature: std::mem::transmute(export(
                    module,
                    s!("ADL_Overdrive5_Temperature_Get"),
                )?),
                activity: std::mem::transmute(export(
                    module,
                    s!("ADL_Overdrive5_CurrentActivity_Get"),
                )?),
            })
        }
    }
}

/// An initialized ADL session and its active adapters.
pub struct Adl {
    module: HMODULE,
    api: Api,
    adapters: Vec<i32>,
}

impl Adl {
    pub fn load() -> Result<Self, SensorError> {
        // SAFETY: loading a system library by name.
        let module = unsafe { LoadLibraryW(w!("atiadlxx.dll")) }
            .or_else(|_| unsafe { LoadLibraryW(w!("atiadlxy.dll")) })
            .map_err(|e| SensorError::vendor(VENDOR, format!("atiadlxx.dll: {e}")))?;

        let api = match Api::resolve(module) {
            Ok(api) => api,
            Err(e) => {
                free(module);
                return Err(e);
            }
        };

        // SAFETY: `1` asks ADL to report only connected adapters.
        if unsafe { (api.create)(adl_alloc, 1) } != ADL_OK {
            free(module);
            return Err(SensorError::vendor(VENDOR, "ADL_Main_Control_Create failed"));
        }

        // Drop destroys the session from here on.
        let mut adl = Self {
            module,
            api,
            adapters: Vec::new(),
        };
        adl.adapters = adl.active_adapters()?;
        if adl.adapters.is_empty() {
            return Err(SensorError::vendor(VENDOR, "no active adapters"));
        }
        hwmon_core::log_info!("ADL found {} active adapter(s)", adl.adapters.len());
        Ok(adl)
    }

    fn active_adapters(&self) -> Result<Vec<i32>, SensorError> {
        let mut n = 0i32;
        // SAFETY: `n` is valid for writes.
        if unsafe { (self.api.adapter_count)(&mut n) } != ADL_OK {
            return Err(SensorError::vendor(VENDOR, "adapter count failed"));
        }
        let n = usize::try_from(n).unwrap_or(0);
        if n == 0 {
            return Ok(Vec::new());
        }

        let mut infos = vec![AdapterInfo::zeroed(); n];
        let bytes = (std::mem::size_of::<AdapterInfo>() * n) as i32;
        // SAFETY: `infos` holds `bytes` bytes.
        if unsafe { (self.api.adapter_info)(infos.as_mut_ptr(), bytes) } != ADL_OK {
            return Err(SensorError::vendor(VENDOR, "adapter info failed"));
        }

        let mut adapters = Vec::new();
        for adapter in infos.iter().filter(|a| a.present != 0 && a.exist != 0) {
            let mut is_active = 0i32;
            // SAFETY: `is_active` is valid for writes.
            let status = unsafe { (self.api.adapter_active)(adapter.adapter_index, &mut is_active) };
            if status == ADL_OK && is_active != 0 {
                adapters.push(adapter.adapter_index);
            }
        }
        Ok(adapters)
    }

    /// GPU core temperature per active adapter, in °C.
    pub fn temperatures(&self) -> Vec<f64> {
        self.adapters
            .iter()
            .filter_map(|&index| {
                let mut t = Temperature {
                    size: std::mem::size_of::<Temperature>() as i32,
                    ..Default::default()
                };
                // SAFETY: `t` is sized and valid for writes.
                let status = unsafe { (self.api.temperature)(index, THERMAL_CONTROLLER_GPU, &mut t) };
                let celsius = f64::from(t.temperature) / 1000.0;
                (status == ADL_OK && celsius > MIN_TEMP && celsius < MAX_TEMP).then_some(celsius)
            })
            .collect()
    }

    /// Engine activity percent per active adapter.
    pub fn activity(&self) -> Vec<f64> {
        self.adapters
            .iter()
            .filter_map(|&index| {
                let mut a = Activity {
                    size: std::mem::size_of::<Activity>() as i32,
                    ..Default::default()
                };
                // SAFETY: `a` is sized and valid for writes.
                let status = unsafe { (self.api.activity)(index, &mut a) };
                (status == ADL_OK).then(|| f64::from(a.activity_percent))
            })
            .collect()
    }
}

fn export(
    module: HMODULE,
    name: PCSTR,
) -> Result<unsafe extern "system" fn() -> isize, SensorError> {
    // SAFETY: `name` is a NUL-terminated literal.
    unsafe { GetProcAddress(module, name) }.ok_or_else(|| {
        // SAFETY: same literal as above.
        let name = unsafe { name.to_string() }.unwrap_or_default();
        SensorError::vendor(VENDOR, format!("{name} not exported"))
    })
}

fn free(module: HMODULE) {
    // SAFETY: nothing resolved from `module` is used afterwards.
    unsafe {
        let _ = FreeLibrary(module);
    }
}

impl Drop for Adl {
    fn drop(&mut self) {
        // SAFETY: the session was created in `load`.
        unsafe {
            let _ = (self.api.destroy)();
        }
        free(self.module);
    }
}

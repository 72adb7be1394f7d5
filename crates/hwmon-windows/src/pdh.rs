//! Thin wrapper over a Performance Data Helper (PDH) query.
//!
//! Counters are added by English path so the query works on any
//! display language. Wildcard counters (`\Processor(*)\...`) are read as
//! arrays of per-instance values.

use std::collections::HashMap;
use std::time::Duration;

use hwmon_core::SensorError;
use hwmon_core::sensors::NamedReading;
use windows::Win32::System::Performance::{
    PDH_FMT_COUNTERVALUE, PDH_FMT_COUNTERVALUE_ITEM_W, PDH_FMT_DOUBLE, PDH_HCOUNTER, PDH_HQUERY,
    PdhAddEnglishCounterW, PdhCloseQuery, PdhCollectQueryData, PdhGetFormattedCounterArrayW,
    PdhGetFormattedCounterValue, PdhOpenQueryW,
};
use windows::core::PCWSTR;

const ERROR_SUCCESS: u32 = 0;
const PDH_MORE_DATA: u32 = 0x8000_07D2;
const PDH_CSTATUS_VALID_DATA: u32 = 0;
const PDH_CSTATUS_NEW_DATA: u32 = 1;

/// An open PDH query and the counters added to it, keyed by name.
pub struct PdhQuery {
    query: PDH_HQUERY,
    counters: HashMap<&'static str, PDH_HCOUNTER>,
}

impl PdhQuery {
    pub fn open() -> Result<Self, SensorError> {
        let mut query = PDH_HQUERY::default();
        // SAFETY: a null data source selects the live system; `query`
        // receives the handle on success.
        let status = unsafe { PdhOpenQueryW(PCWSTR::null(), 0, &mut query) };
        if status != ERROR_SUCCESS {
            return Err(SensorError::CounterQuery {
                call: "PdhOpenQueryW",
                status,
            });
        }
        Ok(Self {
            query,
            counters: HashMap::new(),
        })
    }

    /// Adds a counter under `key`. Returns false (and skips it) when the
    /// counter doesn't exist on this machine.
    pub fn add_counter(&mut self, key: &'static str, path: &str) -> bool {
        let wide: Vec<u16> = path.encode_utf16().chain(std::iter::once(0)).collect();
        let mut counter = PDH_HCOUNTER::default();
        // SAFETY: `wide` is NUL-terminated and outlives the call.
        let status = unsafe {
            PdhAddEnglishCounterW(self.query, PCWSTR(wide.as_ptr()), 0, &mut counter)
        };
        if status != ERROR_SUCCESS {
            hwmon_core::log_debug!("Counter {path} unavailable (0x{status:08X})");
            return false;
        }
        self.counters.insert(key, counter);
        true
    }

    pub fn has_counter(&self, key: &str) -> bool {
        self.counters.contains_key(key)
    }

    /// Samples every counter in the query.
    pub fn collect(&self) -> bool {
        // SAFETY: `self.query` is open until drop.
        unsafe { PdhCollectQueryData(self.query) == ERROR_SUCCESS }
    }

    /// Collects twice with a pause so rate counters have two samples.
    pub fn prime(&self, wait: Duration) {
        if self.collect() {
            std::thread::sleep(wait);
            self.collect();
        }
    }

    /// Formatted value of a single-instance counter.
    pub fn value(&self, key: &str) -> Option<f64> {
        let counter = *self.counters.get(key)?;
        let mut value = PDH_FMT_COUNTERVALUE::default();
        // SAFETY: `counter` belongs to this open query.
        let status =
            unsafe { PdhGetFormattedCounterValue(counter, PDH_FMT_DOUBLE, None, &mut value) };
        if status != ERROR_SUCCESS || !is_valid(value.CStatus) {
            return None;
        }
        // SAFETY: PDH_FMT_DOUBLE selects the `doubleValue` member.
        Some(unsafe { value.Anonymous.doubleValue })
    }

    /// Per-instance values of a wildcard counter. Empty when the counter
    /// is missing or can't be read.
    pub fn array(&self, key: &str) -> Vec<Option<f64>> {
        self.read_array(key)
            .into_iter()
            .map(|(_, value)| value)
            .collect()
    }

    /// Per-instance values paired with lowercased instance names.
    pub fn named(&self, key: &str) -> Vec<NamedReading> {
        self.read_array(key)
    }

    fn read_array(&self, key: &str) -> Vec<NamedReading> {
        let Some(&counter) = self.counters.get(key) else {
            return Vec::new();
        };

        let mut size = 0u32;
        let mut count = 0u32;
        // SAFETY: a null buffer asks PDH for the required size.
        let status = unsafe {
            PdhGetFormattedCounterArrayW(counter, PDH_FMT_DOUBLE, &mut size, &mut count, None)
        };
        if status != PDH_MORE_DATA || size == 0 {
            return Vec::new();
        }

        // The buffer holds the item array followed by the instance name
        // strings it points into; u64 storage keeps the items aligned.
        let mut storage = vec![0u64; (size as usize).div_ceil(8)];
        let items = storage.as_mut_ptr().cast::<PDH_FMT_COUNTERVALUE_ITEM_W>();
        // SAFETY: `storage` is at least `size` bytes.
        let status = unsafe {
            PdhGetFormattedCounterArrayW(counter, PDH_FMT_DOUBLE, &mut size, &mut count, Some(items))
        };
        if status != ERROR_SUCCESS {
            return Vec::new();
        }

        // SAFETY: PDH wrote `count` items at the start of `storage`.
        let items = unsafe { std::slice::from_raw_parts(items, count as usize) };
        items
            .iter()
            .map(|item| {
                // SAFETY: `szName` points into `storage`, which is alive.
                let name = unsafe { item.szName.to_string() }
                    .unwrap_or_default()
                    .to_lowercase();
                let value = is_valid(item.FmtValue.CStatus)
                    // SAFETY: PDH_FMT_DOUBLE selects the `doubleValue` member.
                    .then(|| unsafe { item.FmtValue.Anonymous.doubleValue });
                (name, value)
            })
            .collect()
    }
}

fn is_valid(cstatus: u32) -> bool {
    cstatus == PDH_CSTATUS_VALID_DATA || cstatus == PDH_CSTATUS_NEW_DATA
}

impl Drop for PdhQuery {
    fn drop(&mut self) {
        // SAFETY: closing the query also frees its counters.
        unsafe {
            let _ = PdhCloseQuery(self.query);
        }
    }
}

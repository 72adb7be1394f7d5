use std::time::Duration;

use hwmon_core::sensors::{self, NetMetrics};
use hwmon_core::{HwResult, log_debug};

use crate::pdh::PdhQuery;

const BYTES_RECV: &str = "bytes_recv";
const BYTES_SENT: &str = "bytes_sent";

const PRIME_WAIT: Duration = Duration::from_millis(100);

/// Polls network throughput summed over physical interfaces.
pub struct NetworkBackend {
    query: PdhQuery,
}

impl NetworkBackend {
    pub fn new() -> HwResult<Self> {
        let mut query = PdhQuery::open()?;
        query.add_counter(BYTES_RECV, r"\Network Interface(*)\Bytes Received/sec");
        query.add_counter(BYTES_SENT, r"\Network Interface(*)\Bytes Sent/sec");
        query.prime(PRIME_WAIT);
        Ok(Self { query })
    }

    /// Bytes per second received and sent since the previous sample.
    pub fn sample(&mut self) -> NetMetrics {
        if !self.query.collect() {
            log_debug!("Network PdhCollectQueryData failed");
        }
        NetMetrics {
            net_in: sensors::network_total(&self.query.named(BYTES_RECV)),
            net_out: sensors::network_total(&self.query.named(BYTES_SENT)),
        }
    }
}

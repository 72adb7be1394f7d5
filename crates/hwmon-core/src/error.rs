use std::fmt;

/// A boxed error type for plumbing that can fail in many ways
/// (file IO, Win32 calls, config parsing).
pub type HwResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Failures from the sensor layer.
///
/// An unavailable *reading* is `None`, not an error. These variants
/// describe a source that could not be set up at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SensorError {
    /// A performance-counter call returned a non-success status.
    CounterQuery { call: &'static str, status: u32 },
    /// A vendor GPU library is missing or failed to initialize.
    VendorUnavailable {
        vendor: &'static str,
        reason: String,
    },
}

impl SensorError {
    pub fn vendor(vendor: &'static str, reason: impl Into<String>) -> Self {
        Self::VendorUnavailable {
            vendor,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CounterQuery { call, status } => {
                write!(f, "{call} failed with status 0x{status:08X}")
            }
            Self::VendorUnavailable { vendor, reason } => {
                write!(f, "{vendor} unavailable: {reason}")
            }
        }
    }
}

impl std::error::Error for SensorError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_query_shows_hex_status() {
        let err = SensorError::CounterQuery {
            call: "PdhOpenQueryW",
            status: 0xC0000BB8,
        };

        assert_eq!(err.to_string(), "PdhOpenQueryW failed with status 0xC0000BB8");
    }

    #[test]
    fn vendor_error_boxes_into_hw_result() {
        // Arrange
        fn load() -> HwResult<()> {
            Err(SensorError::vendor("NVAPI", "nvapi64.dll not found"))?
        }

        // Act
        let err = load().unwrap_err();

        // Assert
        assert_eq!(err.to_string(), "NVAPI unavailable: nvapi64.dll not found");
    }
}

//! Label formatting for readings and the clock.

use std::fmt::Write;

const KIB: f64 = 1024.0;
const MIB: f64 = 1024.0 * 1024.0;

pub const UNAVAILABLE: &str = "N/A";

/// `"47.5°C"`, or `"N/A"` when unknown.
pub fn temperature(celsius: Option<f64>) -> String {
    match celsius {
        Some(c) => format!("{c:.1}°C"),
        None => UNAVAILABLE.into(),
    }
}

/// `"12.3%"`, or `"N/A"` when unknown.
pub fn usage(percent: Option<f64>) -> String {
    match percent {
        Some(p) => format!("{p:.1}%"),
        None => UNAVAILABLE.into(),
    }
}

/// Human-readable bytes per second: `"1.5 MB"`, `"3.0 KB"`, `"512 B"`.
pub fn speed(bytes_per_sec: Option<f64>) -> String {
    let Some(b) = bytes_per_sec else {
        return UNAVAILABLE.into();
    };
    if b >= MIB {
        format!("{:.1} MB", b / MIB)
    } else if b >= KIB {
        format!("{:.1} KB", b / KIB)
    } else {
        format!("{} B", b as i64)
    }
}

/// Download label, e.g. `"↓ 1.5 MB"`.
pub fn download(bytes_per_sec: Option<f64>) -> String {
    format!("↓ {}", speed(bytes_per_sec))
}

/// Upload label, e.g. `"↑ 512 B"`.
pub fn upload(bytes_per_sec: Option<f64>) -> String {
    format!("↑ {}", speed(bytes_per_sec))
}

/// Wall-clock time broken into calendar fields.
///
/// Filled from the platform clock; kept free of any OS types so
/// formatting is testable everywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LocalTime {
    pub year: u16,
    /// 1 = January.
    pub month: u16,
    pub day: u16,
    /// 0 = Sunday.
    pub weekday: u16,
    pub hour: u16,
    pub minute: u16,
    pub second: u16,
}

const WEEKDAYS: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

impl LocalTime {
    /// Formats with a strftime subset: `%H %M %S %A %d %B %Y %%`.
    ///
    /// Unknown specifiers are copied through unchanged.
    pub fn format(&self, pattern: &str) -> String {
        let mut out = String::with_capacity(pattern.len() + 8);
        let mut chars = pattern.chars();
        while let Some(c) = chars.next() {
            if c != '%' {
                out.push(c);
                continue;
            }
            let _ = match chars.next() {
                Some('H') => write!(out, "{:02}", self.hour),
                Some('M') => write!(out, "{:02}", self.minute),
                Some('S') => write!(out, "{:02}", self.second),
                Some('d') => write!(out, "{:02}", self.day),
                Some('Y') => write!(out, "{}", self.year),
                Some('A') => write!(out, "{}", self.weekday_name()),
                Some('B') => write!(out, "{}", self.month_name()),
                Some('%') => write!(out, "%"),
                Some(other) => write!(out, "%{other}"),
                None => write!(out, "%"),
            };
        }
        out
    }

    fn weekday_name(&self) -> &'static str {
        WEEKDAYS
            .get(usize::from(self.weekday))
            .copied()
            .unwrap_or("?")
    }

    fn month_name(&self) -> &'static str {
        usize::from(self.month)
            .checked_sub(1)
            .and_then(|i| MONTHS.get(i))
            .copied()
            .unwrap_or("?")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_time() -> LocalTime {
        LocalTime {
            year: 2024,
            month: 3,
            day: 7,
            weekday: 4,
            hour: 9,
            minute: 5,
            second: 30,
        }
    }

    #[test]
    fn temperature_and_usage_labels() {
        assert_eq!(temperature(Some(47.26)), "47.3°C");
        assert_eq!(temperature(None), "N/A");
        assert_eq!(usage(Some(100.0)), "100.0%");
        assert_eq!(usage(None), "N/A");
    }

    #[test]
    fn speed_picks_unit_by_magnitude() {
        assert_eq!(speed(Some(512.9)), "512 B");
        assert_eq!(speed(Some(1024.0)), "1.0 KB");
        assert_eq!(speed(Some(1536.0)), "1.5 KB");
        assert_eq!(speed(Some(1024.0 * 1024.0 * 2.5)), "2.5 MB");
        assert_eq!(speed(None), "N/A");
    }

    #[test]
    fn network_labels_carry_arrows() {
        assert_eq!(download(Some(0.0)), "↓ 0 B");
        assert_eq!(upload(None), "↑ N/A");
    }

    #[test]
    fn time_format_default_pattern() {
        assert_eq!(sample_time().format("%H:%M:%S"), "09:05:30");
    }

    #[test]
    fn time_format_names_and_escapes() {
        // Act
        let text = sample_time().format("%A %d %B %Y, 100%% %Q");

        // Assert
        assert_eq!(text, "Thursday 07 March 2024, 100% %Q");
    }

    #[test]
    fn time_format_trailing_percent_is_kept() {
        assert_eq!(sample_time().format("%H%"), "09%");
    }

    #[test]
    fn out_of_range_fields_do_not_panic() {
        let t = LocalTime::default();
        assert_eq!(t.format("%A %B"), "Sunday ?");
    }
}

//! Display strings for durations and clock times.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::constants::{MINUTES_PER_DAY, MINUTES_PER_HOUR};

fn plural(n: u64, unit: &str) -> String {
    if n == 1 {
        format!("{n} {unit}")
    } else {
        format!("{n} {unit}s")
    }
}

/// "30 minutes", "1 hour", "1h 30m", "2 days", "1d 1h".
pub fn format_duration(minutes: u64) -> String {
    if minutes < MINUTES_PER_HOUR {
        return plural(minutes, "minute");
    }
    if minutes < MINUTES_PER_DAY {
        let hours = minutes / MINUTES_PER_HOUR;
        let rest = minutes % MINUTES_PER_HOUR;
        return if rest == 0 {
            plural(hours, "hour")
        } else {
            format!("{hours}h {rest}m")
        };
    }

    let days = minutes / MINUTES_PER_DAY;
    let rest = minutes % MINUTES_PER_DAY;
    if rest == 0 {
        plural(days, "day")
    } else {
        format!("{days}d {}h", rest / MINUTES_PER_HOUR)
    }
}

/// 24-hour "HH:MM" in `tz`.
pub fn format_clock_time(instant: DateTime<Utc>, tz: Tz) -> String {
    instant.with_timezone(&tz).format("%H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono_tz::Asia::Jerusalem;

    #[test]
    fn test_duration_table() {
        assert_eq!(format_duration(30), "30 minutes");
        assert_eq!(format_duration(1), "1 minute");
        assert_eq!(format_duration(60), "1 hour");
        assert_eq!(format_duration(90), "1h 30m");
        assert_eq!(format_duration(1440), "1 day");
        assert_eq!(format_duration(1500), "1d 1h");
    }

    #[test]
    fn test_duration_edges() {
        assert_eq!(format_duration(0), "0 minutes");
        assert_eq!(format_duration(59), "59 minutes");
        assert_eq!(format_duration(120), "2 hours");
        assert_eq!(format_duration(61), "1h 1m");
        assert_eq!(format_duration(1439), "23h 59m");
        assert_eq!(format_duration(2880), "2 days");
        // Leftover minutes below an hour vanish in the day form
        assert_eq!(format_duration(1441), "1d 0h");
        assert_eq!(format_duration(2 * 1440 + 23 * 60 + 59), "2d 23h");
    }

    #[test]
    fn test_clock_time() {
        let noon = Jerusalem.with_ymd_and_hms(2024, 1, 5, 12, 0, 0).unwrap();
        assert_eq!(format_clock_time(noon.with_timezone(&Utc), Jerusalem), "12:00");

        let midnight = Jerusalem.with_ymd_and_hms(2024, 1, 6, 0, 0, 0).unwrap();
        assert_eq!(format_clock_time(midnight.with_timezone(&Utc), Jerusalem), "00:00");

        let evening = Utc.with_ymd_and_hms(2024, 6, 21, 15, 24, 59).unwrap();
        assert_eq!(format_clock_time(evening, Jerusalem), "18:24");
    }

    #[test]
    fn test_clock_time_utc() {
        let t = Utc.with_ymd_and_hms(2024, 6, 21, 7, 5, 0).unwrap();
        assert_eq!(format_clock_time(t, chrono_tz::UTC), "07:05");
    }
}

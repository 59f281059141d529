use chrono::{DateTime, Local};

/// `Instant` that also works in the browser.
pub use web_time::Instant as AppInstant;

pub const STANDARD_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Request durations: `850ms`, `4.2s`, `1m 05s`.
pub fn format_duration_ms(ms: u128) -> String {
    if ms < 1_000 {
        return format!("{}ms", ms);
    }
    let secs = ms as f64 / 1000.0;
    if secs < 60.0 {
        return format!("{:.1}s", secs);
    }
    let whole = ms / 1000;
    format!("{}m {:02}s", whole / 60, whole % 60)
}

pub fn format_local_time(dt: &DateTime<Local>) -> String {
    dt.format(STANDARD_TIME_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn durations() {
        assert_eq!(format_duration_ms(850), "850ms");
        assert_eq!(format_duration_ms(4_200), "4.2s");
        assert_eq!(format_duration_ms(65_000), "1m 05s");
    }
}

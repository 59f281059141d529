mod time_utils;

pub use time_utils::{AppInstant, format_duration_ms, format_local_time};

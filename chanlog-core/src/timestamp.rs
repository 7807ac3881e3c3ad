use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{Local, TimeZone};

/// Length of every timestamp produced here: `yyyy-MM-dd HH:mm:ss.mmm`.
pub const TIMESTAMP_LEN: usize = 23;

/// Returned when the clock cannot be read or converted. Same length as a
/// real timestamp so columns stay aligned.
pub const TIMESTAMP_PLACEHOLDER: &str = "yyyy-MM-dd hh:mm:ss.mil";

/// Current local time with millisecond precision.
pub fn timestamp() -> String {
    format_timestamp(SystemTime::now())
}

/// Formats `time` as local time, or [`TIMESTAMP_PLACEHOLDER`] when it cannot
/// be represented.
pub fn format_timestamp(time: SystemTime) -> String {
    let Ok(since_epoch) = time.duration_since(UNIX_EPOCH) else {
        return TIMESTAMP_PLACEHOLDER.to_string();
    };
    let Ok(secs) = i64::try_from(since_epoch.as_secs()) else {
        return TIMESTAMP_PLACEHOLDER.to_string();
    };
    let Some(local) = Local
        .timestamp_opt(secs, since_epoch.subsec_nanos())
        .single()
    else {
        return TIMESTAMP_PLACEHOLDER.to_string();
    };
    let formatted = local.format("%Y-%m-%d %H:%M:%S%.3f").to_string();
    if formatted.len() == TIMESTAMP_LEN {
        formatted
    } else {
        TIMESTAMP_PLACEHOLDER.to_string()
    }
}

use std::time::{SystemTime, UNIX_EPOCH};

/// Seconds since the UNIX epoch, as a float for toast expiry arithmetic.
pub fn current_time_secs() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs_f64()
}

/// Milliseconds since the UNIX epoch, used to stamp exported file names.
pub fn timestamp_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis()
}

// Shortcuts over the system clock that need no Carbon value.
use chrono::{Local, Utc};

use crate::error::Result;
use crate::carbon::Carbon;

/// Milliseconds since the Unix epoch.
pub fn millisecond() -> i64 {
    Utc::now().timestamp_millis()
}

/// Seconds since the Unix epoch.
pub fn timestamp() -> i64 {
    Utc::now().timestamp()
}

/// The current local time rendered with `layout`.
pub fn format_now(layout: &str) -> Result<String> {
    Carbon::from_instant(Local::now()).try_format(layout)
}

//! Timestamp formatting.
//!
//! Tasks carry their creation time as a display string rather than an
//! ISO timestamp — the value is shown verbatim in the UI and the digest.

use chrono::{Datelike, Local, NaiveDateTime, Timelike};

/// Format a datetime as e.g. `21 August 2025, 3:45pm`.
///
/// 12-hour clock, no zero-padding on day or hour, lowercase am/pm.
pub fn format_datetime(dt: NaiveDateTime) -> String {
    let hour = match dt.hour() % 12 {
        0 => 12,
        h => h,
    };
    let am_pm = if dt.hour() < 12 { "am" } else { "pm" };
    format!(
        "{} {}, {}:{:02}{}",
        dt.day(),
        dt.format("%B %Y"),
        hour,
        dt.minute(),
        am_pm
    )
}

/// Current local time in the application's display format.
pub fn current_timestamp() -> String {
    format_datetime(Local::now().naive_local())
}

//! Next-occurrence computation for a fixed daily fire time.

use chrono::{Days, NaiveDateTime, NaiveTime};

/// A fixed time of day, local clock.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DailySchedule {
    /// Hour of day (0–23).
    pub hour: u8,
    /// Minute of the hour (0–59).
    pub minute: u8,
}

impl DailySchedule {
    /// Create a schedule. Out-of-range values are clamped into the valid
    /// ranges (settings pre-validate, this is a backstop).
    pub fn new(hour: u8, minute: u8) -> Self {
        Self {
            hour: hour.min(23),
            minute: minute.min(59),
        }
    }

    /// The fire time as a `NaiveTime`.
    fn fire_time(self) -> NaiveTime {
        NaiveTime::from_hms_opt(u32::from(self.hour), u32::from(self.minute), 0)
            .unwrap_or(NaiveTime::MIN)
    }

    /// The next occurrence strictly after `after`.
    pub fn next_run(self, after: NaiveDateTime) -> NaiveDateTime {
        let today = after.date().and_time(self.fire_time());
        if today > after {
            today
        } else {
            today
                .checked_add_days(Days::new(1))
                .unwrap_or(today)
        }
    }
}

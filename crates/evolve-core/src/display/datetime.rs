//! DateTime display utilities.

use std::fmt;

use jiff::{tz::TimeZone, Timestamp};

/// Millisecond timestamp of a transcript entry, shown in the system time
/// zone as `YYYY-MM-DD HH:MM`.
pub struct MessageTime(pub i64);

impl fmt::Display for MessageTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match Timestamp::from_millisecond(self.0) {
            Ok(ts) => write!(
                f,
                "{}",
                ts.to_zoned(TimeZone::system()).strftime("%Y-%m-%d %H:%M")
            ),
            Err(_) => write!(f, "?"),
        }
    }
}

use chrono::{DateTime, Utc};

use rentbook_core::Clock;

/// Wall-clock time from the system UTC source.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

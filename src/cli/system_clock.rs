use chrono::{DateTime, Local};

use crate::time::Clock;

/// Wall-clock time source used outside of tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

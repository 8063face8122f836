//! Clock port - source of the template `year` and report timestamps

use chrono::{DateTime, Datelike, Local, TimeZone};

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Local>;

    fn year(&self) -> i32 {
        self.now().year()
    }
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Frozen clock for tests and reproducible builds
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(DateTime<Local>);

impl FixedClock {
    pub fn new(at: DateTime<Local>) -> Self {
        Self(at)
    }

    /// Noon on January 1st of `year`, local time
    pub fn at_year(year: i32) -> Self {
        let at = Local
            .with_ymd_and_hms(year, 1, 1, 12, 0, 0)
            .single()
            .unwrap_or_else(Local::now);
        Self(at)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        self.0
    }
}

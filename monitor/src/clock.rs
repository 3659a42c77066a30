//! Wall-clock source for alert hours and record timestamps

use chrono::{Local, NaiveDateTime};

/// Local time provider. The pipeline reads it once per frame and takes both
/// the record timestamp and the alert hour from that instant.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

/// Reads the system's local time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Always reports the same instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

//! Injectable time source

use chrono::{Local, NaiveDateTime};

/// Source of "now" for freshness decisions.
///
/// The freshness policy must never read ambient process time; components
/// take a `Clock` at construction so tests can pin the time.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// Wall-clock time in the local timezone.
///
/// The business-day cutoff is defined in exchange-local time, which is
/// also the timezone this service is deployed in.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

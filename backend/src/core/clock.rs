//! Clock abstraction for commission runs
//!
//! A calculation reads the wall clock exactly once. The captured
//! [`RunClock`] drives schema matching (calendar date), wallet bucketing
//! (month, year, quarter) and every timestamp column, so all agents in one
//! run share identical values.

use chrono::{DateTime, Datelike, NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Source of the current instant
pub trait Clock {
    /// Current instant in UTC
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock frozen at a fixed instant
///
/// # Example
/// ```
/// use chrono::{TimeZone, Utc};
/// use commission_engine_core_rs::core::clock::{Clock, FixedClock};
///
/// let instant = Utc.with_ymd_and_hms(2024, 5, 17, 9, 30, 0).unwrap();
/// let clock = FixedClock::new(instant);
/// assert_eq!(clock.now(), instant);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    instant: DateTime<Utc>,
}

impl FixedClock {
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self { instant }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.instant
    }
}

/// Time snapshot shared by every agent of a single run
///
/// # Example
/// ```
/// use chrono::{TimeZone, Utc};
/// use commission_engine_core_rs::core::clock::{FixedClock, RunClock};
///
/// let clock = FixedClock::new(Utc.with_ymd_and_hms(2024, 8, 2, 14, 5, 9).unwrap());
/// let run = RunClock::capture(&clock);
/// assert_eq!(run.month(), 8);
/// assert_eq!(run.year(), 2024);
/// assert_eq!(run.quarter(), 3);
/// assert_eq!(run.timestamp(), "2024-08-02T14:05:09.000Z");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunClock {
    /// Instant captured at the start of the run
    instant: DateTime<Utc>,
}

impl RunClock {
    /// Take the single snapshot for a run
    pub fn capture(clock: &dyn Clock) -> Self {
        Self {
            instant: clock.now(),
        }
    }

    pub fn instant(&self) -> DateTime<Utc> {
        self.instant
    }

    /// Calendar date used for schema effective-interval checks
    pub fn today(&self) -> NaiveDate {
        self.instant.date_naive()
    }

    /// Calendar month (1-indexed)
    pub fn month(&self) -> u32 {
        self.instant.month()
    }

    pub fn year(&self) -> i32 {
        self.instant.year()
    }

    /// Calendar quarter (1..=4)
    pub fn quarter(&self) -> u32 {
        quarter_of_month(self.month())
    }

    /// RFC 3339 timestamp with millisecond precision and a `Z` suffix
    pub fn timestamp(&self) -> String {
        self.instant.to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

/// Quarter of a 1-indexed calendar month: `floor((month - 1) / 3) + 1`
pub fn quarter_of_month(month: u32) -> u32 {
    (month - 1) / 3 + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_quarter_boundaries() {
        assert_eq!(quarter_of_month(1), 1);
        assert_eq!(quarter_of_month(3), 1);
        assert_eq!(quarter_of_month(4), 2);
        assert_eq!(quarter_of_month(6), 2);
        assert_eq!(quarter_of_month(7), 3);
        assert_eq!(quarter_of_month(9), 3);
        assert_eq!(quarter_of_month(10), 4);
        assert_eq!(quarter_of_month(12), 4);
    }

    #[test]
    fn test_today_is_utc_date() {
        // 23:59 UTC stays on the same day regardless of host timezone
        let instant = Utc.with_ymd_and_hms(2024, 12, 31, 23, 59, 59).unwrap();
        let run = RunClock::capture(&FixedClock::new(instant));
        assert_eq!(run.today(), NaiveDate::from_ymd_opt(2024, 12, 31).unwrap());
        assert_eq!(run.quarter(), 4);
    }
}

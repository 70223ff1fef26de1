//! Tests for the run clock snapshot

use chrono::{NaiveDate, TimeZone, Utc};
use commission_engine_core_rs::core::clock::{quarter_of_month, Clock, FixedClock, RunClock};

#[test]
fn test_fixed_clock_returns_same_instant() {
    let instant = Utc.with_ymd_and_hms(2024, 2, 29, 12, 0, 0).unwrap();
    let clock = FixedClock::new(instant);
    assert_eq!(clock.now(), instant);
    assert_eq!(clock.now(), clock.now());
}

#[test]
fn test_run_clock_fields() {
    let clock = FixedClock::new(Utc.with_ymd_and_hms(2025, 11, 3, 17, 45, 30).unwrap());
    let run = RunClock::capture(&clock);

    assert_eq!(run.today(), NaiveDate::from_ymd_opt(2025, 11, 3).unwrap());
    assert_eq!(run.month(), 11);
    assert_eq!(run.year(), 2025);
    assert_eq!(run.quarter(), 4);
    assert_eq!(run.timestamp(), "2025-11-03T17:45:30.000Z");
}

#[test]
fn test_timestamp_keeps_milliseconds() {
    let instant = Utc
        .with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
        .unwrap()
        + chrono::Duration::milliseconds(123);
    let run = RunClock::capture(&FixedClock::new(instant));
    assert_eq!(run.timestamp(), "2024-01-01T00:00:00.123Z");
}

#[test]
fn test_every_month_maps_to_quarter() {
    let expected = [1, 1, 1, 2, 2, 2, 3, 3, 3, 4, 4, 4];
    for month in 1..=12u32 {
        assert_eq!(
            quarter_of_month(month),
            expected[(month - 1) as usize],
            "month {}",
            month
        );

        let clock = FixedClock::new(Utc.with_ymd_and_hms(2024, month, 15, 0, 0, 0).unwrap());
        assert_eq!(RunClock::capture(&clock).quarter(), expected[(month - 1) as usize]);
    }
}

use chrono::{SubsecRound, TimeDelta, Utc};
use sea_orm::prelude::DateTimeWithTimeZone;

/// Current UTC time truncated to the microsecond precision Postgres keeps, so
/// values read back compare equal to the ones written.
pub fn now() -> DateTimeWithTimeZone {
    Utc::now().fixed_offset().trunc_subsecs(6)
}

/// Timestamp for a modification of a row last touched at `previous`. Always
/// strictly later than `previous`, even when the clock has not moved.
pub fn next_updated(previous: Option<DateTimeWithTimeZone>) -> DateTimeWithTimeZone {
    let now = now();
    match previous {
        Some(previous) if now <= previous => previous + TimeDelta::microseconds(1),
        _ => now,
    }
}

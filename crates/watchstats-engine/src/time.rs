//! Timestamp parsing and the single timezone policy used for bucketing.
//!
//! Every time-bucketed view (daily date, hour of day, day of week, streaks,
//! weekday/weekend split) goes through the same [`TimePolicy`], so a date and
//! an hour derived from one instant always agree.

use chrono::{
    DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, Offset, TimeZone, Timelike, Utc,
};

use crate::error::EngineError;

/// English weekday names indexed from Sunday.
pub const WEEKDAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// A fixed UTC offset applied to all calendar and clock bucketing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimePolicy {
    offset: FixedOffset,
}

impl Default for TimePolicy {
    fn default() -> Self {
        Self::utc()
    }
}

impl TimePolicy {
    #[must_use]
    pub fn utc() -> Self {
        Self { offset: Utc.fix() }
    }

    /// Policy for a fixed offset east of UTC, in minutes.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidUtcOffset`] when the offset is a day or more.
    pub fn from_offset_minutes(minutes: i32) -> Result<Self, EngineError> {
        minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .map(|offset| Self { offset })
            .ok_or(EngineError::InvalidUtcOffset { minutes })
    }

    #[must_use]
    pub fn offset_minutes(&self) -> i32 {
        self.offset.local_minus_utc() / 60
    }

    fn local(&self, instant: DateTime<Utc>) -> DateTime<FixedOffset> {
        instant.with_timezone(&self.offset)
    }

    /// Calendar date of the instant under this policy.
    #[must_use]
    pub fn date(&self, instant: DateTime<Utc>) -> NaiveDate {
        self.local(instant).date_naive()
    }

    /// Hour of day, `0..=23`.
    #[must_use]
    pub fn hour(&self, instant: DateTime<Utc>) -> u32 {
        self.local(instant).hour()
    }

    /// Day of week, 0 = Sunday .. 6 = Saturday.
    #[must_use]
    pub fn weekday(&self, instant: DateTime<Utc>) -> u32 {
        self.local(instant).weekday().num_days_from_sunday()
    }
}

/// Parse an export timestamp into a millisecond-precision UTC instant.
///
/// Accepts RFC 3339 (with any offset and fractional seconds), ISO 8601 with
/// minute precision or a colon-less offset, naive `YYYY-MM-DDTHH:MM:SS[.f]`
/// or `YYYY-MM-DD HH:MM:SS[.f]` read as UTC, and a bare `YYYY-MM-DD` read as
/// UTC midnight. Returns `None` for anything else.
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    let parsed = DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| parse_with_offset(raw))
        .or_else(|| {
            ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
                .map(|naive| Utc.from_utc_datetime(&naive))
        })
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .map(|naive| Utc.from_utc_datetime(&naive))
        })?;

    // Exports only carry millisecond precision; keep stored dates stable.
    DateTime::from_timestamp_millis(parsed.timestamp_millis())
}

/// ISO 8601 forms RFC 3339 rejects: minute precision, or an offset
/// written without a colon (`+0100`). A trailing `Z` means UTC.
fn parse_with_offset(raw: &str) -> Option<DateTime<Utc>> {
    let normalized = match raw.strip_suffix(['Z', 'z']) {
        Some(stem) => format!("{stem}+0000"),
        None => raw.to_string(),
    };
    ["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%dT%H:%M%z", "%Y-%m-%d %H:%M:%S%.f%z"]
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(&normalized, fmt).ok())
        .map(|dt| dt.with_timezone(&Utc))
}

/// Parse a `YYYY-MM-DD` bucket key.
#[must_use]
pub fn parse_date_key(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

#[must_use]
pub fn format_date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

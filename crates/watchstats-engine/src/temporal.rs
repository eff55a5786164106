//! Daily and hourly activity views.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use watchstats_core::{DailyView, HourlyView, NormalizedEvent};

use crate::time::{format_date_key, parse_timestamp, TimePolicy};

/// Time-bucketed views plus the instants they were built from.
#[derive(Debug, Clone, PartialEq)]
pub struct TemporalViews {
    pub daily: Vec<DailyView>,
    pub hourly: Vec<HourlyView>,
    /// Parsed instants in input order, one per event with a usable timestamp.
    pub instants: Vec<DateTime<Utc>>,
}

/// Bucket every event with a parsable timestamp by date and hour.
///
/// Events without a usable `time` are skipped here and nowhere else.
#[must_use]
pub fn aggregate_temporal(events: &[NormalizedEvent], policy: TimePolicy) -> TemporalViews {
    let mut by_date: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    let mut hourly = empty_hourly();
    let mut instants = Vec::with_capacity(events.len());

    for instant in events
        .iter()
        .filter_map(|e| e.time.as_deref().and_then(parse_timestamp))
    {
        *by_date.entry(policy.date(instant)).or_insert(0) += 1;
        hourly[policy.hour(instant) as usize].count += 1;
        instants.push(instant);
    }

    let skipped = events.len() - instants.len();
    if skipped > 0 {
        tracing::debug!(skipped, "events without a usable timestamp");
    }

    let daily = by_date
        .into_iter()
        .map(|(date, count)| DailyView {
            date: format_date_key(date),
            count,
        })
        .collect();

    TemporalViews {
        daily,
        hourly,
        instants,
    }
}

/// Day-of-week histogram, index 0 = Sunday.
#[must_use]
pub fn weekday_counts(events: &[NormalizedEvent], policy: TimePolicy) -> [u64; 7] {
    let mut counts = [0_u64; 7];
    for instant in events
        .iter()
        .filter_map(|e| e.time.as_deref().and_then(parse_timestamp))
    {
        counts[policy.weekday(instant) as usize] += 1;
    }
    counts
}

fn empty_hourly() -> Vec<HourlyView> {
    (0..24).map(|hour| HourlyView { hour, count: 0 }).collect()
}

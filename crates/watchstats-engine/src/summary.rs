//! Headline totals and the dated span of a history.

use chrono::{DateTime, Utc};
use watchstats_core::Summary;

const MS_PER_DAY: u64 = 86_400_000;

/// Headline numbers for the dashboard.
///
/// `total_videos` counts every accepted event, dated or not. With no usable
/// timestamps both dates fall back to `now` and the span is one day.
#[must_use]
pub fn summarize(
    total_videos: usize,
    instants: &[DateTime<Utc>],
    unique_channels: usize,
    now: DateTime<Utc>,
) -> Summary {
    let oldest = instants.iter().min().copied();
    let newest = instants.iter().max().copied();

    let (oldest_date, newest_date, days_difference) = match (oldest, newest) {
        (Some(oldest), Some(newest)) => {
            let span_ms = u64::try_from((newest - oldest).num_milliseconds()).unwrap_or(0);
            (oldest, newest, span_ms.div_ceil(MS_PER_DAY).max(1))
        }
        _ => (now, now, 1),
    };

    Summary {
        total_videos: total_videos as u64,
        oldest_date,
        newest_date,
        unique_channels: unique_channels as u64,
        days_difference,
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[test]
    fn empty_instants_default_to_now() {
        let now = at(2025, 6, 1, 12);
        let summary = summarize(4, &[], 2, now);
        assert_eq!(summary.total_videos, 4);
        assert_eq!(summary.oldest_date, now);
        assert_eq!(summary.newest_date, now);
        assert_eq!(summary.days_difference, 1);
        assert_eq!(summary.unique_channels, 2);
    }

    #[test]
    fn partial_days_round_up() {
        let instants = [at(2024, 1, 2, 9), at(2024, 1, 1, 10), at(2024, 1, 3, 11)];
        let summary = summarize(3, &instants, 0, at(2025, 1, 1, 0));
        assert_eq!(summary.oldest_date, at(2024, 1, 1, 10));
        assert_eq!(summary.newest_date, at(2024, 1, 3, 11));
        // 2 days and 1 hour
        assert_eq!(summary.days_difference, 3);
    }

    #[test]
    fn same_instant_is_one_day() {
        let instants = [at(2024, 1, 1, 10), at(2024, 1, 1, 10)];
        assert_eq!(summarize(2, &instants, 0, at(2025, 1, 1, 0)).days_difference, 1);
    }

    #[test]
    fn exact_day_multiples_do_not_round_up() {
        let instants = [at(2024, 1, 1, 0), at(2024, 1, 11, 0)];
        assert_eq!(summarize(2, &instants, 0, at(2025, 1, 1, 0)).days_difference, 10);
    }
}

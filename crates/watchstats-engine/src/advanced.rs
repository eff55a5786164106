//! Derived metrics layered over the base views: streaks, time-of-day scores,
//! weekday habits, channel diversity and the like.
//!
//! Everything here is a pure function of the normalized events and the base
//! views, so it can be recomputed without re-reading the export.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use watchstats_core::{DailyView, FirstVideo, HourlyView, NormalizedEvent, SourceCount};

use crate::ranking::channel_tally;
use crate::temporal::weekday_counts;
use crate::time::{parse_date_key, parse_timestamp, TimePolicy, WEEKDAY_NAMES};

/// Reference maximum entropy: an even spread over 100 channels.
const MAX_DIVERSITY_ENTROPY: f64 = 6.643_856_189_774_724; // log2(100)

/// `weekend_ratio` above this marks a weekend warrior.
const WEEKEND_WARRIOR_RATIO: f64 = 1.5;

/// Percent of bucketed events in each time-of-day window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimeOfDayScores {
    /// 22:00 to 06:00.
    pub night_owl: u32,
    /// 05:00 to 09:00.
    pub early_bird: u32,
    /// 12:00 to 14:00.
    pub midday: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FavoriteDay {
    /// 0 = Sunday .. 6 = Saturday.
    pub index: u32,
    pub percentage: u32,
}

impl FavoriteDay {
    #[must_use]
    pub fn name(&self) -> &'static str {
        WEEKDAY_NAMES[self.index as usize % 7]
    }
}

/// Average events per active date, split by weekday and weekend.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WeekendBalance {
    pub weekday_average: f64,
    pub weekend_average: f64,
    /// `weekend_average / weekday_average`, or `0.0` without weekday activity.
    pub ratio: f64,
    pub weekend_warrior: bool,
}

fn active_dates(daily: &[DailyView]) -> impl Iterator<Item = (NaiveDate, u64)> + '_ {
    daily
        .iter()
        .filter(|d| d.count > 0)
        .filter_map(|d| parse_date_key(&d.date).map(|date| (date, d.count)))
}

/// Longest run of consecutive active dates in an ascending daily series.
#[must_use]
pub fn longest_streak(daily: &[DailyView]) -> u32 {
    let mut longest = 0_u32;
    let mut run = 0_u32;
    let mut previous: Option<NaiveDate> = None;

    for (date, _) in active_dates(daily) {
        run = match previous {
            Some(prev) if (date - prev).num_days() == 1 => run + 1,
            _ => 1,
        };
        longest = longest.max(run);
        previous = Some(date);
    }
    longest
}

/// Length of the run ending at the most recent active date, provided that
/// date is within one day of `today`; otherwise `0`.
#[must_use]
pub fn current_streak(daily: &[DailyView], today: NaiveDate) -> u32 {
    let dates: Vec<NaiveDate> = active_dates(daily).map(|(date, _)| date).collect();
    let Some(&last) = dates.last() else {
        return 0;
    };
    if (today - last).num_days().abs() > 1 {
        return 0;
    }

    let mut run = 1_u32;
    for pair in dates.windows(2).rev() {
        if (pair[1] - pair[0]).num_days() == 1 {
            run += 1;
        } else {
            break;
        }
    }
    run
}

fn percentage(part: u64, total: u64) -> u32 {
    if total == 0 {
        return 0;
    }
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    let pct = ((part as f64 / total as f64) * 100.0).round() as u32;
    pct
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10_f64.powi(decimals);
    (value * factor).round() / factor
}

/// Share of hourly-bucketed events falling in the night, early-morning and
/// midday windows. The night and early windows overlap at 05:00.
#[must_use]
pub fn time_of_day_scores(hourly: &[HourlyView]) -> TimeOfDayScores {
    let total: u64 = hourly.iter().map(|h| h.count).sum();
    let window = |pred: fn(u32) -> bool| -> u64 {
        hourly
            .iter()
            .filter(|h| pred(h.hour))
            .map(|h| h.count)
            .sum()
    };

    TimeOfDayScores {
        night_owl: percentage(window(|h| h >= 22 || h < 6), total),
        early_bird: percentage(window(|h| (5..9).contains(&h)), total),
        midday: percentage(window(|h| (12..14).contains(&h)), total),
    }
}

/// Hour with the most events; the lowest hour wins ties.
#[must_use]
pub fn peak_hour(hourly: &[HourlyView]) -> u32 {
    let mut best: Option<&HourlyView> = None;
    for h in hourly {
        if best.is_none_or(|b| h.count > b.count) {
            best = Some(h);
        }
    }
    best.map_or(0, |h| h.hour)
}

/// Busiest date and its count; the earliest date wins ties.
#[must_use]
pub fn max_single_day(daily: &[DailyView]) -> Option<&DailyView> {
    let mut best: Option<&DailyView> = None;
    for d in daily {
        if best.is_none_or(|b| d.count > b.count) {
            best = Some(d);
        }
    }
    best
}

/// Most common day of week among dated events; the lowest index wins ties.
#[must_use]
pub fn favorite_day(events: &[NormalizedEvent], policy: TimePolicy) -> FavoriteDay {
    let counts = weekday_counts(events, policy);
    let total: u64 = counts.iter().sum();

    let mut index = 0_usize;
    for (i, &count) in counts.iter().enumerate() {
        if count > counts[index] {
            index = i;
        }
    }

    FavoriteDay {
        index: u32::try_from(index).unwrap_or(0),
        percentage: percentage(counts[index], total),
    }
}

/// Compare viewing intensity on weekend dates against weekday dates.
#[must_use]
pub fn weekend_ratio(daily: &[DailyView]) -> WeekendBalance {
    let (mut weekday_days, mut weekday_events) = (0_u64, 0_u64);
    let (mut weekend_days, mut weekend_events) = (0_u64, 0_u64);

    for (date, count) in active_dates(daily) {
        if date.weekday().num_days_from_monday() >= 5 {
            weekend_days += 1;
            weekend_events += count;
        } else {
            weekday_days += 1;
            weekday_events += count;
        }
    }

    #[allow(clippy::cast_precision_loss)]
    let average = |events: u64, days: u64| {
        if days == 0 {
            0.0
        } else {
            events as f64 / days as f64
        }
    };
    let weekday_average = average(weekday_events, weekday_days);
    let weekend_average = average(weekend_events, weekend_days);
    let ratio = if weekday_average > 0.0 {
        weekend_average / weekday_average
    } else {
        0.0
    };

    WeekendBalance {
        weekday_average: round_to(weekday_average, 2),
        weekend_average: round_to(weekend_average, 2),
        ratio,
        weekend_warrior: ratio > WEEKEND_WARRIOR_RATIO,
    }
}

/// Shannon entropy of the full channel distribution, scaled so an even spread
/// over 100 channels is `1.0`. Clamped to `[0, 1]`, two decimals.
#[must_use]
pub fn channel_diversity(events: &[NormalizedEvent]) -> f64 {
    diversity_of(&channel_tally(events))
}

pub(crate) fn diversity_of(tally: &[SourceCount]) -> f64 {
    let total: u64 = tally.iter().map(|s| s.count).sum();
    if total == 0 {
        return 0.0;
    }

    #[allow(clippy::cast_precision_loss)]
    let entropy = tally.iter().fold(0.0_f64, |acc, s| {
        let p = s.count as f64 / total as f64;
        acc - p * p.log2()
    });
    if entropy <= 0.0 {
        return 0.0;
    }
    round_to((entropy / MAX_DIVERSITY_ENTROPY).min(1.0), 2)
}

/// Share of all events that went to the single most-watched channel.
#[must_use]
pub fn top_channel_percentage(sources: &[SourceCount], total_videos: u64) -> u32 {
    sources
        .first()
        .map_or(0, |top| percentage(top.count, total_videos))
}

/// `total_videos / days_difference`, one decimal.
#[must_use]
pub fn daily_average(total_videos: u64, days_difference: u64) -> f64 {
    if days_difference == 0 {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let avg = total_videos as f64 / days_difference as f64;
    round_to(avg, 1)
}

/// The earliest dated event (ties keep input order).
///
/// With no dated events and `legacy_fallback` set, the *last* event stands in
/// with no date, matching what older dashboards expect.
#[must_use]
pub fn first_event(events: &[NormalizedEvent], legacy_fallback: bool) -> Option<FirstVideo> {
    let mut earliest: Option<(&NormalizedEvent, DateTime<Utc>)> = None;
    for event in events {
        let Some(instant) = event.time.as_deref().and_then(parse_timestamp) else {
            continue;
        };
        if earliest.is_none_or(|(_, best)| instant < best) {
            earliest = Some((event, instant));
        }
    }

    if let Some((event, instant)) = earliest {
        return Some(FirstVideo {
            title: event.title.clone(),
            channel: event.channel.clone(),
            date: Some(instant),
        });
    }

    if !legacy_fallback {
        return None;
    }
    events.last().map(|event| FirstVideo {
        title: event.title.clone(),
        channel: event.channel.clone(),
        date: None,
    })
}

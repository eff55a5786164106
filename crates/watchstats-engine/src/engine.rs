//! The configured aggregation entry point.

use std::panic::{self, AssertUnwindSafe};

use chrono::{DateTime, Utc};
use serde_json::Value;
use watchstats_core::{
    AdvancedStats, DailyView, HourlyView, NormalizedEvent, SourceCount, StatsBundle, Summary,
};

use crate::achievements::{self, AchievementInputs};
use crate::advanced::{
    current_streak, daily_average, diversity_of, favorite_day, first_event, longest_streak,
    max_single_day, peak_hour, time_of_day_scores, top_channel_percentage, weekend_ratio,
};
use crate::error::EngineError;
use crate::id::{IdGenerator, UuidIdGenerator};
use crate::normalize::normalize;
use crate::personality;
use crate::ranking::{channel_tally, top_items, top_sources};
use crate::summary::summarize;
use crate::temporal::aggregate_temporal;
use crate::time::TimePolicy;

const MS_PER_YEAR: f64 = 365.0 * 86_400_000.0;

/// Turns one export into one [`StatsBundle`].
///
/// An engine holds configuration only. Each call is independent, so the same
/// engine can be moved onto a worker thread and reused.
pub struct Engine {
    ids: Box<dyn IdGenerator>,
    policy: TimePolicy,
    clock: Option<DateTime<Utc>>,
    legacy_first_event: bool,
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("policy", &self.policy)
            .field("clock", &self.clock)
            .field("legacy_first_event", &self.legacy_first_event)
            .finish_non_exhaustive()
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Builder for [`Engine`].
pub struct EngineBuilder {
    ids: Box<dyn IdGenerator>,
    policy: TimePolicy,
    clock: Option<DateTime<Utc>>,
    legacy_first_event: bool,
}

impl EngineBuilder {
    /// Replace the random fallback-id source, e.g. with
    /// [`SequentialIdGenerator`](crate::SequentialIdGenerator) in tests.
    #[must_use]
    pub fn id_generator(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    #[must_use]
    pub fn time_policy(mut self, policy: TimePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Pin "now" instead of reading the wall clock on every call.
    #[must_use]
    pub fn now(mut self, now: DateTime<Utc>) -> Self {
        self.clock = Some(now);
        self
    }

    #[must_use]
    pub fn legacy_first_event(mut self, enabled: bool) -> Self {
        self.legacy_first_event = enabled;
        self
    }

    #[must_use]
    pub fn build(self) -> Engine {
        Engine {
            ids: self.ids,
            policy: self.policy,
            clock: self.clock,
            legacy_first_event: self.legacy_first_event,
        }
    }
}

impl Engine {
    #[must_use]
    pub fn builder() -> EngineBuilder {
        EngineBuilder {
            ids: Box::new(UuidIdGenerator),
            policy: TimePolicy::utc(),
            clock: None,
            legacy_first_event: true,
        }
    }

    #[must_use]
    pub fn time_policy(&self) -> TimePolicy {
        self.policy
    }

    fn now(&self) -> DateTime<Utc> {
        self.clock.unwrap_or_else(Utc::now)
    }

    /// Filter and coerce raw export records.
    #[must_use]
    pub fn normalize(&self, raw: &[Value]) -> Vec<NormalizedEvent> {
        normalize(raw, self.ids.as_ref())
    }

    /// Normalize and aggregate raw export records.
    #[must_use]
    pub fn aggregate(&self, raw: &[Value]) -> StatsBundle {
        let events = self.normalize(raw);
        self.aggregate_events(&events)
    }

    /// Aggregate already-normalized events into the full bundle.
    #[must_use]
    pub fn aggregate_events(&self, events: &[NormalizedEvent]) -> StatsBundle {
        let now = self.now();
        let temporal = aggregate_temporal(events, self.policy);
        let tally = channel_tally(events);
        let source_counts = top_sources(&tally);
        let summary = summarize(events.len(), &temporal.instants, tally.len(), now);

        let advanced = self.advanced_with_tally(
            events,
            &temporal.daily,
            &temporal.hourly,
            &source_counts,
            &summary,
            &tally,
            now,
        );

        tracing::info!(
            total_videos = summary.total_videos,
            dated = temporal.instants.len(),
            active_days = temporal.daily.len(),
            unique_channels = summary.unique_channels,
            "aggregated watch history"
        );

        StatsBundle {
            daily_views: temporal.daily,
            hourly_views: temporal.hourly,
            top_items: top_items(events),
            source_counts,
            summary,
            advanced_stats: Some(advanced),
        }
    }

    /// Compute the advanced metrics from the base views alone.
    #[must_use]
    pub fn advanced_stats(
        &self,
        events: &[NormalizedEvent],
        daily: &[DailyView],
        hourly: &[HourlyView],
        sources: &[SourceCount],
        summary: &Summary,
    ) -> AdvancedStats {
        let tally = channel_tally(events);
        self.advanced_with_tally(events, daily, hourly, sources, summary, &tally, self.now())
    }

    /// Like [`Engine::aggregate`], but a panic anywhere inside aggregation is
    /// returned as an error instead of unwinding into the caller.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Aborted`] if aggregation panicked.
    pub fn try_aggregate(&self, raw: &[Value]) -> Result<StatsBundle, EngineError> {
        panic::catch_unwind(AssertUnwindSafe(|| self.aggregate(raw))).map_err(|payload| {
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| (*s).to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            tracing::error!(%message, "aggregation aborted");
            EngineError::Aborted { message }
        })
    }

    #[allow(clippy::too_many_arguments)]
    fn advanced_with_tally(
        &self,
        events: &[NormalizedEvent],
        daily: &[DailyView],
        hourly: &[HourlyView],
        sources: &[SourceCount],
        summary: &Summary,
        tally: &[SourceCount],
        now: DateTime<Utc>,
    ) -> AdvancedStats {
        let scores = time_of_day_scores(hourly);
        let favorite = favorite_day(events, self.policy);
        let balance = weekend_ratio(daily);
        let diversity = diversity_of(tally);
        let average = daily_average(summary.total_videos, summary.days_difference);
        let top_pct = top_channel_percentage(sources, summary.total_videos);
        let longest = longest_streak(daily);
        let busiest = max_single_day(daily);
        let max_daily_views = busiest.map_or(0, |d| d.count);

        #[allow(clippy::cast_precision_loss)]
        let history_years = (summary.newest_date - summary.oldest_date).num_milliseconds()
            as f64
            / MS_PER_YEAR;

        let achievements = achievements::evaluate(&AchievementInputs {
            total_videos: summary.total_videos,
            unique_channels: summary.unique_channels,
            longest_streak: longest,
            night_owl_score: scores.night_owl,
            early_bird_score: scores.early_bird,
            top_channel_percentage: top_pct,
            weekend_warrior: balance.weekend_warrior,
            max_daily_views,
            daily_average: average,
            history_years,
        });

        AdvancedStats {
            longest_streak: longest,
            current_streak: current_streak(daily, self.policy.date(now)),
            peak_hour: peak_hour(hourly),
            night_owl_score: scores.night_owl,
            early_bird_score: scores.early_bird,
            midday_score: scores.midday,
            daily_average: average,
            favorite_day: favorite.name().to_string(),
            favorite_day_index: favorite.index,
            favorite_day_percentage: favorite.percentage,
            weekday_average: balance.weekday_average,
            weekend_average: balance.weekend_average,
            weekend_ratio: balance.ratio,
            weekend_warrior: balance.weekend_warrior,
            top_channel_percentage: top_pct,
            channel_diversity: diversity,
            max_daily_views,
            max_daily_date: busiest.map(|d| d.date.clone()),
            first_video: first_event(events, self.legacy_first_event),
            personality: personality::classify(scores, average, top_pct, diversity),
            achievements,
        }
    }
}

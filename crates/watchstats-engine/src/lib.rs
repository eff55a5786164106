//! Aggregation engine for watch-history exports.
//!
//! One call turns a parsed export into a [`StatsBundle`](watchstats_core::StatsBundle):
//! records are normalized, bucketed by date and hour, ranked by item and
//! channel, summarized, and finally scored for streaks, habits and badges.
//! The engine keeps no state between calls and performs no I/O.

pub mod achievements;
pub mod advanced;
pub mod engine;
pub mod error;
pub mod id;
pub mod normalize;
pub mod personality;
pub mod ranking;
pub mod summary;
pub mod temporal;
pub mod time;

pub use advanced::{
    channel_diversity, current_streak, daily_average, favorite_day, first_event, longest_streak,
    max_single_day, peak_hour, time_of_day_scores, top_channel_percentage, weekend_ratio,
    FavoriteDay, TimeOfDayScores, WeekendBalance,
};
pub use engine::{Engine, EngineBuilder};
pub use error::EngineError;
pub use id::{IdGenerator, SequentialIdGenerator, UuidIdGenerator};
pub use normalize::normalize;
pub use ranking::TOP_N;
pub use time::{parse_timestamp, TimePolicy};

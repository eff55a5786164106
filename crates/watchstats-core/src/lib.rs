//! Shared data model, configuration and file intake for watchstats.
//!
//! The aggregation engine, the persistence port and the CLI all speak the
//! types defined here: loose [`RawEvent`] records at the boundary, strict
//! [`NormalizedEvent`]s inside, and the serializable [`StatsBundle`] out.

pub mod app_config;
pub mod config;
pub mod error;
pub mod events;
pub mod intake;
pub mod stats;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::{ConfigError, IntakeError};
pub use events::{NormalizedEvent, RawEvent, UNKNOWN_TITLE};
pub use intake::{extract_events, read_export};
pub use stats::{
    Achievement, AchievementCategory, AdvancedStats, DailyView, FirstVideo, HourlyView,
    IntensityPersonality, LoyaltyPersonality, Personality, SourceCount, StatsBundle, Summary,
    TimePersonality, TopItem,
};

//! The statistics bundle produced by one aggregation run.
//!
//! Every type here serializes with camelCase field names so the stored JSON
//! matches what dashboard consumers already read.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// All presentation-ready aggregates for one upload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsBundle {
    /// One entry per active date, ascending.
    pub daily_views: Vec<DailyView>,
    /// Always exactly 24 entries, indexed by hour.
    pub hourly_views: Vec<HourlyView>,
    pub top_items: Vec<TopItem>,
    pub source_counts: Vec<SourceCount>,
    pub summary: Summary,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advanced_stats: Option<AdvancedStats>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyView {
    /// Calendar date, `YYYY-MM-DD`.
    pub date: String,
    pub count: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourlyView {
    pub hour: u32,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopItem {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceCount {
    pub name: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_videos: u64,
    #[serde(with = "iso_millis")]
    pub oldest_date: DateTime<Utc>,
    #[serde(with = "iso_millis")]
    pub newest_date: DateTime<Utc>,
    pub unique_channels: u64,
    /// Never zero, so callers can always divide by it.
    pub days_difference: u64,
}

/// Richer metrics layered over the base views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvancedStats {
    pub longest_streak: u32,
    pub current_streak: u32,
    pub peak_hour: u32,
    pub night_owl_score: u32,
    pub early_bird_score: u32,
    pub midday_score: u32,
    pub daily_average: f64,
    pub favorite_day: String,
    /// 0 = Sunday .. 6 = Saturday.
    pub favorite_day_index: u32,
    pub favorite_day_percentage: u32,
    pub weekday_average: f64,
    pub weekend_average: f64,
    pub weekend_ratio: f64,
    pub weekend_warrior: bool,
    pub top_channel_percentage: u32,
    pub channel_diversity: f64,
    pub max_daily_views: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_daily_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_video: Option<FirstVideo>,
    pub personality: Personality,
    pub achievements: Vec<Achievement>,
}

/// The earliest watch on record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FirstVideo {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    /// Absent when no event had a usable timestamp and the record is only a
    /// positional placeholder.
    #[serde(default, skip_serializing_if = "Option::is_none", with = "iso_millis_opt")]
    pub date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Personality {
    pub time: TimePersonality,
    pub intensity: IntensityPersonality,
    pub loyalty: LoyaltyPersonality,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TimePersonality {
    NightOwl,
    EarlyBird,
    MiddayWatcher,
    BalancedViewer,
}

impl TimePersonality {
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            TimePersonality::NightOwl => "Night Owl",
            TimePersonality::EarlyBird => "Early Bird",
            TimePersonality::MiddayWatcher => "Midday Watcher",
            TimePersonality::BalancedViewer => "Balanced Viewer",
        }
    }

    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            TimePersonality::NightOwl => "Most of your viewing happens after 10 PM.",
            TimePersonality::EarlyBird => "A large share of your watching is in the early morning.",
            TimePersonality::MiddayWatcher => "You binge during the lunch hours.",
            TimePersonality::BalancedViewer => "You watch evenly throughout the day.",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IntensityPersonality {
    SuperFan,
    RegularViewer,
    CasualBrowser,
}

impl IntensityPersonality {
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            IntensityPersonality::SuperFan => "Super Fan",
            IntensityPersonality::RegularViewer => "Regular Viewer",
            IntensityPersonality::CasualBrowser => "Casual Browser",
        }
    }

    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            IntensityPersonality::SuperFan => "Hardcore viewer with more than 15 videos a day.",
            IntensityPersonality::RegularViewer => "Consistent watcher with several videos daily.",
            IntensityPersonality::CasualBrowser => "Selective viewer with a handful of videos a day.",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LoyaltyPersonality {
    LoyalFan,
    ContentExplorer,
    BalancedExplorer,
}

impl LoyaltyPersonality {
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            LoyaltyPersonality::LoyalFan => "Loyal Fan",
            LoyaltyPersonality::ContentExplorer => "Content Explorer",
            LoyaltyPersonality::BalancedExplorer => "Balanced Explorer",
        }
    }

    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            LoyaltyPersonality::LoyalFan => "Your favorite channel gets a big slice of your views.",
            LoyaltyPersonality::ContentExplorer => {
                "You explore diverse content across many channels."
            }
            LoyaltyPersonality::BalancedExplorer => {
                "You balance between favorites and new discoveries."
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AchievementCategory {
    Time,
    Quantity,
    Loyalty,
    Special,
}

impl std::fmt::Display for AchievementCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AchievementCategory::Time => write!(f, "time"),
            AchievementCategory::Quantity => write!(f, "quantity"),
            AchievementCategory::Loyalty => write!(f, "loyalty"),
            AchievementCategory::Special => write!(f, "special"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Achievement {
    /// Kebab-case badge identifier, e.g. `"streak-master"`.
    pub id: String,
    pub name: String,
    pub category: AchievementCategory,
    pub unlocked: bool,
    /// Percent of the way to the threshold, `0..=100`.
    pub progress: u32,
    /// Human-readable progress, e.g. `"12/30 days"`.
    pub requirement: String,
}

impl StatsBundle {
    /// Returns the channel with the most events, if any channel was seen.
    #[must_use]
    pub fn top_source(&self) -> Option<&SourceCount> {
        self.source_counts.first()
    }

    /// Number of achievements unlocked, or `0` without advanced stats.
    #[must_use]
    pub fn unlocked_achievements(&self) -> usize {
        self.advanced_stats
            .as_ref()
            .map_or(0, |a| a.achievements.iter().filter(|b| b.unlocked).count())
    }
}

/// RFC 3339 UTC with millisecond precision, e.g. `2024-01-01T10:00:00.000Z`.
mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(d)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

mod iso_millis_opt {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    #[allow(clippy::ref_option)]
    pub fn serialize<S: Serializer>(value: &Option<DateTime<Utc>>, s: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(dt) => super::iso_millis::serialize(dt, s),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<DateTime<Utc>>, D::Error> {
        let raw = Option::<String>::deserialize(d)?;
        raw.map(|s| {
            DateTime::parse_from_rfc3339(&s)
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(serde::de::Error::custom)
        })
        .transpose()
    }
}

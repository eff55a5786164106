//! Badge evaluation over the summary and advanced metrics.

use watchstats_core::{Achievement, AchievementCategory};

/// The numbers badges are judged on.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AchievementInputs {
    pub total_videos: u64,
    pub unique_channels: u64,
    pub longest_streak: u32,
    pub night_owl_score: u32,
    pub early_bird_score: u32,
    pub top_channel_percentage: u32,
    pub weekend_warrior: bool,
    pub max_daily_views: u64,
    pub daily_average: f64,
    /// History span in 365-day years.
    pub history_years: f64,
}

fn progress(value: f64, threshold: f64) -> u32 {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let pct = (value / threshold * 100.0).clamp(0.0, 100.0).round() as u32;
    pct
}

fn badge(
    id: &str,
    name: &str,
    category: AchievementCategory,
    unlocked: bool,
    progress: u32,
    requirement: String,
) -> Achievement {
    Achievement {
        id: id.to_string(),
        name: name.to_string(),
        category,
        unlocked,
        progress,
        requirement,
    }
}

/// Evaluate all ten badges, in display order.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn evaluate(inputs: &AchievementInputs) -> Vec<Achievement> {
    use AchievementCategory::{Loyalty, Quantity, Special, Time};

    let i = inputs;
    vec![
        badge(
            "movie-buff",
            "Movie Buff",
            Quantity,
            i.total_videos >= 1000,
            progress(i.total_videos as f64, 1000.0),
            format!("{}/1000 videos", i.total_videos),
        ),
        badge(
            "streak-master",
            "Streak Master",
            Time,
            i.longest_streak >= 30,
            progress(f64::from(i.longest_streak), 30.0),
            format!("{}/30 days", i.longest_streak),
        ),
        badge(
            "night-owl",
            "Night Owl",
            Time,
            i.night_owl_score >= 50,
            progress(f64::from(i.night_owl_score), 50.0),
            format!("{}/50%", i.night_owl_score),
        ),
        badge(
            "early-bird",
            "Early Bird",
            Time,
            i.early_bird_score >= 30,
            progress(f64::from(i.early_bird_score), 30.0),
            format!("{}/30%", i.early_bird_score),
        ),
        badge(
            "loyal-fan",
            "Loyal Fan",
            Loyalty,
            i.top_channel_percentage >= 30,
            progress(f64::from(i.top_channel_percentage), 30.0),
            format!("{}/30%", i.top_channel_percentage),
        ),
        badge(
            "content-explorer",
            "Content Explorer",
            Loyalty,
            i.unique_channels >= 50,
            progress(i.unique_channels as f64, 50.0),
            format!("{}/50 channels", i.unique_channels),
        ),
        badge(
            "weekend-warrior",
            "Weekend Warrior",
            Special,
            i.weekend_warrior,
            if i.weekend_warrior { 100 } else { 50 },
            if i.weekend_warrior { "Unlocked!" } else { "Not yet" }.to_string(),
        ),
        badge(
            "marathon-runner",
            "Marathon Runner",
            Quantity,
            i.max_daily_views >= 50,
            progress(i.max_daily_views as f64, 50.0),
            format!("{}/50 videos", i.max_daily_views),
        ),
        badge(
            "veteran",
            "Veteran",
            Special,
            i.history_years >= 3.0,
            progress(i.history_years, 3.0),
            format!("{:.1}/3 years", i.history_years),
        ),
        badge(
            "speed-demon",
            "Speed Demon",
            Quantity,
            i.daily_average >= 20.0,
            progress(i.daily_average, 20.0),
            format!("{}/20 per day", i.daily_average),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn find<'a>(badges: &'a [Achievement], id: &str) -> &'a Achievement {
        badges.iter().find(|b| b.id == id).unwrap()
    }

    #[test]
    fn empty_history_unlocks_nothing() {
        let badges = evaluate(&AchievementInputs::default());
        assert_eq!(badges.len(), 10);
        assert!(badges.iter().all(|b| !b.unlocked));
        assert_eq!(find(&badges, "weekend-warrior").progress, 50);
        assert_eq!(find(&badges, "veteran").requirement, "0.0/3 years");
    }

    #[test]
    fn progress_is_capped_at_100() {
        let badges = evaluate(&AchievementInputs {
            total_videos: 5000,
            longest_streak: 45,
            ..AchievementInputs::default()
        });
        let movie = find(&badges, "movie-buff");
        assert!(movie.unlocked);
        assert_eq!(movie.progress, 100);
        assert_eq!(movie.requirement, "5000/1000 videos");
        assert!(find(&badges, "streak-master").unlocked);
    }

    #[test]
    fn partial_progress_is_rounded() {
        let badges = evaluate(&AchievementInputs {
            longest_streak: 10,
            night_owl_score: 25,
            daily_average: 4.5,
            history_years: 1.25,
            ..AchievementInputs::default()
        });
        assert_eq!(find(&badges, "streak-master").progress, 33);
        assert_eq!(find(&badges, "night-owl").progress, 50);
        assert_eq!(find(&badges, "speed-demon").requirement, "4.5/20 per day");
        assert_eq!(find(&badges, "veteran").progress, 42);
    }

    #[test]
    fn thresholds_are_inclusive() {
        let badges = evaluate(&AchievementInputs {
            unique_channels: 50,
            max_daily_views: 50,
            early_bird_score: 30,
            top_channel_percentage: 30,
            weekend_warrior: true,
            history_years: 3.0,
            daily_average: 20.0,
            ..AchievementInputs::default()
        });
        for id in [
            "content-explorer",
            "marathon-runner",
            "early-bird",
            "loyal-fan",
            "weekend-warrior",
            "veteran",
            "speed-demon",
        ] {
            assert!(find(&badges, id).unlocked, "{id} should be unlocked");
        }
    }
}

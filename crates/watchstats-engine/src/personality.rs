//! Viewing "personality" labels derived from the advanced metrics.

use watchstats_core::{IntensityPersonality, LoyaltyPersonality, Personality, TimePersonality};

use crate::advanced::TimeOfDayScores;

/// Assign the time, intensity and loyalty labels. Thresholds are strict
/// (`>`), and the time label checks night, early and midday in that order.
#[must_use]
pub fn classify(
    scores: TimeOfDayScores,
    daily_average: f64,
    top_channel_percentage: u32,
    channel_diversity: f64,
) -> Personality {
    let time = if scores.night_owl > 40 {
        TimePersonality::NightOwl
    } else if scores.early_bird > 30 {
        TimePersonality::EarlyBird
    } else if scores.midday > 25 {
        TimePersonality::MiddayWatcher
    } else {
        TimePersonality::BalancedViewer
    };

    let intensity = if daily_average > 15.0 {
        IntensityPersonality::SuperFan
    } else if daily_average > 5.0 {
        IntensityPersonality::RegularViewer
    } else {
        IntensityPersonality::CasualBrowser
    };

    let loyalty = if top_channel_percentage > 30 {
        LoyaltyPersonality::LoyalFan
    } else if channel_diversity > 0.6 {
        LoyaltyPersonality::ContentExplorer
    } else {
        LoyaltyPersonality::BalancedExplorer
    };

    Personality {
        time,
        intensity,
        loyalty,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(night_owl: u32, early_bird: u32, midday: u32) -> TimeOfDayScores {
        TimeOfDayScores {
            night_owl,
            early_bird,
            midday,
        }
    }

    #[test]
    fn night_beats_the_other_windows() {
        let p = classify(scores(41, 90, 90), 0.0, 0, 0.0);
        assert_eq!(p.time, TimePersonality::NightOwl);
    }

    #[test]
    fn thresholds_are_strict() {
        let p = classify(scores(40, 30, 25), 15.0, 30, 0.6);
        assert_eq!(p.time, TimePersonality::BalancedViewer);
        assert_eq!(p.intensity, IntensityPersonality::RegularViewer);
        assert_eq!(p.loyalty, LoyaltyPersonality::BalancedExplorer);
    }

    #[test]
    fn falls_through_to_midday_and_explorer() {
        let p = classify(scores(10, 10, 26), 2.5, 12, 0.75);
        assert_eq!(p.time, TimePersonality::MiddayWatcher);
        assert_eq!(p.intensity, IntensityPersonality::CasualBrowser);
        assert_eq!(p.loyalty, LoyaltyPersonality::ContentExplorer);
    }

    #[test]
    fn heavy_single_channel_viewer() {
        let p = classify(scores(0, 31, 0), 22.0, 100, 0.0);
        assert_eq!(p.time, TimePersonality::EarlyBird);
        assert_eq!(p.intensity, IntensityPersonality::SuperFan);
        assert_eq!(p.loyalty, LoyaltyPersonality::LoyalFan);
    }
}

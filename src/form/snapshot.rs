//! Aggregated team form

use super::{Metric, MetricSource};
use serde::{Deserialize, Serialize};

/// A team's averaged statistics over its trailing match window
///
/// Means are per match; rates are the fraction of window matches meeting a
/// condition and always lie in [0, 1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamFormSnapshot {
    pub team: String,
    /// Matches in the window
    pub matches: usize,
    pub fouls_for: f64,
    pub shots_on_target_for: f64,
    pub shots_on_target_against: f64,
    pub corners_for: f64,
    pub cards_for: f64,
    pub goals_for: f64,
    pub goals_against: f64,
    pub second_half_goals_for: f64,
    pub second_half_goals_against: f64,
    pub both_scored_rate: f64,
    /// More than 1.5 total goals
    pub over_1_5_rate: f64,
    /// More than 2.5 total goals
    pub over_2_5_rate: f64,
    /// At least one card shown to the team
    pub carded_rate: f64,
    pub clean_sheet_rate: f64,
    pub win_rate: f64,
}

impl MetricSource for TeamFormSnapshot {
    fn team(&self) -> &str {
        &self.team
    }

    fn metric(&self, metric: Metric) -> Option<f64> {
        let value = match metric {
            Metric::Matches => self.matches as f64,
            Metric::FoulsFor => self.fouls_for,
            Metric::ShotsOnTargetFor => self.shots_on_target_for,
            Metric::ShotsOnTargetAgainst => self.shots_on_target_against,
            Metric::CornersFor => self.corners_for,
            Metric::CardsFor => self.cards_for,
            Metric::GoalsFor => self.goals_for,
            Metric::GoalsAgainst => self.goals_against,
            Metric::SecondHalfGoalsFor => self.second_half_goals_for,
            Metric::SecondHalfGoalsAgainst => self.second_half_goals_against,
            Metric::BothScoredRate => self.both_scored_rate,
            Metric::Over15Rate => self.over_1_5_rate,
            Metric::Over25Rate => self.over_2_5_rate,
            Metric::CardedRate => self.carded_rate,
            Metric::CleanSheetRate => self.clean_sheet_rate,
            Metric::WinRate => self.win_rate,
            Metric::OffensiveRating
            | Metric::DefensiveRating
            | Metric::NetRating
            | Metric::MarginOfVictory => return None,
        };
        Some(value)
    }
}

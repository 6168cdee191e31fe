//! Rolling form aggregation

use super::{normalize, TeamFormSnapshot, TeamMatchView};
use crate::data::Dataset;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default trailing window
pub const DEFAULT_WINDOW: usize = 10;
/// Fewest matches a snapshot may be built from
pub const DEFAULT_MIN_REQUIRED: usize = 5;

/// Form aggregation outcomes other than a snapshot
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum FormError {
    /// Team has history, but not enough of it
    #[error("Insufficient data for {team}: {available} matches, {required} required")]
    InsufficientData {
        team: String,
        available: usize,
        required: usize,
    },
    /// Team never appears in the dataset
    #[error("Unknown team: {0}")]
    UnknownTeam(String),
}

/// Window configuration that can never produce a snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Invalid window: window {window} is below the minimum of {min_required}")]
pub struct WindowError {
    pub window: usize,
    pub min_required: usize,
}

/// Builds form snapshots from a team's trailing matches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormAggregator {
    window: usize,
    min_required: usize,
}

impl FormAggregator {
    /// Create an aggregator; fails when the window can never be satisfied
    pub fn new(window: usize, min_required: usize) -> Result<Self, WindowError> {
        if min_required == 0 || window < min_required {
            return Err(WindowError {
                window,
                min_required,
            });
        }
        Ok(Self {
            window,
            min_required,
        })
    }

    pub fn window(&self) -> usize {
        self.window
    }

    pub fn min_required(&self) -> usize {
        self.min_required
    }

    /// Unweighted snapshot over the trailing window of `history`
    ///
    /// `history` must be oldest first.
    pub fn aggregate(
        &self,
        team: &str,
        history: &[TeamMatchView],
    ) -> Result<TeamFormSnapshot, FormError> {
        let recent = self.trailing(team, history)?;
        Ok(summarise(team, recent, &vec![1.0; recent.len()]))
    }

    /// Snapshot with linear recency weights (oldest 1, newest n)
    pub fn aggregate_weighted(
        &self,
        team: &str,
        history: &[TeamMatchView],
    ) -> Result<TeamFormSnapshot, FormError> {
        let recent = self.trailing(team, history)?;
        let weights: Vec<f64> = (1..=recent.len()).map(|w| w as f64).collect();
        Ok(summarise(team, recent, &weights))
    }

    /// Normalise the team's matches from `dataset` and aggregate them
    pub fn snapshot_for(&self, dataset: &Dataset, team: &str) -> Result<TeamFormSnapshot, FormError> {
        let history = team_history(dataset, team);
        if history.is_empty() {
            return Err(FormError::UnknownTeam(team.to_string()));
        }
        self.aggregate(team, &history)
    }

    fn trailing<'a>(
        &self,
        team: &str,
        history: &'a [TeamMatchView],
    ) -> Result<&'a [TeamMatchView], FormError> {
        if history.len() < self.min_required {
            return Err(FormError::InsufficientData {
                team: team.to_string(),
                available: history.len(),
                required: self.min_required,
            });
        }
        let start = history.len().saturating_sub(self.window);
        Ok(&history[start..])
    }
}

impl Default for FormAggregator {
    fn default() -> Self {
        Self {
            window: DEFAULT_WINDOW,
            min_required: DEFAULT_MIN_REQUIRED,
        }
    }
}

/// Every match the team played, oldest first, from its own perspective
pub fn team_history(dataset: &Dataset, team: &str) -> Vec<TeamMatchView> {
    dataset
        .team_matches(team)
        .filter_map(|m| normalize(m, team))
        .collect()
}

fn summarise(team: &str, views: &[TeamMatchView], weights: &[f64]) -> TeamFormSnapshot {
    let total: f64 = weights.iter().sum();
    let mean = |f: &dyn Fn(&TeamMatchView) -> f64| -> f64 {
        views.iter().zip(weights).map(|(v, w)| f(v) * w).sum::<f64>() / total
    };
    let rate = |f: &dyn Fn(&TeamMatchView) -> bool| -> f64 {
        mean(&|v| if f(v) { 1.0 } else { 0.0 })
    };

    TeamFormSnapshot {
        team: team.to_string(),
        matches: views.len(),
        fouls_for: mean(&|v| v.fouls_for),
        shots_on_target_for: mean(&|v| v.shots_on_target_for),
        shots_on_target_against: mean(&|v| v.shots_on_target_against),
        corners_for: mean(&|v| v.corners_for),
        cards_for: mean(&|v| v.cards_for),
        goals_for: mean(&|v| v.goals_for),
        goals_against: mean(&|v| v.goals_against),
        second_half_goals_for: mean(&|v| v.second_half_goals_for),
        second_half_goals_against: mean(&|v| v.second_half_goals_against),
        both_scored_rate: rate(&|v| v.both_scored),
        over_1_5_rate: rate(&|v| v.total_goals() > 1.5),
        over_2_5_rate: rate(&|v| v.total_goals() > 2.5),
        carded_rate: rate(&|v| v.carded()),
        clean_sheet_rate: rate(&|v| v.clean_sheet()),
        win_rate: rate(&|v| v.won()),
    }
}

//! Basketball season ratings

use super::{Metric, MetricSource};
use serde::{Deserialize, Serialize};

/// Season-level team ratings (points per 100 possessions)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamRatings {
    pub team: String,
    pub wins: u16,
    pub losses: u16,
    pub offensive_rating: f64,
    pub defensive_rating: f64,
    pub net_rating: f64,
    /// Average margin of victory
    pub margin_of_victory: f64,
}

impl TeamRatings {
    /// Share of games won, 0 before any game is played
    pub fn win_rate(&self) -> f64 {
        let played = self.wins as f64 + self.losses as f64;
        if played == 0.0 {
            0.0
        } else {
            self.wins as f64 / played
        }
    }
}

impl MetricSource for TeamRatings {
    fn team(&self) -> &str {
        &self.team
    }

    fn metric(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::Matches => Some(self.wins as f64 + self.losses as f64),
            Metric::WinRate => Some(self.win_rate()),
            Metric::OffensiveRating => Some(self.offensive_rating),
            Metric::DefensiveRating => Some(self.defensive_rating),
            Metric::NetRating => Some(self.net_rating),
            Metric::MarginOfVictory => Some(self.margin_of_victory),
            _ => None,
        }
    }
}

//! Named numeric fields exposed to the rule evaluator

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Every numeric field a form or ratings snapshot can expose
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// Window length actually used
    Matches,
    FoulsFor,
    ShotsOnTargetFor,
    ShotsOnTargetAgainst,
    CornersFor,
    CardsFor,
    GoalsFor,
    GoalsAgainst,
    SecondHalfGoalsFor,
    SecondHalfGoalsAgainst,
    BothScoredRate,
    #[serde(rename = "over_1_5_rate")]
    Over15Rate,
    #[serde(rename = "over_2_5_rate")]
    Over25Rate,
    CardedRate,
    CleanSheetRate,
    WinRate,
    OffensiveRating,
    DefensiveRating,
    NetRating,
    MarginOfVictory,
}

impl Metric {
    pub const ALL: [Metric; 20] = [
        Metric::Matches,
        Metric::FoulsFor,
        Metric::ShotsOnTargetFor,
        Metric::ShotsOnTargetAgainst,
        Metric::CornersFor,
        Metric::CardsFor,
        Metric::GoalsFor,
        Metric::GoalsAgainst,
        Metric::SecondHalfGoalsFor,
        Metric::SecondHalfGoalsAgainst,
        Metric::BothScoredRate,
        Metric::Over15Rate,
        Metric::Over25Rate,
        Metric::CardedRate,
        Metric::CleanSheetRate,
        Metric::WinRate,
        Metric::OffensiveRating,
        Metric::DefensiveRating,
        Metric::NetRating,
        Metric::MarginOfVictory,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::Matches => "matches",
            Metric::FoulsFor => "fouls_for",
            Metric::ShotsOnTargetFor => "shots_on_target_for",
            Metric::ShotsOnTargetAgainst => "shots_on_target_against",
            Metric::CornersFor => "corners_for",
            Metric::CardsFor => "cards_for",
            Metric::GoalsFor => "goals_for",
            Metric::GoalsAgainst => "goals_against",
            Metric::SecondHalfGoalsFor => "second_half_goals_for",
            Metric::SecondHalfGoalsAgainst => "second_half_goals_against",
            Metric::BothScoredRate => "both_scored_rate",
            Metric::Over15Rate => "over_1_5_rate",
            Metric::Over25Rate => "over_2_5_rate",
            Metric::CardedRate => "carded_rate",
            Metric::CleanSheetRate => "clean_sheet_rate",
            Metric::WinRate => "win_rate",
            Metric::OffensiveRating => "offensive_rating",
            Metric::DefensiveRating => "defensive_rating",
            Metric::NetRating => "net_rating",
            Metric::MarginOfVictory => "margin_of_victory",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Metric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Metric::ALL
            .iter()
            .copied()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| format!("unknown metric: {}", s))
    }
}

/// A per-team aggregate the evaluator can read fields from
pub trait MetricSource {
    /// Team the figures belong to
    fn team(&self) -> &str;
    /// Field value, `None` when this kind of snapshot does not carry it
    fn metric(&self, metric: Metric) -> Option<f64>;
}

//! Scoreline model module
//!
//! Independent-Poisson exact score probabilities

mod poisson;

pub use poisson::{
    expected_goals, poisson_pmf, OutcomeProbabilities, ScoreGrid, ScorelinePredictor,
    DEFAULT_MAX_GOALS, DEFAULT_TOP_K,
};

use serde::{Deserialize, Serialize};
use std::fmt;

/// One exact result and its joint probability
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScorelinePrediction {
    pub home_goals: u8,
    pub away_goals: u8,
    pub probability: f64,
}

impl fmt::Display for ScorelinePrediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.home_goals, self.away_goals)
    }
}

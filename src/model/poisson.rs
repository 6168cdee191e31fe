//! Poisson scoreline model
//!
//! Each side's goal count is an independent Poisson variable. Independence is
//! a modelling assumption, not something estimated from the data.

use super::ScorelinePrediction;
use crate::form::TeamFormSnapshot;
use serde::{Deserialize, Serialize};

/// Default number of scorelines returned
pub const DEFAULT_TOP_K: usize = 3;
/// Default highest goal count tabulated per side
pub const DEFAULT_MAX_GOALS: u8 = 6;

/// Poisson probabilities for exactly 0..=max_k goals
///
/// Truncated: mass above `max_k` is dropped, so the result sums to less than
/// one. Rates at or below zero (and non-finite rates) put all mass on zero.
pub fn poisson_pmf(lambda: f64, max_k: u8) -> Vec<f64> {
    let lambda = if lambda.is_finite() { lambda.max(0.0) } else { 0.0 };
    let n = max_k as usize;
    let mut out = vec![0.0; n + 1];

    out[0] = (-lambda).exp();
    for k in 1..=n {
        out[k] = out[k - 1] * lambda / k as f64;
    }
    out
}

/// Expected goals for (home, away)
///
/// Each side's rate is the mean of its own scoring average and the
/// opponent's conceding average.
pub fn expected_goals(home: &TeamFormSnapshot, away: &TeamFormSnapshot) -> (f64, f64) {
    (
        (home.goals_for + away.goals_against) / 2.0,
        (away.goals_for + home.goals_against) / 2.0,
    )
}

/// Joint scoreline probabilities, row = home goals, column = away goals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreGrid {
    cells: Vec<Vec<f64>>,
}

/// Match result probabilities
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutcomeProbabilities {
    pub home_win: f64,
    pub draw: f64,
    pub away_win: f64,
}

impl ScoreGrid {
    /// Outer product of the two truncated distributions, renormalised
    ///
    /// Every cell is an exact scoreline; dividing by the grid total keeps
    /// their relative order and makes the grid sum to one.
    pub fn new(lambda_home: f64, lambda_away: f64, max_goals: u8) -> Self {
        let home = poisson_pmf(lambda_home, max_goals);
        let away = poisson_pmf(lambda_away, max_goals);
        let mut cells: Vec<Vec<f64>> = home
            .iter()
            .map(|ph| away.iter().map(|pa| ph * pa).collect())
            .collect();

        let total: f64 = cells.iter().flatten().sum();
        if total > 0.0 {
            cells.iter_mut().flatten().for_each(|p| *p /= total);
        } else {
            // every in-grid probability underflowed: rates far beyond max_goals
            let n = max_goals as usize;
            cells[n][n] = 1.0;
        }
        Self { cells }
    }

    pub fn probability(&self, home_goals: u8, away_goals: u8) -> Option<f64> {
        self.cells
            .get(home_goals as usize)?
            .get(away_goals as usize)
            .copied()
    }

    /// Total mass, one up to rounding
    pub fn total(&self) -> f64 {
        self.cells.iter().flatten().sum()
    }

    /// Cells in row-major order (ascending home goals, then away goals)
    pub fn cells(&self) -> impl Iterator<Item = ScorelinePrediction> + '_ {
        self.cells.iter().enumerate().flat_map(|(h, row)| {
            row.iter().enumerate().map(move |(a, p)| ScorelinePrediction {
                home_goals: h as u8,
                away_goals: a as u8,
                probability: *p,
            })
        })
    }

    /// Home win, draw and away win mass
    pub fn outcomes(&self) -> OutcomeProbabilities {
        let mut out = OutcomeProbabilities {
            home_win: 0.0,
            draw: 0.0,
            away_win: 0.0,
        };
        for cell in self.cells() {
            match cell.home_goals.cmp(&cell.away_goals) {
                std::cmp::Ordering::Greater => out.home_win += cell.probability,
                std::cmp::Ordering::Equal => out.draw += cell.probability,
                std::cmp::Ordering::Less => out.away_win += cell.probability,
            }
        }
        out
    }
}

/// Ranks exact scorelines by joint Poisson probability
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScorelinePredictor {
    top_k: usize,
    max_goals: u8,
}

impl ScorelinePredictor {
    pub fn new(top_k: usize, max_goals: u8) -> Self {
        Self { top_k, max_goals }
    }

    pub fn grid(&self, lambda_home: f64, lambda_away: f64) -> ScoreGrid {
        ScoreGrid::new(lambda_home, lambda_away, self.max_goals)
    }

    /// The `top_k` most likely scorelines, most likely first
    ///
    /// Equal probabilities keep grid scan order: fewer home goals first,
    /// then fewer away goals. The tie-break is arbitrary but deterministic.
    pub fn predict(&self, lambda_home: f64, lambda_away: f64) -> Vec<ScorelinePrediction> {
        self.rank(&self.grid(lambda_home, lambda_away))
    }

    /// Rank an already built grid
    pub fn rank(&self, grid: &ScoreGrid) -> Vec<ScorelinePrediction> {
        let mut cells: Vec<_> = grid.cells().collect();
        // stable sort keeps scan order among ties
        cells.sort_by(|a, b| b.probability.total_cmp(&a.probability));
        cells.truncate(self.top_k);
        cells
    }
}

impl Default for ScorelinePredictor {
    fn default() -> Self {
        Self::new(DEFAULT_TOP_K, DEFAULT_MAX_GOALS)
    }
}

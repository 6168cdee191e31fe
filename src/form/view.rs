//! Team-centric match view

use crate::data::MatchStatLine;
use serde::{Deserialize, Serialize};

/// A match re-projected from one team's perspective
///
/// "For" is always the requested team, "against" its opponent, whichever
/// side of the source row the team was listed on. Statistics the source did
/// not publish count as zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamMatchView {
    pub is_home: bool,
    pub fouls_for: f64,
    pub shots_on_target_for: f64,
    pub shots_on_target_against: f64,
    pub corners_for: f64,
    /// Yellow plus red cards
    pub cards_for: f64,
    pub goals_for: f64,
    pub goals_against: f64,
    pub second_half_goals_for: f64,
    pub second_half_goals_against: f64,
    /// Both sides scored at least once
    pub both_scored: bool,
}

impl TeamMatchView {
    /// Goals by both sides
    pub fn total_goals(&self) -> f64 {
        self.goals_for + self.goals_against
    }

    pub fn won(&self) -> bool {
        self.goals_for > self.goals_against
    }

    pub fn clean_sheet(&self) -> bool {
        self.goals_against == 0.0
    }

    pub fn carded(&self) -> bool {
        self.cards_for >= 1.0
    }
}

/// Project a match onto `team`
///
/// Returns `None` when the team played in neither slot.
pub fn normalize(line: &MatchStatLine, team: &str) -> Option<TeamMatchView> {
    let is_home = if line.home_team == team {
        true
    } else if line.away_team == team {
        false
    } else {
        return None;
    };

    let v = |x: Option<u16>| x.unwrap_or(0) as f64;

    // (for, against) pairs in home-perspective order
    let flip = |home: f64, away: f64| if is_home { (home, away) } else { (away, home) };

    let (goals_for, goals_against) = flip(line.home_goals as f64, line.away_goals as f64);
    let (ht_for, ht_against) = flip(v(line.home_ht_goals), v(line.away_ht_goals));
    let (fouls_for, _) = flip(v(line.home_fouls), v(line.away_fouls));
    let (sot_for, sot_against) = flip(
        v(line.home_shots_on_target),
        v(line.away_shots_on_target),
    );
    let (corners_for, _) = flip(v(line.home_corners), v(line.away_corners));
    let (cards_for, _) = flip(
        v(line.home_yellow) + v(line.home_red),
        v(line.away_yellow) + v(line.away_red),
    );

    Some(TeamMatchView {
        is_home,
        fouls_for,
        shots_on_target_for: sot_for,
        shots_on_target_against: sot_against,
        corners_for,
        cards_for,
        goals_for,
        goals_against,
        second_half_goals_for: (goals_for - ht_for).max(0.0),
        second_half_goals_against: (goals_against - ht_against).max(0.0),
        both_scored: line.home_goals > 0 && line.away_goals > 0,
    })
}

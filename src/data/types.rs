//! Historical match types

use crate::form::RefereeStats;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::OnceLock;

/// One historical match as published by the results source
///
/// Home/away labelled columns. Only the date, the two teams and the
/// full-time score are required; every other statistic is optional because
/// older seasons and smaller leagues omit them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchStatLine {
    /// Match date
    pub date: NaiveDate,
    /// League label the row was loaded under
    pub league: String,
    /// Home team name
    pub home_team: String,
    /// Away team name
    pub away_team: String,
    /// Full-time home goals
    pub home_goals: u16,
    /// Full-time away goals
    pub away_goals: u16,
    pub home_ht_goals: Option<u16>,
    pub away_ht_goals: Option<u16>,
    pub home_shots_on_target: Option<u16>,
    pub away_shots_on_target: Option<u16>,
    pub home_fouls: Option<u16>,
    pub away_fouls: Option<u16>,
    pub home_corners: Option<u16>,
    pub away_corners: Option<u16>,
    pub home_yellow: Option<u16>,
    pub away_yellow: Option<u16>,
    pub home_red: Option<u16>,
    pub away_red: Option<u16>,
    /// Referee name, when the source publishes it
    pub referee: Option<String>,
}

impl MatchStatLine {
    /// Create a line with only the required fields set
    pub fn new(
        date: NaiveDate,
        league: impl Into<String>,
        home_team: impl Into<String>,
        away_team: impl Into<String>,
        home_goals: u16,
        away_goals: u16,
    ) -> Self {
        Self {
            date,
            league: league.into(),
            home_team: home_team.into(),
            away_team: away_team.into(),
            home_goals,
            away_goals,
            home_ht_goals: None,
            away_ht_goals: None,
            home_shots_on_target: None,
            away_shots_on_target: None,
            home_fouls: None,
            away_fouls: None,
            home_corners: None,
            away_corners: None,
            home_yellow: None,
            away_yellow: None,
            home_red: None,
            away_red: None,
            referee: None,
        }
    }

    /// Whether the team played in this match, on either side
    pub fn involves(&self, team: &str) -> bool {
        self.home_team == team || self.away_team == team
    }

    /// Combined yellow and red cards shown to both sides
    pub fn total_cards(&self) -> u32 {
        [self.home_yellow, self.away_yellow, self.home_red, self.away_red]
            .iter()
            .map(|c| c.unwrap_or(0) as u32)
            .sum()
    }
}

/// Ordered, read-only collection of historical matches
///
/// Rows are kept in ascending date order so the most recent N matches of a
/// team are always a suffix of its filtered history. Equal dates keep their
/// source order.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    matches: Vec<MatchStatLine>,
    dropped: usize,
    referees: OnceLock<RefereeStats>,
}

impl Dataset {
    /// Build a dataset, sorting rows by date
    pub fn new(mut matches: Vec<MatchStatLine>, dropped: usize) -> Self {
        matches.sort_by_key(|m| m.date);
        Self {
            matches,
            dropped,
            referees: OnceLock::new(),
        }
    }

    /// All matches in ascending date order
    pub fn matches(&self) -> &[MatchStatLine] {
        &self.matches
    }

    /// Number of source rows rejected while loading
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Matches the team played, oldest first
    pub fn team_matches<'a>(&'a self, team: &'a str) -> impl Iterator<Item = &'a MatchStatLine> {
        self.matches.iter().filter(move |m| m.involves(team))
    }

    /// Referee profiles, built on first use and kept for the dataset's life
    pub fn referee_stats(&self) -> &RefereeStats {
        self.referees.get_or_init(|| RefereeStats::from_dataset(self))
    }

    /// Distinct team names (home or away), sorted
    pub fn teams(&self) -> Vec<String> {
        self.matches
            .iter()
            .flat_map(|m| [m.home_team.clone(), m.away_team.clone()])
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Append another load, keeping date order
    pub fn merge(self, other: Dataset) -> Dataset {
        let dropped = self.dropped + other.dropped;
        let mut matches = self.matches;
        matches.extend(other.matches);
        Dataset::new(matches, dropped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 9, d).unwrap()
    }

    #[test]
    fn test_dataset_sorted_by_date() {
        let ds = Dataset::new(
            vec![
                MatchStatLine::new(day(10), "E0", "Arsenal", "Chelsea", 1, 0),
                MatchStatLine::new(day(2), "E0", "Chelsea", "Everton", 2, 2),
                MatchStatLine::new(day(5), "E0", "Everton", "Arsenal", 0, 3),
            ],
            0,
        );
        let dates: Vec<_> = ds.matches().iter().map(|m| m.date).collect();
        assert_eq!(dates, vec![day(2), day(5), day(10)]);
    }

    #[test]
    fn test_equal_dates_keep_source_order() {
        let ds = Dataset::new(
            vec![
                MatchStatLine::new(day(1), "E0", "A", "B", 0, 0),
                MatchStatLine::new(day(1), "E0", "C", "D", 0, 0),
            ],
            0,
        );
        assert_eq!(ds.matches()[0].home_team, "A");
        assert_eq!(ds.matches()[1].home_team, "C");
    }

    #[test]
    fn test_teams_and_dropped() {
        let ds = Dataset::new(
            vec![
                MatchStatLine::new(day(1), "E0", "Arsenal", "Chelsea", 1, 0),
                MatchStatLine::new(day(2), "SP1", "Sevilla", "Betis", 1, 1),
            ],
            3,
        );
        assert_eq!(ds.teams(), vec!["Arsenal", "Betis", "Chelsea", "Sevilla"]);
        assert_eq!(ds.dropped(), 3);
    }

    #[test]
    fn test_referee_stats_built_once() {
        let mut line = MatchStatLine::new(day(1), "E0", "Arsenal", "Chelsea", 1, 0);
        line.referee = Some("M Oliver".to_string());
        line.home_yellow = Some(3);
        let ds = Dataset::new(vec![line], 0);

        let first = ds.referee_stats();
        let second = ds.referee_stats();
        assert!(std::ptr::eq(first, second));
        assert_eq!(first.get("M Oliver").unwrap().mean_cards, 3.0);
    }

    #[test]
    fn test_merged_dataset_rebuilds_referee_stats() {
        let mut first = MatchStatLine::new(day(1), "E0", "Arsenal", "Chelsea", 1, 0);
        first.referee = Some("M Oliver".to_string());
        let mut second = MatchStatLine::new(day(2), "E0", "Chelsea", "Everton", 0, 0);
        second.referee = Some("A Taylor".to_string());

        let ds = Dataset::new(vec![first], 0);
        assert!(ds.referee_stats().get("A Taylor").is_none());
        let merged = ds.merge(Dataset::new(vec![second], 0));
        assert!(merged.referee_stats().get("A Taylor").is_some());
    }

    #[test]
    fn test_total_cards_ignores_missing() {
        let mut line = MatchStatLine::new(day(1), "E0", "A", "B", 0, 0);
        line.home_yellow = Some(2);
        line.away_red = Some(1);
        assert_eq!(line.total_cards(), 3);
    }

    #[test]
    fn test_merge_resorts() {
        let a = Dataset::new(vec![MatchStatLine::new(day(9), "E0", "A", "B", 0, 0)], 1);
        let b = Dataset::new(vec![MatchStatLine::new(day(3), "E0", "B", "A", 0, 0)], 2);
        let merged = a.merge(b);
        assert_eq!(merged.matches()[0].date, day(3));
        assert_eq!(merged.dropped(), 3);
    }
}

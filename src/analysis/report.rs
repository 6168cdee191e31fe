//! Analysis results and their text rendering

use crate::form::{FormError, RefereeContext, TeamFormSnapshot, TeamRatings};
use crate::model::{OutcomeProbabilities, ScorelinePrediction};
use crate::signal::SignalRecord;
use serde::{Deserialize, Serialize};

/// Result of analysing one matchup
///
/// Every way an analysis can stop short is a variant here rather than an
/// error, so callers can report each one distinctly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AnalysisOutcome<R = MatchupReport> {
    /// Both sides had enough history
    Ready(R),
    /// A team exists but has fewer matches than required
    InsufficientData {
        team: String,
        available: usize,
        required: usize,
    },
    /// A team does not appear in the loaded data
    UnknownTeam { team: String },
    /// The results source could not be reached
    SourceUnavailable { league: String, reason: String },
}

impl<R> AnalysisOutcome<R> {
    pub fn is_ready(&self) -> bool {
        matches!(self, AnalysisOutcome::Ready(_))
    }

    /// The report, if the analysis completed
    pub fn report(&self) -> Option<&R> {
        match self {
            AnalysisOutcome::Ready(report) => Some(report),
            _ => None,
        }
    }

    /// One-line explanation for outcomes that carry no report
    pub fn reason(&self) -> Option<String> {
        match self {
            AnalysisOutcome::Ready(_) => None,
            AnalysisOutcome::InsufficientData {
                team,
                available,
                required,
            } => Some(format!(
                "Not enough data for {}: {} matches, {} required",
                team, available, required
            )),
            AnalysisOutcome::UnknownTeam { team } => {
                Some(format!("No matches found for {}", team))
            }
            AnalysisOutcome::SourceUnavailable { league, reason } => Some(format!(
                "Results source unavailable for {}: {}",
                league, reason
            )),
        }
    }
}

impl<R> From<FormError> for AnalysisOutcome<R> {
    fn from(err: FormError) -> Self {
        match err {
            FormError::InsufficientData {
                team,
                available,
                required,
            } => AnalysisOutcome::InsufficientData {
                team,
                available,
                required,
            },
            FormError::UnknownTeam(team) => AnalysisOutcome::UnknownTeam { team },
        }
    }
}

/// Expected goals and the derived scoreline view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScorelineSummary {
    pub lambda_home: f64,
    pub lambda_away: f64,
    /// Most likely exact results, most likely first
    pub top: Vec<ScorelinePrediction>,
    pub outcomes: OutcomeProbabilities,
}

/// Everything computed for a football matchup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchupReport {
    pub league: String,
    pub home: TeamFormSnapshot,
    pub away: TeamFormSnapshot,
    pub referee: RefereeContext,
    /// Amount the referee adds to projected card totals
    pub referee_adjustment: f64,
    pub signals: Vec<SignalRecord>,
    pub scorelines: ScorelineSummary,
}

/// Everything computed for a basketball matchup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingsReport {
    pub home: TeamRatings,
    pub away: TeamRatings,
    pub signals: Vec<SignalRecord>,
}

const RULE: &str = "══════════════════════════════════════════════════════";
const THIN: &str = "───────────────────────────────────────────────────────";

impl MatchupReport {
    /// Format as table for CLI output
    pub fn format_table(&self) -> String {
        let (h, a) = (&self.home, &self.away);
        let s = &self.scorelines;
        let top = s
            .top
            .iter()
            .map(|p| format!("{:<8}{:>6.1}%", p.to_string(), p.probability * 100.0))
            .collect::<Vec<_>>()
            .join("\n");
        format!(
            r#"
{RULE}
  {} vs {}  ({})
{RULE}

FORM (last {} / {} matches)
{THIN}
                  {:>10}  {:>10}
Goals for:        {:>10.2}  {:>10.2}
Goals against:    {:>10.2}  {:>10.2}
2nd half goals:   {:>10.2}  {:>10.2}
Shots on target:  {:>10.2}  {:>10.2}
Fouls:            {:>10.2}  {:>10.2}
Corners:          {:>10.2}  {:>10.2}
Cards:            {:>10.2}  {:>10.2}
BTTS rate:        {:>9.0}%  {:>9.0}%
Over 2.5 rate:    {:>9.0}%  {:>9.0}%
Clean sheets:     {:>9.0}%  {:>9.0}%
Win rate:         {:>9.0}%  {:>9.0}%

REFEREE
{THIN}
{}
{}
SCORELINES (xG {:.2} - {:.2})
{THIN}
{}
1X2:    {:.0}% / {:.0}% / {:.0}%
{RULE}
"#,
            h.team,
            a.team,
            self.league,
            h.matches,
            a.matches,
            "home",
            "away",
            h.goals_for,
            a.goals_for,
            h.goals_against,
            a.goals_against,
            h.second_half_goals_for,
            a.second_half_goals_for,
            h.shots_on_target_for,
            a.shots_on_target_for,
            h.fouls_for,
            a.fouls_for,
            h.corners_for,
            a.corners_for,
            h.cards_for,
            a.cards_for,
            h.both_scored_rate * 100.0,
            a.both_scored_rate * 100.0,
            h.over_2_5_rate * 100.0,
            a.over_2_5_rate * 100.0,
            h.clean_sheet_rate * 100.0,
            a.clean_sheet_rate * 100.0,
            h.win_rate * 100.0,
            a.win_rate * 100.0,
            self.referee_line(),
            signals_section(&self.signals),
            s.lambda_home,
            s.lambda_away,
            top,
            s.outcomes.home_win * 100.0,
            s.outcomes.draw * 100.0,
            s.outcomes.away_win * 100.0,
        )
    }

    fn referee_line(&self) -> String {
        match &self.referee {
            RefereeContext::Profile(p) => format!(
                "{}: {:.2} cards/match over {} matches ({:+.2})",
                p.name, p.mean_cards, p.matches, self.referee_adjustment
            ),
            RefereeContext::Override { average } => {
                format!("Override: {:.2} cards/match ({:+.2})", average, self.referee_adjustment)
            }
            RefereeContext::Default { average } => {
                format!("Default: {:.2} cards/match", average)
            }
        }
    }
}

impl RatingsReport {
    /// Format as table for CLI output
    pub fn format_table(&self) -> String {
        let (h, a) = (&self.home, &self.away);
        format!(
            r#"
{RULE}
  {} vs {}
{RULE}

RATINGS
{THIN}
Record:           {:>10}  {:>10}
Offensive:        {:>10.1}  {:>10.1}
Defensive:        {:>10.1}  {:>10.1}
Net:              {:>+10.1}  {:>+10.1}
Margin:           {:>+10.1}  {:>+10.1}
{}
{RULE}
"#,
            h.team,
            a.team,
            format!("{}-{}", h.wins, h.losses),
            format!("{}-{}", a.wins, a.losses),
            h.offensive_rating,
            a.offensive_rating,
            h.defensive_rating,
            a.defensive_rating,
            h.net_rating,
            a.net_rating,
            h.margin_of_victory,
            a.margin_of_victory,
            signals_section(&self.signals),
        )
    }
}

fn signals_section(signals: &[SignalRecord]) -> String {
    if signals.is_empty() {
        return format!("\nSIGNALS\n{THIN}\nNo signals for this matchup\n");
    }
    let lines: String = signals
        .iter()
        .map(|s| {
            let stake = s
                .stake
                .as_ref()
                .map(|stake| format!("       stake {} @ {:.2}\n", stake.amount, stake.payout))
                .unwrap_or_default();
            format!("[{:>3}%] {}\n       {}\n{}", s.confidence, s.label, s.description, stake)
        })
        .collect();
    format!("\nSIGNALS\n{THIN}\n{lines}")
}

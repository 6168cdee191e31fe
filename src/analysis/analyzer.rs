//! Matchup analysis pipeline

use super::{AnalysisOutcome, MatchupReport, RatingsReport, ScorelineSummary};
use crate::config::Config;
use crate::data::{Clock, Dataset, DatasetCache, LeagueSpec, MatchSource};
use crate::form::{
    team_history, FormAggregator, FormError, RefereeContext, TeamFormSnapshot,
    TeamRatings, DEFAULT_REFEREE_AVERAGE,
};
use crate::model::{expected_goals, ScorelinePredictor};
use crate::risk::StakeSizer;
use crate::signal::{RuleCatalog, SignalEvaluator, SignalRecord};
use crate::telemetry::{record_latency, set_gauge, GaugeMetric, LatencyMetric};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{info, warn};

/// One football matchup to analyse
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchupRequest {
    pub league: String,
    pub home: String,
    pub away: String,
    /// Referee to look up in the league's history
    pub referee: Option<String>,
    /// Card average entered by hand; wins over `referee`
    pub referee_override: Option<f64>,
}

impl MatchupRequest {
    pub fn new(league: impl Into<String>, home: impl Into<String>, away: impl Into<String>) -> Self {
        Self {
            league: league.into(),
            home: home.into(),
            away: away.into(),
            referee: None,
            referee_override: None,
        }
    }
}

/// Runs aggregation, rule evaluation, staking and the scoreline model for
/// a matchup
///
/// Analysis itself is synchronous and touches no shared state; only
/// `analyze_league` goes through the async source and cache.
#[derive(Debug, Clone)]
pub struct Analyzer {
    aggregator: FormAggregator,
    weighted: bool,
    football: SignalEvaluator,
    basketball: SignalEvaluator,
    predictor: ScorelinePredictor,
    sizer: StakeSizer,
    bankroll: Decimal,
    default_payout: Option<f64>,
    referee_average: f64,
}

impl Analyzer {
    /// Analyzer with the built-in catalogs and default settings
    pub fn new(aggregator: FormAggregator) -> Self {
        Self {
            aggregator,
            weighted: false,
            football: SignalEvaluator::new(RuleCatalog::football())
                .expect("Built-in football catalog is valid"),
            basketball: SignalEvaluator::new(RuleCatalog::basketball())
                .expect("Built-in basketball catalog is valid"),
            predictor: ScorelinePredictor::default(),
            sizer: StakeSizer::default(),
            bankroll: Decimal::ZERO,
            default_payout: None,
            referee_average: DEFAULT_REFEREE_AVERAGE,
        }
    }

    /// Build from validated configuration
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        config.validate()?;
        Ok(Self {
            aggregator: config.aggregator()?,
            weighted: config.form.weighted,
            football: SignalEvaluator::new(config.football_catalog()?)?,
            basketball: SignalEvaluator::new(config.basketball_catalog()?)?,
            predictor: config.predictor(),
            sizer: config.stake_sizer(),
            bankroll: config.stake.bankroll,
            default_payout: config.stake.default_payout,
            referee_average: config.referee.default_average,
        })
    }

    pub fn with_stakes(mut self, sizer: StakeSizer, bankroll: Decimal, default_payout: Option<f64>) -> Self {
        self.sizer = sizer;
        self.bankroll = bankroll;
        self.default_payout = default_payout;
        self
    }

    pub fn aggregator(&self) -> &FormAggregator {
        &self.aggregator
    }

    /// Form snapshot for one team, honouring the weighting setting
    pub fn snapshot(&self, dataset: &Dataset, team: &str) -> Result<TeamFormSnapshot, FormError> {
        if !self.weighted {
            return self.aggregator.snapshot_for(dataset, team);
        }
        let history = team_history(dataset, team);
        if history.is_empty() {
            return Err(FormError::UnknownTeam(team.to_string()));
        }
        self.aggregator.aggregate_weighted(team, &history)
    }

    /// Analyse a football matchup over an already loaded dataset
    pub fn analyze(&self, dataset: &Dataset, request: &MatchupRequest) -> AnalysisOutcome {
        let start = Instant::now();

        let home = match self.snapshot(dataset, &request.home) {
            Ok(s) => s,
            Err(e) => return e.into(),
        };
        let away = match self.snapshot(dataset, &request.away) {
            Ok(s) => s,
            Err(e) => return e.into(),
        };

        let referee = match request.referee_override {
            Some(average) => RefereeContext::Override { average },
            None => RefereeContext::resolve(
                dataset.referee_stats(),
                request.referee.as_deref(),
                self.referee_average,
            ),
        };
        let referee_adjustment = referee.adjustment(self.referee_average);

        let mut signals = self.football.evaluate(&home, &away, referee_adjustment);
        self.attach_stakes(&mut signals);

        let (lambda_home, lambda_away) = expected_goals(&home, &away);
        let grid = self.predictor.grid(lambda_home, lambda_away);
        let scorelines = ScorelineSummary {
            lambda_home,
            lambda_away,
            top: self.predictor.rank(&grid),
            outcomes: grid.outcomes(),
        };

        record_latency(LatencyMetric::Analysis, start.elapsed());
        set_gauge(GaugeMetric::LastSignalCount, signals.len() as f64);
        info!(
            league = %request.league,
            home = %request.home,
            away = %request.away,
            signals = signals.len(),
            lambda_home,
            lambda_away,
            "Matchup analysed"
        );

        AnalysisOutcome::Ready(MatchupReport {
            league: request.league.clone(),
            home,
            away,
            referee,
            referee_adjustment,
            signals,
            scorelines,
        })
    }

    /// Load the league through `cache` and analyse the matchup
    ///
    /// A source failure becomes `AnalysisOutcome::SourceUnavailable`.
    pub async fn analyze_league<C: Clock>(
        &self,
        cache: &DatasetCache<C>,
        source: &dyn MatchSource,
        league: &LeagueSpec,
        request: &MatchupRequest,
    ) -> AnalysisOutcome {
        let start = Instant::now();
        let dataset = match cache.get_or_load(league, source).await {
            Ok(d) => d,
            Err(e) => {
                warn!(league = %league.name, error = %e, "Results source unavailable");
                return AnalysisOutcome::SourceUnavailable {
                    league: league.name.clone(),
                    reason: e.to_string(),
                };
            }
        };
        record_latency(LatencyMetric::DatasetLoad, start.elapsed());
        set_gauge(GaugeMetric::DatasetMatches, dataset.len() as f64);

        self.analyze(&dataset, request)
    }

    /// Analyse a basketball matchup from season ratings
    ///
    /// Ratings are season-level, so there is no minimum-history check and
    /// no scoreline model.
    pub fn analyze_ratings(
        &self,
        ratings: &[TeamRatings],
        home: &str,
        away: &str,
    ) -> AnalysisOutcome<RatingsReport> {
        let find = |team: &str| ratings.iter().find(|r| r.team.eq_ignore_ascii_case(team));
        let Some(home) = find(home) else {
            return AnalysisOutcome::UnknownTeam {
                team: home.to_string(),
            };
        };
        let Some(away) = find(away) else {
            return AnalysisOutcome::UnknownTeam {
                team: away.to_string(),
            };
        };

        let mut signals = self.basketball.evaluate(home, away, 0.0);
        self.attach_stakes(&mut signals);
        info!(home = %home.team, away = %away.team, signals = signals.len(), "Ratings matchup analysed");

        AnalysisOutcome::Ready(RatingsReport {
            home: home.clone(),
            away: away.clone(),
            signals,
        })
    }

    fn attach_stakes(&self, signals: &mut [SignalRecord]) {
        if self.bankroll <= Decimal::ZERO {
            return;
        }
        for signal in signals.iter_mut() {
            signal.stake = self.sizer.size_signal(signal, self.default_payout, self.bankroll);
        }
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new(FormAggregator::default())
    }
}

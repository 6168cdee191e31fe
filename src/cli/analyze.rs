//! Analyze command implementation

use super::{print_json, OutputFormat, SourceArgs};
use crate::analysis::{AnalysisOutcome, Analyzer, MatchupRequest};
use crate::config::{validate_referee_average, Config};
use crate::data::DatasetCache;
use clap::Args;
use rust_decimal::Decimal;

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Home team, as spelled by the results provider
    #[arg(long)]
    pub home: String,

    /// Away team, as spelled by the results provider
    #[arg(long)]
    pub away: String,

    /// Referee name to look up in the league's history
    #[arg(long)]
    pub referee: Option<String>,

    /// Referee cards-per-match average, overrides --referee
    #[arg(long)]
    pub referee_avg: Option<f64>,

    /// Bankroll for stake suggestions
    #[arg(long)]
    pub bankroll: Option<Decimal>,

    /// Rolling window size
    #[arg(long)]
    pub window: Option<usize>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

impl AnalyzeArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let mut config = config.clone();
        if let Some(bankroll) = self.bankroll {
            config.stake.bankroll = bankroll;
        }
        if let Some(window) = self.window {
            config.form.window = window;
        }
        let referee_override = self.referee_avg.map(validate_referee_average).transpose()?;

        let analyzer = Analyzer::from_config(&config)?;
        let (league, source) = self.source.source(&config)?;
        let cache = DatasetCache::new(config.source.cache_ttl());

        let request = MatchupRequest {
            league: league.name.clone(),
            home: self.home.clone(),
            away: self.away.clone(),
            referee: self.referee.clone(),
            referee_override,
        };

        let outcome = analyzer
            .analyze_league(&cache, source.as_ref(), &league, &request)
            .await;

        match (self.format, &outcome) {
            (OutputFormat::Json, _) => print_json(&outcome)?,
            (OutputFormat::Table, AnalysisOutcome::Ready(report)) => {
                print!("{}", report.format_table())
            }
            (OutputFormat::Table, _) => {
                if let Some(reason) = outcome.reason() {
                    println!("{}", reason);
                }
            }
        }
        Ok(())
    }
}

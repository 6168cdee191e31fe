//! CLI interface for form-signals
//!
//! Provides subcommands for:
//! - `analyze`: Football matchup report
//! - `nba`: Basketball matchup report from season ratings
//! - `teams`: Teams and match counts in a league
//! - `referees`: Referee card averages in a league
//! - `config`: Show the effective configuration

mod analyze;
mod nba;
mod referees;
mod teams;

pub use analyze::AnalyzeArgs;
pub use nba::NbaArgs;
pub use referees::RefereesArgs;
pub use teams::TeamsArgs;

use crate::config::Config;
use crate::data::{CsvFileSource, Dataset, FootballDataClient, LeagueSpec, MatchSource};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "form-signals")]
#[command(about = "Rolling team form, rule-based match signals and Poisson scorelines")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyse a football matchup
    Analyze(AnalyzeArgs),
    /// Analyse a basketball matchup from season ratings
    Nba(NbaArgs),
    /// List teams in a league
    Teams(TeamsArgs),
    /// List referee card averages in a league
    Referees(RefereesArgs),
    /// Show the effective configuration
    Config,
}

/// Report output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Where league results come from
#[derive(clap::Args, Debug, Clone)]
pub struct SourceArgs {
    /// League name or provider code
    #[arg(short, long, default_value = "La Liga")]
    pub league: String,

    /// Read results from a local CSV file instead of the results provider
    #[arg(long)]
    pub csv: Option<PathBuf>,
}

impl SourceArgs {
    /// Resolve the league and build the matching source
    pub fn source(&self, config: &Config) -> anyhow::Result<(LeagueSpec, Box<dyn MatchSource>)> {
        let league = match config.source.league(&self.league) {
            Ok(league) => league.clone(),
            // a local file can carry any league
            Err(_) if self.csv.is_some() => LeagueSpec::new(&self.league, &self.league),
            Err(e) => return Err(e.into()),
        };

        let source: Box<dyn MatchSource> = match &self.csv {
            Some(path) => Box::new(CsvFileSource::new(path)),
            None => Box::new(FootballDataClient::with_config(config.source.football_data())?),
        };
        Ok((league, source))
    }

    /// Load the league, or print why it could not be loaded
    pub async fn load(&self, config: &Config) -> anyhow::Result<Option<Dataset>> {
        let (league, source) = self.source(config)?;
        match source.fetch(&league).await {
            Ok(dataset) if dataset.is_empty() => {
                println!("No matches loaded for {}", league.name);
                Ok(None)
            }
            Ok(dataset) => Ok(Some(dataset)),
            Err(e) => {
                println!("Results source unavailable for {}: {}", league.name, e);
                Ok(None)
            }
        }
    }
}

pub(crate) fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

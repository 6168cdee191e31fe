//! NBA command implementation

use super::{print_json, OutputFormat};
use crate::analysis::{AnalysisOutcome, Analyzer};
use crate::config::Config;
use crate::data::parse_ratings;
use clap::Args;
use std::time::Duration;

#[derive(Args, Debug)]
pub struct NbaArgs {
    /// Team ratings table: a local CSV path or an http(s) URL
    #[arg(long)]
    pub ratings: String,

    /// Home team
    #[arg(long)]
    pub home: String,

    /// Away team
    #[arg(long)]
    pub away: String,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

impl NbaArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let text = match self.read_table(config).await {
            Ok(text) => text,
            Err(e) => {
                println!("Ratings source unavailable: {}", e);
                return Ok(());
            }
        };

        let (ratings, rejected) = parse_ratings(&text);
        if !rejected.is_empty() {
            tracing::warn!(rejected = rejected.len(), "Dropped malformed ratings rows");
        }
        if ratings.is_empty() {
            println!("No team ratings found in {}", self.ratings);
            return Ok(());
        }

        let analyzer = Analyzer::from_config(config)?;
        let outcome = analyzer.analyze_ratings(&ratings, &self.home, &self.away);

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

    async fn read_table(&self, config: &Config) -> anyhow::Result<String> {
        if self.ratings.starts_with("http://") || self.ratings.starts_with("https://") {
            let client = reqwest::Client::builder()
                .timeout(Duration::from_secs(config.source.timeout_secs))
                .build()?;
            let response = client.get(&self.ratings).send().await?.error_for_status()?;
            Ok(response.text().await?)
        } else {
            Ok(tokio::fs::read_to_string(&self.ratings).await?)
        }
    }
}

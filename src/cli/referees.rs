//! Referees command implementation

use super::{print_json, OutputFormat, SourceArgs};
use crate::config::Config;
use crate::form::RefereeProfile;
use clap::Args;

#[derive(Args, Debug)]
pub struct RefereesArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Only referees with at least this many matches
    #[arg(long, default_value = "1")]
    pub min_matches: usize,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

impl RefereesArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let Some(dataset) = self.source.load(config).await? else {
            return Ok(());
        };

        let mut profiles: Vec<&RefereeProfile> = dataset
            .referee_stats()
            .profiles()
            .filter(|p| p.matches >= self.min_matches)
            .collect();
        profiles.sort_by(|a, b| b.mean_cards.total_cmp(&a.mean_cards));

        match self.format {
            OutputFormat::Json => print_json(&profiles)?,
            OutputFormat::Table => {
                if profiles.is_empty() {
                    println!(
                        "No referee data; unknown referees use {:.1} cards/match",
                        config.referee.default_average
                    );
                    return Ok(());
                }
                println!("{:<28}{:>8}{:>12}", "Referee", "Matches", "Cards/match");
                for p in profiles {
                    println!("{:<28}{:>8}{:>12.2}", p.name, p.matches, p.mean_cards);
                }
            }
        }
        Ok(())
    }
}

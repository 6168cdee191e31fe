//! Teams command implementation

use super::{print_json, OutputFormat, SourceArgs};
use crate::config::Config;
use clap::Args;
use serde::Serialize;

#[derive(Args, Debug)]
pub struct TeamsArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

#[derive(Debug, Serialize)]
struct TeamRow {
    team: String,
    matches: usize,
}

impl TeamsArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let Some(dataset) = self.source.load(config).await? else {
            return Ok(());
        };

        let rows: Vec<TeamRow> = dataset
            .teams()
            .into_iter()
            .map(|team| TeamRow {
                matches: dataset.team_matches(&team).count(),
                team,
            })
            .collect();

        match self.format {
            OutputFormat::Json => print_json(&rows)?,
            OutputFormat::Table => {
                println!("{:<28}{:>8}", "Team", "Matches");
                for row in &rows {
                    println!("{:<28}{:>8}", row.team, row.matches);
                }
                println!(
                    "{} teams, {} matches ({} rows dropped)",
                    rows.len(),
                    dataset.len(),
                    dataset.dropped()
                );
            }
        }
        Ok(())
    }
}

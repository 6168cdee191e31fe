//! Historical match sources
//!
//! The results provider is an external collaborator. Sources only fetch and
//! parse; they never retry. A source that cannot be reached returns
//! `SourceError` and the caller degrades to "source unavailable".

use super::results::parse_results;
use super::Dataset;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// football-data.co.uk season file root
pub const FOOTBALL_DATA_URL: &str = "https://www.football-data.co.uk/mmz4281";

/// A league as known to the results provider
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LeagueSpec {
    /// Display label, e.g. "Premier League"
    pub name: String,
    /// Provider file code, e.g. "E0"
    pub code: String,
}

impl LeagueSpec {
    pub fn new(name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
        }
    }
}

/// Errors fetching historical data
#[derive(Debug, Error)]
pub enum SourceError {
    /// Nothing could be loaded for the league
    #[error("Source unavailable for {league}: {reason}")]
    Unavailable { league: String, reason: String },
    /// HTTP transport failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    /// Local file failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Trait for historical match source implementations
#[async_trait]
pub trait MatchSource: Send + Sync {
    /// Fetch every available match for the league, in ascending date order
    async fn fetch(&self, league: &LeagueSpec) -> Result<Dataset, SourceError>;
}

/// Configuration for the football-data.co.uk client
#[derive(Debug, Clone)]
pub struct FootballDataConfig {
    /// Base URL for season files
    pub base_url: String,
    /// Season folders, e.g. "2324"
    pub seasons: Vec<String>,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for FootballDataConfig {
    fn default() -> Self {
        Self {
            base_url: FOOTBALL_DATA_URL.to_string(),
            seasons: vec!["2324".to_string(), "2425".to_string()],
            timeout: Duration::from_secs(15),
        }
    }
}

/// Client for football-data.co.uk season CSVs
pub struct FootballDataClient {
    config: FootballDataConfig,
    client: Client,
}

impl FootballDataClient {
    /// Create a client with the given configuration
    pub fn with_config(config: FootballDataConfig) -> Result<Self, SourceError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { config, client })
    }

    /// URL of one season file
    pub fn season_url(&self, season: &str, code: &str) -> String {
        format!(
            "{}/{}/{}.csv",
            self.config.base_url.trim_end_matches('/'),
            season,
            code
        )
    }

    async fn fetch_season(&self, season: &str, league: &LeagueSpec) -> Result<Dataset, SourceError> {
        let url = self.season_url(season, &league.code);
        tracing::debug!(url = %url, "Fetching season results");

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(SourceError::Unavailable {
                league: league.name.clone(),
                reason: format!("{} returned {}", url, response.status()),
            });
        }

        let body = response.text().await?;
        Ok(parse_results(&body, &league.name).into_dataset())
    }
}

#[async_trait]
impl MatchSource for FootballDataClient {
    async fn fetch(&self, league: &LeagueSpec) -> Result<Dataset, SourceError> {
        let mut dataset = Dataset::default();
        let mut last_error = None;

        for season in &self.config.seasons {
            match self.fetch_season(season, league).await {
                Ok(ds) => dataset = dataset.merge(ds),
                Err(e) => {
                    tracing::warn!(
                        league = %league.name,
                        season = %season,
                        error = %e,
                        "Season fetch failed, skipping"
                    );
                    last_error = Some(e);
                }
            }
        }

        if dataset.is_empty() {
            if let Some(e) = last_error {
                return Err(SourceError::Unavailable {
                    league: league.name.clone(),
                    reason: e.to_string(),
                });
            }
        }

        tracing::info!(
            league = %league.name,
            matches = dataset.len(),
            dropped = dataset.dropped(),
            "Loaded league results"
        );
        Ok(dataset)
    }
}

/// Reads one local result file per league
///
/// The file is parsed with every row tagged as the requested league.
pub struct CsvFileSource {
    path: PathBuf,
}

impl CsvFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl MatchSource for CsvFileSource {
    async fn fetch(&self, league: &LeagueSpec) -> Result<Dataset, SourceError> {
        let text = tokio::fs::read_to_string(&self.path).await?;
        Ok(parse_results(&text, &league.name).into_dataset())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_season_url() {
        let client = FootballDataClient::with_config(FootballDataConfig {
            base_url: "https://example.test/data/".to_string(),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(
            client.season_url("2425", "SP1"),
            "https://example.test/data/2425/SP1.csv"
        );
    }

    #[tokio::test]
    async fn test_csv_file_source() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Date,HomeTeam,AwayTeam,FTHG,FTAG").unwrap();
        writeln!(file, "02/03/2024,Getafe,Girona,1,2").unwrap();
        writeln!(file, "01/03/2024,Girona,Getafe,0,0").unwrap();

        let source = CsvFileSource::new(file.path());
        let league = LeagueSpec::new("La Liga", "SP1");
        let ds = source.fetch(&league).await.unwrap();

        assert_eq!(ds.len(), 2);
        assert_eq!(ds.matches()[0].home_team, "Girona");
        assert_eq!(ds.matches()[0].league, "La Liga");
    }

    #[tokio::test]
    async fn test_csv_file_source_missing_file() {
        let source = CsvFileSource::new("/nonexistent/results.csv");
        let result = source.fetch(&LeagueSpec::new("X", "X")).await;
        assert!(matches!(result, Err(SourceError::Io(_))));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_unavailable() {
        let client = FootballDataClient::with_config(FootballDataConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            seasons: vec!["2425".to_string()],
            timeout: Duration::from_millis(500),
        })
        .unwrap();
        let result = client.fetch(&LeagueSpec::new("Premier League", "E0")).await;
        assert!(matches!(result, Err(SourceError::Unavailable { .. })));
    }
}

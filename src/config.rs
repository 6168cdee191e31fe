//! Configuration types for form-signals
//!
//! Every section has defaults, so an empty file is a valid configuration.
//! `Config::validate` rejects settings that could only fail mid-analysis.

use crate::data::{FootballDataConfig, LeagueSpec, FOOTBALL_DATA_URL};
use crate::form::{FormAggregator, DEFAULT_MIN_REQUIRED, DEFAULT_REFEREE_AVERAGE, DEFAULT_WINDOW};
use crate::model::{ScorelinePredictor, DEFAULT_MAX_GOALS, DEFAULT_TOP_K};
use crate::risk::{StakeSizer, DEFAULT_KELLY_FRACTION};
use crate::signal::RuleCatalog;
use crate::telemetry::LogFormat;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Highest referee card average accepted as an override
pub const MAX_REFEREE_AVERAGE: f64 = 10.0;

/// Invalid configuration
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("form.window ({window}) must be at least form.min_required ({min_required}), which must be positive")]
    InvalidWindow { window: usize, min_required: usize },
    #[error("Referee average {0} is outside [0, 10]")]
    RefereeAverageOutOfRange(f64),
    #[error("stake.kelly_fraction {0} must be in (0, 1]")]
    KellyFractionOutOfRange(f64),
    #[error("stake.max_stake_pct {0} must be in (0, 1]")]
    MaxStakeOutOfRange(Decimal),
    #[error("stake.bankroll {0} must not be negative")]
    NegativeBankroll(Decimal),
    #[error("stake.default_payout {0} must be above 1.0")]
    InvalidPayout(f64),
    #[error("poisson.top_k must be positive")]
    ZeroTopK,
    #[error("source.seasons must not be empty")]
    NoSeasons,
    #[error("Unknown league: {0}")]
    UnknownLeague(String),
}

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub form: FormConfig,
    #[serde(default)]
    pub referee: RefereeConfig,
    #[serde(default)]
    pub stake: StakeConfig,
    #[serde(default)]
    pub poisson: PoissonConfig,
    #[serde(default)]
    pub signals: SignalsConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Historical results source configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Season folders to concatenate, oldest first
    #[serde(default = "default_seasons")]
    pub seasons: Vec<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// How long a loaded league stays fresh
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
    #[serde(default = "default_leagues")]
    pub leagues: Vec<LeagueSpec>,
}

fn default_base_url() -> String {
    FOOTBALL_DATA_URL.to_string()
}
fn default_seasons() -> Vec<String> {
    vec!["2324".to_string(), "2425".to_string()]
}
fn default_timeout_secs() -> u64 {
    15
}
fn default_cache_ttl_secs() -> u64 {
    3600
}
fn default_leagues() -> Vec<LeagueSpec> {
    vec![
        LeagueSpec::new("La Liga", "SP1"),
        LeagueSpec::new("Premier League", "E0"),
    ]
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            seasons: default_seasons(),
            timeout_secs: default_timeout_secs(),
            cache_ttl_secs: default_cache_ttl_secs(),
            leagues: default_leagues(),
        }
    }
}

impl SourceConfig {
    /// Find a league by display name or provider code
    pub fn league(&self, key: &str) -> Result<&LeagueSpec, ConfigError> {
        self.leagues
            .iter()
            .find(|l| l.name.eq_ignore_ascii_case(key) || l.code.eq_ignore_ascii_case(key))
            .ok_or_else(|| ConfigError::UnknownLeague(key.to_string()))
    }

    pub fn football_data(&self) -> FootballDataConfig {
        FootballDataConfig {
            base_url: self.base_url.clone(),
            seasons: self.seasons.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }

    pub fn cache_ttl(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.cache_ttl_secs as i64)
    }
}

/// Rolling window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormConfig {
    #[serde(default = "default_window")]
    pub window: usize,
    #[serde(default = "default_min_required")]
    pub min_required: usize,
    /// Weight recent matches more heavily (off by default)
    #[serde(default)]
    pub weighted: bool,
}

fn default_window() -> usize {
    DEFAULT_WINDOW
}
fn default_min_required() -> usize {
    DEFAULT_MIN_REQUIRED
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            window: DEFAULT_WINDOW,
            min_required: DEFAULT_MIN_REQUIRED,
            weighted: false,
        }
    }
}

/// Referee card baseline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefereeConfig {
    /// Average used for unknown referees and as the zero point of the
    /// card adjustment
    #[serde(default = "default_referee_average")]
    pub default_average: f64,
}

fn default_referee_average() -> f64 {
    DEFAULT_REFEREE_AVERAGE
}

impl Default for RefereeConfig {
    fn default() -> Self {
        Self {
            default_average: DEFAULT_REFEREE_AVERAGE,
        }
    }
}

/// Stake sizing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StakeConfig {
    #[serde(default = "default_bankroll")]
    pub bankroll: Decimal,
    #[serde(default = "default_kelly_fraction")]
    pub kelly_fraction: f64,
    #[serde(default = "default_max_stake_pct")]
    pub max_stake_pct: Decimal,
    /// Odds assumed for rules that carry no payout of their own
    #[serde(default)]
    pub default_payout: Option<f64>,
}

fn default_bankroll() -> Decimal {
    Decimal::new(1000, 0)
}
fn default_kelly_fraction() -> f64 {
    DEFAULT_KELLY_FRACTION
}
fn default_max_stake_pct() -> Decimal {
    Decimal::new(5, 2) // 0.05 = 5%
}

impl Default for StakeConfig {
    fn default() -> Self {
        Self {
            bankroll: default_bankroll(),
            kelly_fraction: DEFAULT_KELLY_FRACTION,
            max_stake_pct: default_max_stake_pct(),
            default_payout: None,
        }
    }
}

/// Scoreline model configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoissonConfig {
    #[serde(default = "default_top_k")]
    pub top_k: usize,
    #[serde(default = "default_max_goals")]
    pub max_goals: u8,
}

fn default_top_k() -> usize {
    DEFAULT_TOP_K
}
fn default_max_goals() -> u8 {
    DEFAULT_MAX_GOALS
}

impl Default for PoissonConfig {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            max_goals: DEFAULT_MAX_GOALS,
        }
    }
}

/// Rule catalog overrides; the built-in catalogs are used when unset
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SignalsConfig {
    pub football_rules: Option<PathBuf>,
    pub basketball_rules: Option<PathBuf>,
}

/// Telemetry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub log_format: LogFormat,
    /// Serve Prometheus metrics on this port when set
    #[serde(default)]
    pub metrics_port: Option<u16>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: LogFormat::Pretty,
            metrics_port: None,
        }
    }
}

impl Config {
    /// Load and validate configuration from a TOML file
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings no analysis could run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.form.min_required == 0 || self.form.window < self.form.min_required {
            return Err(ConfigError::InvalidWindow {
                window: self.form.window,
                min_required: self.form.min_required,
            });
        }
        validate_referee_average(self.referee.default_average)?;

        let k = self.stake.kelly_fraction;
        if !(k > 0.0 && k <= 1.0) {
            return Err(ConfigError::KellyFractionOutOfRange(k));
        }
        let max = self.stake.max_stake_pct;
        if max <= Decimal::ZERO || max > Decimal::ONE {
            return Err(ConfigError::MaxStakeOutOfRange(max));
        }
        if self.stake.bankroll < Decimal::ZERO {
            return Err(ConfigError::NegativeBankroll(self.stake.bankroll));
        }
        if let Some(payout) = self.stake.default_payout {
            if !(payout > 1.0 && payout.is_finite()) {
                return Err(ConfigError::InvalidPayout(payout));
            }
        }
        if self.poisson.top_k == 0 {
            return Err(ConfigError::ZeroTopK);
        }
        if self.source.seasons.is_empty() {
            return Err(ConfigError::NoSeasons);
        }
        Ok(())
    }

    pub fn aggregator(&self) -> Result<FormAggregator, ConfigError> {
        FormAggregator::new(self.form.window, self.form.min_required).map_err(|e| {
            ConfigError::InvalidWindow {
                window: e.window,
                min_required: e.min_required,
            }
        })
    }

    pub fn predictor(&self) -> ScorelinePredictor {
        ScorelinePredictor::new(self.poisson.top_k, self.poisson.max_goals)
    }

    pub fn stake_sizer(&self) -> StakeSizer {
        StakeSizer::new(self.stake.kelly_fraction, self.stake.max_stake_pct)
    }

    /// Configured football catalog, or the built-in one
    pub fn football_catalog(&self) -> anyhow::Result<RuleCatalog> {
        match &self.signals.football_rules {
            Some(path) => RuleCatalog::load(path),
            None => Ok(RuleCatalog::football()),
        }
    }

    /// Configured basketball catalog, or the built-in one
    pub fn basketball_catalog(&self) -> anyhow::Result<RuleCatalog> {
        match &self.signals.basketball_rules {
            Some(path) => RuleCatalog::load(path),
            None => Ok(RuleCatalog::basketball()),
        }
    }
}

/// Check a referee card average entered by hand
pub fn validate_referee_average(average: f64) -> Result<f64, ConfigError> {
    if (0.0..=MAX_REFEREE_AVERAGE).contains(&average) {
        Ok(average)
    } else {
        Err(ConfigError::RefereeAverageOutOfRange(average))
    }
}

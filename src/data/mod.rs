//! Historical data module
//!
//! Match result loading, parsing and caching

mod cache;
mod nba;
mod results;
mod source;
mod table;
mod types;

pub use cache::{Clock, DatasetCache, ManualClock, SystemClock};
pub use nba::parse_ratings;
pub use results::{parse_date, parse_results, ParseError, ParsedResults};
pub use source::{
    CsvFileSource, FootballDataClient, FootballDataConfig, LeagueSpec, MatchSource, SourceError,
    FOOTBALL_DATA_URL,
};
pub use table::{CsvTable, Row};
pub use types::{Dataset, MatchStatLine};

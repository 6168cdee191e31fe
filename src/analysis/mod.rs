//! Analysis module
//!
//! Wires form, referee, signal, stake and scoreline components into one
//! matchup report

mod analyzer;
mod report;

pub use analyzer::{Analyzer, MatchupRequest};
pub use report::{AnalysisOutcome, MatchupReport, RatingsReport, ScorelineSummary};

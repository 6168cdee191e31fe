//! football-data.co.uk result file parsing

use super::table::{CsvTable, Row};
use super::{Dataset, MatchStatLine};
use chrono::NaiveDate;
use thiserror::Error;

/// Why a source row was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Date cell missing or not in a known format
    #[error("Invalid date: {0:?}")]
    InvalidDate(Option<String>),
    /// Required cell empty or missing
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
}

/// Outcome of parsing one result file
#[derive(Debug, Default)]
pub struct ParsedResults {
    /// Rows that parsed
    pub matches: Vec<MatchStatLine>,
    /// Rejected rows, with the 1-based data row number
    pub rejected: Vec<(usize, ParseError)>,
}

impl ParsedResults {
    /// Convert into a date-ordered dataset
    pub fn into_dataset(self) -> Dataset {
        Dataset::new(self.matches, self.rejected.len())
    }
}

/// Parse a result CSV, tagging every row with `league`
///
/// Malformed rows are collected in `rejected` and never abort the load.
pub fn parse_results(text: &str, league: &str) -> ParsedResults {
    let table = CsvTable::parse(text);
    let mut parsed = ParsedResults::default();

    for (i, row) in table.rows().enumerate() {
        match parse_row(&row, league) {
            Ok(line) => parsed.matches.push(line),
            Err(e) => parsed.rejected.push((i + 1, e)),
        }
    }

    metrics::counter!("formsignals_rows_parsed_total").increment(parsed.matches.len() as u64);
    metrics::counter!("formsignals_rows_dropped_total").increment(parsed.rejected.len() as u64);

    if !parsed.rejected.is_empty() {
        tracing::debug!(
            league = league,
            dropped = parsed.rejected.len(),
            kept = parsed.matches.len(),
            "Dropped malformed result rows"
        );
    }

    parsed
}

fn parse_row(row: &Row<'_>, league: &str) -> Result<MatchStatLine, ParseError> {
    let date_cell = row.get("Date");
    let date = date_cell
        .and_then(parse_date)
        .ok_or_else(|| ParseError::InvalidDate(date_cell.map(str::to_string)))?;

    let home_team = row.get("HomeTeam").ok_or(ParseError::MissingField("HomeTeam"))?;
    let away_team = row.get("AwayTeam").ok_or(ParseError::MissingField("AwayTeam"))?;
    let home_goals = row.count("FTHG").ok_or(ParseError::MissingField("FTHG"))?;
    let away_goals = row.count("FTAG").ok_or(ParseError::MissingField("FTAG"))?;

    Ok(MatchStatLine {
        date,
        league: league.to_string(),
        home_team: home_team.to_string(),
        away_team: away_team.to_string(),
        home_goals,
        away_goals,
        home_ht_goals: row.count("HTHG"),
        away_ht_goals: row.count("HTAG"),
        home_shots_on_target: row.count("HST"),
        away_shots_on_target: row.count("AST"),
        home_fouls: row.count("HF"),
        away_fouls: row.count("AF"),
        home_corners: row.count("HC"),
        away_corners: row.count("AC"),
        home_yellow: row.count("HY"),
        away_yellow: row.count("AY"),
        home_red: row.count("HR"),
        away_red: row.count("AR"),
        referee: row.get("Referee").map(str::to_string),
    })
}

/// Day-first dates, two or four digit years, with an ISO fallback
///
/// `%Y` also accepts two digits (`24` as year 24), so the two-digit form
/// is tried first; it rejects four-digit years as trailing input.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    ["%d/%m/%y", "%d/%m/%Y", "%Y-%m-%d"]
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value.trim(), fmt).ok())
}

//! Basketball team ratings table parsing
//!
//! Expects a basketball-reference style advanced table with `Team, W, L,
//! ORtg, DRtg, NRtg, MOV` columns. Pasted tables repeat their header row
//! every few lines (`Rk` in the rank column); those rows are skipped.

use super::table::{CsvTable, Row};
use super::ParseError;
use crate::form::TeamRatings;

/// Parse a ratings table; rows missing a rating are rejected
pub fn parse_ratings(text: &str) -> (Vec<TeamRatings>, Vec<(usize, ParseError)>) {
    let table = CsvTable::parse(text);
    let mut ratings = Vec::new();
    let mut rejected = Vec::new();

    for (i, row) in table.rows().enumerate() {
        if row.get("Rk") == Some("Rk") {
            continue;
        }
        match parse_row(&row) {
            Ok(r) => ratings.push(r),
            Err(e) => rejected.push((i + 1, e)),
        }
    }

    tracing::debug!(
        teams = ratings.len(),
        dropped = rejected.len(),
        "Parsed team ratings table"
    );

    (ratings, rejected)
}

fn parse_row(row: &Row<'_>) -> Result<TeamRatings, ParseError> {
    // basketball-reference marks playoff teams with a trailing asterisk
    let team = row
        .get("Team")
        .map(|t| t.trim_end_matches('*').trim().to_string())
        .ok_or(ParseError::MissingField("Team"))?;
    let wins = row.count("W").ok_or(ParseError::MissingField("W"))?;
    let losses = row.count("L").ok_or(ParseError::MissingField("L"))?;
    let offensive_rating = row.number("ORtg").ok_or(ParseError::MissingField("ORtg"))?;
    let defensive_rating = row.number("DRtg").ok_or(ParseError::MissingField("DRtg"))?;
    let net_rating = row
        .number("NRtg")
        .unwrap_or(offensive_rating - defensive_rating);
    let margin_of_victory = row.number("MOV").ok_or(ParseError::MissingField("MOV"))?;

    Ok(TeamRatings {
        team,
        wins,
        losses,
        offensive_rating,
        defensive_rating,
        net_rating,
        margin_of_victory,
    })
}

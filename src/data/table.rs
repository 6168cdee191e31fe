//! Header-indexed CSV table reader
//!
//! Result files from football-data.co.uk and the basketball-reference team
//! tables are plain comma-separated text with a header row. Fields may be
//! double-quoted; embedded newlines are not supported.

use std::collections::HashMap;

/// Parsed CSV text with columns addressable by header name
#[derive(Debug, Clone)]
pub struct CsvTable {
    columns: HashMap<String, usize>,
    rows: Vec<Vec<String>>,
}

impl CsvTable {
    /// Parse CSV text; the first non-empty line is the header
    pub fn parse(text: &str) -> Self {
        let mut lines = text
            .lines()
            .map(|l| l.trim_end_matches('\r'))
            .filter(|l| !l.trim().is_empty());

        let columns = lines
            .next()
            .map(|header| {
                split_record(header.trim_start_matches('\u{feff}'))
                    .into_iter()
                    .enumerate()
                    .map(|(i, name)| (name.trim().to_string(), i))
                    .collect()
            })
            .unwrap_or_default();

        let rows = lines.map(split_record).collect();

        Self { columns, rows }
    }

    /// Whether the header declares the column
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    /// Number of data rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterate data rows
    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        self.rows.iter().map(move |fields| Row {
            columns: &self.columns,
            fields,
        })
    }
}

/// A single data row
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    columns: &'a HashMap<String, usize>,
    fields: &'a [String],
}

impl<'a> Row<'a> {
    /// Trimmed field value; `None` for absent columns and empty cells
    pub fn get(&self, column: &str) -> Option<&'a str> {
        let idx = *self.columns.get(column)?;
        let value = self.fields.get(idx)?.trim();
        if value.is_empty() || value.eq_ignore_ascii_case("nan") {
            None
        } else {
            Some(value)
        }
    }

    /// Numeric field, `None` when absent or not a number
    pub fn number(&self, column: &str) -> Option<f64> {
        self.get(column)
            .and_then(|v| v.parse::<f64>().ok())
            .filter(|v| v.is_finite())
    }

    /// Non-negative count field, `None` when absent or not a count
    pub fn count(&self, column: &str) -> Option<u16> {
        let value = self.number(column)?;
        if value < 0.0 || value > u16::MAX as f64 {
            return None;
        }
        Some(value.round() as u16)
    }
}

/// Split one CSV record honouring double quotes
fn split_record(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    fields.push(current);
    fields
}

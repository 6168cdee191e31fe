//! Description templates
//!
//! `{name}` prints a value with two decimals, `{name:.N}` with N decimals and
//! `{name:%}` as a whole percentage. Text outside braces is copied verbatim.

use std::collections::BTreeMap;

/// Names referenced by a template, in order of appearance
pub fn placeholders(template: &str) -> Vec<String> {
    segments(template)
        .into_iter()
        .filter_map(|s| match s {
            Segment::Placeholder { name, .. } => Some(name.to_string()),
            Segment::Text(_) => None,
        })
        .collect()
}

/// Substitute computed values into a template
///
/// Unknown names are left in place unchanged.
pub fn render(template: &str, values: &BTreeMap<String, f64>) -> String {
    let mut out = String::with_capacity(template.len());
    for segment in segments(template) {
        match segment {
            Segment::Text(t) => out.push_str(t),
            Segment::Placeholder { raw, name, format } => match values.get(name) {
                Some(v) => out.push_str(&format.apply(*v)),
                None => out.push_str(raw),
            },
        }
    }
    out
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Format {
    Decimals(usize),
    Percent,
}

impl Format {
    fn parse(spec: Option<&str>) -> Self {
        match spec {
            Some("%") => Format::Percent,
            Some(s) => s
                .strip_prefix('.')
                .and_then(|d| d.parse().ok())
                .map(Format::Decimals)
                .unwrap_or(Format::Decimals(2)),
            None => Format::Decimals(2),
        }
    }

    fn apply(&self, value: f64) -> String {
        match self {
            Format::Decimals(d) => format!("{:.*}", d, value),
            Format::Percent => format!("{:.0}%", value * 100.0),
        }
    }
}

#[derive(Debug)]
enum Segment<'a> {
    Text(&'a str),
    Placeholder {
        raw: &'a str,
        name: &'a str,
        format: Format,
    },
}

fn segments(template: &str) -> Vec<Segment<'_>> {
    let mut out = Vec::new();
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        let Some(close) = rest[open..].find('}').map(|c| open + c) else {
            break;
        };
        if open > 0 {
            out.push(Segment::Text(&rest[..open]));
        }
        let inner = &rest[open + 1..close];
        let (name, spec) = match inner.split_once(':') {
            Some((n, s)) => (n.trim(), Some(s.trim())),
            None => (inner.trim(), None),
        };
        out.push(Segment::Placeholder {
            raw: &rest[open..=close],
            name,
            format: Format::parse(spec),
        });
        rest = &rest[close + 1..];
    }
    if !rest.is_empty() {
        out.push(Segment::Text(rest));
    }
    out
}

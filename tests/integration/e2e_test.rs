//! End-to-end integration tests

use chrono::{Duration, NaiveDate};
use form_signals::analysis::{AnalysisOutcome, Analyzer, MatchupReport, MatchupRequest};
use form_signals::config::Config;
use form_signals::data::{parse_results, Dataset};
use form_signals::model::ScorelinePredictor;
use form_signals::risk::StakeSizer;
use rust_decimal_macros::dec;

const HEADER: &str = "Div,Date,HomeTeam,AwayTeam,FTHG,FTAG,HTHG,HTAG,HF,AF,HY,AY,HR,AR,Referee";

/// Per-match figures for one CSV row
#[derive(Clone, Copy, Default)]
struct Stats {
    hg: u16,
    ag: u16,
    hf: u16,
    af: u16,
    hy: u16,
    ay: u16,
}

fn line(day: i64, home: &str, away: &str, s: Stats) -> String {
    let date = NaiveDate::from_ymd_opt(2024, 8, 10).unwrap() + Duration::days(day);
    format!(
        "SP1,{},{},{},{},{},0,0,{},{},{},{},0,0,M. Ref",
        date.format("%d/%m/%Y"),
        home,
        away,
        s.hg,
        s.ag,
        s.hf,
        s.af,
        s.hy,
        s.ay
    )
}

fn load(lines: Vec<String>) -> Dataset {
    let mut text = String::from(HEADER);
    for l in lines {
        text.push('\n');
        text.push_str(&l);
    }
    parse_results(&text, "La Liga").into_dataset()
}

fn report(outcome: &AnalysisOutcome) -> &MatchupReport {
    outcome
        .report()
        .unwrap_or_else(|| panic!("analysis not ready: {:?}", outcome.reason()))
}

fn labels(report: &MatchupReport) -> Vec<&str> {
    report.signals.iter().map(|s| s.label.as_str()).collect()
}

/// `home` plays ten home games, `away` ten away games, against fillers
fn two_teams(home: &str, home_stats: impl Fn(i64) -> Stats, away: &str, away_stats: impl Fn(i64) -> Stats) -> Dataset {
    let mut lines = Vec::new();
    for i in 0..10 {
        lines.push(line(2 * i, home, &format!("Visitor {}", i), home_stats(i)));
        lines.push(line(2 * i + 1, &format!("Host {}", i), away, away_stats(i)));
    }
    load(lines)
}

#[test]
fn test_config_example_loads() {
    let config: Config = toml::from_str(include_str!("../../config.toml.example")).unwrap();
    config.validate().unwrap();
    assert_eq!(config.form.window, 10);
    assert_eq!(config.source.league("E0").unwrap().name, "Premier League");
}

#[test]
fn test_aggressive_fouling_against_tight_defence() {
    let dataset = two_teams(
        "Getafe",
        |_| Stats { hg: 1, ag: 1, hf: 12, af: 9, ..Default::default() },
        "Girona",
        |_| Stats { hg: 1, ag: 1, hf: 9, af: 9, ..Default::default() },
    );

    let outcome = Analyzer::default().analyze(&dataset, &MatchupRequest::new("La Liga", "Getafe", "Girona"));
    let report = report(&outcome);
    assert_eq!(report.home.fouls_for, 12.0);
    assert_eq!(report.away.goals_against, 1.0);

    let signal = report
        .signals
        .iter()
        .find(|s| s.label == "Visitor shots on target")
        .unwrap();
    assert_eq!(signal.confidence, 78);
}

#[test]
fn test_both_teams_to_score_threshold() {
    // both sides score in 7 of 10 matches
    let btts = |i: i64| Stats { hg: 1, ag: if i < 7 { 1 } else { 0 }, ..Default::default() };
    let dataset = two_teams("Betis", btts, "Osasuna", |i| Stats { hg: if i < 7 { 2 } else { 0 }, ag: 1, ..Default::default() });

    let analyzer = Analyzer::default();
    let request = MatchupRequest::new("La Liga", "Betis", "Osasuna");
    let outcome = analyzer.analyze(&dataset, &request);
    let r = report(&outcome);
    assert!((r.home.both_scored_rate - 0.7).abs() < 1e-12);
    assert!((r.away.both_scored_rate - 0.7).abs() < 1e-12);
    assert!(labels(r).contains(&"Both teams to score: yes"));

    // the visitor now only shares the scoresheet half the time
    let dataset = two_teams("Betis", btts, "Osasuna", |i| Stats { hg: if i < 5 { 2 } else { 0 }, ag: 1, ..Default::default() });
    let outcome = analyzer.analyze(&dataset, &request);
    let r = report(&outcome);
    assert!((r.away.both_scored_rate - 0.5).abs() < 1e-12);
    assert!(!labels(r).contains(&"Both teams to score: yes"));
}

#[test]
fn test_scoreline_matches_reference_table() {
    fn pmf(lambda: f64, k: i32) -> f64 {
        let factorial: f64 = (1..=k).map(|n| n as f64).product();
        lambda.powi(k) * (-lambda).exp() / factorial
    }

    let top = ScorelinePredictor::default().predict(1.5, 1.1);

    let mut reference = Vec::new();
    for h in 0..=6 {
        for a in 0..=6 {
            reference.push(((h, a), pmf(1.5, h) * pmf(1.1, a)));
        }
    }
    // the model renormalises over the 7x7 grid of exact scores
    let in_grid: f64 = reference.iter().map(|(_, p)| p).sum();
    reference.sort_by(|x, y| y.1.total_cmp(&x.1));
    let ((h, a), p) = reference[0];

    assert!(h == 1 && (a == 0 || a == 1));
    assert_eq!((top[0].home_goals as i32, top[0].away_goals as i32), (h, a));
    assert!((top[0].probability - p / in_grid).abs() < 1e-12);
}

#[test]
fn test_referee_override_shifts_card_projection() {
    let dataset = two_teams(
        "Mallorca",
        |_| Stats { hg: 1, ag: 0, hy: 2, ay: 1, ..Default::default() },
        "Alaves",
        |_| Stats { hg: 0, ag: 1, hy: 2, ay: 1, ..Default::default() },
    );
    let analyzer = Analyzer::default();
    let mut request = MatchupRequest::new("La Liga", "Mallorca", "Alaves");

    request.referee_override = Some(4.0);
    let outcome = analyzer.analyze(&dataset, &request);
    let neutral = report(&outcome);
    let under = neutral.signals.iter().find(|s| s.label == "Under 3.5 cards").unwrap();
    assert_eq!(under.values["cards"], 3.0);
    assert!(!labels(neutral).contains(&"Over 4.5 cards"));

    request.referee_override = Some(6.0);
    let outcome = analyzer.analyze(&dataset, &request);
    let strict = report(&outcome);
    let over = strict.signals.iter().find(|s| s.label == "Over 4.5 cards").unwrap();
    assert_eq!(over.values["cards"] - under.values["cards"], 2.0);
    assert!(!labels(strict).contains(&"Under 3.5 cards"));
}

#[test]
fn test_short_history_and_missing_team() {
    let mut lines: Vec<String> = (0..10)
        .map(|i| line(i, "Valencia", &format!("Visitor {}", i), Stats { hg: 1, ag: 1, ..Default::default() }))
        .collect();
    lines.extend((0..4).map(|i| line(20 + i, "Leganes", &format!("Visitor {}", i), Stats::default())));
    let dataset = load(lines);
    let analyzer = Analyzer::default();

    let outcome = analyzer.analyze(&dataset, &MatchupRequest::new("La Liga", "Valencia", "Leganes"));
    assert_eq!(
        outcome,
        AnalysisOutcome::InsufficientData {
            team: "Leganes".to_string(),
            available: 4,
            required: 5
        }
    );

    let outcome = analyzer.analyze(&dataset, &MatchupRequest::new("La Liga", "Valencia", "Espanyol"));
    assert_eq!(
        outcome,
        AnalysisOutcome::UnknownTeam {
            team: "Espanyol".to_string()
        }
    );
}

#[test]
fn test_malformed_rows_dropped_not_fatal() {
    let mut lines: Vec<String> = (0..6)
        .map(|i| line(i, "Sevilla", &format!("Visitor {}", i), Stats { hg: 2, ag: 0, ..Default::default() }))
        .collect();
    lines.push("SP1,not a date,Sevilla,Visitor 9,1,0,0,0,0,0,0,0,0,0,M. Ref".to_string());
    lines.push("SP1,01/02/2025,Sevilla,Visitor 10,,0,0,0,0,0,0,0,0,0,M. Ref".to_string());
    let dataset = load(lines);

    assert_eq!(dataset.len(), 6);
    assert_eq!(dataset.dropped(), 2);
    let outcome = Analyzer::default().analyze(&dataset, &MatchupRequest::new("La Liga", "Sevilla", "Visitor 0"));
    // the opponent played once
    assert!(matches!(outcome, AnalysisOutcome::InsufficientData { available: 1, .. }));
}

#[test]
fn test_analysis_is_repeatable_with_stakes() {
    let dataset = two_teams(
        "Villarreal",
        |i| Stats { hg: 2, ag: (i % 2) as u16, hf: 11, af: 10, hy: 3, ay: 2 },
        "Celta",
        |i| Stats { hg: 2, ag: (i % 3) as u16, hf: 10, af: 11, hy: 2, ay: 3 },
    );
    let analyzer = Analyzer::default().with_stakes(StakeSizer::default(), dec!(500), None);
    let request = MatchupRequest::new("La Liga", "Villarreal", "Celta");

    let first = serde_json::to_string(&analyzer.analyze(&dataset, &request)).unwrap();
    let second = serde_json::to_string(&analyzer.analyze(&dataset, &request)).unwrap();
    assert_eq!(first, second);

    let outcome = analyzer.analyze(&dataset, &request);
    for signal in &report(&outcome).signals {
        // only rules with their own payout get a stake when no default is set
        assert_eq!(signal.stake.is_some(), signal.payout.is_some());
        if let Some(stake) = &signal.stake {
            assert!(stake.amount <= dec!(25));
        }
    }
}

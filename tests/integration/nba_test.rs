//! Basketball ratings integration tests

use form_signals::analysis::{AnalysisOutcome, Analyzer};
use form_signals::data::parse_ratings;

const RATINGS: &str = "\
Rk,Team,Age,W,L,PW,PL,MOV,SOS,SRS,ORtg,DRtg,NRtg
1,Oklahoma City Thunder*,25.2,68,14,67,15,12.9,-0.3,12.7,119.2,106.6,12.6
2,Cleveland Cavaliers*,26.8,64,18,61,21,9.5,-0.4,9.1,121.0,111.8,9.2
3,Milwaukee Bucks*,29.9,48,34,44,38,1.8,-0.3,1.5,115.4,113.7,1.7
Rk,Team,Age,W,L,PW,PL,MOV,SOS,SRS,ORtg,DRtg,NRtg
4,Utah Jazz,24.9,17,65,17,65,-11.3,0.4,-10.9,111.3,122.6,-11.3
5,Orlando Magic*,25.4,41,41,41,41,-0.1,0.0,-0.1,108.9,109.0,-0.1
6,Miami Heat*,27.3,37,45,39,43,-0.5,0.1,-0.4,110.6,110.9,-0.3
";

#[test]
fn test_repeated_headers_and_playoff_marks() {
    let (ratings, rejected) = parse_ratings(RATINGS);
    assert!(rejected.is_empty());
    assert_eq!(ratings.len(), 6);
    assert_eq!(ratings[0].team, "Oklahoma City Thunder");
    assert_eq!(ratings[3].wins, 17);
}

#[test]
fn test_mismatch_fires_blowout_and_glass_cannon() {
    let (ratings, _) = parse_ratings(RATINGS);
    let outcome = Analyzer::default().analyze_ratings(&ratings, "Cleveland Cavaliers", "Utah Jazz");
    let report = outcome.report().unwrap();
    let labels: Vec<_> = report.signals.iter().map(|s| s.label.as_str()).collect();

    // 121.0 >= 118 vs 122.6 >= 116, and a net rating gap of 20.5
    assert_eq!(labels, vec!["Glass cannon (home)", "Blowout"]);
    assert_eq!(report.signals[1].confidence, 90);
}

#[test]
fn test_defensive_grind() {
    let (ratings, _) = parse_ratings(RATINGS);
    let outcome = Analyzer::default().analyze_ratings(&ratings, "Orlando Magic", "Miami Heat");
    let report = outcome.report().unwrap();
    let labels: Vec<_> = report.signals.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(labels, vec!["Defensive grind"]);
}

#[test]
fn test_unknown_team() {
    let (ratings, _) = parse_ratings(RATINGS);
    let outcome = Analyzer::default().analyze_ratings(&ratings, "Seattle SuperSonics", "Utah Jazz");
    assert_eq!(
        outcome,
        AnalysisOutcome::UnknownTeam {
            team: "Seattle SuperSonics".to_string()
        }
    );
}

//! Results source and cache integration tests

use chrono::{Duration, TimeZone, Utc};
use form_signals::analysis::{AnalysisOutcome, Analyzer, MatchupRequest};
use form_signals::data::{
    CsvFileSource, DatasetCache, FootballDataClient, FootballDataConfig, LeagueSpec, ManualClock,
    MatchSource,
};
use std::io::Write;
use std::sync::Arc;

fn results_file() -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "Div,Date,HomeTeam,AwayTeam,FTHG,FTAG,HY,AY,Referee").unwrap();
    for i in 0..6 {
        writeln!(file, "E0,{:02}/09/2024,Arsenal,Team {},2,1,1,2,A. Taylor", i + 1, i).unwrap();
        writeln!(file, "E0,{:02}/10/2024,Team {},Chelsea,0,1,2,2,M. Oliver", i + 1, i).unwrap();
    }
    file
}

#[tokio::test]
async fn test_file_source_through_analyzer() {
    let file = results_file();
    let source = CsvFileSource::new(file.path());
    let league = LeagueSpec::new("Premier League", "E0");
    let cache = DatasetCache::new(Duration::hours(1));

    let mut request = MatchupRequest::new("Premier League", "Arsenal", "Chelsea");
    request.referee = Some("M. Oliver".to_string());

    let outcome = Analyzer::default()
        .analyze_league(&cache, &source, &league, &request)
        .await;
    let report = outcome.report().unwrap();
    assert_eq!(report.home.matches, 6);
    assert_eq!(report.away.goals_against, 0.0);
    assert_eq!(report.referee.average(), 4.0);
}

#[tokio::test]
async fn test_missing_file_is_source_unavailable() {
    let source = CsvFileSource::new("/nonexistent/results.csv");
    let league = LeagueSpec::new("Premier League", "E0");
    let cache = DatasetCache::new(Duration::hours(1));

    let outcome = Analyzer::default()
        .analyze_league(
            &cache,
            &source,
            &league,
            &MatchupRequest::new("Premier League", "Arsenal", "Chelsea"),
        )
        .await;
    assert!(matches!(
        outcome,
        AnalysisOutcome::SourceUnavailable { ref league, .. } if league == "Premier League"
    ));
}

#[tokio::test]
async fn test_unreachable_provider_is_source_unavailable() {
    let client = FootballDataClient::with_config(FootballDataConfig {
        base_url: "http://127.0.0.1:9".to_string(),
        seasons: vec!["2425".to_string()],
        timeout: std::time::Duration::from_millis(500),
    })
    .unwrap();
    let league = LeagueSpec::new("La Liga", "SP1");
    assert!(client.fetch(&league).await.is_err());

    let cache = DatasetCache::new(Duration::hours(1));
    let outcome = Analyzer::default()
        .analyze_league(
            &cache,
            &client,
            &league,
            &MatchupRequest::new("La Liga", "Sevilla", "Getafe"),
        )
        .await;
    assert!(matches!(outcome, AnalysisOutcome::SourceUnavailable { .. }));
    assert!(outcome.reason().unwrap().contains("La Liga"));
}

#[tokio::test]
async fn test_cache_serves_stale_file_until_expiry() {
    let file = results_file();
    let source = CsvFileSource::new(file.path());
    let league = LeagueSpec::new("Premier League", "E0");
    let clock = Arc::new(ManualClock::new(Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap()));
    let cache = DatasetCache::with_clock(Duration::minutes(30), clock.clone());

    let first = cache.get_or_load(&league, &source).await.unwrap();
    assert_eq!(first.len(), 12);

    // a later edit is not visible inside the TTL
    let mut handle = file.reopen().unwrap();
    handle.set_len(0).unwrap();
    writeln!(handle, "Div,Date,HomeTeam,AwayTeam,FTHG,FTAG").unwrap();
    writeln!(handle, "E0,01/11/2024,Arsenal,Chelsea,1,1").unwrap();

    clock.advance(Duration::minutes(10));
    assert_eq!(cache.get_or_load(&league, &source).await.unwrap().len(), 12);

    clock.advance(Duration::minutes(25));
    assert_eq!(cache.get_or_load(&league, &source).await.unwrap().len(), 1);
}

use std::cell::Cell;
use std::path::PathBuf;
use std::time::Duration;

use nfl_schedule::config::{PipelineConfig, ProviderConfig};
use nfl_schedule::{
    FetchError, GameRecord, NflverseProvider, Outcome, PipelineError, ScheduleProvider,
    SeasonSchedule, Week, run,
};

fn config(week: Week) -> PipelineConfig {
    PipelineConfig {
        season: 2025,
        week,
        provider: ProviderConfig {
            retry_backoff: Duration::ZERO,
            ..ProviderConfig::default()
        },
    }
}

fn schedule() -> SeasonSchedule {
    SeasonSchedule::new(
        2025,
        vec![
            GameRecord::new(2025, 1, "2025-09-04", "DAL", "PHI"),
            GameRecord::new(2025, 2, "2025-09-14", "SF", "NO"),
            GameRecord::new(2025, 3, "2025-09-21", "SEA", "SF"),
        ],
    )
}

/// Replays a scripted list of results, one per call; the last one repeats.
struct ScriptedProvider {
    results: Vec<Result<SeasonSchedule, FetchError>>,
    calls: Cell<usize>,
}

impl ScriptedProvider {
    fn new(results: Vec<Result<SeasonSchedule, FetchError>>) -> Self {
        Self {
            results,
            calls: Cell::new(0),
        }
    }
}

impl ScheduleProvider for ScriptedProvider {
    fn fetch_schedule(&self, _season: i32) -> Result<SeasonSchedule, FetchError> {
        let n = self.calls.get();
        self.calls.set(n + 1);
        let idx = n.min(self.results.len() - 1);
        self.results[idx].clone()
    }
}

#[test]
fn week_three_report_end_to_end() {
    let provider = ScriptedProvider::new(vec![Ok(schedule())]);
    let outcome = run(&provider, &config(Week::Number(3))).expect("pipeline succeeds");
    assert!(outcome.has_games());
    let text = outcome.report().render_text();
    assert!(text.contains("2025-09-21 (Sun)\nSEA @ SF\n"));
    assert_eq!(provider.calls.get(), 1);
}

#[test]
fn empty_week_is_a_success() {
    let provider = ScriptedProvider::new(vec![Ok(schedule())]);
    let outcome = run(&provider, &config(Week::Number(12))).expect("pipeline succeeds");
    assert!(matches!(outcome, Outcome::NoGames(_)));
    let text = outcome.report().render_text();
    assert!(text.starts_with("Season 2025, week 12: 0 game(s)\n\n"));
    assert!(text.contains("No games found."));
}

#[test]
fn connectivity_error_is_unavailable_and_retried_once() {
    let provider = ScriptedProvider::new(vec![Err(FetchError::unavailable("connection refused"))]);
    let err = run(&provider, &config(Week::Number(3))).expect_err("fetch must fail");
    match &err {
        PipelineError::Fetch { season, source } => {
            assert_eq!(*season, 2025);
            assert!(source.is_unavailable());
        }
        other => panic!("expected fetch failure, got {other:?}"),
    }
    assert_eq!(err.stage(), "fetch");
    assert_eq!(provider.calls.get(), 2);
}

#[test]
fn transient_failure_then_success_produces_report() {
    let provider = ScriptedProvider::new(vec![
        Err(FetchError::unavailable("timed out")),
        Ok(schedule()),
    ]);
    let outcome = run(&provider, &config(Week::Number(3))).expect("retry recovers");
    assert_eq!(outcome.report().games.len(), 1);
    assert_eq!(provider.calls.get(), 2);
}

#[test]
fn malformed_payload_is_not_retried() {
    let provider = ScriptedProvider::new(vec![Err(FetchError::malformed("bad parquet footer"))]);
    let err = run(&provider, &config(Week::Number(3))).expect_err("fetch must fail");
    assert!(matches!(
        err,
        PipelineError::Fetch {
            source: FetchError::MalformedPayload { .. },
            ..
        }
    ));
    assert_eq!(provider.calls.get(), 1);
}

#[test]
fn provider_error_is_not_retried() {
    let provider = ScriptedProvider::new(vec![Err(FetchError::Provider {
        status: 404,
        message: "Not Found".to_string(),
    })]);
    let err = run(&provider, &config(Week::Number(3))).expect_err("fetch must fail");
    assert!(err.to_string().contains("Not Found"));
    assert_eq!(provider.calls.get(), 1);
}

#[test]
fn missing_week_column_stops_before_filtering() {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("schedule_missing_week.json");
    let mut cfg = config(Week::Number(3));
    cfg.provider.schedule_source = path.display().to_string();
    let provider = NflverseProvider::new(cfg.provider.clone());

    let err = run(&provider, &cfg).expect_err("validation must fail");
    match err {
        PipelineError::Validate { source, .. } => assert_eq!(source.field(), Some("week")),
        other => panic!("expected validate failure, got {other:?}"),
    }
}

#[test]
fn local_fixture_runs_whole_pipeline() {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("schedule_multi_season.json");
    let mut cfg = config(Week::Number(3));
    cfg.provider.schedule_source = path.display().to_string();
    let provider = NflverseProvider::new(cfg.provider.clone());

    let outcome = run(&provider, &cfg).expect("pipeline succeeds");
    let games = &outcome.report().games;
    assert_eq!(games.len(), 2);
    assert_eq!(games[0].away_team, "SEA");
    assert_eq!(games[1].away_team, "GB");
}

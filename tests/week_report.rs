use nfl_schedule::report::NO_GAMES_LINE;
use nfl_schedule::{GameRecord, SeasonSchedule, ValidationError, Week, WeekReport};
use nfl_schedule::{filter_week, render, validate};

fn game(id: &str, week: u32, date: &str, away: &str, home: &str) -> GameRecord {
    GameRecord {
        game_id: Some(id.to_string()),
        ..GameRecord::new(2025, week, date, away, home)
    }
}

fn three_game_schedule() -> SeasonSchedule {
    SeasonSchedule::new(
        2025,
        vec![
            game("2025_01_DAL_PHI", 1, "2025-09-04", "DAL", "PHI"),
            game("2025_02_SF_NO", 2, "2025-09-14", "SF", "NO"),
            game("2025_03_SEA_SF", 3, "2025-09-21", "SEA", "SF"),
        ],
    )
}

#[test]
fn week_three_yields_the_single_matchup() {
    let schedule = three_game_schedule();
    validate(&schedule).expect("fixture is valid");

    let games = filter_week(&schedule, &Week::Number(3));
    assert_eq!(games.len(), 1);
    assert_eq!(games[0].away_team.as_deref(), Some("SEA"));
    assert_eq!(games[0].home_team.as_deref(), Some("SF"));

    let text = render(&games);
    let lines = text.lines().collect::<Vec<_>>();
    let idx = lines
        .iter()
        .position(|l| *l == "SEA @ SF")
        .expect("matchup line present");
    assert!(idx > 0);
    assert!(lines[idx - 1].starts_with("2025-09-21"));
}

#[test]
fn filter_preserves_schedule_order() {
    let schedule = SeasonSchedule::new(
        2025,
        vec![
            game("a", 3, "2025-09-21", "SEA", "SF"),
            game("b", 1, "2025-09-07", "KC", "LAC"),
            game("c", 3, "2025-09-18", "MIA", "BUF"),
            game("d", 2, "2025-09-14", "NYG", "DAL"),
            game("e", 3, "2025-09-22", "DET", "BAL"),
        ],
    );
    let ids = filter_week(&schedule, &Week::Number(3))
        .into_iter()
        .filter_map(|g| g.game_id)
        .collect::<Vec<_>>();
    assert_eq!(ids, vec!["a", "c", "e"]);
}

#[test]
fn filter_keeps_duplicate_rows() {
    let dup = game("2025_03_SEA_SF", 3, "2025-09-21", "SEA", "SF");
    let schedule = SeasonSchedule::new(2025, vec![dup.clone(), dup]);
    assert_eq!(filter_week(&schedule, &Week::Number(3)).len(), 2);
}

#[test]
fn filter_matches_named_postseason_weeks() {
    let mut wild_card = game("2025_19_LAC_HOU", 1, "2026-01-10", "LAC", "HOU");
    wild_card.week = Some(Week::Named("WC".to_string()));
    let schedule = SeasonSchedule::new(2025, vec![wild_card, three_game_schedule().games[0].clone()]);
    let games = filter_week(&schedule, &Week::Named("WC".to_string()));
    assert_eq!(games.len(), 1);
    assert_eq!(games[0].home_team.as_deref(), Some("HOU"));
}

#[test]
fn no_matching_week_renders_explicit_empty_report() {
    let schedule = three_game_schedule();
    let games = filter_week(&schedule, &Week::Number(17));
    assert!(games.is_empty());

    let text = render(&games);
    assert!(!text.is_empty());
    assert_eq!(text.trim(), NO_GAMES_LINE);
}

#[test]
fn week_report_text_has_header_and_blocks() {
    let schedule = three_game_schedule();
    let games = filter_week(&schedule, &Week::Number(3));
    let report = WeekReport::new(2025, Week::Number(3), &games);
    let text = report.render_text();
    assert_eq!(
        text,
        "Season 2025, week 3: 1 game(s)\n\n2025-09-21 (Sun)\nSEA @ SF\n"
    );
}

#[test]
fn blocks_follow_input_order() {
    let games = vec![
        game("x", 3, "2025-09-21", "SEA", "SF"),
        game("y", 3, "2025-09-18", "MIA", "BUF"),
    ];
    let text = render(&games);
    assert_eq!(
        text,
        "2025-09-21 (Sun)\nSEA @ SF\n\n2025-09-18 (Thu)\nMIA @ BUF\n"
    );
}

#[test]
fn week_report_json_carries_games() {
    let schedule = three_game_schedule();
    let games = filter_week(&schedule, &Week::Number(3));
    let report = WeekReport::new(2025, Week::Number(3), &games);
    let json = report.render_json().expect("serializable");
    let v: serde_json::Value = serde_json::from_str(&json).expect("valid json");
    assert_eq!(v["season"], 2025);
    assert_eq!(v["week"], 3);
    assert_eq!(v["games"][0]["away_team"], "SEA");
    assert_eq!(v["games"][0]["home_team"], "SF");
    assert_eq!(v["games"][0]["weekday"], "Sun");
}

#[test]
fn validate_rejects_missing_home_team() {
    let mut schedule = three_game_schedule();
    schedule.games[1].home_team = None;
    let err = validate(&schedule).expect_err("home team is required");
    assert_eq!(
        err,
        ValidationError::MissingField {
            field: "home_team",
            row: Some(1),
            game_id: Some("2025_02_SF_NO".to_string()),
        }
    );
    assert_eq!(err.field(), Some("home_team"));
}

#[test]
fn validate_accepts_zero_rows() {
    let schedule = SeasonSchedule::new(2025, Vec::new());
    assert!(validate(&schedule).is_ok());
}

#[test]
fn validate_rejects_same_home_and_away() {
    let schedule = SeasonSchedule::new(2025, vec![game("bad", 3, "2025-09-21", "SF", "SF")]);
    let err = validate(&schedule).expect_err("a team cannot host itself");
    assert!(matches!(err, ValidationError::SameTeam { row: 0, .. }));
}

#[test]
fn validate_reports_missing_column_on_empty_table() {
    let schedule = SeasonSchedule {
        season: 2025,
        columns: vec![
            "season".to_string(),
            "gameday".to_string(),
            "away_team".to_string(),
            "home_team".to_string(),
        ],
        games: Vec::new(),
    };
    let err = validate(&schedule).expect_err("week column is required");
    assert_eq!(err.field(), Some("week"));
    assert!(err.to_string().contains("no such column"));
}

use std::fmt::Write as _;

use chrono::NaiveDate;
use serde::Serialize;

use crate::schedule::{GameRecord, Week};

pub const NO_GAMES_LINE: &str = "No games found.";

const UNKNOWN: &str = "?";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportGame {
    pub game_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weekday: Option<String>,
    pub away_team: String,
    pub home_team: String,
}

impl ReportGame {
    fn from_record(game: &GameRecord) -> Self {
        let game_date = game.game_date.clone().unwrap_or_else(|| UNKNOWN.to_string());
        Self {
            weekday: weekday_of(&game_date),
            game_date,
            away_team: game.away_team.clone().unwrap_or_else(|| UNKNOWN.to_string()),
            home_team: game.home_team.clone().unwrap_or_else(|| UNKNOWN.to_string()),
        }
    }

    fn date_line(&self) -> String {
        match &self.weekday {
            Some(day) => format!("{} ({day})", self.game_date),
            None => self.game_date.clone(),
        }
    }
}

/// Games of one (season, week), in schedule order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekReport {
    pub season: i32,
    pub week: Week,
    pub games: Vec<ReportGame>,
}

impl WeekReport {
    pub fn new(season: i32, week: Week, games: &[GameRecord]) -> Self {
        Self {
            season,
            week,
            games: games.iter().map(ReportGame::from_record).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    pub fn render_text(&self) -> String {
        let mut out = format!(
            "Season {}, week {}: {} game(s)\n\n",
            self.season,
            self.week,
            self.games.len()
        );
        out.push_str(&render_blocks(&self.games));
        out
    }

    pub fn render_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// One block per game (date line, then `away @ home`), or an explicit
/// no-games line for empty input.
pub fn render(games: &[GameRecord]) -> String {
    let rows = games.iter().map(ReportGame::from_record).collect::<Vec<_>>();
    render_blocks(&rows)
}

fn render_blocks(games: &[ReportGame]) -> String {
    if games.is_empty() {
        return format!("{NO_GAMES_LINE}\n");
    }
    let mut out = String::new();
    for (idx, game) in games.iter().enumerate() {
        if idx > 0 {
            out.push('\n');
        }
        let _ = writeln!(out, "{}", game.date_line());
        let _ = writeln!(out, "{} @ {}", game.away_team, game.home_team);
    }
    out
}

fn weekday_of(raw: &str) -> Option<String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .ok()
        .map(|d| d.format("%a").to_string())
}

#[cfg(test)]
mod tests {
    use super::weekday_of;

    #[test]
    fn weekday_only_for_iso_dates() {
        assert_eq!(weekday_of("2025-09-21").as_deref(), Some("Sun"));
        assert_eq!(weekday_of("09/21/2025"), None);
    }
}

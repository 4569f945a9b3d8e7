use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::table::Table;

pub const SEASON_COLUMNS: &[&str] = &["season"];
pub const WEEK_COLUMNS: &[&str] = &["week"];
pub const DATE_COLUMNS: &[&str] = &["gameday", "game_date"];
pub const HOME_COLUMNS: &[&str] = &["home_team", "home"];
pub const AWAY_COLUMNS: &[&str] = &["away_team", "away"];
pub const GAME_ID_COLUMNS: &[&str] = &["game_id"];

/// Week designator. Regular season weeks are numbers; postseason rounds can
/// arrive as names from some sources and are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum Week {
    Number(u32),
    Named(String),
}

impl Week {
    /// `None` for empty input. Integral floats ("3.0") count as numbers.
    pub fn parse(raw: &str) -> Option<Week> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        if let Ok(n) = trimmed.parse::<u32>() {
            return Some(Week::Number(n));
        }
        if let Some(n) = trimmed
            .strip_suffix(".0")
            .and_then(|whole| whole.parse::<u32>().ok())
        {
            return Some(Week::Number(n));
        }
        Some(Week::Named(trimmed.to_string()))
    }
}

impl From<u32> for Week {
    fn from(n: u32) -> Self {
        Week::Number(n)
    }
}

impl fmt::Display for Week {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Week::Number(n) => write!(f, "{n}"),
            Week::Named(name) => f.write_str(name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GameRecord {
    pub season: i32,
    pub game_id: Option<String>,
    pub week: Option<Week>,
    pub game_date: Option<String>,
    pub home_team: Option<String>,
    pub away_team: Option<String>,
    /// Provider columns this crate does not interpret.
    pub extra: BTreeMap<String, String>,
}

impl GameRecord {
    pub fn new(
        season: i32,
        week: impl Into<Week>,
        game_date: &str,
        away_team: &str,
        home_team: &str,
    ) -> Self {
        Self {
            season,
            game_id: None,
            week: Some(week.into()),
            game_date: Some(game_date.to_string()),
            home_team: Some(home_team.to_string()),
            away_team: Some(away_team.to_string()),
            extra: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SeasonSchedule {
    pub season: i32,
    /// Column names as the provider sent them.
    pub columns: Vec<String>,
    pub games: Vec<GameRecord>,
}

impl SeasonSchedule {
    pub fn new(season: i32, games: Vec<GameRecord>) -> Self {
        Self {
            season,
            columns: Vec::new(),
            games,
        }
    }

    /// Builds the schedule for `season` out of a provider table. Rows from
    /// other seasons are dropped; a table without a season column is taken
    /// to be scoped to `season` already.
    pub fn from_table(table: &Table, season: i32) -> Self {
        let season_col = table.pick_column(SEASON_COLUMNS);
        let week_col = table.pick_column(WEEK_COLUMNS);
        let date_col = table.pick_column(DATE_COLUMNS);
        let home_col = table.pick_column(HOME_COLUMNS);
        let away_col = table.pick_column(AWAY_COLUMNS);
        let id_col = table.pick_column(GAME_ID_COLUMNS);
        let known = [season_col, week_col, date_col, home_col, away_col, id_col];

        let mut games = Vec::new();
        for (row_idx, row) in table.rows.iter().enumerate() {
            if let Some(col) = season_col {
                let row_season = table.cell(row_idx, col).and_then(parse_season);
                if row_season != Some(season) {
                    continue;
                }
            }

            let text = |col: Option<usize>| {
                col.and_then(|c| table.cell(row_idx, c))
                    .and_then(non_empty)
                    .map(str::to_string)
            };

            let mut extra = BTreeMap::new();
            for (col, value) in row.iter().enumerate() {
                if known.contains(&Some(col)) {
                    continue;
                }
                if let Some(value) = value {
                    extra.insert(table.columns[col].clone(), value.clone());
                }
            }

            games.push(GameRecord {
                season,
                game_id: text(id_col),
                week: week_col
                    .and_then(|c| table.cell(row_idx, c))
                    .and_then(Week::parse),
                game_date: text(date_col),
                home_team: text(home_col),
                away_team: text(away_col),
                extra,
            });
        }

        Self {
            season,
            columns: table.columns.clone(),
            games,
        }
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}

pub(crate) fn parse_season(raw: &str) -> Option<i32> {
    let trimmed = raw.trim();
    trimmed
        .parse::<i32>()
        .ok()
        .or_else(|| trimmed.strip_suffix(".0")?.parse::<i32>().ok())
}

fn non_empty(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::{Week, parse_season};

    #[test]
    fn week_parses_numbers_and_names() {
        assert_eq!(Week::parse("3"), Some(Week::Number(3)));
        assert_eq!(Week::parse(" 18 "), Some(Week::Number(18)));
        assert_eq!(Week::parse("3.0"), Some(Week::Number(3)));
        assert_eq!(Week::parse("WC"), Some(Week::Named("WC".to_string())));
        assert_eq!(Week::parse("  "), None);
    }

    #[test]
    fn season_cells_tolerate_float_rendering() {
        assert_eq!(parse_season("2025"), Some(2025));
        assert_eq!(parse_season("2025.0"), Some(2025));
        assert_eq!(parse_season("twenty"), None);
    }

    #[test]
    fn week_display_round_trips_names() {
        assert_eq!(Week::Number(3).to_string(), "3");
        assert_eq!(Week::Named("SB".to_string()).to_string(), "SB");
    }
}

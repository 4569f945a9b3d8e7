use tracing::debug;

use crate::error::ValidationError;
use crate::schedule::{
    AWAY_COLUMNS, DATE_COLUMNS, GameRecord, HOME_COLUMNS, SeasonSchedule, WEEK_COLUMNS,
};

const REQUIRED_COLUMNS: [(&str, &[&str]); 4] = [
    ("week", WEEK_COLUMNS),
    ("home_team", HOME_COLUMNS),
    ("away_team", AWAY_COLUMNS),
    ("game_date", DATE_COLUMNS),
];

/// Structural check of a fetched schedule. Row count is not checked: an empty
/// schedule is valid as long as the provider table carried every required
/// column.
pub fn validate(schedule: &SeasonSchedule) -> Result<(), ValidationError> {
    if !schedule.columns.is_empty() {
        for (field, aliases) in REQUIRED_COLUMNS {
            if !aliases
                .iter()
                .any(|alias| schedule.columns.iter().any(|c| c.as_str() == *alias))
            {
                return Err(ValidationError::MissingField {
                    field,
                    row: None,
                    game_id: None,
                });
            }
        }
    }

    for (row, game) in schedule.games.iter().enumerate() {
        if let Some(field) = first_missing_field(game) {
            return Err(ValidationError::MissingField {
                field,
                row: Some(row),
                game_id: game.game_id.clone(),
            });
        }
        if let (Some(home), Some(away)) = (&game.home_team, &game.away_team)
            && home.eq_ignore_ascii_case(away)
        {
            return Err(ValidationError::SameTeam {
                row,
                team: home.clone(),
                game_id: game.game_id.clone(),
            });
        }
    }
    debug!(
        season = schedule.season,
        games = schedule.len(),
        "schedule passed validation"
    );
    Ok(())
}

fn first_missing_field(game: &GameRecord) -> Option<&'static str> {
    let present = [
        ("week", game.week.is_some()),
        ("home_team", game.home_team.is_some()),
        ("away_team", game.away_team.is_some()),
        ("game_date", game.game_date.is_some()),
    ];
    present
        .into_iter()
        .find(|(_, is_present)| !is_present)
        .map(|(field, _)| field)
}

use crate::schedule::{GameRecord, SeasonSchedule, Week};

/// Games scheduled for `week`, in schedule order. Duplicate rows are kept.
pub fn filter_week(schedule: &SeasonSchedule, week: &Week) -> Vec<GameRecord> {
    schedule
        .games
        .iter()
        .filter(|game| game.week.as_ref() == Some(week))
        .cloned()
        .collect()
}

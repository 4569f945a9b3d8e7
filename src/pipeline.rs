use tracing::info;

use crate::config::PipelineConfig;
use crate::error::PipelineError;
use crate::provider::{ScheduleProvider, fetch_with_retry};
use crate::report::WeekReport;
use crate::validate::validate;
use crate::week_filter::filter_week;

/// Successful end states of one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Games(WeekReport),
    NoGames(WeekReport),
}

impl Outcome {
    pub fn report(&self) -> &WeekReport {
        match self {
            Outcome::Games(report) | Outcome::NoGames(report) => report,
        }
    }

    pub fn has_games(&self) -> bool {
        matches!(self, Outcome::Games(_))
    }
}

/// Fetch → Validate → Filter → build the week report.
///
/// Fetch and validate failures end the run; filtering and report building
/// cannot fail on a validated schedule.
pub fn run<P>(provider: &P, config: &PipelineConfig) -> Result<Outcome, PipelineError>
where
    P: ScheduleProvider + ?Sized,
{
    let season = config.season;

    let schedule = fetch_with_retry(provider, season, config.provider.retry_backoff)
        .map_err(|source| PipelineError::Fetch { season, source })?;

    validate(&schedule).map_err(|source| PipelineError::Validate { season, source })?;

    let games = filter_week(&schedule, &config.week);
    info!(
        season,
        week = %config.week,
        matched = games.len(),
        of = schedule.len(),
        "filtered schedule to week"
    );

    let report = WeekReport::new(season, config.week.clone(), &games);
    if report.is_empty() {
        Ok(Outcome::NoGames(report))
    } else {
        Ok(Outcome::Games(report))
    }
}

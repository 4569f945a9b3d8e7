pub mod config;
pub mod error;
pub mod http_client;
pub mod inspect;
pub mod logging;
pub mod pipeline;
pub mod provider;
pub mod report;
pub mod schedule;
pub mod table;
pub mod validate;
pub mod week_filter;

pub use error::{FetchError, PipelineError, ValidationError};
pub use pipeline::{Outcome, run};
pub use provider::{NflverseProvider, ScheduleProvider};
pub use report::{WeekReport, render};
pub use schedule::{GameRecord, SeasonSchedule, Week};
pub use validate::validate;
pub use week_filter::filter_week;

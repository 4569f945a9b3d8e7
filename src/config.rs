use std::time::Duration;

use crate::schedule::Week;

/// Season the week report historically ran against.
pub const DEFAULT_SEASON: i32 = 2025;
/// Week the week report historically ran against.
pub const DEFAULT_WEEK: u32 = 3;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_RETRY_BACKOFF_MS: u64 = 500;

pub const NFLVERSE_SCHEDULE_URL: &str =
    "https://github.com/nflverse/nflverse-data/releases/download/schedules/games.parquet";
pub const NFLVERSE_PBP_URL_TEMPLATE: &str =
    "https://github.com/nflverse/nflverse-data/releases/download/pbp/play_by_play_{season}.parquet";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    pub season: i32,
    pub week: Week,
    pub provider: ProviderConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            season: DEFAULT_SEASON,
            week: Week::Number(DEFAULT_WEEK),
            provider: ProviderConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    /// URL or local path of the schedule table.
    pub schedule_source: String,
    /// URL or local path of the play-by-play table; `{season}` is substituted.
    pub pbp_source: String,
    pub timeout: Duration,
    pub retry_backoff: Duration,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            schedule_source: NFLVERSE_SCHEDULE_URL.to_string(),
            pbp_source: NFLVERSE_PBP_URL_TEMPLATE.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            retry_backoff: Duration::from_millis(DEFAULT_RETRY_BACKOFF_MS),
        }
    }
}

impl ProviderConfig {
    pub fn pbp_source_for(&self, season: i32) -> String {
        self.pbp_source.replace("{season}", &season.to_string())
    }
}

/// Loads `.env.local` then `.env`; missing files are not an error.
pub fn load_dotenv() {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");
}

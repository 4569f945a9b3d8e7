use std::fs;
use std::path::Path;
use std::time::Duration;

use once_cell::sync::OnceCell;
use reqwest::StatusCode;
use reqwest::blocking::Client;
use tracing::{debug, info, warn};

use crate::config::ProviderConfig;
use crate::error::FetchError;
use crate::http_client::build_client;
use crate::schedule::SeasonSchedule;
use crate::table::{Table, parse_json_table, read_parquet_table};

const ERROR_BODY_PREVIEW: usize = 200;

pub trait ScheduleProvider {
    /// Full schedule for one season. An empty schedule is a success.
    fn fetch_schedule(&self, season: i32) -> Result<SeasonSchedule, FetchError>;
}

/// Fetches once and retries a single time when the failure is a reachability
/// problem. Payload and provider errors are returned straight away.
pub fn fetch_with_retry<P>(
    provider: &P,
    season: i32,
    backoff: Duration,
) -> Result<SeasonSchedule, FetchError>
where
    P: ScheduleProvider + ?Sized,
{
    match provider.fetch_schedule(season) {
        Err(err) if err.is_retryable() => {
            warn!(season, error = %err, "schedule fetch failed, retrying once");
            if !backoff.is_zero() {
                std::thread::sleep(backoff);
            }
            provider.fetch_schedule(season)
        }
        other => other,
    }
}

/// nflverse release assets, or any URL/path serving the same table as
/// parquet or as a JSON array of row objects.
#[derive(Debug, Clone)]
pub struct NflverseProvider {
    config: ProviderConfig,
    // Built on first remote fetch with this provider's timeout.
    client: OnceCell<Client>,
}

impl NflverseProvider {
    pub fn new(config: ProviderConfig) -> Self {
        Self {
            config,
            client: OnceCell::new(),
        }
    }

    fn client(&self) -> Result<&Client, FetchError> {
        self.client
            .get_or_try_init(|| build_client(self.config.timeout))
            .map_err(|err| FetchError::unavailable(format!("{err:#}")))
    }

    /// Raw schedule table, every season included.
    pub fn fetch_schedule_table(&self, row_limit: Option<usize>) -> Result<Table, FetchError> {
        self.fetch_table(&self.config.schedule_source, row_limit)
    }

    pub fn fetch_pbp_table(
        &self,
        season: i32,
        row_limit: Option<usize>,
    ) -> Result<Table, FetchError> {
        self.fetch_table(&self.config.pbp_source_for(season), row_limit)
    }

    pub fn fetch_table(&self, source: &str, row_limit: Option<usize>) -> Result<Table, FetchError> {
        let format = PayloadFormat::from_source(source);
        let table = if is_remote(source) {
            self.fetch_remote(source, format, row_limit)?
        } else {
            read_local(source.strip_prefix("file://").unwrap_or(source), format, row_limit)?
        };
        debug!(
            source,
            columns = table.columns.len(),
            rows = table.total_rows,
            "decoded provider table"
        );
        Ok(table)
    }

    fn fetch_remote(
        &self,
        url: &str,
        format: PayloadFormat,
        row_limit: Option<usize>,
    ) -> Result<Table, FetchError> {
        let client = self.client()?;
        debug!(url, "requesting provider table");

        let resp = client
            .get(url)
            .send()
            .map_err(|err| FetchError::unavailable(format!("request {url} failed: {err}")))?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_else(|err| {
                debug!(url, %status, error = %err, "could not read error response body");
                String::new()
            });
            return Err(status_error(status, &body));
        }

        let bytes = resp
            .bytes()
            .map_err(|err| FetchError::unavailable(format!("failed reading body: {err}")))?;
        match format {
            PayloadFormat::Json => {
                let raw = std::str::from_utf8(&bytes)
                    .map_err(|err| FetchError::malformed(format!("body is not utf-8: {err}")))?;
                parse_json_table(raw)
            }
            PayloadFormat::Parquet => read_parquet_table(bytes, row_limit),
        }
    }
}

impl ScheduleProvider for NflverseProvider {
    fn fetch_schedule(&self, season: i32) -> Result<SeasonSchedule, FetchError> {
        let table = self.fetch_schedule_table(None)?;
        let schedule = SeasonSchedule::from_table(&table, season);
        info!(
            season,
            games = schedule.len(),
            table_rows = table.total_rows,
            "fetched season schedule"
        );
        Ok(schedule)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PayloadFormat {
    Parquet,
    Json,
}

impl PayloadFormat {
    fn from_source(source: &str) -> Self {
        let path = source.split(['?', '#']).next().unwrap_or(source);
        if path.to_ascii_lowercase().ends_with(".json") {
            PayloadFormat::Json
        } else {
            PayloadFormat::Parquet
        }
    }
}

fn is_remote(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

fn read_local(
    path: &str,
    format: PayloadFormat,
    row_limit: Option<usize>,
) -> Result<Table, FetchError> {
    let path = Path::new(path);
    match format {
        PayloadFormat::Json => {
            let raw = fs::read_to_string(path).map_err(|err| {
                FetchError::unavailable(format!("read {}: {err}", path.display()))
            })?;
            parse_json_table(&raw)
        }
        PayloadFormat::Parquet => {
            let file = fs::File::open(path).map_err(|err| {
                FetchError::unavailable(format!("open {}: {err}", path.display()))
            })?;
            read_parquet_table(file, row_limit)
        }
    }
}

fn status_error(status: StatusCode, body: &str) -> FetchError {
    let preview: String = body.trim().chars().take(ERROR_BODY_PREVIEW).collect();
    match status {
        StatusCode::BAD_GATEWAY | StatusCode::SERVICE_UNAVAILABLE | StatusCode::GATEWAY_TIMEOUT => {
            FetchError::unavailable(format!("http {status}: {preview}"))
        }
        _ => FetchError::Provider {
            status: status.as_u16(),
            message: if preview.is_empty() {
                status.to_string()
            } else {
                preview
            },
        },
    }
}

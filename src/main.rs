use std::io::{self, Write};
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::error;

use nfl_schedule::config::{
    self, DEFAULT_SEASON, DEFAULT_TIMEOUT_SECS, DEFAULT_WEEK, NFLVERSE_SCHEDULE_URL,
    PipelineConfig, ProviderConfig,
};
use nfl_schedule::{NflverseProvider, Outcome, PipelineError, Week, logging, pipeline};

const EXIT_FETCH_FAILED: u8 = 3;
const EXIT_VALIDATE_FAILED: u8 = 4;

/// Print the games of one week of an NFL season.
#[derive(Parser, Debug)]
#[command(name = "nfl_schedule", version)]
struct Cli {
    /// Season year.
    #[arg(long, env = "NFL_SEASON", default_value_t = DEFAULT_SEASON)]
    season: i32,

    /// Week number, or a postseason designator such as WC.
    #[arg(long, env = "NFL_WEEK", default_value_t = Week::Number(DEFAULT_WEEK), value_parser = parse_week)]
    week: Week,

    /// Schedule table URL or local path (.parquet or .json).
    #[arg(long, env = "NFL_SCHEDULE_URL", default_value = NFLVERSE_SCHEDULE_URL)]
    source: String,

    #[arg(long, env = "NFL_PROVIDER_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Debug logging on stderr.
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

impl Cli {
    fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            season: self.season,
            week: self.week.clone(),
            provider: ProviderConfig {
                schedule_source: self.source.clone(),
                timeout: Duration::from_secs(self.timeout_secs.max(1)),
                ..ProviderConfig::default()
            },
        }
    }
}

fn main() -> ExitCode {
    config::load_dotenv();
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let cfg = cli.pipeline_config();
    let provider = NflverseProvider::new(cfg.provider.clone());

    let result = pipeline::run(&provider, &cfg);
    let outcome = match &result {
        Ok(outcome) => outcome,
        Err(err) => {
            error!(stage = err.stage(), season = cfg.season, "{err}");
            return ExitCode::from(exit_code(&result));
        }
    };

    if let Err(err) = print_outcome(outcome, cli.format) {
        error!("{err:#}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

/// Process status for a finished pipeline run. A week without games is still
/// a success.
fn exit_code(result: &std::result::Result<Outcome, PipelineError>) -> u8 {
    match result {
        Ok(_) => 0,
        Err(PipelineError::Fetch { .. }) => EXIT_FETCH_FAILED,
        Err(PipelineError::Validate { .. }) => EXIT_VALIDATE_FAILED,
    }
}

fn print_outcome(outcome: &Outcome, format: OutputFormat) -> Result<()> {
    let report = outcome.report();
    let body = match format {
        OutputFormat::Text => report.render_text(),
        OutputFormat::Json => {
            let mut json = report.render_json().context("serialize week report")?;
            json.push('\n');
            json
        }
    };
    let mut stdout = io::stdout().lock();
    stdout
        .write_all(body.as_bytes())
        .context("write report to stdout")?;
    stdout.flush().context("flush stdout")
}

fn parse_week(raw: &str) -> std::result::Result<Week, String> {
    Week::parse(raw).ok_or_else(|| "week must not be empty".to_string())
}

use std::time::Duration;

use anyhow::{Result, anyhow};
use clap::Parser;

use nfl_schedule::config::{
    self, DEFAULT_SEASON, DEFAULT_TIMEOUT_SECS, NFLVERSE_PBP_URL_TEMPLATE, NFLVERSE_SCHEDULE_URL,
    ProviderConfig,
};
use nfl_schedule::{NflverseProvider, inspect, logging};

/// Dump shape, columns and a row sample of the provider's schedule and
/// play-by-play tables for one season.
#[derive(Parser, Debug)]
#[command(name = "debug_schedule")]
struct Cli {
    #[arg(long, env = "NFL_SEASON", default_value_t = DEFAULT_SEASON)]
    season: i32,

    #[arg(long, env = "NFL_SCHEDULE_URL", default_value = NFLVERSE_SCHEDULE_URL)]
    source: String,

    /// Play-by-play URL or path; `{season}` is replaced with the season.
    #[arg(long, env = "NFL_PBP_URL", default_value = NFLVERSE_PBP_URL_TEMPLATE)]
    pbp_source: String,

    /// Skip the play-by-play table (a large download).
    #[arg(long)]
    no_pbp: bool,

    #[arg(long, default_value_t = 5)]
    sample: usize,

    /// Cells printed per sampled row.
    #[arg(long, default_value_t = 12)]
    max_columns: usize,

    #[arg(long, env = "NFL_PROVIDER_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,

    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    config::load_dotenv();
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let provider = NflverseProvider::new(ProviderConfig {
        schedule_source: cli.source.clone(),
        pbp_source: cli.pbp_source.clone(),
        timeout: Duration::from_secs(cli.timeout_secs.max(1)),
        ..ProviderConfig::default()
    });

    let mut failures = 0usize;

    match inspect::inspect_schedule(&provider, cli.season, cli.sample) {
        Ok(summary) => print!("{}", summary.render(cli.max_columns)),
        Err(err) => {
            failures += 1;
            println!("ERR schedule {}: {}", cli.season, err);
        }
    }

    if !cli.no_pbp {
        println!();
        match inspect::inspect_pbp(&provider, cli.season, cli.sample) {
            Ok(summary) => print!("{}", summary.render(cli.max_columns)),
            Err(err) => {
                failures += 1;
                println!("ERR play-by-play {}: {}", cli.season, err);
            }
        }
    }

    if failures > 0 {
        return Err(anyhow!("{failures} table(s) could not be inspected"));
    }
    Ok(())
}

//! Shape dumps of provider tables for ad-hoc debugging. Nothing here feeds
//! the week report.

use std::fmt::Write as _;

use tracing::info;

use crate::error::FetchError;
use crate::provider::NflverseProvider;
use crate::schedule::{SEASON_COLUMNS, parse_season};
use crate::table::Table;

const NULL_CELL: &str = "NA";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSummary {
    pub label: String,
    pub total_rows: usize,
    pub columns: Vec<String>,
    pub sample: Vec<Vec<Option<String>>>,
}

impl TableSummary {
    pub fn from_table(label: impl Into<String>, table: &Table, sample_rows: usize) -> Self {
        Self {
            label: label.into(),
            total_rows: table.total_rows,
            columns: table.columns.clone(),
            sample: table.rows.iter().take(sample_rows).cloned().collect(),
        }
    }

    /// Shape, column list, then each sampled row limited to `max_columns`
    /// cells.
    pub fn render(&self, max_columns: usize) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "== {}", self.label);
        let _ = writeln!(
            out,
            "shape: {} rows x {} columns",
            self.total_rows,
            self.columns.len()
        );
        let _ = writeln!(out, "columns: {}", self.columns.join(", "));
        if self.sample.is_empty() {
            let _ = writeln!(out, "sample: (no rows)");
            return out;
        }
        let _ = writeln!(out, "sample ({} rows):", self.sample.len());
        for (idx, row) in self.sample.iter().enumerate() {
            let cells = self
                .columns
                .iter()
                .zip(row.iter())
                .take(max_columns)
                .map(|(name, cell)| format!("{name}={}", cell.as_deref().unwrap_or(NULL_CELL)))
                .collect::<Vec<_>>();
            let more = self.columns.len().saturating_sub(max_columns);
            if more > 0 {
                let _ = writeln!(out, "  [{idx}] {} (+{more} more)", cells.join(" "));
            } else {
                let _ = writeln!(out, "  [{idx}] {}", cells.join(" "));
            }
        }
        out
    }
}

/// Keeps the rows of `table` that belong to `season`. Tables without a season
/// column pass through untouched.
pub fn season_rows(table: &Table, season: i32) -> Table {
    let Some(col) = table.pick_column(SEASON_COLUMNS) else {
        return table.clone();
    };
    let rows = table
        .rows
        .iter()
        .filter(|row| {
            row.get(col)
                .and_then(|cell| cell.as_deref())
                .and_then(parse_season)
                == Some(season)
        })
        .cloned()
        .collect::<Vec<_>>();
    Table {
        columns: table.columns.clone(),
        total_rows: rows.len(),
        rows,
    }
}

pub fn inspect_schedule(
    provider: &NflverseProvider,
    season: i32,
    sample_rows: usize,
) -> Result<TableSummary, FetchError> {
    let table = provider.fetch_schedule_table(None)?;
    let scoped = season_rows(&table, season);
    info!(
        season,
        rows = scoped.total_rows,
        all_seasons_rows = table.total_rows,
        "inspected schedule table"
    );
    Ok(TableSummary::from_table(
        format!("schedule {season}"),
        &scoped,
        sample_rows,
    ))
}

pub fn inspect_pbp(
    provider: &NflverseProvider,
    season: i32,
    sample_rows: usize,
) -> Result<TableSummary, FetchError> {
    let table = provider.fetch_pbp_table(season, Some(sample_rows))?;
    info!(
        season,
        rows = table.total_rows,
        columns = table.columns.len(),
        "inspected play-by-play table"
    );
    Ok(TableSummary::from_table(
        format!("play-by-play {season}"),
        &table,
        sample_rows,
    ))
}

use std::collections::HashMap;

use chrono::NaiveDate;
use parquet::file::reader::{ChunkReader, FileReader, SerializedFileReader};
use parquet::record::Field;
use serde_json::Value;

use crate::error::FetchError;

/// Provider-neutral rectangular table. Every cell is text; `None` is a null.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
    /// Row count reported by the source, which can exceed `rows.len()` when
    /// only a sample was decoded.
    pub total_rows: usize,
}

impl Table {
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// First column present out of a list of aliases.
    pub fn pick_column(&self, names: &[&str]) -> Option<usize> {
        names.iter().find_map(|name| self.column_index(name))
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .and_then(|c| c.as_deref())
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

pub fn parse_json_table(raw: &str) -> Result<Table, FetchError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Table::default());
    }
    let root: Value = serde_json::from_str(trimmed)
        .map_err(|err| FetchError::malformed(format!("invalid schedule json: {err}")))?;

    let items = match &root {
        Value::Array(items) => items,
        Value::Object(obj) => ["games", "data", "rows"]
            .iter()
            .find_map(|key| obj.get(*key).and_then(|v| v.as_array()))
            .ok_or_else(|| FetchError::malformed("json object has no games array"))?,
        _ => return Err(FetchError::malformed("json payload is not a table")),
    };

    let mut columns: Vec<String> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    for (row_idx, item) in items.iter().enumerate() {
        let Some(obj) = item.as_object() else {
            return Err(FetchError::malformed(format!(
                "row {row_idx} is not a json object"
            )));
        };
        for key in obj.keys() {
            if !index.contains_key(key) {
                index.insert(key.clone(), columns.len());
                columns.push(key.clone());
            }
        }
    }

    let mut rows = Vec::with_capacity(items.len());
    for item in items {
        let mut row = vec![None; columns.len()];
        if let Some(obj) = item.as_object() {
            for (key, value) in obj {
                if let Some(&col) = index.get(key) {
                    row[col] = json_cell(value);
                }
            }
        }
        rows.push(row);
    }

    Ok(Table {
        total_rows: rows.len(),
        columns,
        rows,
    })
}

fn json_cell(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}

/// Decodes a parquet file into a [`Table`]. With `row_limit` only the first
/// rows are materialised; `total_rows` still reports the file's row count.
pub fn read_parquet_table<R>(reader: R, row_limit: Option<usize>) -> Result<Table, FetchError>
where
    R: ChunkReader + 'static,
{
    let reader = SerializedFileReader::new(reader)
        .map_err(|err| FetchError::malformed(format!("open parquet reader: {err}")))?;
    let file_meta = reader.metadata().file_metadata();
    let total_rows = usize::try_from(file_meta.num_rows()).unwrap_or(0);
    let columns = file_meta
        .schema()
        .get_fields()
        .iter()
        .map(|f| f.name().to_string())
        .collect::<Vec<_>>();
    let index: HashMap<String, usize> = columns
        .iter()
        .enumerate()
        .map(|(i, c)| (c.clone(), i))
        .collect();

    let iter = reader
        .get_row_iter(None)
        .map_err(|err| FetchError::malformed(format!("iterate parquet rows: {err}")))?;

    let limit = row_limit.unwrap_or(usize::MAX);
    let mut rows = Vec::with_capacity(total_rows.min(limit));
    for row in iter.take(limit) {
        let row = row.map_err(|err| FetchError::malformed(format!("decode parquet row: {err}")))?;
        let mut cells = vec![None; columns.len()];
        for (name, field) in row.get_column_iter() {
            if let Some(&col) = index.get(name) {
                cells[col] = parquet_cell(field);
            }
        }
        rows.push(cells);
    }

    Ok(Table {
        columns,
        rows,
        total_rows,
    })
}

fn parquet_cell(field: &Field) -> Option<String> {
    match field {
        Field::Null => None,
        Field::Str(s) => Some(s.clone()),
        Field::Date(days) => Some(date_from_epoch_days(*days)),
        other => Some(other.to_string()),
    }
}

fn date_from_epoch_days(days: i32) -> String {
    const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;
    days.checked_add(UNIX_EPOCH_DAYS_FROM_CE)
        .and_then(NaiveDate::from_num_days_from_ce_opt)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| days.to_string())
}

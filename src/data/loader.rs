use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Array, AsArray};
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int32Type, Int64Type};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

pub use super::model::DataFormatError;
use super::model::{
    LaunchDataset, LaunchRecord, Outcome, BOOSTER_COLUMN, OUTCOME_COLUMN, PAYLOAD_COLUMN,
    SITE_COLUMN,
};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a launch dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row, columns in any order (the usual export)
/// * `.json`    – `[{ "Launch Site": ..., "Payload Mass (kg)": ..., ... }, ...]`
/// * `.parquet` – flat columns with the same names
///
/// Columns other than the four required ones are ignored.
pub fn load_file(path: &Path) -> Result<LaunchDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "csv" => load_csv(path)?,
        "json" => load_json(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => return Err(DataFormatError::UnsupportedExtension(other.to_string()).into()),
    };
    log::debug!(
        "{}: {} launches across {} sites",
        path.display(),
        dataset.len(),
        dataset.sites().len()
    );
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// Cell parsing shared by the text formats
// ---------------------------------------------------------------------------

fn parse_text(raw: &str, row: usize, column: &'static str) -> Result<String, DataFormatError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(DataFormatError::EmptyValue { row, column });
    }
    Ok(trimmed.to_string())
}

fn parse_payload(raw: &str, row: usize) -> Result<f64, DataFormatError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(DataFormatError::EmptyValue {
            row,
            column: PAYLOAD_COLUMN,
        });
    }
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| DataFormatError::InvalidNumber {
            row,
            column: PAYLOAD_COLUMN,
            value: raw.to_string(),
        })
}

fn parse_outcome(raw: &str, row: usize) -> Result<Outcome, DataFormatError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(DataFormatError::EmptyValue {
            row,
            column: OUTCOME_COLUMN,
        });
    }
    trimmed
        .parse::<f64>()
        .ok()
        .and_then(Outcome::from_f64)
        .ok_or_else(|| DataFormatError::InvalidOutcome {
            row,
            value: raw.to_string(),
        })
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names; the four schema columns are
/// looked up by name.
fn load_csv(path: &Path) -> Result<LaunchDataset> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers = reader.headers().context("reading CSV headers")?.clone();

    let column = |name: &'static str| {
        headers
            .iter()
            .position(|h| h.trim() == name)
            .ok_or(DataFormatError::MissingColumn(name))
    };
    let site_idx = column(SITE_COLUMN)?;
    let payload_idx = column(PAYLOAD_COLUMN)?;
    let booster_idx = column(BOOSTER_COLUMN)?;
    let outcome_idx = column(OUTCOME_COLUMN)?;

    let mut records = Vec::new();

    for (i, result) in reader.records().enumerate() {
        let row_no = i + 1;
        let record = result.with_context(|| format!("CSV data row {row_no}"))?;

        records.push(LaunchRecord {
            site: parse_text(record.get(site_idx).unwrap_or(""), row_no, SITE_COLUMN)?,
            payload_mass: parse_payload(record.get(payload_idx).unwrap_or(""), row_no)?,
            booster_category: parse_text(
                record.get(booster_idx).unwrap_or(""),
                row_no,
                BOOSTER_COLUMN,
            )?,
            outcome: parse_outcome(record.get(outcome_idx).unwrap_or(""), row_no)?,
        });
    }

    Ok(LaunchDataset::from_records(records)?)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   {
///     "Launch Site": "CCAFS LC-40",
///     "Payload Mass (kg)": 525.0,
///     "Booster Version Category": "v1.0",
///     "class": 0
///   },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<LaunchDataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let rows = root.as_array().context("Expected top-level JSON array")?;

    let mut records = Vec::with_capacity(rows.len());

    for (idx, row) in rows.iter().enumerate() {
        let i = idx + 1;
        let obj = row
            .as_object()
            .with_context(|| format!("JSON record {i} is not an object"))?;

        let field = |name: &'static str| match obj.get(name) {
            None => Err(DataFormatError::MissingColumn(name)),
            Some(JsonValue::Null) => Err(DataFormatError::EmptyValue { row: i, column: name }),
            Some(v) => Ok(v),
        };

        let payload = field(PAYLOAD_COLUMN)?;
        let payload_mass = match payload {
            JsonValue::Number(n) => n.as_f64().filter(|v| v.is_finite()),
            _ => None,
        }
        .ok_or_else(|| DataFormatError::InvalidNumber {
            row: i,
            column: PAYLOAD_COLUMN,
            value: payload.to_string(),
        })?;

        let class = field(OUTCOME_COLUMN)?;
        let outcome = match class {
            JsonValue::Number(n) => n.as_f64().and_then(Outcome::from_f64),
            JsonValue::Bool(true) => Some(Outcome::Success),
            JsonValue::Bool(false) => Some(Outcome::Failure),
            _ => None,
        }
        .ok_or_else(|| DataFormatError::InvalidOutcome {
            row: i,
            value: class.to_string(),
        })?;

        records.push(LaunchRecord {
            site: json_text(field(SITE_COLUMN)?, i, SITE_COLUMN)?,
            payload_mass,
            booster_category: json_text(field(BOOSTER_COLUMN)?, i, BOOSTER_COLUMN)?,
            outcome,
        });
    }

    Ok(LaunchDataset::from_records(records)?)
}

fn json_text(val: &JsonValue, row: usize, column: &'static str) -> Result<String, DataFormatError> {
    match val {
        JsonValue::String(s) => parse_text(s, row, column),
        other => Err(DataFormatError::InvalidText {
            row,
            column,
            value: other.to_string(),
        }),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file of launch records.
///
/// Expected schema:
/// - `Launch Site`, `Booster Version Category`: Utf8 or LargeUtf8
/// - `Payload Mass (kg)`: Int32, Int64, Float32 or Float64
/// - `class`: integer or float 0/1, or Boolean
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<LaunchDataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    // Check the schema up front so a file without rows still reports missing columns.
    let schema = builder.schema().clone();
    let column_index = |name: &'static str| {
        schema
            .index_of(name)
            .map_err(|_| DataFormatError::MissingColumn(name))
    };
    let site_idx = column_index(SITE_COLUMN)?;
    let payload_idx = column_index(PAYLOAD_COLUMN)?;
    let booster_idx = column_index(BOOSTER_COLUMN)?;
    let outcome_idx = column_index(OUTCOME_COLUMN)?;

    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let site_col = batch.column(site_idx);
        let payload_col = batch.column(payload_idx);
        let booster_col = batch.column(booster_idx);
        let outcome_col = batch.column(outcome_idx);

        // Rows are numbered across batches so errors point at the file row.
        let offset = records.len();
        for i in 0..batch.num_rows() {
            let row = offset + i + 1;
            let outcome = match arrow_bool(outcome_col, i) {
                Some(true) => Outcome::Success,
                Some(false) => Outcome::Failure,
                None => {
                    let raw = arrow_f64(outcome_col, i, row, OUTCOME_COLUMN)?;
                    Outcome::from_f64(raw).ok_or_else(|| DataFormatError::InvalidOutcome {
                        row,
                        value: raw.to_string(),
                    })?
                }
            };

            records.push(LaunchRecord {
                site: arrow_text(site_col, i, row, SITE_COLUMN)?,
                payload_mass: arrow_f64(payload_col, i, row, PAYLOAD_COLUMN)?,
                booster_category: arrow_text(booster_col, i, row, BOOSTER_COLUMN)?,
                outcome,
            });
        }
    }

    Ok(LaunchDataset::from_records(records)?)
}

// -- Arrow helpers --

fn arrow_text(
    col: &Arc<dyn Array>,
    i: usize,
    row: usize,
    column: &'static str,
) -> Result<String, DataFormatError> {
    if col.is_null(i) {
        return Err(DataFormatError::EmptyValue { row, column });
    }
    let value = match col.data_type() {
        DataType::Utf8 => col.as_string::<i32>().value(i),
        DataType::LargeUtf8 => col.as_string::<i64>().value(i),
        other => {
            return Err(DataFormatError::UnsupportedColumnType {
                column,
                data_type: format!("{other:?}"),
            })
        }
    };
    parse_text(value, row, column)
}

fn arrow_f64(
    col: &Arc<dyn Array>,
    i: usize,
    row: usize,
    column: &'static str,
) -> Result<f64, DataFormatError> {
    if col.is_null(i) {
        return Err(DataFormatError::EmptyValue { row, column });
    }
    let value = match col.data_type() {
        DataType::Int32 => col.as_primitive::<Int32Type>().value(i) as f64,
        DataType::Int64 => col.as_primitive::<Int64Type>().value(i) as f64,
        DataType::Float32 => col.as_primitive::<Float32Type>().value(i) as f64,
        DataType::Float64 => col.as_primitive::<Float64Type>().value(i),
        other => {
            return Err(DataFormatError::UnsupportedColumnType {
                column,
                data_type: format!("{other:?}"),
            })
        }
    };
    if !value.is_finite() {
        return Err(DataFormatError::InvalidNumber {
            row,
            column,
            value: value.to_string(),
        });
    }
    Ok(value)
}

/// `Some` only for non-null Boolean columns.
fn arrow_bool(col: &Arc<dyn Array>, i: usize) -> Option<bool> {
    match col.data_type() {
        DataType::Boolean if !col.is_null(i) => Some(col.as_boolean().value(i)),
        _ => None,
    }
}

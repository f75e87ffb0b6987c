//! Dataset import for uploaded consumption data
//!
//! Accepts CSV (with a header row) or JSON (an array of row objects). Each
//! row needs `date`, `baseline_kwh`, `actual_kwh` and
//! `efficiency_improvement` (fraction 0-1). Extra columns are ignored.

use std::fs;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord};
use serde_json::Value;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::impact::{compute_expected_per_period, validate_fraction};
use crate::models::{ConsumptionSeries, DatasetRow, SeriesSet};

const REQUIRED_FIELDS: [&str; 4] = [
    "date",
    "baseline_kwh",
    "actual_kwh",
    "efficiency_improvement",
];

/// Supported dataset encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetFormat {
    Csv,
    Json,
}

impl DatasetFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            DatasetFormat::Csv => "csv",
            DatasetFormat::Json => "json",
        }
    }
}

/// Detect format from the file name, falling back to sniffing the content
///
/// Spreadsheet formats are recognized and rejected explicitly.
pub fn detect_format(filename: Option<&str>, data: &[u8]) -> Result<DatasetFormat> {
    if let Some(name) = filename {
        let ext = Path::new(name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match ext.as_deref() {
            Some("csv") => return Ok(DatasetFormat::Csv),
            Some("json") => return Ok(DatasetFormat::Json),
            Some("xlsx") | Some("xls") => {
                return Err(Error::UnsupportedFormat(format!(
                    "{} (export the sheet as CSV)",
                    name
                )))
            }
            _ => {}
        }
    }

    let first = data.iter().find(|b| !b.is_ascii_whitespace()).copied();

    match first {
        Some(b'[') => Ok(DatasetFormat::Json),
        // Zip container (xlsx) magic
        Some(b'P') if data.starts_with(b"PK\x03\x04") => Err(Error::UnsupportedFormat(
            "spreadsheet archive (export the sheet as CSV)".into(),
        )),
        Some(_) => Ok(DatasetFormat::Csv),
        None => Err(Error::Import("Dataset is empty".into())),
    }
}

/// Parse rows in the given format, validate them and sort by date
pub fn parse_dataset<R: Read>(reader: R, format: DatasetFormat) -> Result<Vec<DatasetRow>> {
    let mut rows = match format {
        DatasetFormat::Csv => parse_csv_rows(reader)?,
        DatasetFormat::Json => parse_json_rows(reader)?,
    };

    if rows.is_empty() {
        return Err(Error::Import("Dataset has no rows".into()));
    }

    rows.sort_by_key(|r| r.date);
    debug!(
        rows = rows.len(),
        format = format.as_str(),
        "Parsed dataset"
    );
    Ok(rows)
}

/// Detect the format and parse an in-memory upload
pub fn import_dataset(data: &[u8], filename: Option<&str>) -> Result<Vec<DatasetRow>> {
    let format = detect_format(filename, data)?;
    parse_dataset(data, format)
}

/// Read and parse a dataset file from disk
pub fn read_dataset_file(path: &Path) -> Result<Vec<DatasetRow>> {
    let data = fs::read(path)?;
    let rows = import_dataset(&data, path.file_name().and_then(|n| n.to_str()))?;
    info!(
        path = %path.display(),
        rows = rows.len(),
        "Imported dataset"
    );
    Ok(rows)
}

/// Build the aligned series for a dataset, deriving `expected` per row
/// from its own efficiency improvement. Dates become period labels.
pub fn dataset_series(rows: &[DatasetRow]) -> Result<SeriesSet> {
    let baseline: ConsumptionSeries = rows
        .iter()
        .map(|r| r.baseline_kwh)
        .collect::<Vec<_>>()
        .into();
    let gains: Vec<f64> = rows.iter().map(|r| r.efficiency_improvement).collect();
    let expected = compute_expected_per_period(&baseline, &gains)?;
    let actual: Vec<f64> = rows.iter().map(|r| r.actual_kwh).collect();
    let labels = rows.iter().map(|r| r.date.to_string()).collect();

    SeriesSet::new(baseline, expected, actual)?.with_labels(labels)
}

/// Parse CSV rows, locating required columns by header name
fn parse_csv_rows<R: Read>(reader: R) -> Result<Vec<DatasetRow>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let columns = locate_columns(&headers)?;
    let mut rows = Vec::new();

    for (i, result) in rdr.records().enumerate() {
        let record = result?;
        let row_num = i + 1;

        // Skip blank trailing lines
        if record.iter().all(|f| f.is_empty()) {
            continue;
        }

        let date = csv_field(&record, columns[0], "date", row_num)?;
        let baseline = csv_field(&record, columns[1], "baseline_kwh", row_num)?;
        let actual = csv_field(&record, columns[2], "actual_kwh", row_num)?;
        let efficiency = csv_field(&record, columns[3], "efficiency_improvement", row_num)?;

        rows.push(build_row(
            row_num,
            parse_date(date, row_num)?,
            parse_number(baseline, "baseline_kwh", row_num)?,
            parse_number(actual, "actual_kwh", row_num)?,
            parse_number(efficiency, "efficiency_improvement", row_num)?,
        )?);
    }

    Ok(rows)
}

fn csv_field<'a>(
    record: &'a StringRecord,
    idx: usize,
    name: &str,
    row_num: usize,
) -> Result<&'a str> {
    record
        .get(idx)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| Error::Import(format!("Row {}: missing {}", row_num, name)))
}

/// Indices of the required columns, in `REQUIRED_FIELDS` order
fn locate_columns(headers: &StringRecord) -> Result<[usize; 4]> {
    let normalized: Vec<String> = headers
        .iter()
        .map(|h| h.trim().trim_start_matches('\u{feff}').to_ascii_lowercase())
        .collect();

    let mut columns = [0usize; 4];
    for (slot, name) in columns.iter_mut().zip(REQUIRED_FIELDS) {
        *slot = normalized
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| Error::Import(format!("Missing required column: {}", name)))?;
    }
    Ok(columns)
}

/// Parse a JSON array of row objects. Numbers may be JSON numbers or strings.
fn parse_json_rows<R: Read>(reader: R) -> Result<Vec<DatasetRow>> {
    let value: Value = serde_json::from_reader(reader)?;
    let items = value
        .as_array()
        .ok_or_else(|| Error::Import("JSON dataset must be an array of rows".into()))?;

    let mut rows = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        let row_num = i + 1;
        let obj = item
            .as_object()
            .ok_or_else(|| Error::Import(format!("Row {}: expected an object", row_num)))?;

        let date = match json_field(obj, "date", row_num)? {
            Value::String(s) => parse_date(s, row_num)?,
            other => {
                return Err(Error::Import(format!(
                    "Row {}: date must be a string, got {}",
                    row_num, other
                )))
            }
        };

        rows.push(build_row(
            row_num,
            date,
            json_number(obj, "baseline_kwh", row_num)?,
            json_number(obj, "actual_kwh", row_num)?,
            json_number(obj, "efficiency_improvement", row_num)?,
        )?);
    }

    Ok(rows)
}

fn json_field<'a>(
    obj: &'a serde_json::Map<String, Value>,
    name: &str,
    row_num: usize,
) -> Result<&'a Value> {
    obj.get(name)
        .filter(|v| !v.is_null())
        .ok_or_else(|| Error::Import(format!("Row {}: missing {}", row_num, name)))
}

fn json_number(obj: &serde_json::Map<String, Value>, name: &str, row_num: usize) -> Result<f64> {
    match json_field(obj, name, row_num)? {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| Error::Import(format!("Row {}: {} is not a number", row_num, name))),
        Value::String(s) => parse_number(s, name, row_num),
        other => Err(Error::Import(format!(
            "Row {}: {} must be a number, got {}",
            row_num, name, other
        ))),
    }
}

/// Validate parsed values and assemble the row
fn build_row(
    row_num: usize,
    date: NaiveDate,
    baseline_kwh: f64,
    actual_kwh: f64,
    efficiency_improvement: f64,
) -> Result<DatasetRow> {
    for (name, value) in [("baseline_kwh", baseline_kwh), ("actual_kwh", actual_kwh)] {
        if value < 0.0 {
            return Err(Error::Import(format!(
                "Row {}: {} cannot be negative ({})",
                row_num, name, value
            )));
        }
    }

    let efficiency = validate_fraction("efficiency_improvement", efficiency_improvement)
        .map_err(|e| Error::Import(format!("Row {}: {}", row_num, e)))?;

    Ok(DatasetRow {
        date,
        baseline_kwh,
        actual_kwh,
        efficiency_improvement: efficiency,
    })
}

/// Parse a date string in various common formats
fn parse_date(s: &str, row_num: usize) -> Result<NaiveDate> {
    let s = s.trim();

    let formats = [
        "%Y-%m-%d", // 2026-02-01
        "%m/%d/%Y", // 02/01/2026
        "%d/%m/%Y", // 01/02/2026 (European, only when month/day order fails)
        "%m-%d-%Y", // 02-01-2026
    ];

    for fmt in formats {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(date);
        }
    }

    // Spreadsheet exports sometimes carry a time component
    if let Some((date_part, _)) = s.split_once(['T', ' ']) {
        if let Ok(date) = NaiveDate::parse_from_str(date_part, "%Y-%m-%d") {
            return Ok(date);
        }
    }

    Err(Error::Import(format!(
        "Row {}: unable to parse date: {}",
        row_num, s
    )))
}

/// Parse a numeric field, tolerating thousands separators
fn parse_number(s: &str, name: &str, row_num: usize) -> Result<f64> {
    let cleaned: String = s.trim().replace([',', ' '], "");
    match cleaned.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(Error::Import(format!(
            "Row {}: unable to parse {}: {}",
            row_num, name, s
        ))),
    }
}

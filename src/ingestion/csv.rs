//! CSV ingestion of city trip datasets.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::{BikeshareError, Result};
use crate::types::{ColumnSet, TripRecord, TripTable, columns};

const REQUIRED: [&str; 5] = [
    columns::START_TIME,
    columns::TRIP_DURATION,
    columns::START_STATION,
    columns::END_STATION,
    columns::USER_TYPE,
];

/// Ingest a city CSV file into an in-memory [`TripTable`].
///
/// Rules:
///
/// - CSV must have headers.
/// - Headers must contain every required column (order can differ, extra columns are ignored).
/// - `Gender` and `Birth Year` are optional; their presence is recorded in [`ColumnSet`].
pub fn ingest_csv_from_path(path: impl AsRef<Path>) -> Result<TripTable> {
    let file = File::open(path)?;
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(BufReader::new(file));
    ingest_csv_from_reader(&mut rdr)
}

/// Ingest trip records from an existing CSV reader.
pub fn ingest_csv_from_reader<R: std::io::Read>(rdr: &mut csv::Reader<R>) -> Result<TripTable> {
    let headers = rdr.headers()?.clone();
    let position = |name: &str| headers.iter().position(|h| h.trim() == name);

    // Map required columns -> CSV column indexes (allows re-ordered CSV columns).
    let mut idx = [0usize; REQUIRED.len()];
    for (slot, name) in idx.iter_mut().zip(REQUIRED) {
        *slot = position(name).ok_or_else(|| BikeshareError::SchemaMismatch {
            message: format!(
                "missing required column '{name}'. headers={:?}",
                headers.iter().collect::<Vec<_>>()
            ),
        })?;
    }
    let [start_idx, duration_idx, start_station_idx, end_station_idx, user_type_idx] = idx;
    let gender_idx = position(columns::GENDER);
    let birth_year_idx = position(columns::BIRTH_YEAR);

    let column_set = ColumnSet {
        gender: gender_idx.is_some(),
        birth_year: birth_year_idx.is_some(),
    };

    let mut records = Vec::new();
    for (row_idx0, result) in rdr.records().enumerate() {
        // Report 1-based row number for users; +1 again because header is row 1.
        let user_row = row_idx0 + 2;
        let record = result?;
        let cell = |i: usize| record.get(i).unwrap_or("").trim();
        let optional = |i: Option<usize>| i.map(cell).filter(|s| !s.is_empty());

        records.push(TripRecord {
            start_time: required_text(user_row, columns::START_TIME, cell(start_idx))?,
            trip_duration: parse_duration(user_row, cell(duration_idx))?,
            start_station: required_text(user_row, columns::START_STATION, cell(start_station_idx))?,
            end_station: required_text(user_row, columns::END_STATION, cell(end_station_idx))?,
            user_type: optional(Some(user_type_idx)).map(str::to_owned),
            gender: optional(gender_idx).map(str::to_owned),
            birth_year: optional(birth_year_idx)
                .map(|raw| parse_birth_year(user_row, raw))
                .transpose()?,
        });
    }

    Ok(TripTable::new(column_set, records))
}

fn parse_error(row: usize, column: &str, raw: &str, message: impl Into<String>) -> BikeshareError {
    BikeshareError::ParseError {
        row,
        column: column.to_owned(),
        raw: raw.to_owned(),
        message: message.into(),
    }
}

fn required_text(row: usize, column: &str, raw: &str) -> Result<String> {
    if raw.is_empty() {
        return Err(parse_error(row, column, raw, "value is required"));
    }
    Ok(raw.to_owned())
}

fn parse_duration(row: usize, raw: &str) -> Result<f64> {
    let secs = raw
        .parse::<f64>()
        .map_err(|e| parse_error(row, columns::TRIP_DURATION, raw, e.to_string()))?;
    if !secs.is_finite() || secs < 0.0 {
        return Err(parse_error(
            row,
            columns::TRIP_DURATION,
            raw,
            "expected a non-negative number of seconds",
        ));
    }
    Ok(secs)
}

/// Accepts plain integers and the float encoding pandas writes for nullable integer columns
/// (`1989.0`).
fn parse_birth_year(row: usize, raw: &str) -> Result<i32> {
    if let Ok(year) = raw.parse::<i32>() {
        return Ok(year);
    }
    let value = raw
        .parse::<f64>()
        .map_err(|e| parse_error(row, columns::BIRTH_YEAR, raw, e.to_string()))?;
    if value.fract() != 0.0 || value < i32::MIN as f64 || value > i32::MAX as f64 {
        return Err(parse_error(row, columns::BIRTH_YEAR, raw, "expected a whole year"));
    }
    Ok(value as i32)
}

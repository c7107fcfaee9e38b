//! Per-record derived fields computed from the start timestamp.

use chrono::{Datelike, NaiveDate};

use crate::error::{BikeshareError, Result};
use crate::types::{DerivedFields, Trip, TripSet, TripTable};

/// Derive day-of-week, month and hour codes from a `YYYY-MM-DD HH:MM:SS` timestamp.
///
/// - `day_of_week` comes from the first 10 characters parsed as a calendar date (Monday = 0).
/// - `month` is the two characters at offset 5..7, taken verbatim.
/// - `hour_of_day` is the two characters at offset 11..13, taken verbatim.
///
/// Fails with [`BikeshareError::MalformedTimestamp`] (reported as record 0) when the date part
/// is not a valid calendar date or the string is too short to hold an hour. Use
/// [`derive_all`] to get the offending record index.
pub fn derive_fields(start_time: &str) -> Result<DerivedFields> {
    derive_at(0, start_time)
}

/// Annotate every record of `table` with its derived fields.
///
/// Stops at the first record whose timestamp is malformed; no record is skipped.
pub fn derive_all(table: TripTable) -> Result<TripSet> {
    let TripTable { columns, records } = table;
    let trips = records
        .into_iter()
        .enumerate()
        .map(|(row, record)| {
            let derived = derive_at(row, &record.start_time)?;
            Ok(Trip { record, derived })
        })
        .collect::<Result<Vec<_>>>()?;
    tracing::debug!(rows = trips.len(), "derived time fields");
    Ok(TripSet::new(columns, trips))
}

fn derive_at(row: usize, raw: &str) -> Result<DerivedFields> {
    let malformed = |message: &str| BikeshareError::MalformedTimestamp {
        row,
        raw: raw.to_owned(),
        message: message.to_owned(),
    };
    let number = |range: std::ops::Range<usize>, what: &str| {
        raw.get(range)
            .and_then(|s| s.parse::<u32>().ok())
            .ok_or_else(|| malformed(&format!("{what} is not a number")))
    };

    let year = number(0..4, "year")?;
    let month = number(5..7, "month")?;
    let day = number(8..10, "day")?;
    let year = i32::try_from(year).map_err(|_| malformed("year out of range"))?;
    let date = NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| malformed("not a valid calendar date"))?;

    let day_of_week = u8::try_from(date.weekday().num_days_from_monday())
        .map_err(|_| malformed("weekday out of range"))?;
    let month = raw.get(5..7).ok_or_else(|| malformed("missing month"))?;
    let hour = raw.get(11..13).ok_or_else(|| malformed("missing hour"))?;

    Ok(DerivedFields {
        day_of_week,
        month: month.to_owned(),
        hour_of_day: hour.to_owned(),
    })
}

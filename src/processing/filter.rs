//! Time filtering for [`crate::types::TripSet`].

use std::fmt;

use serde::Serialize;

use crate::processing::calendar;
use crate::types::TripSet;

/// Which trips to keep before aggregating.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum FilterSelection {
    /// Keep every trip.
    #[default]
    None,
    /// Keep trips whose month code equals this one exactly (e.g. `"03"`).
    Month(String),
    /// Keep trips starting on this weekday (Monday = 0).
    DayOfWeek(u8),
}

impl FilterSelection {
    /// Month filter from a month name (`"March"` -> `Month("03")`).
    pub fn month_named(name: &str) -> Option<Self> {
        calendar::month_code(name).map(Self::Month)
    }

    /// Day filter from a weekday name (`"Monday"` -> `DayOfWeek(0)`).
    pub fn day_named(name: &str) -> Option<Self> {
        calendar::day_index(name).map(Self::DayOfWeek)
    }
}

impl fmt::Display for FilterSelection {
    /// Label used in report titles: `No filter`, the month name or the weekday name.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("No filter"),
            Self::Month(code) => match calendar::month_name(code) {
                Ok(name) => f.write_str(name),
                Err(_) => write!(f, "Month {code}"),
            },
            Self::DayOfWeek(index) => match calendar::day_name(*index) {
                Ok(name) => f.write_str(name),
                Err(_) => write!(f, "Day {index}"),
            },
        }
    }
}

/// Returns a new [`TripSet`] containing only trips matching `selection`.
///
/// `FilterSelection::None` returns a copy of the whole set. The input is never modified.
pub fn apply_filter(set: &TripSet, selection: &FilterSelection) -> TripSet {
    let out = match selection {
        FilterSelection::None => set.clone(),
        FilterSelection::Month(code) => set.filter_trips(|t| t.derived.month == *code),
        FilterSelection::DayOfWeek(index) => set.filter_trips(|t| t.derived.day_of_week == *index),
    };
    tracing::debug!(
        filter = %selection,
        rows_in = set.row_count(),
        rows_out = out.row_count(),
        "applied time filter"
    );
    out
}

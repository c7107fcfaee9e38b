//! Core data model types for trip statistics.
//!
//! Loading produces a [`TripTable`] of raw [`TripRecord`]s. The deriver annotates every record
//! once with its [`DerivedFields`], producing a [`TripSet`]; filters and aggregations operate on
//! [`TripSet`] values only.

use serde::Serialize;

/// Dataset column names as they appear in the city CSV headers.
pub mod columns {
    pub const START_TIME: &str = "Start Time";
    pub const TRIP_DURATION: &str = "Trip Duration";
    pub const START_STATION: &str = "Start Station";
    pub const END_STATION: &str = "End Station";
    pub const USER_TYPE: &str = "User Type";
    pub const GENDER: &str = "Gender";
    pub const BIRTH_YEAR: &str = "Birth Year";
}

/// One row of a city's trip dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripRecord {
    /// Start timestamp, encoded as `YYYY-MM-DD HH:MM:SS`.
    pub start_time: String,
    /// Trip duration in seconds (non-negative).
    pub trip_duration: f64,
    pub start_station: String,
    pub end_station: String,
    /// Rider category, e.g. `Subscriber` or `Customer`.
    pub user_type: Option<String>,
    /// Only present in datasets that carry a gender column.
    pub gender: Option<String>,
    /// Only present in datasets that carry a birth-year column.
    pub birth_year: Option<i32>,
}

/// Values computed once per record from its start timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DerivedFields {
    /// ISO weekday index, Monday = 0 .. Sunday = 6.
    pub day_of_week: u8,
    /// Two-character month code, e.g. `"03"`.
    pub month: String,
    /// Two-character hour code, e.g. `"17"`.
    pub hour_of_day: String,
}

/// A trip record together with its derived fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trip {
    #[serde(flatten)]
    pub record: TripRecord,
    #[serde(flatten)]
    pub derived: DerivedFields,
}

/// Which optional columns a loaded dataset carries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ColumnSet {
    pub gender: bool,
    pub birth_year: bool,
}

impl ColumnSet {
    /// Columns of a dataset carrying both demographic columns.
    pub fn with_demographics() -> Self {
        Self {
            gender: true,
            birth_year: true,
        }
    }
}

/// A loaded, not yet derived, dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct TripTable {
    /// Optional columns present in the source.
    pub columns: ColumnSet,
    /// Records in file order.
    pub records: Vec<TripRecord>,
}

impl TripTable {
    /// Create a table from a column set and records.
    pub fn new(columns: ColumnSet, records: Vec<TripRecord>) -> Self {
        Self { columns, records }
    }

    /// Number of records in the table.
    pub fn row_count(&self) -> usize {
        self.records.len()
    }
}

/// An in-memory set of derived trips.
///
/// Trips keep the order they were loaded in. A set is never mutated once built; filtering
/// produces a new set.
#[derive(Debug, Clone, PartialEq)]
pub struct TripSet {
    columns: ColumnSet,
    trips: Vec<Trip>,
}

impl TripSet {
    /// Create a set from a column set and derived trips.
    pub fn new(columns: ColumnSet, trips: Vec<Trip>) -> Self {
        Self { columns, trips }
    }

    /// Optional columns available in this set.
    pub fn columns(&self) -> ColumnSet {
        self.columns
    }

    /// Trips in original order.
    pub fn trips(&self) -> &[Trip] {
        &self.trips
    }

    /// Number of trips in the set.
    pub fn row_count(&self) -> usize {
        self.trips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }

    /// Create a new set containing only trips that match `predicate`.
    ///
    /// The returned set preserves the column set and the relative order of trips.
    pub fn filter_trips<F>(&self, mut predicate: F) -> Self
    where
        F: FnMut(&Trip) -> bool,
    {
        let trips = self
            .trips
            .iter()
            .filter(|trip| predicate(trip))
            .cloned()
            .collect();
        Self {
            columns: self.columns,
            trips,
        }
    }

    /// Up to `len` trips starting at `offset`. Returns an empty slice past the end.
    pub fn window(&self, offset: usize, len: usize) -> &[Trip] {
        let start = offset.min(self.trips.len());
        let end = offset.saturating_add(len).min(self.trips.len());
        &self.trips[start..end]
    }
}

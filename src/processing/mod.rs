//! The statistics engine.
//!
//! The processing layer operates on [`crate::types::TripSet`] values built by the deriver and is
//! purely in-memory:
//!
//! - [`derive`]: per-record day-of-week / month / hour codes
//! - [`filter`]: month or day-of-week restriction
//! - [`aggregate`]: the summary statistics
//! - [`reduce`]: tally / mode / sum / mean primitives the aggregations share
//! - [`calendar`]: static month, weekday and hour name tables
//!
//! ## Example: derive → filter → aggregate
//!
//! ```rust
//! use bikeshare_stats::processing::{apply_filter, derive_all, most_popular_month, FilterSelection};
//! use bikeshare_stats::types::{ColumnSet, TripRecord, TripTable};
//!
//! let trip = |start: &str| TripRecord {
//!     start_time: start.to_string(),
//!     trip_duration: 600.0,
//!     start_station: "Canal St".to_string(),
//!     end_station: "Clark St".to_string(),
//!     user_type: Some("Subscriber".to_string()),
//!     gender: None,
//!     birth_year: None,
//! };
//! let table = TripTable::new(
//!     ColumnSet::default(),
//!     vec![trip("2017-03-06 08:00:00"), trip("2017-03-07 09:00:00"), trip("2017-01-02 10:00:00")],
//! );
//!
//! let set = derive_all(table).unwrap();
//! let mondays = apply_filter(&set, &FilterSelection::day_named("Monday").unwrap());
//! assert_eq!(mondays.row_count(), 2);
//!
//! let top = most_popular_month(&set).unwrap();
//! assert_eq!((top.value, top.count), ("March", 2));
//! ```

pub mod aggregate;
pub mod calendar;
pub mod derive;
pub mod filter;
pub mod reduce;

pub use aggregate::{
    birth_year_stats, gender_counts, most_popular_day, most_popular_hour, most_popular_month,
    most_popular_route, station_counts, station_popularity, total_trips, trip_durations,
    user_type_counts, BirthYearStats, CategoryCounts, ClockDuration, DurationStats, Endpoint,
    Ranked, Route, StationPopularity, TotalDuration,
};
pub use derive::{derive_all, derive_fields};
pub use filter::{apply_filter, FilterSelection};

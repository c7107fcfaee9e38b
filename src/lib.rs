//! `bikeshare-stats` computes descriptive statistics over bike-share trip records for one city,
//! optionally restricted to a single month or day of the week.
//!
//! The pipeline is:
//!
//! 1. **Load** a city's CSV into a [`types::TripTable`] ([`ingestion::load_city`]).
//! 2. **Derive** per-record day-of-week, month and hour codes from the start timestamp
//!    ([`processing::derive_all`]), producing a [`types::TripSet`].
//! 3. **Filter** by a [`processing::FilterSelection`] ([`processing::apply_filter`]).
//! 4. **Aggregate**: each statistic in [`processing::aggregate`] is an independent pure function
//!    of the filtered set.
//! 5. **Present** the results ([`report::Summary`], [`report::render`], [`report::RawDataPager`]).
//!
//! ## Datasets
//!
//! Each city is a CSV file with the columns `Start Time`, `Trip Duration`, `Start Station`,
//! `End Station` and `User Type`. Chicago and New York City also carry `Gender` and
//! `Birth Year`; the loader detects these from the headers and the demographic statistics are
//! skipped for datasets without them.
//!
//! ## Quick example
//!
//! ```no_run
//! use bikeshare_stats::ingestion::{load_and_derive, City, LoadOptions};
//! use bikeshare_stats::processing::{apply_filter, FilterSelection};
//! use bikeshare_stats::report::{render, title, Summary};
//!
//! # fn main() -> Result<(), bikeshare_stats::BikeshareError> {
//! let set = load_and_derive(City::Chicago, &LoadOptions::in_dir("data"))?;
//! let selection = FilterSelection::month_named("March").unwrap();
//! let march = apply_filter(&set, &selection);
//!
//! let summary = Summary::compute(&march, &selection)?;
//! for line in render(&title(City::Chicago, &selection), &summary) {
//!     println!("{line}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ### Empty results
//!
//! Aggregations that need a maximum, sum or mean return
//! [`BikeshareError::EmptyResultSet`] for a filter that matched nothing, rather than a default
//! value. [`BikeshareError::is_recoverable`] tells callers they can ask for another filter.
//!
//! ## Modules
//!
//! - [`ingestion`]: city catalog, CSV loading and load observers
//! - [`types`]: trip records and sets
//! - [`processing`]: deriver, time filter and aggregations
//! - [`report`]: summary rendering and raw-record paging
//! - [`session`]: interactive prompts
//! - [`error`]: the shared error type

pub mod error;
pub mod ingestion;
pub mod processing;
pub mod report;
pub mod session;
pub mod types;

pub use error::{BikeshareError, Result};

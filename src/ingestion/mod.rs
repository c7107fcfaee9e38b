//! Record loading.
//!
//! Most callers should use [`load_city`] (from [`loader`]) which:
//!
//! - resolves a [`City`] to its dataset file under [`LoadOptions::data_dir`]
//! - reads the CSV into an in-memory [`crate::types::TripTable`]
//! - optionally reports success/failure/alerts to a [`LoadObserver`]
//!
//! The CSV reader itself lives in [`csv`].

pub mod city;
pub mod csv;
pub mod loader;
pub mod observability;

pub use city::City;
pub use loader::{load_and_derive, load_city, LoadOptions};
pub use observability::{
    CompositeObserver, LoadContext, LoadObserver, LoadSeverity, LoadStats, TracingObserver,
};

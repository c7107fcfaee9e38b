//! Unified loading entrypoint.
//!
//! Most callers should use [`load_city`], which reads a city's dataset from
//! [`LoadOptions::data_dir`] into a [`crate::types::TripTable`], or [`load_and_derive`], which
//! additionally runs the deriver.
//!
//! If a [`LoadObserver`] is configured, success/failure/alerts are reported to it.

use std::error::Error as StdError;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use crate::error::{BikeshareError, Result};
use crate::processing::derive::derive_all;
use crate::types::{TripSet, TripTable};

use super::city::City;
use super::csv::ingest_csv_from_path;
use super::observability::{LoadContext, LoadObserver, LoadSeverity, LoadStats};

/// Options controlling dataset loading.
///
/// Use [`Default`] for common cases.
#[derive(Clone)]
pub struct LoadOptions {
    /// Directory holding the city CSV files.
    pub data_dir: PathBuf,
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn LoadObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: LoadSeverity,
}

impl fmt::Debug for LoadOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadOptions")
            .field("data_dir", &self.data_dir)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            observer: None,
            alert_at_or_above: LoadSeverity::Critical,
        }
    }
}

impl LoadOptions {
    /// Options reading from `data_dir`, everything else default.
    pub fn in_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Default::default()
        }
    }

    /// Full path of a city's dataset under these options.
    pub fn dataset_path(&self, city: City) -> PathBuf {
        self.data_dir.join(city.file_name())
    }
}

/// Load a city's dataset.
///
/// When an observer is configured, this function reports:
///
/// - `on_success` on success, with row count stats
/// - `on_failure` on failure, with a computed severity
/// - `on_alert` on failure when the computed severity is >= `options.alert_at_or_above`
///
/// ```no_run
/// use bikeshare_stats::ingestion::{load_city, City, LoadOptions};
///
/// # fn main() -> Result<(), bikeshare_stats::BikeshareError> {
/// let table = load_city(City::Chicago, &LoadOptions::in_dir("data"))?;
/// println!("rows={}", table.row_count());
/// # Ok(())
/// # }
/// ```
pub fn load_city(city: City, options: &LoadOptions) -> Result<TripTable> {
    let ctx = LoadContext {
        city,
        path: options.dataset_path(city),
    };

    let result = ingest_csv_from_path(&ctx.path);

    if let Some(obs) = options.observer.as_ref() {
        match &result {
            Ok(table) => obs.on_success(
                &ctx,
                LoadStats {
                    rows: table.row_count(),
                    demographics: table.columns.gender && table.columns.birth_year,
                },
            ),
            Err(e) => {
                let sev = severity_for_error(e);
                obs.on_failure(&ctx, sev, e);
                if sev >= options.alert_at_or_above {
                    obs.on_alert(&ctx, sev, e);
                }
            }
        }
    }

    result
}

/// Load a city's dataset and annotate every record with its derived fields.
pub fn load_and_derive(city: City, options: &LoadOptions) -> Result<TripSet> {
    let table = load_city(city, options)?;
    derive_all(table)
}

fn severity_for_error(e: &BikeshareError) -> LoadSeverity {
    match e {
        BikeshareError::Io(_) => LoadSeverity::Critical,
        BikeshareError::Csv(err) => match err.kind() {
            ::csv::ErrorKind::Io(_) => LoadSeverity::Critical,
            _ if error_chain_contains_io(err) => LoadSeverity::Critical,
            _ => LoadSeverity::Error,
        },
        _ => LoadSeverity::Error,
    }
}

fn error_chain_contains_io(e: &(dyn StdError + 'static)) -> bool {
    let mut cur: Option<&(dyn StdError + 'static)> = Some(e);
    while let Some(err) = cur {
        if err.is::<std::io::Error>() {
            return true;
        }
        cur = err.source();
    }
    false
}

//! Summary statistics over a (derived, filtered) [`TripSet`].
//!
//! Every function here is independent of the others: none mutate the set and they can be
//! evaluated in any order. Frequency rankings pick the lowest key among equally frequent keys
//! (see [`reduce::mode`]). Aggregations that need a maximum, sum or mean fail with
//! [`BikeshareError::EmptyResultSet`] on an empty set.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::error::{BikeshareError, Result};
use crate::processing::calendar;
use crate::processing::reduce::{self, mode, tally};
use crate::types::{columns, TripSet};

/// Per-category trip counts in ascending category order.
pub type CategoryCounts = BTreeMap<String, usize>;

/// The most frequent value of some field together with its share of `total`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ranked<T> {
    pub value: T,
    /// Trips with this value.
    pub count: usize,
    /// Trips the share is computed against.
    pub total: usize,
}

impl<T> Ranked<T> {
    /// `count / total * 100`.
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.count as f64 / self.total as f64 * 100.0
    }

    fn map<U>(self, f: impl FnOnce(T) -> U) -> Ranked<U> {
        Ranked {
            value: f(self.value),
            count: self.count,
            total: self.total,
        }
    }
}

/// A start/end station pair.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Route {
    pub start: String,
    pub end: String,
}

/// Which end of a trip a station count refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    End,
}

/// Total duration split into 365-day years, days, hours, minutes and seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TotalDuration {
    pub years: u64,
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    /// Remaining seconds, fractional part kept.
    pub seconds: f64,
}

impl TotalDuration {
    pub fn from_seconds(total: f64) -> Self {
        let (minutes, seconds) = divmod(total, 60.0);
        let (hours, minutes) = divmod(minutes, 60.0);
        let (days, hours) = divmod(hours, 24.0);
        let (years, days) = divmod(days, 365.0);
        Self {
            years: years as u64,
            days: days as u64,
            hours: hours as u64,
            minutes: minutes as u64,
            seconds,
        }
    }
}

impl fmt::Display for TotalDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} years {:02} days {:02} hrs {:02} min {:02} sec",
            self.years,
            self.days,
            self.hours,
            self.minutes,
            self.seconds.trunc() as u64
        )
    }
}

/// Duration split into hours, minutes and seconds only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClockDuration {
    pub hours: u64,
    pub minutes: u64,
    /// Remaining seconds, fractional part kept.
    pub seconds: f64,
}

impl ClockDuration {
    pub fn from_seconds(total: f64) -> Self {
        let (minutes, seconds) = divmod(total, 60.0);
        let (hours, minutes) = divmod(minutes, 60.0);
        Self {
            hours: hours as u64,
            minutes: minutes as u64,
            seconds,
        }
    }
}

impl fmt::Display for ClockDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} hrs {:02} min {:02} sec",
            self.hours,
            self.minutes,
            self.seconds.trunc() as u64
        )
    }
}

fn divmod(value: f64, by: f64) -> (f64, f64) {
    (value.div_euclid(by), value.rem_euclid(by))
}

/// Sum and mean of trip durations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DurationStats {
    pub total_seconds: f64,
    pub mean_seconds: f64,
    pub total: TotalDuration,
    pub average: ClockDuration,
}

/// Most popular start and end stations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationPopularity {
    pub start: Ranked<String>,
    pub end: Ranked<String>,
}

/// Earliest, most recent and most common rider birth year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BirthYearStats {
    pub earliest: i32,
    pub most_recent: i32,
    /// Share is computed against trips with a known birth year.
    pub most_common: Ranked<i32>,
}

/// Number of trips in the set.
pub fn total_trips(set: &TripSet) -> usize {
    set.row_count()
}

fn ranked<K: Ord + Clone>(
    counts: &BTreeMap<K, usize>,
    total: usize,
    aggregation: &'static str,
) -> Result<Ranked<K>> {
    let (value, count) = mode(counts).ok_or(BikeshareError::EmptyResultSet { aggregation })?;
    Ok(Ranked {
        value,
        count,
        total,
    })
}

/// Calendar name of the month with the most trips.
pub fn most_popular_month(set: &TripSet) -> Result<Ranked<&'static str>> {
    let counts = tally(set.trips().iter().map(|t| t.derived.month.as_str()));
    let top = ranked(&counts, set.row_count(), "most popular month")?;
    let name = calendar::month_name(top.value)?;
    Ok(top.map(|_| name))
}

/// Weekday name with the most trips.
pub fn most_popular_day(set: &TripSet) -> Result<Ranked<&'static str>> {
    let counts = tally(set.trips().iter().map(|t| t.derived.day_of_week));
    let top = ranked(&counts, set.row_count(), "most popular day of week")?;
    let name = calendar::day_name(top.value)?;
    Ok(top.map(|_| name))
}

/// Start hour with the most trips, as a 12-hour clock label (`05 PM`).
pub fn most_popular_hour(set: &TripSet) -> Result<Ranked<String>> {
    let counts = tally(set.trips().iter().map(|t| t.derived.hour_of_day.as_str()));
    let top = ranked(&counts, set.row_count(), "most popular hour of day")?;
    let label = calendar::hour_label(top.value)?;
    Ok(top.map(|_| label))
}

/// Total and mean trip duration.
pub fn trip_durations(set: &TripSet) -> Result<DurationStats> {
    let durations = || set.trips().iter().map(|t| t.record.trip_duration);
    let empty = || BikeshareError::EmptyResultSet {
        aggregation: "trip duration",
    };
    let total_seconds = reduce::sum(durations()).ok_or_else(empty)?;
    let mean_seconds = reduce::mean(durations()).ok_or_else(empty)?;
    Ok(DurationStats {
        total_seconds,
        mean_seconds,
        total: TotalDuration::from_seconds(total_seconds),
        average: ClockDuration::from_seconds(mean_seconds),
    })
}

/// Trip counts for every distinct station at one end of the trip.
pub fn station_counts(set: &TripSet, endpoint: Endpoint) -> CategoryCounts {
    tally(set.trips().iter().map(|t| match endpoint {
        Endpoint::Start => t.record.start_station.clone(),
        Endpoint::End => t.record.end_station.clone(),
    }))
}

/// Most popular start station and end station, ranked independently.
pub fn station_popularity(set: &TripSet) -> Result<StationPopularity> {
    let total = set.row_count();
    Ok(StationPopularity {
        start: ranked(
            &station_counts(set, Endpoint::Start),
            total,
            "most popular start station",
        )?,
        end: ranked(
            &station_counts(set, Endpoint::End),
            total,
            "most popular end station",
        )?,
    })
}

/// Most frequent start/end station pair.
pub fn most_popular_route(set: &TripSet) -> Result<Ranked<Route>> {
    let counts = tally(
        set.trips()
            .iter()
            .map(|t| (t.record.start_station.as_str(), t.record.end_station.as_str())),
    );
    let top = ranked(&counts, set.row_count(), "most popular trip")?;
    Ok(top.map(|(start, end)| Route {
        start: start.to_owned(),
        end: end.to_owned(),
    }))
}

/// Trips per user type; records without a user type are not counted.
pub fn user_type_counts(set: &TripSet) -> CategoryCounts {
    tally(
        set.trips()
            .iter()
            .filter_map(|t| t.record.user_type.clone()),
    )
}

/// Trips per gender; records without a gender are not counted.
///
/// Fails with [`BikeshareError::UnsupportedColumn`] when the set has no gender column.
pub fn gender_counts(set: &TripSet) -> Result<CategoryCounts> {
    if !set.columns().gender {
        return Err(BikeshareError::UnsupportedColumn {
            column: columns::GENDER,
        });
    }
    Ok(tally(
        set.trips().iter().filter_map(|t| t.record.gender.clone()),
    ))
}

/// Earliest, most recent and most common birth year among trips with a known birth year.
///
/// Fails with [`BikeshareError::UnsupportedColumn`] when the set has no birth-year column and
/// with [`BikeshareError::EmptyResultSet`] when no trip has a birth year.
pub fn birth_year_stats(set: &TripSet) -> Result<BirthYearStats> {
    if !set.columns().birth_year {
        return Err(BikeshareError::UnsupportedColumn {
            column: columns::BIRTH_YEAR,
        });
    }
    let years: Vec<i32> = set
        .trips()
        .iter()
        .filter_map(|t| t.record.birth_year)
        .collect();
    let empty = BikeshareError::EmptyResultSet {
        aggregation: "birth year",
    };
    let (Some(&earliest), Some(&most_recent)) = (years.iter().min(), years.iter().max()) else {
        return Err(empty);
    };
    let most_common = ranked(&tally(years.iter().copied()), years.len(), "birth year")?;
    Ok(BirthYearStats {
        earliest,
        most_recent,
        most_common,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::derive::derive_all;
    use crate::types::{ColumnSet, TripRecord, TripTable};

    fn trip(start_time: &str, duration: f64, from: &str, to: &str) -> TripRecord {
        TripRecord {
            start_time: start_time.to_string(),
            trip_duration: duration,
            start_station: from.to_string(),
            end_station: to.to_string(),
            user_type: Some("Subscriber".to_string()),
            gender: None,
            birth_year: None,
        }
    }

    fn set_of(records: Vec<TripRecord>) -> TripSet {
        derive_all(TripTable::new(ColumnSet::default(), records)).unwrap()
    }

    fn empty_set() -> TripSet {
        TripSet::new(ColumnSet::with_demographics(), Vec::new())
    }

    fn is_empty_result<T: std::fmt::Debug>(r: Result<T>) -> bool {
        matches!(r, Err(BikeshareError::EmptyResultSet { .. }))
    }

    #[test]
    fn most_popular_month_is_march_for_three_march_two_january() {
        let set = set_of(vec![
            trip("2017-03-01 08:00:00", 60.0, "A", "B"),
            trip("2017-01-02 08:00:00", 60.0, "A", "B"),
            trip("2017-03-02 08:00:00", 60.0, "A", "B"),
            trip("2017-01-03 08:00:00", 60.0, "A", "B"),
            trip("2017-03-03 08:00:00", 60.0, "A", "B"),
        ]);
        let top = most_popular_month(&set).unwrap();
        assert_eq!(top.value, "March");
        assert_eq!(top.count, 3);
        assert_eq!(top.total, 5);
    }

    #[test]
    fn month_tie_goes_to_earlier_month() {
        let set = set_of(vec![
            trip("2017-05-01 08:00:00", 60.0, "A", "B"),
            trip("2017-02-01 08:00:00", 60.0, "A", "B"),
        ]);
        assert_eq!(most_popular_month(&set).unwrap().value, "February");
    }

    #[test]
    fn most_popular_day_and_hour() {
        let set = set_of(vec![
            trip("2017-03-06 17:10:00", 60.0, "A", "B"), // Monday
            trip("2017-03-07 17:20:00", 60.0, "A", "B"), // Tuesday
            trip("2017-03-13 08:30:00", 60.0, "A", "B"), // Monday
        ]);
        let day = most_popular_day(&set).unwrap();
        assert_eq!((day.value, day.count), ("Monday", 2));
        let hour = most_popular_hour(&set).unwrap();
        assert_eq!((hour.value.as_str(), hour.count), ("05 PM", 2));
    }

    #[test]
    fn day_tie_goes_to_earlier_weekday() {
        let set = set_of(vec![
            trip("2017-03-12 09:00:00", 60.0, "A", "B"), // Sunday
            trip("2017-03-08 09:00:00", 60.0, "A", "B"), // Wednesday
        ]);
        assert_eq!(most_popular_day(&set).unwrap().value, "Wednesday");
    }

    #[test]
    fn unknown_month_code_surfaces_at_lookup() {
        // Month "13" cannot pass date validation, so patch the derived field directly.
        let mut set = set_of(vec![trip("2017-03-01 08:00:00", 60.0, "A", "B")]);
        let mut trips = set.trips().to_vec();
        trips[0].derived.month = "13".to_string();
        set = TripSet::new(set.columns(), trips);
        assert!(matches!(
            most_popular_month(&set),
            Err(BikeshareError::UnknownCode { field: "month", .. })
        ));
    }

    #[test]
    fn durations_decompose_total_and_mean() {
        let set = set_of(vec![
            trip("2017-01-01 00:00:00", 60.0, "A", "B"),
            trip("2017-01-01 00:00:00", 3660.0, "A", "B"),
            trip("2017-01-01 00:00:00", 86400.0, "A", "B"),
        ]);
        let stats = trip_durations(&set).unwrap();
        assert_eq!(stats.total_seconds, 90120.0);
        assert_eq!(
            stats.total,
            TotalDuration {
                years: 0,
                days: 1,
                hours: 1,
                minutes: 2,
                seconds: 0.0
            }
        );
        assert_eq!(stats.mean_seconds, 30040.0);
        assert_eq!(
            stats.average,
            ClockDuration {
                hours: 8,
                minutes: 20,
                seconds: 40.0
            }
        );
        assert_eq!(stats.total.to_string(), "0 years 01 days 01 hrs 02 min 00 sec");
        assert_eq!(stats.average.to_string(), "8 hrs 20 min 40 sec");
    }

    #[test]
    fn total_duration_rolls_over_into_years() {
        let secs = 2.0 * 365.0 * 86400.0 + 3.0 * 86400.0 + 4.0 * 3600.0 + 5.0 * 60.0 + 6.5;
        let total = TotalDuration::from_seconds(secs);
        assert_eq!((total.years, total.days, total.hours, total.minutes), (2, 3, 4, 5));
        assert_eq!(total.seconds, 6.5);
        assert_eq!(total.to_string(), "2 years 03 days 04 hrs 05 min 06 sec");
    }

    #[test]
    fn mean_keeps_fractional_seconds() {
        let avg = ClockDuration::from_seconds(100.75);
        assert_eq!((avg.hours, avg.minutes), (0, 1));
        assert_eq!(avg.seconds, 40.75);
        assert_eq!(avg.to_string(), "0 hrs 01 min 40 sec");
    }

    #[test]
    fn station_popularity_ranks_each_end_independently() {
        let set = set_of(vec![
            trip("2017-01-01 00:00:00", 1.0, "Clark St", "Lake St"),
            trip("2017-01-01 00:00:00", 1.0, "Clark St", "Canal St"),
            trip("2017-01-01 00:00:00", 1.0, "State St", "Canal St"),
            trip("2017-01-01 00:00:00", 1.0, "Clark St", "Canal St"),
        ]);
        let pop = station_popularity(&set).unwrap();
        assert_eq!(pop.start.value, "Clark St");
        assert_eq!(pop.start.count, 3);
        assert!((pop.start.percentage() - 75.0).abs() < 1e-9);
        assert_eq!(pop.end.value, "Canal St");
        assert_eq!(pop.end.count, 3);
    }

    #[test]
    fn station_percentages_sum_to_one_hundred() {
        let set = set_of(
            ["A", "B", "C", "A", "D", "B", "A"]
                .iter()
                .zip(["X", "Y", "X", "Z", "Z", "X", "W"])
                .map(|(s, e)| trip("2017-01-01 00:00:00", 1.0, s, e))
                .collect(),
        );
        let total = set.row_count() as f64;
        for endpoint in [Endpoint::Start, Endpoint::End] {
            let pct: f64 = station_counts(&set, endpoint)
                .values()
                .map(|c| *c as f64 / total * 100.0)
                .sum();
            assert!((pct - 100.0).abs() < 1e-9, "{endpoint:?} summed to {pct}");
        }
    }

    #[test]
    fn station_and_route_ties_are_deterministic() {
        let records = vec![
            trip("2017-01-01 00:00:00", 1.0, "Zed", "Beta"),
            trip("2017-01-01 00:00:00", 1.0, "Alpha", "Omega"),
            trip("2017-01-01 00:00:00", 1.0, "Alpha", "Beta"),
            trip("2017-01-01 00:00:00", 1.0, "Zed", "Omega"),
        ];
        let set = set_of(records.clone());
        let reversed = set_of(records.into_iter().rev().collect());
        for s in [&set, &reversed] {
            let pop = station_popularity(s).unwrap();
            assert_eq!(pop.start.value, "Alpha");
            assert_eq!(pop.end.value, "Beta");
            let route = most_popular_route(s).unwrap();
            assert_eq!(
                route.value,
                Route {
                    start: "Alpha".to_string(),
                    end: "Beta".to_string()
                }
            );
        }
    }

    #[test]
    fn most_popular_route_counts_pairs() {
        let set = set_of(vec![
            trip("2017-01-01 00:00:00", 1.0, "A", "B"),
            trip("2017-01-01 00:00:00", 1.0, "B", "A"),
            trip("2017-01-01 00:00:00", 1.0, "B", "A"),
            trip("2017-01-01 00:00:00", 1.0, "A", "A"),
        ]);
        let route = most_popular_route(&set).unwrap();
        assert_eq!(route.value.start, "B");
        assert_eq!(route.value.end, "A");
        assert_eq!(route.count, 2);
        assert!((route.percentage() - 50.0).abs() < 1e-9);
    }

    #[test]
    fn user_type_counts_report_every_value() {
        let mut records = vec![
            trip("2017-01-01 00:00:00", 1.0, "A", "B"),
            trip("2017-01-01 00:00:00", 1.0, "A", "B"),
            trip("2017-01-01 00:00:00", 1.0, "A", "B"),
        ];
        records[1].user_type = Some("Customer".to_string());
        records[2].user_type = None;
        let counts = user_type_counts(&set_of(records));
        assert_eq!(
            counts.into_iter().collect::<Vec<_>>(),
            vec![("Customer".to_string(), 1), ("Subscriber".to_string(), 1)]
        );
    }

    #[test]
    fn demographics_require_their_columns() {
        let set = set_of(vec![trip("2017-01-01 00:00:00", 1.0, "A", "B")]);
        assert!(matches!(
            gender_counts(&set),
            Err(BikeshareError::UnsupportedColumn { column: "Gender" })
        ));
        assert!(matches!(
            birth_year_stats(&set),
            Err(BikeshareError::UnsupportedColumn { column: "Birth Year" })
        ));
    }

    fn demographic_set() -> TripSet {
        let rows = [
            (Some("Male"), Some(1985)),
            (Some("Female"), Some(1990)),
            (None, None),
            (Some("Male"), Some(1990)),
            (Some("Female"), Some(1962)),
            (Some("Male"), Some(1985)),
        ];
        let records = rows
            .iter()
            .map(|(g, y)| TripRecord {
                gender: g.map(str::to_string),
                birth_year: *y,
                ..trip("2017-01-01 00:00:00", 1.0, "A", "B")
            })
            .collect();
        derive_all(TripTable::new(ColumnSet::with_demographics(), records)).unwrap()
    }

    #[test]
    fn gender_counts_skip_missing() {
        let counts = gender_counts(&demographic_set()).unwrap();
        assert_eq!(counts.get("Male"), Some(&3));
        assert_eq!(counts.get("Female"), Some(&2));
        assert_eq!(counts.values().sum::<usize>(), 5);
    }

    #[test]
    fn birth_year_stats_use_known_years() {
        let stats = birth_year_stats(&demographic_set()).unwrap();
        assert_eq!(stats.earliest, 1962);
        assert_eq!(stats.most_recent, 1990);
        // 1985 and 1990 both appear twice; the earlier year wins.
        assert_eq!(stats.most_common.value, 1985);
        assert_eq!(stats.most_common.count, 2);
        assert_eq!(stats.most_common.total, 5);
        assert!((stats.most_common.percentage() - 40.0).abs() < 1e-9);
    }

    #[test]
    fn birth_years_all_missing_is_empty_result() {
        let records = vec![trip("2017-01-01 00:00:00", 1.0, "A", "B")];
        let set = derive_all(TripTable::new(ColumnSet::with_demographics(), records)).unwrap();
        assert!(is_empty_result(birth_year_stats(&set)));
    }

    #[test]
    fn empty_set_fails_instead_of_defaulting() {
        let set = empty_set();
        assert_eq!(total_trips(&set), 0);
        assert!(is_empty_result(most_popular_month(&set)));
        assert!(is_empty_result(most_popular_day(&set)));
        assert!(is_empty_result(most_popular_hour(&set)));
        assert!(is_empty_result(trip_durations(&set)));
        assert!(is_empty_result(station_popularity(&set)));
        assert!(is_empty_result(most_popular_route(&set)));
        assert!(is_empty_result(birth_year_stats(&set)));
        assert!(user_type_counts(&set).is_empty());
        assert!(gender_counts(&set).unwrap().is_empty());
    }
}

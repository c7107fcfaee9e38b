//! Presentation of computed statistics.
//!
//! [`Summary::compute`] runs every aggregation that applies to a filtered [`TripSet`];
//! [`render`] turns a summary into the fixed, ordered sequence of display lines. Summaries also
//! serialize to JSON through `serde`.

mod pager;

use serde::Serialize;

use crate::error::{BikeshareError, Result};
use crate::ingestion::City;
use crate::processing::{
    birth_year_stats, gender_counts, most_popular_day, most_popular_hour, most_popular_month,
    most_popular_route, station_popularity, total_trips, trip_durations, user_type_counts,
    BirthYearStats, CategoryCounts, DurationStats, FilterSelection, Ranked, Route,
    StationPopularity,
};
use crate::types::TripSet;

pub use pager::{render_window, RawDataPager, DEFAULT_PAGE_SIZE};

/// Every statistic reported for one city and filter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub total_trips: usize,
    /// Omitted when the set is already restricted to one month.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub popular_month: Option<Ranked<&'static str>>,
    /// Omitted when the set is already restricted to one weekday.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub popular_day: Option<Ranked<&'static str>>,
    pub popular_hour: Ranked<String>,
    pub durations: DurationStats,
    pub stations: StationPopularity,
    pub route: Ranked<Route>,
    pub user_types: CategoryCounts,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genders: Option<CategoryCounts>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_years: Option<BirthYearStats>,
}

impl Summary {
    /// Compute the summary of a set already filtered by `selection`.
    ///
    /// Fails with [`BikeshareError::EmptyResultSet`] when the set has no trips. Demographic
    /// statistics are included only when the set carries those columns; a birth-year column
    /// with no known years in this set leaves `birth_years` empty.
    pub fn compute(set: &TripSet, selection: &FilterSelection) -> Result<Self> {
        if set.is_empty() {
            return Err(BikeshareError::EmptyResultSet {
                aggregation: "summary",
            });
        }

        let popular_month = match selection {
            FilterSelection::Month(_) => None,
            _ => Some(most_popular_month(set)?),
        };
        let popular_day = match selection {
            FilterSelection::DayOfWeek(_) => None,
            _ => Some(most_popular_day(set)?),
        };
        let genders = if set.columns().gender {
            Some(gender_counts(set)?)
        } else {
            None
        };
        let birth_years = if set.columns().birth_year {
            match birth_year_stats(set) {
                Ok(stats) => Some(stats),
                Err(BikeshareError::EmptyResultSet { .. }) => None,
                Err(e) => return Err(e),
            }
        } else {
            None
        };

        Ok(Self {
            total_trips: total_trips(set),
            popular_month,
            popular_day,
            popular_hour: most_popular_hour(set)?,
            durations: trip_durations(set)?,
            stations: station_popularity(set)?,
            route: most_popular_route(set)?,
            user_types: user_type_counts(set),
            genders,
            birth_years,
        })
    }
}

/// Report heading, e.g. `CHICAGO -- MARCH` or `WASHINGTON -- NO FILTER`.
pub fn title(city: City, selection: &FilterSelection) -> String {
    format!(
        "{} -- {}",
        city.display_name(),
        selection.to_string().to_uppercase()
    )
}

/// Render a summary as display lines, in report order.
pub fn render(title: &str, summary: &Summary) -> Vec<String> {
    let mut lines = vec![
        title.to_string(),
        format!("Total trips: {}", group_thousands(summary.total_trips)),
    ];

    if let Some(month) = &summary.popular_month {
        lines.push(format!("Most popular start time by month: {}", month.value));
    }
    if let Some(day) = &summary.popular_day {
        lines.push(format!("Most popular start time by day of week: {}", day.value));
    }
    lines.push(format!(
        "Most popular start time by hour of day: {}",
        summary.popular_hour.value
    ));

    lines.push(format!("Total trip duration: {}", summary.durations.total));
    lines.push(format!("Average trip duration: {}", summary.durations.average));

    let start = &summary.stations.start;
    let end = &summary.stations.end;
    lines.push(format!("Most popular start station: {} {}", start.value, share(start)));
    lines.push(format!("Most popular end station: {} {}", end.value, share(end)));

    let route = &summary.route;
    lines.push("Most common trip start and stop:".to_string());
    lines.push(format!("  Start station: {}", route.value.start));
    lines.push(format!("  Stop station: {}", route.value.end));
    lines.push(format!("  {}", share(route)));

    lines.push("Trips by user type:".to_string());
    push_counts(&mut lines, &summary.user_types);

    if let Some(genders) = &summary.genders {
        lines.push("Trips by gender:".to_string());
        push_counts(&mut lines, genders);
    }

    if let Some(years) = &summary.birth_years {
        lines.push(format!("Earliest year of birth: {}", years.earliest));
        lines.push(format!("Most recent year of birth: {}", years.most_recent));
        lines.push(format!(
            "Most common year of birth: {} {}",
            years.most_common.value,
            share(&years.most_common)
        ));
    }

    lines
}

fn share<T>(ranked: &Ranked<T>) -> String {
    format!(
        "({} trips, {:.2}% of trips)",
        group_thousands(ranked.count),
        ranked.percentage()
    )
}

fn push_counts(lines: &mut Vec<String>, counts: &CategoryCounts) {
    for (category, count) in counts {
        lines.push(format!("  {category}: {}", group_thousands(*count)));
    }
}

/// Format a count with comma thousands separators (`1234567` -> `1,234,567`).
pub fn group_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

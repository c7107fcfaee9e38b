//! The fixed catalog of supported cities.

use std::fmt;

use serde::Serialize;

/// A city with a published trip dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum City {
    Chicago,
    NewYorkCity,
    Washington,
}

impl City {
    /// All supported cities, in prompt order.
    pub const ALL: [City; 3] = [City::Chicago, City::NewYorkCity, City::Washington];

    /// Parse a city name typed by a user (case-insensitive, surrounding whitespace ignored).
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "chicago" => Some(Self::Chicago),
            "new york" | "new york city" | "nyc" => Some(Self::NewYorkCity),
            "washington" | "washington dc" | "washington d.c." => Some(Self::Washington),
            _ => None,
        }
    }

    /// Dataset file name inside the data directory.
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Chicago => "chicago.csv",
            Self::NewYorkCity => "new_york_city.csv",
            Self::Washington => "washington.csv",
        }
    }

    /// Upper-case label used in report titles.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Chicago => "CHICAGO",
            Self::NewYorkCity => "NEW YORK CITY",
            Self::Washington => "WASHINGTON",
        }
    }

    /// Whether the published dataset carries the gender and birth-year columns.
    ///
    /// Loading detects the columns from the headers as well; this is the catalog's expectation.
    pub fn has_demographics(self) -> bool {
        !matches!(self, Self::Washington)
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl std::str::FromStr for City {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| {
            format!("unknown city '{s}' (expected Chicago, New York City or Washington)")
        })
    }
}

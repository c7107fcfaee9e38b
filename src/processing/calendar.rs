//! Static name tables keyed by the codes the deriver produces.
//!
//! Names come from fixed tables rather than locale-aware calendar calls so report output stays
//! stable.

use crate::error::{BikeshareError, Result};

/// Month names indexed by month number minus one.
pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Weekday names indexed by the derived day-of-week (Monday = 0).
pub const DAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Months the published datasets cover, and therefore the ones offered as filters.
pub const SUPPORTED_MONTHS: usize = 6;

/// Calendar name for a two-digit month code (`"03"` -> `March`).
pub fn month_name(code: &str) -> Result<&'static str> {
    code.parse::<usize>()
        .ok()
        .filter(|m| (1..=12).contains(m))
        .map(|m| MONTH_NAMES[m - 1])
        .ok_or_else(|| BikeshareError::UnknownCode {
            field: "month",
            code: code.to_owned(),
        })
}

/// Two-digit month code for a month name (case-insensitive, `march` -> `"03"`).
pub fn month_code(name: &str) -> Option<String> {
    let name = name.trim();
    MONTH_NAMES
        .iter()
        .position(|m| m.eq_ignore_ascii_case(name))
        .map(|i| format!("{:02}", i + 1))
}

/// Weekday name for a day-of-week index (Monday = 0).
pub fn day_name(index: u8) -> Result<&'static str> {
    DAY_NAMES
        .get(usize::from(index))
        .copied()
        .ok_or_else(|| BikeshareError::UnknownCode {
            field: "day of week",
            code: index.to_string(),
        })
}

/// Day-of-week index for a weekday name (case-insensitive, `monday` -> 0).
pub fn day_index(name: &str) -> Option<u8> {
    let name = name.trim();
    DAY_NAMES
        .iter()
        .position(|d| d.eq_ignore_ascii_case(name))
        .and_then(|i| u8::try_from(i).ok())
}

/// 12-hour clock label for a two-digit hour code (`"17"` -> `05 PM`).
pub fn hour_label(code: &str) -> Result<String> {
    let hour = code
        .parse::<u8>()
        .ok()
        .filter(|h| *h < 24)
        .ok_or_else(|| BikeshareError::UnknownCode {
            field: "hour",
            code: code.to_owned(),
        })?;
    let suffix = if hour < 12 { "AM" } else { "PM" };
    let clock = match hour % 12 {
        0 => 12,
        h => h,
    };
    Ok(format!("{clock:02} {suffix}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_names_round_trip_codes() {
        assert_eq!(month_name("03").unwrap(), "March");
        assert_eq!(month_name("12").unwrap(), "December");
        assert_eq!(month_code("march").as_deref(), Some("03"));
        assert_eq!(month_code(" JUNE ").as_deref(), Some("06"));
        assert_eq!(month_code("Smarch"), None);
    }

    #[test]
    fn unknown_month_code_is_an_error() {
        assert!(matches!(
            month_name("13"),
            Err(BikeshareError::UnknownCode { field: "month", .. })
        ));
        assert!(month_name("00").is_err());
        assert!(month_name("ab").is_err());
    }

    #[test]
    fn day_lookup_uses_monday_zero() {
        assert_eq!(day_name(0).unwrap(), "Monday");
        assert_eq!(day_name(6).unwrap(), "Sunday");
        assert!(day_name(7).is_err());
        assert_eq!(day_index("sunday"), Some(6));
        assert_eq!(day_index("Funday"), None);
    }

    #[test]
    fn hour_labels_use_twelve_hour_clock() {
        assert_eq!(hour_label("17").unwrap(), "05 PM");
        assert_eq!(hour_label("00").unwrap(), "12 AM");
        assert_eq!(hour_label("09").unwrap(), "09 AM");
        assert_eq!(hour_label("12").unwrap(), "12 PM");
        assert_eq!(hour_label("23").unwrap(), "11 PM");
        assert!(hour_label("24").is_err());
        assert!(hour_label("x1").is_err());
    }
}

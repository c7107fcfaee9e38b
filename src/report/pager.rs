//! Paging through raw trip records.

use crate::types::{ColumnSet, Trip, TripSet};

/// Records shown per raw-data request.
pub const DEFAULT_PAGE_SIZE: usize = 5;

/// Successive fixed-size windows over a [`TripSet`] in original order.
///
/// The first window starts at offset 0 and each further request advances by the page size. The
/// final window may be short; after it the pager is exhausted (no wraparound).
#[derive(Debug, Clone)]
pub struct RawDataPager<'a> {
    set: &'a TripSet,
    offset: usize,
    page_size: usize,
}

impl<'a> RawDataPager<'a> {
    /// Create a pager; a `page_size` of 0 is treated as 1.
    pub fn new(set: &'a TripSet, page_size: usize) -> Self {
        Self {
            set,
            offset: 0,
            page_size: page_size.max(1),
        }
    }

    /// Offset of the next window.
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn is_exhausted(&self) -> bool {
        self.offset >= self.set.row_count()
    }
}

impl<'a> Iterator for RawDataPager<'a> {
    type Item = &'a [Trip];

    fn next(&mut self) -> Option<Self::Item> {
        if self.is_exhausted() {
            return None;
        }
        let window = self.set.window(self.offset, self.page_size);
        self.offset += window.len();
        Some(window)
    }
}

/// Render one window, one line per trip, numbering trips by their position in the set.
pub fn render_window(window: &[Trip], first_index: usize, columns: ColumnSet) -> Vec<String> {
    window
        .iter()
        .enumerate()
        .map(|(i, trip)| {
            let r = &trip.record;
            let mut line = format!(
                "{:>6}  {}  {:>8.1}s  {} -> {}  {}",
                first_index + i,
                r.start_time,
                r.trip_duration,
                r.start_station,
                r.end_station,
                r.user_type.as_deref().unwrap_or("-"),
            );
            if columns.gender {
                line.push_str(&format!("  {}", r.gender.as_deref().unwrap_or("-")));
            }
            if columns.birth_year {
                match r.birth_year {
                    Some(year) => line.push_str(&format!("  {year}")),
                    None => line.push_str("  -"),
                }
            }
            line
        })
        .collect()
}

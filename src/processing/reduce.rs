//! Reduction primitives shared by the aggregations.
//!
//! - [`tally`]: frequency count per distinct key, in ascending key order
//! - [`mode`]: the most frequent key, lowest key winning ties
//! - [`sum`] / [`mean`]: numeric reductions that refuse empty input

use std::collections::BTreeMap;

/// Count occurrences of each distinct key.
pub fn tally<K, I>(keys: I) -> BTreeMap<K, usize>
where
    K: Ord,
    I: IntoIterator<Item = K>,
{
    let mut counts = BTreeMap::new();
    for key in keys {
        *counts.entry(key).or_insert(0) += 1;
    }
    counts
}

/// The key with the strictly highest count.
///
/// Keys are scanned in ascending order and only a strictly greater count replaces the current
/// best, so among equally frequent keys the lowest one wins. Returns `None` for no keys.
pub fn mode<K: Ord + Clone>(counts: &BTreeMap<K, usize>) -> Option<(K, usize)> {
    let mut best: Option<(&K, usize)> = None;
    for (key, &count) in counts {
        match best {
            Some((_, c)) if count <= c => {}
            _ => best = Some((key, count)),
        }
    }
    best.map(|(k, c)| (k.clone(), c))
}

/// Sum of the values, or `None` when there are none.
pub fn sum<I: IntoIterator<Item = f64>>(values: I) -> Option<f64> {
    values.into_iter().fold(None, |acc, v| Some(acc.unwrap_or(0.0) + v))
}

/// Arithmetic mean of the values, or `None` when there are none.
pub fn mean<I: IntoIterator<Item = f64>>(values: I) -> Option<f64> {
    let (total, n) = values
        .into_iter()
        .fold((0.0, 0usize), |(t, n), v| (t + v, n + 1));
    (n > 0).then(|| total / n as f64)
}

use std::collections::{BTreeMap, HashMap};

use super::model::EvDataset;

// ---------------------------------------------------------------------------
// Grouped views backing the three charts
// ---------------------------------------------------------------------------

/// Registrations per model year, ascending by year.
/// Rows without a year are not counted.
pub fn count_by_year(dataset: &EvDataset) -> BTreeMap<i64, usize> {
    let mut counts = BTreeMap::new();
    for year in dataset.vehicles().iter().filter_map(|v| v.model_year) {
        *counts.entry(year).or_insert(0) += 1;
    }
    counts
}

/// Registrations per vehicle type, most frequent first.
///
/// Types with equal counts keep the order in which they first appear in the
/// data. Rows without a type are not counted.
pub fn count_by_type(dataset: &EvDataset) -> Vec<(String, usize)> {
    // type -> (count, first row seen)
    let mut groups: HashMap<&str, (usize, usize)> = HashMap::new();
    for (row, vehicle) in dataset.vehicles().iter().enumerate() {
        if let Some(kind) = vehicle.vehicle_type.as_deref() {
            groups.entry(kind).or_insert((0, row)).0 += 1;
        }
    }

    let mut ordered: Vec<(&str, usize, usize)> = groups
        .into_iter()
        .map(|(kind, (count, first))| (kind, count, first))
        .collect();
    ordered.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));

    ordered
        .into_iter()
        .map(|(kind, count, _)| (kind.to_string(), count))
        .collect()
}

/// `(electric range, base MSRP)` for every row where both are present,
/// in row order.
pub fn range_vs_price(dataset: &EvDataset) -> Vec<(f64, f64)> {
    dataset
        .vehicles()
        .iter()
        .filter_map(|v| Some((v.electric_range?, v.base_msrp?)))
        .collect()
}

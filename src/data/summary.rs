use std::collections::BTreeMap;

use super::aggregate::{count_by_type, count_by_year, range_vs_price};
use super::metrics::Metrics;
use super::model::EvDataset;

/// Everything the dashboard displays, derived from one dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub metrics: Metrics,
    pub by_year: BTreeMap<i64, usize>,
    pub by_type: Vec<(String, usize)>,
    pub range_vs_price: Vec<(f64, f64)>,
}

impl Summary {
    pub fn compute(dataset: &EvDataset) -> Self {
        Summary {
            metrics: Metrics::compute(dataset),
            by_year: count_by_year(dataset),
            by_type: count_by_type(dataset),
            range_vs_price: range_vs_price(dataset),
        }
    }

    /// Range/price pairs sorted by range, for drawing as a line.
    pub fn price_curve(&self) -> Vec<[f64; 2]> {
        let mut points: Vec<[f64; 2]> = self
            .range_vs_price
            .iter()
            .map(|&(range, price)| [range, price])
            .collect();
        points.sort_by(|a, b| a[0].total_cmp(&b[0]));
        points
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::read_csv;

    #[test]
    fn test_end_to_end_scenario() {
        let ds = read_csv(
            "Model Year,Electric Vehicle Type,Electric Range,Base MSRP\n\
             2020,BEV,200,40000\n\
             2020,PHEV,50,35000\n\
             2021,BEV,250,\n"
                .as_bytes(),
        )
        .unwrap();
        let summary = Summary::compute(&ds);

        assert_eq!(summary.metrics.total, 3);
        assert_eq!(summary.metrics.range_label(), "166.67 miles");
        assert_eq!(summary.metrics.msrp_label(), "$37,500.00");
        assert_eq!(summary.by_year, BTreeMap::from([(2020, 2), (2021, 1)]));
        assert_eq!(
            summary.by_type,
            vec![("BEV".to_string(), 2), ("PHEV".to_string(), 1)]
        );
        assert_eq!(summary.range_vs_price, vec![(200.0, 40000.0), (50.0, 35000.0)]);
    }

    #[test]
    fn test_price_curve_is_sorted_by_range() {
        let ds = read_csv(
            "Model Year,Electric Vehicle Type,Electric Range,Base MSRP\n\
             2020,BEV,200,40000\n\
             2020,PHEV,50,35000\n\
             2022,BEV,120,52000\n"
                .as_bytes(),
        )
        .unwrap();
        let curve = Summary::compute(&ds).price_curve();
        assert_eq!(
            curve,
            vec![[50.0, 35000.0], [120.0, 52000.0], [200.0, 40000.0]]
        );
    }
}

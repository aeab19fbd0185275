use super::model::EvDataset;

/// Shown in place of a mean that has no values to average.
pub const NO_DATA: &str = "No data";

// ---------------------------------------------------------------------------
// Headline metrics
// ---------------------------------------------------------------------------

/// The three scalar figures shown on the metric cards.
#[derive(Debug, Clone, PartialEq)]
pub struct Metrics {
    /// Number of rows in the dataset.
    pub total: usize,
    /// Mean `Electric Range` over rows where it is present.
    pub mean_range: Option<f64>,
    /// Mean `Base MSRP` over rows where it is present.
    pub mean_msrp: Option<f64>,
}

impl Metrics {
    pub fn compute(dataset: &EvDataset) -> Self {
        let vehicles = dataset.vehicles();
        Metrics {
            total: vehicles.len(),
            mean_range: mean(vehicles.iter().filter_map(|v| v.electric_range)),
            mean_msrp: mean(vehicles.iter().filter_map(|v| v.base_msrp)),
        }
    }

    /// e.g. `166.67 miles`
    pub fn range_label(&self) -> String {
        match self.mean_range {
            Some(v) => format!("{:.2} miles", round2(v)),
            None => NO_DATA.to_string(),
        }
    }

    /// e.g. `$37,500.00`
    pub fn msrp_label(&self) -> String {
        match self.mean_msrp {
            Some(v) => format!("${}", thousands(round2(v))),
            None => NO_DATA.to_string(),
        }
    }
}

/// Arithmetic mean, or `None` for an empty input.
pub fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

/// Round to two decimal places; exact halves go to the even neighbour.
pub fn round2(v: f64) -> f64 {
    (v * 100.0).round_ties_even() / 100.0
}

/// Format with two decimals and `,` between groups of three integer digits.
pub fn thousands(v: f64) -> String {
    let fixed = format!("{:.2}", v.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if v < 0.0 && fixed.bytes().any(|b| b.is_ascii_digit() && b != b'0') {
        "-"
    } else {
        ""
    };
    format!("{sign}{grouped}.{frac_part}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::read_csv;
    use crate::data::model::{EvDataset, Vehicle};

    fn vehicle(range: Option<f64>, msrp: Option<f64>) -> Vehicle {
        Vehicle {
            model_year: Some(2020),
            vehicle_type: Some("BEV".to_string()),
            electric_range: range,
            base_msrp: msrp,
        }
    }

    #[test]
    fn test_scenario_metrics() {
        let ds = read_csv(
            "Model Year,Electric Vehicle Type,Electric Range,Base MSRP\n\
             2020,BEV,200,40000\n\
             2020,PHEV,50,35000\n\
             2021,BEV,250,\n"
                .as_bytes(),
        )
        .unwrap();
        let m = Metrics::compute(&ds);

        assert_eq!(m.total, 3);
        assert_eq!(round2(m.mean_range.unwrap()), 166.67);
        assert_eq!(round2(m.mean_msrp.unwrap()), 37500.0);
        assert_eq!(m.range_label(), "166.67 miles");
        assert_eq!(m.msrp_label(), "$37,500.00");
    }

    #[test]
    fn test_missing_values_are_excluded_from_means() {
        let ds = EvDataset::from_vehicles(vec![
            vehicle(Some(10.0), None),
            vehicle(None, None),
            vehicle(Some(21.0), Some(30000.0)),
        ]);
        let m = Metrics::compute(&ds);
        assert_eq!(m.total, 3);
        assert_eq!(m.mean_range, Some(15.5));
        assert_eq!(m.mean_msrp, Some(30000.0));
    }

    #[test]
    fn test_empty_dataset_reports_no_data() {
        let m = Metrics::compute(&EvDataset::default());
        assert_eq!(m.total, 0);
        assert_eq!(m.mean_range, None);
        assert_eq!(m.range_label(), NO_DATA);
        assert_eq!(m.msrp_label(), NO_DATA);
    }

    #[test]
    fn test_exact_half_mean_rounds_to_even() {
        // Mean of these eight ranges is exactly 166.125.
        let ranges = [166.0, 166.0, 166.0, 166.0, 166.0, 166.0, 166.0, 167.0];
        let ds =
            EvDataset::from_vehicles(ranges.iter().map(|&r| vehicle(Some(r), None)).collect());
        let m = Metrics::compute(&ds);
        assert_eq!(m.mean_range, Some(166.125));
        assert_eq!(m.range_label(), "166.12 miles");
    }

    #[test]
    fn test_all_missing_column_reports_no_data() {
        let ds = EvDataset::from_vehicles(vec![vehicle(Some(5.0), None)]);
        let m = Metrics::compute(&ds);
        assert_eq!(m.range_label(), "5.00 miles");
        assert_eq!(m.msrp_label(), NO_DATA);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(166.666_666), 166.67);
        assert_eq!(round2(2.0), 2.0);
        assert_eq!(round2(-1.234), -1.23);
        assert_eq!(round2(166.125), 166.12);
        assert_eq!(round2(166.375), 166.38);
    }

    #[test]
    fn test_thousands() {
        assert_eq!(thousands(0.0), "0.00");
        assert_eq!(thousands(999.5), "999.50");
        assert_eq!(thousands(1000.0), "1,000.00");
        assert_eq!(thousands(37500.0), "37,500.00");
        assert_eq!(thousands(1234567.891), "1,234,567.89");
        assert_eq!(thousands(-45123.46), "-45,123.46");
    }
}

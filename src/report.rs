//! Plain-text rendering of the dashboard, for `--headless` runs.

use crate::data::summary::Summary;
use crate::ui::panels::TITLE;

/// Points printed from each end of the range/price curve.
const CURVE_EDGE: usize = 5;

/// Render the same sections the window shows, one value per line.
///
/// The range/price curve can hold one point per registration, so only its
/// count and the lowest and highest ranges are listed.
pub fn render_text(summary: &Summary) -> String {
    let metrics = &summary.metrics;
    let mut lines = vec![
        TITLE.to_string(),
        "=".repeat(TITLE.len()),
        String::new(),
        "Metrics".to_string(),
        format!("  Total Electric Vehicles: {}", metrics.total),
        format!("  Average Electric Range:  {}", metrics.range_label()),
        format!("  Average MSRP:            {}", metrics.msrp_label()),
        String::new(),
        "Number of EVs by Model Year".to_string(),
    ];
    lines.extend(summary.by_year.iter().map(|(year, count)| format!("  {year}: {count}")));

    lines.push(String::new());
    lines.push("EV Type Distribution".to_string());
    lines.extend(summary.by_type.iter().map(|(kind, count)| format!("  {kind}: {count}")));

    lines.push(String::new());
    lines.push(format!(
        "Price vs Electric Range ({} rows with both values)",
        summary.range_vs_price.len()
    ));
    let curve = summary.price_curve();
    let point = |&[range, price]: &[f64; 2]| format!("  {range} miles: ${price}");
    if curve.len() > 2 * CURVE_EDGE {
        lines.extend(curve[..CURVE_EDGE].iter().map(point));
        lines.push("  ...".to_string());
        lines.extend(curve[curve.len() - CURVE_EDGE..].iter().map(point));
    } else {
        lines.extend(curve.iter().map(point));
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::read_csv;

    #[test]
    fn test_render_text_scenario() {
        let ds = read_csv(
            "Model Year,Electric Vehicle Type,Electric Range,Base MSRP\n\
             2020,BEV,200,40000\n\
             2020,PHEV,50,35000\n\
             2021,BEV,250,\n"
                .as_bytes(),
        )
        .unwrap();
        let text = render_text(&Summary::compute(&ds));

        assert!(text.starts_with("Electric Vehicle Population Data\n"));
        assert!(text.contains("Total Electric Vehicles: 3\n"));
        assert!(text.contains("Average Electric Range:  166.67 miles\n"));
        assert!(text.contains("Average MSRP:            $37,500.00\n"));
        assert!(text.contains("  2020: 2\n  2021: 1\n"));
        assert!(text.contains("  BEV: 2\n  PHEV: 1\n"));
        assert!(text.contains("(2 rows with both values)\n  50 miles: $35000\n  200 miles: $40000\n"));
        assert!(!text.contains("  ...\n"));
    }

    #[test]
    fn test_render_text_shortens_long_price_curve() {
        let summary = Summary {
            range_vs_price: (1..=12)
                .rev()
                .map(|i| (i as f64 * 10.0, i as f64 * 1000.0))
                .collect(),
            ..Summary::compute(&Default::default())
        };
        let text = render_text(&summary);

        assert!(text.ends_with(
            "(12 rows with both values)\n\
             \x20 10 miles: $1000\n\
             \x20 20 miles: $2000\n\
             \x20 30 miles: $3000\n\
             \x20 40 miles: $4000\n\
             \x20 50 miles: $5000\n\
             \x20 ...\n\
             \x20 80 miles: $8000\n\
             \x20 90 miles: $9000\n\
             \x20 100 miles: $10000\n\
             \x20 110 miles: $11000\n\
             \x20 120 miles: $12000\n"
        ));
        assert!(!text.contains("60 miles"));
        assert!(!text.contains("70 miles"));
    }

    #[test]
    fn test_render_text_empty() {
        let text = render_text(&Summary::compute(&Default::default()));
        assert!(text.contains("Total Electric Vehicles: 0\n"));
        assert!(text.contains("Average MSRP:            No data\n"));
    }
}

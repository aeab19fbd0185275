use std::collections::BTreeMap;

use eframe::egui::{RichText, Ui};
use egui_plot::{Bar, BarChart, GridMark, Legend, Line, Plot, PlotPoints, Points};

use crate::color;
use crate::data::metrics::{thousands, NO_DATA};

const CHART_HEIGHT: f32 = 320.0;

// ---------------------------------------------------------------------------
// Registrations per model year
// ---------------------------------------------------------------------------

pub fn year_chart(ui: &mut Ui, by_year: &BTreeMap<i64, usize>) {
    if by_year.is_empty() {
        no_data(ui);
        return;
    }

    let bars: Vec<Bar> = by_year
        .iter()
        .map(|(&year, &count)| {
            Bar::new(year as f64, count as f64)
                .name(year.to_string())
                .width(0.7)
        })
        .collect();

    Plot::new("year_chart")
        .height(CHART_HEIGHT)
        .x_axis_label("Model Year")
        .y_axis_label("Registrations")
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .allow_double_click_reset(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).color(color::ACCENT).name("Registrations"));
        });
}

// ---------------------------------------------------------------------------
// Registrations per vehicle type
// ---------------------------------------------------------------------------

/// One bar per type at x = 0, 1, 2, ... labelled with the type name.
pub fn type_chart(ui: &mut Ui, by_type: &[(String, usize)]) {
    if by_type.is_empty() {
        no_data(ui);
        return;
    }

    let palette = color::generate_palette(by_type.len());
    let labels: Vec<String> = by_type.iter().map(|(kind, _)| kind.clone()).collect();

    Plot::new("type_chart")
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .y_axis_label("Registrations")
        .x_axis_formatter(move |mark: GridMark, _range| category_label(&labels, mark.value))
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .allow_double_click_reset(false)
        .show(ui, |plot_ui| {
            for (i, ((kind, count), fill)) in by_type.iter().zip(palette).enumerate() {
                let bar = Bar::new(i as f64, *count as f64).name(kind).width(0.6);
                plot_ui.bar_chart(BarChart::new(vec![bar]).color(fill).name(kind));
            }
        });
}

/// Axis text for a category position; blank between categories.
fn category_label(labels: &[String], value: f64) -> String {
    let nearest = value.round();
    if (value - nearest).abs() > 1e-6 || nearest < 0.0 {
        return String::new();
    }
    labels.get(nearest as usize).cloned().unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Price against range
// ---------------------------------------------------------------------------

/// `curve` holds `[range, price]` points already sorted by range.
pub fn price_chart(ui: &mut Ui, curve: &[[f64; 2]]) {
    if curve.is_empty() {
        no_data(ui);
        return;
    }

    Plot::new("price_chart")
        .height(CHART_HEIGHT)
        .x_axis_label("Electric Range (miles)")
        .y_axis_label("Base MSRP")
        .y_axis_formatter(|mark: GridMark, _range| format!("${}", thousands(mark.value)))
        .label_formatter(|_name, point| {
            format!("{:.0} miles\n${}", point.x, thousands(point.y))
        })
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .allow_double_click_reset(false)
        .show(ui, |plot_ui| {
            let points: PlotPoints = curve.iter().copied().collect();
            plot_ui.line(Line::new(points).color(color::ACCENT).width(2.0));

            let markers: PlotPoints = curve.iter().copied().collect();
            plot_ui.points(Points::new(markers).color(color::ACCENT).radius(2.5));
        });
}

fn no_data(ui: &mut Ui) {
    ui.label(RichText::new(NO_DATA).italics().color(color::HEADER));
}

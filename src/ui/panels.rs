use eframe::egui::{self, Color32, CornerRadius, Margin, RichText, Shadow, Ui};

use crate::color;
use crate::data::metrics::Metrics;
use crate::state::DashboardState;

pub const TITLE: &str = "Electric Vehicle Population Data";

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top status bar: where the data came from and how much of it.
pub fn top_bar(ui: &mut Ui, state: &DashboardState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.label(format!(
            "{} registrations loaded from {}",
            state.dataset.len(),
            state.source.display()
        ));

        ui.separator();

        ui.label(format!(
            "{} model years, {} vehicle types",
            state.summary.by_year.len(),
            state.summary.by_type.len()
        ));
    });
}

// ---------------------------------------------------------------------------
// Headings
// ---------------------------------------------------------------------------

pub fn title(ui: &mut Ui) {
    ui.add_space(40.0);
    ui.vertical_centered(|ui: &mut Ui| {
        ui.label(RichText::new(TITLE).size(48.0).strong().color(color::TITLE));
    });
    ui.add_space(40.0);
}

pub fn section_header(ui: &mut Ui, text: &str) {
    ui.add_space(40.0);
    ui.label(RichText::new(text).size(30.0).strong().color(color::HEADER));
    ui.add_space(20.0);
}

// ---------------------------------------------------------------------------
// Metric cards
// ---------------------------------------------------------------------------

/// Three cards side by side: total, mean range, mean MSRP.
pub fn metric_cards(ui: &mut Ui, metrics: &Metrics) {
    let cards = [
        ("Total Electric Vehicles", metrics.total.to_string()),
        ("Average Electric Range", metrics.range_label()),
        ("Average MSRP", metrics.msrp_label()),
    ];

    ui.columns(cards.len(), |columns: &mut [Ui]| {
        for (ui, (label, value)) in columns.iter_mut().zip(cards) {
            card(ui, label, |ui: &mut Ui| {
                ui.vertical_centered(|ui: &mut Ui| {
                    ui.label(RichText::new(label).size(24.0).strong().color(color::TITLE));
                    ui.add_space(15.0);
                    ui.label(RichText::new(value).size(22.0).color(color::HEADER));
                });
            });
        }
    });
}

// ---------------------------------------------------------------------------
// Chart panel
// ---------------------------------------------------------------------------

/// A titled card that hosts one chart.
pub fn chart_panel(ui: &mut Ui, heading: &str, add_chart: impl FnOnce(&mut Ui)) {
    card(ui, heading, |ui: &mut Ui| {
        ui.label(RichText::new(heading).size(24.0).strong().color(color::TITLE));
        ui.add_space(20.0);
        add_chart(ui);
    });
}

// ---------------------------------------------------------------------------
// Card frame with hover lift
// ---------------------------------------------------------------------------

/// White rounded card whose shadow deepens while the pointer is over it.
///
/// Hover is only known after the frame is laid out, so the state from the
/// previous frame drives the animation.
fn card(ui: &mut Ui, id_salt: &str, add_contents: impl FnOnce(&mut Ui)) {
    let id = ui.id().with(("card", id_salt));
    let was_hovered = ui.ctx().data(|d| d.get_temp::<bool>(id)).unwrap_or(false);
    let lift = ui
        .ctx()
        .animate_bool_with_time(id.with("lift"), was_hovered, 0.3);

    let response = card_frame(lift)
        .show(ui, |ui: &mut Ui| {
            ui.set_min_width(ui.available_width());
            add_contents(ui);
        })
        .response;

    let hovered = response.hovered();
    ui.ctx().data_mut(|d| d.insert_temp(id, hovered));
}

fn card_frame(lift: f32) -> egui::Frame {
    egui::Frame::default()
        .fill(color::CARD)
        .corner_radius(CornerRadius::same(15))
        .inner_margin(Margin::same(40))
        .outer_margin(Margin::symmetric(8, 15))
        .shadow(Shadow {
            offset: [0, (6.0 + 4.0 * lift) as i8],
            blur: (12.0 + 8.0 * lift) as u8,
            spread: 0,
            color: Color32::from_black_alpha((25.0 + 26.0 * lift) as u8),
        })
}

use eframe::egui::{self, ScrollArea, Ui};

use crate::state::DashboardState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct DashboardApp {
    pub state: DashboardState,
    /// `[range, price]` sorted by range; derived once, drawn every frame.
    price_curve: Vec<[f64; 2]>,
}

impl DashboardApp {
    pub fn new(state: DashboardState) -> Self {
        let price_curve = state.summary.price_curve();
        Self { state, price_curve }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: data source ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &self.state);
        });

        // ---- Central panel: the report ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| {
                    panels::title(ui);

                    panels::section_header(ui, "Metrics");
                    panels::metric_cards(ui, &self.state.summary.metrics);

                    panels::section_header(ui, "Data Distribution");
                    panels::chart_panel(ui, "Number of EVs by Model Year", |ui: &mut Ui| {
                        plot::year_chart(ui, &self.state.summary.by_year);
                    });
                    panels::chart_panel(ui, "EV Type Distribution", |ui: &mut Ui| {
                        plot::type_chart(ui, &self.state.summary.by_type);
                    });
                    panels::chart_panel(ui, "Price vs Electric Range", |ui: &mut Ui| {
                        plot::price_chart(ui, &self.price_curve);
                    });
                });
        });
    }
}

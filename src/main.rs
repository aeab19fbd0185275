mod app;
mod cli;
mod color;
mod data;
mod report;
mod state;
mod ui;

use anyhow::Result;
use app::DashboardApp;
use clap::Parser;
use eframe::egui;
use state::DashboardState;

fn main() -> Result<()> {
    env_logger::init();

    let args = cli::Args::parse();

    // Load before any window exists: a missing file aborts here.
    let dataset = data::loader::load_file(&args.data)?;
    let state = DashboardState::new(args.data.clone(), dataset);

    if args.headless {
        print!("{}", report::render_text(&state.summary));
        return Ok(());
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([args.width, args.height])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    log::info!("Opening dashboard for {}", args.data.display());
    eframe::run_native(
        ui::panels::TITLE,
        options,
        Box::new(move |cc| {
            color::apply_theme(&cc.egui_ctx);
            Ok(Box::new(DashboardApp::new(state)))
        }),
    )
    .map_err(|e| anyhow::anyhow!("dashboard window failed: {e}"))
}

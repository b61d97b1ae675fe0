mod app;
mod chart;
mod color;
mod config;
mod data;
mod state;
mod ui;

use app::LaunchDashApp;
use clap::Parser;
use config::{Cli, DashboardConfig};
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let config = DashboardConfig::from_cli(Cli::parse());
    log::info!("Starting with {config:?}");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size([600.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "SpaceX Launch Records Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(LaunchDashApp::new(config)))),
    )
}

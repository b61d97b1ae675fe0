use eframe::egui;

use crate::config::DashboardConfig;
use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct LaunchDashApp {
    pub state: AppState,
}

impl LaunchDashApp {
    /// Build the app and load the configured dataset. A missing or broken
    /// file leaves the dashboard empty with the error in the status bar.
    pub fn new(config: DashboardConfig) -> Self {
        let path = config.data_path.clone();
        let mut state = AppState::new(config);

        if !path.exists() {
            log::warn!("Dataset {} not found; use File → Open…", path.display());
            state.status_message = Some(format!("Dataset not found: {}", path.display()));
        } else if let Err(e) = state.load_path(&path) {
            log::error!("Failed to load dataset: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }

        Self { state }
    }
}

impl eframe::App for LaunchDashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: controls ----
        egui::SidePanel::left("control_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::chart_area(ui, &self.state);
        });
    }
}

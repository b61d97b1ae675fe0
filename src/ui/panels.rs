use anyhow::Context;
use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::filter::SiteSelection;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – control widgets
// ---------------------------------------------------------------------------

/// Render the site dropdown and payload range sliders.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Controls");
    ui.separator();

    let Some(db) = &state.dashboard else {
        ui.label("No dataset loaded.");
        return;
    };

    // Snapshot what the widgets need so `state` can be mutated below.
    let sites = db.dataset.sites().to_vec();
    let current_site = db.controls.site().clone();
    let bounds = db.controls.bounds();
    let mut range = db.controls.range();

    // ---- Site dropdown ----
    ui.strong("Launch Site");
    let mut chosen = None;
    egui::ComboBox::from_id_salt("site_dropdown")
        .selected_text(current_site.to_string())
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            let options = std::iter::once(SiteSelection::All)
                .chain(sites.into_iter().map(SiteSelection::Site));
            for option in options {
                let label = option.to_string();
                if ui.selectable_label(current_site == option, label).clicked() {
                    chosen = Some(option);
                }
            }
        });
    if let Some(site) = chosen {
        state.select_site(site);
    }

    ui.add_space(8.0);
    ui.separator();

    // ---- Payload range ----
    ui.strong("Payload range (Kg):");
    let lower_changed = ui
        .add(egui::Slider::new(&mut range.lower, bounds.lower..=bounds.upper).text("min"))
        .changed();
    let upper_changed = ui
        .add(egui::Slider::new(&mut range.upper, bounds.lower..=bounds.upper).text("max"))
        .changed();
    if lower_changed {
        state.set_payload_lower(range.lower);
    }
    if upper_changed {
        state.set_payload_upper(range.upper);
    }

    ui.add_space(8.0);
    if ui.button("Reset").clicked() {
        state.reset_controls();
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            let can_export = state.dashboard.is_some();
            if ui
                .add_enabled(can_export, egui::Button::new("Export charts…"))
                .clicked()
            {
                export_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(db) = &state.dashboard {
            ui.label(format!(
                "{}: {} launches, {} shown",
                db.source.display(),
                db.dataset.len(),
                db.scatter.points.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open launch records")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        if let Err(e) = state.load_path(&path) {
            log::error!("Failed to load file: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}

pub fn export_dialog(state: &mut AppState) {
    let Some(json) = state.charts_json() else {
        return;
    };

    let file = rfd::FileDialog::new()
        .set_title("Export chart descriptions")
        .set_file_name("charts.json")
        .add_filter("JSON", &["json"])
        .save_file();

    let Some(path) = file else {
        return;
    };

    let result = json.and_then(|text| {
        std::fs::write(&path, text).with_context(|| format!("writing {}", path.display()))
    });
    match result {
        Ok(()) => {
            log::info!("Exported charts to {}", path.display());
            state.status_message = None;
        }
        Err(e) => {
            log::error!("Failed to export charts: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}

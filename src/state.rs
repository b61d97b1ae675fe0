use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::chart::{export_json, pie_chart, scatter_chart, PieChart, ScatterChart};
use crate::color::CategoryColors;
use crate::config::DashboardConfig;
use crate::data::filter::{ControlState, SiteSelection};
use crate::data::model::LaunchDataset;

// ---------------------------------------------------------------------------
// Dashboard: a loaded dataset with its controls and current charts
// ---------------------------------------------------------------------------

pub struct Dashboard {
    pub dataset: LaunchDataset,
    /// File the dataset was read from.
    pub source: PathBuf,
    pub controls: ControlState,
    /// Current charts; replaced whenever a control they depend on changes.
    pub pie: PieChart,
    pub scatter: ScatterChart,
    /// Booster category colours for the whole dataset.
    pub booster_colors: CategoryColors,
}

impl Dashboard {
    pub fn new(dataset: LaunchDataset, source: PathBuf, payload_step: f64) -> Self {
        let controls = ControlState::for_dataset(&dataset, payload_step);
        let pie = pie_chart(&dataset, &controls);
        let scatter = scatter_chart(&dataset, &controls);
        let booster_colors = CategoryColors::new(dataset.booster_categories());
        Self {
            dataset,
            source,
            controls,
            pie,
            scatter,
            booster_colors,
        }
    }

    fn refresh_pie(&mut self) {
        self.pie = pie_chart(&self.dataset, &self.controls);
    }

    fn refresh_scatter(&mut self) {
        self.scatter = scatter_chart(&self.dataset, &self.controls);
        log::debug!(
            "scatter: {} of {} launches for {} within {}",
            self.scatter.points.len(),
            self.dataset.len(),
            self.controls.site(),
            self.controls.range()
        );
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: DashboardConfig,

    /// Loaded dataset (None until a file loads successfully).
    pub dashboard: Option<Dashboard>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            config,
            dashboard: None,
            status_message: None,
        }
    }

    /// Load a dataset from disk. On failure the current dashboard is kept.
    pub fn load_path(&mut self, path: &Path) -> Result<()> {
        let dataset = crate::data::loader::load_file(path)
            .with_context(|| format!("loading {}", path.display()))?;
        log::info!(
            "Loaded {} launches from {} ({} sites, payload {})",
            dataset.len(),
            path.display(),
            dataset.sites().len(),
            dataset.payload_bounds()
        );
        self.set_dataset(dataset, path.to_path_buf());
        Ok(())
    }

    /// Ingest a newly loaded dataset with default controls.
    pub fn set_dataset(&mut self, dataset: LaunchDataset, source: PathBuf) {
        self.dashboard = Some(Dashboard::new(dataset, source, self.config.payload_step));
        self.status_message = None;
    }

    // -- Control changes: each one recomputes the charts that depend on it --

    pub fn select_site(&mut self, site: SiteSelection) {
        if let Some(db) = &mut self.dashboard {
            if db.controls.select_site(site) {
                log::debug!("site selection → {}", db.controls.site());
                db.refresh_pie();
                db.refresh_scatter();
            }
        }
    }

    pub fn set_payload_lower(&mut self, value: f64) {
        if let Some(db) = &mut self.dashboard {
            if db.controls.set_lower(value) {
                db.refresh_scatter();
            }
        }
    }

    pub fn set_payload_upper(&mut self, value: f64) {
        if let Some(db) = &mut self.dashboard {
            if db.controls.set_upper(value) {
                db.refresh_scatter();
            }
        }
    }

    pub fn reset_controls(&mut self) {
        if let Some(db) = &mut self.dashboard {
            db.controls.reset();
            db.refresh_pie();
            db.refresh_scatter();
        }
    }

    /// Current charts as JSON, or `None` before a dataset is loaded.
    pub fn charts_json(&self) -> Option<Result<String>> {
        self.dashboard.as_ref().map(|db| {
            export_json(&db.pie, &db.scatter).context("serializing chart descriptions")
        })
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::data::model::tests::sample_dataset;
    use crate::data::model::PayloadRange;

    fn loaded_state() -> AppState {
        let mut state = AppState::new(DashboardConfig::default());
        state.set_dataset(sample_dataset(), PathBuf::from("sample.csv"));
        state
    }

    fn dashboard(state: &AppState) -> &Dashboard {
        state.dashboard.as_ref().unwrap()
    }

    #[test]
    fn test_fresh_dataset_shows_everything() {
        let state = loaded_state();
        let db = dashboard(&state);
        assert_eq!(db.controls.site(), &SiteSelection::All);
        assert_eq!(db.scatter.points.len(), db.dataset.len());
        assert_eq!(db.pie.slices.len(), 3);
    }

    #[test]
    fn test_site_change_replaces_both_charts() {
        let mut state = loaded_state();
        state.select_site(SiteSelection::Site("VAFB SLC-4E".to_string()));

        let db = dashboard(&state);
        assert_eq!(db.pie.title, "Total Success Launches by Site: VAFB SLC-4E");
        assert_eq!(db.pie.slices[0].value, 1.0);
        assert_eq!(db.pie.slices[1].value, 0.0);
        assert_eq!(db.scatter.points.len(), 1);
    }

    #[test]
    fn test_range_change_only_touches_scatter() {
        let mut state = loaded_state();
        let pie_before = dashboard(&state).pie.clone();

        state.set_payload_upper(3000.0);
        state.set_payload_lower(1000.0);

        let db = dashboard(&state);
        assert_eq!(db.controls.range(), PayloadRange::new(1000.0, 3000.0));
        assert_eq!(db.pie, pie_before);
        let payloads: Vec<f64> = db.scatter.points.iter().map(|p| p.x).collect();
        assert_eq!(payloads, vec![2500.0, 3000.0]);
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut state = loaded_state();
        state.select_site(SiteSelection::Site("KSC LC-39A".to_string()));
        state.set_payload_upper(2000.0);
        state.reset_controls();

        let db = dashboard(&state);
        assert_eq!(db.controls.range(), db.dataset.payload_bounds());
        assert_eq!(db.scatter.points.len(), db.dataset.len());
        assert_eq!(db.pie.title, "Total Success Launches by Site");
    }

    #[test]
    fn test_controls_are_noops_without_dataset() {
        let mut state = AppState::new(DashboardConfig::default());
        state.select_site(SiteSelection::Site("KSC LC-39A".to_string()));
        state.set_payload_lower(100.0);
        assert!(state.dashboard.is_none());
        assert!(state.charts_json().is_none());
    }

    #[test]
    fn test_failed_load_keeps_previous_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(b"Launch Site,class\nKSC LC-39A,1\n").unwrap();

        let mut state = loaded_state();
        let err = state.load_path(&path).unwrap_err();
        assert!(format!("{err:#}").contains("Payload Mass (kg)"));
        assert_eq!(dashboard(&state).source, PathBuf::from("sample.csv"));
    }

    #[test]
    fn test_load_path_resets_controls() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("launches.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(
            b"Launch Site,Payload Mass (kg),Booster Version Category,class\n\
              KSC LC-39A,2490,FT,1\n\
              VAFB SLC-4E,500,v1.1,0\n",
        )
        .unwrap();

        let mut state = loaded_state();
        state.select_site(SiteSelection::Site("KSC LC-39A".to_string()));
        state.load_path(&path).unwrap();

        let db = dashboard(&state);
        assert_eq!(db.source, path);
        assert_eq!(db.controls.site(), &SiteSelection::All);
        assert_eq!(db.controls.range(), PayloadRange::new(500.0, 2490.0));
        assert!(state.status_message.is_none());
    }

    #[test]
    fn test_charts_json_available_once_loaded() {
        let json = loaded_state().charts_json().unwrap().unwrap();
        assert!(json.contains("\"pie\""));
        assert!(json.contains("Total Success Launches by Site"));
    }
}

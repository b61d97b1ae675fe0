use std::collections::BTreeSet;

use serde::Serialize;

use crate::data::aggregate::{success_failure_counts, success_rate_by_site};
use crate::data::filter::{filter_by_payload_and_site, ControlState, SiteSelection};
use crate::data::model::{LaunchDataset, Outcome, OUTCOME_COLUMN, PAYLOAD_COLUMN};

// ---------------------------------------------------------------------------
// Declarative chart descriptions
// ---------------------------------------------------------------------------
//
// Plain data, rebuilt from the dataset and controls on every change. The UI
// draws them; export serializes them.

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSlice {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieChart {
    pub title: String,
    pub slices: Vec<PieSlice>,
}

impl PieChart {
    pub fn total(&self) -> f64 {
        self.slices.iter().map(|s| s.value).sum()
    }

    /// Nothing to draw: no slices, or all of them zero.
    pub fn is_empty(&self) -> bool {
        self.total() <= 0.0
    }

    /// Share of each slice in the whole, in slice order. Empty for an empty chart.
    pub fn fractions(&self) -> Vec<f64> {
        let total = self.total();
        if total <= 0.0 {
            return Vec::new();
        }
        self.slices.iter().map(|s| s.value / total).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: f64,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub points: Vec<ScatterPoint>,
}

impl ScatterChart {
    /// Sorted distinct colour categories present in the chart.
    pub fn categories(&self) -> Vec<&str> {
        self.points
            .iter()
            .map(|p| p.category.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn points_in<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a ScatterPoint> {
        self.points.iter().filter(move |p| p.category == category)
    }
}

// ---------------------------------------------------------------------------
// Renderers: (dataset, controls) → chart
// ---------------------------------------------------------------------------

/// Success proportions. Depends on the site selector only.
///
/// * all sites → one slice per site, valued by its success rate
/// * one site → `Success` / `Failure` shares; no slices if it has no launches
pub fn pie_chart(dataset: &LaunchDataset, controls: &ControlState) -> PieChart {
    match controls.site() {
        SiteSelection::All => PieChart {
            title: "Total Success Launches by Site".to_string(),
            slices: success_rate_by_site(dataset)
                .into_iter()
                .map(|(label, value)| PieSlice { label, value })
                .collect(),
        },
        SiteSelection::Site(site) => {
            let slices = match success_failure_counts(dataset, site) {
                Some(sf) => vec![
                    PieSlice {
                        label: Outcome::Success.to_string(),
                        value: sf.success,
                    },
                    PieSlice {
                        label: Outcome::Failure.to_string(),
                        value: sf.failure,
                    },
                ],
                None => {
                    log::debug!("no launches for site {site}, pie chart left empty");
                    Vec::new()
                }
            };
            PieChart {
                title: format!("Total Success Launches by Site: {site}"),
                slices,
            }
        }
    }
}

/// Payload vs. outcome for the launches passing both controls, coloured by
/// booster version category.
pub fn scatter_chart(dataset: &LaunchDataset, controls: &ControlState) -> ScatterChart {
    let points = filter_by_payload_and_site(dataset, controls.range(), controls.site())
        .into_iter()
        .map(|rec| ScatterPoint {
            x: rec.payload_mass,
            y: rec.outcome.as_f64(),
            category: rec.booster_category.clone(),
        })
        .collect();

    ScatterChart {
        title: format!(
            "Correlation between Payload and Success for {}",
            controls.site()
        ),
        x_label: PAYLOAD_COLUMN.to_string(),
        y_label: OUTCOME_COLUMN.to_string(),
        points,
    }
}

// ---------------------------------------------------------------------------
// Export
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct ChartExport<'a> {
    pie: &'a PieChart,
    scatter: &'a ScatterChart,
}

/// Both chart descriptions as pretty JSON: `{"pie": ..., "scatter": ...}`.
pub fn export_json(pie: &PieChart, scatter: &ScatterChart) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&ChartExport { pie, scatter })
}

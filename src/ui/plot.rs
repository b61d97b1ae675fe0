use std::f64::consts::{FRAC_PI_2, TAU};

use eframe::egui::{self, Color32, Stroke, Ui};
use egui_plot::{Legend, MarkerShape, Plot, PlotPoint, PlotPoints, Points, Polygon, Text};

use crate::chart::{PieChart, ScatterChart};
use crate::color::{slice_colors, CategoryColors};
use crate::state::AppState;

/// Arc resolution of a full turn.
const SEGMENTS_PER_TURN: usize = 120;
/// Longest arc drawn as a single polygon; keeps every piece convex.
const MAX_PIECE_TURN: f64 = 0.25;

// ---------------------------------------------------------------------------
// Central panel: both charts stacked
// ---------------------------------------------------------------------------

pub fn chart_area(ui: &mut Ui, state: &AppState) {
    let Some(db) = &state.dashboard else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a launch dataset to begin  (File → Open…)");
        });
        return;
    };

    let chart_height = ((ui.available_height() - 90.0) / 2.0).max(160.0);

    ui.vertical_centered(|ui: &mut Ui| ui.heading(&db.pie.title));
    pie_plot(ui, &db.pie, chart_height);

    ui.separator();

    ui.vertical_centered(|ui: &mut Ui| ui.heading(&db.scatter.title));
    scatter_plot(ui, &db.scatter, &db.booster_colors, chart_height);
}

// ---------------------------------------------------------------------------
// Pie chart
// ---------------------------------------------------------------------------

/// Placeholder text for a pie with nothing to draw.
fn empty_pie_message(chart: &PieChart) -> Option<&'static str> {
    if !chart.is_empty() {
        None
    } else if chart.slices.is_empty() {
        Some("No launches for this selection")
    } else {
        Some("No successful launches for this selection")
    }
}

fn pie_plot(ui: &mut Ui, chart: &PieChart, height: f32) {
    if let Some(message) = empty_pie_message(chart) {
        ui.allocate_ui(egui::vec2(ui.available_width(), height), |ui: &mut Ui| {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.label(message);
            });
        });
        return;
    }

    let fractions = chart.fractions();
    let colors = slice_colors(chart.slices.len());

    Plot::new("pie_chart")
        .legend(Legend::default())
        .height(height)
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .show_x(false)
        .show_y(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .include_x(-1.1)
        .include_x(1.1)
        .include_y(-1.1)
        .include_y(1.1)
        .show(ui, |plot_ui| {
            let mut start = 0.0;
            for ((slice, &fraction), &color) in chart.slices.iter().zip(&fractions).zip(&colors) {
                let end = start + fraction;
                let name = format!("{} ({:.1}%)", slice.label, fraction * 100.0);

                // Pieces share name and colour so the legend treats them as one item.
                for piece in wedge_pieces(start, end) {
                    plot_ui.polygon(
                        Polygon::new(piece.into_iter().collect::<PlotPoints>())
                            .name(&name)
                            .fill_color(color)
                            .stroke(Stroke::new(1.0, Color32::WHITE)),
                    );
                }

                if fraction > 0.0 {
                    let [x, y] = point_on_circle((start + end) / 2.0, 0.65);
                    plot_ui.text(
                        Text::new(PlotPoint::new(x, y), format!("{:.1}%", fraction * 100.0))
                            .color(Color32::WHITE),
                    );
                }

                start = end;
            }
        });
}

/// Point at `turn` (fraction of a full circle, clockwise from 12 o'clock)
/// on a circle of `radius` around the origin.
fn point_on_circle(turn: f64, radius: f64) -> [f64; 2] {
    let angle = FRAC_PI_2 - TAU * turn;
    [radius * angle.cos(), radius * angle.sin()]
}

/// Convex polygons (centre + arc) that together cover the wedge from
/// `start` to `end`, both in turns. A zero-width wedge has no pieces.
fn wedge_pieces(start: f64, end: f64) -> Vec<Vec<[f64; 2]>> {
    let mut pieces = Vec::new();
    let mut from = start;
    while end - from > f64::EPSILON {
        let to = (from + MAX_PIECE_TURN).min(end);
        let steps = (((to - from) * SEGMENTS_PER_TURN as f64).ceil() as usize).max(1);

        let mut outline = Vec::with_capacity(steps + 2);
        outline.push([0.0, 0.0]);
        for k in 0..=steps {
            let turn = from + (to - from) * k as f64 / steps as f64;
            outline.push(point_on_circle(turn, 1.0));
        }
        pieces.push(outline);
        from = to;
    }
    pieces
}

// ---------------------------------------------------------------------------
// Scatter chart
// ---------------------------------------------------------------------------

fn scatter_plot(ui: &mut Ui, chart: &ScatterChart, colors: &CategoryColors, height: f32) {
    Plot::new("scatter_chart")
        .legend(Legend::default())
        .height(height)
        .x_axis_label(chart.x_label.clone())
        .y_axis_label(chart.y_label.clone())
        .include_y(-0.2)
        .include_y(1.2)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for category in chart.categories() {
                let points: PlotPoints = chart
                    .points_in(category)
                    .map(|p| [p.x, p.y])
                    .collect();

                plot_ui.points(
                    Points::new(points)
                        .name(category)
                        .color(colors.color_for(category))
                        .shape(MarkerShape::Circle)
                        .filled(true)
                        .radius(4.0),
                );
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: [f64; 2], b: [f64; 2]) -> bool {
        (a[0] - b[0]).abs() < 1e-9 && (a[1] - b[1]).abs() < 1e-9
    }

    #[test]
    fn test_circle_starts_at_top_and_runs_clockwise() {
        assert!(close(point_on_circle(0.0, 1.0), [0.0, 1.0]));
        assert!(close(point_on_circle(0.25, 1.0), [1.0, 0.0]));
        assert!(close(point_on_circle(0.5, 2.0), [0.0, -2.0]));
    }

    #[test]
    fn test_full_circle_splits_into_quarters() {
        let pieces = wedge_pieces(0.0, 1.0);
        assert_eq!(pieces.len(), 4);
        for piece in &pieces {
            assert_eq!(piece[0], [0.0, 0.0]);
            assert_eq!(piece.len(), SEGMENTS_PER_TURN / 4 + 2);
        }
        let last = pieces[3].last().unwrap();
        assert!(close(*last, [0.0, 1.0]));
    }

    #[test]
    fn test_small_wedge_is_single_piece() {
        let pieces = wedge_pieces(0.1, 0.2);
        assert_eq!(pieces.len(), 1);
        assert!(close(pieces[0][1], point_on_circle(0.1, 1.0)));
        assert!(close(*pieces[0].last().unwrap(), point_on_circle(0.2, 1.0)));
    }

    fn pie(values: &[f64]) -> PieChart {
        PieChart {
            title: "Total Success Launches by Site".to_string(),
            slices: values
                .iter()
                .enumerate()
                .map(|(i, &value)| crate::chart::PieSlice {
                    label: format!("site {i}"),
                    value,
                })
                .collect(),
        }
    }

    #[test]
    fn test_empty_pie_messages() {
        assert_eq!(empty_pie_message(&pie(&[])), Some("No launches for this selection"));
        assert_eq!(
            empty_pie_message(&pie(&[0.0, 0.0])),
            Some("No successful launches for this selection")
        );
        assert_eq!(empty_pie_message(&pie(&[0.0, 0.5])), None);
    }

    #[test]
    fn test_zero_wedge_has_no_pieces() {
        assert!(wedge_pieces(0.4, 0.4).is_empty());
    }
}

use dioxus::prelude::*;

use crate::domain::projection::{ProjectionDirection, SeriesPoint};
use crate::ui::theme;
use crate::util::format::format_currency;

const WIDTH: f64 = 640.0;
const HEIGHT: f64 = 260.0;
const PADDING: f64 = 36.0;

#[derive(Clone, Debug, PartialEq)]
struct PlotPoint {
    x: f64,
    y: f64,
    year: i32,
    label: String,
    projected: bool,
}

/// Maps the series onto the plot area; the lowest value sits on the bottom
/// edge and the highest on the top.
fn layout(series: &[SeriesPoint]) -> Vec<PlotPoint> {
    let min = series.iter().map(|p| p.value).fold(f64::INFINITY, f64::min);
    let max = series.iter().map(|p| p.value).fold(f64::NEG_INFINITY, f64::max);
    let span = if max > min { max - min } else { 1.0 };
    let steps = series.len().saturating_sub(1).max(1) as f64;
    let plot_w = WIDTH - 2.0 * PADDING;
    let plot_h = HEIGHT - 2.0 * PADDING;

    series
        .iter()
        .enumerate()
        .map(|(idx, point)| PlotPoint {
            x: PADDING + plot_w * idx as f64 / steps,
            y: PADDING + plot_h * (1.0 - (point.value - min) / span),
            year: point.year,
            label: format_currency(point.value),
            projected: point.direction == ProjectionDirection::Future,
        })
        .collect()
}

fn polyline(points: &[PlotPoint]) -> String {
    points
        .iter()
        .map(|p| format!("{:.1},{:.1}", p.x, p.y))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Price development of a property, history solid and projection dashed.
#[component]
pub fn TrendChart(series: Vec<SeriesPoint>) -> Element {
    if series.is_empty() {
        return rsx! {
            p { class: "text-sm {theme::TEXT_MUTED}", "Add a property to see its price trend." }
        };
    }

    let points = layout(&series);
    let split = points.iter().position(|p| p.projected).unwrap_or(points.len());
    let history = polyline(&points[..split]);
    // The projection starts from the last historical point.
    let projection = polyline(&points[split.saturating_sub(1)..]);
    let has_projection = split < points.len();
    let view_box = format!("0 0 {WIDTH} {HEIGHT}");
    let baseline = HEIGHT - PADDING;

    rsx! {
        svg {
            class: "w-full",
            view_box: "{view_box}",
            line {
                x1: "{PADDING}",
                y1: "{baseline}",
                x2: "{WIDTH - PADDING}",
                y2: "{baseline}",
                stroke: "#334155",
            }
            polyline {
                points: "{history}",
                fill: "none",
                stroke: "#34d399",
                stroke_width: "3",
            }
            if has_projection {
                polyline {
                    points: "{projection}",
                    fill: "none",
                    stroke: "#fbbf24",
                    stroke_width: "3",
                    stroke_dasharray: "6 4",
                }
            }
            for point in points.iter() {
                g { key: "{point.year}",
                    circle {
                        cx: "{point.x}",
                        cy: "{point.y}",
                        r: "4",
                        fill: if point.projected { "#fbbf24" } else { "#34d399" },
                    }
                    text {
                        x: "{point.x}",
                        y: "{HEIGHT - PADDING / 3.0}",
                        text_anchor: "middle",
                        font_size: "12",
                        fill: "#94a3b8",
                        "{point.year}"
                    }
                    text {
                        x: "{point.x}",
                        y: "{point.y - 10.0}",
                        text_anchor: "middle",
                        font_size: "10",
                        fill: "#cbd5e1",
                        "{point.label}"
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(year: i32, value: f64, direction: ProjectionDirection) -> SeriesPoint {
        SeriesPoint { year, value, direction }
    }

    #[test]
    fn extremes_touch_plot_edges() {
        let series = vec![
            point(2022, 100.0, ProjectionDirection::Historical),
            point(2023, 150.0, ProjectionDirection::Historical),
            point(2024, 200.0, ProjectionDirection::Future),
        ];
        let points = layout(&series);
        assert_eq!(points[0].x, PADDING);
        assert_eq!(points[0].y, HEIGHT - PADDING);
        assert_eq!(points[2].x, WIDTH - PADDING);
        assert_eq!(points[2].y, PADDING);
        assert!(points[2].projected);
        assert!(!points[1].projected);
    }

    #[test]
    fn flat_series_stays_on_baseline() {
        let series = vec![
            point(2022, 5.0, ProjectionDirection::Historical),
            point(2023, 5.0, ProjectionDirection::Historical),
        ];
        assert!(layout(&series).iter().all(|p| p.y == HEIGHT - PADDING));
        assert_eq!(polyline(&layout(&series)), "36.0,224.0 604.0,224.0");
    }
}

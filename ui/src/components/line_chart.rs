use api::CalendarDay;
use dioxus::prelude::*;

use crate::core::format::format_distance_km;
use crate::roundup::{ChartSeries, ChartViewport};
use crate::t;

/// Day-of-month ticks: the 1st, every 7th day after it, and the last day.
fn tick_indices(len: usize) -> Vec<usize> {
    if len == 0 {
        return Vec::new();
    }
    let mut ticks: Vec<usize> = (0..len).step_by(7).collect();
    if ticks.last() != Some(&(len - 1)) {
        ticks.push(len - 1);
    }
    ticks
}

/// Accessible name for one day's marker.
fn point_label(day: &str, distance_km: f64) -> String {
    t!(
        "chart-point-label",
        day = day.to_string(),
        distance = format_distance_km(distance_km)
    )
}

/// Smoothed daily distance with a filled area and a marker per day.
#[component]
pub fn DailyDistanceChart(days: Vec<CalendarDay>) -> Element {
    let viewport = ChartViewport::default();
    let series = ChartSeries::daily_distance(&days);
    let geometry = series.geometry(viewport);
    let has_distance = series.values.iter().any(|v| *v > 0.0);
    let view_box = format!("0 0 {} {}", viewport.width, viewport.height);
    let baseline = viewport.baseline();

    let ticks: Vec<(String, f64, String)> = tick_indices(geometry.coordinates.len())
        .into_iter()
        .filter_map(|index| {
            let point = geometry.coordinates.get(index)?;
            let label = series.labels.get(index)?.clone();
            Some((format!("tick-{index}"), point.x, label))
        })
        .collect();

    let points: Vec<(String, &'static str, f64, f64, String)> = geometry
        .coordinates
        .iter()
        .enumerate()
        .map(|(index, point)| {
            let class = if point.value > 0.0 {
                "line-chart__point line-chart__point--active"
            } else {
                "line-chart__point"
            };
            let day = series.labels.get(index).map(String::as_str).unwrap_or_default();
            (format!("point-{index}"), class, point.x, point.y, point_label(day, point.value))
        })
        .collect();

    rsx! {
        section { class: "roundup-card roundup-chart",
            div { class: "roundup-card__header",
                h2 { {t!("chart-title")} }
            }
            if !has_distance {
                p { class: "roundup-card__placeholder", {t!("chart-empty")} }
            }
            svg {
                class: "line-chart",
                view_box: "{view_box}",
                preserve_aspect_ratio: "none",
                role: "img",
                defs {
                    linearGradient { id: "line-chart-fill", x1: "0", y1: "0", x2: "0", y2: "1",
                        stop { offset: "0%", stop_color: "#f97316", stop_opacity: "0.35" }
                        stop { offset: "100%", stop_color: "#f97316", stop_opacity: "0" }
                    }
                }
                line {
                    class: "line-chart__baseline",
                    x1: "{viewport.padding}",
                    x2: "{viewport.width - viewport.padding}",
                    y1: "{baseline}",
                    y2: "{baseline}",
                }
                path { class: "line-chart__area", d: "{geometry.area_path}", fill: "url(#line-chart-fill)" }
                path { class: "line-chart__line", d: "{geometry.line_path}", fill: "none" }
                for (key, class, x, y, label) in points {
                    circle {
                        key: "{key}",
                        class,
                        cx: "{x}",
                        cy: "{y}",
                        r: "3",
                        "aria-label": label,
                    }
                }
                for (key, x, label) in ticks {
                    text {
                        key: "{key}",
                        class: "line-chart__tick",
                        x: "{x}",
                        y: "{viewport.height - 4.0}",
                        text_anchor: "middle",
                        "{label}"
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticks_cover_first_weekly_and_last_day() {
        assert_eq!(tick_indices(30), vec![0, 7, 14, 21, 28, 29]);
        assert_eq!(tick_indices(29), vec![0, 7, 14, 21, 28]);
        assert_eq!(tick_indices(1), vec![0]);
        assert!(tick_indices(0).is_empty());
    }

    #[test]
    fn point_label_names_the_day_and_distance() {
        let label = point_label("14", 12.34);
        assert!(label.contains("14"), "{label}");
        assert!(label.contains("12.3 km"), "{label}");
        assert!(point_label("3", 0.0).contains("0 km"));
    }
}

use api::MonthlyRoundup;
use dioxus::prelude::*;

use crate::core::format::{format_distance_km, format_duration_hm, format_elevation_m};
use crate::t;

#[component]
pub fn MonthlySummary(roundup: MonthlyRoundup) -> Element {
    let cards = [
        (
            t!("summary-active-days"),
            roundup.total_active_days.to_string(),
            t!("summary-active-days-meta", days = roundup.calendar_days.len().to_string()),
        ),
        (
            t!("summary-activities"),
            roundup.total_activities.to_string(),
            String::new(),
        ),
        (
            t!("summary-distance"),
            format_distance_km(roundup.total_distance_km),
            String::new(),
        ),
        (
            t!("summary-moving-time"),
            format_duration_hm(roundup.total_moving_time_seconds),
            String::new(),
        ),
        (
            t!("summary-elevation"),
            format_elevation_m(roundup.total_elevation_gain_m),
            String::new(),
        ),
    ];

    rsx! {
        section { class: "roundup-card roundup-summary",
            div { class: "roundup-card__header",
                h2 { {t!("summary-title")} }
                span { class: "roundup-card__meta", "{roundup.month_label}" }
            }
            div { class: "roundup-summary__grid",
                for (label, value, meta) in cards {
                    div { key: "{label}", class: "metric-card",
                        span { class: "metric-card__label", "{label}" }
                        span { class: "metric-card__value", "{value}" }
                        if !meta.is_empty() {
                            span { class: "metric-card__meta", "{meta}" }
                        }
                    }
                }
            }
        }
    }
}

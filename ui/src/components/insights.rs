use api::MonthlyInsights;
use dioxus::prelude::*;

use crate::core::format::{format_distance_km, format_duration_hm, format_hour};
use crate::i18n;
use crate::t;

#[component]
pub fn InsightsPanel(insights: MonthlyInsights) -> Element {
    let empty = || t!("insights-empty-value");

    let (day_value, day_meta) = match &insights.most_active_day {
        Some(day) => (
            format!("{} {}", day.date.day(), i18n::month_name(day.date.month())),
            t!(
                "insights-day-meta",
                count = day.total_activities.to_string(),
                distance = format_distance_km(day.total_distance_km)
            ),
        ),
        None => (empty(), String::new()),
    };

    let (hour_value, hour_meta) = match &insights.most_active_time_of_day {
        Some(slot) => (
            format_hour(slot.hour),
            t!("insights-hour-meta", count = slot.total_activities.to_string()),
        ),
        None => (empty(), String::new()),
    };

    let average = insights
        .average_activity_time_seconds
        .map(format_duration_hm)
        .unwrap_or_else(empty);

    let streak = t!(
        "insights-streak-value",
        weeks = insights.weekly_streak_weeks.to_string()
    );

    rsx! {
        section { class: "roundup-card roundup-insights",
            div { class: "roundup-card__header",
                h2 { {t!("insights-title")} }
            }
            dl { class: "insights-list",
                div { class: "insights-list__item",
                    dt { {t!("insights-most-active-day")} }
                    dd { "{day_value}" }
                    if !day_meta.is_empty() {
                        dd { class: "insights-list__meta", "{day_meta}" }
                    }
                }
                div { class: "insights-list__item",
                    dt { {t!("insights-most-active-hour")} }
                    dd { "{hour_value}" }
                    if !hour_meta.is_empty() {
                        dd { class: "insights-list__meta", "{hour_meta}" }
                    }
                }
                div { class: "insights-list__item",
                    dt { {t!("insights-average-time")} }
                    dd { "{average}" }
                }
                div { class: "insights-list__item",
                    dt { {t!("insights-weekly-streak")} }
                    dd { "{streak}" }
                }
            }
        }
    }
}

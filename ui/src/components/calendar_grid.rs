use api::CalendarDay;
use dioxus::prelude::*;

use crate::core::format::format_distance_km;
use crate::roundup::{build_calendar_cells, CalendarCell};
use crate::t;

struct CellView {
    key: String,
    class: &'static str,
    title: String,
    label: String,
}

fn cell_view(index: usize, cell: &CalendarCell) -> CellView {
    match cell.day {
        None => CellView {
            key: format!("blank-{index}"),
            class: "calendar-grid__cell calendar-grid__cell--blank",
            title: String::new(),
            label: String::new(),
        },
        Some(day) if cell.is_active => CellView {
            key: format!("day-{day}"),
            class: "calendar-grid__cell calendar-grid__cell--active",
            title: t!(
                "calendar-day-tooltip",
                count = cell.total_activities.to_string(),
                distance = format_distance_km(cell.total_distance_km)
            ),
            label: day.to_string(),
        },
        Some(day) => CellView {
            key: format!("day-{day}"),
            class: "calendar-grid__cell",
            title: String::new(),
            label: day.to_string(),
        },
    }
}

/// Monday-first month grid; active days are highlighted.
#[component]
pub fn CalendarGrid(days: Vec<CalendarDay>) -> Element {
    let cells: Vec<CellView> = build_calendar_cells(&days)
        .iter()
        .enumerate()
        .map(|(index, cell)| cell_view(index, cell))
        .collect();
    let weekdays = [
        t!("weekday-mon"),
        t!("weekday-tue"),
        t!("weekday-wed"),
        t!("weekday-thu"),
        t!("weekday-fri"),
        t!("weekday-sat"),
        t!("weekday-sun"),
    ];
    let active = days.iter().filter(|d| d.is_active).count();

    rsx! {
        section { class: "roundup-card roundup-calendar",
            div { class: "roundup-card__header",
                h2 { {t!("calendar-title")} }
                span { class: "roundup-card__meta",
                    {t!("calendar-active-count", count = active.to_string())}
                }
            }
            div { class: "calendar-grid", role: "grid",
                for label in weekdays {
                    span { key: "{label}", class: "calendar-grid__weekday", "{label}" }
                }
                for cell in cells {
                    span { key: "{cell.key}", class: cell.class, title: "{cell.title}", "{cell.label}" }
                }
            }
        }
    }
}

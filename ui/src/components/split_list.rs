use api::ActivitySplitEntry;
use dioxus::prelude::*;

use crate::core::format::format_percentage;
use crate::t;

/// Bar width for a server-computed percentage. The label keeps the raw value.
pub(crate) fn bar_width(percentage: f64) -> f64 {
    if percentage.is_finite() {
        percentage.clamp(0.0, 100.0)
    } else {
        0.0
    }
}

/// Glyph shown next to an activity type in the split.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityIcon {
    Footprints,
    Mountain,
    Bike,
    Waves,
    Dumbbell,
    Activity,
}

impl ActivityIcon {
    pub fn name(self) -> &'static str {
        match self {
            Self::Footprints => "footprints",
            Self::Mountain => "mountain",
            Self::Bike => "bike",
            Self::Waves => "waves",
            Self::Dumbbell => "dumbbell",
            Self::Activity => "activity",
        }
    }

    /// Stroke path on a 24x24 grid.
    fn path(self) -> &'static str {
        match self {
            Self::Footprints => {
                "M4 16v-2.4C4 11.5 3 10.5 3 8c0-2.7 1.5-6 4.5-6C9.4 2 10 3.8 10 5.5c0 3.1-2 5.7-2 8.7V16a2 2 0 1 1-4 0Z \
                 M20 20v-2.4c0-2.1 1-3.1 1-5.6 0-2.7-1.5-6-4.5-6C14.6 6 14 7.8 14 9.5c0 3.1 2 5.7 2 8.7V20a2 2 0 1 0 4 0Z"
            }
            Self::Mountain => "M8 3l4 8 5-5 5 15H2L8 3z",
            Self::Bike => {
                "M2 17.5a3.5 3.5 0 1 0 7 0a3.5 3.5 0 1 0-7 0 M15 17.5a3.5 3.5 0 1 0 7 0a3.5 3.5 0 1 0-7 0 \
                 M12 17.5V14l-3-3 4-3 2 3h2 M14 5a1 1 0 1 0 2 0a1 1 0 1 0-2 0"
            }
            Self::Waves => {
                "M2 7c2.5 0 2.5-2 5-2s2.5 2 5 2 2.5-2 5-2 2.5 2 5 2 \
                 M2 13c2.5 0 2.5-2 5-2s2.5 2 5 2 2.5-2 5-2 2.5 2 5 2 \
                 M2 19c2.5 0 2.5-2 5-2s2.5 2 5 2 2.5-2 5-2 2.5 2 5 2"
            }
            Self::Dumbbell => "M6 5v14 M18 5v14 M3 9v6 M21 9v6 M6 12h12",
            Self::Activity => "M22 12h-4l-3 9L9 3l-3 9H2",
        }
    }
}

/// Icon for a Strava activity type. Matching ignores case, spaces,
/// underscores and hyphens so `Weight Training` and `weight_training` agree.
pub fn activity_icon(kind: &str) -> ActivityIcon {
    let normalized: String = kind
        .chars()
        .filter(|c| !matches!(c, ' ' | '_' | '-'))
        .flat_map(char::to_lowercase)
        .collect();

    match normalized.as_str() {
        "run" | "walk" | "trailrun" | "virtualrun" => ActivityIcon::Footprints,
        "hike" => ActivityIcon::Mountain,
        "ride" | "cycling" | "virtualride" | "ebikeride" => ActivityIcon::Bike,
        "swim" => ActivityIcon::Waves,
        "workout" | "weighttraining" | "strength" | "strengthtraining" => ActivityIcon::Dumbbell,
        _ => ActivityIcon::Activity,
    }
}

#[component]
fn SplitIcon(icon: ActivityIcon) -> Element {
    rsx! {
        svg {
            class: "split-list__icon split-list__icon--{icon.name()}",
            view_box: "0 0 24 24",
            fill: "none",
            stroke: "currentColor",
            stroke_width: "2",
            stroke_linecap: "round",
            stroke_linejoin: "round",
            "aria-hidden": "true",
            path { d: icon.path() }
        }
    }
}

#[component]
pub fn ActivitySplitList(split: Vec<ActivitySplitEntry>) -> Element {
    rsx! {
        section { class: "roundup-card roundup-split",
            div { class: "roundup-card__header",
                h2 { {t!("split-title")} }
            }
            if split.is_empty() {
                p { class: "roundup-card__placeholder", {t!("split-empty")} }
            } else {
                ul { class: "split-list",
                    for entry in split {
                        li { key: "{entry.kind}", class: "split-list__row",
                            div { class: "split-list__labels",
                                span { class: "split-list__kind",
                                    SplitIcon { icon: activity_icon(&entry.kind) }
                                    "{entry.kind}"
                                }
                                span { class: "split-list__count",
                                    {t!("split-count", count = entry.count.to_string())}
                                }
                                span { class: "split-list__percentage", {format_percentage(entry.percentage)} }
                            }
                            div { class: "split-list__track",
                                div {
                                    class: "split-list__bar",
                                    style: "width: {bar_width(entry.percentage)}%",
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

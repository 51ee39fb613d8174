//! Shared UI crate for Strava Roundup. Cross-platform logic and views live here;
//! the `web` and `desktop` crates only add routing and launch glue.

use dioxus::prelude::*;

pub mod core;
pub mod i18n;
pub mod roundup;
pub mod views;

pub mod components {
    // Localized application navbar (components/app_navbar.rs)
    pub mod app_navbar;
    pub use app_navbar::register_nav;
    pub use app_navbar::AppNavbar;
    pub use app_navbar::NavBuilder;

    mod calendar_grid;
    pub use calendar_grid::CalendarGrid;

    mod insights;
    pub use insights::InsightsPanel;

    mod line_chart;
    pub use line_chart::DailyDistanceChart;

    mod share;
    pub use share::{SharePanel, SharePoster};

    mod split_list;
    pub use split_list::ActivitySplitList;

    mod summary;
    pub use summary::MonthlySummary;
}

/// Shared theme, served as an asset on web and embedded by the desktop launcher.
pub const THEME_CSS: Asset = asset!("/assets/theme/main.css");

#[cfg(test)]
#[path = "tests/i18n_completeness.rs"]
mod i18n_completeness;

#![cfg(test)]
//! Selectors the shared components render with must stay in the unified
//! theme. Update the list together with the markup when renaming a class.

const THEME_CSS: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../ui/assets/theme/main.css"
));

const REQUIRED_SELECTORS: &[&str] = &[
    // Global / layout
    ":root",
    ".page {",
    ".visually-hidden",
    ".navbar__links",
    ".navbar__link",
    // Buttons & badges
    ".button {",
    ".button--primary",
    ".button--strava",
    ".button--ghost",
    ".badge--connected",
    // Landing
    ".hero--run",
    ".hero--ride",
    ".hero--swim",
    ".hero--workout",
    ".feature-card",
    // Callback
    ".callback__status--success",
    ".callback__status--error",
    ".callback__loader",
    // Dashboard cards
    ".dashboard__grid",
    ".roundup-card {",
    ".roundup-card__header",
    ".roundup-card__meta--success",
    ".roundup-card__meta--error",
    ".metric-card__value",
    // Calendar
    ".calendar-grid {",
    ".calendar-grid__cell--active",
    ".calendar-grid__cell--blank",
    // Split, insights, chart
    ".split-list__track",
    ".split-list__bar",
    ".split-list__icon",
    ".insights-list__meta",
    ".line-chart__line",
    ".line-chart__point--active",
    // Share
    ".share-poster",
    ".roundup-share__actions",
    // Help
    ".help__faqs",
    "@media (max-width: 860px)",
];

#[test]
fn unified_theme_contains_required_selectors() {
    let missing: Vec<_> = REQUIRED_SELECTORS
        .iter()
        .filter(|sel| !THEME_CSS.contains(**sel))
        .collect();

    assert!(
        missing.is_empty(),
        "Missing {} required CSS selectors in unified theme:\n{}",
        missing.len(),
        missing.iter().map(|s| s.to_string()).collect::<Vec<_>>().join("\n")
    );
}

#[test]
fn every_hero_scene_is_styled() {
    for scene in ["run", "ride", "swim", "workout"] {
        let selector = format!(".hero--{scene} {{");
        assert!(THEME_CSS.contains(&selector), "no rule for {selector}");
    }
}

#[test]
fn unified_theme_not_trivially_empty() {
    let non_ws_len = THEME_CSS.chars().filter(|c| !c.is_whitespace()).count();
    assert!(
        non_ws_len > 4_000,
        "Embedded theme appears unexpectedly small ({non_ws_len} non-whitespace chars)"
    );
}

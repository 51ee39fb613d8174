//! The 1080×1920 share poster, rendered straight to SVG markup.
//!
//! Rendering is a pure function of [`PosterContent`] and [`SharePosterTokens`]:
//! no clock, no randomness. The dashboard shows this markup inline and the
//! export pipeline rasterizes the very same string.

use api::MonthlyRoundup;

use crate::core::format::{
    format_distance_km, format_duration_hm, format_elevation_m, initial,
};
use crate::roundup::chart::{fmt_num, ChartGeometry, ChartSeries, ChartViewport};
use crate::t;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PosterPalette {
    pub background_top: &'static str,
    pub background_mid: &'static str,
    pub background_bottom: &'static str,
    pub accent_start: &'static str,
    pub accent_end: &'static str,
    pub card_top: &'static str,
    pub card_bottom: &'static str,
    pub card_stroke: &'static str,
    pub primary_text: &'static str,
    pub secondary_text: &'static str,
    pub tertiary_text: &'static str,
    pub headline: &'static str,
    pub label: &'static str,
    pub photo_fallback_start: &'static str,
    pub photo_fallback_end: &'static str,
    pub baseline_stroke: &'static str,
    pub photo_outline: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PosterTypography {
    pub family: &'static str,
    pub month_size: f64,
    pub hero_size: f64,
    pub subhead_size: f64,
    pub metric_label_size: f64,
    pub metric_value_size: f64,
    pub metric_caption_size: f64,
    pub headline_size: f64,
    pub summary_size: f64,
    pub footer_size: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhotoLayout {
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub radius: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricGridLayout {
    pub card_width: f64,
    pub card_height: f64,
    pub h_gap: f64,
    pub v_gap: f64,
    pub start_y: f64,
}

/// Where the daily-distance trend replaces the decorative ribbon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PosterLayout {
    pub padding: f64,
    pub photo: PhotoLayout,
    pub metrics: MetricGridLayout,
    pub accent_path: &'static str,
    pub ribbon_path: &'static str,
    pub trend: TrendBox,
}

/// Palette, type scale and geometry of the poster. Pure configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SharePosterTokens {
    pub width: u32,
    pub height: u32,
    pub palette: PosterPalette,
    pub typography: PosterTypography,
    pub layout: PosterLayout,
    pub subheading: &'static str,
    pub brand: &'static str,
}

pub const SHARE_POSTER_TOKENS: SharePosterTokens = SharePosterTokens {
    width: 1080,
    height: 1920,
    palette: PosterPalette {
        background_top: "#040611",
        background_mid: "#0b1424",
        background_bottom: "#111d33",
        accent_start: "#ff7f3f",
        accent_end: "#f97316",
        card_top: "#1e293b",
        card_bottom: "#0f172a",
        card_stroke: "rgba(148, 163, 184, 0.2)",
        primary_text: "#f8fafc",
        secondary_text: "#cbd5f5",
        tertiary_text: "#94a3b8",
        headline: "#fde68a",
        label: "#f97316",
        photo_fallback_start: "#fb923c",
        photo_fallback_end: "#f97316",
        baseline_stroke: "rgba(148, 163, 184, 0.18)",
        photo_outline: "rgba(248, 250, 252, 0.2)",
    },
    typography: PosterTypography {
        family: "Inter, sans-serif",
        month_size: 28.0,
        hero_size: 74.0,
        subhead_size: 28.0,
        metric_label_size: 22.0,
        metric_value_size: 52.0,
        metric_caption_size: 20.0,
        headline_size: 36.0,
        summary_size: 26.0,
        footer_size: 22.0,
    },
    layout: PosterLayout {
        padding: 120.0,
        photo: PhotoLayout {
            x: 180.0,
            y: 320.0,
            size: 720.0,
            radius: 72.0,
        },
        metrics: MetricGridLayout {
            card_width: 360.0,
            card_height: 210.0,
            h_gap: 300.0,
            v_gap: 40.0,
            start_y: 1150.0,
        },
        accent_path: "M-160 360 Q520 100 1140 540 L1140 860 Q520 600 -160 940 Z",
        ribbon_path: "M120 1130 C320 1060 760 1060 960 1130",
        trend: TrendBox {
            x: 120.0,
            y: 1050.0,
            width: 840.0,
            height: 90.0,
        },
    },
    subheading: "Monthly Roundup Snapshot",
    brand: "Strava Roundup",
};

impl Default for SharePosterTokens {
    fn default() -> Self {
        SHARE_POSTER_TOKENS
    }
}

impl SharePosterTokens {
    /// Viewport to build the poster's trend geometry against; coordinates are
    /// local to `layout.trend`.
    pub fn trend_viewport(&self) -> ChartViewport {
        ChartViewport {
            width: self.layout.trend.width,
            height: self.layout.trend.height,
            padding: 8.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PosterMetric {
    pub label: String,
    pub value: String,
    pub caption: String,
}

impl PosterMetric {
    pub fn new(label: impl Into<String>, value: impl Into<String>, caption: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            caption: caption.into(),
        }
    }
}

/// Everything the poster shows. Only the first four metrics are drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct PosterContent {
    pub month_label: String,
    pub athlete_name: String,
    pub athlete_initial: char,
    pub metrics: Vec<PosterMetric>,
    pub distance_headline: String,
    pub summary_line: String,
    pub poster_year: i32,
    /// Data URI. Anything else is ignored and the initial is drawn instead.
    pub poster_image: Option<String>,
    pub trend: Option<ChartGeometry>,
    /// Alternate document with `{{placeholder}}` slots.
    pub template_svg: Option<String>,
}

impl PosterContent {
    /// Poster text for `roundup`, addressed to `athlete_name`.
    pub fn from_roundup(
        roundup: &MonthlyRoundup,
        athlete_name: &str,
        poster_image: Option<String>,
        tokens: &SharePosterTokens,
    ) -> Self {
        let days_in_month = roundup.calendar_days.len().to_string();
        let distance = format_distance_km(roundup.total_distance_km);
        let moving_time = format_duration_hm(roundup.total_moving_time_seconds);

        let time_caption = match roundup.insights.average_activity_time_seconds {
            Some(avg) if roundup.total_activities > 0 => {
                t!("poster-metric-time-caption", average = format_duration_hm(avg))
            }
            _ => t!("poster-metric-time-caption-empty"),
        };

        let metrics = vec![
            PosterMetric::new(
                t!("poster-metric-active-days"),
                roundup.total_active_days.to_string(),
                t!("poster-metric-active-days-caption", days = days_in_month),
            ),
            PosterMetric::new(
                t!("poster-metric-distance"),
                distance.clone(),
                t!(
                    "poster-metric-distance-caption",
                    count = roundup.total_activities.to_string()
                ),
            ),
            PosterMetric::new(t!("poster-metric-time"), moving_time, time_caption),
            PosterMetric::new(
                t!("poster-metric-elevation"),
                format_elevation_m(roundup.total_elevation_gain_m),
                t!("poster-metric-elevation-caption"),
            ),
        ];

        let has_distance = roundup.calendar_days.iter().any(|d| d.total_distance_km > 0.0);
        let trend = (has_distance && roundup.calendar_days.len() >= 2).then(|| {
            ChartSeries::daily_distance(&roundup.calendar_days).geometry(tokens.trend_viewport())
        });

        let name = athlete_name.trim();
        Self {
            month_label: roundup.month_label.clone(),
            athlete_name: name.to_string(),
            athlete_initial: initial(name),
            metrics,
            distance_headline: t!(
                "poster-headline",
                distance = distance,
                month = roundup.month_name.clone()
            ),
            summary_line: t!(
                "poster-summary",
                activities = roundup.total_activities.to_string(),
                days = roundup.total_active_days.to_string(),
                weeks = roundup.insights.weekly_streak_weeks.to_string()
            ),
            poster_year: roundup.month.year(),
            poster_image,
            trend,
            template_svg: None,
        }
    }
}

/// Full SVG document for `content`.
pub fn render_share_poster(content: &PosterContent, tokens: &SharePosterTokens) -> String {
    if let Some(template) = content.template_svg.as_deref() {
        return render_template(template, content);
    }

    let SharePosterTokens {
        width,
        height,
        palette,
        typography: ty,
        layout,
        ..
    } = tokens;
    let photo = &layout.photo;
    let grid = &layout.metrics;
    let family = escape_xml(ty.family);
    let pad = fmt_num(layout.padding);
    let (px, py, ps, pr) = (
        fmt_num(photo.x),
        fmt_num(photo.y),
        fmt_num(photo.size),
        fmt_num(photo.radius),
    );

    let mut svg = String::with_capacity(8 * 1024);
    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}" role="presentation">"#
    ));

    svg.push_str("<defs>");
    svg.push_str(&format!(
        r#"<linearGradient id="poster-bg" x1="0" y1="0" x2="0.95" y2="1"><stop offset="0%" stop-color="{}"/><stop offset="40%" stop-color="{}"/><stop offset="100%" stop-color="{}"/></linearGradient>"#,
        palette.background_top, palette.background_mid, palette.background_bottom
    ));
    svg.push_str(&format!(
        r#"<linearGradient id="poster-accent" x1="0" y1="0" x2="1" y2="0"><stop offset="0%" stop-color="{}"/><stop offset="100%" stop-color="{}"/></linearGradient>"#,
        palette.accent_start, palette.accent_end
    ));
    svg.push_str(&format!(
        r#"<linearGradient id="metric-card" x1="0" y1="0" x2="1" y2="1"><stop offset="0%" stop-color="{}" stop-opacity="0.94"/><stop offset="100%" stop-color="{}" stop-opacity="0.88"/></linearGradient>"#,
        palette.card_top, palette.card_bottom
    ));
    svg.push_str(&format!(
        r#"<linearGradient id="avatar-fallback" x1="0" y1="0" x2="1" y2="1"><stop offset="0%" stop-color="{}"/><stop offset="100%" stop-color="{}"/></linearGradient>"#,
        palette.photo_fallback_start, palette.photo_fallback_end
    ));
    svg.push_str(&format!(
        r#"<clipPath id="athlete-avatar"><rect x="{px}" y="{py}" width="{ps}" height="{ps}" rx="{pr}"/></clipPath>"#
    ));
    svg.push_str("</defs>");

    svg.push_str(&format!(
        r#"<rect width="{width}" height="{height}" fill="url(#poster-bg)"/>"#
    ));
    svg.push_str(&format!(
        r#"<path d="{}" fill="url(#poster-accent)" opacity="0.65"/>"#,
        layout.accent_path
    ));

    match content.trend.as_ref().filter(|trend| !trend.is_empty()) {
        Some(trend) => svg.push_str(&format!(
            r#"<g transform="translate({} {})"><path d="{}" fill="url(#poster-accent)" opacity="0.18"/><path d="{}" fill="none" stroke="{}" stroke-width="8" stroke-linecap="round" stroke-linejoin="round"/></g>"#,
            fmt_num(layout.trend.x),
            fmt_num(layout.trend.y),
            trend.area_path,
            trend.line_path,
            palette.baseline_stroke
        )),
        None => svg.push_str(&format!(
            r#"<path d="{}" fill="none" stroke="{}" stroke-width="8" stroke-linecap="round"/>"#,
            layout.ribbon_path, palette.baseline_stroke
        )),
    }

    // Title block
    svg.push_str(&format!(
        r#"<text x="{pad}" y="180" fill="{}" font-family="{family}" font-size="{}" font-weight="600" letter-spacing="8">{}</text>"#,
        palette.headline,
        fmt_num(ty.month_size),
        escape_xml(&content.month_label.to_uppercase())
    ));
    svg.push_str(&format!(
        r#"<text x="{pad}" y="260" fill="{}" font-family="{family}" font-size="{}" font-weight="700">{}</text>"#,
        palette.primary_text,
        fmt_num(ty.hero_size),
        escape_xml(&content.athlete_name)
    ));
    svg.push_str(&format!(
        r#"<text x="{pad}" y="316" fill="{}" font-family="{family}" font-size="{}">{}</text>"#,
        palette.secondary_text,
        fmt_num(ty.subhead_size),
        escape_xml(tokens.subheading)
    ));

    // Avatar
    svg.push_str(r#"<g clip-path="url(#athlete-avatar)">"#);
    svg.push_str(&format!(
        r#"<rect x="{px}" y="{py}" width="{ps}" height="{ps}" fill="{}"/>"#,
        palette.card_bottom
    ));
    match content.poster_image.as_deref().filter(|src| is_image_data_uri(src)) {
        Some(src) => svg.push_str(&format!(
            r#"<image href="{}" x="{px}" y="{py}" width="{ps}" height="{ps}" preserveAspectRatio="xMidYMid slice"/>"#,
            escape_xml(src)
        )),
        None => {
            svg.push_str(&format!(
                r#"<rect x="{px}" y="{py}" width="{ps}" height="{ps}" fill="url(#avatar-fallback)"/>"#
            ));
            svg.push_str(&format!(
                r##"<text x="{}" y="{}" fill="#fff7ed" font-family="{family}" font-size="220" font-weight="700" text-anchor="middle" dominant-baseline="middle">{}</text>"##,
                fmt_num(photo.x + photo.size / 2.0),
                fmt_num(photo.y + photo.size / 2.0),
                escape_xml(&content.athlete_initial.to_string())
            ));
        }
    }
    svg.push_str("</g>");
    svg.push_str(&format!(
        r#"<rect x="{px}" y="{py}" width="{ps}" height="{ps}" rx="{pr}" fill="none" stroke="{}" stroke-width="6"/>"#,
        palette.photo_outline
    ));

    // Metric grid, two columns
    let card_w = fmt_num(grid.card_width);
    let card_h = fmt_num(grid.card_height);
    for (index, metric) in content.metrics.iter().take(4).enumerate() {
        let column = (index % 2) as f64;
        let row = (index / 2) as f64;
        let card_x = layout.padding + column * (grid.card_width + grid.h_gap);
        let card_y = grid.start_y + row * (grid.card_height + grid.v_gap);

        svg.push_str(&format!(
            r#"<g transform="translate({} {})">"#,
            fmt_num(card_x),
            fmt_num(card_y)
        ));
        svg.push_str(&format!(
            r#"<rect width="{card_w}" height="{card_h}" rx="28" fill="url(#metric-card)" stroke="{}" stroke-width="2"/>"#,
            palette.card_stroke
        ));
        svg.push_str(&format!(
            r#"<path d="M30 52 L{} 52" stroke="rgba(249, 115, 22, 0.45)" stroke-width="4" stroke-linecap="round"/>"#,
            fmt_num(grid.card_width - 30.0)
        ));
        svg.push_str(&format!(
            r#"<text x="30" y="92" fill="{}" font-family="{family}" font-size="{}" font-weight="600" letter-spacing="4">{}</text>"#,
            palette.label,
            fmt_num(ty.metric_label_size),
            escape_xml(&metric.label.to_uppercase())
        ));
        svg.push_str(&format!(
            r#"<text x="30" y="152" fill="{}" font-family="{family}" font-size="{}" font-weight="700">{}</text>"#,
            palette.primary_text,
            fmt_num(ty.metric_value_size),
            escape_xml(&metric.value)
        ));
        svg.push_str(&format!(
            r#"<text x="30" y="188" fill="{}" font-family="{family}" font-size="{}">{}</text>"#,
            palette.secondary_text,
            fmt_num(ty.metric_caption_size),
            escape_xml(&metric.caption)
        ));
        svg.push_str("</g>");
    }

    // Headline, summary, footer
    svg.push_str(&format!(
        r#"<text x="{pad}" y="1700" fill="{}" font-family="{family}" font-size="{}" font-weight="600">{}</text>"#,
        palette.primary_text,
        fmt_num(ty.headline_size),
        escape_xml(&content.distance_headline)
    ));
    svg.push_str(&format!(
        r#"<text x="{pad}" y="1760" fill="{}" font-family="{family}" font-size="{}">{}</text>"#,
        palette.secondary_text,
        fmt_num(ty.summary_size),
        escape_xml(&content.summary_line)
    ));
    svg.push_str(&format!(
        r#"<text x="{}" y="{}" fill="{}" font-family="{family}" font-size="{}" text-anchor="end">{} • {}</text>"#,
        fmt_num(*width as f64 - layout.padding),
        height.saturating_sub(120),
        palette.tertiary_text,
        fmt_num(ty.footer_size),
        escape_xml(tokens.brand),
        content.poster_year
    ));

    svg.push_str("</svg>");
    svg
}

/// Fill `{{name}}` slots in `template`. Unknown slots are left untouched.
pub fn render_template(template: &str, content: &PosterContent) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            out.push_str(&rest[start..]);
            return out;
        };
        let key = after[..end].trim();
        match template_value(key, content) {
            Some(value) => out.push_str(&escape_xml(&value)),
            None => out.push_str(&rest[start..start + 2 + end + 2]),
        }
        rest = &after[end + 2..];
    }
    out.push_str(rest);
    out
}

fn template_value(key: &str, content: &PosterContent) -> Option<String> {
    let value = match key {
        "month_label" => content.month_label.clone(),
        "athlete_name" => content.athlete_name.clone(),
        "athlete_initial" => content.athlete_initial.to_string(),
        "distance_headline" => content.distance_headline.clone(),
        "summary_line" => content.summary_line.clone(),
        "poster_year" => content.poster_year.to_string(),
        "poster_image" => content.poster_image.clone().unwrap_or_default(),
        other => {
            let rest = other.strip_prefix("metric_")?;
            let (number, field) = rest.split_once('_')?;
            let index = number.parse::<usize>().ok()?.checked_sub(1)?;
            // Slots beyond the metrics provided render empty.
            let metric = content.metrics.get(index);
            match field {
                "label" => metric.map(|m| m.label.clone()).unwrap_or_default(),
                "value" => metric.map(|m| m.value.clone()).unwrap_or_default(),
                "caption" => metric.map(|m| m.caption.clone()).unwrap_or_default(),
                _ => return None,
            }
        }
    };
    Some(value)
}

fn is_image_data_uri(src: &str) -> bool {
    src.starts_with("data:image/")
}

pub fn escape_xml(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            c => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roundup::calendar::build_empty_roundup_at;
    use time::macros::datetime;

    fn content() -> PosterContent {
        PosterContent {
            month_label: "September 2025".into(),
            athlete_name: "Ana López".into(),
            athlete_initial: 'A',
            metrics: (1..=5)
                .map(|n| PosterMetric::new(format!("Metric {n}"), format!("{n}"), "caption"))
                .collect(),
            distance_headline: "42 km logged".into(),
            summary_line: "3 activities".into(),
            poster_year: 2025,
            poster_image: None,
            trend: None,
            template_svg: None,
        }
    }

    #[test]
    fn renders_canonical_story_size() {
        let svg = render_share_poster(&content(), &SHARE_POSTER_TOKENS);
        assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"1080\" height=\"1920\" viewBox=\"0 0 1080 1920\""));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains("SEPTEMBER 2025"));
        assert!(svg.contains("Monthly Roundup Snapshot"));
        assert!(svg.contains("Strava Roundup • 2025"));
    }

    #[test]
    fn draws_at_most_four_metric_cards_in_two_columns() {
        let svg = render_share_poster(&content(), &SHARE_POSTER_TOKENS);
        assert_eq!(svg.matches("url(#metric-card)").count(), 4);
        assert!(svg.contains("translate(120 1150)"));
        assert!(svg.contains("translate(780 1150)"));
        assert!(svg.contains("translate(120 1400)"));
        assert!(svg.contains("translate(780 1400)"));
        assert!(!svg.contains("METRIC 5"));
    }

    #[test]
    fn falls_back_to_initial_without_image() {
        let svg = render_share_poster(&content(), &SHARE_POSTER_TOKENS);
        assert!(svg.contains("fill=\"url(#avatar-fallback)\""));
        assert!(svg.contains(">A</text>"));
        assert!(!svg.contains("<image"));

        let mut with_remote = content();
        with_remote.poster_image = Some("https://cdn.example/ana.jpg".into());
        let svg = render_share_poster(&with_remote, &SHARE_POSTER_TOKENS);
        assert!(!svg.contains("<image"));
    }

    #[test]
    fn clips_data_uri_avatar() {
        let mut with_image = content();
        with_image.poster_image = Some("data:image/png;base64,iVBORw0KGgo=".into());
        let svg = render_share_poster(&with_image, &SHARE_POSTER_TOKENS);
        assert!(svg.contains(r#"<image href="data:image/png;base64,iVBORw0KGgo=""#));
        assert!(svg.contains(r#"preserveAspectRatio="xMidYMid slice""#));
        assert!(!svg.contains("fill=\"url(#avatar-fallback)\""));
    }

    #[test]
    fn escapes_dynamic_text() {
        let mut tricky = content();
        tricky.athlete_name = "Tom & <Jerry> \"Quick\"".into();
        let svg = render_share_poster(&tricky, &SHARE_POSTER_TOKENS);
        assert!(svg.contains("Tom &amp; &lt;Jerry&gt; &quot;Quick&quot;"));
        assert!(!svg.contains("<Jerry>"));
    }

    #[test]
    fn rendering_is_deterministic() {
        let a = render_share_poster(&content(), &SHARE_POSTER_TOKENS);
        let b = render_share_poster(&content(), &SHARE_POSTER_TOKENS);
        assert_eq!(a, b);
    }

    #[test]
    fn trend_replaces_the_ribbon() {
        let plain = render_share_poster(&content(), &SHARE_POSTER_TOKENS);
        assert!(plain.contains(SHARE_POSTER_TOKENS.layout.ribbon_path));

        let mut with_trend = content();
        with_trend.trend = Some(crate::roundup::build_chart_geometry(
            &[1.0, 4.0, 2.0],
            SHARE_POSTER_TOKENS.trend_viewport(),
        ));
        let svg = render_share_poster(&with_trend, &SHARE_POSTER_TOKENS);
        assert!(!svg.contains(SHARE_POSTER_TOKENS.layout.ribbon_path));
        assert!(svg.contains("translate(120 1050)"));
    }

    #[test]
    fn trend_stays_between_photo_and_cards() {
        let tokens = &SHARE_POSTER_TOKENS;
        let photo = &tokens.layout.photo;
        let trend_box = &tokens.layout.trend;
        let mut values = vec![0.0; 30];
        values[14] = 42.0;
        values[29] = 7.5;
        let trend = crate::roundup::build_chart_geometry(&values, tokens.trend_viewport());
        assert_eq!(trend.coordinates.len(), 30);

        for point in &trend.coordinates {
            let x = trend_box.x + point.x;
            let y = trend_box.y + point.y;
            let inside_photo = (photo.x..=photo.x + photo.size).contains(&x)
                && (photo.y..=photo.y + photo.size).contains(&y);
            assert!(!inside_photo, "point ({x}, {y}) overlaps the photo");
            assert!(y < tokens.layout.metrics.start_y, "point ({x}, {y}) reaches the cards");
        }
    }

    #[test]
    fn template_slots_are_filled_and_escaped() {
        let mut templated = content();
        templated.athlete_name = "A&B".into();
        templated.template_svg = Some(
            "<svg><text>{{athlete_name}}</text><text>{{ metric_2_value }}</text><text>{{metric_9_label}}</text><text>{{unknown}}</text></svg>".into(),
        );
        let svg = render_share_poster(&templated, &SHARE_POSTER_TOKENS);
        assert_eq!(
            svg,
            "<svg><text>A&amp;B</text><text>2</text><text></text><text>{{unknown}}</text></svg>"
        );
    }

    #[test]
    fn content_from_an_empty_month() {
        let roundup = build_empty_roundup_at(Some("2025-09"), datetime!(2025-10-01 00:00 UTC));
        let content = PosterContent::from_roundup(&roundup, "", None, &SHARE_POSTER_TOKENS);
        assert_eq!(content.metrics.len(), 4);
        let values: Vec<&str> = content.metrics.iter().map(|m| m.value.as_str()).collect();
        assert_eq!(values, ["0", "0 km", "0h 0m", "0 m"]);
        assert_eq!(content.athlete_initial, 'A');
        assert_eq!(content.poster_year, 2025);
        assert!(content.trend.is_none());
    }

    #[test]
    fn content_builds_a_trend_from_daily_distance() {
        let mut roundup = build_empty_roundup_at(Some("2025-09"), datetime!(2025-10-01 00:00 UTC));
        roundup.calendar_days[4].total_distance_km = 10.0;
        roundup.total_distance_km = 10.0;
        let content = PosterContent::from_roundup(&roundup, "zoë", None, &SHARE_POSTER_TOKENS);
        let trend = content.trend.expect("trend");
        assert_eq!(trend.coordinates.len(), 30);
        assert_eq!(content.athlete_initial, 'Z');
    }
}

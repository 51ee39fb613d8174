//! SVG path geometry for a numeric series drawn in a fixed viewport.

use api::CalendarDay;

/// Pixel box the series is drawn into. `padding` is applied on every side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartViewport {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
}

impl Default for ChartViewport {
    fn default() -> Self {
        Self {
            width: 640.0,
            height: 220.0,
            padding: 24.0,
        }
    }
}

impl ChartViewport {
    pub fn baseline(&self) -> f64 {
        self.height - self.padding
    }

    fn inner_width(&self) -> f64 {
        (self.width - 2.0 * self.padding).max(0.0)
    }

    fn inner_height(&self) -> f64 {
        (self.height - 2.0 * self.padding).max(0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartPoint {
    pub x: f64,
    pub y: f64,
    pub value: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartGeometry {
    pub area_path: String,
    pub line_path: String,
    pub coordinates: Vec<ChartPoint>,
}

impl ChartGeometry {
    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }
}

/// Values with one label each.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartSeries {
    pub values: Vec<f64>,
    pub labels: Vec<String>,
}

impl ChartSeries {
    /// Distance per calendar day, labelled by day of month.
    pub fn daily_distance(days: &[CalendarDay]) -> Self {
        Self {
            values: days.iter().map(|d| d.total_distance_km).collect(),
            labels: days.iter().map(|d| d.day.to_string()).collect(),
        }
    }

    pub fn geometry(&self, viewport: ChartViewport) -> ChartGeometry {
        build_chart_geometry(&self.values, viewport)
    }
}

/// Smoothed line and filled area for `values`.
///
/// x is spread evenly across the inner width; y is normalised against the
/// series' own min/max and inverted so larger values plot higher. A flat
/// series uses a range of 1. Non-finite values count as 0.
pub fn build_chart_geometry(values: &[f64], viewport: ChartViewport) -> ChartGeometry {
    if values.is_empty() {
        return ChartGeometry::default();
    }

    let values: Vec<f64> = values
        .iter()
        .map(|v| if v.is_finite() { *v } else { 0.0 })
        .collect();

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = if max - min > 0.0 { max - min } else { 1.0 };

    let baseline = viewport.baseline();
    let inner_height = viewport.inner_height();
    let project_y = |value: f64| baseline - ((value - min) / range) * inner_height;

    if let [value] = values.as_slice() {
        let x = viewport.padding + viewport.inner_width() / 2.0;
        let y = project_y(*value);
        let (x_s, y_s, base_s) = (fmt_num(x), fmt_num(y), fmt_num(baseline));
        return ChartGeometry {
            area_path: format!("M{x_s} {base_s} L{x_s} {y_s} L{x_s} {base_s} Z"),
            line_path: format!("M{x_s} {y_s}"),
            coordinates: vec![ChartPoint {
                x,
                y,
                value: *value,
            }],
        };
    }

    let step = viewport.inner_width() / (values.len() - 1) as f64;
    let coordinates: Vec<ChartPoint> = values
        .iter()
        .enumerate()
        .map(|(index, value)| ChartPoint {
            x: viewport.padding + step * index as f64,
            y: project_y(*value),
            value: *value,
        })
        .collect();

    let line_path = build_smooth_path(&coordinates);
    let (first_x, last_x) = match (coordinates.first(), coordinates.last()) {
        (Some(first), Some(last)) => (first.x, last.x),
        _ => return ChartGeometry::default(),
    };
    let area_path = format!(
        "{line_path} L{} {} L{} {} Z",
        fmt_num(last_x),
        fmt_num(baseline),
        fmt_num(first_x),
        fmt_num(baseline)
    );

    ChartGeometry {
        area_path,
        line_path,
        coordinates,
    }
}

/// Catmull-Rom spline through every point, emitted as cubic Béziers.
///
/// Control points for the segment `p1 -> p2` are `p1 + (p2 - p0) / 6` and
/// `p2 - (p3 - p1) / 6`, where a missing neighbour is replaced by the
/// segment's own endpoint.
pub fn build_smooth_path(points: &[ChartPoint]) -> String {
    let Some(first) = points.first() else {
        return String::new();
    };

    let mut path = format!("M{} {}", fmt_num(first.x), fmt_num(first.y));
    for index in 0..points.len().saturating_sub(1) {
        let p0 = if index == 0 { points[index] } else { points[index - 1] };
        let p1 = points[index];
        let p2 = points[index + 1];
        let p3 = points.get(index + 2).copied().unwrap_or(p2);

        let cp1 = (p1.x + (p2.x - p0.x) / 6.0, p1.y + (p2.y - p0.y) / 6.0);
        let cp2 = (p2.x - (p3.x - p1.x) / 6.0, p2.y - (p3.y - p1.y) / 6.0);

        path.push_str(&format!(
            " C{} {}, {} {}, {} {}",
            fmt_num(cp1.0),
            fmt_num(cp1.1),
            fmt_num(cp2.0),
            fmt_num(cp2.1),
            fmt_num(p2.x),
            fmt_num(p2.y)
        ));
    }
    path
}

/// Two decimals at most, no trailing zeros, never `-0`.
pub(crate) fn fmt_num(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded == 0.0 {
        return "0".to_string();
    }
    let text = format!("{rounded:.2}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    text.to_string()
}

//! Monthly roundup model, chart geometry, share poster and its export path.
//!
//! Everything here except `export::web`/`export::native` and the sync hook is
//! plain data in, plain data out, so it is tested without a renderer.

pub mod avatar;
pub mod calendar;
pub mod chart;
pub mod export;
pub mod poster;
pub mod sync;

pub use calendar::{build_calendar_cells, build_empty_roundup, CalendarCell};
pub use chart::{build_chart_geometry, build_smooth_path, ChartGeometry, ChartPoint, ChartSeries, ChartViewport};
pub use poster::{render_share_poster, PosterContent, PosterMetric, SharePosterTokens};

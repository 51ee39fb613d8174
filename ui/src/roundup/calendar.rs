//! Empty-month fallback and the Monday-first calendar grid.

use api::{CalendarDay, MonthKey, MonthlyInsights, MonthlyRoundup};
use time::{Date, OffsetDateTime};

use crate::i18n;

/// Roundup for `month` with every aggregate zeroed and one inactive calendar
/// entry per day. Malformed or missing keys resolve to the current UTC month.
pub fn build_empty_roundup(month: Option<&str>) -> MonthlyRoundup {
    build_empty_roundup_at(month, OffsetDateTime::now_utc())
}

/// Same as [`build_empty_roundup`] with an explicit clock reading.
pub fn build_empty_roundup_at(month: Option<&str>, now: OffsetDateTime) -> MonthlyRoundup {
    let key = MonthKey::parse_or(month, now);
    MonthlyRoundup {
        athlete_id: None,
        month: key,
        month_name: i18n::month_name(key.month()),
        month_label: i18n::month_label(key.month(), key.year()),
        period_start: key.period_start(),
        period_end: key.period_end(),
        total_active_days: 0,
        total_activities: 0,
        total_distance_km: 0.0,
        total_moving_time_seconds: 0.0,
        total_elevation_gain_m: 0.0,
        activity_split: Vec::new(),
        calendar_days: key.dates().map(CalendarDay::inactive).collect(),
        insights: MonthlyInsights::default(),
    }
}

/// One slot of the 7-column grid. Padding slots have no day and are never active.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarCell {
    pub day: Option<u8>,
    pub date: Option<Date>,
    pub is_active: bool,
    pub total_activities: u32,
    pub total_distance_km: f64,
    pub total_moving_time_seconds: f64,
}

impl CalendarCell {
    pub fn blank() -> Self {
        Self {
            day: None,
            date: None,
            is_active: false,
            total_activities: 0,
            total_distance_km: 0.0,
            total_moving_time_seconds: 0.0,
        }
    }

    pub fn is_blank(&self) -> bool {
        self.day.is_none()
    }
}

impl From<&CalendarDay> for CalendarCell {
    fn from(day: &CalendarDay) -> Self {
        Self {
            day: Some(day.day),
            date: Some(day.date),
            is_active: day.is_active,
            total_activities: day.total_activities,
            total_distance_km: day.total_distance_km,
            total_moving_time_seconds: day.total_moving_time_seconds,
        }
    }
}

/// Lay `days` out Monday-first, padded on both sides to whole weeks.
pub fn build_calendar_cells(days: &[CalendarDay]) -> Vec<CalendarCell> {
    let Some(first) = days.first() else {
        return Vec::new();
    };

    // Sunday-first index converted to Monday-first.
    let sunday_first = first.date.weekday().number_days_from_sunday() as usize;
    let leading = (sunday_first + 6) % 7;

    let mut cells = Vec::with_capacity(leading + days.len() + 6);
    cells.extend(std::iter::repeat_with(CalendarCell::blank).take(leading));
    cells.extend(days.iter().map(CalendarCell::from));
    while cells.len() % 7 != 0 {
        cells.push(CalendarCell::blank());
    }
    cells
}

//! Payloads exchanged with the roundup backend. JSON is snake_case throughout.

use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::month::MonthKey;

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

/// Result of `POST /athletes/{id}/sync`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncSummary {
    pub fetched: u32,
    #[serde(default)]
    pub created: u32,
    #[serde(default)]
    pub updated: u32,
    #[serde(default)]
    pub latest_activity: Option<String>,
    /// Kept verbatim; the dashboard only uses it to notice that a new sync landed.
    pub synced_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivitySplitEntry {
    #[serde(rename = "type")]
    pub kind: String,
    pub count: u32,
    /// Display value as computed by the server. Never renormalised.
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarDay {
    pub day: u8,
    #[serde(with = "iso_date")]
    pub date: Date,
    pub is_active: bool,
    pub total_activities: u32,
    pub total_distance_km: f64,
    pub total_moving_time_seconds: f64,
}

impl CalendarDay {
    pub fn inactive(date: Date) -> Self {
        Self {
            day: date.day(),
            date,
            is_active: false,
            total_activities: 0,
            total_distance_km: 0.0,
            total_moving_time_seconds: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MostActiveDay {
    #[serde(with = "iso_date")]
    pub date: Date,
    pub total_activities: u32,
    pub total_distance_km: f64,
    pub total_moving_time_seconds: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MostActiveTimeOfDay {
    pub hour: u8,
    #[serde(default)]
    pub total_activities: u32,
    #[serde(default)]
    pub total_moving_time_seconds: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonthlyInsights {
    pub most_active_day: Option<MostActiveDay>,
    pub most_active_time_of_day: Option<MostActiveTimeOfDay>,
    pub average_activity_time_seconds: Option<f64>,
    #[serde(default)]
    pub weekly_streak_weeks: u32,
}

/// Result of `GET /athletes/{id}/roundup?month=YYYY-MM`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyRoundup {
    pub athlete_id: Option<i64>,
    pub month: MonthKey,
    #[serde(default)]
    pub month_name: String,
    #[serde(default)]
    pub month_label: String,
    #[serde(with = "time::serde::rfc3339")]
    pub period_start: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub period_end: OffsetDateTime,
    pub total_active_days: u32,
    pub total_activities: u32,
    pub total_distance_km: f64,
    pub total_moving_time_seconds: f64,
    pub total_elevation_gain_m: f64,
    #[serde(default)]
    pub activity_split: Vec<ActivitySplitEntry>,
    #[serde(default)]
    pub calendar_days: Vec<CalendarDay>,
    #[serde(default)]
    pub insights: MonthlyInsights,
}

/// Body of `GET /proxy/image?url=...`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProxyImageResponse {
    #[serde(rename = "dataUrl")]
    pub data_url: String,
}

/// Athlete as returned by the OAuth code exchange.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExchangedAthlete {
    #[serde(default)]
    pub firstname: Option<String>,
    #[serde(default)]
    pub lastname: Option<String>,
    #[serde(default)]
    pub profile: Option<String>,
}

impl ExchangedAthlete {
    pub fn display_name(&self) -> Option<String> {
        let name = [self.firstname.as_deref(), self.lastname.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        (!name.is_empty()).then_some(name)
    }
}

/// Body of `GET /auth/strava/callback?code=...`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthExchange {
    #[serde(default)]
    pub athlete: Option<ExchangedAthlete>,
    #[serde(default)]
    pub db_id: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, datetime};

    const ROUNDUP_JSON: &str = r#"{
        "athlete_id": 7,
        "month": "2025-09",
        "month_name": "September",
        "month_label": "September 2025",
        "period_start": "2025-09-01T00:00:00Z",
        "period_end": "2025-10-01T00:00:00+00:00",
        "total_active_days": 2,
        "total_activities": 3,
        "total_distance_km": 21.5,
        "total_moving_time_seconds": 7260,
        "total_elevation_gain_m": 140.2,
        "activity_split": [
            {"type": "Run", "count": 2, "percentage": 66.7},
            {"type": "Ride", "count": 1, "percentage": 33.3}
        ],
        "calendar_days": [
            {"day": 1, "date": "2025-09-01", "is_active": true, "total_activities": 2,
             "total_distance_km": 15.0, "total_moving_time_seconds": 5000},
            {"day": 2, "date": "2025-09-02", "is_active": false, "total_activities": 0,
             "total_distance_km": 0.0, "total_moving_time_seconds": 0}
        ],
        "insights": {
            "most_active_day": {"date": "2025-09-01", "total_activities": 2,
                                "total_distance_km": 15.0, "total_moving_time_seconds": 5000},
            "most_active_time_of_day": {"hour": 6, "total_activities": 2, "total_moving_time_seconds": 5000},
            "average_activity_time_seconds": 2420,
            "weekly_streak_weeks": 1
        }
    }"#;

    #[test]
    fn decodes_server_roundup() {
        let roundup: MonthlyRoundup = serde_json::from_str(ROUNDUP_JSON).unwrap();
        assert_eq!(roundup.athlete_id, Some(7));
        assert_eq!(roundup.month.to_string(), "2025-09");
        assert_eq!(roundup.period_start, datetime!(2025-09-01 00:00 UTC));
        assert_eq!(roundup.period_end, datetime!(2025-10-01 00:00 UTC));
        assert_eq!(roundup.total_moving_time_seconds, 7260.0);
        assert_eq!(roundup.activity_split[0].kind, "Run");
        assert_eq!(roundup.calendar_days[1].date, date!(2025 - 09 - 02));
        assert_eq!(
            roundup.insights.most_active_time_of_day.as_ref().map(|t| t.hour),
            Some(6)
        );
        assert_eq!(roundup.insights.weekly_streak_weeks, 1);
    }

    #[test]
    fn decodes_sync_summary_with_optional_fields() {
        let summary: SyncSummary = serde_json::from_str(
            r#"{"fetched": 4, "created": 3, "updated": 1,
                "latest_activity": null, "synced_at": "2025-10-18T09:12:44.120931Z"}"#,
        )
        .unwrap();
        assert_eq!(summary.fetched, 4);
        assert_eq!(summary.latest_activity, None);

        let minimal: SyncSummary =
            serde_json::from_str(r#"{"fetched": 0, "synced_at": "2025-10-18T09:12:44Z"}"#).unwrap();
        assert_eq!(minimal.created, 0);
    }

    #[test]
    fn calendar_day_round_trips_iso_dates() {
        let day = CalendarDay::inactive(date!(2024 - 02 - 29));
        let json = serde_json::to_value(&day).unwrap();
        assert_eq!(json["date"], "2024-02-29");
        assert_eq!(json["day"], 29);
    }

    #[test]
    fn exchange_payload_tolerates_missing_fields() {
        let full: AuthExchange = serde_json::from_str(
            r#"{"athlete": {"firstname": "Ana", "lastname": "López", "profile": null}, "db_id": 12}"#,
        )
        .unwrap();
        assert_eq!(full.db_id, Some(12));
        assert_eq!(
            full.athlete.and_then(|a| a.display_name()).as_deref(),
            Some("Ana López")
        );

        let empty: AuthExchange = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, AuthExchange::default());
        assert_eq!(ExchangedAthlete::default().display_name(), None);
    }

    #[test]
    fn proxy_payload_uses_camel_case_key() {
        let payload: ProxyImageResponse =
            serde_json::from_str(r#"{"dataUrl": "data:image/png;base64,AAAA"}"#).unwrap();
        assert!(payload.data_url.starts_with("data:image/png"));
    }
}

use api::MonthlyRoundup;
use dioxus::prelude::*;

use crate::components::app_navbar::{nav_link, NavTarget};
use crate::components::{
    ActivitySplitList, CalendarGrid, DailyDistanceChart, InsightsPanel, MonthlySummary, SharePanel,
};
use crate::core::format::first_name;
use crate::core::storage::AthleteIdentity;
use crate::roundup::build_empty_roundup;
use crate::roundup::sync::use_activity_sync;
use crate::t;
use crate::views::{use_lang_marker, use_roundup_client, use_store};

/// Roundup to render plus the fetch error, if any. Anything short of a loaded
/// roundup renders the empty month.
fn roundup_or_empty(fetched: Option<&Result<MonthlyRoundup, String>>) -> (MonthlyRoundup, Option<String>) {
    match fetched {
        Some(Ok(roundup)) => (roundup.clone(), None),
        Some(Err(err)) => (build_empty_roundup(None), Some(err.clone())),
        None => (build_empty_roundup(None), None),
    }
}

#[component]
pub fn Dashboard() -> Element {
    let _lang_marker = use_lang_marker();
    let store = use_store();
    let client = use_roundup_client();
    let mut identity = use_signal({
        let store = store.clone();
        move || AthleteIdentity::load(&*store.0)
    });
    let athlete_id = identity.read().athlete_id.clone();

    let sync = use_activity_sync(client.clone(), athlete_id.clone(), true);
    let last_synced_at = sync.last_synced_at;

    // Loads on mount and again after every successful sync.
    let roundup_fetch = use_resource(move || {
        let client = client.clone();
        let athlete_id = identity.read().athlete_id.clone();
        let _synced_at = last_synced_at();
        async move {
            let athlete_id = athlete_id?;
            let fetched = client.fetch_monthly_roundup(&athlete_id, None).await;
            Some(fetched.map_err(|err| {
                tracing::warn!(%err, "roundup fetch failed");
                err.to_string()
            }))
        }
    });

    let (roundup, fetch_error) = {
        let fetched = roundup_fetch.read();
        let loaded = match &*fetched {
            Some(Some(result)) => Some(result),
            _ => None,
        };
        roundup_or_empty(loaded)
    };

    let Some(athlete_id) = athlete_id else {
        return rsx! {
            div { style: "display:none", "{_lang_marker}" }
            section { class: "page dashboard dashboard--disconnected",
                div { class: "roundup-card",
                    h1 { {t!("dashboard-connect-title")} }
                    p { class: "roundup-card__muted", {t!("dashboard-connect-body")} }
                    {nav_link(NavTarget::Home, &t!("dashboard-connect-link"))}
                }
            }
        };
    };

    let current = identity.read().clone();
    let athlete_name = current.display_name();
    let greeting_name = first_name(&athlete_name).to_string();
    let sync_state = sync.state.read().clone();
    let sync_busy = sync_state.is_loading();

    let sync_label = if sync_busy {
        t!("dashboard-sync-busy")
    } else {
        t!("dashboard-sync-button")
    };
    let sync_summary = sync_state.summary.as_ref().map(|summary| {
        t!(
            "dashboard-sync-summary",
            fetched = summary.fetched.to_string(),
            created = summary.created.to_string(),
            updated = summary.updated.to_string()
        )
    });

    // Shared by the sync button and the error retry.
    let on_sync = {
        let sync = sync.clone();
        let athlete_id = athlete_id.clone();
        move |_: MouseEvent| sync.trigger(Some(athlete_id.clone()))
    };
    let on_disconnect = {
        let sync = sync.clone();
        move |_| {
            if let Err(err) = AthleteIdentity::clear(&*store.0) {
                tracing::warn!(%err, "could not clear athlete identity");
            }
            sync.reset();
            identity.set(AthleteIdentity::default());
        }
    };

    rsx! {
        div { style: "display:none", "{_lang_marker}" }
        section { class: "page dashboard",
            header { class: "dashboard__header",
                div { class: "dashboard__identity",
                    if let Some(image) = current.image_url.clone() {
                        img {
                            class: "dashboard__avatar",
                            src: "{image}",
                            alt: t!("dashboard-avatar-alt"),
                        }
                    }
                    div {
                        h1 { class: "dashboard__greeting",
                            {t!("dashboard-greeting", name = greeting_name.clone())}
                        }
                        p { class: "dashboard__subtitle",
                            {t!("dashboard-subtitle", month = roundup.month_label.clone())}
                        }
                    }
                }
                span { class: "badge badge--connected", {t!("dashboard-connected")} }
            }

            div { class: "dashboard__sync", aria_live: "polite",
                button {
                    class: "button button--primary",
                    disabled: sync_busy,
                    onclick: on_sync.clone(),
                    "{sync_label}"
                }
                if let Some(summary) = sync_summary {
                    span { class: "dashboard__sync-summary", "{summary}" }
                }
                if let Some(error) = sync_state.error.clone() {
                    div { class: "dashboard__sync-error",
                        strong { {t!("dashboard-sync-error-title")} }
                        span { "{error}" }
                        button {
                            class: "button button--ghost",
                            disabled: sync_busy,
                            onclick: on_sync.clone(),
                            {t!("dashboard-sync-retry")}
                        }
                    }
                }
                button {
                    class: "button button--ghost dashboard__disconnect",
                    onclick: on_disconnect,
                    {t!("dashboard-disconnect")}
                }
            }

            if let Some(error) = fetch_error {
                p { class: "dashboard__fetch-error", role: "alert",
                    {t!("dashboard-fetch-error", reason = error)}
                }
            }

            div { class: "dashboard__grid",
                div { class: "dashboard__main",
                    MonthlySummary { roundup: roundup.clone() }
                    CalendarGrid { days: roundup.calendar_days.clone() }
                    DailyDistanceChart { days: roundup.calendar_days.clone() }
                }
                div { class: "dashboard__side",
                    ActivitySplitList { split: roundup.activity_split.clone() }
                    InsightsPanel { insights: roundup.insights.clone() }
                }
            }

            SharePanel {
                roundup: roundup.clone(),
                athlete_name: athlete_name.clone(),
                image_url: current.image_url.clone(),
            }
        }
    }
}

//! Landing point of the Strava OAuth redirect.
//!
//! The backend normally finishes the exchange itself and redirects here with
//! `status`, `name`, `db_id`, `strava_id` and `image`. Older deployments pass
//! the raw `code` instead, which is exchanged from here.

use api::AuthExchange;
use dioxus::prelude::*;

use crate::components::app_navbar::{nav_link, NavTarget};
use crate::core::storage::AthleteIdentity;
use crate::t;
use crate::views::{use_lang_marker, use_roundup_client, use_store};

/// Query parameters of the callback URL, decoded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallbackParams {
    pub status: Option<String>,
    pub name: Option<String>,
    pub db_id: Option<String>,
    pub strava_id: Option<String>,
    pub image: Option<String>,
    pub code: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CallbackOutcome {
    Connected(AthleteIdentity),
    Exchange(String),
    Failed(String),
}

/// `+` means space, then percent-decoding; malformed escapes keep the raw text.
fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|decoded| decoded.into_owned())
        .unwrap_or(spaced)
}

pub fn parse_callback(query: &str) -> CallbackParams {
    let mut params = CallbackParams::default();
    for pair in query.trim_start_matches('?').split('&') {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        let value = decode_component(value).trim().to_string();
        if value.is_empty() {
            continue;
        }
        let slot = match key {
            "status" => &mut params.status,
            "name" => &mut params.name,
            "db_id" => &mut params.db_id,
            "strava_id" => &mut params.strava_id,
            "image" => &mut params.image,
            "code" => &mut params.code,
            _ => continue,
        };
        *slot = Some(value);
    }
    params
}

pub fn resolve_callback(params: &CallbackParams) -> CallbackOutcome {
    match params.status.as_deref() {
        Some(status) if status.eq_ignore_ascii_case("success") => {
            CallbackOutcome::Connected(AthleteIdentity {
                name: params.name.clone(),
                image_url: params.image.clone(),
                athlete_id: params.db_id.clone(),
                strava_id: params.strava_id.clone(),
            })
        }
        Some(_) => CallbackOutcome::Failed(t!("callback-error-retry")),
        None => match &params.code {
            Some(code) => CallbackOutcome::Exchange(code.clone()),
            None => CallbackOutcome::Failed(t!("callback-error-no-code")),
        },
    }
}

fn identity_from_exchange(exchange: AuthExchange) -> AthleteIdentity {
    let athlete = exchange.athlete.unwrap_or_default();
    AthleteIdentity {
        name: athlete.display_name(),
        image_url: athlete.profile.filter(|url| !url.trim().is_empty()),
        athlete_id: exchange.db_id.map(|id| id.to_string()),
        strava_id: None,
    }
}

#[derive(Debug, Clone, PartialEq)]
enum CallbackState {
    Loading,
    Connected(AthleteIdentity),
    Failed(String),
}

#[component]
pub fn AuthCallback(query: String) -> Element {
    let _lang_marker = use_lang_marker();
    let store = use_store();
    let client = use_roundup_client();
    let mut state = use_signal(|| CallbackState::Loading);

    use_effect(use_reactive((&query,), move |(query,)| {
        let connect = {
            let store = store.clone();
            move |identity: AthleteIdentity| {
                let mut state = state;
                // Written once, right after sign-in.
                if let Err(err) = identity.save(&*store.0) {
                    tracing::warn!(%err, "could not persist athlete identity");
                }
                tracing::info!(athlete_id = ?identity.athlete_id, "athlete connected");
                state.set(CallbackState::Connected(identity));
            }
        };

        match resolve_callback(&parse_callback(&query)) {
            CallbackOutcome::Connected(identity) => connect(identity),
            CallbackOutcome::Failed(message) => state.set(CallbackState::Failed(message)),
            CallbackOutcome::Exchange(code) => {
                state.set(CallbackState::Loading);
                let client = client.clone();
                spawn(async move {
                    match client.exchange_code(&code).await {
                        Ok(exchange) => connect(identity_from_exchange(exchange)),
                        Err(err) => state.set(CallbackState::Failed(err.to_string())),
                    }
                });
            }
        }
    }));

    let (badge, title, subtitle) = match &state() {
        CallbackState::Loading => ("…", t!("callback-loading-title"), t!("callback-loading-subtitle")),
        CallbackState::Connected(identity) => (
            "✓",
            t!("callback-success-title", name = identity.display_name()),
            t!("callback-success-subtitle"),
        ),
        CallbackState::Failed(_) => ("!", t!("callback-error-title"), t!("callback-error-subtitle")),
    };

    rsx! {
        div { style: "display:none", "{_lang_marker}" }
        section { class: "page callback", aria_live: "polite",
            div { class: "callback__header",
                span { class: "callback__badge", aria_hidden: "true", "{badge}" }
                div {
                    h1 { class: "callback__title", "{title}" }
                    p { class: "callback__muted", "{subtitle}" }
                }
            }

            {match state() {
                CallbackState::Loading => rsx! {
                    div { class: "callback__loading",
                        span { class: "callback__loader", aria_hidden: "true" }
                        span { {t!("callback-loading-hint")} }
                    }
                },
                CallbackState::Failed(message) => rsx! {
                    div { class: "callback__status callback__status--error",
                        strong { {t!("callback-error-heading")} }
                        span { "{message}" }
                        {nav_link(NavTarget::Home, &t!("callback-error-link"))}
                    }
                },
                CallbackState::Connected(identity) => {
                    let record = identity
                        .athlete_id
                        .as_ref()
                        .map(|id| format!("#{id}"))
                        .unwrap_or_else(|| t!("callback-record-pending"));
                    rsx! {
                        div { class: "callback__status callback__status--success",
                            strong { {t!("callback-success-heading")} }
                        }
                        div { class: "callback__grid",
                            div { class: "callback__metric",
                                span { class: "callback__metric-label", {t!("callback-athlete-label")} }
                                span { class: "callback__metric-value", {identity.display_name()} }
                            }
                            div { class: "callback__metric",
                                span { class: "callback__metric-label", {t!("callback-record-label")} }
                                span { class: "callback__metric-value", "{record}" }
                            }
                        }
                        div { class: "callback__actions",
                            {nav_link(NavTarget::Dashboard, &t!("callback-dashboard-link"))}
                            {nav_link(NavTarget::Home, &t!("callback-home-link"))}
                        }
                    }
                }
            }}
        }
    }
}

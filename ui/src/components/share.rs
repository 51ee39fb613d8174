use api::MonthlyRoundup;
use dioxus::prelude::*;

use crate::core::platform;
use crate::roundup::avatar::prepare_poster_image;
use crate::roundup::export::{
    platform_rasterizer, platform_share_target, run_share, Delivery, ExportOptions,
};
use crate::roundup::poster::{render_share_poster, PosterContent, SHARE_POSTER_TOKENS};
use crate::t;
use crate::views::use_roundup_client;

#[derive(Clone, Debug, PartialEq)]
enum ShareStatus {
    Idle,
    Working(String),
    Done(String),
    Error(String),
}

/// The poster markup, inlined so the dashboard shows exactly what gets exported.
#[component]
pub fn SharePoster(markup: String) -> Element {
    rsx! {
        div { class: "share-poster", dangerous_inner_html: "{markup}" }
    }
}

#[component]
pub fn SharePanel(
    roundup: MonthlyRoundup,
    athlete_name: String,
    #[props(!optional)] image_url: Option<String>,
) -> Element {
    let client = use_roundup_client();
    let mut status = use_signal(|| ShareStatus::Idle);
    let mut is_sharing = use_signal(|| false);

    // Avatar failures only cost the photo; the poster falls back to the initial.
    let avatar = use_resource(use_reactive((&image_url,), move |(image_url,)| {
        let client = client.clone();
        async move { prepare_poster_image(&client, image_url.as_deref()).await }
    }));
    let poster_image = avatar.read().clone().flatten();

    let content = PosterContent::from_roundup(&roundup, &athlete_name, poster_image, &SHARE_POSTER_TOKENS);
    let markup = render_share_poster(&content, &SHARE_POSTER_TOKENS);
    let share_text = t!(
        "share-text",
        headline = content.distance_headline.clone(),
        month = roundup.month_label.clone()
    );

    let feedback = match &status() {
        ShareStatus::Idle => None,
        ShareStatus::Working(label) => Some(("roundup-card__meta".to_string(), format!("{label}…"))),
        ShareStatus::Done(message) => Some((
            "roundup-card__meta roundup-card__meta--success".to_string(),
            format!("✅ {message}"),
        )),
        ShareStatus::Error(err) => Some((
            "roundup-card__meta roundup-card__meta--error".to_string(),
            format!("⚠️ {err}"),
        )),
    };

    let share_handler = {
        let markup = markup.clone();
        move |_| {
            if is_sharing() {
                return;
            }
            is_sharing.set(true);
            status.set(ShareStatus::Working(t!("share-working")));

            let markup = markup.clone();
            let options = ExportOptions {
                device_pixel_ratio: platform::device_pixel_ratio(),
                text: share_text.clone(),
                ..ExportOptions::default()
            };
            spawn(async move {
                let rasterizer = platform_rasterizer();
                let target = platform_share_target();
                let outcome = run_share(
                    &markup,
                    &options,
                    &rasterizer,
                    &target,
                    platform::now_epoch_ms(),
                )
                .await;
                match outcome {
                    Ok(Delivery::Shared) => status.set(ShareStatus::Done(t!("share-done-shared"))),
                    Ok(Delivery::Downloaded { filename }) => {
                        status.set(ShareStatus::Done(t!("share-done-downloaded", filename = filename)))
                    }
                    Ok(Delivery::Saved { path }) => {
                        status.set(ShareStatus::Done(t!("share-done-saved", path = path)))
                    }
                    Err(message) => {
                        platform::notify_error(&message);
                        status.set(ShareStatus::Error(message));
                    }
                }
                is_sharing.set(false);
            });
        }
    };

    rsx! {
        section { class: "roundup-card roundup-share",
            div { class: "roundup-card__header",
                h2 { {t!("share-title")} }
                span { class: "roundup-card__meta", {t!("share-subtitle")} }
            }
            SharePoster { markup: markup.clone() }
            div { class: "roundup-share__actions",
                button {
                    r#type: "button",
                    class: "button button--primary",
                    disabled: is_sharing(),
                    onclick: share_handler,
                    if is_sharing() { {t!("share-button-busy")} } else { {t!("share-button")} }
                }
            }
            if let Some((class_name, message)) = feedback {
                p { class: "{class_name}", "{message}" }
            }
        }
    }
}

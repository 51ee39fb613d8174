use dioxus::prelude::*;
use rand::seq::SliceRandom;

use crate::components::app_navbar::{nav_link, NavTarget};
use crate::t;
use crate::views::{use_lang_marker, use_roundup_client};

/// Background scenes for the landing hero; one is picked per mount.
const HERO_SCENES: [&str; 4] = [
    "hero--run",
    "hero--ride",
    "hero--swim",
    "hero--workout",
];

#[component]
pub fn Home() -> Element {
    let _lang_marker = use_lang_marker();
    let client = use_roundup_client();
    let hero_scene = use_hook(|| {
        HERO_SCENES
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or(HERO_SCENES[0])
    });
    let mut connecting = use_signal(|| false);
    let auth_url = client.auth_url();

    let features = [
        (t!("home-feature-analytics-title"), t!("home-feature-analytics-body")),
        (t!("home-feature-calendar-title"), t!("home-feature-calendar-body")),
        (t!("home-feature-share-title"), t!("home-feature-share-body")),
    ];

    rsx! {
        div { style: "display:none", "{_lang_marker}" }
        section { class: "page page-home",
            div { class: "hero {hero_scene}",
                div { class: "hero__overlay" }
                div { class: "hero__content",
                    h1 { class: "hero__title", {t!("home-title")} }
                    p { class: "hero__tagline", {t!("home-tagline")} }
                    a {
                        class: "button button--strava",
                        href: "{auth_url}",
                        aria_label: t!("home-connect"),
                        onclick: move |_| connecting.set(true),
                        {t!("home-connect")}
                    }
                    p { class: "hero__status", aria_live: "polite",
                        if connecting() {
                            {t!("home-connecting")}
                        }
                    }
                }
            }

            div { class: "page-home__intro",
                h2 { {t!("home-features-title")} }
                p { {t!("home-features-intro")} }
            }
            ul { class: "page-home__features",
                for (title, body) in features {
                    li { key: "{title}", class: "feature-card",
                        h3 { class: "feature-card__title", "{title}" }
                        p { class: "feature-card__body", "{body}" }
                    }
                }
            }
            footer { class: "page-home__footer",
                {nav_link(NavTarget::Help, &t!("home-help-link"))}
            }
        }
    }
}

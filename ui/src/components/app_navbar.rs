use crate::i18n::{self};
use crate::t;
use dioxus::prelude::*;
use once_cell::sync::OnceCell;

/// Platforms register a `NavBuilder` providing fully constructed `Link`
/// elements so `ui` never needs to know each platform's `Route` enum.
///
/// `AppNavbar` renders localized labels inside each supplied link, and views
/// use [`nav_link`] for in-page links to the same destinations.
///
/// Example (in platform crate):
/// ```ignore
/// use ui::components::app_navbar::{NavBuilder, register_nav};
/// fn install_nav() {
///     register_nav(NavBuilder {
///         home: |label| rsx!( Link { class: "navbar__link", to: Route::Home {}, "{label}" } ),
///         dashboard: |label| rsx!( Link { class: "navbar__link", to: Route::Dashboard {}, "{label}" } ),
///         help: |label| rsx!( Link { class: "navbar__link", to: Route::Help {}, "{label}" } ),
///     });
/// }
/// ```
///
/// The language selector triggers a re-render via a local signal; every render
/// pulls fresh localized strings via `fl!`.
pub struct NavBuilder {
    // Each closure must return a Link (or element styled as a nav link) whose
    // children will be exactly the localized label string passed in.
    pub home: fn(label: &str) -> Element,
    pub dashboard: fn(label: &str) -> Element,
    pub help: fn(label: &str) -> Element,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavTarget {
    Home,
    Dashboard,
    Help,
}

impl NavTarget {
    fn fallback_href(self) -> &'static str {
        match self {
            NavTarget::Home => "/",
            NavTarget::Dashboard => "/dashboard",
            NavTarget::Help => "/help",
        }
    }
}

static NAV_BUILDER: OnceCell<NavBuilder> = OnceCell::new();

pub fn register_nav(builder: NavBuilder) {
    let _ = NAV_BUILDER.set(builder);
}

/// Link to `target` through the registered builder, or a plain anchor when
/// no platform registered one (tests, storybook-style embedding).
pub fn nav_link(target: NavTarget, label: &str) -> Element {
    match NAV_BUILDER.get() {
        Some(builder) => match target {
            NavTarget::Home => (builder.home)(label),
            NavTarget::Dashboard => (builder.dashboard)(label),
            NavTarget::Help => (builder.help)(label),
        },
        None => rsx! {
            a { class: "navbar__link", href: target.fallback_href(), "{label}" }
        },
    }
}

#[component]
pub fn AppNavbar(children: Element) -> Element {
    i18n::init();

    let mut current_lang = use_signal(|| "en-US".to_string());
    let langs = use_signal(i18n::available_languages);
    let show_switcher = langs().len() > 1;
    // Global language code signal, when the platform provides one.
    let lang_code_ctx: Option<Signal<String>> = try_use_context::<Signal<String>>();
    let _lang_marker = lang_code_ctx.as_ref().map(|c| c()).unwrap_or_default();

    tracing::trace!(lang = %_lang_marker, "AppNavbar render");

    let on_change = move |evt: dioxus::events::FormEvent| {
        let val = evt.value();
        if i18n::set_language(&val).is_ok() {
            current_lang.set(val.clone());
            if let Some(mut code) = lang_code_ctx {
                code.set(val);
            }
        }
    };

    let internal_nav = NAV_BUILDER.get().is_some().then(|| {
        let home = nav_link(NavTarget::Home, &t!("nav-home"));
        let dashboard = nav_link(NavTarget::Dashboard, &t!("nav-dashboard"));
        let help = nav_link(NavTarget::Help, &t!("nav-help"));
        rsx! {
            nav { class: "navbar__links",
                {home}
                {dashboard}
                {help}
            }
        }
    });

    let tagline = t!("tagline");

    rsx! {
        header {
            id: "navbar",
            class: "navbar",
            // Hidden marker ensures AppNavbar re-renders when the global language signal changes.
            div { style: "display:none", "{_lang_marker}" }
            div { class: "navbar__inner",
                div { class: "navbar__brand",
                    span { class: "navbar__brand-link",
                        span { class: "navbar__brand-spark", aria_hidden: "true" }
                        span { class: "navbar__brand-mark", "Strava Roundup" }
                    }
                    span { class: "navbar__brand-subtitle", "{tagline}" }
                }

                if let Some(nav) = internal_nav {
                    {nav}
                } else {
                    nav { class: "navbar__links", {children} }
                }

                if show_switcher {
                    div { class: "navbar__locale",
                        label {
                            class: "visually-hidden",
                            r#for: "locale-select",
                            {t!("nav-language-label")}
                        }
                        select {
                            id: "locale-select",
                            value: "{current_lang()}",
                            oninput: on_change,
                            { langs().iter().map(|code| {
                                let c = code.clone();
                                rsx!{
                                    option { key: "{c}", value: "{c}", "{c}" }
                                }
                            })}
                        }
                    }
                }
            }
        }
    }
}

use dioxus::prelude::*;

use api::RoundupClient;
use ui::components::app_navbar::{register_nav, NavBuilder};
use ui::components::AppNavbar;
use ui::core::platform;
use ui::core::storage::SharedStore;
use ui::views::{AuthCallback, Dashboard, Help, Home};

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(WebNavbar)]
    #[route("/")]
    Home {},
    #[route("/auth/callback?:..query")]
    AuthCallback { query: String },
    #[route("/dashboard")]
    Dashboard {},
    #[route("/help")]
    Help {},
}

fn nav_home(label: &str) -> Element {
    rsx!(Link {
        class: "navbar__link",
        to: Route::Home {},
        "{label}"
    })
}
fn nav_dashboard(label: &str) -> Element {
    rsx!(Link {
        class: "navbar__link",
        to: Route::Dashboard {},
        "{label}"
    })
}
fn nav_help(label: &str) -> Element {
    rsx!(Link {
        class: "navbar__link",
        to: Route::Help {},
        "{label}"
    })
}

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    ui::i18n::init();
    register_nav(NavBuilder {
        home: nav_home,
        dashboard: nav_dashboard,
        help: nav_help,
    });

    let lang_code = use_signal(|| "en-US".to_string());
    use_context_provider(|| lang_code);
    use_context_provider(SharedStore::platform_default);
    use_context_provider(|| {
        let config = platform::api_config();
        tracing::info!(base_url = %config.base_url, "api client ready");
        RoundupClient::new(config)
    });

    rsx! {
        document::Link { rel: "stylesheet", href: ui::THEME_CSS }

        Router::<Route> {}
    }
}

/// A web-specific Router around the shared `Navbar` component
/// which allows us to use the web-specific `Route` enum.
#[component]
fn WebNavbar() -> Element {
    rsx! {
        AppNavbar { }
        Outlet::<Route> {}
    }
}

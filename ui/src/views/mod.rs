mod callback;
pub use callback::AuthCallback;

mod dashboard;
pub use dashboard::Dashboard;

mod help;
pub use help::Help;

mod home;
pub use home::Home;

use api::RoundupClient;
use dioxus::prelude::*;

use crate::core::platform;
use crate::core::storage::SharedStore;

/// Client from context, or one built from the environment when the platform
/// did not provide it.
pub fn use_roundup_client() -> RoundupClient {
    use_hook(|| {
        try_consume_context::<RoundupClient>()
            .unwrap_or_else(|| RoundupClient::new(platform::api_config()))
    })
}

/// Identity store from context, or the platform default.
pub fn use_store() -> SharedStore {
    use_hook(|| try_consume_context::<SharedStore>().unwrap_or_else(SharedStore::platform_default))
}

/// Re-render marker for the global language signal, when the platform provides one.
fn use_lang_marker() -> String {
    let lang_code: Option<Signal<String>> = try_use_context::<Signal<String>>();
    lang_code.as_ref().map(|s| s()).unwrap_or_default()
}

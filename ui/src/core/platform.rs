//! Per-target glue: clocks, pixel ratio, backend config and notices.

use api::ApiConfig;

/// Milliseconds since the Unix epoch.
#[cfg(target_arch = "wasm32")]
pub fn now_epoch_ms() -> u64 {
    js_sys::Date::now() as u64
}

#[cfg(not(target_arch = "wasm32"))]
pub fn now_epoch_ms() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}

#[cfg(target_arch = "wasm32")]
pub fn device_pixel_ratio() -> f64 {
    web_sys::window()
        .map(|w| w.device_pixel_ratio())
        .unwrap_or(1.0)
}

#[cfg(not(target_arch = "wasm32"))]
pub fn device_pixel_ratio() -> f64 {
    1.0
}

/// Backend configuration for this build. In the browser an empty base URL
/// resolves to the page origin.
pub fn api_config() -> ApiConfig {
    let config = ApiConfig::from_env();

    #[cfg(target_arch = "wasm32")]
    {
        let origin = web_sys::window()
            .and_then(|w| w.location().origin().ok())
            .unwrap_or_default();
        config.with_origin_fallback(&origin)
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        config
    }
}

/// Blocking notice for failures the user has to acknowledge.
#[cfg(target_arch = "wasm32")]
pub fn notify_error(message: &str) {
    if let Some(window) = web_sys::window() {
        window.alert_with_message(message).ok();
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn notify_error(message: &str) {
    tracing::warn!(message, "user notified of failure");
}

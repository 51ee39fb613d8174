//! Backend location.

/// Environment variable naming the backend base URL.
pub const BASE_URL_VAR: &str = "ROUNDUP_API_BASE_URL";

const DEV_BASE_URL: &str = "http://localhost:8000";

/// Where the roundup backend lives. An empty base URL means "same origin".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::from_value(None)
    }
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::from_value(Some(base_url.into()))
    }

    /// Resolve the base URL from the environment.
    ///
    /// Native builds read `.env` when present and then the process
    /// environment. Browser builds have no process environment, so the value
    /// is baked in at compile time.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_value(std::env::var(BASE_URL_VAR).ok())
    }

    #[cfg(target_arch = "wasm32")]
    pub fn from_env() -> Self {
        Self::from_value(option_env!("ROUNDUP_API_BASE_URL").map(str::to_string))
    }

    fn from_value(raw: Option<String>) -> Self {
        let base_url = match raw.map(|v| v.trim().to_string()) {
            Some(value) if !value.is_empty() => value.trim_end_matches('/').to_string(),
            _ if cfg!(debug_assertions) => DEV_BASE_URL.to_string(),
            _ => String::new(),
        };
        Self { base_url }
    }

    /// Use `origin` when no explicit base URL was configured.
    pub fn with_origin_fallback(mut self, origin: &str) -> Self {
        if self.base_url.is_empty() {
            self.base_url = origin.trim_end_matches('/').to_string();
        }
        self
    }

    pub fn is_same_origin(&self) -> bool {
        self.base_url.is_empty()
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_trailing_slash() {
        let config = ApiConfig::new("https://roundup.example.com/");
        assert_eq!(config.base_url, "https://roundup.example.com");
        assert_eq!(config.url("/auth/strava"), "https://roundup.example.com/auth/strava");
    }

    #[test]
    fn blank_value_falls_back_to_build_default() {
        let config = ApiConfig::new("   ");
        if cfg!(debug_assertions) {
            assert_eq!(config.base_url, "http://localhost:8000");
        } else {
            assert!(config.is_same_origin());
        }
    }

    #[test]
    fn origin_fallback_only_applies_when_empty() {
        let same_origin = ApiConfig {
            base_url: String::new(),
        };
        assert_eq!(
            same_origin.with_origin_fallback("https://app.example/").base_url,
            "https://app.example"
        );

        let explicit = ApiConfig::new("https://api.example");
        assert_eq!(
            explicit.with_origin_fallback("https://app.example").base_url,
            "https://api.example"
        );
    }
}

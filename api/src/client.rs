//! HTTP client for the roundup backend.
//!
//! Uses `reqwest`, which goes through the browser's `fetch` on wasm and
//! through rustls on native targets.

use serde::de::DeserializeOwned;

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::month::MonthKey;
use crate::types::{AuthExchange, MonthlyRoundup, ProxyImageResponse, SyncSummary};

/// Raw bytes of a remote image plus the content type the server reported.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedImage {
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

#[derive(Clone)]
pub struct RoundupClient {
    http: reqwest::Client,
    config: ApiConfig,
}

impl RoundupClient {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Where the "Connect with Strava" link points.
    pub fn auth_url(&self) -> String {
        self.config.url("/auth/strava")
    }

    pub fn exchange_url(&self, code: &str) -> String {
        self.config
            .url(&format!("/auth/strava/callback?code={}", urlencoding::encode(code)))
    }

    pub fn sync_url(&self, athlete_id: &str, since: Option<&str>) -> Result<String, ApiError> {
        let athlete_id = require_athlete(athlete_id)?;
        let mut url = self
            .config
            .url(&format!("/athletes/{}/sync", urlencoding::encode(athlete_id)));
        if let Some(since) = since.filter(|s| !s.is_empty()) {
            url.push_str("?since=");
            url.push_str(&urlencoding::encode(since));
        }
        Ok(url)
    }

    pub fn roundup_url(&self, athlete_id: &str, month: Option<MonthKey>) -> Result<String, ApiError> {
        let athlete_id = require_athlete(athlete_id)?;
        let mut url = self
            .config
            .url(&format!("/athletes/{}/roundup", urlencoding::encode(athlete_id)));
        if let Some(month) = month {
            url.push_str("?month=");
            url.push_str(&month.to_string());
        }
        Ok(url)
    }

    pub fn proxy_url(&self, image_url: &str) -> String {
        self.config
            .url(&format!("/proxy/image?url={}", urlencoding::encode(image_url)))
    }

    /// Trade an OAuth `code` for the athlete record. Only needed when the
    /// backend redirects with the raw code instead of a `status` flag.
    pub async fn exchange_code(&self, code: &str) -> Result<AuthExchange, ApiError> {
        let request = self.http.get(self.exchange_url(code));
        let response = same_origin(request).send().await?;
        let exchange: AuthExchange = check_response_json("Sign-in", response).await?;
        tracing::info!(db_id = ?exchange.db_id, "authorization code exchanged");
        Ok(exchange)
    }

    /// `POST /athletes/{id}/sync`
    pub async fn sync_athlete_activities(
        &self,
        athlete_id: &str,
        since: Option<&str>,
    ) -> Result<SyncSummary, ApiError> {
        let url = self.sync_url(athlete_id, since)?;
        let request = self
            .http
            .post(&url)
            .header(reqwest::header::CONTENT_TYPE, "application/json");
        let response = same_origin(request).send().await?;
        let summary: SyncSummary = check_response_json("Sync", response).await?;
        tracing::info!(athlete_id, fetched = summary.fetched, "activity sync finished");
        Ok(summary)
    }

    /// `GET /athletes/{id}/roundup`
    pub async fn fetch_monthly_roundup(
        &self,
        athlete_id: &str,
        month: Option<MonthKey>,
    ) -> Result<MonthlyRoundup, ApiError> {
        let url = self.roundup_url(athlete_id, month)?;
        let request = self
            .http
            .get(&url)
            .header(reqwest::header::CONTENT_TYPE, "application/json");
        let response = same_origin(request).send().await?;
        let roundup: MonthlyRoundup = check_response_json("Fetch", response).await?;
        tracing::info!(athlete_id, month = %roundup.month, "roundup loaded");
        Ok(roundup)
    }

    /// Fetch an image straight from its (usually cross-origin) host.
    pub async fn fetch_image(&self, url: &str) -> Result<FetchedImage, ApiError> {
        let response = self.http.get(url).send().await?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Http {
                action: "Image fetch",
                status,
                body,
            });
        }
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let bytes = response.bytes().await?.to_vec();
        Ok(FetchedImage {
            content_type,
            bytes,
        })
    }

    /// Ask the backend to fetch `url` and hand it back as a data URI.
    pub async fn fetch_proxied_image(&self, url: &str) -> Result<String, ApiError> {
        let response = self.http.get(self.proxy_url(url)).send().await?;
        let payload: ProxyImageResponse = check_response_json("Image proxy", response).await?;
        if payload.data_url.starts_with("data:") {
            Ok(payload.data_url)
        } else {
            Err(ApiError::InvalidProxyPayload)
        }
    }
}

fn require_athlete(athlete_id: &str) -> Result<&str, ApiError> {
    let trimmed = athlete_id.trim();
    if trimmed.is_empty() {
        Err(ApiError::MissingAthlete)
    } else {
        Ok(trimmed)
    }
}

#[cfg(target_arch = "wasm32")]
fn same_origin(request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
    request.fetch_credentials_same_origin()
}

#[cfg(not(target_arch = "wasm32"))]
fn same_origin(request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
    request
}

async fn check_response_json<T: DeserializeOwned>(
    action: &'static str,
    response: reqwest::Response,
) -> Result<T, ApiError> {
    if !response.status().is_success() {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        tracing::warn!(action, status, "backend request failed");
        return Err(ApiError::Http {
            action,
            status,
            body,
        });
    }

    let text = response.text().await?;
    serde_json::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> RoundupClient {
        RoundupClient::new(ApiConfig::new("https://api.example"))
    }

    #[test]
    fn sync_url_only_adds_since_when_present() {
        let client = client();
        assert_eq!(
            client.sync_url("42", None).unwrap(),
            "https://api.example/athletes/42/sync"
        );
        assert_eq!(
            client.sync_url("42", Some("")).unwrap(),
            "https://api.example/athletes/42/sync"
        );
        assert_eq!(
            client.sync_url("42", Some("2025-10-01T00:00:00+00:00")).unwrap(),
            "https://api.example/athletes/42/sync?since=2025-10-01T00%3A00%3A00%2B00%3A00"
        );
    }

    #[test]
    fn roundup_url_carries_month_key() {
        let month: MonthKey = "2025-09".parse().unwrap();
        assert_eq!(
            client().roundup_url("7", Some(month)).unwrap(),
            "https://api.example/athletes/7/roundup?month=2025-09"
        );
        assert_eq!(
            client().roundup_url("7", None).unwrap(),
            "https://api.example/athletes/7/roundup"
        );
    }

    #[test]
    fn missing_athlete_is_rejected_before_any_request() {
        assert_eq!(client().sync_url("  ", None), Err(ApiError::MissingAthlete));
        assert_eq!(client().roundup_url("", None), Err(ApiError::MissingAthlete));
    }

    #[test]
    fn proxy_and_auth_urls() {
        let client = client();
        assert_eq!(
            client.proxy_url("https://cdn.example/a b.jpg"),
            "https://api.example/proxy/image?url=https%3A%2F%2Fcdn.example%2Fa%20b.jpg"
        );
        assert_eq!(client.auth_url(), "https://api.example/auth/strava");
        assert_eq!(
            client.exchange_url("ab/c"),
            "https://api.example/auth/strava/callback?code=ab%2Fc"
        );
    }
}

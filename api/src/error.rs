//! Errors surfaced by the roundup client.

/// Failure talking to the roundup backend.
///
/// `Display` is what the dashboard shows in its error banners, so the HTTP
/// variant keeps the `"<action> failed (<status>): <body>"` shape.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    #[error("Missing athlete identifier")]
    MissingAthlete,

    #[error("{action} failed ({status}): {body}")]
    Http {
        action: &'static str,
        status: u16,
        body: String,
    },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Could not read response: {0}")]
    Decode(String),

    #[error("Image proxy returned no data URL")]
    InvalidProxyPayload,
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_errors_render_action_status_and_body() {
        let err = ApiError::Http {
            action: "Sync",
            status: 502,
            body: "upstream unavailable".into(),
        };
        assert_eq!(err.to_string(), "Sync failed (502): upstream unavailable");
        assert_eq!(err.status(), Some(502));
    }

    #[test]
    fn missing_athlete_has_no_status() {
        assert_eq!(ApiError::MissingAthlete.to_string(), "Missing athlete identifier");
        assert_eq!(ApiError::MissingAthlete.status(), None);
    }
}

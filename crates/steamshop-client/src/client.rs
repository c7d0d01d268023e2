//! HTTP client for the `SteamShop` REST API.
//!
//! Wraps `reqwest` with endpoint construction, bearer-token handling, and
//! typed error mapping. Non-2xx responses become [`ClientError::Api`] carrying
//! the server's `detail`/`message` text. Protected endpoints check the
//! [`Session`] before anything is sent. Requests are never retried.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use steamshop_core::{AppConfig, Session};

use crate::error::ClientError;

/// Connection settings for [`StoreClient`].
#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub base_url: String,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl From<&AppConfig> for ClientSettings {
    fn from(config: &AppConfig) -> Self {
        Self {
            base_url: config.api_base_url.clone(),
            timeout_secs: config.request_timeout_secs,
            user_agent: config.user_agent.clone(),
        }
    }
}

/// Client for the storefront backend.
///
/// Cheap to share by reference; every call is a single request/response.
#[derive(Debug, Clone)]
pub struct StoreClient {
    pub(crate) client: Client,
    base_url: Url,
}

impl StoreClient {
    /// # Errors
    ///
    /// Returns [`ClientError::Network`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ClientError::InvalidBaseUrl`] if the base
    /// URL does not parse as an `http(s)` URL.
    pub fn new(settings: &ClientSettings) -> Result<Self, ClientError> {
        Self::with_base_url(
            &settings.base_url,
            settings.timeout_secs,
            &settings.user_agent,
        )
    }

    /// # Errors
    ///
    /// Same as [`StoreClient::new`].
    pub fn with_base_url(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash so endpoint segments append to the
        // configured path instead of replacing its last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let invalid = |reason: String| ClientError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason,
        };
        let parsed = Url::parse(&normalised).map_err(|e| invalid(e.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") || parsed.cannot_be_a_base() {
            return Err(invalid(format!("unsupported scheme '{}'", parsed.scheme())));
        }

        Ok(Self {
            client,
            base_url: parsed,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Appends percent-encoded path segments to the base URL.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // cannot_be_a_base was rejected at construction
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Attaches the session's bearer token.
    ///
    /// # Errors
    ///
    /// [`ClientError::NotAuthenticated`] when the session has no token.
    pub(crate) fn authorized(
        request: RequestBuilder,
        session: &Session,
    ) -> Result<RequestBuilder, ClientError> {
        let token = session.require_token()?;
        Ok(request.header(reqwest::header::AUTHORIZATION, token.bearer()))
    }

    /// Sends the request and deserializes a 2xx body into `T`.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Network`] when no response arrives.
    /// - [`ClientError::Api`] on a non-2xx status.
    /// - [`ClientError::Deserialize`] when the body does not match `T`.
    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        context: &str,
    ) -> Result<T, ClientError> {
        let body = self.send(request, context).await?;
        serde_json::from_str(&body).map_err(|e| ClientError::Deserialize {
            context: context.to_owned(),
            source: e,
        })
    }

    /// Sends the request and returns the 2xx body as loose JSON; an empty
    /// body becomes `null`.
    ///
    /// # Errors
    ///
    /// Same as [`StoreClient::send_json`].
    pub(crate) async fn send_value(
        &self,
        request: RequestBuilder,
        context: &str,
    ) -> Result<serde_json::Value, ClientError> {
        let body = self.send(request, context).await?;
        if body.trim().is_empty() {
            return Ok(serde_json::Value::Null);
        }
        serde_json::from_str(&body).map_err(|e| ClientError::Deserialize {
            context: context.to_owned(),
            source: e,
        })
    }

    async fn send(&self, request: RequestBuilder, context: &str) -> Result<String, ClientError> {
        tracing::debug!(context, "sending request");
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            let message = api_error_message(status, &body);
            tracing::debug!(context, status = status.as_u16(), %message, "request rejected");
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(body)
    }
}

/// Extracts a human-readable message from an error body.
///
/// Prefers `detail` (a string, or the first `msg` of a validation error
/// list), then `message`, then the canonical reason phrase for `status`.
pub(crate) fn api_error_message(status: StatusCode, body: &str) -> String {
    let parsed: Option<serde_json::Value> = serde_json::from_str(body).ok();
    let from_body = parsed.as_ref().and_then(|value| {
        let detail = value.get("detail").and_then(|detail| match detail {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Array(items) => items
                .first()
                .and_then(|item| item.get("msg"))
                .and_then(serde_json::Value::as_str)
                .map(str::to_owned),
            _ => None,
        });
        detail.or_else(|| {
            value
                .get("message")
                .and_then(serde_json::Value::as_str)
                .map(str::to_owned)
        })
    });

    from_body
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .map_or_else(|| format!("HTTP {}", status.as_u16()), str::to_owned)
        })
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;

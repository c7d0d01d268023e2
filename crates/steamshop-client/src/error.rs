use steamshop_core::{PurchaseError, SessionError};
use thiserror::Error;

/// Errors returned by [`crate::StoreClient`] and [`crate::CatalogStore`].
#[derive(Debug, Error)]
pub enum ClientError {
    /// No response: connection refused, timeout, TLS failure.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The backend answered with a 4xx/5xx status.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// A protected operation was attempted without a session token. No
    /// request was sent.
    #[error("not signed in")]
    NotAuthenticated,

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// The purchase dialog was driven out of order or with a bad quantity.
    #[error(transparent)]
    Purchase(#[from] PurchaseError),
}

impl From<SessionError> for ClientError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::NotAuthenticated => ClientError::NotAuthenticated,
        }
    }
}

impl ClientError {
    /// HTTP status of an [`ClientError::Api`] error.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

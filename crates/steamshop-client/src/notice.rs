//! User-facing notifications.
//!
//! Every failed operation is turned into one dismissible [`Notice`]; callers
//! decide how to show it. The title names the action, the description carries
//! the server message when there is one.

use std::fmt;

use crate::error::ClientError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeVariant {
    Success,
    Destructive,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub variant: NoticeVariant,
}

impl Notice {
    #[must_use]
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: NoticeVariant::Success,
        }
    }

    #[must_use]
    pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: NoticeVariant::Destructive,
        }
    }

    /// Maps a failed `action` (e.g. `"Login"`) to its notification.
    #[must_use]
    pub fn from_error(action: &str, err: &ClientError) -> Self {
        match err {
            ClientError::Api { message, .. } => {
                Self::destructive(format!("{action} failed"), message.clone())
            }
            ClientError::Network(_) => Self::destructive(
                "Network error",
                "Could not reach the server. Check your connection.",
            ),
            ClientError::NotAuthenticated => Self::destructive(
                "Sign in required",
                format!("{action} is only available to signed-in users."),
            ),
            ClientError::Purchase(e) => Self::destructive(format!("{action} failed"), e.to_string()),
            ClientError::Deserialize { .. } | ClientError::InvalidBaseUrl { .. } => {
                Self::destructive("Unexpected error", "An unexpected error occurred.")
            }
        }
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.variant == NoticeVariant::Destructive
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.description)
    }
}

//! Explicit session context.
//!
//! A [`Session`] is created by the caller and handed to every protected
//! client call; nothing is read from ambient storage.

use std::fmt;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("not signed in: a session token is required")]
    NotAuthenticated,
}

/// Opaque bearer credential returned by the login endpoint.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Raw token, for printing back to the user after login.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// `Authorization` header value.
    #[must_use]
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken([redacted])")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    token: Option<SessionToken>,
    user_name: Option<String>,
}

impl Session {
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn authenticated(token: SessionToken) -> Self {
        Self {
            token: Some(token),
            user_name: None,
        }
    }

    /// Builds a session from an optional token, treating blank strings as absent.
    #[must_use]
    pub fn from_token(token: Option<&str>) -> Self {
        match token.map(str::trim).filter(|t| !t.is_empty()) {
            Some(t) => Self::authenticated(SessionToken::new(t)),
            None => Self::anonymous(),
        }
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// # Errors
    ///
    /// [`SessionError::NotAuthenticated`] when the session holds no token.
    pub fn require_token(&self) -> Result<&SessionToken, SessionError> {
        self.token.as_ref().ok_or(SessionError::NotAuthenticated)
    }

    #[must_use]
    pub fn token(&self) -> Option<&SessionToken> {
        self.token.as_ref()
    }

    #[must_use]
    pub fn user_name(&self) -> Option<&str> {
        self.user_name.as_deref()
    }

    pub fn set_user_name(&mut self, name: impl Into<String>) {
        self.user_name = Some(name.into());
    }

    /// Drops the token and cached user name.
    pub fn sign_out(&mut self) {
        self.token = None;
        self.user_name = None;
    }
}

//! Account endpoints: login, registration, and profile management.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use steamshop_core::{
    age_on, display_name, Credentials, NewUser, ProfileDraft, ProfileEdit, Session, SessionToken,
    UserProfile,
};

use crate::client::StoreClient;
use crate::error::ClientError;

#[derive(Debug, Deserialize)]
struct LoginResponse {
    access_token: String,
}

/// Body of `POST /api/v1/user/profile/create`: the form fields plus the
/// derived display name and age.
#[derive(Debug, Serialize)]
struct CreateProfileRequest<'a> {
    first_name: &'a str,
    last_name: &'a str,
    birth_date: NaiveDate,
    bio: &'a str,
    name: String,
    age: u32,
}

impl StoreClient {
    /// Exchanges credentials for a bearer token and returns an authenticated
    /// session.
    ///
    /// The profile is fetched afterwards to fill in the session's display
    /// name; a failure there is logged and does not fail the login.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Api`] when the credentials are rejected.
    /// - [`ClientError::Network`] on network failure.
    /// - [`ClientError::Deserialize`] if the response has no `access_token`.
    pub async fn login(&self, credentials: &Credentials) -> Result<Session, ClientError> {
        let url = self.endpoint(&["api", "v1", "user", "login"]);
        let request = self.client.post(url).json(credentials);
        let response: LoginResponse = self.send_json(request, "login").await?;

        let mut session = Session::authenticated(SessionToken::new(response.access_token));
        match self.fetch_profile(&session).await {
            Ok(profile) => session.set_user_name(profile.name),
            Err(e) => {
                tracing::warn!(error = %e, "login succeeded but profile lookup failed");
            }
        }
        tracing::info!(username = %credentials.username, "signed in");
        Ok(session)
    }

    /// Creates a new account. The caller logs in separately.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Api`] when the backend rejects the registration
    ///   (e.g. username taken).
    /// - [`ClientError::Network`] on network failure.
    pub async fn register(&self, user: &NewUser) -> Result<serde_json::Value, ClientError> {
        let url = self.endpoint(&["api", "v1", "user", "register"]);
        let request = self.client.post(url).json(user);
        let body = self.send_value(request, "register").await?;
        tracing::info!(username = %user.username, "registered");
        Ok(body)
    }

    /// # Errors
    ///
    /// - [`ClientError::NotAuthenticated`] without a token; nothing is sent.
    /// - [`ClientError::Api`], [`ClientError::Network`],
    ///   [`ClientError::Deserialize`] as for any request.
    pub async fn fetch_profile(&self, session: &Session) -> Result<UserProfile, ClientError> {
        let url = self.endpoint(&["api", "v1", "user", "profile"]);
        let request = Self::authorized(self.client.get(url), session)?;
        self.send_json(request, "profile").await
    }

    /// Creates the user's profile. `today` anchors the age calculation.
    ///
    /// # Errors
    ///
    /// - [`ClientError::NotAuthenticated`] without a token; nothing is sent.
    /// - [`ClientError::Api`] / [`ClientError::Network`] on request failure.
    pub async fn create_profile(
        &self,
        session: &Session,
        draft: &ProfileDraft,
        today: NaiveDate,
    ) -> Result<serde_json::Value, ClientError> {
        let url = self.endpoint(&["api", "v1", "user", "profile", "create"]);
        let body = CreateProfileRequest {
            first_name: &draft.first_name,
            last_name: &draft.last_name,
            birth_date: draft.birth_date,
            bio: &draft.bio,
            name: display_name(&draft.first_name, &draft.last_name),
            age: age_on(draft.birth_date, today),
        };
        let request = Self::authorized(self.client.post(url).json(&body), session)?;
        self.send_value(request, "profile create").await
    }

    /// Updates name, age, and bio, returning the stored profile.
    ///
    /// # Errors
    ///
    /// - [`ClientError::NotAuthenticated`] without a token; nothing is sent.
    /// - [`ClientError::Api`], [`ClientError::Network`],
    ///   [`ClientError::Deserialize`] as for any request.
    pub async fn edit_profile(
        &self,
        session: &Session,
        edit: &ProfileEdit,
    ) -> Result<UserProfile, ClientError> {
        let url = self.endpoint(&["api", "v1", "user", "profile", "edit"]);
        let request = Self::authorized(self.client.put(url).json(edit), session)?;
        self.send_json(request, "profile edit").await
    }
}

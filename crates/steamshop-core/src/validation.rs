//! Field rules for the login, registration, and profile forms.
//!
//! Every rule is checked and all failures are returned together so a form can
//! show one message per field. An empty vector means the input is valid.

use std::sync::LazyLock;

use regex::Regex;

use crate::types::{Credentials, ProfileDraft};

pub const MIN_USERNAME_LEN: usize = 6;
pub const MIN_PASSWORD_LEN: usize = 8;
pub const MIN_NAME_LEN: usize = 2;
pub const MAX_BIO_LEN: usize = 1000;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

static PASSWORD_CHARSET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^[A-Za-z0-9!@#$%^&*()_+\[\]{};':"\\|,.<>/?-]+$"#)
        .expect("valid password charset regex")
});

static UPPERCASE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Z]").expect("valid uppercase regex"));

static SYMBOL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"[!@#$%^&*()_+\[\]{};':"\\|,.<>/?-]"#).expect("valid symbol regex")
});

/// A single rule violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

impl FieldError {
    fn new(field: &'static str, message: &'static str) -> Self {
        Self { field, message }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Registration form input, including the password confirmation field.
#[derive(Debug, Clone)]
pub struct RegistrationForm<'a> {
    pub email: &'a str,
    pub username: &'a str,
    pub password: &'a str,
    pub confirm_password: &'a str,
}

fn check_username(username: &str, errors: &mut Vec<FieldError>) {
    if username.chars().count() < MIN_USERNAME_LEN {
        errors.push(FieldError::new(
            "username",
            "username must be at least 6 characters",
        ));
    }
}

#[must_use]
pub fn validate_login(credentials: &Credentials) -> Vec<FieldError> {
    let mut errors = Vec::new();
    check_username(&credentials.username, &mut errors);
    if credentials.password.chars().count() < MIN_PASSWORD_LEN {
        errors.push(FieldError::new(
            "password",
            "password must be at least 8 characters",
        ));
    }
    errors
}

#[must_use]
pub fn validate_registration(form: &RegistrationForm<'_>) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if !EMAIL_RE.is_match(form.email) {
        errors.push(FieldError::new("email", "enter a valid email address"));
    }
    check_username(form.username, &mut errors);

    let password = form.password;
    if password.chars().count() < MIN_PASSWORD_LEN {
        errors.push(FieldError::new(
            "password",
            "password must be at least 8 characters",
        ));
    }
    if !PASSWORD_CHARSET_RE.is_match(password) {
        errors.push(FieldError::new(
            "password",
            "password may only contain latin letters, digits, and symbols",
        ));
    }
    if !UPPERCASE_RE.is_match(password) {
        errors.push(FieldError::new(
            "password",
            "password must contain at least one uppercase letter",
        ));
    }
    if !SYMBOL_RE.is_match(password) {
        errors.push(FieldError::new(
            "password",
            "password must contain at least one symbol",
        ));
    }
    if form.password != form.confirm_password {
        errors.push(FieldError::new("confirm_password", "passwords do not match"));
    }

    errors
}

#[must_use]
pub fn validate_profile(draft: &ProfileDraft) -> Vec<FieldError> {
    let mut errors = Vec::new();
    if draft.first_name.trim().chars().count() < MIN_NAME_LEN {
        errors.push(FieldError::new(
            "first_name",
            "first name must be at least 2 characters",
        ));
    }
    if draft.last_name.trim().chars().count() < MIN_NAME_LEN {
        errors.push(FieldError::new(
            "last_name",
            "last name must be at least 2 characters",
        ));
    }
    if draft.bio.chars().count() > MAX_BIO_LEN {
        errors.push(FieldError::new(
            "bio",
            "bio must be at most 1000 characters",
        ));
    }
    errors
}

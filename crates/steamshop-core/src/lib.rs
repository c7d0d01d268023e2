//! Domain model and client-side rules for the `SteamShop` storefront.
//!
//! Everything here is pure: no HTTP, no terminal. The HTTP client and the
//! catalog state container live in `steamshop-client`.

pub mod app_config;
pub mod catalog;
pub mod config;
pub mod pricing;
pub mod profile;
pub mod purchase;
pub mod session;
pub mod types;
pub mod validation;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use catalog::{
    apply_like_toggle, filter_by_category, merge_likes, search_local, toggle_local,
    CategoryFilter,
};
pub use config::{load_app_config, load_app_config_from_env};
pub use pricing::{adjusted_history_total, discounted_unit_price, format_price, purchase_total};
pub use profile::{age_on, display_name, initials, DateSelection};
pub use purchase::{quantity_options, PurchaseDialog, PurchaseError, PurchaseRequest, MAX_PER_ORDER};
pub use session::{Session, SessionError, SessionToken};
pub use types::{
    Credentials, Game, GameId, LikeRecord, LikeToggle, NewUser, ProfileDraft, ProfileEdit,
    PurchaseRecord, UserProfile,
};
pub use validation::{
    validate_login, validate_profile, validate_registration, FieldError, RegistrationForm,
};

/// Errors raised while loading [`AppConfig`] from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

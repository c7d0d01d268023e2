use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// Identifier of a game in the catalog.
///
/// The backend emits ids as JSON numbers on product payloads and as strings on
/// like records and purchase history, so both forms are accepted and kept in
/// their stringified form. Comparisons are always on that string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct GameId(String);

impl GameId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<i64> for GameId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for GameId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl<'de> Deserialize<'de> for GameId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        string_or_number(deserializer).map(Self)
    }
}

/// Accepts a JSON string, integer, or float and returns it as a `String`.
fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(i64),
        Float(f64),
        Text(String),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Int(n) => n.to_string(),
        Raw::Float(f) => f.to_string(),
        Raw::Text(s) => s,
    })
}

/// A game as listed in the catalog, annotated with the current user's like state.
///
/// Only `likes` and `liked` ever change after the game has been fetched; they
/// are written by the catalog merge and by like toggles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub id: GameId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Category tags, e.g. `["action", "rpg"]`.
    #[serde(default)]
    pub category: Vec<String>,
    pub price: Decimal,
    /// Discount percentage, `0` when the game is not on sale.
    #[serde(default)]
    pub discount: Decimal,
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub likes: i64,
    /// Not part of the product payload; filled in by [`crate::merge_likes`].
    #[serde(default)]
    pub liked: bool,
    /// Units left in inventory.
    #[serde(default)]
    pub quantity: u32,
    #[serde(rename = "imageSrc", default)]
    pub image_src: String,
    /// Kept verbatim; the backend mixes ISO dates and free-form strings.
    #[serde(rename = "releaseDate", default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub developer: String,
    #[serde(default)]
    pub publisher: String,
    #[serde(default)]
    pub platform: Vec<String>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(rename = "longDescription", default)]
    pub long_description: String,
}

impl Game {
    /// Returns `true` if the game carries a non-zero discount.
    #[must_use]
    pub fn on_sale(&self) -> bool {
        self.discount > Decimal::ZERO
    }

    /// Unit price after the discount is applied.
    #[must_use]
    pub fn discounted_price(&self) -> Decimal {
        crate::pricing::discounted_unit_price(self.price, self.discount)
    }
}

/// Server-side record of the current user's like state for one product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LikeRecord {
    pub product_id: GameId,
    pub liked: bool,
    #[serde(default)]
    pub likes: i64,
}

/// Response body of a like toggle: the product's new counter and flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LikeToggle {
    pub likes: i64,
    pub liked: bool,
}

/// One line of the user's purchase history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseRecord {
    #[serde(deserialize_with = "string_or_number")]
    pub user_id: String,
    pub product_id: GameId,
    pub quantity: u32,
    /// Total charged at purchase time, before the current discount is applied.
    pub total_price: Decimal,
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    #[serde(default)]
    pub age: u32,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub username: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub user_id: String,
}

/// Registration payload.
#[derive(Clone, Serialize)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub email: String,
}

impl fmt::Debug for NewUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewUser")
            .field("username", &self.username)
            .field("password", &"[redacted]")
            .field("email", &self.email)
            .finish()
    }
}

/// Login payload.
#[derive(Clone, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[redacted]")
            .finish()
    }
}

/// Input of the "create profile" form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileDraft {
    pub first_name: String,
    pub last_name: String,
    pub birth_date: NaiveDate,
    pub bio: String,
}

/// Input of the profile edit form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileEdit {
    pub name: String,
    pub age: u32,
    pub bio: String,
}

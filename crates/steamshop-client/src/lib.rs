//! HTTP client for the `SteamShop` storefront REST API and the catalog state
//! container built on top of it.

pub mod auth;
pub mod catalog;
pub mod client;
pub mod error;
pub mod notice;
pub mod purchases;
pub mod store;

pub use client::{ClientSettings, StoreClient};
pub use error::ClientError;
pub use notice::{Notice, NoticeVariant};
pub use store::{purchase_history_view, CatalogStore, HistoryLine};

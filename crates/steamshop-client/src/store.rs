//! Catalog synchronization.
//!
//! [`CatalogStore`] holds the product list annotated with the current user's
//! like state. It is rebuilt by [`CatalogStore::refresh`] (products and likes
//! fetched concurrently, then joined on product id) and patched one entry at
//! a time by [`CatalogStore::toggle_like`]. Any failed request is logged and
//! leaves the held state exactly as it was.

use std::collections::HashMap;

use futures::future::join_all;
use rust_decimal::Decimal;
use steamshop_core::{
    adjusted_history_total, apply_like_toggle, filter_by_category, merge_likes, search_local,
    toggle_local, CategoryFilter, Game, GameId, LikeToggle, PurchaseDialog, PurchaseRecord,
    Session,
};

use crate::client::StoreClient;
use crate::error::ClientError;

#[derive(Debug, Clone, Default)]
pub struct CatalogStore {
    games: Vec<Game>,
    loaded: bool,
}

impl CatalogStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an already merged list, e.g. recommendations.
    #[must_use]
    pub fn from_games(games: Vec<Game>) -> Self {
        Self {
            games,
            loaded: true,
        }
    }

    #[must_use]
    pub fn games(&self) -> &[Game] {
        &self.games
    }

    /// `false` until the first successful refresh.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    #[must_use]
    pub fn get(&self, id: &GameId) -> Option<&Game> {
        self.games.iter().find(|game| &game.id == id)
    }

    #[must_use]
    pub fn by_category(&self, filter: &CategoryFilter) -> Vec<&Game> {
        filter_by_category(&self.games, filter)
    }

    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&Game> {
        search_local(&self.games, query)
    }

    /// Refetches the catalog and, for a signed-in session, the like records,
    /// then replaces the held list with their join.
    ///
    /// The two requests run concurrently and are joined only once both have
    /// resolved.
    ///
    /// # Errors
    ///
    /// Any error from either request. The held list is left unchanged.
    pub async fn refresh(
        &mut self,
        client: &StoreClient,
        session: &Session,
    ) -> Result<(), ClientError> {
        let fetched = if session.is_authenticated() {
            tokio::try_join!(client.list_products(), client.list_likes(session))
                .map(|(products, likes)| (products, Some(likes)))
        } else {
            client.list_products().await.map(|products| (products, None))
        };

        match fetched {
            Ok((products, likes)) => {
                self.games = merge_likes(products, likes.as_deref());
                self.loaded = true;
                tracing::debug!(games = self.games.len(), "catalog refreshed");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "catalog refresh failed; keeping previous state");
                Err(e)
            }
        }
    }

    /// Toggles the like on `id` through the server and writes the returned
    /// counter and flag onto that entry only.
    ///
    /// No optimistic update is made: the entry changes only after the server
    /// has answered.
    ///
    /// # Errors
    ///
    /// - [`ClientError::NotAuthenticated`] for an anonymous session; no
    ///   request is sent.
    /// - Any request error. The held list is left unchanged.
    pub async fn toggle_like(
        &mut self,
        client: &StoreClient,
        session: &Session,
        id: &GameId,
    ) -> Result<LikeToggle, ClientError> {
        session.require_token()?;
        match client.toggle_like(session, id).await {
            Ok(toggle) => {
                if !apply_like_toggle(&mut self.games, id, toggle) {
                    tracing::debug!(product_id = %id, "toggled a game that is not in the catalog");
                }
                Ok(toggle)
            }
            Err(e) => {
                tracing::warn!(product_id = %id, error = %e, "like toggle failed");
                Err(e)
            }
        }
    }

    /// Flips the like flag locally without asking the server.
    pub fn toggle_local(&mut self, id: &GameId) -> bool {
        toggle_local(&mut self.games, id)
    }

    /// Sends the purchase the open `dialog` describes.
    ///
    /// On success the dialog closes; on failure it returns to the open state
    /// with the same quantity so the user can retry or dismiss it. The held
    /// catalog, including inventory counts, is not modified either way.
    ///
    /// # Errors
    ///
    /// - [`ClientError::NotAuthenticated`] for an anonymous session; the
    ///   dialog is untouched and nothing is sent.
    /// - [`ClientError::Purchase`] if the dialog is not open.
    /// - Any request error.
    pub async fn purchase(
        &self,
        client: &StoreClient,
        session: &Session,
        dialog: &mut PurchaseDialog,
    ) -> Result<(), ClientError> {
        session.require_token()?;
        let order = dialog.begin_submit()?;
        match client.purchase(session, &order).await {
            Ok(_) => {
                dialog.complete();
                Ok(())
            }
            Err(e) => {
                dialog.fail();
                tracing::warn!(
                    product_id = %order.product_id,
                    quantity = order.quantity,
                    error = %e,
                    "purchase failed"
                );
                Err(e)
            }
        }
    }

    /// Loads one game for the detail view with the user's like flag.
    ///
    /// # Errors
    ///
    /// Any error from the product or like request.
    pub async fn load_detail(
        client: &StoreClient,
        session: &Session,
        id: &GameId,
    ) -> Result<Game, ClientError> {
        let (mut game, likes) = if session.is_authenticated() {
            tokio::try_join!(client.get_product(id), client.list_likes(session))?
        } else {
            (client.get_product(id).await?, Vec::new())
        };

        // last record wins, as in merge_likes
        game.liked = likes
            .iter()
            .rev()
            .find(|record| record.product_id == game.id)
            .is_some_and(|record| record.liked);
        Ok(game)
    }

    /// Recommendations for the signed-in user, joined with their likes.
    ///
    /// # Errors
    ///
    /// [`ClientError::NotAuthenticated`] for an anonymous session, otherwise
    /// any request error.
    pub async fn recommended(client: &StoreClient, session: &Session) -> Result<Self, ClientError> {
        let (games, likes) =
            tokio::try_join!(client.recommendations(session), client.list_likes(session))?;
        Ok(Self::from_games(merge_likes(games, Some(likes.as_slice()))))
    }
}

/// A purchase-history line re-priced with the product's current discount.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryLine {
    pub record: PurchaseRecord,
    /// `None` when the product could not be looked up.
    pub adjusted_total: Option<Decimal>,
    pub image_src: Option<String>,
}

/// Fetches the purchase history and looks up every distinct product in it
/// concurrently to re-price each line.
///
/// A product lookup failure is logged and leaves that line without an
/// adjusted total; it does not fail the whole view.
///
/// # Errors
///
/// - [`ClientError::NotAuthenticated`] for an anonymous session.
/// - Any error from the history request itself.
pub async fn purchase_history_view(
    client: &StoreClient,
    session: &Session,
) -> Result<Vec<HistoryLine>, ClientError> {
    let history = client.purchase_history(session).await?;

    let mut ids: Vec<&GameId> = history.iter().map(|r| &r.product_id).collect();
    ids.sort();
    ids.dedup();

    let lookups = join_all(
        ids.into_iter()
            .map(|id| async move { (id.clone(), client.get_product(id).await) }),
    )
    .await;

    let mut products: HashMap<GameId, Game> = HashMap::new();
    for (id, result) in lookups {
        match result {
            Ok(game) => {
                products.insert(id, game);
            }
            Err(e) => {
                tracing::warn!(product_id = %id, error = %e, "history product lookup failed");
            }
        }
    }

    Ok(history
        .into_iter()
        .map(|record| {
            let product = products.get(&record.product_id);
            HistoryLine {
                adjusted_total: product.map(|p| adjusted_history_total(&record, p.discount)),
                image_src: product.map(|p| p.image_src.clone()),
                record,
            }
        })
        .collect())
}

//! Product, like, and recommendation endpoints.

use steamshop_core::{Game, GameId, LikeRecord, LikeToggle, Session};

use crate::client::StoreClient;
use crate::error::ClientError;

impl StoreClient {
    /// Full product list, without like state.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Api`] on a non-2xx status.
    /// - [`ClientError::Network`] on network failure.
    /// - [`ClientError::Deserialize`] if the body is not a product list.
    pub async fn list_products(&self) -> Result<Vec<Game>, ClientError> {
        let url = self.endpoint(&["api", "v1", "products"]);
        self.send_json(self.client.get(url), "products").await
    }

    /// # Errors
    ///
    /// Same as [`StoreClient::list_products`]; a missing product surfaces as
    /// [`ClientError::Api`] with status 404.
    pub async fn get_product(&self, id: &GameId) -> Result<Game, ClientError> {
        let url = self.endpoint(&["api", "v1", "products", id.as_str()]);
        self.send_json(self.client.get(url), &format!("product(id={id})"))
            .await
    }

    /// Server-side product search.
    ///
    /// # Errors
    ///
    /// Same as [`StoreClient::list_products`].
    pub async fn search_products(&self, query: &str) -> Result<Vec<Game>, ClientError> {
        let mut url = self.endpoint(&["api", "v1", "products", "search"]);
        url.query_pairs_mut().append_pair("query", query);
        self.send_json(self.client.get(url), &format!("search(query={query})"))
            .await
    }

    /// The signed-in user's like records.
    ///
    /// # Errors
    ///
    /// - [`ClientError::NotAuthenticated`] without a token; nothing is sent.
    /// - Otherwise as [`StoreClient::list_products`].
    pub async fn list_likes(&self, session: &Session) -> Result<Vec<LikeRecord>, ClientError> {
        let url = self.endpoint(&["api", "v1", "likes"]);
        let request = Self::authorized(self.client.get(url), session)?;
        self.send_json(request, "likes").await
    }

    /// Toggles the signed-in user's like on `id` and returns the new state.
    ///
    /// # Errors
    ///
    /// - [`ClientError::NotAuthenticated`] without a token; nothing is sent.
    /// - Otherwise as [`StoreClient::list_products`].
    pub async fn toggle_like(
        &self,
        session: &Session,
        id: &GameId,
    ) -> Result<LikeToggle, ClientError> {
        let url = self.endpoint(&["api", "v1", "products", id.as_str(), "like"]);
        let request = Self::authorized(self.client.post(url), session)?;
        self.send_json(request, &format!("like(id={id})")).await
    }

    /// Games recommended for the signed-in user.
    ///
    /// # Errors
    ///
    /// - [`ClientError::NotAuthenticated`] without a token; nothing is sent.
    /// - Otherwise as [`StoreClient::list_products`].
    pub async fn recommendations(&self, session: &Session) -> Result<Vec<Game>, ClientError> {
        let url = self.endpoint(&["api", "v1", "user", "recommendations"]);
        let request = Self::authorized(self.client.get(url), session)?;
        self.send_json(request, "recommendations").await
    }
}

//! Purchase and purchase-history endpoints.

use serde::Serialize;
use steamshop_core::{PurchaseRecord, PurchaseRequest, Session};

use crate::client::StoreClient;
use crate::error::ClientError;

#[derive(Debug, Serialize)]
struct PurchaseBody {
    quantity: u32,
}

impl StoreClient {
    /// Issues a single purchase request. There is no idempotency key: a
    /// request that times out may or may not have been applied.
    ///
    /// # Errors
    ///
    /// - [`ClientError::NotAuthenticated`] without a token; nothing is sent.
    /// - [`ClientError::Api`] when the backend refuses (e.g. insufficient stock).
    /// - [`ClientError::Network`] on network failure.
    pub async fn purchase(
        &self,
        session: &Session,
        order: &PurchaseRequest,
    ) -> Result<serde_json::Value, ClientError> {
        let url = self.endpoint(&[
            "api",
            "v1",
            "products",
            order.product_id.as_str(),
            "purchase",
        ]);
        let body = PurchaseBody {
            quantity: order.quantity,
        };
        let request = Self::authorized(self.client.post(url).json(&body), session)?;
        let response = self
            .send_value(request, &format!("purchase(id={})", order.product_id))
            .await?;
        tracing::info!(
            product_id = %order.product_id,
            quantity = order.quantity,
            "purchase accepted"
        );
        Ok(response)
    }

    /// The signed-in user's past purchases.
    ///
    /// # Errors
    ///
    /// - [`ClientError::NotAuthenticated`] without a token; nothing is sent.
    /// - [`ClientError::Api`], [`ClientError::Network`],
    ///   [`ClientError::Deserialize`] as for any request.
    pub async fn purchase_history(
        &self,
        session: &Session,
    ) -> Result<Vec<PurchaseRecord>, ClientError> {
        let url = self.endpoint(&["api", "v1", "user", "history"]);
        let request = Self::authorized(self.client.get(url), session)?;
        self.send_json(request, "purchase history").await
    }
}

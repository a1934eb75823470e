//! Orders sub-client — drafts, submission, status changes, listings.
//!
//! Writes are sent exactly once (`RetryPolicy::None`); a retried submission
//! could place the same order twice.

use crate::client::SalonClient;
use crate::domain::order::wire::{
    CreateDraftRequest, DraftResponse, OrdersResponse, StatusUpdateResponse, SubmitOrderRequest,
    SubmitOrderResponse, UpdateStatusRequest,
};
use crate::domain::order::{Order, OrderStatus};
use crate::error::{HttpError, SdkError};
use crate::http::RetryPolicy;
use crate::shared::{OrderId, SalonId};

pub struct Orders<'a> {
    pub(crate) client: &'a SalonClient,
}

impl<'a> Orders<'a> {
    /// Create a draft order holding only contact details. Returns its id.
    pub async fn create_draft(&self, request: &CreateDraftRequest) -> Result<OrderId, SdkError> {
        let url = format!("{}/orders/draft", self.client.http.base_url());
        let resp: DraftResponse = self.client.http.post(&url, request, RetryPolicy::None).await?;
        let id = resp
            .draft_id()
            .cloned()
            .ok_or_else(|| HttpError::Decode("draft response carries no order id".to_string()))?;
        tracing::debug!(draft_id = %id, salon_id = %request.salon_id, "draft order created");
        Ok(id)
    }

    /// Submit the full order. Online orders come back with gateway parameters.
    pub async fn submit(&self, request: &SubmitOrderRequest) -> Result<SubmitOrderResponse, SdkError> {
        let url = format!("{}/orders", self.client.http.base_url());
        Ok(self.client.http.post(&url, request, RetryPolicy::None).await?)
    }

    /// Move an order to `status`. Returns the updated order when the backend
    /// echoes one the SDK can read.
    pub async fn update_status(
        &self,
        order_id: &OrderId,
        status: OrderStatus,
    ) -> Result<Option<Order>, SdkError> {
        let url = format!(
            "{}/orders/{}/status",
            self.client.http.base_url(),
            urlencoding::encode(order_id.as_str())
        );
        let body = UpdateStatusRequest {
            status: status.as_str().to_string(),
        };
        let resp: StatusUpdateResponse = self.client.http.put(&url, &body, RetryPolicy::None).await?;
        tracing::info!(order_id = %order_id, status = %status, "order status updated");

        Ok(resp.order.and_then(|raw| {
            Order::try_from(raw)
                .map_err(|e| tracing::warn!(order_id = %order_id, error = %e, "unreadable order echo"))
                .ok()
        }))
    }

    /// All orders, or only one salon's. Orders the SDK cannot interpret are
    /// skipped with a warning.
    pub async fn list(&self, salon_id: Option<&SalonId>) -> Result<Vec<Order>, SdkError> {
        let mut url = format!("{}/orders", self.client.http.base_url());
        if let Some(id) = salon_id {
            url = format!("{}?salonId={}", url, urlencoding::encode(id.as_str()));
        }
        let resp: OrdersResponse = self.client.http.get(&url, RetryPolicy::Idempotent).await?;

        Ok(resp
            .orders
            .into_iter()
            .filter_map(|raw| {
                let id = raw.id.clone();
                Order::try_from(raw)
                    .map_err(|e| tracing::warn!(order_id = %id, error = %e, "skipping order"))
                    .ok()
            })
            .collect())
    }
}

//! Analytics sub-client — dashboard aggregates.

use crate::client::SalonClient;
use crate::domain::analytics::wire::{ItemStatsResponse, SalonStatsResponse, StatsResponse};
use crate::domain::analytics::{ItemPerformance, SalonPerformance};
use crate::error::SdkError;
use crate::http::RetryPolicy;
use crate::shared::SalonId;

pub struct Analytics<'a> {
    pub(crate) client: &'a SalonClient,
}

impl<'a> Analytics<'a> {
    /// One row per salon, or just the given salon's row.
    pub async fn salon_performance(
        &self,
        salon_id: Option<&SalonId>,
    ) -> Result<Vec<SalonPerformance>, SdkError> {
        let resp: StatsResponse<SalonStatsResponse> = self
            .client
            .http
            .get(&self.url("salon-performance", salon_id), RetryPolicy::Idempotent)
            .await?;
        Ok(resp.stats.into_iter().map(Into::into).collect())
    }

    /// Units sold and revenue per product name.
    pub async fn item_performance(
        &self,
        salon_id: Option<&SalonId>,
    ) -> Result<Vec<ItemPerformance>, SdkError> {
        let resp: StatsResponse<ItemStatsResponse> = self
            .client
            .http
            .get(&self.url("item-performance", salon_id), RetryPolicy::Idempotent)
            .await?;
        Ok(resp.stats.into_iter().map(Into::into).collect())
    }

    fn url(&self, report: &str, salon_id: Option<&SalonId>) -> String {
        let base = format!("{}/analytics/{}", self.client.http.base_url(), report);
        match salon_id {
            Some(id) => format!("{}?salonId={}", base, urlencoding::encode(id.as_str())),
            None => base,
        }
    }
}

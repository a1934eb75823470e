//! Wire types for the analytics endpoints.

use crate::shared::{serde_util, SalonId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One row of `GET /analytics/salon-performance`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalonStatsResponse {
    #[serde(default, rename = "_id")]
    pub id: Option<SalonId>,
    #[serde(default)]
    pub salon_name: Option<String>,
    #[serde(default)]
    pub total_orders: u64,
    #[serde(default)]
    pub returned_orders: u64,
    #[serde(default)]
    pub cancelled_orders: u64,
    #[serde(default)]
    pub total_items_sold: u64,
    #[serde(default, with = "serde_util::decimal_number")]
    pub total_revenue: Decimal,
}

/// One row of `GET /analytics/item-performance`. The backend groups by
/// product name, so `_id` holds the name.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemStatsResponse {
    #[serde(rename = "_id")]
    pub product_name: String,
    #[serde(default)]
    pub total_quantity: u64,
    #[serde(default, with = "serde_util::decimal_number")]
    pub total_revenue: Decimal,
}

/// Both analytics endpoints wrap their rows in `stats`.
#[derive(Debug, Clone, Deserialize)]
pub struct StatsResponse<T> {
    #[serde(default = "Vec::new")]
    pub stats: Vec<T>,
}

//! Analytics domain — per-salon and per-item sales aggregates.

#[cfg(feature = "http")]
pub mod client;
pub mod wire;

use crate::shared::SalonId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Order counts and revenue for one salon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalonPerformance {
    pub salon_id: Option<SalonId>,
    pub salon_name: Option<String>,
    pub total_orders: u64,
    pub returned_orders: u64,
    pub cancelled_orders: u64,
    pub total_items_sold: u64,
    pub total_revenue: Decimal,
}

impl SalonPerformance {
    /// Orders that were neither returned nor cancelled.
    pub fn fulfilled_orders(&self) -> u64 {
        self.total_orders
            .saturating_sub(self.returned_orders)
            .saturating_sub(self.cancelled_orders)
    }

    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        term.is_empty()
            || self
                .salon_name
                .as_deref()
                .is_some_and(|n| n.to_lowercase().contains(&term))
    }
}

/// Units sold and revenue for one product, keyed by product name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemPerformance {
    pub product_name: String,
    pub total_quantity: u64,
    pub total_revenue: Decimal,
}

impl From<wire::SalonStatsResponse> for SalonPerformance {
    fn from(s: wire::SalonStatsResponse) -> Self {
        SalonPerformance {
            salon_id: s.id,
            salon_name: s.salon_name,
            total_orders: s.total_orders,
            returned_orders: s.returned_orders,
            cancelled_orders: s.cancelled_orders,
            total_items_sold: s.total_items_sold,
            total_revenue: s.total_revenue,
        }
    }
}

impl From<wire::ItemStatsResponse> for ItemPerformance {
    fn from(s: wire::ItemStatsResponse) -> Self {
        ItemPerformance {
            product_name: s.product_name,
            total_quantity: s.total_quantity,
            total_revenue: s.total_revenue,
        }
    }
}

//! Wire types for order requests and responses.

use crate::shared::{serde_util, OrderId, ProductId, SalonId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ─── Requests ────────────────────────────────────────────────────────────────

/// Request body for `POST /orders/draft`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDraftRequest {
    pub salon_id: SalonId,
    pub customer_name: String,
    pub customer_phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_phone: Option<String>,
    pub address: String,
    pub city: String,
}

/// One line of a submitted order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemBody {
    pub product_id: ProductId,
    pub product_name: String,
    pub quantity: u32,
    #[serde(with = "serde_util::decimal_number")]
    pub price: Decimal,
}

/// Request body for `POST /orders`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitOrderRequest {
    /// Draft created in the first checkout step, completed by this submission.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_id: Option<OrderId>,
    pub salon_id: SalonId,
    pub customer_name: String,
    pub customer_phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_phone: Option<String>,
    pub address: String,
    pub city: String,
    pub items: Vec<OrderItemBody>,
    #[serde(with = "serde_util::decimal_number")]
    pub total_amount: Decimal,
    /// `"Online"` or `"Cash on Delivery"`.
    pub payment_method: String,
}

/// Request body for `PUT /orders/:id/status`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

// ─── Responses ───────────────────────────────────────────────────────────────

/// `salonId` is either a bare id or a populated salon document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SalonRef {
    Id(SalonId),
    Populated {
        #[serde(rename = "_id")]
        id: SalonId,
        #[serde(default)]
        name: Option<String>,
    },
}

impl SalonRef {
    pub fn id(&self) -> &SalonId {
        match self {
            SalonRef::Id(id) => id,
            SalonRef::Populated { id, .. } => id,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            SalonRef::Id(_) => None,
            SalonRef::Populated { name, .. } => name.as_deref(),
        }
    }
}

/// An order line as stored by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemResponse {
    #[serde(default, rename = "_id")]
    pub id: Option<String>,
    pub product_id: ProductId,
    pub product_name: String,
    pub quantity: u32,
    #[serde(with = "serde_util::decimal_number")]
    pub price: Decimal,
}

/// An order document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    #[serde(rename = "_id")]
    pub id: OrderId,
    #[serde(default)]
    pub merchant_order_id: Option<String>,
    #[serde(default)]
    pub salon_id: Option<SalonRef>,
    #[serde(default)]
    pub salon_name: Option<String>,
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub customer_phone: String,
    #[serde(default)]
    pub additional_phone: Option<String>,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub items: Vec<OrderItemResponse>,
    #[serde(default, with = "serde_util::option_decimal_number")]
    pub total_amount: Option<Decimal>,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub returned_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub cancelled_at: Option<DateTime<Utc>>,
}

/// Response from `GET /orders`.
#[derive(Debug, Clone, Deserialize)]
pub struct OrdersResponse {
    #[serde(default)]
    pub orders: Vec<OrderResponse>,
}

/// Response from `POST /orders/draft`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftResponse {
    #[serde(default, alias = "draftId")]
    pub order_id: Option<OrderId>,
    #[serde(default)]
    pub order: Option<OrderResponse>,
}

impl DraftResponse {
    pub fn draft_id(&self) -> Option<&OrderId> {
        self.order_id
            .as_ref()
            .or_else(|| self.order.as_ref().map(|o| &o.id))
    }
}

/// Response from `POST /orders`.
///
/// Online orders carry the gateway parameter bag under `payhere`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitOrderResponse {
    #[serde(default)]
    pub order_id: Option<OrderId>,
    #[serde(default)]
    pub order: Option<OrderResponse>,
    #[serde(default)]
    pub payhere: Option<serde_json::Map<String, serde_json::Value>>,
}

impl SubmitOrderResponse {
    pub fn placed_id(&self) -> Option<&OrderId> {
        self.order_id
            .as_ref()
            .or_else(|| self.order.as_ref().map(|o| &o.id))
    }
}

/// Response from `PUT /orders/:id/status`.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusUpdateResponse {
    #[serde(default)]
    pub order: Option<OrderResponse>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_response_with_populated_salon() {
        let json = r#"{
            "_id": "o1",
            "salonId": {"_id": "s1", "name": "Glow"},
            "customerName": "Ann",
            "customerPhone": "077",
            "address": "x",
            "city": "y",
            "items": [{"_id": "i1", "productId": "p1", "productName": "Oil", "quantity": 2, "price": 800}],
            "totalAmount": 1600,
            "paymentMethod": "Online",
            "status": "Processing",
            "createdAt": "2024-03-01T10:00:00.000Z"
        }"#;
        let order: OrderResponse = serde_json::from_str(json).unwrap();
        let salon = order.salon_id.unwrap();
        assert_eq!(salon.id().as_str(), "s1");
        assert_eq!(salon.name(), Some("Glow"));
        assert_eq!(order.items[0].quantity, 2);
        assert!(order.created_at.is_some());
    }

    #[test]
    fn test_order_response_with_bare_salon_id() {
        let order: OrderResponse =
            serde_json::from_str(r#"{"_id": "o1", "salonId": "s9"}"#).unwrap();
        assert_eq!(order.salon_id.unwrap().id().as_str(), "s9");
        assert!(order.items.is_empty());
    }

    #[test]
    fn test_draft_response_id_sources() {
        let r: DraftResponse = serde_json::from_str(r#"{"draftId": "d1"}"#).unwrap();
        assert_eq!(r.draft_id().unwrap().as_str(), "d1");

        let r: DraftResponse = serde_json::from_str(r#"{"order": {"_id": "d2"}}"#).unwrap();
        assert_eq!(r.draft_id().unwrap().as_str(), "d2");

        let r: DraftResponse = serde_json::from_str(r#"{}"#).unwrap();
        assert!(r.draft_id().is_none());
    }

    #[test]
    fn test_submit_request_skips_absent_optionals() {
        let req = SubmitOrderRequest {
            order_id: None,
            salon_id: SalonId::from("s1"),
            customer_name: "Ann".into(),
            customer_phone: "077".into(),
            additional_phone: None,
            address: "x".into(),
            city: "y".into(),
            items: vec![],
            total_amount: Decimal::ZERO,
            payment_method: "Online".into(),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert!(json.get("orderId").is_none());
        assert!(json.get("additionalPhone").is_none());
        assert_eq!(json["salonId"], "s1");
        assert_eq!(json["totalAmount"], serde_json::json!(0));
    }
}

//! Wire types for catalog requests and responses.

use crate::shared::{serde_util, ProductId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A product as returned by `GET /products`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    #[serde(rename = "_id")]
    pub id: ProductId,
    pub name: String,
    #[serde(with = "serde_util::decimal_number")]
    pub price: Decimal,
    #[serde(default = "default_discount_type")]
    pub discount_type: String,
    #[serde(default, with = "serde_util::option_decimal_number")]
    pub discount_value: Option<Decimal>,
    /// Server-resolved price. Kept for diagnostics only.
    #[serde(default, with = "serde_util::option_decimal_number")]
    pub final_price: Option<Decimal>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

fn default_discount_type() -> String {
    "none".to_string()
}

/// Response from `GET /products`.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductsResponse {
    #[serde(default)]
    pub products: Vec<ProductResponse>,
}

/// Response from `POST /products` and `PUT /products/:id`.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductMutationResponse {
    #[serde(default)]
    pub product: Option<ProductResponse>,
}

/// Request body for `POST /products` and `PUT /products/:id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductBody {
    pub name: String,
    #[serde(with = "serde_util::decimal_number")]
    pub price: Decimal,
    pub discount_type: String,
    #[serde(with = "serde_util::decimal_number")]
    pub discount_value: Decimal,
}

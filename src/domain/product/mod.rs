//! Product domain — catalog items, discount rules, price resolution.

#[cfg(feature = "http")]
pub mod client;
pub mod catalog;
mod convert;
pub mod pricing;
pub mod wire;

use crate::error::{PricingError, SdkError};
use crate::shared::ProductId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub use catalog::{Catalog, ProductLookup};
pub use pricing::{resolve_effective_price, DiscountRule};

// ─── Product ─────────────────────────────────────────────────────────────────

/// A validated catalog product.
///
/// The effective price is derived from `base_price` and `discount` on every
/// call and never stored as a source of truth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub base_price: Decimal,
    pub discount: DiscountRule,
    /// `finalPrice` as reported by the backend, if any.
    pub server_final_price: Option<Decimal>,
}

impl Product {
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        base_price: Decimal,
        discount: DiscountRule,
    ) -> Result<Self, PricingError> {
        // Validates the base price and the rule's own range.
        resolve_effective_price(base_price, &discount)?;
        Ok(Self {
            id,
            name: name.into(),
            base_price,
            discount,
            server_final_price: None,
        })
    }

    pub fn effective_price(&self) -> Result<Decimal, PricingError> {
        resolve_effective_price(self.base_price, &self.discount)
    }

    pub fn is_discounted(&self) -> bool {
        !self.discount.is_none()
    }

    /// Replace the base price; the effective price follows automatically.
    pub fn set_base_price(&mut self, base_price: Decimal) -> Result<(), PricingError> {
        resolve_effective_price(base_price, &self.discount)?;
        self.base_price = base_price;
        self.server_final_price = None;
        Ok(())
    }

    /// Replace the discount rule; the effective price follows automatically.
    pub fn set_discount(&mut self, discount: DiscountRule) -> Result<(), PricingError> {
        resolve_effective_price(self.base_price, &discount)?;
        self.discount = discount;
        self.server_final_price = None;
        Ok(())
    }
}

// ─── ProductDraft ────────────────────────────────────────────────────────────

/// Admin form input for creating or editing a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDraft {
    pub name: String,
    pub price: Decimal,
    pub discount: DiscountRule,
}

impl ProductDraft {
    pub fn validate(&self) -> Result<(), SdkError> {
        if self.name.trim().is_empty() {
            return Err(SdkError::Validation("Product name is required".to_string()));
        }
        Ok(self.discount.validate_for(self.price)?)
    }
}

impl From<&Product> for ProductDraft {
    fn from(product: &Product) -> Self {
        ProductDraft {
            name: product.name.clone(),
            price: product.base_price,
            discount: product.discount,
        }
    }
}

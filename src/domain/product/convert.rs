//! Conversions: catalog wire types ↔ Product domain types.

use super::wire::{ProductBody, ProductResponse};
use super::{DiscountRule, Product, ProductDraft};
use crate::error::PricingError;
use rust_decimal::Decimal;

impl TryFrom<(&str, Option<Decimal>)> for DiscountRule {
    type Error = PricingError;

    fn try_from((kind, value): (&str, Option<Decimal>)) -> Result<Self, Self::Error> {
        let value = value.unwrap_or(Decimal::ZERO);
        match kind.trim().to_ascii_lowercase().as_str() {
            "" | "none" => Ok(DiscountRule::None),
            "percentage" | "percent" => DiscountRule::percentage(value),
            "fixed" | "fixedamount" | "fixed_amount" | "amount" => {
                DiscountRule::fixed_amount(value)
            }
            other => Err(PricingError::InvalidDiscountInput(format!(
                "unknown discount type {:?}",
                other
            ))),
        }
    }
}

impl TryFrom<ProductResponse> for Product {
    type Error = PricingError;

    fn try_from(resp: ProductResponse) -> Result<Self, Self::Error> {
        let discount = DiscountRule::try_from((resp.discount_type.as_str(), resp.discount_value))?;
        let product = Product::new(resp.id, resp.name, resp.price, discount)?;

        let effective = product.effective_price()?;
        if let Some(server) = resp.final_price {
            if server != effective {
                tracing::warn!(
                    product_id = %product.id,
                    server_final_price = %server,
                    computed = %effective,
                    "Server finalPrice disagrees with local price resolution; using local value"
                );
            }
        }

        Ok(Product {
            server_final_price: resp.final_price,
            ..product
        })
    }
}

impl From<&ProductDraft> for ProductBody {
    fn from(draft: &ProductDraft) -> Self {
        ProductBody {
            name: draft.name.trim().to_string(),
            price: draft.price,
            discount_type: draft.discount.kind().to_string(),
            discount_value: draft.discount.value(),
        }
    }
}

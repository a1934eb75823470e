//! Order totals over a cart, resolved against a product lookup.
//!
//! Unit prices stay unrounded everywhere, snapshots included. The only rounding
//! point is [`round_currency`] applied to a finished sum, so a placed order's
//! lines always add up to its total.

use super::Cart;
use crate::domain::order::OrderLine;
use crate::domain::product::ProductLookup;
use crate::error::PricingError;
use crate::shared::{round_currency, ProductId};
use rust_decimal::Decimal;

/// Sum of `effective_price * quantity` over every cart line.
///
/// Unit prices are summed unrounded and the result is rounded to the currency
/// unit once. A line whose product the lookup cannot resolve fails the whole
/// computation with [`PricingError::UnknownProduct`].
pub fn order_total<L>(cart: &Cart, lookup: &L) -> Result<Decimal, PricingError>
where
    L: ProductLookup + ?Sized,
{
    let mut total = Decimal::ZERO;
    for line in cart.lines() {
        let price = lookup
            .effective_price(&line.product_id)
            .ok_or_else(|| PricingError::UnknownProduct(line.product_id.clone()))??;
        total = accumulate(total, &line.product_id, price, line.quantity)?;
    }
    Ok(round_currency(total))
}

/// Total of already-frozen order lines, rounded once.
///
/// Agrees with [`order_total`] for snapshots taken from the same cart and
/// lookup.
pub fn lines_total(lines: &[OrderLine]) -> Result<Decimal, PricingError> {
    let mut total = Decimal::ZERO;
    for line in lines {
        total = accumulate(total, &line.product_id, line.price, line.quantity)?;
    }
    Ok(round_currency(total))
}

/// Freeze each cart line into an [`OrderLine`] with the product's current
/// name and unrounded effective unit price.
pub fn line_snapshots<L>(cart: &Cart, lookup: &L) -> Result<Vec<OrderLine>, PricingError>
where
    L: ProductLookup + ?Sized,
{
    cart.lines()
        .iter()
        .map(|line| {
            let product = lookup
                .product(&line.product_id)
                .ok_or_else(|| PricingError::UnknownProduct(line.product_id.clone()))?;
            Ok(OrderLine {
                product_id: product.id.clone(),
                product_name: product.name.clone(),
                quantity: line.quantity,
                price: product.effective_price()?,
            })
        })
        .collect()
}

fn accumulate(
    total: Decimal,
    product_id: &ProductId,
    price: Decimal,
    quantity: u32,
) -> Result<Decimal, PricingError> {
    price
        .checked_mul(Decimal::from(quantity))
        .and_then(|amount| total.checked_add(amount))
        .ok_or_else(|| PricingError::AmountOverflow(format!("order total at {}", product_id)))
}

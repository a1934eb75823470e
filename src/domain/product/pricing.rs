//! Price resolution: base price + discount rule → effective unit price.

use crate::error::PricingError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A product's discount.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiscountRule {
    #[default]
    None,
    /// Percent off, `0..=100`.
    Percentage(Decimal),
    /// Currency amount off the unit price, `>= 0`.
    FixedAmount(Decimal),
}

impl DiscountRule {
    /// Build a percentage rule, rejecting values outside `0..=100`.
    pub fn percentage(value: Decimal) -> Result<Self, PricingError> {
        let rule = DiscountRule::Percentage(value);
        rule.validate()?;
        Ok(rule)
    }

    /// Build a fixed-amount rule, rejecting negative amounts.
    pub fn fixed_amount(value: Decimal) -> Result<Self, PricingError> {
        let rule = DiscountRule::FixedAmount(value);
        rule.validate()?;
        Ok(rule)
    }

    /// Wire tag used by the backend's `discountType` field.
    pub fn kind(&self) -> &'static str {
        match self {
            DiscountRule::None => "none",
            DiscountRule::Percentage(_) => "percentage",
            DiscountRule::FixedAmount(_) => "fixed",
        }
    }

    /// Numeric part for the backend's `discountValue` field.
    pub fn value(&self) -> Decimal {
        match self {
            DiscountRule::None => Decimal::ZERO,
            DiscountRule::Percentage(v) | DiscountRule::FixedAmount(v) => *v,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, DiscountRule::None)
    }

    /// Badge text shown next to a discounted product (`20% OFF`, `Rs.150 OFF`).
    pub fn badge(&self) -> Option<String> {
        match self {
            DiscountRule::None => None,
            DiscountRule::Percentage(p) => Some(format!("{}% OFF", p.normalize())),
            DiscountRule::FixedAmount(a) => Some(format!("Rs.{} OFF", a.normalize())),
        }
    }

    /// Check the rule's own value range.
    pub fn validate(&self) -> Result<(), PricingError> {
        match self {
            DiscountRule::None => Ok(()),
            DiscountRule::Percentage(p) if p.is_sign_negative() && !p.is_zero() => Err(
                PricingError::InvalidDiscountInput(format!("negative percentage {}", p)),
            ),
            DiscountRule::Percentage(p) if *p > Decimal::ONE_HUNDRED => Err(
                PricingError::InvalidDiscountInput(format!("percentage {} exceeds 100", p)),
            ),
            DiscountRule::Percentage(_) => Ok(()),
            DiscountRule::FixedAmount(a) if a.is_sign_negative() && !a.is_zero() => Err(
                PricingError::InvalidDiscountInput(format!("negative fixed amount {}", a)),
            ),
            DiscountRule::FixedAmount(_) => Ok(()),
        }
    }

    /// Catalog-edit validation: on top of [`validate`](Self::validate), a fixed
    /// amount may not exceed the base price it is attached to.
    pub fn validate_for(&self, base_price: Decimal) -> Result<(), PricingError> {
        check_base_price(base_price)?;
        self.validate()?;
        if let DiscountRule::FixedAmount(a) = self {
            if *a > base_price {
                return Err(PricingError::InvalidDiscountInput(format!(
                    "fixed amount {} exceeds base price {}",
                    a, base_price
                )));
            }
        }
        Ok(())
    }
}

fn check_base_price(base_price: Decimal) -> Result<(), PricingError> {
    if base_price.is_sign_negative() && !base_price.is_zero() {
        return Err(PricingError::InvalidDiscountInput(format!(
            "negative base price {}",
            base_price
        )));
    }
    Ok(())
}

/// Effective (post-discount) unit price. Pure; no rounding is applied.
///
/// - `None` → `base_price`
/// - `Percentage(p)` → `base_price * (1 - p/100)`, never below zero
/// - `FixedAmount(a)` → `max(0, base_price - a)`
pub fn resolve_effective_price(
    base_price: Decimal,
    rule: &DiscountRule,
) -> Result<Decimal, PricingError> {
    check_base_price(base_price)?;
    rule.validate()?;

    let effective = match rule {
        DiscountRule::None => return Ok(base_price),
        DiscountRule::Percentage(p) => (Decimal::ONE - *p / Decimal::ONE_HUNDRED)
            .checked_mul(base_price)
            .ok_or_else(|| {
                PricingError::AmountOverflow(format!("{}% off {}", p, base_price))
            })?,
        DiscountRule::FixedAmount(a) => base_price - *a,
    };

    Ok(effective.max(Decimal::ZERO))
}

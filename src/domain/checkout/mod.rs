//! Checkout domain — the three-step storefront flow as an explicit state machine.
//!
//! [`CheckoutMachine`] is pure: each transition validates, updates local state
//! and hands back the remote call to make as a [`CheckoutCommand`]. The
//! caller executes the command and reports the result back
//! (`draft_created` / `draft_failed`, `submission_accepted` /
//! `submission_failed`, ...). [`session::CheckoutSession`] does exactly that
//! against a [`SalonClient`](crate::client::SalonClient).

mod machine;
pub mod payment;
#[cfg(feature = "http")]
pub mod session;

pub use machine::CheckoutMachine;
pub use payment::{PaymentOutcome, PaymentParams, PaymentResult};

use crate::domain::order::wire::{CreateDraftRequest, SubmitOrderRequest};
use crate::domain::order::{OrderStatus, PaymentMethod};
use crate::shared::OrderId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where the customer is in the flow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CheckoutStep {
    /// Contact details form.
    #[default]
    Details,
    /// Informational step between details and the catalog.
    Upsell,
    /// Product selection, payment method and submission.
    Catalog,
}

impl CheckoutStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutStep::Details => "details",
            CheckoutStep::Upsell => "upsell",
            CheckoutStep::Catalog => "catalog",
        }
    }

    /// 1-based position, for "Step n of 3" indicators.
    pub fn number(&self) -> u8 {
        match self {
            CheckoutStep::Details => 1,
            CheckoutStep::Upsell => 2,
            CheckoutStep::Catalog => 3,
        }
    }
}

impl fmt::Display for CheckoutStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A remote call the machine needs made. Each one is emitted exactly once per
/// user action and must be answered before the machine accepts another.
#[derive(Debug, Clone, PartialEq)]
pub enum CheckoutCommand {
    CreateDraft(CreateDraftRequest),
    SubmitOrder(SubmitOrderRequest),
    UpdateStatus {
        order_id: OrderId,
        status: OrderStatus,
    },
}

/// How a successful submission ended.
#[derive(Debug, Clone, PartialEq)]
pub enum CheckoutOutcome {
    /// Cash on delivery: nothing left to do.
    Placed { order_id: Option<OrderId> },
    /// Online: hand `params` to the payment gateway, then report its outcome.
    AwaitingPayment {
        order_id: Option<OrderId>,
        params: PaymentParams,
    },
}

impl CheckoutOutcome {
    pub fn order_id(&self) -> Option<&OrderId> {
        match self {
            CheckoutOutcome::Placed { order_id } => order_id.as_ref(),
            CheckoutOutcome::AwaitingPayment { order_id, .. } => order_id.as_ref(),
        }
    }
}

/// What the machine remembers about a submitted order.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedOrder {
    pub order_id: Option<OrderId>,
    pub payment_method: PaymentMethod,
    pub total_amount: Decimal,
    /// Last known status; `None` until the backend or a payment report says.
    pub status: Option<OrderStatus>,
}

impl PlacedOrder {
    /// Online order whose gateway outcome has not been recorded yet.
    pub fn awaiting_payment(&self) -> bool {
        self.payment_method.requires_gateway()
            && !matches!(
                self.status,
                Some(OrderStatus::Paid) | Some(OrderStatus::PaymentFailed)
            )
    }
}

//! Payment-gateway collaborator types.
//!
//! The gateway itself is external: the SDK hands it an opaque parameter bag
//! and is told about exactly one of three outcomes.

use crate::domain::order::OrderStatus;
use serde::{Deserialize, Serialize};

/// Opaque gateway parameters returned by an online order submission.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaymentParams(serde_json::Map<String, serde_json::Value>);

impl PaymentParams {
    pub fn new(params: serde_json::Map<String, serde_json::Value>) -> Self {
        Self(params)
    }

    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.0.get(key)
    }

    /// Gateway-side order reference, when the bag carries one.
    pub fn gateway_order_id(&self) -> Option<&str> {
        self.0.get("order_id").and_then(|v| v.as_str())
    }

    pub fn as_map(&self) -> &serde_json::Map<String, serde_json::Value> {
        &self.0
    }

    pub fn into_inner(self) -> serde_json::Map<String, serde_json::Value> {
        self.0
    }
}

/// What the gateway reported back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentOutcome {
    Completed { gateway_order_id: String },
    Dismissed,
    Error { message: String },
}

impl PaymentOutcome {
    /// The status the order moves to after this outcome.
    pub fn resulting_status(&self) -> OrderStatus {
        match self {
            PaymentOutcome::Completed { .. } => OrderStatus::Paid,
            PaymentOutcome::Dismissed | PaymentOutcome::Error { .. } => OrderStatus::PaymentFailed,
        }
    }

    pub fn result(&self) -> PaymentResult {
        match self {
            PaymentOutcome::Completed { .. } => PaymentResult::Success,
            PaymentOutcome::Dismissed | PaymentOutcome::Error { .. } => PaymentResult::Cancelled,
        }
    }
}

/// The customer-facing result page shown after checkout ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentResult {
    Success,
    Cancelled,
}

impl PaymentResult {
    /// Derive the result from a return path such as `/payment/success`.
    pub fn from_path(path: &str) -> Self {
        if path.contains("success") {
            PaymentResult::Success
        } else {
            PaymentResult::Cancelled
        }
    }

    pub fn headline(&self) -> &'static str {
        match self {
            PaymentResult::Success => "Payment Successful!",
            PaymentResult::Cancelled => "Payment Cancelled",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            PaymentResult::Success => "Thank you for your order. We will process it shortly.",
            PaymentResult::Cancelled => {
                "Your payment was cancelled. Your order has not been completed."
            }
        }
    }

    /// Whether the page offers a retry.
    pub fn can_retry(&self) -> bool {
        matches!(self, PaymentResult::Cancelled)
    }
}

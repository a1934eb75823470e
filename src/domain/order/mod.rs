//! Order domain — contact details, statuses, line snapshots, placed orders.

#[cfg(feature = "http")]
pub mod client;
mod convert;
pub mod wire;

use crate::shared::{OrderId, ProductId, SalonId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ─── ContactDetails ──────────────────────────────────────────────────────────

/// Customer contact fields collected in the first checkout step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDetails {
    pub customer_name: String,
    pub customer_phone: String,
    pub additional_phone: Option<String>,
    pub address: String,
    pub city: String,
}

impl ContactDetails {
    pub fn new(
        customer_name: impl Into<String>,
        customer_phone: impl Into<String>,
        address: impl Into<String>,
        city: impl Into<String>,
    ) -> Self {
        Self {
            customer_name: customer_name.into(),
            customer_phone: customer_phone.into(),
            additional_phone: None,
            address: address.into(),
            city: city.into(),
        }
    }

    pub fn with_additional_phone(mut self, phone: impl Into<String>) -> Self {
        self.additional_phone = Some(phone.into());
        self
    }

    /// Names of required fields that are empty (whitespace counts as empty).
    pub fn missing_required_fields(&self) -> Vec<&'static str> {
        [
            ("name", &self.customer_name),
            ("phone", &self.customer_phone),
            ("address", &self.address),
            ("city", &self.city),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing_required_fields().is_empty()
    }

    /// Trimmed copy; a blank secondary phone becomes `None`.
    pub fn normalized(&self) -> Self {
        Self {
            customer_name: self.customer_name.trim().to_string(),
            customer_phone: self.customer_phone.trim().to_string(),
            additional_phone: self
                .additional_phone
                .as_deref()
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(str::to_string),
            address: self.address.trim().to_string(),
            city: self.city.trim().to_string(),
        }
    }
}

// ─── PaymentMethod ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[default]
    Online,
    #[serde(rename = "Cash on Delivery")]
    CashOnDelivery,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Online => "Online",
            PaymentMethod::CashOnDelivery => "Cash on Delivery",
        }
    }

    /// Whether placing the order hands control to the payment gateway.
    pub fn requires_gateway(&self) -> bool {
        matches!(self, PaymentMethod::Online)
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = OrderConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match squash(s).as_str() {
            "online" => Ok(PaymentMethod::Online),
            "cashondelivery" | "cod" => Ok(PaymentMethod::CashOnDelivery),
            _ => Err(OrderConversionError::UnknownPaymentMethod(s.to_string())),
        }
    }
}

// ─── OrderStatus ─────────────────────────────────────────────────────────────

/// Order lifecycle status.
///
/// Status changes only through the remote order service; locally the only
/// derived transition is the one following a payment-gateway callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    #[serde(rename = "Pending Payment")]
    PendingPayment,
    Processing,
    Shipped,
    Completed,
    Returned,
    Cancelled,
    Paid,
    #[serde(rename = "Payment Failed")]
    PaymentFailed,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 8] = [
        OrderStatus::PendingPayment,
        OrderStatus::Processing,
        OrderStatus::Shipped,
        OrderStatus::Completed,
        OrderStatus::Returned,
        OrderStatus::Cancelled,
        OrderStatus::Paid,
        OrderStatus::PaymentFailed,
    ];

    /// Statuses offered in the admin console's status picker.
    pub fn admin_selectable() -> &'static [OrderStatus] {
        &Self::ALL[..6]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::PendingPayment => "Pending Payment",
            OrderStatus::Processing => "Processing",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Completed => "Completed",
            OrderStatus::Returned => "Returned",
            OrderStatus::Cancelled => "Cancelled",
            OrderStatus::Paid => "Paid",
            OrderStatus::PaymentFailed => "Payment Failed",
        }
    }

    /// Short label used by the status picker.
    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::PendingPayment => "Pending",
            other => other.as_str(),
        }
    }

    /// Statuses for which dashboards show the date the status was reached.
    pub fn shows_status_date(&self) -> bool {
        matches!(self, OrderStatus::Returned | OrderStatus::Cancelled)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = OrderConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match squash(s).as_str() {
            "pendingpayment" | "pending" => Ok(OrderStatus::PendingPayment),
            "processing" => Ok(OrderStatus::Processing),
            "shipped" => Ok(OrderStatus::Shipped),
            "completed" => Ok(OrderStatus::Completed),
            "returned" => Ok(OrderStatus::Returned),
            "cancelled" | "canceled" => Ok(OrderStatus::Cancelled),
            "paid" => Ok(OrderStatus::Paid),
            "paymentfailed" => Ok(OrderStatus::PaymentFailed),
            _ => Err(OrderConversionError::UnknownStatus(s.to_string())),
        }
    }
}

fn squash(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OrderConversionError {
    #[error("Unknown order status: {0:?}")]
    UnknownStatus(String),
    #[error("Unknown payment method: {0:?}")]
    UnknownPaymentMethod(String),
    #[error("Order has no id")]
    MissingId,
}

// ─── OrderLine ───────────────────────────────────────────────────────────────

/// A line item frozen at submission time.
///
/// Name and price are copied from the catalog when the order is placed, so
/// later catalog edits never alter a placed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub product_id: ProductId,
    pub product_name: String,
    pub quantity: u32,
    pub price: Decimal,
}

impl OrderLine {
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

// ─── Order ───────────────────────────────────────────────────────────────────

/// An order as held by the backend, either a draft (contact only) or finalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub merchant_order_id: Option<String>,
    pub salon_id: Option<SalonId>,
    pub salon_name: Option<String>,
    pub contact: ContactDetails,
    pub lines: Vec<OrderLine>,
    pub total_amount: Decimal,
    pub payment_method: Option<PaymentMethod>,
    pub status: OrderStatus,
    pub created_at: Option<DateTime<Utc>>,
    pub status_date: Option<DateTime<Utc>>,
}

impl Order {
    /// A draft holds contact details only; line items arrive on submission.
    pub fn is_draft(&self) -> bool {
        self.lines.is_empty()
    }

    /// Human-facing order reference: the merchant order id if assigned,
    /// otherwise the last six characters of the id, upper-cased.
    pub fn display_reference(&self) -> String {
        if let Some(merchant) = self.merchant_order_id.as_deref().filter(|m| !m.is_empty()) {
            return merchant.to_string();
        }
        let id = self.id.as_str();
        let start = id
            .char_indices()
            .rev()
            .nth(5)
            .map(|(i, _)| i)
            .unwrap_or(0);
        id[start..].to_uppercase()
    }

    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Case-insensitive search over salon, customer, phones and product names.
    /// An empty term matches everything.
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return true;
        }
        let hit = |s: &str| s.to_lowercase().contains(&term);

        self.salon_name.as_deref().is_some_and(hit)
            || hit(&self.contact.customer_name)
            || hit(&self.contact.customer_phone)
            || self.contact.additional_phone.as_deref().is_some_and(hit)
            || self.lines.iter().any(|l| hit(&l.product_name))
    }
}

//! Unified SDK error types.

use crate::shared::ProductId;
use thiserror::Error;

/// Top-level SDK error.
#[derive(Error, Debug)]
pub enum SdkError {
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    #[error("Pricing error: {0}")]
    Pricing(#[from] PricingError),

    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

/// HTTP-layer errors.
#[derive(Error, Debug)]
pub enum HttpError {
    #[cfg(feature = "http")]
    #[error("Request failed: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Server error {status}: {body}")]
    ServerError { status: u16, body: String },

    #[error("Rate limited (retry after {retry_after_ms:?}ms)")]
    RateLimited { retry_after_ms: Option<u64> },

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The backend answered 2xx but with `success: false` in its envelope.
    #[error("API rejected request: {message}")]
    Api { message: String },

    #[error("Malformed response: {0}")]
    Decode(String),

    #[error("Timeout")]
    Timeout,

    #[error("Max retries exceeded after {attempts} attempts: {last_error}")]
    MaxRetriesExceeded { attempts: u32, last_error: String },
}

/// Authentication errors.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Admin session required")]
    AdminRequired,

    #[error("Login failed: {0}")]
    LoginFailed(String),
}

/// Errors from price resolution and order totals.
///
/// Both are data errors: the computation is rejected, never defaulted.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PricingError {
    #[error("Invalid discount input: {0}")]
    InvalidDiscountInput(String),

    #[error("Unknown product: {0}")]
    UnknownProduct(ProductId),

    #[error("Amount out of range: {0}")]
    AmountOverflow(String),
}

/// Which remote call of the checkout flow failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteStage {
    DraftCreation,
    Submission,
    StatusUpdate,
}

impl std::fmt::Display for RemoteStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RemoteStage::DraftCreation => write!(f, "draft creation"),
            RemoteStage::Submission => write!(f, "order submission"),
            RemoteStage::StatusUpdate => write!(f, "status update"),
        }
    }
}

/// Checkout flow errors. All of them leave the checkout state unchanged.
#[derive(Error, Debug)]
pub enum CheckoutError {
    #[error("Missing required fields: {}", .missing.join(", "))]
    ValidationFailure { missing: Vec<&'static str> },

    #[error("Cannot submit an order with an empty cart")]
    EmptyCartSubmission,

    #[error("Remote {stage} failed: {source}")]
    RemoteRequestFailure {
        stage: RemoteStage,
        #[source]
        source: HttpError,
    },

    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    #[error("A checkout request is already in flight")]
    RequestInFlight,

    #[error("Order already submitted")]
    AlreadySubmitted,

    #[error(transparent)]
    Pricing(#[from] PricingError),
}

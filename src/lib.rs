//! # salon-orders
//!
//! Rust SDK for the multi-tenant salon ordering backend: price resolution,
//! order totals, the three-step storefront checkout, and typed clients for
//! the admin console and salon dashboards.
//!
//! ## Architecture
//!
//! The SDK is organized in layers:
//!
//! 1. **Core** — Shared ids, money helpers, domain models, pricing, cart totals
//!    and the checkout state machine (always available, no I/O)
//! 2. **Auth** — Explicit [`auth::Session`] plus pluggable session stores
//! 3. **HTTP API** — `SalonHttp` with per-endpoint retry policies
//! 4. **High-Level Client** — `SalonClient` with nested sub-clients
//! 5. **Checkout driver** — `CheckoutSession` running checkout commands
//!    against the backend
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use salon_orders::prelude::*;
//!
//! let client = SalonClientBuilder::from_env().build()?;
//! let catalog = client.products().list().await?;
//!
//! let mut checkout = CheckoutSession::new(&client, SalonId::from("65f0c2"));
//! checkout.set_contact(ContactDetails::new("Nimali", "0771234567", "12 Temple Rd", "Kandy"))?;
//! checkout.advance().await?; // creates the draft order
//! checkout.advance().await?;
//! checkout.machine_mut().cart_mut()?.set(ProductId::from("serum"), 3);
//! match checkout.submit(&catalog).await? {
//!     CheckoutOutcome::Placed { .. } => {}
//!     CheckoutOutcome::AwaitingPayment { params, .. } => { /* open the gateway */ }
//! }
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Shared newtypes and money helpers used across all domains.
pub mod shared;

/// Domain modules (vertical slices): types, wire types, conversions.
pub mod domain;

/// Unified SDK error types.
pub mod error;

/// Deployment URLs and environment overrides.
pub mod network;

// ── Layer 2: Auth ────────────────────────────────────────────────────────────

/// Login sessions and session stores.
pub mod auth;

// ── Layer 3: HTTP API ────────────────────────────────────────────────────────

/// HTTP client with retry policies.
#[cfg(feature = "http")]
pub mod http;

// ── Layer 4: High-Level Client ───────────────────────────────────────────────

/// `SalonClient` — the primary entry point.
#[cfg(feature = "http")]
pub mod client;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Shared newtypes
    pub use crate::shared::{format_rupees, round_currency, OrderId, ProductId, SalonId};

    // Pricing + catalog
    pub use crate::domain::product::{
        resolve_effective_price, Catalog, DiscountRule, Product, ProductDraft, ProductLookup,
    };

    // Cart + totals
    pub use crate::domain::cart::{line_snapshots, lines_total, order_total, Cart, CartLine};

    // Orders
    pub use crate::domain::order::{ContactDetails, Order, OrderLine, OrderStatus, PaymentMethod};

    // Checkout + payment
    pub use crate::domain::checkout::{
        CheckoutCommand, CheckoutMachine, CheckoutOutcome, CheckoutStep, PaymentOutcome,
        PaymentParams, PaymentResult, PlacedOrder,
    };

    // Salons + analytics
    pub use crate::domain::analytics::{ItemPerformance, SalonPerformance};
    pub use crate::domain::salon::{CreatedSalon, Salon, SalonCredentials, SalonDraft};

    // Errors
    pub use crate::error::{
        AuthError, CheckoutError, HttpError, PricingError, RemoteStage, SdkError,
    };

    // Network
    pub use crate::network::{DEFAULT_API_URL, DEFAULT_STOREFRONT_URL};

    // Auth
    pub use crate::auth::{FileSessionStore, MemorySessionStore, Session, SessionStore};

    // HTTP client + sub-clients
    #[cfg(feature = "http")]
    pub use crate::client::{
        AnalyticsClient, AuthClient, OrdersClient, ProductsClient, SalonClient,
        SalonClientBuilder, SalonsClient,
    };
    #[cfg(feature = "http")]
    pub use crate::domain::checkout::session::CheckoutSession;
    #[cfg(feature = "http")]
    pub use crate::http::retry::{RetryConfig, RetryPolicy};
}

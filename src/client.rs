//! High-level client — `SalonClient` with nested sub-client accessors.
//!
//! Each domain has its own sub-client in `domain/<name>/client.rs`.
//! This module keeps the builder, the shared session, and accessor methods.

use crate::auth::client::Auth;
use crate::auth::Session;
use crate::domain::analytics::client::Analytics;
use crate::domain::order::client::Orders;
use crate::domain::product::client::Products;
use crate::domain::salon::client::Salons;
use crate::error::SdkError;
use crate::http::{RetryConfig, SalonHttp};
use crate::network;
use crate::shared::SalonId;

use async_lock::RwLock;
use std::sync::Arc;
use std::time::Duration;

// Re-export sub-client types for convenience.
pub use crate::auth::client::Auth as AuthClient;
pub use crate::domain::analytics::client::Analytics as AnalyticsClient;
pub use crate::domain::order::client::Orders as OrdersClient;
pub use crate::domain::product::client::Products as ProductsClient;
pub use crate::domain::salon::client::Salons as SalonsClient;

/// The primary entry point for the SDK.
///
/// Provides nested sub-client accessors for each domain:
/// `client.products()`, `client.orders()`, etc. Cloning is cheap and clones
/// share the session.
pub struct SalonClient {
    pub(crate) http: SalonHttp,
    pub(crate) storefront_url: String,
    pub(crate) session: Arc<RwLock<Option<Session>>>,
}

impl SalonClient {
    pub fn builder() -> SalonClientBuilder {
        SalonClientBuilder::default()
    }

    // ── Sub-client accessors ─────────────────────────────────────────────

    pub fn products(&self) -> Products<'_> {
        Products { client: self }
    }

    pub fn orders(&self) -> Orders<'_> {
        Orders { client: self }
    }

    pub fn salons(&self) -> Salons<'_> {
        Salons { client: self }
    }

    pub fn analytics(&self) -> Analytics<'_> {
        Analytics { client: self }
    }

    pub fn auth(&self) -> Auth<'_> {
        Auth { client: self }
    }

    pub fn base_url(&self) -> &str {
        self.http.base_url()
    }

    pub fn storefront_url(&self) -> &str {
        &self.storefront_url
    }

    /// Storefront link for a salon, as encoded into its QR code.
    pub fn order_page_url(&self, salon_id: &SalonId) -> String {
        crate::domain::salon::order_page_url(&self.storefront_url, salon_id)
    }
}

impl Clone for SalonClient {
    fn clone(&self) -> Self {
        Self {
            http: self.http.clone(),
            storefront_url: self.storefront_url.clone(),
            session: self.session.clone(),
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

pub struct SalonClientBuilder {
    base_url: String,
    storefront_url: String,
    timeout: Duration,
    retry: RetryConfig,
    session: Option<Session>,
}

impl Default for SalonClientBuilder {
    fn default() -> Self {
        Self {
            base_url: network::DEFAULT_API_URL.to_string(),
            storefront_url: network::DEFAULT_STOREFRONT_URL.to_string(),
            timeout: Duration::from_secs(network::DEFAULT_TIMEOUT_SECS),
            retry: RetryConfig::idempotent(),
            session: None,
        }
    }
}

impl SalonClientBuilder {
    /// Defaults, overridden by `SALON_API_URL` / `SALON_STOREFRONT_URL` when set.
    pub fn from_env() -> Self {
        let mut builder = Self::default();
        if let Some(url) = env_url(network::API_URL_ENV) {
            builder.base_url = url;
        }
        if let Some(url) = env_url(network::STOREFRONT_URL_ENV) {
            builder.storefront_url = url;
        }
        builder
    }

    pub fn base_url(mut self, url: &str) -> Self {
        self.base_url = url.to_string();
        self
    }

    pub fn storefront_url(mut self, url: &str) -> Self {
        self.storefront_url = url.trim_end_matches('/').to_string();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Retry config for reads. Writes are never retried.
    pub fn retry(mut self, config: RetryConfig) -> Self {
        self.retry = config;
        self
    }

    /// Start with an existing session, e.g. one loaded from a `SessionStore`.
    pub fn session(mut self, session: Session) -> Self {
        self.session = Some(session);
        self
    }

    pub fn build(self) -> Result<SalonClient, SdkError> {
        if self.base_url.trim().is_empty() {
            return Err(SdkError::Validation("API base URL is empty".to_string()));
        }
        let token = self
            .session
            .as_ref()
            .and_then(Session::token)
            .map(str::to_string);

        Ok(SalonClient {
            http: SalonHttp::new(&self.base_url, self.timeout)?
                .with_idempotent_retry(self.retry)
                .with_auth_token(token),
            storefront_url: self.storefront_url,
            session: Arc::new(RwLock::new(self.session)),
        })
    }
}

fn env_url(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().trim_end_matches('/').to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let client = SalonClient::builder().build().unwrap();
        assert_eq!(client.base_url(), network::DEFAULT_API_URL);
        assert_eq!(
            client.order_page_url(&SalonId::from("s1")),
            "https://fadna-salon.onrender.com/order/s1"
        );
    }

    #[test]
    fn test_empty_base_url_rejected() {
        assert!(matches!(
            SalonClient::builder().base_url(" ").build(),
            Err(SdkError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_builder_session_installs_token() {
        let client = SalonClient::builder()
            .base_url("http://localhost:5000/api")
            .session(Session::Admin {
                token: "jwt".to_string(),
            })
            .build()
            .unwrap();
        assert!(client.http.has_auth_token().await);
        assert!(client.auth().is_admin().await);
    }
}

//! Deployment URLs and the environment variables that override them.

/// Default REST API base URL.
pub const DEFAULT_API_URL: &str = "https://salonfadna-backend.onrender.com/api";

/// Public storefront; salon QR codes point at `{storefront}/order/{salonId}`.
pub const DEFAULT_STOREFRONT_URL: &str = "https://fadna-salon.onrender.com";

pub const API_URL_ENV: &str = "SALON_API_URL";

pub const STOREFRONT_URL_ENV: &str = "SALON_STOREFRONT_URL";

/// Request timeout. Generous because the backend host cold-starts.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

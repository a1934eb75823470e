//! HTTP client layer — `SalonHttp` with per-endpoint retry policies.

pub mod client;
pub mod retry;

pub use client::SalonHttp;
pub use retry::{RetryConfig, RetryPolicy};

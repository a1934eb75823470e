//! Low-level HTTP client — `SalonHttp`.
//!
//! Sub-clients build endpoint URLs from [`SalonHttp::base_url`] and call the
//! verb helpers here with a per-endpoint [`RetryPolicy`]. Responses come back
//! as wire types; conversion to domain types happens in the sub-clients.

use crate::error::HttpError;
use crate::http::retry::{RetryConfig, RetryPolicy};

use async_lock::RwLock;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

/// Low-level HTTP client for the salon ordering API.
pub struct SalonHttp {
    base_url: String,
    client: Client,
    /// Read-retry config behind [`RetryPolicy::Idempotent`].
    idempotent: RetryConfig,
    /// Admin bearer token. Never exposed publicly.
    auth_token: Arc<RwLock<Option<String>>>,
}

impl SalonHttp {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, HttpError> {
        let client = Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(10)
            .build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            idempotent: RetryConfig::idempotent(),
            auth_token: Arc::new(RwLock::new(None)),
        })
    }

    pub(crate) fn with_idempotent_retry(mut self, config: RetryConfig) -> Self {
        self.idempotent = config;
        self
    }

    pub(crate) fn with_auth_token(mut self, token: Option<String>) -> Self {
        self.auth_token = Arc::new(RwLock::new(token));
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) async fn set_auth_token(&self, token: Option<String>) {
        *self.auth_token.write().await = token;
    }

    pub(crate) async fn clear_auth_token(&self) {
        *self.auth_token.write().await = None;
    }

    #[cfg(test)]
    pub(crate) async fn has_auth_token(&self) -> bool {
        self.auth_token.read().await.is_some()
    }

    // ── Verb helpers ─────────────────────────────────────────────────────

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        url: &str,
        retry: RetryPolicy,
    ) -> Result<T, HttpError> {
        self.request_with_retry(reqwest::Method::GET, url, None::<&()>, retry)
            .await
    }

    pub(crate) async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        url: &str,
        body: &B,
        retry: RetryPolicy,
    ) -> Result<T, HttpError> {
        self.request_with_retry(reqwest::Method::POST, url, Some(body), retry)
            .await
    }

    pub(crate) async fn put<T: DeserializeOwned, B: Serialize>(
        &self,
        url: &str,
        body: &B,
        retry: RetryPolicy,
    ) -> Result<T, HttpError> {
        self.request_with_retry(reqwest::Method::PUT, url, Some(body), retry)
            .await
    }

    pub(crate) async fn delete<T: DeserializeOwned>(
        &self,
        url: &str,
        retry: RetryPolicy,
    ) -> Result<T, HttpError> {
        self.request_with_retry(reqwest::Method::DELETE, url, None::<&()>, retry)
            .await
    }

    // ── Internals ────────────────────────────────────────────────────────

    async fn request_with_retry<T: DeserializeOwned, B: Serialize>(
        &self,
        method: reqwest::Method,
        url: &str,
        body: Option<&B>,
        retry: RetryPolicy,
    ) -> Result<T, HttpError> {
        let config = match retry {
            RetryPolicy::None => return self.do_request(&method, url, body).await,
            RetryPolicy::Idempotent => self.idempotent.clone(),
            RetryPolicy::Custom(c) => c,
        };

        let mut last_error = None;

        for attempt in 0..=config.max_retries {
            match self.do_request::<T, B>(&method, url, body).await {
                Ok(resp) => return Ok(resp),
                Err(e) if config.should_retry(&e) => {
                    if attempt == config.max_retries {
                        last_error = Some(e);
                        break;
                    }
                    let delay = config.delay_for(attempt, &e);
                    tracing::debug!(
                        attempt = attempt + 1,
                        max = config.max_retries,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "Retrying {} {}",
                        method,
                        url
                    );
                    futures_timer::Delay::new(delay).await;
                    last_error = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        Err(HttpError::MaxRetriesExceeded {
            attempts: config.max_retries + 1,
            last_error: last_error
                .map(|e| e.to_string())
                .unwrap_or_else(|| "unknown".to_string()),
        })
    }

    async fn do_request<T: DeserializeOwned, B: Serialize>(
        &self,
        method: &reqwest::Method,
        url: &str,
        body: Option<&B>,
    ) -> Result<T, HttpError> {
        let mut req = self.client.request(method.clone(), url);

        if let Some(token) = self.auth_token.read().await.as_ref() {
            req = req.bearer_auth(token);
        }
        if let Some(b) = body {
            req = req.json(b);
        }

        tracing::debug!("{} {}", method, url);
        let resp = req.send().await.map_err(transport_error)?;
        let status = resp.status();
        let retry_after_ms = resp
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok())
            .map(|secs| secs.saturating_mul(1_000));
        let text = resp.text().await.map_err(transport_error)?;

        if status.is_success() {
            return decode_envelope(&text);
        }

        let status_code = status.as_u16();
        let message = error_message(&text)
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("").to_string());

        match status_code {
            401 => Err(HttpError::Unauthorized),
            403 => Err(HttpError::Forbidden(message)),
            404 => Err(HttpError::NotFound(message)),
            429 => Err(HttpError::RateLimited { retry_after_ms }),
            400..=499 => Err(HttpError::BadRequest(message)),
            _ => Err(HttpError::ServerError {
                status: status_code,
                body: message,
            }),
        }
    }
}

impl Clone for SalonHttp {
    fn clone(&self) -> Self {
        Self {
            base_url: self.base_url.clone(),
            client: self.client.clone(),
            idempotent: self.idempotent.clone(),
            auth_token: self.auth_token.clone(),
        }
    }
}

fn transport_error(e: reqwest::Error) -> HttpError {
    if e.is_timeout() {
        HttpError::Timeout
    } else {
        HttpError::Reqwest(e)
    }
}

/// Decode a 2xx body. The backend wraps payloads in `{ success, ... }`; a
/// `success: false` is a rejection even though the status was 2xx.
fn decode_envelope<T: DeserializeOwned>(text: &str) -> Result<T, HttpError> {
    let value: Value = if text.trim().is_empty() {
        Value::Null
    } else {
        serde_json::from_str(text).map_err(|e| HttpError::Decode(e.to_string()))?
    };

    if value.get("success").and_then(Value::as_bool) == Some(false) {
        return Err(HttpError::Api {
            message: message_field(&value).unwrap_or_else(|| "Request rejected".to_string()),
        });
    }

    serde_json::from_value(value).map_err(|e| HttpError::Decode(e.to_string()))
}

/// Human-readable message from an error body: `message`, then `error`, then
/// the raw text.
fn error_message(text: &str) -> Option<String> {
    match serde_json::from_str::<Value>(text) {
        Ok(value) => message_field(&value),
        Err(_) => Some(text.trim().to_string()).filter(|t| !t.is_empty()),
    }
}

fn message_field(value: &Value) -> Option<String> {
    ["message", "error"]
        .iter()
        .find_map(|key| value.get(*key).and_then(Value::as_str))
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, serde::Deserialize)]
    struct Products {
        products: Vec<Value>,
    }

    #[test]
    fn test_envelope_success_decodes_payload() {
        let p: Products = decode_envelope(r#"{"success": true, "products": [{}]}"#).unwrap();
        assert_eq!(p.products.len(), 1);
    }

    #[test]
    fn test_envelope_failure_is_api_error() {
        let err = decode_envelope::<Value>(r#"{"success": false, "message": "Salon not found"}"#)
            .unwrap_err();
        assert!(matches!(err, HttpError::Api { message } if message == "Salon not found"));
    }

    #[test]
    fn test_empty_body_decodes_as_null() {
        let v: Value = decode_envelope("").unwrap();
        assert!(v.is_null());
        assert!(decode_envelope::<Products>("").is_err());
    }

    #[test]
    fn test_garbage_body_is_decode_error() {
        assert!(matches!(
            decode_envelope::<Value>("<html>"),
            Err(HttpError::Decode(_))
        ));
    }

    #[test]
    fn test_error_message_sources() {
        assert_eq!(
            error_message(r#"{"message": "Invalid credentials"}"#).as_deref(),
            Some("Invalid credentials")
        );
        assert_eq!(
            error_message(r#"{"error": "Token expired"}"#).as_deref(),
            Some("Token expired")
        );
        assert_eq!(error_message("Bad Gateway").as_deref(), Some("Bad Gateway"));
        assert_eq!(error_message("  "), None);
    }

    #[test]
    fn test_new_trims_trailing_slash() {
        let http = SalonHttp::new("http://localhost:5000/api/", Duration::from_secs(5)).unwrap();
        assert_eq!(http.base_url(), "http://localhost:5000/api");
    }
}

//! Wire types for salon requests and responses.

use crate::shared::SalonId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A salon document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalonResponse {
    #[serde(rename = "_id")]
    pub id: SalonId,
    pub name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub contact_number: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub plain_password: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Response from `GET /salons`.
#[derive(Debug, Clone, Deserialize)]
pub struct SalonsResponse {
    #[serde(default)]
    pub salons: Vec<SalonResponse>,
}

/// Response from `GET /salons/:id`, `PUT /salons/:id` and `POST /salons/login`.
#[derive(Debug, Clone, Deserialize)]
pub struct SingleSalonResponse {
    pub salon: SalonResponse,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialsResponse {
    pub username: String,
    pub password: String,
}

/// Response from `POST /salons`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSalonResponse {
    pub salon: SalonResponse,
    #[serde(default)]
    pub qr_code: Option<String>,
    #[serde(default)]
    pub credentials: Option<CredentialsResponse>,
}

/// Request body for `POST /salons` and `PUT /salons/:id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalonBody {
    pub name: String,
    pub location: String,
    pub contact_number: String,
}

/// Request body for `POST /salons/login`.
#[derive(Debug, Clone, Serialize)]
pub struct SalonLoginRequest {
    pub username: String,
    pub password: String,
}

/// Request body for `POST /salons/:id/reset-password`.
#[derive(Debug, Clone, Serialize)]
pub struct ResetPasswordRequest {
    pub password: String,
}

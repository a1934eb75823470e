//! Salon domain — tenants, their credentials, and storefront links.

#[cfg(feature = "http")]
pub mod client;
mod convert;
pub mod wire;

use crate::error::SdkError;
use crate::shared::SalonId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ─── Salon ───────────────────────────────────────────────────────────────────

/// A salon tenant. Orders and storefront links are attributed to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Salon {
    pub id: SalonId,
    pub name: String,
    pub location: String,
    pub contact_number: String,
    pub username: Option<String>,
    /// Only present for admin listings right after creation or reset.
    pub plain_password: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl Salon {
    /// Case-insensitive match over name, location and username.
    ///
    /// An empty term matches every salon.
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return true;
        }
        [
            Some(self.name.as_str()),
            Some(self.location.as_str()),
            self.username.as_deref(),
        ]
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(&term))
    }

    /// Storefront URL for this salon.
    pub fn order_page_url(&self, storefront_base: &str) -> String {
        order_page_url(storefront_base, &self.id)
    }

    pub fn qr_file_name(&self) -> String {
        qr_file_name(&self.name)
    }
}

/// The URL encoded into a salon's QR code: `{base}/order/{id}`.
pub fn order_page_url(storefront_base: &str, salon_id: &SalonId) -> String {
    format!(
        "{}/order/{}",
        storefront_base.trim_end_matches('/'),
        urlencoding::encode(salon_id.as_str())
    )
}

/// Download name for a salon's QR image: whitespace runs become `_`.
pub fn qr_file_name(salon_name: &str) -> String {
    let stem = salon_name.split_whitespace().collect::<Vec<_>>().join("_");
    format!("{}-qr.png", stem)
}

// ─── SalonDraft ──────────────────────────────────────────────────────────────

/// Admin form input for creating or editing a salon.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalonDraft {
    pub name: String,
    pub location: String,
    pub contact_number: String,
}

impl SalonDraft {
    pub fn new(
        name: impl Into<String>,
        location: impl Into<String>,
        contact_number: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            location: location.into(),
            contact_number: contact_number.into(),
        }
    }

    pub fn validate(&self) -> Result<(), SdkError> {
        let missing: Vec<&str> = [
            ("name", &self.name),
            ("location", &self.location),
            ("contact number", &self.contact_number),
        ]
        .into_iter()
        .filter(|(_, v)| v.trim().is_empty())
        .map(|(f, _)| f)
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(SdkError::Validation(format!(
                "Salon {} required",
                missing.join(", ")
            )))
        }
    }
}

impl From<&Salon> for SalonDraft {
    fn from(salon: &Salon) -> Self {
        Self {
            name: salon.name.clone(),
            location: salon.location.clone(),
            contact_number: salon.contact_number.clone(),
        }
    }
}

/// Login issued to a salon owner on creation. Shown once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalonCredentials {
    pub username: String,
    pub password: String,
}

/// Result of `POST /salons`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedSalon {
    pub salon: Salon,
    pub credentials: Option<SalonCredentials>,
    /// QR image as the backend rendered it (a data URL).
    pub qr_code: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn salon() -> Salon {
        Salon {
            id: SalonId::from("65f0c2"),
            name: "Glow  Studio Kandy".to_string(),
            location: "Kandy".to_string(),
            contact_number: "0771234567".to_string(),
            username: Some("glow_kandy".to_string()),
            plain_password: None,
            created_at: None,
        }
    }

    #[test]
    fn test_order_page_url() {
        assert_eq!(
            salon().order_page_url("https://fadna-salon.onrender.com/"),
            "https://fadna-salon.onrender.com/order/65f0c2"
        );
    }

    #[test]
    fn test_qr_file_name_collapses_whitespace() {
        assert_eq!(salon().qr_file_name(), "Glow_Studio_Kandy-qr.png");
        assert_eq!(qr_file_name("Solo"), "Solo-qr.png");
    }

    #[test]
    fn test_matches_search() {
        let s = salon();
        assert!(s.matches_search(""));
        assert!(s.matches_search("KANDY"));
        assert!(s.matches_search("glow_k"));
        assert!(!s.matches_search("colombo"));
    }

    #[test]
    fn test_draft_validation_lists_missing_fields() {
        assert!(SalonDraft::from(&salon()).validate().is_ok());
        let err = SalonDraft::new("Glow", " ", "").validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation error: Salon location, contact number required"
        );
    }
}

//! Salons sub-client — storefront lookup and admin management.

use crate::client::SalonClient;
use crate::domain::salon::wire::{
    CreateSalonResponse, ResetPasswordRequest, SalonBody, SalonsResponse, SingleSalonResponse,
};
use crate::domain::salon::{CreatedSalon, Salon, SalonDraft};
use crate::error::SdkError;
use crate::http::RetryPolicy;
use crate::shared::SalonId;

pub struct Salons<'a> {
    pub(crate) client: &'a SalonClient,
}

impl<'a> Salons<'a> {
    pub async fn list(&self) -> Result<Vec<Salon>, SdkError> {
        let url = format!("{}/salons", self.client.http.base_url());
        let resp: SalonsResponse = self.client.http.get(&url, RetryPolicy::Idempotent).await?;
        Ok(resp.salons.into_iter().map(Salon::from).collect())
    }

    /// Fetch one salon; the storefront does this before showing the catalog.
    pub async fn get(&self, id: &SalonId) -> Result<Salon, SdkError> {
        let resp: SingleSalonResponse = self
            .client
            .http
            .get(&self.salon_url(id), RetryPolicy::Idempotent)
            .await?;
        Ok(resp.salon.into())
    }

    /// Admin: register a salon. The backend issues login credentials and a
    /// QR image; the credentials are only ever returned here.
    pub async fn create(&self, draft: &SalonDraft) -> Result<CreatedSalon, SdkError> {
        draft.validate()?;
        self.client.auth().require_admin().await?;

        let url = format!("{}/salons", self.client.http.base_url());
        let resp: CreateSalonResponse = self
            .client
            .http
            .post(&url, &SalonBody::from(draft), RetryPolicy::None)
            .await?;
        let created = CreatedSalon::from(resp);
        tracing::info!(salon_id = %created.salon.id, "salon created");
        Ok(created)
    }

    pub async fn update(&self, id: &SalonId, draft: &SalonDraft) -> Result<Salon, SdkError> {
        draft.validate()?;
        self.client.auth().require_admin().await?;

        let resp: SingleSalonResponse = self
            .client
            .http
            .put(&self.salon_url(id), &SalonBody::from(draft), RetryPolicy::None)
            .await?;
        Ok(resp.salon.into())
    }

    pub async fn delete(&self, id: &SalonId) -> Result<(), SdkError> {
        self.client.auth().require_admin().await?;

        let _: serde_json::Value = self
            .client
            .http
            .delete(&self.salon_url(id), RetryPolicy::None)
            .await?;
        tracing::info!(salon_id = %id, "salon deleted");
        Ok(())
    }

    /// Admin: set a new login password for a salon owner.
    pub async fn reset_password(&self, id: &SalonId, password: &str) -> Result<(), SdkError> {
        if password.trim().is_empty() {
            return Err(SdkError::Validation("Password is required".to_string()));
        }
        self.client.auth().require_admin().await?;

        let url = format!("{}/reset-password", self.salon_url(id));
        let _: serde_json::Value = self
            .client
            .http
            .post(
                &url,
                &ResetPasswordRequest {
                    password: password.to_string(),
                },
                RetryPolicy::None,
            )
            .await?;
        Ok(())
    }

    fn salon_url(&self, id: &SalonId) -> String {
        format!(
            "{}/salons/{}",
            self.client.http.base_url(),
            urlencoding::encode(id.as_str())
        )
    }
}

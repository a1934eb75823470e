//! Products sub-client — catalog listing and admin edits.

use crate::client::SalonClient;
use crate::domain::product::wire::{ProductBody, ProductMutationResponse, ProductsResponse};
use crate::domain::product::{Catalog, Product, ProductDraft};
use crate::error::{HttpError, SdkError};
use crate::http::RetryPolicy;
use crate::shared::ProductId;

pub struct Products<'a> {
    pub(crate) client: &'a SalonClient,
}

impl<'a> Products<'a> {
    /// Fetch the catalog shared by every salon storefront.
    ///
    /// A product whose discount data is invalid is left out with a warning
    /// rather than failing the whole storefront; carts that reference it then
    /// fail with `UnknownProduct`.
    pub async fn list(&self) -> Result<Catalog, SdkError> {
        let url = format!("{}/products", self.client.http.base_url());
        let resp: ProductsResponse = self.client.http.get(&url, RetryPolicy::Idempotent).await?;

        let mut catalog = Catalog::default();
        for raw in resp.products {
            let id = raw.id.clone();
            match Product::try_from(raw) {
                Ok(product) => catalog.upsert(product),
                Err(e) => tracing::warn!(product_id = %id, error = %e, "skipping invalid product"),
            }
        }
        Ok(catalog)
    }

    /// Admin: create a product.
    pub async fn create(&self, draft: &ProductDraft) -> Result<Product, SdkError> {
        draft.validate()?;
        self.client.auth().require_admin().await?;

        let url = format!("{}/products", self.client.http.base_url());
        let resp: ProductMutationResponse = self
            .client
            .http
            .post(&url, &ProductBody::from(draft), RetryPolicy::None)
            .await?;
        mutated(resp)
    }

    /// Admin: replace a product's name, price and discount.
    pub async fn update(&self, id: &ProductId, draft: &ProductDraft) -> Result<Product, SdkError> {
        draft.validate()?;
        self.client.auth().require_admin().await?;

        let url = format!(
            "{}/products/{}",
            self.client.http.base_url(),
            urlencoding::encode(id.as_str())
        );
        let resp: ProductMutationResponse = self
            .client
            .http
            .put(&url, &ProductBody::from(draft), RetryPolicy::None)
            .await?;
        mutated(resp)
    }

    /// Admin: delete a product. Placed orders keep their line snapshots.
    pub async fn delete(&self, id: &ProductId) -> Result<(), SdkError> {
        self.client.auth().require_admin().await?;

        let url = format!(
            "{}/products/{}",
            self.client.http.base_url(),
            urlencoding::encode(id.as_str())
        );
        let _: serde_json::Value = self.client.http.delete(&url, RetryPolicy::None).await?;
        Ok(())
    }
}

fn mutated(resp: ProductMutationResponse) -> Result<Product, SdkError> {
    let raw = resp
        .product
        .ok_or_else(|| HttpError::Decode("response carries no product".to_string()))?;
    Ok(Product::try_from(raw)?)
}

//! Product operations.

use leafpress_core::{ImageRef, Product, ProductId};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::instrument;

use super::types::{
    Ack, BulkDiscountBody, BulkDiscountOutcome, ProductListResponse, ProductResponse,
    RemoveImagesBody, UploadFile, UploadOutcome,
};
use super::{ApiClient, ApiError, ProductGateway};
use crate::form::ProductFields;

#[derive(Debug, Serialize)]
struct UpdateProductBody<'a> {
    #[serde(flatten)]
    fields: &'a ProductFields,
    images: &'a [ImageRef],
}

impl ApiClient {
    /// List the full catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects it.
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        let response: ProductListResponse = self.get("/product/list").await?;
        Ok(response.products)
    }

    /// Fetch a single product by id.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] for an unknown id, or another error if
    /// the request fails.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn get_product(&self, id: &ProductId) -> Result<Product, ApiError> {
        let response: ProductResponse = self.get(&format!("/product/{id}")).await?;
        Ok(response.product)
    }

    /// Delete a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects it.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn delete_product(&self, id: &ProductId) -> Result<(), ApiError> {
        let _: Ack = self.delete(&format!("/product/delete/{id}")).await?;
        Ok(())
    }

    /// Apply a percentage discount to a set of products in one call.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects it.
    #[instrument(skip(self, product_ids), fields(count = product_ids.len()))]
    pub async fn apply_bulk_discount(
        &self,
        product_ids: &[ProductId],
        discount_percent: Decimal,
    ) -> Result<BulkDiscountOutcome, ApiError> {
        let body = BulkDiscountBody {
            product_ids,
            discount_percent,
        };
        self.patch("/product/bulk-discount", &body).await
    }
}

impl ProductGateway for ApiClient {
    #[instrument(skip(self, fields), fields(title = %fields.title))]
    async fn create_product(&self, fields: &ProductFields) -> Result<Product, ApiError> {
        let response: ProductResponse = self.post("/product/create", fields).await?;
        Ok(response.product)
    }

    #[instrument(skip(self, fields, images), fields(product_id = %id, image_count = images.len()))]
    async fn update_product(
        &self,
        id: &ProductId,
        fields: &ProductFields,
        images: &[ImageRef],
    ) -> Result<(), ApiError> {
        let body = UpdateProductBody { fields, images };
        let _: Ack = self.put(&format!("/product/update/{id}"), &body).await?;
        Ok(())
    }

    #[instrument(skip(self, refs), fields(product_id = %id, ref_count = refs.len()))]
    async fn remove_product_images(
        &self,
        id: &ProductId,
        refs: &[ImageRef],
    ) -> Result<(), ApiError> {
        let body = RemoveImagesBody { images: refs };
        let _: Ack = self
            .post(&format!("/product/{id}/remove-images"), &body)
            .await?;
        Ok(())
    }

    #[instrument(skip(self, files), fields(product_id = %id, file_count = files.len()))]
    async fn upload_product_images(
        &self,
        id: &ProductId,
        files: &[UploadFile],
    ) -> Result<UploadOutcome, ApiError> {
        let mut form = reqwest::multipart::Form::new();
        for file in files {
            let part = reqwest::multipart::Part::bytes(file.bytes.clone())
                .file_name(file.file_name.clone())
                .mime_str(&file.content_type)?;
            form = form.part("images", part);
        }

        self.post_multipart(&format!("/product/{id}/upload-images"), form)
            .await
    }
}

//! The remote effects the product save protocol depends on.

use leafpress_core::{ImageRef, Product, ProductId};

use super::error::ApiError;
use super::types::{UploadFile, UploadOutcome};
use crate::form::ProductFields;

/// The narrow slice of the backend the save orchestrator drives.
///
/// [`ApiClient`](super::ApiClient) is the production implementation; tests
/// substitute a recording gateway so call counts and ordering can be
/// asserted without a live backend.
#[allow(async_fn_in_trait)]
pub trait ProductGateway {
    /// Create a new product from validated fields; returns the stored record.
    async fn create_product(&self, fields: &ProductFields) -> Result<Product, ApiError>;

    /// Update an existing product.
    ///
    /// `images` is the full desired list of persisted images; the server
    /// treats it as authoritative for membership and ordering.
    async fn update_product(
        &self,
        id: &ProductId,
        fields: &ProductFields,
        images: &[ImageRef],
    ) -> Result<(), ApiError>;

    /// Remove persisted images by reference. Best-effort on the caller's side.
    async fn remove_product_images(
        &self,
        id: &ProductId,
        refs: &[ImageRef],
    ) -> Result<(), ApiError>;

    /// Upload new images in submission order.
    async fn upload_product_images(
        &self,
        id: &ProductId,
        files: &[UploadFile],
    ) -> Result<UploadOutcome, ApiError>;
}

//! Request and response bodies for the backend API.
//!
//! Response envelopes mirror the backend's habit of wrapping payloads in a
//! named field (`{"products": [...]}`, `{"orders": [...]}`, ...).

use leafpress_core::{Customer, CustomerDetails, DashboardStats, Order, Product};
use serde::{Deserialize, Serialize};

/// A file ready for multipart upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    /// Original file name, sent as the multipart part's filename.
    pub file_name: String,
    /// MIME type (e.g. `image/png`).
    pub content_type: String,
    /// Raw file contents.
    pub bytes: Vec<u8>,
}

/// Result of a multipart image upload.
///
/// `uploaded_count` may be less than the number of files sent when the
/// server accepts the request but persists only a prefix of the batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadOutcome {
    pub uploaded_count: usize,
}

/// Result of a bulk discount application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkDiscountOutcome {
    #[serde(default)]
    pub modified_count: u64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProductListResponse {
    pub products: Vec<Product>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProductResponse {
    pub product: Product,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OrderListResponse {
    pub orders: Vec<Order>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UserListResponse {
    pub users: Vec<Customer>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UserDetailsResponse {
    pub user: CustomerDetails,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StatsResponse {
    pub stats: DashboardStats,
}

/// Generic `{"message": ...}` acknowledgement.
#[derive(Debug, Deserialize)]
pub(crate) struct Ack {
    #[serde(default)]
    #[allow(dead_code)]
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RemoveImagesBody<'a> {
    pub images: &'a [leafpress_core::ImageRef],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BulkDiscountBody<'a> {
    pub product_ids: &'a [leafpress_core::ProductId],
    #[serde(with = "rust_decimal::serde::float")]
    pub discount_percent: rust_decimal::Decimal,
}

#[derive(Debug, Serialize)]
pub(crate) struct UpdateStatusBody {
    pub status: leafpress_core::OrderStatus,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MassEmailBody<'a> {
    pub user_emails: &'a [String],
    pub subject: &'a str,
    pub body: &'a str,
}

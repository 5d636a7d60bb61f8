//! Integration tests for the Leafpress admin toolkit.
//!
//! The save protocol is exercised end-to-end against [`RecordingGateway`],
//! an in-process [`ProductGateway`] that logs every call in order and can be
//! scripted to fail individual steps. This is what makes call counts,
//! ordering and partial-failure semantics assertable without a live backend.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p leafpress-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Mutex;

use leafpress_admin::{ApiError, ProductFields, ProductGateway, UploadFile, UploadOutcome};
use leafpress_core::{Category, ImageRef, Product, ProductId};
use rust_decimal::Decimal;

/// One recorded gateway call, with the arguments the orchestrator sent.
#[derive(Debug, Clone, PartialEq)]
pub enum GatewayCall {
    CreateProduct {
        fields: ProductFields,
    },
    UpdateProduct {
        id: ProductId,
        fields: ProductFields,
        images: Vec<ImageRef>,
    },
    RemoveProductImages {
        id: ProductId,
        refs: Vec<ImageRef>,
    },
    UploadProductImages {
        id: ProductId,
        file_names: Vec<String>,
    },
}

/// Scripted behaviour for one [`RecordingGateway`] step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum StepBehaviour {
    #[default]
    Succeed,
    Fail,
}

/// In-process gateway that records calls and can fail on demand.
#[derive(Debug, Default)]
pub struct RecordingGateway {
    calls: Mutex<Vec<GatewayCall>>,
    create: StepBehaviour,
    update: StepBehaviour,
    remove: StepBehaviour,
    upload: StepBehaviour,
    /// When set, uploads "succeed" but report only this many files accepted.
    upload_accepts: Option<usize>,
}

impl RecordingGateway {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the create call with a 500.
    #[must_use]
    pub fn with_failing_create(mut self) -> Self {
        self.create = StepBehaviour::Fail;
        self
    }

    /// Fail the update call with a 500.
    #[must_use]
    pub fn with_failing_update(mut self) -> Self {
        self.update = StepBehaviour::Fail;
        self
    }

    /// Fail the image-removal call with a 500.
    #[must_use]
    pub fn with_failing_remove(mut self) -> Self {
        self.remove = StepBehaviour::Fail;
        self
    }

    /// Fail the image-upload call with a 500.
    #[must_use]
    pub fn with_failing_upload(mut self) -> Self {
        self.upload = StepBehaviour::Fail;
        self
    }

    /// Make uploads report a partial accept of `count` files.
    #[must_use]
    pub const fn with_partial_upload(mut self, count: usize) -> Self {
        self.upload_accepts = Some(count);
        self
    }

    /// Every call made so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<GatewayCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn record(&self, call: GatewayCall) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }

    fn server_error(step: &str) -> ApiError {
        ApiError::Api {
            status: 500,
            message: format!("{step} failed"),
        }
    }
}

impl ProductGateway for RecordingGateway {
    async fn create_product(&self, fields: &ProductFields) -> Result<Product, ApiError> {
        self.record(GatewayCall::CreateProduct {
            fields: fields.clone(),
        });
        if self.create == StepBehaviour::Fail {
            return Err(Self::server_error("create"));
        }
        Ok(product_from_fields(&ProductId::new("created-1"), fields))
    }

    async fn update_product(
        &self,
        id: &ProductId,
        fields: &ProductFields,
        images: &[ImageRef],
    ) -> Result<(), ApiError> {
        self.record(GatewayCall::UpdateProduct {
            id: id.clone(),
            fields: fields.clone(),
            images: images.to_vec(),
        });
        if self.update == StepBehaviour::Fail {
            return Err(Self::server_error("update"));
        }
        Ok(())
    }

    async fn remove_product_images(
        &self,
        id: &ProductId,
        refs: &[ImageRef],
    ) -> Result<(), ApiError> {
        self.record(GatewayCall::RemoveProductImages {
            id: id.clone(),
            refs: refs.to_vec(),
        });
        if self.remove == StepBehaviour::Fail {
            return Err(Self::server_error("remove"));
        }
        Ok(())
    }

    async fn upload_product_images(
        &self,
        id: &ProductId,
        files: &[UploadFile],
    ) -> Result<UploadOutcome, ApiError> {
        self.record(GatewayCall::UploadProductImages {
            id: id.clone(),
            file_names: files.iter().map(|f| f.file_name.clone()).collect(),
        });
        if self.upload == StepBehaviour::Fail {
            return Err(Self::server_error("upload"));
        }
        Ok(UploadOutcome {
            uploaded_count: self.upload_accepts.unwrap_or(files.len()),
        })
    }
}

/// Build the record the backend would return for freshly created fields.
fn product_from_fields(id: &ProductId, fields: &ProductFields) -> Product {
    Product {
        id: id.clone(),
        title: fields.title.clone(),
        description: fields.description.clone(),
        original_price: fields.original_price,
        discount_percent: fields.discount_percent,
        stock: fields.stock,
        category: fields.category,
        tags: fields.tags.clone(),
        images: vec![],
        is_top_pick: fields.is_top_pick,
        is_trending: fields.is_trending,
        created_at: None,
    }
}

/// A persisted product with the given images, for edit-flow tests.
#[must_use]
pub fn stored_product(id: &str, images: &[&str]) -> Product {
    Product {
        id: ProductId::new(id),
        title: "Spiral Notepad".to_string(),
        description: "Sturdy binding, premium eco-paper.".to_string(),
        original_price: Decimal::new(250, 0),
        discount_percent: Decimal::ZERO,
        stock: 45,
        category: Category::Stationery,
        tags: vec!["eco".to_string()],
        images: images.iter().map(|i| ImageRef::new(*i)).collect(),
        is_top_pick: false,
        is_trending: false,
        created_at: None,
    }
}

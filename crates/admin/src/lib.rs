//! Leafpress Admin - client library for the storefront backend.
//!
//! Two layers:
//!
//! - [`api`] - typed REST client for the backend's `/api` surface
//!   (products, orders, customers, dashboard stats), plus the
//!   [`ProductGateway`] trait the save protocol is written against.
//! - [`form`] - the product form controller: draft state and validation,
//!   staged image files with revocable preview handles, and the sequential
//!   create/update → delete-images → upload-images save protocol with
//!   partial-failure reporting.
//!
//! # Example
//!
//! ```rust,no_run
//! use leafpress_admin::{AdminConfig, ApiClient, ProductForm};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AdminConfig::from_env()?;
//! let client = ApiClient::new(&config);
//!
//! let mut form = ProductForm::new(config.max_image_bytes);
//! form.set_title("Stapled Notepad");
//! form.set_description("Made from upcycled agricultural waste.");
//! form.set_original_price("300");
//! form.set_stock("60");
//! form.set_category(Some(leafpress_core::Category::Stationery));
//! form.stage_files(vec![/* selected image files */]);
//!
//! let report = form.save(&client).await?;
//! println!("saved product {}", report.product_id);
//! # Ok(())
//! # }
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod config;
pub mod form;

pub use api::{ApiClient, ApiError, OrderFilter, OrderSort, ProductGateway, UploadFile, UploadOutcome};
pub use config::{AdminConfig, ConfigError};
pub use form::{
    Field, FileStager, ImageSet, IncomingFile, PreviewHandle, PreviewRegistry, ProductDraft,
    ProductFields, ProductForm, SaveError, SavePhase, SaveReport, SaveWarning, StagedImage,
    StagingOutcome, ValidationErrors,
};

//! Product form controller.
//!
//! One [`ProductForm`] owns everything a create/edit session needs: the
//! draft, the snapshot it was loaded from, the three image collections, the
//! file stager and the validation state. Mutation happens through named
//! transitions (`set_*`, `mark_for_deletion`, `restore`, `stage_files`) so
//! the image-set invariants hold at the boundary, and [`ProductForm::save`]
//! drives the whole remote protocol against a [`ProductGateway`].
//!
//! Nothing here is shared between sessions; drop the form and every staged
//! preview is released.

mod draft;
mod images;
mod save;
mod stager;
mod validate;

pub use draft::{ProductDraft, ProductFields};
pub use images::ImageSet;
pub use save::{SaveError, SavePhase, SaveReport, SaveWarning};
pub use stager::{
    FileStager, IncomingFile, PreviewHandle, PreviewRegistry, StagedImage, StagingOutcome,
};
pub use validate::{Field, ValidationErrors, validate};

use std::collections::BTreeSet;

use leafpress_core::{Category, ImageRef, Product, ProductId};
use tracing::{info, instrument, warn};

use crate::api::{ProductGateway, UploadFile};

/// Controller for one product create/edit session.
pub struct ProductForm {
    /// `Some` for the edit flow, `None` until a create completes.
    product_id: Option<ProductId>,
    draft: ProductDraft,
    /// The draft as loaded, for unsaved-change detection.
    snapshot: ProductDraft,
    images: ImageSet,
    stager: FileStager,
    errors: ValidationErrors,
    touched: BTreeSet<Field>,
    phase: SavePhase,
}

impl ProductForm {
    /// Start a create session with an empty draft and no images.
    #[must_use]
    pub fn new(max_image_bytes: u64) -> Self {
        Self {
            product_id: None,
            draft: ProductDraft::default(),
            snapshot: ProductDraft::default(),
            images: ImageSet::new(),
            stager: FileStager::new(max_image_bytes),
            errors: ValidationErrors::default(),
            touched: BTreeSet::new(),
            phase: SavePhase::Idle,
        }
    }

    /// Start an edit session seeded from a fetched product.
    #[must_use]
    pub fn load(max_image_bytes: u64, product: &Product) -> Self {
        let draft = ProductDraft::from_product(product);
        Self {
            product_id: Some(product.id.clone()),
            snapshot: draft.clone(),
            draft,
            images: ImageSet::from_current(product.images.clone()),
            stager: FileStager::new(max_image_bytes),
            errors: ValidationErrors::default(),
            touched: BTreeSet::new(),
            phase: SavePhase::Idle,
        }
    }

    // =========================================================================
    // Draft transitions
    // =========================================================================

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.draft.title = title.into();
        self.revalidate_field(Field::Title);
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.draft.description = description.into();
        self.revalidate_field(Field::Description);
    }

    pub fn set_original_price(&mut self, raw: impl Into<String>) {
        self.draft.original_price = raw.into();
        self.revalidate_field(Field::OriginalPrice);
    }

    pub fn set_discount_percent(&mut self, raw: impl Into<String>) {
        self.draft.discount_percent = raw.into();
        self.revalidate_field(Field::DiscountPercent);
    }

    pub fn set_stock(&mut self, raw: impl Into<String>) {
        self.draft.stock = raw.into();
        self.revalidate_field(Field::Stock);
    }

    pub fn set_category(&mut self, category: Option<Category>) {
        self.draft.category = category;
        self.revalidate_field(Field::Category);
    }

    pub fn set_tags(&mut self, tags: impl Into<String>) {
        self.draft.tags = tags.into();
    }

    pub const fn set_top_pick(&mut self, flag: bool) {
        self.draft.is_top_pick = flag;
    }

    pub const fn set_trending(&mut self, flag: bool) {
        self.draft.is_trending = flag;
    }

    /// Re-check one field after an edit, clearing or refreshing its inline
    /// error. Full validation happens again at submit.
    fn revalidate_field(&mut self, field: Field) {
        self.touched.insert(field);
        match validate::check_field(&self.draft, field) {
            Some(message) => self.errors.insert(field, message),
            None => self.errors.remove(field),
        }
    }

    // =========================================================================
    // Image transitions
    // =========================================================================

    /// Stage a batch of selected files, appending to any already staged.
    ///
    /// Returns the per-batch outcome; a non-zero `rejected` count is the
    /// caller's cue for the one oversized-files warning.
    pub fn stage_files(&mut self, incoming: Vec<IncomingFile>) -> StagingOutcome {
        let (staged, rejected) = self.stager.stage(incoming);
        let accepted = staged.len();
        self.images.push_staged(staged);
        StagingOutcome { accepted, rejected }
    }

    /// Rebuild the staged list from scratch.
    ///
    /// Previously staged previews are released before the new ones are
    /// allocated, so recomputation never leaks handles.
    pub fn restage_files(&mut self, incoming: Vec<IncomingFile>) -> StagingOutcome {
        self.images.clear_staged();
        self.stage_files(incoming)
    }

    /// Remove one staged file; its preview is revoked immediately.
    pub fn remove_staged(&mut self, index: usize) -> bool {
        self.images.remove_staged(index)
    }

    /// Mark a persisted image for deletion on the next save.
    pub fn mark_for_deletion(&mut self, image: &ImageRef) -> bool {
        self.images.mark_for_deletion(image)
    }

    /// Undo a pending deletion.
    pub fn restore(&mut self, image: &ImageRef) -> bool {
        self.images.restore(image)
    }

    // =========================================================================
    // State
    // =========================================================================

    #[must_use]
    pub const fn draft(&self) -> &ProductDraft {
        &self.draft
    }

    #[must_use]
    pub const fn images(&self) -> &ImageSet {
        &self.images
    }

    /// The registry staged previews resolve against.
    #[must_use]
    pub const fn preview_registry(&self) -> &PreviewRegistry {
        self.stager.registry()
    }

    /// Identity of the product being edited, or of a completed create.
    #[must_use]
    pub const fn product_id(&self) -> Option<&ProductId> {
        self.product_id.as_ref()
    }

    #[must_use]
    pub const fn is_edit(&self) -> bool {
        self.product_id.is_some()
    }

    #[must_use]
    pub const fn phase(&self) -> SavePhase {
        self.phase
    }

    #[must_use]
    pub const fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// Whether a field has been touched (edited, or included in a submit).
    #[must_use]
    pub fn is_touched(&self, field: Field) -> bool {
        self.touched.contains(&field)
    }

    /// True when the draft differs from its loaded snapshot or any image
    /// change is pending. Gates the save control; not a navigation guard.
    #[must_use]
    pub fn has_unsaved_changes(&self) -> bool {
        self.draft != self.snapshot
            || !self.images.pending_delete_is_empty()
            || !self.images.pending_upload().is_empty()
    }

    // =========================================================================
    // Save protocol
    // =========================================================================

    /// Run the full save protocol against the gateway.
    ///
    /// Phases run strictly in order: validate, write the product record,
    /// delete marked images, upload staged images. Validation failure and a
    /// failed record write are fatal; image-step failures become warnings on
    /// the returned report, with the affected marks/files retained so the
    /// caller can retry them.
    ///
    /// # Errors
    ///
    /// - [`SaveError::SaveInFlight`] if called while a save is running.
    /// - [`SaveError::Rejected`] when validation fails; no network calls are
    ///   made and every field is marked touched so errors render.
    /// - [`SaveError::Core`] when the create/update call fails; the image
    ///   steps never run.
    #[instrument(skip(self, gateway), fields(edit = self.is_edit()))]
    pub async fn save<G: ProductGateway>(&mut self, gateway: &G) -> Result<SaveReport, SaveError> {
        if self.phase.is_in_flight() {
            return Err(SaveError::SaveInFlight);
        }

        self.phase = SavePhase::Validating;
        let fields = match self.validate_for_submit() {
            Ok(fields) => fields,
            Err(errors) => {
                self.phase = SavePhase::Rejected;
                return Err(SaveError::Rejected(errors));
            }
        };

        self.phase = SavePhase::CreatingOrUpdating;
        let (product_id, created) = match self.product_id.clone() {
            None => match gateway.create_product(&fields).await {
                Ok(product) => (product.id, true),
                Err(error) => {
                    self.phase = SavePhase::Failed;
                    return Err(SaveError::Core(error));
                }
            },
            Some(id) => match gateway
                .update_product(&id, &fields, self.images.current())
                .await
            {
                Ok(()) => (id, false),
                Err(error) => {
                    self.phase = SavePhase::Failed;
                    return Err(SaveError::Core(error));
                }
            },
        };
        self.product_id = Some(product_id.clone());

        let mut warnings = Vec::new();

        self.phase = SavePhase::DeletingImages;
        if !self.images.pending_delete_is_empty() {
            let pending = self.images.pending_delete();
            match gateway.remove_product_images(&product_id, &pending).await {
                Ok(()) => self.images.clear_pending_delete(),
                Err(error) => {
                    warn!(%product_id, %error, "image deletion failed, continuing");
                    warnings.push(SaveWarning::ImageDelete(error.to_string()));
                }
            }
        }

        self.phase = SavePhase::UploadingImages;
        if !self.images.pending_upload().is_empty() {
            let files: Vec<UploadFile> = self
                .images
                .pending_upload()
                .iter()
                .map(|staged| UploadFile {
                    file_name: staged.file_name.clone(),
                    content_type: staged.content_type.clone(),
                    bytes: staged.bytes.to_vec(),
                })
                .collect();
            let sent = files.len();

            match gateway.upload_product_images(&product_id, &files).await {
                Ok(outcome) if outcome.uploaded_count >= sent => self.images.clear_staged(),
                Ok(outcome) => {
                    warn!(
                        %product_id,
                        uploaded = outcome.uploaded_count,
                        sent,
                        "image upload partially accepted"
                    );
                    warnings.push(SaveWarning::ImageUpload(format!(
                        "server accepted {} of {sent} files",
                        outcome.uploaded_count
                    )));
                    self.images.drain_staged(outcome.uploaded_count);
                }
                Err(error) => {
                    warn!(%product_id, %error, "image upload failed");
                    warnings.push(SaveWarning::ImageUpload(error.to_string()));
                }
            }
        }

        self.phase = SavePhase::Complete;
        self.snapshot = self.draft.clone();
        info!(%product_id, created, warning_count = warnings.len(), "product saved");

        Ok(SaveReport {
            product_id,
            created,
            warnings,
        })
    }

    /// Full submit-time validation: every draft field plus the image rule
    /// (creation needs at least one effective image; editing down to zero
    /// is allowed). Marks all fields touched either way.
    fn validate_for_submit(&mut self) -> Result<ProductFields, ValidationErrors> {
        self.touched.extend(Field::DRAFT_FIELDS);
        self.touched.insert(Field::Images);

        let mut errors = validate(&self.draft);
        if self.product_id.is_none() && self.images.effective_len() == 0 {
            errors.insert(Field::Images, "At least one product image is required");
        }

        if errors.is_empty() {
            self.errors = ValidationErrors::default();
            ProductFields::try_from_draft(&self.draft)
        } else {
            self.errors = errors.clone();
            Err(errors)
        }
    }
}

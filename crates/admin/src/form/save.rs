//! The multi-step save protocol.
//!
//! A save is three independent remote effects run strictly in sequence:
//! create/update the product record, delete removed images, upload staged
//! images. The record write is fatal on failure; the two image steps are
//! best-effort and reported as warnings on an otherwise successful save, so
//! an image-service hiccup can never leave the product record unsaved and a
//! failed upload can never silently mask a successful update.

use thiserror::Error;

use crate::api::ApiError;

use super::validate::ValidationErrors;

/// The phases a submit moves through, in order.
///
/// `Rejected` (validation failed) and `Failed` (record write failed) are
/// terminal short-circuits; `Complete` is the successful terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SavePhase {
    /// No save attempted yet on this form.
    #[default]
    Idle,
    /// Running local validation.
    Validating,
    /// Writing the product record (create or update).
    CreatingOrUpdating,
    /// Removing images marked for deletion.
    DeletingImages,
    /// Uploading staged images.
    UploadingImages,
    /// Core record saved; any image warnings are on the report.
    Complete,
    /// Validation failed; nothing was sent.
    Rejected,
    /// The record write failed; image steps never ran.
    Failed,
}

impl SavePhase {
    /// True while a save owns the form (submit control disabled).
    #[must_use]
    pub const fn is_in_flight(&self) -> bool {
        matches!(
            self,
            Self::Validating | Self::CreatingOrUpdating | Self::DeletingImages | Self::UploadingImages
        )
    }

    /// True once a save has reached an end state.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Complete | Self::Rejected | Self::Failed)
    }
}

/// A non-fatal problem from the image steps of a completed save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveWarning {
    /// Deleting removed images failed; the marks are retained for retry.
    ImageDelete(String),
    /// Uploading staged images failed or was only partially accepted; the
    /// unsent files stay staged.
    ImageUpload(String),
}

impl std::fmt::Display for SaveWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ImageDelete(message) => write!(f, "image deletion failed: {message}"),
            Self::ImageUpload(message) => write!(f, "image upload failed: {message}"),
        }
    }
}

/// Outcome of a save that reached [`SavePhase::Complete`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveReport {
    /// Identity of the saved product (newly assigned on create).
    pub product_id: leafpress_core::ProductId,
    /// True when this save created the product.
    pub created: bool,
    /// Non-fatal image-step problems, in the order they occurred.
    pub warnings: Vec<SaveWarning>,
}

impl SaveReport {
    /// True when every step, including the image steps, succeeded.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Why a save did not complete.
#[derive(Debug, Error)]
pub enum SaveError {
    /// A save is already running on this form instance.
    #[error("a save is already in flight")]
    SaveInFlight,

    /// The draft failed validation; no network calls were made.
    #[error("draft validation failed ({} field(s))", .0.len())]
    Rejected(ValidationErrors),

    /// The create/update call failed; image steps were not attempted.
    #[error("saving product failed: {0}")]
    Core(#[source] ApiError),
}

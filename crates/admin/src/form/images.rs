//! The three image collections of a product form session.

use leafpress_core::ImageRef;

use super::stager::StagedImage;

/// An image marked for deletion, remembering where it sat in the display
/// order so restoring it is an exact round-trip.
#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingDelete {
    image: ImageRef,
    position: usize,
}

/// Persisted, to-be-deleted and to-be-uploaded images for one form session.
///
/// A reference lives in `current` or `pending_delete`, never both: marking
/// and restoring move it between the two in a single operation. Staged
/// uploads keep their preview handles alive for exactly as long as they are
/// in the set.
#[derive(Debug, Default)]
pub struct ImageSet {
    current: Vec<ImageRef>,
    pending_delete: Vec<PendingDelete>,
    pending_upload: Vec<StagedImage>,
}

impl ImageSet {
    /// Empty set (create flow).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed from the persisted image list (edit flow). Display order is kept.
    #[must_use]
    pub fn from_current(current: Vec<ImageRef>) -> Self {
        Self {
            current,
            ..Self::default()
        }
    }

    /// Persisted images still shown, in display order.
    #[must_use]
    pub fn current(&self) -> &[ImageRef] {
        &self.current
    }

    /// Images marked for deletion but not yet committed remotely.
    #[must_use]
    pub fn pending_delete(&self) -> Vec<ImageRef> {
        self.pending_delete.iter().map(|p| p.image.clone()).collect()
    }

    /// True when no deletions are pending.
    #[must_use]
    pub fn pending_delete_is_empty(&self) -> bool {
        self.pending_delete.is_empty()
    }

    /// Staged uploads, in submission order.
    #[must_use]
    pub fn pending_upload(&self) -> &[StagedImage] {
        &self.pending_upload
    }

    /// Number of images the product would have after a successful save.
    #[must_use]
    pub fn effective_len(&self) -> usize {
        self.current.len() + self.pending_upload.len()
    }

    /// Move a persisted reference from `current` to `pending_delete`.
    ///
    /// Returns `false` (and changes nothing) if the reference is not
    /// currently shown.
    pub fn mark_for_deletion(&mut self, image: &ImageRef) -> bool {
        let Some(position) = self.current.iter().position(|i| i == image) else {
            return false;
        };
        let removed = self.current.remove(position);
        self.pending_delete.push(PendingDelete {
            image: removed,
            position,
        });
        true
    }

    /// Undo a pending deletion, returning the reference to its old place in
    /// the display order (mark followed by restore is a round-trip).
    ///
    /// Returns `false` if the reference is not pending deletion.
    pub fn restore(&mut self, image: &ImageRef) -> bool {
        let Some(index) = self.pending_delete.iter().position(|p| &p.image == image) else {
            return false;
        };
        let restored = self.pending_delete.remove(index);
        let position = restored.position.min(self.current.len());
        self.current.insert(position, restored.image);
        true
    }

    /// Append freshly staged uploads.
    pub fn push_staged(&mut self, staged: Vec<StagedImage>) {
        self.pending_upload.extend(staged);
    }

    /// Remove one staged upload by index, dropping (revoking) its preview.
    ///
    /// Other entries keep their identity and relative order.
    pub fn remove_staged(&mut self, index: usize) -> bool {
        if index >= self.pending_upload.len() {
            return false;
        }
        // Dropping the StagedImage drops its PreviewHandle.
        drop(self.pending_upload.remove(index));
        true
    }

    /// Drop every staged upload (and with them, every preview handle).
    pub fn clear_staged(&mut self) {
        self.pending_upload.clear();
    }

    /// Drop the first `count` staged uploads (submission order); used when
    /// the server accepted only a prefix of a batch.
    pub(crate) fn drain_staged(&mut self, count: usize) {
        let count = count.min(self.pending_upload.len());
        self.pending_upload.drain(..count);
    }

    /// Forget pending deletions after the remote removal succeeded.
    pub(crate) fn clear_pending_delete(&mut self) {
        self.pending_delete.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::stager::{FileStager, IncomingFile};

    fn refs(names: &[&str]) -> Vec<ImageRef> {
        names.iter().map(|n| ImageRef::new(*n)).collect()
    }

    #[test]
    fn test_mark_moves_reference_out_of_current() {
        let mut set = ImageSet::from_current(refs(&["/a.png", "/b.png"]));
        assert!(set.mark_for_deletion(&ImageRef::new("/a.png")));

        assert_eq!(set.current(), refs(&["/b.png"]).as_slice());
        assert_eq!(set.pending_delete(), refs(&["/a.png"]));
    }

    #[test]
    fn test_mark_unknown_reference_is_noop() {
        let mut set = ImageSet::from_current(refs(&["/a.png"]));
        assert!(!set.mark_for_deletion(&ImageRef::new("/zzz.png")));
        assert_eq!(set.current().len(), 1);
        assert!(set.pending_delete_is_empty());
    }

    #[test]
    fn test_mark_then_restore_round_trips_exactly() {
        let mut set = ImageSet::from_current(refs(&["/a.png", "/b.png", "/c.png"]));
        let target = ImageRef::new("/b.png");

        assert!(set.mark_for_deletion(&target));
        assert!(set.restore(&target));

        // Same membership, same order, nothing pending.
        assert_eq!(set.current(), refs(&["/a.png", "/b.png", "/c.png"]).as_slice());
        assert!(set.pending_delete_is_empty());
    }

    #[test]
    fn test_restore_clamps_position_after_other_marks() {
        let mut set = ImageSet::from_current(refs(&["/a.png", "/b.png", "/c.png"]));

        // Mark the last image, then shrink `current` further.
        assert!(set.mark_for_deletion(&ImageRef::new("/c.png")));
        assert!(set.mark_for_deletion(&ImageRef::new("/a.png")));
        assert!(set.mark_for_deletion(&ImageRef::new("/b.png")));

        // Restoring /c.png can't go back to index 2 of an empty list.
        assert!(set.restore(&ImageRef::new("/c.png")));
        assert_eq!(set.current(), refs(&["/c.png"]).as_slice());
    }

    #[test]
    fn test_double_mark_cannot_duplicate() {
        let mut set = ImageSet::from_current(refs(&["/a.png"]));
        let target = ImageRef::new("/a.png");

        assert!(set.mark_for_deletion(&target));
        // Already moved; a second mark finds nothing in `current`.
        assert!(!set.mark_for_deletion(&target));
        assert_eq!(set.pending_delete().len(), 1);
    }

    #[test]
    fn test_remove_staged_releases_only_that_preview() {
        let stager = FileStager::new(1024);
        let incoming = ["a.png", "b.png", "c.png"]
            .iter()
            .map(|n| IncomingFile {
                file_name: (*n).to_string(),
                content_type: "image/png".to_string(),
                bytes: vec![1, 2, 3],
            })
            .collect();
        let (staged, _) = stager.stage(incoming);

        let mut set = ImageSet::new();
        set.push_staged(staged);
        assert_eq!(stager.registry().live_count(), 3);

        assert!(set.remove_staged(1));

        let names: Vec<&str> = set
            .pending_upload()
            .iter()
            .map(|s| s.file_name.as_str())
            .collect();
        assert_eq!(names, vec!["a.png", "c.png"]);
        assert_eq!(stager.registry().live_count(), 2);

        assert!(!set.remove_staged(5));
    }

    #[test]
    fn test_effective_len_counts_survivors_and_staged() {
        let stager = FileStager::new(1024);
        let (staged, _) = stager.stage(vec![IncomingFile {
            file_name: "new.png".to_string(),
            content_type: "image/png".to_string(),
            bytes: vec![0],
        }]);

        let mut set = ImageSet::from_current(refs(&["/a.png", "/b.png"]));
        set.push_staged(staged);
        assert_eq!(set.effective_len(), 3);

        set.mark_for_deletion(&ImageRef::new("/a.png"));
        assert_eq!(set.effective_len(), 2);
    }
}

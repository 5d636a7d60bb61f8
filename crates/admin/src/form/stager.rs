//! Staging of locally selected image files.
//!
//! Selected files are held in memory with a revocable preview handle each,
//! so a front-end can render the image before anything touches the network.
//! Handles are scoped acquisitions: one handle per staged file, revoked when
//! the file is removed, when the staged list is rebuilt, and on form
//! teardown. Revocation rides on `Drop`, so no exit path can leak an entry.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, Weak};

use uuid::Uuid;

/// URI scheme for local preview handles.
const PREVIEW_SCHEME: &str = "preview:";

/// A file handed to the stager (from a picker, a drop event, or disk).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Shared registry mapping live preview URIs to staged file bytes.
///
/// The registry is what makes a preview URI dereferenceable: a renderer
/// resolves the URI back to the bytes for display. Entries exist exactly as
/// long as the owning [`PreviewHandle`] is alive.
#[derive(Debug, Clone, Default)]
pub struct PreviewRegistry {
    entries: Arc<Mutex<HashMap<Uuid, Arc<[u8]>>>>,
}

impl PreviewRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register bytes and return the owning handle.
    fn acquire(&self, bytes: Arc<[u8]>) -> PreviewHandle {
        let id = Uuid::new_v4();
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(id, bytes);
        }
        PreviewHandle {
            id,
            uri: format!("{PREVIEW_SCHEME}{id}"),
            entries: Arc::downgrade(&self.entries),
        }
    }

    /// Dereference a preview URI to the staged bytes, if the handle is live.
    #[must_use]
    pub fn resolve(&self, uri: &str) -> Option<Arc<[u8]>> {
        let id = uri.strip_prefix(PREVIEW_SCHEME)?.parse::<Uuid>().ok()?;
        self.entries.lock().ok()?.get(&id).cloned()
    }

    /// Number of live preview handles.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }
}

/// Owning handle for one preview URI.
///
/// Dropping the handle revokes the URI: subsequent `resolve` calls return
/// `None`. Handles are deliberately not cloneable so the 1:1 pairing with a
/// staged file holds.
#[derive(Debug)]
pub struct PreviewHandle {
    id: Uuid,
    uri: String,
    entries: Weak<Mutex<HashMap<Uuid, Arc<[u8]>>>>,
}

impl PreviewHandle {
    /// The dereferenceable local URI for this staged file.
    #[must_use]
    pub fn uri(&self) -> &str {
        &self.uri
    }
}

impl Drop for PreviewHandle {
    fn drop(&mut self) {
        if let Some(entries) = self.entries.upgrade()
            && let Ok(mut entries) = entries.lock()
        {
            entries.remove(&self.id);
        }
    }
}

/// A staged image: accepted bytes plus its live preview handle.
#[derive(Debug)]
pub struct StagedImage {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Arc<[u8]>,
    pub preview: PreviewHandle,
}

/// Result of one staging batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StagingOutcome {
    /// Files accepted and appended to the staged list.
    pub accepted: usize,
    /// Files rejected for exceeding the size limit. The caller surfaces one
    /// warning per batch with this count.
    pub rejected: usize,
}

/// Turns raw file selections into staged, previewable uploads.
///
/// Never touches the network; enforcement here is purely local (size limit
/// and preview lifecycle).
#[derive(Debug, Clone)]
pub struct FileStager {
    max_bytes: u64,
    registry: PreviewRegistry,
}

impl FileStager {
    #[must_use]
    pub fn new(max_bytes: u64) -> Self {
        Self {
            max_bytes,
            registry: PreviewRegistry::new(),
        }
    }

    /// The per-file size limit in bytes.
    #[must_use]
    pub const fn max_bytes(&self) -> u64 {
        self.max_bytes
    }

    /// The registry previews are allocated from.
    #[must_use]
    pub const fn registry(&self) -> &PreviewRegistry {
        &self.registry
    }

    /// Stage a batch of files.
    ///
    /// Oversized files are dropped and counted; each accepted file gets a
    /// fresh preview handle, in acceptance order.
    pub fn stage(&self, incoming: Vec<IncomingFile>) -> (Vec<StagedImage>, usize) {
        let mut staged = Vec::new();
        let mut rejected = 0usize;

        for file in incoming {
            if file.bytes.len() as u64 > self.max_bytes {
                rejected += 1;
                continue;
            }

            let bytes: Arc<[u8]> = file.bytes.into();
            let preview = self.registry.acquire(Arc::clone(&bytes));
            staged.push(StagedImage {
                file_name: file.file_name,
                content_type: file.content_type,
                bytes,
                preview,
            });
        }

        (staged, rejected)
    }
}

//! Persisted image references.

use serde::{Deserialize, Serialize};

/// Reference to an image already persisted by the backend.
///
/// The backend addresses product images by their stored URL, so deleting or
/// reordering images is done in terms of these references rather than file
/// contents.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageRef(String);

impl ImageRef {
    /// Create a reference from anything string-like.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    /// The underlying stored URL.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper and return the underlying `String`.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for ImageRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ImageRef {
    fn from(url: String) -> Self {
        Self(url)
    }
}

impl From<&str> for ImageRef {
    fn from(url: &str) -> Self {
        Self(url.to_string())
    }
}

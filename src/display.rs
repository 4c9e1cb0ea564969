//! In-memory store of displayable images.
//!
//! The orchestrator never hands raw bytes to the presenter. It stores them
//! here and passes around an [`ImageHandle`], which stays valid until it is
//! revoked.

use std::collections::HashMap;
use std::fmt;

use crate::ports::GeneratedImage;

/// A reference to image bytes held by an [`ImageStore`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageHandle {
    id: u64,
    mime_type: String,
}

impl ImageHandle {
    /// MIME type of the referenced image.
    #[must_use]
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }
}

impl fmt::Display for ImageHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "image:{}", self.id)
    }
}

/// Owns image bytes behind handles.
#[derive(Debug, Default)]
pub struct ImageStore {
    next_id: u64,
    images: HashMap<u64, GeneratedImage>,
}

impl ImageStore {
    /// Take ownership of an image and return a handle to it.
    pub fn create(&mut self, image: GeneratedImage) -> ImageHandle {
        self.next_id += 1;
        let handle = ImageHandle { id: self.next_id, mime_type: image.mime_type.clone() };
        self.images.insert(handle.id, image);
        handle
    }

    /// Release the bytes behind a handle. Returns `false` if it was already released.
    pub fn revoke(&mut self, handle: &ImageHandle) -> bool {
        self.images.remove(&handle.id).is_some()
    }

    /// Look up the image behind a live handle.
    #[must_use]
    pub fn get(&self, handle: &ImageHandle) -> Option<&GeneratedImage> {
        self.images.get(&handle.id)
    }

    /// Number of live images.
    #[must_use]
    pub(crate) fn len(&self) -> usize {
        self.images.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png(bytes: &[u8]) -> GeneratedImage {
        GeneratedImage { data: bytes.to_vec(), mime_type: "image/png".into() }
    }

    #[test]
    fn create_then_get_returns_same_bytes() {
        let mut store = ImageStore::default();
        let handle = store.create(png(&[1, 2, 3]));
        assert_eq!(handle.mime_type(), "image/png");
        assert_eq!(store.get(&handle).unwrap().data, vec![1, 2, 3]);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn revoke_releases_once() {
        let mut store = ImageStore::default();
        let handle = store.create(png(&[9]));
        assert!(store.revoke(&handle));
        assert!(!store.revoke(&handle));
        assert!(store.get(&handle).is_none());
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn handles_are_unique() {
        let mut store = ImageStore::default();
        let a = store.create(png(&[1]));
        let b = store.create(png(&[1]));
        assert_ne!(a, b);
        assert_ne!(a.to_string(), b.to_string());
    }
}

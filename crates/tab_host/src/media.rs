//! Transient media-handle contracts for displaying stored wallpaper blobs.

use std::{cell::RefCell, rc::Rc};

use crate::blob::BlobPayload;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Coarse media kind derived from a blob's declared content type.
pub enum MediaKind {
    /// Static or animated bitmap image.
    Image,
    /// Video media with playback lifecycle.
    Video,
}

impl MediaKind {
    /// Classifies a MIME content type; `video/*` is video, everything else image.
    pub fn from_content_type(content_type: &str) -> Self {
        if content_type.starts_with("video/") {
            Self::Video
        } else {
            Self::Image
        }
    }
}

/// Revocable, session-scoped reference to displayable in-memory media.
///
/// The underlying resource is released through the injected revoker exactly
/// once, when the handle is dropped. Callers never revoke manually.
pub struct TransientMedia {
    url: String,
    kind: MediaKind,
    revoker: Option<Box<dyn FnOnce(&str)>>,
}

impl TransientMedia {
    /// Creates a handle that calls `revoker` with the URL on drop.
    pub fn new(url: String, kind: MediaKind, revoker: impl FnOnce(&str) + 'static) -> Self {
        Self {
            url,
            kind,
            revoker: Some(Box::new(revoker)),
        }
    }

    /// Returns the displayable URL for this handle.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the media kind classified at creation time.
    pub fn kind(&self) -> MediaKind {
        self.kind
    }
}

impl Drop for TransientMedia {
    fn drop(&mut self) {
        if let Some(revoke) = self.revoker.take() {
            revoke(&self.url);
        }
    }
}

impl std::fmt::Debug for TransientMedia {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransientMedia")
            .field("url", &self.url)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

/// Host service minting revocable display URLs for blob payloads.
pub trait MediaUrlFactory {
    /// Derives a transient display handle from `payload`.
    ///
    /// # Errors
    ///
    /// Returns an error when the host cannot materialize a display URL.
    fn create_media(&self, payload: &BlobPayload) -> Result<TransientMedia, String>;
}

#[derive(Debug, Clone, Default)]
/// In-memory media factory minting fake URLs and recording revocations.
pub struct MemoryMediaUrlFactory {
    minted: Rc<RefCell<u32>>,
    revoked: Rc<RefCell<Vec<String>>>,
}

impl MemoryMediaUrlFactory {
    /// Returns the URLs revoked so far, in revocation order.
    pub fn revoked(&self) -> Vec<String> {
        self.revoked.borrow().clone()
    }

    /// Returns how many handles this factory has minted.
    pub fn minted_count(&self) -> u32 {
        *self.minted.borrow()
    }
}

impl MediaUrlFactory for MemoryMediaUrlFactory {
    fn create_media(&self, payload: &BlobPayload) -> Result<TransientMedia, String> {
        let mut minted = self.minted.borrow_mut();
        *minted += 1;
        let url = format!("blob:memory/{}", *minted);
        let revoked = self.revoked.clone();
        Ok(TransientMedia::new(
            url,
            MediaKind::from_content_type(&payload.content_type),
            move |url| revoked.borrow_mut().push(url.to_string()),
        ))
    }
}

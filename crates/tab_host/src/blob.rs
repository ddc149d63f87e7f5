//! Wallpaper blob-store contracts and shared payload model.

use std::{cell::RefCell, collections::HashMap, future::Future, pin::Pin, rc::Rc};

/// Fixed record name the current wallpaper is stored under.
///
/// At most one wallpaper exists at a time; every save replaces the previous
/// value under this name.
pub const WALLPAPER_BLOB_KEY: &str = "current";

#[derive(Debug, Clone, PartialEq, Eq)]
/// Binary payload plus its declared content type.
pub struct BlobPayload {
    /// Raw bytes of the stored object.
    pub bytes: Vec<u8>,
    /// MIME content type declared when the object was stored.
    pub content_type: String,
}

impl BlobPayload {
    /// Creates a payload from bytes and a content type.
    pub fn new(bytes: Vec<u8>, content_type: impl Into<String>) -> Self {
        Self {
            bytes,
            content_type: content_type.into(),
        }
    }
}

/// Object-safe boxed future used by [`BlobStore`] async methods.
pub type BlobStoreFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Host service for named binary objects in a local transactional store.
///
/// Unlike [`crate::KvStore`] callers, blob-store callers see write failures:
/// a failed wallpaper save must surface to the UI so it does not reload into
/// a page with no saved file.
pub trait BlobStore {
    /// Stores `payload` under `name`, fully replacing any previous value.
    fn put_blob<'a>(
        &'a self,
        name: &'a str,
        payload: BlobPayload,
    ) -> BlobStoreFuture<'a, Result<(), String>>;

    /// Loads the payload stored under `name`; absence is not an error.
    fn get_blob<'a>(
        &'a self,
        name: &'a str,
    ) -> BlobStoreFuture<'a, Result<Option<BlobPayload>, String>>;

    /// Deletes the payload stored under `name`.
    fn delete_blob<'a>(&'a self, name: &'a str) -> BlobStoreFuture<'a, Result<(), String>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// No-op blob store for unsupported targets and baseline tests.
pub struct NoopBlobStore;

impl BlobStore for NoopBlobStore {
    fn put_blob<'a>(
        &'a self,
        _name: &'a str,
        _payload: BlobPayload,
    ) -> BlobStoreFuture<'a, Result<(), String>> {
        Box::pin(async { Ok(()) })
    }

    fn get_blob<'a>(
        &'a self,
        _name: &'a str,
    ) -> BlobStoreFuture<'a, Result<Option<BlobPayload>, String>> {
        Box::pin(async { Ok(None) })
    }

    fn delete_blob<'a>(&'a self, _name: &'a str) -> BlobStoreFuture<'a, Result<(), String>> {
        Box::pin(async { Ok(()) })
    }
}

#[derive(Debug, Clone, Default)]
/// In-memory blob store keyed by name.
pub struct MemoryBlobStore {
    inner: Rc<RefCell<HashMap<String, BlobPayload>>>,
}

impl BlobStore for MemoryBlobStore {
    fn put_blob<'a>(
        &'a self,
        name: &'a str,
        payload: BlobPayload,
    ) -> BlobStoreFuture<'a, Result<(), String>> {
        Box::pin(async move {
            self.inner.borrow_mut().insert(name.to_string(), payload);
            Ok(())
        })
    }

    fn get_blob<'a>(
        &'a self,
        name: &'a str,
    ) -> BlobStoreFuture<'a, Result<Option<BlobPayload>, String>> {
        Box::pin(async move { Ok(self.inner.borrow().get(name).cloned()) })
    }

    fn delete_blob<'a>(&'a self, name: &'a str) -> BlobStoreFuture<'a, Result<(), String>> {
        Box::pin(async move {
            self.inner.borrow_mut().remove(name);
            Ok(())
        })
    }
}

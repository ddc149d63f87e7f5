//! Wallpaper lifecycle: one saved blob, one live display handle.

use std::cell::RefCell;
use std::rc::Rc;

use tab_host::{BlobPayload, BlobStore, MediaKind, MediaUrlFactory, TransientMedia, WALLPAPER_BLOB_KEY};

/// What the wallpaper surface should display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WallpaperState {
    /// No wallpaper is saved; the surface falls back to its base background.
    Empty,
    /// A wallpaper is live under a transient display URL.
    Active {
        /// Session-scoped display URL of the current handle.
        url: String,
        /// Media kind of the current handle.
        kind: MediaKind,
    },
}

/// Owner of the single live wallpaper handle.
///
/// At most one [`TransientMedia`] is alive at a time; replacing or releasing
/// it revokes the previous display URL through the handle's drop. Save
/// failures leave both storage and the live handle untouched.
#[derive(Clone)]
pub struct WallpaperManager {
    blobs: Rc<dyn BlobStore>,
    media: Rc<dyn MediaUrlFactory>,
    current: Rc<RefCell<Option<TransientMedia>>>,
}

impl WallpaperManager {
    /// Creates a manager with no live handle.
    pub fn new(blobs: Rc<dyn BlobStore>, media: Rc<dyn MediaUrlFactory>) -> Self {
        Self {
            blobs,
            media,
            current: Rc::new(RefCell::new(None)),
        }
    }

    /// Current display state.
    pub fn state(&self) -> WallpaperState {
        match self.current.borrow().as_ref() {
            Some(handle) => WallpaperState::Active {
                url: handle.url().to_string(),
                kind: handle.kind(),
            },
            None => WallpaperState::Empty,
        }
    }

    /// Loads the saved wallpaper, replacing any live handle.
    ///
    /// An empty store resolves to [`WallpaperState::Empty`] and is not an
    /// error.
    ///
    /// # Errors
    ///
    /// Returns an error when the store read or URL minting fails; the live
    /// handle is left as it was.
    pub async fn load(&self) -> Result<WallpaperState, String> {
        match self.blobs.get_blob(WALLPAPER_BLOB_KEY).await? {
            Some(payload) => self.activate(&payload),
            None => {
                self.release();
                Ok(WallpaperState::Empty)
            }
        }
    }

    /// Saves a new wallpaper and, only on success, makes it live.
    ///
    /// # Errors
    ///
    /// Returns the store error on a failed write; the previous wallpaper
    /// stays both saved and displayed.
    pub async fn save(&self, payload: BlobPayload) -> Result<WallpaperState, String> {
        self.blobs.put_blob(WALLPAPER_BLOB_KEY, payload.clone()).await?;
        self.activate(&payload)
    }

    /// Deletes the saved wallpaper and releases the live handle.
    ///
    /// # Errors
    ///
    /// Returns the store error on a failed delete; the live handle is kept so
    /// the display matches what is still saved.
    pub async fn clear(&self) -> Result<WallpaperState, String> {
        self.blobs.delete_blob(WALLPAPER_BLOB_KEY).await?;
        self.release();
        Ok(WallpaperState::Empty)
    }

    /// Drops the live handle, revoking its display URL. Storage is untouched.
    pub fn release(&self) {
        self.current.borrow_mut().take();
    }

    fn activate(&self, payload: &BlobPayload) -> Result<WallpaperState, String> {
        let handle = self.media.create_media(payload)?;
        let state = WallpaperState::Active {
            url: handle.url().to_string(),
            kind: handle.kind(),
        };
        // Replacing the slot drops, and thereby revokes, the old handle.
        *self.current.borrow_mut() = Some(handle);
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use tab_host::{BlobStoreFuture, MemoryBlobStore, MemoryMediaUrlFactory};

    use super::*;

    fn manager(
        store: &MemoryBlobStore,
        factory: &MemoryMediaUrlFactory,
    ) -> WallpaperManager {
        WallpaperManager::new(Rc::new(store.clone()), Rc::new(factory.clone()))
    }

    #[test]
    fn empty_store_loads_as_empty_not_error() {
        let store = MemoryBlobStore::default();
        let factory = MemoryMediaUrlFactory::default();
        let wallpaper = manager(&store, &factory);

        let state = block_on(wallpaper.load()).expect("load");
        assert_eq!(state, WallpaperState::Empty);
        assert_eq!(factory.minted_count(), 0);
    }

    #[test]
    fn save_persists_and_activates_the_payload() {
        let store = MemoryBlobStore::default();
        let factory = MemoryMediaUrlFactory::default();
        let wallpaper = manager(&store, &factory);

        let state = block_on(wallpaper.save(BlobPayload::new(vec![1, 2], "video/webm")))
            .expect("save");
        let WallpaperState::Active { kind, .. } = state else {
            panic!("expected active wallpaper");
        };
        assert_eq!(kind, MediaKind::Video);
        assert_eq!(wallpaper.state(), state);

        let stored = block_on(store.get_blob(WALLPAPER_BLOB_KEY))
            .expect("get")
            .expect("present");
        assert_eq!(stored.bytes, vec![1, 2]);
    }

    #[test]
    fn replacing_the_wallpaper_revokes_the_previous_url() {
        let store = MemoryBlobStore::default();
        let factory = MemoryMediaUrlFactory::default();
        let wallpaper = manager(&store, &factory);

        let first = block_on(wallpaper.save(BlobPayload::new(vec![1], "image/png"))).expect("first");
        let WallpaperState::Active { url: first_url, .. } = first else {
            panic!("expected active wallpaper");
        };
        assert!(factory.revoked().is_empty());

        block_on(wallpaper.save(BlobPayload::new(vec![2], "image/jpeg"))).expect("second");
        assert_eq!(factory.revoked(), vec![first_url]);
    }

    #[test]
    fn failed_save_leaves_the_current_wallpaper_live() {
        struct FailingBlobStore;

        impl BlobStore for FailingBlobStore {
            fn put_blob<'a>(
                &'a self,
                _name: &'a str,
                _payload: BlobPayload,
            ) -> BlobStoreFuture<'a, Result<(), String>> {
                Box::pin(async { Err("quota exceeded".to_string()) })
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

        let factory = MemoryMediaUrlFactory::default();
        let wallpaper =
            WallpaperManager::new(Rc::new(FailingBlobStore), Rc::new(factory.clone()));

        let err = block_on(wallpaper.save(BlobPayload::new(vec![1], "image/png")))
            .expect_err("save must fail");
        assert_eq!(err, "quota exceeded");
        assert_eq!(wallpaper.state(), WallpaperState::Empty);
        assert_eq!(factory.minted_count(), 0);
    }

    #[test]
    fn clear_deletes_storage_and_revokes_the_handle() {
        let store = MemoryBlobStore::default();
        let factory = MemoryMediaUrlFactory::default();
        let wallpaper = manager(&store, &factory);

        block_on(wallpaper.save(BlobPayload::new(vec![1], "image/png"))).expect("save");
        block_on(wallpaper.clear()).expect("clear");

        assert_eq!(wallpaper.state(), WallpaperState::Empty);
        assert_eq!(factory.revoked().len(), 1);
        assert_eq!(
            block_on(store.get_blob(WALLPAPER_BLOB_KEY)).expect("get"),
            None
        );
    }

    #[test]
    fn release_revokes_without_touching_storage() {
        let store = MemoryBlobStore::default();
        let factory = MemoryMediaUrlFactory::default();
        let wallpaper = manager(&store, &factory);

        block_on(wallpaper.save(BlobPayload::new(vec![1], "image/png"))).expect("save");
        wallpaper.release();

        assert_eq!(wallpaper.state(), WallpaperState::Empty);
        assert_eq!(factory.revoked().len(), 1);
        assert!(block_on(store.get_blob(WALLPAPER_BLOB_KEY))
            .expect("get")
            .is_some());
    }

    #[test]
    fn load_after_save_mints_a_fresh_handle_from_storage() {
        let store = MemoryBlobStore::default();
        let factory = MemoryMediaUrlFactory::default();
        let wallpaper = manager(&store, &factory);

        block_on(wallpaper.save(BlobPayload::new(vec![7], "image/png"))).expect("save");
        let reloaded = manager(&store, &factory);
        let state = block_on(reloaded.load()).expect("load");

        assert!(matches!(state, WallpaperState::Active { kind: MediaKind::Image, .. }));
    }
}

//! `localStorage`-backed key-value store implementation.
//!
//! Same-origin fallback for environments without the extension runtime
//! (local development, tests). Synchronous at the browser API boundary while
//! implementing the async [`tab_host::KvStore`] contract.

use tab_host::{KvStore, KvStoreFuture};

#[derive(Debug, Clone, Copy, Default)]
/// Key-value store backed by `window.localStorage`.
pub struct LocalStorageStore;

#[cfg(target_arch = "wasm32")]
fn backing_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

impl LocalStorageStore {
    /// Loads the raw JSON string stored under `key`.
    pub fn load_json(self, key: &str) -> Option<String> {
        #[cfg(target_arch = "wasm32")]
        {
            backing_storage()?.get_item(key).ok().flatten()
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = key;
            None
        }
    }

    /// Saves a raw JSON string under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error when `localStorage` is unavailable or the write fails
    /// (quota exceeded, privacy mode).
    pub fn save_json(self, key: &str, raw_json: &str) -> Result<(), String> {
        #[cfg(target_arch = "wasm32")]
        {
            let storage =
                backing_storage().ok_or_else(|| "localStorage unavailable".to_string())?;
            storage
                .set_item(key, raw_json)
                .map_err(|err| format!("localStorage set_item failed: {err:?}"))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = (key, raw_json);
            Ok(())
        }
    }

    /// Deletes the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error when `localStorage` is unavailable or the delete fails.
    pub fn delete_json(self, key: &str) -> Result<(), String> {
        #[cfg(target_arch = "wasm32")]
        {
            let storage =
                backing_storage().ok_or_else(|| "localStorage unavailable".to_string())?;
            storage
                .remove_item(key)
                .map_err(|err| format!("localStorage remove_item failed: {err:?}"))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = key;
            Ok(())
        }
    }
}

impl KvStore for LocalStorageStore {
    fn load_value<'a>(&'a self, key: &'a str) -> KvStoreFuture<'a, Result<Option<String>, String>> {
        let store = *self;
        Box::pin(async move { Ok(store.load_json(key)) })
    }

    fn save_value<'a>(
        &'a self,
        key: &'a str,
        raw_json: &'a str,
    ) -> KvStoreFuture<'a, Result<(), String>> {
        let store = *self;
        Box::pin(async move { store.save_json(key, raw_json) })
    }

    fn delete_value<'a>(&'a self, key: &'a str) -> KvStoreFuture<'a, Result<(), String>> {
        let store = *self;
        Box::pin(async move { store.delete_json(key) })
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use tab_host::KvStore;

    use super::*;

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn local_storage_off_wasm_reads_absent_and_accepts_writes() {
        let store = LocalStorageStore;
        let store_obj: &dyn KvStore = &store;

        assert_eq!(
            block_on(store_obj.load_value("zenSettings")).expect("load"),
            None
        );
        block_on(store_obj.save_value("zenSettings", "{}")).expect("save");
        block_on(store_obj.delete_value("zenSettings")).expect("delete");
    }
}

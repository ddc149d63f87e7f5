//! Key-value storage contracts for user preferences (JSON stored as text per key).

use std::{cell::RefCell, collections::HashMap, future::Future, pin::Pin, rc::Rc};

use serde::{de::DeserializeOwned, Serialize};

/// Fixed key the settings record is persisted under.
pub const SETTINGS_KEY: &str = "zenSettings";
/// Fixed key the search history list is persisted under.
pub const SEARCH_HISTORY_KEY: &str = "zenSearchHistory";

/// Object-safe boxed future used by [`KvStore`] async methods.
pub type KvStoreFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Host service for JSON-text values under fixed keys.
///
/// The same contract fronts the asynchronous extension storage area and the
/// synchronous `localStorage` fallback; which backend answers is decided once
/// when the adapter is constructed, never per call.
pub trait KvStore {
    /// Loads the raw JSON string stored under `key`.
    fn load_value<'a>(&'a self, key: &'a str) -> KvStoreFuture<'a, Result<Option<String>, String>>;

    /// Saves a raw JSON string under `key`, replacing any previous value.
    fn save_value<'a>(
        &'a self,
        key: &'a str,
        raw_json: &'a str,
    ) -> KvStoreFuture<'a, Result<(), String>>;

    /// Deletes the value stored under `key`.
    fn delete_value<'a>(&'a self, key: &'a str) -> KvStoreFuture<'a, Result<(), String>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// No-op key-value store for unsupported targets and baseline tests.
pub struct NoopKvStore;

impl KvStore for NoopKvStore {
    fn load_value<'a>(&'a self, _key: &'a str) -> KvStoreFuture<'a, Result<Option<String>, String>> {
        Box::pin(async { Ok(None) })
    }

    fn save_value<'a>(
        &'a self,
        _key: &'a str,
        _raw_json: &'a str,
    ) -> KvStoreFuture<'a, Result<(), String>> {
        Box::pin(async { Ok(()) })
    }

    fn delete_value<'a>(&'a self, _key: &'a str) -> KvStoreFuture<'a, Result<(), String>> {
        Box::pin(async { Ok(()) })
    }
}

#[derive(Debug, Clone, Default)]
/// In-memory key-value store keyed by string.
pub struct MemoryKvStore {
    inner: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryKvStore {
    /// Returns the number of keys currently stored.
    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    /// Returns `true` when no keys are stored.
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }
}

impl KvStore for MemoryKvStore {
    fn load_value<'a>(&'a self, key: &'a str) -> KvStoreFuture<'a, Result<Option<String>, String>> {
        Box::pin(async move { Ok(self.inner.borrow().get(key).cloned()) })
    }

    fn save_value<'a>(
        &'a self,
        key: &'a str,
        raw_json: &'a str,
    ) -> KvStoreFuture<'a, Result<(), String>> {
        Box::pin(async move {
            self.inner
                .borrow_mut()
                .insert(key.to_string(), raw_json.to_string());
            Ok(())
        })
    }

    fn delete_value<'a>(&'a self, key: &'a str) -> KvStoreFuture<'a, Result<(), String>> {
        Box::pin(async move {
            self.inner.borrow_mut().remove(key);
            Ok(())
        })
    }
}

/// Loads and deserializes a typed value through a [`KvStore`] implementation.
///
/// # Errors
///
/// Returns an error when the store or JSON deserialization fails.
pub async fn load_kv_with<S: KvStore + ?Sized, T: DeserializeOwned>(
    store: &S,
    key: &str,
) -> Result<Option<T>, String> {
    let Some(raw) = store.load_value(key).await? else {
        return Ok(None);
    };
    let value = serde_json::from_str(&raw).map_err(|e| e.to_string())?;
    Ok(Some(value))
}

/// Serializes and saves a typed value through a [`KvStore`] implementation.
///
/// # Errors
///
/// Returns an error when serialization or the store save fails.
pub async fn save_kv_with<S: KvStore + ?Sized, T: Serialize>(
    store: &S,
    key: &str,
    value: &T,
) -> Result<(), String> {
    let raw = serde_json::to_string(value).map_err(|e| e.to_string())?;
    store.save_value(key, &raw).await
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use serde::{Deserialize, Serialize};

    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Pref {
        clock_shown: bool,
    }

    #[test]
    fn memory_kv_store_round_trip_and_delete() {
        let store = MemoryKvStore::default();
        let store_obj: &dyn KvStore = &store;

        block_on(store_obj.save_value(SETTINGS_KEY, "{\"blurLevel\":20}")).expect("save");
        assert_eq!(
            block_on(store_obj.load_value(SETTINGS_KEY)).expect("load"),
            Some("{\"blurLevel\":20}".to_string())
        );
        block_on(store_obj.delete_value(SETTINGS_KEY)).expect("delete");
        assert_eq!(
            block_on(store_obj.load_value(SETTINGS_KEY)).expect("load"),
            None
        );
        assert!(store.is_empty());
    }

    #[test]
    fn typed_helpers_round_trip() {
        let store = MemoryKvStore::default();
        let store_obj: &dyn KvStore = &store;

        block_on(save_kv_with(store_obj, "pref", &Pref { clock_shown: true }))
            .expect("save typed value");
        let loaded: Option<Pref> = block_on(load_kv_with(store_obj, "pref")).expect("load typed");
        assert_eq!(loaded, Some(Pref { clock_shown: true }));
    }

    #[test]
    fn typed_load_fails_on_corrupt_json() {
        let store = MemoryKvStore::default();
        block_on(store.save_value("pref", "{not json")).expect("save");
        let err = block_on(load_kv_with::<_, Pref>(&store, "pref"))
            .expect_err("expected deserialization failure");
        assert!(!err.is_empty());
    }

    #[test]
    fn noop_kv_store_is_empty_and_successful() {
        let store = NoopKvStore;
        let store_obj: &dyn KvStore = &store;
        assert_eq!(block_on(store_obj.load_value("k")).expect("load"), None);
        block_on(store_obj.save_value("k", "{}")).expect("save");
        block_on(store_obj.delete_value("k")).expect("delete");
    }
}

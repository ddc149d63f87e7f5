//! Storage-strategy probing and concrete adapter factories for runtime wiring.
//!
//! The extension storage probe runs once, when [`settings_kv_store`] builds
//! the adapter; callers hold the returned adapter for the whole session
//! instead of re-branching per call.

use tab_host::{KvStore, KvStoreFuture};

use crate::{
    extension::{extension_storage_available, ExtensionStorageStore},
    local::LocalStorageStore,
    media::WebMediaUrlFactory,
    suggest::WebSuggestionService,
    theme::WebThemeColorService,
    WebBlobStore,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Runtime-probed storage strategy for preference persistence.
pub enum StorageStrategy {
    /// Extension storage area is reachable; preferences live there.
    Extension,
    /// Same-origin `localStorage` fallback for non-extension environments.
    SameOrigin,
}

/// Probes the environment and returns the storage strategy to use.
pub fn detect_storage_strategy() -> StorageStrategy {
    if extension_storage_available() {
        StorageStrategy::Extension
    } else {
        StorageStrategy::SameOrigin
    }
}

/// Returns the detected storage strategy as a stable string token.
pub fn storage_strategy_name() -> &'static str {
    match detect_storage_strategy() {
        StorageStrategy::Extension => "extension",
        StorageStrategy::SameOrigin => "same-origin",
    }
}

/// Adapter enum that erases the probed key-value backend behind [`KvStore`].
#[derive(Debug, Clone, Copy)]
pub enum KvStoreAdapter {
    /// Extension storage area backend.
    Extension(ExtensionStorageStore),
    /// `localStorage` fallback backend.
    SameOrigin(LocalStorageStore),
}

impl KvStore for KvStoreAdapter {
    fn load_value<'a>(&'a self, key: &'a str) -> KvStoreFuture<'a, Result<Option<String>, String>> {
        match self {
            Self::Extension(store) => store.load_value(key),
            Self::SameOrigin(store) => store.load_value(key),
        }
    }

    fn save_value<'a>(
        &'a self,
        key: &'a str,
        raw_json: &'a str,
    ) -> KvStoreFuture<'a, Result<(), String>> {
        match self {
            Self::Extension(store) => store.save_value(key, raw_json),
            Self::SameOrigin(store) => store.save_value(key, raw_json),
        }
    }

    fn delete_value<'a>(&'a self, key: &'a str) -> KvStoreFuture<'a, Result<(), String>> {
        match self {
            Self::Extension(store) => store.delete_value(key),
            Self::SameOrigin(store) => store.delete_value(key),
        }
    }
}

/// Builds the settings key-value store for the detected strategy.
pub fn settings_kv_store() -> KvStoreAdapter {
    match detect_storage_strategy() {
        StorageStrategy::Extension => KvStoreAdapter::Extension(ExtensionStorageStore),
        StorageStrategy::SameOrigin => KvStoreAdapter::SameOrigin(LocalStorageStore),
    }
}

/// Returns the browser wallpaper blob store.
pub fn wallpaper_blob_store() -> WebBlobStore {
    WebBlobStore
}

/// Returns the browser object-URL media factory.
pub fn media_url_factory() -> WebMediaUrlFactory {
    WebMediaUrlFactory
}

/// Returns the browser theme-color service.
pub fn theme_color_service() -> WebThemeColorService {
    WebThemeColorService
}

/// Returns the browser suggestion service.
pub fn suggestion_service() -> WebSuggestionService {
    WebSuggestionService
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use tab_host::{KvStore, SETTINGS_KEY};

    use super::*;

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn probe_selects_same_origin_off_wasm() {
        assert_eq!(detect_storage_strategy(), StorageStrategy::SameOrigin);
        assert_eq!(storage_strategy_name(), "same-origin");
        assert!(matches!(
            settings_kv_store(),
            KvStoreAdapter::SameOrigin(_)
        ));
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn same_origin_adapter_dispatches_parity_behavior() {
        let adapter = settings_kv_store();
        assert_eq!(
            block_on(adapter.load_value(SETTINGS_KEY)).expect("load"),
            None
        );
        block_on(adapter.save_value(SETTINGS_KEY, "{}")).expect("save");
        block_on(adapter.delete_value(SETTINGS_KEY)).expect("delete");
    }
}

//! Browser (`wasm32`) implementations of [`tab_host`] service contracts.
//!
//! This crate is the concrete browser-side wiring layer for the new-tab page:
//! extension-storage and `localStorage` key-value backends, the IndexedDB
//! wallpaper blob store, object-URL media handles, the browser theme-color
//! query, and the suggestion endpoint fetch.
//!
//! Storage-backend selection happens once, at adapter construction, by probing
//! for the extension storage API; see [`adapters`].

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

/// Runtime storage-strategy probing and concrete adapter factories.
pub mod adapters;
pub mod extension;
pub mod idb;
mod interop;
pub mod local;
pub mod media;
pub mod suggest;
pub mod theme;

pub use adapters::{
    detect_storage_strategy, media_url_factory, settings_kv_store, storage_strategy_name,
    suggestion_service, theme_color_service, wallpaper_blob_store, KvStoreAdapter, StorageStrategy,
};
pub use extension::ExtensionStorageStore;
pub use idb::WebBlobStore;
pub use local::LocalStorageStore;
pub use media::WebMediaUrlFactory;
pub use suggest::WebSuggestionService;
pub use theme::WebThemeColorService;

//! Typed host-domain contracts and shared models for the new-tab page.
//!
//! This crate is the API-first boundary for browser capabilities the page
//! depends on: key-value settings storage, the wallpaper blob store, the
//! best-effort browser theme-color query, and the search-suggestion endpoint.
//! Concrete browser adapters live in `tab_host_web`; the runtime receives
//! every service as an injected trait object.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod blob;
pub mod kv;
pub mod media;
pub mod suggest;
pub mod theme;

pub use blob::{
    BlobPayload, BlobStore, BlobStoreFuture, MemoryBlobStore, NoopBlobStore, WALLPAPER_BLOB_KEY,
};
pub use kv::{
    load_kv_with, save_kv_with, KvStore, KvStoreFuture, MemoryKvStore, NoopKvStore,
    SEARCH_HISTORY_KEY, SETTINGS_KEY,
};
pub use media::{MediaKind, MediaUrlFactory, MemoryMediaUrlFactory, TransientMedia};
pub use suggest::{MemorySuggestionService, NoopSuggestionService, SuggestionFuture, SuggestionService};
pub use theme::{NoopThemeColorService, ThemeColorFuture, ThemeColorService};

//! Host service bundle assembled from the browser adapter layer.

use std::rc::Rc;

use tab_host::{BlobStore, KvStore, MediaUrlFactory, SuggestionService, ThemeColorService};
use tab_host_web::{
    media_url_factory, settings_kv_store, storage_strategy_name, suggestion_service,
    theme_color_service, wallpaper_blob_store,
};

#[derive(Clone)]
/// Host service bundle for new-tab runtime side effects.
///
/// The default bundle probes the page environment once and keeps the chosen
/// storage strategy for the whole session.
pub struct TabHostContext {
    settings: Rc<dyn KvStore>,
    blobs: Rc<dyn BlobStore>,
    media: Rc<dyn MediaUrlFactory>,
    theme: Rc<dyn ThemeColorService>,
    suggestions: Rc<dyn SuggestionService>,
    storage_strategy_name: &'static str,
}

impl Default for TabHostContext {
    fn default() -> Self {
        Self {
            settings: Rc::new(settings_kv_store()),
            blobs: Rc::new(wallpaper_blob_store()),
            media: Rc::new(media_url_factory()),
            theme: Rc::new(theme_color_service()),
            suggestions: Rc::new(suggestion_service()),
            storage_strategy_name: storage_strategy_name(),
        }
    }
}

impl TabHostContext {
    /// Builds a bundle from explicit services, used by tests and harnesses.
    pub fn new(
        settings: Rc<dyn KvStore>,
        blobs: Rc<dyn BlobStore>,
        media: Rc<dyn MediaUrlFactory>,
        theme: Rc<dyn ThemeColorService>,
        suggestions: Rc<dyn SuggestionService>,
        storage_strategy_name: &'static str,
    ) -> Self {
        Self {
            settings,
            blobs,
            media,
            theme,
            suggestions,
            storage_strategy_name,
        }
    }

    /// Returns the configured settings/history key-value store.
    pub fn settings_store(&self) -> Rc<dyn KvStore> {
        self.settings.clone()
    }

    /// Returns the configured wallpaper blob store.
    pub fn blob_store(&self) -> Rc<dyn BlobStore> {
        self.blobs.clone()
    }

    /// Returns the configured transient media URL factory.
    pub fn media_url_factory(&self) -> Rc<dyn MediaUrlFactory> {
        self.media.clone()
    }

    /// Returns the configured browser theme color service.
    pub fn theme_color_service(&self) -> Rc<dyn ThemeColorService> {
        self.theme.clone()
    }

    /// Returns the configured search suggestion service.
    pub fn suggestion_service(&self) -> Rc<dyn SuggestionService> {
        self.suggestions.clone()
    }

    /// Returns the stable name of the selected storage strategy.
    pub fn storage_strategy_name(&self) -> &'static str {
        self.storage_strategy_name
    }
}

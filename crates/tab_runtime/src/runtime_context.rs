//! Runtime provider and context wiring for the new-tab page.
//!
//! This module owns the long-lived settings engine, search history, and
//! wallpaper manager, and mirrors their state into reactive signals. UI
//! composition stays in [`crate::components`].

use std::rc::Rc;

use leptos::*;

use crate::{
    engine::{EngineStatus, SettingsEngine, WriteScheduler},
    host::TabHostContext,
    model::SettingsRecord,
    search::SearchHistory,
    wallpaper::{WallpaperManager, WallpaperState},
};

#[derive(Clone, Copy)]
/// Leptos context for reading new-tab state and reaching the host services.
pub struct TabRuntimeContext {
    /// Host service bundle assembled by the entry layer.
    pub host: StoredValue<TabHostContext>,
    /// Long-lived settings engine; updates flow through [`Self::settings`].
    pub engine: StoredValue<SettingsEngine>,
    /// Recent-search history manager.
    pub history: StoredValue<SearchHistory>,
    /// Wallpaper blob and display-handle manager.
    pub wallpaper_manager: StoredValue<WallpaperManager>,
    /// Hydration status; the page renders a blank gate until `Ready`.
    pub status: RwSignal<EngineStatus>,
    /// Reactive mirror of the canonical settings record.
    pub settings: RwSignal<SettingsRecord>,
    /// Reactive wallpaper display state.
    pub wallpaper: RwSignal<WallpaperState>,
    /// Reactive mirror of the search history entries.
    pub history_entries: RwSignal<Vec<String>>,
    /// Browser frame color reported by the extension theme API, if any.
    pub frame_color: RwSignal<Option<String>>,
    /// True while the clock position is being adjusted; forces the clock
    /// visible even when [`crate::model::SettingsRecord::clock_show`] is off.
    pub positioning: RwSignal<bool>,
}

impl TabRuntimeContext {
    /// Applies a settings patch through the engine.
    pub fn update_settings(&self, patch: crate::model::SettingsPatch) {
        self.engine.get_value().update(patch);
    }

    /// Records a submitted search query and refreshes the history mirror.
    pub fn record_search(&self, query: &str) {
        let history = self.history.get_value();
        history.record(query);
        self.history_entries.set(history.entries());
    }

    /// Clears the search history and its persisted record.
    pub fn clear_search_history(&self) {
        self.history.get_value().clear();
        self.history_entries.set(Vec::new());
    }
}

fn write_scheduler() -> Rc<dyn WriteScheduler> {
    #[cfg(target_arch = "wasm32")]
    {
        Rc::new(crate::engine::TimeoutScheduler::new())
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        Rc::new(crate::engine::ManualScheduler::new())
    }
}

fn install_boot_hydration(runtime: TabRuntimeContext) {
    let engine = runtime.engine.get_value();
    let history = runtime.history.get_value();
    let wallpaper_manager = runtime.wallpaper_manager.get_value();
    let theme = runtime.host.get_value().theme_color_service();

    spawn_local(async move {
        engine.hydrate().await;
        runtime.status.set(engine.status());

        history.hydrate().await;
        runtime.history_entries.set(history.entries());

        match wallpaper_manager.load().await {
            Ok(state) => runtime.wallpaper.set(state),
            Err(err) => logging::warn!("wallpaper load failed: {err}"),
        }

        runtime.frame_color.set(theme.frame_color().await);
    });
}

#[component]
/// Provides [`TabRuntimeContext`] to descendant components and boots
/// persisted state.
pub fn TabProvider(children: Children) -> impl IntoView {
    let host_bundle = TabHostContext::default();
    let engine_value = SettingsEngine::new(host_bundle.settings_store(), write_scheduler());
    let history_value = SearchHistory::new(host_bundle.settings_store());
    let wallpaper_value = WallpaperManager::new(
        host_bundle.blob_store(),
        host_bundle.media_url_factory(),
    );

    let host = store_value(host_bundle);
    let engine = store_value(engine_value.clone());
    let history = store_value(history_value);
    let wallpaper_manager = store_value(wallpaper_value);
    let status = create_rw_signal(EngineStatus::Loading);
    let settings = create_rw_signal(SettingsRecord::default());
    let wallpaper = create_rw_signal(WallpaperState::Empty);
    let history_entries = create_rw_signal(Vec::<String>::new());
    let frame_color = create_rw_signal(None::<String>);
    let positioning = create_rw_signal(false);

    // Every engine change, including hydration, lands in the signal.
    engine_value.subscribe(move |record| settings.set(record.clone()));

    let runtime = TabRuntimeContext {
        host,
        engine,
        history,
        wallpaper_manager,
        status,
        settings,
        wallpaper,
        history_entries,
        frame_color,
        positioning,
    };

    provide_context(runtime);
    install_boot_hydration(runtime);

    children().into_view()
}

/// Returns the current [`TabRuntimeContext`].
///
/// # Panics
///
/// Panics if called outside [`TabProvider`].
pub fn use_tab_runtime() -> TabRuntimeContext {
    use_context::<TabRuntimeContext>().expect("TabRuntimeContext not provided")
}

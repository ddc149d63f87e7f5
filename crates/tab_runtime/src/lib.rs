//! New-tab page runtime: settings engine, search, wallpaper lifecycle, clock,
//! and UI composition over the [`tab_host`] service contracts.

pub mod clock;
pub mod components;
pub mod engine;
pub mod host;
pub mod model;
pub mod runtime_context;
pub mod search;
mod task;
pub mod wallpaper;

pub use components::{use_tab_runtime, TabProvider, TabRuntimeContext, TabShell};
pub use engine::{
    EngineStatus, ManualScheduler, ScheduledWrite, SettingsEngine, SubscriptionId, WriteScheduler,
};
pub use host::TabHostContext;
pub use model::*;
pub use search::{SearchHistory, HISTORY_LIMIT};
pub use wallpaper::{WallpaperManager, WallpaperState};

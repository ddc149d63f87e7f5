//! New-tab page UI composition and interaction surfaces.

mod clock_view;
mod search_overlay;
mod settings_panel;
mod wallpaper_view;

use leptos::*;

use self::{
    clock_view::ClockView, search_overlay::SearchOverlay, settings_panel::SettingsPanel,
    wallpaper_view::WallpaperView,
};
use crate::engine::EngineStatus;

pub use crate::runtime_context::{use_tab_runtime, TabProvider, TabRuntimeContext};

/// Fallback page background used until the browser reports a frame color.
const DEFAULT_FRAME_COLOR: &str = "#1a1a1a";

fn page_background_style(frame_color: Option<&str>) -> String {
    format!(
        "background-color:{};",
        frame_color.unwrap_or(DEFAULT_FRAME_COLOR)
    )
}

#[component]
/// Root surface of the page: wallpaper, clock, search, and settings.
///
/// Nothing interactive renders until persisted settings have hydrated, so
/// the first painted frame already reflects the user's preferences instead
/// of defaults.
pub fn TabShell() -> impl IntoView {
    let runtime = use_tab_runtime();

    view! {
        <div
            class="tab-shell"
            style=move || page_background_style(runtime.frame_color.get().as_deref())
        >
            <Show when=move || runtime.status.get() == EngineStatus::Ready fallback=|| ()>
                <WallpaperView />
                <Show
                    when=move || {
                        runtime.settings.get().clock_show || runtime.positioning.get()
                    }
                    fallback=|| ()
                >
                    <ClockView />
                </Show>
                <SearchOverlay />
                <SettingsPanel />
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_background_prefers_the_reported_frame_color() {
        assert_eq!(
            page_background_style(Some("rgb(12, 34, 56)")),
            "background-color:rgb(12, 34, 56);"
        );
        assert_eq!(
            page_background_style(None),
            format!("background-color:{DEFAULT_FRAME_COLOR};")
        );
    }
}

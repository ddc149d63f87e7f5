use super::*;
use crate::wallpaper::WallpaperState;
use tab_host::MediaKind;

fn media_blur_style(blur_level: u32) -> String {
    if blur_level == 0 {
        String::new()
    } else {
        format!("filter:blur({blur_level}px);")
    }
}

#[component]
/// Renders the saved wallpaper behind the page content.
///
/// Focus mode suppresses the media entirely; the page background painted by
/// the shell shows through instead. Video wallpapers pause while the tab is
/// hidden and resume when it becomes visible again.
pub(super) fn WallpaperView() -> impl IntoView {
    let runtime = use_tab_runtime();
    let video_ref = create_node_ref::<html::Video>();

    let visible = Signal::derive(move || {
        !runtime.settings.get().focus_mode
            && matches!(runtime.wallpaper.get(), WallpaperState::Active { .. })
    });
    let blur_style =
        Signal::derive(move || media_blur_style(runtime.settings.get().blur_level));

    #[cfg(target_arch = "wasm32")]
    {
        let listener = window_event_listener(ev::visibilitychange, move |_| {
            let Some(video) = video_ref.get_untracked() else {
                return;
            };
            if document().hidden() {
                video.pause().ok();
            } else {
                let _ = video.play();
            }
        });
        on_cleanup(move || listener.remove());
    }

    view! {
        <Show when=move || visible.get() fallback=|| ()>
            {move || {
                let WallpaperState::Active { url, kind } = runtime.wallpaper.get() else {
                    return ().into_view();
                };
                match kind {
                    MediaKind::Image => view! {
                        <img
                            class="wallpaper-media"
                            src=url
                            style=move || blur_style.get()
                            alt=""
                        />
                    }
                    .into_view(),
                    MediaKind::Video => view! {
                        <video
                            node_ref=video_ref
                            class="wallpaper-media"
                            src=url
                            style=move || blur_style.get()
                            autoplay=true
                            muted=true
                            loop=true
                            playsinline=true
                        />
                    }
                    .into_view(),
                }
            }}
        </Show>
    }
}

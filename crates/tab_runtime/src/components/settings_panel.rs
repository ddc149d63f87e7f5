use super::*;
use crate::model::{
    ClockFormat, ClockLayout, ClockPosition, SettingsPatch, SettingsTheme, CLOCK_FONTS,
};

fn parse_u32_or(value: &str, fallback: u32) -> u32 {
    value.parse().unwrap_or(fallback)
}

fn parse_f64_or(value: &str, fallback: f64) -> f64 {
    value.parse().unwrap_or(fallback)
}

fn panel_class(theme: SettingsTheme) -> &'static str {
    match theme {
        SettingsTheme::Dark => "settings-panel dark",
        SettingsTheme::Light => "settings-panel light",
    }
}

#[component]
/// Slide-out panel exposing every persisted preference.
pub(super) fn SettingsPanel() -> impl IntoView {
    let runtime = use_tab_runtime();
    let open = create_rw_signal(false);
    let wallpaper_error = create_rw_signal(None::<String>);

    let patch = move |patch: SettingsPatch| runtime.update_settings(patch);

    let on_wallpaper_file = move |ev: web_sys::Event| {
        #[cfg(target_arch = "wasm32")]
        {
            use tab_host::BlobPayload;

            let input = event_target::<web_sys::HtmlInputElement>(&ev);
            let Some(file) = input.files().and_then(|files| files.get(0)) else {
                return;
            };
            let content_type = file.type_();
            spawn_local(async move {
                let buffer = match wasm_bindgen_futures::JsFuture::from(file.array_buffer()).await {
                    Ok(buffer) => buffer,
                    Err(err) => {
                        wallpaper_error.set(Some(format!("could not read file: {err:?}")));
                        return;
                    }
                };
                let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
                let manager = runtime.wallpaper_manager.get_value();
                match manager.save(BlobPayload::new(bytes, content_type)).await {
                    Ok(state) => {
                        wallpaper_error.set(None);
                        runtime.wallpaper.set(state);
                    }
                    // Failed saves keep the previous wallpaper on screen.
                    Err(err) => wallpaper_error.set(Some(err)),
                }
            });
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = ev;
        }
    };

    let on_wallpaper_clear = move |_| {
        let manager = runtime.wallpaper_manager.get_value();
        spawn_local(async move {
            match manager.clear().await {
                Ok(state) => {
                    wallpaper_error.set(None);
                    runtime.wallpaper.set(state);
                }
                Err(err) => wallpaper_error.set(Some(err)),
            }
        });
    };

    view! {
        <button
            class="settings-toggle"
            aria-label="Open settings"
            on:click=move |_| open.update(|value| *value = !*value)
        >
            "⚙"
        </button>

        <Show when=move || open.get() fallback=|| ()>
            <aside class=move || panel_class(runtime.settings.get().settings_theme)>
                <header class="settings-header">
                    <h2>"Settings"</h2>
                    <button aria-label="Close settings" on:click=move |_| open.set(false)>
                        "✕"
                    </button>
                </header>

                <section class="settings-section">
                    <h3>"Wallpaper"</h3>
                    <label class="settings-row">
                        "Focus mode"
                        <input
                            type="checkbox"
                            prop:checked=move || runtime.settings.get().focus_mode
                            on:change=move |ev| patch(SettingsPatch {
                                focus_mode: Some(event_target_checked(&ev)),
                                ..SettingsPatch::default()
                            })
                        />
                    </label>
                    <label class="settings-row">
                        "Blur"
                        <input
                            type="range"
                            min="0"
                            max="50"
                            prop:value=move || runtime.settings.get().blur_level.to_string()
                            on:input=move |ev| {
                                let current = runtime.settings.get_untracked().blur_level;
                                patch(SettingsPatch {
                                    blur_level: Some(parse_u32_or(&event_target_value(&ev), current)),
                                    ..SettingsPatch::default()
                                });
                            }
                        />
                    </label>
                    <div class="settings-row">
                        <label class="settings-upload">
                            "Upload wallpaper"
                            <input
                                type="file"
                                accept="image/*,video/*"
                                on:change=on_wallpaper_file
                            />
                        </label>
                        <button on:click=on_wallpaper_clear>"Remove wallpaper"</button>
                    </div>
                    {move || {
                        wallpaper_error
                            .get()
                            .map(|err| view! { <p class="settings-error">{err}</p> })
                    }}
                </section>

                <section class="settings-section">
                    <h3>"Clock"</h3>
                    <label class="settings-row">
                        "Show clock"
                        <input
                            type="checkbox"
                            prop:checked=move || runtime.settings.get().clock_show
                            on:change=move |ev| patch(SettingsPatch {
                                clock_show: Some(event_target_checked(&ev)),
                                ..SettingsPatch::default()
                            })
                        />
                    </label>
                    <label class="settings-row">
                        "Show date"
                        <input
                            type="checkbox"
                            prop:checked=move || runtime.settings.get().date_show
                            on:change=move |ev| patch(SettingsPatch {
                                date_show: Some(event_target_checked(&ev)),
                                ..SettingsPatch::default()
                            })
                        />
                    </label>
                    <label class="settings-row">
                        "24-hour clock"
                        <input
                            type="checkbox"
                            prop:checked=move || {
                                runtime.settings.get().clock_format == ClockFormat::TwentyFourHour
                            }
                            on:change=move |ev| patch(SettingsPatch {
                                clock_format: Some(if event_target_checked(&ev) {
                                    ClockFormat::TwentyFourHour
                                } else {
                                    ClockFormat::TwelveHour
                                }),
                                ..SettingsPatch::default()
                            })
                        />
                    </label>
                    <label class="settings-row">
                        "Stack hours and minutes"
                        <input
                            type="checkbox"
                            prop:checked=move || {
                                runtime.settings.get().clock_layout == ClockLayout::Vertical
                            }
                            on:change=move |ev| patch(SettingsPatch {
                                clock_layout: Some(if event_target_checked(&ev) {
                                    ClockLayout::Vertical
                                } else {
                                    ClockLayout::Horizontal
                                }),
                                ..SettingsPatch::default()
                            })
                        />
                    </label>
                    <label class="settings-row">
                        "Font"
                        <select on:change=move |ev| patch(SettingsPatch {
                            clock_font: Some(event_target_value(&ev)),
                            ..SettingsPatch::default()
                        })>
                            {CLOCK_FONTS
                                .iter()
                                .map(|(label, family)| {
                                    let family = family.to_string();
                                    let value = family.clone();
                                    view! {
                                        <option
                                            value=value
                                            selected=move || {
                                                runtime.settings.get().clock_font == family
                                            }
                                        >
                                            {*label}
                                        </option>
                                    }
                                })
                                .collect_view()}
                        </select>
                    </label>
                    <label class="settings-row">
                        "Size"
                        <input
                            type="range"
                            min="50"
                            max="400"
                            prop:value=move || runtime.settings.get().clock_size.to_string()
                            on:input=move |ev| {
                                let current = runtime.settings.get_untracked().clock_size;
                                patch(SettingsPatch {
                                    clock_size: Some(parse_u32_or(&event_target_value(&ev), current)),
                                    ..SettingsPatch::default()
                                });
                            }
                        />
                    </label>
                    <label class="settings-row">
                        "Horizontal position"
                        <input
                            type="range"
                            min="0"
                            max="100"
                            prop:value=move || runtime.settings.get().clock_position.x.to_string()
                            on:input=move |ev| {
                                // Dragging keeps the clock visible even when hidden.
                                runtime.positioning.set(true);
                                let current = runtime.settings.get_untracked().clock_position;
                                patch(SettingsPatch {
                                    clock_position: Some(ClockPosition {
                                        x: parse_f64_or(&event_target_value(&ev), current.x),
                                        y: current.y,
                                    }),
                                    ..SettingsPatch::default()
                                });
                            }
                            on:change=move |_| runtime.positioning.set(false)
                        />
                    </label>
                    <label class="settings-row">
                        "Vertical position"
                        <input
                            type="range"
                            min="0"
                            max="100"
                            prop:value=move || runtime.settings.get().clock_position.y.to_string()
                            on:input=move |ev| {
                                runtime.positioning.set(true);
                                let current = runtime.settings.get_untracked().clock_position;
                                patch(SettingsPatch {
                                    clock_position: Some(ClockPosition {
                                        x: current.x,
                                        y: parse_f64_or(&event_target_value(&ev), current.y),
                                    }),
                                    ..SettingsPatch::default()
                                });
                            }
                            on:change=move |_| runtime.positioning.set(false)
                        />
                    </label>
                    <label class="settings-row">
                        "Clock color"
                        <input
                            type="color"
                            prop:value=move || runtime.settings.get().clock_color
                            on:input=move |ev| patch(SettingsPatch {
                                clock_color: Some(event_target_value(&ev)),
                                ..SettingsPatch::default()
                            })
                        />
                    </label>
                    <div class="settings-row">
                        <label class="settings-row">
                            "Minutes color"
                            <input
                                type="color"
                                prop:value=move || {
                                    runtime.settings.get().effective_minutes_color().to_string()
                                }
                                on:input=move |ev| patch(SettingsPatch {
                                    clock_color_minutes: Some(Some(event_target_value(&ev))),
                                    ..SettingsPatch::default()
                                })
                            />
                        </label>
                        <button
                            disabled=move || runtime.settings.get().clock_color_minutes.is_none()
                            on:click=move |_| patch(SettingsPatch {
                                clock_color_minutes: Some(None),
                                ..SettingsPatch::default()
                            })
                        >
                            "Match hours"
                        </button>
                    </div>
                    <label class="settings-row">
                        "Hours opacity"
                        <input
                            type="range"
                            min="0"
                            max="1"
                            step="0.01"
                            prop:value=move || runtime.settings.get().hours_opacity.to_string()
                            on:input=move |ev| {
                                let current = runtime.settings.get_untracked().hours_opacity;
                                patch(SettingsPatch {
                                    hours_opacity: Some(parse_f64_or(&event_target_value(&ev), current)),
                                    ..SettingsPatch::default()
                                });
                            }
                        />
                    </label>
                    <label class="settings-row">
                        "Minutes opacity"
                        <input
                            type="range"
                            min="0"
                            max="1"
                            step="0.01"
                            prop:value=move || runtime.settings.get().minutes_opacity.to_string()
                            on:input=move |ev| {
                                let current = runtime.settings.get_untracked().minutes_opacity;
                                patch(SettingsPatch {
                                    minutes_opacity: Some(parse_f64_or(&event_target_value(&ev), current)),
                                    ..SettingsPatch::default()
                                });
                            }
                        />
                    </label>
                </section>

                <section class="settings-section">
                    <h3>"Appearance"</h3>
                    <label class="settings-row">
                        "Light panel"
                        <input
                            type="checkbox"
                            prop:checked=move || {
                                runtime.settings.get().settings_theme == SettingsTheme::Light
                            }
                            on:change=move |ev| patch(SettingsPatch {
                                settings_theme: Some(if event_target_checked(&ev) {
                                    SettingsTheme::Light
                                } else {
                                    SettingsTheme::Dark
                                }),
                                ..SettingsPatch::default()
                            })
                        />
                    </label>
                </section>

                <section class="settings-section">
                    <h3>"Search"</h3>
                    <button on:click=move |_| runtime.clear_search_history()>
                        "Clear search history"
                    </button>
                </section>
            </aside>
        </Show>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slider_values_fall_back_to_the_current_setting() {
        assert_eq!(parse_u32_or("35", 20), 35);
        assert_eq!(parse_u32_or("", 20), 20);
        assert_eq!(parse_u32_or("abc", 20), 20);
        assert_eq!(parse_f64_or("0.25", 1.0), 0.25);
        assert_eq!(parse_f64_or("x", 1.0), 1.0);
    }

    #[test]
    fn panel_class_follows_the_theme() {
        assert_eq!(panel_class(SettingsTheme::Dark), "settings-panel dark");
        assert_eq!(panel_class(SettingsTheme::Light), "settings-panel light");
    }
}

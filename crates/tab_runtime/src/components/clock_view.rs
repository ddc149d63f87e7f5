use std::time::Duration;

use super::*;
use crate::{
    clock::{LocalTime, CLOCK_TICK_MS},
    model::{ClockLayout, SettingsRecord},
};

fn clock_container_style(record: &SettingsRecord) -> String {
    let direction = match record.clock_layout {
        ClockLayout::Horizontal => "row",
        ClockLayout::Vertical => "column",
    };
    format!(
        "left:{}%;top:{}%;transform:translate(-50%, -50%);font-size:{}px;font-family:'{}';flex-direction:{};",
        record.clock_position.x,
        record.clock_position.y,
        record.clock_size,
        record.clock_font,
        direction
    )
}

fn hours_style(record: &SettingsRecord) -> String {
    format!(
        "color:{};opacity:{};",
        record.clock_color, record.hours_opacity
    )
}

fn minutes_style(record: &SettingsRecord) -> String {
    format!(
        "color:{};opacity:{};",
        record.effective_minutes_color(),
        record.minutes_opacity
    )
}

#[component]
/// Clock face driven by the settings record, re-rendered once per second.
pub(super) fn ClockView() -> impl IntoView {
    let runtime = use_tab_runtime();
    let (time, set_time) = create_signal(LocalTime::now());

    if let Ok(handle) = set_interval_with_handle(
        move || set_time.set(LocalTime::now()),
        Duration::from_millis(CLOCK_TICK_MS as u64),
    ) {
        on_cleanup(move || handle.clear());
    }

    view! {
        <div class="clock" style=move || clock_container_style(&runtime.settings.get())>
            <span
                class="clock-hours"
                style=move || hours_style(&runtime.settings.get())
            >
                {move || time.get().hour_text(runtime.settings.get().clock_format)}
            </span>
            <span
                class="clock-minutes"
                style=move || minutes_style(&runtime.settings.get())
            >
                {move || time.get().minute_text()}
            </span>
            {move || {
                time.get()
                    .meridiem(runtime.settings.get().clock_format)
                    .map(|marker| view! { <span class="clock-meridiem">{marker}</span> })
            }}
            <Show when=move || runtime.settings.get().date_show fallback=|| ()>
                <div class="clock-date">{move || time.get().date_text()}</div>
            </Show>
        </div>
    }
}

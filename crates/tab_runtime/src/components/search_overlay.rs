use std::time::Duration;

use leptos::leptos_dom::helpers::TimeoutHandle;

use super::*;
use crate::search::{search_url, SUGGESTION_DEBOUNCE_MS};

/// True when the keypress originated in a form control that should keep it.
fn target_is_form_control(ev: &web_sys::KeyboardEvent) -> bool {
    use wasm_bindgen::JsCast;

    ev.target()
        .and_then(|target| target.dyn_into::<web_sys::Element>().ok())
        .map(|element| matches!(element.tag_name().as_str(), "INPUT" | "TEXTAREA" | "SELECT"))
        .unwrap_or(false)
}

/// True when a bare alphanumeric keypress should open the overlay.
fn opens_overlay(key: &str, ctrl: bool, alt: bool, meta: bool) -> bool {
    if ctrl || alt || meta {
        return false;
    }
    let mut chars = key.chars();
    matches!((chars.next(), chars.next()), (Some(ch), None) if ch.is_ascii_alphanumeric())
}

/// List shown under the input: history while the query is empty, live
/// suggestions otherwise.
fn overlay_items(history: &[String], suggestions: &[String], query: &str) -> Vec<String> {
    if query.trim().is_empty() {
        history.to_vec()
    } else {
        suggestions.to_vec()
    }
}

fn step_selection(selected: Option<usize>, item_count: usize, down: bool) -> Option<usize> {
    if item_count == 0 {
        return None;
    }
    Some(match (selected, down) {
        (None, true) => 0,
        (None, false) => item_count - 1,
        (Some(index), true) => (index + 1) % item_count,
        (Some(index), false) => index.checked_sub(1).unwrap_or(item_count - 1),
    })
}

#[component]
/// Full-page search overlay, opened by typing anywhere on the page.
pub(super) fn SearchOverlay() -> impl IntoView {
    let runtime = use_tab_runtime();
    let open = create_rw_signal(false);
    let query = create_rw_signal(String::new());
    let suggestions = create_rw_signal(Vec::<String>::new());
    let selected = create_rw_signal(None::<usize>);
    let suggestion_timer = store_value(None::<TimeoutHandle>);
    let input_ref = create_node_ref::<html::Input>();

    let items = Signal::derive(move || {
        overlay_items(
            &runtime.history_entries.get(),
            &suggestions.get(),
            &query.get(),
        )
    });

    let close = move || {
        open.set(false);
        query.set(String::new());
        suggestions.set(Vec::new());
        selected.set(None);
    };

    let submit = move |text: String| {
        if text.trim().is_empty() {
            return;
        }
        runtime.record_search(&text);
        close();
        let target = search_url(&text);
        if let Err(err) = window().location().set_href(&target) {
            logging::warn!("search navigation failed: {err:?}");
        }
    };

    let request_suggestions = move |text: String| {
        // Restarting the timer keeps one in-flight request per pause in typing.
        if let Some(handle) = suggestion_timer.get_value() {
            handle.clear();
        }
        if text.trim().is_empty() {
            suggestions.set(Vec::new());
            return;
        }
        let service = runtime.host.get_value().suggestion_service();
        let timer = set_timeout_with_handle(
            move || {
                let service = service.clone();
                spawn_local(async move {
                    match service.suggest(&text).await {
                        Ok(results) => {
                            suggestions.set(results);
                            selected.set(None);
                        }
                        Err(err) => logging::warn!("suggestion fetch failed: {err}"),
                    }
                });
            },
            Duration::from_millis(SUGGESTION_DEBOUNCE_MS as u64),
        );
        match timer {
            Ok(handle) => suggestion_timer.set_value(Some(handle)),
            Err(err) => logging::warn!("suggestion timer failed: {err:?}"),
        }
    };

    let open_listener = window_event_listener(ev::keydown, move |ev| {
        if open.get_untracked() || ev.default_prevented() || target_is_form_control(&ev) {
            return;
        }
        let key = ev.key();
        if opens_overlay(&key, ev.ctrl_key(), ev.alt_key(), ev.meta_key()) {
            ev.prevent_default();
            open.set(true);
            query.set(key.clone());
            request_suggestions(key);
        }
    });
    on_cleanup(move || open_listener.remove());

    #[cfg(target_arch = "wasm32")]
    create_effect(move |_| {
        if open.get() {
            if let Some(input) = input_ref.get() {
                input.focus().ok();
            }
        }
    });

    let on_keydown = move |ev: web_sys::KeyboardEvent| {
        let item_count = items.get_untracked().len();
        match ev.key().as_str() {
            "Escape" => close(),
            "ArrowDown" => {
                ev.prevent_default();
                selected.set(step_selection(selected.get_untracked(), item_count, true));
            }
            "ArrowUp" => {
                ev.prevent_default();
                selected.set(step_selection(selected.get_untracked(), item_count, false));
            }
            "Enter" => {
                let chosen = selected
                    .get_untracked()
                    .and_then(|index| items.get_untracked().get(index).cloned())
                    .unwrap_or_else(|| query.get_untracked());
                submit(chosen);
            }
            _ => {}
        }
    };

    view! {
        <Show when=move || open.get() fallback=|| ()>
            <div class="search-overlay" on:mousedown=move |_| close()>
                <div class="search-box" on:mousedown=move |ev| ev.stop_propagation()>
                    <input
                        node_ref=input_ref
                        class="search-input"
                        type="text"
                        autocomplete="off"
                        spellcheck="false"
                        prop:value=move || query.get()
                        on:input=move |ev| {
                            let text = event_target_value(&ev);
                            query.set(text.clone());
                            selected.set(None);
                            request_suggestions(text);
                        }
                        on:keydown=on_keydown
                    />
                    <div class="search-items" role="listbox">
                        <For
                            each={move || items.get().into_iter().enumerate().collect::<Vec<_>>()}
                            key=|(index, item)| (*index, item.clone())
                            children=move |(index, item): (usize, String)| {
                                let chosen = item.clone();
                                view! {
                                    <div
                                        class=move || {
                                            if selected.get() == Some(index) {
                                                "search-item selected"
                                            } else {
                                                "search-item"
                                            }
                                        }
                                        role="option"
                                        aria-selected=move || selected.get() == Some(index)
                                        on:click=move |_| submit(chosen.clone())
                                    >
                                        {item}
                                    </div>
                                }
                            }
                        />
                    </div>
                </div>
            </div>
        </Show>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlay_opens_only_on_bare_alphanumeric_keys() {
        assert!(opens_overlay("a", false, false, false));
        assert!(opens_overlay("7", false, false, false));
        assert!(!opens_overlay("a", true, false, false));
        assert!(!opens_overlay("a", false, false, true));
        assert!(!opens_overlay("Enter", false, false, false));
        assert!(!opens_overlay("Shift", false, false, false));
        assert!(!opens_overlay(" ", false, false, false));
    }

    #[test]
    fn empty_query_shows_history_and_typed_query_shows_suggestions() {
        let history = vec!["old".to_string()];
        let suggestions = vec!["new".to_string()];

        assert_eq!(overlay_items(&history, &suggestions, ""), history);
        assert_eq!(overlay_items(&history, &suggestions, "   "), history);
        assert_eq!(overlay_items(&history, &suggestions, "n"), suggestions);
    }

    #[test]
    fn selection_wraps_in_both_directions() {
        assert_eq!(step_selection(None, 3, true), Some(0));
        assert_eq!(step_selection(None, 3, false), Some(2));
        assert_eq!(step_selection(Some(2), 3, true), Some(0));
        assert_eq!(step_selection(Some(0), 3, false), Some(2));
        assert_eq!(step_selection(Some(1), 0, true), None);
    }
}

//! Search history with immediate persistence, plus suggestion plumbing
//! constants shared with the overlay.

use std::cell::RefCell;
use std::rc::Rc;

use tab_host::{load_kv_with, save_kv_with, KvStore, SEARCH_HISTORY_KEY};

/// Maximum number of remembered queries.
pub const HISTORY_LIMIT: usize = 5;

/// Idle window before a typed query is sent for suggestions, in milliseconds.
pub const SUGGESTION_DEBOUNCE_MS: u32 = 200;

/// Web search endpoint a submitted query navigates to.
pub const SEARCH_URL_PREFIX: &str = "https://www.google.com/search?q=";

/// Moves `query` to the front of `entries`, dropping any older duplicate and
/// truncating to [`HISTORY_LIMIT`].
pub fn push_history_entry(entries: &mut Vec<String>, query: &str) {
    entries.retain(|existing| existing != query);
    entries.insert(0, query.to_string());
    entries.truncate(HISTORY_LIMIT);
}

/// Recent-query list persisted under [`SEARCH_HISTORY_KEY`].
///
/// Unlike settings, history writes are not debounced; every recorded query is
/// persisted immediately.
#[derive(Clone)]
pub struct SearchHistory {
    store: Rc<dyn KvStore>,
    entries: Rc<RefCell<Vec<String>>>,
}

impl SearchHistory {
    /// Creates an empty history over the given store.
    pub fn new(store: Rc<dyn KvStore>) -> Self {
        Self {
            store,
            entries: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Loads persisted history; an unreadable record is logged and treated as
    /// empty.
    pub async fn hydrate(&self) {
        let loaded: Result<Option<Vec<String>>, String> =
            load_kv_with(self.store.as_ref(), SEARCH_HISTORY_KEY).await;
        let mut entries = match loaded {
            Ok(entries) => entries.unwrap_or_default(),
            Err(err) => {
                leptos::logging::warn!("search history load failed: {err}");
                Vec::new()
            }
        };
        entries.truncate(HISTORY_LIMIT);
        *self.entries.borrow_mut() = entries;
    }

    /// Snapshot of the current entries, most recent first.
    pub fn entries(&self) -> Vec<String> {
        self.entries.borrow().clone()
    }

    /// Records a submitted query and persists the updated list.
    ///
    /// Whitespace-only queries are ignored. A repeated query moves to the
    /// front rather than duplicating.
    pub fn record(&self, query: &str) {
        let query = query.trim();
        if query.is_empty() {
            return;
        }
        push_history_entry(&mut self.entries.borrow_mut(), query);
        self.persist();
    }

    /// Empties the history and deletes the persisted record.
    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
        let store = Rc::clone(&self.store);
        crate::task::spawn_detached(async move {
            if let Err(err) = store.delete_value(SEARCH_HISTORY_KEY).await {
                leptos::logging::warn!("search history clear failed: {err}");
            }
        });
    }

    fn persist(&self) {
        let store = Rc::clone(&self.store);
        let entries = self.entries.borrow().clone();
        crate::task::spawn_detached(async move {
            if let Err(err) = save_kv_with(store.as_ref(), SEARCH_HISTORY_KEY, &entries).await {
                leptos::logging::warn!("search history write failed: {err}");
            }
        });
    }
}

/// Builds the navigation URL for a submitted query.
pub fn search_url(query: &str) -> String {
    let mut encoded = String::with_capacity(query.len());
    for byte in query.trim().bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                encoded.push(byte as char);
            }
            b' ' => encoded.push('+'),
            other => {
                encoded.push('%');
                encoded.push_str(&format!("{other:02X}"));
            }
        }
    }
    format!("{SEARCH_URL_PREFIX}{encoded}")
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use tab_host::MemoryKvStore;

    use super::*;

    fn stored_history(store: &MemoryKvStore) -> Option<Vec<String>> {
        block_on(store.load_value(SEARCH_HISTORY_KEY))
            .expect("load")
            .map(|raw| serde_json::from_str(&raw).expect("parse"))
    }

    #[test]
    fn repeated_query_moves_to_front_without_duplicating() {
        let mut entries = vec!["b".to_string(), "a".to_string()];
        push_history_entry(&mut entries, "a");
        assert_eq!(entries, vec!["a", "b"]);
    }

    #[test]
    fn history_is_capped_at_the_limit() {
        let mut entries = Vec::new();
        for query in ["one", "two", "three", "four", "five", "six"] {
            push_history_entry(&mut entries, query);
        }
        assert_eq!(entries.len(), HISTORY_LIMIT);
        assert_eq!(entries.first().map(String::as_str), Some("six"));
        assert!(!entries.contains(&"one".to_string()));
    }

    #[test]
    fn recorded_queries_persist_immediately() {
        let store = MemoryKvStore::default();
        let history = SearchHistory::new(Rc::new(store.clone()));

        history.record("rust iterators");
        history.record("  ");

        assert_eq!(history.entries(), vec!["rust iterators"]);
        assert_eq!(stored_history(&store), Some(vec!["rust iterators".to_string()]));
    }

    #[test]
    fn hydrate_restores_and_caps_persisted_entries() {
        let store = MemoryKvStore::default();
        let seeded: Vec<String> = (0..8).map(|n| format!("q{n}")).collect();
        block_on(save_kv_with(&store, SEARCH_HISTORY_KEY, &seeded)).expect("seed");

        let history = SearchHistory::new(Rc::new(store));
        block_on(history.hydrate());

        assert_eq!(history.entries().len(), HISTORY_LIMIT);
        assert_eq!(history.entries().first().map(String::as_str), Some("q0"));
    }

    #[test]
    fn unreadable_history_hydrates_as_empty() {
        let store = MemoryKvStore::default();
        block_on(store.save_value(SEARCH_HISTORY_KEY, "not json")).expect("seed");

        let history = SearchHistory::new(Rc::new(store));
        block_on(history.hydrate());

        assert!(history.entries().is_empty());
    }

    #[test]
    fn clear_deletes_the_persisted_record() {
        let store = MemoryKvStore::default();
        let history = SearchHistory::new(Rc::new(store.clone()));
        history.record("keep me not");

        history.clear();

        assert!(history.entries().is_empty());
        assert_eq!(stored_history(&store), None);
    }

    #[test]
    fn search_url_escapes_query_text() {
        assert_eq!(
            search_url("rust async traits"),
            "https://www.google.com/search?q=rust+async+traits"
        );
        assert_eq!(search_url(" a&b "), "https://www.google.com/search?q=a%26b");
    }
}

//! Search-suggestion endpoint contract.

use std::{cell::RefCell, future::Future, pin::Pin, rc::Rc};

/// Object-safe boxed future used by [`SuggestionService`].
pub type SuggestionFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Host service returning autocomplete suggestions for a query prefix.
///
/// Best-effort collaborator: callers absorb every error into an empty list.
/// An empty query must resolve to an empty list without touching the network.
pub trait SuggestionService {
    /// Fetches suggestion strings for `query`.
    fn suggest<'a>(&'a self, query: &'a str) -> SuggestionFuture<'a, Result<Vec<String>, String>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// No-op suggestion service for unsupported targets and baseline tests.
pub struct NoopSuggestionService;

impl SuggestionService for NoopSuggestionService {
    fn suggest<'a>(&'a self, _query: &'a str) -> SuggestionFuture<'a, Result<Vec<String>, String>> {
        Box::pin(async { Ok(Vec::new()) })
    }
}

#[derive(Debug, Clone, Default)]
/// In-memory suggestion service returning canned completions for tests.
pub struct MemorySuggestionService {
    canned: Rc<RefCell<Vec<String>>>,
}

impl MemorySuggestionService {
    /// Creates a service answering every non-empty query with `completions`.
    pub fn with_completions(completions: Vec<String>) -> Self {
        Self {
            canned: Rc::new(RefCell::new(completions)),
        }
    }
}

impl SuggestionService for MemorySuggestionService {
    fn suggest<'a>(&'a self, query: &'a str) -> SuggestionFuture<'a, Result<Vec<String>, String>> {
        Box::pin(async move {
            if query.is_empty() {
                return Ok(Vec::new());
            }
            Ok(self.canned.borrow().clone())
        })
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;

    #[test]
    fn memory_suggestions_answer_non_empty_queries_only() {
        let service =
            MemorySuggestionService::with_completions(vec!["rust wasm".to_string()]);
        let service_obj: &dyn SuggestionService = &service;

        assert_eq!(
            block_on(service_obj.suggest("ru")).expect("suggest"),
            vec!["rust wasm".to_string()]
        );
        assert_eq!(
            block_on(service_obj.suggest("")).expect("suggest empty"),
            Vec::<String>::new()
        );
    }

    #[test]
    fn noop_suggestions_are_always_empty() {
        let service: &dyn SuggestionService = &NoopSuggestionService;
        assert_eq!(
            block_on(service.suggest("anything")).expect("suggest"),
            Vec::<String>::new()
        );
    }
}

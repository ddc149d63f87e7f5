//! Suggestion fetch backed by the public autocomplete endpoint.

use tab_host::{SuggestionFuture, SuggestionService};

/// Autocomplete endpoint; the query string is appended URL-encoded.
const SUGGEST_ENDPOINT: &str =
    "https://suggestqueries.google.com/complete/search?client=firefox&ds=yt&q=";

#[derive(Debug, Clone, Copy, Default)]
/// Browser suggestion service fetching completions over the network.
pub struct WebSuggestionService;

impl SuggestionService for WebSuggestionService {
    fn suggest<'a>(&'a self, query: &'a str) -> SuggestionFuture<'a, Result<Vec<String>, String>> {
        Box::pin(async move {
            if query.is_empty() {
                return Ok(Vec::new());
            }

            #[cfg(target_arch = "wasm32")]
            {
                fetch_suggestions(query).await
            }

            #[cfg(not(target_arch = "wasm32"))]
            {
                Err(crate::interop::WASM_ONLY_ERR.to_string())
            }
        })
    }
}

/// Extracts the suggestion list from the endpoint's response payload.
///
/// The payload is a JSON array whose second element holds the suggestion
/// strings; anything else yields an empty list.
fn parse_suggestion_payload(payload: &serde_json::Value) -> Vec<String> {
    payload
        .get(1)
        .and_then(serde_json::Value::as_array)
        .map(|entries| {
            entries
                .iter()
                .filter_map(|entry| entry.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(target_arch = "wasm32")]
async fn fetch_suggestions(query: &str) -> Result<Vec<String>, String> {
    use wasm_bindgen::{JsCast, JsValue};
    use wasm_bindgen_futures::JsFuture;

    let window = web_sys::window().ok_or_else(|| "window unavailable".to_string())?;
    let encoded: String = js_sys::encode_uri_component(query).into();
    let url = format!("{SUGGEST_ENDPOINT}{encoded}");

    let response: web_sys::Response = JsFuture::from(window.fetch_with_str(&url))
        .await
        .map_err(|err| format!("suggestion fetch failed: {err:?}"))?
        .dyn_into()
        .map_err(|_| "suggestion fetch returned a non-response".to_string())?;
    let body: JsValue = JsFuture::from(
        response
            .json()
            .map_err(|err| format!("suggestion body unreadable: {err:?}"))?,
    )
    .await
    .map_err(|err| format!("suggestion body failed to parse: {err:?}"))?;

    let payload: serde_json::Value = serde_wasm_bindgen::from_value(body)
        .map_err(|err| format!("suggestion payload malformed: {err}"))?;
    Ok(parse_suggestion_payload(&payload))
}

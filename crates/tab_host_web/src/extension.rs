//! Extension-storage-backed key-value store implementation.
//!
//! Values are stored as a single JSON string under the fixed key so the wire
//! shape matches the `localStorage` fallback exactly; a record saved by one
//! backend parses under the other.

use tab_host::{KvStore, KvStoreFuture};

#[cfg(target_arch = "wasm32")]
use js_sys::{Object, Reflect};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{JsCast, JsValue};

#[derive(Debug, Clone, Copy, Default)]
/// Key-value store backed by the extension's asynchronous local storage area.
pub struct ExtensionStorageStore;

/// Returns `true` when the extension storage area is reachable.
///
/// This is the one-time capability probe adapters use to pick a backend.
pub fn extension_storage_available() -> bool {
    #[cfg(target_arch = "wasm32")]
    {
        storage_area().is_some()
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        false
    }
}

#[cfg(target_arch = "wasm32")]
fn storage_area() -> Option<Object> {
    crate::interop::global_path(&["chrome", "storage", "local"])?
        .dyn_into()
        .ok()
}

#[cfg(target_arch = "wasm32")]
async fn call_area_method(method: &str, argument: &JsValue) -> Result<JsValue, String> {
    let area = storage_area().ok_or_else(|| "extension storage unavailable".to_string())?;
    let function: js_sys::Function = Reflect::get(&area, &JsValue::from_str(method))
        .map_err(|err| format!("extension storage `{method}` missing: {err:?}"))?
        .dyn_into()
        .map_err(|_| format!("extension storage `{method}` is not callable"))?;
    let pending = function
        .call1(&area, argument)
        .map_err(|err| format!("extension storage `{method}` failed: {err:?}"))?;
    crate::interop::await_promise(pending).await
}

impl ExtensionStorageStore {
    /// Loads the raw JSON string stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error when the storage area is unreachable or the call
    /// rejects; a present key holding a non-string value is treated as absent.
    pub async fn load_json(self, key: &str) -> Result<Option<String>, String> {
        #[cfg(target_arch = "wasm32")]
        {
            let result = call_area_method("get", &JsValue::from_str(key)).await?;
            let value = Reflect::get(&result, &JsValue::from_str(key))
                .map_err(|err| format!("extension storage result unreadable: {err:?}"))?;
            Ok(value.as_string())
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = key;
            Err(crate::interop::WASM_ONLY_ERR.to_string())
        }
    }

    /// Saves a raw JSON string under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error when the storage area is unreachable or the write
    /// rejects (for example when the extension quota is exhausted).
    pub async fn save_json(self, key: &str, raw_json: &str) -> Result<(), String> {
        #[cfg(target_arch = "wasm32")]
        {
            let entry = Object::new();
            Reflect::set(
                &entry,
                &JsValue::from_str(key),
                &JsValue::from_str(raw_json),
            )
            .map_err(|err| format!("extension storage entry build failed: {err:?}"))?;
            call_area_method("set", &entry.into()).await?;
            Ok(())
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = (key, raw_json);
            Err(crate::interop::WASM_ONLY_ERR.to_string())
        }
    }

    /// Deletes the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error when the storage area is unreachable or the call rejects.
    pub async fn delete_json(self, key: &str) -> Result<(), String> {
        #[cfg(target_arch = "wasm32")]
        {
            call_area_method("remove", &JsValue::from_str(key)).await?;
            Ok(())
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = key;
            Err(crate::interop::WASM_ONLY_ERR.to_string())
        }
    }
}

impl KvStore for ExtensionStorageStore {
    fn load_value<'a>(&'a self, key: &'a str) -> KvStoreFuture<'a, Result<Option<String>, String>> {
        let store = *self;
        Box::pin(async move { store.load_json(key).await })
    }

    fn save_value<'a>(
        &'a self,
        key: &'a str,
        raw_json: &'a str,
    ) -> KvStoreFuture<'a, Result<(), String>> {
        let store = *self;
        Box::pin(async move { store.save_json(key, raw_json).await })
    }

    fn delete_value<'a>(&'a self, key: &'a str) -> KvStoreFuture<'a, Result<(), String>> {
        let store = *self;
        Box::pin(async move { store.delete_json(key).await })
    }
}

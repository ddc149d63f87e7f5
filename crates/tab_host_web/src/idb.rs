//! IndexedDB-backed wallpaper blob store implementation.
//!
//! One database, one object store, one well-known record key. Writes go
//! through an explicit `readwrite` transaction and success is reported only
//! after the transaction completes, so a reader started after a committed
//! write always observes the full new value.

use tab_host::{BlobPayload, BlobStore, BlobStoreFuture};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{closure::Closure, JsCast, JsValue};

/// IndexedDB database holding the wallpaper object store.
pub const WALLPAPER_DB_NAME: &str = "ZenTab_DB";
/// Database version; bumping forces the upgrade handler to run again.
pub const WALLPAPER_DB_VERSION: u32 = 2;
/// Object store the wallpaper blob lives in.
pub const WALLPAPER_STORE_NAME: &str = "wallpapers";

#[derive(Debug, Clone, Copy, Default)]
/// Browser wallpaper blob store backed by IndexedDB.
pub struct WebBlobStore;

impl BlobStore for WebBlobStore {
    fn put_blob<'a>(
        &'a self,
        name: &'a str,
        payload: BlobPayload,
    ) -> BlobStoreFuture<'a, Result<(), String>> {
        Box::pin(async move {
            #[cfg(target_arch = "wasm32")]
            {
                put_blob_wasm(name, payload).await
            }

            #[cfg(not(target_arch = "wasm32"))]
            {
                let _ = (name, payload);
                Err(crate::interop::WASM_ONLY_ERR.to_string())
            }
        })
    }

    fn get_blob<'a>(
        &'a self,
        name: &'a str,
    ) -> BlobStoreFuture<'a, Result<Option<BlobPayload>, String>> {
        Box::pin(async move {
            #[cfg(target_arch = "wasm32")]
            {
                get_blob_wasm(name).await
            }

            #[cfg(not(target_arch = "wasm32"))]
            {
                let _ = name;
                Err(crate::interop::WASM_ONLY_ERR.to_string())
            }
        })
    }

    fn delete_blob<'a>(&'a self, name: &'a str) -> BlobStoreFuture<'a, Result<(), String>> {
        Box::pin(async move {
            #[cfg(target_arch = "wasm32")]
            {
                delete_blob_wasm(name).await
            }

            #[cfg(not(target_arch = "wasm32"))]
            {
                let _ = name;
                Err(crate::interop::WASM_ONLY_ERR.to_string())
            }
        })
    }
}

#[cfg(target_arch = "wasm32")]
async fn open_database() -> Result<web_sys::IdbDatabase, String> {
    let window = web_sys::window().ok_or_else(|| "window unavailable".to_string())?;
    let factory = window
        .indexed_db()
        .map_err(|err| format!("indexedDB access denied: {err:?}"))?
        .ok_or_else(|| "indexedDB unavailable".to_string())?;
    let open_request = factory
        .open_with_u32(WALLPAPER_DB_NAME, WALLPAPER_DB_VERSION)
        .map_err(|err| format!("wallpaper database open failed: {err:?}"))?;

    // Creating the object store only when absent keeps the upgrade idempotent
    // across version bumps.
    let upgrade_request = open_request.clone();
    let on_upgrade = Closure::<dyn FnMut()>::wrap(Box::new(move || {
        let Ok(result) = upgrade_request.result() else {
            return;
        };
        let Ok(database) = result.dyn_into::<web_sys::IdbDatabase>() else {
            return;
        };
        if !database.object_store_names().contains(WALLPAPER_STORE_NAME) {
            let _ = database.create_object_store(WALLPAPER_STORE_NAME);
        }
    }));
    open_request.set_onupgradeneeded(Some(on_upgrade.as_ref().unchecked_ref()));

    let opened = crate::interop::await_idb_request(open_request.clone().into(), "database open")
        .await;
    open_request.set_onupgradeneeded(None);

    opened?
        .dyn_into()
        .map_err(|_| "database open returned an unexpected value".to_string())
}

#[cfg(target_arch = "wasm32")]
async fn put_blob_wasm(name: &str, payload: BlobPayload) -> Result<(), String> {
    let database = open_database().await?;
    let result = async {
        let bytes = js_sys::Uint8Array::from(&payload.bytes[..]);
        let parts = js_sys::Array::of1(&bytes.into());
        let options = web_sys::BlobPropertyBag::new();
        options.set_type(&payload.content_type);
        let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options)
            .map_err(|err| format!("wallpaper blob build failed: {err:?}"))?;

        let transaction = database
            .transaction_with_str_and_mode(
                WALLPAPER_STORE_NAME,
                web_sys::IdbTransactionMode::Readwrite,
            )
            .map_err(|err| format!("wallpaper write transaction failed: {err:?}"))?;
        let store = transaction
            .object_store(WALLPAPER_STORE_NAME)
            .map_err(|err| format!("wallpaper store unavailable: {err:?}"))?;
        let request = store
            .put_with_key(blob.as_ref(), &JsValue::from_str(name))
            .map_err(|err| format!("wallpaper put failed: {err:?}"))?;

        crate::interop::await_idb_request(request, "wallpaper put").await?;
        crate::interop::await_idb_transaction(transaction, "wallpaper put").await
    }
    .await;
    database.close();
    result
}

#[cfg(target_arch = "wasm32")]
async fn get_blob_wasm(name: &str) -> Result<Option<BlobPayload>, String> {
    let database = open_database().await?;
    let result = async {
        let transaction = database
            .transaction_with_str(WALLPAPER_STORE_NAME)
            .map_err(|err| format!("wallpaper read transaction failed: {err:?}"))?;
        let store = transaction
            .object_store(WALLPAPER_STORE_NAME)
            .map_err(|err| format!("wallpaper store unavailable: {err:?}"))?;
        let request = store
            .get(&JsValue::from_str(name))
            .map_err(|err| format!("wallpaper get failed: {err:?}"))?;

        let value = crate::interop::await_idb_request(request, "wallpaper get").await?;
        if value.is_undefined() || value.is_null() {
            return Ok(None);
        }
        let blob: web_sys::Blob = value
            .dyn_into()
            .map_err(|_| "stored wallpaper is not a blob".to_string())?;
        let content_type = blob.type_();
        let buffer = wasm_bindgen_futures::JsFuture::from(blob.array_buffer())
            .await
            .map_err(|err| format!("wallpaper bytes unreadable: {err:?}"))?;
        let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
        Ok(Some(BlobPayload::new(bytes, content_type)))
    }
    .await;
    database.close();
    result
}

#[cfg(target_arch = "wasm32")]
async fn delete_blob_wasm(name: &str) -> Result<(), String> {
    let database = open_database().await?;
    let result = async {
        let transaction = database
            .transaction_with_str_and_mode(
                WALLPAPER_STORE_NAME,
                web_sys::IdbTransactionMode::Readwrite,
            )
            .map_err(|err| format!("wallpaper delete transaction failed: {err:?}"))?;
        let store = transaction
            .object_store(WALLPAPER_STORE_NAME)
            .map_err(|err| format!("wallpaper store unavailable: {err:?}"))?;
        let request = store
            .delete(&JsValue::from_str(name))
            .map_err(|err| format!("wallpaper delete failed: {err:?}"))?;

        crate::interop::await_idb_request(request, "wallpaper delete").await?;
        crate::interop::await_idb_transaction(transaction, "wallpaper delete").await
    }
    .await;
    database.close();
    result
}

//! Shared wasm interop glue for promise- and callback-based browser APIs.

#[cfg(not(target_arch = "wasm32"))]
pub(crate) const WASM_ONLY_ERR: &str =
    "Browser storage APIs are only available when compiled for wasm32";

#[cfg(target_arch = "wasm32")]
pub(crate) use wasm::{await_idb_request, await_idb_transaction, await_promise, global_path};

#[cfg(target_arch = "wasm32")]
mod wasm {
    use std::{cell::RefCell, rc::Rc};

    use futures::channel::oneshot;
    use js_sys::{Promise, Reflect};
    use wasm_bindgen::{closure::Closure, JsCast, JsValue};
    use wasm_bindgen_futures::JsFuture;

    /// Walks a dotted property path from the JS global object.
    ///
    /// Returns `None` when any segment is missing, `undefined`, or `null`,
    /// which doubles as the capability probe for extension APIs.
    pub(crate) fn global_path(path: &[&str]) -> Option<JsValue> {
        let mut current: JsValue = js_sys::global().into();
        for segment in path {
            current = Reflect::get(&current, &JsValue::from_str(segment)).ok()?;
            if current.is_undefined() || current.is_null() {
                return None;
            }
        }
        Some(current)
    }

    /// Awaits a JS promise value, flattening rejections into error strings.
    pub(crate) async fn await_promise(value: JsValue) -> Result<JsValue, String> {
        let promise: Promise = value
            .dyn_into()
            .map_err(|_| "expected a promise-returning API".to_string())?;
        JsFuture::from(promise)
            .await
            .map_err(|err| format!("promise rejected: {err:?}"))
    }

    /// Formats the error slot of a settled IndexedDB request.
    pub(crate) fn idb_request_error(request: &web_sys::IdbRequest, op: &str) -> String {
        match request.error() {
            Ok(Some(exception)) => format!("{op} failed: {}", exception.message()),
            _ => format!("{op} failed"),
        }
    }

    /// Resolves once an IndexedDB request settles, yielding its result value.
    pub(crate) async fn await_idb_request(
        request: web_sys::IdbRequest,
        op: &str,
    ) -> Result<JsValue, String> {
        let (tx, rx) = oneshot::channel::<Result<(), String>>();
        let sender = Rc::new(RefCell::new(Some(tx)));

        let success_sender = sender.clone();
        let on_success = Closure::<dyn FnMut()>::wrap(Box::new(move || {
            if let Some(tx) = success_sender.borrow_mut().take() {
                let _ = tx.send(Ok(()));
            }
        }));
        let error_request = request.clone();
        let error_sender = sender.clone();
        let error_op = op.to_string();
        let on_error = Closure::<dyn FnMut()>::wrap(Box::new(move || {
            if let Some(tx) = error_sender.borrow_mut().take() {
                let _ = tx.send(Err(idb_request_error(&error_request, &error_op)));
            }
        }));
        request.set_onsuccess(Some(on_success.as_ref().unchecked_ref()));
        request.set_onerror(Some(on_error.as_ref().unchecked_ref()));

        let settled = rx
            .await
            .map_err(|_| format!("{op} request dropped before settling"));
        request.set_onsuccess(None);
        request.set_onerror(None);
        settled??;

        request
            .result()
            .map_err(|err| format!("{op} result unavailable: {err:?}"))
    }

    /// Resolves once an IndexedDB transaction completes, aborts, or errors.
    ///
    /// Success is reported only on `complete`; a commit that aborts after the
    /// request-level success callback still surfaces as an error here.
    pub(crate) async fn await_idb_transaction(
        transaction: web_sys::IdbTransaction,
        op: &str,
    ) -> Result<(), String> {
        let (tx, rx) = oneshot::channel::<Result<(), String>>();
        let sender = Rc::new(RefCell::new(Some(tx)));

        let complete_sender = sender.clone();
        let on_complete = Closure::<dyn FnMut()>::wrap(Box::new(move || {
            if let Some(tx) = complete_sender.borrow_mut().take() {
                let _ = tx.send(Ok(()));
            }
        }));
        let abort_sender = sender.clone();
        let abort_op = op.to_string();
        let on_abort = Closure::<dyn FnMut()>::wrap(Box::new(move || {
            if let Some(tx) = abort_sender.borrow_mut().take() {
                let _ = tx.send(Err(format!("{abort_op} transaction aborted")));
            }
        }));
        let error_sender = sender.clone();
        let error_op = op.to_string();
        let on_error = Closure::<dyn FnMut()>::wrap(Box::new(move || {
            if let Some(tx) = error_sender.borrow_mut().take() {
                let _ = tx.send(Err(format!("{error_op} transaction failed")));
            }
        }));
        transaction.set_oncomplete(Some(on_complete.as_ref().unchecked_ref()));
        transaction.set_onabort(Some(on_abort.as_ref().unchecked_ref()));
        transaction.set_onerror(Some(on_error.as_ref().unchecked_ref()));

        let settled = rx
            .await
            .map_err(|_| format!("{op} transaction dropped before settling"));
        transaction.set_oncomplete(None);
        transaction.set_onabort(None);
        transaction.set_onerror(None);
        settled?
    }
}

//! Fire-and-forget task execution for host writes.

/// Runs a future without awaiting it from the caller.
///
/// In the browser this defers onto the microtask queue; natively the host
/// adapters resolve immediately, so the future is driven to completion
/// inline.
pub(crate) fn spawn_detached(future: impl std::future::Future<Output = ()> + 'static) {
    #[cfg(target_arch = "wasm32")]
    wasm_bindgen_futures::spawn_local(future);

    #[cfg(not(target_arch = "wasm32"))]
    futures::executor::block_on(future);
}

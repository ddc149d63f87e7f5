//! Binary entrypoint for the browser-hosted new-tab page.

#[cfg(all(target_arch = "wasm32", feature = "csr"))]
fn main() {
    tab_page::mount();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    eprintln!(
        "This binary is intended for the browser/WASM workflow. Build `tab_page_app` for wasm32 with the `csr` feature."
    );
}

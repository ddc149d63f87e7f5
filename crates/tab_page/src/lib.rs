mod web_app;

pub use web_app::ZenTabApp;

#[cfg(all(feature = "csr", target_arch = "wasm32"))]
pub fn mount() {
    console_error_panic_hook::set_once();
    leptos::logging::log!(
        "storage strategy: {}",
        tab_host_web::storage_strategy_name()
    );
    leptos::mount_to_body(|| leptos::view! { <ZenTabApp /> })
}

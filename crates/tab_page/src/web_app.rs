use leptos::*;
use leptos_meta::*;
use tab_runtime::{TabProvider, TabShell};

#[component]
/// Top-level application shell for the new-tab page.
pub fn ZenTabApp() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="New Tab" />
        <Meta name="description" content="A minimal new-tab page with clock, search, and wallpapers." />

        <main class="page-root">
            <TabProvider>
                <TabShell />
            </TabProvider>
        </main>
    }
}

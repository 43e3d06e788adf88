use leptos::prelude::*;
use leptos_router::components::*;
use leptos_router::path;

use crate::components::menu::Menu;
use crate::components::viewer::{ShowTab, Viewer, ViewerContext};
use crate::navigation::{MenuEntry, TabSet};

#[component]
pub fn App() -> impl IntoView {
    provide_context(ViewerContext {
        tabs: RwSignal::new(TabSet::default()),
    });

    view! {
        <Router>
            <div class="app-layout">
                <header class="banner">
                    <h1 class="banner-title">"MaxKernel Dashboard"</h1>
                </header>
                <div class="app-body">
                    <Menu />
                    <main class="content">
                        <Routes fallback=|| view! { <p>"Page not found"</p> }>
                            <Route
                                path=path!("/")
                                view=|| view! { <ShowTab entry=MenuEntry::Dashboard /> }
                            />
                            <Route
                                path=path!("/calibration")
                                view=|| view! { <ShowTab entry=MenuEntry::Calibration /> }
                            />
                            <Route
                                path=path!("/objects")
                                view=|| view! { <ShowTab entry=MenuEntry::Objects /> }
                            />
                        </Routes>
                        <Viewer />
                    </main>
                </div>
            </div>
        </Router>
    }
}

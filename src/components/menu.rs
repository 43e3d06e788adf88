use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use leptos_router::NavigateOptions;

use crate::components::viewer::ViewerContext;
use crate::navigation::MenuEntry;

/// Side menu. Selecting an entry shows its tab, reopening it if it was closed.
#[component]
pub fn Menu() -> impl IntoView {
    let viewer = expect_context::<ViewerContext>();
    let navigate = use_navigate();

    view! {
        <nav class="sidebar">
            <div class="sidebar-header">
                <h2 class="sidebar-title">"Menu"</h2>
            </div>
            <ul class="nav-list">
                {MenuEntry::ALL
                    .into_iter()
                    .map(|entry| {
                        let navigate = navigate.clone();
                        view! {
                            <li class="nav-item">
                                <a
                                    href=entry.path()
                                    class="nav-link"
                                    class:active=move || viewer.tabs.with(|t| t.is_active(entry))
                                    on:click=move |ev| {
                                        ev.prevent_default();
                                        viewer.tabs.update(|t| {
                                            t.show_tab(entry);
                                        });
                                        navigate(entry.path(), NavigateOptions::default());
                                    }
                                >
                                    {entry.title()}
                                </a>
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>
        </nav>
    }
}

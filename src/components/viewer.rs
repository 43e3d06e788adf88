//! Tab container for the dashboard pages.
//!
//! Routes only decide which tab to show; the tabs themselves live here and
//! keep their state while open.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use leptos_router::NavigateOptions;

use crate::navigation::{MenuEntry, TabSet};
use crate::pages::calibration::CalibrationPage;
use crate::pages::dashboard::DashboardPage;
use crate::pages::objects::ObjectsPage;

#[derive(Clone, Copy)]
pub struct ViewerContext {
    pub tabs: RwSignal<TabSet>,
}

fn page(entry: MenuEntry) -> AnyView {
    match entry {
        MenuEntry::Dashboard => view! { <DashboardPage /> }.into_any(),
        MenuEntry::Calibration => view! { <CalibrationPage /> }.into_any(),
        MenuEntry::Objects => view! { <ObjectsPage /> }.into_any(),
    }
}

/// Route target: brings `entry`'s tab to the front.
#[component]
pub fn ShowTab(entry: MenuEntry) -> impl IntoView {
    let viewer = expect_context::<ViewerContext>();
    Effect::new(move |_| {
        viewer.tabs.update(|t| {
            t.show_tab(entry);
        });
    });
}

#[component]
pub fn Viewer() -> impl IntoView {
    let tabs = expect_context::<ViewerContext>().tabs;
    let navigate = use_navigate();

    let activate = {
        let navigate = navigate.clone();
        move |entry: MenuEntry| {
            tabs.update(|t| {
                t.show_tab(entry);
            });
            navigate(entry.path(), NavigateOptions::default());
        }
    };

    let close = move |entry: MenuEntry| {
        let was_active = tabs.with_untracked(|t| t.is_active(entry));
        tabs.update(|t| t.close_tab(entry));
        if was_active {
            if let Some(next) = tabs.with_untracked(|t| t.active()) {
                navigate(next.path(), NavigateOptions::default());
            }
        }
    };

    view! {
        <div class="viewer">
            <style>{include_str!("viewer.css")}</style>
            <div class="tab-strip">
                {move || {
                    tabs.with(|t| t.open().to_vec())
                        .into_iter()
                        .map(|entry| {
                            let activate = activate.clone();
                            let close = close.clone();
                            view! {
                                <div
                                    class="tab"
                                    class:active=move || tabs.with(|t| t.is_active(entry))
                                >
                                    <button class="tab-title" on:click=move |_| activate(entry)>
                                        {entry.title()}
                                    </button>
                                    <button
                                        class="tab-close"
                                        title="Close"
                                        on:click=move |_| close(entry)
                                    >
                                        "×"
                                    </button>
                                </div>
                            }
                        })
                        .collect_view()
                }}
            </div>

            {MenuEntry::ALL
                .into_iter()
                .map(|entry| {
                    view! {
                        <Show when=move || tabs.with(|t| t.is_open(entry))>
                            <div
                                class="tab-panel"
                                style:display=move || {
                                    if tabs.with(|t| t.is_active(entry)) { "block" } else { "none" }
                                }
                            >
                                {page(entry)}
                            </div>
                        </Show>
                    }
                })
                .collect_view()}

            <Show when=move || tabs.with(|t| t.open().is_empty())>
                <p class="viewer-empty">"Select an entry from the menu."</p>
            </Show>
        </div>
    }
}

//! Object inspector: kernel objects grouped by class, plus a property
//! panel for the selected one.

use leptos::logging::warn;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::api::{self, ObjectItem};
use crate::objects::{group_by_class, inspect};

#[component]
pub fn ObjectsPage() -> impl IntoView {
    let (objects, set_objects) = signal::<Option<Vec<ObjectItem>>>(None);
    let (error, set_error) = signal::<Option<String>>(None);
    let (selected, set_selected) = signal::<Option<ObjectItem>>(None);

    let reload = move || {
        set_error.set(None);
        spawn_local(async move {
            match api::fetch_objects().await {
                Ok(list) => set_objects.set(Some(list)),
                Err(e) => {
                    warn!("Loading objects failed: {:?}", e);
                    set_error.set(Some(e.to_string()));
                }
            }
        });
    };

    Effect::new(move |_| reload());

    view! {
        <div class="page objects-page">
            <div class="page-header">
                <h2>"Objects"</h2>
                <button class="btn btn-secondary" on:click=move |_| reload()>"Refresh"</button>
            </div>

            <Show when=move || error.get().is_some()>
                <p class="status-message status-error">{move || error.get().unwrap_or_default()}</p>
            </Show>

            <div class="inspector">
                <div class="object-grid">
                    {move || match objects.get() {
                        None => view! { <p class="loading-text">"Loading objects..."</p> }.into_any(),
                        Some(list) if list.is_empty() => {
                            view! { <p class="empty-text">"The kernel reports no objects."</p> }.into_any()
                        }
                        Some(list) => {
                            view! {
                                <table class="object-table">
                                    <thead>
                                        <tr>
                                            <th>"Subname"</th>
                                            <th>"ID"</th>
                                            <th>"Parent"</th>
                                        </tr>
                                    </thead>
                                    {group_by_class(&list)
                                        .into_iter()
                                        .map(|(class, members)| {
                                            view! {
                                                <tbody>
                                                    <tr class="object-class">
                                                        <th colspan="3">{format!("Class: {}", class)}</th>
                                                    </tr>
                                                    {members
                                                        .into_iter()
                                                        .map(|object| {
                                                            let id = object.id.clone();
                                                            let subname = object.subname.clone();
                                                            let parent = object.parent.clone();
                                                            let is_selected = {
                                                                let object = object.clone();
                                                                move || selected.with(|s| s.as_ref() == Some(&object))
                                                            };
                                                            view! {
                                                                <tr
                                                                    class="object-row"
                                                                    class:selected=is_selected
                                                                    on:click=move |_| set_selected.set(Some(object.clone()))
                                                                >
                                                                    <td>{subname}</td>
                                                                    <td>{id}</td>
                                                                    <td>{parent}</td>
                                                                </tr>
                                                            }
                                                        })
                                                        .collect::<Vec<_>>()}
                                                </tbody>
                                            }
                                        })
                                        .collect::<Vec<_>>()}
                                </table>
                            }
                                .into_any()
                        }
                    }}
                </div>

                <div class="property-panel">
                    <h3>"Properties"</h3>
                    {move || match selected.get() {
                        None => view! { <p class="empty-text">"Select an object."</p> }.into_any(),
                        Some(object) => {
                            view! {
                                <p class="property-title">
                                    {format!("{} / {}", object.name, object.subname)}
                                </p>
                                <table class="property-table">
                                    <tbody>
                                        {inspect(&object.desc)
                                            .into_iter()
                                            .map(|(key, value)| {
                                                view! {
                                                    <tr>
                                                        <th>{key}</th>
                                                        <td>{value}</td>
                                                    </tr>
                                                }
                                            })
                                            .collect::<Vec<_>>()}
                                    </tbody>
                                </table>
                            }
                                .into_any()
                        }
                    }}
                </div>
            </div>
        </div>
    }
}

//! Committed calibration changes, newest first.

use leptos::logging::warn;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::api::{self, HistoryEntry};

const HISTORY_LIMIT: usize = 50;

/// Reloads whenever `version` changes.
#[component]
pub fn HistoryPanel(#[prop(into)] version: Signal<u32>) -> impl IntoView {
    let (entries, set_entries) = signal::<Option<Vec<HistoryEntry>>>(None);
    let (loading, set_loading) = signal(true);
    let (error, set_error) = signal::<Option<String>>(None);

    Effect::new(move |_| {
        version.track();
        set_loading.set(true);
        spawn_local(async move {
            match api::fetch_history(HISTORY_LIMIT).await {
                Ok(list) => {
                    set_entries.set(Some(list));
                    set_error.set(None);
                }
                Err(e) => {
                    warn!("Loading calibration history failed: {:?}", e);
                    set_error.set(Some(e.to_string()));
                }
            }
            set_loading.set(false);
        });
    });

    view! {
        <div class="history-panel">
            <style>{include_str!("history_panel.css")}</style>
            <h3 class="history-title">"Calibration History"</h3>

            {move || {
                if loading.get() && entries.with(|e| e.is_none()) {
                    view! { <p class="history-loading">"Loading history..."</p> }.into_any()
                } else if let Some(err) = error.get() {
                    view! { <p class="history-error">{err}</p> }.into_any()
                } else if let Some(entries) = entries.get() {
                    if entries.is_empty() {
                        view! { <p class="history-empty">"No calibration has been committed yet."</p> }
                            .into_any()
                    } else {
                        view! {
                            <table class="history-table">
                                <thead>
                                    <tr>
                                        <th>"Group"</th>
                                        <th>"Name"</th>
                                        <th>"Value"</th>
                                        <th>"Updated"</th>
                                        <th>"Comment"</th>
                                    </tr>
                                </thead>
                                <tbody>
                                    {entries
                                        .into_iter()
                                        .map(|e| {
                                            view! {
                                                <tr>
                                                    <td>{e.group}</td>
                                                    <td>{e.name}</td>
                                                    <td class="history-value">{e.value}</td>
                                                    <td class="history-date">{e.updated}</td>
                                                    <td>{e.comment}</td>
                                                </tr>
                                            }
                                        })
                                        .collect::<Vec<_>>()}
                                </tbody>
                            </table>
                        }
                            .into_any()
                    }
                } else {
                    view! { <p class="history-empty">"No data"</p> }.into_any()
                }
            }}
        </div>
    }
}

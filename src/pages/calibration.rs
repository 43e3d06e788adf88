use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::api;
use crate::calibration::{Action, CalibrationController, FieldKey, FollowUp};
use crate::components::calibration_list::CalibrationList;
use crate::components::history_panel::HistoryPanel;
use crate::components::message_dialog::MessageDialog;

fn load_parameters(controller: RwSignal<CalibrationController>) {
    spawn_local(async move {
        let outcome = api::fetch_parameters().await;
        controller.update(|c| c.load(outcome));
    });
}

#[component]
pub fn CalibrationPage() -> impl IntoView {
    let controller = RwSignal::new(CalibrationController::new());
    let history_version = RwSignal::new(0u32);

    let run = move |action: Action| {
        let Some(request) = controller.try_update(|c| c.request(action)).flatten() else {
            return;
        };
        spawn_local(async move {
            let outcome = api::send(&request).await;
            match controller.try_update(|c| c.complete(action, outcome)).flatten() {
                Some(FollowUp::LoadParameters) => load_parameters(controller),
                Some(FollowUp::RefreshHistory) => history_version.update(|v| *v += 1),
                None => {}
            }
        });
    };

    let on_preview = Callback::new(move |(key, raw): (FieldKey, String)| {
        let Some(request) = controller.try_update(|c| c.preview(&key, &raw)).flatten() else {
            return;
        };
        spawn_local(async move {
            let outcome = api::send(&request).await;
            controller.update(|c| c.complete_preview(&key, outcome));
        });
    });

    // Ask the server which mode it is in on mount
    Effect::new(move |_| run(Action::Init));

    view! {
        <div class="page calibration-page">
            <h2>"Calibration"</h2>

            <CalibrationList
                controller=controller
                on_action=Callback::new(run)
                on_preview=on_preview
            />

            <HistoryPanel version=history_version />

            <Show when=move || controller.with(|c| c.loading())>
                <div class="loading-mask">
                    <span class="loading-text">"Loading..."</span>
                </div>
            </Show>

            <MessageDialog
                notice=Signal::derive(move || controller.with(|c| c.notice().cloned()))
                on_close=Callback::new(move |_| controller.update(|c| c.dismiss_notice()))
            />
        </div>
    }
}

//! Calibration toolbar and the grouped parameter list.

use leptos::prelude::*;

use crate::calibration::{Action, CalibrationController, FieldKey, Mode};
use crate::components::calibration_field::CalibrationField;

#[component]
pub fn CalibrationList(
    controller: RwSignal<CalibrationController>,
    on_action: Callback<Action>,
    on_preview: Callback<(FieldKey, String)>,
) -> impl IntoView {
    let toolbar = move || controller.with(|c| c.toolbar());
    let enabled = Signal::derive(move || controller.with(|c| c.inputs_enabled()));

    view! {
        <div class="calibration-list">
            <style>{include_str!("calibration_list.css")}</style>
            <div class="calibration-toolbar">
                <button
                    class="btn btn-primary"
                    disabled=move || !toolbar().start
                    on:click=move |_| on_action.run(Action::Start)
                >
                    "Start calibration"
                </button>
                <button
                    class="btn btn-secondary"
                    disabled=move || !toolbar().revert
                    on:click=move |_| on_action.run(Action::Revert)
                >
                    "Revert"
                </button>
                <input
                    type="text"
                    class="input comment-input"
                    placeholder="Comment"
                    disabled=move || !toolbar().comment
                    prop:value=move || controller.with(|c| c.comment().to_string())
                    on:input=move |ev| {
                        controller.update(|c| c.set_comment(event_target_value(&ev)));
                    }
                />
                <button
                    class="btn btn-primary"
                    disabled=move || !toolbar().commit
                    on:click=move |_| on_action.run(Action::Commit)
                >
                    "Commit"
                </button>
                <span class="calibration-mode">
                    {move || match controller.with(|c| c.mode()) {
                        Mode::Idle => "Idle",
                        Mode::Calibrating => "Calibrating",
                    }}
                </span>
            </div>

            <Show when=move || controller.with(|c| c.inputs_enabled() && !c.loading() && c.fields().is_empty())>
                <p class="empty-text">"The kernel reports no calibration values."</p>
            </Show>

            <For
                each=move || controller.with(|c| c.groups())
                key=|group| group.clone()
                children=move |group| {
                    let title = group.clone();
                    view! {
                        <fieldset class="calibration-group">
                            <legend>{title}</legend>
                            <For
                                each=move || controller.with(|c| c.keys_in_group(&group))
                                key=|key| key.clone()
                                children=move |key: FieldKey| {
                                    let lookup = key.clone();
                                    let field = Signal::derive(move || {
                                        controller.with(|c| c.field(&lookup).cloned())
                                    });
                                    view! {
                                        <CalibrationField
                                            field=field
                                            enabled=enabled
                                            on_change=Callback::new(move |raw: String| {
                                                on_preview.run((key.clone(), raw));
                                            })
                                        />
                                    }
                                }
                            />
                        </fieldset>
                    }
                }
            />
        </div>
    }
}

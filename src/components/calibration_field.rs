use leptos::prelude::*;

use crate::calibration::FieldState;

fn attr_number(value: f64) -> String {
    format!("{}", value)
}

/// Numeric input for one calibration parameter. Edits are reported on
/// change; the shown value and hint follow the field state.
#[component]
pub fn CalibrationField(
    field: Signal<Option<FieldState>>,
    #[prop(into)] enabled: Signal<bool>,
    on_change: Callback<String>,
) -> impl IntoView {
    let initial = field.get_untracked();
    let label = initial.as_ref().map(|f| f.param.name.clone()).unwrap_or_default();
    let description = initial
        .as_ref()
        .map(|f| f.param.description.clone())
        .unwrap_or_default();
    let step = initial.as_ref().map(|f| attr_number(f.step()));
    let min = initial.as_ref().and_then(|f| f.min()).map(attr_number);
    let max = initial.as_ref().and_then(|f| f.max()).map(attr_number);

    let value = move || field.with(|f| f.as_ref().map(|f| f.value.clone()).unwrap_or_default());
    let hint = move || field.with(|f| f.as_ref().and_then(|f| f.hint.clone()));

    view! {
        <div class="calibration-field" title=description>
            <label class="field-label">{label}</label>
            <input
                type="number"
                class="input field-input"
                step=step
                min=min
                max=max
                prop:value=value
                disabled=move || !enabled.get()
                on:change=move |ev| on_change.run(event_target_value(&ev))
            />
            <Show when=move || hint().is_some()>
                <span class="field-hint">{move || hint().unwrap_or_default()}</span>
            </Show>
        </div>
    }
}

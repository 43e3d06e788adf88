//! Blocking modal for info and error messages.

use leptos::prelude::*;

use crate::calibration::Notice;

#[component]
pub fn MessageDialog(
    #[prop(into)] notice: Signal<Option<Notice>>,
    on_close: Callback<()>,
) -> impl IntoView {
    view! {
        <Show when=move || notice.with(|n| n.is_some())>
            <div class="message-overlay">
                <style>{include_str!("message_dialog.css")}</style>
                {move || {
                    let (title, class, text) = match notice.get() {
                        Some(Notice::Error(text)) => ("Error!", "message-dialog message-error", text),
                        Some(Notice::Info(text)) => ("Message", "message-dialog", text),
                        None => ("", "message-dialog", String::new()),
                    };
                    view! {
                        <div class=class role="dialog">
                            <h3>{title}</h3>
                            <p class="message-text">{text}</p>
                            <div class="dialog-actions">
                                <button class="btn btn-primary" on:click=move |_| on_close.run(())>
                                    "OK"
                                </button>
                            </div>
                        </div>
                    }
                }}
            </div>
        </Show>
    }
}

//! Status line: outcome of the last user-initiated operation.

use leptos::*;

use crate::StatusEvent;

#[component]
pub fn StatusLine(status: RwSignal<Option<StatusEvent>>) -> impl IntoView {
    view! {
        <Show when=move || status.get().is_some() fallback=|| view! {}>
            {move || {
                status
                    .get()
                    .map(|event| {
                        view! {
                            <div class=format!("status-line {}", event.level.css_class())>
                                {format!("{} {}", event.level.emoji(), event.message)}
                            </div>
                        }
                    })
            }}
        </Show>
    }
}

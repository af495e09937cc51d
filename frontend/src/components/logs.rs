//! Activity log panel.
//!
//! Shows every status event the backend streams, refresh failures included,
//! with auto-scroll.

use leptos::*;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::LogEntry;

/// Request animation frame helper for smooth scrolling
fn request_animation_frame(f: impl FnOnce() + 'static) {
    let closure = Closure::once(f);
    if let Some(window) = web_sys::window() {
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

#[component]
pub fn LogsPanel(logs: RwSignal<Vec<LogEntry>>) -> impl IntoView {
    let logs_container = create_node_ref::<leptos::html::Div>();

    // Auto-scroll to bottom when logs change
    create_effect(move |_| {
        let _ = logs.get();
        if let Some(container) = logs_container.get() {
            request_animation_frame(move || {
                container.set_scroll_top(container.scroll_height());
            });
        }
    });

    view! {
        <div class="logs-panel">
            <div class="logs-header">
                <span class="logs-title">"📋 Activity"</span>
                <button class="logs-clear" on:click=move |_| logs.set(vec![])>
                    "Clear"
                </button>
            </div>
            <div class="logs-content" node_ref=logs_container>
                <Show
                    when=move || !logs.get().is_empty()
                    fallback=|| view! { <div class="log-entry log-empty">"No activity yet."</div> }
                >
                    <For
                        each=move || logs.get().into_iter().enumerate()
                        key=|(i, entry)| (*i, entry.timestamp.clone())
                        children=move |(_, entry)| {
                            view! {
                                <div class=format!("log-entry {}", entry.level.css_class())>
                                    <span class="log-time">"[" {entry.timestamp.clone()} "] "</span>
                                    {format!("{} {}", entry.level.emoji(), entry.message)}
                                </div>
                            }
                        }
                    />
                </Show>
            </div>
        </div>
    }
}

//! Header with the signed-in account

use leptos::*;

use crate::APP_NAME;

#[component]
pub fn Header(signed_in_as: RwSignal<Option<String>>) -> impl IntoView {
    view! {
        <header>
            <div class="header-left">
                <a href="#" class="logo">{APP_NAME}</a>
            </div>
            <div class="header-right">
                <div class="session-status" class:connected=move || signed_in_as.get().is_some()>
                    <span class="session-dot" class:connected=move || signed_in_as.get().is_some()></span>
                    <span>
                        {move || signed_in_as.get().unwrap_or_else(|| "Not signed in".to_string())}
                    </span>
                </div>
            </div>
        </header>
    }
}

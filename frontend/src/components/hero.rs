//! Hero section component

use leptos::*;

#[component]
pub fn Hero() -> impl IntoView {
    view! {
        <div class="hero">
            <h1>"Contacts"</h1>
            <p class="subtitle">
                "Sign in, import a spreadsheet of contacts (first sheet, one row per contact) "
                "and manage the list."
            </p>
        </div>
    }
}

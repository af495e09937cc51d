//! Contact list with one delete button per row.

use leptos::*;

use crate::{ContactRow, Operation, PageState};

#[component]
pub fn ContactList(state: PageState) -> impl IntoView {
    let listing = state.listing;
    let deleting = {
        let state = state.clone();
        move || state.is_busy(Operation::Delete)
    };

    view! {
        <div class="contacts-section">
            <h2>"Contacts"</h2>
            <Show
                when=move || listing.get().rows.is_empty()
                fallback=move || {
                    let state = state.clone();
                    let deleting = deleting.clone();
                    view! {
                        <ul class="contact-list">
                            <For
                                each=move || listing.get().rows
                                key=|row| row.id.clone()
                                children=move |row: ContactRow| {
                                    let state = state.clone();
                                    let id = row.id.clone();
                                    view! {
                                        <li class="contact-row">
                                            <span class="contact-name">{row.name.clone()}</span>
                                            " - "
                                            <span class="contact-email">{row.email.clone()}</span>
                                            <button
                                                class="contact-delete"
                                                disabled=deleting.clone()
                                                on:click=move |_| state.delete(id.clone())
                                            >
                                                "Delete"
                                            </button>
                                        </li>
                                    }
                                }
                            />
                        </ul>
                    }
                }
            >
                <p class="placeholder">
                    {move || listing.get().placeholder.unwrap_or_default()}
                </p>
            </Show>
        </div>
    }
}

//! Email/password form with sign-up and sign-in.

use leptos::*;

use crate::{Operation, PageState};

#[component]
pub fn SessionForm(state: PageState) -> impl IntoView {
    let (email, set_email) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());

    let busy = {
        let state = state.clone();
        move || state.is_busy(Operation::SignIn)
    };

    let on_sign_up = {
        let state = state.clone();
        move |_| state.sign_up(email.get(), password.get())
    };
    let on_sign_in = move |_| state.sign_in(email.get(), password.get());

    view! {
        <div class="session-section">
            <input
                type="email"
                placeholder="Email"
                prop:value=email
                on:input=move |ev| set_email.set(event_target_value(&ev))
            />
            <input
                type="password"
                placeholder="Password"
                prop:value=password
                on:input=move |ev| set_password.set(event_target_value(&ev))
            />
            <div class="session-buttons">
                <button class="button" disabled=busy.clone() on:click=on_sign_up>
                    "Sign up"
                </button>
                <button class="button primary" disabled=busy on:click=on_sign_in>
                    "Sign in"
                </button>
            </div>
        </div>
    }
}

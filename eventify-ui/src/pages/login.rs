//! Login Page

use eventify_core::notice::messages::{LOGIN_REJECTED, LOGIN_SUCCEEDED};
use eventify_core::{Credentials, Notice};
use leptos::*;
use leptos_router::*;

use crate::api;
use crate::pages::failure_notice;
use crate::state::global::use_global_state;

#[component]
pub fn Login() -> impl IntoView {
    let state = use_global_state();
    let navigate = use_navigate();

    let (username, set_username) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let (show_password, set_show_password) = create_signal(false);
    let (submitting, set_submitting) = create_signal(false);

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();

        let credentials = Credentials::new(username.get(), password.get());
        if let Err(e) = credentials.validate() {
            state.notify(&Notice::from(e));
            return;
        }

        set_submitting.set(true);
        let navigate = navigate.clone();
        spawn_local(async move {
            match api::login(&credentials).await {
                Ok(user) => {
                    state.log_in(user);
                    state.notify(&Notice::success(LOGIN_SUCCEEDED));
                    navigate("/dashboard", Default::default());
                }
                Err(e) => state.notify(&failure_notice(&e, LOGIN_REJECTED)),
            }
            set_submitting.set(false);
        });
    };

    view! {
        <div class="max-w-md mx-auto mt-24 p-6 bg-white rounded-lg shadow">
            <h2 class="text-2xl mb-4 text-center">"Login"</h2>
            <form on:submit=on_submit>
                <input
                    type="text"
                    placeholder="Email ID or Username"
                    prop:value=move || username.get()
                    on:input=move |ev| set_username.set(event_target_value(&ev))
                    class="block w-full p-2 mb-2 border"
                />
                <div class="relative">
                    <input
                        type=move || if show_password.get() { "text" } else { "password" }
                        placeholder="Password"
                        prop:value=move || password.get()
                        on:input=move |ev| set_password.set(event_target_value(&ev))
                        class="block w-full p-2 mb-2 border"
                    />
                    <button
                        type="button"
                        on:click=move |_| set_show_password.update(|v| *v = !*v)
                        class="absolute inset-y-0 right-0 pr-3 text-sm text-gray-500"
                    >
                        {move || if show_password.get() { "Hide" } else { "Show" }}
                    </button>
                </div>
                <button
                    type="submit"
                    disabled=move || submitting.get()
                    class="bg-black text-white p-2 mt-4 w-full disabled:bg-gray-500"
                >
                    "Log In"
                </button>
            </form>
            <p class="text-center mt-4">
                "Don't have an account? "
                <A href="/signup" class="text-blue-500">"Sign up"</A>
            </p>
        </div>
    }
}

//! Route guard
//!
//! Pages that need a login are wrapped in [`Protected`]. Without a stored
//! user it shows the login-required toast and redirects to `/login` after
//! a short pause.

use eventify_core::notice::messages::LOGIN_REQUIRED;
use leptos::*;
use leptos_router::*;

use crate::state::global::use_global_state;

/// Pause before redirecting, so the toast is seen
const REDIRECT_DELAY_MS: u32 = 1000;

#[component]
pub fn Protected(children: ChildrenFn) -> impl IntoView {
    let state = use_global_state();
    let logged_in = create_memo(move |_| state.is_logged_in());
    let navigate = use_navigate();

    create_effect(move |_| {
        if logged_in.get() {
            return;
        }
        state.show_error(LOGIN_REQUIRED);

        let navigate = navigate.clone();
        gloo_timers::callback::Timeout::new(REDIRECT_DELAY_MS, move || {
            navigate("/login", Default::default());
        })
        .forget();
    });

    view! {
        <Show when=move || logged_in.get() fallback=|| ()>
            {children()}
        </Show>
    }
}

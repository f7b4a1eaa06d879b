//! Header Component
//!
//! Top bar of the signed-in pages with the page title and navigation.

use eventify_core::{notice::messages::LOGGED_OUT, Notice};
use leptos::*;
use leptos_router::*;

use crate::state::global::use_global_state;

/// Page header with "Add Event", "Analysis" and "Log Out" buttons
#[component]
pub fn Header(
    #[prop(into)]
    title: String,
) -> impl IntoView {
    let state = use_global_state();
    let navigate = use_navigate();

    let on_logout = move |_| {
        state.log_out();
        state.notify(&Notice::info(LOGGED_OUT));
        navigate("/login", Default::default());
    };

    view! {
        <header class="bg-slate-200 shadow">
            <div class="max-w-7xl mx-auto px-4 flex justify-between items-center h-16 space-x-4">
                <A href="/dashboard" class="text-xl font-bold">"Eventify"</A>

                <h1 class="text-lg md:text-2xl font-bold">{title}</h1>

                <div class="flex items-center space-x-2">
                    <NavButton href="/create-event" label="Add Event" />
                    <NavButton href="/analysis" label="Analysis" />
                    <button
                        on:click=on_logout
                        class="px-3 py-1 rounded-md text-sm border border-gray-400 hover:bg-gray-300"
                    >
                        "Log Out"
                    </button>
                </div>
            </div>
        </header>
    }
}

#[component]
fn NavButton(
    href: &'static str,
    label: &'static str,
) -> impl IntoView {
    view! {
        <A
            href=href
            class="px-3 py-1 rounded-md text-sm text-white bg-indigo-600 hover:bg-indigo-700"
        >
            {label}
        </A>
    }
}

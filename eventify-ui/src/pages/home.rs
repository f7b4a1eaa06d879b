//! Home Page

use leptos::*;
use leptos_router::*;

#[component]
pub fn Home() -> impl IntoView {
    view! {
        <div class="max-w-md mx-auto mt-24 p-6 bg-white rounded-lg shadow">
            <h1 class="text-3xl mb-4 text-center">"Welcome to Eventify"</h1>
            <A href="/signup" class="bg-black text-white p-2 mt-4 block w-full text-center">
                "Sign Up"
            </A>
            <A href="/login" class="bg-black text-white p-2 mt-4 block w-full text-center">
                "Log In"
            </A>
        </div>
    }
}

//! App Root Component
//!
//! Routing and global providers.

use leptos::*;
use leptos_router::*;

use crate::components::{Protected, Toast};
use crate::pages::{Analysis, CreateEvent, Dashboard, EventDetails, Home, Login, Signup};
use crate::state::global::provide_global_state;

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    provide_global_state();

    view! {
        <Router>
            <div class="min-h-screen bg-gray-50 text-gray-900 flex flex-col">
                <main class="flex-1">
                    <Routes>
                        <Route path="/" view=Home />
                        <Route path="/signup" view=Signup />
                        <Route path="/login" view=Login />
                        <Route path="/dashboard" view=|| view! { <Protected><Dashboard /></Protected> } />
                        <Route path="/create-event" view=|| view! { <Protected><CreateEvent /></Protected> } />
                        <Route path="/event/:id" view=|| view! { <Protected><EventDetails /></Protected> } />
                        <Route path="/analysis" view=|| view! { <Protected><Analysis /></Protected> } />
                        <Route path="/*any" view=NotFound />
                    </Routes>
                </main>

                <Toast />
            </div>
        </Router>
    }
}

/// Shown for any unknown path
#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center min-h-[60vh] text-center">
            <h1 class="text-2xl font-bold mb-4">"The page you are looking for does not exist !!"</h1>
            <A href="/" class="px-6 py-3 bg-black text-white rounded-lg font-medium">
                "Go Home"
            </A>
        </div>
    }
}

//! Event Card Component
//!
//! Summary card used on the dashboard and under "Related events".

use eventify_core::Event;
use leptos::*;
use leptos_router::*;

/// Placeholder when an event has no image yet
const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/300x200";

/// Dashboard layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}

impl ViewMode {
    /// Grid classes for the card container
    pub fn container_class(&self) -> &'static str {
        match self {
            ViewMode::Grid => "grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-4",
            ViewMode::List => "grid grid-cols-1 gap-4",
        }
    }
}

#[component]
pub fn EventCard(event: Event) -> impl IntoView {
    let navigate = use_navigate();
    let href = format!("/event/{}", event.id);
    let image = event
        .image
        .clone()
        .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string());

    let on_click = move |_| navigate(&href, Default::default());

    view! {
        <div
            on:click=on_click
            class="flex mb-4 p-4 border rounded-lg shadow-sm bg-white cursor-pointer hover:shadow-md"
        >
            <img class="w-32 h-40 object-cover rounded mr-4" src=image alt=event.title.clone() />
            <div class="flex flex-col justify-between">
                <div>
                    <h3 class="text-xl font-bold mb-2">{event.title.clone()}</h3>
                    <p class="text-gray-600 mb-2">
                        {format!("{} at {} on {}", event.date, event.time, event.location)}
                    </p>
                    <p class="text-indigo-600 font-bold mb-2">{format!("Tickets from {}", event.price)}</p>
                    <p class="text-gray-600 mb-4">{event.description.clone()}</p>
                </div>
                <button class="border border-gray-300 text-gray-600 p-2 rounded">
                    "TICKETS & DETAILS"
                </button>
            </div>
        </div>
    }
}

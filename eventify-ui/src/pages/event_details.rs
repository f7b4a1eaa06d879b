//! Event Details Page
//!
//! Full event with registration, the collapsible "When & Where" and
//! "Organiser" panels, a map and the other events underneath.

use eventify_core::event::DETAIL_IMAGE_SIZE;
use eventify_core::notice::messages::{
    ALREADY_REGISTERED, EVENT_LOAD_FAILED, REGISTERED, REGISTER_FAILED,
};
use eventify_core::{Event, EventId, Notice, StoreAction};
use leptos::*;
use leptos_router::*;

use crate::api;
use crate::components::{EventCard, Header, Loading};
use crate::state::global::use_global_state;

#[derive(Params, PartialEq, Clone)]
struct DetailsParams {
    id: Option<String>,
}

#[component]
pub fn EventDetails() -> impl IntoView {
    let state = use_global_state();
    let params = use_params::<DetailsParams>();

    let event = create_rw_signal(None::<Event>);
    let related = create_rw_signal(Vec::<Event>::new());
    let (failed, set_failed) = create_signal(false);

    let event_id = move || {
        params.with(|p| {
            p.as_ref()
                .ok()
                .and_then(|p| p.id.as_deref())
                .and_then(|raw| raw.parse::<EventId>().ok())
        })
    };

    // Reload whenever the id in the path changes
    create_effect(move |_| {
        let Some(id) = event_id() else {
            set_failed.set(true);
            return;
        };
        event.set(None);
        set_failed.set(false);

        spawn_local(async move {
            let (width, height) = DETAIL_IMAGE_SIZE;
            match api::fetch_event(id).await {
                Ok(found) => event.set(Some(found.with_image(width, height))),
                Err(e) => {
                    web_sys::console::error_1(&format!("Error fetching event: {}", e).into());
                    state.show_error(EVENT_LOAD_FAILED);
                    set_failed.set(true);
                    return;
                }
            }

            // Related events are best effort
            match api::fetch_events().await {
                Ok(events) => related.set(events.into_iter().filter(|e| e.id != id).collect()),
                Err(e) => web_sys::console::warn_1(&format!("Error fetching related events: {}", e).into()),
            }
        });
    });

    let on_register = move |_| {
        let Some(current) = event.get_untracked() else {
            return;
        };
        if current.is_registered {
            state.notify(&Notice::error(ALREADY_REGISTERED));
            return;
        }

        let updated = Event {
            is_registered: true,
            ..current
        };
        spawn_local(async move {
            match api::update_event(&updated).await {
                Ok(()) => {
                    state.dispatch(StoreAction::MarkRegistered(updated.id));
                    event.set(Some(updated));
                    state.notify(&Notice::success(REGISTERED));
                }
                Err(e) => {
                    web_sys::console::error_1(&format!("Error registering: {}", e).into());
                    state.notify(&Notice::error(REGISTER_FAILED));
                }
            }
        });
    };

    view! {
        <Header title="Event Details" />
        <div class="container mx-auto p-6 max-w-7xl">
            {move || match event.get() {
                Some(ev) => view! { <EventBody event=ev on_register=on_register /> }.into_view(),
                None if failed.get() => view! {
                    <p class="text-center text-gray-500 py-12">{EVENT_LOAD_FAILED}</p>
                }.into_view(),
                None => view! { <Loading /> }.into_view(),
            }}

            <Show when=move || related.with(|r| !r.is_empty()) fallback=|| ()>
                <h3 class="text-2xl font-bold my-4">"You May Like"</h3>
                <div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-4">
                    {move || related.get()
                        .into_iter()
                        .map(|event| view! { <EventCard event=event /> })
                        .collect_view()}
                </div>
            </Show>
        </div>
    }
}

#[component]
fn EventBody<F>(event: Event, on_register: F) -> impl IntoView
where
    F: Fn(web_sys::MouseEvent) + Copy + 'static,
{
    let registered = event.is_registered;
    let map = event.map_embed_url();

    view! {
        <div class="flex flex-col md:flex-row">
            <div class="md:w-2/3">
                <img
                    src=event.image.clone().unwrap_or_default()
                    alt=event.title.clone()
                    class="w-full h-auto rounded mb-4"
                />
                <h2 class="text-3xl font-bold mb-4 pl-3">{event.title.clone()}</h2>
                <div class="bg-gray-100 p-4 rounded mb-4">
                    <h3 class="text-xl font-bold text-blue-900 mb-2">"WHAT'S ABOUT EVENT"</h3>
                    <p class="text-gray-600 mb-4">{event.description.clone()}</p>
                </div>
                <div class="flex space-x-4 mb-4">
                    <button
                        on:click=on_register
                        class=if registered {
                            "px-4 py-2 rounded-md bg-gray-500 text-white cursor-not-allowed"
                        } else {
                            "px-4 py-2 rounded-md bg-indigo-600 text-white"
                        }
                    >
                        {if registered { "REGISTERED" } else { "REGISTER" }}
                    </button>
                    <a
                        href=event.video_url.clone()
                        target="_blank"
                        rel="noopener noreferrer"
                        class="bg-orange-500 text-white px-4 py-2 rounded-md"
                    >
                        "WATCH VIDEO"
                    </a>
                </div>
            </div>

            <div class="md:w-1/3 md:pl-6">
                <Panel title="WHEN & WHERE">
                    <p>{format!("Date: {}", event.date)}</p>
                    <p>{format!("Time: {}", event.time)}</p>
                    <p>{format!("Location: {}", event.location)}</p>
                    <p>{format!("Zip: {}", event.zip)}</p>
                    <p>{format!("Price: {}", event.price)}</p>
                </Panel>
                <Panel title="ORGANISER">
                    <p>{format!("Name: {}", event.organiser)}</p>
                    <p>{format!("Email: {}", event.email)}</p>
                    <p>{format!("Phone: {}", event.phone_number)}</p>
                    <p>{format!("Speaker: {}", event.speaker)}</p>
                </Panel>
                {map.map(|src| view! {
                    <iframe src=src class="w-full h-64 rounded" loading="lazy" title="Event location" />
                })}
            </div>
        </div>
    }
}

/// Collapsible side panel, open by default
#[component]
fn Panel(
    title: &'static str,
    children: ChildrenFn,
) -> impl IntoView {
    let (open, set_open) = create_signal(true);

    view! {
        <div class="bg-white p-4 rounded shadow-sm mb-4">
            <div class="flex justify-between items-center mb-2">
                <h3 class="text-xl font-bold">{title}</h3>
                <button on:click=move |_| set_open.update(|o| *o = !*o)>
                    {move || if open.get() { "−" } else { "+" }}
                </button>
            </div>
            <Show when=move || open.get() fallback=|| ()>
                <div class="text-gray-600 space-y-1">{children()}</div>
            </Show>
        </div>
    }
}

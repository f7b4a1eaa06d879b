//! Dashboard Page
//!
//! Category tabs, location search and date sort over all events. Cards
//! load in chunks as the page is scrolled, or all at once with
//! "SEE ALL EVENTS".

use eventify_core::event::LIST_IMAGE_SIZE;
use eventify_core::notice::messages::LOAD_FAILED;
use eventify_core::{CategoryFilter, Dashboard as DashboardModel, EventType, FeedConfig, SortOrder, StoreAction};
use leptos::*;

use crate::api;
use crate::components::{EventCard, Header, Loading, ViewMode};
use crate::state::global::use_global_state;

/// Distance from the bottom of the page that triggers the next chunk
const SCROLL_THRESHOLD_PX: f64 = 200.0;

#[component]
pub fn Dashboard() -> impl IntoView {
    let state = use_global_state();
    let dashboard = create_rw_signal(DashboardModel::new(Vec::new(), FeedConfig::default()));
    let (view_mode, set_view_mode) = create_signal(ViewMode::Grid);
    let (loaded, set_loaded) = create_signal(false);

    // Fetch events on mount
    spawn_local(async move {
        state.loading.set(true);
        match api::fetch_events().await {
            Ok(events) => {
                let (width, height) = LIST_IMAGE_SIZE;
                let events: Vec<_> = events
                    .into_iter()
                    .map(|e| e.with_image(width, height))
                    .collect();

                if state.store.with_untracked(|s| s.is_empty()) {
                    state.dispatch(StoreAction::SetEvents(events.clone()));
                }
                dashboard.update(|d| d.set_events(events));
            }
            Err(e) => {
                web_sys::console::error_1(&format!("Error fetching events: {}", e).into());
                state.show_error(LOAD_FAILED);
            }
        }
        set_loaded.set(true);
        state.loading.set(false);
    });

    // Infinite scroll
    let handle = window_event_listener(ev::scroll, move |_| {
        if near_bottom() && dashboard.with_untracked(|d| d.feed().has_more()) {
            dashboard.update(|d| {
                d.feed_mut().load_more();
            });
        }
    });
    on_cleanup(move || handle.remove());

    let category = move || dashboard.with(|d| d.query().category);

    view! {
        <Header title="Dashboard" />
        <div class="p-4 max-w-7xl mx-auto">
            <div class="flex flex-col md:flex-row justify-between items-center mb-4 gap-4">
                <div class="flex items-center space-x-4">
                    <CategoryTab dashboard=dashboard current=Signal::derive(category) target=CategoryFilter::All />
                    {EventType::all()
                        .iter()
                        .map(|t| view! {
                            <CategoryTab
                                dashboard=dashboard
                                current=Signal::derive(category)
                                target=CategoryFilter::Only(*t)
                            />
                        })
                        .collect_view()}
                </div>

                <div class="flex items-center space-x-4">
                    <input
                        type="text"
                        placeholder="Location search"
                        class="border p-2 rounded"
                        prop:value=move || dashboard.with(|d| d.query().location.clone())
                        on:input=move |ev| {
                            let location = event_target_value(&ev);
                            dashboard.update(|d| d.set_location(location));
                        }
                    />
                    <select
                        class="border p-2 rounded"
                        on:change=move |ev| {
                            if let Ok(order) = event_target_value(&ev).parse::<SortOrder>() {
                                dashboard.update(|d| d.set_sort(order));
                            }
                        }
                        prop:value=move || dashboard.with(|d| d.query().sort.as_str())
                    >
                        <option value="asc">"Sort by Date (Ascending)"</option>
                        <option value="desc">"Sort by Date (Descending)"</option>
                    </select>
                    <ViewToggle label="Grid" mode=ViewMode::Grid current=view_mode set=set_view_mode />
                    <ViewToggle label="List" mode=ViewMode::List current=view_mode set=set_view_mode />
                </div>
            </div>

            <Show when=move || loaded.get() fallback=|| view! { <Loading /> }>
                <div class=move || view_mode.get().container_class()>
                    {move || {
                        dashboard.with(|d| d.feed().visible().to_vec())
                            .into_iter()
                            .map(|event| view! { <EventCard event=event /> })
                            .collect_view()
                    }}
                </div>
                <Show when=move || dashboard.with(|d| d.feed().total() == 0) fallback=|| ()>
                    <p class="text-center text-gray-500 py-8">"No events found."</p>
                </Show>
            </Show>

            <div class="flex justify-center mt-4">
                <button
                    class="bg-orange-500 text-white p-2 rounded"
                    on:click=move |_| dashboard.update(|d| d.feed_mut().see_all())
                >
                    "SEE ALL EVENTS"
                </button>
            </div>
        </div>
    }
}

/// Whether the viewport is within the threshold of the page bottom
fn near_bottom() -> bool {
    let Some(window) = web_sys::window() else {
        return false;
    };
    let viewport = window.inner_height().ok().and_then(|h| h.as_f64()).unwrap_or(0.0);
    let scrolled = window.scroll_y().unwrap_or(0.0);
    let page = window
        .document()
        .and_then(|d| d.body())
        .map(|b| b.offset_height() as f64)
        .unwrap_or(0.0);

    viewport + scrolled >= page - SCROLL_THRESHOLD_PX
}

#[component]
fn CategoryTab(
    dashboard: RwSignal<DashboardModel>,
    #[prop(into)]
    current: Signal<CategoryFilter>,
    target: CategoryFilter,
) -> impl IntoView {
    view! {
        <button
            on:click=move |_| dashboard.update(|d| d.set_category(target))
            class=move || {
                if current.get() == target {
                    "font-bold text-indigo-600 underline"
                } else {
                    "font-bold text-gray-500"
                }
            }
        >
            {target.to_string().to_uppercase()}
        </button>
    }
}

#[component]
fn ViewToggle(
    label: &'static str,
    mode: ViewMode,
    current: ReadSignal<ViewMode>,
    set: WriteSignal<ViewMode>,
) -> impl IntoView {
    view! {
        <button
            on:click=move |_| set.set(mode)
            class=move || {
                let base = "px-3 py-1 rounded text-sm";
                if current.get() == mode {
                    format!("{} bg-indigo-600 text-white", base)
                } else {
                    format!("{} bg-gray-200 text-gray-600", base)
                }
            }
        >
            {label}
        </button>
    }
}

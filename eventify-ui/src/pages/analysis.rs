//! Analysis Page
//!
//! Month, type and search filters over all events, with summary cards, a
//! monthly histogram, a paged table and CSV export of the filtered rows.

use eventify_core::analysis::{DEFAULT_PER_PAGE, EXPORT_FILENAME};
use eventify_core::notice::messages::LOAD_FAILED;
use eventify_core::{
    month_options, years_in, AnalysisQuery, AnalysisReport, Event, EventStatus, EventType,
    MonthFilter,
};
use leptos::*;
use web_sys::{Blob, BlobPropertyBag, Url};

use crate::api;
use crate::components::histogram::trigger_download;
use crate::components::{Header, Histogram, Loading};
use crate::pages::failure_notice;
use crate::state::global::use_global_state;

#[component]
pub fn Analysis() -> impl IntoView {
    let state = use_global_state();
    let (events, set_events) = create_signal(Vec::<Event>::new());
    let (loaded, set_loaded) = create_signal(false);
    let query = create_rw_signal(AnalysisQuery::default());
    let (page, set_page) = create_signal(1usize);

    spawn_local(async move {
        match api::fetch_events().await {
            Ok(fetched) => set_events.set(fetched),
            Err(e) => state.notify(&failure_notice(&e, LOAD_FAILED)),
        }
        set_loaded.set(true);
    });

    let today = move || chrono::Local::now().date_naive();
    let report = create_memo(move |_| {
        events.with(|all| query.with(|q| AnalysisReport::build(all, q, today())))
    });

    // Any filter change starts again from the first page
    let set_query = move |f: &dyn Fn(&mut AnalysisQuery)| {
        query.update(|q| f(q));
        set_page.set(1);
    };

    let months = move || events.with(|all| month_options(&years_in(all)));
    let page_count = move || report.with(|r| r.page_count(DEFAULT_PER_PAGE));

    let export = move |_| {
        let csv = match report.with_untracked(|r| r.to_csv(today())) {
            Ok(csv) => csv,
            Err(e) => {
                state.show_error(&e.to_string());
                return;
            }
        };
        if let Err(e) = download_csv(&csv) {
            web_sys::console::error_1(&e);
        }
    };

    view! {
        <Header title="Event Analysis" />
        <div class="max-w-6xl mx-auto p-6 space-y-6">
            <Show when=move || loaded.get() fallback=|| view! { <Loading /> }>
                <div class="grid grid-cols-1 md:grid-cols-3 gap-4">
                    <SummaryCard label="Upcoming Events" value=Signal::derive(move || report.with(|r| r.summary.upcoming)) />
                    <SummaryCard label="Completed Events" value=Signal::derive(move || report.with(|r| r.summary.completed)) />
                    <SummaryCard label="Total Events" value=Signal::derive(move || report.with(|r| r.summary.total)) />
                </div>

                <div class="flex flex-wrap gap-4 items-center">
                    <select
                        class="p-2 border rounded"
                        on:change=move |ev| {
                            if let Ok(month) = event_target_value(&ev).parse::<MonthFilter>() {
                                set_query(&|q: &mut AnalysisQuery| q.month = month);
                            }
                        }
                    >
                        <option value="all">"All"</option>
                        {move || {
                            months()
                                .into_iter()
                                .map(|ym| view! { <option value=ym.to_string()>{ym.label()}</option> })
                                .collect_view()
                        }}
                    </select>

                    <input
                        type="text"
                        placeholder="Search By Event or Description"
                        class="p-2 border rounded flex-1"
                        prop:value=move || query.with(|q| q.search.clone())
                        on:input=move |ev| {
                            let search = event_target_value(&ev);
                            set_query(&|q: &mut AnalysisQuery| q.search = search.clone());
                        }
                    />

                    <select
                        class="p-2 border rounded"
                        on:change=move |ev| {
                            let event_type = event_target_value(&ev).parse::<EventType>().ok();
                            set_query(&|q: &mut AnalysisQuery| q.event_type = event_type);
                        }
                    >
                        <option value="all">"All Types"</option>
                        {EventType::all()
                            .iter()
                            .map(|t| view! { <option value=t.as_str()>{t.label()}</option> })
                            .collect_view()}
                    </select>

                    <button
                        on:click=export
                        class="px-4 py-2 rounded text-white bg-green-600 hover:bg-green-700"
                    >
                        "Export CSV"
                    </button>
                </div>

                <Histogram histogram=Signal::derive(move || report.with(|r| r.histogram)) />

                <div class="bg-white rounded-xl shadow overflow-x-auto">
                    <table class="min-w-full text-sm">
                        <thead class="bg-gray-100">
                            <tr>
                                {["ID", "Event", "Description", "Date", "Location", "Organiser", "Type", "Status"]
                                    .into_iter()
                                    .map(|h| view! { <th class="px-4 py-2 text-left">{h}</th> })
                                    .collect_view()}
                            </tr>
                        </thead>
                        <tbody>
                            {move || {
                                let today = today();
                                report.with(|r| {
                                    r.page(page.get(), DEFAULT_PER_PAGE)
                                        .iter()
                                        .map(|event| event_row(event, event.status(today)))
                                        .collect_view()
                                })
                            }}
                        </tbody>
                    </table>
                </div>

                <div class="flex items-center justify-center gap-4">
                    <button
                        class="px-3 py-1 border rounded disabled:opacity-50"
                        disabled=move || page.get() <= 1
                        on:click=move |_| set_page.update(|p| *p = p.saturating_sub(1).max(1))
                    >
                        "Previous"
                    </button>
                    <span>{move || format!("Page {} of {}", page.get(), page_count().max(1))}</span>
                    <button
                        class="px-3 py-1 border rounded disabled:opacity-50"
                        disabled=move || page.get() >= page_count()
                        on:click=move |_| set_page.update(|p| *p += 1)
                    >
                        "Next"
                    </button>
                </div>
            </Show>
        </div>
    }
}

#[component]
fn SummaryCard(label: &'static str, value: Signal<usize>) -> impl IntoView {
    view! {
        <div class="bg-white rounded-xl shadow p-6 text-center">
            <p class="text-gray-500">{label}</p>
            <p class="text-3xl font-bold text-indigo-700">{move || value.get()}</p>
        </div>
    }
}

fn event_row(event: &Event, status: EventStatus) -> impl IntoView {
    let status_class = match status {
        EventStatus::Upcoming => "text-green-600 font-semibold",
        EventStatus::Completed => "text-red-600 font-semibold",
    };
    view! {
        <tr class="border-t">
            <td class="px-4 py-2">{event.id.to_string()}</td>
            <td class="px-4 py-2">{event.title.clone()}</td>
            <td class="px-4 py-2">{event.description.clone()}</td>
            <td class="px-4 py-2">{event.date.clone()}</td>
            <td class="px-4 py-2">{event.location.clone()}</td>
            <td class="px-4 py-2">{event.organiser.clone()}</td>
            <td class="px-4 py-2">{event.event_type.label()}</td>
            <td class=format!("px-4 py-2 {}", status_class)>{status.to_string()}</td>
        </tr>
    }
}

/// Offer `csv` as a file download through a temporary object URL
fn download_csv(csv: &str) -> Result<(), wasm_bindgen::JsValue> {
    let parts = js_sys::Array::of1(&csv.into());
    let options = BlobPropertyBag::new();
    options.set_type("text/csv;charset=utf-8");
    let blob = Blob::new_with_str_sequence_and_options(&parts, &options)?;
    let url = Url::create_object_url_with_blob(&blob)?;
    trigger_download(&url, EXPORT_FILENAME);
    Url::revoke_object_url(&url)
}

//! Create Event Page
//!
//! Form for publishing a new event. Validation stops at the first failed
//! rule and shows it as a toast.

use eventify_core::forms::LOCATIONS;
use eventify_core::notice::messages::{CREATE_FAILED, EVENT_CREATED};
use eventify_core::{EventForm, EventType, Notice, StoreAction};
use leptos::*;

use crate::api;
use crate::components::Header;
use crate::pages::failure_notice;
use crate::state::global::use_global_state;

/// Free-text inputs of the form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TextField {
    Title,
    Date,
    StartTime,
    EndTime,
    Price,
    Description,
    Organiser,
    Email,
    PhoneNumber,
    Speaker,
    VideoUrl,
    Zip,
}

impl TextField {
    fn get(self, form: &EventForm) -> &str {
        match self {
            TextField::Title => &form.title,
            TextField::Date => &form.date,
            TextField::StartTime => &form.start_time,
            TextField::EndTime => &form.end_time,
            TextField::Price => &form.price,
            TextField::Description => &form.description,
            TextField::Organiser => &form.organiser,
            TextField::Email => &form.email,
            TextField::PhoneNumber => &form.phone_number,
            TextField::Speaker => &form.speaker,
            TextField::VideoUrl => &form.video_url,
            TextField::Zip => &form.zip,
        }
    }

    fn get_mut(self, form: &mut EventForm) -> &mut String {
        match self {
            TextField::Title => &mut form.title,
            TextField::Date => &mut form.date,
            TextField::StartTime => &mut form.start_time,
            TextField::EndTime => &mut form.end_time,
            TextField::Price => &mut form.price,
            TextField::Description => &mut form.description,
            TextField::Organiser => &mut form.organiser,
            TextField::Email => &mut form.email,
            TextField::PhoneNumber => &mut form.phone_number,
            TextField::Speaker => &mut form.speaker,
            TextField::VideoUrl => &mut form.video_url,
            TextField::Zip => &mut form.zip,
        }
    }
}

#[component]
pub fn CreateEvent() -> impl IntoView {
    let state = use_global_state();
    let form = create_rw_signal(EventForm::default());
    let (submitting, set_submitting) = create_signal(false);

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();

        let new_event = match form.with_untracked(EventForm::submit) {
            Ok(new_event) => new_event,
            Err(e) => {
                state.notify(&Notice::from(e));
                return;
            }
        };

        set_submitting.set(true);
        spawn_local(async move {
            match api::create_event(&new_event).await {
                Ok(echoed) => {
                    let id = match echoed.map(|e| e.id) {
                        Some(id) if !state.store.with_untracked(|s| s.contains(id)) => id,
                        _ => state
                            .store
                            .with_untracked(|s| s.generate_id(&mut rand::thread_rng())),
                    };
                    state.dispatch(StoreAction::AddEvent(new_event.into_event(id)));
                    state.notify(&Notice::success(EVENT_CREATED));
                    form.set(EventForm::default());
                }
                Err(e) => state.notify(&failure_notice(&e, CREATE_FAILED)),
            }
            set_submitting.set(false);
        });
    };

    view! {
        <Header title="Create Event" />
        <div class="max-w-2xl mx-auto p-6 bg-white rounded-lg shadow mt-6">
            <h2 class="text-2xl mb-4 text-center text-cyan-800">"Create Event"</h2>
            <form on:submit=on_submit>
                <Input form=form field=TextField::Title label="Event Name" />
                <Input form=form field=TextField::Date label="Event Date" input_type="date" />
                <div class="flex space-x-4">
                    <div class="flex-1">
                        <Input form=form field=TextField::StartTime label="Start Time" input_type="time" />
                    </div>
                    <div class="flex-1">
                        <Input form=form field=TextField::EndTime label="End Time" input_type="time" />
                    </div>
                </div>

                <label class="block mb-2">"Location"</label>
                <select
                    class="block w-full p-2 mb-4 border"
                    prop:value=move || form.with(|f| f.location.clone())
                    on:change=move |ev| {
                        let location = event_target_value(&ev);
                        form.update(|f| f.location = location);
                    }
                >
                    {LOCATIONS
                        .iter()
                        .map(|loc| view! { <option value=*loc>{*loc}</option> })
                        .collect_view()}
                </select>

                <Input form=form field=TextField::Price label="Price" />
                <Input form=form field=TextField::Description label="Description" />

                <label class="block mb-2">"Event Type"</label>
                <select
                    class="block w-full p-2 mb-4 border"
                    prop:value=move || form.with(|f| f.event_type.as_str())
                    on:change=move |ev| {
                        if let Ok(event_type) = event_target_value(&ev).parse::<EventType>() {
                            form.update(|f| f.event_type = event_type);
                        }
                    }
                >
                    {EventType::all()
                        .iter()
                        .map(|t| view! { <option value=t.as_str()>{t.label()}</option> })
                        .collect_view()}
                </select>

                <Input form=form field=TextField::Organiser label="Organiser" />
                <Input form=form field=TextField::Email label="Email" input_type="email" />
                <Input form=form field=TextField::PhoneNumber label="Phone Number" />
                <Input form=form field=TextField::Speaker label="Speaker" />
                <Input form=form field=TextField::VideoUrl label="Video URL" />
                <Input form=form field=TextField::Zip label="Zip Code" />

                <button
                    type="submit"
                    disabled=move || submitting.get()
                    class="bg-indigo-600 text-white p-2 mt-4 w-full disabled:bg-gray-500"
                >
                    "Create Event"
                </button>
            </form>
        </div>
    }
}

#[component]
fn Input(
    form: RwSignal<EventForm>,
    field: TextField,
    label: &'static str,
    #[prop(default = "text")]
    input_type: &'static str,
) -> impl IntoView {
    view! {
        <label class="block mb-2">{label}</label>
        <input
            type=input_type
            placeholder=label
            prop:value=move || form.with(|f| field.get(f).to_string())
            on:input=move |ev| {
                let text = event_target_value(&ev);
                form.update(|f| *field.get_mut(f) = text);
            }
            class="block w-full p-2 mb-4 border"
        />
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_fields_write_through() {
        let mut form = EventForm::default();
        *TextField::Zip.get_mut(&mut form) = "560001".to_string();
        *TextField::StartTime.get_mut(&mut form) = "10:00".to_string();

        assert_eq!(form.zip, "560001");
        assert_eq!(TextField::StartTime.get(&form), "10:00");
    }
}

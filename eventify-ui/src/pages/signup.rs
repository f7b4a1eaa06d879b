//! Signup Page
//!
//! Two steps: account details, then profile details. Each step is
//! validated before moving on, with the message shown under the field.

use eventify_core::notice::messages::{SIGNUP_REJECTED, SIGNUP_SUCCEEDED};
use eventify_core::{Notice, SignupField, SignupFlow, SignupForm, SignupStep};
use leptos::*;
use leptos_router::*;

use crate::api;
use crate::pages::failure_notice;
use crate::state::global::use_global_state;

#[component]
pub fn Signup() -> impl IntoView {
    let state = use_global_state();
    let navigate = use_navigate();
    let flow = create_rw_signal(SignupFlow::new());

    let on_next = move |_| {
        flow.update(|f| {
            f.next();
        });
    };

    let on_back = move |_| flow.update(SignupFlow::back);

    let on_submit = move |_| {
        let today = chrono::Local::now().date_naive();
        let mut submitted: Option<SignupForm> = None;
        flow.update(|f| submitted = f.submit(today).cloned());

        let Some(form) = submitted else {
            return;
        };

        let navigate = navigate.clone();
        spawn_local(async move {
            match api::signup(&form).await {
                Ok(()) => {
                    state.notify(&Notice::success(SIGNUP_SUCCEEDED));
                    navigate("/login", Default::default());
                }
                Err(e) => state.notify(&failure_notice(&e, SIGNUP_REJECTED)),
            }
        });
    };

    let step = move || flow.with(SignupFlow::step);

    view! {
        <div class="max-w-md mx-auto mt-24 p-6 bg-white rounded-lg shadow">
            <h2 class="text-2xl mb-4 text-center">"Sign Up"</h2>
            <Show
                when=move || step() == SignupStep::Account
                fallback=move || view! {
                    <Field flow=flow field=SignupField::Address placeholder="Address" />
                    <Field flow=flow field=SignupField::Phone placeholder="Phone Number" />
                    <Field flow=flow field=SignupField::BirthDate placeholder="Birthdate" input_type="date" />
                    <Field flow=flow field=SignupField::Pan placeholder="PAN Number" />
                    <div class="flex space-x-2 mt-4">
                        <button on:click=on_back class="border border-black p-2 w-1/3">"Back"</button>
                        <button on:click=on_submit.clone() class="bg-black text-white p-2 w-2/3">"Sign Up"</button>
                    </div>
                }
            >
                <div class="flex space-x-2">
                    <Field flow=flow field=SignupField::FirstName placeholder="First Name" />
                    <Field flow=flow field=SignupField::LastName placeholder="Last Name" />
                </div>
                <Field flow=flow field=SignupField::Email placeholder="Email Id" input_type="email" />
                <Field flow=flow field=SignupField::Password placeholder="Password" input_type="password" />
                <button on:click=on_next class="bg-black text-white p-2 mt-4 w-full">"Next Step"</button>
            </Show>
            <p class="text-center mt-4">
                "Already have an account? "
                <A href="/login" class="text-blue-500">"Log in"</A>
            </p>
        </div>
    }
}

/// The form value behind a field
fn field_value(form: &SignupForm, field: SignupField) -> &str {
    match field {
        SignupField::FirstName => &form.first_name,
        SignupField::LastName => &form.last_name,
        SignupField::Email => &form.email,
        SignupField::Password => &form.password,
        SignupField::Address => &form.address,
        SignupField::Phone => &form.phone,
        SignupField::BirthDate => &form.birth_date,
        SignupField::Pan => &form.pan,
    }
}

fn field_value_mut(form: &mut SignupForm, field: SignupField) -> &mut String {
    match field {
        SignupField::FirstName => &mut form.first_name,
        SignupField::LastName => &mut form.last_name,
        SignupField::Email => &mut form.email,
        SignupField::Password => &mut form.password,
        SignupField::Address => &mut form.address,
        SignupField::Phone => &mut form.phone,
        SignupField::BirthDate => &mut form.birth_date,
        SignupField::Pan => &mut form.pan,
    }
}

/// Input bound to one signup field, with its error underneath
#[component]
fn Field(
    flow: RwSignal<SignupFlow>,
    field: SignupField,
    placeholder: &'static str,
    #[prop(default = "text")]
    input_type: &'static str,
) -> impl IntoView {
    let value = move || flow.with(|f| field_value(f.form(), field).to_string());
    let error = move || flow.with(|f| f.error(field));

    view! {
        <div class="w-full mb-2">
            <input
                type=input_type
                placeholder=placeholder
                prop:value=value
                on:input=move |ev| {
                    let text = event_target_value(&ev);
                    flow.update(|f| *field_value_mut(f.form_mut(), field) = text);
                }
                class="block w-full p-2 border"
            />
            {move || error().map(|msg| view! { <p class="text-red-500 text-sm">{msg}</p> })}
        </div>
    }
}

//! User Flows
//!
//! The operations behind each page: loading events, registering, creating
//! an event, logging in and signing up. Every failure is logged and folded
//! into a [`Notice`]; nothing is retried.

use eventify_core::{
    Credentials, Event, EventForm, EventId, EventStore, Notice, SignupForm, StoreAction,
};
use rand::Rng;

use crate::client::{AuthApi, ClientError, EventsApi};
use crate::session::{Session, SessionStore};

pub use eventify_core::event::{DETAIL_IMAGE_SIZE, LIST_IMAGE_SIZE};
pub use eventify_core::notice::messages::*;

/// An event with everything its details page shows
#[derive(Debug, Clone, PartialEq)]
pub struct EventDetails {
    pub event: Event,
    /// Every other event
    pub related: Vec<Event>,
}

/// Pick the notice for a failed call: rejections get `rejected`, transport
/// and decoding problems the generic message
fn failure_notice(err: &ClientError, rejected: &str) -> Notice {
    if err.is_rejection() {
        Notice::error(rejected)
    } else {
        Notice::error(UNEXPECTED_ERROR)
    }
}

/// Fetch all events for the dashboard
///
/// Seeds the store when it is still empty and returns the events with
/// their card images attached.
pub async fn load_events(api: &dyn EventsApi, store: &mut EventStore) -> Result<Vec<Event>, Notice> {
    let events = api.list_events().await.map_err(|e| {
        tracing::error!(error = %e, "Failed to fetch events");
        Notice::error(LOAD_FAILED)
    })?;

    let (width, height) = LIST_IMAGE_SIZE;
    let events: Vec<Event> = events
        .into_iter()
        .map(|e| e.with_image(width, height))
        .collect();

    if store.is_empty() {
        store.dispatch(StoreAction::SetEvents(events.clone()));
    }

    tracing::info!(count = events.len(), "Events loaded");
    Ok(events)
}

/// Fetch one event and the events shown next to it
///
/// Related events are best effort: if they fail to load the page still
/// shows the event itself.
pub async fn load_event_details(api: &dyn EventsApi, id: EventId) -> Result<EventDetails, Notice> {
    let (width, height) = DETAIL_IMAGE_SIZE;
    let event = api
        .get_event(id)
        .await
        .map_err(|e| {
            tracing::error!(event_id = %id, error = %e, "Failed to fetch event");
            Notice::error(EVENT_LOAD_FAILED)
        })?
        .with_image(width, height);

    let related = match api.list_events().await {
        Ok(events) => events.into_iter().filter(|e| e.id != id).collect(),
        Err(e) => {
            tracing::warn!(event_id = %id, error = %e, "Failed to fetch related events");
            Vec::new()
        }
    };

    Ok(EventDetails { event, related })
}

/// Register the user for `event`
///
/// Only flips the flag when it is not already set. On success both `event`
/// and its copy in the store are updated.
pub async fn register_for_event(
    api: &dyn EventsApi,
    store: &mut EventStore,
    event: &mut Event,
) -> Notice {
    if event.is_registered {
        return Notice::error(ALREADY_REGISTERED);
    }

    let updated = Event {
        is_registered: true,
        ..event.clone()
    };

    match api.update_event(&updated).await {
        Ok(()) => {
            event.is_registered = true;
            store.dispatch(StoreAction::MarkRegistered(event.id));
            tracing::info!(event_id = %event.id, "Registered for event");
            Notice::success(REGISTERED)
        }
        Err(e) => {
            tracing::error!(event_id = %event.id, error = %e, "Registration failed");
            Notice::error(REGISTER_FAILED)
        }
    }
}

/// Validate the form, create the event and add it to the store
///
/// The stored copy keeps the id the backend echoed back, unless it is
/// missing or already taken, in which case a fresh id is drawn.
pub async fn create_event<R: Rng + ?Sized>(
    api: &dyn EventsApi,
    store: &mut EventStore,
    form: &EventForm,
    rng: &mut R,
) -> Notice {
    let new_event = match form.submit() {
        Ok(new_event) => new_event,
        Err(e) => {
            tracing::debug!(error = %e, "Event form rejected");
            return e.into();
        }
    };

    let echoed = match api.create_event(&new_event).await {
        Ok(echoed) => echoed,
        Err(e) => {
            tracing::error!(error = %e, "Failed to create event");
            return failure_notice(&e, CREATE_FAILED);
        }
    };

    let id = match echoed.map(|e| e.id) {
        Some(id) if !store.contains(id) => id,
        _ => store.generate_id(rng),
    };

    tracing::info!(event_id = %id, title = %new_event.title, "Event created");
    store.dispatch(StoreAction::AddEvent(new_event.into_event(id)));
    Notice::success(EVENT_CREATED)
}

/// Log in and remember the user
pub async fn login(auth: &dyn AuthApi, sessions: &SessionStore, credentials: &Credentials) -> Notice {
    if let Err(e) = credentials.validate() {
        return e.into();
    }

    let user = match auth.login(credentials).await {
        Ok(user) => user,
        Err(e) => {
            tracing::warn!(username = %credentials.username, error = %e, "Login failed");
            return failure_notice(&e, LOGIN_REJECTED);
        }
    };

    match sessions.save(&Session::new(credentials.username.clone(), user)) {
        Ok(()) => {
            tracing::info!(username = %credentials.username, "Logged in");
            Notice::success(LOGIN_SUCCEEDED)
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to save session");
            Notice::error(UNEXPECTED_ERROR)
        }
    }
}

/// Register a new user
///
/// The form is expected to have passed both signup steps.
pub async fn signup(auth: &dyn AuthApi, form: &SignupForm) -> Notice {
    match auth.signup(form).await {
        Ok(()) => {
            tracing::info!(email = %form.email, "Signed up");
            Notice::success(SIGNUP_SUCCEEDED)
        }
        Err(e) => {
            tracing::warn!(email = %form.email, error = %e, "Signup failed");
            failure_notice(&e, SIGNUP_REJECTED)
        }
    }
}

/// Forget the logged-in user
pub fn logout(sessions: &SessionStore) -> Notice {
    match sessions.clear() {
        Ok(()) => Notice::info(LOGGED_OUT),
        Err(e) => {
            tracing::error!(error = %e, "Failed to clear session");
            Notice::error(UNEXPECTED_ERROR)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ClientResult;
    use async_trait::async_trait;
    use eventify_core::{EventType, NewEvent, NoticeLevel};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use serde_json::json;
    use std::sync::Mutex;

    #[derive(Clone, Copy, PartialEq)]
    enum Failure {
        None,
        Reject,
        Transport,
    }

    impl Failure {
        fn check(&self) -> ClientResult<()> {
            match self {
                Failure::None => Ok(()),
                Failure::Reject => Err(ClientError::Api {
                    status: 500,
                    message: "boom".to_string(),
                }),
                Failure::Transport => Err(ClientError::Unavailable),
            }
        }
    }

    struct FakeEvents {
        events: Vec<Event>,
        failure: Failure,
        echo_id: Option<u64>,
        updates: Mutex<Vec<Event>>,
        created: Mutex<Vec<NewEvent>>,
    }

    impl FakeEvents {
        fn new(events: Vec<Event>) -> Self {
            Self {
                events,
                failure: Failure::None,
                echo_id: None,
                updates: Mutex::new(Vec::new()),
                created: Mutex::new(Vec::new()),
            }
        }

        fn failing(failure: Failure) -> Self {
            Self {
                failure,
                ..Self::new(Vec::new())
            }
        }
    }

    #[async_trait]
    impl EventsApi for FakeEvents {
        async fn list_events(&self) -> ClientResult<Vec<Event>> {
            self.failure.check()?;
            Ok(self.events.clone())
        }

        async fn get_event(&self, id: EventId) -> ClientResult<Event> {
            self.failure.check()?;
            self.events
                .iter()
                .find(|e| e.id == id)
                .cloned()
                .ok_or(ClientError::Api {
                    status: 404,
                    message: "Not Found".to_string(),
                })
        }

        async fn create_event(&self, event: &NewEvent) -> ClientResult<Option<Event>> {
            self.failure.check()?;
            self.created.lock().unwrap().push(event.clone());
            Ok(self.echo_id.map(|id| event.clone().into_event(EventId(id))))
        }

        async fn update_event(&self, event: &Event) -> ClientResult<()> {
            self.failure.check()?;
            self.updates.lock().unwrap().push(event.clone());
            Ok(())
        }
    }

    struct FakeAuth {
        failure: Failure,
    }

    #[async_trait]
    impl AuthApi for FakeAuth {
        async fn login(&self, _credentials: &Credentials) -> ClientResult<serde_json::Value> {
            self.failure.check()?;
            Ok(json!({"token": "abc"}))
        }

        async fn signup(&self, _form: &SignupForm) -> ClientResult<()> {
            self.failure.check()
        }
    }

    fn event(id: u64) -> Event {
        serde_json::from_value(json!({
            "id": id,
            "title": format!("Event {}", id),
            "date": "2024-07-01",
            "time": "10:00 AM - 12:00 PM",
            "location": "New York",
            "price": "$20",
            "description": "Fun",
            "eventType": "festival"
        }))
        .unwrap()
    }

    fn valid_form() -> EventForm {
        EventForm {
            title: "RustFest".to_string(),
            date: "2024-09-12".to_string(),
            start_time: "09:00".to_string(),
            end_time: "17:30".to_string(),
            price: "$50".to_string(),
            description: "A day of Rust talks".to_string(),
            event_type: EventType::Conference,
            organiser: "Rust India".to_string(),
            email: "team@rust.in".to_string(),
            phone_number: "9876543210".to_string(),
            speaker: "Ferris".to_string(),
            video_url: "https://video.example.com/rustfest".to_string(),
            zip: "560001".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_load_events_seeds_empty_store() {
        let api = FakeEvents::new(vec![event(1), event(2)]);
        let mut store = EventStore::new();

        let events = load_events(&api, &mut store).await.unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(
            events[0].image.as_deref(),
            Some("https://picsum.photos/300/200?random=1")
        );
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn test_load_events_keeps_existing_store() {
        let api = FakeEvents::new(vec![event(1), event(2)]);
        let mut store = EventStore::from_events(vec![event(7)]);

        load_events(&api, &mut store).await.unwrap();
        assert_eq!(store.len(), 1);
        assert!(store.contains(EventId(7)));
    }

    #[tokio::test]
    async fn test_load_events_failure() {
        let api = FakeEvents::failing(Failure::Transport);
        let mut store = EventStore::new();

        let notice = load_events(&api, &mut store).await.unwrap_err();
        assert_eq!(notice, Notice::error("Failed to load events."));
    }

    #[tokio::test]
    async fn test_event_details_excludes_itself() {
        let api = FakeEvents::new(vec![event(1), event(2), event(3)]);

        let details = load_event_details(&api, EventId(2)).await.unwrap();
        assert_eq!(details.event.id, EventId(2));
        assert_eq!(
            details.event.image.as_deref(),
            Some("https://picsum.photos/800/400?random=2")
        );
        let related: Vec<u64> = details.related.iter().map(|e| e.id.0).collect();
        assert_eq!(related, vec![1, 3]);

        assert!(load_event_details(&api, EventId(9)).await.is_err());
    }

    #[tokio::test]
    async fn test_register_flips_flag_once() {
        let api = FakeEvents::new(Vec::new());
        let mut store = EventStore::from_events(vec![event(1)]);
        let mut target = event(1);

        let notice = register_for_event(&api, &mut store, &mut target).await;
        assert_eq!(notice, Notice::success("Successfully registered for the event!"));
        assert!(target.is_registered);
        assert!(store.get(EventId(1)).unwrap().is_registered);
        assert!(api.updates.lock().unwrap()[0].is_registered);

        let before = store.clone();
        let notice = register_for_event(&api, &mut store, &mut target).await;
        assert_eq!(notice, Notice::error("You have already registered for this event."));
        assert_eq!(store, before);
        assert_eq!(api.updates.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_register_failure_leaves_state() {
        for failure in [Failure::Reject, Failure::Transport] {
            let api = FakeEvents::failing(failure);
            let mut store = EventStore::from_events(vec![event(1)]);
            let mut target = event(1);

            let notice = register_for_event(&api, &mut store, &mut target).await;
            assert_eq!(notice, Notice::error("Error registering for the event."));
            assert!(!target.is_registered);
            assert!(!store.get(EventId(1)).unwrap().is_registered);
        }
    }

    #[tokio::test]
    async fn test_create_event_uses_echoed_id() {
        let mut api = FakeEvents::new(Vec::new());
        api.echo_id = Some(55);
        let mut store = EventStore::from_events(vec![event(1)]);
        let mut rng = StdRng::seed_from_u64(3);

        let notice = create_event(&api, &mut store, &valid_form(), &mut rng).await;
        assert_eq!(notice, Notice::success("Event created successfully!"));
        assert_eq!(store.len(), 2);
        let created = store.get(EventId(55)).unwrap();
        assert_eq!(created.time, "09:00 - 17:30");
    }

    #[tokio::test]
    async fn test_create_event_avoids_collisions() {
        let mut api = FakeEvents::new(Vec::new());
        api.echo_id = Some(1);
        let mut store = EventStore::from_events(vec![event(1)]);
        let mut rng = StdRng::seed_from_u64(3);

        create_event(&api, &mut store, &valid_form(), &mut rng).await;
        assert_eq!(store.len(), 2);
        assert_ne!(store.events()[1].id, EventId(1));
    }

    #[tokio::test]
    async fn test_create_event_rejects_invalid_form() {
        let api = FakeEvents::new(Vec::new());
        let mut store = EventStore::new();
        let mut rng = StdRng::seed_from_u64(3);
        let form = EventForm {
            zip: "12".to_string(),
            ..valid_form()
        };

        let notice = create_event(&api, &mut store, &form, &mut rng).await;
        assert_eq!(notice, Notice::error("Zip code should be exactly 6 digits."));
        assert!(store.is_empty());
        assert!(api.created.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_event_failures() {
        let mut rng = StdRng::seed_from_u64(3);
        let cases = [
            (Failure::Reject, "Failed to create event. Please try again."),
            (Failure::Transport, "An error occurred. Please try again."),
        ];

        for (failure, expected) in cases {
            let api = FakeEvents::failing(failure);
            let mut store = EventStore::new();
            let notice = create_event(&api, &mut store, &valid_form(), &mut rng).await;
            assert_eq!(notice, Notice::error(expected));
            assert!(store.is_empty());
        }
    }

    #[tokio::test]
    async fn test_login_saves_session() {
        let dir = tempfile::tempdir().unwrap();
        let sessions = SessionStore::new(dir.path().join("session.json"));
        let auth = FakeAuth {
            failure: Failure::None,
        };

        let notice = login(&auth, &sessions, &Credentials::new("mor_2314", "83r5^_")).await;
        assert_eq!(notice, Notice::success("Login successful!"));

        let session = sessions.require().unwrap();
        assert_eq!(session.username, "mor_2314");
        assert_eq!(session.user["token"], "abc");

        assert_eq!(logout(&sessions).level, NoticeLevel::Info);
        assert!(sessions.require().is_err());
    }

    #[tokio::test]
    async fn test_login_failures() {
        let dir = tempfile::tempdir().unwrap();
        let sessions = SessionStore::new(dir.path().join("session.json"));
        let credentials = Credentials::new("user", "pw");

        let rejected = login(&FakeAuth { failure: Failure::Reject }, &sessions, &credentials).await;
        assert_eq!(rejected, Notice::error("Invalid credentials. Please try again."));

        let broken = login(&FakeAuth { failure: Failure::Transport }, &sessions, &credentials).await;
        assert_eq!(broken, Notice::error("An error occurred. Please try again."));

        assert!(sessions.load().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_signup_messages() {
        let form = SignupForm::default();
        let cases = [
            (Failure::None, Notice::success("Welcome! You have signed up successfully.")),
            (Failure::Reject, Notice::error("Signup failed. Please try again.")),
            (Failure::Transport, Notice::error("An error occurred. Please try again.")),
        ];

        for (failure, expected) in cases {
            assert_eq!(signup(&FakeAuth { failure }, &form).await, expected);
        }
    }
}

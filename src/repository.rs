//! Event Repository
//!
//! In-memory event list backing the development server, persisted as a
//! `{"events": [...]}` JSON document after every write.

use eventify_core::{Event, EventId, NewEvent};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::sync::RwLock;

/// Repository errors
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("Database file error {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Corrupt database file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Result type alias for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// On-disk layout
#[derive(Debug, Default, Serialize, Deserialize)]
struct Database {
    #[serde(default)]
    events: Vec<Event>,
}

/// Event storage for the development server
#[derive(Debug)]
pub struct EventRepository {
    events: RwLock<Vec<Event>>,
    path: Option<PathBuf>,
}

impl EventRepository {
    /// Open a file-backed repository, starting empty if the file is missing
    pub async fn open(path: impl Into<PathBuf>) -> RepositoryResult<Self> {
        let path = path.into();

        let events = match tokio::fs::read_to_string(&path).await {
            Ok(content) => {
                let db: Database =
                    serde_json::from_str(&content).map_err(|e| RepositoryError::Parse {
                        path: path.clone(),
                        error: e.to_string(),
                    })?;
                db.events
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = ?path, "Database file not found, starting empty");
                Vec::new()
            }
            Err(e) => {
                return Err(RepositoryError::Io {
                    path,
                    error: e.to_string(),
                })
            }
        };

        tracing::info!(path = ?path, count = events.len(), "Opened event database");

        Ok(Self {
            events: RwLock::new(events),
            path: Some(path),
        })
    }

    /// Repository that never touches disk
    pub fn in_memory(events: Vec<Event>) -> Self {
        Self {
            events: RwLock::new(events),
            path: None,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub async fn list(&self) -> Vec<Event> {
        self.events.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.events.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.events.read().await.is_empty()
    }

    pub async fn get(&self, id: EventId) -> Option<Event> {
        self.events.read().await.iter().find(|e| e.id == id).cloned()
    }

    /// Store a new event under the next free id
    ///
    /// Nothing changes in memory unless the write to disk succeeds.
    pub async fn create(&self, new_event: NewEvent) -> RepositoryResult<Event> {
        let mut events = self.events.write().await;

        let next_id = events.iter().map(|e| e.id.0).max().unwrap_or(0) + 1;
        let event = new_event.into_event(EventId(next_id));

        let mut next = events.clone();
        next.push(event.clone());
        self.persist(&next).await?;

        *events = next;
        Ok(event)
    }

    /// Replace the event stored under `id`
    ///
    /// The stored copy always keeps `id`, whatever the payload says.
    /// Returns `None` when no such event exists.
    pub async fn update(&self, id: EventId, mut event: Event) -> RepositoryResult<Option<Event>> {
        let mut events = self.events.write().await;

        let Some(index) = events.iter().position(|e| e.id == id) else {
            return Ok(None);
        };
        event.id = id;

        let mut next = events.clone();
        next[index] = event.clone();
        self.persist(&next).await?;

        *events = next;
        Ok(Some(event))
    }

    async fn persist(&self, events: &[Event]) -> RepositoryResult<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let io_error = |e: std::io::Error| RepositoryError::Io {
            path: path.clone(),
            error: e.to_string(),
        };

        #[derive(Serialize)]
        struct DatabaseRef<'a> {
            events: &'a [Event],
        }

        let json = serde_json::to_string_pretty(&DatabaseRef { events }).map_err(|e| {
            RepositoryError::Parse {
                path: path.clone(),
                error: e.to_string(),
            }
        })?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(io_error)?;
        }

        // Write-then-rename so a crash never leaves a half-written file
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json).await.map_err(io_error)?;
        tokio::fs::rename(&tmp, path).await.map_err(io_error)?;

        tracing::debug!(path = ?path, count = events.len(), "Database persisted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eventify_core::EventType;
    use tempfile::tempdir;

    fn new_event(title: &str) -> NewEvent {
        NewEvent {
            title: title.to_string(),
            date: "2024-09-01".to_string(),
            time: "18:00 - 20:00".to_string(),
            location: "India".to_string(),
            price: "Free".to_string(),
            description: "Monthly meetup".to_string(),
            event_type: EventType::Conference,
            organiser: "Rust India".to_string(),
            email: "hi@example.com".to_string(),
            phone_number: "9876543210".to_string(),
            speaker: "Ferris".to_string(),
            video_url: "https://example.com/v".to_string(),
            zip: "560001".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_increasing_ids() {
        let repo = EventRepository::in_memory(Vec::new());

        let first = repo.create(new_event("First")).await.unwrap();
        let second = repo.create(new_event("Second")).await.unwrap();

        assert_eq!(first.id, EventId(1));
        assert_eq!(second.id, EventId(2));
        assert_eq!(repo.len().await, 2);
    }

    #[tokio::test]
    async fn test_update_keeps_path_id() {
        let repo = EventRepository::in_memory(Vec::new());
        let created = repo.create(new_event("Meetup")).await.unwrap();

        let mut changed = created.clone();
        changed.id = EventId(999);
        changed.is_registered = true;

        let updated = repo.update(created.id, changed).await.unwrap().unwrap();
        assert_eq!(updated.id, created.id);
        assert!(repo.get(created.id).await.unwrap().is_registered);
        assert!(repo.get(EventId(999)).await.is_none());

        assert!(repo
            .update(EventId(42), created)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_persists_and_reopens() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("db.json");

        {
            let repo = EventRepository::open(&path).await.unwrap();
            assert!(repo.is_empty().await);
            repo.create(new_event("Kept")).await.unwrap();
        }

        let content = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value["events"][0]["title"], "Kept");

        let reopened = EventRepository::open(&path).await.unwrap();
        assert_eq!(reopened.len().await, 1);
        assert_eq!(reopened.get(EventId(1)).await.unwrap().title, "Kept");
    }

    #[tokio::test]
    async fn test_failed_write_leaves_events_unchanged() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("db.json");
        let repo = EventRepository::open(&path).await.unwrap();
        let kept = repo.create(new_event("Kept")).await.unwrap();

        // A directory in the way of the temp file makes every write fail
        std::fs::create_dir(dir.path().join("db.json.tmp")).unwrap();

        assert!(matches!(
            repo.create(new_event("Lost")).await,
            Err(RepositoryError::Io { .. })
        ));
        assert_eq!(repo.len().await, 1);

        let mut changed = kept.clone();
        changed.is_registered = true;
        assert!(repo.update(kept.id, changed).await.is_err());
        assert!(!repo.get(kept.id).await.unwrap().is_registered);

        std::fs::remove_dir(dir.path().join("db.json.tmp")).unwrap();
        let retried = repo.create(new_event("Retried")).await.unwrap();
        assert_eq!(retried.id, EventId(2));
        assert_eq!(repo.len().await, 2);
    }

    #[tokio::test]
    async fn test_open_corrupt_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("db.json");
        std::fs::write(&path, "[1, 2").unwrap();

        assert!(matches!(
            EventRepository::open(&path).await,
            Err(RepositoryError::Parse { .. })
        ));
    }
}

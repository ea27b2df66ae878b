//! Keeps the in-memory list and durable storage in step.
//!
//! Storage is touched at exactly two points: once at startup, before any
//! key press reaches the app, and after each key press that changed the
//! list. Every save carries the whole list.

use super::state::App;
use crate::infrastructure::{KeyValueStore, ListRepository, PersistenceResult};

/// Loads the saved list into `app`.
///
/// A missing list leaves `app` empty. An unreadable one is returned as an
/// error and `app` is left untouched.
pub async fn restore<S: KeyValueStore>(
    app: &mut App,
    repository: &ListRepository<S>,
) -> PersistenceResult<()> {
    let items = repository.load_items().await?;
    app.hydrate(items);
    Ok(())
}

/// Saves the whole list if it changed since the last save.
///
/// Returns whether a save was attempted. Failures are logged and not
/// retried; the next change writes the full list again.
pub async fn save_if_dirty<S: KeyValueStore>(app: &mut App, repository: &ListRepository<S>) -> bool {
    if !app.take_dirty() {
        return false;
    }
    if let Err(error) = repository.save_items(app.list.items()).await {
        tracing::warn!(%error, "failed to save shopping list");
    }
    true
}

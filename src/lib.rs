/*!
# Stellium

Stellium shows a daily horoscope per zodiac sign and keeps a personal journal
with mood tags, persisted locally, with an optional scheduled daily reminder.
Horoscopes come from a remote API with bundled per-sign fallbacks, so the app
stays useful offline.

## Architecture

Everything flows through one state store:

- `storage`: async key-value persistence adapter (file-backed and in-memory)
- `journal`: journal entry model and CRUD repository over one storage key
- `horoscope`: remote horoscope client with bundled fallback content
- `notify`: notification preferences, permission, and reminder scheduling
- `store`: the single application state, its action/reducer, and the
  asynchronous operations that drive the services above
- `zodiac`: the twelve signs as reference data
- `autosave`: quiet-window debouncer for journal writes
- `cli` / `config` / `errors`: the usual surround

User interaction goes Presentation → store operation → service → action →
state; the presentation layer only ever reads state snapshots.

## Usage Example

```rust,no_run
use std::sync::Arc;
use stellium::horoscope::HoroscopeClient;
use stellium::journal::JournalRepository;
use stellium::notify::{LoggingBackend, NotificationScheduler};
use stellium::storage::MemoryStore;
use stellium::store::AppStore;

# async fn demo() {
let storage = Arc::new(MemoryStore::new());
let mut store = AppStore::new(
    JournalRepository::new(storage.clone()),
    HoroscopeClient::new("https://aztro.sameerkumar.website"),
    NotificationScheduler::new(storage, Arc::new(LoggingBackend::new())),
);

store.activate().await;
let entry_id = store.save_journal_entry("Clear skies today.", Some("calm")).await;
assert!(entry_id.is_some());
# }
```
*/

/// Debounced auto-save helper
pub mod autosave;
/// Command-line interface for parsing user arguments
pub mod cli;
/// Configuration loading and management
pub mod config;
/// Error types and utilities for error handling
pub mod errors;
/// Horoscope provider: remote fetch with bundled fallback
pub mod horoscope;
/// Journal entry model and repository
pub mod journal;
/// Notification preferences and reminder scheduling
pub mod notify;
/// Key-value persistence adapter
pub mod storage;
/// Application state store, actions, and reducer
pub mod store;
/// Zodiac sign reference data
pub mod zodiac;

// Re-export important types for convenience
pub use cli::CliArgs;
pub use config::Config;
pub use errors::{AppError, AppResult};
pub use store::{AppAction, AppState, AppStore};

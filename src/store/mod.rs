//! Application state store.
//!
//! One [`AppState`] instance for the process, mutated only through
//! [`AppAction`] values applied by the [`reduce`] function; the presentation
//! layer reads snapshots and never writes. [`AppStore`] wraps the state
//! together with the three services (journal repository, horoscope client,
//! notification scheduler) and exposes the asynchronous operations the UI
//! drives: each one calls a service, folds the result into state through an
//! action, and records failures as a fixed human-readable error message
//! instead of propagating them.
//!
//! Horoscope fetches are tagged with a generation number and the sign they
//! were issued for; a completed fetch is discarded unless it is still the
//! newest request for the still-selected sign. A slow response for a
//! previously selected sign can therefore never overwrite a newer one.

use crate::horoscope::{DailyHoroscope, HoroscopeClient};
use crate::journal::{JournalEntry, JournalRepository};
use crate::notify::{NotificationPreferences, NotificationScheduler, PermissionStatus};
use crate::zodiac;
use chrono::Utc;
use tracing::{debug, warn};

/// Sign selected before the user has picked one.
pub const DEFAULT_SIGN: &str = "aries";

/// Fixed user-facing error messages set on failed operations.
mod messages {
    pub const FETCH_HOROSCOPE: &str = "Failed to fetch horoscope";
    pub const LOAD_ENTRIES: &str = "Failed to load journal entries";
    pub const SAVE_ENTRY: &str = "Failed to save journal entry";
    pub const UPDATE_ENTRY: &str = "Failed to update journal entry";
    pub const DELETE_ENTRY: &str = "Failed to delete journal entry";
    pub const CLEAR_ENTRIES: &str = "Failed to clear journal entries";
}

/// The signed-in user. Minimal record; there is no account system behind it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub selected_sign: String,
}

/// Process-lifetime application state. Single instance, single writer.
#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    /// Currently selected sign id.
    pub selected_sign: String,
    /// The most recently fetched horoscope, overwritten on each fetch.
    pub current_horoscope: Option<DailyHoroscope>,
    /// Cached copy of the persisted journal entry list.
    pub journal_entries: Vec<JournalEntry>,
    /// The signed-in user, if any.
    pub user: Option<User>,
    /// True while an operation that shows a spinner is in flight.
    pub loading: bool,
    /// Last operation failure, as a fixed user-facing message.
    pub error: Option<String>,
    /// Cached notification preferences.
    pub notification_preferences: NotificationPreferences,
    /// Last known OS notification permission.
    pub notification_permission: PermissionStatus,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            selected_sign: DEFAULT_SIGN.to_string(),
            current_horoscope: None,
            journal_entries: Vec::new(),
            user: None,
            loading: false,
            error: None,
            notification_preferences: NotificationPreferences::default(),
            notification_permission: PermissionStatus::Undetermined,
        }
    }
}

/// The closed set of state transitions.
#[derive(Debug, Clone)]
pub enum AppAction {
    SetSelectedSign(String),
    SetHoroscope(Option<DailyHoroscope>),
    SetJournalEntries(Vec<JournalEntry>),
    AddJournalEntry(JournalEntry),
    UpdateJournalEntry {
        id: String,
        content: String,
        mood: Option<String>,
    },
    DeleteJournalEntry(String),
    SetUser(Option<User>),
    SetLoading(bool),
    SetError(Option<String>),
    SetNotificationPreferences(NotificationPreferences),
    SetNotificationPermission(PermissionStatus),
}

/// Applies one action to the state. Pure and exhaustive: every action kind
/// is matched, and nothing else mutates `AppState`.
pub fn reduce(state: &mut AppState, action: AppAction) {
    match action {
        AppAction::SetSelectedSign(sign) => state.selected_sign = sign,
        AppAction::SetHoroscope(horoscope) => state.current_horoscope = horoscope,
        AppAction::SetJournalEntries(entries) => state.journal_entries = entries,
        AppAction::AddJournalEntry(entry) => state.journal_entries.push(entry),
        AppAction::UpdateJournalEntry { id, content, mood } => {
            if let Some(entry) = state.journal_entries.iter_mut().find(|e| e.id == id) {
                entry.content = content;
                if let Some(mood) = mood {
                    entry.mood = Some(mood);
                }
                entry.updated_at = Utc::now();
            }
        }
        AppAction::DeleteJournalEntry(id) => {
            state.journal_entries.retain(|e| e.id != id);
        }
        AppAction::SetUser(user) => state.user = user,
        AppAction::SetLoading(loading) => state.loading = loading,
        AppAction::SetError(error) => state.error = error,
        AppAction::SetNotificationPreferences(preferences) => {
            state.notification_preferences = preferences;
        }
        AppAction::SetNotificationPermission(permission) => {
            state.notification_permission = permission;
        }
    }
}

/// The state store: owns the one `AppState` and the services, and is the
/// only writer.
pub struct AppStore {
    state: AppState,
    journal: JournalRepository,
    horoscope: HoroscopeClient,
    notifications: NotificationScheduler,
    fetch_seq: u64,
}

impl AppStore {
    /// Builds a store over the three services with default initial state.
    pub fn new(
        journal: JournalRepository,
        horoscope: HoroscopeClient,
        notifications: NotificationScheduler,
    ) -> Self {
        Self {
            state: AppState::default(),
            journal,
            horoscope,
            notifications,
            fetch_seq: 0,
        }
    }

    /// Current state snapshot.
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Applies a single action.
    pub fn dispatch(&mut self, action: AppAction) {
        reduce(&mut self.state, action);
    }

    /// Eager first-activation load: journal entries, horoscope for the
    /// selected sign, notification preferences.
    pub async fn activate(&mut self) {
        self.load_journal_entries().await;
        self.fetch_horoscope().await;
        self.load_notification_preferences().await;
    }

    /// Fetches the horoscope for the currently selected sign and folds it
    /// into state. Each request is tagged with a sequence number and the
    /// sign it was issued for; a response that is no longer the newest
    /// request for the still-selected sign is discarded.
    ///
    /// With `&mut self` operations the requests already serialize, so the
    /// tag check cannot fail today. It is kept so the discard rule holds
    /// if dispatch ever moves behind a shared handle, where a slow
    /// response could race a newer fetch or a sign change.
    pub async fn fetch_horoscope(&mut self) {
        let sign = self.state.selected_sign.clone();
        self.fetch_seq += 1;
        let seq = self.fetch_seq;

        self.dispatch(AppAction::SetLoading(true));
        self.dispatch(AppAction::SetError(None));

        let result = self.horoscope.fetch(&sign).await;

        if seq != self.fetch_seq || sign != self.state.selected_sign {
            debug!(sign, "Discarding stale horoscope response");
        } else {
            match result {
                Ok(daily) => self.dispatch(AppAction::SetHoroscope(Some(daily))),
                Err(e) => {
                    warn!(error = %e, sign, "Horoscope fetch failed");
                    self.dispatch(AppAction::SetError(Some(
                        messages::FETCH_HOROSCOPE.to_string(),
                    )));
                }
            }
        }

        self.dispatch(AppAction::SetLoading(false));
    }

    /// Selects a sign and re-fetches its horoscope. An unknown sign id sets
    /// the fetch error message and leaves the selection unchanged.
    pub async fn set_zodiac_sign(&mut self, sign: &str) {
        if !zodiac::is_valid_sign(sign) {
            warn!(sign, "Rejected unknown zodiac sign");
            self.dispatch(AppAction::SetError(Some(
                messages::FETCH_HOROSCOPE.to_string(),
            )));
            return;
        }

        self.dispatch(AppAction::SetSelectedSign(sign.to_string()));
        self.fetch_horoscope().await;
    }

    /// Loads the persisted journal entries into state. Storage-level
    /// corruption has already self-healed inside the repository, so this
    /// never records an error.
    pub async fn load_journal_entries(&mut self) {
        self.dispatch(AppAction::SetLoading(true));
        let entries = self.journal.list().await;
        self.dispatch(AppAction::SetJournalEntries(entries));
        self.dispatch(AppAction::SetLoading(false));
    }

    /// Creates a new entry dated today, persists it, and on success mirrors
    /// it into state. Returns the new entry's id on success.
    pub async fn save_journal_entry(
        &mut self,
        content: &str,
        mood: Option<&str>,
    ) -> Option<String> {
        let entry = JournalEntry::new(content, mood.map(str::to_string));
        let id = entry.id.clone();

        match self.journal.save(&entry).await {
            Ok(()) => {
                self.dispatch(AppAction::AddJournalEntry(entry));
                Some(id)
            }
            Err(e) => {
                warn!(error = %e, "Failed to persist journal entry");
                self.dispatch(AppAction::SetError(Some(messages::SAVE_ENTRY.to_string())));
                None
            }
        }
    }

    /// Updates an entry's content (and mood, when given), persisting first
    /// and mirroring into state only on success. An unknown id is the
    /// repository's lenient no-op and changes nothing.
    pub async fn update_journal_entry(&mut self, id: &str, content: &str, mood: Option<&str>) {
        match self.journal.update(id, content, mood).await {
            Ok(true) => self.dispatch(AppAction::UpdateJournalEntry {
                id: id.to_string(),
                content: content.to_string(),
                mood: mood.map(str::to_string),
            }),
            Ok(false) => debug!(id, "No journal entry with that id to update"),
            Err(e) => {
                warn!(error = %e, id, "Failed to persist journal entry update");
                self.dispatch(AppAction::SetError(Some(
                    messages::UPDATE_ENTRY.to_string(),
                )));
            }
        }
    }

    /// Deletes an entry from storage and, on success, from state.
    pub async fn delete_journal_entry(&mut self, id: &str) {
        match self.journal.delete(id).await {
            Ok(()) => self.dispatch(AppAction::DeleteJournalEntry(id.to_string())),
            Err(e) => {
                warn!(error = %e, id, "Failed to delete journal entry");
                self.dispatch(AppAction::SetError(Some(
                    messages::DELETE_ENTRY.to_string(),
                )));
            }
        }
    }

    /// Removes every journal entry from storage and, on success, from state.
    pub async fn clear_journal_entries(&mut self) {
        match self.journal.clear_all().await {
            Ok(()) => self.dispatch(AppAction::SetJournalEntries(Vec::new())),
            Err(e) => {
                warn!(error = %e, "Failed to clear journal entries");
                self.dispatch(AppAction::SetError(Some(
                    messages::CLEAR_ENTRIES.to_string(),
                )));
            }
        }
    }

    /// Enables the daily reminder at `time` (default time when `None`).
    /// Returns whether it was enabled; `false` means permission was denied
    /// and the caller should explain that to the user.
    pub async fn enable_notifications(&mut self, time: Option<&str>) -> bool {
        let time = time.unwrap_or(crate::notify::DEFAULT_REMINDER_TIME);
        match self.notifications.enable(time).await {
            Ok(true) => {
                let preferences = self.notifications.load_preferences().await;
                self.dispatch(AppAction::SetNotificationPreferences(preferences));
                self.dispatch(AppAction::SetNotificationPermission(
                    PermissionStatus::Granted,
                ));
                true
            }
            Ok(false) => {
                self.dispatch(AppAction::SetNotificationPermission(
                    PermissionStatus::Denied,
                ));
                false
            }
            Err(e) => {
                warn!(error = %e, "Failed to enable notifications");
                false
            }
        }
    }

    /// Disables the daily reminder and refreshes the cached preferences.
    pub async fn disable_notifications(&mut self) {
        if let Err(e) = self.notifications.disable().await {
            warn!(error = %e, "Failed to disable notifications");
            return;
        }
        let preferences = self.notifications.load_preferences().await;
        self.dispatch(AppAction::SetNotificationPreferences(preferences));
    }

    /// Changes the reminder time. Returns false if the time was rejected or
    /// persistence failed.
    pub async fn update_notification_time(&mut self, time: &str) -> bool {
        match self.notifications.update_time(time).await {
            Ok(()) => {
                let preferences = self.notifications.load_preferences().await;
                self.dispatch(AppAction::SetNotificationPreferences(preferences));
                true
            }
            Err(e) => {
                warn!(error = %e, time, "Failed to update notification time");
                false
            }
        }
    }

    /// Loads persisted preferences and the current permission status into
    /// state. Never records an error; unreadable preferences degrade to the
    /// default inside the scheduler.
    pub async fn load_notification_preferences(&mut self) {
        let preferences = self.notifications.load_preferences().await;
        let permission = self.notifications.permission_status().await;
        self.dispatch(AppAction::SetNotificationPreferences(preferences));
        self.dispatch(AppAction::SetNotificationPermission(permission));
    }
}

//! Daily reminder notifications: preferences, permission, scheduling.
//!
//! The OS notification subsystem is an external collaborator behind the
//! [`NotificationBackend`] trait (tri-state permission, schedule a repeating
//! daily trigger, cancel everything). The [`NotificationScheduler`] owns the
//! policy on top of it and maintains one invariant: at most one recurring
//! trigger is registered while notifications are enabled, and none while
//! disabled. Enabling always cancels before scheduling, so duplicate alarms
//! cannot accumulate.

use crate::errors::{AppResult, NotificationError};
use crate::storage::{KeyValueStore, NOTIFICATION_PREFERENCES_KEY};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Payload tag carried by delivered daily-horoscope notifications, so the
/// receiving side can recognize them.
pub const DAILY_HOROSCOPE_TAG: &str = "daily_horoscope";

/// Default reminder time used when no preference is stored.
pub const DEFAULT_REMINDER_TIME: &str = "09:00";

/// OS notification permission, as reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    /// The user has never been asked.
    Undetermined,
    /// The user allowed notifications.
    Granted,
    /// The user refused notifications.
    Denied,
}

impl fmt::Display for PermissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PermissionStatus::Undetermined => "undetermined",
            PermissionStatus::Granted => "granted",
            PermissionStatus::Denied => "denied",
        };
        f.write_str(name)
    }
}

/// Persisted notification preferences.
///
/// Exactly one logical instance, stored as a camelCase JSON object under one
/// key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPreferences {
    /// Whether the daily reminder is on.
    pub enabled: bool,
    /// Reminder time of day, `HH:mm` 24-hour.
    pub time: String,
    /// Whether the reminder content is the daily horoscope.
    pub daily_horoscope: bool,
}

impl Default for NotificationPreferences {
    fn default() -> Self {
        Self {
            enabled: false,
            time: DEFAULT_REMINDER_TIME.to_string(),
            daily_horoscope: true,
        }
    }
}

/// Parses an `HH:mm` 24-hour time string into `(hour, minute)`.
///
/// # Errors
///
/// Returns [`NotificationError::InvalidTime`] for anything that is not a
/// valid 24-hour time.
pub fn parse_reminder_time(time: &str) -> Result<(u32, u32), NotificationError> {
    let invalid = || NotificationError::InvalidTime(time.to_string());

    let (hour_part, minute_part) = time.split_once(':').ok_or_else(invalid)?;

    // u32::from_str accepts a leading `+`, so digits are checked explicitly.
    let all_digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(hour_part) || !all_digits(minute_part) || minute_part.len() != 2 {
        return Err(invalid());
    }

    let hour: u32 = hour_part.parse().map_err(|_| invalid())?;
    let minute: u32 = minute_part.parse().map_err(|_| invalid())?;
    if hour > 23 || minute > 59 {
        return Err(invalid());
    }
    Ok((hour, minute))
}

/// The OS notification subsystem, as seen by the scheduler.
#[async_trait]
pub trait NotificationBackend: Send + Sync {
    /// Returns the current permission status without prompting.
    async fn permission_status(&self) -> PermissionStatus;

    /// Prompts the user for permission (or returns the settled status if the
    /// prompt was already answered).
    async fn request_permission(&self) -> PermissionStatus;

    /// Registers a repeating daily trigger at the given time and returns its
    /// identifier. Delivered notifications carry [`DAILY_HOROSCOPE_TAG`].
    async fn schedule_daily(&self, hour: u32, minute: u32) -> Result<String, NotificationError>;

    /// Cancels every registered trigger.
    async fn cancel_all(&self) -> Result<(), NotificationError>;
}

/// A [`NotificationBackend`] with no OS integration: permission is always
/// granted and scheduling is recorded in memory and logged.
///
/// Used by the CLI composition root, where there is no notification daemon
/// to talk to; the logged schedule still makes the scheduler's behavior
/// observable.
#[derive(Default)]
pub struct LoggingBackend {
    active: RwLock<Option<(u32, u32)>>,
}

impl LoggingBackend {
    /// Creates a backend with nothing scheduled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the currently registered trigger time, if any.
    pub async fn active_schedule(&self) -> Option<(u32, u32)> {
        *self.active.read().await
    }
}

#[async_trait]
impl NotificationBackend for LoggingBackend {
    async fn permission_status(&self) -> PermissionStatus {
        PermissionStatus::Granted
    }

    async fn request_permission(&self) -> PermissionStatus {
        PermissionStatus::Granted
    }

    async fn schedule_daily(&self, hour: u32, minute: u32) -> Result<String, NotificationError> {
        *self.active.write().await = Some((hour, minute));
        info!(
            hour,
            minute,
            tag = DAILY_HOROSCOPE_TAG,
            "Registered daily reminder trigger"
        );
        Ok(format!("{}-{:02}{:02}", DAILY_HOROSCOPE_TAG, hour, minute))
    }

    async fn cancel_all(&self) -> Result<(), NotificationError> {
        *self.active.write().await = None;
        debug!("Cancelled all reminder triggers");
        Ok(())
    }
}

/// Policy layer over preferences persistence and the notification backend.
pub struct NotificationScheduler {
    store: Arc<dyn KeyValueStore>,
    backend: Arc<dyn NotificationBackend>,
}

impl NotificationScheduler {
    /// Creates a scheduler over the given store and backend.
    pub fn new(store: Arc<dyn KeyValueStore>, backend: Arc<dyn NotificationBackend>) -> Self {
        Self { store, backend }
    }

    /// Returns the current OS permission status without prompting.
    pub async fn permission_status(&self) -> PermissionStatus {
        self.backend.permission_status().await
    }

    /// Returns the persisted preferences, or the default when nothing is
    /// stored or the stored value is unreadable. Never fails outward.
    pub async fn load_preferences(&self) -> NotificationPreferences {
        let raw = match self.store.get(NOTIFICATION_PREFERENCES_KEY).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return NotificationPreferences::default(),
            Err(e) => {
                warn!(error = %e, "Failed to read notification preferences, using defaults");
                return NotificationPreferences::default();
            }
        };

        serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!(error = %e, "Corrupted notification preferences, using defaults");
            NotificationPreferences::default()
        })
    }

    /// Turns the daily reminder on at the given `HH:mm` time.
    ///
    /// Requests OS permission first. If permission is not granted this
    /// returns `Ok(false)` and changes nothing; the caller is expected to
    /// explain the denial to the user. On success the preferences are
    /// persisted as enabled and the repeating trigger is (re)registered,
    /// cancelling any previous registration first.
    ///
    /// # Errors
    ///
    /// Returns an error for an invalid time string, a failed preference
    /// write, or a backend scheduling failure.
    pub async fn enable(&self, time: &str) -> AppResult<bool> {
        parse_reminder_time(time)?;

        let status = self.backend.request_permission().await;
        if status != PermissionStatus::Granted {
            info!(%status, "Notification permission not granted, leaving reminders off");
            return Ok(false);
        }

        let preferences = NotificationPreferences {
            enabled: true,
            time: time.to_string(),
            daily_horoscope: true,
        };
        self.save_preferences(&preferences).await?;
        self.reschedule(&preferences).await?;

        info!(time, "Enabled daily reminder");
        Ok(true)
    }

    /// Turns the daily reminder off and cancels every registered trigger.
    ///
    /// The stored reminder time is preserved, so re-enabling later offers
    /// the user's last chosen time rather than the default.
    ///
    /// # Errors
    ///
    /// Returns an error if the preference write or the cancellation fails.
    pub async fn disable(&self) -> AppResult<()> {
        let mut preferences = self.load_preferences().await;
        preferences.enabled = false;
        preferences.daily_horoscope = false;

        self.save_preferences(&preferences).await?;
        self.backend.cancel_all().await?;

        info!("Disabled daily reminder");
        Ok(())
    }

    /// Changes the reminder time. When the reminder is enabled the trigger
    /// is re-registered immediately; when disabled only the stored
    /// preference changes.
    ///
    /// # Errors
    ///
    /// Returns an error for an invalid time string, a failed preference
    /// write, or a backend scheduling failure.
    pub async fn update_time(&self, time: &str) -> AppResult<()> {
        parse_reminder_time(time)?;

        let mut preferences = self.load_preferences().await;
        preferences.time = time.to_string();
        self.save_preferences(&preferences).await?;

        if preferences.enabled {
            self.reschedule(&preferences).await?;
        }

        info!(time, enabled = preferences.enabled, "Updated reminder time");
        Ok(())
    }

    /// Cancels any existing trigger and registers one at the preference
    /// time. Keeps the at-most-one-trigger invariant.
    async fn reschedule(&self, preferences: &NotificationPreferences) -> AppResult<()> {
        let (hour, minute) = parse_reminder_time(&preferences.time)?;
        self.backend.cancel_all().await?;
        let id = self.backend.schedule_daily(hour, minute).await?;
        debug!(%id, hour, minute, "Daily reminder trigger registered");
        Ok(())
    }

    async fn save_preferences(&self, preferences: &NotificationPreferences) -> AppResult<()> {
        let raw = serde_json::to_string(preferences).map_err(|e| {
            crate::errors::AppError::Notification(NotificationError::ScheduleFailed(format!(
                "preference serialization failed: {}",
                e
            )))
        })?;
        self.store.set(NOTIFICATION_PREFERENCES_KEY, &raw).await?;
        Ok(())
    }
}

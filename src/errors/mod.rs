//! Error handling utilities for the stellium application.
//!
//! This module provides the central error type `AppError` which represents all
//! possible error conditions that might occur in the application, as well as the
//! convenience type alias `AppResult` for functions that can return these errors.
//!
//! Each subsystem has its own dedicated error enum (`StorageError`,
//! `HoroscopeError`, `NotificationError`) which converts into `AppError`
//! through `From`, so lower layers stay independent of the application-level
//! error surface.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Represents errors raised by the key-value persistence adapter.
///
/// Every variant means the same thing to callers: the requested change did
/// not happen. A failed `set` leaves the previous value in place; a failed
/// `get` reveals nothing about the stored value.
///
/// # Examples
///
/// ```
/// use stellium::errors::StorageError;
/// use std::io::{self, ErrorKind};
/// use std::path::PathBuf;
///
/// let io_error = io::Error::new(ErrorKind::PermissionDenied, "permission denied");
/// let error = StorageError::WriteFailed {
///     key: "journal_entries".to_string(),
///     path: PathBuf::from("/data/journal_entries.json"),
///     source: io_error,
/// };
///
/// assert!(format!("{}", error).contains("journal_entries"));
/// ```
#[derive(Debug, Error)]
pub enum StorageError {
    /// Error when reading a stored value fails for an I/O reason other than
    /// the key being absent (absence is not an error, it is `Ok(None)`).
    #[error("Failed to read stored value for key '{key}' from {path}: {source}")]
    ReadFailed {
        /// The logical storage key being read
        key: String,
        /// The backing file path
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Error when writing a value fails. The previously stored value, if any,
    /// is still intact.
    #[error("Failed to write value for key '{key}' to {path}: {source}")]
    WriteFailed {
        /// The logical storage key being written
        key: String,
        /// The backing file path
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Error when removing a stored value fails. Removing an absent key is
    /// not an error.
    #[error("Failed to remove stored value for key '{key}' at {path}: {source}")]
    RemoveFailed {
        /// The logical storage key being removed
        key: String,
        /// The backing file path
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Error when the storage root directory cannot be created or accessed.
    #[error("Storage directory {path} is unusable: {source}")]
    DirectoryUnavailable {
        /// The storage root directory
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Error when a caller passes a key that is not a valid storage slug.
    #[error("Invalid storage key '{0}': keys must be non-empty and contain only [a-z0-9_.-]")]
    InvalidKey(String),
}

/// Represents errors from the horoscope provider.
///
/// Transient failures (network errors, non-success responses, unparseable
/// bodies) are *not* represented here; the provider degrades to bundled
/// fallback content for those. This enum only covers conditions the fallback
/// cannot paper over.
#[derive(Debug, Error)]
pub enum HoroscopeError {
    /// Error when the requested sign id is not one of the twelve canonical
    /// signs and therefore has no fallback entry.
    #[error("Unknown zodiac sign '{0}': expected one of the twelve canonical sign ids")]
    UnknownSign(String),
}

/// Represents errors from the notification scheduler and its OS backend.
#[derive(Debug, Error)]
pub enum NotificationError {
    /// Error when a reminder time string is not a valid `HH:mm` 24-hour time.
    #[error("Invalid reminder time '{0}': expected HH:mm in 24-hour format")]
    InvalidTime(String),

    /// Error when the OS notification subsystem rejects a scheduling request.
    #[error("Failed to schedule the daily reminder: {0}")]
    ScheduleFailed(String),

    /// Error when cancelling previously registered triggers fails.
    #[error("Failed to cancel scheduled reminders: {0}")]
    CancelFailed(String),
}

/// Represents all possible errors that can occur in the stellium application.
///
/// This enum is the central error type used across the application, with
/// variants for different error categories. It uses `thiserror` for deriving
/// the `Error` trait implementation and formatted error messages.
///
/// # Examples
///
/// Creating a configuration error:
/// ```
/// use stellium::errors::AppError;
///
/// let error = AppError::Config("Missing data directory".to_string());
/// assert_eq!(format!("{}", error), "Configuration error: Missing data directory");
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// Errors related to configuration loading or validation.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input/output errors from filesystem operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Errors in journal entry logic (e.g., invalid date formats).
    #[error("Journal error: {0}")]
    Journal(String),

    /// Errors from the key-value persistence adapter.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Errors from the horoscope provider.
    #[error("Horoscope error: {0}")]
    Horoscope(#[from] HoroscopeError),

    /// Errors from the notification scheduler.
    #[error("Notification error: {0}")]
    Notification(#[from] NotificationError),
}

/// A type alias for `Result<T, AppError>` to simplify function signatures.
///
/// This type alias is used throughout the application to represent operations
/// that may fail with an `AppError`.
pub type AppResult<T> = Result<T, AppError>;

use voicebook_core::AudioError;

use std::{panic::Location, result::Result as StdResult};

use error_location::ErrorLocation;
use thiserror::Error;

/// Application-level errors for the voicebook binary.
///
/// All variants include `ErrorLocation` for call-site tracking.
#[derive(Error, Debug)]
pub enum AppError {
    /// Audio subsystem error from voicebook-core. Covers the
    /// device-unavailable case: capture stays idle when this surfaces
    /// from starting a recording.
    #[error("Audio error: {source} {location}")]
    Audio {
        /// The underlying audio error.
        #[source]
        source: AudioError,
        /// Location where this error was created.
        location: ErrorLocation,
    },

    /// The backend rejected the session. Fatal to the current view:
    /// the transport publishes a session-invalidated event alongside
    /// this error and the app falls back to the login route.
    #[error("Unauthorized {location}")]
    Unauthorized {
        /// Location where this error was created.
        location: ErrorLocation,
    },

    /// Non-2xx response other than 401. The message comes from the
    /// body's `detail` or `message` field when present, else the raw
    /// body, else "HTTP <status>".
    #[error("API error ({status}): {message} {location}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Extracted error message.
        message: String,
        /// Location where this error was created.
        location: ErrorLocation,
    },

    /// Transport-level failure (connection, body read, request build).
    /// Treated like a generic API error by callers.
    #[error("HTTP transport error: {reason} {location}")]
    Http {
        /// Human-readable reason for failure.
        reason: String,
        /// Location where this error was created.
        location: ErrorLocation,
    },

    /// Configuration loading or saving error.
    #[error("Configuration error: {reason} {location}")]
    ConfigError {
        /// Human-readable reason for failure.
        reason: String,
        /// Location where this error was created.
        location: ErrorLocation,
    },

    /// IO error from filesystem operations.
    #[error("IO error: {source} {location}")]
    IoError {
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
        /// Location where this error was created.
        location: ErrorLocation,
    },

    /// Failed to send message through async channel.
    #[error("Channel send failed: {message} {location}")]
    ChannelSendFailed {
        /// Human-readable error message.
        message: String,
        /// Location where this error was created.
        location: ErrorLocation,
    },

    /// An operation was requested in a workflow state that does not
    /// permit it (e.g. upload without a captured take).
    #[error("Invalid workflow state: {reason} {location}")]
    InvalidState {
        /// What was attempted and why it is not allowed.
        reason: String,
        /// Location where this error was created.
        location: ErrorLocation,
    },
}

// Manual From<AudioError> with location tracking.
// Cannot use #[from] because it does not support extra fields.
impl From<AudioError> for AppError {
    #[track_caller]
    fn from(source: AudioError) -> Self {
        AppError::Audio {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<std::io::Error> for AppError {
    #[track_caller]
    fn from(source: std::io::Error) -> Self {
        AppError::IoError {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<reqwest::Error> for AppError {
    #[track_caller]
    fn from(source: reqwest::Error) -> Self {
        AppError::Http {
            reason: source.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

/// Convenience type alias for Results using `AppError`.
pub type Result<T> = StdResult<T, AppError>;

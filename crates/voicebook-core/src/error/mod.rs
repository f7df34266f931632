use error_location::ErrorLocation;
use thiserror::Error;

/// Audio capture, encoding, and playback errors with source location tracking.
#[derive(Error, Debug)]
pub enum AudioError {
    /// No audio input device found.
    #[error("No microphone found {location}")]
    NoMicrophoneFound {
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Audio device operation failed.
    #[error("Audio device error: {reason} {location}")]
    DeviceError {
        /// Description of the device error.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Stop requested while no capture was running.
    #[error("No active capture {location}")]
    NoActiveCapture {
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// WAV encoding failed.
    #[error("Encoding error: {reason} {location}")]
    EncodingError {
        /// Description of the encoding error.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Local playback failed.
    #[error("Playback error: {reason} {location}")]
    PlaybackError {
        /// Description of the playback error.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The audio engine thread is no longer running.
    #[error("Audio engine stopped {location}")]
    EngineStopped {
        /// Source location where error occurred.
        location: ErrorLocation,
    },
}

/// Result type alias using [`AudioError`].
pub type Result<T> = std::result::Result<T, AudioError>;

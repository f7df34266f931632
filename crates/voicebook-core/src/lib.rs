//! Voicebook Core Library
//!
//! Audio capture, review playback, and WAV encoding for the Voicebook
//! recording studio client, built on CPAL and Hound.
//!
//! cpal streams are not `Send`, so all device state is owned by one
//! engine thread; the rest of the application drives it through an
//! [`AudioHandle`].
//!
//! # Example
//!
//! ```no_run
//! use voicebook_core::{AudioEngine, CoreResult};
//!
//! use std::{thread::sleep, time::Duration};
//!
//! fn main() -> CoreResult<()> {
//!     let audio = AudioEngine::spawn();
//!
//!     audio.start_capture()?;
//!     sleep(Duration::from_secs(3));
//!     let take = audio.stop_capture()?;
//!
//!     let wav = take.to_wav_bytes()?;
//!     println!("Captured {} WAV bytes", wav.len());
//!     Ok(())
//! }
//! ```

mod audio;
mod error;

pub use {
    audio::AudioEngine, audio::AudioHandle, audio::AudioTake, audio::Player, error::AudioError,
    error::Result as CoreResult,
};

#[cfg(test)]
mod tests;

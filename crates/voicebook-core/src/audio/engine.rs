//! Audio engine thread and its command handle.
//!
//! cpal streams are not `Send`, so the capturer and player live on one
//! dedicated thread for the life of the application. Everything else
//! talks to them through [`AudioHandle`], which sends a command and
//! blocks on a per-call reply channel. Calls are short (stream setup and
//! teardown); the heavy lifting happens in the cpal callbacks.

use crate::{
    AudioError, CoreResult,
    audio::{AudioCapturer, AudioTake, Player},
};

use std::{
    panic::Location,
    sync::mpsc::{Receiver, Sender, channel},
    thread,
};

use error_location::ErrorLocation;
use tracing::{debug, info, instrument, warn};

enum EngineCommand {
    StartCapture {
        reply: Sender<CoreResult<()>>,
    },
    StopCapture {
        reply: Sender<CoreResult<AudioTake>>,
    },
    TogglePlayback {
        reply: Sender<CoreResult<bool>>,
    },
    IsPlaying {
        reply: Sender<bool>,
    },
    ReleasePlayback {
        reply: Sender<()>,
    },
    Shutdown,
}

/// Spawns the audio engine thread.
pub struct AudioEngine;

impl AudioEngine {
    /// Starts the engine thread and returns its command handle.
    ///
    /// The thread owns no device until capture starts, so spawning
    /// succeeds even on a machine with no microphone; device acquisition
    /// failures surface from [`AudioHandle::start_capture`].
    #[instrument]
    pub fn spawn() -> AudioHandle {
        let (command_tx, command_rx) = channel();

        thread::spawn(move || {
            engine_loop(command_rx);
        });

        info!("Audio engine thread started");

        AudioHandle { command_tx }
    }
}

/// Cloneable, thread-safe handle to the audio engine thread.
#[derive(Clone)]
pub struct AudioHandle {
    command_tx: Sender<EngineCommand>,
}

impl AudioHandle {
    /// Acquires the microphone and starts buffering a new take.
    ///
    /// # Errors
    ///
    /// Device acquisition errors ([`AudioError::NoMicrophoneFound`],
    /// [`AudioError::DeviceError`]) leave the engine with no live
    /// capture; the caller stays idle.
    #[track_caller]
    pub fn start_capture(&self) -> CoreResult<()> {
        self.call(|reply| EngineCommand::StartCapture { reply })?
    }

    /// Stops capture, releases the microphone, and returns the take.
    ///
    /// The returned take is already loaded into the player for local
    /// review. A zero-length take is returned as-is, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`AudioError::NoActiveCapture`] when nothing is recording.
    #[track_caller]
    pub fn stop_capture(&self) -> CoreResult<AudioTake> {
        self.call(|reply| EngineCommand::StopCapture { reply })?
    }

    /// Flips playback of the loaded take; returns the new playing state.
    ///
    /// # Errors
    ///
    /// Returns [`AudioError::PlaybackError`] when no take is loaded.
    #[track_caller]
    pub fn toggle_playback(&self) -> CoreResult<bool> {
        self.call(|reply| EngineCommand::TogglePlayback { reply })?
    }

    /// Whether the loaded take is currently audible.
    #[track_caller]
    pub fn is_playing(&self) -> CoreResult<bool> {
        self.call(|reply| EngineCommand::IsPlaying { reply })
    }

    /// Drops the player and its output stream.
    ///
    /// Must be called on every transition that discards a take:
    /// re-record, navigation away, successful upload.
    #[track_caller]
    pub fn release_playback(&self) -> CoreResult<()> {
        self.call(|reply| EngineCommand::ReleasePlayback { reply })
    }

    /// Asks the engine thread to exit. Pending state is dropped.
    pub fn shutdown(&self) {
        let _ = self.command_tx.send(EngineCommand::Shutdown);
    }

    #[track_caller]
    fn call<T>(&self, make: impl FnOnce(Sender<T>) -> EngineCommand) -> CoreResult<T> {
        let location = ErrorLocation::from(Location::caller());
        let (reply_tx, reply_rx) = channel();

        self.command_tx
            .send(make(reply_tx))
            .map_err(|_| AudioError::EngineStopped { location })?;

        reply_rx
            .recv()
            .map_err(|_| AudioError::EngineStopped { location })
    }
}

/// State owned by the engine thread. Holds every `!Send` audio resource.
struct EngineState {
    capturer: Option<AudioCapturer>,
    player: Option<Player>,
}

fn engine_loop(command_rx: Receiver<EngineCommand>) {
    let mut state = EngineState {
        capturer: None,
        player: None,
    };

    while let Ok(command) = command_rx.recv() {
        match command {
            EngineCommand::StartCapture { reply } => {
                let _ = reply.send(handle_start_capture(&mut state));
            }
            EngineCommand::StopCapture { reply } => {
                let _ = reply.send(handle_stop_capture(&mut state));
            }
            EngineCommand::TogglePlayback { reply } => {
                let result = match state.player.as_ref() {
                    Some(player) => Ok(player.toggle()),
                    None => Err(AudioError::PlaybackError {
                        reason: "No take loaded".to_string(),
                        location: ErrorLocation::from(Location::caller()),
                    }),
                };
                let _ = reply.send(result);
            }
            EngineCommand::IsPlaying { reply } => {
                let playing = state.player.as_ref().is_some_and(Player::is_playing);
                let _ = reply.send(playing);
            }
            EngineCommand::ReleasePlayback { reply } => {
                if state.player.take().is_some() {
                    debug!("Playback handle released");
                }
                let _ = reply.send(());
            }
            EngineCommand::Shutdown => {
                info!("Audio engine shutting down");
                break;
            }
        }
    }

    // Dropping state here releases any live stream.
    drop(state);
    info!("Audio engine thread stopped");
}

#[track_caller]
fn handle_start_capture(state: &mut EngineState) -> CoreResult<()> {
    if state.capturer.is_some() {
        return Err(AudioError::DeviceError {
            reason: "Capture already running".to_string(),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    // The device is acquired per capture, not at engine start, so a
    // denied or missing microphone is reported at the moment the speaker
    // hits record.
    let mut capturer = AudioCapturer::new()?;
    capturer.start()?;
    state.capturer = Some(capturer);
    Ok(())
}

#[track_caller]
fn handle_stop_capture(state: &mut EngineState) -> CoreResult<AudioTake> {
    let mut capturer = state
        .capturer
        .take()
        .ok_or_else(|| AudioError::NoActiveCapture {
            location: ErrorLocation::from(Location::caller()),
        })?;

    let samples = capturer.stop()?;
    let take = AudioTake::new(samples, capturer.sample_rate(), capturer.channels());
    // Dropping the capturer fully releases the input device.
    drop(capturer);

    // Load the take for review right away; the playback handle lives
    // until the take is discarded or uploaded. Review is best-effort:
    // a missing output device must not lose the captured take.
    match Player::new(&take) {
        Ok(player) => state.player = Some(player),
        Err(e) => {
            warn!(take_id = %take.id, error = ?e, "Playback unavailable for take");
            state.player = None;
        }
    }

    Ok(take)
}

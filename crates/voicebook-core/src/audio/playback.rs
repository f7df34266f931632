use crate::{AudioError, CoreResult, audio::AudioTake};

use std::{
    panic::Location,
    sync::{
        Arc,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
};

use cpal::{
    Stream, StreamConfig,
    traits::{DeviceTrait, HostTrait, StreamTrait},
};
use error_location::ErrorLocation;
use tracing::{error, info, instrument};

/// Plays one captured take through the default output device.
///
/// The player is the scoped playback handle for a take: created when a
/// take is loaded for review, dropped on every transition that discards
/// the take (re-record, navigation, successful upload). Dropping the
/// player releases the output stream; there is no other cleanup path.
///
/// The output stream runs for the player's whole lifetime and emits
/// silence while `playing` is false, so toggling is just an atomic flip.
pub struct Player {
    _stream: Stream,
    playing: Arc<AtomicBool>,
}

impl Player {
    /// Builds an output stream over the take's samples.
    ///
    /// The stream is opened with the take's own sample rate and channel
    /// count. Capture and playback use the same host, so the take's
    /// native config is assumed to be playable as-is.
    ///
    /// Playback starts paused; call [`toggle`](Self::toggle) to begin.
    ///
    /// # Errors
    ///
    /// Returns [`AudioError::PlaybackError`] when there is no output
    /// device or the stream cannot be built.
    #[track_caller]
    #[instrument(skip(take), fields(take_id = %take.id))]
    pub fn new(take: &AudioTake) -> CoreResult<Self> {
        let host = cpal::default_host();

        let device = host
            .default_output_device()
            .ok_or(AudioError::PlaybackError {
                reason: "No output device found".to_string(),
                location: ErrorLocation::from(Location::caller()),
            })?;

        let config = StreamConfig {
            channels: take.channels,
            sample_rate: take.sample_rate,
            buffer_size: cpal::BufferSize::Default,
        };

        let samples: Arc<Vec<f32>> = Arc::new(take.samples.clone());
        let playing = Arc::new(AtomicBool::new(false));
        let position = Arc::new(AtomicUsize::new(0));

        let cb_samples = Arc::clone(&samples);
        let cb_playing = Arc::clone(&playing);
        let cb_position = Arc::clone(&position);

        let stream = device
            .build_output_stream(
                &config,
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    if !cb_playing.load(Ordering::Acquire) {
                        data.fill(0.0);
                        return;
                    }

                    let pos = cb_position.load(Ordering::Acquire);
                    let remaining = cb_samples.len().saturating_sub(pos);
                    let copied = remaining.min(data.len());

                    data[..copied].copy_from_slice(&cb_samples[pos..pos + copied]);
                    data[copied..].fill(0.0);

                    if copied < data.len() {
                        // Natural end of playback: rewind and clear the
                        // playing flag so the next toggle starts over.
                        cb_position.store(0, Ordering::Release);
                        cb_playing.store(false, Ordering::Release);
                    } else {
                        cb_position.store(pos + copied, Ordering::Release);
                    }
                },
                |err| {
                    error!("Playback stream error: {}", err);
                },
                None,
            )
            .map_err(|e| AudioError::PlaybackError {
                reason: format!("Failed to build output stream: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        stream.play().map_err(|e| AudioError::PlaybackError {
            reason: format!("Failed to start output stream: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        info!(sample_count = samples.len(), "Player ready");

        Ok(Self {
            _stream: stream,
            playing,
        })
    }

    /// Flips between playing and paused, returning the new playing state.
    ///
    /// Pausing keeps the position; a take that ran to its natural end has
    /// already rewound, so the next toggle plays from the start.
    pub fn toggle(&self) -> bool {
        let was_playing = self.playing.fetch_xor(true, Ordering::AcqRel);
        !was_playing
    }

    /// Whether the take is currently audible.
    pub fn is_playing(&self) -> bool {
        self.playing.load(Ordering::Acquire)
    }
}

use crate::{AudioError, CoreResult};

use std::{
    collections::VecDeque,
    panic::Location,
    sync::{
        atomic::{AtomicBool, Ordering},
        {Arc, Mutex},
    },
};

use cpal::{
    Device, Stream, StreamConfig,
    traits::{DeviceTrait, HostTrait, StreamTrait},
};
use error_location::ErrorLocation;
use tracing::{debug, error, info, instrument};

/// Maximum samples to buffer (10 minutes at 48kHz mono).
/// A chunk take is expected to be well under a minute; this bound only
/// protects against a speaker leaving the microphone open.
pub(crate) const MAX_BUFFER_SAMPLES: usize = 48_000 * 60 * 10;

/// Captures microphone input for one take at a time.
///
/// The cpal input stream exists only between `start()` and `stop()`.
/// Dropping the stream in `stop()` releases the input device immediately,
/// whether or not the captured take is ever uploaded.
pub struct AudioCapturer {
    device: Device,
    config: StreamConfig,
    stream: Option<Stream>,
    samples: Arc<Mutex<VecDeque<f32>>>,
    /// Signals the audio callback to stop writing. Set before the stream
    /// is dropped so no in-flight callback writes after `stop()` takes
    /// the lock.
    shutdown: Arc<AtomicBool>,
}

impl AudioCapturer {
    /// Opens the default input device.
    ///
    /// # Errors
    ///
    /// Returns [`AudioError::NoMicrophoneFound`] when the host has no
    /// input device, [`AudioError::DeviceError`] when its config cannot
    /// be read.
    #[track_caller]
    #[instrument]
    pub fn new() -> CoreResult<Self> {
        let host = cpal::default_host();

        let device = host
            .default_input_device()
            .ok_or(AudioError::NoMicrophoneFound {
                location: ErrorLocation::from(Location::caller()),
            })?;

        let config = device
            .default_input_config()
            .map_err(|e| AudioError::DeviceError {
                reason: format!("Failed to get config: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        info!(
            device_id = ?device.id(),
            sample_rate = config.sample_rate(),
            channels = config.channels(),
            "AudioCapturer initialized"
        );

        Ok(Self {
            device,
            config: config.into(),
            stream: None,
            samples: Arc::new(Mutex::new(VecDeque::new())),
            shutdown: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Whether a capture stream is currently live.
    pub fn is_capturing(&self) -> bool {
        self.stream.is_some()
    }

    /// Starts buffering microphone input for a new take.
    ///
    /// Any samples left from a previous take are cleared first.
    ///
    /// # Errors
    ///
    /// Returns [`AudioError::DeviceError`] when the input stream cannot
    /// be built or started.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn start(&mut self) -> CoreResult<()> {
        let samples = Arc::clone(&self.samples);
        let shutdown = Arc::clone(&self.shutdown);

        self.shutdown.store(false, Ordering::Release);

        samples
            .lock()
            .map_err(|e| AudioError::DeviceError {
                reason: format!("Failed to lock samples: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?
            .clear();

        let stream = self
            .device
            .build_input_stream(
                &self.config,
                move |data: &[f32], _: &cpal::InputCallbackInfo| {
                    // Once stop() sets this flag, no new samples are
                    // written even if cpal fires one more callback before
                    // the stream is dropped.
                    if shutdown.load(Ordering::Acquire) {
                        return;
                    }
                    // Recover from lock poison rather than dropping audio.
                    // The VecDeque data is still valid after a panic in a
                    // previous holder.
                    let mut buf = samples.lock().unwrap_or_else(|e| {
                        error!("Sample buffer lock poisoned, recovering: {}", e);
                        e.into_inner()
                    });
                    buf.extend(data.iter().copied());
                    while buf.len() > MAX_BUFFER_SAMPLES {
                        buf.pop_front();
                    }
                },
                |err| {
                    error!("Audio stream error: {}", err);
                },
                None,
            )
            .map_err(|e| AudioError::DeviceError {
                reason: format!("Failed to build stream: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        stream.play().map_err(|e| AudioError::DeviceError {
            reason: format!("Failed to start stream: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        self.stream = Some(stream);
        info!("Audio capture started");

        Ok(())
    }

    /// Stops capturing and returns the buffered samples.
    ///
    /// The input device is released before this returns. A zero-length
    /// take is not an error: stopping immediately after starting yields
    /// an empty sample buffer, which callers may still treat as a
    /// captured take.
    ///
    /// # Errors
    ///
    /// Returns [`AudioError::NoActiveCapture`] when no capture is live.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn stop(&mut self) -> CoreResult<Vec<f32>> {
        let stream = self.stream.take().ok_or(AudioError::NoActiveCapture {
            location: ErrorLocation::from(Location::caller()),
        })?;

        // Signal the callback before dropping the stream, so a callback
        // racing the drop cannot write after the lock below is taken.
        self.shutdown.store(true, Ordering::Release);
        drop(stream);
        // Brief yield so an in-flight callback observes the shutdown flag.
        // On most cpal backends drop() joins the audio thread and this is
        // redundant; it guarantees correctness on backends where it isn't.
        std::thread::sleep(std::time::Duration::from_millis(5));
        info!("Audio capture stopped, device released");

        let samples: Vec<f32> = self
            .samples
            .lock()
            .map_err(|e| AudioError::DeviceError {
                reason: format!("Failed to lock samples: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?
            .iter()
            .copied()
            .collect();

        debug!(sample_count = samples.len(), "Captured take samples");

        Ok(samples)
    }

    /// Native sample rate of the input device.
    pub fn sample_rate(&self) -> u32 {
        self.config.sample_rate
    }

    /// Channel count of the input device.
    pub fn channels(&self) -> u16 {
        self.config.channels
    }
}

use crate::{AudioError, CoreResult};

use std::{io::Cursor, panic::Location};

use error_location::ErrorLocation;
use tracing::debug;
use uuid::Uuid;

/// One captured take: the raw samples for a single chunk recording.
///
/// A take is the in-memory analog of an uploaded audio file. It is
/// created when capture stops and dropped when the speaker re-records,
/// navigates to another chunk, or the upload succeeds.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioTake {
    /// Unique take ID for log correlation.
    pub id: Uuid,
    /// Interleaved f32 samples as delivered by the input device.
    pub samples: Vec<f32>,
    /// Sample rate of `samples`.
    pub sample_rate: u32,
    /// Channel count of `samples`.
    pub channels: u16,
}

impl AudioTake {
    /// Wraps captured samples in a new take.
    pub fn new(samples: Vec<f32>, sample_rate: u32, channels: u16) -> Self {
        Self {
            id: Uuid::new_v4(),
            samples,
            sample_rate,
            channels,
        }
    }

    /// Whether the take holds no samples.
    ///
    /// Empty takes exist: stopping capture immediately after starting it
    /// still produces a take. Upload refuses them at the workflow layer.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Duration of the take in seconds.
    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 || self.channels == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / f64::from(self.sample_rate) / f64::from(self.channels)
    }

    /// Encodes the take as a 16-bit PCM WAV file in memory.
    ///
    /// This is the byte payload sent as `audio_file` in the recording
    /// upload. An empty take still encodes to a valid header-only WAV.
    ///
    /// # Errors
    ///
    /// Returns [`AudioError::EncodingError`] when the WAV writer fails.
    #[track_caller]
    pub fn to_wav_bytes(&self) -> CoreResult<Vec<u8>> {
        let spec = hound::WavSpec {
            channels: self.channels,
            sample_rate: self.sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };

        let mut cursor = Cursor::new(Vec::new());
        let mut writer =
            hound::WavWriter::new(&mut cursor, spec).map_err(|e| AudioError::EncodingError {
                reason: format!("Failed to create WAV writer: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        for &sample in &self.samples {
            writer
                .write_sample(f32_to_i16(sample))
                .map_err(|e| AudioError::EncodingError {
                    reason: format!("Failed to write sample: {}", e),
                    location: ErrorLocation::from(Location::caller()),
                })?;
        }

        writer.finalize().map_err(|e| AudioError::EncodingError {
            reason: format!("Failed to finalize WAV: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let bytes = cursor.into_inner();
        debug!(
            take_id = %self.id,
            byte_len = bytes.len(),
            sample_count = self.samples.len(),
            "Take encoded as WAV"
        );

        Ok(bytes)
    }
}

/// Converts one f32 sample in [-1.0, 1.0] to i16, clamping out-of-range
/// input from misbehaving devices instead of wrapping.
pub(crate) fn f32_to_i16(sample: f32) -> i16 {
    let clamped = sample.clamp(-1.0, 1.0);
    (clamped * f32::from(i16::MAX)) as i16
}

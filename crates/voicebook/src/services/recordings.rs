use crate::{AppResult, api::ApiClient, models::Recording};

use std::{panic::Location, sync::Arc};

use chrono::Utc;
use error_location::ErrorLocation;
use reqwest::multipart::{Form, Part};
use tracing::instrument;

/// Recording endpoints.
pub struct RecordingsService {
    api: Arc<ApiClient>,
}

impl RecordingsService {
    /// Creates the service over a shared transport.
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// Uploads one take as the recording for a chunk.
    ///
    /// The WAV bytes go up as the multipart field `audio_file` under a
    /// timestamp-based filename; the server creates the [`Recording`]
    /// and flips the chunk's recorded flag.
    #[instrument(skip(self, wav_bytes), fields(byte_len = wav_bytes.len()))]
    pub async fn upload(&self, chunk_id: i64, wav_bytes: Vec<u8>) -> AppResult<Recording> {
        let file_name = format!("recording-{}.wav", Utc::now().timestamp_millis());
        let part = Part::bytes(wav_bytes)
            .file_name(file_name)
            .mime_str("audio/wav")
            .map_err(|e| crate::AppError::Http {
                reason: format!("Failed to build multipart body: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;
        let form = Form::new().part("audio_file", part);

        self.api
            .upload_multipart(&format!("/recordings/chunks/{}/record", chunk_id), form)
            .await
    }

    /// Lists the recordings stored for a chunk.
    #[instrument(skip(self))]
    pub async fn chunk_recordings(&self, chunk_id: i64) -> AppResult<Vec<Recording>> {
        self.api
            .get(&format!("/recordings/chunks/{}", chunk_id))
            .await
    }

    /// Fetches one recording.
    #[instrument(skip(self))]
    pub async fn get(&self, recording_id: i64) -> AppResult<Recording> {
        self.api.get(&format!("/recordings/{}", recording_id)).await
    }
}

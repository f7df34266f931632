//! Recording workflow engine.
//!
//! Drives a speaker through a book one chunk at a time: capture, local
//! review, upload, advance. The engine is a pure state machine over the
//! in-memory chunk sequence; device and network side effects live in the
//! app layer, which calls these transitions around them. That split is
//! what makes every invariant below assertable without a microphone or
//! a backend.
//!
//! Policy worth stating once: navigating between chunks unconditionally
//! discards any in-progress or captured-but-unuploaded take. Partial
//! work is never silently carried across chunks.

use crate::{
    AppError, AppResult,
    models::{Book, Chunk},
};

use std::panic::Location;

use error_location::ErrorLocation;
use tracing::{debug, info, instrument, warn};
use voicebook_core::AudioTake;

/// The ephemeral per-chunk capture session.
///
/// Exactly one exists at a time, scoped to the currently selected chunk.
#[derive(Debug, Clone, PartialEq)]
pub enum CaptureState {
    /// No take in progress.
    Idle,
    /// Microphone live, samples buffering.
    Recording,
    /// A take exists locally and awaits review, re-record, or upload.
    Captured(AudioTake),
    /// The captured take is on its way to the backend. The take is
    /// retained so a failed upload can be retried without re-recording.
    Uploading(AudioTake),
}

impl CaptureState {
    /// Short label for status display and logs.
    pub fn label(&self) -> &'static str {
        match self {
            CaptureState::Idle => "idle",
            CaptureState::Recording => "recording",
            CaptureState::Captured(_) => "captured",
            CaptureState::Uploading(_) => "uploading",
        }
    }
}

/// Ordered traversal of one book's chunks with a capture session.
pub struct RecordingWorkflow {
    book: Book,
    chunks: Vec<Chunk>,
    current: usize,
    capture: CaptureState,
}

impl RecordingWorkflow {
    /// Opens a workflow over a book's full chunk sequence.
    ///
    /// The sequence is fetched once per recording session and never
    /// re-fetched; progress is derived from this in-memory copy.
    pub fn new(book: Book, chunks: Vec<Chunk>) -> Self {
        info!(
            book_id = book.id,
            chunk_count = chunks.len(),
            "Recording workflow opened"
        );
        Self {
            book,
            chunks,
            current: 0,
            capture: CaptureState::Idle,
        }
    }

    /// The book being recorded.
    pub fn book(&self) -> &Book {
        &self.book
    }

    /// The chunk currently on screen.
    pub fn current_chunk(&self) -> Option<&Chunk> {
        self.chunks.get(self.current)
    }

    /// Zero-based index of the current chunk.
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Total chunk count.
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// The capture session state.
    pub fn capture_state(&self) -> &CaptureState {
        &self.capture
    }

    /// Whether the microphone is live.
    pub fn is_recording(&self) -> bool {
        matches!(self.capture, CaptureState::Recording)
    }

    /// Number of chunks recorded, per the local sequence.
    pub fn recorded_count(&self) -> usize {
        self.chunks.iter().filter(|c| c.is_recorded).count()
    }

    /// Recorded share in percent, from the live in-memory sequence.
    /// An empty book reports 0 rather than dividing by zero.
    pub fn progress_percent(&self) -> f64 {
        if self.chunks.is_empty() {
            return 0.0;
        }
        self.recorded_count() as f64 / self.chunks.len() as f64 * 100.0
    }

    /// Marks the capture session as recording.
    ///
    /// The caller acquires the device first; this transition only runs
    /// after the microphone is live, so a denied device leaves the
    /// session idle without touching the machine.
    ///
    /// # Errors
    ///
    /// [`AppError::InvalidState`] unless the session is idle: a captured
    /// take must be explicitly discarded (re-record) or uploaded before
    /// a new recording may start.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn begin_recording(&mut self) -> AppResult<()> {
        match self.capture {
            CaptureState::Idle => {
                self.capture = CaptureState::Recording;
                info!(chunk_index = self.current, "Recording started");
                Ok(())
            }
            _ => Err(AppError::InvalidState {
                reason: format!(
                    "Cannot start recording while {}",
                    self.capture.label()
                ),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }

    /// Installs the captured take. Always succeeds from the recording
    /// state, even for a zero-length capture.
    ///
    /// # Errors
    ///
    /// [`AppError::InvalidState`] when nothing was recording.
    #[track_caller]
    #[instrument(skip(self, take), fields(take_id = %take.id))]
    pub fn finish_recording(&mut self, take: AudioTake) -> AppResult<()> {
        match self.capture {
            CaptureState::Recording => {
                info!(
                    chunk_index = self.current,
                    duration_secs = take.duration_secs(),
                    "Take captured"
                );
                self.capture = CaptureState::Captured(take);
                Ok(())
            }
            _ => Err(AppError::InvalidState {
                reason: format!("Cannot finish recording while {}", self.capture.label()),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }

    /// Drops the capture session back to idle.
    ///
    /// Returns whether a take (or live recording) was thrown away, so
    /// the caller can release the playback handle and the device on
    /// every discard path, not just the happy one.
    #[instrument(skip(self))]
    pub fn discard_capture(&mut self) -> bool {
        let had_work = !matches!(self.capture, CaptureState::Idle);
        if had_work {
            debug!(
                chunk_index = self.current,
                state = self.capture.label(),
                "Capture session discarded"
            );
        }
        self.capture = CaptureState::Idle;
        had_work
    }

    /// Moves the captured take into the uploading state and exposes it
    /// for encoding.
    ///
    /// Upload targets the chunk that was active when recording started;
    /// navigation discards captures, so that is always the chunk
    /// currently on screen.
    ///
    /// # Errors
    ///
    /// [`AppError::InvalidState`] unless a non-empty take is captured.
    /// An empty take stays captured so the speaker can re-record.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn begin_upload(&mut self) -> AppResult<&AudioTake> {
        match std::mem::replace(&mut self.capture, CaptureState::Idle) {
            CaptureState::Captured(take) if !take.is_empty() => {
                self.capture = CaptureState::Uploading(take);
                match &self.capture {
                    CaptureState::Uploading(take) => Ok(take),
                    // Unreachable: assigned Uploading on the line above.
                    _ => Err(AppError::InvalidState {
                        reason: "Upload state lost".to_string(),
                        location: ErrorLocation::from(Location::caller()),
                    }),
                }
            }
            other => {
                let label = other.label();
                let empty = matches!(&other, CaptureState::Captured(t) if t.is_empty());
                self.capture = other;
                Err(AppError::InvalidState {
                    reason: if empty {
                        "Cannot upload an empty take".to_string()
                    } else {
                        format!("Cannot upload while {}", label)
                    },
                    location: ErrorLocation::from(Location::caller()),
                })
            }
        }
    }

    /// Completes an upload attempt.
    ///
    /// Success applies the one optimistic local mutation in the system:
    /// the current chunk's recorded flag flips true without a re-fetch,
    /// the session clears, and the view advances to the next chunk (the
    /// terminal chunk stays put). Failure returns the session to
    /// captured with the take retained for retry.
    #[instrument(skip(self))]
    pub fn finish_upload(&mut self, success: bool) {
        match std::mem::replace(&mut self.capture, CaptureState::Idle) {
            CaptureState::Uploading(take) => {
                if success {
                    if let Some(chunk) = self.chunks.get_mut(self.current) {
                        chunk.is_recorded = true;
                    }
                    info!(
                        chunk_index = self.current,
                        recorded = self.recorded_count(),
                        total = self.chunks.len(),
                        "Upload confirmed"
                    );
                    if self.current + 1 < self.chunks.len() {
                        self.current += 1;
                    }
                } else {
                    warn!(chunk_index = self.current, "Upload failed, take retained");
                    self.capture = CaptureState::Captured(take);
                }
            }
            other => {
                // Nothing was uploading; leave the state untouched.
                self.capture = other;
            }
        }
    }

    /// Steps to the previous chunk, discarding any capture first.
    ///
    /// Returns whether a take or live recording was thrown away.
    /// Bounded at the first chunk.
    #[instrument(skip(self))]
    pub fn go_previous(&mut self) -> bool {
        let discarded = self.discard_capture();
        if self.current > 0 {
            self.current -= 1;
        }
        discarded
    }

    /// Steps to the next chunk, discarding any capture first.
    ///
    /// Returns whether a take or live recording was thrown away.
    /// Bounded at the last chunk.
    #[instrument(skip(self))]
    pub fn go_next(&mut self) -> bool {
        let discarded = self.discard_capture();
        if self.current + 1 < self.chunks.len() {
            self.current += 1;
        }
        discarded
    }
}

use crate::{
    AppResult,
    api::ApiClient,
    models::{BookAssignment, BookAssignmentCreate, BookWithSpeakers, SpeakerWithBooks, User},
};

use std::sync::Arc;

use tracing::instrument;

/// Book-to-speaker assignment endpoints.
pub struct AssignmentsService {
    api: Arc<ApiClient>,
}

impl AssignmentsService {
    /// Creates the service over a shared transport.
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// Assigns a book to a speaker.
    #[instrument(skip(self))]
    pub async fn assign(&self, book_id: i64, speaker_id: i64) -> AppResult<BookAssignment> {
        let assignment = BookAssignmentCreate {
            book_id,
            speaker_id,
        };
        self.api.post("/assignments/assign", &assignment).await
    }

    /// Removes a book-to-speaker assignment.
    #[instrument(skip(self))]
    pub async fn unassign(&self, book_id: i64, speaker_id: i64) -> AppResult<()> {
        self.api
            .delete(&format!("/assignments/assign/{}/{}", book_id, speaker_id))
            .await
    }

    /// Lists the speakers assigned to a book.
    #[instrument(skip(self))]
    pub async fn book_speakers(&self, book_id: i64) -> AppResult<BookWithSpeakers> {
        self.api
            .get(&format!("/assignments/book/{}/speakers", book_id))
            .await
    }

    /// Lists the books assigned to a speaker.
    #[instrument(skip(self))]
    pub async fn speaker_books(&self, speaker_id: i64) -> AppResult<SpeakerWithBooks> {
        self.api
            .get(&format!("/assignments/speaker/{}/books", speaker_id))
            .await
    }

    /// Lists all speaker accounts.
    #[instrument(skip(self))]
    pub async fn all_speakers(&self) -> AppResult<Vec<User>> {
        self.api.get("/assignments/speakers").await
    }
}

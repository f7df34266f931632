use crate::{
    AppResult,
    api::ApiClient,
    models::{Chunk, ChunkPage},
};

use std::sync::Arc;

use tracing::instrument;

/// Page size used to pull a whole book's chunks in one request for a
/// recording session. The review surfaces paginate at 20; the workflow
/// deliberately does not paginate mid-recording.
pub(crate) const RECORDING_FETCH_LIMIT: i64 = 1000;

/// Chunk listing endpoints.
pub struct ChunksService {
    api: Arc<ApiClient>,
}

impl ChunksService {
    /// Creates the service over a shared transport.
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// Lists one page of a book's chunks, ordered by `order_index`.
    #[instrument(skip(self))]
    pub async fn book_chunks(&self, book_id: i64, skip: i64, limit: i64) -> AppResult<ChunkPage> {
        self.api
            .get(&format!(
                "/chunks/books/{}/chunks?skip={}&limit={}",
                book_id, skip, limit
            ))
            .await
    }

    /// Pulls the whole chunk sequence for a recording session.
    #[instrument(skip(self))]
    pub async fn all_book_chunks(&self, book_id: i64) -> AppResult<Vec<Chunk>> {
        let page = self
            .book_chunks(book_id, 0, RECORDING_FETCH_LIMIT)
            .await?;
        Ok(page.items)
    }

    /// Fetches one chunk.
    #[instrument(skip(self))]
    pub async fn get(&self, chunk_id: i64) -> AppResult<Chunk> {
        self.api.get(&format!("/chunks/{}", chunk_id)).await
    }
}

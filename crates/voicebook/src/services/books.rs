use crate::{AppResult, api::ApiClient, models::Book};

use std::sync::Arc;

use reqwest::multipart::{Form, Part};
use tracing::instrument;

/// Book administration endpoints.
pub struct BooksService {
    api: Arc<ApiClient>,
}

impl BooksService {
    /// Creates the service over a shared transport.
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// Lists books, paginated, optionally filtered by category.
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        skip: i64,
        limit: i64,
        category_id: Option<i64>,
    ) -> AppResult<Vec<Book>> {
        let mut endpoint = format!("/books?skip={}&limit={}", skip, limit);
        if let Some(category_id) = category_id {
            endpoint.push_str(&format!("&category_id={}", category_id));
        }
        self.api.get(&endpoint).await
    }

    /// Fetches one book.
    #[instrument(skip(self))]
    pub async fn get(&self, book_id: i64) -> AppResult<Book> {
        self.api.get(&format!("/books/{}", book_id)).await
    }

    /// Uploads a source file as a new book (multipart).
    #[instrument(skip(self, file_bytes), fields(byte_len = file_bytes.len()))]
    pub async fn upload(
        &self,
        file_name: &str,
        file_bytes: Vec<u8>,
        category_id: i64,
        title: Option<&str>,
    ) -> AppResult<Book> {
        let mut form = Form::new()
            .part("file", Part::bytes(file_bytes).file_name(file_name.to_string()))
            .text("category_id", category_id.to_string());
        if let Some(title) = title {
            form = form.text("title", title.to_string());
        }
        self.api.upload_multipart("/books/upload", form).await
    }

    /// Deletes a book.
    #[instrument(skip(self))]
    pub async fn delete(&self, book_id: i64) -> AppResult<()> {
        self.api.delete(&format!("/books/{}", book_id)).await
    }
}

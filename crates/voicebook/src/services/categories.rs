use crate::{
    AppResult,
    api::ApiClient,
    models::{Category, CategoryCreate},
};

use std::sync::Arc;

use tracing::instrument;

/// Category administration endpoints.
pub struct CategoriesService {
    api: Arc<ApiClient>,
}

impl CategoriesService {
    /// Creates the service over a shared transport.
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// Lists categories, paginated.
    #[instrument(skip(self))]
    pub async fn list(&self, skip: i64, limit: i64) -> AppResult<Vec<Category>> {
        self.api
            .get(&format!("/categories?skip={}&limit={}", skip, limit))
            .await
    }

    /// Fetches one category.
    #[instrument(skip(self))]
    pub async fn get(&self, category_id: i64) -> AppResult<Category> {
        self.api.get(&format!("/categories/{}", category_id)).await
    }

    /// Creates a category.
    #[instrument(skip(self, category), fields(name = %category.name))]
    pub async fn create(&self, category: &CategoryCreate) -> AppResult<Category> {
        self.api.post("/categories", category).await
    }

    /// Updates a category.
    #[instrument(skip(self, category))]
    pub async fn update(&self, category_id: i64, category: &CategoryCreate) -> AppResult<Category> {
        self.api
            .put(&format!("/categories/{}", category_id), category)
            .await
    }

    /// Deletes a category.
    #[instrument(skip(self))]
    pub async fn delete(&self, category_id: i64) -> AppResult<()> {
        self.api
            .delete(&format!("/categories/{}", category_id))
            .await
    }
}

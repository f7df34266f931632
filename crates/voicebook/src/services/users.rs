use crate::{
    AppResult,
    api::ApiClient,
    models::{User, UserCreate},
};

use std::sync::Arc;

use tracing::instrument;

/// User administration endpoints.
pub struct UsersService {
    api: Arc<ApiClient>,
}

impl UsersService {
    /// Creates the service over a shared transport.
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// Lists accounts, paginated.
    #[instrument(skip(self))]
    pub async fn list(&self, skip: i64, limit: i64) -> AppResult<Vec<User>> {
        self.api
            .get(&format!("/users?skip={}&limit={}", skip, limit))
            .await
    }

    /// Fetches one account.
    #[instrument(skip(self))]
    pub async fn get(&self, user_id: i64) -> AppResult<User> {
        self.api.get(&format!("/users/{}", user_id)).await
    }

    /// Creates an account.
    #[instrument(skip(self, user), fields(username = %user.username))]
    pub async fn create(&self, user: &UserCreate) -> AppResult<User> {
        self.api.post("/users", user).await
    }

    /// Deletes an account.
    #[instrument(skip(self))]
    pub async fn delete(&self, user_id: i64) -> AppResult<()> {
        self.api.delete(&format!("/users/{}", user_id)).await
    }
}

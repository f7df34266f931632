use crate::{
    AppResult,
    api::ApiClient,
    models::{Credentials, LoginResponse, User},
};

use std::sync::Arc;

use tracing::instrument;

/// Authentication endpoints.
pub struct AuthService {
    api: Arc<ApiClient>,
}

impl AuthService {
    /// Creates the service over a shared transport.
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// Exchanges credentials for a session cookie.
    ///
    /// The cookie lands in the transport's cookie store; the returned
    /// user is what the session store installs.
    #[instrument(skip(self, password))]
    pub async fn login(&self, username: &str, password: &str) -> AppResult<User> {
        let credentials = Credentials {
            username: username.to_string(),
            password: password.to_string(),
        };
        let response: LoginResponse = self.api.post("/auth/login", &credentials).await?;
        Ok(response.user)
    }

    /// Invalidates the session server-side.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> AppResult<()> {
        self.api.post_unit("/auth/logout").await
    }
}

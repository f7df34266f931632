//! Session store: the single owner of the authenticated identity.
//!
//! At most one session exists per process. It is installed by a
//! successful login or the startup identity probe, and cleared by
//! logout or a session-invalidated event from the transport.

use crate::{
    AppResult,
    models::User,
    services::{AuthService, UsersService},
};

use tracing::{info, instrument, warn};

/// Holds the current authenticated identity, if any.
pub struct SessionStore {
    user: Option<User>,
}

impl SessionStore {
    /// Starts anonymous.
    pub fn new() -> Self {
        Self { user: None }
    }

    /// Builds a store with an installed session, bypassing the backend.
    #[cfg(test)]
    pub(crate) fn with_session(user: User) -> Self {
        Self { user: Some(user) }
    }

    /// The current session's user, or none when anonymous.
    pub fn current(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Exchanges credentials for a session and installs it.
    ///
    /// Invalid credentials surface as the transport's API error; no
    /// retry is attempted.
    #[instrument(skip(self, auth, password))]
    pub async fn login(
        &mut self,
        auth: &AuthService,
        username: &str,
        password: &str,
    ) -> AppResult<&User> {
        let user = auth.login(username, password).await?;
        info!(user_id = user.id, role = %user.role, "Session installed");
        Ok(self.user.insert(user))
    }

    /// Startup identity probe: hydrates the session when a live cookie
    /// exists from a previous run.
    ///
    /// Preserved quirk of the original client: the probe asks
    /// `/users?limit=1` and takes the first user; every failure,
    /// including 401, resolves to anonymous.
    #[instrument(skip(self, users))]
    pub async fn probe(&mut self, users: &UsersService) -> Option<&User> {
        match users.list(0, 1).await {
            Ok(list) => {
                if let Some(user) = list.into_iter().next() {
                    info!(user_id = user.id, "Session hydrated from probe");
                    self.user = Some(user);
                } else {
                    self.user = None;
                }
            }
            Err(_) => {
                self.user = None;
            }
        }
        self.user.as_ref()
    }

    /// Clears the session and notifies the backend.
    ///
    /// The local session is dropped even when the backend call fails:
    /// logout must always leave the client anonymous.
    #[instrument(skip(self, auth))]
    pub async fn logout(&mut self, auth: &AuthService) {
        if let Err(e) = auth.logout().await {
            warn!(error = ?e, "Backend logout failed, clearing session anyway");
        }
        self.user = None;
        info!("Session cleared");
    }

    /// Drops the session without notifying the backend.
    ///
    /// Called by the session-invalidated subscriber: the backend already
    /// rejected the cookie, there is nothing left to notify.
    pub fn invalidate(&mut self) {
        if self.user.take().is_some() {
            info!("Session invalidated");
        }
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

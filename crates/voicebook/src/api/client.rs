//! HTTP transport for the studio backend.
//!
//! One capability: issue a request with a JSON or multipart body, session
//! cookie attached, and classify the outcome. Every call is fire-once --
//! no retries, no timeouts, no backoff. That is the backend contract for
//! this low-traffic internal tool, reproduced as-is.
//!
//! A 401 from any request is not a normal rejection: the transport
//! publishes [`SessionInvalidated`] on a watch channel and fails with
//! [`AppError::Unauthorized`]. The single top-level subscriber owns the
//! reaction (dropping to the login route); the transport itself performs
//! no navigation side effects, which keeps it testable in isolation.

use crate::{AppError, AppResult};

use std::panic::Location;

use error_location::ErrorLocation;
use reqwest::{Response, StatusCode, multipart::Form};
use serde::{Serialize, de::DeserializeOwned};
use tokio::sync::watch;
use tracing::{debug, instrument, warn};

/// Event published when the backend rejects the session cookie.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionInvalidated;

/// Transport over one cookie-carrying [`reqwest::Client`].
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    invalidated_tx: watch::Sender<Option<SessionInvalidated>>,
}

impl ApiClient {
    /// Builds the transport for `base_url` (no trailing slash).
    ///
    /// Returns the receiver half of the session-invalidation channel;
    /// exactly one top-level subscriber should watch it.
    ///
    /// # Errors
    ///
    /// Fails when the underlying HTTP client cannot be constructed.
    #[track_caller]
    pub fn new(
        base_url: &str,
    ) -> AppResult<(Self, watch::Receiver<Option<SessionInvalidated>>)> {
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .map_err(|e| AppError::Http {
                reason: format!("Failed to build HTTP client: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        let (invalidated_tx, invalidated_rx) = watch::channel(None);

        Ok((
            Self {
                http,
                base_url: base_url.trim_end_matches('/').to_string(),
                invalidated_tx,
            },
            invalidated_rx,
        ))
    }

    /// GET expecting a JSON body.
    #[instrument(skip(self))]
    pub async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> AppResult<T> {
        let response = self.http.get(self.url(endpoint)).send().await?;
        self.json(response).await
    }

    /// POST with a JSON body, expecting a JSON body back.
    #[instrument(skip(self, body))]
    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> AppResult<T> {
        let response = self.http.post(self.url(endpoint)).json(body).send().await?;
        self.json(response).await
    }

    /// POST with no body, discarding any response body.
    #[instrument(skip(self))]
    pub async fn post_unit(&self, endpoint: &str) -> AppResult<()> {
        let response = self.http.post(self.url(endpoint)).send().await?;
        self.unit(response).await
    }

    /// PUT with a JSON body, expecting a JSON body back.
    #[instrument(skip(self, body))]
    pub async fn put<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> AppResult<T> {
        let response = self.http.put(self.url(endpoint)).json(body).send().await?;
        self.json(response).await
    }

    /// DELETE, discarding any response body (the backend answers 204).
    #[instrument(skip(self))]
    pub async fn delete(&self, endpoint: &str) -> AppResult<()> {
        let response = self.http.delete(self.url(endpoint)).send().await?;
        self.unit(response).await
    }

    /// POST a multipart form, expecting a JSON body back.
    #[instrument(skip(self, form))]
    pub async fn upload_multipart<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        form: Form,
    ) -> AppResult<T> {
        let response = self
            .http
            .post(self.url(endpoint))
            .multipart(form)
            .send()
            .await?;
        self.json(response).await
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// Classifies a response and parses its JSON body.
    async fn json<T: DeserializeOwned>(&self, response: Response) -> AppResult<T> {
        let response = self.check(response).await?;
        let parsed = response.json::<T>().await.map_err(|e| AppError::Http {
            reason: format!("Failed to parse response body: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;
        Ok(parsed)
    }

    /// Classifies a response and drops its body (204 or otherwise).
    async fn unit(&self, response: Response) -> AppResult<()> {
        let _ = self.check(response).await?;
        Ok(())
    }

    /// Uniform outcome classification for every request.
    pub(crate) async fn check(&self, response: Response) -> AppResult<Response> {
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            // Fatal to the whole app view, not a per-call rejection.
            // Callers above this layer never branch on 401.
            warn!("Backend rejected session, publishing invalidation");
            let _ = self.invalidated_tx.send(Some(SessionInvalidated));
            return Err(AppError::Unauthorized {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = error_message(status.as_u16(), &body);
            return Err(AppError::Api {
                status: status.as_u16(),
                message,
                location: ErrorLocation::from(Location::caller()),
            });
        }

        debug!(status = status.as_u16(), "Request succeeded");
        Ok(response)
    }
}

/// Extracts a human-readable message from an error response body.
///
/// Precedence: structured `detail` field, then `message`, then the raw
/// body text, then a generic `HTTP <status>` fallback.
pub(crate) fn error_message(status: u16, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for field in ["detail", "message"] {
            if let Some(text) = value.get(field).and_then(|v| v.as_str()) {
                if !text.is_empty() {
                    return text.to_string();
                }
            }
        }
    }

    if !body.trim().is_empty() {
        return body.trim().to_string();
    }

    format!("HTTP {}", status)
}

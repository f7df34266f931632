//! HTTP transport for the studio backend.

mod client;

pub use client::{ApiClient, SessionInvalidated};

#[cfg(test)]
pub(crate) use client::error_message;

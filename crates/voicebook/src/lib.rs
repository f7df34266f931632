//! Voicebook: client library and console for a chunk-by-chunk audiobook
//! recording studio.
//!
//! Admins manage users, categories, books, and speaker assignments
//! through the typed [`services`]; speakers record their assigned books
//! one chunk at a time through the [`workflow`] engine. Everything talks
//! to the studio backend over the cookie-carrying [`api`] transport,
//! which treats a 401 anywhere as fatal to the whole view.

pub mod api;
mod app;
mod app_command;
pub mod config;
mod error;
pub mod models;
pub mod routes;
pub mod services;
mod session;
pub mod workflow;

pub use {
    app::App,
    app_command::AppCommand,
    error::{AppError, Result as AppResult},
    session::SessionStore,
};

#[cfg(test)]
mod tests;

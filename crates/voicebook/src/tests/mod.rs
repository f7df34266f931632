#![allow(clippy::unwrap_used, clippy::panic)]

mod api;
mod app_command;
mod models;
mod routes;
mod session;

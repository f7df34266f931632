//! Typed request builders over the transport, one per backend resource.
//!
//! Pure glue: each service formats endpoints and payloads for one
//! resource family and defers all outcome handling to the transport.

mod assignments;
mod auth;
mod books;
mod categories;
mod chunks;
mod recordings;
mod users;

pub use {
    assignments::AssignmentsService, auth::AuthService, books::BooksService,
    categories::CategoriesService, chunks::ChunksService, recordings::RecordingsService,
    users::UsersService,
};

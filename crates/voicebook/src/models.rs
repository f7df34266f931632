//! Serde models of the backend REST contract.
//!
//! These mirror the JSON bodies produced and consumed by the studio
//! backend; the client never mutates server-owned records directly.

use serde::{Deserialize, Serialize};

/// Account role. Closed set: every route decision is an exhaustive match
/// on this enum, never a string comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Manages users, categories, books, and assignments.
    Admin,
    /// Records audio for assigned books only.
    Speaker,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Admin => write!(f, "admin"),
            Role::Speaker => write!(f, "speaker"),
        }
    }
}

/// An account as returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Server-assigned ID.
    pub id: i64,
    /// Login name.
    pub username: String,
    /// Account role.
    pub role: Role,
}

/// Payload for creating an account.
#[derive(Debug, Clone, Serialize)]
pub struct UserCreate {
    /// Login name.
    pub username: String,
    /// Initial password.
    pub password: String,
    /// Account role.
    pub role: Role,
}

/// Login request body.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    /// Login name.
    pub username: String,
    /// Password.
    pub password: String,
}

/// Login response body.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    /// Human-readable status message.
    pub message: String,
    /// The authenticated account.
    pub user: User,
}

/// A book category.
#[derive(Debug, Clone, Deserialize)]
pub struct Category {
    /// Server-assigned ID.
    pub id: i64,
    /// Category name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Creation timestamp.
    pub created_at: String,
    /// Last update timestamp.
    pub updated_at: Option<String>,
}

/// Payload for creating or updating a category.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CategoryCreate {
    /// Category name.
    pub name: String,
    /// Optional description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A book, read-only from the workflow's perspective.
#[derive(Debug, Clone, Deserialize)]
pub struct Book {
    /// Server-assigned ID.
    pub id: i64,
    /// Display title.
    pub title: String,
    /// Name of the uploaded source file.
    pub original_filename: String,
    /// Source file type (txt, epub, ...).
    pub file_type: String,
    /// Owning category.
    pub category_id: i64,
    /// Creation timestamp.
    pub created_at: String,
    /// Last update timestamp.
    pub updated_at: Option<String>,
}

/// One contiguous span of a book's text requiring a single recorded take.
#[derive(Debug, Clone, Deserialize)]
pub struct Chunk {
    /// Server-assigned ID.
    pub id: i64,
    /// Owning book.
    pub book_id: i64,
    /// The text to read.
    pub text: String,
    /// Position within the book; chunks arrive ordered by this.
    pub order_index: i64,
    /// Server-side reading time estimate in seconds.
    pub estimated_duration: Option<f64>,
    /// Whether a recording exists server-side. Flipped locally after a
    /// confirmed upload, never re-fetched during a recording session.
    pub is_recorded: bool,
    /// Path of the recorded audio, when present.
    pub audio_file_path: Option<String>,
    /// Creation timestamp.
    pub created_at: String,
    /// Last update timestamp.
    pub updated_at: Option<String>,
}

/// One page of a book's chunk listing.
#[derive(Debug, Clone, Deserialize)]
pub struct ChunkPage {
    /// Chunks in this page, ordered by `order_index`.
    pub items: Vec<Chunk>,
    /// Total chunk count for the book.
    pub total: i64,
    /// Offset this page starts at.
    pub skip: i64,
    /// Requested page size.
    pub limit: i64,
    /// Whether more pages follow.
    pub has_more: bool,
}

/// A recording, created server-side by an upload.
#[derive(Debug, Clone, Deserialize)]
pub struct Recording {
    /// Server-assigned ID.
    pub id: i64,
    /// Chunk this recording belongs to.
    pub chunk_id: i64,
    /// Speaker who recorded it.
    pub speaker_id: i64,
    /// Server-side path of the audio file.
    pub audio_file_path: String,
    /// Duration in seconds, when the server could measure it.
    pub duration: Option<f64>,
    /// Creation timestamp.
    pub created_at: String,
    /// Last update timestamp.
    pub updated_at: Option<String>,
}

/// Payload assigning a book to a speaker.
#[derive(Debug, Clone, Serialize)]
pub struct BookAssignmentCreate {
    /// Book to assign.
    pub book_id: i64,
    /// Speaker receiving the assignment.
    pub speaker_id: i64,
}

/// A book-to-speaker assignment.
#[derive(Debug, Clone, Deserialize)]
pub struct BookAssignment {
    /// Server-assigned ID.
    pub id: i64,
    /// Assigned book.
    pub book_id: i64,
    /// Assigned speaker.
    pub speaker_id: i64,
    /// Assignment timestamp.
    pub assigned_at: String,
}

/// Speaker identity embedded in assignment listings.
#[derive(Debug, Clone, Deserialize)]
pub struct SpeakerInfo {
    /// Server-assigned ID.
    pub id: i64,
    /// Login name.
    pub username: String,
    /// Role string as the assignment endpoint reports it.
    pub role: String,
}

/// A book together with its assigned speakers.
#[derive(Debug, Clone, Deserialize)]
pub struct BookWithSpeakers {
    /// The book.
    #[serde(flatten)]
    pub book: Book,
    /// Speakers assigned to it.
    pub assigned_speakers: Vec<SpeakerInfo>,
}

/// Book identity embedded in a speaker's assignment listing.
#[derive(Debug, Clone, Deserialize)]
pub struct BookInfo {
    /// Server-assigned ID.
    pub id: i64,
    /// Display title.
    pub title: String,
    /// Name of the uploaded source file.
    pub original_filename: String,
    /// Source file type.
    pub file_type: String,
    /// Owning category.
    pub category_id: i64,
}

/// A speaker together with their assigned books.
#[derive(Debug, Clone, Deserialize)]
pub struct SpeakerWithBooks {
    /// The speaker's account.
    #[serde(flatten)]
    pub user: User,
    /// Books assigned to them.
    pub assigned_books: Vec<BookInfo>,
}

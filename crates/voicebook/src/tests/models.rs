use crate::models::{ChunkPage, Role, SpeakerWithBooks, User};

/// WHAT: Roles serialize to the backend's lowercase strings
/// WHY: The wire contract uses "admin"/"speaker"
#[test]
fn given_roles_when_round_tripping_serde_then_lowercase_strings() {
    assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), r#""admin""#);
    assert_eq!(
        serde_json::to_string(&Role::Speaker).unwrap(),
        r#""speaker""#
    );

    let user: User =
        serde_json::from_str(r#"{"id": 3, "username": "sam", "role": "speaker"}"#).unwrap();
    assert_eq!(user.role, Role::Speaker);

    // Unknown role strings are rejected, not coerced
    let bad = serde_json::from_str::<User>(r#"{"id": 3, "username": "sam", "role": "root"}"#);
    assert!(bad.is_err());
}

/// WHAT: Chunk pages deserialize with their pagination envelope
/// WHY: The workflow trusts `items` order and `has_more`
#[test]
fn given_paginated_response_when_deserializing_then_envelope_preserved() {
    let body = r#"{
        "items": [{
            "id": 11, "book_id": 7, "text": "Once upon a time",
            "order_index": 0, "estimated_duration": 3.5,
            "is_recorded": false, "audio_file_path": null,
            "created_at": "2024-01-01T00:00:00Z", "updated_at": null
        }],
        "total": 41, "skip": 0, "limit": 20, "has_more": true
    }"#;

    let page: ChunkPage = serde_json::from_str(body).unwrap();
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].order_index, 0);
    assert!(!page.items[0].is_recorded);
    assert_eq!(page.total, 41);
    assert!(page.has_more);
}

/// WHAT: Assignment listings flatten the user alongside their books
/// WHY: The backend embeds the account fields at the top level
#[test]
fn given_speaker_with_books_when_deserializing_then_flattened_user() {
    let body = r#"{
        "id": 5, "username": "sam", "role": "speaker",
        "assigned_books": [{
            "id": 7, "title": "Northanger Abbey",
            "original_filename": "northanger.txt",
            "file_type": "txt", "category_id": 2
        }]
    }"#;

    let speaker: SpeakerWithBooks = serde_json::from_str(body).unwrap();
    assert_eq!(speaker.user.username, "sam");
    assert_eq!(speaker.user.role, Role::Speaker);
    assert_eq!(speaker.assigned_books.len(), 1);
    assert_eq!(speaker.assigned_books[0].title, "Northanger Abbey");
}

use crate::{
    AppError,
    api::{ApiClient, SessionInvalidated, error_message},
};

/// WHAT: The structured `detail` field wins over everything else
/// WHY: FastAPI-style backends put the human message there
#[test]
fn given_detail_field_when_extracting_then_detail_used() {
    let body = r#"{"detail": "Book not found", "message": "ignored"}"#;

    assert_eq!(error_message(404, body), "Book not found");
}

/// WHAT: The `message` field is the second choice
/// WHY: Some endpoints use it instead of `detail`
#[test]
fn given_message_field_when_extracting_then_message_used() {
    let body = r#"{"message": "Invalid credentials"}"#;

    assert_eq!(error_message(401, body), "Invalid credentials");
}

/// WHAT: Unstructured bodies fall back to their raw text
/// WHY: Proxies and crashes produce plain-text errors
#[test]
fn given_plain_text_body_when_extracting_then_raw_text_used() {
    assert_eq!(error_message(502, "upstream unavailable"), "upstream unavailable");

    // JSON without the known fields also falls back to the raw body
    let body = r#"{"code": 13}"#;
    assert_eq!(error_message(500, body), r#"{"code": 13}"#);
}

/// WHAT: An empty body yields the generic HTTP fallback
/// WHY: The user always gets some message
#[test]
fn given_empty_body_when_extracting_then_http_status_fallback() {
    assert_eq!(error_message(500, ""), "HTTP 500");
    assert_eq!(error_message(503, "   \n"), "HTTP 503");
}

/// WHAT: Non-string or empty structured fields are skipped
/// WHY: Validation errors ship `detail` as an array, not a string
#[test]
fn given_non_string_detail_when_extracting_then_next_candidate_used() {
    let body = r#"{"detail": [{"loc": ["body"], "msg": "field required"}]}"#;
    // Falls through to the raw body text
    assert_eq!(error_message(422, body), body);

    let body = r#"{"detail": "", "message": "fallback"}"#;
    assert_eq!(error_message(400, body), "fallback");
}

/// WHAT: A 401 from any request publishes the invalidation event and
/// fails as unauthorized
/// WHY: The single top-level subscriber owns the reaction to a rejected
/// session; callers above the transport never branch on 401
#[tokio::test]
async fn given_401_response_when_classified_then_invalidation_published() {
    // Given: A fresh transport whose invalidation channel is quiet
    let (api, mut invalidated_rx) = ApiClient::new("http://localhost:8000/api/v1").unwrap();
    assert!(invalidated_rx.borrow().is_none());

    // When: A 401 response passes through outcome classification
    let response = http::Response::builder()
        .status(401)
        .body("session cookie rejected")
        .unwrap();
    let result = api.check(response.into()).await;

    // Then: The call fails unauthorized and the watch channel carries
    // the event for the subscriber
    assert!(matches!(result, Err(AppError::Unauthorized { .. })));
    assert!(invalidated_rx.has_changed().unwrap());
    assert_eq!(
        *invalidated_rx.borrow_and_update(),
        Some(SessionInvalidated)
    );
}

/// WHAT: Other failures classify as API errors, leaving the session alone
/// WHY: Only a rejected session collapses app state
#[tokio::test]
async fn given_404_response_when_classified_then_api_error_without_invalidation() {
    let (api, invalidated_rx) = ApiClient::new("http://localhost:8000/api/v1").unwrap();

    let response = http::Response::builder()
        .status(404)
        .body(r#"{"detail": "Book not found"}"#)
        .unwrap();
    let result = api.check(response.into()).await;

    match result {
        Err(AppError::Api {
            status, message, ..
        }) => {
            assert_eq!(status, 404);
            assert_eq!(message, "Book not found");
        }
        other => panic!("Expected API error, got {:?}", other),
    }
    assert!(invalidated_rx.borrow().is_none());
    assert!(!invalidated_rx.has_changed().unwrap());
}

use crate::{
    SessionStore,
    models::{Role, User},
};

fn speaker() -> User {
    User {
        id: 9,
        username: "sam".to_string(),
        role: Role::Speaker,
    }
}

/// WHAT: Invalidation drops the session without a backend call
/// WHY: The backend already rejected the cookie; the subscriber only
/// needs the local identity gone
#[test]
fn given_live_session_when_invalidated_then_anonymous() {
    // Given: A store holding a speaker session
    let mut session = SessionStore::with_session(speaker());
    assert!(session.current().is_some());

    // When: The invalidation subscriber clears it
    session.invalidate();

    // Then: The store is anonymous, and invalidating again is a no-op
    assert!(session.current().is_none());
    session.invalidate();
    assert!(session.current().is_none());
}

/// WHAT: A fresh store is anonymous
/// WHY: Role gating must see no user before login or probe
#[test]
fn given_fresh_store_when_queried_then_no_session() {
    let session = SessionStore::new();
    assert!(session.current().is_none());
}

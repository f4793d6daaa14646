use crate::session::{MemoryStorage, SESSION_KEY_TOKEN, Session, SessionState, SessionStorage};

use common::RedactedToken;

use std::sync::Arc;

/// **VALUE**: Verifies a token left in storage by an earlier load is picked up.
///
/// **WHY THIS MATTERS**: Reloading the page must not sign the user out.
///
/// **BUG THIS CATCHES**: Would catch restore reading the wrong key or ignoring storage.
#[tokio::test]
async fn given_stored_token_when_restoring_then_session_is_signed_in() {
    let storage = Arc::new(MemoryStorage::with_entry(SESSION_KEY_TOKEN, "abc.def"));

    let session = Session::restore(storage);

    assert_eq!(session.state().await, SessionState::SignedIn);
    assert_eq!(session.token().await.unwrap().as_str(), "abc.def");
}

#[tokio::test]
async fn given_empty_or_missing_token_when_restoring_then_session_is_signed_out() {
    let empty = Session::restore(Arc::new(MemoryStorage::with_entry(SESSION_KEY_TOKEN, "")));
    let missing = Session::restore(Arc::new(MemoryStorage::new()));

    assert_eq!(empty.state().await, SessionState::SignedOut);
    assert_eq!(missing.state().await, SessionState::SignedOut);
}

/// **VALUE**: Verifies sign-in and sign-out keep storage and memory in step.
///
/// **BUG THIS CATCHES**: Would catch sign-out clearing memory but leaving the
/// token in storage, which silently signs the user back in on reload.
#[tokio::test]
async fn given_sign_in_then_sign_out_when_inspecting_storage_then_token_follows_session() {
    let storage = Arc::new(MemoryStorage::new());
    let session = Session::restore(Arc::clone(&storage) as Arc<dyn SessionStorage>);

    session.sign_in(RedactedToken::new("token-1")).await;
    assert_eq!(storage.get(SESSION_KEY_TOKEN).as_deref(), Some("token-1"));
    assert_eq!(session.state().await, SessionState::SignedIn);

    session.sign_out().await;
    assert_eq!(storage.get(SESSION_KEY_TOKEN), None);
    assert_eq!(session.state().await, SessionState::SignedOut);
    assert!(session.token().await.is_none());
}

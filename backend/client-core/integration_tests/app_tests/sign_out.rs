use crate::app_tests::helpers::{TEST_TOKEN, signed_in_app};

use client_core::app::messages::{
    MENU_TITLE_SIGN_IN, MENU_TITLE_SIGN_OUT, SIGN_OUT_CONFIRM_MESSAGE, SIGN_OUT_SUCCESS_MESSAGE,
};
use client_core::router::{HOME_PATH, SIGN_IN_PATH, SIGN_OUT_PATH};
use client_core::session::{SESSION_KEY_TOKEN, SessionState, SessionStorage};

/// **VALUE**: Verifies a stored token restores a signed-in menu at startup.
///
/// **BUG THIS CATCHES**: Would catch the menu defaulting to "Sign in" until
/// the first transition.
#[tokio::test]
async fn given_stored_token_when_app_starts_then_menu_shows_sign_out() {
    let t = signed_in_app(HOME_PATH).await;

    t.app.start().await;

    let snapshot = t.view.snapshot();
    assert_eq!(snapshot.sign_in_label, MENU_TITLE_SIGN_OUT);
    assert_eq!(snapshot.sign_in_href, SIGN_OUT_PATH);
    assert!(snapshot.session_menu_visible);
}

/// **VALUE**: Verifies declining the confirmation leaves the session alone.
///
/// **BUG THIS CATCHES**: Would catch sign-out running before (or regardless
/// of) the user's answer.
#[tokio::test]
async fn given_declined_confirmation_when_signing_out_then_still_signed_in() {
    let t = signed_in_app(HOME_PATH).await;
    t.app.start().await;
    t.view.answer_confirm(false);

    t.click(SIGN_OUT_PATH).await;

    let snapshot = t.view.snapshot();
    assert_eq!(snapshot.confirm_prompts, vec![SIGN_OUT_CONFIRM_MESSAGE.to_string()]);
    assert!(snapshot.snackbars.is_empty());
    assert_eq!(t.app.session().state().await, SessionState::SignedIn);
    assert_eq!(t.storage.get(SESSION_KEY_TOKEN).as_deref(), Some(TEST_TOKEN));
    assert_eq!(snapshot.sign_in_label, MENU_TITLE_SIGN_OUT);
}

/// **VALUE**: Verifies a confirmed sign-out clears everything and notifies once.
///
/// **WHY THIS MATTERS**: A shared computer must not stay signed in after the
/// user chose to leave.
///
/// **BUG THIS CATCHES**: Would catch the token surviving in storage, the
/// sign-out pseudo-path ending up in history, or a doubled snackbar.
#[tokio::test]
async fn given_confirmed_sign_out_when_clicked_then_signed_out_and_routed_home() {
    let t = signed_in_app("/signin").await;
    t.app.start().await;
    let depth = t.history.len();

    t.click(SIGN_OUT_PATH).await;

    let snapshot = t.view.snapshot();
    assert_eq!(t.app.session().state().await, SessionState::SignedOut);
    assert_eq!(t.storage.get(SESSION_KEY_TOKEN), None);
    assert_eq!(snapshot.sign_in_label, MENU_TITLE_SIGN_IN);
    assert_eq!(snapshot.sign_in_href, SIGN_IN_PATH);
    assert!(!snapshot.session_menu_visible);
    assert_eq!(
        snapshot
            .snackbars
            .iter()
            .filter(|message| message.as_str() == SIGN_OUT_SUCCESS_MESSAGE)
            .count(),
        1
    );
    assert_eq!(t.app.router().current_path().as_deref(), Some(HOME_PATH));
    assert_eq!(t.history.len(), depth + 1);
}

use crate::app_tests::helpers::{TEST_TOKEN, signed_out_app};

use client_core::app::messages::{MENU_TITLE_SIGN_OUT, SIGN_IN_SUCCESS_MESSAGE, SIGN_UP_SUCCESS_MESSAGE};
use client_core::app::{FormSubmission, PageInit, UiEvent};
use client_core::features::SignUpForm;
use client_core::router::{HOME_PATH, SIGN_IN_PATH, SIGN_OUT_PATH};
use client_core::session::{SESSION_KEY_TOKEN, SessionState, SessionStorage};

use models::Credentials;

use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, ResponseTemplate};

/// **VALUE**: Verifies a successful sign-in stores the token, flips the menu and goes home.
///
/// **WHY THIS MATTERS**: This is the only path from signed-out to signed-in;
/// every protected page depends on it.
///
/// **BUG THIS CATCHES**: Would catch the menu still offering "Sign in" after
/// success, or the token living only in memory and vanishing on reload.
#[tokio::test]
async fn given_valid_credentials_when_signing_in_then_session_and_menu_updated() {
    // GIVEN: The sign-in page is shown and its form is bound
    let t = signed_out_app(SIGN_IN_PATH).await;
    Mock::given(method("POST"))
        .and(path("/login/token"))
        .and(body_json(json!({ "email": "rider@subway.test", "password": "pa55word" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "accessToken": TEST_TOKEN })))
        .expect(1)
        .mount(&t.server)
        .await;
    t.app.start().await;
    assert_eq!(t.app.bound_page().await, Some(PageInit::SignInForm));

    // WHEN: Submitting valid credentials
    t.dispatch(UiEvent::Submit(FormSubmission::SignIn(Credentials::new(
        "rider@subway.test",
        "pa55word",
    ))))
    .await;

    // THEN: Signed in everywhere it matters
    assert_eq!(t.app.session().state().await, SessionState::SignedIn);
    assert_eq!(t.storage.get(SESSION_KEY_TOKEN).as_deref(), Some(TEST_TOKEN));
    let snapshot = t.view.snapshot();
    assert_eq!(snapshot.sign_in_label, MENU_TITLE_SIGN_OUT);
    assert_eq!(snapshot.sign_in_href, SIGN_OUT_PATH);
    assert!(snapshot.session_menu_visible);
    assert_eq!(snapshot.snackbars, vec![SIGN_IN_SUCCESS_MESSAGE.to_string()]);
    assert!(snapshot.alerts.is_empty());
    assert_eq!(t.app.router().current_path().as_deref(), Some(HOME_PATH));
    assert!(snapshot.main.contains(r#"class="home""#));
}

/// **VALUE**: Verifies a rejected sign-in shows the curated message and changes nothing.
///
/// **BUG THIS CATCHES**: Would catch the raw server text reaching the user or
/// a half-applied session after a 401.
#[tokio::test]
async fn given_wrong_password_when_signing_in_then_mapped_alert_and_still_signed_out() {
    let t = signed_out_app(SIGN_IN_PATH).await;
    Mock::given(method("POST"))
        .and(path("/login/token"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "message": "Unauthorized" })))
        .expect(1)
        .mount(&t.server)
        .await;
    t.app.start().await;

    t.dispatch(UiEvent::Submit(FormSubmission::SignIn(Credentials::new(
        "rider@subway.test",
        "wrong",
    ))))
    .await;

    let snapshot = t.view.snapshot();
    assert_eq!(
        snapshot.alerts,
        vec!["Email or password does not match.".to_string()]
    );
    assert_eq!(t.app.session().state().await, SessionState::SignedOut);
    assert_eq!(t.storage.get(SESSION_KEY_TOKEN), None);
    assert_eq!(t.app.router().current_path().as_deref(), Some(SIGN_IN_PATH));
}

#[tokio::test]
async fn given_blank_credentials_when_signing_in_then_alert_without_request() {
    let t = signed_out_app(SIGN_IN_PATH).await;
    Mock::given(method("POST"))
        .and(path("/login/token"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&t.server)
        .await;
    t.app.start().await;

    t.dispatch(UiEvent::Submit(FormSubmission::SignIn(Credentials::new("", ""))))
        .await;

    assert_eq!(
        t.view.snapshot().alerts,
        vec!["Please enter your email and password".to_string()]
    );
}

/// **VALUE**: Verifies a form submit is ignored unless its page was initialized.
///
/// **WHY THIS MATTERS**: Handlers are bound only after the router has put the
/// page's markup in place; a stale submit from another page must not fire.
///
/// **BUG THIS CATCHES**: Would catch handlers that stay bound after navigating away.
#[tokio::test]
async fn given_home_page_when_sign_in_submitted_then_ignored() {
    let t = signed_out_app(HOME_PATH).await;
    Mock::given(method("POST"))
        .and(path("/login/token"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&t.server)
        .await;
    t.app.start().await;

    t.dispatch(UiEvent::Submit(FormSubmission::SignIn(Credentials::new(
        "rider@subway.test",
        "pa55word",
    ))))
    .await;

    let snapshot = t.view.snapshot();
    assert!(snapshot.alerts.is_empty());
    assert!(snapshot.snackbars.is_empty());
    assert_eq!(t.app.bound_page().await, None);
}

#[tokio::test]
async fn given_sign_up_form_when_registered_then_routed_to_sign_in() {
    let t = signed_out_app("/signup").await;
    Mock::given(method("POST"))
        .and(path("/members"))
        .and(body_json(json!({
            "email": "new@subway.test",
            "name": "New Rider",
            "age": 31,
            "password": "pa55word"
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&t.server)
        .await;
    t.app.start().await;

    t.dispatch(UiEvent::Submit(FormSubmission::SignUp(SignUpForm {
        email: "new@subway.test".to_string(),
        name: "New Rider".to_string(),
        age: 31,
        password: "pa55word".to_string(),
        password_confirm: "pa55word".to_string(),
    })))
    .await;

    assert_eq!(
        t.view.snapshot().snackbars,
        vec![SIGN_UP_SUCCESS_MESSAGE.to_string()]
    );
    assert_eq!(t.app.router().current_path().as_deref(), Some(SIGN_IN_PATH));
    assert_eq!(t.app.bound_page().await, Some(PageInit::SignInForm));
}

#[tokio::test]
async fn given_mismatched_passwords_when_signing_up_then_alert_without_request() {
    let t = signed_out_app("/signup").await;
    Mock::given(method("POST"))
        .and(path("/members"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&t.server)
        .await;
    t.app.start().await;

    t.dispatch(UiEvent::Submit(FormSubmission::SignUp(SignUpForm {
        email: "new@subway.test".to_string(),
        name: "New Rider".to_string(),
        age: 31,
        password: "pa55word".to_string(),
        password_confirm: "pa55w0rd".to_string(),
    })))
    .await;

    assert_eq!(
        t.view.snapshot().alerts,
        vec!["Passwords do not match".to_string()]
    );
}

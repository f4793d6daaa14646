use crate::commands::Input;
use crate::console::{Console, Flow};
use crate::tests::terminal_view::scripted_view;

use client_core::app::{ClickEvent, UiEvent};
use client_core::config::ClientConfig;
use client_core::router::{HOME_PATH, SIGN_IN_PATH, SIGN_UP_PATH};

use std::sync::Arc;

fn console(input: &str) -> (Console, crate::tests::terminal_view::SharedBuffer) {
    let (view, output) = scripted_view(input);
    let console = Console::new(&ClientConfig::default(), Arc::new(view)).unwrap();
    (console, output)
}

/// **VALUE**: Verifies back/forward replay history through popstate.
///
/// **BUG THIS CATCHES**: Would catch `back` routing (pushing) instead of
/// rendering, which makes forward unreachable.
#[tokio::test]
async fn given_visited_pages_when_going_back_and_forward_then_pages_follow_history() {
    let (console, _output) = console("");
    console.app().start().await;
    for path in [SIGN_IN_PATH, SIGN_UP_PATH] {
        console
            .execute(Input::Event(UiEvent::Click(ClickEvent::on_link(path))))
            .await;
    }

    console.execute(Input::Back).await;
    assert_eq!(console.app().router().current_path().as_deref(), Some(SIGN_IN_PATH));

    console.execute(Input::Back).await;
    console.execute(Input::Forward).await;
    console.execute(Input::Forward).await;
    assert_eq!(console.app().router().current_path().as_deref(), Some(SIGN_UP_PATH));
}

#[tokio::test]
async fn given_no_earlier_page_when_going_back_then_notice_and_continue() {
    let (console, output) = console("");
    console.app().start().await;

    let flow = console.execute(Input::Back).await;

    assert_eq!(flow, Flow::Continue);
    assert!(output.contents().contains("No earlier page"));
    assert_eq!(console.app().router().current_path().as_deref(), Some(HOME_PATH));
}

/// **VALUE**: Verifies the loop survives bad input and stops at `quit`.
///
/// **BUG THIS CATCHES**: Would catch a parse error ending the session, or
/// commands after `quit` still being executed.
#[tokio::test]
async fn given_script_when_running_then_errors_reported_and_quit_stops() {
    let (console, output) = console("teleport\n\ngo /signin\nquit\ngo /signup\n");

    console.run().await.unwrap();

    let contents = output.contents();
    assert!(contents.contains("Unknown command: teleport"));
    assert!(contents.contains("== Sign in =="));
    assert!(!contents.contains("== Sign up =="));
    assert_eq!(console.app().router().current_path().as_deref(), Some(SIGN_IN_PATH));
}

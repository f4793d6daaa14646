use crate::app::{ClickEvent, Element, NavControl};
use crate::features::sign_in::{SIGN_IN_FAIL_MESSAGE, sign_in_error_message};
use crate::templates::ROUTER_LINK_CLASS;

use common::HttpStatusCode;

/// **VALUE**: Verifies clicks inside a router link are recognized through the nearest anchor.
///
/// **WHY THIS MATTERS**: Menu links wrap an icon and a label; the click target
/// is usually the inner span, not the anchor.
///
/// **BUG THIS CATCHES**: Would catch only checking the target element.
#[test]
fn given_click_on_child_of_router_anchor_when_resolving_then_anchor_href_used() {
    let click = ClickEvent::new(vec![
        Element::new("span"),
        Element::new("a")
            .with_class(ROUTER_LINK_CLASS)
            .with_href("/lines"),
        Element::new("nav"),
    ]);

    assert_eq!(click.router_target(), Some("/lines"));
}

#[test]
fn given_router_class_on_target_when_resolving_then_enclosing_anchor_href_used() {
    let click = ClickEvent::new(vec![
        Element::new("span").with_class(ROUTER_LINK_CLASS),
        Element::new("a").with_href("/stations"),
    ]);

    assert_eq!(click.router_target(), Some("/stations"));
}

#[test]
fn given_plain_anchor_or_no_anchor_when_resolving_then_not_a_navigation() {
    let plain = ClickEvent::new(vec![Element::new("a").with_href("https://example.com")]);
    let button = ClickEvent::new(vec![Element::new("button").with_class(ROUTER_LINK_CLASS)]);

    assert_eq!(plain.router_target(), None);
    assert_eq!(button.router_target(), None);
    assert_eq!(ClickEvent::default().router_target(), None);
}

#[test]
fn given_hrefs_when_classifying_then_sign_out_is_not_a_route() {
    assert_eq!(NavControl::from_href("/signout"), NavControl::SignOut);
    assert_eq!(NavControl::from_href("/signout/"), NavControl::SignOut);
    assert_eq!(
        NavControl::from_href("/lines"),
        NavControl::Route("/lines".to_string())
    );
}

/// **VALUE**: Verifies sign-in failures map to curated messages by status code.
///
/// **BUG THIS CATCHES**: Would catch raw server text or a blank alert reaching the user.
#[test]
fn given_sign_in_statuses_when_mapping_then_curated_or_generic_message() {
    assert_eq!(
        sign_in_error_message(Some(HttpStatusCode::UNAUTHORIZED)),
        "Email or password does not match."
    );
    assert_eq!(
        sign_in_error_message(Some(HttpStatusCode::BAD_REQUEST)),
        "Please check your email and password."
    );
    assert_eq!(sign_in_error_message(Some(HttpStatusCode(500))), SIGN_IN_FAIL_MESSAGE);
    assert_eq!(sign_in_error_message(None), SIGN_IN_FAIL_MESSAGE);
}

use crate::app_tests::helpers::{signed_in_app, stations_json};

use client_core::app::{ClickEvent, Element, PageInit, UiEvent};
use client_core::router::{HOME_PATH, STATIONS_PATH};
use client_core::templates::STATION_ITEM_CLASS;
use client_core::view::Region;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

/// **VALUE**: Verifies back/forward re-renders and re-binds the page without a push.
///
/// **WHY THIS MATTERS**: After pressing back to the stations page, its
/// form must work again.
///
/// **BUG THIS CATCHES**: Would catch popstate skipping page initialization or
/// pushing a duplicate history entry.
#[tokio::test]
async fn given_back_to_stations_when_popstate_then_page_rebound_from_cache() {
    let t = signed_in_app(HOME_PATH).await;
    Mock::given(method("GET"))
        .and(path("/stations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(stations_json()))
        .expect(1)
        .mount(&t.server)
        .await;
    t.app.start().await;
    t.click(STATIONS_PATH).await;
    t.click(HOME_PATH).await;
    assert_eq!(t.app.bound_page().await, None);
    let depth = t.history.len();

    let path = t.history.back().unwrap();
    t.dispatch(UiEvent::PopState { path }).await;

    assert_eq!(t.app.bound_page().await, Some(PageInit::StationForm));
    assert_eq!(t.history.len(), depth);
    assert_eq!(t.view.snapshot().count_in_main(STATION_ITEM_CLASS), 3);
}

#[tokio::test]
async fn given_unknown_path_when_clicked_then_not_found_and_nothing_bound() {
    let t = signed_in_app(HOME_PATH).await;
    t.app.start().await;

    t.click("/timetable").await;

    let snapshot = t.view.snapshot();
    assert!(snapshot.main.contains("Page not found"));
    assert!(snapshot.main.contains("/timetable"));
    assert_eq!(t.app.bound_page().await, None);
}

/// **VALUE**: Verifies clicks outside router links are ignored.
///
/// **BUG THIS CATCHES**: Would catch every anchor (or button) triggering a
/// client-side navigation.
#[tokio::test]
async fn given_click_on_plain_elements_when_handled_then_view_unchanged() {
    let t = signed_in_app(HOME_PATH).await;
    t.app.start().await;
    let before = t.view.snapshot();

    t.dispatch(UiEvent::Click(ClickEvent::new(vec![
        Element::new("button").with_class("station-delete-button"),
        Element::new("li"),
    ])))
    .await;
    t.dispatch(UiEvent::Click(ClickEvent::new(vec![
        Element::new("a").with_href(STATIONS_PATH),
    ])))
    .await;

    assert_eq!(t.view.snapshot(), before);
    assert_eq!(t.app.router().current_path().as_deref(), Some(HOME_PATH));
}

/// **VALUE**: Verifies a failed page load alerts and still shows the page shell.
///
/// **BUG THIS CATCHES**: Would catch an error leaving the previous page on
/// screen while history says the user moved on.
#[tokio::test]
async fn given_backend_error_when_opening_stations_then_alert_and_empty_shell() {
    let t = signed_in_app(HOME_PATH).await;
    Mock::given(method("GET"))
        .and(path("/stations"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({ "message": "Database unavailable" })),
        )
        .expect(1)
        .mount(&t.server)
        .await;
    t.app.start().await;

    t.click(STATIONS_PATH).await;

    let snapshot = t.view.snapshot();
    assert_eq!(snapshot.alerts, vec!["Database unavailable".to_string()]);
    assert_eq!(snapshot.region(Region::StationList), Some(""));
    assert_eq!(t.app.bound_page().await, Some(PageInit::StationForm));
}

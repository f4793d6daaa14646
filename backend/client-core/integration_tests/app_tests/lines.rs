use crate::app_tests::helpers::{TestApp, TEST_TOKEN, line_json, signed_in_app, stations_json};

use client_core::app::messages::LINE_CREATED_MESSAGE;
use client_core::app::{FormSubmission, PageCommand, UiEvent};
use client_core::features::LineForm;
use client_core::router::{HOME_PATH, LINES_PATH, SECTIONS_PATH};
use client_core::templates::{LINE_ITEM_CLASS, SECTION_ITEM_CLASS};
use client_core::view::Region;

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, ResponseTemplate};

const NEW_COLOR: &str = "bg-red-600";

fn line_form(name: &str, up: &str, down: &str) -> LineForm {
    LineForm {
        name: name.to_string(),
        up_station: up.to_string(),
        down_station: down.to_string(),
        distance: 10,
        duration: 5,
    }
}

async fn mount_stations(t: &TestApp) {
    Mock::given(method("GET"))
        .and(path("/stations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(stations_json()))
        .mount(&t.server)
        .await;
}

/// **VALUE**: Verifies revisiting the lines page is served from the cache.
///
/// **WHY THIS MATTERS**: Flipping between menu pages should not hammer the backend.
///
/// **BUG THIS CATCHES**: Would catch the collection being rebuilt per navigation.
#[tokio::test]
async fn given_lines_visited_twice_when_nothing_changed_then_fetched_once() {
    let t = signed_in_app(HOME_PATH).await;
    Mock::given(method("GET"))
        .and(path("/lines"))
        .and(header("Authorization", format!("Bearer {TEST_TOKEN}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            line_json(1, "Line 1", "bg-green-600"),
            line_json(2, "Line 2", "bg-blue-600")
        ])))
        .expect(1)
        .mount(&t.server)
        .await;
    t.app.start().await;

    t.click(LINES_PATH).await;
    let first = t.view.snapshot().main;
    t.click(HOME_PATH).await;
    t.click(LINES_PATH).await;

    let snapshot = t.view.snapshot();
    assert_eq!(snapshot.main, first);
    assert_eq!(snapshot.count_in_main(LINE_ITEM_CLASS), 2);
    assert_eq!(t.app.features().lines.collection().fetch_count(), 1);
}

/// **VALUE**: Verifies a created line shows up at once and exactly once after a reload.
///
/// **WHY THIS MATTERS**: The user must see the new line without waiting for a
/// refetch, and the rebuilt list must not show it twice.
///
/// **BUG THIS CATCHES**: Would catch the optimistic entry being merged into the
/// cache and then returned again by the server.
#[tokio::test]
async fn given_new_line_when_created_then_appended_and_reload_shows_it_once() {
    // GIVEN: The lines page with two lines and the create form open
    let t = signed_in_app(HOME_PATH).await;
    mount_stations(&t).await;
    Mock::given(method("GET"))
        .and(path("/lines"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            line_json(1, "Line 1", "bg-green-600"),
            line_json(2, "Line 2", "bg-blue-600")
        ])))
        .up_to_n_times(1)
        .expect(1)
        .mount(&t.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/lines"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            line_json(1, "Line 1", "bg-green-600"),
            line_json(2, "Line 2", "bg-blue-600"),
            line_json(3, "Line 3", NEW_COLOR)
        ])))
        .expect(1)
        .mount(&t.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/lines"))
        .and(body_json(json!({
            "name": "Line 3",
            "color": NEW_COLOR,
            "upStationId": 1,
            "downStationId": 3,
            "distance": 10,
            "duration": 5
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(line_json(3, "Line 3", NEW_COLOR)))
        .expect(1)
        .mount(&t.server)
        .await;
    t.app.start().await;
    t.click(LINES_PATH).await;
    t.dispatch(UiEvent::Command(PageCommand::OpenLineForm)).await;

    let snapshot = t.view.snapshot();
    assert!(snapshot.modal_open);
    let options = snapshot.region(Region::StationOptions).unwrap();
    assert_eq!(options.matches("<option").count(), 3);

    // WHEN: Picking a color and submitting the form
    t.dispatch(UiEvent::Command(PageCommand::SelectLineColor(NEW_COLOR.to_string())))
        .await;
    t.dispatch(UiEvent::Submit(FormSubmission::CreateLine(line_form(
        "Line 3", "Gangnam", "Jamsil",
    ))))
    .await;

    // THEN: Appended immediately, modal closed, user notified
    let snapshot = t.view.snapshot();
    assert!(snapshot.alerts.is_empty(), "{:?}", snapshot.alerts);
    assert_eq!(snapshot.count_in_main(LINE_ITEM_CLASS), 3);
    assert!(!snapshot.modal_open);
    assert_eq!(snapshot.snackbars, vec![LINE_CREATED_MESSAGE.to_string()]);
    assert!(!t.app.features().lines.collection().is_valid());

    // AND: Revisiting rebuilds from the server with the line exactly once
    t.click(HOME_PATH).await;
    t.click(LINES_PATH).await;
    let snapshot = t.view.snapshot();
    assert_eq!(snapshot.count_in_main(LINE_ITEM_CLASS), 3);
    assert_eq!(snapshot.count_in_main("Line 3"), 1);
}

/// **VALUE**: Verifies a color already in use is rejected before any request.
///
/// **BUG THIS CATCHES**: Would catch the duplicate check running against an
/// empty cache or after the POST.
#[tokio::test]
async fn given_color_in_use_when_creating_line_then_alert_without_request() {
    let t = signed_in_app(LINES_PATH).await;
    mount_stations(&t).await;
    Mock::given(method("GET"))
        .and(path("/lines"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            line_json(1, "Line 1", NEW_COLOR)
        ])))
        .mount(&t.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/lines"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&t.server)
        .await;
    t.app.start().await;
    t.dispatch(UiEvent::Command(PageCommand::OpenLineForm)).await;
    t.dispatch(UiEvent::Command(PageCommand::SelectLineColor(NEW_COLOR.to_string())))
        .await;

    t.dispatch(UiEvent::Submit(FormSubmission::CreateLine(line_form(
        "Line 2", "Gangnam", "Jamsil",
    ))))
    .await;

    let snapshot = t.view.snapshot();
    assert_eq!(
        snapshot.alerts,
        vec!["That color is already used by another line".to_string()]
    );
    assert!(snapshot.modal_open);
    assert_eq!(snapshot.count_in_main(LINE_ITEM_CLASS), 1);
}

#[tokio::test]
async fn given_no_color_or_unknown_station_when_creating_line_then_validation_alerts() {
    let t = signed_in_app(LINES_PATH).await;
    mount_stations(&t).await;
    Mock::given(method("GET"))
        .and(path("/lines"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&t.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/lines"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&t.server)
        .await;
    t.app.start().await;
    t.dispatch(UiEvent::Command(PageCommand::OpenLineForm)).await;

    t.dispatch(UiEvent::Submit(FormSubmission::CreateLine(line_form(
        "Line 1", "Gangnam", "Jamsil",
    ))))
    .await;
    t.dispatch(UiEvent::Command(PageCommand::SelectLineColor(NEW_COLOR.to_string())))
        .await;
    t.dispatch(UiEvent::Submit(FormSubmission::CreateLine(line_form(
        "Line 1", "Gangnam", "Nowhere",
    ))))
    .await;
    t.dispatch(UiEvent::Submit(FormSubmission::CreateLine(line_form(
        "Line 1", "Gangnam", "Gangnam",
    ))))
    .await;

    assert_eq!(
        t.view.snapshot().alerts,
        vec![
            "Please select a line color".to_string(),
            "Unknown station: Nowhere".to_string(),
            "Up and down stations must be different".to_string(),
        ]
    );
}

/// **VALUE**: Verifies deleting a line refetches and re-renders the list.
///
/// **BUG THIS CATCHES**: Would catch a delete that succeeds on the server but
/// leaves the stale entry on screen.
#[tokio::test]
async fn given_existing_line_when_deleted_then_list_refreshed_from_server() {
    let t = signed_in_app(LINES_PATH).await;
    Mock::given(method("GET"))
        .and(path("/lines"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            line_json(1, "Line 1", "bg-green-600"),
            line_json(2, "Line 2", "bg-blue-600")
        ])))
        .up_to_n_times(1)
        .mount(&t.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/lines"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            line_json(2, "Line 2", "bg-blue-600")
        ])))
        .expect(1)
        .mount(&t.server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/lines/1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&t.server)
        .await;
    t.app.start().await;

    t.dispatch(UiEvent::Command(PageCommand::DeleteLine(1))).await;

    let snapshot = t.view.snapshot();
    assert_eq!(snapshot.count_in_main(LINE_ITEM_CLASS), 1);
    assert!(!snapshot.main.contains("Line 1"));
    assert!(t.app.features().lines.collection().is_valid());
}

#[tokio::test]
async fn given_line_update_when_submitted_then_put_and_list_refreshed() {
    let t = signed_in_app(LINES_PATH).await;
    Mock::given(method("GET"))
        .and(path("/lines"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            line_json(1, "Line 1", "bg-green-600")
        ])))
        .up_to_n_times(1)
        .mount(&t.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/lines"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            line_json(1, "Airport Line", "bg-purple-500")
        ])))
        .mount(&t.server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/lines/1"))
        .and(body_json(json!({ "name": "Airport Line", "color": "bg-purple-500" })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&t.server)
        .await;
    t.app.start().await;

    t.dispatch(UiEvent::Command(PageCommand::UpdateLine {
        id: 1,
        name: "Airport Line".to_string(),
        color: "bg-purple-500".to_string(),
    }))
    .await;

    assert!(t.view.snapshot().main.contains("Airport Line"));
}

/// **VALUE**: Verifies a just-created line's color blocks an identical second create.
///
/// **WHY THIS MATTERS**: The cache is stale right after a create; reopening the
/// form and picking the same color must still be rejected locally.
///
/// **BUG THIS CATCHES**: Would catch the color check reading only the last
/// fetched lines and missing the optimistically appended one.
#[tokio::test]
async fn given_line_just_created_when_same_color_submitted_again_then_alert_without_request() {
    let t = signed_in_app(LINES_PATH).await;
    mount_stations(&t).await;
    Mock::given(method("GET"))
        .and(path("/lines"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            line_json(1, "Line 1", "bg-green-600")
        ])))
        .expect(1)
        .mount(&t.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/lines"))
        .respond_with(ResponseTemplate::new(201).set_body_json(line_json(2, "Line 2", NEW_COLOR)))
        .expect(1)
        .mount(&t.server)
        .await;
    t.app.start().await;

    for name in ["Line 2", "Line 3"] {
        t.dispatch(UiEvent::Command(PageCommand::OpenLineForm)).await;
        t.dispatch(UiEvent::Command(PageCommand::SelectLineColor(NEW_COLOR.to_string())))
            .await;
        t.dispatch(UiEvent::Submit(FormSubmission::CreateLine(line_form(
            name, "Gangnam", "Jamsil",
        ))))
        .await;
    }

    let snapshot = t.view.snapshot();
    assert_eq!(
        snapshot.alerts,
        vec!["That color is already used by another line".to_string()]
    );
    assert_eq!(snapshot.count_in_main(LINE_ITEM_CLASS), 2);
    assert!(snapshot.modal_open);
}

/// **VALUE**: Verifies a line created on the lines page shows up on the sections page.
///
/// **WHY THIS MATTERS**: Both pages are built from `/lines`; the sections view
/// must not keep serving its pre-create copy for the rest of the session.
///
/// **BUG THIS CATCHES**: Would catch a line mutation invalidating only the
/// lines cache, leaving sections stale and rejecting the new line by name.
#[tokio::test]
async fn given_sections_cached_when_line_created_then_sections_refetched_with_new_line() {
    // GIVEN: Both the lines and sections pages visited once
    let t = signed_in_app(HOME_PATH).await;
    mount_stations(&t).await;
    Mock::given(method("GET"))
        .and(path("/lines"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            line_json(1, "Line 1", "bg-green-600")
        ])))
        .up_to_n_times(2)
        .expect(2)
        .mount(&t.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/lines"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            line_json(1, "Line 1", "bg-green-600"),
            line_json(2, "Line 2", NEW_COLOR)
        ])))
        .expect(1)
        .mount(&t.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/lines"))
        .respond_with(ResponseTemplate::new(201).set_body_json(line_json(2, "Line 2", NEW_COLOR)))
        .expect(1)
        .mount(&t.server)
        .await;
    t.app.start().await;
    t.click(LINES_PATH).await;
    t.click(SECTIONS_PATH).await;
    assert_eq!(t.view.snapshot().count_in_main(SECTION_ITEM_CLASS), 1);

    // WHEN: Creating a line, then going back to sections
    t.click(LINES_PATH).await;
    t.dispatch(UiEvent::Command(PageCommand::OpenLineForm)).await;
    t.dispatch(UiEvent::Command(PageCommand::SelectLineColor(NEW_COLOR.to_string())))
        .await;
    t.dispatch(UiEvent::Submit(FormSubmission::CreateLine(line_form(
        "Line 2", "Gangnam", "Jamsil",
    ))))
    .await;
    assert!(!t.app.features().sections.collection().is_valid());
    t.click(SECTIONS_PATH).await;

    // THEN: Sections were rebuilt from the server and list the new line
    let snapshot = t.view.snapshot();
    assert!(snapshot.alerts.is_empty(), "{:?}", snapshot.alerts);
    assert_eq!(snapshot.count_in_main(SECTION_ITEM_CLASS), 2);
    assert!(snapshot.main.contains("Line 2"));
    assert_eq!(t.app.features().sections.collection().fetch_count(), 2);
    assert_eq!(t.app.features().lines.collection().fetch_count(), 1);
}

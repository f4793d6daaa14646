use crate::app_tests::helpers::{line_json, signed_in_app, stations_json};

use client_core::app::{FormSubmission, PageCommand, UiEvent};
use client_core::features::SectionForm;
use client_core::router::SECTIONS_PATH;

use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

fn section_form(line: &str, up: &str, down: &str) -> SectionForm {
    SectionForm {
        line: line.to_string(),
        up_station: up.to_string(),
        down_station: down.to_string(),
        distance: 4,
        duration: 3,
    }
}

#[tokio::test]
async fn given_section_form_when_submitted_then_posted_and_list_refreshed() {
    let t = signed_in_app(SECTIONS_PATH).await;
    Mock::given(method("GET"))
        .and(path("/stations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(stations_json()))
        .expect(1)
        .mount(&t.server)
        .await;
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
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": 1,
            "name": "Line 1",
            "color": "bg-green-600",
            "stations": [
                { "id": 1, "name": "Gangnam" },
                { "id": 2, "name": "Yeoksam" },
                { "id": 3, "name": "Jamsil" }
            ]
        }])))
        .expect(1)
        .mount(&t.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/lines/1/sections"))
        .and(body_json(json!({
            "upStationId": 2,
            "downStationId": 3,
            "distance": 4,
            "duration": 3
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&t.server)
        .await;
    t.app.start().await;

    t.dispatch(UiEvent::Submit(FormSubmission::CreateSection(section_form(
        "Line 1", "Yeoksam", "Jamsil",
    ))))
    .await;

    let snapshot = t.view.snapshot();
    assert!(snapshot.alerts.is_empty(), "{:?}", snapshot.alerts);
    assert!(snapshot.main.contains("Jamsil"));
}

#[tokio::test]
async fn given_unknown_line_when_adding_section_then_alert_without_request() {
    let t = signed_in_app(SECTIONS_PATH).await;
    Mock::given(method("GET"))
        .and(path("/lines"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            line_json(1, "Line 1", "bg-green-600")
        ])))
        .mount(&t.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/lines/9/sections"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&t.server)
        .await;
    t.app.start().await;

    t.dispatch(UiEvent::Submit(FormSubmission::CreateSection(section_form(
        "Line 9", "Gangnam", "Jamsil",
    ))))
    .await;

    assert_eq!(t.view.snapshot().alerts, vec!["Unknown line: Line 9".to_string()]);
}

#[tokio::test]
async fn given_station_on_line_when_section_removed_then_delete_sent_with_station_id() {
    let t = signed_in_app(SECTIONS_PATH).await;
    Mock::given(method("GET"))
        .and(path("/lines"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            line_json(1, "Line 1", "bg-green-600")
        ])))
        .mount(&t.server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/lines/1/sections"))
        .and(query_param("stationId", "2"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&t.server)
        .await;
    t.app.start().await;

    t.dispatch(UiEvent::Command(PageCommand::DeleteSection {
        line_id: 1,
        station_id: 2,
    }))
    .await;

    assert!(t.view.snapshot().alerts.is_empty());
    assert_eq!(t.app.features().sections.collection().fetch_count(), 2);
}

/// **VALUE**: Verifies a station created after the first section add can be used in the next.
///
/// **WHY THIS MATTERS**: The station directory is loaded once per session;
/// a newer station must not be rejected as unknown forever.
///
/// **BUG THIS CATCHES**: Would catch the directory being loaded only while
/// empty and never reloaded on a lookup miss.
#[tokio::test]
async fn given_station_created_between_section_adds_when_adding_then_directory_reloaded() {
    // GIVEN: The directory first sees three stations, then a fourth
    let t = signed_in_app(SECTIONS_PATH).await;
    Mock::given(method("GET"))
        .and(path("/stations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(stations_json()))
        .up_to_n_times(1)
        .expect(1)
        .mount(&t.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/stations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "name": "Gangnam" },
            { "id": 2, "name": "Yeoksam" },
            { "id": 3, "name": "Jamsil" },
            { "id": 4, "name": "Seolleung" }
        ])))
        .expect(1)
        .mount(&t.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/lines"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            line_json(1, "Line 1", "bg-green-600")
        ])))
        .mount(&t.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/lines/1/sections"))
        .and(body_json(json!({
            "upStationId": 2,
            "downStationId": 3,
            "distance": 4,
            "duration": 3
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&t.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/lines/1/sections"))
        .and(body_json(json!({
            "upStationId": 3,
            "downStationId": 4,
            "distance": 4,
            "duration": 3
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&t.server)
        .await;
    t.app.start().await;

    // WHEN: Adding a section, then one ending at the newer station
    t.dispatch(UiEvent::Submit(FormSubmission::CreateSection(section_form(
        "Line 1", "Yeoksam", "Jamsil",
    ))))
    .await;
    t.dispatch(UiEvent::Submit(FormSubmission::CreateSection(section_form(
        "Line 1", "Jamsil", "Seolleung",
    ))))
    .await;

    // THEN: Both were posted without alerts
    let snapshot = t.view.snapshot();
    assert!(snapshot.alerts.is_empty(), "{:?}", snapshot.alerts);
}

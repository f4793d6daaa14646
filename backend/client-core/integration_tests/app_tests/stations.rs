use crate::app_tests::helpers::signed_in_app;

use client_core::app::messages::STATION_CREATED_MESSAGE;
use client_core::app::{FormSubmission, PageCommand, UiEvent};
use client_core::router::STATIONS_PATH;
use client_core::templates::STATION_ITEM_CLASS;

use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, ResponseTemplate};

/// **VALUE**: Verifies creating a station appends it without an immediate refetch.
///
/// **BUG THIS CATCHES**: Would catch the create path refetching (and thus
/// double-rendering) the list right after the POST.
#[tokio::test]
async fn given_station_name_when_created_then_appended_to_list() {
    let t = signed_in_app(STATIONS_PATH).await;
    Mock::given(method("GET"))
        .and(path("/stations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "name": "Gangnam" }
        ])))
        .expect(1)
        .mount(&t.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/stations"))
        .and(body_json(json!({ "name": "Jamsil" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": 2, "name": "Jamsil" })))
        .expect(1)
        .mount(&t.server)
        .await;
    t.app.start().await;

    t.dispatch(UiEvent::Submit(FormSubmission::CreateStation {
        name: "  Jamsil ".to_string(),
    }))
    .await;

    let snapshot = t.view.snapshot();
    assert_eq!(snapshot.count_in_main(STATION_ITEM_CLASS), 2);
    assert_eq!(snapshot.snackbars, vec![STATION_CREATED_MESSAGE.to_string()]);
    assert!(!t.app.features().stations.collection().is_valid());
}

#[tokio::test]
async fn given_blank_or_duplicate_name_when_creating_station_then_alert_without_request() {
    let t = signed_in_app(STATIONS_PATH).await;
    Mock::given(method("GET"))
        .and(path("/stations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "name": "Gangnam" }
        ])))
        .mount(&t.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/stations"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&t.server)
        .await;
    t.app.start().await;

    for name in ["   ", "Gangnam"] {
        t.dispatch(UiEvent::Submit(FormSubmission::CreateStation {
            name: name.to_string(),
        }))
        .await;
    }

    assert_eq!(
        t.view.snapshot().alerts,
        vec![
            "Please enter a station name".to_string(),
            "Station 'Gangnam' already exists".to_string(),
        ]
    );
}

/// **VALUE**: Verifies a rejected delete keeps the cached list and shows the reason.
///
/// **BUG THIS CATCHES**: Would catch the cache being invalidated before the
/// server confirmed the mutation.
#[tokio::test]
async fn given_station_on_a_line_when_delete_rejected_then_alert_and_cache_kept() {
    let t = signed_in_app(STATIONS_PATH).await;
    Mock::given(method("GET"))
        .and(path("/stations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "name": "Gangnam" },
            { "id": 2, "name": "Jamsil" }
        ])))
        .expect(1)
        .mount(&t.server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/stations/1"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "message": "Station is used by a line" })),
        )
        .expect(1)
        .mount(&t.server)
        .await;
    t.app.start().await;

    t.dispatch(UiEvent::Command(PageCommand::DeleteStation(1))).await;

    let snapshot = t.view.snapshot();
    assert_eq!(snapshot.alerts, vec!["Station is used by a line".to_string()]);
    assert_eq!(snapshot.count_in_main(STATION_ITEM_CLASS), 2);
    assert!(t.app.features().stations.collection().is_valid());
}

#[tokio::test]
async fn given_station_when_deleted_then_list_refreshed() {
    let t = signed_in_app(STATIONS_PATH).await;
    Mock::given(method("GET"))
        .and(path("/stations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "name": "Gangnam" },
            { "id": 2, "name": "Jamsil" }
        ])))
        .up_to_n_times(1)
        .mount(&t.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/stations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 2, "name": "Jamsil" }
        ])))
        .expect(1)
        .mount(&t.server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/stations/1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&t.server)
        .await;
    t.app.start().await;

    t.dispatch(UiEvent::Command(PageCommand::DeleteStation(1))).await;

    let snapshot = t.view.snapshot();
    assert_eq!(snapshot.count_in_main(STATION_ITEM_CLASS), 1);
    assert!(!snapshot.main.contains("Gangnam"));
}

/// **VALUE**: Verifies a just-created station blocks an identical second create.
///
/// **WHY THIS MATTERS**: After a create the cache is stale until the next
/// visit; a double submit must still be caught locally.
///
/// **BUG THIS CATCHES**: Would catch the duplicate check reading only the
/// last fetched items and missing the optimistically appended one.
#[tokio::test]
async fn given_station_just_created_when_same_name_submitted_again_then_alert_without_request() {
    let t = signed_in_app(STATIONS_PATH).await;
    Mock::given(method("GET"))
        .and(path("/stations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "name": "Gangnam" }
        ])))
        .expect(1)
        .mount(&t.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/stations"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": 2, "name": "Jamsil" })))
        .expect(1)
        .mount(&t.server)
        .await;
    t.app.start().await;

    for _ in 0..2 {
        t.dispatch(UiEvent::Submit(FormSubmission::CreateStation {
            name: "Jamsil".to_string(),
        }))
        .await;
    }

    let snapshot = t.view.snapshot();
    assert_eq!(
        snapshot.alerts,
        vec!["Station 'Jamsil' already exists".to_string()]
    );
    assert_eq!(snapshot.count_in_main(STATION_ITEM_CLASS), 2);
    assert_eq!(snapshot.snackbars, vec![STATION_CREATED_MESSAGE.to_string()]);
}

//! Test helpers for app flow tests.
//!
//! Every app is wired against a fresh wiremock server and headless seams:
//! - `MemoryView` records what the user would see
//! - `MemoryHistory` starts at the page the app is "loaded" on
//! - `MemoryStorage` optionally carries a token from an earlier load

use client_core::app::{App, ClickEvent, UiEvent};
use client_core::config::ClientConfig;
use client_core::router::{History, MemoryHistory};
use client_core::session::{MemoryStorage, SESSION_KEY_TOKEN, SessionStorage};
use client_core::view::{MemoryView, View};

use std::sync::Arc;

use serde_json::{Value, json};
use wiremock::MockServer;

pub const TEST_TOKEN: &str = "test-access-token";

pub struct TestApp {
    pub app: App,
    pub server: MockServer,
    pub view: Arc<MemoryView>,
    pub history: Arc<MemoryHistory>,
    pub storage: Arc<MemoryStorage>,
}

impl TestApp {
    pub async fn click(&self, href: &str) {
        self.app
            .handle_event(UiEvent::Click(ClickEvent::on_link(href)))
            .await;
    }

    pub async fn dispatch(&self, event: UiEvent) {
        self.app.handle_event(event).await;
    }
}

/// Config pointing at `server`; retries are off so expectations stay exact.
pub fn test_config(server: &MockServer) -> ClientConfig {
    let mut config = ClientConfig::default();
    config.server.api_endpoint = server.uri();
    config.server.max_retries = 0;
    config.server.request_timeout_secs = 5;
    config
}

async fn build(start_path: &str, storage: MemoryStorage) -> TestApp {
    let server = MockServer::start().await;
    let view = Arc::new(MemoryView::new());
    let history = Arc::new(MemoryHistory::starting_at(start_path));
    let storage = Arc::new(storage);

    let app = App::new(
        &test_config(&server),
        Arc::clone(&view) as Arc<dyn View>,
        Arc::clone(&history) as Arc<dyn History>,
        Arc::clone(&storage) as Arc<dyn SessionStorage>,
    )
    .expect("Failed to wire app");

    TestApp {
        app,
        server,
        view,
        history,
        storage,
    }
}

/// App loaded on `start_path` with no stored session. Not started yet.
pub async fn signed_out_app(start_path: &str) -> TestApp {
    build(start_path, MemoryStorage::new()).await
}

/// App loaded on `start_path` with [`TEST_TOKEN`] in session storage. Not started yet.
pub async fn signed_in_app(start_path: &str) -> TestApp {
    build(
        start_path,
        MemoryStorage::with_entry(SESSION_KEY_TOKEN, TEST_TOKEN),
    )
    .await
}

pub fn stations_json() -> Value {
    json!([
        { "id": 1, "name": "Gangnam" },
        { "id": 2, "name": "Yeoksam" },
        { "id": 3, "name": "Jamsil" }
    ])
}

pub fn line_json(id: u64, name: &str, color: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "color": color,
        "stations": [
            { "id": 1, "name": "Gangnam" },
            { "id": 2, "name": "Yeoksam" }
        ]
    })
}

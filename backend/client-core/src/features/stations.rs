use crate::cache::{CachedCollection, CollectionSource};
use crate::error::feature::FeatureError;
use crate::error::gateway::GatewayError;
use crate::gateway::HttpGateway;
use crate::session::Session;
use crate::templates;
use crate::view::{Region, View};

use models::{EntityId, NewStation, Station};

use std::sync::Arc;

use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use log::info;

pub(crate) const STATIONS_ENDPOINT: &str = "/stations";

pub struct StationSource {
    gateway: HttpGateway,
    session: Arc<Session>,
}

impl CollectionSource for StationSource {
    type Item = Station;

    fn name(&self) -> &'static str {
        "stations"
    }

    fn fetch(&self) -> BoxFuture<'static, Result<Vec<Station>, GatewayError>> {
        let gateway = self.gateway.clone();
        let session = Arc::clone(&self.session);
        async move {
            let token = session.token().await;
            gateway.get(STATIONS_ENDPOINT, token.as_ref()).await
        }
        .boxed()
    }

    fn render_item(&self, item: &Station) -> String {
        templates::station_item(item)
    }
}

pub struct Stations {
    gateway: HttpGateway,
    session: Arc<Session>,
    view: Arc<dyn View>,
    collection: CachedCollection<StationSource>,
}

impl Stations {
    pub fn new(gateway: HttpGateway, session: Arc<Session>, view: Arc<dyn View>) -> Self {
        let source = StationSource {
            gateway: gateway.clone(),
            session: Arc::clone(&session),
        };
        Self {
            gateway,
            session,
            view,
            collection: CachedCollection::new(source, Region::StationList),
        }
    }

    pub fn collection(&self) -> &CachedCollection<StationSource> {
        &self.collection
    }

    pub async fn page(&self) -> Result<String, FeatureError> {
        let list = self.collection.ensure_view().await?;
        Ok(templates::stations_page(&list))
    }

    pub async fn create(&self, name: &str) -> Result<Station, FeatureError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(FeatureError::validation("Please enter a station name"));
        }
        if self.collection.known_items().iter().any(|s| s.name == name) {
            return Err(FeatureError::validation(format!(
                "Station '{name}' already exists"
            )));
        }

        let token = self.session.token().await;
        let body = NewStation {
            name: name.to_string(),
        };
        let station: Station = self
            .gateway
            .post(STATIONS_ENDPOINT, &body, token.as_ref())
            .await?;

        info!("Created station {} ({})", station.name, station.id);
        self.collection
            .append_optimistically(&station, self.view.as_ref());
        Ok(station)
    }

    pub async fn delete(&self, id: EntityId) -> Result<(), FeatureError> {
        let token = self.session.token().await;
        self.gateway
            .delete(&format!("{STATIONS_ENDPOINT}/{id}"), token.as_ref())
            .await?;

        info!("Deleted station {id}");
        self.collection.invalidate();
        self.collection.refresh_region(self.view.as_ref()).await?;
        Ok(())
    }
}

//! Station name -> id lookup for the create forms.

use crate::error::gateway::GatewayError;
use crate::gateway::HttpGateway;
use crate::features::stations::STATIONS_ENDPOINT;
use crate::session::Session;

use models::{Entity, EntityId, Station};

use std::sync::Arc;

use log::debug;
use tokio::sync::RwLock;

pub struct StationDirectory {
    gateway: HttpGateway,
    session: Arc<Session>,
    stations: RwLock<Vec<Station>>,
}

impl StationDirectory {
    pub fn new(gateway: HttpGateway, session: Arc<Session>) -> Self {
        Self {
            gateway,
            session,
            stations: RwLock::new(Vec::new()),
        }
    }

    /// Replace the directory with the server's stations. On failure the
    /// previous contents stay.
    pub async fn load(&self) -> Result<Vec<Station>, GatewayError> {
        let token = self.session.token().await;
        let stations: Vec<Station> = self.gateway.get(STATIONS_ENDPOINT, token.as_ref()).await?;
        debug!("Station directory loaded {} stations", stations.len());
        *self.stations.write().await = stations.clone();
        Ok(stations)
    }

    pub async fn resolve(&self, name: &str) -> Option<EntityId> {
        let name = name.trim();
        self.stations
            .read()
            .await
            .iter()
            .find(|station| station.name() == name)
            .map(|station| station.id())
    }

    /// Resolve `name`, reloading from the server once if it is not known yet.
    pub async fn resolve_or_reload(&self, name: &str) -> Result<Option<EntityId>, GatewayError> {
        if let Some(id) = self.resolve(name).await {
            return Ok(Some(id));
        }
        debug!("Station '{}' not in directory - reloading", name.trim());
        self.load().await?;
        Ok(self.resolve(name).await)
    }

    pub async fn stations(&self) -> Vec<Station> {
        self.stations.read().await.clone()
    }
}

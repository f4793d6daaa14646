use crate::cache::{CachedCollection, CollectionSource};
use crate::error::feature::FeatureError;
use crate::error::gateway::GatewayError;
use crate::features::directory::StationDirectory;
use crate::features::lines::LINES_ENDPOINT;
use crate::gateway::HttpGateway;
use crate::session::Session;
use crate::templates;
use crate::view::{Region, View};

use models::{EntityId, Line, NewSection};

use std::sync::Arc;

use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use log::info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionForm {
    pub line: String,
    pub up_station: String,
    pub down_station: String,
    pub distance: u32,
    pub duration: u32,
}

/// Lines with their stations, rendered as one section list per line.
pub struct SectionSource {
    gateway: HttpGateway,
    session: Arc<Session>,
}

impl CollectionSource for SectionSource {
    type Item = Line;

    fn name(&self) -> &'static str {
        "sections"
    }

    fn fetch(&self) -> BoxFuture<'static, Result<Vec<Line>, GatewayError>> {
        let gateway = self.gateway.clone();
        let session = Arc::clone(&self.session);
        async move {
            let token = session.token().await;
            gateway.get(LINES_ENDPOINT, token.as_ref()).await
        }
        .boxed()
    }

    fn render_item(&self, item: &Line) -> String {
        templates::line_sections_item(item)
    }
}

pub struct Sections {
    gateway: HttpGateway,
    session: Arc<Session>,
    view: Arc<dyn View>,
    collection: CachedCollection<SectionSource>,
    directory: StationDirectory,
}

impl Sections {
    pub fn new(gateway: HttpGateway, session: Arc<Session>, view: Arc<dyn View>) -> Self {
        let source = SectionSource {
            gateway: gateway.clone(),
            session: Arc::clone(&session),
        };
        Self {
            directory: StationDirectory::new(gateway.clone(), Arc::clone(&session)),
            gateway,
            session,
            view,
            collection: CachedCollection::new(source, Region::SectionList),
        }
    }

    pub fn collection(&self) -> &CachedCollection<SectionSource> {
        &self.collection
    }

    pub async fn page(&self) -> Result<String, FeatureError> {
        let list = self.collection.ensure_view().await?;
        Ok(templates::sections_page(&list))
    }

    pub async fn create(&self, form: &SectionForm) -> Result<(), FeatureError> {
        let line_name = form.line.trim();
        let line_id = self
            .collection
            .items()
            .iter()
            .find(|line| line.name == line_name)
            .map(|line| line.id)
            .ok_or_else(|| FeatureError::validation(format!("Unknown line: {line_name}")))?;

        let up_station = self.resolve_station(&form.up_station).await?;
        let down_station = self.resolve_station(&form.down_station).await?;
        let section = NewSection::new(up_station, down_station, form.distance, form.duration)?;

        let token = self.session.token().await;
        self.gateway
            .post_unit(
                &format!("{LINES_ENDPOINT}/{line_id}/sections"),
                &section,
                token.as_ref(),
            )
            .await?;

        info!("Added section {up_station} -> {down_station} to line {line_id}");
        self.collection.invalidate();
        self.collection.refresh_region(self.view.as_ref()).await?;
        Ok(())
    }

    pub async fn delete(&self, line_id: EntityId, station_id: EntityId) -> Result<(), FeatureError> {
        let token = self.session.token().await;
        self.gateway
            .delete(
                &format!("{LINES_ENDPOINT}/{line_id}/sections?stationId={station_id}"),
                token.as_ref(),
            )
            .await?;

        info!("Removed station {station_id} from line {line_id}");
        self.collection.invalidate();
        self.collection.refresh_region(self.view.as_ref()).await?;
        Ok(())
    }

    async fn resolve_station(&self, name: &str) -> Result<EntityId, FeatureError> {
        self.directory
            .resolve_or_reload(name)
            .await?
            .ok_or_else(|| FeatureError::validation(format!("Unknown station: {}", name.trim())))
    }
}

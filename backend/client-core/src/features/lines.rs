use crate::cache::{CachedCollection, CollectionSource};
use crate::error::feature::FeatureError;
use crate::error::gateway::GatewayError;
use crate::features::directory::StationDirectory;
use crate::gateway::HttpGateway;
use crate::session::Session;
use crate::templates;
use crate::view::{Region, View};

use models::{EntityId, Line, LineUpdate, NewLineBuilder};

use std::sync::Arc;

use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use log::{debug, info};
use tokio::sync::Mutex;

pub(crate) const LINES_ENDPOINT: &str = "/lines";

/// Fields of the create-line form, as typed by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineForm {
    pub name: String,
    pub up_station: String,
    pub down_station: String,
    pub distance: u32,
    pub duration: u32,
}

pub struct LineSource {
    gateway: HttpGateway,
    session: Arc<Session>,
}

impl CollectionSource for LineSource {
    type Item = Line;

    fn name(&self) -> &'static str {
        "lines"
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
        templates::line_item(item)
    }
}

pub struct Lines {
    gateway: HttpGateway,
    session: Arc<Session>,
    view: Arc<dyn View>,
    collection: CachedCollection<LineSource>,
    directory: StationDirectory,
    selected_color: Mutex<Option<String>>,
}

impl Lines {
    pub fn new(gateway: HttpGateway, session: Arc<Session>, view: Arc<dyn View>) -> Self {
        let source = LineSource {
            gateway: gateway.clone(),
            session: Arc::clone(&session),
        };
        Self {
            directory: StationDirectory::new(gateway.clone(), Arc::clone(&session)),
            gateway,
            session,
            view,
            collection: CachedCollection::new(source, Region::LineList),
            selected_color: Mutex::new(None),
        }
    }

    pub fn collection(&self) -> &CachedCollection<LineSource> {
        &self.collection
    }

    pub async fn page(&self) -> Result<String, FeatureError> {
        let list = self.collection.ensure_view().await?;
        Ok(templates::lines_page(&list))
    }

    /// Reset the color choice, load station options and open the modal.
    pub async fn open_create_form(&self) -> Result<(), FeatureError> {
        *self.selected_color.lock().await = None;
        let stations = self.directory.load().await?;
        let options: String = stations.iter().map(templates::station_option).collect();
        self.view.replace_region(Region::StationOptions, &options);
        self.view.set_modal_open(true);
        Ok(())
    }

    pub async fn select_color(&self, color: &str) {
        debug!("Line color selected: {color}");
        *self.selected_color.lock().await = Some(color.to_string());
    }

    /// Validate, create, then append the new line to the live list.
    ///
    /// Every check runs before the request; nothing is cached or rendered
    /// unless the server accepts the line.
    pub async fn create(&self, form: &LineForm) -> Result<Line, FeatureError> {
        let color = self.selected_color.lock().await.clone().unwrap_or_default();
        if color.is_empty() {
            return Err(FeatureError::validation("Please select a line color"));
        }
        if self.collection.known_items().iter().any(|l| l.color == color) {
            return Err(FeatureError::validation(
                "That color is already used by another line",
            ));
        }

        let up_station = self.resolve_station(&form.up_station).await?;
        let down_station = self.resolve_station(&form.down_station).await?;
        let new_line = NewLineBuilder::default()
            .with_name(form.name.trim())
            .with_color(color)
            .with_up_station(up_station)
            .with_down_station(down_station)
            .with_distance(form.distance)
            .with_duration(form.duration)
            .build()?;

        let token = self.session.token().await;
        let line: Line = self
            .gateway
            .post(LINES_ENDPOINT, &new_line, token.as_ref())
            .await?;

        info!("Created line {} ({})", line.name, line.id);
        self.collection
            .append_optimistically(&line, self.view.as_ref());
        *self.selected_color.lock().await = None;
        self.view.set_modal_open(false);
        Ok(line)
    }

    pub async fn update(&self, id: EntityId, update: &LineUpdate) -> Result<(), FeatureError> {
        let token = self.session.token().await;
        self.gateway
            .put(&format!("{LINES_ENDPOINT}/{id}"), update, token.as_ref())
            .await?;

        info!("Updated line {id}");
        self.collection.invalidate();
        self.collection.refresh_region(self.view.as_ref()).await?;
        Ok(())
    }

    pub async fn delete(&self, id: EntityId) -> Result<(), FeatureError> {
        let token = self.session.token().await;
        self.gateway
            .delete(&format!("{LINES_ENDPOINT}/{id}"), token.as_ref())
            .await?;

        info!("Deleted line {id}");
        self.collection.invalidate();
        self.collection.refresh_region(self.view.as_ref()).await?;
        Ok(())
    }

    async fn resolve_station(&self, name: &str) -> Result<EntityId, FeatureError> {
        self.directory
            .resolve(name)
            .await
            .ok_or_else(|| FeatureError::validation(format!("Unknown station: {}", name.trim())))
    }
}

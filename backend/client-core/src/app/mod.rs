//! Application controller.
//!
//! Composes the router, the session and the feature modules, and is the single
//! entry point for UI events:
//! - Router-link clicks are recognized once, at the root, from the click's
//!   composed path; every other click is ignored
//! - The sign-out control asks for confirmation instead of navigating
//! - Per-page initialization (binding a page's forms) runs only after the
//!   router reports that page's markup is in place
//! - Menu controls are always re-derived from the session after a transition
//!
//! No error escapes `handle_event`: failures become alerts.

pub mod events;
pub mod messages;
pub mod pages;

pub use events::{
    ClickEvent, Element, FormSubmission, NavControl, PageCommand, PageInit, UiEvent,
};
pub use pages::Pages;

use crate::config::ClientConfig;
use crate::error::CoreError;
use crate::error::feature::FeatureError;
use crate::features::{Features, SignIn};
use crate::gateway::HttpGateway;
use crate::router::{HOME_PATH, History, Navigation, Router, SIGN_IN_PATH, SIGN_OUT_PATH};
use crate::session::{Session, SessionState, SessionStorage};
use crate::view::View;

use messages::{
    LINE_CREATED_MESSAGE, MENU_TITLE_SIGN_IN, MENU_TITLE_SIGN_OUT, SIGN_IN_SUCCESS_MESSAGE,
    SIGN_OUT_CONFIRM_MESSAGE, SIGN_OUT_SUCCESS_MESSAGE, SIGN_UP_SUCCESS_MESSAGE,
    STATION_CREATED_MESSAGE,
};
use models::LineUpdate;

use std::sync::Arc;
use std::time::Duration;

use log::{debug, info, trace, warn};
use tokio::sync::Mutex;

pub struct App {
    router: Router,
    session: Arc<Session>,
    view: Arc<dyn View>,
    features: Arc<Features>,
    snackbar_show_time: Duration,
    bound: Mutex<Option<PageInit>>,
}

impl App {
    /// Wire the app. The session is restored from `storage` here, once.
    pub fn new(
        config: &ClientConfig,
        view: Arc<dyn View>,
        history: Arc<dyn History>,
        storage: Arc<dyn SessionStorage>,
    ) -> Result<Self, CoreError> {
        let gateway = HttpGateway::new(&config.server)?;
        let session = Arc::new(Session::restore(storage));
        let features = Arc::new(Features::new(
            gateway,
            Arc::clone(&session),
            Arc::clone(&view),
        ));
        let pages = Arc::new(Pages::new(Arc::clone(&features)));
        let router = Router::new(pages, Arc::clone(&view), history);

        info!("App wired against {}", config.server.api_endpoint);

        Ok(Self {
            router,
            session,
            view,
            features,
            snackbar_show_time: config.ui.snackbar_show_time(),
            bound: Mutex::new(None),
        })
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    pub fn features(&self) -> &Features {
        &self.features
    }

    pub async fn bound_page(&self) -> Option<PageInit> {
        *self.bound.lock().await
    }

    /// Sync the menu with the restored session and render the current path.
    pub async fn start(&self) {
        self.apply_session_ui().await;
        let path = self
            .router
            .current_path()
            .unwrap_or_else(|| HOME_PATH.to_string());
        let navigation = self.router.render(&path).await;
        self.run_path_matched_action(navigation).await;
    }

    pub async fn handle_event(&self, event: UiEvent) {
        match event {
            UiEvent::Click(click) => self.handle_click(&click).await,
            UiEvent::PopState { path } => {
                debug!("popstate to {path}");
                let navigation = self.router.render(&path).await;
                self.run_path_matched_action(navigation).await;
            }
            UiEvent::Submit(submission) => self.handle_submit(submission).await,
            UiEvent::Command(command) => self.handle_command(command).await,
        }
    }

    async fn handle_click(&self, click: &ClickEvent) {
        let Some(href) = click.router_target() else {
            trace!("Ignoring non-navigation click");
            return;
        };

        match NavControl::from_href(href) {
            NavControl::SignOut => self.run_sign_out_process().await,
            NavControl::Route(path) => self.initialize_routed_page(&path).await,
        }
    }

    /// Route, then run the page's initialization once its markup is in.
    pub async fn initialize_routed_page(&self, path: &str) {
        let navigation = self.router.route(path).await;
        self.run_path_matched_action(navigation).await;
    }

    async fn run_path_matched_action(&self, navigation: Navigation) {
        let init = match navigation {
            Navigation::Superseded => {
                debug!("Navigation superseded - skipping page initialization");
                return;
            }
            Navigation::Rendered(_) => navigation.page().and_then(pages::page_init),
        };

        match init {
            Some(init) => debug!("Binding {init:?}"),
            None => debug!("No page initialization for this view"),
        }
        *self.bound.lock().await = init;
    }

    async fn is_bound(&self, required: PageInit) -> bool {
        let bound = *self.bound.lock().await;
        if bound != Some(required) {
            warn!("Ignoring {required:?} event - current page has {bound:?}");
            return false;
        }
        true
    }

    async fn handle_submit(&self, submission: FormSubmission) {
        if !self.is_bound(submission.required_init()).await {
            return;
        }

        match submission {
            FormSubmission::SignIn(credentials) => self.sign_in(&credentials).await,
            FormSubmission::SignUp(form) => match self.features.sign_up.register(&form).await {
                Ok(()) => {
                    self.notify(SIGN_UP_SUCCESS_MESSAGE);
                    self.initialize_routed_page(SIGN_IN_PATH).await;
                }
                Err(error) => self.report(&error),
            },
            FormSubmission::CreateStation { name } => {
                match self.features.stations.create(&name).await {
                    Ok(_) => self.notify(STATION_CREATED_MESSAGE),
                    Err(error) => self.report(&error),
                }
            }
            FormSubmission::CreateLine(form) => match self.features.lines.create(&form).await {
                Ok(_) => {
                    self.lines_changed();
                    self.notify(LINE_CREATED_MESSAGE);
                }
                Err(error) => self.report(&error),
            },
            FormSubmission::CreateSection(form) => {
                if let Err(error) = self.features.sections.create(&form).await {
                    self.report(&error);
                }
            }
        }
    }

    async fn handle_command(&self, command: PageCommand) {
        if !self.is_bound(command.required_init()).await {
            return;
        }

        let mutates_lines = matches!(
            command,
            PageCommand::UpdateLine { .. } | PageCommand::DeleteLine(_)
        );
        let result = match command {
            PageCommand::DeleteStation(id) => self.features.stations.delete(id).await,
            PageCommand::OpenLineForm => self.features.lines.open_create_form().await,
            PageCommand::SelectLineColor(color) => {
                self.features.lines.select_color(&color).await;
                Ok(())
            }
            PageCommand::UpdateLine { id, name, color } => match LineUpdate::new(name, color) {
                Ok(update) => self.features.lines.update(id, &update).await,
                Err(error) => Err(FeatureError::from(error)),
            },
            PageCommand::DeleteLine(id) => self.features.lines.delete(id).await,
            PageCommand::DeleteSection {
                line_id,
                station_id,
            } => self.features.sections.delete(line_id, station_id).await,
        };

        match result {
            Ok(()) if mutates_lines => self.lines_changed(),
            Ok(()) => {}
            Err(error) => self.report(&error),
        }
    }

    /// `/lines` also backs the sections view.
    fn lines_changed(&self) {
        debug!("Lines changed - invalidating sections");
        self.features.sections.collection().invalidate();
    }

    async fn sign_in(&self, credentials: &models::Credentials) {
        match self.features.sign_in.request_token(credentials).await {
            Ok(token) => {
                self.session.sign_in(token).await;
                self.apply_session_ui().await;
                self.notify(SIGN_IN_SUCCESS_MESSAGE);
                self.initialize_routed_page(HOME_PATH).await;
            }
            Err(error) => {
                warn!("Sign-in failed: {error}");
                self.view.alert(&SignIn::failure_message(&error));
            }
        }
    }

    /// Confirm, then SignedIn -> SignedOut and go home.
    async fn run_sign_out_process(&self) {
        if !self.view.confirm(SIGN_OUT_CONFIRM_MESSAGE) {
            info!("Sign-out cancelled");
            return;
        }

        self.session.sign_out().await;
        self.apply_session_ui().await;
        self.initialize_routed_page(HOME_PATH).await;
        self.notify(SIGN_OUT_SUCCESS_MESSAGE);
    }

    /// Menu controls as a pure function of the session.
    async fn apply_session_ui(&self) {
        match self.session.state().await {
            SessionState::SignedIn => {
                self.view
                    .set_sign_in_control(MENU_TITLE_SIGN_OUT, SIGN_OUT_PATH);
                self.view.set_session_menu_visible(true);
            }
            SessionState::SignedOut => {
                self.view.set_sign_in_control(MENU_TITLE_SIGN_IN, SIGN_IN_PATH);
                self.view.set_session_menu_visible(false);
            }
        }
    }

    fn notify(&self, message: &str) {
        self.view.show_snackbar(message, self.snackbar_show_time);
    }

    fn report(&self, error: &FeatureError) {
        warn!("Action failed: {error}");
        self.view.alert(error.user_message());
    }
}

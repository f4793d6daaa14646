use crate::app::events::PageInit;
use crate::error::feature::FeatureError;
use crate::features::Features;
use crate::router::{Page, PageRenderer, RenderedPage};
use crate::templates;

use std::sync::Arc;

use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use log::warn;

/// Router actions: one per [`Page`].
pub struct Pages {
    features: Arc<Features>,
}

impl Pages {
    pub fn new(features: Arc<Features>) -> Self {
        Self { features }
    }

    async fn markup(&self, page: Page) -> Result<String, FeatureError> {
        match page {
            Page::Home => Ok(templates::home_page()),
            Page::SignIn => Ok(templates::sign_in_page()),
            Page::SignUp => Ok(templates::sign_up_page()),
            Page::Stations => self.features.stations.page().await,
            Page::Lines => self.features.lines.page().await,
            Page::Sections => self.features.sections.page().await,
        }
    }
}

/// Page shell shown when its data could not be loaded.
fn empty_page(page: Page) -> String {
    match page {
        Page::Stations => templates::stations_page(""),
        Page::Lines => templates::lines_page(""),
        Page::Sections => templates::sections_page(""),
        Page::Home => templates::home_page(),
        Page::SignIn => templates::sign_in_page(),
        Page::SignUp => templates::sign_up_page(),
    }
}

impl PageRenderer for Pages {
    fn render(&self, page: Page) -> BoxFuture<'_, RenderedPage> {
        async move {
            match self.markup(page).await {
                Ok(markup) => RenderedPage::new(markup),
                Err(error) => {
                    warn!("Failed to load {page}: {error}");
                    RenderedPage::with_alert(empty_page(page), error.user_message())
                }
            }
        }
        .boxed()
    }
}

/// Initialization to run once a page's markup is in place.
pub fn page_init(page: Page) -> Option<PageInit> {
    match page {
        Page::SignIn => Some(PageInit::SignInForm),
        Page::SignUp => Some(PageInit::SignUpForm),
        Page::Stations => Some(PageInit::StationForm),
        Page::Lines => Some(PageInit::LineForm),
        Page::Sections => Some(PageInit::SectionForm),
        Page::Home => None,
    }
}

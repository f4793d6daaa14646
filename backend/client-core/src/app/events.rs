//! Everything the app controller reacts to.

use crate::features::{LineForm, SectionForm, SignUpForm};
use crate::router::{SIGN_OUT_PATH, normalize_path};
use crate::templates::ROUTER_LINK_CLASS;

use models::{Credentials, EntityId};

const ANCHOR_TAG: &str = "a";

/// One node of a click's composed path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub classes: Vec<String>,
    pub href: Option<String>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn with_href(mut self, href: impl Into<String>) -> Self {
        self.href = Some(href.into());
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn is_anchor(&self) -> bool {
        self.tag.eq_ignore_ascii_case(ANCHOR_TAG)
    }
}

/// A click, described by its composed path: target first, root last.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClickEvent {
    pub path: Vec<Element>,
}

impl ClickEvent {
    pub fn new(path: Vec<Element>) -> Self {
        Self { path }
    }

    /// A click straight on a router link.
    pub fn on_link(href: &str) -> Self {
        Self::new(vec![
            Element::new(ANCHOR_TAG)
                .with_class(ROUTER_LINK_CLASS)
                .with_href(href),
        ])
    }

    /// Href of the nearest anchor, if the click landed on a router control.
    pub fn router_target(&self) -> Option<&str> {
        let target = self.path.first()?;
        let anchor = self.path.iter().find(|element| element.is_anchor())?;
        if target.has_class(ROUTER_LINK_CLASS) || anchor.has_class(ROUTER_LINK_CLASS) {
            anchor.href.as_deref()
        } else {
            None
        }
    }
}

/// What a recognized navigation control does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavControl {
    /// Confirmation flow; never rendered by the router.
    SignOut,
    Route(String),
}

impl NavControl {
    pub fn from_href(href: &str) -> Self {
        if normalize_path(href) == SIGN_OUT_PATH {
            NavControl::SignOut
        } else {
            NavControl::Route(href.to_string())
        }
    }
}

/// Per-visit page initialization: which form handlers are bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageInit {
    SignInForm,
    SignUpForm,
    StationForm,
    LineForm,
    SectionForm,
}

#[derive(Debug, Clone)]
pub enum FormSubmission {
    SignIn(Credentials),
    SignUp(SignUpForm),
    CreateStation { name: String },
    CreateLine(LineForm),
    CreateSection(SectionForm),
}

impl FormSubmission {
    pub fn required_init(&self) -> PageInit {
        match self {
            FormSubmission::SignIn(_) => PageInit::SignInForm,
            FormSubmission::SignUp(_) => PageInit::SignUpForm,
            FormSubmission::CreateStation { .. } => PageInit::StationForm,
            FormSubmission::CreateLine(_) => PageInit::LineForm,
            FormSubmission::CreateSection(_) => PageInit::SectionForm,
        }
    }
}

/// In-page controls that are not navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageCommand {
    DeleteStation(EntityId),
    OpenLineForm,
    SelectLineColor(String),
    UpdateLine {
        id: EntityId,
        name: String,
        color: String,
    },
    DeleteLine(EntityId),
    DeleteSection {
        line_id: EntityId,
        station_id: EntityId,
    },
}

impl PageCommand {
    pub fn required_init(&self) -> PageInit {
        match self {
            PageCommand::DeleteStation(_) => PageInit::StationForm,
            PageCommand::OpenLineForm
            | PageCommand::SelectLineColor(_)
            | PageCommand::UpdateLine { .. }
            | PageCommand::DeleteLine(_) => PageInit::LineForm,
            PageCommand::DeleteSection { .. } => PageInit::SectionForm,
        }
    }
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    Click(ClickEvent),
    /// Back/forward; `path` is the entry now current.
    PopState { path: String },
    Submit(FormSubmission),
    Command(PageCommand),
}

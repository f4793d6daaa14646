use std::fmt;

pub const HOME_PATH: &str = "/";
pub const SIGN_IN_PATH: &str = "/signin";
pub const SIGN_UP_PATH: &str = "/signup";
/// Pseudo-path: triggers the sign-out confirmation, never rendered.
pub const SIGN_OUT_PATH: &str = "/signout";
pub const STATIONS_PATH: &str = "/stations";
pub const LINES_PATH: &str = "/lines";
pub const SECTIONS_PATH: &str = "/sections";

/// Every view the router can render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Home,
    SignIn,
    SignUp,
    Stations,
    Lines,
    Sections,
}

impl Page {
    pub const ALL: [Page; 6] = [
        Page::Home,
        Page::SignIn,
        Page::SignUp,
        Page::Stations,
        Page::Lines,
        Page::Sections,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Page::Home => HOME_PATH,
            Page::SignIn => SIGN_IN_PATH,
            Page::SignUp => SIGN_UP_PATH,
            Page::Stations => STATIONS_PATH,
            Page::Lines => LINES_PATH,
            Page::Sections => SECTIONS_PATH,
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}

/// One row of the routing table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub pattern: &'static str,
    pub page: Page,
}

impl Route {
    pub fn table() -> Vec<Route> {
        Page::ALL
            .iter()
            .map(|page| Route {
                pattern: page.path(),
                page: *page,
            })
            .collect()
    }
}

/// Result of looking a path up in the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolved {
    Page(Page),
    NotFound,
}

/// Drops query, fragment and trailing slashes so `/lines/?x=1` finds `/lines`.
pub fn normalize_path(path: &str) -> &str {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    let trimmed = path[..end].trim_end_matches('/');
    if trimmed.is_empty() { HOME_PATH } else { trimmed }
}

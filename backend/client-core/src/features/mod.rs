//! Feature modules.
//!
//! Each collection-backed module owns exactly one [`CachedCollection`] for its
//! whole lifetime; revisiting its page reuses the cache, and only a confirmed
//! mutation invalidates it.
//!
//! [`CachedCollection`]: crate::cache::CachedCollection

pub mod directory;
pub mod lines;
pub mod sections;
pub mod sign_in;
pub mod sign_up;
pub mod stations;

pub use directory::StationDirectory;
pub use lines::{LineForm, Lines};
pub use sections::{SectionForm, Sections};
pub use sign_in::SignIn;
pub use sign_up::{SignUp, SignUpForm};
pub use stations::Stations;

use crate::gateway::HttpGateway;
use crate::session::Session;
use crate::view::View;

use std::sync::Arc;

/// All feature modules, built once per app.
pub struct Features {
    pub stations: Stations,
    pub lines: Lines,
    pub sections: Sections,
    pub sign_in: SignIn,
    pub sign_up: SignUp,
}

impl Features {
    pub fn new(gateway: HttpGateway, session: Arc<Session>, view: Arc<dyn View>) -> Self {
        Self {
            stations: Stations::new(gateway.clone(), Arc::clone(&session), Arc::clone(&view)),
            lines: Lines::new(gateway.clone(), Arc::clone(&session), Arc::clone(&view)),
            sections: Sections::new(gateway.clone(), Arc::clone(&session), view),
            sign_in: SignIn::new(gateway.clone()),
            sign_up: SignUp::new(gateway),
        }
    }
}

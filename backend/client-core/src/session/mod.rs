//! Process-wide authentication state.
//!
//! One [`Session`] exists per app and is injected into every component that
//! reads or writes it:
//! - Feature sources read the token to authorize fetches and mutations
//! - Only the app controller's sign-in/sign-out transitions write it
//!
//! The token is mirrored into [`SessionStorage`] under [`SESSION_KEY_TOKEN`]
//! and read back exactly once, when the session is restored at startup.

pub mod storage;

pub use storage::{MemoryStorage, SessionStorage};

use common::RedactedToken;

use std::sync::Arc;

use log::{debug, info, warn};
use tokio::sync::RwLock;

/// Well-known storage key for the access token.
pub const SESSION_KEY_TOKEN: &str = "accessToken";

/// UI-facing state, derived purely from token presence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    SignedOut,
    SignedIn,
}

pub struct Session {
    token: RwLock<Option<RedactedToken>>,
    storage: Arc<dyn SessionStorage>,
}

impl Session {
    /// Restore the session from storage (read once).
    pub fn restore(storage: Arc<dyn SessionStorage>) -> Self {
        let token = storage
            .get(SESSION_KEY_TOKEN)
            .filter(|value| !value.is_empty())
            .map(RedactedToken::new);

        match &token {
            Some(token) => info!("Restored session token ({} chars)", token.len()),
            None => debug!("No stored session token - starting signed out"),
        }

        Self {
            token: RwLock::new(token),
            storage,
        }
    }

    pub async fn token(&self) -> Option<RedactedToken> {
        self.token.read().await.clone()
    }

    pub async fn state(&self) -> SessionState {
        if self.token.read().await.is_some() {
            SessionState::SignedIn
        } else {
            SessionState::SignedOut
        }
    }

    /// SignedOut -> SignedIn. Storage is written before memory so a reload
    /// right after never sees a signed-in UI without a stored token.
    pub async fn sign_in(&self, token: RedactedToken) {
        let mut current = self.token.write().await;
        if current.is_some() {
            warn!("Sign-in while already signed in - replacing token");
        }
        self.storage.set(SESSION_KEY_TOKEN, token.as_str());
        *current = Some(token);
        info!("Session signed in");
    }

    /// SignedIn -> SignedOut.
    pub async fn sign_out(&self) {
        let mut current = self.token.write().await;
        if current.is_none() {
            warn!("Sign-out requested but no session was active");
        }
        self.storage.remove(SESSION_KEY_TOKEN);
        *current = None;
        info!("Session signed out");
    }
}

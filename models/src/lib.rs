//! Domain models for the subway network client.
//!
//! Pure data structures for stations, lines and sections plus the request
//! payloads sent to the backend. Builders validate payloads before anything
//! reaches the network.

pub mod error;
pub mod subway;

pub use error::model_error::ModelError;
pub use subway::auth::{Credentials, NewMember, TokenResponse};
pub use subway::line::{Line, LineUpdate, NewLine, NewLineBuilder};
pub use subway::section::{NewSection, Section};
pub use subway::station::{NewStation, Station};
pub use subway::{Entity, EntityId};

#[cfg(test)]
mod tests;

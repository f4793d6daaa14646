pub mod auth;
pub mod line;
pub mod section;
pub mod station;

/// Server-assigned identifier shared by stations, lines and sections.
pub type EntityId = u64;

/// What the client core needs to know about any cached entity.
pub trait Entity {
    fn id(&self) -> EntityId;
    fn name(&self) -> &str;
}

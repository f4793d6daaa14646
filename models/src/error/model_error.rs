use common::ErrorLocation;

use thiserror::Error as ThisError;

#[derive(Debug, Clone, ThisError)]
pub enum ModelError {
    #[error("Validation Error: {message} {location}")]
    Validation {
        message: String,
        location: ErrorLocation,
    },

    #[error("Pattern Error: {message} {location}")]
    Pattern {
        message: String,
        location: ErrorLocation,
    },
}

impl ModelError {
    /// Message without location, suitable for an alert.
    pub fn message(&self) -> &str {
        match self {
            ModelError::Validation { message, .. } | ModelError::Pattern { message, .. } => {
                message
            }
        }
    }
}

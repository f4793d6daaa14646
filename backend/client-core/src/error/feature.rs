use crate::error::gateway::GatewayError;

use common::ErrorLocation;
use models::ModelError;

use std::panic::Location;

use thiserror::Error as ThisError;

/// Failures raised by a feature action (sign-in, create line, ...).
///
/// Every variant ends up as an alert at the app controller boundary.
#[derive(Debug, Clone, ThisError)]
pub enum FeatureError {
    /// User input rejected before any network call.
    #[error("Validation Error: {message} {location}")]
    Validation {
        message: String,
        location: ErrorLocation,
    },

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error(transparent)]
    Model(#[from] ModelError),
}

impl FeatureError {
    #[track_caller]
    pub fn validation(message: impl Into<String>) -> Self {
        FeatureError::Validation {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Text shown to the user.
    pub fn user_message(&self) -> &str {
        match self {
            FeatureError::Validation { message, .. } => message,
            FeatureError::Gateway(error) => error.message(),
            FeatureError::Model(error) => error.message(),
        }
    }
}

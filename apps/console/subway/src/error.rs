use client_core::error::config::ConfigError;
use client_core::error::CoreError;

use common::ErrorLocation;

use std::panic::Location;

use serde::Serialize;
use thiserror::Error;

/// Errors surfaced by the console front end.
///
/// Core and config failures are flattened to their message so the variant can
/// be serialized next to the location it was raised from.
#[derive(Debug, Error, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum SubwayError {
    /// Error from this app (logger, terminal, runtime)
    #[error("Subway Error: {message} {location}")]
    Subway {
        message: String,
        location: ErrorLocation,
    },

    /// Error from client-core wiring
    #[error("Core Error: {message} {location}")]
    Core {
        message: String,
        location: ErrorLocation,
    },

    /// Config file or environment rejected
    #[error("Config Error: {message} {location}")]
    Config {
        message: String,
        location: ErrorLocation,
    },

    /// A typed command could not be understood
    #[error("Input Error: {message} {location}")]
    Input {
        message: String,
        location: ErrorLocation,
    },
}

impl SubwayError {
    /// Message without the location suffix.
    pub fn message(&self) -> &str {
        match self {
            SubwayError::Subway { message, .. }
            | SubwayError::Core { message, .. }
            | SubwayError::Config { message, .. }
            | SubwayError::Input { message, .. } => message,
        }
    }

    #[track_caller]
    pub fn input(message: impl Into<String>) -> Self {
        SubwayError::Input {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn subway(message: impl Into<String>) -> Self {
        SubwayError::Subway {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<CoreError> for SubwayError {
    #[track_caller]
    fn from(error: CoreError) -> Self {
        SubwayError::Core {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<ConfigError> for SubwayError {
    #[track_caller]
    fn from(error: ConfigError) -> Self {
        SubwayError::Config {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<std::io::Error> for SubwayError {
    #[track_caller]
    fn from(error: std::io::Error) -> Self {
        SubwayError::Subway {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

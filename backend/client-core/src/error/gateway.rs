use common::{ErrorLocation, HttpStatusCode};

use std::panic::Location;

use thiserror::Error as ThisError;

/// Failures reaching or talking to the subway backend.
///
/// `Clone` so a single in-flight collection fetch can hand the same failure
/// to every caller waiting on it.
#[derive(Debug, Clone, ThisError)]
pub enum GatewayError {
    #[error("HTTP Error: {message} {location}")]
    Http {
        message: String,
        location: ErrorLocation,
    },

    #[error("JSON Error: {message} {location}")]
    Json {
        message: String,
        location: ErrorLocation,
    },

    #[error("URL Parse Error: {message} {location}")]
    UrlParse {
        message: String,
        location: ErrorLocation,
    },

    #[error("Server Error: HTTP {status} - {message} {location}")]
    Status {
        status: HttpStatusCode,
        message: String,
        location: ErrorLocation,
    },
}

impl GatewayError {
    /// Status code of a rejected request, if the server answered at all.
    pub fn status(&self) -> Option<HttpStatusCode> {
        match self {
            GatewayError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Human-readable message without location.
    pub fn message(&self) -> &str {
        match self {
            GatewayError::Http { message, .. }
            | GatewayError::Json { message, .. }
            | GatewayError::UrlParse { message, .. }
            | GatewayError::Status { message, .. } => message,
        }
    }
}

impl From<url::ParseError> for GatewayError {
    #[track_caller]
    fn from(error: url::ParseError) -> Self {
        GatewayError::UrlParse {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<reqwest::Error> for GatewayError {
    #[track_caller]
    fn from(error: reqwest::Error) -> Self {
        GatewayError::Http {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<serde_json::Error> for GatewayError {
    #[track_caller]
    fn from(error: serde_json::Error) -> Self {
        GatewayError::Json {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

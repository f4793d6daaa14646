// Unit tests for error module

use crate::error::SubwayError;

use client_core::error::config::ConfigError;

use common::ErrorLocation;

use std::panic::Location;

/// **VALUE**: Tests that errors serialize with their variant tag.
///
/// **BUG THIS CATCHES**: Would catch the serde tag layout changing, which
/// breaks anything that reads structured errors from the log.
#[test]
fn given_subway_error_when_serialized_then_tagged_with_variant() {
    let err = SubwayError::Input {
        message: String::from("Unknown command: teleport"),
        location: ErrorLocation::from(Location::caller()),
    };

    let json = serde_json::to_string(&err).unwrap();

    assert!(json.contains(r#""type":"Input""#));
    assert!(json.contains("Unknown command: teleport"));
}

#[test]
fn given_config_error_when_converted_then_message_kept_and_location_added() {
    let config_error = ConfigError::Validation {
        location: ErrorLocation::from(Location::caller()),
        reason: String::from("Invalid API endpoint: nope"),
    };

    let err = SubwayError::from(config_error);

    assert!(matches!(err, SubwayError::Config { .. }));
    assert!(err.message().contains("Invalid API endpoint: nope"));
    assert!(err.to_string().contains("error.rs"));
}

use crate::subway::line::line_color_regex;
use crate::{ModelError, NewLineBuilder, NewSection};

fn complete_builder() -> NewLineBuilder {
    NewLineBuilder::default()
        .with_name("Line 2")
        .with_color("bg-green-600")
        .with_up_station(1)
        .with_down_station(2)
        .with_distance(10)
        .with_duration(5)
}

fn message_of(error: ModelError) -> String {
    error.message().to_string()
}

/// **VALUE**: Verifies a fully populated builder produces the payload unchanged.
///
/// **BUG THIS CATCHES**: Would catch the builder swapping up/down ids or dropping
/// distance/duration on the way to the wire.
#[test]
fn given_complete_builder_when_building_then_returns_new_line() {
    let line = complete_builder().build().unwrap();

    assert_eq!(line.name, "Line 2");
    assert_eq!(line.color, "bg-green-600");
    assert_eq!(line.up_station_id, 1);
    assert_eq!(line.down_station_id, 2);
    assert_eq!(line.distance, 10);
    assert_eq!(line.duration, 5);
}

/// **VALUE**: Verifies a missing color is rejected before any request is made.
///
/// **WHY THIS MATTERS**: The create-line form lets the user submit without picking
/// a color. That has to surface as an input error, not a server 400.
#[test]
fn given_missing_color_when_building_then_returns_validation_error() {
    let result = NewLineBuilder::default()
        .with_name("Line 2")
        .with_up_station(1)
        .with_down_station(2)
        .with_distance(10)
        .with_duration(5)
        .build();

    assert_eq!(message_of(result.unwrap_err()), "Line color is required");
}

#[test]
fn given_empty_color_when_building_then_asks_user_to_select_one() {
    let result = complete_builder().with_color("").build();

    assert_eq!(message_of(result.unwrap_err()), "Please select a line color");
}

#[test]
fn given_malformed_color_when_building_then_returns_validation_error() {
    let result = complete_builder().with_color("red").build();

    assert_eq!(message_of(result.unwrap_err()), "Invalid line color: red");
}

/// **VALUE**: Verifies identical endpoints are rejected.
///
/// **BUG THIS CATCHES**: Would catch the shared endpoint validation being skipped
/// by the line builder.
#[test]
fn given_same_up_and_down_station_when_building_then_returns_validation_error() {
    let result = complete_builder().with_down_station(1).build();

    assert_eq!(
        message_of(result.unwrap_err()),
        "Up and down stations must be different"
    );
}

#[test]
fn given_zero_distance_when_building_then_returns_validation_error() {
    let result = complete_builder().with_distance(0).build();

    assert_eq!(
        message_of(result.unwrap_err()),
        "Distance must be greater than zero"
    );
}

#[test]
fn given_blank_name_when_building_then_returns_validation_error() {
    let result = complete_builder().with_name("   ").build();

    assert_eq!(message_of(result.unwrap_err()), "Line name cannot be empty");
}

#[test]
fn given_zero_duration_when_creating_section_then_returns_validation_error() {
    let result = NewSection::new(1, 2, 3, 0);

    assert_eq!(
        message_of(result.unwrap_err()),
        "Duration must be greater than zero"
    );
}

/// **VALUE**: Verifies the color pattern compiles and accepts only palette classes.
///
/// **BUG THIS CATCHES**: Would catch a broken pattern surfacing as a panic or
/// as every color being rejected.
#[test]
fn given_color_pattern_when_compiled_then_matches_palette_classes_only() {
    let regex = line_color_regex().unwrap();

    assert!(regex.is_match("bg-green-600"));
    assert!(regex.is_match("bg-red-100"));
    assert!(!regex.is_match("bg-green-650"));
    assert!(!regex.is_match("green"));
    assert!(!regex.is_match("bg-green-600 extra"));
}

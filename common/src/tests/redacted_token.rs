use crate::RedactedToken;

/// **VALUE**: Verifies the token value never shows up in Debug or Display output.
///
/// **WHY THIS MATTERS**: Session transitions are logged. A token printed with `{:?}`
/// would end up in the log file.
///
/// **BUG THIS CATCHES**: Would catch a derived Debug sneaking back in.
#[test]
fn given_token_when_formatted_then_value_is_redacted() {
    // GIVEN: A token
    let token = RedactedToken::new("secret-access-token");

    // WHEN: Formatting with Debug and Display
    let debug = format!("{token:?}");
    let display = format!("{token}");

    // THEN: Neither contains the secret
    assert!(!debug.contains("secret"));
    assert!(!display.contains("secret"));
    assert_eq!(token.as_str(), "secret-access-token");
    assert_eq!(token.len(), 19);
}

/// **VALUE**: Verifies serialization is refused.
///
/// **BUG THIS CATCHES**: Would catch a token being written into config or a request
/// body by accident through a derived Serialize.
#[test]
fn given_token_when_serialized_then_returns_error() {
    let token = RedactedToken::new("secret");

    let result = serde_json::to_string(&token);

    assert!(result.is_err(), "RedactedToken must not serialize");
}

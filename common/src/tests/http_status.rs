use crate::HttpStatusCode;

/// **VALUE**: Verifies transient status classification used by the gateway retry loop.
///
/// **BUG THIS CATCHES**: Would catch if 4xx auth failures were treated as retryable,
/// which would hammer the sign-in endpoint with bad credentials.
#[test]
fn given_status_codes_when_classified_then_only_transient_codes_are_retryable() {
    for code in [429, 502, 503, 504] {
        assert!(HttpStatusCode(code).is_retryable(), "{code} should be retryable");
    }
    for code in [400, 401, 404, 500] {
        assert!(!HttpStatusCode(code).is_retryable(), "{code} should not be retryable");
    }
}

#[test]
fn given_status_codes_when_checking_ranges_then_client_and_server_errors_split() {
    assert!(HttpStatusCode::UNAUTHORIZED.is_client_error());
    assert!(!HttpStatusCode::UNAUTHORIZED.is_server_error());
    assert!(HttpStatusCode(503).is_server_error());
    assert_eq!(HttpStatusCode::from(400), HttpStatusCode::BAD_REQUEST);
    assert_eq!(HttpStatusCode(404).to_string(), "404");
}

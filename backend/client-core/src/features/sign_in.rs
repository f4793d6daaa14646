//! Sign-in: credentials in, access token out.
//!
//! The session transition itself belongs to the app controller; this module
//! only talks to the backend and maps failures to messages.

use crate::error::feature::FeatureError;
use crate::gateway::HttpGateway;

use common::{HttpStatusCode, RedactedToken};
use models::{Credentials, TokenResponse};

use log::{info, warn};

const LOGIN_TOKEN_ENDPOINT: &str = "/login/token";

pub const SIGN_IN_FAIL_MESSAGE: &str = "Sign-in failed. Please try again.";

/// Curated messages for sign-in rejections, keyed by status code.
pub const SIGN_IN_ERROR_MESSAGES: &[(HttpStatusCode, &str)] = &[
    (
        HttpStatusCode::BAD_REQUEST,
        "Please check your email and password.",
    ),
    (
        HttpStatusCode::UNAUTHORIZED,
        "Email or password does not match.",
    ),
];

/// Message for a rejected sign-in; unmapped codes get the generic one.
pub fn sign_in_error_message(status: Option<HttpStatusCode>) -> &'static str {
    status
        .and_then(|status| {
            SIGN_IN_ERROR_MESSAGES
                .iter()
                .find(|(code, _)| *code == status)
                .map(|(_, message)| *message)
        })
        .unwrap_or(SIGN_IN_FAIL_MESSAGE)
}

pub struct SignIn {
    gateway: HttpGateway,
}

impl SignIn {
    pub fn new(gateway: HttpGateway) -> Self {
        Self { gateway }
    }

    pub async fn request_token(
        &self,
        credentials: &Credentials,
    ) -> Result<RedactedToken, FeatureError> {
        if credentials.email.trim().is_empty() || credentials.password.is_empty() {
            return Err(FeatureError::validation(
                "Please enter your email and password",
            ));
        }

        let response: TokenResponse = self
            .gateway
            .post(LOGIN_TOKEN_ENDPOINT, credentials, None)
            .await?;

        if response.access_token.is_empty() {
            warn!("Sign-in answered without a token");
            return Err(FeatureError::validation(SIGN_IN_FAIL_MESSAGE));
        }

        info!("Signed in as {}", credentials.email);
        Ok(RedactedToken::new(response.access_token))
    }

    /// Text to show for a failed `request_token`.
    pub fn failure_message(error: &FeatureError) -> String {
        match error {
            FeatureError::Gateway(gateway) => sign_in_error_message(gateway.status()).to_string(),
            other => other.user_message().to_string(),
        }
    }
}

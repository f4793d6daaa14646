//! Shared primitives for the subway network client.
//!
//! This crate contains the small value types every other crate leans on:
//! error locations, HTTP status classification and the redacted bearer token.
//!
//! ## Architecture
//!
//! - **common** (this crate): Cross-cutting primitives
//! - **models**: Domain entities and request payloads
//! - **client-core**: Gateway, session, router, cache and feature modules
//! - **subway**: Console application wiring everything together

pub mod error;
pub mod http_status;
pub mod redacted_token;

pub use error::error_location::ErrorLocation;
pub use error::redact_error::RedactError;
pub use http_status::HttpStatusCode;
pub use redacted_token::RedactedToken;

#[cfg(test)]
mod tests;

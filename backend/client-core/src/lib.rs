pub mod app;
pub mod cache;
pub mod config;
pub mod error;
pub mod features;
pub mod gateway;
pub mod router;
pub mod session;
pub mod templates;
pub mod view;

#[cfg(test)]
mod tests;

pub const SUBWAY_API_HOSTNAME: &str = "localhost";
pub const SUBWAY_API_PORT: u16 = 8080;
pub const DEFAULT_API_ENDPOINT: &str =
    const_format::concatcp!("http://", SUBWAY_API_HOSTNAME, ":", SUBWAY_API_PORT);

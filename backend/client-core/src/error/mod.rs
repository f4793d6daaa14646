pub mod config;
pub mod feature;
pub mod gateway;

pub use feature::FeatureError;
pub use gateway::GatewayError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Gateway(#[from] gateway::GatewayError),

    #[error(transparent)]
    Feature(#[from] feature::FeatureError),

    #[error(transparent)]
    Config(#[from] config::ConfigError),
}

//! Errors raised by the renderers.

use thiserror::Error;

use crate::settings::ConfigError;

/// Errors that stop a renderer from starting.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("No point lights found in scene")]
    NoPointLights,

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type for renderer construction.
pub type RenderResult<T> = Result<T, RenderError>;

//! Error types for geometry sessions.

use thiserror::Error;
use trippy_math::GeometryError;

/// Errors raised by the session layer.
#[derive(Error, Debug)]
pub enum TrippyError {
    /// A geometric operation failed.
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// Settings failed validation.
    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    /// Settings could not be parsed.
    #[error("config parse error: {0}")]
    Config(#[from] toml::de::Error),
}

/// Result type for session operations.
pub type Result<T> = std::result::Result<T, TrippyError>;

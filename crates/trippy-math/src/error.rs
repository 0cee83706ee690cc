//! Error types shared by every crate of the geometry kernel.

use thiserror::Error;

/// Errors raised by vector, frame and surface operations.
///
/// All of these indicate a caller programming error. "No intersection" is
/// never an error; intersection queries return `Ok(None)` instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// A direction array did not have the expected leading dimension.
    #[error("invalid dimension: expected {expected}, found {found}")]
    InvalidDimension {
        /// Required size.
        expected: usize,
        /// Size actually supplied.
        found: usize,
    },

    /// Two entities could not be resolved to a common frame.
    #[error("frame mismatch: {0}")]
    FrameMismatch(String),

    /// A parameter lies outside its permitted range.
    #[error("value out of range: {0}")]
    OutOfRange(String),

    /// A frame was built with neither or both orientation inputs.
    #[error("ambiguous construction: {0}")]
    AmbiguousConstruction(String),
}

/// Result type for geometry operations.
pub type Result<T> = std::result::Result<T, GeometryError>;

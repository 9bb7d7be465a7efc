//! Animation error types
//!
//! Animating itself never fails; these cover parsing and configuration.

use thiserror::Error;

/// Animation-related errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnimationError {
    /// Easing name did not match any known curve
    #[error("Unknown easing function: {0}")]
    UnknownEasing(String),

    /// Configuration value out of range
    #[error("Invalid animation config: {0}")]
    InvalidConfig(String),
}

/// Result type for animation operations
pub type Result<T> = std::result::Result<T, AnimationError>;

//! Tween error types

use thiserror::Error;

/// Errors raised while building or reshaping a tween
///
/// Playback itself (`step`, `seek`, `forward`, `backward`) never fails;
/// out-of-range requests saturate instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TweenError {
    /// Builder calls were not paired correctly or a value had the wrong
    /// number of dimensions
    #[error("Malformed sequence: {0}")]
    MalformedSequence(String),

    /// The tween has no segment to modify
    #[error("Tween has no segments")]
    NoSegments,

    /// No easing curve with this name exists
    #[error("Unknown easing: {0}")]
    UnknownEasing(String),
}

/// Result type for tween operations
pub type Result<T> = std::result::Result<T, TweenError>;

//! Error types for the animation core.

use thiserror::Error;

/// Errors surfaced by the animation core.
///
/// Every variant is fatal to the operation that produced it; the core never
/// retries and never rolls back bone writes made earlier in the same tick.
/// The caller decides whether to halt playback, log, or skip the frame.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum AnimationError {
    /// A keyframe value that is not a 3-vector of numbers/expressions was
    /// selected for an exact hit or for interpolation.
    #[error("unsupported animation value format at keyframe t={time}")]
    UnsupportedFormat { time: f32 },

    /// The expression evaluator rejected an expression. Propagated unchanged.
    #[error("failed to evaluate {expression:?}: {reason}")]
    Expression { expression: String, reason: String },

    /// An animation document could not be parsed.
    #[error("invalid animation document: {reason}")]
    Parse { reason: String },

    /// A parsed definition violates a basic invariant.
    #[error("invalid animation definition: {reason}")]
    InvalidDefinition { reason: String },
}

//! Expression evaluator and variable environment seams.
//!
//! The expression language itself (parsing, evaluation) lives outside this
//! crate; hosts implement [`ExpressionEvaluator`] and pass it into
//! `Animation::tick` / `resolve_modifier`. The core only supplies the
//! variable bindings an animation expression may reference.

use crate::clock::PlaybackClock;
use crate::error::AnimationError;

/// Name under which the elapsed animation time is exposed to expressions.
pub const ANIM_TIME_VAR: &str = "query.anim_time";

/// Read-only variable bindings visible to an expression evaluation.
pub trait VariableEnv {
    /// Current value of a named variable, or `None` if unbound.
    fn lookup(&self, name: &str) -> Option<f32>;
}

/// Host-implemented scalar expression evaluator.
///
/// Must support at minimum expressions referencing [`ANIM_TIME_VAR`]. Any
/// evaluation failure is reported as [`AnimationError::Expression`] and
/// treated as fatal by the core.
pub trait ExpressionEvaluator {
    fn evaluate(&self, expression: &str, vars: &dyn VariableEnv) -> Result<f32, AnimationError>;
}

impl<F> ExpressionEvaluator for F
where
    F: Fn(&str, &dyn VariableEnv) -> Result<f32, AnimationError>,
{
    fn evaluate(&self, expression: &str, vars: &dyn VariableEnv) -> Result<f32, AnimationError> {
        self(expression, vars)
    }
}

/// Variable bindings backed by a live playback clock.
///
/// `query.anim_time` is re-read from the clock on every lookup rather than
/// captured once, so two evaluations within one tick may observe slightly
/// different times, exactly like the driving wall clock.
pub struct ClockVars<'a> {
    clock: &'a PlaybackClock,
}

impl<'a> ClockVars<'a> {
    pub fn new(clock: &'a PlaybackClock) -> Self {
        Self { clock }
    }
}

impl VariableEnv for ClockVars<'_> {
    fn lookup(&self, name: &str) -> Option<f32> {
        (name == ANIM_TIME_VAR).then(|| self.clock.current_time())
    }
}

//! Bone modifier resolution.
//!
//! Turns a `BoneModifier` plus the current playback time into a concrete
//! 3-vector:
//! - scalar expression: evaluated once, replicated to all three axes;
//! - vector: each axis evaluated independently (literals pass through);
//! - timeline: keys sorted ascending, then scanned from the last entry
//!   backward. An exact time hit returns that keyframe; otherwise the first
//!   key at or before the current time is the left keyframe and the right
//!   keyframe wraps around via `(i + 1) % len`, treating the timeline as a
//!   cycle. An empty timeline, or a time before every key, resolves to
//!   `[0, 0, 0]`.

use crate::data::{BoneModifier, Expr, KeyframeValue, Timeline};
use crate::error::AnimationError;
use crate::expr::{ExpressionEvaluator, VariableEnv};

/// Resolve a modifier at the given time. Channel absence is handled by the
/// caller (`BoneTrack` fields are `Option<BoneModifier>`).
pub fn resolve_modifier(
    modifier: &BoneModifier,
    time: f32,
    evaluator: &dyn ExpressionEvaluator,
    vars: &dyn VariableEnv,
) -> Result<[f32; 3], AnimationError> {
    match modifier {
        BoneModifier::Scalar(expression) => {
            let v = evaluator.evaluate(expression, vars)?;
            Ok([v, v, v])
        }
        BoneModifier::Vector(components) => eval_vector(components, evaluator, vars),
        BoneModifier::Timeline(timeline) => resolve_timeline(timeline, time, evaluator, vars),
    }
}

fn eval_expr(
    expr: &Expr,
    evaluator: &dyn ExpressionEvaluator,
    vars: &dyn VariableEnv,
) -> Result<f32, AnimationError> {
    match expr {
        Expr::Number(n) => Ok(*n),
        Expr::Expression(s) => evaluator.evaluate(s, vars),
    }
}

fn eval_vector(
    components: &[Expr; 3],
    evaluator: &dyn ExpressionEvaluator,
    vars: &dyn VariableEnv,
) -> Result<[f32; 3], AnimationError> {
    Ok([
        eval_expr(&components[0], evaluator, vars)?,
        eval_expr(&components[1], evaluator, vars)?,
        eval_expr(&components[2], evaluator, vars)?,
    ])
}

fn keyframe_vector(value: &KeyframeValue, time: f32) -> Result<&[Expr; 3], AnimationError> {
    match value {
        KeyframeValue::Vector(components) => Ok(components),
        KeyframeValue::Unsupported(_) => Err(AnimationError::UnsupportedFormat { time }),
    }
}

fn resolve_timeline(
    timeline: &Timeline,
    time: f32,
    evaluator: &dyn ExpressionEvaluator,
    vars: &dyn VariableEnv,
) -> Result<[f32; 3], AnimationError> {
    // Storage order is unspecified; establish ascending time order here.
    let mut keys: Vec<&(f32, KeyframeValue)> = timeline.keyframes().iter().collect();
    keys.sort_by(|a, b| a.0.total_cmp(&b.0));

    for i in (0..keys.len()).rev() {
        let (key_time, value) = keys[i];
        if *key_time > time {
            // Future keyframe relative to the playback position.
            continue;
        }
        if *key_time == time {
            return eval_vector(keyframe_vector(value, *key_time)?, evaluator, vars);
        }

        // Left keyframe found; the right keyframe wraps to the first entry
        // past the end of the timeline.
        let (right_time, right_value) = keys[(i + 1) % keys.len()];
        let left = eval_vector(keyframe_vector(value, *key_time)?, evaluator, vars)?;
        let right = eval_vector(keyframe_vector(right_value, *right_time)?, evaluator, vars)?;

        // Raw subtraction: negative when the right key has wrapped around.
        let time_delta = right_time - key_time;
        if time_delta == 0.0 {
            // Single keyframe (or duplicated key time) interpolates against
            // itself; return it as a fixed point.
            return Ok(left);
        }

        let mut out = [0.0f32; 3];
        for axis in 0..3 {
            out[axis] = left[axis] + (right[axis] - left[axis]) / time_delta * (time - key_time);
        }
        return Ok(out);
    }

    // Empty timeline, or the current time precedes every keyframe.
    Ok([0.0, 0.0, 0.0])
}

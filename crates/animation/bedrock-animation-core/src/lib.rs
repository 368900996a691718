//! Engine-agnostic playback core for Bedrock-style skeletal model animations.
//!
//! Given a declarative animation definition (per-bone position/rotation/scale
//! modifiers over time), this crate resolves each channel to a concrete
//! 3-vector every frame and writes the composed transform into a borrowed
//! skeleton. The embedded expression language and the skeleton representation
//! are consumed through traits ([`expr::ExpressionEvaluator`],
//! [`skeleton::Skeleton`]); this core does no asset caching, no blending of
//! concurrent animations, and no rendering.

pub mod clock;
pub mod data;
pub mod error;
pub mod expr;
pub mod loader;
pub mod player;
pub mod resolve;
pub mod skeleton;

pub use clock::PlaybackClock;
pub use data::{AnimationDefinition, BoneModifier, BoneTrack, Expr, KeyframeValue, Timeline};
pub use error::AnimationError;
pub use expr::{ClockVars, ExpressionEvaluator, VariableEnv, ANIM_TIME_VAR};
pub use loader::{parse_animation_json, parse_animation_set_json};
pub use player::Animation;
pub use resolve::resolve_modifier;
pub use skeleton::{Bone, BoneMap, Skeleton};

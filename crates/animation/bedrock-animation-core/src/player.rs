//! Animation playback: the per-frame pose updater and its driver surface.

use log::{debug, trace};

use crate::clock::PlaybackClock;
use crate::data::AnimationDefinition;
use crate::error::AnimationError;
use crate::expr::{ClockVars, ExpressionEvaluator};
use crate::resolve::resolve_modifier;
use crate::skeleton::Skeleton;

/// One playing instance of an animation definition.
///
/// Borrows its definition (owned by the caller) and owns a playback clock.
/// The driver contract is `play()` / `pause()` / `tick()` plus the
/// `current_time()` / `should_tick()` queries; the driver is expected to
/// check `should_tick()` before ticking, as `tick()` does not self-guard.
///
/// Single-threaded by design: `tick()` must not run concurrently with itself
/// or with `play()`/`pause()` on the same instance, and no internal locking
/// is provided. Multiple instances ticking the same skeleton in one frame
/// are last-write-wins.
pub struct Animation<'def> {
    definition: &'def AnimationDefinition,
    clock: PlaybackClock,
}

impl<'def> Animation<'def> {
    pub fn new(definition: &'def AnimationDefinition) -> Self {
        Self {
            definition,
            clock: PlaybackClock::new(),
        }
    }

    pub fn definition(&self) -> &AnimationDefinition {
        self.definition
    }

    /// Start (or restart) playback from t=0.
    pub fn play(&mut self) {
        self.clock.play();
    }

    pub fn pause(&mut self) {
        self.clock.pause();
    }

    /// Elapsed seconds since play start, accounting for loop resets.
    pub fn current_time(&self) -> f32 {
        self.clock.current_time()
    }

    pub fn should_tick(&self) -> bool {
        self.clock.should_tick()
    }

    /// Resolve every bone's channels at the current time and write the
    /// composed transforms into the skeleton, then advance the end-of-clip
    /// state (loop reset or pause).
    ///
    /// A fatal error aborts the pass; bones already updated keep their new
    /// values.
    pub fn tick<S>(
        &mut self,
        skeleton: &mut S,
        evaluator: &dyn ExpressionEvaluator,
    ) -> Result<(), AnimationError>
    where
        S: Skeleton + ?Sized,
    {
        let now = self.clock.current_time();
        let vars = ClockVars::new(&self.clock);

        for (name, track) in &self.definition.bones {
            let Some(bone) = skeleton.bone_mut(name) else {
                trace!("animation references unknown bone {name:?}, skipping");
                continue;
            };

            if let Some(modifier) = &track.position {
                let resolved = resolve_modifier(modifier, now, evaluator, &vars)?;
                // Axis-convention flip: x is negated on the position channel.
                for (axis, value) in resolved.into_iter().enumerate() {
                    let signed = if axis == 0 { -value } else { value };
                    bone.position[axis] = bone.default_position[axis] + signed;
                }
            }

            if let Some(modifier) = &track.rotation {
                let resolved = resolve_modifier(modifier, now, evaluator, &vars)?;
                // Degrees in the document; x and y are negated, z is not.
                for (axis, value) in resolved.into_iter().enumerate() {
                    let radians = value.to_radians();
                    let signed = if axis == 2 { radians } else { -radians };
                    bone.rotation[axis] = bone.default_rotation[axis] + signed;
                }
            }

            if let Some(modifier) = &track.scale {
                // Absolute, not additive to the default.
                bone.scale = resolve_modifier(modifier, now, evaluator, &vars)?;
            }
        }

        if now > self.definition.animation_length {
            if self.definition.looping {
                debug!("animation wrapped at {now:.3}s, restarting");
                self.clock.play();
            } else {
                debug!("animation ended at {now:.3}s, pausing");
                self.clock.pause();
            }
        }

        Ok(())
    }
}

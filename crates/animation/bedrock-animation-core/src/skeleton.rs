//! Skeleton boundary: bone handles the pose updater writes through.
//!
//! The skeleton itself is owned by the model/scene layer; the animation core
//! borrows it mutably for the duration of one tick and looks bones up by
//! name.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

/// One joint of a skeletal model: current local transform plus the immutable
/// reference pose it was built from.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bone {
    pub position: [f32; 3],
    /// Euler angles in radians.
    pub rotation: [f32; 3],
    pub scale: [f32; 3],
    /// Reference pose; never written by the animation core.
    pub default_position: [f32; 3],
    pub default_rotation: [f32; 3],
}

impl Bone {
    /// A bone at its reference pose with unit scale.
    pub fn new(default_position: [f32; 3], default_rotation: [f32; 3]) -> Self {
        Self {
            position: default_position,
            rotation: default_rotation,
            scale: [1.0, 1.0, 1.0],
            default_position,
            default_rotation,
        }
    }
}

/// Host-implemented bone lookup. Returning `None` is not an error: animation
/// definitions may reference bones a given model does not have.
pub trait Skeleton {
    fn bone_mut(&mut self, name: &str) -> Option<&mut Bone>;
}

/// Ready-made name-keyed skeleton for hosts and tests.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct BoneMap {
    bones: HashMap<String, Bone>,
}

impl BoneMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, bone: Bone) {
        self.bones.insert(name.into(), bone);
    }

    pub fn get(&self, name: &str) -> Option<&Bone> {
        self.bones.get(name)
    }

    pub fn len(&self) -> usize {
        self.bones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bones.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Bone)> {
        self.bones.iter().map(|(name, bone)| (name.as_str(), bone))
    }
}

impl Skeleton for BoneMap {
    fn bone_mut(&mut self, name: &str) -> Option<&mut Bone> {
        self.bones.get_mut(name)
    }
}

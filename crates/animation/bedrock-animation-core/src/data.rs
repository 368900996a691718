//! Animation data model.
//!
//! Mirrors the Bedrock-style JSON animation schema in memory: one definition
//! maps bone names to per-channel modifiers, where each modifier is either a
//! single scalar expression, a fixed 3-vector of expressions, or a sparse
//! keyframe timeline. Definitions are immutable once loaded and are only
//! referenced (never owned) by the playback core.

use std::fmt;

use hashbrown::HashMap;
use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::AnimationError;

/// Scalar operand of a modifier: a numeric literal or an expression string.
///
/// Literals pass through resolution unevaluated; expression strings go through
/// the host's `ExpressionEvaluator`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Expr {
    Number(f32),
    Expression(String),
}

impl From<f32> for Expr {
    fn from(n: f32) -> Self {
        Expr::Number(n)
    }
}

impl From<&str> for Expr {
    fn from(s: &str) -> Self {
        Expr::Expression(s.to_string())
    }
}

impl From<String> for Expr {
    fn from(s: String) -> Self {
        Expr::Expression(s)
    }
}

/// Value attached to one timeline keyframe.
///
/// The supported shape is a 3-vector of numbers/expressions. Anything else
/// found in a document (a bare scalar, an object with easing metadata, ...)
/// is kept opaquely and becomes a fatal `UnsupportedFormat` error the moment
/// the resolver selects that keyframe; it is never silently approximated.
#[derive(Clone, Debug, PartialEq)]
pub enum KeyframeValue {
    Vector([Expr; 3]),
    Unsupported(serde_json::Value),
}

impl From<[Expr; 3]> for KeyframeValue {
    fn from(components: [Expr; 3]) -> Self {
        KeyframeValue::Vector(components)
    }
}

impl From<[f32; 3]> for KeyframeValue {
    fn from(v: [f32; 3]) -> Self {
        KeyframeValue::Vector([v[0].into(), v[1].into(), v[2].into()])
    }
}

impl<'de> Deserialize<'de> for KeyframeValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = serde_json::Value::deserialize(deserializer)?;
        Ok(match serde_json::from_value::<[Expr; 3]>(raw.clone()) {
            Ok(components) => KeyframeValue::Vector(components),
            Err(_) => KeyframeValue::Unsupported(raw),
        })
    }
}

impl Serialize for KeyframeValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            KeyframeValue::Vector(components) => components.serialize(serializer),
            KeyframeValue::Unsupported(raw) => raw.serialize(serializer),
        }
    }
}

/// Sparse keyframe timeline: `time -> value` pairs in document order.
///
/// Storage order is NOT assumed sorted; the resolver re-establishes ascending
/// time order on each resolution. In JSON this is a map keyed by decimal
/// time strings (`"0.5": [...]`).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Timeline {
    keys: Vec<(f32, KeyframeValue)>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_keyframes<I>(keyframes: I) -> Self
    where
        I: IntoIterator<Item = (f32, KeyframeValue)>,
    {
        Self {
            keys: keyframes.into_iter().collect(),
        }
    }

    pub fn insert(&mut self, time: f32, value: KeyframeValue) {
        self.keys.push((time, value));
    }

    /// Keyframes in storage (document) order.
    pub fn keyframes(&self) -> &[(f32, KeyframeValue)] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl<'de> Deserialize<'de> for Timeline {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct TimelineVisitor;

        impl<'de> Visitor<'de> for TimelineVisitor {
            type Value = Timeline;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of keyframe times to values")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Timeline, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut keys = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((key, value)) = map.next_entry::<String, KeyframeValue>()? {
                    let time: f32 = key.trim().parse().map_err(|_| {
                        de::Error::custom(format_args!("non-numeric keyframe time {key:?}"))
                    })?;
                    keys.push((time, value));
                }
                Ok(Timeline { keys })
            }
        }

        deserializer.deserialize_map(TimelineVisitor)
    }
}

impl Serialize for Timeline {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.keys.len()))?;
        for (time, value) in &self.keys {
            map.serialize_entry(&time.to_string(), value)?;
        }
        map.end()
    }
}

/// Time-varying modifier for one transform channel of one bone.
///
/// JSON shape detection: string -> scalar expression applied to all three
/// axes, 3-element array -> per-axis expressions, object -> keyframe
/// timeline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BoneModifier {
    Scalar(String),
    Vector([Expr; 3]),
    Timeline(Timeline),
}

/// The three transform channels of one bone, each optional.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BoneTrack {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<BoneModifier>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<BoneModifier>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<BoneModifier>,
}

impl BoneTrack {
    /// Present channels with their names, for diagnostics and validation.
    pub fn channels(&self) -> impl Iterator<Item = (&'static str, &BoneModifier)> + '_ {
        [
            ("position", self.position.as_ref()),
            ("rotation", self.rotation.as_ref()),
            ("scale", self.scale.as_ref()),
        ]
        .into_iter()
        .filter_map(|(name, modifier)| modifier.map(|m| (name, m)))
    }
}

/// One named animation: bone tracks plus length and loop flag.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AnimationDefinition {
    /// Length in seconds.
    #[serde(default)]
    pub animation_length: f32,
    /// Restart from t=0 when the length is exceeded; otherwise pause.
    #[serde(default, rename = "loop")]
    pub looping: bool,
    #[serde(default)]
    pub bones: HashMap<String, BoneTrack>,
}

impl AnimationDefinition {
    /// Validate basic invariants: finite non-negative length and keyframe
    /// times.
    pub fn validate_basic(&self) -> Result<(), AnimationError> {
        if !self.animation_length.is_finite() || self.animation_length < 0.0 {
            return Err(AnimationError::InvalidDefinition {
                reason: format!(
                    "animation_length must be finite and >= 0, got {}",
                    self.animation_length
                ),
            });
        }
        for (bone, track) in &self.bones {
            for (channel, modifier) in track.channels() {
                if let BoneModifier::Timeline(timeline) = modifier {
                    for (time, _) in timeline.keyframes() {
                        if !time.is_finite() || *time < 0.0 {
                            return Err(AnimationError::InvalidDefinition {
                                reason: format!(
                                    "keyframe time {time} on {bone}.{channel} must be finite and >= 0"
                                ),
                            });
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modifier_shape_detection_from_json() {
        let scalar: BoneModifier = serde_json::from_str("\"math.sin(query.anim_time)\"").unwrap();
        assert!(matches!(scalar, BoneModifier::Scalar(_)));

        let vector: BoneModifier = serde_json::from_str("[0, \"query.anim_time\", 2.5]").unwrap();
        match vector {
            BoneModifier::Vector([a, b, c]) => {
                assert_eq!(a, Expr::Number(0.0));
                assert_eq!(b, Expr::Expression("query.anim_time".into()));
                assert_eq!(c, Expr::Number(2.5));
            }
            other => panic!("expected vector, got {other:?}"),
        }

        let timeline: BoneModifier =
            serde_json::from_str("{\"1.0\": [0, 0, 0], \"0.5\": [1, 1, 1]}").unwrap();
        match timeline {
            BoneModifier::Timeline(t) => {
                // Document order is preserved, not sorted.
                assert_eq!(t.keyframes()[0].0, 1.0);
                assert_eq!(t.keyframes()[1].0, 0.5);
            }
            other => panic!("expected timeline, got {other:?}"),
        }
    }

    #[test]
    fn non_vector_keyframe_is_kept_opaque() {
        let timeline: Timeline =
            serde_json::from_str("{\"0.0\": {\"post\": [0, 0, 0]}}").unwrap();
        assert!(matches!(
            timeline.keyframes()[0].1,
            KeyframeValue::Unsupported(_)
        ));
    }

    #[test]
    fn non_numeric_keyframe_time_is_a_parse_error() {
        let result: Result<Timeline, _> = serde_json::from_str("{\"start\": [0, 0, 0]}");
        assert!(result.is_err());
    }

    #[test]
    fn validate_basic_rejects_negative_length_and_times() {
        let def = AnimationDefinition {
            animation_length: -1.0,
            ..Default::default()
        };
        assert!(def.validate_basic().is_err());

        let mut def = AnimationDefinition::default();
        def.bones.insert(
            "body".into(),
            BoneTrack {
                position: Some(BoneModifier::Timeline(Timeline::from_keyframes([(
                    -0.5,
                    KeyframeValue::from([0.0, 0.0, 0.0]),
                )]))),
                ..Default::default()
            },
        );
        assert!(def.validate_basic().is_err());
    }
}

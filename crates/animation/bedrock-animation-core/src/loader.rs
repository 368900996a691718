//! Animation document parsing.
//!
//! Accepts Bedrock-style JSON: either a single animation definition or a
//! document with a `"animations"` map of named definitions. File I/O and the
//! surrounding asset pipeline stay with the host; this module only fixes the
//! in-memory shape.

use hashbrown::HashMap;
use log::trace;
use serde::Deserialize;

use crate::data::AnimationDefinition;
use crate::error::AnimationError;

#[derive(Debug, Deserialize)]
struct AnimationDocument {
    #[serde(default)]
    format_version: Option<String>,
    #[serde(default)]
    animations: HashMap<String, AnimationDefinition>,
}

/// Parse a single animation definition and validate its basic invariants.
pub fn parse_animation_json(s: &str) -> Result<AnimationDefinition, AnimationError> {
    let definition: AnimationDefinition =
        serde_json::from_str(s).map_err(|e| AnimationError::Parse {
            reason: e.to_string(),
        })?;
    definition.validate_basic()?;
    Ok(definition)
}

/// Parse an animation document (`{"animations": {name: definition, ...}}`)
/// into named, validated definitions.
pub fn parse_animation_set_json(
    s: &str,
) -> Result<HashMap<String, AnimationDefinition>, AnimationError> {
    let document: AnimationDocument = serde_json::from_str(s).map_err(|e| AnimationError::Parse {
        reason: e.to_string(),
    })?;
    if let Some(version) = &document.format_version {
        trace!("parsing animation document, format_version {version}");
    }
    for (name, definition) in &document.animations {
        definition.validate_basic().map_err(|e| match e {
            AnimationError::InvalidDefinition { reason } => AnimationError::InvalidDefinition {
                reason: format!("animation {name:?}: {reason}"),
            },
            other => other,
        })?;
    }
    Ok(document.animations)
}

use bedrock_animation_core::{
    data::{BoneModifier, Expr},
    error::AnimationError,
    loader::{parse_animation_json, parse_animation_set_json},
};

const WALK_CYCLE: &str = r#"{
    "loop": true,
    "animation_length": 1.25,
    "bones": {
        "leg0": {
            "rotation": {
                "0.0": [0, 0, 0],
                "0.625": [-30, 0, 0],
                "1.25": [0, 0, 0]
            }
        },
        "body": {
            "position": [0, "query.anim_time", 0],
            "scale": "1.0"
        }
    }
}"#;

/// it should parse a single definition with all three modifier shapes
#[test]
fn parses_single_definition() {
    let def = parse_animation_json(WALK_CYCLE).unwrap();
    assert!(def.looping);
    assert_eq!(def.animation_length, 1.25);
    assert_eq!(def.bones.len(), 2);

    let leg = &def.bones["leg0"];
    match leg.rotation.as_ref().unwrap() {
        BoneModifier::Timeline(t) => assert_eq!(t.len(), 3),
        other => panic!("expected timeline, got {other:?}"),
    }
    assert!(leg.position.is_none());
    assert!(leg.scale.is_none());

    let body = &def.bones["body"];
    match body.position.as_ref().unwrap() {
        BoneModifier::Vector([_, y, _]) => {
            assert_eq!(*y, Expr::Expression("query.anim_time".into()));
        }
        other => panic!("expected vector, got {other:?}"),
    }
    assert!(matches!(
        body.scale.as_ref().unwrap(),
        BoneModifier::Scalar(_)
    ));
}

/// it should default length, loop, and bones when absent
#[test]
fn missing_fields_default() {
    let def = parse_animation_json("{}").unwrap();
    assert_eq!(def.animation_length, 0.0);
    assert!(!def.looping);
    assert!(def.bones.is_empty());
}

/// it should parse a document of named animations
#[test]
fn parses_animation_document() {
    let doc = format!(
        r#"{{
            "format_version": "1.8.0",
            "animations": {{
                "animation.pig.walk": {},
                "animation.pig.idle": {{ "animation_length": 2.0 }}
            }}
        }}"#,
        WALK_CYCLE
    );
    let animations = parse_animation_set_json(&doc).unwrap();
    assert_eq!(animations.len(), 2);
    assert!(animations["animation.pig.walk"].looping);
    assert_eq!(animations["animation.pig.idle"].animation_length, 2.0);
}

/// it should reject malformed JSON with a Parse error
#[test]
fn malformed_json_is_a_parse_error() {
    assert!(matches!(
        parse_animation_json("{ not json"),
        Err(AnimationError::Parse { .. })
    ));
}

/// it should reject a negative animation length and name the animation
#[test]
fn invalid_definition_names_the_animation() {
    let doc = r#"{
        "animations": {
            "animation.bad": { "animation_length": -1.0 }
        }
    }"#;
    match parse_animation_set_json(doc) {
        Err(AnimationError::InvalidDefinition { reason }) => {
            assert!(reason.contains("animation.bad"), "reason={reason}");
        }
        other => panic!("expected InvalidDefinition, got {other:?}"),
    }
}

/// it should keep unsupported keyframe shapes opaque instead of failing the load
#[test]
fn unsupported_keyframe_shapes_load_opaquely() {
    let def = parse_animation_json(
        r#"{
            "bones": {
                "body": {
                    "position": {
                        "0.0": [0, 0, 0],
                        "0.5": { "pre": [0, 0, 0], "post": [1, 1, 1] }
                    }
                }
            }
        }"#,
    )
    .unwrap();
    match def.bones["body"].position.as_ref().unwrap() {
        BoneModifier::Timeline(t) => assert_eq!(t.len(), 2),
        other => panic!("expected timeline, got {other:?}"),
    }
}

/// it should reject non-numeric keyframe times
#[test]
fn non_numeric_keyframe_time_fails_parsing() {
    let result = parse_animation_json(
        r#"{ "bones": { "body": { "position": { "start": [0, 0, 0] } } } }"#,
    );
    assert!(matches!(result, Err(AnimationError::Parse { .. })));
}

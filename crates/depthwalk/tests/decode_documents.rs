#![expect(missing_docs)]

mod common;

use depthwalk::{
    Cursor, DecodeError, DecodeOptions, LexerOptions, SyntaxError, Token, TokenKind, TokenReplay,
    model::{
        self,
        cloudfront::{DistributionConfigWithTags, Tag},
        ecs::{ContainerDefinition, MountPoint, TaskDefinition},
    },
};
use rstest::rstest;

fn replay<T: depthwalk::Decode>(tokens: Vec<Token>) -> (Result<Option<T>, DecodeError>, usize) {
    let mut cursor = Cursor::new(TokenReplay::from(tokens));
    let result = model::registry().decode::<T>(&mut cursor);
    (result, cursor.tokens_consumed())
}

#[test]
fn mount_point_from_tokens() {
    let (result, consumed) = replay::<MountPoint>(vec![
        Token::StartObject,
        Token::field("sourceVolume"),
        Token::string("data"),
        Token::field("containerPath"),
        Token::string("/var/data"),
        Token::field("readOnly"),
        Token::boolean(true),
        Token::EndObject,
    ]);
    assert_eq!(
        result.unwrap(),
        Some(
            MountPoint::default()
                .with_source_volume("data")
                .with_container_path("/var/data")
                .with_read_only(true)
        )
    );
    assert_eq!(consumed, 8);
}

#[test]
fn null_mount_point() {
    let (result, consumed) = replay::<MountPoint>(vec![Token::Null]);
    assert_eq!(result.unwrap(), None);
    assert_eq!(consumed, 1);
}

#[test]
fn unknown_field_before_known() {
    let (result, _) = replay::<MountPoint>(vec![
        Token::StartObject,
        Token::field("unknownField"),
        Token::string("x"),
        Token::field("sourceVolume"),
        Token::string("vol1"),
        Token::EndObject,
    ]);
    assert_eq!(
        result.unwrap(),
        Some(MountPoint::default().with_source_volume("vol1"))
    );
}

#[test]
fn task_definition_document() {
    let task: TaskDefinition = model::registry()
        .from_str(common::TASK_DEFINITION)
        .unwrap()
        .unwrap();

    assert_eq!(task.family.as_deref(), Some("hello_world"));
    assert_eq!(task.revision, Some(8));
    assert_eq!(task.status.as_deref(), Some("ACTIVE"));
    let registered_at = task.registered_at.unwrap();
    assert_eq!(registered_at.unix_timestamp(), 1_438_220_400);
    assert_eq!(registered_at.millisecond(), 500);

    let containers = task.container_definitions.unwrap();
    let names: Vec<_> = containers.iter().map(|c| c.name.as_deref()).collect();
    assert_eq!(names, [Some("wordpress"), Some("mysql")]);

    let wordpress = &containers[0];
    assert_eq!(wordpress.environment, Some(vec![]));
    assert_eq!(wordpress.mount_points, Some(vec![]));
    assert_eq!(wordpress.port_mappings.as_ref().unwrap()[0].host_port, Some(80));
    assert_eq!(wordpress.cpu, Some(10));

    let mysql = &containers[1];
    assert_eq!(
        mysql.mount_points.as_deref(),
        Some(
            &[MountPoint::default()
                .with_source_volume("data")
                .with_container_path("/var/lib/mysql")
                .with_read_only(false)][..]
        )
    );
    assert_eq!(
        mysql.command.as_deref(),
        Some(
            &[
                "mysqld".to_owned(),
                "--default-authentication-plugin=mysql_native_password".to_owned()
            ][..]
        )
    );
    assert_eq!(mysql.essential, Some(true));
    assert_eq!(mysql.name.as_deref(), Some("mysql"));
}

#[test]
fn distribution_with_tags_document() {
    let parsed: DistributionConfigWithTags = model::registry()
        .from_str(common::DISTRIBUTION_WITH_TAGS)
        .unwrap()
        .unwrap();
    let config = parsed.distribution_config.unwrap();
    assert_eq!(config.caller_reference.as_deref(), Some("2024-06-01T00:00:00Z"));
    assert_eq!(config.default_root_object.as_deref(), Some("index.html"));
    assert_eq!(config.comment.as_deref(), Some("static site"));
    assert_eq!(config.price_class.as_deref(), Some("PriceClass_100"));
    assert_eq!(config.http_version.as_deref(), Some("http2"));
    assert_eq!(config.enabled, Some(true));
    assert_eq!(config.is_ipv6_enabled, Some(true));
    assert_eq!(
        config.aliases.unwrap().items,
        Some(vec!["www.example.com".to_owned()])
    );
    assert_eq!(
        parsed.tags.unwrap().items.unwrap()[1],
        Tag::default()
            .with_key("DistributionConfig")
            .with_value("not-the-config")
    );
}

#[rstest]
#[case(r#"{"name": 5}"#, "expected string, found number in field `name` at depth 1")]
#[case(r#"{"cpu": "lots"}"#, "invalid i32 value \"lots\": invalid digit found in string in field `cpu`")]
#[case(r#"{"essential": 1}"#, "expected boolean, found number in field `essential` at depth 1")]
#[case(r#"{"mountPoints": {}}"#, "expected array, found start of object in field `mountPoints` at depth 1")]
#[case(r#"{"mountPoints": [5]}"#, "expected object, found number in field `mountPoints` at depth 1")]
#[case(r#"[]"#, "expected object, found start of array")]
fn type_mismatches(#[case] json: &str, #[case] message: &str) {
    let err = model::registry()
        .from_str::<ContainerDefinition>(json)
        .unwrap_err();
    assert_eq!(err.to_string(), message);
}

#[test]
fn truncated_document() {
    let err = model::registry()
        .from_str::<TaskDefinition>(r#"{"family": "web", "containerDefinitions": [{"name": "a"}"#)
        .unwrap_err();
    assert_eq!(
        err,
        DecodeError::Syntax {
            source: SyntaxError::UnexpectedEndOfInput,
            line: 1,
            column: 57,
        }
    );
}

#[test]
fn truncated_token_stream() {
    let (result, _) = replay::<TaskDefinition>(vec![
        Token::StartObject,
        Token::field("containerDefinitions"),
        Token::StartArray,
        Token::StartObject,
        Token::field("name"),
        Token::string("a"),
        Token::EndObject,
    ]);
    assert_eq!(
        result.unwrap_err(),
        DecodeError::UnexpectedEnd {
            field: Some("containerDefinitions".to_owned()),
            depth: 1,
        }
    );
}

#[test]
fn trailing_value_is_rejected() {
    let err = model::registry()
        .from_str::<MountPoint>(r#"{"readOnly": true} {}"#)
        .unwrap_err();
    assert!(matches!(err, DecodeError::Syntax { .. }));
}

#[test]
fn options_are_honoured() {
    let registry = model::registry();
    let json = "{\u{2003}\"readOnly\": true}";
    assert!(registry.from_str::<MountPoint>(json).is_err());
    let mount: Option<MountPoint> = registry
        .from_str_with(
            json,
            LexerOptions {
                allow_unicode_whitespace: true,
            },
            DecodeOptions::default(),
        )
        .unwrap();
    assert_eq!(mount.unwrap().read_only, Some(true));

    let err = registry
        .from_str_with::<TaskDefinition>(
            common::TASK_DEFINITION,
            LexerOptions::default(),
            DecodeOptions { max_depth: 3 },
        )
        .unwrap_err();
    assert_eq!(err, DecodeError::DepthLimitExceeded { limit: 3 });
}

#[test]
fn mismatched_close_in_replay() {
    let (result, _) = replay::<MountPoint>(vec![
        Token::StartObject,
        Token::field("sourceVolume"),
        Token::string("data"),
        Token::EndArray,
    ]);
    assert!(matches!(
        result.unwrap_err(),
        DecodeError::UnexpectedToken {
            found: TokenKind::EndArray,
            ..
        }
    ));
}

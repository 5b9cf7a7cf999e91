//! End-to-end tests for the transformation engine
//!
//! These tests drive the public API only: rules in, records out.

use anyhow::anyhow;
use reshape_core::{
    ContainerInference, Error, PathError, Rule, TransformationEngine, ValidationError,
};
use serde_json::{json, Value};

fn user_profile() -> Value {
    json!({
        "user_name": "John",
        "contact": {"email": "john@example.com", "phone": null},
        "age": "42",
        "tags": ["a", "b"],
        "created": "2024-01-31T12:00:00Z"
    })
}

#[test]
fn test_rename_single_field() {
    let engine = TransformationEngine::new(vec![Rule::builder("userName", "string")
        .source("u", "user_name")
        .required()
        .build()])
    .expect("engine should build");

    let output = engine.transform(&user_profile()).expect("transform should succeed");
    assert_eq!(output, json!({"userName": "John"}));
}

#[test]
fn test_realistic_profile_mapping() {
    let rules = vec![
        Rule::builder("profile.name", "string")
            .source("u", "user_name")
            .constraint("minLength", json!(1))
            .build(),
        Rule::builder("profile.email", "string")
            .source("e", "contact.email")
            .constraint("format", json!("email"))
            .required()
            .build(),
        Rule::builder("profile.phone", "string")
            .source("p", "contact.phone")
            .default_value(json!("unknown"))
            .build(),
        Rule::builder("profile.age", "integer")
            .source("a", "age")
            .transform(|input, _| {
                let age = input["a"]
                    .as_str()
                    .ok_or_else(|| anyhow!("age must be a string"))?
                    .parse::<i64>()?;
                Ok(Some(json!(age)))
            })
            .constraint("minimum", json!(0))
            .constraint("maximum", json!(150))
            .build(),
        Rule::builder("profile.firstTag", "string")
            .source("t", "tags.0")
            .build(),
        Rule::builder("profile.created", "string")
            .source("c", "created")
            .constraint("format", json!("date-time"))
            .build(),
        Rule::builder("profile.nickname", "string")
            .source("n", "nickname")
            .build(),
    ];

    let engine = TransformationEngine::new(rules).unwrap();
    let output = engine.transform(&user_profile()).unwrap();
    assert_eq!(
        output,
        json!({
            "profile": {
                "name": "John",
                "email": "john@example.com",
                "phone": "unknown",
                "age": 42,
                "firstTag": "a",
                "created": "2024-01-31T12:00:00Z"
            }
        })
    );
}

#[test]
fn test_failing_transform_reports_field() {
    let engine = TransformationEngine::new(vec![Rule::builder("user.email", "string")
        .source("e", "contact.email")
        .transform(|_, _| Err(anyhow!("boom")))
        .build()])
    .unwrap();

    let err = engine.transform(&user_profile()).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Transformation failed at field \"user.email\": boom"
    );
}

#[test]
fn test_transform_error_from_std_error_keeps_message() {
    let engine = TransformationEngine::new(vec![Rule::builder("n", "integer")
        .source("v", "user_name")
        .transform(|input, _| {
            let n: i64 = input["v"].as_str().unwrap_or_default().parse()?;
            Ok(Some(json!(n)))
        })
        .build()])
    .unwrap();

    let err = engine.transform(&user_profile()).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Transformation failed at field \"n\": invalid digit found in string"
    );
}

#[test]
fn test_required_message_names_target() {
    let engine = TransformationEngine::new(vec![Rule::builder("account.id", "string")
        .source("id", "account_id")
        .required()
        .build()])
    .unwrap();

    let message = engine.transform(&json!({})).unwrap_err().to_string();
    assert!(message.contains("account.id"));
    assert!(message.contains("required"));
}

#[test]
fn test_nested_target_on_empty_output() {
    let engine =
        TransformationEngine::new(vec![Rule::builder("a.b.c", "number").source("v", "x").build()])
            .unwrap();
    assert_eq!(
        engine.transform(&json!({"x": 3.5})).unwrap(),
        json!({"a": {"b": {"c": 3.5}}})
    );
}

#[test]
fn test_reserved_items_segment() {
    let engine = TransformationEngine::new(vec![
        Rule::builder("items.0.name", "string").source("v", "first").build(),
        Rule::builder("items.1.name", "string").source("v", "second").build(),
    ])
    .unwrap();
    assert_eq!(
        engine
            .transform(&json!({"first": "x", "second": "y"}))
            .unwrap(),
        json!({"items": [{"name": "x"}, {"name": "y"}]})
    );

    let engine = TransformationEngine::new(vec![Rule::builder("items.abc", "string")
        .source("v", "first")
        .build()])
    .unwrap();
    let err = engine.transform(&json!({"first": "x"})).unwrap_err();
    assert_eq!(err.target(), Some("items.abc"));
    assert!(matches!(
        err.root_cause(),
        Error::Path(PathError::CannotTraverse { .. })
    ));
}

#[test]
fn test_next_segment_inference_has_no_reserved_names() {
    let engine = TransformationEngine::builder(vec![
        Rule::builder("items.abc", "string").source("v", "first").build(),
        Rule::builder("list.1", "string").source("v", "first").build(),
    ])
    .container_inference(ContainerInference::NextSegment)
    .build()
    .unwrap();

    assert_eq!(
        engine.transform(&json!({"first": "x"})).unwrap(),
        json!({"items": {"abc": "x"}, "list": [null, "x"]})
    );
}

#[test]
fn test_constraint_violations_are_wrapped() {
    let cases = vec![
        (
            Rule::builder("code", "string")
                .source("v", "v")
                .constraint("pattern", json!("^[A-Z]{3}$"))
                .build(),
            json!({"v": "abcd"}),
        ),
        (
            Rule::builder("score", "number")
                .source("v", "v")
                .constraint("multipleOf", json!(0.5))
                .build(),
            json!({"v": 1.2}),
        ),
        (
            Rule::builder("tags", "array")
                .source("v", "v")
                .constraint("uniqueItems", json!(true))
                .build(),
            json!({"v": [1, 2, 1]}),
        ),
        (
            Rule::builder("when", "string")
                .source("v", "v")
                .constraint("format", json!("date"))
                .build(),
            json!({"v": "2024-02-30"}),
        ),
        (
            Rule::builder("owner", "object")
                .source("v", "v")
                .constraint("required", json!(["id"]))
                .build(),
            json!({"v": {"name": "x"}}),
        ),
    ];

    for (rule, source) in cases {
        let target = rule.target().to_string();
        let engine = TransformationEngine::new(vec![rule]).unwrap();
        let err = engine.transform(&source).unwrap_err();
        assert_eq!(err.target(), Some(target.as_str()));
        assert!(err
            .to_string()
            .starts_with(&format!("Transformation failed at field \"{}\": ", target)));
        assert!(matches!(err.root_cause(), Error::Validation(_)));
    }
}

#[test]
fn test_integer_rejects_fraction() {
    let engine =
        TransformationEngine::new(vec![Rule::builder("n", "integer").source("v", "v").build()])
            .unwrap();
    let err = engine.transform(&json!({"v": 1.5})).unwrap_err();
    assert!(matches!(
        err.root_cause(),
        Error::Validation(ValidationError::TypeMismatch { .. })
    ));
}

#[test]
fn test_source_and_rules_are_untouched() {
    let rules = vec![
        Rule::builder("out.name", "string").source("u", "user_name").build(),
        Rule::builder("out.tags", "array").source("t", "tags").build(),
    ];
    let snapshot = format!("{:?}", rules);
    let engine = TransformationEngine::new(rules.clone()).unwrap();

    let source = user_profile();
    let before = source.clone();
    let first = engine.transform(&source).unwrap();
    let second = engine.transform(&source).unwrap();

    assert_eq!(first, second);
    assert_eq!(source, before);
    assert_eq!(format!("{:?}", rules), snapshot);
    assert_eq!(format!("{:?}", engine.rules()), snapshot);
}

#[test]
fn test_configuration_error_is_not_wrapped() {
    let err = TransformationEngine::new(vec![Rule::builder("", "string").source("v", "x").build()])
        .unwrap_err();
    assert!(err.is_configuration());
    assert!(err.target().is_none());
    assert_eq!(
        err.to_string(),
        "Invalid rule at index 0: 'target' must be a non-empty string"
    );
}

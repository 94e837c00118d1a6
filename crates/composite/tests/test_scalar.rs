use composite_fields::{
    CompositeConfig, FlatData, ValueDict, decode_mapping, resolve_scalar, serialize_scalar,
};
use serde_json::{Value, json};

fn flat(value: Value) -> FlatData {
    value.as_object().cloned().expect("fixture must be an object")
}

fn dict(value: Value) -> ValueDict {
    flat(value)
}

#[test]
fn test_resolves_submitted_subfields() {
    let data = flat(json!({"f-a": "x", "f-b": "y"}));
    let value = resolve_scalar("f", &data, &CompositeConfig::default());
    assert_eq!(value, dict(json!({"a": "x", "b": "y"})));
}

#[test]
fn test_skips_empty_submitted_values() {
    let data = flat(json!({"f-a": "x", "f-b": ""}));
    let value = resolve_scalar("f", &data, &CompositeConfig::default());
    assert_eq!(value, dict(json!({"a": "x"})));
}

#[test]
fn test_submission_wins_over_stored_value() {
    let data = flat(json!({
        "address": {"city": "Old town"},
        "address-city": "New town",
    }));
    let value = resolve_scalar("address", &data, &CompositeConfig::default());
    assert_eq!(value, dict(json!({"city": "New town"})));
}

#[test]
fn test_ignores_unrelated_fields_sharing_a_prefix() {
    let data = flat(json!({
        "f-a": "x",
        "fx-b": "ignored",
        "g-a": "ignored",
        "title": "ignored",
    }));
    let value = resolve_scalar("f", &data, &CompositeConfig::default());
    assert_eq!(value, dict(json!({"a": "x"})));
}

#[test]
fn test_stored_mapping_passthrough() {
    let stored = json!({"a": "x", "nested": {"kept": true}});
    let data = flat(json!({"f": stored.clone()}));
    let value = resolve_scalar("f", &data, &CompositeConfig::default());
    assert_eq!(Value::Object(value), stored);
}

#[test]
fn test_stored_json_text() {
    let data = flat(json!({"f": r#"{"a": "x"}"#}));
    let value = resolve_scalar("f", &data, &CompositeConfig::default());
    assert_eq!(value, dict(json!({"a": "x"})));
}

#[test]
fn test_all_empty_submission_falls_back_to_stored() {
    let data = flat(json!({"f-a": "", "f-b": "", "f": {"a": "stored"}}));
    let value = resolve_scalar("f", &data, &CompositeConfig::default());
    assert_eq!(value, dict(json!({"a": "stored"})));
}

#[test]
fn test_malformed_stored_text_yields_empty() {
    let data = flat(json!({"f": "not valid structured text"}));
    let value = resolve_scalar("f", &data, &CompositeConfig::default());
    assert!(value.is_empty());

    // The same stored value goes through the logged recovery path
    let decoded = decode_mapping("f", &data["f"]);
    assert!(decoded.is_recovered());
    assert!(decoded.error().is_some());
}

#[test]
fn test_stored_non_mapping_yields_empty() {
    for stored in [json!("[1, 2]"), json!(["a"]), json!(7), json!(true)] {
        let data = flat(json!({"f": stored}));
        let value = resolve_scalar("f", &data, &CompositeConfig::default());
        assert!(value.is_empty());
    }
}

#[test]
fn test_missing_or_falsy_stored_value() {
    for data in [json!({}), json!({"f": null}), json!({"f": ""}), json!({"f": {}})] {
        let value = resolve_scalar("f", &flat(data), &CompositeConfig::default());
        assert!(value.is_empty());
    }
}

#[test]
fn test_custom_separator() {
    let config = CompositeConfig::with_separator("__");
    let data = flat(json!({"f__a": "x", "f-b": "ignored"}));
    assert_eq!(resolve_scalar("f", &data, &config), dict(json!({"a": "x"})));
}

#[test]
fn test_does_not_mutate_input() {
    let data = flat(json!({"f-a": "x", "f-b": ""}));
    let before = data.clone();
    let _ = resolve_scalar("f", &data, &CompositeConfig::default());
    assert_eq!(data, before);
}

#[test]
fn test_reserialized_value_resolves_equal() -> composite_fields::Result<()> {
    let config = CompositeConfig::default();
    let submitted = flat(json!({"f-a": "x", "f-b": "y", "f-c": ""}));
    let first = resolve_scalar("f", &submitted, &config);

    let stored = flat(json!({"f": serialize_scalar(&first)?}));
    let second = resolve_scalar("f", &stored, &config);

    assert_eq!(first, second);
    Ok(())
}

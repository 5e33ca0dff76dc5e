//! Tests for reference resolution: `$ref`, anchors, registries and dynamic scope.

use postmortem_jsonschema::{SchemaRegistry, ValidationError, Validator};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

fn errors(schema: Value, instance: Value) -> Vec<ValidationError> {
    Validator::new(schema).unwrap().errors(&instance)
}

#[test]
fn test_definitions_reference() {
    let schema = json!({
        "properties": {"name": {"$ref": "#/definitions/name"}},
        "definitions": {"name": {"type": "string", "minLength": 1}}
    });
    assert!(errors(schema.clone(), json!({"name": "Ada"})).is_empty());

    let found = errors(schema, json!({"name": ""}));
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].instance_location.to_string(), "/name");
    assert_eq!(
        found[0].keyword_location_fragment().as_deref(),
        Some("#/properties/name/$ref/minLength")
    );
}

#[test]
fn test_recursive_schema() {
    let schema = json!({
        "type": "object",
        "properties": {"value": {"type": "integer"}, "next": {"$ref": "#"}}
    });
    let list = json!({"value": 1, "next": {"value": 2, "next": {"value": "three"}}});

    let found = errors(schema, list);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].instance_location.to_string(), "/next/next/value");
}

#[test]
fn test_escaped_pointer_tokens() {
    let schema = json!({
        "$defs": {"a/b": {"type": "integer"}, "c~d": {"type": "string"}, "e f": {"type": "null"}},
        "properties": {
            "slash": {"$ref": "#/$defs/a~1b"},
            "tilde": {"$ref": "#/$defs/c~0d"},
            "space": {"$ref": "#/$defs/e%20f"}
        }
    });
    assert!(errors(schema.clone(), json!({"slash": 1, "tilde": "x", "space": null})).is_empty());
    assert_eq!(errors(schema, json!({"slash": "1", "tilde": 1, "space": 0})).len(), 3);
}

#[test]
fn test_unresolved_reference_is_an_error() {
    let found = errors(json!({"$ref": "#/definitions/missing"}), json!(1));
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].message, "Reference not found '#/definitions/missing'");
    assert_eq!(found[0].code, "unresolved_reference");
}

#[test]
fn test_remote_reference_is_not_fetched() {
    let found = errors(json!({"$ref": "http://example.com/other.json"}), json!(1));
    assert_eq!(
        found[0].message,
        "Remote reference 'http://example.com/other.json' is not supported"
    );
}

#[test]
fn test_nested_id_changes_base() {
    let schema = json!({
        "$id": "http://example.com/root.json",
        "$defs": {
            "item": {
                "$id": "item.json",
                "$defs": {"count": {"type": "integer"}},
                "properties": {"count": {"$ref": "#/$defs/count"}}
            }
        },
        "items": {"$ref": "item.json"}
    });
    assert!(errors(schema.clone(), json!([{"count": 1}])).is_empty());
    assert_eq!(errors(schema, json!([{"count": "x"}])).len(), 1);
}

#[test]
fn test_anchor_reference() {
    let schema = json!({
        "$id": "http://example.com/root.json",
        "$defs": {"positive": {"$anchor": "positive", "exclusiveMinimum": 0}},
        "items": {"$ref": "#positive"}
    });
    assert!(errors(schema.clone(), json!([1, 2])).is_empty());
    assert_eq!(errors(schema, json!([1, 0])).len(), 1);
}

#[test]
fn test_registry_documents_resolve() {
    let registry = SchemaRegistry::new();
    registry
        .register(
            "http://example.com/address.json",
            json!({
                "type": "object",
                "required": ["city"],
                "properties": {"zip": {"$ref": "#/$defs/zip"}},
                "$defs": {"zip": {"type": "string", "pattern": "^[0-9]{5}$"}}
            }),
        )
        .unwrap();

    let validator = Validator::options()
        .with_registry(registry)
        .build(json!({
            "$id": "http://example.com/person.json",
            "properties": {"address": {"$ref": "address.json"}}
        }))
        .unwrap();

    assert!(validator.is_valid(&json!({"address": {"city": "Oslo", "zip": "01234"}})));

    let found = validator.errors(&json!({"address": {"zip": "12"}}));
    let messages: Vec<_> = found.iter().map(|e| e.message.as_str()).collect();
    assert_eq!(
        messages,
        vec![
            "Required property 'city' is missing",
            "'12' does not match pattern: '^[0-9]{5}$'",
        ]
    );
    assert_eq!(found[1].instance_location.to_string(), "/address/zip");
}

#[test]
fn test_registry_validate_uses_uri_as_base() {
    let registry = SchemaRegistry::new();
    registry
        .register("http://example.com/id.json", json!({"type": "integer"}))
        .unwrap();
    registry
        .register(
            "http://example.com/ids.json",
            json!({"type": "array", "items": {"$ref": "id.json"}}),
        )
        .unwrap();

    let result = registry
        .validate("http://example.com/ids.json", &json!([1, "2"]))
        .unwrap();
    assert!(!result.is_valid());
    assert_eq!(result.into_errors()[0].instance_location.to_string(), "/1");
}

#[test]
fn test_validators_snapshot_the_registry() {
    let registry = SchemaRegistry::new();
    let validator = Validator::options()
        .with_registry(registry.clone())
        .build(json!({"$ref": "urn:example:late"}))
        .unwrap();
    registry.register("urn:example:late", json!(true)).unwrap();

    assert_eq!(validator.errors(&json!(1))[0].code, "unresolved_reference");
}

#[test]
fn test_reference_cycle_fails_closed() {
    let validator = Validator::new(json!({
        "$defs": {"a": {"$ref": "#/$defs/b"}, "b": {"$ref": "#/$defs/a"}},
        "$ref": "#/$defs/a"
    }))
    .unwrap();

    let found = validator.errors(&json!(null));
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].message, "Reference cycle detected");
    assert_eq!(found[0].code, "reference_cycle");
    assert_eq!(found[0].keyword_location_fragment().as_deref(), Some("#/$ref/$ref/$ref"));
}

fn nested(depth: usize, innermost: Value) -> Value {
    (0..depth).fold(innermost, |inner, _| json!([inner]))
}

fn nested_arrays(depth: usize) -> Value {
    nested(depth, json!([]))
}

#[test]
fn test_recursive_schema_accepts_deep_data() {
    let schema = json!({"type": "array", "items": {"$ref": "#"}});
    assert!(errors(schema.clone(), nested_arrays(150)).is_empty());

    let found = errors(schema, nested(150, json!(1)));
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].code, "type");
}

#[test]
fn test_deep_data_beyond_depth_limit() {
    let validator = Validator::options()
        .with_max_depth(10)
        .build(json!({"type": "array", "items": {"$ref": "#"}}))
        .unwrap();

    assert!(validator.is_valid(&nested_arrays(9)));
    let found = validator.errors(&nested_arrays(20));
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].message, "Maximum reference depth of 10 exceeded");
    assert_eq!(found[0].code, "max_depth_exceeded");
}

#[test]
fn test_meta_schema_reference() {
    let schema = json!({"$ref": "https://json-schema.org/draft/2020-12/schema"});
    assert!(errors(schema.clone(), json!({"type": "string"})).is_empty());
    assert!(!errors(schema, json!({"type": 12})).is_empty());
}

#[test]
fn test_dynamic_reference_extends_recursive_schema() {
    let registry = SchemaRegistry::new();
    registry
        .register(
            "https://example.com/tree",
            json!({
                "$id": "https://example.com/tree",
                "$dynamicAnchor": "node",
                "type": "object",
                "properties": {
                    "data": true,
                    "children": {"type": "array", "items": {"$dynamicRef": "#node"}}
                }
            }),
        )
        .unwrap();

    let strict = Validator::options()
        .with_registry(registry.clone())
        .build(json!({
            "$id": "https://example.com/strict-tree",
            "$dynamicAnchor": "node",
            "$ref": "tree",
            "required": ["data"]
        }))
        .unwrap();

    let instance = json!({"data": 1, "children": [{"children": []}]});
    let found = strict.errors(&instance);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].message, "Required property 'data' is missing");
    assert_eq!(found[0].instance_location.to_string(), "/children/0");
    assert_eq!(
        found[0].keyword_location_fragment().as_deref(),
        Some("#/$ref/properties/children/items/$dynamicRef/required")
    );

    let loose = registry.validate("https://example.com/tree", &instance).unwrap();
    assert!(loose.is_valid());
}

#[test]
fn test_recursive_reference_extends_recursive_schema() {
    let registry = SchemaRegistry::new();
    registry
        .register(
            "https://example.com/tree",
            json!({
                "$schema": "https://json-schema.org/draft/2019-09/schema",
                "$id": "https://example.com/tree",
                "$recursiveAnchor": true,
                "type": "object",
                "properties": {
                    "children": {"type": "array", "items": {"$recursiveRef": "#"}}
                }
            }),
        )
        .unwrap();

    let strict = Validator::options()
        .with_registry(registry)
        .build(json!({
            "$schema": "https://json-schema.org/draft/2019-09/schema",
            "$id": "https://example.com/strict-tree",
            "$recursiveAnchor": true,
            "$ref": "tree",
            "required": ["data"]
        }))
        .unwrap();

    assert!(strict.is_valid(&json!({"data": 1, "children": [{"data": 2, "children": []}]})));
    let found = strict.errors(&json!({"data": 1, "children": [{"children": []}]}));
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].instance_location.to_string(), "/children/0");
}

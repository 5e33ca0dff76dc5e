//! Tests for draft detection and draft-specific keyword behavior.

use postmortem_jsonschema::{CompileError, Draft, Validator};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

fn with_draft(draft: Draft, mut schema: Value) -> Validator {
    schema["$schema"] = json!(draft.meta_schema_uri());
    Validator::new(schema).unwrap()
}

#[test]
fn test_draft_detection() {
    for draft in Draft::ALL {
        assert_eq!(with_draft(draft, json!({})).draft(), draft);
    }
    assert_eq!(Validator::new(json!({})).unwrap().draft(), Draft::Draft202012);
    assert_eq!(Validator::new(json!(false)).unwrap().draft(), Draft::Draft202012);
}

#[test]
fn test_compile_errors() {
    assert_eq!(
        Validator::new(json!({"$schema": "http://example.com/my-meta"})).err(),
        Some(CompileError::UnknownMetaSchema("http://example.com/my-meta".to_string()))
    );
    assert_eq!(
        Validator::new(json!("string")).err(),
        Some(CompileError::InvalidSchema { found: "string" })
    );
    assert_eq!(
        CompileError::UnknownMetaSchema("x".to_string()).to_string(),
        "unknown meta-schema 'x'"
    );
}

#[test]
fn test_draft4_boolean_exclusive_bounds() {
    let validator = with_draft(
        Draft::Draft4,
        json!({"minimum": 1, "exclusiveMinimum": true, "maximum": 3, "exclusiveMaximum": false}),
    );
    assert!(!validator.is_valid(&json!(1)));
    assert!(validator.is_valid(&json!(3)));
    assert_eq!(
        validator.errors(&json!(1))[0].message,
        "Value is equal or lower than exclusive minimum value of 1"
    );
}

#[test]
fn test_draft4_ignores_later_keywords() {
    let validator = with_draft(Draft::Draft4, json!({"const": 1, "contains": false, "if": false}));
    assert!(validator.is_valid(&json!([2])));
}

#[test]
fn test_numeric_exclusive_bounds_from_draft6() {
    for draft in [Draft::Draft6, Draft::Draft7, Draft::Draft201909, Draft::Draft202012] {
        let validator = with_draft(draft, json!({"exclusiveMinimum": 1, "exclusiveMaximum": 3}));
        assert!(validator.is_valid(&json!(2)), "{}", draft);
        assert!(!validator.is_valid(&json!(3)), "{}", draft);
    }
}

#[test]
fn test_ref_overrides_siblings_until_2019() {
    let schema = json!({
        "definitions": {"int": {"type": "integer"}},
        "$ref": "#/definitions/int",
        "minimum": 10
    });
    for draft in [Draft::Draft4, Draft::Draft6, Draft::Draft7] {
        assert!(with_draft(draft, schema.clone()).is_valid(&json!(5)), "{}", draft);
    }
    for draft in [Draft::Draft201909, Draft::Draft202012] {
        let errors = with_draft(draft, schema.clone()).errors(&json!(5));
        assert_eq!(errors.len(), 1, "{}", draft);
        assert_eq!(errors[0].message, "Value is lower than minimum value of 10");
    }
}

#[test]
fn test_draft4_id_sets_base() {
    let validator = with_draft(
        Draft::Draft4,
        json!({
            "id": "http://example.com/root.json",
            "definitions": {"name": {"id": "name.json", "type": "string"}},
            "properties": {"name": {"$ref": "name.json"}}
        }),
    );
    assert_eq!(validator.resolver().base_uri(), "http://example.com/root.json");
    assert!(!validator.is_valid(&json!({"name": 1})));
}

#[test]
fn test_dependencies_before_2019() {
    let schema = json!({
        "dependencies": {
            "credit_card": ["billing_address"],
            "name": {"required": ["age"]}
        }
    });
    let validator = with_draft(Draft::Draft7, schema.clone());
    assert_eq!(
        validator.errors(&json!({"credit_card": 1}))[0].message,
        "'billing_address' is a dependency for 'credit_card'"
    );
    let schema_errors = validator.errors(&json!({"name": "x"}));
    assert_eq!(
        schema_errors[0].keyword_location_fragment().as_deref(),
        Some("#/dependencies/name/required")
    );

    assert!(with_draft(Draft::Draft202012, schema).is_valid(&json!({"credit_card": 1})));
}

#[test]
fn test_tuple_items_and_additional_items() {
    let schema = json!({"items": [{"type": "integer"}, {"type": "string"}], "additionalItems": false});
    let validator = with_draft(Draft::Draft7, schema);
    assert!(validator.is_valid(&json!([1, "a"])));
    assert_eq!(
        validator
            .errors(&json!([1, "a", null]))
            .into_iter()
            .map(|e| e.message)
            .collect::<Vec<_>>(),
        vec!["Additional results are not permitted in this array."]
    );

    let positional = validator.errors(&json!(["a"]));
    assert_eq!(
        positional[0].keyword_location_fragment().as_deref(),
        Some("#/items/0/type")
    );
}

#[test]
fn test_array_items_form_is_ignored_in_2020_12() {
    let validator = with_draft(Draft::Draft202012, json!({"items": [{"type": "integer"}]}));
    assert!(validator.is_valid(&json!(["not checked"])));
}

#[test]
fn test_contains_bounds_need_2019() {
    let schema = json!({"contains": {"type": "integer"}, "maxContains": 1});
    assert!(with_draft(Draft::Draft7, schema.clone()).is_valid(&json!([1, 2])));
    assert!(!with_draft(Draft::Draft201909, schema).is_valid(&json!([1, 2])));
}

#[test]
fn test_unevaluated_keywords_are_rejected() {
    let validator = with_draft(
        Draft::Draft202012,
        json!({"unevaluatedProperties": false, "unevaluatedItems": {"type": "string"}}),
    );
    let errors = validator.errors(&json!({}));
    let codes: Vec<_> = errors.iter().map(|e| e.code.as_str()).collect();
    assert_eq!(codes, vec!["unsupported_keyword", "unsupported_keyword"]);
    assert_eq!(errors[0].message, "'unevaluatedItems' is not supported");

    let permissive = with_draft(Draft::Draft201909, json!({"unevaluatedProperties": true}));
    assert!(permissive.is_valid(&json!({"a": 1})));

    let older = with_draft(Draft::Draft7, json!({"unevaluatedProperties": false}));
    assert!(older.is_valid(&json!({"a": 1})));
}

#[test]
fn test_schemas_against_their_meta_schema() {
    let meta = Validator::new(Draft::Draft7.meta_schema().unwrap().clone()).unwrap();
    assert_eq!(meta.draft(), Draft::Draft7);

    let good = json!({
        "type": "object",
        "properties": {"name": {"type": "string", "minLength": 1}},
        "required": ["name"]
    });
    assert!(meta.is_valid(&good));

    let bad = json!({"type": "object", "minLength": -1, "required": "name"});
    let errors = meta.errors(&bad);
    let locations: Vec<_> = errors
        .iter()
        .map(|e| e.instance_location.to_string())
        .collect();
    assert!(locations.contains(&"/minLength".to_string()));
    assert!(locations.contains(&"/required".to_string()));
}

#[test]
fn test_every_draft_ships_its_meta_schema() {
    for draft in Draft::ALL {
        let meta = draft.meta_schema().unwrap();
        assert_eq!(Draft::detect(meta).unwrap(), draft, "{}", draft);
    }
}

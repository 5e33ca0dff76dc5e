//! Property tests for engine-wide guarantees.

use postmortem_jsonschema::{json_equal, ValidationError, Validator};
use proptest::prelude::*;
use serde_json::{json, Value};

fn arb_json() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i32>().prop_map(|n| json!(n)),
        (-1000.0f64..1000.0).prop_map(|n| json!(n)),
        "[a-z0-9]{0,6}".prop_map(Value::String),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map("[a-c]", inner, 0..4)
                .prop_map(|members| Value::Object(members.into_iter().collect())),
        ]
    })
}

fn arb_schema() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(json!({"type": "string"})),
        Just(json!({"type": "object", "required": ["a"]})),
        Just(json!({"minimum": 0})),
        Just(json!({"maxLength": 3})),
        Just(json!({"items": {"type": "integer"}})),
        Just(json!({"properties": {"b": {"type": "array"}}})),
        Just(json!({"enum": [null, 1, "a"]})),
        Just(json!({"not": {"type": "null"}})),
    ]
}

fn errors(schema: Value, instance: &Value) -> Vec<ValidationError> {
    Validator::new(schema).unwrap().errors(instance)
}

proptest! {
    #[test]
    fn prop_true_schema_accepts_everything(instance in arb_json()) {
        prop_assert!(errors(json!(true), &instance).is_empty());
        let empty_schema = json!({});
        prop_assert!(errors(empty_schema, &instance).is_empty());
    }

    #[test]
    fn prop_false_schema_rejects_everything(instance in arb_json()) {
        let found = errors(json!(false), &instance);
        prop_assert_eq!(found.len(), 1);
        prop_assert_eq!(found[0].code.as_str(), "false_schema");
    }

    #[test]
    fn prop_all_of_is_union_of_branches(a in arb_schema(), b in arb_schema(), instance in arb_json()) {
        let left = errors(a.clone(), &instance);
        let right = errors(b.clone(), &instance);
        let combined = errors(json!({"allOf": [a, b]}), &instance);

        prop_assert_eq!(combined.len(), left.len() + right.len());
        let messages: Vec<_> = combined.iter().map(|e| e.message.clone()).collect();
        for error in left.iter().chain(&right) {
            prop_assert!(messages.contains(&error.message));
        }
    }

    #[test]
    fn prop_const_accepts_itself(value in arb_json()) {
        let const_schema = json!({"const": value.clone()});
        prop_assert!(errors(const_schema, &value).is_empty());
        let enum_schema = json!({"enum": [value.clone()]});
        prop_assert!(errors(enum_schema, &value).is_empty());
    }

    #[test]
    fn prop_json_equal_is_reflexive_and_symmetric(a in arb_json(), b in arb_json()) {
        prop_assert!(json_equal(&a, &a));
        prop_assert_eq!(json_equal(&a, &b), json_equal(&b, &a));
    }

    #[test]
    fn prop_validation_is_repeatable(schema in arb_schema(), instance in arb_json()) {
        let validator = Validator::new(schema).unwrap();
        prop_assert_eq!(validator.errors(&instance), validator.errors(&instance));
    }
}

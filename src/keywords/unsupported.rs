//! Keywords recognized by a draft but not evaluated by this crate.
//!
//! `unevaluatedItems` and `unevaluatedProperties` need annotation collection
//! across applicators. A schema that uses them with any value other than
//! `true` fails every instance, so it is never silently accepted.

use serde_json::{Map, Value};

use crate::error::ValidationError;
use crate::validation::ValidationContext;

fn unsupported(ctx: &ValidationContext<'_>, keyword: &str, value: &Value) -> Vec<ValidationError> {
    if value == &Value::Bool(true) {
        return Vec::new();
    }
    vec![ctx
        .error(format!("'{}' is not supported", keyword))
        .with_code("unsupported_keyword")]
}

pub(crate) fn unevaluated_items(
    ctx: &mut ValidationContext<'_>,
    value: &Value,
    _: &Value,
    _: &Map<String, Value>,
) -> Vec<ValidationError> {
    unsupported(ctx, "unevaluatedItems", value)
}

pub(crate) fn unevaluated_properties(
    ctx: &mut ValidationContext<'_>,
    value: &Value,
    _: &Value,
    _: &Map<String, Value>,
) -> Vec<ValidationError> {
    unsupported(ctx, "unevaluatedProperties", value)
}

//! `type`, `enum` and `const`.

use serde_json::{Map, Value};

use crate::error::ValidationError;
use crate::validation::ValidationContext;
use crate::value::{is_type, json_equal, render};

/// `type`: a single type name or a list of alternatives.
pub(crate) fn types(
    ctx: &mut ValidationContext<'_>,
    value: &Value,
    instance: &Value,
    _: &Map<String, Value>,
) -> Vec<ValidationError> {
    let names: Vec<&str> = match value {
        Value::String(name) => vec![name.as_str()],
        Value::Array(names) => names.iter().filter_map(Value::as_str).collect(),
        _ => return Vec::new(),
    };
    if names.iter().any(|name| is_type(instance, name)) {
        return Vec::new();
    }
    vec![ctx.error(format!(
        "'{}' is not of type '{}'",
        render(instance),
        names.join("', '")
    ))]
}

pub(crate) fn enumeration(
    ctx: &mut ValidationContext<'_>,
    value: &Value,
    instance: &Value,
    _: &Map<String, Value>,
) -> Vec<ValidationError> {
    let Value::Array(allowed) = value else {
        return Vec::new();
    };
    if allowed.iter().any(|candidate| json_equal(candidate, instance)) {
        Vec::new()
    } else {
        vec![ctx.error(format!(
            "'{}' is not a valid enumeration value of '{}'",
            render(instance),
            value
        ))]
    }
}

pub(crate) fn constant(
    ctx: &mut ValidationContext<'_>,
    value: &Value,
    instance: &Value,
    _: &Map<String, Value>,
) -> Vec<ValidationError> {
    if json_equal(value, instance) {
        Vec::new()
    } else {
        vec![ctx.error(format!(
            "'{}' is not equal to const '{}'",
            render(instance),
            render(value)
        ))]
    }
}

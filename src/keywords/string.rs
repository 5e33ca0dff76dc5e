//! String keywords: `minLength`, `maxLength`, `pattern` and `format`.
//!
//! Lengths count Unicode scalar values, so `"💩"` has length 1.

use serde_json::{Map, Value};

use crate::error::ValidationError;
use crate::validation::ValidationContext;
use crate::value::as_count;

pub(crate) fn min_length(
    ctx: &mut ValidationContext<'_>,
    value: &Value,
    instance: &Value,
    _: &Map<String, Value>,
) -> Vec<ValidationError> {
    match (instance, as_count(value)) {
        (Value::String(s), Some(min)) if (s.chars().count() as u64) < min => vec![ctx.error(
            format!("Length of string is smaller than minimum length {}", min),
        )],
        _ => Vec::new(),
    }
}

pub(crate) fn max_length(
    ctx: &mut ValidationContext<'_>,
    value: &Value,
    instance: &Value,
    _: &Map<String, Value>,
) -> Vec<ValidationError> {
    match (instance, as_count(value)) {
        (Value::String(s), Some(max)) if s.chars().count() as u64 > max => vec![
            ctx.error(format!("Length of string is larger than max length {}", max)),
        ],
        _ => Vec::new(),
    }
}

/// `pattern`: unanchored search in the shared regex dialect.
pub(crate) fn pattern(
    ctx: &mut ValidationContext<'_>,
    value: &Value,
    instance: &Value,
    _: &Map<String, Value>,
) -> Vec<ValidationError> {
    let (Value::String(s), Value::String(pattern)) = (instance, value) else {
        return Vec::new();
    };
    match ctx.regex(pattern) {
        Some(regex) if regex.is_match(s) => Vec::new(),
        Some(_) => vec![ctx.error(format!("'{}' does not match pattern: '{}'", s, pattern))],
        None => vec![ctx
            .error(format!("Regex pattern '{}' is not valid", pattern))
            .with_code("invalid_pattern")],
    }
}

/// `format`: always asserted; unknown names fail.
pub(crate) fn format(
    ctx: &mut ValidationContext<'_>,
    value: &Value,
    instance: &Value,
    _: &Map<String, Value>,
) -> Vec<ValidationError> {
    let (Value::String(s), Value::String(name)) = (instance, value) else {
        return Vec::new();
    };
    match ctx.format(name) {
        Some(check) if check(s) => Vec::new(),
        Some(_) => vec![ctx.error(format!("'{}' is not a valid {}.", s, name))],
        None => vec![ctx
            .error(format!("'format' validation of '{}' is not yet supported.", name))
            .with_code("unsupported_format")],
    }
}

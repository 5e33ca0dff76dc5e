//! Numeric keywords: `multipleOf` and the inclusive/exclusive bounds.
//!
//! Draft 4 expresses exclusivity as boolean modifiers read by `minimum` and
//! `maximum`; later drafts give `exclusiveMinimum`/`exclusiveMaximum` their
//! own numeric bound.

use serde_json::{Map, Value};

use crate::error::ValidationError;
use crate::validation::ValidationContext;

fn number(value: &Value) -> Option<f64> {
    value.as_f64()
}

/// True when `quotient` is integral, allowing for binary rounding of the
/// division (`0.0075 / 0.0001`).
fn is_integral(quotient: f64) -> bool {
    if !quotient.is_finite() {
        return false;
    }
    quotient == quotient.floor()
        || (quotient - quotient.round()).abs() <= quotient.abs() * f64::EPSILON * 2.0
}

pub(crate) fn multiple_of(
    ctx: &mut ValidationContext<'_>,
    value: &Value,
    instance: &Value,
    _: &Map<String, Value>,
) -> Vec<ValidationError> {
    let (Value::Number(n), Value::Number(d)) = (instance, value) else {
        return Vec::new();
    };
    let valid = match (n.as_i64(), d.as_i64()) {
        (Some(n), Some(d)) if d > 0 => n % d == 0,
        _ => match (n.as_f64(), d.as_f64()) {
            (Some(n), Some(d)) if d > 0.0 => is_integral(n / d),
            _ => true,
        },
    };
    if valid {
        Vec::new()
    } else {
        vec![ctx.error(format!("{} is not a multiple of {}", instance, value))]
    }
}

pub(crate) fn minimum(
    ctx: &mut ValidationContext<'_>,
    value: &Value,
    instance: &Value,
    _: &Map<String, Value>,
) -> Vec<ValidationError> {
    match (number(instance), number(value)) {
        (Some(n), Some(min)) if n < min => {
            vec![ctx.error(format!("Value is lower than minimum value of {}", value))]
        }
        _ => Vec::new(),
    }
}

pub(crate) fn maximum(
    ctx: &mut ValidationContext<'_>,
    value: &Value,
    instance: &Value,
    _: &Map<String, Value>,
) -> Vec<ValidationError> {
    match (number(instance), number(value)) {
        (Some(n), Some(max)) if n > max => {
            vec![ctx.error(format!("Value exceeds maximum value of {}", value))]
        }
        _ => Vec::new(),
    }
}

pub(crate) fn exclusive_minimum(
    ctx: &mut ValidationContext<'_>,
    value: &Value,
    instance: &Value,
    _: &Map<String, Value>,
) -> Vec<ValidationError> {
    match (number(instance), number(value)) {
        (Some(n), Some(min)) if n <= min => vec![ctx.error(format!(
            "Value is equal or lower than exclusive minimum value of {}",
            value
        ))],
        _ => Vec::new(),
    }
}

pub(crate) fn exclusive_maximum(
    ctx: &mut ValidationContext<'_>,
    value: &Value,
    instance: &Value,
    _: &Map<String, Value>,
) -> Vec<ValidationError> {
    match (number(instance), number(value)) {
        (Some(n), Some(max)) if n >= max => vec![ctx.error(format!(
            "Value is equal or exceeds exclusive maximum value of {}",
            value
        ))],
        _ => Vec::new(),
    }
}

/// Draft 4 `minimum`, honoring a sibling `exclusiveMinimum: true`.
pub(crate) fn minimum_draft4(
    ctx: &mut ValidationContext<'_>,
    value: &Value,
    instance: &Value,
    schema: &Map<String, Value>,
) -> Vec<ValidationError> {
    if schema.get("exclusiveMinimum") == Some(&Value::Bool(true)) {
        exclusive_minimum(ctx, value, instance, schema)
    } else {
        minimum(ctx, value, instance, schema)
    }
}

/// Draft 4 `maximum`, honoring a sibling `exclusiveMaximum: true`.
pub(crate) fn maximum_draft4(
    ctx: &mut ValidationContext<'_>,
    value: &Value,
    instance: &Value,
    schema: &Map<String, Value>,
) -> Vec<ValidationError> {
    if schema.get("exclusiveMaximum") == Some(&Value::Bool(true)) {
        exclusive_maximum(ctx, value, instance, schema)
    } else {
        maximum(ctx, value, instance, schema)
    }
}

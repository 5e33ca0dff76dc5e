//! Boolean applicators: `allOf`, `anyOf`, `oneOf`, `not` and `if`/`then`/`else`.
//!
//! `allOf` forwards every branch error. The others only decide validity from
//! their branches and report a single error of their own.

use serde_json::{Map, Value};

use crate::error::ValidationError;
use crate::validation::ValidationContext;
use crate::value::render;

fn branches(value: &Value) -> &[Value] {
    match value {
        Value::Array(schemas) => schemas,
        _ => &[],
    }
}

fn count_valid<'s>(ctx: &mut ValidationContext<'s>, schemas: &'s [Value], instance: &Value) -> usize {
    schemas
        .iter()
        .enumerate()
        .filter(|&(i, schema)| ctx.descend_keyword(i.to_string(), instance, schema).is_empty())
        .count()
}

pub(crate) fn all_of<'s>(
    ctx: &mut ValidationContext<'s>,
    value: &'s Value,
    instance: &Value,
    _: &'s Map<String, Value>,
) -> Vec<ValidationError> {
    branches(value)
        .iter()
        .enumerate()
        .flat_map(|(i, schema)| ctx.descend_keyword(i.to_string(), instance, schema))
        .collect()
}

pub(crate) fn any_of<'s>(
    ctx: &mut ValidationContext<'s>,
    value: &'s Value,
    instance: &Value,
    _: &'s Map<String, Value>,
) -> Vec<ValidationError> {
    let schemas = branches(value);
    let matched = schemas
        .iter()
        .enumerate()
        .any(|(i, schema)| ctx.descend_keyword(i.to_string(), instance, schema).is_empty());
    if matched {
        Vec::new()
    } else {
        vec![ctx.error(format!(
            "{} does not meet anyOf validation rules.",
            render(instance)
        ))]
    }
}

pub(crate) fn one_of<'s>(
    ctx: &mut ValidationContext<'s>,
    value: &'s Value,
    instance: &Value,
    _: &'s Map<String, Value>,
) -> Vec<ValidationError> {
    if count_valid(ctx, branches(value), instance) == 1 {
        Vec::new()
    } else {
        vec![ctx.error("Only one value from `oneOf` should be met")]
    }
}

pub(crate) fn not<'s>(
    ctx: &mut ValidationContext<'s>,
    value: &'s Value,
    instance: &Value,
    _: &'s Map<String, Value>,
) -> Vec<ValidationError> {
    if ctx.is_valid(instance, value) {
        vec![ctx.error(format!("'{}' does not match 'not' validation.", render(instance)))]
    } else {
        Vec::new()
    }
}

/// `if` picks `then` or `else`; its own errors are never reported.
pub(crate) fn if_then_else<'s>(
    ctx: &mut ValidationContext<'s>,
    value: &'s Value,
    instance: &Value,
    schema: &'s Map<String, Value>,
) -> Vec<ValidationError> {
    let branch = if ctx.is_valid(instance, value) {
        "then"
    } else {
        "else"
    };
    match schema.get(branch) {
        Some(subschema) => ctx.descend_sibling(branch, instance, subschema),
        None => Vec::new(),
    }
}

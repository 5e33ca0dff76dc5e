//! Array keywords.
//!
//! Before 2020-12, `items` is either one schema for every element or a tuple
//! of positional schemas, with `additionalItems` covering the rest. From
//! 2020-12 the tuple form moves to `prefixItems` and `items` covers what
//! follows it.

use serde_json::{Map, Value};

use crate::error::ValidationError;
use crate::validation::ValidationContext;
use crate::value::{as_count, json_equal, render};

/// Positional validation; the keyword location gains the tuple index.
fn tuple<'s>(
    ctx: &mut ValidationContext<'s>,
    schemas: &'s [Value],
    elements: &[Value],
) -> Vec<ValidationError> {
    elements
        .iter()
        .zip(schemas)
        .enumerate()
        .flat_map(|(i, (item, schema))| {
            ctx.with_keyword_token(i.to_string(), |ctx| ctx.descend_item(i, item, schema))
        })
        .collect()
}

/// Every element from `start` on against one schema.
fn rest<'s>(
    ctx: &mut ValidationContext<'s>,
    schema: &'s Value,
    elements: &[Value],
    start: usize,
) -> Vec<ValidationError> {
    elements
        .iter()
        .enumerate()
        .skip(start)
        .flat_map(|(i, item)| ctx.descend_item(i, item, schema))
        .collect()
}

pub(crate) fn items<'s>(
    ctx: &mut ValidationContext<'s>,
    value: &'s Value,
    instance: &Value,
    _: &'s Map<String, Value>,
) -> Vec<ValidationError> {
    let Value::Array(elements) = instance else {
        return Vec::new();
    };
    match value {
        Value::Array(schemas) => tuple(ctx, schemas, elements),
        schema => rest(ctx, schema, elements, 0),
    }
}

/// Applies only when `items` is a tuple.
pub(crate) fn additional_items<'s>(
    ctx: &mut ValidationContext<'s>,
    value: &'s Value,
    instance: &Value,
    schema: &'s Map<String, Value>,
) -> Vec<ValidationError> {
    let (Value::Array(elements), Some(Value::Array(positional))) = (instance, schema.get("items"))
    else {
        return Vec::new();
    };
    if elements.len() <= positional.len() {
        return Vec::new();
    }
    match value {
        Value::Bool(false) => {
            vec![ctx.error("Additional results are not permitted in this array.")]
        }
        additional => rest(ctx, additional, elements, positional.len()),
    }
}

pub(crate) fn prefix_items<'s>(
    ctx: &mut ValidationContext<'s>,
    value: &'s Value,
    instance: &Value,
    _: &'s Map<String, Value>,
) -> Vec<ValidationError> {
    match (instance, value) {
        (Value::Array(elements), Value::Array(schemas)) => tuple(ctx, schemas, elements),
        _ => Vec::new(),
    }
}

/// 2020-12 `items`: the elements not covered by `prefixItems`.
pub(crate) fn items_after_prefix<'s>(
    ctx: &mut ValidationContext<'s>,
    value: &'s Value,
    instance: &Value,
    schema: &'s Map<String, Value>,
) -> Vec<ValidationError> {
    let Value::Array(elements) = instance else {
        return Vec::new();
    };
    if value.is_array() {
        return Vec::new();
    }
    let start = match schema.get("prefixItems") {
        Some(Value::Array(prefix)) => prefix.len(),
        _ => 0,
    };
    rest(ctx, value, elements, start)
}

pub(crate) fn min_items(
    ctx: &mut ValidationContext<'_>,
    value: &Value,
    instance: &Value,
    _: &Map<String, Value>,
) -> Vec<ValidationError> {
    match (instance, as_count(value)) {
        (Value::Array(elements), Some(min)) if (elements.len() as u64) < min => vec![
            ctx.error(format!("Length of array is smaller than the minimum {}", min)),
        ],
        _ => Vec::new(),
    }
}

pub(crate) fn max_items(
    ctx: &mut ValidationContext<'_>,
    value: &Value,
    instance: &Value,
    _: &Map<String, Value>,
) -> Vec<ValidationError> {
    match (instance, as_count(value)) {
        (Value::Array(elements), Some(max)) if elements.len() as u64 > max => vec![
            ctx.error(format!("Length of array is greater than maximum {}", max)),
        ],
        _ => Vec::new(),
    }
}

pub(crate) fn unique_items(
    ctx: &mut ValidationContext<'_>,
    value: &Value,
    instance: &Value,
    _: &Map<String, Value>,
) -> Vec<ValidationError> {
    let (Value::Array(elements), Value::Bool(true)) = (instance, value) else {
        return Vec::new();
    };
    let duplicated = elements
        .iter()
        .enumerate()
        .any(|(i, a)| elements[i + 1..].iter().any(|b| json_equal(a, b)));
    if duplicated {
        vec![ctx.error(format!("{} does not have unique items", render(instance)))]
    } else {
        Vec::new()
    }
}

fn count_matches<'s>(
    ctx: &mut ValidationContext<'s>,
    schema: &'s Value,
    elements: &[Value],
) -> u64 {
    let mut count = 0;
    for (i, item) in elements.iter().enumerate() {
        if ctx.descend_item(i, item, schema).is_empty() {
            count += 1;
        }
    }
    count
}

/// Draft 6/7 `contains`: at least one element must match.
pub(crate) fn contains<'s>(
    ctx: &mut ValidationContext<'s>,
    value: &'s Value,
    instance: &Value,
    _: &'s Map<String, Value>,
) -> Vec<ValidationError> {
    let Value::Array(elements) = instance else {
        return Vec::new();
    };
    if count_matches(ctx, value, elements) == 0 {
        vec![ctx.error(format!("{} does not match contains", render(instance)))]
    } else {
        Vec::new()
    }
}

/// `contains` with `minContains` (default 1) and `maxContains` (default
/// unbounded). `minContains: 0` without a maximum always passes.
pub(crate) fn contains_bounded<'s>(
    ctx: &mut ValidationContext<'s>,
    value: &'s Value,
    instance: &Value,
    schema: &'s Map<String, Value>,
) -> Vec<ValidationError> {
    let Value::Array(elements) = instance else {
        return Vec::new();
    };
    let min = schema.get("minContains").and_then(as_count).unwrap_or(1);
    let max = schema.get("maxContains").and_then(as_count);
    if min == 0 && max.is_none() {
        return Vec::new();
    }

    let count = count_matches(ctx, value, elements);
    if count < min {
        return vec![ctx.error(format!("{} does not match contains", render(instance)))];
    }
    match max {
        Some(max) if count > max => vec![ctx.error(format!(
            "{} does not match contains + maxContains {}",
            render(instance),
            max
        ))],
        _ => Vec::new(),
    }
}

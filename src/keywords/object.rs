//! Object keywords.

use serde_json::{Map, Value};

use crate::error::ValidationError;
use crate::validation::ValidationContext;
use crate::value::as_count;

pub(crate) fn properties<'s>(
    ctx: &mut ValidationContext<'s>,
    value: &'s Value,
    instance: &Value,
    _: &'s Map<String, Value>,
) -> Vec<ValidationError> {
    let (Value::Object(members), Value::Object(schemas)) = (instance, value) else {
        return Vec::new();
    };
    let mut errors = Vec::new();
    for (name, schema) in schemas {
        if let Some(member) = members.get(name) {
            errors.extend(ctx.with_keyword_token(name.as_str(), |ctx| {
                ctx.descend_property(name, member, schema)
            }));
        }
    }
    errors
}

pub(crate) fn pattern_properties<'s>(
    ctx: &mut ValidationContext<'s>,
    value: &'s Value,
    instance: &Value,
    _: &'s Map<String, Value>,
) -> Vec<ValidationError> {
    let (Value::Object(members), Value::Object(schemas)) = (instance, value) else {
        return Vec::new();
    };
    let mut errors = Vec::new();
    for (pattern, schema) in schemas {
        let Some(regex) = ctx.regex(pattern) else {
            errors.push(
                ctx.error(format!(
                    "'{}' is not a valid regex pattern for patternProperties",
                    pattern
                ))
                .with_code("invalid_pattern"),
            );
            continue;
        };
        for (name, member) in members.iter().filter(|(name, _)| regex.is_match(name)) {
            errors.extend(ctx.with_keyword_token(pattern.as_str(), |ctx| {
                ctx.descend_property(name, member, schema)
            }));
        }
    }
    errors
}

/// Members matched by neither `properties` nor a (valid) `patternProperties` entry.
fn additional_members<'i>(
    ctx: &ValidationContext<'_>,
    members: &'i Map<String, Value>,
    schema: &Map<String, Value>,
) -> Vec<(&'i String, &'i Value)> {
    let declared = schema.get("properties").and_then(Value::as_object);
    let patterns: Vec<_> = schema
        .get("patternProperties")
        .and_then(Value::as_object)
        .map(|patterns| patterns.keys().filter_map(|p| ctx.regex(p)).collect())
        .unwrap_or_default();

    members
        .iter()
        .filter(|(name, _)| !declared.map_or(false, |d| d.contains_key(name.as_str())))
        .filter(|(name, _)| !patterns.iter().any(|regex| regex.is_match(name)))
        .collect()
}

pub(crate) fn additional_properties<'s>(
    ctx: &mut ValidationContext<'s>,
    value: &'s Value,
    instance: &Value,
    schema: &'s Map<String, Value>,
) -> Vec<ValidationError> {
    let Value::Object(members) = instance else {
        return Vec::new();
    };
    let extra = additional_members(ctx, members, schema);
    if extra.is_empty() {
        return Vec::new();
    }
    match value {
        Value::Bool(false) => {
            vec![ctx.error("Additional properties are not permitted in this object.")]
        }
        additional => extra
            .into_iter()
            .flat_map(|(name, member)| ctx.descend_property(name, member, additional))
            .collect(),
    }
}

/// `propertyNames`: every member name, as a string instance.
pub(crate) fn property_names<'s>(
    ctx: &mut ValidationContext<'s>,
    value: &'s Value,
    instance: &Value,
    _: &'s Map<String, Value>,
) -> Vec<ValidationError> {
    let Value::Object(members) = instance else {
        return Vec::new();
    };
    members
        .keys()
        .flat_map(|name| ctx.descend_property(name, &Value::String(name.clone()), value))
        .collect()
}

fn missing<'a>(members: &'a Map<String, Value>, names: &'a [Value]) -> impl Iterator<Item = &'a str> {
    names
        .iter()
        .filter_map(Value::as_str)
        .filter(move |name| !members.contains_key(*name))
}

pub(crate) fn required(
    ctx: &mut ValidationContext<'_>,
    value: &Value,
    instance: &Value,
    _: &Map<String, Value>,
) -> Vec<ValidationError> {
    let (Value::Object(members), Value::Array(names)) = (instance, value) else {
        return Vec::new();
    };
    missing(members, names)
        .map(|name| ctx.error(format!("Required property '{}' is missing", name)))
        .collect()
}

pub(crate) fn min_properties(
    ctx: &mut ValidationContext<'_>,
    value: &Value,
    instance: &Value,
    _: &Map<String, Value>,
) -> Vec<ValidationError> {
    match (instance, as_count(value)) {
        (Value::Object(members), Some(min)) if (members.len() as u64) < min => {
            vec![ctx.error("Amount of properties is less than the required amount")]
        }
        _ => Vec::new(),
    }
}

pub(crate) fn max_properties(
    ctx: &mut ValidationContext<'_>,
    value: &Value,
    instance: &Value,
    _: &Map<String, Value>,
) -> Vec<ValidationError> {
    match (instance, as_count(value)) {
        (Value::Object(members), Some(max)) if members.len() as u64 > max => {
            vec![ctx.error("Amount of properties is greater than maximum permitted")]
        }
        _ => Vec::new(),
    }
}

fn dependent_names(
    ctx: &mut ValidationContext<'_>,
    property: &str,
    names: &[Value],
    members: &Map<String, Value>,
) -> Vec<ValidationError> {
    missing(members, names)
        .map(|name| ctx.error(format!("'{}' is a dependency for '{}'", name, property)))
        .collect()
}

/// Pre-2019 `dependencies`: each entry is a list of names or a schema.
pub(crate) fn dependencies<'s>(
    ctx: &mut ValidationContext<'s>,
    value: &'s Value,
    instance: &Value,
    _: &'s Map<String, Value>,
) -> Vec<ValidationError> {
    let (Value::Object(members), Value::Object(entries)) = (instance, value) else {
        return Vec::new();
    };
    let mut errors = Vec::new();
    for (property, dependency) in entries.iter().filter(|(p, _)| members.contains_key(*p)) {
        match dependency {
            Value::Array(names) => errors.extend(dependent_names(ctx, property, names, members)),
            schema => errors.extend(ctx.descend_keyword(property.as_str(), instance, schema)),
        }
    }
    errors
}

pub(crate) fn dependent_required(
    ctx: &mut ValidationContext<'_>,
    value: &Value,
    instance: &Value,
    _: &Map<String, Value>,
) -> Vec<ValidationError> {
    let (Value::Object(members), Value::Object(entries)) = (instance, value) else {
        return Vec::new();
    };
    let mut errors = Vec::new();
    for (property, dependency) in entries.iter().filter(|(p, _)| members.contains_key(*p)) {
        if let Value::Array(names) = dependency {
            errors.extend(dependent_names(ctx, property, names, members));
        }
    }
    errors
}

pub(crate) fn dependent_schemas<'s>(
    ctx: &mut ValidationContext<'s>,
    value: &'s Value,
    instance: &Value,
    _: &'s Map<String, Value>,
) -> Vec<ValidationError> {
    let (Value::Object(members), Value::Object(entries)) = (instance, value) else {
        return Vec::new();
    };
    entries
        .iter()
        .filter(|(property, _)| members.contains_key(*property))
        .flat_map(|(property, schema)| ctx.descend_keyword(property.as_str(), instance, schema))
        .collect()
}

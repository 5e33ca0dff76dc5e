//! Reference keywords: `$ref`, `$dynamicRef` and `$recursiveRef`.

use serde_json::{Map, Value};

use crate::error::ValidationError;
use crate::resolver::{ResolveError, Resolved};
use crate::uri;
use crate::validation::ValidationContext;

fn unresolved(
    ctx: &ValidationContext<'_>,
    reference: &str,
    err: ResolveError,
) -> Vec<ValidationError> {
    tracing::debug!(reference, scope = ctx.current_scope(), error = %err, "unresolved reference");
    vec![ctx.error(err.to_string()).with_code("unresolved_reference")]
}

/// `$ref`: validate against the resolved target in the target's scope.
pub(crate) fn reference<'s>(
    ctx: &mut ValidationContext<'s>,
    value: &'s Value,
    instance: &Value,
    _: &'s Map<String, Value>,
) -> Vec<ValidationError> {
    let Value::String(reference) = value else {
        return Vec::new();
    };
    match ctx.resolve(reference) {
        Ok(target) => ctx.descend_reference(instance, target),
        Err(err) => unresolved(ctx, reference, err),
    }
}

/// `$dynamicRef`: resolved statically, unless the target declares the
/// referenced `$dynamicAnchor`, in which case the outermost resource on the
/// dynamic scope declaring the same anchor wins.
pub(crate) fn dynamic_reference<'s>(
    ctx: &mut ValidationContext<'s>,
    value: &'s Value,
    instance: &Value,
    _: &'s Map<String, Value>,
) -> Vec<ValidationError> {
    let Value::String(reference) = value else {
        return Vec::new();
    };
    let target = match ctx.resolve(reference) {
        Ok(target) => target,
        Err(err) => return unresolved(ctx, reference, err),
    };

    let anchor = uri::split_fragment(reference).1;
    let declares = |schema: &Value| schema.get("$dynamicAnchor").and_then(Value::as_str) == Some(anchor);
    let target = if !anchor.is_empty() && !anchor.starts_with('/') && declares(target.schema) {
        let resolver = ctx.resolver();
        ctx.scopes()
            .iter()
            .find_map(|scope| {
                resolver
                    .lookup_anchor(scope, anchor)
                    .filter(|schema| declares(*schema))
                    .map(|schema| Resolved {
                        schema,
                        base: scope.clone(),
                    })
            })
            .unwrap_or(target)
    } else {
        target
    };
    ctx.descend_reference(instance, target)
}

/// `$recursiveRef`: like `$ref`, but when the target sets
/// `$recursiveAnchor: true` the outermost scope resource that also sets it wins.
pub(crate) fn recursive_reference<'s>(
    ctx: &mut ValidationContext<'s>,
    value: &'s Value,
    instance: &Value,
    _: &'s Map<String, Value>,
) -> Vec<ValidationError> {
    let Value::String(reference) = value else {
        return Vec::new();
    };
    let target = match ctx.resolve(reference) {
        Ok(target) => target,
        Err(err) => return unresolved(ctx, reference, err),
    };

    let recursive = |schema: &Value| schema.get("$recursiveAnchor") == Some(&Value::Bool(true));
    let target = if recursive(target.schema) {
        let resolver = ctx.resolver();
        ctx.scopes()
            .iter()
            .find_map(|scope| {
                resolver
                    .lookup(scope)
                    .filter(|schema| recursive(*schema))
                    .map(|schema| Resolved {
                        schema,
                        base: scope.clone(),
                    })
            })
            .unwrap_or(target)
    } else {
        target
    };
    ctx.descend_reference(instance, target)
}

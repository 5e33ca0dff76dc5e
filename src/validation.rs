//! Per-call validation state.
//!
//! A [`ValidationContext`] is created for every `validate` call and threaded
//! explicitly through the keyword validators. It owns the two location stacks
//! used for error reporting, the stack of base URIs used to resolve
//! references, and the references currently being followed (for the depth
//! bound and cycle detection). Every push is paired with a pop on the same
//! call path, so the stacks are back at their initial state when validation
//! returns.

use std::collections::HashSet;

use regex::Regex;
use serde_json::{Map, Value};

use crate::error::ValidationError;
use crate::format::FormatFn;
use crate::keywords::KeywordFn;
use crate::pointer::JsonPointer;
use crate::resolver::{RefResolver, ResolveError, Resolved};
use crate::uri;
use crate::validator::Validator;

pub(crate) struct ValidationContext<'s> {
    validator: &'s Validator,
    instance_location: JsonPointer,
    keyword_location: JsonPointer,
    scopes: Vec<String>,
    depth: usize,
    // (target schema, instance) address pairs of the references being followed.
    active: HashSet<(usize, usize)>,
}

impl<'s> ValidationContext<'s> {
    pub(crate) fn new(validator: &'s Validator) -> Self {
        Self {
            validator,
            instance_location: JsonPointer::root(),
            keyword_location: JsonPointer::root(),
            scopes: vec![validator.resolver.base_uri().to_string()],
            depth: 0,
            active: HashSet::new(),
        }
    }

    /// Validates `instance` against `schema` at the current locations.
    ///
    /// This is the only recursion primitive; applicators reach subschemas
    /// through it (or the `descend_*` wrappers around it).
    pub(crate) fn validate(&mut self, instance: &Value, schema: &'s Value) -> Vec<ValidationError> {
        match schema {
            Value::Bool(true) => Vec::new(),
            Value::Bool(false) => vec![self.error("Falsy schema").with_code("false_schema")],
            Value::Object(keywords) => self.validate_object(instance, keywords),
            _ => Vec::new(),
        }
    }

    fn validate_object(
        &mut self,
        instance: &Value,
        schema: &'s Map<String, Value>,
    ) -> Vec<ValidationError> {
        let draft = self.validator.draft;
        let table = self.validator.keywords;

        if draft.ref_overrides_siblings() {
            if let (Some(reference), Some(validate)) = (schema.get("$ref"), table.get("$ref")) {
                return self.apply("$ref", *validate, reference, instance, schema);
            }
        }

        let scope = schema
            .get(draft.id_keyword())
            .and_then(Value::as_str)
            .filter(|id| !id.starts_with('#'))
            .map(|id| uri::without_fragment(&uri::join(self.current_scope(), id)).to_string());

        let apply_all = |ctx: &mut Self| {
            let mut errors = Vec::new();
            for (keyword, validate) in table {
                if let Some(value) = schema.get(*keyword) {
                    errors.extend(ctx.apply(keyword, *validate, value, instance, schema));
                }
            }
            errors
        };

        match scope {
            Some(scope) => self.with_scope(scope, apply_all),
            None => apply_all(self),
        }
    }

    fn apply(
        &mut self,
        keyword: &str,
        validate: KeywordFn,
        value: &'s Value,
        instance: &Value,
        schema: &'s Map<String, Value>,
    ) -> Vec<ValidationError> {
        self.with_keyword_token(keyword, |ctx| validate(ctx, value, instance, schema))
    }

    /// Validates an array element: pushes `index` onto the instance location.
    pub(crate) fn descend_item(
        &mut self,
        index: usize,
        item: &Value,
        schema: &'s Value,
    ) -> Vec<ValidationError> {
        self.with_instance_token(index.to_string(), |ctx| ctx.validate(item, schema))
    }

    /// Validates an object member: pushes `key` onto the instance location.
    pub(crate) fn descend_property(
        &mut self,
        key: &str,
        value: &Value,
        schema: &'s Value,
    ) -> Vec<ValidationError> {
        self.with_instance_token(key, |ctx| ctx.validate(value, schema))
    }

    /// Validates against a subschema addressed by `token` under the current keyword.
    pub(crate) fn descend_keyword(
        &mut self,
        token: impl Into<String>,
        instance: &Value,
        schema: &'s Value,
    ) -> Vec<ValidationError> {
        self.with_keyword_token(token, |ctx| ctx.validate(instance, schema))
    }

    /// Validates against a sibling keyword's subschema (`then`/`else` from `if`).
    pub(crate) fn descend_sibling(
        &mut self,
        keyword: &str,
        instance: &Value,
        schema: &'s Value,
    ) -> Vec<ValidationError> {
        let current = self.keyword_location.pop();
        let errors = self.descend_keyword(keyword, instance, schema);
        if let Some(current) = current {
            self.keyword_location.push(current);
        }
        errors
    }

    /// Follows a resolved reference, entering its resource scope.
    ///
    /// Following a reference back to a schema that is already being applied
    /// to the same instance can never terminate, so it fails closed with a
    /// schema-defect error. Independently, the number of nested descents is
    /// bounded by the validator's maximum depth.
    pub(crate) fn descend_reference(
        &mut self,
        instance: &Value,
        target: Resolved<'s>,
    ) -> Vec<ValidationError> {
        let schema = target.schema;
        let key = (
            schema as *const Value as usize,
            instance as *const Value as usize,
        );
        if self.active.contains(&key) {
            return vec![self
                .error("Reference cycle detected")
                .with_code("reference_cycle")];
        }
        let max_depth = self.validator.max_depth;
        if self.depth >= max_depth {
            return vec![self
                .error(format!("Maximum reference depth of {} exceeded", max_depth))
                .with_code("max_depth_exceeded")];
        }

        self.active.insert(key);
        self.depth += 1;
        let errors = self.with_scope(target.base, |ctx| ctx.validate(instance, schema));
        self.depth -= 1;
        self.active.remove(&key);
        errors
    }

    pub(crate) fn with_instance_token<T>(
        &mut self,
        token: impl Into<String>,
        f: impl FnOnce(&mut Self) -> T,
    ) -> T {
        self.instance_location.push(token);
        let result = f(self);
        self.instance_location.pop();
        result
    }

    pub(crate) fn with_keyword_token<T>(
        &mut self,
        token: impl Into<String>,
        f: impl FnOnce(&mut Self) -> T,
    ) -> T {
        self.keyword_location.push(token);
        let result = f(self);
        self.keyword_location.pop();
        result
    }

    fn with_scope<T>(&mut self, scope: String, f: impl FnOnce(&mut Self) -> T) -> T {
        let depth = self.scopes.len();
        self.scopes.push(scope);
        let result = f(self);
        debug_assert_eq!(self.scopes.len(), depth + 1, "unbalanced scope stack");
        self.scopes.pop();
        result
    }

    /// Validates without keeping errors.
    pub(crate) fn is_valid(&mut self, instance: &Value, schema: &'s Value) -> bool {
        self.validate(instance, schema).is_empty()
    }

    /// Creates an error at the current instance and keyword locations.
    pub(crate) fn error(&self, message: impl Into<String>) -> ValidationError {
        let code = self.keyword_location.last().unwrap_or("schema").to_string();
        ValidationError::new(message, self.instance_location.clone())
            .with_keyword_location(self.keyword_location.clone())
            .with_code(code)
    }

    /// Resolves a reference against the innermost base URI.
    pub(crate) fn resolve(&self, reference: &str) -> Result<Resolved<'s>, ResolveError> {
        let resolver: &'s RefResolver = &self.validator.resolver;
        resolver.resolve(reference, self.current_scope())
    }

    pub(crate) fn resolver(&self) -> &'s RefResolver {
        &self.validator.resolver
    }

    /// Base URIs entered so far, outermost first.
    pub(crate) fn scopes(&self) -> &[String] {
        &self.scopes
    }

    pub(crate) fn current_scope(&self) -> &str {
        self.scopes.last().map(String::as_str).unwrap_or("")
    }

    pub(crate) fn format(&self, name: &str) -> Option<&'s FormatFn> {
        self.validator.formats.get(name)
    }

    /// Compiles (or fetches) a pattern in the shared regex dialect.
    pub(crate) fn regex(&self, pattern: &str) -> Option<Regex> {
        self.validator.patterns.get(pattern)
    }

    #[cfg(test)]
    pub(crate) fn is_balanced(&self) -> bool {
        self.instance_location.is_root()
            && self.keyword_location.is_root()
            && self.scopes.len() == 1
            && self.active.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validator::Validator;
    use serde_json::json;

    #[test]
    fn test_stacks_are_restored() {
        let validator = Validator::new(json!({
            "$id": "http://example.com/root.json",
            "properties": {
                "a": {"items": {"$ref": "#/$defs/n"}},
                "b": {"$id": "nested.json", "type": "string"}
            },
            "$defs": {"n": {"type": "number"}}
        }))
        .unwrap();

        let mut ctx = ValidationContext::new(&validator);
        let errors = ctx.validate(&json!({"a": [1, "x"], "b": 3}), validator.schema());
        assert_eq!(errors.len(), 2);
        assert!(ctx.is_balanced());
    }

    #[test]
    fn test_error_carries_locations() {
        let validator = Validator::new(json!({"items": {"type": "string"}})).unwrap();
        let mut ctx = ValidationContext::new(&validator);
        let errors = ctx.validate(&json!(["a", 2]), validator.schema());
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].instance_location.to_string(), "/1");
        assert_eq!(errors[0].keyword_location_fragment().as_deref(), Some("#/items/type"));
        assert_eq!(errors[0].code, "type");
    }

    fn nested_arrays(depth: usize) -> Value {
        (0..depth).fold(json!([]), |inner, _| json!([inner]))
    }

    #[test]
    fn test_depth_limit_fails_closed() {
        let validator = Validator::options()
            .with_max_depth(5)
            .build(json!({"type": "array", "items": {"$ref": "#"}}))
            .unwrap();
        let mut ctx = ValidationContext::new(&validator);
        let errors = ctx.validate(&nested_arrays(10), validator.schema());
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code, "max_depth_exceeded");
        assert_eq!(errors[0].instance_location.to_string(), "/0/0/0/0/0/0");
        assert!(ctx.is_balanced());
    }

    #[test]
    fn test_self_reference_is_a_cycle() {
        let validator = Validator::new(json!({"$ref": "#"})).unwrap();
        let mut ctx = ValidationContext::new(&validator);
        let errors = ctx.validate(&json!(1), validator.schema());
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code, "reference_cycle");
        assert!(ctx.is_balanced());
    }

    #[test]
    fn test_same_schema_on_new_instance_is_not_a_cycle() {
        let validator = Validator::new(json!({"type": "array", "items": {"$ref": "#"}})).unwrap();
        let mut ctx = ValidationContext::new(&validator);
        assert!(ctx.validate(&nested_arrays(150), validator.schema()).is_empty());
        assert!(ctx.is_balanced());
    }
}

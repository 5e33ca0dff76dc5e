//! Compiled validators and their configuration.

use std::fmt;
use std::sync::Arc;

use rayon::prelude::*;
use serde_json::Value;

use crate::draft::Draft;
use crate::error::{CompileError, ValidationError, ValidationResult};
use crate::format::{FormatFn, FormatTable};
use crate::keywords::KeywordTable;
use crate::pattern::PatternCache;
use crate::registry::SchemaRegistry;
use crate::resolver::RefResolver;
use crate::validation::ValidationContext;
use crate::value::value_type_name;

/// Default bound on nested reference descents.
///
/// Recursive schemas descend once per level of the instance they walk, so
/// this is also the deepest instance a schema like
/// `{"items": {"$ref": "#"}}` can check. Reference cycles that never reach
/// a new instance are detected separately and do not count against it.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// A schema prepared for validating instances.
///
/// A validator owns its schema and an immutable resource store, so it can
/// validate any number of instances, from any number of threads. Each call
/// keeps its own location and scope state and reports every error it finds.
///
/// # Example
///
/// ```rust
/// use postmortem_jsonschema::Validator;
/// use serde_json::json;
///
/// let validator = Validator::new(json!({
///     "type": "object",
///     "properties": {"name": {"type": "string"}, "price": {"type": "number"}},
///     "required": ["name"]
/// }))
/// .unwrap();
///
/// let result = validator.validate(&json!({"price": 34.99}));
/// let errors = result.errors().unwrap();
/// assert_eq!(errors.len(), 1);
/// assert_eq!(errors.first().message, "Required property 'name' is missing");
/// assert_eq!(errors.first().keyword_location_fragment().as_deref(), Some("#/required"));
/// ```
pub struct Validator {
    pub(crate) schema: Value,
    pub(crate) draft: Draft,
    pub(crate) keywords: &'static KeywordTable,
    pub(crate) formats: FormatTable,
    pub(crate) resolver: RefResolver,
    pub(crate) patterns: PatternCache,
    pub(crate) max_depth: usize,
}

impl Validator {
    /// Builds a validator with default options. The draft comes from
    /// `$schema`, defaulting to 2020-12.
    ///
    /// # Errors
    ///
    /// Returns a [`CompileError`] when `$schema` is unknown or the schema is
    /// neither an object nor a boolean.
    pub fn new(schema: Value) -> Result<Self, CompileError> {
        ValidatorOptions::new().build(schema)
    }

    /// Starts a [`ValidatorOptions`] builder.
    pub fn options() -> ValidatorOptions {
        ValidatorOptions::new()
    }

    /// Registers (or replaces) a named format predicate.
    ///
    /// ```rust
    /// use postmortem_jsonschema::Validator;
    /// use serde_json::json;
    ///
    /// let mut validator = Validator::new(json!({"format": "even"})).unwrap();
    /// validator.add_format("even", |s| s.len() % 2 == 0);
    ///
    /// assert!(validator.is_valid(&json!("ab")));
    /// assert!(!validator.is_valid(&json!("abc")));
    /// ```
    pub fn add_format<F>(&mut self, name: impl Into<String>, check: F) -> &mut Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        self.formats.insert(name.into(), Arc::new(check));
        self
    }

    /// Validates an instance, collecting every error.
    pub fn validate(&self, instance: &Value) -> ValidationResult {
        ValidationResult::from_errors(self.errors(instance))
    }

    /// Returns every error for an instance, in report order.
    pub fn errors(&self, instance: &Value) -> Vec<ValidationError> {
        let mut ctx = ValidationContext::new(self);
        ctx.validate(instance, &self.schema)
    }

    /// Returns true if the instance has no errors.
    pub fn is_valid(&self, instance: &Value) -> bool {
        self.errors(instance).is_empty()
    }

    /// Validates independent instances in parallel. Results keep input order.
    pub fn validate_batch(&self, instances: &[Value]) -> Vec<ValidationResult> {
        instances
            .par_iter()
            .map(|instance| self.validate(instance))
            .collect()
    }

    /// The draft this validator evaluates.
    pub fn draft(&self) -> Draft {
        self.draft
    }

    /// The root schema.
    pub fn schema(&self) -> &Value {
        &self.schema
    }

    /// The resource store used for references.
    pub fn resolver(&self) -> &RefResolver {
        &self.resolver
    }

    /// The reference depth bound.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validator")
            .field("draft", &self.draft)
            .field("base_uri", &self.resolver.base_uri())
            .field("formats", &self.formats.keys().collect::<Vec<_>>())
            .field("max_depth", &self.max_depth)
            .finish()
    }
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<Validator>();
    assert_sync::<Validator>();
};

/// Configuration for building a [`Validator`].
///
/// # Example
///
/// ```rust
/// use postmortem_jsonschema::{Draft, Validator};
/// use serde_json::json;
///
/// let validator = Validator::options()
///     .with_draft(Draft::Draft7)
///     .with_max_depth(50)
///     .with_format("lowercase", |s| s.chars().all(|c| !c.is_uppercase()))
///     .build(json!({"format": "lowercase"}))
///     .unwrap();
///
/// assert_eq!(validator.draft(), Draft::Draft7);
/// assert!(!validator.is_valid(&json!("Hello")));
/// ```
#[derive(Clone)]
pub struct ValidatorOptions {
    draft: Option<Draft>,
    base_uri: Option<String>,
    max_depth: usize,
    formats: Vec<(String, FormatFn)>,
    registry: Option<SchemaRegistry>,
}

impl ValidatorOptions {
    /// Default options: draft from `$schema`, depth bound of 100.
    pub fn new() -> Self {
        Self {
            draft: None,
            base_uri: None,
            max_depth: DEFAULT_MAX_DEPTH,
            formats: Vec::new(),
            registry: None,
        }
    }

    /// Forces a draft, ignoring `$schema`.
    pub fn with_draft(mut self, draft: Draft) -> Self {
        self.draft = Some(draft);
        self
    }

    /// Sets the base URI used when the root schema has no identifier.
    pub fn with_base_uri(mut self, base_uri: impl Into<String>) -> Self {
        self.base_uri = Some(base_uri.into());
        self
    }

    /// Sets the maximum number of nested reference descents (default
    /// [`DEFAULT_MAX_DEPTH`]).
    ///
    /// Exceeding it reports a `max_depth_exceeded` error instead of
    /// recursing further. Raise it to validate deeper recursive data; every
    /// level costs stack space on the validating thread.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Adds a named format predicate.
    pub fn with_format<F>(mut self, name: impl Into<String>, check: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        let check: FormatFn = Arc::new(check);
        self.formats.push((name.into(), check));
        self
    }

    /// Makes the registry's documents resolvable by reference.
    pub fn with_registry(mut self, registry: SchemaRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Builds a validator for `schema`.
    ///
    /// # Errors
    ///
    /// Returns a [`CompileError`] when the draft cannot be determined or the
    /// schema is neither an object nor a boolean.
    pub fn build(&self, schema: Value) -> Result<Validator, CompileError> {
        let draft = match self.draft {
            Some(draft) if schema.is_object() || schema.is_boolean() => draft,
            Some(_) => {
                return Err(CompileError::InvalidSchema {
                    found: value_type_name(&schema),
                })
            }
            None => Draft::detect(&schema)?,
        };

        let documents = self
            .registry
            .as_ref()
            .map(SchemaRegistry::documents)
            .unwrap_or_default();
        let resolver = RefResolver::new(draft, &schema, self.base_uri.as_deref(), &documents);

        let mut formats = draft.formats();
        for (name, check) in &self.formats {
            formats.insert(name.clone(), Arc::clone(check));
        }

        tracing::debug!(
            %draft,
            base_uri = resolver.base_uri(),
            resources = resolver.len(),
            formats = formats.len(),
            "compiled validator"
        );

        Ok(Validator {
            schema,
            draft,
            keywords: draft.keywords(),
            formats,
            resolver,
            patterns: PatternCache::new(),
            max_depth: self.max_depth,
        })
    }
}

impl Default for ValidatorOptions {
    fn default() -> Self {
        Self::new()
    }
}

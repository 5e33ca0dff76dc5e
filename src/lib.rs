//! # Postmortem JSON Schema
//!
//! A JSON Schema validator that reports ALL violations of an instance, each
//! with the location in the instance and the path through the schema that
//! produced it, rather than stopping at the first failure.
//!
//! ## Overview
//!
//! Drafts 4, 6, 7, 2019-09 and 2020-12 are supported by one evaluation engine
//! driven by per-draft keyword tables. The draft is taken from `$schema`,
//! defaulting to 2020-12. References are resolved against an in-memory store
//! holding the root schema, its identified subschemas, the draft's
//! meta-schemas and any documents registered in a [`SchemaRegistry`]; nothing
//! is fetched over the network.
//!
//! ## Core Types
//!
//! - [`Validator`]: a compiled schema, reusable and shareable across threads
//! - [`ValidationResult`]: `Valid`, or `Invalid` with every [`ValidationError`]
//! - [`JsonPointer`]: instance and keyword locations (`/items/0`, `#/required`)
//! - [`Draft`]: the supported draft variants
//!
//! ## Example
//!
//! ```rust
//! use postmortem_jsonschema::{validate, ToJson};
//! use serde_json::json;
//!
//! let schema = json!({
//!     "items": {"$ref": "#/definitions/name"},
//!     "definitions": {"name": {"type": "string"}}
//! });
//!
//! let result = validate(&json!(["Ada", true]), schema).unwrap();
//! assert_eq!(
//!     result.to_json(),
//!     json!({
//!         "valid": false,
//!         "errors": [{
//!             "error": "'true' is not of type 'string'",
//!             "instanceLocation": "/1",
//!             "keywordLocation": "#/items/$ref/type"
//!         }]
//!     })
//! );
//! ```

pub mod draft;
pub mod error;
pub mod format;
pub mod output;
pub mod pointer;
pub mod registry;
pub mod resolver;
pub mod validator;

mod keywords;
mod pattern;
mod uri;
mod validation;
mod value;

pub use draft::Draft;
pub use error::{CompileError, ValidationError, ValidationErrors, ValidationResult};
pub use format::{FormatFn, FormatTable};
pub use output::ToJson;
pub use pointer::{resolve_pointer, JsonPointer, PointerError};
pub use registry::{RegistryError, SchemaRegistry};
pub use resolver::{RefResolver, ResolveError, Resolved};
pub use validator::{Validator, ValidatorOptions, DEFAULT_MAX_DEPTH};
pub use value::json_equal;

use serde_json::Value;

/// Validates `instance` against `schema` in one call.
///
/// # Errors
///
/// Returns a [`CompileError`] when the schema cannot be compiled.
pub fn validate(instance: &Value, schema: Value) -> Result<ValidationResult, CompileError> {
    Ok(Validator::new(schema)?.validate(instance))
}

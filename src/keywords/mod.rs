//! Keyword validators.
//!
//! Every keyword is a plain function with the same signature: it receives the
//! context, the keyword's value, the instance and the enclosing schema object,
//! and returns the errors it found. A keyword whose instance type does not
//! apply returns no errors. Applicators recurse only through
//! [`ValidationContext`], so locations and scopes stay balanced.

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::error::ValidationError;
use crate::validation::ValidationContext;

pub(crate) mod array;
pub(crate) mod combinators;
pub(crate) mod generic;
pub(crate) mod numeric;
pub(crate) mod object;
pub(crate) mod reference;
pub(crate) mod string;
pub(crate) mod unsupported;

/// `(context, keyword value, instance, enclosing schema) -> errors`
pub(crate) type KeywordFn = for<'s> fn(
    &mut ValidationContext<'s>,
    &'s Value,
    &Value,
    &'s Map<String, Value>,
) -> Vec<ValidationError>;

/// Keyword name to validator, in evaluation order.
pub(crate) type KeywordTable = IndexMap<&'static str, KeywordFn>;

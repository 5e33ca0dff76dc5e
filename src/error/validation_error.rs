//! Validation error types.
//!
//! This module provides [`ValidationError`] for single violations,
//! [`ValidationErrors`] for accumulating them, and [`ValidationResult`]
//! for the outcome of validating one instance.

use std::fmt::{self, Display};

use stillwater::prelude::*;
use stillwater::Validation;

use crate::pointer::JsonPointer;

/// A single violation found while validating an instance.
///
/// - **message**: Human-readable description of the failure
/// - **instance_location**: Where in the instance the failure occurred
/// - **keyword_location**: Path through the schema to the failing keyword
/// - **code**: The keyword that produced the error (e.g. `required`)
///
/// # Example
///
/// ```rust
/// use postmortem_jsonschema::{JsonPointer, ValidationError};
///
/// let error = ValidationError::new(
///     "Required property 'name' is missing",
///     JsonPointer::root(),
/// )
/// .with_keyword_location(JsonPointer::root().push_token("required"))
/// .with_code("required");
///
/// assert_eq!(error.keyword_location_fragment().as_deref(), Some("#/required"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Human-readable error message.
    pub message: String,
    /// Pointer into the instance.
    pub instance_location: JsonPointer,
    /// Pointer into the schema, rendered with a leading `#`.
    pub keyword_location: Option<JsonPointer>,
    /// Machine-readable error code.
    pub code: String,
}

impl ValidationError {
    /// Creates a new error at the given instance location.
    ///
    /// The code defaults to "validation_error".
    pub fn new(message: impl Into<String>, instance_location: JsonPointer) -> Self {
        Self {
            message: message.into(),
            instance_location,
            keyword_location: None,
            code: "validation_error".to_string(),
        }
    }

    /// Sets the keyword location and returns self for chaining.
    pub fn with_keyword_location(mut self, keyword_location: JsonPointer) -> Self {
        self.keyword_location = Some(keyword_location);
        self
    }

    /// Sets the error code and returns self for chaining.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    /// Returns the keyword location as a fragment such as `#/items/$ref/type`.
    pub fn keyword_location_fragment(&self) -> Option<String> {
        self.keyword_location.as_ref().map(JsonPointer::to_fragment)
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.instance_location.is_root() {
            write!(f, "(root): {}", self.message)
        } else {
            write!(f, "{}: {}", self.instance_location, self.message)
        }
    }
}

impl std::error::Error for ValidationError {}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<ValidationError>();
    assert_sync::<ValidationError>();
};

/// A non-empty collection of validation errors.
///
/// `ValidationErrors` implements `Semigroup`, so error sets produced by
/// independent checks combine associatively:
///
/// ```rust
/// use postmortem_jsonschema::{JsonPointer, ValidationError, ValidationErrors};
/// use stillwater::prelude::*;
///
/// let left = ValidationErrors::single(ValidationError::new("a", JsonPointer::root()));
/// let right = ValidationErrors::single(ValidationError::new("b", JsonPointer::root()));
/// assert_eq!(left.combine(right).len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationErrors(NonEmptyVec<ValidationError>);

impl ValidationErrors {
    /// Creates a collection holding one error.
    pub fn single(error: ValidationError) -> Self {
        Self(NonEmptyVec::singleton(error))
    }

    /// Creates a collection from a `NonEmptyVec`.
    pub fn from_non_empty(errors: NonEmptyVec<ValidationError>) -> Self {
        Self(errors)
    }

    /// Creates a collection from a `Vec`, or None if it is empty.
    pub fn from_vec(errors: Vec<ValidationError>) -> Option<Self> {
        NonEmptyVec::from_vec(errors).map(Self)
    }

    /// Returns the number of errors.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; the collection is never empty.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns an iterator over the errors in report order.
    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.0.iter()
    }

    /// Returns all errors reported at the given instance location.
    pub fn at_instance_location(&self, location: &JsonPointer) -> Vec<&ValidationError> {
        self.0
            .iter()
            .filter(|e| &e.instance_location == location)
            .collect()
    }

    /// Returns all errors with the given code.
    pub fn with_code(&self, code: &str) -> Vec<&ValidationError> {
        self.0.iter().filter(|e| e.code == code).collect()
    }

    /// Returns the first error reported.
    pub fn first(&self) -> &ValidationError {
        self.0.head()
    }

    /// Converts into a `Vec<ValidationError>`.
    pub fn into_vec(self) -> Vec<ValidationError> {
        self.0.into_vec()
    }
}

impl Semigroup for ValidationErrors {
    fn combine(self, other: Self) -> Self {
        ValidationErrors(self.0.combine(other.0))
    }
}

impl Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Validation failed with {} error(s):", self.len())?;
        for (i, error) in self.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_vec().into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a ValidationError;
    type IntoIter = Box<dyn Iterator<Item = &'a ValidationError> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.0.iter())
    }
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<ValidationErrors>();
    assert_sync::<ValidationErrors>();
};

/// The outcome of validating one instance.
///
/// `Valid` when no errors were found, otherwise `Invalid` with every error
/// in the order it was reported.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationResult {
    /// The instance satisfies the schema.
    Valid,
    /// The instance violates the schema.
    Invalid(ValidationErrors),
}

impl ValidationResult {
    /// Builds a result from an error sequence; empty means valid.
    pub fn from_errors(errors: Vec<ValidationError>) -> Self {
        match ValidationErrors::from_vec(errors) {
            Some(errors) => ValidationResult::Invalid(errors),
            None => ValidationResult::Valid,
        }
    }

    /// Returns true when no errors were reported.
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }

    /// Returns the errors of an invalid result.
    pub fn errors(&self) -> Option<&ValidationErrors> {
        match self {
            ValidationResult::Valid => None,
            ValidationResult::Invalid(errors) => Some(errors),
        }
    }

    /// Consumes the result, returning its errors (empty when valid).
    pub fn into_errors(self) -> Vec<ValidationError> {
        match self {
            ValidationResult::Valid => Vec::new(),
            ValidationResult::Invalid(errors) => errors.into_vec(),
        }
    }

    /// Converts into a stillwater `Validation` for applicative composition.
    pub fn into_validation(self) -> Validation<(), ValidationErrors> {
        match self {
            ValidationResult::Valid => Validation::Success(()),
            ValidationResult::Invalid(errors) => Validation::Failure(errors),
        }
    }
}

impl From<ValidationResult> for Result<(), ValidationErrors> {
    fn from(result: ValidationResult) -> Self {
        result.into_validation().into_result()
    }
}

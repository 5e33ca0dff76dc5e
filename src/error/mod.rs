//! Error types for validation failures and schema defects.
//!
//! Validation never stops at the first violation: every error found while
//! walking an instance is reported through [`ValidationResult`]. Problems that
//! make a schema unusable are reported as [`CompileError`] when the validator
//! is built.

mod compile_error;
mod validation_error;

pub use compile_error::CompileError;
pub use validation_error::{ValidationError, ValidationErrors, ValidationResult};

//! Errors raised while building a validator.

use thiserror::Error;

/// Fatal problems with a schema document, detected before any instance is
/// validated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    /// `$schema` names a meta-schema this crate does not implement.
    #[error("unknown meta-schema '{0}'")]
    UnknownMetaSchema(String),

    /// `$schema` is present but is not a string.
    #[error("'$schema' must be a string")]
    NonStringMetaSchema,

    /// The schema document is neither an object nor a boolean.
    #[error("schema must be an object or a boolean, got {found}")]
    InvalidSchema {
        /// JSON type name of the rejected document.
        found: &'static str,
    },
}

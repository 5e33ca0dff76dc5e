//! JSON Schema draft variants.
//!
//! A [`Draft`] is pure data: which keywords it evaluates (and in what order),
//! which formats it knows, what its identifier keyword is called and whether
//! `$ref` hides its siblings. The evaluation engine is shared by every draft.

mod metaschemas;
mod vocabulary;

use std::fmt::{self, Display};

use serde_json::Value;

use crate::error::CompileError;
use crate::format::FormatTable;
use crate::keywords::KeywordTable;
use crate::uri;
use crate::value::value_type_name;

pub(crate) use metaschemas::{meta_resources, meta_schema};

/// A supported JSON Schema draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Draft {
    /// Draft 4 (`http://json-schema.org/draft-04/schema#`).
    Draft4,
    /// Draft 6 (`http://json-schema.org/draft-06/schema#`).
    Draft6,
    /// Draft 7 (`http://json-schema.org/draft-07/schema#`).
    Draft7,
    /// Draft 2019-09 (`https://json-schema.org/draft/2019-09/schema`).
    Draft201909,
    /// Draft 2020-12 (`https://json-schema.org/draft/2020-12/schema`).
    #[default]
    Draft202012,
}

impl Draft {
    /// Every supported draft, oldest first.
    pub const ALL: [Draft; 5] = [
        Draft::Draft4,
        Draft::Draft6,
        Draft::Draft7,
        Draft::Draft201909,
        Draft::Draft202012,
    ];

    /// The canonical `$schema` URI of this draft.
    pub fn meta_schema_uri(self) -> &'static str {
        match self {
            Draft::Draft4 => "http://json-schema.org/draft-04/schema#",
            Draft::Draft6 => "http://json-schema.org/draft-06/schema#",
            Draft::Draft7 => "http://json-schema.org/draft-07/schema#",
            Draft::Draft201909 => "https://json-schema.org/draft/2019-09/schema",
            Draft::Draft202012 => "https://json-schema.org/draft/2020-12/schema",
        }
    }

    /// Looks a draft up by its meta-schema URI. A trailing empty fragment is
    /// ignored.
    ///
    /// ```rust
    /// use postmortem_jsonschema::Draft;
    ///
    /// assert_eq!(
    ///     Draft::from_uri("http://json-schema.org/draft-07/schema"),
    ///     Some(Draft::Draft7)
    /// );
    /// assert_eq!(Draft::from_uri("http://example.com/custom"), None);
    /// ```
    pub fn from_uri(uri: &str) -> Option<Draft> {
        let wanted = uri::normalize(uri);
        Draft::ALL
            .into_iter()
            .find(|draft| uri::normalize(draft.meta_schema_uri()) == wanted)
    }

    /// Selects the draft declared by a schema's `$schema` keyword, defaulting
    /// to 2020-12 when absent.
    ///
    /// # Errors
    ///
    /// Returns `CompileError::UnknownMetaSchema` for an unrecognized URI and
    /// `CompileError::NonStringMetaSchema` when `$schema` is not a string.
    pub fn detect(schema: &Value) -> Result<Draft, CompileError> {
        match schema {
            Value::Bool(_) => Ok(Draft::default()),
            Value::Object(map) => match map.get("$schema") {
                None => Ok(Draft::default()),
                Some(Value::String(uri)) => {
                    Draft::from_uri(uri).ok_or_else(|| CompileError::UnknownMetaSchema(uri.clone()))
                }
                Some(_) => Err(CompileError::NonStringMetaSchema),
            },
            other => Err(CompileError::InvalidSchema {
                found: value_type_name(other),
            }),
        }
    }

    /// The keyword that declares a resource identifier.
    pub fn id_keyword(self) -> &'static str {
        match self {
            Draft::Draft4 => "id",
            _ => "$id",
        }
    }

    /// True when a `$ref` makes the rest of its schema object inert.
    pub fn ref_overrides_siblings(self) -> bool {
        matches!(self, Draft::Draft4 | Draft::Draft6 | Draft::Draft7)
    }

    /// The draft's main meta-schema.
    pub fn meta_schema(self) -> Option<&'static Value> {
        meta_schema(self)
    }

    pub(crate) fn keywords(self) -> &'static KeywordTable {
        vocabulary::keywords(self)
    }

    pub(crate) fn formats(self) -> FormatTable {
        vocabulary::formats(self)
    }
}

impl Display for Draft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Draft::Draft4 => "draft-04",
            Draft::Draft6 => "draft-06",
            Draft::Draft7 => "draft-07",
            Draft::Draft201909 => "2019-09",
            Draft::Draft202012 => "2020-12",
        };
        f.write_str(name)
    }
}

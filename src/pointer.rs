//! RFC 6901 JSON Pointers for locating values in JSON documents.
//!
//! [`JsonPointer`] is used both to report where an error occurred
//! (instance and keyword locations) and to resolve fragment references
//! such as `#/definitions/address` inside a schema document.

use std::fmt::{self, Display};

use serde_json::Value;
use thiserror::Error;

/// Errors produced when parsing a JSON Pointer string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PointerError {
    /// A non-empty pointer must start with `/`.
    #[error("JSON pointer '{0}' must be empty or start with '/'")]
    MissingLeadingSlash(String),

    /// `~` must be followed by `0` or `1`.
    #[error("JSON pointer '{0}' contains an invalid '~' escape")]
    InvalidEscape(String),
}

/// A sequence of reference tokens addressing a value in a JSON document.
///
/// Tokens are stored unescaped. Rendering escapes `~` as `~0` and `/` as
/// `~1`, so parsing the rendered form yields the same pointer.
///
/// # Example
///
/// ```rust
/// use postmortem_jsonschema::JsonPointer;
/// use serde_json::json;
///
/// let pointer = JsonPointer::root().push_token("users").push_index(0);
/// assert_eq!(pointer.to_string(), "/users/0");
///
/// let document = json!({"users": [{"name": "Ada"}]});
/// assert_eq!(pointer.resolve(&document), Some(&json!({"name": "Ada"})));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct JsonPointer {
    tokens: Vec<String>,
}

impl JsonPointer {
    /// Creates an empty pointer addressing the whole document.
    pub fn root() -> Self {
        Self::default()
    }

    /// Creates a pointer from unescaped tokens.
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tokens: tokens.into_iter().map(Into::into).collect(),
        }
    }

    /// Parses the string form of a pointer (`""`, `"/a/0"`, `"/a~1b"`).
    pub fn parse(pointer: &str) -> Result<Self, PointerError> {
        if pointer.is_empty() {
            return Ok(Self::root());
        }
        let Some(rest) = pointer.strip_prefix('/') else {
            return Err(PointerError::MissingLeadingSlash(pointer.to_string()));
        };
        let tokens = rest
            .split('/')
            .map(|raw| unescape(raw).ok_or_else(|| PointerError::InvalidEscape(pointer.to_string())))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { tokens })
    }

    /// Returns a new pointer with a token appended.
    pub fn push_token(&self, token: impl Into<String>) -> Self {
        let mut tokens = self.tokens.clone();
        tokens.push(token.into());
        Self { tokens }
    }

    /// Returns a new pointer with an array index appended.
    pub fn push_index(&self, index: usize) -> Self {
        self.push_token(index.to_string())
    }

    /// Appends a token in place.
    pub fn push(&mut self, token: impl Into<String>) {
        self.tokens.push(token.into());
    }

    /// Removes and returns the last token.
    pub fn pop(&mut self) -> Option<String> {
        self.tokens.pop()
    }

    /// Returns true if this pointer addresses the whole document.
    pub fn is_root(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Returns the number of tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns true if this pointer has no tokens.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Returns an iterator over the unescaped tokens.
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }

    /// Returns the last token, or None for the root pointer.
    pub fn last(&self) -> Option<&str> {
        self.tokens.last().map(String::as_str)
    }

    /// Returns the parent pointer, or None for the root pointer.
    pub fn parent(&self) -> Option<Self> {
        if self.tokens.is_empty() {
            None
        } else {
            Some(Self {
                tokens: self.tokens[..self.tokens.len() - 1].to_vec(),
            })
        }
    }

    /// Renders the pointer as a URI fragment (`#`, `#/items/0`).
    pub fn to_fragment(&self) -> String {
        format!("#{}", self)
    }

    /// Walks `document` token by token.
    ///
    /// Object steps look the token up as a key. Array steps require the token
    /// to be a base-10 integer strictly below the array length. Any other step
    /// fails.
    pub fn resolve<'v>(&self, document: &'v Value) -> Option<&'v Value> {
        self.tokens
            .iter()
            .try_fold(document, |current, token| match current {
                Value::Object(map) => map.get(token),
                Value::Array(items) => parse_index(token).and_then(|index| items.get(index)),
                _ => None,
            })
    }
}

impl Display for JsonPointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for token in &self.tokens {
            write!(f, "/{}", token.replace('~', "~0").replace('/', "~1"))?;
        }
        Ok(())
    }
}

/// Resolves a pointer string against a document.
///
/// Returns None when the pointer is malformed or addresses nothing.
///
/// ```rust
/// use postmortem_jsonschema::resolve_pointer;
/// use serde_json::json;
///
/// let document = json!({"definitions": {"name": {"type": "string"}}});
/// assert_eq!(
///     resolve_pointer("/definitions/name", &document),
///     Some(&json!({"type": "string"}))
/// );
/// assert_eq!(resolve_pointer("/definitions/missing", &document), None);
/// ```
pub fn resolve_pointer<'v>(pointer: &str, document: &'v Value) -> Option<&'v Value> {
    JsonPointer::parse(pointer).ok()?.resolve(document)
}

fn unescape(raw: &str) -> Option<String> {
    if !raw.contains('~') {
        return Some(raw.to_string());
    }
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c == '~' {
            match chars.next() {
                Some('0') => out.push('~'),
                Some('1') => out.push('/'),
                _ => return None,
            }
        } else {
            out.push(c);
        }
    }
    Some(out)
}

fn parse_index(token: &str) -> Option<usize> {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    token.parse().ok()
}

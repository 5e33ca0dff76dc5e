//! Schema registry for documents that other schemas reference by URI.
//!
//! This module provides the [`SchemaRegistry`] type. Documents registered
//! under an absolute URI become resolvable by `$ref` from any validator built
//! with the registry attached.

use parking_lot::RwLock;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{CompileError, ValidationResult};
use crate::uri;
use crate::validator::ValidatorOptions;

/// Type alias for the document storage map.
type DocumentMap = Arc<RwLock<HashMap<String, Arc<Value>>>>;

/// A thread-safe registry of schema documents keyed by URI.
///
/// # Thread Safety
///
/// The registry uses `Arc<RwLock<...>>`; clones share the same documents.
/// A validator takes a snapshot of the registry when it is built, so later
/// registrations do not affect validators that already exist.
///
/// # Example
///
/// ```rust
/// use postmortem_jsonschema::{SchemaRegistry, Validator};
/// use serde_json::json;
///
/// let registry = SchemaRegistry::new();
/// registry
///     .register("http://example.com/name.json", json!({"type": "string"}))
///     .unwrap();
///
/// let validator = Validator::options()
///     .with_registry(registry)
///     .build(json!({"properties": {"name": {"$ref": "http://example.com/name.json"}}}))
///     .unwrap();
///
/// assert!(validator.is_valid(&json!({"name": "Ada"})));
/// assert!(!validator.is_valid(&json!({"name": 7})));
/// ```
#[derive(Clone, Default)]
pub struct SchemaRegistry {
    documents: DocumentMap,
}

impl SchemaRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a document under `uri`.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::DuplicateUri` if the URI is already registered.
    pub fn register(&self, uri: impl AsRef<str>, document: Value) -> Result<(), RegistryError> {
        let key = uri::normalize(uri.as_ref());
        let mut documents = self.documents.write();

        if documents.contains_key(&key) {
            return Err(RegistryError::DuplicateUri(key));
        }

        tracing::debug!(uri = %key, "registered schema document");
        documents.insert(key, Arc::new(document));
        Ok(())
    }

    /// Retrieves a document by URI.
    pub fn get(&self, uri: &str) -> Option<Arc<Value>> {
        self.documents.read().get(&uri::normalize(uri)).cloned()
    }

    /// Returns true if a document is registered under `uri`.
    pub fn contains(&self, uri: &str) -> bool {
        self.documents.read().contains_key(&uri::normalize(uri))
    }

    /// Returns the number of registered documents.
    pub fn len(&self) -> usize {
        self.documents.read().len()
    }

    /// Returns true if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.documents.read().is_empty()
    }

    /// Returns the registered URIs, sorted.
    pub fn uris(&self) -> Vec<String> {
        let mut uris: Vec<String> = self.documents.read().keys().cloned().collect();
        uris.sort();
        uris
    }

    /// Snapshot of every document, for building a resource store.
    pub(crate) fn documents(&self) -> Vec<(String, Arc<Value>)> {
        self.documents
            .read()
            .iter()
            .map(|(uri, document)| (uri.clone(), Arc::clone(document)))
            .collect()
    }

    /// Validates an instance against the document registered under `uri`.
    ///
    /// The document is compiled with this registry attached and `uri` as its
    /// base, so relative references inside it resolve against `uri`. Build a
    /// [`Validator`](crate::Validator) instead when validating many instances.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::SchemaNotFound` for an unknown URI and
    /// `RegistryError::Compile` when the document cannot be compiled.
    ///
    /// # Example
    ///
    /// ```rust
    /// use postmortem_jsonschema::SchemaRegistry;
    /// use serde_json::json;
    ///
    /// let registry = SchemaRegistry::new();
    /// registry
    ///     .register("http://example.com/age.json", json!({"type": "integer", "minimum": 0}))
    ///     .unwrap();
    ///
    /// let result = registry.validate("http://example.com/age.json", &json!(-1)).unwrap();
    /// assert!(!result.is_valid());
    /// ```
    pub fn validate(&self, uri: &str, instance: &Value) -> Result<ValidationResult, RegistryError> {
        let document = self
            .get(uri)
            .ok_or_else(|| RegistryError::SchemaNotFound(uri.to_string()))?;

        let validator = ValidatorOptions::new()
            .with_base_uri(uri)
            .with_registry(self.clone())
            .build(Value::clone(&document))?;

        Ok(validator.validate(instance))
    }
}

/// Errors from registry operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// A document is already registered under this URI.
    #[error("schema '{0}' is already registered")]
    DuplicateUri(String),

    /// No document is registered under this URI.
    #[error("schema '{0}' not found in registry")]
    SchemaNotFound(String),

    /// The registered document could not be compiled.
    #[error(transparent)]
    Compile(#[from] CompileError),
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<SchemaRegistry>();
    assert_sync::<SchemaRegistry>();
};

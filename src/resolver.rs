//! Reference resolution over an in-memory resource store.
//!
//! The store is filled once, when a validator is built, with the root
//! schema, every caller-registered document, the draft's meta-schemas and all
//! subschemas that declare an identifier or anchor. It is read-only
//! afterwards, so a [`RefResolver`] can be shared across threads.
//!
//! Resolution joins the reference against the active base URI, looks the
//! result up directly (identifiers and anchors), and otherwise resolves the
//! fragment as a JSON Pointer into the document named by the part before `#`.
//! Nothing is ever fetched over the network.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::{Map, Value};
use thiserror::Error;

use crate::draft::{meta_resources, Draft};
use crate::pointer::resolve_pointer;
use crate::uri;

/// Resources keyed by normalized absolute (or fragment-only) URI.
pub(crate) type ResourceStore = HashMap<String, Arc<Value>>;

/// Why a reference could not be followed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// The reference names a local document or fragment that does not exist.
    #[error("Reference not found '{0}'")]
    NotFound(String),

    /// The reference names a document that is not in the store.
    #[error("Remote reference '{0}' is not supported")]
    Remote(String),
}

/// A resolved reference target.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved<'a> {
    /// The schema the reference points at.
    pub schema: &'a Value,
    /// Base URI of the resource that contains the schema.
    pub base: String,
}

/// Resolves `$ref`-style URI references against a fixed resource store.
#[derive(Debug, Clone)]
pub struct RefResolver {
    base_uri: String,
    resources: ResourceStore,
    meta: &'static ResourceStore,
}

impl RefResolver {
    /// Builds the store for `root` and the given extra documents.
    ///
    /// The root's identifier, if any, is joined against `base_uri`.
    pub(crate) fn new(
        draft: Draft,
        root: &Value,
        base_uri: Option<&str>,
        documents: &[(String, Arc<Value>)],
    ) -> Self {
        let id_keyword = draft.id_keyword();
        let fallback = base_uri
            .map(|base| uri::without_fragment(&uri::normalize(base)).to_string())
            .unwrap_or_default();
        let base_uri = match root.get(id_keyword).and_then(Value::as_str) {
            Some(id) => uri::without_fragment(&uri::join(&fallback, id)).to_string(),
            None => fallback,
        };

        let mut resources = ResourceStore::new();
        resources.insert(base_uri.clone(), Arc::new(root.clone()));
        collect_resources(root, &base_uri, id_keyword, &mut resources);

        for (document_uri, document) in documents {
            let key = uri::normalize(document_uri);
            resources
                .entry(key.clone())
                .or_insert_with(|| Arc::clone(document));
            collect_resources(document, &key, id_keyword, &mut resources);
        }

        Self {
            base_uri,
            resources,
            meta: meta_resources(draft),
        }
    }

    /// The base URI of the root schema (empty when it has no absolute id).
    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    /// Number of resources reachable without fetching, meta-schemas included.
    pub fn len(&self) -> usize {
        self.resources.len() + self.meta.len()
    }

    /// Always false; the root schema is always stored.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns true if a resource is stored under `uri`.
    pub fn contains(&self, uri: &str) -> bool {
        self.lookup(&uri::normalize(uri)).is_some()
    }

    /// Exact lookup by normalized URI.
    pub(crate) fn lookup(&self, key: &str) -> Option<&Value> {
        self.resources
            .get(key)
            .or_else(|| self.meta.get(key))
            .map(Arc::as_ref)
    }

    /// Looks up `base#anchor`.
    pub(crate) fn lookup_anchor(&self, base: &str, anchor: &str) -> Option<&Value> {
        self.lookup(&format!("{}#{}", base, anchor))
    }

    /// Resolves `reference` relative to `scope`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use postmortem_jsonschema::Validator;
    /// use serde_json::json;
    ///
    /// let validator = Validator::new(json!({
    ///     "definitions": {"name": {"type": "string"}},
    ///     "$ref": "#/definitions/name"
    /// }))
    /// .unwrap();
    ///
    /// let resolved = validator.resolver().resolve("#/definitions/name", "").unwrap();
    /// assert_eq!(resolved.schema, &json!({"type": "string"}));
    /// assert!(validator.resolver().resolve("#/definitions/missing", "").is_err());
    /// ```
    pub fn resolve(&self, reference: &str, scope: &str) -> Result<Resolved<'_>, ResolveError> {
        let target = uri::join(scope, reference);
        if let Some(schema) = self.lookup(&target) {
            return Ok(Resolved {
                schema,
                base: uri::without_fragment(&target).to_string(),
            });
        }

        let (base, fragment) = uri::split_fragment(&target);
        let Some(document) = self.lookup(base) else {
            return Err(if uri::is_absolute(base) {
                ResolveError::Remote(target.clone())
            } else {
                ResolveError::NotFound(target.clone())
            });
        };

        uri::decode_fragment(fragment)
            .filter(|pointer| pointer.starts_with('/'))
            .and_then(|pointer| resolve_pointer(&pointer, document))
            .map(|schema| Resolved {
                schema,
                base: base.to_string(),
            })
            .ok_or_else(|| ResolveError::NotFound(target.clone()))
    }
}

/// Registers every identified or anchored subschema of `node`.
///
/// Identifiers join against the enclosing base; the first registration of a
/// URI wins.
pub(crate) fn collect_resources(
    node: &Value,
    base: &str,
    id_keyword: &str,
    store: &mut ResourceStore,
) {
    let Value::Object(schema) = node else {
        return;
    };

    let mut base = base.to_string();
    if let Some(id) = schema.get(id_keyword).and_then(Value::as_str) {
        let resolved = uri::join(&base, id);
        store
            .entry(resolved.clone())
            .or_insert_with(|| Arc::new(node.clone()));
        if !id.starts_with('#') {
            base = uri::without_fragment(&resolved).to_string();
        }
    }
    for anchor_keyword in ["$anchor", "$dynamicAnchor"] {
        if let Some(anchor) = schema.get(anchor_keyword).and_then(Value::as_str) {
            store
                .entry(format!("{}#{}", base, anchor))
                .or_insert_with(|| Arc::new(node.clone()));
        }
    }

    for child in subschemas(schema) {
        collect_resources(child, &base, id_keyword, store);
    }
}

/// Every value in a schema object that is itself a schema.
fn subschemas(schema: &Map<String, Value>) -> Vec<&Value> {
    let mut children = Vec::new();
    for (keyword, value) in schema {
        match (keyword.as_str(), value) {
            (
                "additionalItems" | "additionalProperties" | "contains" | "propertyNames" | "if"
                | "then" | "else" | "not" | "unevaluatedItems" | "unevaluatedProperties"
                | "contentSchema",
                _,
            ) => children.push(value),
            ("items", Value::Array(items)) => children.extend(items),
            ("items", _) => children.push(value),
            ("allOf" | "anyOf" | "oneOf" | "prefixItems", Value::Array(items)) => {
                children.extend(items)
            }
            (
                "$defs" | "definitions" | "properties" | "patternProperties" | "dependentSchemas",
                Value::Object(members),
            ) => children.extend(members.values()),
            ("dependencies", Value::Object(members)) => {
                children.extend(members.values().filter(|v| !v.is_array()))
            }
            _ => {}
        }
    }
    children
}

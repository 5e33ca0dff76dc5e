//! Embedded meta-schema documents, parsed once and pre-scanned per draft.

use std::sync::Arc;

use once_cell::sync::Lazy;
use serde_json::Value;

use super::Draft;
use crate::resolver::{collect_resources, ResourceStore};
use crate::uri;

static DRAFT4: &[&str] = &[include_str!("metaschemas/draft4.json")];

static DRAFT6: &[&str] = &[include_str!("metaschemas/draft6.json")];

static DRAFT7: &[&str] = &[include_str!("metaschemas/draft7.json")];

static DRAFT201909: &[&str] = &[
    include_str!("metaschemas/draft201909.json"),
    include_str!("metaschemas/draft201909-core.json"),
    include_str!("metaschemas/draft201909-applicator.json"),
    include_str!("metaschemas/draft201909-validation.json"),
    include_str!("metaschemas/draft201909-meta-data.json"),
    include_str!("metaschemas/draft201909-format.json"),
    include_str!("metaschemas/draft201909-content.json"),
];

static DRAFT202012: &[&str] = &[
    include_str!("metaschemas/draft202012.json"),
    include_str!("metaschemas/draft202012-core.json"),
    include_str!("metaschemas/draft202012-applicator.json"),
    include_str!("metaschemas/draft202012-unevaluated.json"),
    include_str!("metaschemas/draft202012-validation.json"),
    include_str!("metaschemas/draft202012-meta-data.json"),
    include_str!("metaschemas/draft202012-format-annotation.json"),
    include_str!("metaschemas/draft202012-content.json"),
];

static STORE4: Lazy<ResourceStore> = Lazy::new(|| build_store(Draft::Draft4, DRAFT4));
static STORE6: Lazy<ResourceStore> = Lazy::new(|| build_store(Draft::Draft6, DRAFT6));
static STORE7: Lazy<ResourceStore> = Lazy::new(|| build_store(Draft::Draft7, DRAFT7));
static STORE201909: Lazy<ResourceStore> =
    Lazy::new(|| build_store(Draft::Draft201909, DRAFT201909));
static STORE202012: Lazy<ResourceStore> =
    Lazy::new(|| build_store(Draft::Draft202012, DRAFT202012));

/// Returns every resource reachable from the draft's meta-schemas, keyed by
/// normalized URI.
pub(crate) fn meta_resources(draft: Draft) -> &'static ResourceStore {
    match draft {
        Draft::Draft4 => &STORE4,
        Draft::Draft6 => &STORE6,
        Draft::Draft7 => &STORE7,
        Draft::Draft201909 => &STORE201909,
        Draft::Draft202012 => &STORE202012,
    }
}

/// Returns the draft's main meta-schema document.
pub(crate) fn meta_schema(draft: Draft) -> Option<&'static Value> {
    meta_resources(draft)
        .get(&uri::normalize(draft.meta_schema_uri()))
        .map(Arc::as_ref)
}

fn build_store(draft: Draft, sources: &[&str]) -> ResourceStore {
    let mut store = ResourceStore::new();
    for source in sources {
        let document: Value =
            serde_json::from_str(source).expect("embedded meta-schema is valid JSON");
        collect_resources(&document, "", draft.id_keyword(), &mut store);
    }
    tracing::debug!(%draft, resources = store.len(), "loaded meta-schemas");
    store
}

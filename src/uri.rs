//! URI joining and normalization for resource identifiers.
//!
//! Absolute bases are handled by the `url` crate (RFC 3986 reference
//! resolution). Schemas without an absolute `$id` live under the empty base
//! `""`, where only fragment references can be resolved.

use std::borrow::Cow;

use percent_encoding::percent_decode_str;
use url::Url;

/// Canonical store key for a URI: parsed form when absolute, empty
/// fragments dropped.
pub(crate) fn normalize(uri: &str) -> String {
    let canonical = match Url::parse(uri) {
        Ok(url) => url.to_string(),
        Err(_) => uri.to_string(),
    };
    match canonical.strip_suffix('#') {
        Some(stripped) => stripped.to_string(),
        None => canonical,
    }
}

/// Resolves `reference` against `base`, returning a normalized URI.
pub(crate) fn join(base: &str, reference: &str) -> String {
    if let Ok(absolute) = Url::parse(reference) {
        return normalize(absolute.as_str());
    }
    match Url::parse(base) {
        Ok(base_url) => match base_url.join(reference) {
            Ok(joined) => normalize(joined.as_str()),
            Err(_) => normalize(reference),
        },
        Err(_) if reference.is_empty() => normalize(base),
        Err(_) if reference.starts_with('#') => {
            normalize(&format!("{}{}", without_fragment(base), reference))
        }
        Err(_) => normalize(reference),
    }
}

/// Splits `uri` into the part before `#` and the raw fragment.
pub(crate) fn split_fragment(uri: &str) -> (&str, &str) {
    match uri.split_once('#') {
        Some((base, fragment)) => (base, fragment),
        None => (uri, ""),
    }
}

/// Returns `uri` with any fragment removed.
pub(crate) fn without_fragment(uri: &str) -> &str {
    split_fragment(uri).0
}

/// Percent-decodes a fragment; None when the bytes are not UTF-8.
pub(crate) fn decode_fragment(fragment: &str) -> Option<Cow<'_, str>> {
    percent_decode_str(fragment).decode_utf8().ok()
}

/// True when `uri` is absolute, i.e. names a document outside the empty base.
pub(crate) fn is_absolute(uri: &str) -> bool {
    Url::parse(uri).is_ok()
}

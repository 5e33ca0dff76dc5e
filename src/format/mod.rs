//! Named string formats checked by the `format` keyword.
//!
//! Each format is a predicate over the string value. The built-in set depends
//! on the draft; callers add more with [`Validator::add_format`] or
//! [`ValidatorOptions::with_format`].
//!
//! [`Validator::add_format`]: crate::Validator::add_format
//! [`ValidatorOptions::with_format`]: crate::ValidatorOptions::with_format

mod datetime;
mod network;

use std::sync::Arc;

use indexmap::IndexMap;

use crate::pattern;
use crate::pointer::JsonPointer;

/// A format predicate. Returns true when the string conforms.
pub type FormatFn = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// Format name to predicate.
pub type FormatTable = IndexMap<String, FormatFn>;

/// Returns the built-in predicate for a format name.
pub(crate) fn builtin(name: &str) -> Option<FormatFn> {
    let check: fn(&str) -> bool = match name {
        "date" => datetime::is_date,
        "time" => datetime::is_time,
        "date-time" => datetime::is_date_time,
        "duration" => datetime::is_duration,
        "ipv4" => network::is_ipv4,
        "ipv6" => network::is_ipv6,
        "uri" => network::is_uri,
        "uuid" => network::is_uuid,
        "json-pointer" => is_json_pointer,
        "regex" => is_regex,
        _ => return None,
    };
    Some(Arc::new(check))
}

fn is_json_pointer(value: &str) -> bool {
    JsonPointer::parse(value).is_ok()
}

fn is_regex(value: &str) -> bool {
    pattern::compile(value).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(name: &str, value: &str) -> bool {
        builtin(name).map_or(false, |f| f(value))
    }

    #[test]
    fn test_unknown_format_has_no_builtin() {
        assert!(builtin("email").is_none());
    }

    #[test]
    fn test_json_pointer() {
        assert!(check("json-pointer", ""));
        assert!(check("json-pointer", "/a~1b/0"));
        assert!(!check("json-pointer", "a/b"));
        assert!(!check("json-pointer", "/a~"));
    }

    #[test]
    fn test_regex() {
        assert!(check("regex", "^[a-z]+$"));
        assert!(!check("regex", "^[a-z"));
    }
}

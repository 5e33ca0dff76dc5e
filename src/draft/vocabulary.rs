//! Keyword and format tables for each draft.
//!
//! Table order is evaluation order, which fixes the order errors are reported in.

use once_cell::sync::Lazy;

use super::Draft;
use crate::format::{self, FormatTable};
use crate::keywords::{array, combinators, generic, numeric, object, reference, string, unsupported};
use crate::keywords::KeywordTable;

static DRAFT4: Lazy<KeywordTable> = Lazy::new(draft4);
static DRAFT6: Lazy<KeywordTable> = Lazy::new(draft6);
static DRAFT7: Lazy<KeywordTable> = Lazy::new(draft7);
static DRAFT201909: Lazy<KeywordTable> = Lazy::new(draft201909);
static DRAFT202012: Lazy<KeywordTable> = Lazy::new(draft202012);

pub(super) fn keywords(draft: Draft) -> &'static KeywordTable {
    match draft {
        Draft::Draft4 => &DRAFT4,
        Draft::Draft6 => &DRAFT6,
        Draft::Draft7 => &DRAFT7,
        Draft::Draft201909 => &DRAFT201909,
        Draft::Draft202012 => &DRAFT202012,
    }
}

/// Keywords shared by every draft.
fn common() -> KeywordTable {
    let mut table = KeywordTable::new();
    table.insert("$ref", reference::reference);
    table.insert("type", generic::types);
    table.insert("enum", generic::enumeration);
    table.insert("multipleOf", numeric::multiple_of);
    table.insert("maximum", numeric::maximum);
    table.insert("minimum", numeric::minimum);
    table.insert("maxLength", string::max_length);
    table.insert("minLength", string::min_length);
    table.insert("pattern", string::pattern);
    table.insert("format", string::format);
    table.insert("items", array::items);
    table.insert("additionalItems", array::additional_items);
    table.insert("maxItems", array::max_items);
    table.insert("minItems", array::min_items);
    table.insert("uniqueItems", array::unique_items);
    table.insert("maxProperties", object::max_properties);
    table.insert("minProperties", object::min_properties);
    table.insert("required", object::required);
    table.insert("properties", object::properties);
    table.insert("patternProperties", object::pattern_properties);
    table.insert("additionalProperties", object::additional_properties);
    table.insert("dependencies", object::dependencies);
    table.insert("allOf", combinators::all_of);
    table.insert("anyOf", combinators::any_of);
    table.insert("oneOf", combinators::one_of);
    table.insert("not", combinators::not);
    table
}

fn draft4() -> KeywordTable {
    let mut table = common();
    table.insert("maximum", numeric::maximum_draft4);
    table.insert("minimum", numeric::minimum_draft4);
    table
}

fn draft6() -> KeywordTable {
    let mut table = common();
    table.insert("exclusiveMaximum", numeric::exclusive_maximum);
    table.insert("exclusiveMinimum", numeric::exclusive_minimum);
    table.insert("const", generic::constant);
    table.insert("contains", array::contains);
    table.insert("propertyNames", object::property_names);
    table
}

fn draft7() -> KeywordTable {
    let mut table = draft6();
    table.insert("if", combinators::if_then_else);
    table
}

fn draft201909() -> KeywordTable {
    let mut table = draft7();
    table.shift_remove("dependencies");
    table.insert("contains", array::contains_bounded);
    table.insert("dependentRequired", object::dependent_required);
    table.insert("dependentSchemas", object::dependent_schemas);
    table.insert("$recursiveRef", reference::recursive_reference);
    table.insert("unevaluatedItems", unsupported::unevaluated_items);
    table.insert("unevaluatedProperties", unsupported::unevaluated_properties);
    table
}

fn draft202012() -> KeywordTable {
    let mut table = draft201909();
    table.shift_remove("additionalItems");
    table.shift_remove("$recursiveRef");
    table.insert("items", array::items_after_prefix);
    table.insert("prefixItems", array::prefix_items);
    table.insert("$dynamicRef", reference::dynamic_reference);
    table
}

pub(super) fn formats(draft: Draft) -> FormatTable {
    let mut names = vec!["date-time", "ipv4", "ipv6", "uri"];
    if draft != Draft::Draft4 {
        names.push("json-pointer");
    }
    if !matches!(draft, Draft::Draft4 | Draft::Draft6) {
        names.extend(["date", "time", "regex"]);
    }
    if matches!(draft, Draft::Draft201909 | Draft::Draft202012) {
        names.extend(["duration", "uuid"]);
    }
    names
        .into_iter()
        .filter_map(|name| format::builtin(name).map(|check| (name.to_string(), check)))
        .collect()
}

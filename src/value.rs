//! Helpers over `serde_json::Value` shared by the keyword validators.

use serde_json::{Number, Value};

/// Returns the JSON type name for a value.
pub(crate) fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// True for numbers without a fractional part, including `1.0`.
pub(crate) fn is_integer(number: &Number) -> bool {
    if number.is_i64() || number.is_u64() {
        return true;
    }
    number
        .as_f64()
        .map_or(false, |f| f.is_finite() && f.fract() == 0.0)
}

/// Reads a non-negative integer limit such as `maxLength`. Integral decimals
/// (`2.0`) count; negative or fractional values do not.
pub(crate) fn as_count(value: &Value) -> Option<u64> {
    if let Some(count) = value.as_u64() {
        return Some(count);
    }
    value
        .as_f64()
        .filter(|f| f.is_finite() && *f >= 0.0 && f.fract() == 0.0 && *f <= u64::MAX as f64)
        .map(|f| f as u64)
}

/// Returns true if `value` is an instance of the named JSON Schema type.
pub(crate) fn is_type(value: &Value, type_name: &str) -> bool {
    match (type_name, value) {
        ("null", Value::Null) => true,
        ("boolean", Value::Bool(_)) => true,
        ("number", Value::Number(_)) => true,
        ("integer", Value::Number(n)) => is_integer(n),
        ("string", Value::String(_)) => true,
        ("array", Value::Array(_)) => true,
        ("object", Value::Object(_)) => true,
        _ => false,
    }
}

/// Structural equality with JSON Schema semantics.
///
/// Numbers compare by value (`1 == 1.0`), values of different variants are
/// never equal (`1 != true`), arrays compare element-wise and objects by
/// key set and values.
pub fn json_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => numbers_equal(a, b),
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| json_equal(x, y))
        }
        (Value::Object(a), Value::Object(b)) => {
            a.len() == b.len()
                && a
                    .iter()
                    .all(|(key, x)| b.get(key).map_or(false, |y| json_equal(x, y)))
        }
        _ => left == right,
    }
}

fn numbers_equal(a: &Number, b: &Number) -> bool {
    if let (Some(x), Some(y)) = (a.as_i64(), b.as_i64()) {
        return x == y;
    }
    if let (Some(x), Some(y)) = (a.as_u64(), b.as_u64()) {
        return x == y;
    }
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => x == y,
        _ => false,
    }
}

/// Renders a value for an error message: strings bare, everything else as
/// compact JSON.
pub(crate) fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_numbers_compare_by_value() {
        assert!(json_equal(&json!(1), &json!(1.0)));
        assert!(json_equal(&json!([1, {"a": 2.0}]), &json!([1.0, {"a": 2}])));
        assert!(!json_equal(&json!(1), &json!(2)));
    }

    #[test]
    fn test_variants_never_cross() {
        assert!(!json_equal(&json!(1), &json!(true)));
        assert!(!json_equal(&json!(0), &json!(false)));
        assert!(!json_equal(&json!(null), &json!(0)));
        assert!(!json_equal(&json!("1"), &json!(1)));
    }

    #[test]
    fn test_objects_compare_key_sets() {
        assert!(!json_equal(&json!({"a": 1}), &json!({"a": 1, "b": 2})));
        assert!(!json_equal(&json!({"a": 1}), &json!({"b": 1})));
    }

    #[test]
    fn test_integer_detection() {
        assert!(is_type(&json!(3), "integer"));
        assert!(is_type(&json!(3.0), "integer"));
        assert!(!is_type(&json!(3.5), "integer"));
        assert!(is_type(&json!(3.5), "number"));
        assert!(!is_type(&json!("3"), "number"));
        assert!(!is_type(&json!(3), "unknown"));
    }

    #[test]
    fn test_count_limits() {
        assert_eq!(as_count(&json!(2)), Some(2));
        assert_eq!(as_count(&json!(2.0)), Some(2));
        assert_eq!(as_count(&json!(0.0)), Some(0));
        assert_eq!(as_count(&json!(2.5)), None);
        assert_eq!(as_count(&json!(-1)), None);
        assert_eq!(as_count(&json!(-1.0)), None);
        assert_eq!(as_count(&json!("2")), None);
    }

    #[test]
    fn test_render() {
        assert_eq!(render(&json!("abc")), "abc");
        assert_eq!(render(&json!(true)), "true");
        assert_eq!(render(&json!([1, "a"])), "[1,\"a\"]");
    }
}

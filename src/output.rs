//! JSON output records for validation results.
//!
//! Error records look like
//! `{"error": "...", "instanceLocation": "/0", "keywordLocation": "#/items/type"}`
//! (`keywordLocation` omitted when unknown). Results are `{"valid": true}` or
//! `{"valid": false, "errors": [...]}`.

use serde_json::{json, Map, Value};

use crate::error::{ValidationError, ValidationErrors, ValidationResult};

/// Trait for converting validation outcomes to JSON.
pub trait ToJson {
    /// Converts this value to its JSON output record.
    fn to_json(&self) -> Value;
}

impl ToJson for ValidationError {
    fn to_json(&self) -> Value {
        let mut record = Map::new();
        record.insert("error".to_string(), Value::String(self.message.clone()));
        record.insert(
            "instanceLocation".to_string(),
            Value::String(self.instance_location.to_string()),
        );
        if let Some(keyword_location) = self.keyword_location_fragment() {
            record.insert("keywordLocation".to_string(), Value::String(keyword_location));
        }
        Value::Object(record)
    }
}

impl ToJson for ValidationErrors {
    fn to_json(&self) -> Value {
        Value::Array(self.iter().map(ToJson::to_json).collect())
    }
}

impl ToJson for ValidationResult {
    fn to_json(&self) -> Value {
        match self {
            ValidationResult::Valid => json!({"valid": true}),
            ValidationResult::Invalid(errors) => json!({
                "valid": false,
                "errors": errors.to_json(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pointer::JsonPointer;

    #[test]
    fn test_error_record_without_keyword_location() {
        let error = ValidationError::new("Falsy schema", JsonPointer::root());
        assert_eq!(
            error.to_json(),
            json!({"error": "Falsy schema", "instanceLocation": ""})
        );
    }

    #[test]
    fn test_valid_record() {
        assert_eq!(ValidationResult::Valid.to_json(), json!({"valid": true}));
    }
}

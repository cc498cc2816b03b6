//! Request validation helpers shared by the auth and todo payloads.
//!
//! Payloads derive `validator::Validate` and list their fields in `FirstViolation::FIELDS`.
//! `FirstViolation::from_json` first checks each field's JSON type, then the derived rules,
//! and reports a single `AppError::ValidationError` naming the first offending field in
//! declaration order, e.g. `"title" is required` or `"state" must be one of [...]`.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::borrow::Cow;
use std::collections::HashMap;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::error::AppError;

const REQUIRED: &str = "required";
const EMPTY: &str = "empty";

/// The JSON type a field must have before its rules are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireType {
    String,
    /// A string restricted to the listed values.
    OneOf(&'static [&'static str]),
}

impl WireType {
    /// Describes why `value` does not fit, or `None` when it does. `null` never fits.
    fn mismatch(self, value: &Value) -> Option<String> {
        match (self, value) {
            (WireType::String, Value::String(_)) => None,
            (WireType::String, _) => Some("must be a string".to_string()),
            (WireType::OneOf(allowed), Value::String(s)) if allowed.contains(&s.as_str()) => None,
            (WireType::OneOf(allowed), _) => {
                Some(format!("must be one of [{}]", allowed.join(", ")))
            }
        }
    }
}

/// One payload field: its Rust name, its JSON name and its wire type.
#[derive(Debug, Clone, Copy)]
pub struct Field {
    pub name: &'static str,
    pub wire: &'static str,
    pub ty: WireType,
}

impl Field {
    pub const fn string(name: &'static str, wire: &'static str) -> Self {
        Field {
            name,
            wire,
            ty: WireType::String,
        }
    }

    pub const fn one_of(
        name: &'static str,
        wire: &'static str,
        allowed: &'static [&'static str],
    ) -> Self {
        Field {
            name,
            wire,
            ty: WireType::OneOf(allowed),
        }
    }
}

/// Payloads whose validation failures are reported one at a time, in field order.
pub trait FirstViolation: Validate {
    /// Every deserialized field, in declaration order.
    const FIELDS: &'static [Field];

    /// Runs the derived rules only.
    fn check(&self) -> Result<(), AppError> {
        self.validate().map_err(|errors| {
            let message = Self::FIELDS
                .iter()
                .find_map(|field| field_message(&errors, field))
                .unwrap_or_else(|| "Invalid request payload.".to_string());
            AppError::ValidationError(message)
        })
    }

    /// Builds and validates the payload from a JSON body. Unknown keys are ignored.
    fn from_json(value: Value) -> Result<Self, AppError>
    where
        Self: DeserializeOwned,
    {
        let mut object: Map<String, Value> = match value {
            Value::Object(object) => object,
            _ => return Err(violation("value", "must be of type object")),
        };

        // Ill-typed fields are dropped so the rest still deserializes.
        let mut type_errors = HashMap::new();
        for field in Self::FIELDS {
            if let Some(problem) = object.get(field.wire).and_then(|v| field.ty.mismatch(v)) {
                object.remove(field.wire);
                type_errors.insert(field.wire, problem);
            }
        }

        let payload: Self = serde_json::from_value(Value::Object(object))
            .map_err(|e| AppError::ValidationError(e.to_string()))?;
        let rule_errors = payload.validate().err();

        for field in Self::FIELDS {
            if let Some(problem) = type_errors.get(field.wire) {
                return Err(violation(field.wire, problem));
            }
            if let Some(message) = rule_errors.as_ref().and_then(|e| field_message(e, field)) {
                return Err(AppError::ValidationError(message));
            }
        }
        match rule_errors {
            Some(_) => Err(AppError::ValidationError("Invalid request payload.".to_string())),
            None => Ok(payload),
        }
    }
}

/// `"<field>" <problem>` as a validation error.
pub fn violation(wire: &str, problem: &str) -> AppError {
    AppError::ValidationError(format!("\"{}\" {}", wire, problem))
}

/// Rejects empty strings; `required` already covers absent fields.
pub fn not_empty(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        let mut error = ValidationError::new(EMPTY);
        error.message = Some(Cow::from("is not allowed to be empty"));
        return Err(error);
    }
    Ok(())
}

fn field_message(errors: &ValidationErrors, field: &Field) -> Option<String> {
    let field_errors = errors.field_errors();
    let list = field_errors
        .get(field.name)
        .or_else(|| field_errors.get(field.wire))?;
    list.iter()
        .min_by_key(|e| rank(e))
        .map(|error| format!("\"{}\" {}", field.wire, describe(error)))
}

// A missing field is reported before an empty one, and both before length or format.
fn rank(error: &ValidationError) -> u8 {
    match error.code.as_ref() {
        REQUIRED => 0,
        EMPTY => 1,
        _ => 2,
    }
}

fn describe(error: &ValidationError) -> Cow<'_, str> {
    match &error.message {
        Some(message) => Cow::Borrowed(message.as_ref()),
        None => Cow::Owned(format!("is invalid ({})", error.code)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize, Validate)]
    struct Sample {
        #[validate(required(message = "is required"), custom = "not_empty")]
        first: Option<String>,
        #[serde(rename = "secondField")]
        #[validate(
            required(message = "is required"),
            custom = "not_empty",
            length(min = 3, message = "length must be at least 3 characters")
        )]
        second: Option<String>,
        kind: Option<String>,
    }

    impl FirstViolation for Sample {
        const FIELDS: &'static [Field] = &[
            Field::string("first", "first"),
            Field::string("second", "secondField"),
            Field::one_of("kind", "kind", &["a", "b"]),
        ];
    }

    fn message(value: Value) -> String {
        match Sample::from_json(value) {
            Err(AppError::ValidationError(msg)) => msg,
            other => panic!("expected a validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_reports_fields_in_declaration_order() {
        assert_eq!(message(json!({})), "\"first\" is required");
        assert_eq!(
            message(json!({ "secondField": 5 })),
            "\"first\" is required"
        );
    }

    #[test]
    fn test_uses_wire_name() {
        assert_eq!(
            message(json!({ "first": "ok", "secondField": "ab" })),
            "\"secondField\" length must be at least 3 characters"
        );
    }

    #[test]
    fn test_empty_beats_length() {
        assert_eq!(
            message(json!({ "first": "ok", "secondField": "" })),
            "\"secondField\" is not allowed to be empty"
        );
    }

    #[test]
    fn test_wrong_types_name_the_field() {
        assert_eq!(
            message(json!({ "first": 123, "secondField": "long enough" })),
            "\"first\" must be a string"
        );
        assert_eq!(
            message(json!({ "first": null, "secondField": "long enough" })),
            "\"first\" must be a string"
        );
        assert_eq!(
            message(json!({ "first": "ok", "secondField": "long enough", "kind": "c" })),
            "\"kind\" must be one of [a, b]"
        );
        assert_eq!(message(json!(["first"])), "\"value\" must be of type object");
    }

    #[test]
    fn test_valid_payload_passes() {
        let sample = Sample::from_json(json!({
            "first": "ok",
            "secondField": "long enough",
            "kind": "b",
            "extra": true
        }))
        .unwrap();
        assert_eq!(sample.kind.as_deref(), Some("b"));
        assert!(sample.check().is_ok());
    }
}

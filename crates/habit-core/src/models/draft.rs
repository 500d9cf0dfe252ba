//! Create-draft validation
//!
//! Drafts carry raw JSON values so the same rules apply to CLI input and to
//! request bodies. Fields are checked in order (name, category, points) and the
//! first failure is reported.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Which part of a draft failed validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DraftField {
    Body,
    Name,
    Category,
    Points,
}

impl DraftField {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Body => "body",
            Self::Name => "name",
            Self::Category => "category",
            Self::Points => "points",
        }
    }
}

impl fmt::Display for DraftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A draft field failed validation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    pub field: DraftField,
    pub message: String,
}

impl ValidationError {
    /// Machine-readable error kind shared with the API error body
    pub const KIND: &'static str = "VALIDATION_ERROR";

    fn new(field: DraftField, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }

    pub const fn kind(&self) -> &'static str {
        Self::KIND
    }
}

/// Unvalidated input for creating a habit
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HabitDraft {
    #[serde(default)]
    pub name: Value,
    #[serde(default)]
    pub category: Value,
    /// `None` when the field is absent; an explicit `null` is `Some(Value::Null)`.
    #[serde(
        default,
        deserialize_with = "present_value",
        skip_serializing_if = "Option::is_none"
    )]
    pub points: Option<Value>,
}

fn present_value<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Value>, D::Error> {
    Value::deserialize(deserializer).map(Some)
}

/// A draft that passed validation: trimmed text and finite points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidDraft {
    pub name: String,
    pub category: String,
    pub points: f64,
}

impl HabitDraft {
    pub fn new(name: impl Into<String>, category: impl Into<String>, points: impl Into<Value>) -> Self {
        Self {
            name: Value::String(name.into()),
            category: Value::String(category.into()),
            points: Some(points.into()),
        }
    }

    /// Read a draft out of a request body, which must be a JSON object.
    pub fn from_body(body: &Value) -> Result<Self, ValidationError> {
        if !body.is_object() {
            return Err(ValidationError::new(
                DraftField::Body,
                "Request body must be a JSON object.",
            ));
        }
        serde_json::from_value(body.clone()).map_err(|_| {
            ValidationError::new(DraftField::Body, "Request body must be a JSON object.")
        })
    }

    pub fn validate(&self) -> Result<ValidDraft, ValidationError> {
        let name = required_text(&self.name, DraftField::Name)?;
        let category = required_text(&self.category, DraftField::Category)?;
        let points = coerce_points(self.points.as_ref()).ok_or_else(|| {
            ValidationError::new(
                DraftField::Points,
                "Field 'points' must be a valid number (can be negative).",
            )
        })?;

        Ok(ValidDraft {
            name,
            category,
            points,
        })
    }
}

fn required_text(value: &Value, field: DraftField) -> Result<String, ValidationError> {
    let Value::String(raw) = value else {
        return Err(ValidationError::new(
            field,
            format!("Field '{field}' must be a string."),
        ));
    };

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new(
            field,
            format!("Field '{field}' is required."),
        ));
    }
    Ok(trimmed.to_string())
}

/// Numeric conversion for draft points.
///
/// Numbers pass through, strings are parsed (blank means 0, `0x`/`0o`/`0b`
/// prefixes select the radix), booleans become 0/1 and `null` becomes 0.
/// A missing field, arrays, objects and non-finite results are rejected.
fn coerce_points(value: Option<&Value>) -> Option<f64> {
    let number = match value? {
        Value::Number(number) => number.as_f64()?,
        Value::String(raw) => parse_numeric_text(raw)?,
        Value::Bool(flag) => f64::from(u8::from(*flag)),
        Value::Null => 0.0,
        Value::Array(_) | Value::Object(_) => return None,
    };
    number.is_finite().then_some(number)
}

#[allow(clippy::cast_precision_loss)]
fn parse_numeric_text(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Some(0.0);
    }

    let radix = match raw.get(..2).map(str::to_ascii_lowercase).as_deref() {
        Some("0x") => 16,
        Some("0o") => 8,
        Some("0b") => 2,
        _ => return raw.parse::<f64>().ok(),
    };
    let digits = &raw[2..];
    if digits.is_empty() || !digits.chars().all(|digit| digit.is_digit(radix)) {
        return None;
    }
    u64::from_str_radix(digits, radix).ok().map(|value| value as f64)
}

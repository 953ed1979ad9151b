//! Field-level validation errors and their per-record accumulator.

use std::collections::BTreeMap;
use std::fmt;

use crate::angle::AngleFieldError;

/// Key under which errors that concern the whole record are stored.
pub const SCHEMA_KEY: &str = "_schema";

/// One problem with one field.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FieldError {
    #[error("Missing data for required field.")]
    MissingRequiredField,

    #[error("Field may not be null.")]
    NullNotAllowed,

    #[error("Not a valid {expected}.")]
    InvalidFieldType { expected: &'static str },

    #[error("Must be greater than or equal to {min}.")]
    OutOfRange { min: i64 },

    #[error("Must be less than or equal to {max}.")]
    AboveMaximum { max: i64 },

    #[error("'{value}' is not one of {allowed}.")]
    InvalidEnumValue { value: String, allowed: String },

    #[error("Unknown field.")]
    UnknownField,

    #[error("Not a valid datetime.")]
    InvalidDateTime,

    #[error(transparent)]
    Angle(#[from] AngleFieldError),
}

impl FieldError {
    /// Stable machine-readable kind.
    pub fn code(&self) -> &'static str {
        match self {
            FieldError::MissingRequiredField => "missing_required_field",
            FieldError::NullNotAllowed => "null_not_allowed",
            FieldError::InvalidFieldType { .. } => "invalid_field_type",
            FieldError::OutOfRange { .. } | FieldError::AboveMaximum { .. } => "out_of_range",
            FieldError::InvalidEnumValue { .. } => "invalid_enum_value",
            FieldError::UnknownField => "unknown_field",
            FieldError::InvalidDateTime => "invalid_datetime",
            FieldError::Angle(e) => e.code(),
        }
    }
}

/// Every field error found while loading one record, keyed by data path
/// (`posAngleConstraint.mode` for nested fields).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationErrors {
    fields: BTreeMap<String, Vec<FieldError>>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, path: impl Into<String>, error: FieldError) {
        self.fields.entry(path.into()).or_default().push(error);
    }

    /// Fold the errors of a nested record in under `prefix`.
    pub fn merge_nested(&mut self, prefix: &str, nested: ValidationErrors) {
        for (path, errors) in nested.fields {
            let key = if path == SCHEMA_KEY {
                prefix.to_string()
            } else {
                format!("{prefix}.{path}")
            };
            self.fields.entry(key).or_default().extend(errors);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Number of fields with at least one error.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn get(&self, path: &str) -> Option<&[FieldError]> {
        self.fields.get(path).map(Vec::as_slice)
    }

    /// `true` when `path` has an error of the given kind.
    pub fn has(&self, path: &str, code: &str) -> bool {
        self.get(path)
            .is_some_and(|errors| errors.iter().any(|e| e.code() == code))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[FieldError])> {
        self.fields
            .iter()
            .map(|(path, errors)| (path.as_str(), errors.as_slice()))
    }

    /// Errors as a JSON object of `path -> [messages]`.
    pub fn to_json(&self) -> serde_json::Value {
        let map = self
            .fields
            .iter()
            .map(|(path, errors)| {
                let messages = errors
                    .iter()
                    .map(|e| serde_json::Value::String(e.to_string()))
                    .collect();
                (path.clone(), serde_json::Value::Array(messages))
            })
            .collect();
        serde_json::Value::Object(map)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (path, errors) in &self.fields {
            for error in errors {
                if !first {
                    f.write_str("; ")?;
                }
                write!(f, "{path}: {error}")?;
                first = false;
            }
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

//! Scalar field validators used by the record schemas.
//!
//! Each validator implements [`Field`]: it reads one JSON value into a typed
//! value and writes it back. The angle field lives in
//! [`crate::angle::AngleField`].

use std::marker::PhantomData;

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use serde_json::Value;

use super::FieldError;
use crate::models::CodeEnum;

/// A single schema field: conversion between a JSON value and `Output`.
pub trait Field {
    type Output;

    /// `None` becomes JSON `null`.
    fn serialize(&self, value: Option<&Self::Output>) -> Result<Value, FieldError>;

    fn deserialize(&self, value: &Value) -> Result<Self::Output, FieldError>;
}

/// Strings are taken as-is; empty strings are valid.
#[derive(Debug, Clone, Copy, Default)]
pub struct StrField;

impl Field for StrField {
    type Output = String;

    fn serialize(&self, value: Option<&String>) -> Result<Value, FieldError> {
        Ok(value.map_or(Value::Null, |s| Value::String(s.clone())))
    }

    fn deserialize(&self, value: &Value) -> Result<String, FieldError> {
        match value {
            Value::String(s) => Ok(s.clone()),
            _ => Err(FieldError::InvalidFieldType { expected: "string" }),
        }
    }
}

/// Integers, optionally bounded below. Integral floats and numeric strings
/// are accepted.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntField {
    min: Option<i64>,
}

impl IntField {
    pub const fn new() -> Self {
        Self { min: None }
    }

    pub const fn at_least(min: i64) -> Self {
        Self { min: Some(min) }
    }
}

impl Field for IntField {
    type Output = i64;

    fn serialize(&self, value: Option<&i64>) -> Result<Value, FieldError> {
        Ok(value.map_or(Value::Null, |n| Value::from(*n)))
    }

    fn deserialize(&self, value: &Value) -> Result<i64, FieldError> {
        let invalid = FieldError::InvalidFieldType { expected: "integer" };
        let n = match value {
            Value::Number(n) => match n.as_i64() {
                Some(i) => i,
                None => match n.as_f64() {
                    Some(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => f as i64,
                    _ => return Err(invalid),
                },
            },
            Value::String(s) => s.trim().parse::<i64>().map_err(|_| invalid)?,
            _ => return Err(invalid),
        };

        match self.min {
            Some(min) if n < min => Err(FieldError::OutOfRange { min }),
            _ => Ok(n),
        }
    }
}

/// Unsigned 32-bit integers with a lower bound. Values past `u32::MAX` are
/// out of range.
#[derive(Debug, Clone, Copy, Default)]
pub struct U32Field {
    min: u32,
}

impl U32Field {
    pub const fn at_least(min: u32) -> Self {
        Self { min }
    }
}

impl Field for U32Field {
    type Output = u32;

    fn serialize(&self, value: Option<&u32>) -> Result<Value, FieldError> {
        Ok(value.map_or(Value::Null, |n| Value::from(*n)))
    }

    fn deserialize(&self, value: &Value) -> Result<u32, FieldError> {
        let n = IntField::at_least(i64::from(self.min)).deserialize(value)?;
        u32::try_from(n).map_err(|_| FieldError::AboveMaximum {
            max: i64::from(u32::MAX),
        })
    }
}

/// Closed enumeration matched exactly by wire code.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnumField<E>(PhantomData<E>);

impl<E> EnumField<E> {
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<E: CodeEnum> Field for EnumField<E> {
    type Output = E;

    fn serialize(&self, value: Option<&E>) -> Result<Value, FieldError> {
        Ok(value.map_or(Value::Null, |e| Value::String(e.code().to_string())))
    }

    fn deserialize(&self, value: &Value) -> Result<E, FieldError> {
        let code = match value {
            Value::String(s) => s.as_str(),
            _ => "",
        };
        E::from_code(code).ok_or_else(|| FieldError::InvalidEnumValue {
            value: value.as_str().map_or_else(|| value.to_string(), str::to_string),
            allowed: E::allowed_codes(),
        })
    }
}

/// ISO-8601 timestamps. Values without an offset are read as UTC.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateTimeField;

impl DateTimeField {
    const NAIVE_FORMATS: [&'static str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];
}

impl Field for DateTimeField {
    type Output = DateTime<Utc>;

    fn serialize(&self, value: Option<&DateTime<Utc>>) -> Result<Value, FieldError> {
        Ok(value.map_or(Value::Null, |dt| {
            Value::String(dt.to_rfc3339_opts(SecondsFormat::AutoSi, true))
        }))
    }

    fn deserialize(&self, value: &Value) -> Result<DateTime<Utc>, FieldError> {
        let Value::String(s) = value else {
            return Err(FieldError::InvalidDateTime);
        };
        let s = s.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Ok(dt.with_timezone(&Utc));
        }
        Self::NAIVE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
            .map(|naive| naive.and_utc())
            .ok_or(FieldError::InvalidDateTime)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ScienceBand;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn strings_must_be_strings() {
        assert_eq!(StrField.deserialize(&json!("")).unwrap(), "");
        assert_eq!(
            StrField.deserialize(&json!(3)).unwrap_err(),
            FieldError::InvalidFieldType { expected: "string" }
        );
    }

    #[test]
    fn integer_bounds() {
        let index = IntField::at_least(1);
        assert_eq!(index.deserialize(&json!(1)).unwrap(), 1);
        assert_eq!(index.deserialize(&json!(0)).unwrap_err(), FieldError::OutOfRange { min: 1 });
        assert_eq!(index.deserialize(&json!(-4)).unwrap_err().code(), "out_of_range");
    }

    #[test]
    fn integer_coercion() {
        let f = IntField::new();
        assert_eq!(f.deserialize(&json!(7.0)).unwrap(), 7);
        assert_eq!(f.deserialize(&json!("12")).unwrap(), 12);
        assert_eq!(f.deserialize(&json!(7.5)).unwrap_err().code(), "invalid_field_type");
        assert_eq!(f.deserialize(&json!(true)).unwrap_err().code(), "invalid_field_type");
    }

    #[test]
    fn u32_bounds() {
        let index = U32Field::at_least(1);
        assert_eq!(index.deserialize(&json!(4_294_967_295_u64)).unwrap(), u32::MAX);
        assert_eq!(
            index.deserialize(&json!(4_294_967_296_u64)).unwrap_err(),
            FieldError::AboveMaximum { max: 4_294_967_295 }
        );
        assert_eq!(index.deserialize(&json!(5_000_000_000_i64)).unwrap_err().code(), "out_of_range");
        assert_eq!(index.deserialize(&json!(0)).unwrap_err(), FieldError::OutOfRange { min: 1 });
        assert_eq!(index.serialize(Some(&7)).unwrap(), json!(7));
    }

    #[test]
    fn enums_match_by_value_only() {
        let f = EnumField::<ScienceBand>::new();
        assert_eq!(f.deserialize(&json!("BAND2")).unwrap(), ScienceBand::Band2);

        let err = f.deserialize(&json!("BAND_5")).unwrap_err();
        assert_eq!(err.code(), "invalid_enum_value");
        assert_eq!(
            err,
            FieldError::InvalidEnumValue {
                value: "BAND_5".into(),
                allowed: "BAND1, BAND2, BAND3, BAND4".into()
            }
        );
        // No case folding, and the variant name is not a wire code.
        assert!(f.deserialize(&json!("band1")).is_err());
        assert!(f.deserialize(&json!("BAND_1")).is_err());
        assert!(f.deserialize(&json!(1)).is_err());
    }

    #[test]
    fn datetimes() {
        let f = DateTimeField;
        let expected = Utc.with_ymd_and_hms(2025, 3, 1, 12, 30, 0).unwrap();
        assert_eq!(f.deserialize(&json!("2025-03-01T12:30:00Z")).unwrap(), expected);
        assert_eq!(f.deserialize(&json!("2025-03-01T14:30:00+02:00")).unwrap(), expected);
        assert_eq!(f.deserialize(&json!("2025-03-01T12:30:00")).unwrap(), expected);
        assert_eq!(f.deserialize(&json!("2025-03-01 12:30:00")).unwrap(), expected);
        assert_eq!(f.deserialize(&json!("yesterday")).unwrap_err(), FieldError::InvalidDateTime);
        assert_eq!(
            f.serialize(Some(&expected)).unwrap(),
            json!("2025-03-01T12:30:00Z")
        );
    }

    #[test]
    fn none_serializes_to_null() {
        assert_eq!(StrField.serialize(None).unwrap(), Value::Null);
        assert_eq!(IntField::new().serialize(None).unwrap(), Value::Null);
        assert_eq!(DateTimeField.serialize(None).unwrap(), Value::Null);
        assert_eq!(EnumField::<ScienceBand>::new().serialize(None).unwrap(), Value::Null);
    }
}

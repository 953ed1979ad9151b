//! Conversion field between [`Angle`] values and their wire representation.
//!
//! An [`AngleField`] either exchanges plain numbers in a configured unit, or,
//! when a [`SerializeFormat`] is set, sexagesimal strings in hours (`hms`) or
//! degrees (`dms`). All conversion failures collapse into one of two error
//! kinds depending on direction: [`AngleFieldError::SerializeError`] and
//! [`AngleFieldError::DeserializeError`].

use std::any::Any;
use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use super::sexagesimal::{self, ToStringOptions};
use super::{Angle, AngleUnit};
use crate::schema::{Field, FieldError};

/// Special string formats an angle field may serialize to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SerializeFormat {
    Hms,
    Dms,
}

impl SerializeFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            SerializeFormat::Hms => "hms",
            SerializeFormat::Dms => "dms",
        }
    }

    /// Unit forced on values read or written in this format.
    pub fn unit(&self) -> AngleUnit {
        match self {
            SerializeFormat::Hms => AngleUnit::Hour,
            SerializeFormat::Dms => AngleUnit::Degree,
        }
    }
}

impl FromStr for SerializeFormat {
    type Err = AngleFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hms" => Ok(SerializeFormat::Hms),
            "dms" => Ok(SerializeFormat::Dms),
            other => Err(AngleFieldError::InvalidSerializeFormat(other.to_string())),
        }
    }
}

impl fmt::Display for SerializeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failures of an [`AngleField`], at configuration or conversion time.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AngleFieldError {
    #[error("'{0}' is not a valid angle unit.")]
    InvalidUnit(String),

    #[error("'{0}' is not a valid serialize format.")]
    InvalidSerializeFormat(String),

    #[error("Not a valid angle.")]
    Invalid,

    #[error("Value '{input}' cannot be serialized.")]
    SerializeError { input: String },

    #[error("Value '{input}' cannot be deserialized.")]
    DeserializeError { input: String },
}

impl AngleFieldError {
    pub fn code(&self) -> &'static str {
        match self {
            AngleFieldError::InvalidUnit(_) => "invalid_unit",
            AngleFieldError::InvalidSerializeFormat(_) => "invalid_serialize_format",
            AngleFieldError::Invalid => "invalid",
            AngleFieldError::SerializeError { .. } => "serialize_error",
            AngleFieldError::DeserializeError { .. } => "deserialize_error",
        }
    }
}

/// Bidirectional angle converter. Immutable once built.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AngleField {
    unit: Option<AngleUnit>,
    format: Option<SerializeFormat>,
    to_string: ToStringOptions,
}

impl AngleField {
    /// Build from loosely typed settings, as they appear in configuration.
    ///
    /// ```
    /// use gpp_client::angle::{AngleField, AngleFieldError};
    ///
    /// assert!(AngleField::new(Some("arcsec"), None).is_ok());
    /// assert_eq!(
    ///     AngleField::new(None, Some("xyz")).unwrap_err().code(),
    ///     "invalid_serialize_format"
    /// );
    /// assert!(matches!(
    ///     AngleField::new(Some("furlong"), None),
    ///     Err(AngleFieldError::InvalidUnit(_))
    /// ));
    /// ```
    pub fn new(unit: Option<&str>, format: Option<&str>) -> Result<Self, AngleFieldError> {
        let mut builder = AngleField::builder();
        if let Some(unit) = unit.filter(|u| !u.is_empty()) {
            let unit = unit
                .parse::<AngleUnit>()
                .map_err(|_| AngleFieldError::InvalidUnit(unit.to_string()))?;
            builder = builder.unit(unit);
        }
        if let Some(format) = format.filter(|f| !f.is_empty()) {
            builder = builder.format(format.parse()?);
        }
        Ok(builder.build())
    }

    pub fn builder() -> AngleFieldBuilder {
        AngleFieldBuilder::default()
    }

    pub fn unit(&self) -> Option<AngleUnit> {
        self.unit
    }

    pub fn format(&self) -> Option<SerializeFormat> {
        self.format
    }

    /// Unit used when reading values: the format's unit wins over the
    /// configured one.
    pub fn effective_unit(&self) -> Option<AngleUnit> {
        self.format.map(|f| f.unit()).or(self.unit)
    }

    /// Serialize an angle; `None` maps to JSON `null`.
    pub fn serialize(&self, value: Option<&Angle>) -> Result<Value, AngleFieldError> {
        match value {
            None => Ok(Value::Null),
            Some(angle) => self.serialize_angle(angle),
        }
    }

    /// Serialize a dynamically typed value. Anything other than an [`Angle`]
    /// is rejected with [`AngleFieldError::Invalid`].
    pub fn serialize_any(&self, value: Option<&dyn Any>) -> Result<Value, AngleFieldError> {
        match value {
            None => Ok(Value::Null),
            Some(value) => match value.downcast_ref::<Angle>() {
                Some(angle) => self.serialize_angle(angle),
                None => Err(AngleFieldError::Invalid),
            },
        }
    }

    fn serialize_angle(&self, angle: &Angle) -> Result<Value, AngleFieldError> {
        let failed = || AngleFieldError::SerializeError {
            input: angle.to_string(),
        };

        if let Some(format) = self.format {
            let unit = format.unit();
            let text = sexagesimal::format(angle.to_value(unit), unit, &self.to_string)
                .map_err(|_| failed())?;
            return Ok(Value::String(text));
        }

        let unit = self.unit.ok_or_else(failed)?;
        let number = serde_json::Number::from_f64(angle.to_value(unit)).ok_or_else(failed)?;
        Ok(Value::Number(number))
    }

    /// Read an angle from a JSON number or string.
    pub fn deserialize(&self, value: &Value) -> Result<Angle, AngleFieldError> {
        let failed = || AngleFieldError::DeserializeError {
            input: value.to_string(),
        };
        let unit = self.effective_unit();

        match value {
            Value::Number(n) => {
                let magnitude = n.as_f64().ok_or_else(failed)?;
                Angle::new(magnitude, unit.ok_or_else(failed)?).map_err(|_| failed())
            }
            Value::String(s) => sexagesimal::parse(s, unit).map_err(|_| failed()),
            _ => Err(failed()),
        }
    }
}

impl Field for AngleField {
    type Output = Angle;

    fn serialize(&self, value: Option<&Angle>) -> Result<Value, FieldError> {
        AngleField::serialize(self, value).map_err(FieldError::from)
    }

    fn deserialize(&self, value: &Value) -> Result<Angle, FieldError> {
        AngleField::deserialize(self, value).map_err(FieldError::from)
    }
}

/// Typed construction of an [`AngleField`].
#[derive(Debug, Clone, Default)]
pub struct AngleFieldBuilder {
    unit: Option<AngleUnit>,
    format: Option<SerializeFormat>,
    to_string: ToStringOptions,
}

impl AngleFieldBuilder {
    pub fn unit(mut self, unit: AngleUnit) -> Self {
        self.unit = Some(unit);
        self
    }

    pub fn format(mut self, format: SerializeFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn to_string_options(mut self, options: ToStringOptions) -> Self {
        self.to_string = options;
        self
    }

    pub fn build(self) -> AngleField {
        AngleField {
            unit: self.unit,
            format: self.format,
            to_string: self.to_string,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::angle::Separator;
    use approx::assert_relative_eq;
    use serde_json::json;

    fn field(unit: AngleUnit) -> AngleField {
        AngleField::builder().unit(unit).build()
    }

    #[test]
    fn null_serializes_to_null_for_any_configuration() {
        let fields = [
            AngleField::default(),
            field(AngleUnit::Arcsecond),
            AngleField::builder().format(SerializeFormat::Hms).build(),
            AngleField::builder().format(SerializeFormat::Dms).build(),
        ];
        for f in &fields {
            assert_eq!(f.serialize(None).unwrap(), Value::Null);
            assert_eq!(f.serialize_any(None).unwrap(), Value::Null);
        }
    }

    #[test]
    fn numeric_serialization_uses_configured_unit() {
        let angle = Angle::degrees(1.5).unwrap();
        let value = field(AngleUnit::Arcminute).serialize(Some(&angle)).unwrap();
        assert_relative_eq!(value.as_f64().unwrap(), 90.0);
    }

    #[test]
    fn hms_rendering_of_ninety_degrees() {
        let f = AngleField::builder().format(SerializeFormat::Hms).build();
        let value = f.serialize(Some(&Angle::degrees(90.0).unwrap())).unwrap();
        assert_eq!(value, json!("6h00m00s"));

        let back = f.deserialize(&value).unwrap();
        assert_eq!(back.unit(), AngleUnit::Hour);
        assert!(back.approx_eq(&Angle::degrees(90.0).unwrap(), 1e-9));
    }

    #[test]
    fn dms_rendering_of_one_hour() {
        let f = AngleField::builder().format(SerializeFormat::Dms).build();
        let value = f.serialize(Some(&Angle::hours(1.0).unwrap())).unwrap();
        assert_eq!(value, json!("15d00m00s"));

        let back = f.deserialize(&value).unwrap();
        assert_eq!(back.unit(), AngleUnit::Degree);
        assert!(back.approx_eq(&Angle::hours(1.0).unwrap(), 1e-9));
    }

    #[test]
    fn format_overrides_unit() {
        let f = AngleField::builder()
            .unit(AngleUnit::Arcsecond)
            .format(SerializeFormat::Dms)
            .to_string_options(ToStringOptions::default().with_separator(Separator::Colon))
            .build();
        assert_eq!(f.effective_unit(), Some(AngleUnit::Degree));
        let value = f.serialize(Some(&Angle::degrees(-12.5).unwrap())).unwrap();
        assert_eq!(value, json!("-12:30:00"));
        let back = f.deserialize(&json!(2.0)).unwrap();
        assert_eq!(back.unit(), AngleUnit::Degree);
        assert_eq!(back.value(), 2.0);
    }

    #[test]
    fn non_angle_input_is_invalid() {
        let f = field(AngleUnit::Degree);
        let not_an_angle: &dyn Any = &42.0_f64;
        let err = f.serialize_any(Some(not_an_angle)).unwrap_err();
        assert_eq!(err, AngleFieldError::Invalid);
        assert_eq!(err.code(), "invalid");
    }

    #[test]
    fn any_path_accepts_angles() {
        let f = field(AngleUnit::Degree);
        let angle = Angle::hours(2.0).unwrap();
        let value = f.serialize_any(Some(&angle as &dyn Any)).unwrap();
        assert_relative_eq!(value.as_f64().unwrap(), 30.0);
    }

    #[test]
    fn numeric_serialization_without_unit_fails() {
        let err = AngleField::default()
            .serialize(Some(&Angle::degrees(1.0).unwrap()))
            .unwrap_err();
        assert_eq!(err.code(), "serialize_error");
        assert_eq!(
            err,
            AngleFieldError::SerializeError {
                input: "1 deg".to_string()
            }
        );
    }

    #[test]
    fn huge_magnitudes_fail_sexagesimal_serialization() {
        let angle = Angle::degrees(1e30).unwrap();
        for format in [SerializeFormat::Hms, SerializeFormat::Dms] {
            let err = AngleField::builder()
                .format(format)
                .build()
                .serialize(Some(&angle))
                .unwrap_err();
            assert_eq!(err.code(), "serialize_error");
        }

        // Still representable as a plain number.
        let value = field(AngleUnit::Degree).serialize(Some(&angle)).unwrap();
        assert_relative_eq!(value.as_f64().unwrap(), 1e30);
    }

    #[test]
    fn deserialize_failures_carry_input() {
        let f = field(AngleUnit::Degree);
        for bad in [json!("twelve"), json!(true), json!({"deg": 1}), json!(null)] {
            let err = f.deserialize(&bad).unwrap_err();
            assert_eq!(
                err,
                AngleFieldError::DeserializeError {
                    input: bad.to_string()
                }
            );
        }
    }

    #[test]
    fn unitless_number_cannot_be_deserialized_without_unit() {
        let err = AngleField::default().deserialize(&json!(1.0)).unwrap_err();
        assert_eq!(err.code(), "deserialize_error");
    }

    #[test]
    fn strings_with_units_are_converted_to_field_unit() {
        let f = field(AngleUnit::Arcsecond);
        let a = f.deserialize(&json!("1deg")).unwrap();
        assert_eq!(a.unit(), AngleUnit::Arcsecond);
        assert_relative_eq!(a.value(), 3_600.0);
    }

    #[test]
    fn configuration_errors() {
        assert_eq!(
            AngleField::new(Some("lightyear"), None).unwrap_err(),
            AngleFieldError::InvalidUnit("lightyear".to_string())
        );
        assert_eq!(
            AngleField::new(Some("deg"), Some("HMS")).unwrap_err(),
            AngleFieldError::InvalidSerializeFormat("HMS".to_string())
        );
        let f = AngleField::new(Some("hourangle"), Some("hms")).unwrap();
        assert_eq!(f.unit(), Some(AngleUnit::Hour));
        assert_eq!(f.format(), Some(SerializeFormat::Hms));
    }
}

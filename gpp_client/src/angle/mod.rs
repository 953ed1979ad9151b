//! Angles as reported by GPP: a finite magnitude tagged with its unit.
//!
//! [`Angle`] keeps the unit it was created with, so a value read as
//! milliarcseconds stays in milliarcseconds until it is explicitly converted.
//! Conversions use the `qtty` unit ratios (see [`unit`]).

pub mod field;
pub mod sexagesimal;
pub mod unit;


use std::fmt;

use qtty::Quantity;

pub use field::{AngleField, AngleFieldBuilder, AngleFieldError, SerializeFormat};
pub use sexagesimal::{Separator, ToStringOptions};
pub use unit::{AngleUnit, KnownAngleUnit, UnknownUnit};

/// Default absolute tolerance (in degrees) for [`Angle::approx_eq`].
pub const DEFAULT_TOLERANCE_DEG: f64 = 1e-9;

/// Error raised when constructing an angle from an unusable magnitude.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("angle magnitude must be finite, got {0}")]
pub struct NonFiniteAngle(pub f64);

/// An angular measure: magnitude plus unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Angle {
    value: f64,
    unit: AngleUnit,
}

impl Angle {
    pub fn new(value: f64, unit: AngleUnit) -> Result<Self, NonFiniteAngle> {
        if !value.is_finite() {
            return Err(NonFiniteAngle(value));
        }
        Ok(Self { value, unit })
    }

    pub fn degrees(value: f64) -> Result<Self, NonFiniteAngle> {
        Self::new(value, AngleUnit::Degree)
    }

    pub fn hours(value: f64) -> Result<Self, NonFiniteAngle> {
        Self::new(value, AngleUnit::Hour)
    }

    /// Build from a typed `qtty` quantity, keeping its unit.
    pub fn from_quantity<U: KnownAngleUnit>(quantity: Quantity<U>) -> Result<Self, NonFiniteAngle> {
        Self::new(quantity.value(), U::TAG)
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn unit(&self) -> AngleUnit {
        self.unit
    }

    /// Magnitude expressed in `unit`.
    pub fn to_value(&self, unit: AngleUnit) -> f64 {
        if unit == self.unit {
            return self.value;
        }
        self.value * (self.unit.ratio() / unit.ratio())
    }

    /// Same angle re-expressed in `unit`.
    pub fn to(&self, unit: AngleUnit) -> Angle {
        Angle {
            value: self.to_value(unit),
            unit,
        }
    }

    /// Typed view of this angle as a `qtty` quantity.
    pub fn to_quantity<U: KnownAngleUnit>(&self) -> Quantity<U> {
        Quantity::new(self.to_value(U::TAG))
    }

    /// Compares two angles after conversion to degrees.
    pub fn approx_eq(&self, other: &Angle, tolerance_deg: f64) -> bool {
        let a = self.to_value(AngleUnit::Degree);
        let b = other.to_value(AngleUnit::Degree);
        (a - b).abs() <= tolerance_deg.max(f64::EPSILON * a.abs().max(b.abs()))
    }

    /// Sexagesimal rendering in this angle's own family (hours or degrees).
    pub fn to_sexagesimal(
        &self,
        options: &ToStringOptions,
    ) -> Result<String, sexagesimal::MagnitudeTooLarge> {
        let base = self.unit.sexagesimal_base();
        sexagesimal::format(self.to_value(base), base, options)
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.unit)
    }
}

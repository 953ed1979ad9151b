//! Angular units understood by the GPP API.
//!
//! GPP reports every angle in several flavours at once: arc-based units
//! (degrees down to microarcseconds) and time-based units (hours down to
//! microseconds of hour angle). The arc-based units and the hour come straight
//! from `qtty`; the sub-hour time units are declared here as extra `qtty` units
//! in the same `Angular` dimension so every conversion goes through
//! [`Unit::RATIO`] with degrees as the canonical unit.

use std::fmt;
use std::str::FromStr;

use qtty::angular::{
    Angular, Arcminute, Arcsecond, Degree, HourAngle, MicroArcsecond, MilliArcsecond,
};
use qtty::{Quantity, Unit};

/// Minute of hour angle (`1/60` hour, `0.25` degree).
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct TimeMinute;

impl Unit for TimeMinute {
    const RATIO: f64 = 15.0 / 60.0;
    type Dim = Angular;
    const SYMBOL: &'static str = "min";
}

/// Second of hour angle (`1/3600` hour, `15` arcseconds).
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct TimeSecond;

impl Unit for TimeSecond {
    const RATIO: f64 = 15.0 / 3_600.0;
    type Dim = Angular;
    const SYMBOL: &'static str = "s";
}

/// Millisecond of hour angle.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct TimeMillisecond;

impl Unit for TimeMillisecond {
    const RATIO: f64 = 15.0 / 3_600_000.0;
    type Dim = Angular;
    const SYMBOL: &'static str = "ms";
}

/// Microsecond of hour angle.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct TimeMicrosecond;

impl Unit for TimeMicrosecond {
    const RATIO: f64 = 15.0 / 3_600_000_000.0;
    type Dim = Angular;
    const SYMBOL: &'static str = "μs";
}

/// Runtime tag for one of the supported angular units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AngleUnit {
    Degree,
    Arcminute,
    Arcsecond,
    Milliarcsecond,
    Microarcsecond,
    Hour,
    Minute,
    Second,
    Millisecond,
    Microsecond,
}

impl AngleUnit {
    pub const ALL: [AngleUnit; 10] = [
        AngleUnit::Degree,
        AngleUnit::Arcminute,
        AngleUnit::Arcsecond,
        AngleUnit::Milliarcsecond,
        AngleUnit::Microarcsecond,
        AngleUnit::Hour,
        AngleUnit::Minute,
        AngleUnit::Second,
        AngleUnit::Millisecond,
        AngleUnit::Microsecond,
    ];

    /// Degrees per one of this unit.
    pub fn ratio(self) -> f64 {
        match self {
            AngleUnit::Degree => Degree::RATIO,
            AngleUnit::Arcminute => Arcminute::RATIO,
            AngleUnit::Arcsecond => Arcsecond::RATIO,
            AngleUnit::Milliarcsecond => MilliArcsecond::RATIO,
            AngleUnit::Microarcsecond => MicroArcsecond::RATIO,
            AngleUnit::Hour => HourAngle::RATIO,
            AngleUnit::Minute => TimeMinute::RATIO,
            AngleUnit::Second => TimeSecond::RATIO,
            AngleUnit::Millisecond => TimeMillisecond::RATIO,
            AngleUnit::Microsecond => TimeMicrosecond::RATIO,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            AngleUnit::Degree => "deg",
            AngleUnit::Arcminute => "arcmin",
            AngleUnit::Arcsecond => "arcsec",
            AngleUnit::Milliarcsecond => "mas",
            AngleUnit::Microarcsecond => "uas",
            AngleUnit::Hour => "hourangle",
            AngleUnit::Minute => "min",
            AngleUnit::Second => "s",
            AngleUnit::Millisecond => "ms",
            AngleUnit::Microsecond => "us",
        }
    }

    /// `true` for units measured along the hour-angle scale.
    pub fn is_time_based(self) -> bool {
        matches!(
            self,
            AngleUnit::Hour
                | AngleUnit::Minute
                | AngleUnit::Second
                | AngleUnit::Millisecond
                | AngleUnit::Microsecond
        )
    }

    /// Head unit of the sexagesimal family this unit belongs to.
    pub fn sexagesimal_base(self) -> AngleUnit {
        if self.is_time_based() {
            AngleUnit::Hour
        } else {
            AngleUnit::Degree
        }
    }
}

impl fmt::Display for AngleUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Error returned when a unit specifier cannot be resolved.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{0}' is not a supported angular unit")]
pub struct UnknownUnit(pub String);

impl FromStr for AngleUnit {
    type Err = UnknownUnit;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unit = match s.trim() {
            "deg" | "degree" | "degrees" | "d" | "°" => AngleUnit::Degree,
            "arcmin" | "arcminute" | "arcminutes" | "'" => AngleUnit::Arcminute,
            "arcsec" | "arcsecond" | "arcseconds" | "\"" => AngleUnit::Arcsecond,
            "mas" | "milliarcsecond" | "milliarcseconds" => AngleUnit::Milliarcsecond,
            "uas" | "µas" | "μas" | "microarcsecond" | "microarcseconds" => {
                AngleUnit::Microarcsecond
            }
            "h" | "hr" | "hour" | "hours" | "hourangle" => AngleUnit::Hour,
            "min" | "minute" | "minutes" => AngleUnit::Minute,
            "s" | "sec" | "second" | "seconds" => AngleUnit::Second,
            "ms" | "millisecond" | "milliseconds" => AngleUnit::Millisecond,
            "us" | "µs" | "μs" | "microsecond" | "microseconds" => AngleUnit::Microsecond,
            other => return Err(UnknownUnit(other.to_string())),
        };
        Ok(unit)
    }
}

/// Links a compile-time `qtty` unit to its runtime [`AngleUnit`] tag.
pub trait KnownAngleUnit: Unit<Dim = Angular> {
    const TAG: AngleUnit;
}

macro_rules! known_angle_units {
    ($($ty:ty => $tag:ident),+ $(,)?) => {
        $(
            impl KnownAngleUnit for $ty {
                const TAG: AngleUnit = AngleUnit::$tag;
            }
        )+
    };
}

known_angle_units!(
    Degree => Degree,
    Arcminute => Arcminute,
    Arcsecond => Arcsecond,
    MilliArcsecond => Milliarcsecond,
    MicroArcsecond => Microarcsecond,
    HourAngle => Hour,
    TimeMinute => Minute,
    TimeSecond => Second,
    TimeMillisecond => Millisecond,
    TimeMicrosecond => Microsecond,
);

/// Time-based angle quantity aliases.
pub type TimeMinutes = Quantity<TimeMinute>;
pub type TimeSeconds = Quantity<TimeSecond>;

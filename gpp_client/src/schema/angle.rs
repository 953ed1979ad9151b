//! GPP `Angle` object: one value reported in every unit.

use super::{FieldReader, FieldSpec, FieldWriter, Schema};
use crate::angle::{AngleField, AngleUnit, SerializeFormat, Separator, ToStringOptions};
use crate::models::AngleRecord;

const MICROARCSECONDS: FieldSpec = FieldSpec::required("microarcseconds", "microarcseconds");
const MICROSECONDS: FieldSpec = FieldSpec::required("microseconds", "microseconds");
const MILLIARCSECONDS: FieldSpec = FieldSpec::required("milliarcseconds", "milliarcseconds");
const MILLISECONDS: FieldSpec = FieldSpec::required("milliseconds", "milliseconds");
const ARCSECONDS: FieldSpec = FieldSpec::required("arcseconds", "arcseconds");
const SECONDS: FieldSpec = FieldSpec::required("seconds", "seconds");
const ARCMINUTES: FieldSpec = FieldSpec::required("arcminutes", "arcminutes");
const MINUTES: FieldSpec = FieldSpec::required("minutes", "minutes");
const DEGREES: FieldSpec = FieldSpec::required("degrees", "degrees");
const HOURS: FieldSpec = FieldSpec::required("hours", "hours");
const HMS: FieldSpec = FieldSpec::required("hms", "hms");
const DMS: FieldSpec = FieldSpec::required("dms", "dms");

/// Schema for [`AngleRecord`]. Sexagesimal values are written the way GPP
/// prints them (`05:30:00.000000`) unless other options are given.
#[derive(Debug, Clone, PartialEq)]
pub struct AngleSchema {
    sexagesimal: ToStringOptions,
}

impl Default for AngleSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl AngleSchema {
    pub fn new() -> Self {
        Self::with_options(
            ToStringOptions::default()
                .with_separator(Separator::Colon)
                .with_precision(6)
                .padded(),
        )
    }

    /// Use `options` when writing `hms`/`dms`.
    pub fn with_options(sexagesimal: ToStringOptions) -> Self {
        Self { sexagesimal }
    }

    fn numeric(unit: AngleUnit) -> AngleField {
        AngleField::builder().unit(unit).build()
    }

    fn sexagesimal(&self, format: SerializeFormat) -> AngleField {
        AngleField::builder()
            .unit(format.unit())
            .format(format)
            .to_string_options(self.sexagesimal.clone())
            .build()
    }
}

impl Schema for AngleSchema {
    type Record = AngleRecord;

    const FIELDS: &'static [FieldSpec] = &[
        MICROARCSECONDS,
        MICROSECONDS,
        MILLIARCSECONDS,
        MILLISECONDS,
        ARCSECONDS,
        SECONDS,
        ARCMINUTES,
        MINUTES,
        DEGREES,
        HOURS,
        HMS,
        DMS,
    ];

    fn build(&self, fields: &mut FieldReader<'_>) -> Option<AngleRecord> {
        use AngleUnit::*;

        Some(AngleRecord {
            microarcseconds: fields.read(&MICROARCSECONDS, &Self::numeric(Microarcsecond)),
            microseconds: fields.read(&MICROSECONDS, &Self::numeric(Microsecond)),
            milliarcseconds: fields.read(&MILLIARCSECONDS, &Self::numeric(Milliarcsecond)),
            milliseconds: fields.read(&MILLISECONDS, &Self::numeric(Millisecond)),
            arcseconds: fields.read(&ARCSECONDS, &Self::numeric(Arcsecond)),
            seconds: fields.read(&SECONDS, &Self::numeric(Second)),
            arcminutes: fields.read(&ARCMINUTES, &Self::numeric(Arcminute)),
            minutes: fields.read(&MINUTES, &Self::numeric(Minute)),
            degrees: fields.read(&DEGREES, &Self::numeric(Degree)),
            hours: fields.read(&HOURS, &Self::numeric(Hour)),
            hms: fields.read(&HMS, &self.sexagesimal(SerializeFormat::Hms)),
            dms: fields.read(&DMS, &self.sexagesimal(SerializeFormat::Dms)),
        })
    }

    fn write(&self, record: &AngleRecord, out: &mut FieldWriter) {
        use AngleUnit::*;

        let numeric = [
            (&MICROARCSECONDS, Microarcsecond, &record.microarcseconds),
            (&MICROSECONDS, Microsecond, &record.microseconds),
            (&MILLIARCSECONDS, Milliarcsecond, &record.milliarcseconds),
            (&MILLISECONDS, Millisecond, &record.milliseconds),
            (&ARCSECONDS, Arcsecond, &record.arcseconds),
            (&SECONDS, Second, &record.seconds),
            (&ARCMINUTES, Arcminute, &record.arcminutes),
            (&MINUTES, Minute, &record.minutes),
            (&DEGREES, Degree, &record.degrees),
            (&HOURS, Hour, &record.hours),
        ];
        for (spec, unit, value) in numeric {
            out.write(spec, &Self::numeric(unit), value.as_ref());
        }
        out.write(&HMS, &self.sexagesimal(SerializeFormat::Hms), record.hms.as_ref());
        out.write(&DMS, &self.sexagesimal(SerializeFormat::Dms), record.dms.as_ref());
    }
}

//! Observation and position-angle constraint schemas.

use super::{
    DateTimeField, EnumField, FieldReader, FieldSpec, FieldWriter, Schema, StrField, U32Field,
};
use crate::models::{
    Existence, Instrument, Observation, PosAngleConstraint, PosAngleConstraintMode, ScienceBand,
};

const MODE: FieldSpec = FieldSpec::required("mode", "mode");

/// `{ mode }`
#[derive(Debug, Clone, Copy, Default)]
pub struct PosAngleConstraintSchema;

impl Schema for PosAngleConstraintSchema {
    type Record = PosAngleConstraint;

    const FIELDS: &'static [FieldSpec] = &[MODE];

    fn build(&self, fields: &mut FieldReader<'_>) -> Option<PosAngleConstraint> {
        let mode = fields.read(&MODE, &EnumField::<PosAngleConstraintMode>::new());
        Some(PosAngleConstraint { mode })
    }

    fn write(&self, record: &PosAngleConstraint, out: &mut FieldWriter) {
        out.write(&MODE, &EnumField::new(), record.mode.as_ref());
    }
}

const ID: FieldSpec = FieldSpec::required("observation_id", "id").identity();
const EXISTENCE: FieldSpec = FieldSpec::optional("existence", "existence");
const INDEX: FieldSpec = FieldSpec::required("index", "index");
const TITLE: FieldSpec = FieldSpec::required("title", "title");
const SUBTITLE: FieldSpec = FieldSpec::optional("subtitle", "subtitle");
const SCIENCE_BAND: FieldSpec = FieldSpec::optional("science_band", "scienceBand");
const OBSERVATION_TIME: FieldSpec = FieldSpec::optional("observation_time", "observationTime");
const INSTRUMENT: FieldSpec = FieldSpec::optional("instrument", "instrument");
const POS_ANGLE_CONSTRAINT: FieldSpec =
    FieldSpec::required("pos_angle_constraint", "posAngleConstraint");

/// Observation index values start at 1.
pub(crate) const INDEX_FIELD: U32Field = U32Field::at_least(1);

/// Maps a GPP `Observation` object into an [`Observation`] record.
#[derive(Debug, Clone, Copy, Default)]
pub struct ObservationSchema;

impl Schema for ObservationSchema {
    type Record = Observation;

    const FIELDS: &'static [FieldSpec] = &[
        ID,
        EXISTENCE,
        INDEX,
        TITLE,
        SUBTITLE,
        SCIENCE_BAND,
        OBSERVATION_TIME,
        INSTRUMENT,
        POS_ANGLE_CONSTRAINT,
    ];

    fn build(&self, fields: &mut FieldReader<'_>) -> Option<Observation> {
        let observation_id = fields.read(&ID, &StrField);
        let existence = fields.read(&EXISTENCE, &EnumField::<Existence>::new());
        let index = fields.read(&INDEX, &INDEX_FIELD);
        let title = fields.read(&TITLE, &StrField);
        let subtitle = fields.read(&SUBTITLE, &StrField);
        let science_band = fields.read(&SCIENCE_BAND, &EnumField::<ScienceBand>::new());
        let observation_time = fields.read(&OBSERVATION_TIME, &DateTimeField);
        let instrument = fields.read(&INSTRUMENT, &EnumField::<Instrument>::new());
        let pos_angle_constraint = fields.nested(&POS_ANGLE_CONSTRAINT, &PosAngleConstraintSchema);

        Some(Observation {
            observation_id: observation_id?,
            existence,
            title,
            subtitle,
            index,
            science_band,
            observation_time,
            instrument,
            pos_angle_constraint,
        })
    }

    fn write(&self, record: &Observation, out: &mut FieldWriter) {
        out.write(&ID, &StrField, Some(&record.observation_id));
        out.write(&EXISTENCE, &EnumField::new(), record.existence.as_ref());
        out.write(&INDEX, &INDEX_FIELD, record.index.as_ref());
        out.write(&TITLE, &StrField, record.title.as_ref());
        out.write(&SUBTITLE, &StrField, record.subtitle.as_ref());
        out.write(&SCIENCE_BAND, &EnumField::new(), record.science_band.as_ref());
        out.write(&OBSERVATION_TIME, &DateTimeField, record.observation_time.as_ref());
        out.write(&INSTRUMENT, &EnumField::new(), record.instrument.as_ref());
        out.nested(
            &POS_ANGLE_CONSTRAINT,
            &PosAngleConstraintSchema,
            record.pos_angle_constraint.as_ref(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::LoadMode;
    use serde_json::json;

    #[test]
    fn key_mapping_is_explicit() {
        assert_eq!(ObservationSchema::data_key("observation_id"), Some("id"));
        assert_eq!(ObservationSchema::data_key("science_band"), Some("scienceBand"));
        assert_eq!(
            ObservationSchema::data_key("pos_angle_constraint"),
            Some("posAngleConstraint")
        );
        assert_eq!(ObservationSchema::data_key("id"), None);
    }

    #[test]
    fn constraint_requires_mode() {
        let err = PosAngleConstraintSchema
            .load(&json!({}), LoadMode::Full)
            .unwrap_err();
        assert!(err.has("mode", "missing_required_field"));

        let ok = PosAngleConstraintSchema
            .load(&json!({}), LoadMode::Partial)
            .unwrap();
        assert_eq!(ok.mode, None);
    }

    #[test]
    fn constraint_mode_is_validated() {
        let err = PosAngleConstraintSchema
            .load(&json!({"mode": "SPINNING"}), LoadMode::Partial)
            .unwrap_err();
        assert!(err.has("mode", "invalid_enum_value"));
    }

    #[test]
    fn dump_omits_absent_fields() {
        let mut observation = Observation::new("o-1");
        observation.science_band = Some(ScienceBand::Band1);
        observation.pos_angle_constraint =
            Some(PosAngleConstraint::new(PosAngleConstraintMode::Fixed));

        let dumped = ObservationSchema.dump(&observation).unwrap();
        assert_eq!(
            dumped,
            json!({
                "id": "o-1",
                "scienceBand": "BAND1",
                "posAngleConstraint": {"mode": "FIXED"}
            })
        );
    }

    #[test]
    fn index_past_u32_is_rejected() {
        let payload = json!({
            "id": "o-1",
            "index": 5_000_000_000_i64,
            "title": "T",
            "posAngleConstraint": {"mode": "FIXED"}
        });
        let err = ObservationSchema.load(&payload, LoadMode::Full).unwrap_err();
        assert!(err.has("index", "out_of_range"));
        assert_eq!(err.len(), 1);

        let err = ObservationSchema
            .load(&json!({"id": "o-1", "index": 5_000_000_000_i64}), LoadMode::Partial)
            .unwrap_err();
        assert!(err.has("index", "out_of_range"));
    }
}

//! Program and observation reference schemas.

use super::observation::INDEX_FIELD;
use super::{EnumField, FieldReader, FieldSpec, FieldWriter, Schema, StrField};
use crate::models::{ObservationReference, ProgramReference, ProgramType};

const LABEL: FieldSpec = FieldSpec::required("label", "label");
const PROGRAM_TYPE: FieldSpec = FieldSpec::required("program_type", "type");

#[derive(Debug, Clone, Copy, Default)]
pub struct ProgramReferenceSchema;

impl Schema for ProgramReferenceSchema {
    type Record = ProgramReference;

    const FIELDS: &'static [FieldSpec] = &[LABEL, PROGRAM_TYPE];

    fn build(&self, fields: &mut FieldReader<'_>) -> Option<ProgramReference> {
        Some(ProgramReference {
            label: fields.read(&LABEL, &StrField),
            program_type: fields.read(&PROGRAM_TYPE, &EnumField::<ProgramType>::new()),
        })
    }

    fn write(&self, record: &ProgramReference, out: &mut FieldWriter) {
        out.write(&LABEL, &StrField, record.label.as_ref());
        out.write(&PROGRAM_TYPE, &EnumField::new(), record.program_type.as_ref());
    }
}

const PROGRAM: FieldSpec = FieldSpec::optional("program", "program");
const INDEX: FieldSpec = FieldSpec::required("index", "index");

#[derive(Debug, Clone, Copy, Default)]
pub struct ObservationReferenceSchema;

impl Schema for ObservationReferenceSchema {
    type Record = ObservationReference;

    const FIELDS: &'static [FieldSpec] = &[LABEL, PROGRAM, INDEX];

    fn build(&self, fields: &mut FieldReader<'_>) -> Option<ObservationReference> {
        let label = fields.read(&LABEL, &StrField);
        let program = fields.nested(&PROGRAM, &ProgramReferenceSchema);
        let index = fields.read(&INDEX, &INDEX_FIELD);
        Some(ObservationReference {
            label,
            program,
            index,
        })
    }

    fn write(&self, record: &ObservationReference, out: &mut FieldWriter) {
        out.write(&LABEL, &StrField, record.label.as_ref());
        out.nested(&PROGRAM, &ProgramReferenceSchema, record.program.as_ref());
        out.write(&INDEX, &INDEX_FIELD, record.index.as_ref());
    }
}

//! Declarative validation and mapping of GPP payloads into records.
//!
//! Every schema owns an explicit field table ([`FieldSpec`]) that maps the
//! record attribute to its wire key and states whether the field is required
//! and whether `null` is accepted. Nothing is inferred from naming
//! conventions: `id` maps to `observation_id` and `scienceBand` maps to
//! `science_band` because the table says so.
//!
//! Loading never stops at the first bad field. All field errors of a record
//! (including those of nested records) are collected into one
//! [`ValidationErrors`] and returned together.
//!
//! # Example
//!
//! ```
//! use gpp_client::schema::{LoadMode, ObservationSchema, Schema};
//! use serde_json::json;
//!
//! let payload = json!({
//!     "id": "o-123",
//!     "index": 1,
//!     "title": "Test",
//!     "posAngleConstraint": {"mode": "FIXED"}
//! });
//! let observation = ObservationSchema.load(&payload, LoadMode::Full).unwrap();
//! assert_eq!(observation.observation_id, "o-123");
//! ```

pub mod angle;
pub mod errors;
pub mod fields;
pub mod observation;
pub mod reader;
pub mod references;

use serde_json::Value;

pub use angle::AngleSchema;
pub use errors::{FieldError, ValidationErrors, SCHEMA_KEY};
pub use fields::{DateTimeField, EnumField, Field, IntField, StrField, U32Field};
pub use observation::{ObservationSchema, PosAngleConstraintSchema};
pub use reader::{FieldReader, FieldWriter};
pub use references::{ObservationReferenceSchema, ProgramReferenceSchema};

/// Whether absent required fields are errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadMode {
    #[default]
    Full,
    /// Absent required fields are skipped; present values are still
    /// validated. Used for responses that only carry a selection of fields.
    Partial,
}

/// One row of a schema's field table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Record attribute name.
    pub attribute: &'static str,
    /// Key used on the wire.
    pub data_key: &'static str,
    pub required: bool,
    pub allow_null: bool,
    /// Required in every mode: the record cannot exist without it.
    pub identity: bool,
}

impl FieldSpec {
    /// Required and non-nullable.
    pub const fn required(attribute: &'static str, data_key: &'static str) -> Self {
        Self {
            attribute,
            data_key,
            required: true,
            allow_null: false,
            identity: false,
        }
    }

    /// Optional and nullable.
    pub const fn optional(attribute: &'static str, data_key: &'static str) -> Self {
        Self {
            attribute,
            data_key,
            required: false,
            allow_null: true,
            identity: false,
        }
    }

    pub const fn identity(mut self) -> Self {
        self.identity = true;
        self
    }
}

/// A record schema: field table plus the code that assembles the record.
pub trait Schema {
    type Record;

    /// The full field table; keys outside it are rejected as unknown.
    const FIELDS: &'static [FieldSpec];

    /// Read every field and assemble the record. Returning `None` without
    /// having recorded an error is treated as an incomplete record.
    fn build(&self, fields: &mut FieldReader<'_>) -> Option<Self::Record>;

    /// Write every present attribute of `record`.
    fn write(&self, record: &Self::Record, out: &mut FieldWriter);

    /// Validate `data` and map it into a record.
    fn load(&self, data: &Value, mode: LoadMode) -> Result<Self::Record, ValidationErrors> {
        let Some(object) = data.as_object() else {
            let mut errors = ValidationErrors::new();
            errors.add(SCHEMA_KEY, FieldError::InvalidFieldType { expected: "object" });
            return Err(errors);
        };

        let mut reader = FieldReader::new(object, mode);
        for key in object.keys() {
            if !Self::FIELDS.iter().any(|spec| spec.data_key == key) {
                reader.reject(key, FieldError::UnknownField);
            }
        }

        let record = self.build(&mut reader);
        let mut errors = reader.finish();
        match record {
            Some(record) if errors.is_empty() => Ok(record),
            Some(_) => Err(errors),
            None => {
                if errors.is_empty() {
                    errors.add(SCHEMA_KEY, FieldError::MissingRequiredField);
                }
                Err(errors)
            }
        }
    }

    /// Serialize `record` back into its wire shape.
    fn dump(&self, record: &Self::Record) -> Result<Value, ValidationErrors> {
        let mut out = FieldWriter::new();
        self.write(record, &mut out);
        out.finish()
    }

    /// Wire key for a record attribute.
    fn data_key(attribute: &str) -> Option<&'static str> {
        Self::FIELDS
            .iter()
            .find(|spec| spec.attribute == attribute)
            .map(|spec| spec.data_key)
    }
}

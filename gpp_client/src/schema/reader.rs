//! Per-record read/write cursors handed to [`Schema::build`] and
//! [`Schema::write`]. They apply the field table rules (required, nullable,
//! partial mode) and collect errors instead of stopping at the first one.

use serde_json::{Map, Value};

use super::{Field, FieldError, FieldSpec, LoadMode, Schema, ValidationErrors};

pub struct FieldReader<'a> {
    data: &'a Map<String, Value>,
    mode: LoadMode,
    errors: ValidationErrors,
}

impl<'a> FieldReader<'a> {
    pub(crate) fn new(data: &'a Map<String, Value>, mode: LoadMode) -> Self {
        Self {
            data,
            mode,
            errors: ValidationErrors::new(),
        }
    }

    pub fn mode(&self) -> LoadMode {
        self.mode
    }

    /// The raw value for `spec`, or `None` if it is absent or null. Records
    /// missing/null errors as the field table demands.
    fn present(&mut self, spec: &FieldSpec) -> Option<&'a Value> {
        let data = self.data;
        match data.get(spec.data_key) {
            None => {
                let enforced = spec.identity || self.mode == LoadMode::Full;
                if spec.required && enforced {
                    self.errors
                        .add(spec.data_key, FieldError::MissingRequiredField);
                }
                None
            }
            Some(Value::Null) => {
                if !spec.allow_null {
                    self.errors.add(spec.data_key, FieldError::NullNotAllowed);
                }
                None
            }
            Some(value) => Some(value),
        }
    }

    /// Read one scalar field through its validator.
    pub fn read<F: Field>(&mut self, spec: &FieldSpec, field: &F) -> Option<F::Output> {
        let value = self.present(spec)?;
        match field.deserialize(value) {
            Ok(v) => Some(v),
            Err(e) => {
                self.errors.add(spec.data_key, e);
                None
            }
        }
    }

    /// Read a nested record; its errors are folded in under the field's key.
    pub fn nested<S: Schema>(&mut self, spec: &FieldSpec, schema: &S) -> Option<S::Record> {
        let value = self.present(spec)?;
        match schema.load(value, self.mode) {
            Ok(record) => Some(record),
            Err(nested) => {
                self.errors.merge_nested(spec.data_key, nested);
                None
            }
        }
    }

    pub(crate) fn reject(&mut self, key: &str, error: FieldError) {
        self.errors.add(key, error);
    }

    pub(crate) fn finish(self) -> ValidationErrors {
        self.errors
    }
}

/// Output cursor: absent values are omitted from the produced object.
#[derive(Default)]
pub struct FieldWriter {
    out: Map<String, Value>,
    errors: ValidationErrors,
}

impl FieldWriter {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub fn write<F: Field>(&mut self, spec: &FieldSpec, field: &F, value: Option<&F::Output>) {
        let Some(value) = value else {
            return;
        };
        match field.serialize(Some(value)) {
            Ok(json) => {
                self.out.insert(spec.data_key.to_string(), json);
            }
            Err(e) => self.errors.add(spec.data_key, e),
        }
    }

    pub fn nested<S: Schema>(&mut self, spec: &FieldSpec, schema: &S, value: Option<&S::Record>) {
        let Some(value) = value else {
            return;
        };
        match schema.dump(value) {
            Ok(json) => {
                self.out.insert(spec.data_key.to_string(), json);
            }
            Err(nested) => self.errors.merge_nested(spec.data_key, nested),
        }
    }

    pub(crate) fn finish(self) -> Result<Value, ValidationErrors> {
        if self.errors.is_empty() {
            Ok(Value::Object(self.out))
        } else {
            Err(self.errors)
        }
    }
}

//! Index over a GraphQL SDL document.
//!
//! The parsed AST borrows from the source text, so it is flattened right
//! away into owned maps of object types, their fields and field arguments.
//! Only what query validation needs is kept.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use graphql_parser::schema::{self, Definition, TypeDefinition, TypeExtension};

/// Errors raised while loading a schema document.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("Failed to read schema file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse schema: {0}")]
    Parse(String),

    #[error("Schema defines no query type '{0}'")]
    MissingQueryType(String),
}

/// One argument of a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentDef {
    pub name: String,
    /// Named type with list and non-null wrappers removed.
    pub type_name: String,
    /// Non-null without a default value.
    pub required: bool,
}

/// One field of an object or interface type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDef {
    pub name: String,
    /// Named type with list and non-null wrappers removed.
    pub type_name: String,
    pub arguments: Vec<ArgumentDef>,
}

impl FieldDef {
    pub fn argument(&self, name: &str) -> Option<&ArgumentDef> {
        self.arguments.iter().find(|a| a.name == name)
    }
}

#[derive(Debug, Clone, Default)]
struct TypeDef {
    fields: Vec<FieldDef>,
}

/// A loaded GraphQL schema.
#[derive(Debug, Clone)]
pub struct SchemaDocument {
    query_type: String,
    types: HashMap<String, TypeDef>,
}

impl SchemaDocument {
    /// Read and parse an SDL file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SchemaError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| SchemaError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&content)
    }

    /// Parse SDL text.
    pub fn parse(sdl: &str) -> Result<Self, SchemaError> {
        let document = schema::parse_schema::<String>(sdl)
            .map_err(|e| SchemaError::Parse(e.to_string()))?;

        let mut query_type = None;
        let mut types: HashMap<String, TypeDef> = HashMap::new();

        for definition in document.definitions {
            match definition {
                Definition::SchemaDefinition(schema) => {
                    if schema.query.is_some() {
                        query_type = schema.query;
                    }
                }
                Definition::TypeDefinition(TypeDefinition::Object(object)) => {
                    let entry = types.entry(object.name).or_default();
                    entry.fields.extend(object.fields.iter().map(field_def));
                }
                Definition::TypeDefinition(TypeDefinition::Interface(interface)) => {
                    let entry = types.entry(interface.name).or_default();
                    entry.fields.extend(interface.fields.iter().map(field_def));
                }
                Definition::TypeExtension(TypeExtension::Object(extension)) => {
                    let entry = types.entry(extension.name).or_default();
                    entry.fields.extend(extension.fields.iter().map(field_def));
                }
                _ => {}
            }
        }

        let query_type = query_type.unwrap_or_else(|| "Query".to_string());
        if !types.contains_key(&query_type) {
            return Err(SchemaError::MissingQueryType(query_type));
        }

        Ok(Self { query_type, types })
    }

    /// Name of the query root type.
    pub fn query_type(&self) -> &str {
        &self.query_type
    }

    /// Whether `name` is an object or interface type, i.e. needs a
    /// sub-selection.
    pub fn is_composite(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Field `field` of type `type_name`.
    pub fn field(&self, type_name: &str, field: &str) -> Option<&FieldDef> {
        self.types
            .get(type_name)?
            .fields
            .iter()
            .find(|f| f.name == field)
    }

    /// Field of the query root type.
    pub fn query_field(&self, field: &str) -> Option<&FieldDef> {
        self.field(&self.query_type, field)
    }
}

fn field_def(field: &schema::Field<'_, String>) -> FieldDef {
    FieldDef {
        name: field.name.clone(),
        type_name: named_type(&field.field_type).to_string(),
        arguments: field
            .arguments
            .iter()
            .map(|arg| ArgumentDef {
                name: arg.name.clone(),
                type_name: named_type(&arg.value_type).to_string(),
                required: matches!(arg.value_type, schema::Type::NonNullType(_))
                    && arg.default_value.is_none(),
            })
            .collect(),
    }
}

fn named_type<'t>(ty: &'t schema::Type<'_, String>) -> &'t str {
    match ty {
        schema::Type::NamedType(name) => name.as_str(),
        schema::Type::ListType(inner) | schema::Type::NonNullType(inner) => named_type(inner),
    }
}

//! Query construction checked against a [`SchemaDocument`].

use std::fmt::Write as _;

use serde::Serialize;
use serde_json::{Map, Value};

use super::document::SchemaDocument;

/// A query that does not fit the schema.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    #[error("Type '{type_name}' has no field '{field}'")]
    UnknownField { type_name: String, field: String },

    #[error("Field '{field}' has no argument '{argument}'")]
    UnknownArgument { field: String, argument: String },

    #[error("Field '{field}' requires argument '{argument}'")]
    MissingArgument { field: String, argument: String },

    #[error("Field '{field}' of type '{type_name}' needs a selection of subfields")]
    MissingSelection { field: String, type_name: String },

    #[error("Field '{field}' of scalar type '{type_name}' cannot have subfields")]
    ScalarSelection { field: String, type_name: String },

    #[error("Query selects no fields")]
    Empty,
}

/// One field in a selection set, with inline arguments and subfields.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Selection {
    name: String,
    arguments: Vec<(String, Value)>,
    children: Vec<Selection>,
}

impl Selection {
    pub fn field(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn arg(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.arguments.push((name.into(), value.into()));
        self
    }

    pub fn select(mut self, child: Selection) -> Self {
        self.children.push(child);
        self
    }

    /// Add scalar subfields by name.
    pub fn fields<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.children.extend(names.into_iter().map(Selection::field));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Body of a GraphQL POST request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphQlRequest {
    pub query: String,
    pub variables: Map<String, Value>,
}

impl GraphQlRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            variables: Map::new(),
        }
    }
}

/// Builds a `query { ... }` document, validating every field and argument.
///
/// ```
/// use gpp_client::graphql::{QueryBuilder, SchemaDocument, Selection};
///
/// let schema = SchemaDocument::parse(
///     "type Query { observation(observationId: ID!): Observation }
///      type Observation { id: ID! title: String }",
/// ).unwrap();
/// let request = QueryBuilder::new(&schema)
///     .field(
///         Selection::field("observation")
///             .arg("observationId", "o-1")
///             .fields(["id", "title"]),
///     )
///     .build()
///     .unwrap();
/// assert_eq!(
///     request.query,
///     r#"query { observation(observationId: "o-1") { id title } }"#
/// );
/// ```
pub struct QueryBuilder<'s> {
    schema: &'s SchemaDocument,
    operation_name: Option<String>,
    selections: Vec<Selection>,
}

impl<'s> QueryBuilder<'s> {
    pub fn new(schema: &'s SchemaDocument) -> Self {
        Self {
            schema,
            operation_name: None,
            selections: Vec::new(),
        }
    }

    pub fn named(mut self, operation_name: impl Into<String>) -> Self {
        self.operation_name = Some(operation_name.into());
        self
    }

    /// Add a root field of the query type.
    pub fn field(mut self, selection: Selection) -> Self {
        self.selections.push(selection);
        self
    }

    pub fn build(self) -> Result<GraphQlRequest, QueryError> {
        if self.selections.is_empty() {
            return Err(QueryError::Empty);
        }
        let root = self.schema.query_type();
        for selection in &self.selections {
            self.check(root, selection)?;
        }

        let mut query = String::from("query");
        if let Some(name) = &self.operation_name {
            query.push(' ');
            query.push_str(name);
        }
        render_set(&mut query, &self.selections);
        Ok(GraphQlRequest::new(query))
    }

    fn check(&self, parent: &str, selection: &Selection) -> Result<(), QueryError> {
        let field = self
            .schema
            .field(parent, &selection.name)
            .ok_or_else(|| QueryError::UnknownField {
                type_name: parent.to_string(),
                field: selection.name.clone(),
            })?;

        for (argument, _) in &selection.arguments {
            if field.argument(argument).is_none() {
                return Err(QueryError::UnknownArgument {
                    field: field.name.clone(),
                    argument: argument.clone(),
                });
            }
        }
        if let Some(missing) = field
            .arguments
            .iter()
            .find(|a| a.required && !selection.arguments.iter().any(|(n, _)| *n == a.name))
        {
            return Err(QueryError::MissingArgument {
                field: field.name.clone(),
                argument: missing.name.clone(),
            });
        }

        let composite = self.schema.is_composite(&field.type_name);
        match (composite, selection.children.is_empty()) {
            (true, true) => Err(QueryError::MissingSelection {
                field: field.name.clone(),
                type_name: field.type_name.clone(),
            }),
            (false, false) => Err(QueryError::ScalarSelection {
                field: field.name.clone(),
                type_name: field.type_name.clone(),
            }),
            _ => selection
                .children
                .iter()
                .try_for_each(|child| self.check(&field.type_name, child)),
        }
    }
}

fn render_set(out: &mut String, selections: &[Selection]) {
    out.push_str(" {");
    for selection in selections {
        out.push(' ');
        out.push_str(&selection.name);
        if !selection.arguments.is_empty() {
            out.push('(');
            for (i, (name, value)) in selection.arguments.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                out.push_str(name);
                out.push_str(": ");
                render_value(out, value);
            }
            out.push(')');
        }
        if !selection.children.is_empty() {
            render_set(out, &selection.children);
        }
    }
    out.push_str(" }");
}

/// GraphQL input literal. String escaping follows JSON, which GraphQL
/// string literals accept.
fn render_value(out: &mut String, value: &Value) {
    match value {
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                render_value(out, item);
            }
            out.push(']');
        }
        Value::Object(fields) => {
            out.push('{');
            for (i, (key, item)) in fields.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                out.push_str(key);
                out.push_str(": ");
                render_value(out, item);
            }
            out.push('}');
        }
        scalar => {
            let _ = write!(out, "{scalar}");
        }
    }
}

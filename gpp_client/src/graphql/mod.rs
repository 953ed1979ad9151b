//! GraphQL plumbing: schema document, query builder and transport.

pub mod document;
pub mod query;
pub mod transport;

pub use document::{ArgumentDef, FieldDef, SchemaDocument, SchemaError};
pub use query::{GraphQlRequest, QueryBuilder, QueryError, Selection};
pub use transport::{
    decode_envelope, HttpTransport, Session, Transport, TransportError, REQUEST_TIMEOUT,
};

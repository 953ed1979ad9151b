//! Typed client for the Gemini Program Platform (GPP) observation API.
//!
//! - [`angle`]: angle values, unit conversion and the sexagesimal
//!   [`AngleField`](angle::AngleField).
//! - [`models`]: GPP enumerations and plain records.
//! - [`schema`]: validation and mapping of JSON payloads into records, with a
//!   partial mode for responses that only carry selected fields.
//! - [`graphql`]: schema document, checked query builder and transport.
//! - [`client`]: [`GppClient`], which ties the pieces together.

pub mod angle;
pub mod client;
pub mod config;
pub mod error;
pub mod graphql;
pub mod models;
pub mod schema;

pub use angle::{Angle, AngleField, AngleUnit};
pub use client::GppClient;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use models::{Observation, PosAngleConstraint};
pub use schema::{LoadMode, Schema, ValidationErrors};

//! Remote GPP client.

use serde_json::Value;
use tracing::{debug, info};

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::graphql::{
    GraphQlRequest, HttpTransport, QueryBuilder, SchemaDocument, Selection, Transport,
};
use crate::models::Observation;
use crate::schema::{LoadMode, ObservationSchema, Schema};

/// Observation fields requested by [`GppClient::get_observation`].
pub const OBSERVATION_FIELDS: [&str; 5] = ["id", "subtitle", "title", "scienceBand", "existence"];

/// Synchronous client for the GPP GraphQL API.
pub struct GppClient<T: Transport = HttpTransport> {
    transport: T,
    schema: SchemaDocument,
}

impl GppClient<HttpTransport> {
    /// Read the schema document and set up the HTTP transport.
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        config.validate()?;
        let schema = SchemaDocument::from_file(&config.schema_path)?;
        let transport = HttpTransport::new(config.api_url.trim(), config.api_key.trim())?;
        info!(
            url = %transport.url(),
            schema = %config.schema_path.display(),
            "GPP client initialised"
        );
        Ok(Self::with_transport(transport, schema))
    }
}

impl<T: Transport> GppClient<T> {
    pub fn with_transport(transport: T, schema: SchemaDocument) -> Self {
        Self { transport, schema }
    }

    pub fn schema(&self) -> &SchemaDocument {
        &self.schema
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// The query sent by [`get_observation`](Self::get_observation).
    pub fn observation_query(&self, observation_id: &str) -> ClientResult<GraphQlRequest> {
        let selection = Selection::field("observation")
            .arg("observationId", observation_id)
            .fields(OBSERVATION_FIELDS)
            .select(Selection::field("posAngleConstraint").fields(["mode"]));
        Ok(QueryBuilder::new(&self.schema).field(selection).build()?)
    }

    /// Fetch one observation by id.
    ///
    /// The response only carries the selected fields, so it is loaded in
    /// [`LoadMode::Partial`]. A missing or `null` observation is
    /// [`ClientError::NotFound`].
    pub fn get_observation(&self, observation_id: &str) -> ClientResult<Observation> {
        let request = self.observation_query(observation_id)?;
        info!(observation_id, "Fetching observation");

        let data = {
            let mut session = self.transport.connect()?;
            session.execute(&request)?
        };

        let payload = match data.get("observation") {
            Some(Value::Null) | None => {
                debug!(observation_id, "Observation missing from response");
                return Err(ClientError::NotFound(observation_id.to_string()));
            }
            Some(payload) => payload,
        };

        let observation = ObservationSchema.load(payload, LoadMode::Partial)?;
        info!(observation_id, "Fetched observation");
        Ok(observation)
    }
}

//! Transport and session abstraction over the GraphQL endpoint.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use super::query::GraphQlRequest;

/// Request timeout for every call to the GraphQL endpoint.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Failures between sending a request and getting its `data` object back.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("GraphQL errors: {}", .0.join("; "))]
    GraphQl(Vec<String>),

    #[error("Invalid API key: {0}")]
    InvalidCredentials(String),
}

impl TransportError {
    pub fn code(&self) -> &'static str {
        "transport_error"
    }
}

/// Opens sessions against a GraphQL endpoint.
pub trait Transport {
    fn connect(&self) -> Result<Box<dyn Session + '_>, TransportError>;
}

/// An open connection. Closed when dropped.
pub trait Session {
    /// Execute `request` and return the response's `data` object.
    fn execute(&mut self, request: &GraphQlRequest) -> Result<Value, TransportError>;
}

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Option<Vec<GraphQlErrorItem>>,
}

#[derive(Debug, Deserialize)]
struct GraphQlErrorItem {
    message: String,
}

/// Decode a GraphQL response envelope into its `data` object.
///
/// A non-empty `errors` array wins over any partial `data`.
pub fn decode_envelope(body: &str) -> Result<Value, TransportError> {
    let envelope: Envelope =
        serde_json::from_str(body).map_err(|e| TransportError::Decode(e.to_string()))?;

    if let Some(errors) = envelope.errors.filter(|e| !e.is_empty()) {
        let messages: Vec<String> = errors.into_iter().map(|e| e.message).collect();
        warn!(count = messages.len(), "GraphQL response carried errors");
        return Err(TransportError::GraphQl(messages));
    }

    envelope
        .data
        .ok_or_else(|| TransportError::Decode("response has no data".to_string()))
}

/// Bearer-authenticated HTTP transport using a blocking `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    url: String,
}

impl HttpTransport {
    pub fn new(url: impl Into<String>, api_key: &str) -> Result<Self, TransportError> {
        let mut bearer = HeaderValue::from_str(&format!("Bearer {api_key}"))
            .map_err(|e| TransportError::InvalidCredentials(e.to_string()))?;
        bearer.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, bearer);

        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Transport for HttpTransport {
    fn connect(&self) -> Result<Box<dyn Session + '_>, TransportError> {
        debug!(url = %self.url, "Opening GraphQL session");
        Ok(Box::new(HttpSession { transport: self }))
    }
}

struct HttpSession<'t> {
    transport: &'t HttpTransport,
}

impl Session for HttpSession<'_> {
    fn execute(&mut self, request: &GraphQlRequest) -> Result<Value, TransportError> {
        debug!(query = %request.query, "Executing GraphQL query");
        let response = self
            .transport
            .client
            .post(&self.transport.url)
            .json(request)
            .send()?;

        let status = response.status();
        let body = response.text()?;

        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                body: body.trim().to_string(),
            });
        }

        decode_envelope(&body)
    }
}

impl Drop for HttpSession<'_> {
    fn drop(&mut self) {
        debug!(url = %self.transport.url, "Closed GraphQL session");
    }
}

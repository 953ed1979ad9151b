#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::path::PathBuf;
use std::sync::Mutex;

use gpp_client::config::{ENV_API_KEY, ENV_API_URL, ENV_SCHEMA_PATH};
use gpp_client::graphql::{
    decode_envelope, GraphQlRequest, SchemaDocument, Session, Transport, TransportError,
};
use serde_json::Value;

static ENV_LOCK: Mutex<()> = Mutex::new(());

const GPP_VARS: [&str; 3] = [ENV_API_URL, ENV_API_KEY, ENV_SCHEMA_PATH];

/// Runs `f` with the three `GPP_*` configuration variables set to `url`,
/// `key` and `schema` (`None` unsets the variable). Previous values come
/// back when `f` returns or panics.
pub fn with_gpp_env<F, R>(url: Option<&str>, key: Option<&str>, schema: Option<&str>, f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let _restore = SavedGppEnv::capture();
    for (name, value) in GPP_VARS.into_iter().zip([url, key, schema]) {
        match value {
            Some(value) => std::env::set_var(name, value),
            None => std::env::remove_var(name),
        }
    }
    f()
}

struct SavedGppEnv([Option<String>; 3]);

impl SavedGppEnv {
    fn capture() -> Self {
        Self(GPP_VARS.map(|name| std::env::var(name).ok()))
    }
}

impl Drop for SavedGppEnv {
    fn drop(&mut self) {
        for (name, saved) in GPP_VARS.into_iter().zip(self.0.iter_mut()) {
            match saved.take() {
                Some(value) => std::env::set_var(name, value),
                None => std::env::remove_var(name),
            }
        }
    }
}

pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

pub fn fixture_json(name: &str) -> Value {
    let text = std::fs::read_to_string(fixture_path(name)).expect("fixture readable");
    serde_json::from_str(&text).expect("fixture is JSON")
}

pub fn fixture_schema() -> SchemaDocument {
    SchemaDocument::from_file(fixture_path("schema.graphql")).expect("fixture schema parses")
}

type Responder = Box<dyn Fn(&GraphQlRequest) -> Result<Value, TransportError>>;

/// In-memory transport that records every request and counts sessions.
pub struct RecordingTransport {
    respond: Responder,
    requests: RefCell<Vec<GraphQlRequest>>,
    opened: Cell<usize>,
    closed: Cell<usize>,
    refuse_connect: bool,
}

impl RecordingTransport {
    pub fn new<F>(respond: F) -> Self
    where
        F: Fn(&GraphQlRequest) -> Result<Value, TransportError> + 'static,
    {
        Self {
            respond: Box::new(respond),
            requests: RefCell::new(Vec::new()),
            opened: Cell::new(0),
            closed: Cell::new(0),
            refuse_connect: false,
        }
    }

    /// Answers every request with the given raw response envelope.
    pub fn with_body(body: &str) -> Self {
        let body = body.to_string();
        Self::new(move |_| decode_envelope(&body))
    }

    /// Answers every request with `data` as the response data object.
    pub fn with_data(data: Value) -> Self {
        Self::new(move |_| Ok(data.clone()))
    }

    /// A transport whose `connect` always fails.
    pub fn unreachable() -> Self {
        let mut transport = Self::new(|_| Ok(Value::Null));
        transport.refuse_connect = true;
        transport
    }

    pub fn requests(&self) -> Vec<GraphQlRequest> {
        self.requests.borrow().clone()
    }

    pub fn opened(&self) -> usize {
        self.opened.get()
    }

    pub fn closed(&self) -> usize {
        self.closed.get()
    }
}

impl Transport for RecordingTransport {
    fn connect(&self) -> Result<Box<dyn Session + '_>, TransportError> {
        if self.refuse_connect {
            return Err(TransportError::Status {
                status: 503,
                body: "unavailable".to_string(),
            });
        }
        self.opened.set(self.opened.get() + 1);
        Ok(Box::new(RecordingSession { transport: self }))
    }
}

struct RecordingSession<'t> {
    transport: &'t RecordingTransport,
}

impl Session for RecordingSession<'_> {
    fn execute(&mut self, request: &GraphQlRequest) -> Result<Value, TransportError> {
        self.transport.requests.borrow_mut().push(request.clone());
        (self.transport.respond)(request)
    }
}

impl Drop for RecordingSession<'_> {
    fn drop(&mut self) {
        self.transport.closed.set(self.transport.closed.get() + 1);
    }
}

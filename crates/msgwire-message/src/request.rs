use serde::{Deserialize, Deserializer, Serialize};

use crate::parameters::Parameters;

/// Compile-time list of the wire names an entity serializes under.
///
/// Every format encodes an entity as a map keyed by these names, so a
/// message encoded in one format carries the same fields in another.
pub trait WireFields {
    const FIELDS: &'static [&'static str];
}

/// Reads a nil field as its default value.
///
/// Peers that never initialized a map or list send it as nil rather than
/// leaving the key out.
pub(crate) fn nil_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// One forwarding step recorded by the transport when a message passes
/// through an intermediate service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hop {
    pub service: String,
    pub server: String,
    pub request_time: u64,
    #[serde(default)]
    pub reply_time: u64,
}

/// A command sent to a request-handling peer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Request {
    #[serde(rename = "command")]
    pub command: String,
    #[serde(rename = "parameters", default, deserialize_with = "nil_as_default")]
    pub parameters: Parameters,
    #[serde(
        rename = "trace",
        default,
        deserialize_with = "nil_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    trace: Vec<Hop>,
    #[serde(skip)]
    conn_id: Option<String>,
}

impl WireFields for Request {
    const FIELDS: &'static [&'static str] = &["command", "parameters", "trace"];
}

impl Request {
    /// Create a request for `command` with no parameters.
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            ..Self::default()
        }
    }

    /// Builder-style parameter insert.
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.parameters.insert(key, value);
        self
    }

    pub fn with_parameters(mut self, parameters: Parameters) -> Self {
        self.parameters = parameters;
        self
    }

    /// Builder-style connection id. An empty id clears it.
    pub fn with_conn_id(mut self, conn_id: impl Into<String>) -> Self {
        self.set_conn_id(conn_id);
        self
    }

    /// Identifier of the hop this request arrived from, if any.
    pub fn conn_id(&self) -> Option<&str> {
        self.conn_id.as_deref()
    }

    pub fn set_conn_id(&mut self, conn_id: impl Into<String>) {
        let conn_id = conn_id.into();
        self.conn_id = (!conn_id.is_empty()).then_some(conn_id);
    }

    pub fn clear_conn_id(&mut self) {
        self.conn_id = None;
    }

    /// True when the request has not been forwarded by any service.
    pub fn is_first_hop(&self) -> bool {
        self.trace.is_empty()
    }

    pub fn trace(&self) -> &[Hop] {
        &self.trace
    }

    /// Record a forwarding step. Called by the transport, not by handlers.
    pub fn push_hop(&mut self, hop: Hop) {
        self.trace.push(hop);
    }
}

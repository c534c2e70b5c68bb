use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::parameters::Parameters;
use crate::request::{nil_as_default, Hop, WireFields};

/// Wire value of a successful reply.
pub const STATUS_OK: &str = "OK";

/// Wire value of a failed reply.
pub const STATUS_FAIL: &str = "fail";

/// Outcome of a request.
///
/// Unknown wire values decode into [`Status::Other`] so a received reply can
/// be inspected; such a reply is rejected when it is encoded again.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Ok,
    Fail,
    Other(String),
}

impl Status {
    pub fn as_str(&self) -> &str {
        match self {
            Status::Ok => STATUS_OK,
            Status::Fail => STATUS_FAIL,
            Status::Other(raw) => raw,
        }
    }
}

impl From<&str> for Status {
    fn from(raw: &str) -> Self {
        match raw {
            STATUS_OK => Status::Ok,
            STATUS_FAIL => Status::Fail,
            other => Status::Other(other.to_string()),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Status {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Status {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Status::from(raw.as_str()))
    }
}

/// The result of a request, sent back to the requester.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Reply {
    #[serde(rename = "status")]
    pub status: Status,
    #[serde(rename = "message", default)]
    pub message: String,
    #[serde(rename = "parameters", default, deserialize_with = "nil_as_default")]
    pub parameters: Parameters,
    #[serde(
        rename = "trace",
        default,
        deserialize_with = "nil_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub(crate) trace: Vec<Hop>,
    #[serde(skip)]
    pub(crate) conn_id: Option<String>,
}

impl WireFields for Reply {
    const FIELDS: &'static [&'static str] = &["status", "message", "parameters", "trace"];
}

impl Reply {
    /// Successful reply carrying `parameters`.
    pub fn ok(parameters: Parameters) -> Self {
        Self {
            status: Status::Ok,
            parameters,
            ..Self::default()
        }
    }

    /// Failed reply with a human-readable reason.
    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            status: Status::Fail,
            message: message.into(),
            ..Self::default()
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == Status::Ok
    }

    /// Builder-style connection id. An empty id clears it.
    pub fn with_conn_id(mut self, conn_id: impl Into<String>) -> Self {
        self.set_conn_id(conn_id);
        self
    }

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

    pub fn is_first_hop(&self) -> bool {
        self.trace.is_empty()
    }

    pub fn trace(&self) -> &[Hop] {
        &self.trace
    }

    pub fn push_hop(&mut self, hop: Hop) {
        self.trace.push(hop);
    }
}

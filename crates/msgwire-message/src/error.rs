/// Boxed source error produced by a wire format implementation.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur while validating, encoding, decoding or framing messages.
#[derive(Debug, thiserror::Error)]
pub enum MessageError {
    /// The payload could not be parsed into the expected entity.
    #[error("{format}::{op}: decode failed: {source}")]
    Decode {
        format: &'static str,
        op: &'static str,
        #[source]
        source: BoxError,
    },

    /// The serializer rejected a value of the entity.
    #[error("{format}::{op}: encode failed: {source}")]
    Encode {
        format: &'static str,
        op: &'static str,
        #[source]
        source: BoxError,
    },

    /// The request command is not a valid command name.
    #[error("{op}: invalid command {command:?}: {reason}")]
    InvalidCommand {
        op: &'static str,
        command: String,
        reason: &'static str,
    },

    /// The reply status is neither `OK` nor `fail`.
    #[error("{op}: invalid reply status {status:?}")]
    InvalidStatus { op: &'static str, status: String },

    /// A failed reply carries no message.
    #[error("{op}: failed reply must have a message")]
    InconsistentFailure { op: &'static str },

    /// The envelope has fewer frames than the synchronous form requires.
    #[error("envelope too short ({frames} frames, need at least 2)")]
    EmptyEnvelope { frames: usize },

    /// The envelope frames could not be split into routing and payload.
    #[error("malformed envelope: {0}")]
    MalformedEnvelope(String),

    /// The reassembled payload exceeds the configured maximum size.
    #[error("payload too large ({size} bytes, max {max})")]
    PayloadTooLarge { size: usize, max: usize },

    /// The requested parameter is not present.
    #[error("parameter {0:?} not found")]
    MissingParameter(String),

    /// The parameter exists but holds a value of another type.
    #[error("parameter {key:?} is {found}, expected {expected}")]
    ParameterType {
        key: String,
        expected: &'static str,
        found: &'static str,
    },

    /// No format is registered under the given name.
    #[error("unknown message format {0:?}")]
    UnknownFormat(String),

    /// A format with the same name is already registered.
    #[error("message format {0:?} already registered")]
    DuplicateFormat(String),
}

impl MessageError {
    /// Returns true for errors raised by the outbound validation gate.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            MessageError::InvalidCommand { .. }
                | MessageError::InvalidStatus { .. }
                | MessageError::InconsistentFailure { .. }
        )
    }

    pub(crate) fn decode(
        format: &'static str,
        op: &'static str,
        source: impl Into<BoxError>,
    ) -> Self {
        MessageError::Decode {
            format,
            op,
            source: source.into(),
        }
    }

    pub(crate) fn encode(
        format: &'static str,
        op: &'static str,
        source: impl Into<BoxError>,
    ) -> Self {
        MessageError::Encode {
            format,
            op,
            source: source.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, MessageError>;

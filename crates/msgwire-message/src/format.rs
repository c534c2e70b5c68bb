//! Structured codec: the seam between entities and a concrete wire format.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{BoxError, MessageError, Result};
use crate::reply::Reply;
use crate::request::Request;
use crate::validate::{validate_reply, validate_request};

/// A self-describing serialization scheme.
///
/// Implementations must encode structs as maps keyed by field name, so the
/// same entity definitions work for every format.
pub trait Format: fmt::Debug + Send + Sync + 'static {
    /// Name the format is registered under.
    const NAME: &'static str;

    fn to_bytes<T: Serialize>(value: &T) -> std::result::Result<Vec<u8>, BoxError>;

    fn from_bytes<T: DeserializeOwned>(bytes: &[u8]) -> std::result::Result<T, BoxError>;
}

/// Validate and encode a request.
pub fn encode_request<F: Format>(request: &Request) -> Result<Vec<u8>> {
    validate_request(request)?;
    F::to_bytes(request).map_err(|err| MessageError::encode(F::NAME, "encode_request", err))
}

/// Validate and encode a reply.
pub fn encode_reply<F: Format>(reply: &Reply) -> Result<Vec<u8>> {
    validate_reply(reply)?;
    F::to_bytes(reply).map_err(|err| MessageError::encode(F::NAME, "encode_reply", err))
}

/// Decode a request without validating it.
pub fn decode_request<F: Format>(bytes: &[u8]) -> Result<Request> {
    decode_as::<F, Request>("decode_request", bytes)
}

/// Decode a reply without validating it.
pub fn decode_reply<F: Format>(bytes: &[u8]) -> Result<Reply> {
    decode_as::<F, Reply>("decode_reply", bytes)
}

pub(crate) fn decode_as<F: Format, T: DeserializeOwned>(op: &'static str, bytes: &[u8]) -> Result<T> {
    F::from_bytes(bytes).map_err(|err| MessageError::decode(F::NAME, op, err))
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// JSON-backed format used by this crate's own tests.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    pub struct TestJson;

    impl Format for TestJson {
        const NAME: &'static str = "test-json";

        fn to_bytes<T: Serialize>(value: &T) -> std::result::Result<Vec<u8>, BoxError> {
            Ok(serde_json::to_vec(value)?)
        }

        fn from_bytes<T: DeserializeOwned>(bytes: &[u8]) -> std::result::Result<T, BoxError> {
            Ok(serde_json::from_slice(bytes)?)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::TestJson;
    use super::*;
    use crate::parameters::Parameters;
    use crate::reply::Status;

    #[test]
    fn request_roundtrip() {
        let req = Request::new("command").with_param("number", 123u64);
        let bytes = encode_request::<TestJson>(&req).unwrap();
        assert_eq!(decode_request::<TestJson>(&bytes).unwrap(), req);
    }

    #[test]
    fn reply_roundtrip() {
        let reply = Reply::ok(Parameters::new().with("number", 123u64));
        let bytes = encode_reply::<TestJson>(&reply).unwrap();
        assert_eq!(decode_reply::<TestJson>(&bytes).unwrap(), reply);
    }

    #[test]
    fn validation_runs_before_encoding() {
        let err = encode_request::<TestJson>(&Request::new("")).unwrap_err();
        assert!(matches!(err, MessageError::InvalidCommand { .. }));

        let err = encode_reply::<TestJson>(&Reply::fail("")).unwrap_err();
        assert!(matches!(err, MessageError::InconsistentFailure { .. }));
    }

    #[test]
    fn decoding_does_not_validate() {
        let raw = br#"{"status":"pending","message":"","parameters":{}}"#;
        let reply = decode_reply::<TestJson>(raw).unwrap();
        assert_eq!(reply.status, Status::Other("pending".to_string()));

        let raw = br#"{"command":"","parameters":{}}"#;
        assert_eq!(decode_request::<TestJson>(raw).unwrap().command, "");
    }

    #[test]
    fn decode_failure_names_format_and_operation() {
        let err = decode_request::<TestJson>(b"").unwrap_err();
        assert!(matches!(
            err,
            MessageError::Decode { format: "test-json", op: "decode_request", .. }
        ));
    }
}

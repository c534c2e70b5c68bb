//! JSON wire format for msgwire requests and replies.
//!
//! Uses the same field names as the MessagePack format, so an entity reads
//! the same in both encodings.

use msgwire_message::{BoxError, Bytes, Format, Framed, Operations, ReplyMessage, RequestMessage};
use serde::de::DeserializeOwned;
use serde::Serialize;

pub const NAME: &str = "json";

/// Compact JSON codec.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Json;

impl Format for Json {
    const NAME: &'static str = NAME;

    fn to_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>, BoxError> {
        Ok(serde_json::to_vec(value)?)
    }

    fn from_bytes<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, BoxError> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

pub type Request = Framed<Json, msgwire_message::Request>;
pub type Reply = Framed<Json, msgwire_message::Reply>;

/// Format descriptor for runtime selection.
pub fn message() -> Operations {
    Operations::of::<Json>()
}

/// Decode a request from its envelope frames.
pub fn new_request(frames: &[Bytes]) -> msgwire_message::Result<Box<dyn RequestMessage>> {
    message().new_request(frames)
}

/// Decode a reply from its envelope frames.
pub fn new_reply(frames: &[Bytes]) -> msgwire_message::Result<Box<dyn ReplyMessage>> {
    message().new_reply(frames)
}

pub fn new_empty_request() -> Box<dyn RequestMessage> {
    message().empty_request()
}

pub fn new_empty_reply() -> Box<dyn ReplyMessage> {
    message().empty_reply()
}

#[cfg(test)]
mod tests {
    use msgwire_message::{
        decode_reply, decode_request, encode_reply, encode_request, MessageError, Parameters,
        WireFields,
    };

    use super::*;

    #[test]
    fn request_uses_wire_field_names() {
        let req = msgwire_message::Request::new("command").with_param("number", 123u64);
        let encoded = encode_request::<Json>(&req).unwrap();
        assert_eq!(
            std::str::from_utf8(&encoded).unwrap(),
            r#"{"command":"command","parameters":{"number":123}}"#
        );
    }

    #[test]
    fn reply_uses_wire_field_names() {
        let reply = msgwire_message::Reply::fail("boom");
        let encoded = encode_reply::<Json>(&reply).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&encoded).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object["status"], "fail");
        assert_eq!(object["message"], "boom");
        for key in object.keys() {
            assert!(msgwire_message::Reply::FIELDS.contains(&key.as_str()), "{key}");
        }
    }

    #[test]
    fn envelope_roundtrip() {
        let reply = Reply::new(
            msgwire_message::Reply::ok(Parameters::new().with("number", 123u64))
                .with_conn_id("req_id"),
        );
        let frames = reply.to_frames().unwrap();
        assert_eq!(frames.len(), 3);

        let back = new_reply(&frames).unwrap();
        assert_eq!(back.reply(), &*reply);
        assert_eq!(back.format_name(), "json");
    }

    #[test]
    fn null_parameters_decode_as_empty() {
        let req = decode_request::<Json>(br#"{"command":"command","parameters":null}"#).unwrap();
        assert!(req.parameters.is_empty());

        let raw = br#"{"status":"OK","message":"","parameters":null,"trace":null}"#;
        let reply = decode_reply::<Json>(raw).unwrap();
        assert!(reply.parameters.is_empty());
        assert!(reply.is_first_hop());
    }

    #[test]
    fn malformed_json_is_a_decode_error() {
        let err = decode_reply::<Json>(b"{\"status\":").unwrap_err();
        assert!(matches!(err, MessageError::Decode { format: "json", .. }));

        let frames = vec![Bytes::new(), Bytes::from_static(b"[1,2]")];
        let err = new_request(&frames).unwrap_err();
        assert!(matches!(
            err,
            MessageError::Decode { op: "request_from_frames", .. }
        ));
    }
}

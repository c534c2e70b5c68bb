//! MessagePack wire format for msgwire requests and replies.
//!
//! **Structs are always encoded as maps** (`rmp_serde::to_vec_named`), keyed
//! by the same field names the JSON format uses. Positional (array) encoding
//! would make the payload unreadable to peers that look fields up by name.
//!
//! # Example
//!
//! ```
//! use msgwire_message::{Parameters, ReplyMessage};
//! use msgwire_msgpack::{new_reply, Reply};
//!
//! let reply = Reply::new(msgwire_message::Reply::ok(Parameters::new().with("number", 123u64)));
//! let frames = reply.to_frames().unwrap();
//! assert_eq!(frames.len(), 2);
//!
//! let back = new_reply(&frames).unwrap();
//! assert_eq!(back.reply().parameters.uint64_value("number").unwrap(), 123);
//! ```

use msgwire_message::{BoxError, Bytes, Format, Framed, Operations, ReplyMessage, RequestMessage};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Name of this format in a [`msgwire_message::FormatRegistry`].
pub const NAME: &str = "msgpack";

/// MessagePack codec.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MsgPack;

impl Format for MsgPack {
    const NAME: &'static str = NAME;

    #[inline]
    fn to_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>, BoxError> {
        // to_vec_named, not to_vec: struct-as-map.
        Ok(rmp_serde::to_vec_named(value)?)
    }

    #[inline]
    fn from_bytes<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, BoxError> {
        Ok(rmp_serde::from_slice(bytes)?)
    }
}

/// A request encoded as MessagePack.
pub type Request = Framed<MsgPack, msgwire_message::Request>;

/// A reply encoded as MessagePack.
pub type Reply = Framed<MsgPack, msgwire_message::Reply>;

/// Format descriptor for runtime selection.
pub fn message() -> Operations {
    Operations::of::<MsgPack>()
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

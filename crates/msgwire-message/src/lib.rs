//! Request/reply entities and their multi-frame transport envelopes.
//!
//! Outbound, a message passes the validation gate, is encoded by a wire
//! [`Format`] and wrapped into frames:
//! - `["", payload]` for direct synchronous peers
//! - `[conn_id, "", payload]` for router-addressed peers
//!
//! Inbound, frames are split by an [`EnvelopeSplitter`] and the payload is
//! decoded without validation.
//!
//! Concrete formats live in their own crates and publish an [`Operations`]
//! descriptor; a [`FormatRegistry`] selects one by name at runtime.

pub mod envelope;
pub mod error;
pub mod format;
pub mod framed;
pub mod operations;
pub mod parameters;
pub mod reply;
pub mod request;
pub mod validate;

pub use bytes::Bytes;
pub use envelope::{
    reply_from_frames, reply_from_frames_with, reply_to_frames, request_from_frames,
    request_from_frames_with, request_to_frames, DelimiterSplitter, EnvelopeSplitter, Frames,
    Split, SplitConfig, DEFAULT_MAX_PAYLOAD, DEFAULT_MAX_ROUTING_FRAMES, MIN_FRAMES,
};
pub use error::{BoxError, MessageError, Result};
pub use format::{decode_reply, decode_request, encode_reply, encode_request, Format};
pub use framed::{Framed, ReplyMessage, RequestMessage};
pub use operations::{FormatRegistry, Operations};
pub use parameters::Parameters;
pub use reply::{Reply, Status, STATUS_FAIL, STATUS_OK};
pub use request::{Hop, Request, WireFields};
pub use validate::{valid_command, valid_fail, valid_status, validate_reply, validate_request};

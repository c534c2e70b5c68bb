//! Translation between entities and multi-frame transport envelopes.
//!
//! Envelope layout:
//! ```text
//! synchronous:   [ "" , payload ]
//! addressable:   [ conn_id , "" , payload ]
//! ```
//! The empty frame is the delimiter between the routing chain and the
//! payload. Inbound payloads may span several frames after the delimiter;
//! they are concatenated before decoding.

use bytes::{Bytes, BytesMut};
use tracing::{debug, trace};

use crate::error::{MessageError, Result};
use crate::format::{decode_as, encode_reply, encode_request, Format};
use crate::reply::Reply;
use crate::request::Request;

/// Ordered frames of one envelope.
pub type Frames = Vec<Bytes>;

/// Minimum frame count of any envelope (delimiter + payload).
pub const MIN_FRAMES: usize = 2;

/// Default maximum reassembled payload size: 16 MiB.
pub const DEFAULT_MAX_PAYLOAD: usize = 16 * 1024 * 1024;

/// Default maximum length of the routing chain before the delimiter.
pub const DEFAULT_MAX_ROUTING_FRAMES: usize = 16;

/// An envelope split into its routing chain and payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Split {
    /// Routing-identifier frames before the delimiter, nearest hop first.
    pub routing: Vec<Bytes>,
    /// Payload frames after the delimiter, concatenated.
    pub payload: Bytes,
}

impl Split {
    /// Connection id of the nearest hop, if the envelope carried one.
    pub fn conn_id(&self) -> Result<Option<String>> {
        match self.routing.first() {
            None => Ok(None),
            Some(id) => std::str::from_utf8(id)
                .map(|id| (!id.is_empty()).then(|| id.to_string()))
                .map_err(|_| {
                    MessageError::MalformedEnvelope("connection id is not valid UTF-8".to_string())
                }),
        }
    }
}

/// Splits inbound frames into routing chain and payload.
pub trait EnvelopeSplitter {
    fn split(&self, frames: &[Bytes]) -> Result<Split>;
}

/// Limits applied by [`DelimiterSplitter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitConfig {
    /// Maximum payload size after concatenation. Default: 16 MiB.
    pub max_payload_size: usize,
    /// Maximum number of routing frames before the delimiter. Default: 16.
    pub max_routing_frames: usize,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            max_payload_size: DEFAULT_MAX_PAYLOAD,
            max_routing_frames: DEFAULT_MAX_ROUTING_FRAMES,
        }
    }
}

/// Splits at the first empty frame.
#[derive(Debug, Clone, Default)]
pub struct DelimiterSplitter {
    config: SplitConfig,
}

impl DelimiterSplitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SplitConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SplitConfig {
        &self.config
    }
}

impl EnvelopeSplitter for DelimiterSplitter {
    fn split(&self, frames: &[Bytes]) -> Result<Split> {
        let delimiter = frames
            .iter()
            .position(|frame| frame.is_empty())
            .ok_or_else(|| MessageError::MalformedEnvelope("no delimiter frame".to_string()))?;

        if delimiter > self.config.max_routing_frames {
            return Err(MessageError::MalformedEnvelope(format!(
                "{delimiter} routing frames (max {})",
                self.config.max_routing_frames
            )));
        }

        let body = &frames[delimiter + 1..];
        let size: usize = body.iter().map(Bytes::len).sum();
        if size > self.config.max_payload_size {
            return Err(MessageError::PayloadTooLarge {
                size,
                max: self.config.max_payload_size,
            });
        }

        let payload = match body {
            [single] => single.clone(),
            parts => {
                let mut buf = BytesMut::with_capacity(size);
                for part in parts {
                    buf.extend_from_slice(part);
                }
                buf.freeze()
            }
        };

        Ok(Split {
            routing: frames[..delimiter].to_vec(),
            payload,
        })
    }
}

fn assemble(conn_id: Option<&str>, payload: Vec<u8>) -> Frames {
    trace!(payload_size = payload.len(), "assembling envelope");
    match conn_id {
        Some(id) => vec![
            Bytes::copy_from_slice(id.as_bytes()),
            Bytes::new(),
            Bytes::from(payload),
        ],
        None => vec![Bytes::new(), Bytes::from(payload)],
    }
}

fn split_checked<S: EnvelopeSplitter + ?Sized>(
    frames: &[Bytes],
    splitter: &S,
) -> Result<(Option<String>, Bytes)> {
    if frames.len() < MIN_FRAMES {
        return Err(MessageError::EmptyEnvelope {
            frames: frames.len(),
        });
    }
    let split = splitter.split(frames)?;
    let conn_id = split.conn_id()?;
    debug!(
        frames = frames.len(),
        routed = conn_id.is_some(),
        payload_size = split.payload.len(),
        "split envelope"
    );
    Ok((conn_id, split.payload))
}

/// Validate, encode and frame a request.
pub fn request_to_frames<F: Format>(request: &Request) -> Result<Frames> {
    let payload = encode_request::<F>(request)?;
    Ok(assemble(request.conn_id(), payload))
}

/// Validate, encode and frame a reply.
pub fn reply_to_frames<F: Format>(reply: &Reply) -> Result<Frames> {
    let payload = encode_reply::<F>(reply)?;
    Ok(assemble(reply.conn_id(), payload))
}

/// Decode a request envelope using the delimiter splitter.
pub fn request_from_frames<F: Format>(frames: &[Bytes]) -> Result<Request> {
    request_from_frames_with::<F, _>(frames, &DelimiterSplitter::default())
}

/// Decode a reply envelope using the delimiter splitter.
pub fn reply_from_frames<F: Format>(frames: &[Bytes]) -> Result<Reply> {
    reply_from_frames_with::<F, _>(frames, &DelimiterSplitter::default())
}

/// Decode a request envelope with an explicit splitter.
pub fn request_from_frames_with<F: Format, S: EnvelopeSplitter + ?Sized>(
    frames: &[Bytes],
    splitter: &S,
) -> Result<Request> {
    let (conn_id, payload) = split_checked(frames, splitter)?;
    let mut request: Request = decode_as::<F, _>("request_from_frames", &payload)?;
    if let Some(id) = conn_id {
        request.set_conn_id(id);
    }
    Ok(request)
}

/// Decode a reply envelope with an explicit splitter.
pub fn reply_from_frames_with<F: Format, S: EnvelopeSplitter + ?Sized>(
    frames: &[Bytes],
    splitter: &S,
) -> Result<Reply> {
    let (conn_id, payload) = split_checked(frames, splitter)?;
    let mut reply: Reply = decode_as::<F, _>("reply_from_frames", &payload)?;
    if let Some(id) = conn_id {
        reply.set_conn_id(id);
    }
    Ok(reply)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::testing::TestJson;
    use crate::parameters::Parameters;

    fn frames(parts: &[&str]) -> Vec<Bytes> {
        parts
            .iter()
            .map(|p| Bytes::copy_from_slice(p.as_bytes()))
            .collect()
    }

    #[test]
    fn sync_envelope_has_two_frames() {
        let out = request_to_frames::<TestJson>(&Request::new("command")).unwrap();
        assert_eq!(out.len(), 2);
        assert!(out[0].is_empty());
    }

    #[test]
    fn routed_envelope_has_three_frames() {
        let req = Request::new("command").with_conn_id("X");
        let out = request_to_frames::<TestJson>(&req).unwrap();
        assert_eq!(out.len(), 3);
        assert_eq!(out[0].as_ref(), b"X");
        assert!(out[1].is_empty());
    }

    #[test]
    fn invalid_entity_produces_no_frames() {
        let err = reply_to_frames::<TestJson>(&Reply::fail("")).unwrap_err();
        assert!(matches!(err, MessageError::InconsistentFailure { .. }));
    }

    #[test]
    fn single_frame_is_rejected() {
        let err = request_from_frames::<TestJson>(&frames(&["single"])).unwrap_err();
        assert!(matches!(err, MessageError::EmptyEnvelope { frames: 1 }));
        let err = reply_from_frames::<TestJson>(&[]).unwrap_err();
        assert!(matches!(err, MessageError::EmptyEnvelope { frames: 0 }));
    }

    #[test]
    fn roundtrip_preserves_conn_id() {
        let reply = Reply::ok(Parameters::new().with("number", 123u64)).with_conn_id("req_id");
        let out = reply_to_frames::<TestJson>(&reply).unwrap();
        let back = reply_from_frames::<TestJson>(&out).unwrap();
        assert_eq!(back, reply);
        assert_eq!(back.conn_id(), Some("req_id"));
    }

    #[test]
    fn multi_frame_payload_is_concatenated() {
        let payload = encode_request::<TestJson>(&Request::new("command")).unwrap();
        let (head, tail) = payload.split_at(5);
        let envelope = vec![
            Bytes::new(),
            Bytes::copy_from_slice(head),
            Bytes::copy_from_slice(tail),
        ];
        let req = request_from_frames::<TestJson>(&envelope).unwrap();
        assert_eq!(req.command, "command");
        assert_eq!(req.conn_id(), None);
    }

    #[test]
    fn empty_payload_fails_decoding_in_envelope_context() {
        let err = request_from_frames::<TestJson>(&frames(&["", "", ""])).unwrap_err();
        assert!(matches!(
            err,
            MessageError::Decode { op: "request_from_frames", .. }
        ));
    }

    #[test]
    fn splitter_limits() {
        let splitter = DelimiterSplitter::new();
        let err = splitter.split(&frames(&["a", "b"])).unwrap_err();
        assert!(matches!(err, MessageError::MalformedEnvelope(_)));

        let chain = splitter.split(&frames(&["proxy", "client", "", "{}"])).unwrap();
        assert_eq!(chain.routing.len(), 2);
        assert_eq!(chain.conn_id().unwrap().as_deref(), Some("proxy"));

        let short = DelimiterSplitter::with_config(SplitConfig {
            max_routing_frames: 1,
            ..SplitConfig::default()
        });
        let err = short.split(&frames(&["a", "b", "", "{}"])).unwrap_err();
        assert!(matches!(err, MessageError::MalformedEnvelope(_)));

        let small = DelimiterSplitter::with_config(SplitConfig {
            max_payload_size: 2,
            ..SplitConfig::default()
        });
        let err = small.split(&frames(&["", "abc"])).unwrap_err();
        assert!(matches!(err, MessageError::PayloadTooLarge { size: 3, max: 2 }));
    }

    #[test]
    fn custom_splitter_is_used() {
        struct Chain;
        impl EnvelopeSplitter for Chain {
            fn split(&self, frames: &[Bytes]) -> Result<Split> {
                Ok(Split {
                    routing: vec![frames[0].clone()],
                    payload: frames[frames.len() - 1].clone(),
                })
            }
        }

        let payload = encode_request::<TestJson>(&Request::new("command")).unwrap();
        let envelope = vec![
            Bytes::from_static(b"outer"),
            Bytes::from_static(b"inner"),
            Bytes::new(),
            Bytes::from(payload),
        ];
        let req = request_from_frames_with::<TestJson, _>(&envelope, &Chain).unwrap();
        assert_eq!(req.conn_id(), Some("outer"));
    }

    #[test]
    fn non_utf8_conn_id_is_rejected() {
        let split = Split {
            routing: vec![Bytes::from_static(&[0xff, 0xfe])],
            payload: Bytes::new(),
        };
        assert!(matches!(
            split.conn_id(),
            Err(MessageError::MalformedEnvelope(_))
        ));
    }
}

use std::fmt;
use std::marker::PhantomData;
use std::ops::{Deref, DerefMut};

use bytes::Bytes;

use crate::envelope::{
    reply_from_frames_with, reply_to_frames, request_from_frames_with, request_to_frames,
    DelimiterSplitter, EnvelopeSplitter, Frames,
};
use crate::error::Result;
use crate::format::{encode_reply, encode_request, Format};
use crate::reply::Reply;
use crate::request::Request;

/// A request bound to the wire format it travels in.
///
/// Dispatchers that pick a format at runtime hold requests through this
/// trait, so a message can be encoded again without knowing its format.
pub trait RequestMessage: fmt::Debug + Send + Sync {
    /// Name of the wire format.
    fn format_name(&self) -> &'static str;
    fn request(&self) -> &Request;
    fn request_mut(&mut self) -> &mut Request;
    /// Validate and encode the payload.
    fn to_bytes(&self) -> Result<Vec<u8>>;
    /// Validate, encode and frame.
    fn to_frames(&self) -> Result<Frames>;
    fn into_request(self: Box<Self>) -> Request;

    fn conn_id(&self) -> Option<&str> {
        self.request().conn_id()
    }

    fn is_first_hop(&self) -> bool {
        self.request().is_first_hop()
    }
}

/// A reply bound to the wire format it travels in.
pub trait ReplyMessage: fmt::Debug + Send + Sync {
    fn format_name(&self) -> &'static str;
    fn reply(&self) -> &Reply;
    fn reply_mut(&mut self) -> &mut Reply;
    fn to_bytes(&self) -> Result<Vec<u8>>;
    fn to_frames(&self) -> Result<Frames>;
    fn into_reply(self: Box<Self>) -> Reply;

    fn conn_id(&self) -> Option<&str> {
        self.reply().conn_id()
    }

    fn is_ok(&self) -> bool {
        self.reply().is_ok()
    }
}

/// An entity paired with a wire format.
pub struct Framed<F, E> {
    inner: E,
    format: PhantomData<fn() -> F>,
}

impl<F: Format, E> Framed<F, E> {
    pub fn new(inner: E) -> Self {
        Self {
            inner,
            format: PhantomData,
        }
    }

    pub fn into_inner(self) -> E {
        self.inner
    }
}

impl<F: Format> Framed<F, Request> {
    /// Decode a request envelope.
    pub fn from_frames(frames: &[Bytes]) -> Result<Self> {
        Self::from_frames_with(frames, &DelimiterSplitter::default())
    }

    pub fn from_frames_with<S: EnvelopeSplitter + ?Sized>(
        frames: &[Bytes],
        splitter: &S,
    ) -> Result<Self> {
        request_from_frames_with::<F, S>(frames, splitter).map(Self::new)
    }
}

impl<F: Format> Framed<F, Reply> {
    /// Decode a reply envelope.
    pub fn from_frames(frames: &[Bytes]) -> Result<Self> {
        Self::from_frames_with(frames, &DelimiterSplitter::default())
    }

    pub fn from_frames_with<S: EnvelopeSplitter + ?Sized>(
        frames: &[Bytes],
        splitter: &S,
    ) -> Result<Self> {
        reply_from_frames_with::<F, S>(frames, splitter).map(Self::new)
    }
}

impl<F, E> Deref for Framed<F, E> {
    type Target = E;

    fn deref(&self) -> &E {
        &self.inner
    }
}

impl<F, E> DerefMut for Framed<F, E> {
    fn deref_mut(&mut self) -> &mut E {
        &mut self.inner
    }
}

impl<F, E: Clone> Clone for Framed<F, E> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            format: PhantomData,
        }
    }
}

impl<F, E: PartialEq> PartialEq for Framed<F, E> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<F: Format, E: Default> Default for Framed<F, E> {
    fn default() -> Self {
        Self::new(E::default())
    }
}

impl<F: Format, E: fmt::Debug> fmt::Debug for Framed<F, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Framed")
            .field("format", &F::NAME)
            .field("inner", &self.inner)
            .finish()
    }
}

impl<F: Format> RequestMessage for Framed<F, Request> {
    fn format_name(&self) -> &'static str {
        F::NAME
    }

    fn request(&self) -> &Request {
        &self.inner
    }

    fn request_mut(&mut self) -> &mut Request {
        &mut self.inner
    }

    fn to_bytes(&self) -> Result<Vec<u8>> {
        encode_request::<F>(&self.inner)
    }

    fn to_frames(&self) -> Result<Frames> {
        request_to_frames::<F>(&self.inner)
    }

    fn into_request(self: Box<Self>) -> Request {
        self.inner
    }
}

impl<F: Format> ReplyMessage for Framed<F, Reply> {
    fn format_name(&self) -> &'static str {
        F::NAME
    }

    fn reply(&self) -> &Reply {
        &self.inner
    }

    fn reply_mut(&mut self) -> &mut Reply {
        &mut self.inner
    }

    fn to_bytes(&self) -> Result<Vec<u8>> {
        encode_reply::<F>(&self.inner)
    }

    fn to_frames(&self) -> Result<Frames> {
        reply_to_frames::<F>(&self.inner)
    }

    fn into_reply(self: Box<Self>) -> Reply {
        self.inner
    }
}

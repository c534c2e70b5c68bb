use std::collections::HashMap;
use std::fmt;

use bytes::Bytes;
use tracing::debug;

use crate::error::{MessageError, Result};
use crate::format::Format;
use crate::framed::{Framed, ReplyMessage, RequestMessage};
use crate::reply::Reply;
use crate::request::Request;

pub type NewRequestFn = fn(&[Bytes]) -> Result<Box<dyn RequestMessage>>;
pub type NewReplyFn = fn(&[Bytes]) -> Result<Box<dyn ReplyMessage>>;
pub type EmptyRequestFn = fn() -> Box<dyn RequestMessage>;
pub type EmptyReplyFn = fn() -> Box<dyn ReplyMessage>;

/// Constructors for one wire format, selectable by name at runtime.
#[derive(Clone, Copy)]
pub struct Operations {
    pub name: &'static str,
    pub new_request: NewRequestFn,
    pub new_reply: NewReplyFn,
    pub empty_request: EmptyRequestFn,
    pub empty_reply: EmptyReplyFn,
}

impl Operations {
    /// Build the descriptor for a [`Format`].
    pub fn of<F: Format>() -> Self {
        Self {
            name: F::NAME,
            new_request: new_request::<F>,
            new_reply: new_reply::<F>,
            empty_request: empty_request::<F>,
            empty_reply: empty_reply::<F>,
        }
    }

    /// Decode a request envelope.
    pub fn new_request(&self, frames: &[Bytes]) -> Result<Box<dyn RequestMessage>> {
        (self.new_request)(frames)
    }

    /// Decode a reply envelope.
    pub fn new_reply(&self, frames: &[Bytes]) -> Result<Box<dyn ReplyMessage>> {
        (self.new_reply)(frames)
    }

    pub fn empty_request(&self) -> Box<dyn RequestMessage> {
        (self.empty_request)()
    }

    pub fn empty_reply(&self) -> Box<dyn ReplyMessage> {
        (self.empty_reply)()
    }
}

impl fmt::Debug for Operations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Operations")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

fn new_request<F: Format>(frames: &[Bytes]) -> Result<Box<dyn RequestMessage>> {
    Ok(Box::new(Framed::<F, Request>::from_frames(frames)?))
}

fn new_reply<F: Format>(frames: &[Bytes]) -> Result<Box<dyn ReplyMessage>> {
    Ok(Box::new(Framed::<F, Reply>::from_frames(frames)?))
}

fn empty_request<F: Format>() -> Box<dyn RequestMessage> {
    Box::new(Framed::<F, Request>::default())
}

fn empty_reply<F: Format>() -> Box<dyn ReplyMessage> {
    Box::new(Framed::<F, Reply>::default())
}

/// Name-keyed table of format descriptors.
///
/// Built once at startup and shared by reference; lookups never mutate it.
#[derive(Debug, Clone, Default)]
pub struct FormatRegistry {
    formats: HashMap<&'static str, Operations>,
}

impl FormatRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a format. Names must be unique.
    pub fn register(&mut self, operations: Operations) -> Result<()> {
        if self.formats.contains_key(operations.name) {
            return Err(MessageError::DuplicateFormat(operations.name.to_string()));
        }
        debug!(format = operations.name, "registered message format");
        self.formats.insert(operations.name, operations);
        Ok(())
    }

    /// Builder-style register.
    pub fn with(mut self, operations: Operations) -> Result<Self> {
        self.register(operations)?;
        Ok(self)
    }

    pub fn get(&self, name: &str) -> Result<&Operations> {
        self.formats
            .get(name)
            .ok_or_else(|| MessageError::UnknownFormat(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.formats.contains_key(name)
    }

    /// Registered format names, sorted.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.formats.keys().copied().collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.formats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.formats.is_empty()
    }
}

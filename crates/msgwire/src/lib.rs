//! Request/reply codecs and transport envelopes for message-queue RPC.
//!
//! # Crate Structure
//!
//! - [`message`] — Entities, validation, envelopes and the format registry
//! - [`msgpack`] — MessagePack wire format (behind `msgpack` feature)
//! - [`json`] — JSON wire format (behind `json` feature)

/// Re-export message types.
pub mod message {
    pub use msgwire_message::*;
}

/// Re-export MessagePack format (requires `msgpack` feature).
#[cfg(feature = "msgpack")]
pub mod msgpack {
    pub use msgwire_msgpack::*;
}

/// Re-export JSON format (requires `json` feature).
#[cfg(feature = "json")]
pub mod json {
    pub use msgwire_json::*;
}

use msgwire_message::{FormatRegistry, Result};

/// Build a registry holding every format enabled at compile time.
pub fn registry() -> Result<FormatRegistry> {
    builtin_formats()
        .into_iter()
        .try_fold(FormatRegistry::new(), FormatRegistry::with)
}

fn builtin_formats() -> Vec<msgwire_message::Operations> {
    #[allow(unused_mut)]
    let mut formats = Vec::new();
    #[cfg(feature = "msgpack")]
    formats.push(msgwire_msgpack::message());
    #[cfg(feature = "json")]
    formats.push(msgwire_json::message());
    formats
}

use msgwire::message::MessageError;

pub const SUCCESS: i32 = 0;
pub const FAILURE: i32 = 1;
pub const DATA_INVALID: i32 = 60;
pub const USAGE: i32 = 64;

pub type CliResult<T> = Result<T, CliError>;

/// A failed command. [`CliError::code`] picks the process exit code.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{context}: {source}")]
    Message {
        context: &'static str,
        #[source]
        source: MessageError,
    },

    #[error("frame {index} is not hex: {source}")]
    FrameHex {
        index: usize,
        #[source]
        source: hex::FromHexError,
    },
}

impl CliError {
    pub fn code(&self) -> i32 {
        match self {
            CliError::Message { source, .. } => message_code(source),
            CliError::FrameHex { .. } => USAGE,
        }
    }
}

/// Bad input data is 60, an unknown format name is a usage error.
fn message_code(err: &MessageError) -> i32 {
    match err {
        err if err.is_validation() => DATA_INVALID,
        MessageError::Decode { .. }
        | MessageError::EmptyEnvelope { .. }
        | MessageError::MalformedEnvelope(_)
        | MessageError::PayloadTooLarge { .. } => DATA_INVALID,
        MessageError::UnknownFormat(_) => USAGE,
        _ => FAILURE,
    }
}

pub fn message_error(context: &'static str, source: MessageError) -> CliError {
    CliError::Message { context, source }
}

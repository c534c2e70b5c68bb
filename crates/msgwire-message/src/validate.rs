//! Outbound validation gate.
//!
//! These checks run before a message is encoded. Decoding never calls them,
//! so a received message is structurally sound but not necessarily sendable.

use crate::error::{MessageError, Result};
use crate::reply::{Reply, Status};
use crate::request::Request;

/// Maximum command name length in bytes.
pub const MAX_COMMAND_LEN: usize = 255;

/// Check that `command` is a usable command name.
pub fn valid_command(command: &str) -> Result<()> {
    let reason = if command.is_empty() {
        "empty"
    } else if command.len() > MAX_COMMAND_LEN {
        "too long"
    } else if command.chars().any(|c| c.is_whitespace() || c.is_control()) {
        "contains whitespace or control characters"
    } else {
        return Ok(());
    };

    Err(MessageError::InvalidCommand {
        op: "valid_command",
        command: command.to_string(),
        reason,
    })
}

/// Check that the status is one of the two recognized values.
pub fn valid_status(status: &Status) -> Result<()> {
    match status {
        Status::Ok | Status::Fail => Ok(()),
        Status::Other(raw) => Err(MessageError::InvalidStatus {
            op: "valid_status",
            status: raw.clone(),
        }),
    }
}

/// A failed reply must explain itself.
pub fn valid_fail(status: &Status, message: &str) -> Result<()> {
    if *status == Status::Fail && message.is_empty() {
        return Err(MessageError::InconsistentFailure { op: "valid_fail" });
    }
    Ok(())
}

pub fn validate_request(request: &Request) -> Result<()> {
    valid_command(&request.command)
}

pub fn validate_reply(reply: &Reply) -> Result<()> {
    valid_fail(&reply.status, &reply.message)?;
    valid_status(&reply.status)
}

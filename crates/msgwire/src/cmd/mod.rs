use clap::{Args, Subcommand, ValueEnum};
use serde_json::Value;

use crate::exit::{message_error, CliResult};
use crate::output::OutputFormat;

pub mod decode;
pub mod formats;
pub mod reply;
pub mod request;

/// Wire format used when `--format` is not given.
pub const DEFAULT_FORMAT: &str = "msgpack";

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List registered wire formats.
    Formats,
    /// Encode a request envelope.
    Request(RequestArgs),
    /// Encode a reply envelope.
    Reply(ReplyArgs),
    /// Decode an envelope given as hex frames.
    Decode(DecodeArgs),
}

pub fn run(command: Command, output: OutputFormat) -> CliResult<i32> {
    let registry = msgwire::registry().map_err(|err| message_error("registry", err))?;
    match command {
        Command::Formats => formats::run(&registry, output),
        Command::Request(args) => request::run(&registry, args, output),
        Command::Reply(args) => reply::run(&registry, args, output),
        Command::Decode(args) => decode::run(&registry, args, output),
    }
}

#[derive(Args, Debug)]
pub struct RequestArgs {
    /// Command name.
    pub command: String,
    /// Parameter as key=value. Values are parsed as JSON, falling back to a string.
    #[arg(long = "param", short = 'p', value_parser = parse_param)]
    pub params: Vec<(String, Value)>,
    /// Connection id of the addressed peer.
    #[arg(long)]
    pub conn_id: Option<String>,
    /// Wire format name.
    #[arg(long, default_value = DEFAULT_FORMAT)]
    pub format: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StatusArg {
    Ok,
    Fail,
}

#[derive(Args, Debug)]
pub struct ReplyArgs {
    /// Reply status.
    #[arg(long, value_enum)]
    pub status: StatusArg,
    /// Failure reason. Required by the wire contract for failed replies.
    #[arg(long, default_value = "")]
    pub message: String,
    /// Parameter as key=value.
    #[arg(long = "param", short = 'p', value_parser = parse_param)]
    pub params: Vec<(String, Value)>,
    /// Connection id of the addressed peer.
    #[arg(long)]
    pub conn_id: Option<String>,
    /// Wire format name.
    #[arg(long, default_value = DEFAULT_FORMAT)]
    pub format: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Kind {
    Request,
    Reply,
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Entity kind carried by the envelope.
    #[arg(long, value_enum)]
    pub kind: Kind,
    /// Wire format name.
    #[arg(long, default_value = DEFAULT_FORMAT)]
    pub format: String,
    /// Envelope frames as hex. Pass "" for the delimiter frame.
    #[arg(required = true, num_args = 1..)]
    pub frames: Vec<String>,
}

fn parse_param(raw: &str) -> Result<(String, Value), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got {raw:?}"))?;
    if key.is_empty() {
        return Err("parameter key must not be empty".to_string());
    }
    let value =
        serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.to_string(), value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_param_prefers_json() {
        assert_eq!(
            parse_param("number=123").unwrap(),
            ("number".to_string(), Value::from(123u64))
        );
        assert_eq!(
            parse_param("flag=true").unwrap(),
            ("flag".to_string(), Value::Bool(true))
        );
        assert_eq!(
            parse_param("name=alice").unwrap(),
            ("name".to_string(), Value::from("alice"))
        );
        assert_eq!(
            parse_param("expr=a=b").unwrap(),
            ("expr".to_string(), Value::from("a=b"))
        );
    }

    #[test]
    fn parse_param_rejects_bad_input() {
        assert!(parse_param("novalue").is_err());
        assert!(parse_param("=1").is_err());
    }
}

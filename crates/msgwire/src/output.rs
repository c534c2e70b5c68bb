use std::io::IsTerminal;

use clap::ValueEnum;
use msgwire::message::{Hop, Parameters, Reply, Request};
use serde::Serialize;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Pretty,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Pretty
        } else {
            Self::Json
        }
    }
}

#[derive(Serialize)]
struct FramesOutput<'a> {
    format: &'a str,
    frames: Vec<String>,
}

pub fn print_frames<B: AsRef<[u8]>>(format: &str, frames: &[B], output: OutputFormat) {
    let hex_frames: Vec<String> = frames.iter().map(hex::encode).collect();
    match output {
        OutputFormat::Json => {
            let out = FramesOutput {
                format,
                frames: hex_frames,
            };
            print_json(&out);
        }
        OutputFormat::Pretty => {
            for (index, (frame, hex)) in frames.iter().zip(&hex_frames).enumerate() {
                println!("frame[{index}] ({} bytes) {hex}", frame.as_ref().len());
            }
        }
    }
}

#[derive(Serialize)]
struct RequestOutput<'a> {
    format: &'a str,
    conn_id: Option<&'a str>,
    first_hop: bool,
    command: &'a str,
    parameters: &'a Parameters,
    trace: &'a [Hop],
}

pub fn print_request(format: &str, request: &Request, output: OutputFormat) {
    match output {
        OutputFormat::Json => print_json(&RequestOutput {
            format,
            conn_id: request.conn_id(),
            first_hop: request.is_first_hop(),
            command: &request.command,
            parameters: &request.parameters,
            trace: request.trace(),
        }),
        OutputFormat::Pretty => {
            println!("format={format} kind=request command={}", request.command);
            println!("conn_id={}", request.conn_id().unwrap_or("-"));
            print_parameters(&request.parameters);
        }
    }
}

#[derive(Serialize)]
struct ReplyOutput<'a> {
    format: &'a str,
    conn_id: Option<&'a str>,
    status: &'a str,
    message: &'a str,
    parameters: &'a Parameters,
    trace: &'a [Hop],
}

pub fn print_reply(format: &str, reply: &Reply, output: OutputFormat) {
    match output {
        OutputFormat::Json => print_json(&ReplyOutput {
            format,
            conn_id: reply.conn_id(),
            status: reply.status.as_str(),
            message: &reply.message,
            parameters: &reply.parameters,
            trace: reply.trace(),
        }),
        OutputFormat::Pretty => {
            println!("format={format} kind=reply status={}", reply.status);
            if !reply.message.is_empty() {
                println!("message={}", reply.message);
            }
            println!("conn_id={}", reply.conn_id().unwrap_or("-"));
            print_parameters(&reply.parameters);
        }
    }
}

pub fn print_names(names: &[&str], output: OutputFormat) {
    match output {
        OutputFormat::Json => print_json(&names),
        OutputFormat::Pretty => {
            for name in names {
                println!("{name}");
            }
        }
    }
}

fn print_parameters(parameters: &Parameters) {
    for (key, value) in parameters {
        println!("  {key}={value}");
    }
}

fn print_json<T: Serialize>(value: &T) {
    println!(
        "{}",
        serde_json::to_string(value).unwrap_or_else(|_| "{}".to_string())
    );
}

use msgwire::message::{FormatRegistry, Request};

use crate::cmd::RequestArgs;
use crate::exit::{message_error, CliResult, SUCCESS};
use crate::output::{print_frames, OutputFormat};

pub fn run(registry: &FormatRegistry, args: RequestArgs, output: OutputFormat) -> CliResult<i32> {
    let ops = registry
        .get(&args.format)
        .map_err(|err| message_error("format lookup failed", err))?;

    let mut request = ops.empty_request();
    *request.request_mut() = build_request(args.command, args.params, args.conn_id);

    let frames = request
        .to_frames()
        .map_err(|err| message_error("encode failed", err))?;
    tracing::debug!(format = ops.name, frames = frames.len(), "encoded request");

    print_frames(ops.name, &frames, output);
    Ok(SUCCESS)
}

fn build_request(
    command: String,
    params: Vec<(String, serde_json::Value)>,
    conn_id: Option<String>,
) -> Request {
    let mut request = Request::new(command).with_parameters(params.into_iter().collect());
    if let Some(id) = conn_id {
        request.set_conn_id(id);
    }
    request
}

use msgwire::message::{FormatRegistry, Reply, Status};

use crate::cmd::{ReplyArgs, StatusArg};
use crate::exit::{message_error, CliResult, SUCCESS};
use crate::output::{print_frames, OutputFormat};

pub fn run(registry: &FormatRegistry, args: ReplyArgs, output: OutputFormat) -> CliResult<i32> {
    let ops = registry
        .get(&args.format)
        .map_err(|err| message_error("format lookup failed", err))?;

    let mut reply = ops.empty_reply();
    *reply.reply_mut() = build_reply(args);

    let frames = reply
        .to_frames()
        .map_err(|err| message_error("encode failed", err))?;
    tracing::debug!(format = ops.name, frames = frames.len(), "encoded reply");

    print_frames(ops.name, &frames, output);
    Ok(SUCCESS)
}

fn build_reply(args: ReplyArgs) -> Reply {
    let mut reply = Reply::default();
    reply.status = match args.status {
        StatusArg::Ok => Status::Ok,
        StatusArg::Fail => Status::Fail,
    };
    reply.message = args.message;
    reply.parameters = args.params.into_iter().collect();
    if let Some(id) = args.conn_id {
        reply.set_conn_id(id);
    }
    reply
}

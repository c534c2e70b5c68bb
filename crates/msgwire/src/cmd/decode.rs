use msgwire::message::{Bytes, FormatRegistry};

use crate::cmd::{DecodeArgs, Kind};
use crate::exit::{message_error, CliError, CliResult, SUCCESS};
use crate::output::{print_reply, print_request, OutputFormat};

pub fn run(registry: &FormatRegistry, args: DecodeArgs, output: OutputFormat) -> CliResult<i32> {
    let ops = registry
        .get(&args.format)
        .map_err(|err| message_error("format lookup failed", err))?;
    let frames = parse_frames(&args.frames)?;
    tracing::debug!(format = ops.name, frames = frames.len(), "decoding envelope");

    match args.kind {
        Kind::Request => {
            let request = ops
                .new_request(&frames)
                .map_err(|err| message_error("decode failed", err))?;
            print_request(ops.name, request.request(), output);
        }
        Kind::Reply => {
            let reply = ops
                .new_reply(&frames)
                .map_err(|err| message_error("decode failed", err))?;
            print_reply(ops.name, reply.reply(), output);
        }
    }
    Ok(SUCCESS)
}

fn parse_frames(raw: &[String]) -> CliResult<Vec<Bytes>> {
    raw.iter()
        .enumerate()
        .map(|(index, frame)| {
            hex::decode(frame.trim())
                .map(Bytes::from)
                .map_err(|source| CliError::FrameHex { index, source })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_frames_accepts_empty_delimiter() {
        let frames = parse_frames(&["72".to_string(), String::new(), "8000".to_string()]).unwrap();
        assert_eq!(frames.len(), 3);
        assert_eq!(frames[0].as_ref(), b"r");
        assert!(frames[1].is_empty());
        assert_eq!(frames[2].as_ref(), &[0x80, 0x00]);
    }

    #[test]
    fn parse_frames_rejects_non_hex() {
        let err = parse_frames(&["00".to_string(), "zz".to_string()]).unwrap_err();
        assert!(matches!(err, CliError::FrameHex { index: 1, .. }));
        assert_eq!(err.code(), crate::exit::USAGE);
    }
}

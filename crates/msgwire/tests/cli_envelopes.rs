#![cfg(feature = "cli")]

use std::process::{Command, Output};

fn msgwire(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_msgwire"))
        .args(["--log-level", "error", "--output", "json"])
        .args(args)
        .output()
        .expect("msgwire should run")
}

fn frames_of(output: &Output) -> Vec<String> {
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    value["frames"]
        .as_array()
        .expect("frames should be an array")
        .iter()
        .map(|frame| frame.as_str().expect("frame should be hex").to_string())
        .collect()
}

#[test]
fn formats_lists_builtin_formats() {
    let output = msgwire(&["formats"]);
    assert!(output.status.success());
    let names: Vec<String> = serde_json::from_slice(&output.stdout).expect("JSON list");
    assert_eq!(names, vec!["json", "msgpack"]);
}

#[test]
fn request_envelope_roundtrips_through_decode() {
    let frames = frames_of(&msgwire(&[
        "request",
        "command",
        "--param",
        "number=123",
        "--conn-id",
        "req_id",
    ]));
    assert_eq!(frames.len(), 3);
    assert_eq!(frames[0], hex::encode("req_id"));
    assert!(frames[1].is_empty());

    let mut args = vec!["decode", "--kind", "request"];
    args.extend(frames.iter().map(String::as_str));
    let output = msgwire(&args);
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("JSON entity");
    assert_eq!(value["command"], "command");
    assert_eq!(value["conn_id"], "req_id");
    assert_eq!(value["parameters"]["number"], 123);
    assert_eq!(value["first_hop"], true);
}

#[test]
fn sync_reply_in_json_format() {
    let frames = frames_of(&msgwire(&[
        "reply", "--status", "ok", "--format", "json", "-p", "number=123",
    ]));
    assert_eq!(frames.len(), 2);
    assert!(frames[0].is_empty());

    let payload = hex::decode(&frames[1]).expect("payload should be hex");
    let value: serde_json::Value = serde_json::from_slice(&payload).expect("payload is JSON");
    assert_eq!(value["status"], "OK");
    assert_eq!(value["parameters"]["number"], 123);
}

#[test]
fn failed_reply_without_message_is_data_invalid() {
    let output = msgwire(&["reply", "--status", "fail"]);
    assert_eq!(output.status.code(), Some(60));
    assert!(String::from_utf8_lossy(&output.stderr).contains("failed reply must have a message"));
}

#[test]
fn single_frame_envelope_is_rejected() {
    let output = msgwire(&["decode", "--kind", "request", "73696e676c65"]);
    assert_eq!(output.status.code(), Some(60));
}

#[test]
fn unknown_format_is_usage_error() {
    let output = msgwire(&["request", "command", "--format", "xml"]);
    assert_eq!(output.status.code(), Some(64));
}

mod common;

mod events;
mod symbols;
mod units;

use crate::common::{command_payload, TestBridge};
use gdbjs::error::Error;
use serde_json::json;
use serial_test::serial;

#[test]
fn test_context_shadowed_local() {
    let bridge = TestBridge::from_toml(
        r#"
        [[frame.blocks]]
        symbols = [{ name = "i", kind = "variable", value = "3", type = "int" }]

        [[frame.blocks]]
        global = true
        symbols = [{ name = "i", kind = "variable", value = "0", type = "int" }]
        "#,
    );

    let wire = bridge.send("context ");
    assert_eq!(
        command_payload(&wire),
        json!([{"name": "i", "value": "3", "type": "int", "scope": "local"}])
    );
}

#[test]
fn test_session_loop() {
    let bridge = TestBridge::program();
    let input = "group\n\nexec print nope\nundefined-unit arg\nthread\n";
    bridge.session.run(input.as_bytes()).unwrap();

    let wire = bridge.sink.contents();
    let lines: Vec<_> = wire.lines().collect();
    assert_eq!(
        lines,
        vec![
            "<gdbjs:cmd:group {\"id\":1,\"pid\":4242} group:cmd:gdbjs>\
             error: exec: No symbol \"nope\" in current context.",
            "error: undefined command: \"undefined-unit\"",
            "<gdbjs:cmd:thread {\"id\":1,\"group\":{\"id\":1,\"pid\":4242}} thread:cmd:gdbjs>",
        ]
    );
}

#[test]
fn test_dispatch_errors_are_not_framed() {
    let bridge = TestBridge::program();

    let err = bridge.session.handle_line("exec print nope").unwrap_err();
    assert!(matches!(err, Error::Command { ref command, .. } if command == "exec"));
    assert!(!err.is_fatal());

    let err = bridge.session.handle_line("frobnicate").unwrap_err();
    assert!(matches!(err, Error::UnknownCommand(_)));

    assert_eq!(bridge.sink.contents(), "");
}

#[test]
#[serial]
fn test_quiet_session() {
    gdbjs::log::disable();
    assert!(!gdbjs::log::is_enabled());

    let bridge = TestBridge::program();
    let wire = bridge.send("vars");
    assert!(command_payload(&wire).as_array().unwrap().len() > 1);

    gdbjs::log::enable();
    assert!(gdbjs::log::is_enabled());
}

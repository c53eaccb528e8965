use crate::common::{command_frame, command_payload, TestBridge};
use serde_json::json;

#[test]
fn test_thread_and_group() {
    struct TestCase {
        state: &'static str,
        thread: serde_json::Value,
    }

    let cases = [
        TestCase {
            state: "[inferior]\nnum = 1\npid = 4242\n[thread]\nnum = 2\nglobal_num = 5\n",
            thread: json!({"id": 5, "group": {"id": 1, "pid": 4242}}),
        },
        TestCase {
            state: "[inferior]\nnum = 3\n[thread]\nnum = 2\n",
            thread: json!({"id": 2, "group": {"id": 3, "pid": 0}}),
        },
        TestCase {
            state: "[inferior]\nnum = 1\npid = 4242\n",
            thread: json!({"id": null, "group": {"id": 1, "pid": 4242}}),
        },
    ];

    for tc in cases {
        let bridge = TestBridge::from_toml(tc.state);
        assert_eq!(command_payload(&bridge.send("thread")), tc.thread);
        assert_eq!(command_payload(&bridge.send("group")), tc.thread["group"].clone());
    }
}

#[test]
fn test_sources_search() {
    let bridge = TestBridge::from_toml(r#"sources = ["a/foo.c", "b/bar.c", "a/baz.h"]"#);

    assert_eq!(command_payload(&bridge.send("sources ^a/")), json!(["a/foo.c", "a/baz.h"]));
    assert_eq!(command_payload(&bridge.send("sources")).as_array().unwrap().len(), 3);
    assert_eq!(command_payload(&bridge.send("sources \\.rs$")), json!([]));
    assert!(bridge.session.handle_line("sources (").is_err());
}

#[test]
fn test_sources_from_report() {
    let bridge = TestBridge::program();
    assert_eq!(
        command_payload(&bridge.send("sources ")),
        json!([
            "/work/demo/main.c",
            "/work/demo/util.h",
            "/usr/include/stdio.h",
            "/work/demo/util.c",
        ])
    );
}

#[test]
fn test_exec_plain_output() {
    let bridge = TestBridge::from_toml(
        r#"
        [[commands]]
        command = "info line"
        output = "Line 12 of \"main.c\" starts at address 0x401156 <main+32>.\n"
        "#,
    );

    let wire = bridge.send("exec info line");
    let frame = command_frame(&wire);
    assert_eq!(frame.tag, "exec");
    assert_eq!(
        wire,
        format!(
            "Line 12 of \"main.c\" starts at address 0x401156 <main+32>.\n{}",
            frame.to_wire()
        )
    );
    // angle brackets never appear raw inside a payload
    assert!(!frame.payload.contains('<'));
    assert_eq!(
        frame.payload_value().unwrap(),
        json!("Line 12 of \"main.c\" starts at address 0x401156 <main+32>.\n")
    );
}

#[test]
fn test_concat_without_command() {
    let bridge = TestBridge::from_toml("");
    let wire = bridge.send("concat ###");
    assert_eq!(wire, "###<gdbjs:cmd:concat \"###\" concat:cmd:gdbjs>");
}

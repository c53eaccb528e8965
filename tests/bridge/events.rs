use crate::common::{command_frame, command_payload, event_tags, TestBridge, PROGRAM_STATE};
use gdbjs::config::BridgeConfig;
use gdbjs::debugger::snapshot::Signal;
use gdbjs::protocol::{decode_all, Kind};
use serde_json::json;

#[test]
fn test_exec_rescues_stop_event() {
    let bridge = TestBridge::program();
    let wire = bridge.send("exec continue");

    assert_eq!(event_tags(&wire), vec!["cont", "stop"]);
    let stop = decode_all(&wire)
        .into_iter()
        .find(|f| f.tag == "stop")
        .unwrap();
    assert_eq!(
        stop.payload_value().unwrap(),
        json!({"reason": "breakpoint-hit", "thread": 1, "breakpoints": [1]})
    );

    let raw = "Continuing.\n\nBreakpoint 1, main (argc=1, argv=0x7fffffffe3a8) at main.c:12\n\
               12\t    total += i;\n";
    assert_eq!(command_payload(&wire), json!(raw));

    // events are written where they occurred, the command frame comes last
    let frame = command_frame(&wire);
    assert!(wire.starts_with("Continuing.\n<gdbjs:event:cont "));
    assert!(wire.ends_with(&frame.to_wire()));
}

#[test]
fn test_concat_rescues_events() {
    let bridge = TestBridge::program();
    let wire = bridge.send("concat @@@ continue");

    assert!(wire.starts_with("@@@Continuing.\n"));
    assert_eq!(event_tags(&wire), vec!["cont", "stop"]);
    let payload = command_payload(&wire);
    let payload = payload.as_str().unwrap();
    assert!(payload.starts_with("@@@Continuing.\n\nBreakpoint 1"));
    assert!(!payload.contains("gdbjs:"));
}

#[test]
fn test_failed_exec_rescues_events() {
    let bridge = TestBridge::from_toml(
        r#"
        [[commands]]
        command = "call crash()"
        output = "\nProgram received signal SIGSEGV, Segmentation fault.\n"
        events = [{ event = "stop", reason = "signal-received", thread = 1, signal = "SIGSEGV" }]
        error = "The program being debugged was signaled while in a function called from GDB."
        "#,
    );

    let err = bridge.session.handle_line("exec call crash()").unwrap_err();
    assert!(err.to_string().starts_with("exec: The program being debugged was signaled"));

    let wire = bridge.sink.contents();
    assert_eq!(event_tags(&wire), vec!["stop"]);
    assert!(wire.starts_with("\nProgram received signal SIGSEGV, Segmentation fault.\n"));
    let stop = decode_all(&wire).remove(0);
    assert_eq!(
        stop.payload_value().unwrap(),
        json!({"reason": "signal-received", "thread": 1, "signal": "SIGSEGV"})
    );
    // no command frame for a failed command
    assert!(decode_all(&wire).iter().all(|f| f.kind == Kind::Event));
}

#[test]
fn test_signals_outside_commands() {
    let bridge = TestBridge::program();
    let debugger = bridge.session.debugger();

    debugger.fire(&Signal::NewThread { id: 2 });
    debugger.fire(&Signal::Exited { exit_code: Some(0) });
    debugger.fire(&Signal::InferiorDeleted { id: 1 });

    let frames = decode_all(&bridge.sink.contents());
    assert!(frames.iter().all(|f| f.kind == Kind::Event));
    let payloads: Vec<_> = frames
        .iter()
        .map(|f| (f.tag.as_str(), f.payload_value().unwrap()))
        .collect();
    assert_eq!(
        payloads,
        vec![
            ("new-thread", json!({"id": 2})),
            ("exited", json!({"exit_code": 0})),
            ("inferior-deleted", json!({"id": 1})),
        ]
    );
}

#[test]
fn test_objfile_event_invalidates_sources() {
    struct TestCase {
        refresh_sources: bool,
        stale_after_load: bool,
    }

    let cases = [
        TestCase {
            refresh_sources: true,
            stale_after_load: true,
        },
        TestCase {
            refresh_sources: false,
            stale_after_load: false,
        },
    ];

    for tc in cases {
        let config = BridgeConfig {
            refresh_sources: tc.refresh_sources,
            ..BridgeConfig::default()
        };
        let bridge = TestBridge::from_file(PROGRAM_STATE, config);
        assert!(!bridge.session.sources().is_stale());

        let wire = bridge.send("exec sharedlibrary");
        assert_eq!(event_tags(&wire), vec!["new-objfile"]);
        assert_eq!(bridge.session.sources().is_stale(), tc.stale_after_load);

        let wire = bridge.send("sources main");
        assert_eq!(command_payload(&wire), json!(["/work/demo/main.c"]));
        assert!(!bridge.session.sources().is_stale());
    }
}

#[test]
fn test_sources_unavailable_at_start() {
    let bridge = TestBridge::from_toml(
        r#"
        [[commands]]
        command = "file"
        events = [{ event = "clear-objfiles" }]
        "#,
    );
    // nothing to list yet, registry waits for the next query
    assert!(bridge.session.sources().is_stale());
    assert!(bridge.session.handle_line("sources").is_err());
    bridge.sink.take();

    let wire = bridge.send("exec file");
    assert_eq!(event_tags(&wire), vec!["clear-objfiles"]);
    let clear = decode_all(&wire).remove(0);
    assert_eq!(clear.payload_value().unwrap(), json!(null));
}

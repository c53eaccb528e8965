use crate::common::{command_payload, TestBridge, PROGRAM_STATE};
use gdbjs::config::{BridgeConfig, SymbolErrorPolicy};
use serde_json::{json, Value};

fn names(records: &Value) -> Vec<(&str, &str)> {
    records
        .as_array()
        .unwrap()
        .iter()
        .map(|r| (r["name"].as_str().unwrap(), r["scope"].as_str().unwrap()))
        .collect()
}

#[test]
fn test_context_snapshot() {
    let bridge = TestBridge::program();
    let records = command_payload(&bridge.send("context"));

    assert_eq!(
        names(&records),
        vec![
            ("i", "local"),
            ("argc", "argument"),
            ("argv", "argument"),
            ("total", "local"),
            ("counter", "static"),
            ("helper", "static"),
            ("cache", "static"),
            ("LIMIT", "global"),
        ]
    );
    assert_eq!(records[0]["value"], "3");
    assert_eq!(records[5]["value"], "{int (int)} 0x401136 <helper>");
    assert_eq!(
        records[6],
        json!({
            "name": "cache",
            "value": "<error: Cannot access memory at address 0x8>",
            "type": "struct cache *",
            "scope": "static",
        })
    );
}

#[test]
fn test_vars_snapshot() {
    let bridge = TestBridge::program();
    let records = command_payload(&bridge.send("vars"));

    assert_eq!(
        names(&records),
        vec![
            ("i", "local"),
            ("argc", "argument"),
            ("argv", "argument"),
            ("total", "local"),
            ("counter", "static"),
            ("cache", "static"),
            ("i", "global"),
        ]
    );
    assert_eq!(records[6]["value"], "0");
}

#[test]
fn test_skip_failed_symbols() {
    let config = BridgeConfig {
        symbol_errors: SymbolErrorPolicy::Skip,
        ..BridgeConfig::default()
    };
    let bridge = TestBridge::from_file(PROGRAM_STATE, config);

    for unit in ["context", "vars"] {
        let records = command_payload(&bridge.send(unit));
        assert!(names(&records).iter().all(|(name, _)| *name != "cache"));
    }
}

#[test]
fn test_snapshot_without_frame() {
    let bridge = TestBridge::from_toml("");
    let err = bridge.session.handle_line("context").unwrap_err();
    assert_eq!(err.to_string(), "context: no frame selected");

    let bridge = TestBridge::from_toml("[frame]\nfunction = \"main\"\n");
    let err = bridge.session.handle_line("vars").unwrap_err();
    assert_eq!(err.to_string(), "vars: cannot locate block for frame");
}

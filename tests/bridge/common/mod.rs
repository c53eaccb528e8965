use gdbjs::config::BridgeConfig;
use gdbjs::debugger::snapshot::SnapshotDebugger;
use gdbjs::output::{MemorySink, Output};
use gdbjs::protocol::{decode_all, Frame, Kind};
use gdbjs::session::Session;
use serde_json::Value;

pub const PROGRAM_STATE: &str = "./demos/program.toml";

/// Session over a replayed debugger, writing into memory.
pub struct TestBridge {
    pub session: Session<SnapshotDebugger>,
    pub sink: MemorySink,
}

impl TestBridge {
    pub fn from_file(path: &str, config: BridgeConfig) -> Self {
        let sink = MemorySink::default();
        let output = Output::new(sink.clone());
        let debugger = SnapshotDebugger::from_file(path, output.clone()).unwrap();
        Self {
            session: Session::new(debugger, output, config),
            sink,
        }
    }

    pub fn from_toml(state: &str) -> Self {
        let sink = MemorySink::default();
        let output = Output::new(sink.clone());
        let debugger = SnapshotDebugger::from_toml(state, output.clone()).unwrap();
        Self {
            session: Session::new(debugger, output, BridgeConfig::default()),
            sink,
        }
    }

    pub fn program() -> Self {
        Self::from_file(PROGRAM_STATE, BridgeConfig::default())
    }

    /// Dispatch a line, return everything written into the stream.
    pub fn send(&self, line: &str) -> String {
        self.session.handle_line(line).unwrap();
        self.sink.take()
    }
}

/// Return the only command frame of a wire text.
pub fn command_frame(wire: &str) -> Frame {
    let mut frames: Vec<_> = decode_all(wire)
        .into_iter()
        .filter(|f| f.kind == Kind::Command)
        .collect();
    assert_eq!(frames.len(), 1, "exactly one command frame expected in {wire:?}");
    frames.remove(0)
}

pub fn command_payload(wire: &str) -> Value {
    command_frame(wire).payload_value().unwrap()
}

pub fn event_tags(wire: &str) -> Vec<String> {
    decode_all(wire)
        .into_iter()
        .filter(|f| f.kind == Kind::Event)
        .map(|f| f.tag)
        .collect()
}

//! Host debugger interface.
//!
//! The debugger engine (process control, symbol tables, expression evaluation) is not a part of
//! this crate. Everything the bridge needs from it is described by traits in this module, a host
//! implements them and the bridge only consumes them.

pub mod snapshot;

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::rc::Rc;

/// Symbol owned by a lexical block.
pub trait Symbol {
    /// Stack frame used for value evaluation.
    type Frame;

    fn name(&self) -> &str;
    fn is_argument(&self) -> bool;
    fn is_variable(&self) -> bool;
    fn is_function(&self) -> bool;
    fn is_constant(&self) -> bool;

    /// Render symbol value in the context of a frame.
    fn value(&self, frame: &Self::Frame) -> Result<String>;

    /// Render declared symbol type.
    fn type_name(&self) -> Result<String>;
}

/// Lexical block, a single link in a scope chain.
pub trait Block: Sized {
    type Symbol: Symbol;

    fn symbols(&self) -> &[Self::Symbol];
    fn is_global(&self) -> bool;
    fn is_static(&self) -> bool;

    /// Return enclosing block, `None` for outermost one.
    fn superblock(&self) -> Option<Self>;
}

/// Execution unit (thread) of a debugee.
pub trait Thread {
    /// Probe a numeric field by its name, return `None` if a field is not supported by the host.
    fn field(&self, name: &str) -> Option<u64>;
}

/// Process group (inferior) as the debugger reports it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Inferior {
    pub num: u64,
    /// Zero when a process is not running.
    pub pid: u64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StopReason {
    BreakpointHit,
    SignalReceived,
    EndSteppingRange,
    FunctionFinished,
    #[default]
    Unknown,
}

/// Execution stop description.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stop {
    #[serde(default)]
    pub reason: StopReason,
    #[serde(default)]
    pub thread: Option<u64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub breakpoints: Vec<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signal: Option<String>,
}

/// Debugger lifecycle callbacks.
/// Any callback may be called synchronously, in the middle of a command execution.
pub trait EventHook {
    /// Called when a new object file (executable or shared library) is loaded.
    fn on_new_objfile(&self, filename: &str);

    /// Called when all object files of a program space are unloaded.
    fn on_clear_objfiles(&self, progspace: Option<&str>);

    /// Called when a debugee stops.
    fn on_stop(&self, stop: &Stop);

    /// Called when a debugee resumes.
    fn on_continue(&self, thread: Option<u64>);

    /// Called when a debugee exits.
    fn on_exit(&self, exit_code: Option<i64>);

    fn on_new_thread(&self, thread: u64);

    fn on_new_inferior(&self, inferior: u64);

    fn on_inferior_deleted(&self, inferior: u64);
}

/// Interactive debugger session.
pub trait Debugger {
    type Frame;
    type Symbol: Symbol<Frame = Self::Frame>;
    type Block: Block<Symbol = Self::Symbol>;
    type Thread: Thread;

    /// Execute a CLI command, return its captured textual output.
    /// `from_tty` tells the debugger that a command comes from an interactive terminal.
    ///
    /// A command that fails after it has produced some output (a signal may have fired in the
    /// middle of it) must return [`crate::error::Error::Execute`] with that output, it still has to reach the
    /// client.
    fn execute(&self, command: &str, from_tty: bool) -> Result<String>;

    fn selected_frame(&self) -> Result<Self::Frame>;

    /// Return innermost lexical block of a frame.
    fn frame_block(&self, frame: &Self::Frame) -> Result<Self::Block>;

    /// Return selected thread, `None` if there is no one (no process or a core file without
    /// threads).
    fn selected_thread(&self) -> Option<Self::Thread>;

    fn selected_inferior(&self) -> Inferior;

    /// Return a structured list of known source files if the host supports such a query.
    fn source_files(&self) -> Option<Result<Vec<String>>> {
        None
    }

    /// Subscribe a hook to lifecycle signals.
    fn connect(&self, hook: Rc<dyn EventHook>);
}

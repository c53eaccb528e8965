//! Offline host: replays a debugger state described in TOML.
//!
//! ```toml
//! info_sources = """
//! Source files for which symbols have been read in:
//!
//! /src/main.c, /usr/include/stdio.h
//! """
//!
//! [inferior]
//! num = 1
//! pid = 4242
//!
//! [thread]
//! num = 1
//! global_num = 1
//!
//! [frame]
//! function = "main"
//!
//! [[frame.blocks]]
//! symbols = [{ name = "i", kind = "variable", value = "3", type = "int" }]
//!
//! [[frame.blocks]]
//! global = true
//! symbols = [{ name = "i", kind = "variable", value = "0", type = "int" }]
//!
//! [[commands]]
//! command = "continue"
//! output = "Continuing.\n"
//! events = [{ event = "stop", reason = "breakpoint-hit", thread = 1, breakpoints = [1] }]
//! trailing_output = "Breakpoint 1, main () at main.c:4\n"
//! ```
//!
//! Blocks are listed from innermost to outermost. Commands run "to string": output and every
//! event frame written while a command runs are captured, exactly like a real debugger does.

use crate::debugger::{self, EventHook, Inferior, Stop};
use crate::error::{Error, Result};
use crate::output::Output;
use serde::Deserialize;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::Path;
use std::rc::Rc;
use std::fs;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct State {
    #[serde(default)]
    pub inferior: Inferior,
    /// Numeric thread fields by name, absent if no thread selected.
    #[serde(default)]
    pub thread: Option<BTreeMap<String, u64>>,
    #[serde(default)]
    pub frame: Option<FrameState>,
    /// Structured source list, if set the `info sources` report is never parsed.
    #[serde(default)]
    pub sources: Option<Vec<String>>,
    /// Text of `info sources` command output.
    #[serde(default)]
    pub info_sources: Option<String>,
    #[serde(default)]
    pub commands: Vec<CommandState>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FrameState {
    #[serde(default)]
    pub function: Option<String>,
    #[serde(default)]
    pub blocks: Vec<BlockState>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BlockState {
    #[serde(default)]
    pub global: bool,
    #[serde(default, rename = "static")]
    pub is_static: bool,
    #[serde(default)]
    pub symbols: Vec<SymbolState>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolKind {
    Argument,
    Variable,
    Function,
    Constant,
    /// Labels, typedefs and other symbols without value.
    Other,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SymbolState {
    pub name: String,
    pub kind: SymbolKind,
    #[serde(default)]
    pub value: String,
    #[serde(default, rename = "type")]
    pub type_name: String,
    /// If set, value evaluation fails with this message.
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CommandState {
    pub command: String,
    /// Output written before events are fired.
    #[serde(default)]
    pub output: String,
    #[serde(default)]
    pub events: Vec<Signal>,
    /// Output written after events are fired.
    #[serde(default)]
    pub trailing_output: String,
    /// If set, command fails with this message.
    #[serde(default)]
    pub error: Option<String>,
}

/// Lifecycle signal fired while a command runs.
#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum Signal {
    NewObjfile {
        filename: String,
    },
    ClearObjfiles {
        #[serde(default)]
        progspace: Option<String>,
    },
    Stop(Stop),
    Cont {
        #[serde(default)]
        thread: Option<u64>,
    },
    Exited {
        #[serde(default)]
        exit_code: Option<i64>,
    },
    NewThread {
        id: u64,
    },
    NewInferior {
        id: u64,
    },
    InferiorDeleted {
        id: u64,
    },
}

impl Signal {
    fn fire(&self, hook: &dyn EventHook) {
        match self {
            Signal::NewObjfile { filename } => hook.on_new_objfile(filename),
            Signal::ClearObjfiles { progspace } => hook.on_clear_objfiles(progspace.as_deref()),
            Signal::Stop(stop) => hook.on_stop(stop),
            Signal::Cont { thread } => hook.on_continue(*thread),
            Signal::Exited { exit_code } => hook.on_exit(*exit_code),
            Signal::NewThread { id } => hook.on_new_thread(*id),
            Signal::NewInferior { id } => hook.on_new_inferior(*id),
            Signal::InferiorDeleted { id } => hook.on_inferior_deleted(*id),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Frame {
    pub function: Option<String>,
}

/// Link of a replayed scope chain.
#[derive(Clone)]
pub struct Block {
    chain: Rc<[BlockState]>,
    index: usize,
}

pub struct Thread(BTreeMap<String, u64>);

impl debugger::Symbol for SymbolState {
    type Frame = Frame;

    fn name(&self) -> &str {
        &self.name
    }

    fn is_argument(&self) -> bool {
        self.kind == SymbolKind::Argument
    }

    fn is_variable(&self) -> bool {
        self.kind == SymbolKind::Variable
    }

    fn is_function(&self) -> bool {
        self.kind == SymbolKind::Function
    }

    fn is_constant(&self) -> bool {
        self.kind == SymbolKind::Constant
    }

    fn value(&self, _: &Frame) -> Result<String> {
        match self.error {
            Some(ref e) => Err(Error::Host(e.clone())),
            None => Ok(self.value.clone()),
        }
    }

    fn type_name(&self) -> Result<String> {
        Ok(self.type_name.clone())
    }
}

impl debugger::Block for Block {
    type Symbol = SymbolState;

    fn symbols(&self) -> &[SymbolState] {
        &self.chain[self.index].symbols
    }

    fn is_global(&self) -> bool {
        self.chain[self.index].global
    }

    fn is_static(&self) -> bool {
        self.chain[self.index].is_static
    }

    fn superblock(&self) -> Option<Self> {
        let index = self.index + 1;
        (index < self.chain.len()).then(|| Block {
            chain: self.chain.clone(),
            index,
        })
    }
}

impl debugger::Thread for Thread {
    fn field(&self, name: &str) -> Option<u64> {
        self.0.get(name).copied()
    }
}

/// Host that replays a [`State`].
pub struct SnapshotDebugger {
    output: Output,
    inferior: Inferior,
    thread: Option<BTreeMap<String, u64>>,
    frame: Option<(Frame, Rc<[BlockState]>)>,
    sources: Option<Vec<String>>,
    info_sources: Option<String>,
    commands: Vec<CommandState>,
    hooks: RefCell<Vec<Rc<dyn EventHook>>>,
}

impl SnapshotDebugger {
    /// Create a host, `output` is the stream that commands are executed "to string" from.
    pub fn new(state: State, output: Output) -> Self {
        Self {
            output,
            inferior: state.inferior,
            thread: state.thread,
            frame: state.frame.map(|f| {
                (
                    Frame {
                        function: f.function,
                    },
                    Rc::from(f.blocks),
                )
            }),
            sources: state.sources,
            info_sources: state.info_sources,
            commands: state.commands,
            hooks: RefCell::default(),
        }
    }

    pub fn from_toml(state: &str, output: Output) -> Result<Self> {
        Ok(Self::new(toml::from_str(state)?, output))
    }

    pub fn from_file(path: impl AsRef<Path>, output: Output) -> Result<Self> {
        Self::from_toml(&fs::read_to_string(path)?, output)
    }

    /// Fire a signal as if the debugger did it on its own (not inside a command).
    pub fn fire(&self, signal: &Signal) {
        // a hook may subscribe another hook, don't hold the borrow while calling
        let hooks = self.hooks.borrow().clone();
        for hook in hooks {
            signal.fire(hook.as_ref());
        }
    }

    fn run_command(&self, command: &CommandState) -> Result<String> {
        let (result, captured) = self.output.capture(|| -> Result<()> {
            self.output.write(&command.output)?;
            command.events.iter().for_each(|signal| self.fire(signal));
            self.output.write(&command.trailing_output)?;
            Ok(())
        });
        result?;

        match command.error {
            Some(ref message) => Err(Error::Execute {
                message: message.clone(),
                output: captured,
            }),
            None => Ok(captured),
        }
    }
}

impl debugger::Debugger for SnapshotDebugger {
    type Frame = Frame;
    type Symbol = SymbolState;
    type Block = Block;
    type Thread = Thread;

    fn execute(&self, command: &str, _: bool) -> Result<String> {
        let command = command.trim();
        if let Some(canned) = self.commands.iter().find(|c| c.command == command) {
            return self.run_command(canned);
        }

        match (command, &self.info_sources) {
            ("info sources", Some(report)) => Ok(report.clone()),
            _ => Err(Error::Host(format!(
                "Undefined command: \"{command}\".  Try \"help\"."
            ))),
        }
    }

    fn selected_frame(&self) -> Result<Frame> {
        self.frame
            .as_ref()
            .map(|(frame, _)| frame.clone())
            .ok_or(Error::NoFrameSelected)
    }

    fn frame_block(&self, _: &Frame) -> Result<Block> {
        match self.frame {
            Some((_, ref chain)) if !chain.is_empty() => Ok(Block {
                chain: chain.clone(),
                index: 0,
            }),
            _ => Err(Error::NoBlock),
        }
    }

    fn selected_thread(&self) -> Option<Thread> {
        self.thread.clone().map(Thread)
    }

    fn selected_inferior(&self) -> Inferior {
        self.inferior
    }

    fn source_files(&self) -> Option<Result<Vec<String>>> {
        self.sources.clone().map(Ok)
    }

    fn connect(&self, hook: Rc<dyn EventHook>) {
        self.hooks.borrow_mut().push(hook);
    }
}

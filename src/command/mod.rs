//! Command units available to a client.
//!
//! Each unit has a unique name, that name is used for dispatching a client request and as a tag
//! of the frame that carries the unit result. Every invocation is handled the same way: run the
//! unit action with a raw argument string, serialize the returned value, write exactly one
//! command frame and flush it. Raw text that an action writes on its own goes to the stream
//! before the frame and is not a part of the frame payload.

pub mod concat;
pub mod context;
pub mod exec;
pub mod group;
pub mod sources;
pub mod thread;
pub mod vars;

pub use concat::ConcatCommand;
pub use context::ContextCommand;
pub use exec::ExecCommand;
pub use group::GroupCommand;
pub use sources::SourcesCommand;
pub use thread::ThreadCommand;
pub use vars::VarsCommand;

use crate::config::BridgeConfig;
use crate::debugger::Debugger;
use crate::error::{Error, Result};
use crate::gdbjs_debug;
use crate::output::Output;
use crate::protocol::{self, Kind};
use crate::source::SourceRegistry;
use serde_json::Value;

/// Everything a command unit may use while running.
pub struct Context<'a, D: Debugger> {
    pub debugger: &'a D,
    pub output: &'a Output,
    pub sources: &'a SourceRegistry,
    pub config: &'a BridgeConfig,
}

/// Named invokable unit.
pub trait Command<D: Debugger> {
    fn name(&self) -> &'static str;

    /// Run a unit with raw (unparsed) argument string.
    fn action(&self, ctx: &Context<'_, D>, arg: &str, from_tty: bool) -> anyhow::Result<Value>;
}

/// Set of command units, built once at session start.
pub struct Registry<D: Debugger> {
    units: Vec<Box<dyn Command<D>>>,
}

impl<D: Debugger> Default for Registry<D> {
    fn default() -> Self {
        Self { units: vec![] }
    }
}

impl<D: Debugger> Registry<D> {
    /// Create a registry with all builtin units.
    pub fn with_builtins() -> Self {
        let units: Vec<Box<dyn Command<D>>> = vec![
            Box::new(ExecCommand),
            Box::new(ConcatCommand),
            Box::new(ContextCommand),
            Box::new(VarsCommand),
            Box::new(ThreadCommand),
            Box::new(GroupCommand),
            Box::new(SourcesCommand),
        ];
        Self { units }
    }

    /// Add a unit, names must be unique and usable as a frame tag.
    pub fn register(&mut self, unit: impl Command<D> + 'static) -> Result<()> {
        if !protocol::is_valid_tag(unit.name()) {
            return Err(Error::InvalidTag(unit.name().to_string()));
        }
        if self.find(unit.name()).is_some() {
            return Err(Error::DuplicateCommand(unit.name().to_string()));
        }
        self.units.push(Box::new(unit));
        Ok(())
    }

    /// Return unit names in registration order.
    pub fn names(&self) -> Vec<&'static str> {
        self.units.iter().map(|u| u.name()).collect()
    }

    pub fn find(&self, name: &str) -> Option<&dyn Command<D>> {
        self.units
            .iter()
            .find(|u| u.name() == name)
            .map(|u| u.as_ref())
    }

    /// Run a unit and write its result as a command frame.
    pub fn invoke(&self, ctx: &Context<'_, D>, name: &str, arg: &str, from_tty: bool) -> Result<()> {
        let unit = self
            .find(name)
            .ok_or_else(|| Error::UnknownCommand(name.to_string()))?;

        gdbjs_debug!(target: "gdbjs", "invoke `{name}` with argument {arg:?}");
        let value = unit
            .action(ctx, arg, from_tty)
            .map_err(|error| Error::Command {
                command: name.to_string(),
                error,
            })?;

        let frame = protocol::encode(Kind::Command, unit.name(), &value)?;
        ctx.output.write(&frame)?;
        Ok(())
    }
}

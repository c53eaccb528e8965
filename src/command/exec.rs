use crate::command::{Command, Context};
use crate::debugger::Debugger;
use crate::error::Error;
use crate::event;
use serde_json::Value;

/// Execute a debugger CLI command and expose its output.
///
/// Output is written into the stream as raw text (event frames fired while the command was
/// running are re-emitted as standalone frames) and returned as a frame payload.
pub struct ExecCommand;

pub struct Handler<'a, D: Debugger> {
    ctx: &'a Context<'a, D>,
}

impl<'a, D: Debugger> Handler<'a, D> {
    pub fn new(ctx: &'a Context<'a, D>) -> Self {
        Self { ctx }
    }

    /// Run a command, return its raw output without event frames.
    /// Output of a failed command is forwarded too, before the error is returned.
    pub fn handle(&self, command: &str, from_tty: bool) -> anyhow::Result<String> {
        match self.ctx.debugger.execute(command, from_tty) {
            Ok(captured) => Ok(event::rescue(self.ctx.output, &captured)?),
            Err(e) => {
                if let Error::Execute { ref output, .. } = e {
                    event::rescue(self.ctx.output, output)?;
                }
                Err(e.into())
            }
        }
    }
}

impl<D: Debugger> Command<D> for ExecCommand {
    fn name(&self) -> &'static str {
        "exec"
    }

    fn action(&self, ctx: &Context<'_, D>, arg: &str, from_tty: bool) -> anyhow::Result<Value> {
        Ok(Value::String(Handler::new(ctx).handle(arg, from_tty)?))
    }
}

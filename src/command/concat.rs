use crate::command::exec::Handler as ExecHandler;
use crate::command::{Command, Context};
use crate::debugger::Debugger;
use serde_json::Value;

/// Execute a command and print its output right after a client provided prefix.
///
/// Argument is `PREFIX COMMAND`, split on the first space. A prefix lets a client find the
/// beginning of the command output among other text.
pub struct ConcatCommand;

impl<D: Debugger> Command<D> for ConcatCommand {
    fn name(&self) -> &'static str {
        "concat"
    }

    fn action(&self, ctx: &Context<'_, D>, arg: &str, from_tty: bool) -> anyhow::Result<Value> {
        let (prefix, command) = arg.split_once(' ').unwrap_or((arg, ""));

        ctx.output.write(prefix)?;
        let raw = match command {
            "" => String::new(),
            command => ExecHandler::new(ctx).handle(command, from_tty)?,
        };

        Ok(Value::String(format!("{prefix}{raw}")))
    }
}

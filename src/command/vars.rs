use crate::command::context::Handler as ContextHandler;
use crate::command::{Command, Context};
use crate::debugger::Debugger;
use serde_json::Value;

/// List arguments and variables of every scope at the selected frame, shadowed ones included.
pub struct VarsCommand;

impl<D: Debugger> Command<D> for VarsCommand {
    fn name(&self) -> &'static str {
        "vars"
    }

    fn action(&self, ctx: &Context<'_, D>, _: &str, _: bool) -> anyhow::Result<Value> {
        let records = ContextHandler::new(ctx).handle(false, false)?;
        Ok(serde_json::to_value(records)?)
    }
}

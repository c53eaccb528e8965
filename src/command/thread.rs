use crate::command::{Command, Context};
use crate::debugger::Debugger;
use crate::thread;
use serde_json::Value;

/// Identity of the selected thread and its thread group.
pub struct ThreadCommand;

impl<D: Debugger> Command<D> for ThreadCommand {
    fn name(&self) -> &'static str {
        "thread"
    }

    fn action(&self, ctx: &Context<'_, D>, _: &str, _: bool) -> anyhow::Result<Value> {
        Ok(serde_json::to_value(thread::resolve(ctx.debugger))?)
    }
}

use crate::command::{Command, Context};
use crate::debugger::Debugger;
use crate::thread;
use serde_json::Value;

/// Identity of the selected thread group (inferior).
pub struct GroupCommand;

impl<D: Debugger> Command<D> for GroupCommand {
    fn name(&self) -> &'static str {
        "group"
    }

    fn action(&self, ctx: &Context<'_, D>, _: &str, _: bool) -> anyhow::Result<Value> {
        Ok(serde_json::to_value(thread::resolve_group(ctx.debugger))?)
    }
}

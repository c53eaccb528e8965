use crate::command::{Command, Context};
use crate::debugger::Debugger;
use serde_json::Value;

/// Search known source files with a regular expression, empty expression matches any file.
pub struct SourcesCommand;

impl<D: Debugger> Command<D> for SourcesCommand {
    fn name(&self) -> &'static str {
        "sources"
    }

    fn action(&self, ctx: &Context<'_, D>, arg: &str, _: bool) -> anyhow::Result<Value> {
        let files = ctx.sources.search(ctx.debugger, arg)?;
        Ok(serde_json::to_value(files)?)
    }
}
